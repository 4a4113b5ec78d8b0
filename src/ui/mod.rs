pub mod board;
pub mod form;
pub mod help;
pub mod matrix;

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Mode, Notification, NotificationLevel, View};
use crate::models::Task;
use crate::models::quadrant::IMPORTANT_MIN_PRIORITY;

/// Main render function.
pub fn render(f: &mut Frame, app: &App) {
    match app.view {
        View::Matrix => matrix::render(f, f.area(), app),
        View::Board => board::render(f, f.area(), app),
    }

    match app.mode {
        Mode::Form => {
            if let Some(form) = &app.form {
                form::render(f, form);
            }
        }
        Mode::ConfirmDelete => render_confirm_delete(f, app),
        Mode::ThresholdInput => render_threshold_input(f, app),
        Mode::Help => help::render(f, f.area()),
        Mode::Normal => {}
    }

    if let Some(ref notification) = app.notification {
        render_notification(f, f.area(), notification);
    }
}

/// One task row: priority dot, title, due date. Overdue dates turn red.
pub(crate) fn task_line(task: &Task, selected: bool, today: NaiveDate) -> Line<'_> {
    let dot_color = if task.priority >= IMPORTANT_MIN_PRIORITY {
        Color::Red
    } else if task.priority >= 4 {
        Color::Yellow
    } else {
        Color::Blue
    };

    let due_style = if task.due_date < today {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let selection_indicator = if selected {
        Span::styled("▶ ", Style::default().fg(Color::White))
    } else {
        Span::raw("  ")
    };

    Line::from(vec![
        Span::raw(" "),
        selection_indicator,
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::raw(task.title.as_str()),
        Span::raw(" "),
        Span::styled(format!("({})", task.due_date), due_style),
    ])
}

/// Render the notification bar.
fn render_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    let notification_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 3,
    };

    let (bg_color, fg_color, prefix) = match notification.level {
        NotificationLevel::Info => (Color::Blue, Color::White, "ℹ"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
        NotificationLevel::Warning => (Color::Yellow, Color::Black, "⚠"),
        NotificationLevel::Error => (Color::Red, Color::White, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(
            format!(" {} ", prefix),
            Style::default()
                .fg(fg_color)
                .bg(bg_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&notification.message, Style::default().fg(fg_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color))
        .style(Style::default().bg(bg_color));

    f.render_widget(Paragraph::new(content).block(block), notification_area);
}

/// Render the delete confirmation dialog.
fn render_confirm_delete(f: &mut Frame, app: &App) {
    let title = app
        .pending_delete
        .as_deref()
        .and_then(|id| app.store.get(id))
        .map(|t| t.title.clone())
        .unwrap_or_else(|| "this task".to_string());

    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title("  Delete task  ")
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .border_type(BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(format!("Delete \"{}\"? This cannot be undone.", title))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let hint = Paragraph::new("y: delete    n / Esc: keep")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[1]);
}

/// Render the custom threshold input dialog.
fn render_threshold_input(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title("  Urgency threshold  ")
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let prompt = Paragraph::new("Mark as urgent if due within this many days:")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(prompt, chunks[0]);

    let input = Paragraph::new(format!(" {}▌", app.threshold_input))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(input, chunks[1]);

    let hint = Paragraph::new("Enter: apply    Esc: cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[2]);
}

/// Centered rect helper for dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
