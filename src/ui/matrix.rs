use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::models::{Task, TaskStatus};
use crate::ui::task_line;

/// Render the Eisenhower matrix view: a control bar on top, the 2x2
/// quadrant grid below.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_controls(f, chunks[0], app);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let cells = [top[0], top[1], bottom[0], bottom[1]];

    let quadrants = app.quadrants();
    for (i, (title, tasks)) in quadrants.titled().into_iter().enumerate() {
        render_quadrant(f, cells[i], title, tasks, i, app);
    }
}

/// Render the threshold and filter controls.
fn render_controls(f: &mut Frame, area: Rect, app: &App) {
    let threshold = if app.days_threshold == 0 {
        "today".to_string()
    } else {
        format!("{} days", app.days_threshold)
    };

    let mut spans = vec![
        Span::raw(" Urgent if due within: "),
        Span::styled(
            threshold,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Filter: "),
    ];
    for status in TaskStatus::ALL {
        let (mark, style) = if app.status_filter.is_enabled(status) {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("✗", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(
            format!("{} {}  ", mark, status.label()),
            style,
        ));
    }

    let block = Block::default()
        .title(" Eisenhower Matrix ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .border_type(BorderType::Rounded);

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render a single quadrant cell.
fn render_quadrant(
    f: &mut Frame,
    area: Rect,
    title: &str,
    tasks: &[&Task],
    quadrant_idx: usize,
    app: &App,
) {
    let is_focused = app.selected_column == quadrant_idx;
    let today = Local::now().date_naive();

    let accent = match quadrant_idx {
        0 => Color::Red,
        1 => Color::Yellow,
        2 => Color::Cyan,
        _ => Color::DarkGray,
    };

    let (border_color, title_style) = if is_focused {
        (
            Color::White,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )
    } else {
        (Color::DarkGray, Style::default().fg(accent))
    };

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = is_focused && i == app.selected_index;
            let style = if is_selected {
                Style::default()
                    .bg(Color::Rgb(41, 98, 218))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(task_line(task, is_selected, today)).style(style)
        })
        .collect();

    let title_with_count = format!(" {} ({}) ", title, tasks.len());

    let list = List::new(items).block(
        Block::default()
            .title(title_with_count)
            .title_alignment(Alignment::Center)
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .border_type(BorderType::Rounded),
    );

    f.render_widget(list, area);
}
