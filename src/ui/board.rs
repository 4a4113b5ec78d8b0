use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::app::App;
use crate::models::{Task, TaskStatus};
use crate::ui::task_line;

/// Render the kanban board view.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = app.board_columns();
    let done_count = columns.done.len();
    let total_count = app.tasks.len();

    let title = format!(" Board ({}/{} done) ", done_count, total_count);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .border_type(BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(inner);

    for (i, status) in TaskStatus::ALL.iter().enumerate() {
        render_column(f, chunks[i], *status, columns.get(*status), i, app);
    }
}

/// Render a single status column.
fn render_column(
    f: &mut Frame,
    area: Rect,
    status: TaskStatus,
    tasks: &[&Task],
    column_idx: usize,
    app: &App,
) {
    let is_focused = app.selected_column == column_idx;
    let today = Local::now().date_naive();

    let (border_color, title_style) = if is_focused {
        (
            Color::White,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        (Color::DarkGray, Style::default().fg(Color::Gray))
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

    let title_with_count = format!(" {} ({}) ", status.label(), tasks.len());

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
