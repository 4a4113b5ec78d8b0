use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::centered_rect;

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn entry(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", key), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}

/// Render the key cheatsheet overlay.
pub fn render(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 80, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keys (Esc or ? to close) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = vec![
        section("Navigation"),
        Line::from(""),
        entry("j, ↓", "next task"),
        entry("k, ↑", "previous task"),
        entry("h, ←", "column to the left"),
        entry("l, →", "column to the right"),
        entry("q", "quit"),
        Line::from(""),
        section("Views"),
        Line::from(""),
        entry("m", "Eisenhower matrix"),
        entry("b", "kanban board"),
        entry("Tab", "flip between views"),
        Line::from(""),
        section("Tasks"),
        Line::from(""),
        entry("a, n", "new task"),
        entry("e, Enter", "edit selected task"),
        entry("d", "delete selected task"),
        entry("H", "move task one column left"),
        entry("L", "move task one column right"),
        entry("1 2 3", "send task to column (board)"),
    ];

    let right = vec![
        section("Matrix controls"),
        Line::from(""),
        entry("u", "cycle threshold 0/3/7/30"),
        entry("+ / -", "threshold one day up/down"),
        entry("t", "type a custom threshold"),
        entry("1 2 3", "toggle status filter"),
        Line::from(""),
        section("Task form"),
        Line::from(""),
        entry("Tab", "next field"),
        entry("S-Tab", "previous field"),
        entry("Enter", "save (newline in description)"),
        entry("Ctrl+S", "save from any field"),
        entry("← / →", "cycle status field"),
        entry("↑ / ↓", "step priority field"),
        entry("Esc", "discard the form"),
    ];

    f.render_widget(Paragraph::new(left), columns[0]);
    f.render_widget(Paragraph::new(right), columns[1]);
}
