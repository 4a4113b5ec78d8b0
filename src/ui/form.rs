use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tui_textarea::{CursorMove, TextArea};

use crate::models::task::{self, DATE_FORMAT, PRIORITY_MAX};
use crate::models::{FieldError, Task, TaskDraft, TaskStatus};
use crate::ui::centered_rect;

/// What a key press did to the open form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Cancel,
}

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    DueDate,
    Status,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::DueDate,
        FormField::Status,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> FormField {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> FormField {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Field name validation errors carry.
    fn key(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Priority => "priority",
            FormField::DueDate => "due_date",
            FormField::Status => "status",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority (0-10)",
            FormField::DueDate => "Due date (YYYY-MM-DD)",
            FormField::Status => "Status",
        }
    }
}

/// State of the task creation/edit dialog.
pub struct TaskForm {
    /// Id of the task being edited. None when creating.
    pub editing: Option<String>,
    pub focus: FormField,
    pub title: String,
    pub description: TextArea<'static>,
    pub priority: String,
    pub due_date: String,
    pub status: TaskStatus,
    pub errors: Vec<FieldError>,
}

impl TaskForm {
    /// Empty form with the usual defaults: priority 5, due today, To Do.
    pub fn new() -> Self {
        Self {
            editing: None,
            focus: FormField::Title,
            title: String::new(),
            description: description_area(""),
            priority: "5".to_string(),
            due_date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            status: TaskStatus::Todo,
            errors: Vec::new(),
        }
    }

    /// Form prefilled with an existing task.
    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id.clone()),
            focus: FormField::Title,
            title: task.title.clone(),
            description: description_area(&task.description),
            priority: task.priority.to_string(),
            due_date: task.due_date.format(DATE_FORMAT).to_string(),
            status: task.status,
            errors: Vec::new(),
        }
    }

    /// Route a key press to the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        // Ctrl+S submits from anywhere; the description field eats Enter.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return FormAction::Submit;
        }
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return FormAction::Continue;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return FormAction::Continue;
            }
            _ => {}
        }

        match self.focus {
            FormField::Title => self.handle_title_key(key),
            FormField::Description => self.handle_description_key(key),
            FormField::Priority => self.handle_priority_key(key),
            FormField::DueDate => self.handle_due_date_key(key),
            FormField::Status => self.handle_status_key(key),
        }
    }

    fn handle_title_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Backspace => {
                self.title.pop();
                FormAction::Continue
            }
            KeyCode::Char(c) => {
                self.title.push(c);
                FormAction::Continue
            }
            _ => FormAction::Continue,
        }
    }

    // tui-textarea ships against ratatui's bundled crossterm, so key events
    // from this crate's crossterm cannot convert into its Input type; the
    // widget is driven through its edit methods instead.
    fn handle_description_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Char(c) => self.description.insert_char(c),
            KeyCode::Enter => self.description.insert_newline(),
            KeyCode::Backspace => {
                self.description.delete_char();
            }
            KeyCode::Delete => {
                self.description.delete_next_char();
            }
            KeyCode::Left => self.description.move_cursor(CursorMove::Back),
            KeyCode::Right => self.description.move_cursor(CursorMove::Forward),
            KeyCode::Up => self.description.move_cursor(CursorMove::Up),
            KeyCode::Down => self.description.move_cursor(CursorMove::Down),
            KeyCode::Home => self.description.move_cursor(CursorMove::Head),
            KeyCode::End => self.description.move_cursor(CursorMove::End),
            _ => {}
        }
        FormAction::Continue
    }

    fn handle_priority_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Backspace => {
                self.priority.pop();
                FormAction::Continue
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.priority.len() < 2 {
                    self.priority.push(c);
                }
                FormAction::Continue
            }
            KeyCode::Up => {
                self.step_priority(1);
                FormAction::Continue
            }
            KeyCode::Down => {
                self.step_priority(-1);
                FormAction::Continue
            }
            _ => FormAction::Continue,
        }
    }

    fn handle_due_date_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Backspace => {
                self.due_date.pop();
                FormAction::Continue
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if self.due_date.len() < 10 {
                    self.due_date.push(c);
                }
                FormAction::Continue
            }
            _ => FormAction::Continue,
        }
    }

    fn handle_status_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Left | KeyCode::Up => {
                self.status = self.status.prev();
                FormAction::Continue
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                self.status = self.status.next();
                FormAction::Continue
            }
            _ => FormAction::Continue,
        }
    }

    fn step_priority(&mut self, delta: i8) {
        let current = self.priority.trim().parse::<i8>().unwrap_or(5);
        let next = (current + delta).clamp(0, PRIORITY_MAX as i8);
        self.priority = next.to_string();
    }

    /// Validate and convert to a draft; per-field errors on failure.
    pub fn to_draft(&self) -> Result<TaskDraft, Vec<FieldError>> {
        task::draft_from_input(
            &self.title,
            &self.description.lines().join("\n"),
            &self.priority,
            &self.due_date,
            self.status,
        )
    }

    fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field.key())
    }

    /// Bordered block for one field. Errors win over focus for the border
    /// color and put their message in the title.
    fn field_block(&self, field: FormField) -> Block<'_> {
        let focused = self.focus == field;
        let error = self.error_for(field);

        let border_style = if error.is_some() {
            Style::default().fg(Color::Red)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let title = match error {
            Some(e) => Line::from(vec![
                Span::raw(format!(" {} ", field.label())),
                Span::styled(
                    format!("{} ", e.message),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(format!(" {} ", field.label())),
        };

        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .border_type(BorderType::Rounded)
    }

    fn text_with_cursor(&self, field: FormField, value: &str) -> String {
        if self.focus == field {
            format!(" {}▌", value)
        } else {
            format!(" {}", value)
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

fn description_area(content: &str) -> TextArea<'static> {
    let mut textarea = if content.is_empty() {
        TextArea::default()
    } else {
        TextArea::from(content.lines().map(|s| s.to_string()))
    };
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text("Optional details");
    textarea
}

/// Render the form dialog.
pub fn render(f: &mut Frame, form: &TaskForm) {
    let area = centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);

    let dialog_title = if form.editing.is_some() {
        "  Edit Task  "
    } else {
        "  New Task  "
    };

    let block = Block::default()
        .title(dialog_title)
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .border_type(BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(5),    // description
            Constraint::Length(3), // priority
            Constraint::Length(3), // due date
            Constraint::Length(3), // status
            Constraint::Length(1), // hint
        ])
        .split(inner);

    let title_field = Paragraph::new(form.text_with_cursor(FormField::Title, &form.title))
        .block(form.field_block(FormField::Title));
    f.render_widget(title_field, chunks[0]);

    let description_block = form.field_block(FormField::Description);
    let description_inner = description_block.inner(chunks[1]);
    f.render_widget(description_block, chunks[1]);
    f.render_widget(&form.description, description_inner);

    let priority_field = Paragraph::new(form.text_with_cursor(FormField::Priority, &form.priority))
        .block(form.field_block(FormField::Priority));
    f.render_widget(priority_field, chunks[2]);

    let due_field = Paragraph::new(form.text_with_cursor(FormField::DueDate, &form.due_date))
        .block(form.field_block(FormField::DueDate));
    f.render_widget(due_field, chunks[3]);

    let status_line = Line::from(vec![
        Span::raw(" ◀ "),
        Span::styled(
            form.status.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ▶"),
    ]);
    let status_field = Paragraph::new(status_line).block(form.field_block(FormField::Status));
    f.render_widget(status_field, chunks[4]);

    let hint = Paragraph::new("Tab: next field    Ctrl+S: save    Esc: cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_task() -> Task {
        let now = Utc::now();
        Task {
            id: "abc".to_string(),
            title: "Water plants".to_string(),
            description: "balcony\nkitchen".to_string(),
            priority: 8,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            status: TaskStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_form_defaults() {
        let form = TaskForm::new();
        assert!(form.editing.is_none());
        assert_eq!(form.priority, "5");
        assert_eq!(form.status, TaskStatus::Todo);
        assert_eq!(
            form.due_date,
            Local::now().date_naive().format(DATE_FORMAT).to_string()
        );
        assert!(form.to_draft().is_err(), "empty title must not validate");
    }

    #[test]
    fn test_edit_form_prefills() {
        let task = sample_task();
        let form = TaskForm::edit(&task);
        assert_eq!(form.editing.as_deref(), Some("abc"));
        assert_eq!(form.title, "Water plants");
        assert_eq!(form.priority, "8");
        assert_eq!(form.due_date, "2026-09-01");
        assert_eq!(form.status, TaskStatus::InProgress);

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.description, "balcony\nkitchen");
    }

    #[test]
    fn test_typing_into_title() {
        let mut form = TaskForm::new();
        for c in "hi".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.title, "hi");
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.title, "h");
    }

    #[test]
    fn test_description_field_receives_keystrokes() {
        let mut form = TaskForm::new();
        form.title = "t".to_string();
        form.focus = FormField::Description;

        for c in "first".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        form.handle_key(key(KeyCode::Enter));
        for c in "second".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        form.handle_key(key(KeyCode::Backspace));
        form.handle_key(key(KeyCode::Left));
        form.handle_key(key(KeyCode::Char('!')));
        assert_eq!(form.description.lines(), ["first", "seco!n"]);

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.description, "first\nseco!n");
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut form = TaskForm::new();
        assert_eq!(form.focus, FormField::Title);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, FormField::Description);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, FormField::Title);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, FormField::Status);
    }

    #[test]
    fn test_priority_field_accepts_digits_only() {
        let mut form = TaskForm::new();
        form.focus = FormField::Priority;
        form.priority.clear();
        form.handle_key(key(KeyCode::Char('x')));
        assert_eq!(form.priority, "");
        form.handle_key(key(KeyCode::Char('9')));
        assert_eq!(form.priority, "9");
    }

    #[test]
    fn test_priority_stepping_clamps() {
        let mut form = TaskForm::new();
        form.focus = FormField::Priority;
        form.priority = "10".to_string();
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.priority, "10");
        form.priority = "0".to_string();
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.priority, "0");
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.priority, "1");
    }

    #[test]
    fn test_status_field_cycles() {
        let mut form = TaskForm::new();
        form.focus = FormField::Status;
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.status, TaskStatus::InProgress);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.status, TaskStatus::Todo);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.status, TaskStatus::Done);
    }

    #[test]
    fn test_enter_submits_except_in_description() {
        let mut form = TaskForm::new();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);

        form.focus = FormField::Description;
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Continue);
        assert_eq!(form.description.lines().len(), 2);
    }

    #[test]
    fn test_ctrl_s_submits_from_description() {
        let mut form = TaskForm::new();
        form.focus = FormField::Description;
        let submit = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(form.handle_key(submit), FormAction::Submit);
    }

    #[test]
    fn test_esc_cancels() {
        let mut form = TaskForm::new();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
    }

    #[test]
    fn test_to_draft_collects_field_errors() {
        let mut form = TaskForm::new();
        form.priority = "42".to_string();
        form.due_date = "soon".to_string();
        let errors = form.to_draft().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "priority", "due_date"]);
    }
}
