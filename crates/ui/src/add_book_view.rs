use ratatui::{prelude::*, widgets::*};

use crate::form::{FieldSet, TextField};
use crate::layout::centered_rect;

/// Form for submitting a new book to the catalog.
pub struct AddBookView {
    pub form: FieldSet,
    pub error: Option<String>,
}

impl Default for AddBookView {
    fn default() -> Self {
        Self::new()
    }
}

impl AddBookView {
    pub fn new() -> Self {
        Self {
            form: FieldSet::new(vec![
                TextField::new("Title"),
                TextField::new("Author"),
                TextField::new("Genre"),
                TextField::new("Description"),
                TextField::new("Content"),
            ]),
            error: None,
        }
    }

    pub fn title(&self) -> &str {
        self.form.value(0)
    }

    pub fn author(&self) -> &str {
        self.form.value(1)
    }

    pub fn genre(&self) -> &str {
        self.form.value(2)
    }

    pub fn description(&self) -> &str {
        self.form.value(3)
    }

    pub fn content(&self) -> &str {
        self.form.value(4)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(70, 60, area);
        let block = Block::default()
            .title("Add book (Tab next field, Enter submit, Esc back)")
            .borders(Borders::ALL);
        let mut lines = vec![Line::raw("")];
        lines.extend(self.form.lines());
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "  Title, author and content are required.",
            Style::default().fg(Color::DarkGray),
        ));
        if let Some(error) = &self.error {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        let body = Paragraph::new(lines).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(body, popup_area);
    }
}
