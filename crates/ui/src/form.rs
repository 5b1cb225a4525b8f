use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

/// Single-line text input for the form views.
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }

    pub fn with_value(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            masked: false,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.value.grapheme_indices(true).last() {
            self.value.truncate(idx);
        }
    }

    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.graphemes(true).count())
        } else {
            self.value.clone()
        }
    }
}

/// Ordered form fields with a focus cursor.
pub struct FieldSet {
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl FieldSet {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.backspace();
        }
    }

    /// One line per field; the focused field carries a caret and accent
    /// styling.
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == self.focus;
                let marker = if focused { "> " } else { "  " };
                let mut spans = vec![
                    Span::raw(marker.to_string()),
                    Span::styled(
                        format!("{:<12}", format!("{}:", field.label)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(field.display()),
                ];
                if focused {
                    spans.push(Span::styled("▏", Style::default().fg(Color::Blue)));
                }
                let line = Line::from(spans);
                if focused {
                    line.style(Style::default().fg(Color::Blue))
                } else {
                    line
                }
            })
            .collect()
    }
}

/// Small centered one-line prompt, used for search and page-jump input.
pub fn render_prompt(f: &mut Frame<'_>, area: Rect, title: &str, value: &str) {
    let mut width = ((area.width as f32) * 0.5) as u16;
    width = width.max(20).min(area.width.saturating_sub(2).max(1));
    let height: u16 = 3;
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let prompt = Paragraph::new(format!("> {value}")).block(block);
    f.render_widget(Clear, popup_area);
    f.render_widget(prompt, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_field_hides_its_value() {
        let mut field = TextField::masked("Password");
        field.push_char('a');
        field.push_char('b');
        assert_eq!(field.display(), "••");
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn backspace_removes_whole_graphemes() {
        let mut field = TextField::new("Name");
        field.value = "año".to_string();
        field.backspace();
        assert_eq!(field.value, "añ");
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut field = TextField::new("Name");
        field.push_char('\t');
        field.push_char('x');
        assert_eq!(field.value, "x");
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = FieldSet::new(vec![TextField::new("A"), TextField::new("B")]);
        form.focus_next();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert_eq!(form.focus, 1);
    }
}
