use api_client::{BookPage, BookQuery, SortKey};
use ratatui::{prelude::*, widgets::*};
use reader_core::types::BookSummary;

use crate::form::{render_prompt, TextField};

/// Catalog view: server-side search, sort and pagination over the book
/// list.
pub struct LibraryView {
    pub items: Vec<BookSummary>,
    pub selected: usize,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    pub sort: SortKey,
    pub search: String,
    pub author: String,
    pub prompt: Option<TextField>,
}

impl Default for LibraryView {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryView {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            total: 0,
            page: 1,
            pages: 0,
            sort: SortKey::default(),
            search: String::new(),
            author: String::new(),
            prompt: None,
        }
    }

    pub fn query(&self) -> BookQuery {
        BookQuery {
            page: self.page,
            search: self.search.clone(),
            author: self.author.clone(),
            sort: self.sort,
            ..BookQuery::default()
        }
    }

    pub fn set_page(&mut self, result: BookPage) {
        self.items = result.books;
        self.total = result.total;
        self.page = result.page.max(1);
        self.pages = result.pages;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.items.get(self.selected).map(|b| b.id.as_str())
    }

    pub fn render(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        username: Option<&str>,
        status: Option<&str>,
    ) {
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let mut header = format!(
            " Books · {} titles · sort: {} · page {}/{}",
            self.total,
            self.sort.label(),
            self.page,
            self.pages.max(1)
        );
        if !self.search.is_empty() {
            header.push_str(&format!(" · search: \"{}\"", self.search));
        }
        if !self.author.is_empty() {
            header.push_str(&format!(" · author: \"{}\"", self.author));
        }
        let who = username
            .map(|name| format!("{name} "))
            .unwrap_or_else(|| "not signed in ".to_string());
        let pad = (vchunks[0].width as usize)
            .saturating_sub(header.chars().count() + who.chars().count());
        let header_line = Line::from(vec![
            Span::styled(header, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::styled(who, Style::default().fg(Color::Blue)),
        ]);
        f.render_widget(Paragraph::new(header_line), vchunks[0]);

        if self.items.is_empty() {
            let empty = Paragraph::new("No books found. Press / to search or a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, vchunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .items
                .iter()
                .enumerate()
                .map(|(i, book)| {
                    let style = if i == self.selected {
                        Style::default().bg(Color::Blue).fg(Color::White)
                    } else {
                        Style::default()
                    };
                    let mut label = format!(" {} — {}", book.title, book.author);
                    if !book.genre.is_empty() {
                        label.push_str(&format!("  [{}]", book.genre));
                    }
                    ListItem::new(Line::from(label)).style(style)
                })
                .collect();
            f.render_widget(List::new(items), vchunks[1]);
        }

        let footer = status.map(str::to_string).unwrap_or_else(|| {
            " j/k select · Enter read · / search · f author · s sort · n/p page · a add · h history · m profile · l sign in · r register · x sign out · q quit"
                .to_string()
        });
        f.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
            vchunks[2],
        );

        if let Some(prompt) = &self.prompt {
            let title = format!("{} (Enter submit, Esc cancel)", prompt.label);
            render_prompt(f, area, &title, &prompt.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> BookSummary {
        BookSummary {
            id: id.into(),
            title: format!("Book {id}"),
            author: "A".into(),
            genre: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn selection_clamps_to_list_bounds() {
        let mut view = LibraryView::new();
        view.items = vec![summary("a"), summary("b")];
        view.up();
        assert_eq!(view.selected, 0);
        view.down();
        view.down();
        assert_eq!(view.selected, 1);
        assert_eq!(view.selected_id(), Some("b"));
    }

    #[test]
    fn set_page_clamps_stale_selection() {
        let mut view = LibraryView::new();
        view.items = vec![summary("a"), summary("b"), summary("c")];
        view.selected = 2;
        view.set_page(BookPage {
            books: vec![summary("d")],
            total: 1,
            page: 1,
            pages: 1,
        });
        assert_eq!(view.selected, 0);
        assert_eq!(view.selected_id(), Some("d"));
    }

    #[test]
    fn query_carries_view_state() {
        let mut view = LibraryView::new();
        view.page = 3;
        view.search = "dune".into();
        view.author = "herbert".into();
        view.sort = SortKey::Author;
        let query = view.query();
        assert_eq!(query.page, 3);
        assert_eq!(query.search, "dune");
        assert_eq!(query.author, "herbert");
        assert_eq!(query.sort, SortKey::Author);
    }
}
