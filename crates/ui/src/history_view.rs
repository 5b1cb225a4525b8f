use api_client::HistoryPage;
use ratatui::{prelude::*, widgets::*};
use reader_core::types::{HistoryEntry, ReadingStats};

/// Reading history and aggregate statistics for the signed-in user.
pub struct HistoryView {
    pub stats: ReadingStats,
    pub entries: Vec<HistoryEntry>,
    pub selected: usize,
    pub page: u32,
    pub pages: u32,
}

impl HistoryView {
    pub fn new(stats: ReadingStats, history: HistoryPage) -> Self {
        Self {
            stats,
            entries: history.history,
            selected: 0,
            page: history.page.max(1),
            pages: history.pages,
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub fn selected_book_id(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.book_id.as_str())
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let stats = &self.stats;
        let summary = vec![
            Line::styled(
                " Reading history",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(format!(
                " Started: {} · Completed: {} · In progress: {}",
                stats.total_books_started, stats.books_completed, stats.books_in_progress
            )),
            Line::raw(format!(
                " Pages read: {} · Avg progress: {}% · Completion rate: {}%",
                stats.total_pages_read,
                stats.avg_progress.round() as i64,
                stats.completion_rate.round() as i64
            )),
            Line::raw(format!(" Page {}/{}", self.page, self.pages.max(1))),
        ];
        f.render_widget(Paragraph::new(summary), vchunks[0]);

        if self.entries.is_empty() {
            let empty = Paragraph::new("No reading history yet. Open a book to get started!")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, vchunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let style = if i == self.selected {
                        Style::default().bg(Color::Blue).fg(Color::White)
                    } else {
                        Style::default()
                    };
                    let pct = entry.progress_percentage.round() as i64;
                    let chip = if is_finished(entry) { " ✓ finished" } else { "" };
                    let when = entry
                        .last_read
                        .map(|t| t.format(" · %Y-%m-%d").to_string())
                        .unwrap_or_default();
                    let label = format!(
                        " {} — {} · {}/{} · {pct}%{chip}{when}",
                        entry.book.title,
                        entry.book.author,
                        entry.current_page,
                        entry.total_pages
                    );
                    ListItem::new(Line::from(label)).style(style)
                })
                .collect();
            f.render_widget(List::new(items), vchunks[1]);
        }

        let footer = " j/k select · Enter resume reading · n/p page · Esc back";
        f.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
            vchunks[2],
        );
    }
}

/// Completion is derived from the page counts, same as the progress
/// record, so the chip never disagrees with "current/total".
fn is_finished(entry: &HistoryEntry) -> bool {
    entry.total_pages > 0 && entry.current_page >= entry.total_pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use reader_core::types::BookSummary;

    fn entry(current: usize, total: usize, pct: f64) -> HistoryEntry {
        HistoryEntry {
            book_id: "b1".into(),
            current_page: current,
            total_pages: total,
            progress_percentage: pct,
            last_read: None,
            book: BookSummary {
                id: "b1".into(),
                title: "T".into(),
                author: "A".into(),
                genre: String::new(),
                description: String::new(),
            },
        }
    }

    #[test]
    fn finished_follows_page_counts_not_the_percentage() {
        assert!(is_finished(&entry(3, 3, 0.0)));
        assert!(is_finished(&entry(4, 3, 50.0)));
        // A stale or rounded percentage cannot mark an unfinished book.
        assert!(!is_finished(&entry(2, 3, 100.0)));
        assert!(!is_finished(&entry(0, 0, 100.0)));
    }
}
