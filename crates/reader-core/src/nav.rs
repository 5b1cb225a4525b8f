//! Page navigation for the reading view.
//!
//! The cursor is a 1-based page number clamped to `1..=total`. Mutations
//! report whether the page actually changed so the caller can follow up
//! with an explicit persistence step instead of reacting to renders.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: usize,
    total: usize,
}

impl PageCursor {
    /// Cursor at page 1, or an empty cursor when there are no pages.
    pub fn new(total: usize) -> Self {
        Self {
            current: usize::from(total > 0),
            total,
        }
    }

    /// Cursor restored from a stored page, clamped into range. `None`
    /// means "never started" and lands on page 1.
    pub fn restore(total: usize, stored: Option<usize>) -> Self {
        let mut cursor = Self::new(total);
        if let Some(page) = stored {
            cursor.jump(page);
        }
        cursor
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn on_first(&self) -> bool {
        self.current <= 1
    }

    pub fn on_last(&self) -> bool {
        self.current >= self.total
    }

    /// Advance one page; no-op on the last page.
    pub fn next(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; no-op on page 1.
    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a page, clamped into `1..=total`.
    pub fn jump(&mut self, page: usize) -> bool {
        if self.total == 0 {
            return false;
        }
        let target = page.clamp(1, self.total);
        if target == self.current {
            false
        } else {
            self.current = target;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev_clamp_at_bounds() {
        let mut cursor = PageCursor::new(3);
        assert_eq!(cursor.current(), 1);
        assert!(!cursor.prev());
        assert!(cursor.next());
        assert!(cursor.next());
        assert_eq!(cursor.current(), 3);
        assert!(cursor.on_last());
        assert!(!cursor.next());
        assert_eq!(cursor.current(), 3);
    }

    #[test]
    fn jump_clamps_into_range() {
        let mut cursor = PageCursor::new(10);
        assert!(cursor.jump(7));
        assert_eq!(cursor.current(), 7);
        assert!(cursor.jump(99));
        assert_eq!(cursor.current(), 10);
        assert!(cursor.jump(0));
        assert_eq!(cursor.current(), 1);
        assert!(!cursor.jump(1));
    }

    #[test]
    fn any_navigation_sequence_stays_in_range() {
        let total = 5;
        let mut cursor = PageCursor::new(total);
        let moves: [(&str, usize); 9] = [
            ("next", 0),
            ("next", 0),
            ("jump", 100),
            ("next", 0),
            ("prev", 0),
            ("jump", 0),
            ("prev", 0),
            ("jump", 3),
            ("next", 0),
        ];
        for (op, arg) in moves {
            match op {
                "next" => {
                    cursor.next();
                }
                "prev" => {
                    cursor.prev();
                }
                _ => {
                    cursor.jump(arg);
                }
            }
            assert!((1..=total).contains(&cursor.current()));
        }
    }

    #[test]
    fn restore_clamps_stored_page() {
        assert_eq!(PageCursor::restore(3, Some(10)).current(), 3);
        assert_eq!(PageCursor::restore(3, Some(2)).current(), 2);
        assert_eq!(PageCursor::restore(3, None).current(), 1);
        assert_eq!(PageCursor::restore(3, Some(0)).current(), 1);
    }

    #[test]
    fn empty_cursor_ignores_navigation() {
        let mut cursor = PageCursor::new(0);
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.next());
        assert!(!cursor.prev());
        assert!(!cursor.jump(5));
    }
}
