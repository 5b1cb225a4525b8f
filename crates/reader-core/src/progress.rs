//! Reading-progress tracking: percentage, elapsed-time label, and the
//! one-shot "book completed" signal.

use chrono::{DateTime, Utc};

use crate::types::ReadingProgress;

/// `round(current/total*100)` clamped to `[0, 100]`; 100 iff on the last
/// page.
pub fn percent(current_page: usize, total_pages: usize) -> u8 {
    if total_pages == 0 {
        return 0;
    }
    let pct = (current_page as f64 / total_pages as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Elapsed reading time since `started`, formatted for the footer. Pure
/// function of its inputs; cheap enough to recompute every render.
pub fn reading_time_label(started: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(started) = started else {
        return "Just started".to_string();
    };
    let mins = (now - started).num_minutes();
    if mins < 1 {
        "Just started".to_string()
    } else if mins < 60 {
        format!("{mins} min")
    } else {
        format!("{}h {}m", mins / 60, mins % 60)
    }
}

/// Cached copy of the backend's progress record plus the latched
/// completion signal for this reading session.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    record: Option<ReadingProgress>,
    completion_signaled: bool,
}

impl ProgressTracker {
    pub fn new(stored: Option<ReadingProgress>) -> Self {
        // A book already finished in an earlier session must not signal
        // completion again.
        let completion_signaled = stored.as_ref().is_some_and(|r| r.completed());
        Self {
            record: stored,
            completion_signaled,
        }
    }

    /// Page to resume at once pagination is known: the stored page clamped
    /// into `[1, total_pages]`, or page 1 when never started.
    pub fn initial_page(&self, total_pages: usize) -> Option<usize> {
        if total_pages == 0 {
            return None;
        }
        let page = match &self.record {
            Some(rec) if rec.current_page >= 1 => rec.current_page.min(total_pages),
            _ => 1,
        };
        Some(page)
    }

    pub fn record(&self) -> Option<&ReadingProgress> {
        self.record.as_ref()
    }

    pub fn started_reading(&self) -> Option<DateTime<Utc>> {
        self.record.as_ref().and_then(|r| r.started_reading)
    }

    /// Replace the cached copy with the record the server returned.
    pub fn store(&mut self, record: ReadingProgress) {
        self.record = Some(record);
    }

    /// Advance the cached copy locally when the server acknowledged the
    /// update without echoing a record back.
    pub fn advance_local(
        &mut self,
        book_id: &str,
        current_page: usize,
        total_pages: usize,
        now: DateTime<Utc>,
    ) {
        let record = self.record.get_or_insert_with(|| ReadingProgress {
            book_id: book_id.to_string(),
            current_page,
            total_pages,
            progress_percentage: 0.0,
            started_reading: Some(now),
            last_read: None,
        });
        record.current_page = current_page;
        record.total_pages = total_pages;
        record.progress_percentage = f64::from(percent(current_page, total_pages));
        record.last_read = Some(now);
    }

    /// True exactly once per session, the first time the cursor reaches
    /// the last page. Later renders at the last page, and re-crossings of
    /// the boundary, stay silent.
    pub fn take_completion(&mut self, current_page: usize, total_pages: usize) -> bool {
        if total_pages == 0 || current_page < total_pages || self.completion_signaled {
            return false;
        }
        self.completion_signaled = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(current: usize, total: usize) -> ReadingProgress {
        ReadingProgress {
            book_id: "b1".into(),
            current_page: current,
            total_pages: total,
            progress_percentage: 0.0,
            started_reading: None,
            last_read: None,
        }
    }

    #[test]
    fn percent_is_rounded_and_clamped() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 3), 0);
        assert_eq!(percent(10, 3), 100);
        assert_eq!(percent(1, 0), 0);
    }

    #[test]
    fn percent_is_100_only_on_last_page() {
        for page in 1..100 {
            assert!(percent(page, 100) < 100);
        }
        assert_eq!(percent(100, 100), 100);
    }

    #[test]
    fn time_label_thresholds() {
        let now = Utc::now();
        assert_eq!(reading_time_label(None, now), "Just started");
        assert_eq!(
            reading_time_label(Some(now - Duration::seconds(30)), now),
            "Just started"
        );
        assert_eq!(
            reading_time_label(Some(now - Duration::minutes(5)), now),
            "5 min"
        );
        assert_eq!(
            reading_time_label(Some(now - Duration::minutes(59)), now),
            "59 min"
        );
        assert_eq!(
            reading_time_label(Some(now - Duration::minutes(60)), now),
            "1h 0m"
        );
        assert_eq!(
            reading_time_label(Some(now - Duration::minutes(135)), now),
            "2h 15m"
        );
    }

    #[test]
    fn no_stored_progress_starts_at_page_one_without_completion() {
        let mut tracker = ProgressTracker::new(None);
        assert_eq!(tracker.initial_page(3), Some(1));
        assert!(!tracker.take_completion(1, 3));
    }

    #[test]
    fn stored_page_is_clamped_into_range() {
        let tracker = ProgressTracker::new(Some(record(10, 12)));
        assert_eq!(tracker.initial_page(3), Some(3));
        assert_eq!(tracker.initial_page(0), None);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut tracker = ProgressTracker::new(None);
        assert!(!tracker.take_completion(2, 3));
        assert!(tracker.take_completion(3, 3));
        assert!(!tracker.take_completion(3, 3));
        // Paging back and returning to the last page stays silent.
        assert!(!tracker.take_completion(2, 3));
        assert!(!tracker.take_completion(3, 3));
    }

    #[test]
    fn already_completed_book_does_not_resignal() {
        let mut tracker = ProgressTracker::new(Some(record(3, 3)));
        assert!(!tracker.take_completion(3, 3));
    }

    #[test]
    fn advance_local_creates_then_updates_the_cached_record() {
        let now = Utc::now();
        let mut tracker = ProgressTracker::new(None);
        tracker.advance_local("b1", 2, 4, now);
        let rec = tracker.record().unwrap();
        assert_eq!(rec.current_page, 2);
        assert_eq!(rec.progress_percentage, 50.0);
        assert_eq!(rec.started_reading, Some(now));

        let later = now + Duration::minutes(3);
        tracker.advance_local("b1", 4, 4, later);
        let rec = tracker.record().unwrap();
        assert_eq!(rec.current_page, 4);
        assert_eq!(rec.progress_percentage, 100.0);
        // The start timestamp survives later updates.
        assert_eq!(rec.started_reading, Some(now));
        assert_eq!(rec.last_read, Some(later));
    }
}
