//! Periodic autosave — a deadline the caller polls from the update loop.
//!
//! The scheduler does not own a thread or async task. It keeps exactly one
//! pending deadline on the frame clock (`egui`'s `Input::time`, seconds);
//! `tick` fires when the deadline passes and always installs the next one,
//! whether or not a write happened. Changing the interval replaces the
//! pending deadline, so there is never more than one outstanding.

use thiserror::Error;
use tracing::{debug, warn};

use crate::document::Document;
use crate::store::AutosaveStore;

/// Default autosave interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveConfig {
    pub enabled: bool,
    pub interval_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("the interval must be a whole number of milliseconds")]
    NotANumber,
    #[error("the interval must be greater than zero")]
    NotPositive,
}

#[derive(Debug, Default)]
pub struct AutosaveScheduler {
    pub config: AutosaveConfig,
    /// The one pending tick, on the frame clock. `None` until first armed.
    deadline: Option<f64>,
}

impl AutosaveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn interval_secs(&self) -> f64 {
        self.config.interval_ms as f64 / 1000.0
    }

    /// Poll the schedule. If the deadline has passed, write the document's
    /// buffer to its autosave target (when enabled and named) and install
    /// the next deadline. Returns a user-visible message on failure; writes
    /// themselves are silent, like the rest of the background machinery.
    pub fn tick(&mut self, now: f64, doc: &Document, store: &AutosaveStore) -> Option<String> {
        match self.deadline {
            None => {
                self.deadline = Some(now + self.interval_secs());
                return None;
            }
            Some(deadline) if now < deadline => return None,
            Some(_) => {}
        }
        // Reschedule first: a failed write must not stall the timer.
        self.deadline = Some(now + self.interval_secs());

        if !self.config.enabled {
            return None;
        }
        let name = doc.display_name()?;
        match store.write(name, &doc.content) {
            Ok(()) => {
                debug!(name, "autosave tick wrote buffer");
                None
            }
            Err(e) => {
                warn!(name, error = %e, "autosave tick failed");
                Some(format!("Autosave failed: {e}"))
            }
        }
    }

    /// Flip the enabled flag. The timer keeps running either way; a disabled
    /// scheduler still ticks, it just skips the write.
    pub fn toggle(&mut self) -> bool {
        self.config.enabled = !self.config.enabled;
        self.config.enabled
    }

    /// Install a new interval. Replaces the pending deadline with one
    /// `interval_ms` from `now`.
    pub fn set_interval(&mut self, interval_ms: u64, now: f64) {
        self.config.interval_ms = interval_ms;
        self.deadline = Some(now + self.interval_secs());
    }

    /// Parse and validate user input for the interval. On any rejection the
    /// previous interval and its pending deadline stay untouched.
    pub fn set_interval_from_input(&mut self, input: &str, now: f64) -> Result<u64, IntervalError> {
        let value: i64 = input
            .trim()
            .parse()
            .map_err(|_| IntervalError::NotANumber)?;
        if value <= 0 {
            return Err(IntervalError::NotPositive);
        }
        self.set_interval(value as u64, now);
        Ok(value as u64)
    }

    /// Seconds until the pending tick is due; zero when unarmed or overdue.
    pub fn time_until_due(&self, now: f64) -> f64 {
        self.deadline.map_or(0.0, |d| (d - now).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixture() -> (tempfile::TempDir, AutosaveStore, Document) {
        let tmp = tempfile::tempdir().unwrap();
        let store = AutosaveStore::open(tmp.path().join("autosave")).unwrap();
        let mut doc = Document::new();
        doc.resolve_identity("draft".into(), store.path_for("draft"));
        doc.content = "hello".into();
        (tmp, store, doc)
    }

    /// Drive the scheduler past one full interval.
    fn run_one_interval(sched: &mut AutosaveScheduler, now: &mut f64, doc: &Document, store: &AutosaveStore) -> Option<String> {
        sched.tick(*now, doc, store); // arms (or is not yet due)
        *now += sched.config.interval_ms as f64 / 1000.0;
        sched.tick(*now, doc, store)
    }

    #[test]
    fn writes_the_buffer_after_one_interval() {
        let (_tmp, store, doc) = fixture();
        let mut sched = AutosaveScheduler::new();
        let mut now = 0.0;
        assert!(run_one_interval(&mut sched, &mut now, &doc, &store).is_none());
        assert_eq!(std::fs::read_to_string(store.path_for("draft")).unwrap(), "hello");
    }

    #[test]
    fn repeated_ticks_are_idempotent() {
        let (_tmp, store, doc) = fixture();
        let mut sched = AutosaveScheduler::new();
        let mut now = 0.0;
        run_one_interval(&mut sched, &mut now, &doc, &store);
        let first = std::fs::read(store.path_for("draft")).unwrap();
        now += 1.0;
        sched.tick(now, &doc, &store);
        let second = std::fs::read(store.path_for("draft")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unnamed_documents_are_never_written() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AutosaveStore::open(tmp.path().join("autosave")).unwrap();
        let mut doc = Document::new();
        doc.content = "hello".into();
        let mut sched = AutosaveScheduler::new();
        let mut now = 0.0;
        run_one_interval(&mut sched, &mut now, &doc, &store);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn disabled_scheduler_still_ticks_but_skips_the_write() {
        let (_tmp, store, doc) = fixture();
        let mut sched = AutosaveScheduler::new();
        assert!(!sched.toggle(), "default is enabled, toggle disables");
        let mut now = 0.0;
        run_one_interval(&mut sched, &mut now, &doc, &store);
        assert!(!store.path_for("draft").exists());
        // the schedule kept running while disabled
        assert!(sched.time_until_due(now) > 0.0);

        assert!(sched.toggle());
        now += 1.0;
        sched.tick(now, &doc, &store);
        assert_eq!(std::fs::read_to_string(store.path_for("draft")).unwrap(), "hello");
    }

    #[test]
    fn invalid_intervals_are_rejected_and_leave_the_schedule_alone() {
        let mut sched = AutosaveScheduler::new();
        sched.set_interval(1000, 0.0);
        let before = sched.time_until_due(0.0);

        assert_eq!(sched.set_interval_from_input("0", 0.0), Err(IntervalError::NotPositive));
        assert_eq!(sched.set_interval_from_input("-5", 0.0), Err(IntervalError::NotPositive));
        assert_eq!(sched.set_interval_from_input("soon", 0.0), Err(IntervalError::NotANumber));
        assert_eq!(sched.config.interval_ms, 1000);
        assert_eq!(sched.time_until_due(0.0), before);
    }

    #[test]
    fn setting_the_interval_replaces_the_pending_deadline() {
        let mut sched = AutosaveScheduler::new();
        sched.set_interval(1000, 0.0);
        assert_eq!(sched.set_interval_from_input("500", 0.0), Ok(500));
        assert!((sched.time_until_due(0.0) - 0.5).abs() < 1e-9);
        // the old one-second deadline is gone: nothing fires at 0.4s
        let tmp = tempfile::tempdir().unwrap();
        let store = AutosaveStore::open(tmp.path().join("autosave")).unwrap();
        let mut doc = Document::new();
        doc.resolve_identity("draft".into(), store.path_for("draft"));
        doc.content = "hi".into();
        sched.tick(0.4, &doc, &store);
        assert!(!store.path_for("draft").exists());
        sched.tick(0.5, &doc, &store);
        assert!(store.path_for("draft").exists());
    }

    #[test]
    fn autosave_keeps_writing_after_a_manual_save_elsewhere() {
        let (_tmp, store, mut doc) = fixture();
        doc.record_save(Path::new("/somewhere/else/draft.txt"));
        let mut sched = AutosaveScheduler::new();
        let mut now = 0.0;
        run_one_interval(&mut sched, &mut now, &doc, &store);
        assert_eq!(std::fs::read_to_string(store.path_for("draft")).unwrap(), "hello");
    }
}
