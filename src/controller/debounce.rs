use std::time::Duration;

use tokio::time::Instant;

/// Quiescence window applied to query edits unless configured otherwise
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);

/// Trailing-edge debouncer with duplicate suppression.
///
/// Every [`push`](Debouncer::push) replaces the pending value and restarts the
/// window. Once the window has elapsed the owner calls [`settle`](Debouncer::settle),
/// which yields the pending value unless it equals the previously settled one.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
    last_settled: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: None,
            deadline: None,
            last_settled: None,
        }
    }

    /// Records an edit at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.window);
    }

    /// When the pending value settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Takes the pending value once its window has elapsed.
    ///
    /// Returns `None` while the window is still open, when nothing is pending, or
    /// when the value equals the last settled one.
    pub fn settle(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if deadline <= now => {}
            _ => return None,
        }

        self.flush()
    }

    /// Takes the pending value without waiting for its window.
    ///
    /// Used when no further edit can arrive. Duplicates are still suppressed.
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        let value = self.pending.take()?;

        if self.last_settled.as_ref() == Some(&value) {
            return None;
        }

        self.last_settled = Some(value.clone());
        Some(value)
    }
}
