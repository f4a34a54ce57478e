//! Search debouncing.
//!
//! The debouncer never spawns timers. The caller passes the current
//! [`Instant`] in, so the same code runs in a UI event loop and in tests.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default delay between the last keystroke and applying the search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the latest pushed value until it has been quiet for `delay`.
///
/// ```
/// use std::time::{Duration, Instant};
/// use deskview_query::Debouncer;
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
///
/// debouncer.push("pri", start);
/// debouncer.push("printer", start + Duration::from_millis(100));
///
/// assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
/// assert_eq!(debouncer.poll(start + Duration::from_millis(400)), Some("printer"));
/// assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the wait.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Takes the pending value once `delay` has passed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(
            &self.pending,
            Some((_, pushed)) if now.saturating_duration_since(*pushed) >= self.delay
        );
        if ready {
            debug!(delay_ms = self.delay.as_millis() as u64, "debounce elapsed");
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Takes the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        let value = self.pending.take().map(|(value, _)| value);
        if value.is_some() {
            debug!("debounce flushed");
        }
        value
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Debouncer::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn only_last_value_survives() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push("a", start);
        debouncer.push("ab", start + ms(200));
        debouncer.push("abc", start + ms(400));

        assert_eq!(debouncer.poll(start + ms(600)), None);
        assert_eq!(debouncer.pending(), Some(&"abc"));
        assert_eq!(debouncer.poll(start + ms(700)), Some("abc"));
        assert_eq!(debouncer.pending(), None);
    }

    #[test]
    fn flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(50));

        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.push(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + ms(100)), None);
    }

    #[test]
    fn clock_going_backwards_never_fires_early() {
        let start = Instant::now() + ms(1000);
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.push("x", start);
        assert_eq!(debouncer.poll(start - ms(500)), None);
    }
}
