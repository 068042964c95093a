//! Timestamp bookkeeping for input-forgiveness windows.
//!
//! Buffered jumps and coyote jumps both reduce to the same question:
//! "did event X happen less than W seconds ago?". [`EventStamp`] records
//! the event time and answers that question against the current sim
//! clock. An unset stamp compares as infinitely old.

/// Recorded time of a one-shot event on the simulation clock.
///
/// Stamps are compared with a strict `<`, so an event exactly `window`
/// seconds old no longer counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventStamp {
    at: f64,
}

impl EventStamp {
    /// A stamp that lies outside every window.
    pub fn unset() -> Self {
        EventStamp { at: f64::NEG_INFINITY }
    }

    /// Record the event as having happened at `now`.
    pub fn mark(&mut self, now: f64) {
        self.at = now;
    }

    /// True while less than `window` seconds have passed since the mark.
    pub fn within(&self, now: f64, window: f64) -> bool {
        now - self.at < window
    }

    /// Invalidate the stamp so no future `within` check passes.
    pub fn clear(&mut self) {
        self.at = f64::NEG_INFINITY;
    }

    /// One-shot check: if the stamp is inside the window, clear it and
    /// return true. Used for windows that must not fire twice.
    pub fn consume(&mut self, now: f64, window: f64) -> bool {
        if self.within(now, window) {
            self.clear();
            true
        } else {
            false
        }
    }
}

impl Default for EventStamp {
    fn default() -> Self {
        EventStamp::unset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_is_outside_every_window() {
        let stamp = EventStamp::unset();
        assert!(!stamp.within(0.0, f64::MAX));
        assert!(!stamp.within(1_000_000.0, 0.25));
    }

    #[test]
    fn test_window_is_strict() {
        let mut stamp = EventStamp::unset();
        stamp.mark(10.0);
        assert!(stamp.within(10.0, 0.25));
        assert!(stamp.within(10.2499, 0.25));
        // Exactly at the boundary no longer counts.
        assert!(!stamp.within(10.25, 0.25));
        assert!(!stamp.within(10.3, 0.25));
    }

    #[test]
    fn test_consume_fires_once() {
        let mut stamp = EventStamp::unset();
        stamp.mark(5.0);
        assert!(stamp.consume(5.1, 0.5));
        assert!(!stamp.consume(5.1, 0.5));
        assert!(!stamp.within(5.1, 0.5));
    }

    #[test]
    fn test_clear_invalidates() {
        let mut stamp = EventStamp::unset();
        stamp.mark(2.0);
        stamp.clear();
        assert!(!stamp.within(2.0, 1.0));
    }
}
