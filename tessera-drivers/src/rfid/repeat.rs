//! Repeat suppression
//!
//! The reader module keeps sending the same frame for as long as a tag
//! stays in its field. `RepeatFilter` collapses those repeats into a single
//! scan: a code is reported again only after it has been absent for longer
//! than the configured window.

use tessera_protocol::TagCode;

/// Suppresses repeated scans of the same tag
#[derive(Debug, Clone)]
pub struct RepeatFilter {
    window_ms: u64,
    last: Option<(TagCode, u64)>,
}

impl RepeatFilter {
    /// Create a filter with the given repeat window
    ///
    /// A window of 0 reports every scan taken at a later millisecond.
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    /// Feed a scan seen at `now_ms`; returns true if it should be reported
    ///
    /// Repeats refresh the window, so a tag held in the field is reported
    /// once no matter how long it stays there.
    pub fn accept(&mut self, code: TagCode, now_ms: u64) -> bool {
        let report = match self.last {
            Some((last, seen_ms)) if last == code => {
                now_ms.saturating_sub(seen_ms) > self.window_ms
            }
            _ => true,
        };
        self.last = Some((code, now_ms));
        report
    }

    /// Forget the last scan
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_scan_reported() {
        let mut filter = RepeatFilter::new(500);
        assert!(filter.accept(TagCode(1), 0));
    }

    #[test]
    fn test_repeat_within_window_suppressed() {
        let mut filter = RepeatFilter::new(500);
        assert!(filter.accept(TagCode(1), 1000));
        assert!(!filter.accept(TagCode(1), 1200));
        assert!(!filter.accept(TagCode(1), 1600));
        // Held in the field: each repeat extends the window
        assert!(!filter.accept(TagCode(1), 2050));
    }

    #[test]
    fn test_repeat_after_window_reported() {
        let mut filter = RepeatFilter::new(500);
        assert!(filter.accept(TagCode(1), 1000));
        assert!(filter.accept(TagCode(1), 1501));
    }

    #[test]
    fn test_different_tag_reported() {
        let mut filter = RepeatFilter::new(500);
        assert!(filter.accept(TagCode(1), 0));
        assert!(filter.accept(TagCode(2), 10));
        assert!(filter.accept(TagCode(1), 20));
    }

    #[test]
    fn test_zero_window_reports_all_but_same_instant() {
        let mut filter = RepeatFilter::new(0);
        assert!(filter.accept(TagCode(9), 5));
        assert!(!filter.accept(TagCode(9), 5));
        assert!(filter.accept(TagCode(9), 6));
    }

    #[test]
    fn test_reset() {
        let mut filter = RepeatFilter::new(500);
        assert!(filter.accept(TagCode(1), 0));
        filter.reset();
        assert!(filter.accept(TagCode(1), 1));
    }
}
