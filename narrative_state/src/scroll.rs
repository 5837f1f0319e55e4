//! Scroll tracking - turns raw scroll ticks into a bounded stream of progress updates.
//!
//! Recomputing the topology on every raw scroll event would be correct but
//! wasteful, so ticks are coalesced: at most one update per `min_interval`,
//! with the latest pending value flushed once the debounce window passes.

use std::time::{Duration, Instant};

use crate::domain::clamp_unit;

/// Default spacing between emitted scroll updates.
pub const DEFAULT_SCROLL_INTERVAL: Duration = Duration::from_millis(100);

/// Scroll progress of a document in `[0, 1]`.
///
/// A document that does not scroll reports 0.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable > 0.0 {
        clamp_unit(scroll_y / scrollable)
    } else {
        0.0
    }
}

/// Rate limiter for scroll progress updates.
#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    min_interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<(f64, Instant)>,
}

impl ScrollCoalescer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_emit: None,
            pending: None,
        }
    }

    /// Offer a raw scroll tick.
    ///
    /// Returns the value to apply now, or `None` if it was held back.
    pub fn offer(&mut self, progress: f64, now: Instant) -> Option<f64> {
        let progress = clamp_unit(progress);
        let ready = self
            .last_emit
            .map_or(true, |last| now.saturating_duration_since(last) >= self.min_interval);

        if ready {
            self.pending = None;
            self.last_emit = Some(now);
            Some(progress)
        } else {
            self.pending = Some((progress, now));
            None
        }
    }

    /// Emit the latest held-back value once the debounce window has passed.
    pub fn flush(&mut self, now: Instant) -> Option<f64> {
        let (progress, offered_at) = self.pending?;
        if now.saturating_duration_since(offered_at) < self.min_interval {
            return None;
        }
        self.pending = None;
        self.last_emit = Some(now);
        Some(progress)
    }

    /// Whether a value is waiting for [`ScrollCoalescer::flush`].
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ScrollCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_progress() {
        assert_eq!(scroll_progress(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(1500.0, 2000.0, 1000.0), 1.0);
        // Page shorter than the viewport
        assert_eq!(scroll_progress(10.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn test_first_tick_passes_through() {
        let mut coalescer = ScrollCoalescer::default();
        assert_eq!(coalescer.offer(0.2, Instant::now()), Some(0.2));
    }

    #[test]
    fn test_burst_is_coalesced_to_latest() {
        let start = Instant::now();
        let mut coalescer = ScrollCoalescer::new(Duration::from_millis(100));

        assert_eq!(coalescer.offer(0.1, start), Some(0.1));
        assert_eq!(coalescer.offer(0.2, start + Duration::from_millis(20)), None);
        assert_eq!(coalescer.offer(0.3, start + Duration::from_millis(40)), None);
        assert!(coalescer.has_pending());

        // Debounce window not yet elapsed since the last tick
        assert_eq!(coalescer.flush(start + Duration::from_millis(100)), None);
        assert_eq!(coalescer.flush(start + Duration::from_millis(140)), Some(0.3));
        assert!(!coalescer.has_pending());
        assert_eq!(coalescer.flush(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_spaced_ticks_all_pass() {
        let start = Instant::now();
        let mut coalescer = ScrollCoalescer::new(Duration::from_millis(100));

        assert_eq!(coalescer.offer(0.1, start), Some(0.1));
        assert_eq!(coalescer.offer(0.5, start + Duration::from_millis(150)), Some(0.5));
        assert_eq!(coalescer.offer(1.4, start + Duration::from_millis(300)), Some(1.0));
    }
}
