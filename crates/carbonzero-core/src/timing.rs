//! Frame and interval clocks driving the event loop.
//!
//! Both clocks take `now` explicitly so callers (and tests) decide what time it is.

use std::time::{Duration, Instant};

/// Host facility that decides when the next frame should be drawn.
pub trait FrameScheduler {
    /// Instant at which the next frame is due.
    fn next_deadline(&self) -> Instant;

    /// Record that a frame was fully drawn at `now` and request the next one.
    fn frame_presented(&mut self, now: Instant);

    /// Whether a frame is due at `now`.
    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline()
    }

    /// How long the caller may block on input before the next frame is due.
    fn time_until_next(&self, now: Instant) -> Duration {
        self.next_deadline().saturating_duration_since(now)
    }
}

/// Fixed-rate frame clock.
///
/// A starved loop does not catch up: the next deadline is pushed past `now`, so
/// the animation pauses instead of bursting.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    started: Instant,
    next: Instant,
    frames: u64,
}

impl FrameClock {
    /// Create a clock targeting `fps` frames per second, first frame due at `now`.
    pub fn new(fps: u32, now: Instant) -> Self {
        let fps = fps.max(1);
        Self {
            interval: Duration::from_secs(1) / fps,
            started: now,
            next: now,
            frames: 0,
        }
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Milliseconds since the clock started, used by time-based animations.
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started).as_millis() as u64
    }
}

impl FrameScheduler for FrameClock {
    fn next_deadline(&self) -> Instant {
        self.next
    }

    fn frame_presented(&mut self, now: Instant) {
        self.frames += 1;
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }
}

/// Repeating timer, the loop's equivalent of `setInterval`.
///
/// The first tick is due immediately. Missed ticks are coalesced into one.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: now,
        }
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Returns true if the timer fired at `now`, and schedules the next tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_first_frame_due_immediately() {
        let t0 = Instant::now();
        let clock = FrameClock::new(60, t0);
        assert!(clock.is_due(t0));
        assert_eq!(clock.time_until_next(t0), Duration::ZERO);
    }

    #[test]
    fn test_frame_clock_advances_by_interval() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(50, t0);
        clock.frame_presented(t0);
        assert_eq!(clock.next_deadline(), t0 + Duration::from_millis(20));
        assert!(!clock.is_due(t0 + Duration::from_millis(19)));
        assert!(clock.is_due(t0 + Duration::from_millis(20)));
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_frame_clock_does_not_burst_after_stall() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(50, t0);
        let late = t0 + Duration::from_secs(5);
        clock.frame_presented(late);
        assert_eq!(clock.next_deadline(), late + Duration::from_millis(20));
    }

    #[test]
    fn test_interval_fires_immediately_then_periodically() {
        let t0 = Instant::now();
        let mut timer = Interval::new(Duration::from_millis(200), t0);
        assert!(timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(199)));
        assert!(timer.poll(t0 + Duration::from_millis(200)));
        assert!(!timer.poll(t0 + Duration::from_millis(201)));
    }

    #[test]
    fn test_interval_coalesces_missed_ticks() {
        let t0 = Instant::now();
        let mut timer = Interval::new(Duration::from_millis(200), t0);
        assert!(timer.poll(t0));
        let late = t0 + Duration::from_secs(2);
        assert!(timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(100)));
    }
}
