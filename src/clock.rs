use std::thread;
use std::time::{Duration, Instant};

/// Returns true once strictly more than `interval` has passed since `last_advance`.
#[must_use]
pub fn is_tick_due(now: Instant, last_advance: Instant, interval: Duration) -> bool {
    now.saturating_duration_since(last_advance) > interval
}

/// Fixed-interval simulation timer polled once per loop iteration.
///
/// Ticks are capped by how often the caller polls; the clock never fires on
/// its own.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    interval: Duration,
    last_advance: Instant,
}

impl SimulationClock {
    #[must_use]
    pub fn new(interval: Duration, started_at: Instant) -> Self {
        Self {
            interval,
            last_advance: started_at,
        }
    }

    #[must_use]
    pub fn is_tick_due(&self, now: Instant) -> bool {
        is_tick_due(now, self.last_advance, self.interval)
    }

    /// Records `now` as the time of the latest advance.
    pub fn mark_advanced(&mut self, now: Instant) {
        self.last_advance = now;
    }

    #[must_use]
    pub fn last_advance(&self) -> Instant {
        self.last_advance
    }
}

/// Caps the outer loop to a fixed number of iterations per second.
///
/// Sleeping here is the loop's only suspension point.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame_interval: Duration,
    last_frame: Option<Instant>,
}

impl FrameLimiter {
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            last_frame: None,
        }
    }

    /// Time left in the current frame budget at `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) => self
                .frame_interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Sleeps out the rest of the frame budget and starts the next frame.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_frame = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{is_tick_due, FrameLimiter, SimulationClock};

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn tick_requires_strictly_more_than_interval() {
        let start = Instant::now();

        assert!(!is_tick_due(start + Duration::from_millis(499), start, INTERVAL));
        assert!(!is_tick_due(start + INTERVAL, start, INTERVAL));
        assert!(is_tick_due(start + Duration::from_millis(501), start, INTERVAL));
    }

    #[test]
    fn tick_not_due_for_earlier_timestamps() {
        let start = Instant::now() + Duration::from_secs(1);

        assert!(!is_tick_due(Instant::now(), start, INTERVAL));
    }

    #[test]
    fn marking_advance_resets_the_interval() {
        let start = Instant::now();
        let mut clock = SimulationClock::new(INTERVAL, start);
        let first_tick = start + Duration::from_millis(510);

        assert!(clock.is_tick_due(first_tick));
        clock.mark_advanced(first_tick);

        assert_eq!(clock.last_advance(), first_tick);
        assert!(!clock.is_tick_due(first_tick + Duration::from_millis(400)));
        assert!(clock.is_tick_due(first_tick + Duration::from_millis(600)));
    }

    #[test]
    fn first_frame_has_no_budget_to_wait() {
        let limiter = FrameLimiter::new(Duration::from_millis(16));

        assert_eq!(limiter.remaining(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn limiter_waits_out_the_frame_budget() {
        let budget = Duration::from_millis(5);
        let mut limiter = FrameLimiter::new(budget);

        let started = Instant::now();
        limiter.wait();
        limiter.wait();

        assert!(started.elapsed() >= budget);
        assert!(limiter.remaining(Instant::now()) <= budget);
    }
}
