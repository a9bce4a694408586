//! Progress timer for the active item.
//!
//! Advances a normalized progress value from 0 to 1 over the item's
//! duration. The timer is driven by the host: each `tick` reports how much
//! wall time has passed, which keeps the timer deterministic and free of any
//! clock of its own.

use std::time::Duration;

/// Outcome of a single timer tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Timer advanced; carries the new progress in [0, 1)
    Progress(f64),
    /// Progress reached 1. Emitted exactly once per run.
    Complete,
    /// Timer is not allowed to advance (not loaded, paused, not started,
    /// or already complete)
    Halted,
}

/// Progress engine for one item at a time.
///
/// `start` may be called before the media is loaded; the run stays armed
/// but frozen until `set_loaded(true)`.
#[derive(Debug, Clone)]
pub struct ProgressTimer {
    /// Fallback used for non-positive durations
    default_duration: Duration,
    /// Duration of the current run
    duration: Duration,
    /// Time accumulated while running
    elapsed: Duration,
    /// Media for the current item reported ready
    loaded: bool,
    /// `start` was called since the last reset
    armed: bool,
    /// Frozen by a pause request
    paused: bool,
    /// Completion already reported for this run
    completed: bool,
}

impl ProgressTimer {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            default_duration,
            duration: default_duration,
            elapsed: Duration::ZERO,
            loaded: false,
            armed: false,
            paused: false,
            completed: false,
        }
    }

    /// Resolve a requested duration, falling back to the default when the
    /// request is zero or negative.
    pub fn effective_duration(&self, duration_ms: i64) -> Duration {
        if duration_ms > 0 {
            Duration::from_millis(duration_ms as u64)
        } else {
            self.default_duration
        }
    }

    /// Arm a new run from progress 0.
    pub fn start(&mut self, duration_ms: i64) {
        self.duration = self.effective_duration(duration_ms);
        self.elapsed = Duration::ZERO;
        self.armed = true;
        self.completed = false;
    }

    /// Freeze progress at its current value.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue from the frozen value.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Drop the current run. Progress returns to 0 and the media must report
    /// ready again before the next run can advance.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = false;
        self.completed = false;
        self.loaded = false;
    }

    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    pub fn is_running(&self) -> bool {
        self.armed && self.loaded && !self.paused && !self.completed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed fraction of the duration, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        if self.completed {
            return 1.0;
        }
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Advance by `dt` of wall time.
    pub fn tick(&mut self, dt: Duration) -> Tick {
        if !self.is_running() {
            return Tick::Halted;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.completed = true;
            return Tick::Complete;
        }

        Tick::Progress(self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn loaded_timer(duration_ms: i64) -> ProgressTimer {
        let mut timer = ProgressTimer::new(ms(3000));
        timer.start(duration_ms);
        timer.set_loaded(true);
        timer
    }

    #[test]
    fn non_positive_duration_uses_default() {
        let mut timer = ProgressTimer::new(ms(4000));
        timer.start(0);
        assert_eq!(timer.duration(), ms(4000));
        timer.start(-10);
        assert_eq!(timer.duration(), ms(4000));
        timer.start(1500);
        assert_eq!(timer.duration(), ms(1500));
    }

    #[test]
    fn does_not_advance_before_loaded() {
        let mut timer = ProgressTimer::new(ms(3000));
        timer.start(1000);
        timer.pause();
        timer.resume();
        timer.start(1000);

        assert_eq!(timer.tick(ms(500)), Tick::Halted);
        assert_eq!(timer.progress(), 0.0);

        timer.set_loaded(true);
        assert_eq!(timer.tick(ms(500)), Tick::Progress(0.5));
    }

    #[test]
    fn does_not_advance_before_start() {
        let mut timer = ProgressTimer::new(ms(3000));
        timer.set_loaded(true);
        assert_eq!(timer.tick(ms(100)), Tick::Halted);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let mut timer = loaded_timer(1000);
        timer.tick(ms(300));
        let frozen = timer.progress();

        timer.pause();
        assert_eq!(timer.tick(ms(400)), Tick::Halted);
        assert_eq!(timer.progress().to_bits(), frozen.to_bits());

        timer.resume();
        assert_eq!(timer.progress().to_bits(), frozen.to_bits());
        timer.tick(ms(200));
        assert!((timer.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn reset_between_pause_and_resume_rewinds() {
        let mut timer = loaded_timer(1000);
        timer.tick(ms(600));
        timer.pause();
        timer.reset();
        timer.resume();
        assert_eq!(timer.progress(), 0.0);
        assert!(!timer.is_running());
    }

    #[test]
    fn completes_exactly_once() {
        let mut timer = loaded_timer(1000);
        assert_eq!(timer.tick(ms(999)), Tick::Progress(0.999));
        assert_eq!(timer.tick(ms(50)), Tick::Complete);
        assert_eq!(timer.progress(), 1.0);
        assert_eq!(timer.tick(ms(50)), Tick::Halted);
        assert_eq!(timer.tick(ms(5000)), Tick::Halted);
        assert!(timer.is_complete());
    }

    #[test]
    fn start_after_completion_begins_new_run() {
        let mut timer = loaded_timer(100);
        assert_eq!(timer.tick(ms(100)), Tick::Complete);

        timer.start(200);
        assert!(!timer.is_complete());
        assert_eq!(timer.tick(ms(100)), Tick::Progress(0.5));
    }

    #[test]
    fn reset_requires_loaded_again() {
        let mut timer = loaded_timer(1000);
        timer.reset();
        timer.start(1000);
        assert_eq!(timer.tick(ms(100)), Tick::Halted);
    }
}
