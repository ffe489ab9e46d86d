//! Playback clocks for the timed drills
//!
//! Two timing disciplines share one interface. `IntervalClock` drives the
//! serial-presentation drill: a fixed inter-unit delay derived from a
//! units-per-minute rate, advancing an index by exactly one per elapsed
//! deadline. `FrameClock` drives the pacing guide: a scalar position
//! accumulated from frame-to-frame deltas so sub-row precision survives
//! variable frame rates.
//!
//! Neither clock owns a timer or task. All time is injected through
//! `Instant` arguments and `tick` is called from the render loop, so at
//! most one logical loop exists per clock and stopping is a synchronous
//! state change with nothing left to fire afterwards.

use std::time::{Duration, Instant};

/// Shared start/pause/reset/rate surface of both timing disciplines.
pub trait PlaybackClock {
    /// Begin playback. No-op when already playing.
    fn start(&mut self, now: Instant);
    /// Stop playback, keeping the current index/position. No-op when
    /// already stopped.
    fn pause(&mut self);
    /// Return to index/position zero and stop.
    fn reset(&mut self);
    /// Change the rate. Takes effect from the next tick; elapsed time is
    /// never retroactively adjusted.
    fn set_rate(&mut self, rate: f64, now: Instant);
    fn is_playing(&self) -> bool;
    /// Advance state for the current frame. Called once per render loop
    /// iteration; does nothing while stopped.
    fn tick(&mut self, now: Instant);
}

/// Discrete-tick clock over a fixed-length unit sequence.
#[derive(Clone, Debug)]
pub struct IntervalClock {
    len: usize,
    rate: f64, // units per minute
    current_index: usize,
    playing: bool,
    next_tick: Option<Instant>,
}

impl IntervalClock {
    pub fn new(len: usize, rate: f64) -> Self {
        Self {
            len,
            rate,
            current_index: 0,
            playing: false,
            next_tick: None,
        }
    }

    fn delay(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.rate)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fraction of the sequence presented, counting the unit on screen.
    /// Reaches 1.0 while the last unit is shown, in step with an
    /// "index + 1 of len" readout.
    pub fn progress(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            (self.current_index + 1) as f64 / self.len as f64
        }
    }

    fn at_last_index(&self) -> bool {
        self.len == 0 || self.current_index >= self.len - 1
    }
}

impl PlaybackClock for IntervalClock {
    fn start(&mut self, now: Instant) {
        if self.playing || self.is_empty() {
            return;
        }
        // Starting from the end rewinds so play always presents something
        if self.at_last_index() {
            self.current_index = 0;
        }
        self.playing = true;
        self.next_tick = Some(now + self.delay());
    }

    fn pause(&mut self) {
        self.playing = false;
        self.next_tick = None;
    }

    fn reset(&mut self) {
        self.current_index = 0;
        self.playing = false;
        self.next_tick = None;
    }

    fn set_rate(&mut self, rate: f64, now: Instant) {
        self.rate = rate;
        // Re-arm from the change instant; skipped time is not backfilled
        if self.playing {
            self.next_tick = Some(now + self.delay());
        }
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        let Some(deadline) = self.next_tick else {
            return;
        };
        if now < deadline {
            return;
        }
        if self.at_last_index() {
            // The last unit has had its full interval on screen
            self.playing = false;
            self.next_tick = None;
        } else {
            self.current_index += 1;
            self.next_tick = Some(now + self.delay());
        }
    }
}

/// Continuous clock advancing a scalar position by frame deltas.
#[derive(Clone, Debug)]
pub struct FrameClock {
    extent: f64,
    speed: f64,
    scale: f64, // position units per speed unit per second
    position: f64,
    playing: bool,
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new(extent: f64, speed: f64, scale: f64) -> Self {
        Self {
            extent,
            speed,
            scale,
            position: 0.0,
            playing: false,
            last_frame: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    fn at_extent(&self) -> bool {
        self.extent > 0.0 && self.position >= self.extent
    }
}

impl PlaybackClock for FrameClock {
    fn start(&mut self, _now: Instant) {
        if self.playing {
            return;
        }
        // A run that ended at the extent restarts from the top
        if self.at_extent() {
            self.position = 0.0;
        }
        self.playing = true;
        self.last_frame = None;
    }

    fn pause(&mut self) {
        self.playing = false;
        self.last_frame = None;
    }

    fn reset(&mut self) {
        self.position = 0.0;
        self.playing = false;
        self.last_frame = None;
    }

    fn set_rate(&mut self, rate: f64, _now: Instant) {
        self.speed = rate;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        let Some(prev) = self.last_frame else {
            // First frame after start/resume only establishes the baseline
            self.last_frame = Some(now);
            return;
        };
        let delta = now.duration_since(prev).as_secs_f64();
        self.last_frame = Some(now);
        self.position += self.speed * delta * self.scale;
        if self.at_extent() {
            self.position = self.extent;
            self.playing = false;
            self.last_frame = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn interval_advances_one_index_per_elapsed_delay() {
        // 120 units/min -> 500 ms per unit
        let mut clock = IntervalClock::new(10, 120.0);
        let t0 = Instant::now();
        clock.start(t0);
        assert!(clock.is_playing());

        clock.tick(t0 + ms(499));
        assert_eq!(clock.current_index(), 0);

        clock.tick(t0 + ms(500));
        assert_eq!(clock.current_index(), 1);

        // A late tick still advances by exactly one, no backfill
        clock.tick(t0 + ms(2600));
        assert_eq!(clock.current_index(), 2);
    }

    #[test]
    fn interval_stops_after_last_index_without_exceeding_it() {
        let mut clock = IntervalClock::new(3, 600.0); // 100 ms per unit
        let t0 = Instant::now();
        clock.start(t0);

        clock.tick(t0 + ms(100));
        clock.tick(t0 + ms(200));
        assert_eq!(clock.current_index(), 2);
        assert!(clock.is_playing());

        // The tick after reaching the last index stops playback
        clock.tick(t0 + ms(300));
        assert_eq!(clock.current_index(), 2);
        assert!(!clock.is_playing());
    }

    #[test]
    fn interval_start_while_playing_is_noop() {
        let mut clock = IntervalClock::new(5, 120.0);
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0 + ms(500));
        assert_eq!(clock.current_index(), 1);

        // Restart must not re-arm the pending deadline
        clock.start(t0 + ms(999));
        clock.tick(t0 + ms(1000));
        assert_eq!(clock.current_index(), 2);
    }

    #[test]
    fn interval_start_at_end_rewinds_to_zero() {
        let mut clock = IntervalClock::new(2, 600.0);
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0 + ms(100));
        clock.tick(t0 + ms(200));
        assert!(!clock.is_playing());
        assert_eq!(clock.current_index(), 1);

        clock.start(t0 + ms(300));
        assert_eq!(clock.current_index(), 0);
        assert!(clock.is_playing());
    }

    #[test]
    fn interval_rate_change_rearms_from_change_instant() {
        let mut clock = IntervalClock::new(10, 60.0); // 1 s per unit
        let t0 = Instant::now();
        clock.start(t0);

        clock.set_rate(600.0, t0 + ms(300)); // now 100 ms per unit
        clock.tick(t0 + ms(399));
        assert_eq!(clock.current_index(), 0);
        clock.tick(t0 + ms(400));
        assert_eq!(clock.current_index(), 1);
    }

    #[test]
    fn interval_reset_returns_to_zero_and_stops() {
        let mut clock = IntervalClock::new(10, 600.0);
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0 + ms(100));
        clock.tick(t0 + ms(200));
        assert_eq!(clock.current_index(), 2);

        clock.reset();
        assert_eq!(clock.current_index(), 0);
        assert!(!clock.is_playing());

        // No pending deadline survives a reset
        clock.tick(t0 + ms(10_000));
        assert_eq!(clock.current_index(), 0);
    }

    #[test]
    fn interval_pause_while_stopped_is_noop() {
        let mut clock = IntervalClock::new(4, 120.0);
        clock.pause();
        assert!(!clock.is_playing());
        assert_eq!(clock.current_index(), 0);
    }

    #[test]
    fn interval_progress_counts_the_shown_unit() {
        let mut clock = IntervalClock::new(4, 60.0);
        // The first unit is on screen before playback starts
        assert_eq!(clock.progress(), 0.25);

        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0 + ms(1000));
        assert_eq!(clock.progress(), 0.5);

        clock.tick(t0 + ms(2000));
        clock.tick(t0 + ms(3000));
        assert_eq!(clock.current_index(), 3);
        // Showing the last unit fills the bar
        assert_eq!(clock.progress(), 1.0);
    }

    #[test]
    fn frame_position_accumulates_speed_times_delta() {
        let mut clock = FrameClock::new(100.0, 30.0, 0.1); // 3 units/s
        let t0 = Instant::now();
        clock.start(t0);

        clock.tick(t0); // baseline
        assert_eq!(clock.position(), 0.0);

        clock.tick(t0 + ms(500));
        assert!((clock.position() - 1.5).abs() < 1e-9);

        clock.tick(t0 + ms(1500));
        assert!((clock.position() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn frame_pause_resume_preserves_position() {
        let mut clock = FrameClock::new(100.0, 30.0, 0.1);
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0);
        clock.tick(t0 + ms(1000));
        let before = clock.position();
        assert!(before > 0.0);

        clock.pause();
        assert!(!clock.is_playing());

        // Wall time passing while paused does not move the position
        clock.start(t0 + ms(60_000));
        clock.tick(t0 + ms(60_000)); // baseline only
        assert_eq!(clock.position(), before);

        clock.tick(t0 + ms(61_000));
        assert!((clock.position() - (before + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn frame_stops_at_extent_and_restarts_from_zero() {
        let mut clock = FrameClock::new(3.0, 30.0, 0.1); // 3 units/s
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0);
        clock.tick(t0 + ms(2000));
        assert_eq!(clock.position(), 3.0);
        assert!(!clock.is_playing());

        // Only the next explicit start rewinds
        clock.start(t0 + ms(3000));
        assert_eq!(clock.position(), 0.0);
        assert!(clock.is_playing());
    }

    #[test]
    fn frame_reset_is_the_only_mid_run_rewind() {
        let mut clock = FrameClock::new(100.0, 50.0, 0.1);
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0);
        clock.tick(t0 + ms(400));
        assert!(clock.position() > 0.0);

        clock.reset();
        assert_eq!(clock.position(), 0.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn frame_rate_change_applies_from_next_delta() {
        let mut clock = FrameClock::new(100.0, 10.0, 0.1); // 1 unit/s
        let t0 = Instant::now();
        clock.start(t0);
        clock.tick(t0);
        clock.tick(t0 + ms(1000));
        assert!((clock.position() - 1.0).abs() < 1e-9);

        clock.set_rate(100.0, t0 + ms(1000)); // 10 units/s
        clock.tick(t0 + ms(1500));
        assert!((clock.position() - 6.0).abs() < 1e-9);
    }
}
