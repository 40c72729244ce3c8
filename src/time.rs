//! Fixed-timestep clock: converts variable-rate host frames into discrete
//! logic ticks with an accumulator, so the engines stay deterministic no
//! matter how the browser schedules animation frames.

pub struct GameClock {
    ms_per_tick: f64,
    /// Milliseconds received but not yet consumed as whole ticks.
    accumulator: f64,
    pub total_ticks: u64,
    /// None until the first frame arrives.
    last_timestamp: Option<f64>,
}

/// Longest frame gap honored in full; anything beyond (a backgrounded tab,
/// a suspended laptop) is clamped so one frame can't flood the engine.
const MAX_FRAME_MS: f64 = 500.0;

impl GameClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (`performance.now()` style). Returns the
    /// whole ticks to run this frame; the sub-tick remainder carries over.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_yields_no_ticks() {
        let mut clock = GameClock::new(10);
        assert_eq!(clock.update(1234.0), 0);
    }

    #[test]
    fn whole_ticks_with_remainder_carried() {
        let mut clock = GameClock::new(10); // 100ms per tick
        clock.update(0.0);
        assert_eq!(clock.update(350.0), 3);
        assert_eq!(clock.total_ticks, 3);
        // 50ms left over; the next 50ms completes a tick.
        assert_eq!(clock.update(400.0), 1);
    }

    #[test]
    fn sub_tick_frames_accumulate() {
        let mut clock = GameClock::new(10);
        clock.update(0.0);
        let mut total = 0;
        for i in 1..=7 {
            total += clock.update(i as f64 * 16.0);
        }
        // 112ms total crosses one 100ms boundary.
        assert_eq!(total, 1);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut clock = GameClock::new(10);
        clock.update(0.0);
        // 10s gap clamps to 500ms = 5 ticks.
        assert_eq!(clock.update(10_000.0), 5);
    }

    #[test]
    fn steady_sixty_fps_averages_tick_rate() {
        let mut clock = GameClock::new(10);
        clock.update(0.0);
        let mut total = 0u32;
        for i in 1..=60 {
            total += clock.update(i as f64 * 16.667);
        }
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {total}");
    }

    #[test]
    fn backwards_timestamps_are_ignored() {
        let mut clock = GameClock::new(10);
        clock.update(1000.0);
        assert_eq!(clock.update(500.0), 0);
        assert_eq!(clock.total_ticks, 0);
    }
}
