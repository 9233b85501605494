use std::time::Duration;

pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub steps_run: u32,
    pub cap_hit: bool,
    pub backlog: Duration,
}

/// Hands accumulated frame time out in fixed slices, capped per frame.
///
/// Time beyond the cap stays in the accumulator for later frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_dt: Duration,
    max_steps_per_frame: u32,
    accumulator: Duration,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND, DEFAULT_MAX_STEPS_PER_FRAME)
    }
}

impl FixedTimestep {
    pub fn new(ticks_per_second: u32, max_steps_per_frame: u32) -> Self {
        Self {
            fixed_dt: fixed_dt_for_rate(ticks_per_second),
            max_steps_per_frame: max_steps_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn fixed_dt(&self) -> Duration {
        self.fixed_dt
    }

    pub fn fixed_dt_seconds(&self) -> f32 {
        self.fixed_dt.as_secs_f32()
    }

    pub fn max_steps_per_frame(&self) -> u32 {
        self.max_steps_per_frame
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn advance<F>(&mut self, frame_delta: Duration, mut on_step: F) -> StepReport
    where
        F: FnMut(f32),
    {
        self.accumulator = self.accumulator.saturating_add(frame_delta);
        let fixed_dt_seconds = self.fixed_dt_seconds();

        let mut steps_run = 0u32;
        while self.accumulator >= self.fixed_dt && steps_run < self.max_steps_per_frame {
            on_step(fixed_dt_seconds);
            self.accumulator -= self.fixed_dt;
            steps_run += 1;
        }

        let cap_hit = self.accumulator >= self.fixed_dt;
        StepReport {
            steps_run,
            cap_hit,
            backlog: if cap_hit {
                self.accumulator
            } else {
                Duration::ZERO
            },
        }
    }
}

fn fixed_dt_for_rate(ticks_per_second: u32) -> Duration {
    let rate = u64::from(ticks_per_second.max(1));
    Duration::from_nanos(1_000_000_000 / rate)
}
