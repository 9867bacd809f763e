/// Fixed timestep driver for the simulation
///
/// The host reports how much wall time passed; the loop answers how many
/// fixed `tick`s the simulation must run. Feeding synthetic frame times makes
/// a run fully deterministic (the headless binary does exactly that).
use std::time::Duration;

/// Target simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Simulated time consumed by ticks so far
    simulated: Duration,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            simulated: Duration::ZERO,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Report a frame of `frame_time`, returns the number of fixed ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop the backlog instead of carrying it into the next frame
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Frame of {:?} exceeded tick budget, dropping {:?}",
                frame_time,
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        self.simulated += FIXED_TIMESTEP_DURATION * ticks;
        ticks
    }

    /// Fixed timestep for simulation ticks (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Total simulated time
    pub fn simulated(&self) -> Duration {
        self.simulated
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
