// Countdown timers advanced by the owning component's tick
//
// Every delayed sequence in the game (dash, attack hold, regeneration, search,
// autosave...) is a field of one of these types instead of a suspended routine.

/// One-shot countdown. Fires once when `remaining` reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    /// Advance by `dt`. Returns true when the countdown is (now) finished.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Repeating timer with a fixed period.
///
/// With `fire_immediately` the first call to `tick` fires, matching a loop
/// that does its work before the first wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repeating {
    period: f32,
    elapsed: f32,
    pending_first: bool,
}

impl Repeating {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
            pending_first: false,
        }
    }

    pub fn fire_immediately(period: f32) -> Self {
        Self {
            pending_first: true,
            ..Self::new(period)
        }
    }

    /// Advance by `dt` and return how many times the timer fired.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let mut fired = 0;
        if self.pending_first {
            self.pending_first = false;
            fired += 1;
        }
        self.elapsed += dt;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.pending_first = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_finishes_once_drained() {
        let mut cd = Countdown::new(0.5);
        assert!(!cd.tick(0.2));
        assert!(!cd.tick(0.2));
        assert!(cd.tick(0.2));
        assert_eq!(cd.remaining(), 0.0);
    }

    #[test]
    fn test_countdown_negative_duration_is_finished() {
        let cd = Countdown::new(-1.0);
        assert!(cd.is_finished());
    }

    #[test]
    fn test_repeating_fires_per_period() {
        let mut timer = Repeating::new(1.0);
        assert_eq!(timer.tick(0.5), 0);
        assert_eq!(timer.tick(0.5), 1);
        assert_eq!(timer.tick(2.25), 2);
    }

    #[test]
    fn test_repeating_fire_immediately() {
        let mut timer = Repeating::fire_immediately(1.0);
        assert_eq!(timer.tick(0.1), 1);
        assert_eq!(timer.tick(0.1), 0);
    }

    #[test]
    fn test_reset_drops_progress() {
        let mut timer = Repeating::fire_immediately(1.0);
        timer.tick(0.9);
        timer.reset();
        assert_eq!(timer.tick(0.5), 0);
    }
}
