/// What to do with an event that arrived at a given time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThrottleDecision {
    /// Handle it now.
    Fire,
    /// Drop it, but arm a trailing call after this many milliseconds.
    ScheduleTrailing(f64),
    /// Drop it; a trailing call is already armed.
    Skip,
}

/// Leading + trailing rate limiter on a caller-supplied millisecond clock.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_fire: Option<f64>,
    trailing_armed: bool,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_fire: None,
            trailing_armed: false,
        }
    }

    pub fn poll(&mut self, now_ms: f64) -> ThrottleDecision {
        match self.last_fire {
            Some(last) if now_ms - last < self.interval_ms => {
                if self.trailing_armed {
                    ThrottleDecision::Skip
                } else {
                    self.trailing_armed = true;
                    ThrottleDecision::ScheduleTrailing(self.interval_ms - (now_ms - last))
                }
            }
            _ => {
                self.last_fire = Some(now_ms);
                ThrottleDecision::Fire
            }
        }
    }

    /// Called when the armed trailing timer elapses. Returns whether the
    /// handler should run.
    pub fn fire_trailing(&mut self, now_ms: f64) -> bool {
        if !self.trailing_armed {
            return false;
        }
        self.trailing_armed = false;
        self.last_fire = Some(now_ms);
        true
    }
}
