/// Source of simulation steps. Steps never overlap: each `poll` yields at
/// most one.
pub trait TickClock {
    /// Report `elapsed` host ticks; returns true if a simulation step is due.
    fn poll(&mut self, elapsed: u32) -> bool;
}

/// One step every `delay` host ticks.
///
/// A long stall does not cause a burst of catch-up steps: at most one step is
/// due per poll and the backlog is dropped.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    delay: u32,
    pending: u32,
    steps: u64,
}

impl FixedStepClock {
    /// `delay` is clamped to at least 1.
    pub fn new(delay: u32) -> Self {
        Self {
            delay: delay.max(1),
            pending: 0,
            steps: 0,
        }
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    /// Steps delivered so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl TickClock for FixedStepClock {
    fn poll(&mut self, elapsed: u32) -> bool {
        self.pending = self.pending.saturating_add(elapsed);
        if self.pending < self.delay {
            return false;
        }
        self.pending = (self.pending - self.delay).min(self.delay - 1);
        self.steps += 1;
        true
    }
}
