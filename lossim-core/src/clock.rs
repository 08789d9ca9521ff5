//! Simulation clock with an integration watermark.

/// Current simulated time plus the time statistics were last integrated up to.
///
/// `current_time >= time_of_last_update` holds between updates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    current_time: f64,
    time_of_last_update: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.current_time
    }

    #[inline]
    pub fn time_of_last_update(&self) -> f64 {
        self.time_of_last_update
    }

    /// Moves the clock to `time`. Time never runs backwards.
    #[inline]
    pub fn advance_to(&mut self, time: f64) {
        debug_assert!(
            time >= self.current_time,
            "clock moved backwards: {} -> {}",
            self.current_time,
            time
        );
        self.current_time = time;
    }

    /// Time elapsed since the last statistics update.
    #[inline]
    pub fn elapsed_since_update(&self) -> f64 {
        self.current_time - self.time_of_last_update
    }

    #[inline]
    pub fn mark_updated(&mut self) {
        self.time_of_last_update = self.current_time;
    }
}
