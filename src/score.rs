/// Points per reference frame at zero speed.
const BASE_RATE: f64 = 0.05;
/// Frame length the base rate is expressed against.
const REFERENCE_FRAME_MS: f64 = 16.67;

/// Running score. Fractional internally; only whole points are shown or
/// compared against the high score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Score {
    value: f64,
}

impl Score {
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Adds this tick's share, scaled up with speed and normalized to `dt_ms`.
    pub fn accrue(&mut self, speed: f64, dt_ms: f64) {
        let gained = BASE_RATE * (1.0 + speed / 6.0) * (dt_ms / REFERENCE_FRAME_MS);
        self.value += gained.max(0.0);
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn points(&self) -> u32 {
        self.value.floor() as u32
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, value: f64) {
        self.value = value;
    }
}
