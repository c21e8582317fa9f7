#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coefficients scaling the three error terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gains {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
}

impl Gains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// Cross-track-error PID controller.
///
/// Error state is fed one reading per telemetry tick through
/// [`Controller::update_error`] and read back as a correction with
/// [`Controller::total_error`]. The integral accumulates without decay or bound.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    gains: Gains,
    p_error: f64,
    i_error: f64,
    d_error: f64,
}

impl Controller {
    pub fn new(gains: Gains) -> Self {
        let mut controller = Self::default();
        controller.configure(gains);
        controller
    }

    /// Replaces the gains. Error state is left untouched.
    pub fn configure(&mut self, gains: Gains) {
        self.gains = gains;
    }

    pub fn update_error(&mut self, cte: f64) {
        // Derivative is taken against the previous reading, before it is replaced.
        self.d_error = cte - self.p_error;
        self.i_error += cte;
        self.p_error = cte;
    }

    /// Steering correction for the current error state, unclamped.
    pub fn total_error(&self) -> f64 {
        -self.gains.kp * self.p_error - self.gains.kd * self.d_error - self.gains.ki * self.i_error
    }

    /// Folds in one reading and returns the resulting correction.
    pub fn step(&mut self, cte: f64) -> f64 {
        self.update_error(cte);
        self.total_error()
    }

    pub fn reset(&mut self) {
        self.p_error = 0.0;
        self.i_error = 0.0;
        self.d_error = 0.0;
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn p_error(&self) -> f64 {
        self.p_error
    }

    pub fn i_error(&self) -> f64 {
        self.i_error
    }

    pub fn d_error(&self) -> f64 {
        self.d_error
    }
}
