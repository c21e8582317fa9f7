mod controller;

pub use controller::*;

/// Valid actuation range of the simulator's steering input.
pub const STEERING_LIMIT: f64 = 1.0;

/// Bounds a correction to `[-STEERING_LIMIT, STEERING_LIMIT]`.
///
/// The controller never clamps its own output; this belongs to whoever turns
/// the correction into an actuator command.
pub fn clamp_steering(value: f64) -> f64 {
    value.clamp(-STEERING_LIMIT, STEERING_LIMIT)
}
