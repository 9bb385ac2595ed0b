//! Burger Judge - burger assembly game core
//!
//! Core modules:
//! - `judge`: Deterministic grading (targets, defect catalog, classifier, slots, sessions)
//! - `sim`: Kitchen simulation (grill heat, sauce drops, submission curtain)
//! - `settings`: Data-driven level and judging configuration
//! - `receipt`: End-of-level receipt rendering

pub mod error;
pub mod judge;
pub mod receipt;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, Error, SessionError, TargetError};
pub use receipt::Receipt;
pub use settings::{JudgingRules, KitchenTuning, LevelRange, LevelTable, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed kitchen timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Note awarded to a flawless burger
    pub const MAX_NOTE: i32 = 20;

    /// Grill level above which smoke turns black
    pub const BLACK_SMOKE_GRILL: f32 = 0.8;
}

/// Shortest signed difference `target - current` in degrees, in [-180, 180]
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Whether an object rotated by `angle` degrees counts as upside down
#[inline]
pub fn is_upside_down(angle: f32, max_angle: f32) -> bool {
    delta_angle(angle, 0.0).abs() > max_angle
}
