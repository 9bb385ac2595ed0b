//! Kitchen simulation module
//!
//! The parts of the kitchen the grader depends on. This module must stay
//! deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by object ID)
//! - No rendering or audio dependencies

pub mod curtain;
pub mod grill;
pub mod state;
pub mod tick;

pub use curtain::{Curtain, CurtainEvent, CurtainInput};
pub use grill::{Smoke, heat, is_on_grill};
pub use state::{ItemKind, Kitchen, PlacedObject, SauceDrop, SauceDrops};
pub use tick::{Squeeze, TickInput, TickOutput, tick};
