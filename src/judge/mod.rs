//! Burger grading
//!
//! Everything that decides what the customer wants and how well a submitted
//! stack matches it. This module is pure and deterministic:
//! - Reads kitchen objects (`sim::state::PlacedObject`) but never steps the
//!   simulation
//! - Randomness only through a caller-supplied RNG or seed
//! - Identical inputs (after the height sort) give identical grades

pub mod classifier;
pub mod defect;
pub mod ingredient;
pub mod session;
pub mod slots;
pub mod target;

pub use classifier::{Grade, classify};
pub use defect::{Defect, DefectKind, note};
pub use ingredient::{Ingredient, IngredientSet, SauceSet, SauceType};
pub use session::{
    BurgerResult, LevelPhase, LevelReport, Session, SessionEvent, SubmissionOutcome, average_note,
};
pub use slots::{Assignment, assign};
pub use target::{TargetBurger, TargetGenerator, random_flags};
