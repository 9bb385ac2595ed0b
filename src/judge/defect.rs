//! Defect catalog
//!
//! Every way a burger can be wrong, with the points it costs. Some kinds cost
//! a flat amount; the others scale with a severity argument (drop count,
//! grill overshoot, off-centre distance).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NOTE;

/// Closed set of defects the classifier can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefectKind {
    MissingPlate,
    MissingBread,
    MissingIngredient,
    MissingSteak,
    NotEnoughSauce,
    TooMuchSauce,
    SauceOnPlate,
    InvalidSauce,
    PlateUpsideDown,
    BreadUpsideDown,
    BurnedIngredient,
    BurnedSteak,
    RawSteak,
    InvalidIngredient,
    OffCenteredElement,
    IngredientOutsideBurger,
    TwoPlates,
    TwoBreads,
    PlateInBurger,
    WrongBreadPosition,
    TooMuchIngredient,
    NotEnoughIngredient,
}

impl DefectKind {
    /// Human-readable line for the receipt
    pub fn description(&self) -> &'static str {
        match self {
            DefectKind::MissingPlate => "No plate",
            DefectKind::MissingBread => "Missing bread",
            DefectKind::MissingIngredient => "Missing ingredient",
            DefectKind::MissingSteak => "Missing steak",
            DefectKind::NotEnoughSauce => "Not enough sauce",
            DefectKind::TooMuchSauce => "Too much sauce",
            DefectKind::SauceOnPlate => "Sauce on the plate",
            DefectKind::InvalidSauce => "Wrong sauce",
            DefectKind::PlateUpsideDown => "Plate upside down",
            DefectKind::BreadUpsideDown => "Bread upside down",
            DefectKind::BurnedIngredient => "Burned ingredient",
            DefectKind::BurnedSteak => "Burned steak",
            DefectKind::RawSteak => "Raw steak",
            DefectKind::InvalidIngredient => "Unwanted ingredient",
            DefectKind::OffCenteredElement => "Off-centered element",
            DefectKind::IngredientOutsideBurger => "Ingredient outside the burger",
            DefectKind::TwoPlates => "Two plates",
            DefectKind::TwoBreads => "Too much bread",
            DefectKind::PlateInBurger => "Plate inside the burger",
            DefectKind::WrongBreadPosition => "Bread in the wrong order",
            DefectKind::TooMuchIngredient => "Too much of an ingredient",
            DefectKind::NotEnoughIngredient => "Not enough of an ingredient",
        }
    }

    /// Points lost for one occurrence with the given severity
    pub fn penalty(&self, severity: f32) -> i32 {
        let scaled = |coefficient: f32| (coefficient * severity).ceil() as i32;
        match self {
            DefectKind::MissingPlate => 10,
            DefectKind::MissingBread => 10,
            DefectKind::MissingIngredient => 6,
            DefectKind::MissingSteak => 7,
            DefectKind::NotEnoughSauce => scaled(0.4),
            DefectKind::TooMuchSauce => scaled(0.1),
            DefectKind::SauceOnPlate => scaled(0.1),
            DefectKind::InvalidSauce => scaled(0.2),
            DefectKind::PlateUpsideDown => 4,
            DefectKind::BreadUpsideDown => 2,
            DefectKind::BurnedIngredient => scaled(6.0),
            DefectKind::BurnedSteak => scaled(6.0),
            DefectKind::RawSteak => scaled(6.0),
            DefectKind::InvalidIngredient => 7,
            DefectKind::OffCenteredElement => scaled(2.0),
            DefectKind::IngredientOutsideBurger => 3,
            DefectKind::TwoPlates => 10,
            DefectKind::TwoBreads => 10,
            DefectKind::PlateInBurger => 10,
            DefectKind::WrongBreadPosition => 7,
            DefectKind::TooMuchIngredient => 3,
            DefectKind::NotEnoughIngredient => 3,
        }
    }
}

/// One detected defect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    pub kind: DefectKind,
    /// Kind-specific magnitude (1 for flat defects)
    pub severity: f32,
}

impl Defect {
    pub fn new(kind: DefectKind) -> Self {
        Self::with_severity(kind, 1.0)
    }

    pub fn with_severity(kind: DefectKind, severity: f32) -> Self {
        Self { kind, severity }
    }

    pub fn penalty(&self) -> i32 {
        self.kind.penalty(self.severity)
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}

/// Note for a list of defects: 20 minus every penalty, not clamped
pub fn note(defects: &[Defect]) -> i32 {
    MAX_NOTE - defects.iter().map(Defect::penalty).sum::<i32>()
}
