//! Burger classifier
//!
//! Grades an unordered set of placed objects against a target burger:
//! 1. Sort by height to recover the stacking order (bottom to top)
//! 2. One pass over the stack, reporting per-object defects as they appear
//! 3. Aggregate checks once the whole stack has been seen
//!
//! Defects come out in discovery order: scan order first, then aggregates.

use serde::{Deserialize, Serialize};

use super::defect::{Defect, DefectKind, note};
use super::ingredient::{Ingredient, SauceType};
use super::target::TargetBurger;
use crate::is_upside_down;
use crate::settings::JudgingRules;
use crate::sim::state::{ItemKind, PlacedObject};

/// Result of grading one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub note: i32,
    pub defects: Vec<Defect>,
}

impl Grade {
    pub fn is_perfect(&self) -> bool {
        self.defects.is_empty()
    }

    /// Number of defects of one kind
    pub fn count(&self, kind: DefectKind) -> usize {
        self.defects.iter().filter(|d| d.kind == kind).count()
    }
}

/// Running state of the stack scan
#[derive(Debug, Default)]
struct Scan {
    done_plate: bool,
    done_bread_bottom: bool,
    done_bread_top: bool,
    /// Ingredients seen at least once
    one: u32,
    /// Ingredients seen at least twice
    two: u32,
    /// Ingredients seen more than twice
    too_much: u32,
    patties: u32,
    plate_x: Option<f32>,
    sauce_drops: [u32; SauceType::COUNT as usize],
    sauce_on_plate: u32,
    defects: Vec<Defect>,
}

impl Scan {
    fn report(&mut self, kind: DefectKind) {
        self.defects.push(Defect::new(kind));
    }

    fn report_scaled(&mut self, kind: DefectKind, severity: f32) {
        self.defects.push(Defect::with_severity(kind, severity));
    }

    fn between_breads(&self) -> bool {
        self.done_bread_bottom && !self.done_bread_top
    }

    fn record_ingredient(&mut self, ingredient: Ingredient) {
        let bit = ingredient.bit();
        if self.two & bit != 0 {
            self.too_much |= bit;
        } else if self.one & bit != 0 {
            self.two |= bit;
        } else {
            self.one |= bit;
        }
    }

    /// Per-object checks; objects must arrive bottom to top
    fn visit(&mut self, object: &PlacedObject, rules: &JudgingRules) {
        let upside_down = is_upside_down(object.angle, rules.upside_down_angle);
        let mut centered_check = true;

        match object.kind {
            ItemKind::Plate => {
                if self.done_bread_bottom || self.done_bread_top {
                    self.report(DefectKind::PlateInBurger);
                }
                if self.done_plate {
                    self.report(DefectKind::TwoPlates);
                }
                if upside_down {
                    self.report(DefectKind::PlateUpsideDown);
                }
                self.plate_x = Some(object.pos.x);
                self.done_plate = true;
                centered_check = false;
            }
            ItemKind::BreadBottom => {
                if self.done_bread_top {
                    self.report(DefectKind::WrongBreadPosition);
                }
                if self.done_bread_bottom {
                    self.report(DefectKind::TwoBreads);
                }
                if upside_down {
                    self.report(DefectKind::BreadUpsideDown);
                }
                self.done_bread_bottom = true;
            }
            ItemKind::BreadTop => {
                if self.done_bread_top {
                    self.report(DefectKind::TwoBreads);
                }
                if upside_down {
                    self.report(DefectKind::BreadUpsideDown);
                }
                self.done_bread_top = true;
            }
            ItemKind::Patty { top, bottom } => {
                let burned =
                    (bottom - rules.grill_high).max(0.0) + (top - rules.grill_high).max(0.0);
                let raw = (rules.grill_low - bottom).max(0.0) + (rules.grill_low - top).max(0.0);
                if burned > 0.0 {
                    self.report_scaled(DefectKind::BurnedSteak, burned);
                }
                if raw > 0.0 {
                    self.report_scaled(DefectKind::RawSteak, raw);
                }
                self.patties += 1;
            }
            ItemKind::Ingredient(ingredient) => {
                if !self.between_breads() {
                    self.report(DefectKind::IngredientOutsideBurger);
                    centered_check = false;
                }
                self.record_ingredient(ingredient);
            }
            ItemKind::SauceBottle(_) => {}
        }

        // Nothing but patties belongs on the grill
        if !object.kind.is_patty() && object.grill > 0.0 {
            self.report_scaled(DefectKind::BurnedIngredient, object.grill);
        }

        if centered_check {
            if let Some(plate_x) = self.plate_x {
                let excess = (object.pos.x - plate_x).abs() - rules.off_center_tolerance;
                if excess > 0.0 {
                    self.report_scaled(DefectKind::OffCenteredElement, excess);
                }
            }
        }

        let on_plate = matches!(object.kind, ItemKind::Plate);
        for drop in object.sauce_drops.iter() {
            self.sauce_drops[drop.sauce.index() as usize] += 1;
            if on_plate {
                self.sauce_on_plate += 1;
            }
        }
    }

    /// Whole-stack checks against the target
    fn finish(mut self, target: &TargetBurger, rules: &JudgingRules) -> Vec<Defect> {
        if !self.done_plate {
            self.report(DefectKind::MissingPlate);
        }
        if !self.done_bread_bottom || !self.done_bread_top {
            self.report(DefectKind::MissingBread);
        }
        if self.sauce_on_plate > 0 {
            self.report_scaled(DefectKind::SauceOnPlate, self.sauce_on_plate as f32);
        }

        for sauce in SauceType::ALL {
            let count = self.sauce_drops[sauce.index() as usize];
            if target.sauces.contains(sauce) {
                if count < rules.sauce_min {
                    let missing = (rules.sauce_min - count) as f32;
                    self.report_scaled(DefectKind::NotEnoughSauce, missing);
                } else if count > rules.sauce_max {
                    self.report_scaled(DefectKind::TooMuchSauce, (count - rules.sauce_max) as f32);
                }
            } else if count > 0 {
                self.report_scaled(DefectKind::InvalidSauce, count as f32);
            }
        }

        for ingredient in Ingredient::ALL {
            let bit = ingredient.bit();
            let seen_once = self.one & bit != 0;
            let seen_twice = self.two & bit != 0;
            let seen_more = self.too_much & bit != 0;

            if !target.ingredients.contains(ingredient) {
                if seen_once {
                    self.report(DefectKind::InvalidIngredient);
                }
            } else if !seen_once {
                self.report(DefectKind::MissingIngredient);
            } else if !seen_twice {
                self.report(DefectKind::NotEnoughIngredient);
            } else if seen_more {
                self.report(DefectKind::TooMuchIngredient);
            }
        }

        if self.patties < target.patty_count {
            let missing = (target.patty_count - self.patties) as f32;
            self.report_scaled(DefectKind::MissingSteak, missing);
        } else if self.patties > target.patty_count {
            self.report(DefectKind::InvalidIngredient);
        }

        self.defects
    }
}

/// Grade a submission against a target burger
pub fn classify(objects: &[PlacedObject], target: &TargetBurger, rules: &JudgingRules) -> Grade {
    let mut stack: Vec<&PlacedObject> = objects.iter().collect();
    stack.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let mut scan = Scan::default();
    for object in stack {
        scan.visit(object, rules);
    }
    let defects = scan.finish(target, rules);
    let note = note(&defects);
    Grade { note, defects }
}
