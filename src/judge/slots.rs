//! Slot assignment: which open order a submission is meant for

use serde::{Deserialize, Serialize};

use super::classifier::{Grade, classify};
use super::target::TargetBurger;
use crate::settings::JudgingRules;
use crate::sim::state::PlacedObject;

/// The slot a submission was matched to, with its grade there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot: usize,
    pub grade: Grade,
}

/// Grade a submission against every open slot and keep the best one
///
/// Ties go to the lowest slot index. Returns `None` when no slot is open.
pub fn assign(
    objects: &[PlacedObject],
    slots: &[Option<TargetBurger>],
    rules: &JudgingRules,
) -> Option<Assignment> {
    let mut best: Option<Assignment> = None;

    for (slot, target) in slots.iter().enumerate() {
        let Some(target) = target else {
            continue;
        };
        let grade = classify(objects, target, rules);
        log::trace!("Slot {} would score {}", slot, grade.note);

        let better = best.as_ref().is_none_or(|b| grade.note > b.grade.note);
        if better {
            best = Some(Assignment { slot, grade });
        }
    }

    best
}
