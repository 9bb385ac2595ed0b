//! Target burgers: what each customer orders

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ingredient::{Ingredient, IngredientSet, SauceSet, SauceType};
use crate::error::TargetError;
use crate::settings::LevelTable;

/// A burger the player must reproduce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetBurger {
    pub patty_count: u32,
    pub ingredients: IngredientSet,
    pub sauces: SauceSet,
}

impl TargetBurger {
    pub fn new(patty_count: u32, ingredients: IngredientSet, sauces: SauceSet) -> Self {
        Self {
            patty_count,
            ingredients,
            sauces,
        }
    }
}

impl std::fmt::Display for TargetBurger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} patty", self.patty_count)?;
        for ingredient in self.ingredients.iter() {
            write!(f, " + {}", ingredient.as_str())?;
        }
        for sauce in self.sauces.iter() {
            write!(f, " + {}", sauce.as_str())?;
        }
        Ok(())
    }
}

/// Pick `count` distinct bits out of `available` by rejection sampling
///
/// Only reasonable for small flag spaces: the retry rate climbs as `count`
/// approaches `available`.
pub fn random_flags<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    available: u32,
) -> Result<u32, TargetError> {
    if count > available {
        return Err(TargetError::TooManyFlags {
            requested: count,
            available,
        });
    }

    let mut bits = 0u32;
    let mut picked = 0;
    while picked < count {
        let bit = 1 << rng.random_range(0..available);
        if bits & bit == 0 {
            bits |= bit;
            picked += 1;
        }
    }
    Ok(bits)
}

/// Draws targets from the level table
#[derive(Debug, Clone)]
pub struct TargetGenerator<'a> {
    levels: &'a LevelTable,
}

impl<'a> TargetGenerator<'a> {
    pub fn new(levels: &'a LevelTable) -> Self {
        Self { levels }
    }

    /// Generate a target burger for a level
    pub fn generate<R: Rng + ?Sized>(
        &self,
        level: u32,
        rng: &mut R,
    ) -> Result<TargetBurger, TargetError> {
        let patty_count = self.levels.patty_count.sample_int(level, rng)?;
        let ingredient_count = self.levels.ingredient_count.sample_int(level, rng)?;
        let sauce_count = self.levels.sauce_count.sample_int(level, rng)?;

        let ingredients =
            IngredientSet::from_bits(random_flags(rng, ingredient_count, Ingredient::COUNT)?);
        let sauces = SauceSet::from_bits(random_flags(rng, sauce_count, SauceType::COUNT)?);

        let target = TargetBurger::new(patty_count, ingredients, sauces);
        log::debug!("Level {} target: {}", level, target);
        Ok(target)
    }
}
