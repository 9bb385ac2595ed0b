//! Game settings: level tables, judging rules and kitchen tuning
//!
//! Loaded from JSON at startup. Missing fields fall back to defaults.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TargetError};
use crate::judge::ingredient::{Ingredient, SauceType};

/// Per-level `[min, max]` ranges; levels past the end reuse the last entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelRange {
    pub ranges: Vec<(f32, f32)>,
}

impl LevelRange {
    pub fn new(ranges: Vec<(f32, f32)>) -> Self {
        Self { ranges }
    }

    /// Range for a level, clamped to the last configured entry
    pub fn range(&self, level: u32) -> Result<(f32, f32), TargetError> {
        let last = self.ranges.len().checked_sub(1).ok_or(TargetError::EmptyRange)?;
        Ok(self.ranges[(level as usize).min(last)])
    }

    /// Uniform float in the level's range
    pub fn sample<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Result<f32, TargetError> {
        let (min, max) = self.range(level)?;
        if min >= max {
            return Ok(min);
        }
        Ok(rng.random_range(min..=max))
    }

    /// Uniform float in the level's range, rounded to the nearest integer
    pub fn sample_int<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Result<u32, TargetError> {
        Ok(self.sample(level, rng)?.round().max(0.0) as u32)
    }

    /// Largest integer any level of this table can produce
    pub fn max_int(&self) -> u32 {
        self.ranges
            .iter()
            .map(|&(_, max)| max.round().max(0.0) as u32)
            .max()
            .unwrap_or(0)
    }

    fn validate(&self, table: &'static str) -> Result<(), ConfigError> {
        if self.ranges.is_empty() {
            return Err(ConfigError::EmptyTable { table });
        }
        for (index, &(min, max)) in self.ranges.iter().enumerate() {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
                return Err(ConfigError::BadRange {
                    table,
                    index,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn validate_flags(&self, table: &'static str, available: u32) -> Result<(), ConfigError> {
        for (index, &(_, max)) in self.ranges.iter().enumerate() {
            let requested = max.round() as u32;
            if requested > available {
                return Err(ConfigError::TooManyFlags {
                    table,
                    index,
                    requested,
                    available,
                });
            }
        }
        Ok(())
    }
}

/// Level progression: what each level asks for and how it is passed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTable {
    /// Patties per target burger
    pub patty_count: LevelRange,
    /// Distinct ingredients per target burger
    pub ingredient_count: LevelRange,
    /// Distinct sauces per target burger
    pub sauce_count: LevelRange,
    /// Burgers to deliver before a level ends (last entry reused)
    pub burgers_per_level: Vec<u32>,
    /// Targets open at the same time
    pub slot_count: usize,
    /// Minimum average note to pass a level
    pub min_passing_average: i32,
    /// Optional level timer (seconds)
    pub time_limit_secs: Option<f32>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            patty_count: LevelRange::new(vec![(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]),
            ingredient_count: LevelRange::new(vec![(1.0, 1.0), (1.0, 2.0), (2.0, 3.0), (2.0, 4.0)]),
            sauce_count: LevelRange::new(vec![(0.0, 1.0), (1.0, 1.0), (1.0, 2.0)]),
            burgers_per_level: vec![3, 4, 5, 6],
            slot_count: 2,
            min_passing_average: 12,
            time_limit_secs: None,
        }
    }
}

impl LevelTable {
    /// Burgers required to finish a level
    pub fn burgers_for_level(&self, level: u32) -> u32 {
        let last = self.burgers_per_level.len().saturating_sub(1);
        self.burgers_per_level
            .get((level as usize).min(last))
            .copied()
            .unwrap_or(1)
    }
}

/// Tolerances used when grading a burger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgingRules {
    /// Horizontal distance from the plate before an element counts as off-centre
    pub off_center_tolerance: f32,
    /// Patty faces below this are raw
    pub grill_low: f32,
    /// Patty faces above this are burned
    pub grill_high: f32,
    /// Fewest drops of a required sauce
    pub sauce_min: u32,
    /// Most drops of a required sauce
    pub sauce_max: u32,
    /// Rotation (degrees) past which an item is upside down
    pub upside_down_angle: f32,
}

impl Default for JudgingRules {
    fn default() -> Self {
        Self {
            off_center_tolerance: 0.9,
            grill_low: 0.4,
            grill_high: 0.6,
            sauce_min: 10,
            sauce_max: 29,
            upside_down_angle: 80.0,
        }
    }
}

/// Kitchen simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenTuning {
    /// Sauce drops kept per object; older drops are evicted
    pub max_sauce_drops: usize,
    /// Heat share received by the patty face that is not touching the grill
    pub other_side_grill_ratio: f32,
    /// Grill spans every x below this
    pub grill_max_x: f32,
    /// Grill surface height
    pub grill_y: f32,
    /// Seconds for a patty face to go from raw to charred
    pub patty_grill_secs: f32,
    /// Seconds for any other item to go from untouched to charred
    pub item_grill_secs: f32,
    /// Drops per second while a bottle is squeezed
    pub sauce_drops_per_sec: f32,
    /// Curtain resting (closed) height
    pub curtain_min_y: f32,
    /// Curtain fully open height
    pub curtain_max_y: f32,
    /// Curtain fall acceleration
    pub curtain_acceleration: f32,
    /// Objects closer than this to the curtain are submitted when it closes
    pub curtain_accept_distance: f32,
}

impl Default for KitchenTuning {
    fn default() -> Self {
        Self {
            max_sauce_drops: 100,
            other_side_grill_ratio: 0.4,
            grill_max_x: -3.125,
            grill_y: -2.5,
            patty_grill_secs: 10.0,
            item_grill_secs: 4.0,
            sauce_drops_per_sec: 20.0,
            curtain_min_y: 0.125,
            curtain_max_y: 1.875,
            curtain_acceleration: 2.0,
            curtain_accept_distance: 2.5,
        }
    }
}

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub levels: LevelTable,
    pub judging: JudgingRules,
    pub kitchen: KitchenTuning,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject configurations the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let levels = &self.levels;
        levels.patty_count.validate("patty_count")?;
        levels.ingredient_count.validate("ingredient_count")?;
        levels.sauce_count.validate("sauce_count")?;
        levels
            .ingredient_count
            .validate_flags("ingredient_count", Ingredient::COUNT)?;
        levels.sauce_count.validate_flags("sauce_count", SauceType::COUNT)?;

        if levels.burgers_per_level.is_empty() {
            return Err(ConfigError::EmptyTable {
                table: "burgers_per_level",
            });
        }
        if levels.burgers_per_level.contains(&0) {
            return Err(invalid("burgers_per_level", "every level needs at least one burger"));
        }
        if levels.slot_count == 0 {
            return Err(invalid("slot_count", "at least one slot is required"));
        }
        if let Some(limit) = levels.time_limit_secs {
            if !(limit > 0.0) {
                return Err(invalid("time_limit_secs", format!("must be positive, got {limit}")));
            }
        }

        let rules = &self.judging;
        if !(rules.grill_low <= rules.grill_high) {
            return Err(invalid(
                "judging.grill_low",
                format!("{} is above grill_high {}", rules.grill_low, rules.grill_high),
            ));
        }
        if rules.sauce_min > rules.sauce_max {
            return Err(invalid(
                "judging.sauce_min",
                format!("{} is above sauce_max {}", rules.sauce_min, rules.sauce_max),
            ));
        }
        if !(rules.off_center_tolerance >= 0.0) {
            return Err(invalid("judging.off_center_tolerance", "must not be negative"));
        }

        let kitchen = &self.kitchen;
        if kitchen.max_sauce_drops == 0 {
            return Err(invalid("kitchen.max_sauce_drops", "must be at least 1"));
        }
        if !(kitchen.patty_grill_secs > 0.0 && kitchen.item_grill_secs > 0.0) {
            return Err(invalid("kitchen grill durations", "must be positive"));
        }
        if !(kitchen.sauce_drops_per_sec > 0.0) {
            return Err(invalid("kitchen.sauce_drops_per_sec", "must be positive"));
        }
        if !(kitchen.curtain_min_y < kitchen.curtain_max_y) {
            return Err(invalid("kitchen.curtain_min_y", "must be below curtain_max_y"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
