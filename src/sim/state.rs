//! Kitchen state and placed object types
//!
//! Everything the grader looks at lives here: the objects on the table, their
//! grill state and the sauce stuck to them.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::judge::ingredient::{Ingredient, SauceType};

/// What an object on the table is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Plate,
    BreadBottom,
    BreadTop,
    /// Two-sided patty; each face grills independently (0 raw, 1 charred)
    Patty { top: f32, bottom: f32 },
    Ingredient(Ingredient),
    /// Sauce bottle; never part of a burger
    SauceBottle(SauceType),
}

impl ItemKind {
    pub fn patty() -> Self {
        ItemKind::Patty { top: 0.0, bottom: 0.0 }
    }

    /// Whether the curtain picks this item up for grading
    pub fn is_burger_item(&self) -> bool {
        !matches!(self, ItemKind::SauceBottle(_))
    }

    pub fn is_patty(&self) -> bool {
        matches!(self, ItemKind::Patty { .. })
    }
}

/// A sauce deposit stuck to an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SauceDrop {
    pub sauce: SauceType,
    /// Position relative to the host object
    pub offset: Vec2,
}

impl SauceDrop {
    pub fn new(sauce: SauceType) -> Self {
        Self {
            sauce,
            offset: Vec2::ZERO,
        }
    }
}

/// Drops attached to one object, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SauceDrops {
    drops: VecDeque<SauceDrop>,
}

impl SauceDrops {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a drop, evicting the oldest one past `cap`
    ///
    /// Returns the evicted drop, if any.
    pub fn push(&mut self, drop: SauceDrop, cap: usize) -> Option<SauceDrop> {
        self.drops.push_back(drop);
        if self.drops.len() > cap {
            return self.drops.pop_front();
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &SauceDrop> {
        self.drops.iter()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Number of drops of one sauce
    pub fn count(&self, sauce: SauceType) -> u32 {
        self.drops.iter().filter(|d| d.sauce == sauce).count() as u32
    }

    pub fn clear(&mut self) {
        self.drops.clear();
    }
}

/// A physical object on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: u32,
    pub kind: ItemKind,
    /// World position at evaluation time
    pub pos: Vec2,
    /// Rotation in degrees
    pub angle: f32,
    /// Grill exposure for non-patty items (0 untouched, 1 charred)
    pub grill: f32,
    /// Interaction radius, also used by the grill region test
    pub radius: f32,
    pub sauce_drops: SauceDrops,
}

/// Default interaction radius for new objects
pub const DEFAULT_RADIUS: f32 = 0.5;

impl PlacedObject {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            angle: 0.0,
            grill: 0.0,
            radius: DEFAULT_RADIUS,
            sauce_drops: SauceDrops::new(),
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_grill(mut self, grill: f32) -> Self {
        self.grill = grill;
        self
    }

    /// Add `count` drops of a sauce, ignoring the per-object cap
    pub fn with_sauce(mut self, sauce: SauceType, count: usize) -> Self {
        for _ in 0..count {
            self.sauce_drops.push(SauceDrop::new(sauce), usize::MAX);
        }
        self
    }

    /// Attach a drop, respecting the per-object cap
    pub fn add_sauce_drop(&mut self, drop: SauceDrop, cap: usize) {
        if self.sauce_drops.push(drop, cap).is_some() {
            log::trace!("Object {} dropped its oldest sauce drop", self.id);
        }
    }
}

/// Objects currently in the kitchen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kitchen {
    pub objects: Vec<PlacedObject>,
    /// Kitchen time in seconds
    pub time: f32,
    /// Squeeze time not yet turned into drops
    pub squeeze_time: f32,
    next_id: u32,
}

impl Default for Kitchen {
    fn default() -> Self {
        Self::new()
    }
}

impl Kitchen {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            time: 0.0,
            squeeze_time: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a new object and return its ID
    pub fn spawn(&mut self, kind: ItemKind, pos: Vec2) -> u32 {
        let id = self.next_object_id();
        self.objects.push(PlacedObject::new(id, kind, pos));
        id
    }

    pub fn get(&self, id: u32) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Remove objects by ID and hand them back (e.g. after grading)
    pub fn take(&mut self, ids: &[u32]) -> Vec<PlacedObject> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.objects)
            .into_iter()
            .partition(|o| ids.contains(&o.id));
        self.objects = kept;
        taken
    }

    /// Ensure objects are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.objects.sort_by_key(|o| o.id);
    }
}
