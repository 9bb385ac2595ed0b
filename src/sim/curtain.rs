//! Submission curtain
//!
//! The player drags the curtain up to open the serving hatch and lets it
//! fall to serve. When it lands closed, every burger item close to the hatch
//! is handed over for grading.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::PlacedObject;
use crate::settings::KitchenTuning;

/// Pointer state for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct CurtainInput {
    /// Pointer height while the button is held
    pub pointer_y: Option<f32>,
    /// Button pressed on the curtain handle this tick
    pub press: bool,
}

/// Things the shell reacts to (sounds, grading)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurtainEvent {
    /// Reached the fully open position
    Opened,
    /// Landed closed
    Closed,
    /// IDs of the objects served when the curtain closed
    Submitted(Vec<u32>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curtain {
    /// Hatch centre, objects are accepted around it
    pub position: Vec2,
    /// Current height (min = closed, max = open)
    pub y: f32,
    pub velocity: f32,
    grabbing: bool,
    grab_offset: f32,
    last_y: f32,
    was_closed: bool,
}

impl Curtain {
    /// New closed curtain
    pub fn new(position: Vec2, tuning: &KitchenTuning) -> Self {
        Self {
            position,
            y: tuning.curtain_min_y,
            velocity: 0.0,
            grabbing: false,
            grab_offset: 0.0,
            last_y: tuning.curtain_min_y,
            was_closed: true,
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbing
    }

    pub fn is_open(&self, tuning: &KitchenTuning) -> bool {
        self.y >= tuning.curtain_max_y
    }

    pub fn is_closed(&self, tuning: &KitchenTuning) -> bool {
        self.y <= tuning.curtain_min_y
    }

    /// Whether an object is close enough to the hatch to be served
    pub fn accepts(&self, object: &PlacedObject, tuning: &KitchenTuning) -> bool {
        object.pos.distance_squared(self.position) < tuning.curtain_accept_distance.powi(2)
    }

    /// Advance the curtain by one step
    pub fn tick(
        &mut self,
        input: &CurtainInput,
        objects: &[PlacedObject],
        tuning: &KitchenTuning,
        dt: f32,
    ) -> Vec<CurtainEvent> {
        let (min_y, max_y) = (tuning.curtain_min_y, tuning.curtain_max_y);
        let mut events = Vec::new();

        if input.press {
            if let Some(pointer) = input.pointer_y {
                self.grabbing = true;
                self.grab_offset = pointer - self.y;
            }
        }

        let mut y = self.y;
        if self.grabbing {
            if let Some(pointer) = input.pointer_y {
                y = pointer - self.grab_offset;
            }
            self.velocity = 0.0;
        } else if y < max_y && y > min_y {
            // Free fall between the stops
            self.velocity -= tuning.curtain_acceleration * dt;
            y += self.velocity * dt;
        }
        let y = y.clamp(min_y, max_y);

        if y >= max_y && self.last_y < max_y {
            events.push(CurtainEvent::Opened);
        }
        if y <= min_y && self.last_y > min_y {
            events.push(CurtainEvent::Closed);
        }

        if input.pointer_y.is_none() {
            self.grabbing = false;
        }

        let closed = y <= min_y;
        if closed && !self.was_closed {
            let served: Vec<u32> = objects
                .iter()
                .filter(|o| o.kind.is_burger_item() && self.accepts(o, tuning))
                .map(|o| o.id)
                .collect();
            if !served.is_empty() {
                log::debug!("Curtain closed on {} objects", served.len());
                events.push(CurtainEvent::Submitted(served));
            }
        }

        self.was_closed = closed;
        self.last_y = y;
        self.y = y;
        events
    }
}
