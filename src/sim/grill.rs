//! Grill heat transfer
//!
//! The grill covers the bottom-left corner of the table. Anything resting on
//! it heats up every tick; patties track each face separately.

use serde::{Deserialize, Serialize};

use super::state::{ItemKind, PlacedObject};
use crate::consts::BLACK_SMOKE_GRILL;
use crate::settings::KitchenTuning;

/// Smoke rising from an object, for the shell to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Smoke {
    None,
    /// Cooking normally
    White,
    /// Something is burning
    Black,
}

/// Whether an object sits on the grill
pub fn is_on_grill(object: &PlacedObject, tuning: &KitchenTuning) -> bool {
    // Patties are a bit thicker than toppings
    let reach = if object.kind.is_patty() {
        object.radius * 1.1
    } else {
        object.radius
    };
    object.pos.x < tuning.grill_max_x - object.radius * 0.7 && object.pos.y < tuning.grill_y + reach
}

/// Whether a patty has its top face down on the grill
pub fn is_flipped(angle: f32) -> bool {
    crate::delta_angle(angle, 0.0).abs() > 90.0
}

/// Heat one object for `dt` seconds if it is on the grill
///
/// Returns the smoke it gives off this tick.
pub fn heat(object: &mut PlacedObject, tuning: &KitchenTuning, dt: f32) -> Smoke {
    if !is_on_grill(object, tuning) {
        return Smoke::None;
    }

    match &mut object.kind {
        ItemKind::Patty { top, bottom } => {
            let amount = dt / tuning.patty_grill_secs;
            let (contact, other) = if is_flipped(object.angle) {
                (top, bottom)
            } else {
                (bottom, top)
            };
            *contact = (*contact + amount).min(1.0);
            *other = (*other + amount * tuning.other_side_grill_ratio).min(1.0);

            if contact.max(*other) > BLACK_SMOKE_GRILL {
                Smoke::Black
            } else {
                Smoke::White
            }
        }
        _ => {
            object.grill = (object.grill + dt / tuning.item_grill_secs).min(1.0);
            // Only patties are meant to be here
            Smoke::Black
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::ingredient::Ingredient;
    use glam::Vec2;

    fn on_grill(kind: ItemKind) -> PlacedObject {
        PlacedObject::new(1, kind, Vec2::new(-5.0, -2.6))
    }

    #[test]
    fn test_grill_region() {
        let tuning = KitchenTuning::default();
        assert!(is_on_grill(&on_grill(ItemKind::patty()), &tuning));
        let table = PlacedObject::new(1, ItemKind::patty(), Vec2::new(0.0, -2.6));
        assert!(!is_on_grill(&table, &tuning));
        let above = PlacedObject::new(1, ItemKind::patty(), Vec2::new(-5.0, 0.0));
        assert!(!is_on_grill(&above, &tuning));
    }

    #[test]
    fn test_patty_heats_contact_face_faster() {
        let tuning = KitchenTuning::default();
        let mut patty = on_grill(ItemKind::patty());
        heat(&mut patty, &tuning, 1.0);

        let ItemKind::Patty { top, bottom } = patty.kind else {
            panic!("not a patty");
        };
        assert!((bottom - 0.1).abs() < 1e-5);
        assert!((top - 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_flipped_patty_heats_top() {
        let tuning = KitchenTuning::default();
        let mut patty = on_grill(ItemKind::patty()).with_angle(180.0);
        heat(&mut patty, &tuning, 2.0);

        let ItemKind::Patty { top, bottom } = patty.kind else {
            panic!("not a patty");
        };
        assert!((top - 0.2).abs() < 1e-5);
        assert!((bottom - 0.08).abs() < 1e-5);
    }

    #[test]
    fn test_heat_clamps_and_smokes_black() {
        let tuning = KitchenTuning::default();
        let mut patty = on_grill(ItemKind::patty());
        let mut smoke = Smoke::None;
        for _ in 0..400 {
            smoke = heat(&mut patty, &tuning, 0.1);
        }
        assert_eq!(smoke, Smoke::Black);
        assert_eq!(patty.kind, ItemKind::Patty { top: 1.0, bottom: 1.0 });
    }

    #[test]
    fn test_topping_burns() {
        let tuning = KitchenTuning::default();
        let mut salad = on_grill(ItemKind::Ingredient(Ingredient::Salad));
        assert_eq!(heat(&mut salad, &tuning, 1.0), Smoke::Black);
        assert!((salad.grill - 0.25).abs() < 1e-5);

        let mut safe = PlacedObject::new(2, ItemKind::Ingredient(Ingredient::Salad), Vec2::ZERO);
        assert_eq!(heat(&mut safe, &tuning, 1.0), Smoke::None);
        assert_eq!(safe.grill, 0.0);
    }
}
