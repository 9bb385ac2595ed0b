//! Property tests for the grader.
//!
//! Invariants covered:
//! - Grading ignores the order objects are handed over in.
//! - Adding an ingredient the order did not ask for never raises the note.
//! - A textbook burger always scores 20.
//! - `random_flags` returns exactly `count` distinct bits, or fails when the
//!   flag space is too small.
//! - Slot assignment picks the best note, lowest index on ties.
//! - Generated targets stay inside the level table.

use burger_judge::judge::{
    Ingredient, IngredientSet, SauceSet, SauceType, TargetBurger, TargetGenerator, assign, classify,
    random_flags,
};
use burger_judge::sim::{ItemKind, PlacedObject};
use burger_judge::{JudgingRules, LevelTable, TargetError};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn target_strategy() -> impl Strategy<Value = TargetBurger> {
    (0u32..4, 0u32..16, 0u32..4).prop_map(|(patties, ingredients, sauces)| {
        TargetBurger::new(
            patties,
            IngredientSet::from_bits(ingredients),
            SauceSet::from_bits(sauces),
        )
    })
}

fn kind_strategy() -> impl Strategy<Value = ItemKind> {
    prop_oneof![
        Just(ItemKind::Plate),
        Just(ItemKind::BreadBottom),
        Just(ItemKind::BreadTop),
        (0.0f32..1.0, 0.0f32..1.0).prop_map(|(top, bottom)| ItemKind::Patty { top, bottom }),
        (0usize..4).prop_map(|i| ItemKind::Ingredient(Ingredient::ALL[i])),
        (0usize..2).prop_map(|i| ItemKind::SauceBottle(SauceType::ALL[i])),
    ]
}

/// Random layer: kind, x offset, angle, grill, ketchup drops, mustard drops
fn layer_strategy() -> impl Strategy<Value = (ItemKind, f32, f32, f32, usize, usize)> {
    (
        kind_strategy(),
        -2.0f32..2.0,
        -180.0f32..180.0,
        prop_oneof![Just(0.0f32), 0.0f32..1.0],
        0usize..20,
        0usize..20,
    )
}

/// Stack the layers bottom to top with distinct heights
fn build_stack(layers: &[(ItemKind, f32, f32, f32, usize, usize)]) -> Vec<PlacedObject> {
    layers
        .iter()
        .enumerate()
        .map(|(i, &(kind, x, angle, grill, ketchup, mustard))| {
            PlacedObject::new(i as u32 + 1, kind, Vec2::new(x, i as f32 * 0.2))
                .with_angle(angle)
                .with_grill(grill)
                .with_sauce(SauceType::Ketchup, ketchup)
                .with_sauce(SauceType::Mustard, mustard)
        })
        .collect()
}

/// A burger made exactly to order
fn textbook(target: &TargetBurger, rules: &JudgingRules) -> Vec<PlacedObject> {
    let done = (rules.grill_low + rules.grill_high) / 2.0;
    let mut kinds = vec![ItemKind::Plate, ItemKind::BreadBottom];
    for _ in 0..target.patty_count {
        kinds.push(ItemKind::Patty {
            top: done,
            bottom: done,
        });
    }
    for ingredient in target.ingredients.iter() {
        kinds.push(ItemKind::Ingredient(ingredient));
        kinds.push(ItemKind::Ingredient(ingredient));
    }
    kinds.push(ItemKind::BreadTop);

    let drops = ((rules.sauce_min + rules.sauce_max) / 2) as usize;
    let mut objects: Vec<PlacedObject> = kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| PlacedObject::new(i as u32 + 1, kind, Vec2::new(0.0, i as f32 * 0.2)))
        .collect();
    for sauce in target.sauces.iter() {
        objects[1] = objects[1].clone().with_sauce(sauce, drops);
    }
    objects
}

proptest! {
    #[test]
    fn grading_ignores_submission_order(
        target in target_strategy(),
        (stack, shuffled) in prop::collection::vec(layer_strategy(), 0..14)
            .prop_flat_map(|layers| {
                let stack = build_stack(&layers);
                (Just(stack.clone()), Just(stack).prop_shuffle())
            }),
    ) {
        let rules = JudgingRules::default();
        prop_assert_eq!(classify(&stack, &target, &rules), classify(&shuffled, &target, &rules));
    }

    #[test]
    fn unwanted_ingredient_never_helps(
        target in target_strategy(),
        layers in prop::collection::vec(layer_strategy(), 0..12),
        extra in 0usize..4,
        height in 0usize..13,
        x in -2.0f32..2.0,
    ) {
        let rules = JudgingRules::default();
        let ingredient = Ingredient::ALL[extra];
        prop_assume!(!target.ingredients.contains(ingredient));

        let stack = build_stack(&layers);
        let before = classify(&stack, &target, &rules).note;

        let mut more = stack.clone();
        more.push(PlacedObject::new(
            100,
            ItemKind::Ingredient(ingredient),
            Vec2::new(x, height as f32 * 0.2 - 0.1),
        ));
        let after = classify(&more, &target, &rules).note;
        prop_assert!(after <= before, "note went from {} to {}", before, after);
    }

    #[test]
    fn textbook_burger_is_perfect(target in target_strategy()) {
        let rules = JudgingRules::default();
        let grade = classify(&textbook(&target, &rules), &target, &rules);
        prop_assert_eq!(grade.note, 20);
        prop_assert!(grade.defects.is_empty(), "{:?}", grade.defects);
    }

    #[test]
    fn random_flags_picks_distinct_bits(
        seed in any::<u64>(),
        available in 0u32..=8,
        count in 0u32..=10,
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let result = random_flags(&mut rng, count, available);
        if count > available {
            prop_assert_eq!(result, Err(TargetError::TooManyFlags { requested: count, available }));
        } else {
            let bits = result.unwrap();
            prop_assert_eq!(bits.count_ones(), count);
            prop_assert_eq!(bits >> available, 0);
        }
    }

    #[test]
    fn assign_takes_best_slot(
        slots in prop::collection::vec(prop::option::of(target_strategy()), 0..5),
        layers in prop::collection::vec(layer_strategy(), 0..10),
    ) {
        let rules = JudgingRules::default();
        let stack = build_stack(&layers);
        let result = assign(&stack, &slots, &rules);

        let notes: Vec<Option<i32>> = slots
            .iter()
            .map(|s| s.as_ref().map(|t| classify(&stack, t, &rules).note))
            .collect();
        let best = notes.iter().flatten().copied().max();

        match result {
            None => prop_assert!(best.is_none()),
            Some(assignment) => {
                prop_assert_eq!(Some(assignment.grade.note), best);
                let first = notes.iter().position(|n| *n == best);
                prop_assert_eq!(Some(assignment.slot), first);
            }
        }
    }

    #[test]
    fn generated_targets_fit_the_level(seed in any::<u64>(), level in 0u32..10) {
        let levels = LevelTable::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let target = TargetGenerator::new(&levels).generate(level, &mut rng).unwrap();

        let clamp = |ranges: &[(f32, f32)]| ranges[(level as usize).min(ranges.len() - 1)];
        let (lo, hi) = clamp(&levels.patty_count.ranges);
        prop_assert!((lo.round() as u32..=hi.round() as u32).contains(&target.patty_count));
        let (lo, hi) = clamp(&levels.ingredient_count.ranges);
        prop_assert!((lo.round() as u32..=hi.round() as u32).contains(&target.ingredients.len()));
        let (lo, hi) = clamp(&levels.sauce_count.ranges);
        prop_assert!((lo.round() as u32..=hi.round() as u32).contains(&target.sauces.len()));
    }
}
