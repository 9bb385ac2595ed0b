//! Burger Judge entry point
//!
//! Plays a headless kitchen: a scripted cook grills patties, stacks each open
//! order in front of the hatch and serves it through the curtain. Receipts are
//! printed as levels end.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use burger_judge::consts::SIM_DT;
use burger_judge::judge::{Ingredient, LevelPhase, SauceType, Session, SessionEvent, TargetBurger};
use burger_judge::sim::{
    Curtain, CurtainInput, ItemKind, Kitchen, PlacedObject, Squeeze, TickInput, TickOutput, tick,
};
use burger_judge::{ConfigError, Error, JudgingRules, KitchenTuning, Receipt, Settings};

/// Serving hatch; burgers are stacked right in front of it
const HATCH: Vec2 = Vec2::new(3.0, 0.0);
const STACK_BASE_Y: f32 = -1.0;
const STACK_STEP: f32 = 0.15;
/// Upper bound for any scripted wait (two minutes of kitchen time)
const MAX_TICKS: u32 = 60 * 120;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for orders and for the cook's mistakes
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Levels to play, passed or not
    #[arg(long, default_value_t = 3)]
    levels: u32,
    /// Chance in [0, 1] that the cook slips at each step
    #[arg(long, default_value_t = 0.2)]
    sloppiness: f64,
    /// Print receipts as JSON once every level is played
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Scripted player driving the kitchen
struct Cook {
    kitchen: Kitchen,
    curtain: Curtain,
    tuning: KitchenTuning,
    rules: JudgingRules,
    rng: Pcg32,
    sloppiness: f64,
    /// Kitchen time not yet reported to the session
    pending: f32,
}

impl Cook {
    fn new(settings: &Settings, seed: u64, sloppiness: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&sloppiness) {
            return Err(ConfigError::Invalid {
                field: "sloppiness",
                reason: format!("{sloppiness} is not in [0, 1]"),
            });
        }
        let tuning = settings.kitchen.clone();
        Ok(Self {
            kitchen: Kitchen::new(),
            curtain: Curtain::new(HATCH, &tuning),
            tuning,
            rules: settings.judging.clone(),
            rng: Pcg32::seed_from_u64(seed),
            sloppiness,
            pending: 0.0,
        })
    }

    fn step(&mut self, input: &TickInput) -> TickOutput {
        let output = tick(&mut self.kitchen, &mut self.curtain, input, &self.tuning, SIM_DT);
        self.pending += SIM_DT;
        output
    }

    fn take_elapsed(&mut self) -> f32 {
        std::mem::take(&mut self.pending)
    }

    fn slip(&mut self) -> bool {
        self.rng.random_bool(self.sloppiness)
    }

    fn patty_faces(&self, id: u32) -> (f32, f32) {
        match self.kitchen.get(id).map(|o| o.kind) {
            Some(ItemKind::Patty { top, bottom }) => (top, bottom),
            _ => (0.0, 0.0),
        }
    }

    /// Grill `count` patties side by side, flipping them once
    fn grill_patties(&mut self, count: u32) -> Vec<u32> {
        let mid = (self.rules.grill_low + self.rules.grill_high) / 2.0;
        let bias = if self.slip() {
            self.rng.random_range(-0.3..0.35)
        } else {
            0.0
        };

        let mut ids = Vec::with_capacity(count as usize);
        for i in 0..count {
            let x = self.tuning.grill_max_x - 1.0 - i as f32 * 1.2;
            ids.push(self.kitchen.spawn(ItemKind::patty(), Vec2::new(x, self.tuning.grill_y)));
        }
        let Some(&first) = ids.first() else {
            return ids;
        };

        // The resting face keeps some heat, so flip early
        let flip_at = (mid * 0.7 + bias).clamp(0.0, 1.0);
        let done_at = (mid + bias).clamp(0.0, 1.0);

        for _ in 0..MAX_TICKS {
            if self.patty_faces(first).1 >= flip_at {
                break;
            }
            self.step(&TickInput::default());
        }
        for &id in &ids {
            if let Some(patty) = self.kitchen.get_mut(id) {
                patty.angle = 180.0;
            }
        }
        for _ in 0..MAX_TICKS {
            if self.patty_faces(first).0 >= done_at {
                break;
            }
            self.step(&TickInput::default());
        }

        let (top, bottom) = self.patty_faces(first);
        log::debug!("Patties done: top {top:.2}, bottom {bottom:.2}");

        // Off the grill while the rest is prepared
        for &id in &ids {
            if let Some(patty) = self.kitchen.get_mut(id) {
                patty.pos = Vec2::new(0.0, -1.0);
            }
        }
        ids
    }

    /// Squeeze a bottle onto `target` until it carries `drops` drops of that sauce
    fn sauce(&mut self, sauce: SauceType, target: u32, drops: u32) {
        let bottle = self.kitchen.spawn(ItemKind::SauceBottle(sauce), Vec2::new(-1.0, 2.0));
        let input = TickInput {
            squeeze: Some(Squeeze {
                bottle,
                target,
                offset: Vec2::new(0.0, 0.1),
            }),
            ..Default::default()
        };

        for _ in 0..MAX_TICKS {
            let count = self
                .kitchen
                .get(target)
                .map_or(drops, |o| o.sauce_drops.count(sauce));
            if count >= drops {
                break;
            }
            self.step(&input);
        }
        self.kitchen.take(&[bottle]);
    }

    /// Cook and stack one burger in front of the hatch
    fn assemble(&mut self, target: &TargetBurger) {
        let patties = self.grill_patties(target.patty_count);

        let mut ingredients: Vec<Ingredient> =
            target.ingredients.iter().flat_map(|i| [i, i]).collect();
        if self.slip() {
            // Forgot the second slice of something
            let wanted: Vec<Ingredient> = target.ingredients.iter().collect();
            if let Some(&short) = wanted.choose(&mut self.rng) {
                if let Some(pos) = ingredients.iter().position(|&i| i == short) {
                    ingredients.remove(pos);
                }
            }
        }
        if self.slip() {
            let unwanted: Vec<Ingredient> = Ingredient::ALL
                .into_iter()
                .filter(|&i| !target.ingredients.contains(i))
                .collect();
            if let Some(&extra) = unwanted.choose(&mut self.rng) {
                ingredients.push(extra);
            }
        }

        let plate = self.kitchen.spawn(ItemKind::Plate, Vec2::ZERO);
        let bread_bottom = self.kitchen.spawn(ItemKind::BreadBottom, Vec2::ZERO);
        let mut layers = vec![plate, bread_bottom];
        layers.extend(patties);
        for ingredient in ingredients {
            layers.push(self.kitchen.spawn(ItemKind::Ingredient(ingredient), Vec2::ZERO));
        }
        let bread_top = self.kitchen.spawn(ItemKind::BreadTop, Vec2::ZERO);
        layers.push(bread_top);

        let mid_drops = (self.rules.sauce_min + self.rules.sauce_max) / 2;
        for sauce in target.sauces.iter() {
            let drops = if self.slip() {
                self.rng.random_range(0..=self.rules.sauce_max + 10)
            } else {
                mid_drops
            };
            self.sauce(sauce, bread_bottom, drops);
        }

        let wobble_layer = if self.slip() {
            Some(self.rng.random_range(1..layers.len()))
        } else {
            None
        };
        for (i, &id) in layers.iter().enumerate() {
            let wobble = if wobble_layer == Some(i) {
                self.rng.random_range(0.5..1.5)
            } else {
                0.0
            };
            if let Some(object) = self.kitchen.get_mut(id) {
                object.pos = Vec2::new(HATCH.x + wobble, STACK_BASE_Y + i as f32 * STACK_STEP);
            }
        }

        if self.slip() {
            if let Some(top) = self.kitchen.get_mut(bread_top) {
                top.angle = 180.0;
            }
        }
    }

    /// Lift the curtain and let it fall; returns what it took
    fn serve(&mut self) -> Vec<PlacedObject> {
        let (min_y, max_y) = (self.tuning.curtain_min_y, self.tuning.curtain_max_y);
        let hold = |y: f32, press: bool| TickInput {
            curtain: CurtainInput {
                pointer_y: Some(y),
                press,
            },
            ..Default::default()
        };

        self.step(&hold(min_y, true));
        self.step(&hold(max_y, false));
        self.step(&hold(max_y - 0.25, false));

        for _ in 0..MAX_TICKS {
            let output = self.step(&TickInput::default());
            if let Some(ids) = output.submitted() {
                let ids = ids.to_vec();
                return self.kitchen.take(&ids);
            }
        }
        log::warn!("Curtain never closed on anything");
        Vec::new()
    }

    /// Clear the table between attempts
    fn reset(&mut self) {
        self.kitchen = Kitchen::new();
        self.curtain = Curtain::new(HATCH, &self.tuning);
        self.pending = 0.0;
    }
}

fn log_events(session: &mut Session) {
    for event in session.drain_events() {
        match event {
            SessionEvent::TargetGenerated { slot, target } => {
                log::info!("New order in slot {slot}: {target}");
            }
            SessionEvent::SubmissionGraded { slot, grade } => {
                log::debug!("Slot {slot} graded {}", grade.note);
            }
            SessionEvent::LevelComplete(report) => {
                log::debug!("Level {} report ready", report.level + 1);
            }
            SessionEvent::LevelAborted { level } => {
                log::warn!("Level {} aborted", level + 1);
            }
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let settings = Settings::load(args.config.as_deref())?;
    let mut cook = Cook::new(&settings, args.seed.wrapping_add(1), args.sloppiness)?;
    let mut session = Session::new(settings, args.seed)?;
    session.start_level()?;
    log_events(&mut session);

    let mut receipts = Vec::new();
    let mut played = 0;
    while played < args.levels {
        let Some(target) = session.slots().iter().flatten().next().copied() else {
            session.restart_level()?;
            log_events(&mut session);
            continue;
        };

        cook.assemble(&target);
        let served = cook.serve();
        session.tick(cook.take_elapsed());
        if session.phase() == LevelPhase::Aborted {
            log_events(&mut session);
            played += 1;
            cook.reset();
            session.restart_level()?;
            log_events(&mut session);
            continue;
        }

        let outcome = session.submit(&served)?;
        log_events(&mut session);
        if !args.json {
            println!(
                "Served slot {} ({}/{}): {}/20",
                outcome.slot, outcome.delivered, outcome.required, outcome.grade.note
            );
        }

        if let Some(report) = outcome.report {
            let receipt = Receipt::from(&report);
            if !args.json {
                println!("{receipt}\n");
            }
            receipts.push(receipt);
            played += 1;
            cook.reset();

            if report.passed {
                session.advance_level()?;
            } else {
                session.restart_level()?;
            }
            log_events(&mut session);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipts)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Burger Judge starting (seed {})", args.seed);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
