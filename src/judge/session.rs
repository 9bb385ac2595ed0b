//! Level session: open orders, deliveries and the end-of-level verdict
//!
//! The shell owns one [`Session`] and feeds it every submission. The session
//! queues [`SessionEvent`]s for the shell to render.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::classifier::Grade;
use super::slots::assign;
use super::target::{TargetBurger, TargetGenerator};
use crate::error::{ConfigError, SessionError, TargetError};
use crate::settings::Settings;
use crate::sim::state::PlacedObject;

/// Where the current level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Orders open, accepting submissions
    Running,
    /// Every burger delivered
    Complete { passed: bool },
    /// Timer ran out or the shell reset the level
    Aborted,
}

/// One graded delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurgerResult {
    pub slot: usize,
    pub target: TargetBurger,
    pub grade: Grade,
}

/// End-of-level verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    pub level: u32,
    pub passed: bool,
    pub average: i32,
    pub min_passing_average: i32,
    pub burgers: Vec<BurgerResult>,
}

/// Notifications for the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new order opened in a slot
    TargetGenerated { slot: usize, target: TargetBurger },
    /// A submission was matched to a slot and graded
    SubmissionGraded { slot: usize, grade: Grade },
    /// All burgers of the level were delivered
    LevelComplete(LevelReport),
    /// The level ended without completing
    LevelAborted { level: u32 },
}

/// What a submission led to
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub slot: usize,
    pub grade: Grade,
    pub delivered: u32,
    pub required: u32,
    /// Present once the last burger of the level was delivered
    pub report: Option<LevelReport>,
}

/// Integer average of the notes, rounded half away from zero
pub fn average_note(notes: impl IntoIterator<Item = i32>) -> i32 {
    let (sum, count) = notes
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), n| (sum + n as i64, count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i32
}

/// State of one play session
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    level: u32,
    phase: LevelPhase,
    slots: Vec<Option<TargetBurger>>,
    results: Vec<BurgerResult>,
    required: u32,
    /// Seconds since the level started
    elapsed: f32,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session; settings are validated here
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let slot_count = settings.levels.slot_count;
        Ok(Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 0,
            phase: LevelPhase::Aborted,
            slots: vec![None; slot_count],
            results: Vec::new(),
            required: 0,
            elapsed: 0.0,
            events: Vec::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// Open orders, one entry per slot
    pub fn slots(&self) -> &[Option<TargetBurger>] {
        &self.slots
    }

    /// Burgers delivered so far this level
    pub fn results(&self) -> &[BurgerResult] {
        &self.results
    }

    pub fn delivered(&self) -> u32 {
        self.results.len() as u32
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset the current level and open every slot
    pub fn start_level(&mut self) -> Result<(), TargetError> {
        self.required = self.settings.levels.burgers_for_level(self.level);
        self.results = Vec::with_capacity(self.required as usize);
        self.elapsed = 0.0;
        self.slots.iter_mut().for_each(|s| *s = None);
        self.phase = LevelPhase::Running;

        log::info!("Level {} started: {} burgers to deliver", self.level + 1, self.required);

        let open = (self.slots.len() as u32).min(self.required) as usize;
        for slot in 0..open {
            self.open_slot(slot)?;
        }
        Ok(())
    }

    /// Move on after a passed level
    pub fn advance_level(&mut self) -> Result<(), SessionError> {
        match self.phase {
            LevelPhase::Complete { passed: true } => {}
            LevelPhase::Complete { passed: false } => {
                return Err(SessionError::LevelNotPassed(self.level));
            }
            _ => return Err(SessionError::LevelNotComplete(self.level)),
        }
        self.level += 1;
        self.start_level()?;
        Ok(())
    }

    /// Replay the current level from scratch
    pub fn restart_level(&mut self) -> Result<(), TargetError> {
        self.start_level()
    }

    /// Drop every open order and stop accepting submissions
    pub fn abort_level(&mut self) {
        if self.phase != LevelPhase::Running {
            return;
        }
        log::warn!(
            "Level {} aborted after {}/{} burgers",
            self.level + 1,
            self.delivered(),
            self.required
        );
        self.slots.iter_mut().for_each(|s| *s = None);
        self.phase = LevelPhase::Aborted;
        self.events.push(SessionEvent::LevelAborted { level: self.level });
    }

    /// Advance the level timer; aborts the level when time runs out
    pub fn tick(&mut self, dt: f32) {
        if self.phase != LevelPhase::Running {
            return;
        }
        self.elapsed += dt;
        if let Some(limit) = self.settings.levels.time_limit_secs {
            if self.elapsed >= limit {
                self.abort_level();
            }
        }
    }

    /// Grade a submission, record it and refill the freed slot
    pub fn submit(&mut self, objects: &[PlacedObject]) -> Result<SubmissionOutcome, SessionError> {
        match self.phase {
            LevelPhase::Running => {}
            LevelPhase::Complete { .. } => return Err(SessionError::LevelComplete(self.level)),
            LevelPhase::Aborted => return Err(SessionError::NoOpenSlot),
        }

        let assignment =
            assign(objects, &self.slots, &self.settings.judging).ok_or(SessionError::NoOpenSlot)?;
        let slot = assignment.slot;
        let grade = assignment.grade;
        let target = self.slots[slot].take().ok_or(SessionError::NoOpenSlot)?;

        log::info!(
            "Burger {}/{} delivered to slot {}: note {} ({} defects)",
            self.delivered() + 1,
            self.required,
            slot,
            grade.note,
            grade.defects.len()
        );
        for defect in &grade.defects {
            log::debug!(
                "  {} (severity {:.2}, -{})",
                defect.description(),
                defect.severity,
                defect.penalty()
            );
        }

        self.results.push(BurgerResult {
            slot,
            target,
            grade: grade.clone(),
        });
        self.events.push(SessionEvent::SubmissionGraded {
            slot,
            grade: grade.clone(),
        });

        let outstanding = self.required - self.delivered();
        if outstanding > 0 {
            self.open_slot(slot)?;
        }

        let report = if outstanding == 0 {
            Some(self.complete_level())
        } else {
            None
        };

        Ok(SubmissionOutcome {
            slot,
            grade,
            delivered: self.delivered(),
            required: self.required,
            report,
        })
    }

    fn open_slot(&mut self, slot: usize) -> Result<(), TargetError> {
        let target =
            TargetGenerator::new(&self.settings.levels).generate(self.level, &mut self.rng)?;
        self.slots[slot] = Some(target);
        self.events.push(SessionEvent::TargetGenerated { slot, target });
        Ok(())
    }

    fn complete_level(&mut self) -> LevelReport {
        let average = average_note(self.results.iter().map(|r| r.grade.note));
        let min_passing_average = self.settings.levels.min_passing_average;
        let passed = average >= min_passing_average;

        self.phase = LevelPhase::Complete { passed };
        // Orders still on the board are withdrawn
        self.slots.iter_mut().for_each(|s| *s = None);
        log::info!(
            "Level {} complete: average {} (needed {}) - {}",
            self.level + 1,
            average,
            min_passing_average,
            if passed { "passed" } else { "failed" }
        );

        let report = LevelReport {
            level: self.level,
            passed,
            average,
            min_passing_average,
            burgers: self.results.clone(),
        };
        self.events.push(SessionEvent::LevelComplete(report.clone()));
        report
    }
}
