//! Deterministic game simulation
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Ordered board (by column)
//! - No rendering, audio or platform dependencies

pub mod difficulty;
pub mod pool;
pub mod problem;
pub mod state;
pub mod tick;

pub use difficulty::{LevelParams, level_for_score, level_label, max_level};
pub use pool::{Board, Ufo, layout_for, respawn, visible};
pub use problem::{OperandRange, Operation, Problem, ProblemId};
pub use state::{
    DefeatCause, GameEvent, GamePhase, GameState, ImpactOutcome, Outcome, Shot, ShotStage,
    Snapshot, UfoView,
};
pub use tick::{AUTOPILOT_REACTION_MS, DescentTimer, TickInput, autopilot_column, descend, tick};
