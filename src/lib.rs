//! Math Invaders - an arithmetic arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (problems, difficulty, board, session, ticks)
//! - `settings`: Validated game configuration
//! - `numerals`: Localized digit rendering

pub mod numerals;
pub mod settings;
pub mod sim;

pub use numerals::NumeralSystem;
pub use settings::{Preset, Settings, SettingsError};

/// Game loop constants
pub mod consts {
    /// Fixed simulation step for the headless driver (ms)
    pub const FRAME_MS: u32 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Cap on simulated time for one demo run (ms)
    pub const MAX_DEMO_MS: u64 = 60 * 60 * 1000;
}
