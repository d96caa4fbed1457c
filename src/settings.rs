//! Game settings
//!
//! Everything a session needs to know up front: board geometry, rules,
//! problem generation and pacing. Loaded from JSON (missing fields fall back
//! to defaults) and validated before a session is created.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numerals::NumeralSystem;
use crate::sim::{OperandRange, Operation, max_level};

/// Settings validation and loading failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("initial column count must be at least 1")]
    NoColumns,
    #[error("initial column count {initial} exceeds the maximum of {max}")]
    TooManyColumns { initial: usize, max: usize },
    #[error("operation set is empty")]
    NoOperations,
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("starting lives ({starting}) exceed maximum lives ({max})")]
    TooManyLives { starting: u8, max: u8 },
    #[error("ship line ({ship_line}) must lie below the spawn offset ({spawn_offset})")]
    ShipLineAboveSpawn { ship_line: f32, spawn_offset: f32 },
    #[error("operand range [{min}, {max}] is empty")]
    EmptyOperandRange { min: i64, max: i64 },
    #[error("operand steps must satisfy 0 <= min_step <= max_step")]
    BadOperandSteps,
    #[error("operands at level {level} are too large to compute answers")]
    OperandOverflow { level: u32 },
    #[error("division needs operands of at least 1, got a minimum of {min}")]
    ZeroDivisor { min: i64 },
    #[error("descent speed must be a positive finite number")]
    BadDescentSpeed,
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named settings bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Fixed five columns, multiplication only
    Classic,
    /// Board grows with the level, all four operations
    #[default]
    Arcade,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "arcade" => Some(Preset::Arcade),
            _ => None,
        }
    }
}

/// Board geometry, in board units (y grows downward)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Columns on a fresh level-1 board
    pub initial_columns: usize,
    /// Column count never grows past this
    pub max_columns: usize,
    pub width: f32,
    pub height: f32,
    /// A UFO reaching this y ends the game
    pub ship_line: f32,
    /// y at which new UFOs appear; anything at or above it is off-screen
    pub spawn_offset: f32,
    /// Number of UFO sprites (variants are 1-based)
    pub visual_variants: u8,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            initial_columns: 3,
            max_columns: 6,
            width: 450.0,
            height: 900.0,
            ship_line: 790.0,
            spawn_offset: -20.0,
            visual_variants: 8,
        }
    }
}

impl BoardSettings {
    /// Width of one column when the board has `column_count` columns
    pub fn column_width(&self, column_count: usize) -> f32 {
        self.width / column_count.max(1) as f32
    }

    /// Screen anchor (column center, given y) for renderers
    pub fn column_anchor(&self, column: usize, column_count: usize, y: f32) -> Vec2 {
        let w = self.column_width(column_count);
        Vec2::new(w * (column as f32 + 0.5), y)
    }
}

/// Scoring, lives and progression rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub starting_lives: u8,
    pub max_lives: u8,
    /// Consecutive correct hits that earn a life
    pub streak_threshold: u32,
    /// Score that wins the game
    pub win_threshold: u32,
    /// Points per level
    pub level_up_threshold: u32,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            max_lives: 6,
            streak_threshold: 4,
            win_threshold: 100,
            level_up_threshold: 20,
        }
    }
}

/// Arithmetic problem generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemSettings {
    /// Smallest operand at level 1
    pub base_min: i64,
    /// Largest operand at level 1
    pub base_max: i64,
    /// Growth of the smallest operand per level
    pub min_step: i64,
    /// Growth of the largest operand per level
    pub max_step: i64,
    pub operations: Vec<Operation>,
    /// Subtraction may produce negative answers
    pub allow_negative: bool,
    pub numerals: NumeralSystem,
}

impl Default for ProblemSettings {
    fn default() -> Self {
        Self {
            base_min: 1,
            base_max: 5,
            min_step: 1,
            max_step: 2,
            operations: vec![
                Operation::Add,
                Operation::Subtract,
                Operation::Multiply,
                Operation::Divide,
            ],
            allow_negative: false,
            numerals: NumeralSystem::ArabicIndic,
        }
    }
}

/// Descent cadence and shot timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceSettings {
    /// Descent timer period at level 1 (ms)
    pub attack_interval_ms: u32,
    /// Period reduction per level (ms)
    pub interval_decrement_ms: u32,
    /// Period never drops below this (ms)
    pub min_attack_interval_ms: u32,
    /// Distance moved per descent tick at level 1
    pub descent_speed: f32,
    /// Extra distance per tick gained each level
    pub speed_increment: f32,
    /// Time for a shot to reach its column (headless driver)
    pub shot_travel_ms: u32,
    /// Pause between a correct hit and its scoring (headless driver)
    pub settle_delay_ms: u32,
}

impl Default for PaceSettings {
    fn default() -> Self {
        Self {
            attack_interval_ms: 2000,
            interval_decrement_ms: 200,
            min_attack_interval_ms: 500,
            descent_speed: 40.0,
            speed_increment: 5.0,
            shot_travel_ms: 200,
            settle_delay_ms: 400,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardSettings,
    pub rules: RuleSettings,
    pub problems: ProblemSettings,
    pub pace: PaceSettings,
    /// Display names for levels, index 0 is level 1
    pub level_names: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardSettings::default(),
            rules: RuleSettings::default(),
            problems: ProblemSettings::default(),
            pace: PaceSettings::default(),
            level_names: [
                "الأول", "الثاني", "الثالث", "الرابع", "الخامس", "السادس", "السابع", "الثامن",
                "التاسع", "العاشر",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Settings {
    /// Settings for a named preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        if preset == Preset::Classic {
            settings.board.initial_columns = 5;
            settings.board.max_columns = 5;
            settings.problems.operations = vec![Operation::Multiply];
            settings.pace.interval_decrement_ms = 0;
            settings.pace.speed_increment = 0.0;
        }
        settings
    }

    /// Parse settings from JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the game cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let board = &self.board;
        if board.initial_columns == 0 {
            return Err(SettingsError::NoColumns);
        }
        if board.initial_columns > board.max_columns {
            return Err(SettingsError::TooManyColumns {
                initial: board.initial_columns,
                max: board.max_columns,
            });
        }
        if board.visual_variants == 0 {
            return Err(SettingsError::Zero("visual variant count"));
        }
        if board.ship_line <= board.spawn_offset {
            return Err(SettingsError::ShipLineAboveSpawn {
                ship_line: board.ship_line,
                spawn_offset: board.spawn_offset,
            });
        }

        let rules = &self.rules;
        if rules.max_lives == 0 {
            return Err(SettingsError::Zero("maximum lives"));
        }
        if rules.starting_lives == 0 {
            return Err(SettingsError::Zero("starting lives"));
        }
        if rules.starting_lives > rules.max_lives {
            return Err(SettingsError::TooManyLives {
                starting: rules.starting_lives,
                max: rules.max_lives,
            });
        }
        if rules.streak_threshold == 0 {
            return Err(SettingsError::Zero("streak threshold"));
        }
        if rules.win_threshold == 0 {
            return Err(SettingsError::Zero("win threshold"));
        }
        if rules.level_up_threshold == 0 {
            return Err(SettingsError::Zero("level-up threshold"));
        }

        let problems = &self.problems;
        if problems.operations.is_empty() {
            return Err(SettingsError::NoOperations);
        }
        if problems.base_min > problems.base_max {
            return Err(SettingsError::EmptyOperandRange {
                min: problems.base_min,
                max: problems.base_max,
            });
        }
        // With min_step > max_step the range would close at some level
        if problems.min_step < 0 || problems.max_step < problems.min_step {
            return Err(SettingsError::BadOperandSteps);
        }
        // Steps are non-negative, so base_min is the smallest divisor ever drawn
        if problems.operations.contains(&Operation::Divide) && problems.base_min < 1 {
            return Err(SettingsError::ZeroDivisor {
                min: problems.base_min,
            });
        }
        // Bounds only grow, so the extremes sit at level 1 and the last level
        let top = max_level(self);
        let range = OperandRange::for_level(problems, top);
        let magnitude = [problems.base_min, range.max]
            .iter()
            .map(|n| n.unsigned_abs())
            .max()
            .unwrap_or(0);
        if magnitude
            .checked_mul(magnitude)
            .is_none_or(|product| product > i64::MAX as u64)
        {
            return Err(SettingsError::OperandOverflow { level: top });
        }

        let pace = &self.pace;
        if pace.attack_interval_ms == 0 {
            return Err(SettingsError::Zero("attack interval"));
        }
        if pace.min_attack_interval_ms == 0 {
            return Err(SettingsError::Zero("minimum attack interval"));
        }
        if !(pace.descent_speed.is_finite() && pace.descent_speed > 0.0)
            || !pace.speed_increment.is_finite()
            || pace.speed_increment < 0.0
        {
            return Err(SettingsError::BadDescentSpeed);
        }

        Ok(())
    }
}
