//! Difficulty scheduling
//!
//! Score decides the level; the level decides board width and pace. Level
//! parameters are computed from the level alone, so a session restarted at
//! level N looks the same as one that climbed there.

use serde::{Deserialize, Serialize};

use crate::numerals::format;
use crate::settings::Settings;

/// Level reached with `score` points (1-based)
pub fn level_for_score(score: u32, level_up_threshold: u32) -> u32 {
    score / level_up_threshold.max(1) + 1
}

/// Highest level a session can reach before the winning point
pub fn max_level(settings: &Settings) -> u32 {
    let rules = &settings.rules;
    level_for_score(rules.win_threshold.saturating_sub(1), rules.level_up_threshold)
}

/// Board and pace for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    pub level: u32,
    pub column_count: usize,
    pub attack_interval_ms: u32,
    pub descent_speed: f32,
}

impl LevelParams {
    pub fn for_level(settings: &Settings, level: u32) -> Self {
        let level = level.max(1);
        let ups = level - 1;
        let board = &settings.board;
        let pace = &settings.pace;

        let column_count = board
            .initial_columns
            .saturating_add(ups as usize)
            .min(board.max_columns);
        let attack_interval_ms = pace
            .attack_interval_ms
            .saturating_sub(ups.saturating_mul(pace.interval_decrement_ms))
            .max(pace.min_attack_interval_ms);
        let descent_speed = pace.descent_speed + ups as f32 * pace.speed_increment;

        Self {
            level,
            column_count,
            attack_interval_ms,
            descent_speed,
        }
    }
}

/// Display name for a level: configured label, else the localized number
pub fn level_label(settings: &Settings, level: u32) -> String {
    let index = level.max(1) as usize - 1;
    match settings.level_names.get(index) {
        Some(name) => name.clone(),
        None => format(level as i64, settings.problems.numerals),
    }
}
