//! UFO placement
//!
//! Builds boards and replacement UFOs for the session. Holds no state between
//! calls: everything it creates is handed back to `GameState`.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::problem::{Problem, ProblemId};
use crate::settings::Settings;

/// A descending UFO carrying one problem's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ufo {
    /// Same id as the problem it answers
    pub id: ProblemId,
    pub column: usize,
    pub value: i64,
    /// Vertical position, grows downward
    pub y: f32,
    /// Sprite index (1-based)
    pub variant: u8,
}

impl Ufo {
    /// On-screen once strictly past the spawn offset
    pub fn is_visible(&self, spawn_offset: f32) -> bool {
        self.y > spawn_offset
    }
}

/// Column → UFO. One UFO per column by construction.
pub type Board = BTreeMap<usize, Ufo>;

fn random_variant<R: Rng + ?Sized>(rng: &mut R, count: u8) -> u8 {
    rng.random_range(1..=count.max(1))
}

/// Place the first problems on columns `0..k`, where `k` is bounded by the
/// problem count, `column_count` and the board maximum
pub fn layout_for<R: Rng + ?Sized>(
    problems: &[Problem],
    column_count: usize,
    settings: &Settings,
    rng: &mut R,
) -> Board {
    let k = problems
        .len()
        .min(column_count)
        .min(settings.board.max_columns);

    problems
        .iter()
        .take(k)
        .enumerate()
        .map(|(column, problem)| (column, respawn(column, problem, settings, rng)))
        .collect()
}

/// A fresh UFO for `problem` at the spawn offset of `column`
pub fn respawn<R: Rng + ?Sized>(
    column: usize,
    problem: &Problem,
    settings: &Settings,
    rng: &mut R,
) -> Ufo {
    Ufo {
        id: problem.id,
        column,
        value: problem.answer,
        y: settings.board.spawn_offset,
        variant: random_variant(rng, settings.board.visual_variants),
    }
}

/// UFOs currently on-screen, in column order
pub fn visible(board: &Board, spawn_offset: f32) -> impl Iterator<Item = &Ufo> {
    board.values().filter(move |u| u.is_visible(spawn_offset))
}
