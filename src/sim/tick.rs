//! Descent timer and headless frame driver
//!
//! `descend` is one firing of the attack timer. `tick` drives a whole session
//! from frame deltas: it applies input, times the shot (travel, then settle)
//! and feeds the descent timer while play is running.

use serde::{Deserialize, Serialize};

use super::state::{DefeatCause, GamePhase, GameState, ImpactOutcome, Outcome, ShotStage};

/// Autopilot "thinking" time before each shot
pub const AUTOPILOT_REACTION_MS: u32 = 2500;

/// Repeating timer that paces UFO descent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescentTimer {
    pub interval_ms: u32,
    pub elapsed_ms: u32,
}

impl DescentTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Tear down and start over with a (possibly new) period
    pub fn restart(&mut self, interval_ms: u32) {
        *self = Self::new(interval_ms);
    }

    /// Advance by `dt_ms`; returns how many periods elapsed
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        let fired = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        fired
    }
}

/// One descent step: every UFO moves down; reaching the ship line loses
pub fn descend(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let speed = state.descent_speed;
    for ufo in state.board.values_mut() {
        ufo.y += speed;
    }

    let ship_line = state.settings().board.ship_line;
    let invader = state
        .board
        .values()
        .find(|u| u.y >= ship_line)
        .map(|u| (u.id, u.column));
    if let Some((id, column)) = invader {
        log::info!("UFO {} reached the ship in column {}", id, column);
        state.end_game(Outcome::Defeat(DefeatCause::Invaded));
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Column to move the ship to
    pub aim: Option<usize>,
    /// Fire from the ship's column
    pub fire: bool,
    /// Start a new level-1 game
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the session by `dt_ms` of wall time
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    if input.restart {
        state.init(1);
    }

    state.time_ms += dt_ms as u64;

    let mut input = input.clone();
    if input.autopilot && state.phase == GamePhase::Playing {
        // Give the board time to move before each shot
        if state.idle_ms.saturating_add(dt_ms) >= AUTOPILOT_REACTION_MS {
            if let Some(column) = autopilot_column(state) {
                input.aim = Some(column);
                input.fire = true;
            }
        }
    }

    if let Some(column) = input.aim {
        state.aim(column);
    }
    if input.fire {
        state.fire();
    }

    match state.phase {
        GamePhase::Playing => {
            state.idle_ms = state.idle_ms.saturating_add(dt_ms);
            let fired = state.timer.advance(dt_ms);
            for _ in 0..fired {
                descend(state);
                if state.phase != GamePhase::Playing {
                    break;
                }
            }
        }
        GamePhase::Firing => advance_shot(state, dt_ms),
        GamePhase::GameOver => {}
    }
}

/// Column of the UFO carrying the active answer
pub fn autopilot_column(state: &GameState) -> Option<usize> {
    let active = state.active_problem()?;
    state
        .board
        .values()
        .find(|u| u.id == active.id)
        .or_else(|| state.board.values().find(|u| u.value == active.answer))
        .map(|u| u.column)
}

fn advance_shot(state: &mut GameState, dt_ms: u32) {
    let pace = &state.settings().pace;
    let (travel_ms, settle_ms) = (pace.shot_travel_ms, pace.settle_delay_ms);

    let Some(shot) = state.shot.as_mut() else {
        return;
    };
    shot.elapsed_ms = shot.elapsed_ms.saturating_add(dt_ms);
    let (stage, elapsed) = (shot.stage, shot.elapsed_ms);

    match stage {
        ShotStage::InFlight if elapsed >= travel_ms => {
            if state.resolve_impact() == ImpactOutcome::Correct {
                // Carry leftover frame time into the settle delay
                let carry = elapsed - travel_ms;
                if let Some(shot) = state.shot.as_mut() {
                    shot.elapsed_ms = carry;
                }
                if carry >= settle_ms {
                    state.settle();
                }
            }
        }
        ShotStage::Settling { .. } if elapsed >= settle_ms => {
            state.settle();
        }
        _ => {}
    }
}
