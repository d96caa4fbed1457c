//! Game session state
//!
//! `GameState` owns everything about a running game: score, lives, streak,
//! level, the problem pool and the board. Presentation calls `aim`, `fire`,
//! `resolve_impact` and `settle`; each call is one synchronous transition.
//! Results are read back through `snapshot()` and `drain_events()`.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{self, LevelParams, level_for_score, level_label};
use super::pool::{self, Board, Ufo};
use super::problem::{Problem, ProblemId};
use super::tick::DescentTimer;
use crate::numerals::format;
use crate::settings::{Settings, SettingsError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting input, UFOs descending
    Playing,
    /// Shot in flight or settling; descent and input suspended
    Firing,
    /// Run ended (won or lost) until the next `init`
    GameOver,
}

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    OutOfLives,
    /// A UFO reached the ship line
    Invaded,
}

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat(DefeatCause),
}

/// Discrete notifications for presentation (sounds, banners, shakes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Right answer hit
    Correct { id: ProblemId },
    /// Right answer hit and the streak earned a life
    LifeGained { lives: u8 },
    /// Wrong answer hit
    Wrong { id: ProblemId, lives: u8 },
    /// Transient shake of the wrongly hit UFO
    Shake { id: ProblemId },
    /// Shot arrived at an empty column
    Missed { column: usize },
    LevelUp { level: u32, column_count: usize },
    Victory { score: u32 },
    GameOver { cause: DefeatCause },
}

/// Progress of the shot in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotStage {
    /// Travelling toward its column
    InFlight,
    /// Correct hit landed, waiting for `settle`
    Settling { hit: ProblemId },
}

/// A fired shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    /// Column the shot was fired from
    pub column: usize,
    pub stage: ShotStage,
    /// Time spent in the current stage (headless driver)
    pub elapsed_ms: u32,
}

/// Result of `resolve_impact`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactOutcome {
    /// No shot in flight
    Ignored,
    /// Column was empty; no penalty
    Miss,
    Correct,
    Wrong,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub score: u32,
    pub lives: u8,
    /// Correct hits since the last miss or life award
    pub streak: u32,
    pub level: u32,
    pub column_count: usize,
    pub ship_column: usize,
    pub phase: GamePhase,
    /// Problem whose answer the player must shoot
    pub active_id: Option<ProblemId>,
    /// Outstanding problems, one per UFO
    pub problems: Vec<Problem>,
    pub board: Board,
    pub attack_interval_ms: u32,
    pub descent_speed: f32,
    pub shot: Option<Shot>,
    pub timer: DescentTimer,
    /// Total simulated time (headless driver)
    pub time_ms: u64,
    /// Time since play last resumed (headless driver)
    pub idle_ms: u32,
    outcome: Option<Outcome>,
    events: Vec<GameEvent>,
    next_id: u64,
}

impl GameState {
    /// Validate `settings` and start a level-1 session
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let params = LevelParams::for_level(&settings, 1);
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            score: 0,
            lives: settings.rules.starting_lives,
            streak: 0,
            level: 1,
            column_count: params.column_count,
            ship_column: params.column_count / 2,
            phase: GamePhase::Playing,
            active_id: None,
            problems: Vec::new(),
            board: Board::new(),
            attack_interval_ms: params.attack_interval_ms,
            descent_speed: params.descent_speed,
            shot: None,
            timer: DescentTimer::new(params.attack_interval_ms),
            time_ms: 0,
            idle_ms: 0,
            outcome: None,
            events: Vec::new(),
            next_id: 1,
            settings,
        };
        state.init(1);

        Ok(state)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Allocate a new problem ID
    pub fn next_problem_id(&mut self) -> ProblemId {
        let id = ProblemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn new_problem(&mut self, level: u32) -> Problem {
        let id = self.next_problem_id();
        Problem::generate(id, level, &self.settings.problems, &mut self.rng)
    }

    /// Start (or restart) play at `level`, clamped to the levels a session
    /// can reach. Score is kept unless `level` is 1.
    pub fn init(&mut self, level: u32) {
        let top = difficulty::max_level(&self.settings);
        if level > top {
            log::debug!("init({}) clamped to level {}", level, top);
        }
        let level = level.clamp(1, top);
        let params = LevelParams::for_level(&self.settings, level);

        self.lives = self.settings.rules.starting_lives;
        self.streak = 0;
        if level == 1 {
            self.score = 0;
        }
        self.level = level;
        self.column_count = params.column_count;
        self.attack_interval_ms = params.attack_interval_ms;
        self.descent_speed = params.descent_speed;

        let problems: Vec<Problem> = (0..self.column_count)
            .map(|_| self.new_problem(level))
            .collect();
        self.board = pool::layout_for(&problems, self.column_count, &self.settings, &mut self.rng);
        self.active_id = problems.choose(&mut self.rng).map(|p| p.id);
        self.problems = problems;

        self.ship_column = self.ship_column.min(self.column_count - 1);
        self.shot = None;
        self.outcome = None;
        self.resume();

        log::info!(
            "New game: level {}, {} columns, seed {}",
            self.level,
            self.column_count,
            self.seed
        );
    }

    /// Move the ship under `column` (clamped to the board)
    pub fn aim(&mut self, column: usize) {
        if self.phase != GamePhase::Playing {
            log::debug!("aim({}) ignored in {:?}", column, self.phase);
            return;
        }
        self.ship_column = column.min(self.column_count - 1);
    }

    /// Fire from the ship's column. Returns false if no shot was taken.
    pub fn fire(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("fire() ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Firing;
        self.shot = Some(Shot {
            column: self.ship_column,
            stage: ShotStage::InFlight,
            elapsed_ms: 0,
        });
        true
    }

    /// The shot reached its column: judge the UFO there.
    ///
    /// A correct hit removes the UFO and leaves the session in `Firing` until
    /// `settle` is called. A wrong hit or an empty column returns to
    /// `Playing` (or ends the game when the last life is lost).
    pub fn resolve_impact(&mut self) -> ImpactOutcome {
        let column = match self.shot {
            Some(Shot {
                column,
                stage: ShotStage::InFlight,
                ..
            }) if self.phase == GamePhase::Firing => column,
            _ => return ImpactOutcome::Ignored,
        };

        let Some((hit_id, value)) = self.board.get(&column).map(|u| (u.id, u.value)) else {
            log::debug!("Shot at empty column {}", column);
            self.shot = None;
            self.events.push(GameEvent::Missed { column });
            self.resume();
            return ImpactOutcome::Miss;
        };

        let answer = self.active_problem().map(|p| p.answer);
        if answer == Some(value) {
            self.streak += 1;
            if self.streak >= self.settings.rules.streak_threshold {
                self.streak = 0;
                self.lives = self
                    .lives
                    .saturating_add(1)
                    .min(self.settings.rules.max_lives);
                self.events.push(GameEvent::LifeGained { lives: self.lives });
            } else {
                self.events.push(GameEvent::Correct { id: hit_id });
            }

            self.board.remove(&column);
            self.shot = Some(Shot {
                column,
                stage: ShotStage::Settling { hit: hit_id },
                elapsed_ms: 0,
            });
            log::debug!("Correct hit {} in column {}", hit_id, column);
            ImpactOutcome::Correct
        } else {
            self.streak = 0;
            self.lives = self.lives.saturating_sub(1);
            self.shot = None;
            self.events.push(GameEvent::Wrong {
                id: hit_id,
                lives: self.lives,
            });
            log::debug!("Wrong hit {} ({} lives left)", hit_id, self.lives);

            if self.lives == 0 {
                self.end_game(Outcome::Defeat(DefeatCause::OutOfLives));
            } else {
                self.events.push(GameEvent::Shake { id: hit_id });
                self.resume();
            }
            ImpactOutcome::Wrong
        }
    }

    /// Finish a correct hit: score, level check, replacement and retarget.
    /// Returns false when no correct hit is waiting.
    pub fn settle(&mut self) -> bool {
        let (column, hit) = match self.shot {
            Some(Shot {
                column,
                stage: ShotStage::Settling { hit },
                ..
            }) => (column, hit),
            _ => return false,
        };
        self.shot = None;

        self.score += 1;
        if self.score >= self.settings.rules.win_threshold {
            self.end_game(Outcome::Victory);
            return true;
        }

        let level = level_for_score(self.score, self.settings.rules.level_up_threshold);
        if level > self.level {
            self.level_up(level);
        }

        let replacement = self.new_problem(self.level);
        match self.problems.iter_mut().find(|p| p.id == hit) {
            Some(slot) => *slot = replacement.clone(),
            None => self.problems.push(replacement.clone()),
        }

        let spawn_offset = self.settings.board.spawn_offset;
        let on_screen: Vec<ProblemId> = pool::visible(&self.board, spawn_offset)
            .map(|u| u.id)
            .collect();
        self.active_id = Some(
            on_screen
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(replacement.id),
        );

        let ufo = pool::respawn(column, &replacement, &self.settings, &mut self.rng);
        self.board.insert(column, ufo);
        self.resume();
        true
    }

    fn level_up(&mut self, level: u32) {
        let pace = &self.settings.pace;
        self.level = level;
        self.attack_interval_ms = self
            .attack_interval_ms
            .saturating_sub(pace.interval_decrement_ms)
            .max(pace.min_attack_interval_ms);
        self.descent_speed += pace.speed_increment;

        let columns = (self.column_count + 1).min(self.settings.board.max_columns);
        if columns > self.column_count {
            let column = self.column_count;
            self.column_count = columns;
            let problem = self.new_problem(level);
            let ufo = pool::respawn(column, &problem, &self.settings, &mut self.rng);
            self.problems.push(problem);
            self.board.insert(column, ufo);
        }

        self.timer.restart(self.attack_interval_ms);
        self.events.push(GameEvent::LevelUp {
            level,
            column_count: self.column_count,
        });
        log::info!(
            "Level up: {} ({} columns, {} ms, speed {})",
            level,
            self.column_count,
            self.attack_interval_ms,
            self.descent_speed
        );
    }

    /// Back to `Playing` with a fresh descent timer
    fn resume(&mut self) {
        self.phase = GamePhase::Playing;
        self.idle_ms = 0;
        self.timer.restart(self.attack_interval_ms);
    }

    pub(crate) fn end_game(&mut self, outcome: Outcome) {
        self.phase = GamePhase::GameOver;
        self.shot = None;
        self.outcome = Some(outcome);
        match outcome {
            Outcome::Victory => self.events.push(GameEvent::Victory { score: self.score }),
            Outcome::Defeat(cause) => self.events.push(GameEvent::GameOver { cause }),
        }
        log::info!("Game over: {:?} at score {}", outcome, self.score);
    }

    /// The problem the player must answer
    pub fn active_problem(&self) -> Option<&Problem> {
        let id = self.active_id?;
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let numerals = self.settings.problems.numerals;
        let ufos = self
            .board
            .values()
            .map(|ufo| UfoView {
                label: format(ufo.value, numerals),
                anchor: self
                    .settings
                    .board
                    .column_anchor(ufo.column, self.column_count, ufo.y),
                ufo: ufo.clone(),
            })
            .collect();

        Snapshot {
            score: self.score,
            lives: self.lives,
            max_lives: self.settings.rules.max_lives,
            streak: self.streak,
            streak_threshold: self.settings.rules.streak_threshold,
            level: self.level,
            level_label: level_label(&self.settings, self.level),
            column_count: self.column_count,
            ship_column: self.ship_column,
            phase: self.phase,
            active_question: self.active_problem().map(|p| p.question.clone()),
            problems: self.problems.clone(),
            ufos,
            attack_interval_ms: self.attack_interval_ms,
            descent_speed: self.descent_speed,
            outcome: self.outcome,
        }
    }
}

/// A UFO as presented
#[derive(Debug, Clone, Serialize)]
pub struct UfoView {
    #[serde(flatten)]
    pub ufo: Ufo,
    /// Localized value
    pub label: String,
    /// Column center at the UFO's y
    pub anchor: Vec2,
}

/// Read-only view for renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub score: u32,
    pub lives: u8,
    pub max_lives: u8,
    pub streak: u32,
    pub streak_threshold: u32,
    pub level: u32,
    pub level_label: String,
    pub column_count: usize,
    pub ship_column: usize,
    pub phase: GamePhase,
    pub active_question: Option<String>,
    pub problems: Vec<Problem>,
    pub ufos: Vec<UfoView>,
    pub attack_interval_ms: u32,
    pub descent_speed: f32,
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerals::NumeralSystem;
    use crate::sim::{OperandRange, Operation};

    fn settings() -> Settings {
        let mut s = Settings::default();
        s.problems.numerals = NumeralSystem::Western;
        s
    }

    fn session() -> GameState {
        GameState::new(settings(), 12345).unwrap()
    }

    fn target_column(state: &GameState) -> usize {
        let id = state.active_id.unwrap();
        state.board.values().find(|u| u.id == id).unwrap().column
    }

    /// A column whose UFO is guaranteed to carry a wrong answer
    fn wrong_column(state: &mut GameState) -> usize {
        let answer = state.active_problem().unwrap().answer;
        let target = target_column(state);
        let ufo = state.board.values_mut().find(|u| u.column != target).unwrap();
        ufo.value = answer + 1000;
        ufo.column
    }

    fn hit_correct(state: &mut GameState) {
        let column = target_column(state);
        state.aim(column);
        assert!(state.fire());
        assert_eq!(state.resolve_impact(), ImpactOutcome::Correct);
        assert!(state.settle());
    }

    fn hit_wrong(state: &mut GameState) {
        let column = wrong_column(state);
        state.aim(column);
        assert!(state.fire());
        assert_eq!(state.resolve_impact(), ImpactOutcome::Wrong);
    }

    /// Every active target must be shootable
    fn assert_target_on_board(state: &GameState) {
        let answer = state.active_problem().unwrap().answer;
        assert!(state.board.values().any(|u| u.value == answer));
    }

    #[test]
    fn test_new_session() {
        let state = session();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.column_count, 3);
        assert_eq!(state.problems.len(), 3);
        assert_eq!(state.board.len(), 3);
        assert_target_on_board(&state);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut s = settings();
        s.problems.operations.clear();
        assert!(GameState::new(s, 1).is_err());
    }

    #[test]
    fn test_aim_clamps_and_is_ignored_while_firing() {
        let mut state = session();
        state.aim(99);
        assert_eq!(state.ship_column, 2);
        state.aim(0);
        assert!(state.fire());
        state.aim(1);
        assert_eq!(state.ship_column, 0);
    }

    #[test]
    fn test_fire_only_once() {
        let mut state = session();
        assert!(state.fire());
        assert_eq!(state.phase, GamePhase::Firing);
        assert!(!state.fire());
    }

    #[test]
    fn test_impact_without_shot_is_ignored() {
        let mut state = session();
        assert_eq!(state.resolve_impact(), ImpactOutcome::Ignored);
        assert!(!state.settle());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_empty_column_is_a_free_miss() {
        let mut state = session();
        state.aim(1);
        state.fire();
        state.board.remove(&1);
        assert_eq!(state.resolve_impact(), ImpactOutcome::Miss);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.drain_events(), vec![GameEvent::Missed { column: 1 }]);
    }

    #[test]
    fn test_correct_hit_replaces_ufo() {
        let mut state = session();
        let column = target_column(&state);
        let old_id = state.active_id.unwrap();

        state.aim(column);
        state.fire();
        assert_eq!(state.resolve_impact(), ImpactOutcome::Correct);
        // Settling: UFO gone, still suspended, score not yet counted
        assert_eq!(state.phase, GamePhase::Firing);
        assert!(!state.board.contains_key(&column));
        assert_eq!(state.score, 0);

        assert!(state.settle());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 1);
        assert_eq!(state.streak, 1);
        let ufo = &state.board[&column];
        assert_ne!(ufo.id, old_id);
        assert!(state.board.values().all(|u| u.id != old_id));
        assert!(state.problems.iter().all(|p| p.id != old_id));
        assert_eq!(state.problems.len(), state.board.len());
        assert_target_on_board(&state);
        assert_eq!(state.drain_events(), vec![GameEvent::Correct { id: old_id }]);
    }

    #[test]
    fn test_retarget_prefers_visible_ufos() {
        let mut state = session();
        let column = target_column(&state);
        let other = (column + 1) % state.column_count;
        let visible_id = state.board[&other].id;
        state.board.get_mut(&other).unwrap().y = 200.0;

        hit_correct(&mut state);
        assert_eq!(state.active_id, Some(visible_id));
    }

    #[test]
    fn test_retarget_falls_back_to_replacement() {
        let mut state = session();
        let column = target_column(&state);
        hit_correct(&mut state);
        // Nothing has descended yet, so only the replacement qualifies
        assert_eq!(state.active_id, Some(state.board[&column].id));
    }

    #[test]
    fn test_wrong_hit_costs_a_life() {
        let mut state = session();
        state.streak = 2;
        hit_wrong(&mut state);
        assert_eq!(state.lives, 2);
        assert_eq!(state.streak, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::Wrong { lives: 2, .. }));
        assert!(matches!(events[1], GameEvent::Shake { .. }));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = session();
        state.lives = 1;
        hit_wrong(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.outcome(),
            Some(Outcome::Defeat(DefeatCause::OutOfLives))
        );
        let events = state.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                cause: DefeatCause::OutOfLives
            })
        );
        assert!(!state.fire());
    }

    #[test]
    fn test_streak_grants_life() {
        let mut s = settings();
        s.rules.streak_threshold = 10;
        let mut state = GameState::new(s, 5).unwrap();
        state.streak = 9;
        hit_correct(&mut state);
        assert_eq!(state.streak, 0);
        assert_eq!(state.lives, 4);
        assert_eq!(state.drain_events(), vec![GameEvent::LifeGained { lives: 4 }]);
    }

    #[test]
    fn test_life_award_is_capped() {
        let mut s = settings();
        s.rules.streak_threshold = 10;
        let mut state = GameState::new(s, 5).unwrap();
        state.lives = 6;
        state.streak = 9;
        hit_correct(&mut state);
        assert_eq!(state.streak, 0);
        assert_eq!(state.lives, 6);
    }

    #[test]
    fn test_victory_stops_scoring() {
        let mut state = session();
        state.score = 99;
        hit_correct(&mut state);
        assert_eq!(state.score, 100);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.outcome(), Some(Outcome::Victory));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Victory { score: 100 })
        );
        assert!(!state.fire());
        assert!(!state.settle());
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_level_up_adds_column() {
        let mut s = settings();
        s.rules.level_up_threshold = 15;
        let mut state = GameState::new(s, 9).unwrap();
        state.score = 14;
        let interval = state.attack_interval_ms;
        let speed = state.descent_speed;

        hit_correct(&mut state);
        assert_eq!(state.score, 15);
        assert_eq!(state.level, 2);
        assert_eq!(state.column_count, 4);
        assert_eq!(state.board.len(), 4);
        assert_eq!(state.problems.len(), 4);
        assert!(state.board.contains_key(&3));
        assert_eq!(state.attack_interval_ms, interval - 200);
        assert!(state.descent_speed > speed);
        assert!(state.drain_events().contains(&GameEvent::LevelUp {
            level: 2,
            column_count: 4
        }));
        assert_target_on_board(&state);
    }

    #[test]
    fn test_level_up_at_max_columns_keeps_board() {
        let mut s = settings();
        s.board.initial_columns = 6;
        s.rules.level_up_threshold = 1;
        let mut state = GameState::new(s, 9).unwrap();
        hit_correct(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.column_count, 6);
        assert_eq!(state.board.len(), 6);
    }

    #[test]
    fn test_interval_floor() {
        let mut s = settings();
        s.rules.level_up_threshold = 1;
        s.pace.interval_decrement_ms = 1000;
        let mut state = GameState::new(s, 9).unwrap();
        for _ in 0..3 {
            hit_correct(&mut state);
        }
        assert_eq!(state.attack_interval_ms, 500);
        assert_eq!(state.timer.interval_ms, 500);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = session();
        state.score = 40;
        state.lives = 1;
        hit_wrong(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        let seen: Vec<ProblemId> = state.problems.iter().map(|p| p.id).collect();

        state.init(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.outcome(), None);
        assert!(state.problems.iter().all(|p| !seen.contains(&p.id)));
        assert_target_on_board(&state);
    }

    #[test]
    fn test_init_at_higher_level_keeps_score() {
        let mut state = session();
        state.score = 45;
        state.init(3);
        assert_eq!(state.score, 45);
        assert_eq!(state.level, 3);
        assert_eq!(state.column_count, 5);
        assert_eq!(state.board.len(), 5);
        assert_eq!(state.attack_interval_ms, 1600);
    }

    #[test]
    fn test_init_clamps_to_last_reachable_level() {
        let mut s = settings();
        s.problems.operations = vec![Operation::Multiply];
        let mut state = GameState::new(s, 12345).unwrap();
        state.init(u32::MAX);
        assert_eq!(state.level, 5);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.column_count, 6);
        let range = OperandRange::for_level(&state.settings().problems, 5);
        for p in &state.problems {
            assert!(range.contains(p.operands.0));
            assert_eq!(p.answer, p.operands.0 * p.operands.1);
        }

        state.init(0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = session();
        let mut b = session();
        for _ in 0..5 {
            hit_correct(&mut a);
            hit_correct(&mut b);
        }
        assert_eq!(a.problems, b.problems);
        assert_eq!(a.board, b.board);
        assert_eq!(a.active_id, b.active_id);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = session();
        let snap = state.snapshot();
        assert_eq!(snap.ufos.len(), 3);
        assert_eq!(snap.level_label, "الأول");
        assert_eq!(
            snap.active_question.as_deref(),
            state.active_problem().map(|p| p.question.as_str())
        );
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
