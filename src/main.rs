//! Math Invaders entry point
//!
//! Runs a headless autopilot session and prints the final snapshot as JSON.
//!
//! Usage: `math-invaders [classic|arcade|<settings.json>] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use math_invaders::consts::*;
    use math_invaders::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use math_invaders::{Preset, Settings, SettingsError};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        accumulator: u32,
        input: TickInput,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
            Ok(Self {
                state: GameState::new(settings, seed)?,
                accumulator: 0,
                input: TickInput {
                    autopilot: true,
                    ..Default::default()
                },
            })
        }

        /// Run simulation steps for `dt_ms` of wall time
        fn update(&mut self, dt_ms: u32) {
            self.accumulator += dt_ms.min(100);

            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, FRAME_MS);
                self.accumulator -= FRAME_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire = false;
                self.input.restart = false;
                self.input.aim = None;
            }

            for event in self.state.drain_events() {
                report(&event);
            }
        }
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::LevelUp {
                level,
                column_count,
            } => log::info!("LEVEL UP! {} ({} columns)", level, column_count),
            GameEvent::LifeGained { lives } => log::info!("Extra life ({} lives)", lives),
            GameEvent::Victory { score } => log::info!("Victory with {} correct answers", score),
            GameEvent::GameOver { cause } => log::info!("Game over: {:?}", cause),
            other => log::debug!("{:?}", other),
        }
    }

    fn load_settings(arg: Option<&str>) -> Result<Settings, SettingsError> {
        match arg {
            None => Ok(Settings::default()),
            Some(name) => match Preset::from_str(name) {
                Some(preset) => {
                    log::info!("Using {} preset", preset.as_str());
                    Ok(Settings::from_preset(preset))
                }
                None => Settings::load(name),
            },
        }
    }

    fn default_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let settings = load_settings(args.first().map(String::as_str))?;
        let seed = match args.get(1) {
            Some(s) => s.parse()?,
            None => default_seed(),
        };

        log::info!("Math Invaders (headless) starting with seed {}", seed);
        let mut game = Game::new(settings, seed)?;

        // Feed the loop 60 Hz frames of wall time
        while game.state.phase != GamePhase::GameOver && game.state.time_ms < MAX_DEMO_MS {
            game.update(17);
        }

        let snapshot = game.state.snapshot();
        log::info!(
            "Final score {} at level {} ({:?})",
            snapshot.score,
            snapshot.level_label,
            snapshot.outcome
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Presentation layers embed the library directly
}
