//! Galaxy Runner headless entry point
//!
//! Runs sessions under the autopilot with a fixed-step accumulator and logs
//! what an audio backend and HUD would receive.
//!
//! Usage: `galaxy-runner [config.json] [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use galaxy_runner::audio::{AudioDirector, LogSink};
    use galaxy_runner::consts::{MAX_SUBSTEPS, SIM_DT};
    use galaxy_runner::input::{self, Action, Key};
    use galaxy_runner::sim::{TickInput, autopilot};
    use galaxy_runner::{Config, GameEvent, GamePhase, Session, Steer, Viewport};

    const VIEWPORT: Viewport = Viewport::new(900.0, 400.0);
    /// Host frame interval; deliberately off the sim rate
    const FRAME_DT: f32 = 1.0 / 50.0;
    const MAX_RUNS: u32 = 3;

    /// Game instance holding all state
    struct Game {
        session: Session,
        audio: AudioDirector<LogSink>,
        input: TickInput,
        accumulator: f32,
        runs: u32,
        best: u64,
    }

    impl Game {
        fn new(config: Config, seed: u64) -> Self {
            let mut audio = AudioDirector::new(LogSink, &config);
            audio.on_boot();
            Self {
                session: Session::new(config, seed),
                audio,
                input: TickInput::default(),
                accumulator: 0.0,
                runs: 0,
                best: 0,
            }
        }

        /// Feed a key press through the same mapping a keyboard host uses
        fn press(&mut self, key: Key) {
            match input::key_down(key) {
                Some(Action::Steer(steer)) => self.input.steer = Some(steer),
                Some(Action::MenuButton) => self.input.menu_button = true,
                None => {}
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if self.session.phase() == GamePhase::Running {
                    match autopilot(&self.session, VIEWPORT) {
                        Steer::Left => self.press(Key::Left),
                        Steer::Right => self.press(Key::Right),
                        Steer::Release => self.input.steer = Some(input::key_up(Key::Left)),
                    }
                }
                let tick_input = self.input.clone();
                self.session.step(&tick_input, SIM_DT, VIEWPORT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.menu_button = false;

                for event in self.session.drain_events() {
                    self.audio.handle(&event);
                    self.on_event(event);
                }
            }
        }

        fn on_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::Started | GameEvent::Restarted => self.runs += 1,
                GameEvent::Crashed { score } => {
                    self.best = self.best.max(score);
                    log::info!("{} (run {})", self.session.score_text(), self.runs);
                }
                // press RESTART once the voice line has played
                GameEvent::DelayedCrashCue => {
                    if self.runs < MAX_RUNS {
                        self.press(Key::Confirm);
                    }
                }
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Galaxy Runner (headless) starting...");

        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => Config::load(&path).unwrap_or_else(|e| {
                log::warn!("Using default config, {}: {}", path, e);
                Config::default()
            }),
            None => Config::default(),
        };
        let seconds = args
            .next()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(60.0);
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5EED);

        let mut game = Game::new(config, seed);
        log::info!("{}", game.session.menu_title());
        game.press(Key::Confirm);

        let frames = (seconds / FRAME_DT).ceil() as u64;
        for _ in 0..frames {
            game.update(FRAME_DT);
        }

        log::info!(
            "Finished after {} runs, best score {}, current {}",
            game.runs,
            game.best.max(game.session.score()),
            game.session.score_text()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}
