//! Neon Breakout headless host
//!
//! Drives the engine with an autopilot that drags the paddle under the ball,
//! logs what happens and prints the final snapshot as JSON.
//!
//! Usage: `neon-breakout [--settings FILE] [--seed N] [--ticks N]`

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use neon_breakout::engine::{Engine, Renderer, Snapshot};
    use neon_breakout::input::InputEvent;
    use neon_breakout::sim::{GameEvent, GamePhase, World};
    use neon_breakout::Settings;

    const DEFAULT_SEED: u64 = 0x5eed;
    const DEFAULT_MAX_TICKS: u64 = 50_000;

    struct Options {
        settings: Settings,
        seed: u64,
        max_ticks: u64,
    }

    fn parse_args() -> Options {
        let mut options = Options {
            settings: Settings::default(),
            seed: DEFAULT_SEED,
            max_ticks: DEFAULT_MAX_TICKS,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let flag = arg.as_str();
            if !matches!(flag, "--settings" | "--seed" | "--ticks") {
                log::warn!("Ignoring argument {flag:?}");
                continue;
            }
            let Some(value) = args.next() else {
                log::warn!("Missing value for {flag}");
                break;
            };
            match flag {
                "--settings" => options.settings = Settings::load(&value),
                "--seed" => match value.parse() {
                    Ok(seed) => options.seed = seed,
                    Err(e) => log::warn!("Bad --seed {value:?}: {e}"),
                },
                _ => match value.parse() {
                    Ok(ticks) => options.max_ticks = ticks,
                    Err(e) => log::warn!("Bad --ticks {value:?}: {e}"),
                },
            }
        }
        options
    }

    /// Logs score changes instead of drawing
    #[derive(Default)]
    struct LogRenderer {
        last_score: u64,
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, snapshot: &Snapshot<'_>) {
            self.frames += 1;
            if snapshot.score != self.last_score {
                log::info!(
                    "Score {} ({} blocks left)",
                    snapshot.score,
                    snapshot.blocks.len()
                );
                self.last_score = snapshot.score;
            }
            if self.frames % 600 == 0 {
                log::debug!(
                    "Frame {}: ball at {:?}, paddle at {}",
                    self.frames,
                    snapshot.ball_center,
                    snapshot.paddle.pos.x
                );
            }
        }
    }

    /// Drag the paddle toward the ball with a slow wobble so bounces vary
    fn autopilot(world: &World) -> InputEvent {
        let wobble = (world.time_ticks as f32 * 0.01).sin() * 0.6 * world.paddle.width / 2.0;
        let target = world.ball.pos.x + wobble;
        InputEvent::PointerDrag(target - world.paddle.center_x())
    }

    pub fn run() {
        env_logger::init();
        let options = parse_args();
        log::info!("Neon Breakout (headless) starting...");

        let mut engine = Engine::new(options.settings, options.seed);
        let mut renderer = LogRenderer::default();

        for _ in 0..options.max_ticks {
            let event = autopilot(engine.world());
            engine.handle_event(event);
            for event in engine.frame(&mut renderer) {
                match event {
                    GameEvent::BallLost => log::info!("Game over"),
                    GameEvent::Cleared => log::info!("Game clear!"),
                    _ => {}
                }
            }
            if engine.phase() != GamePhase::Playing {
                break;
            }
        }

        if engine.phase() == GamePhase::Playing {
            log::info!("Stopped after {} ticks", engine.world().time_ticks);
        }
        log::info!(
            "Finished {:?} with score {} (replay with --seed {})",
            engine.phase(),
            engine.world().score,
            engine.seed()
        );

        match engine.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize snapshot: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts embed the library directly
}
