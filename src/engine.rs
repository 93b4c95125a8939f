//! Simulation engine session
//!
//! Owns the [`World`], the input buffer and the seeded RNG. Hosts feed it
//! events as they arrive and call [`Engine::tick`] (or [`Engine::frame`]) once
//! per display refresh. Renderers only ever see a [`Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::input::{InputEvent, InputState};
use crate::settings::Settings;
use crate::sim::{Block, GameEvent, GamePhase, Rect, World, tick};

/// Read-only view of the world for drawing
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub bounds: Vec2,
    pub paddle: Rect,
    pub ball_center: Vec2,
    pub ball_radius: f32,
    pub blocks: &'a [Block],
    pub score: u64,
    pub phase: GamePhase,
    /// Present only once the game has ended
    pub restart_button: Option<Rect>,
}

impl Snapshot<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Anything that can draw a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// One player's game, across restarts
#[derive(Debug, Clone)]
pub struct Engine {
    world: World,
    input: InputState,
    rng: Pcg32,
    seed: u64,
    /// Worlds created so far, including the current one
    sessions: u32,
}

impl Engine {
    /// Start a new game; the seed fixes every block color for every session
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(settings, &mut rng);
        log::info!(
            "New game: seed {seed}, {}x{} world, {} blocks",
            world.width(),
            world.height(),
            world.blocks.len()
        );
        Self {
            world,
            input: InputState::new(),
            rng,
            seed,
            sessions: 1,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.world.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Buffer an input event for the next tick
    pub fn handle_event(&mut self, event: InputEvent) {
        let restart_button = self.world.restart_button();
        self.input.apply(event, restart_button);
    }

    /// Advance one tick
    ///
    /// A pending restart is applied first, so the tick runs on the new world.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.input.take_restart() {
            self.reset();
        }
        let input = self
            .input
            .take_tick_input(&self.world.paddle, self.world.width());
        tick(&mut self.world, &input)
    }

    /// Tick, then hand the result to a renderer
    pub fn frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Vec<GameEvent> {
        let events = self.tick();
        renderer.render(&self.snapshot());
        events
    }

    /// Discard the current world and build a fresh one
    pub fn reset(&mut self) {
        let settings = self.world.settings.clone();
        log::info!(
            "Restarting after {:?} with score {}",
            self.world.phase,
            self.world.score
        );
        self.world = World::new(settings, &mut self.rng);
        self.input.clear_pending();
        self.sessions += 1;
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let world = &self.world;
        Snapshot {
            bounds: world.bounds,
            paddle: world.paddle.rect(),
            ball_center: world.ball.pos,
            ball_radius: world.ball.radius,
            blocks: &world.blocks,
            score: world.score,
            phase: world.phase,
            restart_button: world.restart_button(),
        }
    }
}
