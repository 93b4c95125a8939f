//! Game state and core simulation types
//!
//! A [`World`] is one game session. Restarting builds a new one.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grid::build_block_grid;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Ball fell through the floor
    Lost,
    /// Every block destroyed
    Won,
}

impl GamePhase {
    /// Lost and Won freeze the world until a reset
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Neon block palette (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeonColor {
    Magenta,
    Cyan,
    Pink,
    Lime,
    Orange,
    Yellow,
    Purple,
}

impl NeonColor {
    pub const PALETTE: [NeonColor; 7] = [
        NeonColor::Magenta,
        NeonColor::Cyan,
        NeonColor::Pink,
        NeonColor::Lime,
        NeonColor::Orange,
        NeonColor::Yellow,
        NeonColor::Purple,
    ];

    /// CSS hex string for renderers
    pub fn hex(self) -> &'static str {
        match self {
            NeonColor::Magenta => "#FF00FF",
            NeonColor::Cyan => "#00FFFF",
            NeonColor::Pink => "#FF0099",
            NeonColor::Lime => "#00FF00",
            NeonColor::Orange => "#FFA500",
            NeonColor::Yellow => "#FFFF00",
            NeonColor::Purple => "#9D00FF",
        }
    }

    /// Uniform pick from the palette
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::PALETTE[rng.random_range(0..Self::PALETTE.len())]
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Bounding square used for block tests
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the session)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Largest legal `x` inside a world of `world_width`
    pub fn max_x(&self, world_width: f32) -> f32 {
        (world_width - self.width).max(0.0)
    }

    /// Keep the paddle fully inside the world
    pub fn clamp_to(&mut self, world_width: f32) {
        self.x = self.x.clamp(0.0, self.max_x(world_width));
    }
}

/// A destructible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Grid index, stable for the session
    pub id: u32,
    pub rect: Rect,
    pub color: NeonColor,
}

/// Something noteworthy that happened during a tick (for audio/effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BlockDestroyed { id: u32, color: NeonColor },
    WallBounce,
    CeilingBounce,
    /// Normalized hit offset in `[-1, 1]`
    PaddleHit { offset: f32 },
    BallLost,
    Cleared,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Tuning the session was created with
    pub settings: Settings,
    /// Arena size, fixed for the session
    pub bounds: Vec2,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active blocks in insertion (row-major) order
    pub blocks: Vec<Block>,
    pub score: u64,
    pub phase: GamePhase,
    /// Ticks simulated while Playing
    pub time_ticks: u64,
}

impl World {
    /// Fresh session with a full block grid
    pub fn new(settings: Settings, rng: &mut impl Rng) -> Self {
        let blocks = build_block_grid(&settings, rng);
        Self::with_blocks(settings, blocks)
    }

    /// Fresh session with a caller-supplied block set
    pub fn with_blocks(settings: Settings, blocks: Vec<Block>) -> Self {
        let bounds = Vec2::new(settings.world_width, settings.world_height);
        let paddle = Paddle {
            x: (settings.world_width - settings.paddle_width) / 2.0,
            y: settings.paddle_y(),
            width: settings.paddle_width,
            height: settings.paddle_height,
        };
        let ball = Ball::new(bounds / 2.0, settings.ball_start_velocity, settings.ball_radius);
        Self {
            settings,
            bounds,
            paddle,
            ball,
            blocks,
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.bounds.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.y
    }

    /// Restart control, only live once the game has ended
    pub fn restart_button(&self) -> Option<Rect> {
        self.phase
            .is_terminal()
            .then(|| self.settings.restart_button())
    }
}
