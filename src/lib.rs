//! Neon Breakout - a single-screen paddle and blocks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game phase)
//! - `engine`: Session driver owning the world, input buffer and RNG
//! - `input`: Abstract input events and held-key state
//! - `settings`: Data-driven tuning and layout

pub mod engine;
pub mod input;
pub mod settings;
pub mod sim;

pub use engine::{Engine, Renderer, Snapshot};
pub use input::{InputEvent, InputState, Key};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Arena dimensions
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 320.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the floor to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Pixels per tick while a direction key is held
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball defaults (15px diameter)
    pub const BALL_RADIUS: f32 = 7.5;
    pub const BALL_START_VX: f32 = 2.0;
    pub const BALL_START_VY: f32 = -2.0;

    /// Block grid layout
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_GAP: f32 = 5.0;
    pub const BLOCK_ROWS: u32 = 4;
    pub const BLOCK_COLS: u32 = 6;
    pub const BLOCK_TOP_OFFSET: f32 = 50.0;

    /// Band around a block's top/bottom edge that counts as a vertical hit
    pub const BLOCK_EDGE_TOLERANCE: f32 = 5.0;
    /// Maximum paddle deflection from vertical (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Restart button, centered horizontally, top edge below vertical center
    pub const RESTART_BUTTON_WIDTH: f32 = 120.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 40.0;
    pub const RESTART_BUTTON_OFFSET_Y: f32 = 40.0;
}

/// Unit direction `angle` radians away from straight up (screen space, y down)
///
/// Positive angles lean right, negative lean left.
#[inline]
pub fn direction_from_vertical(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Signed angle between a velocity and straight up (inverse of [`direction_from_vertical`])
#[inline]
pub fn angle_from_vertical(vel: Vec2) -> f32 {
    vel.x.atan2(-vel.y)
}
