//! Game tuning and layout
//!
//! Every constant the simulation reads lives here so hosts can load a JSON
//! file instead of recompiling. Missing fields fall back to [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// Largest accepted grid dimension; anything bigger reverts to the default
pub const MAX_GRID_DIMENSION: u32 = 64;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub world_width: f32,
    pub world_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the floor to the paddle's top edge
    pub paddle_bottom_offset: f32,
    /// Pixels per tick for held direction keys
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity at spawn, pixels per tick
    pub ball_start_velocity: Vec2,

    // === Block grid ===
    pub block_rows: u32,
    pub block_cols: u32,
    pub block_width: f32,
    pub block_height: f32,
    pub block_gap: f32,
    pub block_top_offset: f32,

    // === Collision ===
    /// Edge band (px) deciding vertical vs horizontal block bounces
    pub block_edge_tolerance: f32,
    /// Paddle deflection at the very edge, radians from vertical
    pub max_bounce_angle: f32,

    // === Restart control ===
    pub restart_button_width: f32,
    pub restart_button_height: f32,
    /// Offset of the button's top edge below the vertical center
    pub restart_button_offset_y: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_start_velocity: Vec2::new(BALL_START_VX, BALL_START_VY),

            block_rows: BLOCK_ROWS,
            block_cols: BLOCK_COLS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_gap: BLOCK_GAP,
            block_top_offset: BLOCK_TOP_OFFSET,

            block_edge_tolerance: BLOCK_EDGE_TOLERANCE,
            max_bounce_angle: MAX_BOUNCE_ANGLE,

            restart_button_width: RESTART_BUTTON_WIDTH,
            restart_button_height: RESTART_BUTTON_HEIGHT,
            restart_button_offset_y: RESTART_BUTTON_OFFSET_Y,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values the simulation cannot work with
    ///
    /// Non-finite or non-positive sizes revert to their defaults and the paddle
    /// is narrowed to fit the world.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn fix(name: &str, value: &mut f32, default: f32) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Setting {name}={value} is invalid, using {default}");
                *value = default;
            }
        }

        fix("world_width", &mut self.world_width, defaults.world_width);
        fix("world_height", &mut self.world_height, defaults.world_height);
        fix("paddle_width", &mut self.paddle_width, defaults.paddle_width);
        fix("paddle_height", &mut self.paddle_height, defaults.paddle_height);
        fix("paddle_speed", &mut self.paddle_speed, defaults.paddle_speed);
        fix("ball_radius", &mut self.ball_radius, defaults.ball_radius);
        fix("block_width", &mut self.block_width, defaults.block_width);
        fix("block_height", &mut self.block_height, defaults.block_height);
        fix(
            "max_bounce_angle",
            &mut self.max_bounce_angle,
            defaults.max_bounce_angle,
        );
        fix(
            "paddle_bottom_offset",
            &mut self.paddle_bottom_offset,
            defaults.paddle_bottom_offset,
        );
        fix(
            "restart_button_width",
            &mut self.restart_button_width,
            defaults.restart_button_width,
        );
        fix(
            "restart_button_height",
            &mut self.restart_button_height,
            defaults.restart_button_height,
        );
        fix(
            "restart_button_offset_y",
            &mut self.restart_button_offset_y,
            defaults.restart_button_offset_y,
        );

        if self.paddle_bottom_offset > self.world_height {
            log::warn!(
                "Paddle offset {} is above the world, using {}",
                self.paddle_bottom_offset,
                defaults.paddle_bottom_offset.min(self.world_height)
            );
            self.paddle_bottom_offset = defaults.paddle_bottom_offset.min(self.world_height);
        }
        if self.block_rows > MAX_GRID_DIMENSION {
            log::warn!(
                "Setting block_rows={} exceeds {MAX_GRID_DIMENSION}, using {}",
                self.block_rows,
                defaults.block_rows
            );
            self.block_rows = defaults.block_rows;
        }
        if self.block_cols > MAX_GRID_DIMENSION {
            log::warn!(
                "Setting block_cols={} exceeds {MAX_GRID_DIMENSION}, using {}",
                self.block_cols,
                defaults.block_cols
            );
            self.block_cols = defaults.block_cols;
        }

        if !self.ball_start_velocity.is_finite() {
            log::warn!("Setting ball_start_velocity is not finite, using default");
            self.ball_start_velocity = defaults.ball_start_velocity;
        }
        if self.paddle_width > self.world_width {
            log::warn!(
                "Paddle width {} exceeds world width {}, narrowing",
                self.paddle_width,
                self.world_width
            );
            self.paddle_width = self.world_width;
        }
        if !self.block_gap.is_finite() || self.block_gap < 0.0 {
            self.block_gap = 0.0;
        }
        if !self.block_edge_tolerance.is_finite() || self.block_edge_tolerance < 0.0 {
            self.block_edge_tolerance = 0.0;
        }
        self
    }

    /// Top edge of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.world_height - self.paddle_bottom_offset
    }

    /// Restart control hit area (shared by renderers and input handling)
    pub fn restart_button(&self) -> Rect {
        Rect::new(
            self.world_width / 2.0 - self.restart_button_width / 2.0,
            self.world_height / 2.0 + self.restart_button_offset_y,
            self.restart_button_width,
            self.restart_button_height,
        )
    }
}
