//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only (block colors)
//! - Stable iteration order (block insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{Axis, Rect};
pub use grid::build_block_grid;
pub use state::{Ball, Block, GameEvent, GamePhase, NeonColor, Paddle, World};
pub use tick::{ControlSignal, TickInput, move_paddle, tick};
