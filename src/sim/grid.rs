//! Block grid generation
//!
//! Rows × cols blocks, horizontally centered, starting a fixed distance from
//! the top. Only colors are random.

use rand::Rng;

use super::collision::Rect;
use super::state::{Block, NeonColor};
use crate::settings::{MAX_GRID_DIMENSION, Settings};

/// Left edge of the first column so the grid is centered in the world
pub fn grid_start_x(settings: &Settings) -> f32 {
    let cols = settings.block_cols as f32;
    let grid_width = cols * settings.block_width + (cols - 1.0).max(0.0) * settings.block_gap;
    (settings.world_width - grid_width) / 2.0
}

/// Build the full block set in row-major order
pub fn build_block_grid(settings: &Settings, rng: &mut impl Rng) -> Vec<Block> {
    let start_x = grid_start_x(settings);
    let start_y = settings.block_top_offset;
    let step_x = settings.block_width + settings.block_gap;
    let step_y = settings.block_height + settings.block_gap;

    let count = settings.block_rows.saturating_mul(settings.block_cols);
    let capacity = count.min(MAX_GRID_DIMENSION * MAX_GRID_DIMENSION);
    let mut blocks = Vec::with_capacity(capacity as usize);
    for row in 0..settings.block_rows {
        for col in 0..settings.block_cols {
            blocks.push(Block {
                id: row.saturating_mul(settings.block_cols).saturating_add(col),
                rect: Rect::new(
                    start_x + col as f32 * step_x,
                    start_y + row as f32 * step_y,
                    settings.block_width,
                    settings.block_height,
                ),
                color: NeonColor::random(rng),
            });
        }
    }

    log::debug!(
        "Built {}x{} block grid at x={start_x}",
        settings.block_rows,
        settings.block_cols
    );
    blocks
}
