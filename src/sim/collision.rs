//! Collision detection and response for axis-aligned geometry
//!
//! Everything in the arena is a rectangle except the ball, which is tested
//! through its bounding square. Reflection is a sign flip on one axis except
//! for the paddle, which re-aims the ball by where it landed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::direction_from_vertical;

/// Axis-aligned rectangle, `pos` is the top-left corner (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square bounding a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Strict containment: points on the border are outside
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.left() && point.x < self.right() && point.y > self.top() && point.y < self.bottom()
    }
}

/// Which velocity component a reflection flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Flip vx (side hit)
    Horizontal,
    /// Flip vy (top/bottom hit)
    Vertical,
}

/// Classify a ball/block hit by the ball's vertical extent
///
/// If the ball's bottom is within `tolerance` of the block's top, or its top is
/// within `tolerance` of the block's bottom, it is a vertical hit; anything else
/// is a side hit. Corner hits with deep vertical penetration come out as side
/// hits.
pub fn block_bounce_axis(ball_pos: Vec2, ball_radius: f32, block: &Rect, tolerance: f32) -> Axis {
    let ball_top = ball_pos.y - ball_radius;
    let ball_bottom = ball_pos.y + ball_radius;
    if ball_bottom <= block.top() + tolerance || ball_top >= block.bottom() - tolerance {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

/// Flip the velocity component for `axis`
#[inline]
pub fn reflect_axis(velocity: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(-velocity.x, velocity.y),
        Axis::Vertical => Vec2::new(velocity.x, -velocity.y),
    }
}

/// Side wall test; returns the clamped x if the ball crossed a wall
pub fn ball_side_wall_collision(ball_pos: Vec2, ball_radius: f32, width: f32) -> Option<f32> {
    if ball_pos.x - ball_radius < 0.0 {
        Some(ball_radius)
    } else if ball_pos.x + ball_radius > width {
        Some(width - ball_radius)
    } else {
        None
    }
}

/// Ceiling test; returns the clamped y if the ball crossed it
pub fn ball_ceiling_collision(ball_pos: Vec2, ball_radius: f32) -> Option<f32> {
    (ball_pos.y - ball_radius < 0.0).then_some(ball_radius)
}

/// Whether the ball has dropped through the floor
pub fn ball_floor_collision(ball_pos: Vec2, ball_radius: f32, height: f32) -> bool {
    ball_pos.y + ball_radius > height
}

/// Paddle contact test
///
/// The ball's bottom edge must be inside the paddle's vertical band and its
/// center inside the paddle's horizontal span (both inclusive). Returns the
/// normalized hit offset in `[-1, 1]`, negative left of center.
pub fn ball_paddle_collision(ball_pos: Vec2, ball_radius: f32, paddle: &Rect) -> Option<f32> {
    let ball_bottom = ball_pos.y + ball_radius;
    let in_band = ball_bottom >= paddle.top() && ball_bottom <= paddle.bottom();
    let in_span = ball_pos.x >= paddle.left() && ball_pos.x <= paddle.right();
    if !(in_band && in_span) {
        return None;
    }
    let half_width = paddle.size.x / 2.0;
    let offset = (ball_pos.x - paddle.center().x) / half_width;
    Some(offset.clamp(-1.0, 1.0))
}

/// Re-aim the ball off the paddle, keeping its speed
///
/// The hit offset maps linearly to an angle from vertical in
/// `[-max_angle, max_angle]`; the ball always leaves upward.
pub fn paddle_bounce_velocity(velocity: Vec2, offset: f32, max_angle: f32) -> Vec2 {
    let speed = velocity.length();
    direction_from_vertical(offset * max_angle) * speed
}
