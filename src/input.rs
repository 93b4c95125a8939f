//! Abstract input events and the per-tick input buffer
//!
//! Hosts translate keyboard/pointer/touch into [`InputEvent`]s whenever they
//! arrive. The engine drains the buffer once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{ControlSignal, Paddle, Rect, TickInput};

/// Logical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Restart,
}

/// Input as produced by a host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Horizontal pointer/touch movement since the last drag event
    PointerDrag(f32),
    /// Click or tap in world coordinates
    PointerTap { x: f32, y: f32 },
}

/// Held keys plus anything pending for the next tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub left_held: bool,
    pub right_held: bool,
    /// Accumulated drag since the last tick
    pending_drag: f32,
    restart_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event
    ///
    /// `restart_button` is the live restart control, `None` while playing.
    /// Restart keys and taps only count while it is live, and drags only count
    /// while it is not.
    pub fn apply(&mut self, event: InputEvent, restart_button: Option<Rect>) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.left_held = true,
            InputEvent::KeyDown(Key::Right) => self.right_held = true,
            InputEvent::KeyDown(Key::Restart) => {
                if restart_button.is_some() {
                    self.restart_requested = true;
                }
            }
            InputEvent::KeyUp(Key::Left) => self.left_held = false,
            InputEvent::KeyUp(Key::Right) => self.right_held = false,
            InputEvent::KeyUp(Key::Restart) => {}
            InputEvent::PointerDrag(dx) => {
                if restart_button.is_none() && dx.is_finite() {
                    self.pending_drag += dx;
                }
            }
            InputEvent::PointerTap { x, y } => {
                let tap = Vec2::new(x, y);
                if tap.is_finite() && restart_button.is_some_and(|b| b.contains_strict(tap)) {
                    self.restart_requested = true;
                }
            }
        }
    }

    /// Drain pending input into this tick's control signal
    ///
    /// A pending drag wins over held keys. Right wins over Left unless the
    /// paddle already sits at the right wall, in which case a held Left still
    /// moves it.
    pub fn take_tick_input(&mut self, paddle: &Paddle, world_width: f32) -> TickInput {
        let drag = std::mem::take(&mut self.pending_drag);
        let control = if drag != 0.0 {
            ControlSignal::DragTo(drag)
        } else if self.right_held && paddle.x < paddle.max_x(world_width) {
            ControlSignal::MoveRight
        } else if self.left_held && paddle.x > 0.0 {
            ControlSignal::MoveLeft
        } else {
            ControlSignal::None
        };
        TickInput::new(control)
    }

    /// Whether a reset was requested since the last call
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Drop one-shot input; held keys survive a reset
    pub fn clear_pending(&mut self) {
        self.pending_drag = 0.0;
        self.restart_requested = false;
    }
}
