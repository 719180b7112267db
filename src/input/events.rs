use crate::math::Vector2;

use super::keyboard::Key;

/// Input device event. Only the keyboard is supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pressed event on keyboard has been received.
    KeyboardPressed { key: Key },
    /// Released event from keyboard has been received.
    KeyboardReleased { key: Key },
}

/// A game-pad like view of the keyboard, taken once per tick.
///
/// | Button   | Key        |
/// |----------|------------|
/// | `a`      | Return     |
/// | `b`      | Backspace  |
/// | `x`      | Z          |
/// | `y`      | X          |
/// | `select` | Space      |
/// | `start`  | Escape     |
/// | `pad_*`  | Arrow keys |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Events {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub select: bool,
    pub start: bool,

    pub pad_u: bool,
    pub pad_d: bool,
    pub pad_l: bool,
    pub pad_r: bool,

    /// `x = r - l` and `y = u - d`.
    pub pad: Vector2<f32>,
}

impl Default for Events {
    fn default() -> Self {
        Events {
            a: false,
            b: false,
            x: false,
            y: false,
            select: false,
            start: false,
            pad_u: false,
            pad_d: false,
            pad_l: false,
            pad_r: false,
            pad: Vector2::new(0.0, 0.0),
        }
    }
}

impl Events {
    /// Builds a snapshot from a held-state query.
    pub fn from_keys<F>(is_held: F) -> Self
    where
        F: Fn(Key) -> bool,
    {
        let axis = |positive: bool, negative: bool| -> f32 {
            (positive as i32 - negative as i32) as f32
        };

        let pad_u = is_held(Key::Up);
        let pad_d = is_held(Key::Down);
        let pad_l = is_held(Key::Left);
        let pad_r = is_held(Key::Right);

        Events {
            a: is_held(Key::Return),
            b: is_held(Key::Backspace),
            x: is_held(Key::Z),
            y: is_held(Key::X),
            select: is_held(Key::Space),
            start: is_held(Key::Escape),
            pad_u,
            pad_d,
            pad_l,
            pad_r,
            pad: Vector2::new(axis(pad_r, pad_l), axis(pad_u, pad_d)),
        }
    }
}
