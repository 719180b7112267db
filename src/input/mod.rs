//! Keyboard input: key names, the transition accumulator shared by all
//! windows of a context, and the per-tick `Events` snapshot.

pub mod accumulator;
pub mod events;
pub mod keyboard;

pub use self::accumulator::Accumulator;
pub use self::events::{Events, InputEvent};
pub use self::keyboard::{Gesture, Key, MAX_KEY_CODES};
