use crate::input::{Events, Gesture, Key};
use crate::math::Vector2;

use super::window::Window;

pub type SketchResult = ::std::result::Result<(), ::failure::Error>;

/// The callbacks of a window. The context of `window` is current whenever
/// one of them runs, so GPU objects could be created and drawn right away.
///
/// Returning an error aborts the running tick, and the error is handed to
/// the caller of `Context::update`.
pub trait Sketch {
    /// Runs once, after the window and its default objects exist.
    fn init(&mut self, _: &mut Window) -> SketchResult {
        Ok(())
    }

    /// Runs every tick while focused, and every 4th tick otherwise. `delta`
    /// is the elapsed time since the last call in units of 1/30 second.
    fn frame(&mut self, _: &mut Window, _: &Events, _: f32) -> SketchResult {
        Ok(())
    }

    /// Runs after the size of the drawable changed, and once after `init`.
    fn resize(&mut self, _: &mut Window, _: Vector2<u32>) -> SketchResult {
        Ok(())
    }

    /// Receives the key transitions of the tick, focused window only.
    fn keyboard(&mut self, _: &mut Window, _: Key, _: Gesture) -> SketchResult {
        Ok(())
    }

    /// Runs before the window is torn down, the last chance to free the
    /// objects this sketch created.
    fn close(&mut self, _: &mut Window) -> SketchResult {
        Ok(())
    }
}
