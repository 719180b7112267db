use crate::input::events::InputEvent;

/// Identifies a native window across the events coming out of a platform.
pub type SurfaceId = u64;

/// The status of a native window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The close button of window has been pressed.
    Closed,
    /// The window gained focus of user input.
    GainFocus,
    /// The window lost focus of user input.
    LostFocus,
    /// The size of window has changed.
    Resized(u32, u32),
}

/// The enumerations of all events a platform could produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Window { id: SurfaceId, event: WindowEvent },
    InputDevice(InputEvent),
}
