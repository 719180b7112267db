pub mod headless;

use std::os::raw::c_void;

use crate::errors::*;
use crate::math::Vector2;
use crate::utils::time::Timestamp;
use crate::video::backends::Visitor as DeviceVisitor;

use super::events::{Event, SurfaceId};
use super::WindowParams;

/// A native window with its own rendering context.
pub trait Visitor {
    fn id(&self) -> SurfaceId;
    /// Returns the size in pixels of the client area.
    fn dimensions(&self) -> Vector2<u32>;
    /// Resizes the GL drawable after the native window changed its size.
    fn resize(&self, dimensions: Vector2<u32>);
    fn set_fullscreen(&self, fullscreen: bool);
    /// Shows the window. Platforms may leave an already visible window
    /// where it is in the stacking order.
    fn raise(&self);
    /// Sets the context of this window as the active one in this thread.
    fn make_current(&self) -> Result<()>;
    fn swap_buffers(&self) -> Result<()>;
    /// Returns the address of a GL function of this context.
    fn proc_address(&self, symbol: &str) -> *const c_void;
}

/// The windowing subsystem.
pub trait Platform {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
    fn create_surface(&mut self, params: &WindowParams) -> Result<Box<dyn Visitor>>;
    /// Resolves the GPU functions through `surface`, which must be current.
    fn load_functions(&mut self, surface: &dyn Visitor) -> Result<()>;
    /// Creates the device that draws into `surface`, which must be current.
    fn create_device(&mut self, surface: &dyn Visitor) -> Result<Box<dyn DeviceVisitor>>;
    /// Collects pending events without blocking.
    fn poll_events(&mut self, events: &mut Vec<Event>);
    /// Milliseconds since the platform started.
    fn timestamp(&self) -> Timestamp;
    /// Blocks the calling thread for at least `millis` milliseconds.
    fn sleep(&mut self, millis: u64);
}

mod glutin;
pub use self::glutin::new;
