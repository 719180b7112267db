//! The owner of every window, and the tick that drives them.
//!
//! A `Context` multiplexes up to `MAX_WINDOWS` windows over one platform.
//! Each window carries a `Sketch`, whose callbacks run with the context of
//! that window current. Windows are never destroyed in the middle of a
//! callback; closing one only marks it, and the update loop tears it down at
//! a safe point.
//!
//! ```ignore
//! let mut ctx = Context::new(kansai::window::backends::new());
//! ctx.start()?;
//! ctx.create_window(None, MySketch::default())?;
//! while ctx.update()? == Status::Running {}
//! ctx.stop();
//! ```

mod defaults;
pub mod sketch;
mod update;
pub mod window;

pub use self::sketch::{Sketch, SketchResult};
pub use self::window::{Window, MAX_TEXTURE_UNITS};

use crate::config::Configuration;
use crate::errors::*;
use crate::input::Accumulator;
use crate::utils::object_pool::ObjectPool;
use crate::utils::time::Timestamp;
use crate::video::assets::texture::Filter;
use crate::window::backends::Platform;
use crate::window::{Event, SurfaceId, WindowHandle, WindowParams};

/// The number of windows that could be alive at once.
pub const MAX_WINDOWS: usize = 4;
/// Unfocused windows are presented and framed every this many ticks.
pub const UNFOCUSED_FRAME_DIVISOR: u64 = 4;
/// The elapsed milliseconds that make a `delta` of 1.0.
pub const FRAME_REFERENCE_MS: f32 = 33.3333;

/// What is left after a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// No window is alive any more.
    Closed,
}

struct Slot {
    window: Window,
    sketch: Box<dyn Sketch>,
}

pub struct Context {
    platform: Box<dyn Platform>,
    references: usize,
    loaded: bool,
    frame: u64,
    windows: ObjectPool<WindowHandle, Slot>,
    focused: Option<WindowHandle>,
    accumulator: Accumulator<WindowHandle>,
    events: Vec<Event>,
    vsync: bool,
    filter: Filter,
}

impl Context {
    pub fn new(platform: Box<dyn Platform>) -> Self {
        Context {
            platform,
            references: 0,
            loaded: false,
            frame: 0,
            windows: ObjectPool::with_capacity(MAX_WINDOWS),
            focused: None,
            accumulator: Accumulator::new(),
            events: Vec::new(),
            vsync: true,
            filter: Filter::default(),
        }
    }

    /// Starts the platform. Calls are counted, only the first one does
    /// anything.
    pub fn start(&mut self) -> Result<()> {
        if self.references == 0 {
            self.platform.start()?;
            self.vsync = true;
            self.filter = Filter::default();
            info!("Context started.");
        }

        self.references += 1;
        Ok(())
    }

    /// Balances a `start`. The last one tears every window down without
    /// running its close callback, then stops the platform.
    pub fn stop(&mut self) {
        if self.references == 0 {
            return;
        }

        self.references -= 1;
        if self.references > 0 {
            return;
        }

        let handles: Vec<_> = self.windows.iter().collect();
        for handle in handles {
            if let Some(slot) = self.windows.free(handle) {
                match slot.window.make_current() {
                    Ok(_) => slot.window.dispose(),
                    Err(err) => debug!("{} dropped without its context: {}", handle, err),
                }
            }
        }

        self.platform.stop();

        self.loaded = false;
        self.frame = 0;
        self.windows = ObjectPool::with_capacity(MAX_WINDOWS);
        self.focused = None;
        self.accumulator.reset();
        self.events.clear();
        info!("Context stopped.");
    }

    /// Opens a window configured by `render.width`, `render.height`,
    /// `render.fullscreen`, `render.vsync` and `kansai.caption`, and hands
    /// it to `sketch`. The new window takes the focus.
    ///
    /// Nothing is left behind if this fails, including a failure of the
    /// `init` or `resize` callbacks.
    pub fn create_window<S>(&mut self, config: Option<&Configuration>, sketch: S) -> Result<WindowHandle>
    where
        S: Sketch + 'static,
    {
        if !self.is_started() {
            return Err(Error::Init("the context is not started.".to_owned()));
        }

        if self.windows.len() >= MAX_WINDOWS {
            return Err(Error::Capacity(MAX_WINDOWS));
        }

        let mut params = WindowParams::default();
        params.vsync = self.vsync;
        if let Some(config) = config {
            params.apply(config);
        }

        let surface = self.platform.create_surface(&params)?;
        surface.make_current()?;

        if !self.loaded {
            self.platform.load_functions(surface.as_ref())?;
            self.loaded = true;
        }

        let device = self.platform.create_device(surface.as_ref())?;
        let mut window = Window::new(surface, device, params.fullscreen, self.time());
        if let Err(err) = window.setup(self.filter) {
            window.dispose();
            return Err(err);
        }

        let handle = self.windows.create(Slot {
            window,
            sketch: Box::new(sketch),
        });

        let result = match self.windows.get_mut(handle) {
            Some(slot) => {
                let Slot {
                    ref mut window,
                    ref mut sketch,
                } = *slot;

                window.set_handle(handle);
                let dimensions = window.dimensions();
                sketch
                    .init(window)
                    .and_then(|_| sketch.resize(window, dimensions))
            }
            None => return Err(Error::WindowNotExists(handle)),
        };

        if let Err(err) = result {
            if let Some(slot) = self.windows.free(handle) {
                slot.window.dispose();
            }

            return Err(Error::from_sketch(err));
        }

        self.focus(handle)?;
        info!(
            "{} created, \"{}\" {}x{}.",
            handle, params.title, params.size.x, params.size.y
        );

        Ok(handle)
    }

    /// Marks a window for deletion, it is torn down by the next tick.
    pub fn delete(&mut self, handle: WindowHandle) -> Result<()> {
        let slot = self
            .windows
            .get_mut(handle)
            .ok_or_else(|| Error::WindowNotExists(handle))?;

        slot.window.delete_mark = true;
        Ok(())
    }

    /// Gives the focus to a window and raises it.
    pub fn focus(&mut self, handle: WindowHandle) -> Result<()> {
        if !self.windows.is_alive(handle) {
            return Err(Error::WindowNotExists(handle));
        }

        self.set_focus(handle);
        if let Some(slot) = self.windows.get(handle) {
            slot.window.raise();
        }

        Ok(())
    }

    fn set_focus(&mut self, handle: WindowHandle) {
        if let Some(prev) = self.focused {
            if let Some(slot) = self.windows.get_mut(prev) {
                slot.window.focused = false;
            }
        }

        if let Some(slot) = self.windows.get_mut(handle) {
            slot.window.focused = true;
            self.focused = Some(handle);
            debug!("{} focused.", handle);
        }
    }

    /// Runs the close callback of a window, then tears it down.
    fn reap(&mut self, handle: WindowHandle) -> Result<()> {
        let mut slot = match self.windows.free(handle) {
            Some(slot) => slot,
            None => return Ok(()),
        };

        if self.focused == Some(handle) {
            self.focused = None;
        }

        slot.window.make_current()?;

        let result = slot
            .sketch
            .close(&mut slot.window)
            .map_err(Error::from_sketch);

        slot.window.dispose();
        result
    }

    fn find(&self, id: SurfaceId) -> Option<WindowHandle> {
        self.windows.iter().find(|&handle| {
            self.windows
                .get(handle)
                .map(|v| v.window.id() == id)
                .unwrap_or(false)
        })
    }

    /// Milliseconds since the platform started.
    #[inline]
    pub fn time(&self) -> Timestamp {
        self.platform.timestamp()
    }

    /// Waits at least `millis` milliseconds.
    pub fn sleep(&mut self, millis: u64) {
        self.platform.sleep(millis);
    }

    /// The number of completed ticks.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The number of alive windows.
    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    #[inline]
    pub fn is_alive(&self, handle: WindowHandle) -> bool {
        self.windows.is_alive(handle)
    }

    #[inline]
    pub fn focused(&self) -> Option<WindowHandle> {
        self.focused
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.references > 0
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(handle).map(|v| &v.window)
    }

    /// Returns the native id of a window.
    pub fn surface(&self, handle: WindowHandle) -> Option<SurfaceId> {
        self.window(handle).map(|v| v.id())
    }

    /// Sets the vsync of windows created from now on, unless their
    /// configuration says otherwise.
    #[inline]
    pub fn set_vsync(&mut self, vsync: bool) {
        self.vsync = vsync;
    }

    /// Sets the filter of the placeholder textures of windows created from
    /// now on.
    #[inline]
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        while self.references > 0 {
            self.stop();
        }
    }
}
