mod types;

use std::ffi::CStr;
use std::os::raw::c_void;
use std::thread;
use std::time::{Duration, Instant};

use glutin::GlContext;

use crate::errors::*;
use crate::math::Vector2;
use crate::utils::time::Timestamp;
use crate::video::backends::gl::GLVisitor;
use crate::video::backends::Visitor as DeviceVisitor;

use super::super::events::{Event, SurfaceId};
use super::super::WindowParams;
use super::{Platform, Visitor};

pub fn new() -> Box<dyn Platform> {
    Box::new(GlutinPlatform {
        events_loop: None,
        epoch: Instant::now(),
    })
}

pub struct GlutinPlatform {
    events_loop: Option<glutin::EventsLoop>,
    epoch: Instant,
}

impl Platform for GlutinPlatform {
    fn start(&mut self) -> Result<()> {
        self.events_loop = Some(glutin::EventsLoop::new());
        self.epoch = Instant::now();
        info!("Glutin platform started.");
        Ok(())
    }

    fn stop(&mut self) {
        self.events_loop = None;
        info!("Glutin platform stopped.");
    }

    fn create_surface(&mut self, params: &WindowParams) -> Result<Box<dyn Visitor>> {
        let events_loop = self
            .events_loop
            .as_ref()
            .ok_or_else(|| Error::Init("the events loop is not running.".to_owned()))?;

        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ))
            .with_min_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.min_size.x),
                f64::from(params.min_size.y),
            ))
            .with_resizable(true);

        let context = glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (2, 1)))
            .with_depth_buffer(24)
            .with_vsync(params.vsync);

        let window = glutin::GlWindow::new(builder, context, events_loop)?;
        let id = types::surface_id(window.id());
        Ok(Box::new(GlutinSurface { window, id }))
    }

    fn load_functions(&mut self, surface: &dyn Visitor) -> Result<()> {
        gl::load_with(|symbol| surface.proc_address(symbol));

        if !gl::GetString::is_loaded() || !gl::CreateProgram::is_loaded() {
            return Err(Error::Init("failed to load OpenGL functions.".to_owned()));
        }

        unsafe {
            info!("GL vendor: {}", gl_string(gl::VENDOR));
            info!("GL renderer: {}", gl_string(gl::RENDERER));
            info!("GL version: {}", gl_string(gl::VERSION));
            info!("GLSL version: {}", gl_string(gl::SHADING_LANGUAGE_VERSION));
        }

        Ok(())
    }

    fn create_device(&mut self, _: &dyn Visitor) -> Result<Box<dyn DeviceVisitor>> {
        let visitor = unsafe { GLVisitor::new()? };
        Ok(Box::new(visitor))
    }

    fn poll_events(&mut self, events: &mut Vec<Event>) {
        if let Some(ref mut events_loop) = self.events_loop {
            events_loop.poll_events(|v| {
                if let Some(e) = types::from_event(v) {
                    events.push(e);
                }
            });
        }
    }

    fn timestamp(&self) -> Timestamp {
        let elapsed = self.epoch.elapsed();
        let millis = elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis());
        Timestamp::from_millis(millis)
    }

    fn sleep(&mut self, millis: u64) {
        thread::sleep(Duration::from_millis(millis));
    }
}

unsafe fn gl_string(name: gl::types::GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return String::new();
    }

    CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
}

pub struct GlutinSurface {
    window: glutin::GlWindow,
    id: SurfaceId,
}

impl Visitor for GlutinSurface {
    #[inline]
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn dimensions(&self) -> Vector2<u32> {
        let dpr = self.window.get_hidpi_factor();
        self.window
            .get_inner_size()
            .map(|size| {
                let size = size.to_physical(dpr);
                Vector2::new(size.width as u32, size.height as u32)
            })
            .unwrap_or_else(|| Vector2::new(0, 0))
    }

    #[inline]
    fn resize(&self, dimensions: Vector2<u32>) {
        let size = glutin::dpi::PhysicalSize::new(f64::from(dimensions.x), f64::from(dimensions.y));
        self.window.resize(size);
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        if fullscreen {
            let monitor = self.window.get_current_monitor();
            self.window.set_fullscreen(Some(monitor));
        } else {
            self.window.set_fullscreen(None);
        }
    }

    #[inline]
    fn raise(&self) {
        self.window.show();
    }

    #[inline]
    fn make_current(&self) -> Result<()> {
        unsafe {
            self.window.make_current()?;
        }

        Ok(())
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        self.window.swap_buffers()?;
        Ok(())
    }

    #[inline]
    fn proc_address(&self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const c_void
    }
}
