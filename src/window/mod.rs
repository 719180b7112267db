//! Native windows with an OpenGL context, and the platform that creates
//! them and pumps their events.

pub mod backends;
pub mod events;

pub use self::events::{Event, SurfaceId, WindowEvent};

use crate::config::Configuration;
use crate::math::Vector2;

impl_handle!(WindowHandle);

#[derive(Debug, Clone, PartialEq)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// The window could not be shrunk below this size.
    pub min_size: Vector2<u32>,
    /// Starts in fullscreen on the current monitor.
    pub fullscreen: bool,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "Kansai".to_owned(),
            size: Vector2::new(640, 480),
            min_size: Vector2::new(320, 240),
            fullscreen: false,
            vsync: true,
        }
    }
}

impl WindowParams {
    /// Reads `render.width`, `render.height`, `render.fullscreen`,
    /// `render.vsync` and `kansai.caption`, falling back to the defaults
    /// for anything missing or malformed.
    pub fn from_config(config: Option<&Configuration>) -> Self {
        let mut params = WindowParams::default();
        if let Some(config) = config {
            params.apply(config);
        }

        params
    }

    /// Overrides the fields present in `config`.
    pub fn apply(&mut self, config: &Configuration) {
        let dimension = |key: &str, min: u32| -> Option<u32> {
            config.get_i64(key).and_then(|v| {
                if v < i64::from(min) || v > i64::from(u16::max_value()) {
                    warn!("Configuration `{}` = {} is out of range.", key, v);
                    None
                } else {
                    Some(v as u32)
                }
            })
        };

        if let Some(width) = dimension("render.width", self.min_size.x) {
            self.size.x = width;
        }

        if let Some(height) = dimension("render.height", self.min_size.y) {
            self.size.y = height;
        }

        if let Some(fullscreen) = config.get_bool("render.fullscreen") {
            self.fullscreen = fullscreen;
        }

        if let Some(vsync) = config.get_bool("render.vsync") {
            self.vsync = vsync;
        }

        if let Some(caption) = config.get_str("kansai.caption") {
            self.title = caption.to_owned();
        }
    }
}
