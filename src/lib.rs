//! # Kansai
//!
//! A small layer of windows, keyboard input and OpenGL state for
//! interactive sketches. A `Context` owns a handful of windows, each one
//! driven by a `Sketch`, and runs their callbacks tick by tick.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub extern crate cgmath;

#[macro_use]
pub mod utils;
pub mod errors;
pub mod config;
pub mod math;
pub mod random;
pub mod input;
pub mod window;
pub mod video;
pub mod context;

pub mod prelude {
    pub use crate::config::Configuration;
    pub use crate::context::{
        Context, Sketch, SketchResult, Status, Window, MAX_TEXTURE_UNITS, MAX_WINDOWS,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::input::{Events, Gesture, Key};
    pub use crate::math::{Rgb, Rgba};
    pub use crate::random::Xorshift;
    pub use crate::video::{Filter, Image, Index, Program, Texture, Vertex, Vertices, Wrap};
    pub use crate::window::WindowHandle;
}

/// Returns the version of this crate, as in `0.4.0`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn version_major() -> u32 {
    env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0)
}

pub fn version_minor() -> u32 {
    env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0)
}

pub fn version_patch() -> u32 {
    env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version_parts() {
        let parts = format!("{}.{}.{}", version_major(), version_minor(), version_patch());
        assert!(version().starts_with(&parts));
    }
}
