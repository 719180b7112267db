//! GPU objects and the devices that create them.

pub mod assets;
pub mod backends;
pub mod image;

pub use self::assets::prelude::*;
pub use self::image::{Image, ImageFormat};
