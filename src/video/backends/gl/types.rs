use gl::types::*;

use super::super::super::assets::texture::{Filter, TextureFormat, Wrap};
use super::super::BufferKind;

// Legacy formats, gone from the core profile bindings.
pub const LUMINANCE: GLenum = 0x1909;
pub const LUMINANCE_ALPHA: GLenum = 0x190A;

/// Returns the `(min, mag)` filters.
pub fn filter(filter: Filter) -> (GLenum, GLenum) {
    match filter {
        Filter::Bilinear => (gl::LINEAR_MIPMAP_NEAREST, gl::LINEAR),
        Filter::Trilinear => (gl::LINEAR_MIPMAP_LINEAR, gl::LINEAR),
        Filter::PixelBilinear => (gl::NEAREST_MIPMAP_NEAREST, gl::NEAREST),
        Filter::PixelTrilinear => (gl::NEAREST_MIPMAP_LINEAR, gl::NEAREST),
        Filter::None => (gl::NEAREST, gl::NEAREST),
    }
}

impl From<Wrap> for GLenum {
    fn from(wrap: Wrap) -> Self {
        match wrap {
            Wrap::Repeat => gl::REPEAT,
            Wrap::Clamp => gl::CLAMP_TO_EDGE,
            Wrap::MirroredRepeat => gl::MIRRORED_REPEAT,
        }
    }
}

impl From<TextureFormat> for GLenum {
    fn from(format: TextureFormat) -> Self {
        match format {
            TextureFormat::Luminance => LUMINANCE,
            TextureFormat::LuminanceAlpha => LUMINANCE_ALPHA,
            TextureFormat::Rgb => gl::RGB,
            TextureFormat::Rgba => gl::RGBA,
        }
    }
}

/// Returns the bind target and the binding query of a buffer kind.
pub fn buffer(kind: BufferKind) -> (GLenum, GLenum) {
    match kind {
        BufferKind::Vertices => (gl::ARRAY_BUFFER, gl::ARRAY_BUFFER_BINDING),
        BufferKind::Indices => (gl::ELEMENT_ARRAY_BUFFER, gl::ELEMENT_ARRAY_BUFFER_BINDING),
    }
}
