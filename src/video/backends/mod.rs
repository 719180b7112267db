//! The backend of renderer, which should be responsible for only one thing:
//! submitting GPU commands into the context of one window.
//!
//! Every method is `unsafe`: it must only be called while the context of
//! the window that owns the device is current.

pub mod gl;
pub mod headless;

use crate::errors::*;
use crate::math::{Matrix4, Vector2, Vector3};

use super::assets::texture::TextureParams;

/// Attribute locations shared by every program and the vertex layout.
pub const ATTRIBUTES: [(u32, &str); 3] = [
    (0, "vertex_position"),
    (1, "vertex_color"),
    (2, "vertex_uv"),
];

/// Object names are plain integers, zero is never a valid name.
pub type ObjectName = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Vertices,
    Indices,
}

pub trait Visitor {
    /// Applies the baseline state every window starts with.
    unsafe fn setup(&mut self) -> Result<()>;

    unsafe fn create_program(&mut self, vs: &str, fs: &str) -> Result<ObjectName>;
    unsafe fn delete_program(&mut self, id: ObjectName);
    unsafe fn use_program(&mut self, id: ObjectName);
    /// Returns -1 if `name` is not an active uniform.
    unsafe fn uniform_location(&mut self, id: ObjectName, name: &str) -> i32;
    unsafe fn uniform_matrix4(&mut self, location: i32, value: &Matrix4<f32>);
    unsafe fn uniform_vector3(&mut self, location: i32, value: &Vector3<f32>);
    unsafe fn uniform_i32(&mut self, location: i32, value: i32);

    unsafe fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Result<ObjectName>;
    unsafe fn delete_buffer(&mut self, id: ObjectName);
    /// Binds a vertex buffer and points the attributes into it.
    unsafe fn bind_vertices(&mut self, id: ObjectName);

    unsafe fn create_texture(&mut self, params: &TextureParams, data: &[u8]) -> Result<ObjectName>;
    /// Replaces the pixels of the rectangle at `position`.
    unsafe fn update_texture(
        &mut self,
        id: ObjectName,
        params: &TextureParams,
        position: Vector2<u32>,
        dimensions: Vector2<u32>,
        data: &[u8],
    ) -> Result<()>;
    /// Reads the whole base level back.
    unsafe fn read_texture(&mut self, id: ObjectName, params: &TextureParams) -> Result<Vec<u8>>;
    unsafe fn delete_texture(&mut self, id: ObjectName);
    unsafe fn bind_texture(&mut self, unit: u32, id: ObjectName);

    /// Draws the indexed triangle list in index buffer `id`.
    unsafe fn draw(&mut self, id: ObjectName, len: usize);
    unsafe fn viewport(&mut self, dimensions: Vector2<u32>);
    unsafe fn set_clear_color(&mut self, color: [f32; 4]);
    unsafe fn clear(&mut self);
    /// Reads the RGBA pixels of the framebuffer, bottom row first.
    unsafe fn read_pixels(&mut self, dimensions: Vector2<u32>) -> Result<Vec<u8>>;
}
