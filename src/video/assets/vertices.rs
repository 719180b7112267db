use bytemuck::{Pod, Zeroable};

use crate::context::Window;
use crate::errors::*;
use crate::video::backends::{BufferKind, ObjectName};

/// The only vertex layout there is: position, color and texture coordinates,
/// tightly packed.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const POSITION_OFFSET: usize = 0;
    pub const COLOR_OFFSET: usize = 3 * 4;
    pub const UV_OFFSET: usize = 7 * 4;

    #[inline]
    pub fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Vertex {
            position,
            color,
            uv,
        }
    }
}

/// A vertex buffer.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Vertices {
    id: ObjectName,
    len: usize,
}

impl Vertices {
    pub fn new(window: &mut Window, vertices: &[Vertex]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let id = unsafe { window.device().create_buffer(BufferKind::Vertices, bytes)? };

        Ok(Vertices {
            id,
            len: vertices.len(),
        })
    }

    /// Deletes the GPU buffer. Freeing twice is a no-op.
    pub fn free(&mut self, window: &mut Window) {
        if self.id == 0 {
            return;
        }

        unsafe {
            window.device().delete_buffer(self.id);
        }

        window.forget_vertices(self.id);
        self.id = 0;
        self.len = 0;
    }

    #[inline]
    pub fn id(&self) -> ObjectName {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.id != 0
    }
}

/// An index buffer describing a triangle list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Index {
    id: ObjectName,
    len: usize,
}

impl Index {
    pub fn new(window: &mut Window, indices: &[u16]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let id = unsafe { window.device().create_buffer(BufferKind::Indices, bytes)? };

        Ok(Index {
            id,
            len: indices.len(),
        })
    }

    /// Deletes the GPU buffer. Freeing twice is a no-op.
    pub fn free(&mut self, window: &mut Window) {
        if self.id == 0 {
            return;
        }

        unsafe {
            window.device().delete_buffer(self.id);
        }

        self.id = 0;
        self.len = 0;
    }

    #[inline]
    pub fn id(&self) -> ObjectName {
        self.id
    }

    /// Returns the number of indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.id != 0
    }
}
