//! A device that keeps every object in memory and counts the commands it
//! receives. Shader sources get a shallow syntax check, so compile and link
//! failures could be exercised without a driver.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::errors::*;
use crate::math::{Matrix4, Vector2, Vector3};
use crate::video::assets::texture::TextureParams;

use super::{BufferKind, ObjectName, Visitor};

/// Command counters of a headless device.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DeviceStats {
    pub use_program: usize,
    pub uniform_lookups: usize,
    pub uniform_uploads: usize,
    pub bind_vertices: usize,
    pub bind_texture: usize,
    pub draws: usize,
    pub viewports: usize,
    pub clears: usize,
    /// Objects alive right now.
    pub programs: usize,
    pub buffers: usize,
    pub textures: usize,
    /// Commands received while another window was current.
    pub foreign_calls: usize,
    pub last_viewport: Option<(u32, u32)>,
}

struct HeadlessTexture {
    params: TextureParams,
    data: Vec<u8>,
}

pub struct HeadlessVisitor {
    surface: u64,
    current: Rc<Cell<Option<u64>>>,
    stats: Rc<RefCell<DeviceStats>>,
    names: ObjectName,
    programs: HashSet<ObjectName>,
    buffers: HashMap<ObjectName, (BufferKind, usize)>,
    textures: HashMap<ObjectName, HeadlessTexture>,
    clear_color: [f32; 4],
}

impl HeadlessVisitor {
    /// Creates a device drawing into `surface`, which is current whenever
    /// `current` holds its id.
    pub fn new(surface: u64, current: Rc<Cell<Option<u64>>>, stats: Rc<RefCell<DeviceStats>>) -> Self {
        HeadlessVisitor {
            surface,
            current,
            stats,
            names: 0,
            programs: HashSet::new(),
            buffers: HashMap::new(),
            textures: HashMap::new(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    fn touch<F>(&self, func: F)
    where
        F: FnOnce(&mut DeviceStats),
    {
        let mut stats = self.stats.borrow_mut();
        if self.current.get() != Some(self.surface) {
            stats.foreign_calls += 1;
        }

        func(&mut stats);
    }

    fn gen_name(&mut self) -> ObjectName {
        self.names += 1;
        self.names
    }

    fn sync_counts(&self) {
        let mut stats = self.stats.borrow_mut();
        stats.programs = self.programs.len();
        stats.buffers = self.buffers.len();
        stats.textures = self.textures.len();
    }
}

/// Rejects sources without an entry point or with unbalanced brackets.
fn compile(stage: &str, src: &str) -> Result<()> {
    if !src.contains("void main") {
        return Err(Error::Compile(format!(
            "{} shader: 0:1: error: missing entry point `main`.",
            stage
        )));
    }

    let mut depth = [0i32; 2];
    for c in src.chars() {
        match c {
            '{' => depth[0] += 1,
            '}' => depth[0] -= 1,
            '(' => depth[1] += 1,
            ')' => depth[1] -= 1,
            _ => {}
        }

        if depth[0] < 0 || depth[1] < 0 {
            break;
        }
    }

    if depth != [0, 0] {
        return Err(Error::Compile(format!(
            "{} shader: 0:1: error: syntax error, unbalanced brackets.",
            stage
        )));
    }

    Ok(())
}

impl Visitor for HeadlessVisitor {
    unsafe fn setup(&mut self) -> Result<()> {
        self.touch(|_| {});
        Ok(())
    }

    unsafe fn create_program(&mut self, vs: &str, fs: &str) -> Result<ObjectName> {
        self.touch(|_| {});
        compile("vertex", vs)?;
        compile("fragment", fs)?;

        if !vs.contains("gl_Position") {
            return Err(Error::Link(
                "error: vertex shader does not write gl_Position.".to_owned(),
            ));
        }

        let id = self.gen_name();
        self.programs.insert(id);
        self.sync_counts();
        Ok(id)
    }

    unsafe fn delete_program(&mut self, id: ObjectName) {
        self.touch(|_| {});
        self.programs.remove(&id);
        self.sync_counts();
    }

    unsafe fn use_program(&mut self, _: ObjectName) {
        self.touch(|v| v.use_program += 1);
    }

    unsafe fn uniform_location(&mut self, id: ObjectName, name: &str) -> i32 {
        self.touch(|v| v.uniform_lookups += 1);
        if self.programs.contains(&id) && !name.is_empty() {
            name.len() as i32
        } else {
            -1
        }
    }

    unsafe fn uniform_matrix4(&mut self, _: i32, _: &Matrix4<f32>) {
        self.touch(|v| v.uniform_uploads += 1);
    }

    unsafe fn uniform_vector3(&mut self, _: i32, _: &Vector3<f32>) {
        self.touch(|v| v.uniform_uploads += 1);
    }

    unsafe fn uniform_i32(&mut self, _: i32, _: i32) {
        self.touch(|v| v.uniform_uploads += 1);
    }

    unsafe fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Result<ObjectName> {
        self.touch(|_| {});
        let id = self.gen_name();
        self.buffers.insert(id, (kind, data.len()));
        self.sync_counts();
        Ok(id)
    }

    unsafe fn delete_buffer(&mut self, id: ObjectName) {
        self.touch(|_| {});
        self.buffers.remove(&id);
        self.sync_counts();
    }

    unsafe fn bind_vertices(&mut self, _: ObjectName) {
        self.touch(|v| v.bind_vertices += 1);
    }

    unsafe fn create_texture(&mut self, params: &TextureParams, data: &[u8]) -> Result<ObjectName> {
        self.touch(|_| {});
        if data.len() != params.format.size(params.dimensions) {
            return Err(Error::Resource(format!(
                "texture expects {} bytes, got {}.",
                params.format.size(params.dimensions),
                data.len()
            )));
        }

        let id = self.gen_name();
        let texture = HeadlessTexture {
            params: *params,
            data: data.to_vec(),
        };

        self.textures.insert(id, texture);
        self.sync_counts();
        Ok(id)
    }

    unsafe fn update_texture(
        &mut self,
        id: ObjectName,
        _: &TextureParams,
        position: Vector2<u32>,
        dimensions: Vector2<u32>,
        data: &[u8],
    ) -> Result<()> {
        self.touch(|_| {});
        let texture = self
            .textures
            .get_mut(&id)
            .ok_or_else(|| Error::Resource(format!("texture {} does not exist.", id)))?;

        let channels = texture.params.format.channels() as usize;
        let stride = texture.params.dimensions.x as usize * channels;
        let row = dimensions.x as usize * channels;

        if data.len() != row * dimensions.y as usize {
            return Err(Error::Resource("update size mismatch.".to_owned()));
        }

        for y in 0..dimensions.y as usize {
            let dst = (position.y as usize + y) * stride + position.x as usize * channels;
            let src = y * row;
            texture.data[dst..dst + row].copy_from_slice(&data[src..src + row]);
        }

        Ok(())
    }

    unsafe fn read_texture(&mut self, id: ObjectName, _: &TextureParams) -> Result<Vec<u8>> {
        self.touch(|_| {});
        self.textures
            .get(&id)
            .map(|v| v.data.clone())
            .ok_or_else(|| Error::Resource(format!("texture {} does not exist.", id)))
    }

    unsafe fn delete_texture(&mut self, id: ObjectName) {
        self.touch(|_| {});
        self.textures.remove(&id);
        self.sync_counts();
    }

    unsafe fn bind_texture(&mut self, _: u32, _: ObjectName) {
        self.touch(|v| v.bind_texture += 1);
    }

    unsafe fn draw(&mut self, _: ObjectName, _: usize) {
        self.touch(|v| v.draws += 1);
    }

    unsafe fn viewport(&mut self, dimensions: Vector2<u32>) {
        self.touch(|v| {
            v.viewports += 1;
            v.last_viewport = Some((dimensions.x, dimensions.y));
        });
    }

    unsafe fn set_clear_color(&mut self, color: [f32; 4]) {
        self.touch(|_| {});
        self.clear_color = color;
    }

    unsafe fn clear(&mut self) {
        self.touch(|v| v.clears += 1);
    }

    /// The framebuffer always holds the clear color.
    unsafe fn read_pixels(&mut self, dimensions: Vector2<u32>) -> Result<Vec<u8>> {
        self.touch(|_| {});
        let pixel: Vec<u8> = self
            .clear_color
            .iter()
            .map(|v| (v.max(0.0).min(1.0) * 255.0).round() as u8)
            .collect();

        let len = dimensions.x as usize * dimensions.y as usize;
        Ok(pixel.iter().cloned().cycle().take(len * 4).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn syntax_check() {
        assert!(compile("vertex", "void main() { gl_Position = vec4(1.0); }").is_ok());
        assert!(compile("vertex", "void main() { gl_Position = vec4(1.0; }").is_err());
        assert!(compile("vertex", "void mian() {}").is_err());
        assert!(compile("vertex", "void main() }{").is_err());
    }
}
