use crate::errors::*;
use crate::math::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector2, Vector3};
use crate::utils::time::Timestamp;
use crate::video::assets::prelude::*;
use crate::video::backends::{ObjectName, Visitor as DeviceVisitor};
use crate::video::image::Image;
use crate::window::backends::Visitor as SurfaceVisitor;
use crate::window::{SurfaceId, WindowHandle};

use super::defaults;

/// The number of texture units a window keeps track of.
pub const MAX_TEXTURE_UNITS: usize = 8;

const TEXTURE_UNIFORMS: [&str; MAX_TEXTURE_UNITS] = [
    "texture0", "texture1", "texture2", "texture3", "texture4", "texture5", "texture6",
    "texture7",
];

#[derive(Debug, Copy, Clone)]
struct Uniforms {
    world: i32,
    local: i32,
    camera: i32,
    camera_position: i32,
    textures: [i32; MAX_TEXTURE_UNITS],
}

impl Default for Uniforms {
    fn default() -> Self {
        Uniforms {
            world: -1,
            local: -1,
            camera: -1,
            camera_position: -1,
            textures: [-1; MAX_TEXTURE_UNITS],
        }
    }
}

/// What is bound right now, by GPU object name.
#[derive(Debug)]
struct RenderState {
    program: Option<ObjectName>,
    vertices: Option<ObjectName>,
    textures: [Option<ObjectName>; MAX_TEXTURE_UNITS],
    uniforms: Uniforms,
    world: Matrix4<f32>,
    local: Matrix4<f32>,
    camera: Matrix4<f32>,
    camera_position: Vector3<f32>,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            program: None,
            vertices: None,
            textures: [None; MAX_TEXTURE_UNITS],
            uniforms: Uniforms::default(),
            world: Matrix4::identity(),
            local: Matrix4::identity(),
            camera: ::cgmath::ortho(-1.0, 1.0, -1.0, 1.0, 0.0, 2.0),
            camera_position: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Default)]
struct Defaults {
    program: Program,
    vertices: Vertices,
    index: Index,
    texture: Texture,
}

/// A native window, its rendering context and the state bound into it.
///
/// Binding calls compare GPU object names with what is already bound, and
/// only talk to the device when something changes.
pub struct Window {
    handle: WindowHandle,
    device: Box<dyn DeviceVisitor>,
    surface: Box<dyn SurfaceVisitor>,
    state: RenderState,
    defaults: Defaults,
    fullscreen: bool,
    pub(crate) delete_mark: bool,
    pub(crate) resize_mark: bool,
    pub(crate) focused: bool,
    pub(crate) last_frame: Timestamp,
}

impl Window {
    pub(crate) fn new(
        surface: Box<dyn SurfaceVisitor>,
        device: Box<dyn DeviceVisitor>,
        fullscreen: bool,
        timestamp: Timestamp,
    ) -> Self {
        Window {
            handle: WindowHandle::default(),
            device,
            surface,
            state: RenderState::default(),
            defaults: Defaults::default(),
            fullscreen,
            delete_mark: false,
            resize_mark: false,
            focused: false,
            last_frame: timestamp,
        }
    }

    /// Applies the baseline GPU state and creates the default objects, then
    /// binds them. The context must be current.
    pub(crate) fn setup(&mut self, filter: Filter) -> Result<()> {
        unsafe {
            self.device.setup()?;
        }

        self.defaults.program =
            Program::new(self, defaults::VERTEX_SHADER, defaults::FRAGMENT_SHADER)?;
        self.defaults.vertices = Vertices::new(self, &defaults::quad())?;
        self.defaults.index = Index::new(self, &defaults::QUAD_INDICES)?;

        let placeholder = Image::from_raw(2, 2, 1, defaults::PLACEHOLDER.to_vec())?;
        self.defaults.texture = Texture::new(self, &placeholder, filter, Wrap::default())?;

        if self.fullscreen {
            self.surface.set_fullscreen(true);
        }

        self.bind_defaults();

        let dimensions = self.surface.dimensions();
        unsafe {
            self.device.viewport(dimensions);
            self.device.clear();
        }

        Ok(())
    }

    /// Frees the default objects and drops the native window. The context
    /// must be current.
    pub(crate) fn dispose(mut self) {
        let mut defaults = ::std::mem::replace(&mut self.defaults, Defaults::default());
        defaults.texture.free(&mut self);
        defaults.index.free(&mut self);
        defaults.vertices.free(&mut self);
        defaults.program.free(&mut self);
        debug!("{} torn down.", self.handle);
    }

    #[inline]
    pub(crate) fn set_handle(&mut self, handle: WindowHandle) {
        self.handle = handle;
    }

    #[inline]
    pub(crate) fn device(&mut self) -> &mut dyn DeviceVisitor {
        self.device.as_mut()
    }

    #[inline]
    pub(crate) fn make_current(&self) -> Result<()> {
        self.surface.make_current()
    }

    #[inline]
    pub(crate) fn raise(&self) {
        self.surface.raise();
    }

    /// Shows the rendered frame and clears the next one.
    pub(crate) fn present(&mut self) -> Result<()> {
        self.surface.swap_buffers()?;
        unsafe {
            self.device.clear();
        }

        Ok(())
    }

    /// Fits the drawable and the viewport to the native window.
    pub(crate) fn fit(&mut self) -> Vector2<u32> {
        let dimensions = self.surface.dimensions();
        self.surface.resize(dimensions);
        unsafe {
            self.device.viewport(dimensions);
        }

        debug!("{} resized to {}x{}.", self.handle, dimensions.x, dimensions.y);
        dimensions
    }

    pub(crate) fn forget_program(&mut self, id: ObjectName) {
        if self.state.program == Some(id) {
            self.state.program = None;
            self.state.uniforms = Uniforms::default();
        }
    }

    pub(crate) fn forget_vertices(&mut self, id: ObjectName) {
        if self.state.vertices == Some(id) {
            self.state.vertices = None;
        }
    }

    pub(crate) fn forget_texture(&mut self, id: ObjectName) {
        for v in &mut self.state.textures {
            if *v == Some(id) {
                *v = None;
            }
        }
    }

    fn bind_defaults(&mut self) {
        let program = self.defaults.program.id();
        let vertices = self.defaults.vertices.id();
        let texture = self.defaults.texture.id();

        self.bind_program(program);
        self.bind_vertices(vertices);
        self.bind_texture(0, texture);
    }

    fn bind_program(&mut self, id: ObjectName) {
        if id == 0 || self.state.program == Some(id) {
            return;
        }

        let device = self.device.as_mut();
        let state = &mut self.state;

        unsafe {
            device.use_program(id);

            let mut uniforms = Uniforms {
                world: device.uniform_location(id, "world"),
                local: device.uniform_location(id, "local"),
                camera: device.uniform_location(id, "camera"),
                camera_position: device.uniform_location(id, "camera_position"),
                textures: [-1; MAX_TEXTURE_UNITS],
            };

            for (i, name) in TEXTURE_UNIFORMS.iter().enumerate() {
                uniforms.textures[i] = device.uniform_location(id, name);
            }

            upload_matrix(device, uniforms.world, &state.world);
            upload_matrix(device, uniforms.local, &state.local);
            upload_matrix(device, uniforms.camera, &state.camera);
            if uniforms.camera_position != -1 {
                device.uniform_vector3(uniforms.camera_position, &state.camera_position);
            }

            for (unit, &location) in uniforms.textures.iter().enumerate() {
                if location != -1 {
                    device.uniform_i32(location, unit as i32);
                }
            }

            state.uniforms = uniforms;
        }

        state.program = Some(id);
    }

    fn bind_vertices(&mut self, id: ObjectName) {
        if id == 0 || self.state.vertices == Some(id) {
            return;
        }

        unsafe {
            self.device.bind_vertices(id);
        }

        self.state.vertices = Some(id);
    }

    fn bind_texture(&mut self, unit: usize, id: ObjectName) {
        if id == 0 || unit >= MAX_TEXTURE_UNITS || self.state.textures[unit] == Some(id) {
            return;
        }

        unsafe {
            self.device.bind_texture(unit as u32, id);
        }

        self.state.textures[unit] = Some(id);
    }

    /// Makes sure something drawable is bound, falling back to the defaults
    /// after the bound objects were freed.
    fn ensure_bound(&mut self) {
        if self.state.program.is_none() {
            let id = self.defaults.program.id();
            self.bind_program(id);
        }

        if self.state.vertices.is_none() {
            let id = self.defaults.vertices.id();
            self.bind_vertices(id);
        }
    }

    pub fn set_program(&mut self, program: &Program) {
        self.bind_program(program.id());
    }

    pub fn set_vertices(&mut self, vertices: &Vertices) {
        self.bind_vertices(vertices.id());
    }

    /// Binds `texture` to one of the first `MAX_TEXTURE_UNITS` units. Other
    /// units are ignored with a warning.
    pub fn set_texture(&mut self, unit: usize, texture: &Texture) {
        if unit >= MAX_TEXTURE_UNITS {
            warn!(
                "{} has no texture unit {}, there are {}.",
                self.handle, unit, MAX_TEXTURE_UNITS
            );
            return;
        }

        self.bind_texture(unit, texture.id());
    }

    pub fn set_world(&mut self, matrix: Matrix4<f32>) {
        self.state.world = matrix;
        if self.state.program.is_some() {
            unsafe { upload_matrix(self.device.as_mut(), self.state.uniforms.world, &matrix) };
        }
    }

    pub fn set_local(&mut self, matrix: Matrix4<f32>) {
        self.state.local = matrix;
        if self.state.program.is_some() {
            unsafe { upload_matrix(self.device.as_mut(), self.state.uniforms.local, &matrix) };
        }
    }

    /// Sets the camera transformation, with its eye at `origin`.
    pub fn set_camera_matrix(&mut self, matrix: Matrix4<f32>, origin: Vector3<f32>) {
        self.state.camera = matrix;
        self.state.camera_position = origin;
        self.upload_camera();
    }

    /// Points the camera from `origin` to `target`, with +Z up.
    pub fn set_camera_look_at(&mut self, target: Vector3<f32>, origin: Vector3<f32>) {
        self.state.camera = Matrix4::look_at(
            Point3::from_vec(origin),
            Point3::from_vec(target),
            Vector3::unit_z(),
        );

        self.state.camera_position = origin;
        self.upload_camera();
    }

    fn upload_camera(&mut self) {
        if self.state.program.is_none() {
            return;
        }

        let uniforms = self.state.uniforms;
        unsafe {
            upload_matrix(self.device.as_mut(), uniforms.camera, &self.state.camera);
            if uniforms.camera_position != -1 {
                self.device
                    .uniform_vector3(uniforms.camera_position, &self.state.camera_position);
            }
        }
    }

    pub fn set_clear_color(&mut self, r: u8, g: u8, b: u8) {
        let color = [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ];

        unsafe {
            self.device.set_clear_color(color);
        }
    }

    /// Draws the triangle list `index` with the bound program and vertices.
    pub fn draw(&mut self, index: &Index) {
        if !index.is_valid() {
            return;
        }

        self.ensure_bound();
        unsafe {
            self.device.draw(index.id(), index.len());
        }
    }

    /// Draws the default quad.
    pub fn draw_default(&mut self) {
        let vertices = self.defaults.vertices.id();
        self.bind_vertices(vertices);
        self.ensure_bound();

        unsafe {
            self.device
                .draw(self.defaults.index.id(), self.defaults.index.len());
        }
    }

    /// Draws the default quad moved to `position` and scaled by `scale`. The
    /// local transformation and the vertices bound before are kept.
    pub fn draw_sprite(&mut self, position: Vector3<f32>, scale: Vector3<f32>) {
        let previous = self.state.vertices;
        let vertices = self.defaults.vertices.id();
        self.bind_vertices(vertices);
        self.ensure_bound();

        let local = self.state.uniforms.local;
        let sprite = Matrix4::from_translation(position)
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);

        unsafe {
            upload_matrix(self.device.as_mut(), local, &sprite);
            self.device
                .draw(self.defaults.index.id(), self.defaults.index.len());
            upload_matrix(self.device.as_mut(), local, &self.state.local);
        }

        if let Some(id) = previous {
            self.bind_vertices(id);
        }
    }

    /// Reads the framebuffer back as RGBA pixels, top row first.
    pub fn screenshot(&mut self) -> Result<Image> {
        let dimensions = self.surface.dimensions();
        let data = unsafe { self.device.read_pixels(dimensions)? };

        let mut image = Image::from_raw(dimensions.x, dimensions.y, 4, data)?;
        image.flip_vertically();
        Ok(image)
    }

    /// Toggles fullscreen. The resize callback follows on the next tick.
    pub fn switch_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.surface.set_fullscreen(self.fullscreen);
        self.resize_mark = true;
    }

    /// Marks this window for deletion. It is torn down by the running or
    /// the next tick, after its close callback.
    #[inline]
    pub fn close(&mut self) {
        self.delete_mark = true;
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        self.delete_mark
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Returns the size in pixels of the drawable.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.surface.dimensions()
    }

    #[inline]
    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    #[inline]
    pub fn id(&self) -> SurfaceId {
        self.surface.id()
    }
}

unsafe fn upload_matrix(device: &mut dyn DeviceVisitor, location: i32, value: &Matrix4<f32>) {
    if location != -1 {
        device.uniform_matrix4(location, value);
    }
}
