use std::ffi::CString;
use std::mem;
use std::os::raw::c_void;
use std::ptr;

use gl::types::*;

use crate::errors::*;
use crate::math::{Matrix4, Vector2, Vector3};
use crate::video::assets::texture::TextureParams;
use crate::video::assets::vertices::Vertex;

use super::super::{BufferKind, ObjectName, Visitor, ATTRIBUTES};
use super::types;

/// Draws through an OpenGL 2.1 context. Shaders are GLSL 1.20.
pub struct GLVisitor {}

impl GLVisitor {
    /// The GL functions must have been loaded, and the target context must
    /// be current.
    pub unsafe fn new() -> Result<Self> {
        if !gl::CreateShader::is_loaded() || !gl::GenBuffers::is_loaded() {
            return Err(Error::Init(
                "the OpenGL implementation does not support shader objects.".to_owned(),
            ));
        }

        Ok(GLVisitor {})
    }
}

impl Visitor for GLVisitor {
    unsafe fn setup(&mut self) -> Result<()> {
        gl::Enable(gl::DEPTH_TEST);
        gl::Enable(gl::CULL_FACE);
        gl::CullFace(gl::BACK);

        for &(location, _) in &ATTRIBUTES {
            gl::EnableVertexAttribArray(location);
        }

        gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        check()
    }

    unsafe fn create_program(&mut self, vs: &str, fs: &str) -> Result<ObjectName> {
        let vs = compile(gl::VERTEX_SHADER, vs)?;
        let fs = match compile(gl::FRAGMENT_SHADER, fs) {
            Ok(fs) => fs,
            Err(err) => {
                gl::DeleteShader(vs);
                return Err(err);
            }
        };

        let program = link(vs, fs);

        // Shaders are flagged for deletion, they go away with the program.
        gl::DeleteShader(vs);
        gl::DeleteShader(fs);
        program
    }

    unsafe fn delete_program(&mut self, id: ObjectName) {
        gl::DeleteProgram(id);
    }

    unsafe fn use_program(&mut self, id: ObjectName) {
        gl::UseProgram(id);
    }

    unsafe fn uniform_location(&mut self, id: ObjectName, name: &str) -> i32 {
        match CString::new(name) {
            Ok(c_str) => gl::GetUniformLocation(id, c_str.as_ptr()),
            Err(_) => -1,
        }
    }

    unsafe fn uniform_matrix4(&mut self, location: i32, value: &Matrix4<f32>) {
        let value: &[f32; 16] = value.as_ref();
        gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr());
    }

    unsafe fn uniform_vector3(&mut self, location: i32, value: &Vector3<f32>) {
        gl::Uniform3f(location, value.x, value.y, value.z);
    }

    unsafe fn uniform_i32(&mut self, location: i32, value: i32) {
        gl::Uniform1i(location, value);
    }

    unsafe fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> Result<ObjectName> {
        let (target, binding) = types::buffer(kind);

        let mut previous = 0;
        gl::GetIntegerv(binding, &mut previous);

        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        gl::BindBuffer(target, id);

        if id == 0 || gl::IsBuffer(id) == gl::FALSE {
            gl::BindBuffer(target, previous as GLuint);
            return Err(Error::Resource("glGenBuffers() failed.".to_owned()));
        }

        let value = if data.is_empty() {
            ptr::null()
        } else {
            data.as_ptr() as *const c_void
        };

        gl::BufferData(target, data.len() as GLsizeiptr, value, gl::STATIC_DRAW);

        let mut size = 0;
        gl::GetBufferParameteriv(target, gl::BUFFER_SIZE, &mut size);
        gl::BindBuffer(target, previous as GLuint);

        if size as usize != data.len() {
            gl::DeleteBuffers(1, &id);
            return Err(Error::Resource(format!(
                "buffer holds {} bytes after uploading {}.",
                size,
                data.len()
            )));
        }

        Ok(id)
    }

    unsafe fn delete_buffer(&mut self, id: ObjectName) {
        gl::DeleteBuffers(1, &id);
    }

    unsafe fn bind_vertices(&mut self, id: ObjectName) {
        gl::BindBuffer(gl::ARRAY_BUFFER, id);

        let stride = mem::size_of::<Vertex>() as GLsizei;
        let layout = [
            (3, Vertex::POSITION_OFFSET),
            (4, Vertex::COLOR_OFFSET),
            (2, Vertex::UV_OFFSET),
        ];

        for (&(location, _), &(size, offset)) in ATTRIBUTES.iter().zip(layout.iter()) {
            gl::VertexAttribPointer(
                location,
                size,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    unsafe fn create_texture(&mut self, params: &TextureParams, data: &[u8]) -> Result<ObjectName> {
        let mut previous = 0;
        gl::GetIntegerv(gl::TEXTURE_BINDING_2D, &mut previous);

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        gl::BindTexture(gl::TEXTURE_2D, id);

        if id == 0 || gl::IsTexture(id) == gl::FALSE {
            gl::BindTexture(gl::TEXTURE_2D, previous as GLuint);
            return Err(Error::Resource("glGenTextures() failed.".to_owned()));
        }

        bind_texture_params(params);

        let format: GLenum = params.format.into();
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            format as GLint,
            params.dimensions.x as GLsizei,
            params.dimensions.y as GLsizei,
            0,
            format,
            gl::UNSIGNED_BYTE,
            data.as_ptr() as *const c_void,
        );

        if params.filter.has_mipmaps() {
            generate_mipmap();
        }

        gl::BindTexture(gl::TEXTURE_2D, previous as GLuint);

        if let Err(err) = check() {
            gl::DeleteTextures(1, &id);
            return Err(Error::Resource(format!("{}", err)));
        }

        Ok(id)
    }

    unsafe fn update_texture(
        &mut self,
        id: ObjectName,
        params: &TextureParams,
        position: Vector2<u32>,
        dimensions: Vector2<u32>,
        data: &[u8],
    ) -> Result<()> {
        let mut previous = 0;
        gl::GetIntegerv(gl::TEXTURE_BINDING_2D, &mut previous);
        gl::BindTexture(gl::TEXTURE_2D, id);

        gl::TexSubImage2D(
            gl::TEXTURE_2D,
            0,
            position.x as GLint,
            position.y as GLint,
            dimensions.x as GLsizei,
            dimensions.y as GLsizei,
            params.format.into(),
            gl::UNSIGNED_BYTE,
            data.as_ptr() as *const c_void,
        );

        if params.filter.has_mipmaps() {
            generate_mipmap();
        }

        gl::BindTexture(gl::TEXTURE_2D, previous as GLuint);
        check()
    }

    unsafe fn read_texture(&mut self, id: ObjectName, params: &TextureParams) -> Result<Vec<u8>> {
        let mut previous = 0;
        gl::GetIntegerv(gl::TEXTURE_BINDING_2D, &mut previous);
        gl::BindTexture(gl::TEXTURE_2D, id);

        let mut buf = vec![0u8; params.format.size(params.dimensions)];
        gl::GetTexImage(
            gl::TEXTURE_2D,
            0,
            params.format.into(),
            gl::UNSIGNED_BYTE,
            buf.as_mut_ptr() as *mut c_void,
        );

        gl::BindTexture(gl::TEXTURE_2D, previous as GLuint);
        check()?;
        Ok(buf)
    }

    unsafe fn delete_texture(&mut self, id: ObjectName) {
        gl::DeleteTextures(1, &id);
    }

    unsafe fn bind_texture(&mut self, unit: u32, id: ObjectName) {
        gl::ActiveTexture(gl::TEXTURE0 + unit);
        gl::BindTexture(gl::TEXTURE_2D, id);
    }

    unsafe fn draw(&mut self, id: ObjectName, len: usize) {
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
        gl::DrawElements(
            gl::TRIANGLES,
            len as GLsizei,
            gl::UNSIGNED_SHORT,
            ptr::null(),
        );
    }

    unsafe fn viewport(&mut self, dimensions: Vector2<u32>) {
        gl::Viewport(0, 0, dimensions.x as GLsizei, dimensions.y as GLsizei);
    }

    unsafe fn set_clear_color(&mut self, color: [f32; 4]) {
        gl::ClearColor(color[0], color[1], color[2], color[3]);
    }

    unsafe fn clear(&mut self) {
        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }

    unsafe fn read_pixels(&mut self, dimensions: Vector2<u32>) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; dimensions.x as usize * dimensions.y as usize * 4];
        gl::ReadPixels(
            0,
            0,
            dimensions.x as GLsizei,
            dimensions.y as GLsizei,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            buf.as_mut_ptr() as *mut c_void,
        );

        check()?;
        Ok(buf)
    }
}

unsafe fn compile(shader: GLenum, src: &str) -> Result<GLuint> {
    let c_str = CString::new(src.as_bytes())
        .map_err(|_| Error::Compile("shader source contains a nul byte.".to_owned()))?;

    let id = gl::CreateShader(shader);
    if id == 0 {
        return Err(Error::Resource("glCreateShader() failed.".to_owned()));
    }

    gl::ShaderSource(id, 1, &c_str.as_ptr(), ptr::null());
    gl::CompileShader(id);

    let mut status = GLint::from(gl::FALSE);
    gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len = 0;
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);

        let mut buf = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl::GetShaderInfoLog(id, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        buf.truncate(written.max(0) as usize);

        gl::DeleteShader(id);
        return Err(Error::Compile(String::from_utf8_lossy(&buf).into_owned()));
    }

    Ok(id)
}

unsafe fn link(vs: GLuint, fs: GLuint) -> Result<GLuint> {
    let program = gl::CreateProgram();
    if program == 0 {
        return Err(Error::Resource("glCreateProgram() failed.".to_owned()));
    }

    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);

    for &(location, name) in &ATTRIBUTES {
        if let Ok(c_str) = CString::new(name) {
            gl::BindAttribLocation(program, location, c_str.as_ptr());
        }
    }

    gl::LinkProgram(program);

    let mut status = GLint::from(gl::FALSE);
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len: GLint = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);

        let mut buf = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl::GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        buf.truncate(written.max(0) as usize);

        gl::DeleteProgram(program);
        return Err(Error::Link(String::from_utf8_lossy(&buf).into_owned()));
    }

    Ok(program)
}

unsafe fn bind_texture_params(params: &TextureParams) {
    let wrap: GLenum = params.wrap.into();
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap as GLint);

    let (min, mag) = types::filter(params.filter);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, min as GLint);
    gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, mag as GLint);
}

unsafe fn generate_mipmap() {
    if gl::GenerateMipmap::is_loaded() {
        gl::GenerateMipmap(gl::TEXTURE_2D);
    } else {
        warn!("glGenerateMipmap is not available, mipmaps left undefined.");
    }
}

unsafe fn check() -> Result<()> {
    let err = match gl::GetError() {
        gl::NO_ERROR => return Ok(()),
        gl::INVALID_ENUM => "an unacceptable value is specified for an enumerated argument.",
        gl::INVALID_VALUE => "a numeric argument is out of range.",
        gl::INVALID_OPERATION => "the specified operation is not allowed in the current state.",
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            "the currently bound framebuffer is not framebuffer complete."
        }
        gl::OUT_OF_MEMORY => "there is not enough memory left to execute the command.",
        _ => "unknown OpenGL error.",
    };

    Err(Error::Resource(format!("[GL] {}", err)))
}
