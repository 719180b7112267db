use crate::context::Window;
use crate::errors::*;
use crate::video::backends::ObjectName;

/// A linked vertex and fragment shader pair.
///
/// The attributes `vertex_position`, `vertex_color` and `vertex_uv` are bound
/// to the locations the vertex layout uses before linking. The uniforms
/// `world`, `local`, `camera`, `camera_position` and `texture0` to `texture7`
/// are fed by the window when the program is bound; all of them are optional.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Program {
    id: ObjectName,
}

impl Program {
    /// Compiles and links GLSL sources. Fails with `Error::Compile` or
    /// `Error::Link` carrying the driver log.
    pub fn new(window: &mut Window, vs: &str, fs: &str) -> Result<Self> {
        let id = unsafe { window.device().create_program(vs, fs)? };
        Ok(Program { id })
    }

    /// Deletes the GPU program. Freeing twice is a no-op.
    pub fn free(&mut self, window: &mut Window) {
        if self.id == 0 {
            return;
        }

        unsafe {
            window.device().delete_program(self.id);
        }

        window.forget_program(self.id);
        self.id = 0;
    }

    #[inline]
    pub fn id(&self) -> ObjectName {
        self.id
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.id != 0
    }
}
