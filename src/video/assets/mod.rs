//! The render objects a sketch owns. Each wraps exactly one GPU object of
//! the window it was created with, and must be freed with that window.

pub mod program;
pub mod texture;
pub mod vertices;

pub mod prelude {
    pub use super::program::Program;
    pub use super::texture::{Filter, Texture, TextureFormat, TextureParams, Wrap};
    pub use super::vertices::{Index, Vertex, Vertices};
}
