//! The objects every window owns and falls back to.

use crate::video::assets::vertices::Vertex;

pub const VERTEX_SHADER: &str = "#version 120

attribute vec3 vertex_position;
attribute vec4 vertex_color;
attribute vec2 vertex_uv;

uniform mat4 world;
uniform mat4 camera;
uniform mat4 local;

varying vec4 color;
varying vec2 uv;

void main()
{
    color = vertex_color;
    uv = vertex_uv;
    gl_Position = world * camera * local * vec4(vertex_position, 1.0);
}
";

pub const FRAGMENT_SHADER: &str = "#version 120

uniform sampler2D texture0;

varying vec4 color;
varying vec2 uv;

vec4 overlay(vec4 a, vec4 b)
{
    return mix(1.0 - 2.0 * (1.0 - a) * (1.0 - b), 2.0 * a * b, step(a, vec4(0.5)));
}

void main()
{
    gl_FragColor = overlay(color, texture2D(texture0, uv));
}
";

/// A unit quad centered at the origin.
pub fn quad() -> [Vertex; 4] {
    [
        Vertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0, 1.0], [0.0, 1.0]),
        Vertex::new([-0.5, 0.5, 0.0], [0.0, 1.0, 0.0, 1.0], [0.0, 0.0]),
        Vertex::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0, 1.0], [1.0, 0.0]),
        Vertex::new([0.5, -0.5, 0.0], [0.5, 0.5, 0.5, 1.0], [1.0, 1.0]),
    ]
}

pub const QUAD_INDICES: [u16; 6] = [2, 1, 0, 3, 2, 0];

/// A 2x2 luminance checker.
pub const PLACEHOLDER: [u8; 4] = [144, 112, 112, 144];
