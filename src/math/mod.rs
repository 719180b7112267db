//! This module contains the math utils that mainly comes from `cgmath`, plus
//! axis-aligned bounding volumes and colors.

pub use cgmath::*;

pub mod aabb;
pub use self::aabb::{AabBox, AabRect, Circle, Sphere};

pub mod color;
pub use self::color::{Rgb, Rgba};

/// The forward, left and up axes described by `angle`, which holds the
/// pitch (x), roll (y) and yaw (z) in degrees.
pub fn vector_axes(angle: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let (sx, cx) = Rad::from(Deg(angle.x)).0.sin_cos();
    let (sy, cy) = Rad::from(Deg(angle.y)).0.sin_cos();
    let (sz, cz) = Rad::from(Deg(angle.z)).0.sin_cos();

    let forward = Vector3::new(sz * -sx, cz * -sx, -cx);

    let left = Vector3::new(
        (sz * sy * sx) + (cy * cz),
        (cz * sy * sx) + (cy * -sz),
        sx * sy,
    );

    let up = Vector3::new(
        (sz * cy * cx) - (sy * cz),
        (cz * cy * cx) + (sy * sz),
        -sx * cy,
    );

    (forward, left, up)
}

#[cfg(test)]
mod test {
    use super::*;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn axes_at_rest() {
        let (forward, left, up) = vector_axes(Vector3::new(0.0, 0.0, 0.0));
        assert!(approx(forward, Vector3::new(0.0, 0.0, -1.0)));
        assert!(approx(left, Vector3::new(1.0, 0.0, 0.0)));
        assert!(approx(up, Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn axes_are_orthonormal() {
        let (forward, left, up) = vector_axes(Vector3::new(30.0, 0.0, 45.0));
        assert!((forward.magnitude() - 1.0).abs() < 1e-5);
        assert!((left.magnitude() - 1.0).abs() < 1e-5);
        assert!((up.magnitude() - 1.0).abs() < 1e-5);
        assert!(forward.dot(left).abs() < 1e-5);
        assert!(forward.dot(up).abs() < 1e-5);
    }
}
