//! Axis-aligned rectangles and boxes, with the overlap tests sketches use
//! for cheap collision detection. All tests are inclusive: touching edges
//! count as a collision.

use cgmath::{Vector2, Vector3};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabRect {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

/// An axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub origin: Vector2<f32>,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub origin: Vector3<f32>,
    pub radius: f32,
}

impl AabRect {
    #[inline]
    pub fn new(min: Vector2<f32>, max: Vector2<f32>) -> Self {
        AabRect { min, max }
    }

    pub fn collides(&self, other: &AabRect) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Tests against the rectangle grown by the circle radius, so corners
    /// are treated as square.
    pub fn collides_circle(&self, circle: &Circle) -> bool {
        let o = circle.origin;
        let r = circle.radius;

        !(o.x < self.min.x - r || o.x > self.max.x + r || o.y < self.min.y - r || o.y > self.max.y + r)
    }

    /// Extrudes this rectangle into a box spanning `min_z..max_z`.
    pub fn to_box(&self, min_z: f32, max_z: f32) -> AabBox {
        AabBox {
            min: self.min.extend(min_z),
            max: self.max.extend(max_z),
        }
    }

    pub fn middle(&self) -> Vector2<f32> {
        self.min + (self.max - self.min) / 2.0
    }
}

impl AabBox {
    #[inline]
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        AabBox { min, max }
    }

    pub fn collides(&self, other: &AabBox) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    pub fn collides_sphere(&self, sphere: &Sphere) -> bool {
        let o = sphere.origin;
        let r = sphere.radius;

        !(o.x < self.min.x - r
            || o.x > self.max.x + r
            || o.y < self.min.y - r
            || o.y > self.max.y + r
            || o.z < self.min.z - r
            || o.z > self.max.z + r)
    }

    /// Drops the z axis.
    pub fn to_rect(&self) -> AabRect {
        AabRect {
            min: self.min.truncate(),
            max: self.max.truncate(),
        }
    }

    pub fn middle(&self) -> Vector3<f32> {
        self.min + (self.max - self.min) / 2.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> AabRect {
        AabRect::new(Vector2::new(x0, y0), Vector2::new(x1, y1))
    }

    #[test]
    fn rect_rect() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        assert!(a.collides(&rect(0.5, 0.5, 2.0, 2.0)));
        assert!(a.collides(&rect(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.collides(&rect(1.1, 0.0, 2.0, 1.0)));
        assert!(!a.collides(&rect(0.0, -2.0, 1.0, -0.1)));
    }

    #[test]
    fn rect_circle() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let hit = Circle {
            origin: Vector2::new(1.4, 0.5),
            radius: 0.5,
        };
        let miss = Circle {
            origin: Vector2::new(1.6, 0.5),
            radius: 0.5,
        };
        assert!(a.collides_circle(&hit));
        assert!(!a.collides_circle(&miss));
    }

    #[test]
    fn box_box_and_sphere() {
        let a = AabBox::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let b = AabBox::new(Vector3::new(0.5, 0.5, 1.5), Vector3::new(2.0, 2.0, 2.0));
        assert!(!a.collides(&b));
        assert!(a.collides(&AabBox::new(Vector3::new(0.5, 0.5, 0.5), Vector3::new(2.0, 2.0, 2.0))));

        let s = Sphere {
            origin: Vector3::new(0.5, 0.5, 1.25),
            radius: 0.3,
        };
        assert!(a.collides_sphere(&s));
        assert!(!b.collides_sphere(&Sphere {
            origin: Vector3::new(0.0, 0.0, 0.0),
            radius: 0.1,
        }));
    }

    #[test]
    fn conversions() {
        let a = rect(-1.0, -2.0, 3.0, 4.0);
        let b = a.to_box(0.0, 2.0);
        assert_eq!(b.min, Vector3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Vector3::new(3.0, 4.0, 2.0));
        assert_eq!(b.to_rect(), a);
        assert_eq!(a.middle(), Vector2::new(1.0, 1.0));
        assert_eq!(b.middle(), Vector3::new(1.0, 1.0, 1.0));
    }
}
