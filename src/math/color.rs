use crate::random::Xorshift;

/// A RGB color. Each component is a floating point value in `0..1`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A RGB color with alpha.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// Converts from hue, saturation and value, all of them in `0..1`.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let c = v * s;
        let h1 = (h * 360.0) / 60.0;
        let x = c * (1.0 - ((h1 % 2.0) - 1.0).abs());

        let (r, g, b) = if h1 < 0.0 {
            (0.0, 0.0, 0.0)
        } else if h1 < 1.0 {
            (c, x, 0.0)
        } else if h1 < 2.0 {
            (x, c, 0.0)
        } else if h1 < 3.0 {
            (0.0, c, x)
        } else if h1 < 4.0 {
            (0.0, x, c)
        } else if h1 < 5.0 {
            (x, 0.0, c)
        } else if h1 <= 6.0 {
            (c, 0.0, x)
        } else {
            (0.0, 0.0, 0.0)
        };

        let m = v - c;
        Rgb::new(r + m, g + m, b + m)
    }

    /// A color with random hue, saturation and value.
    pub fn random(rng: &mut Xorshift) -> Self {
        let h = rng.next_f32();
        let s = rng.next_f32();
        let v = rng.next_f32();
        Rgb::from_hsv(h, s, v)
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Quantizes into 8-bits channels.
    pub fn to_bytes(self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

impl Rgba {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn from_hsv(h: f32, s: f32, v: f32, a: f32) -> Self {
        Rgb::from_hsv(h, s, v).with_alpha(a)
    }

    pub fn random(rng: &mut Xorshift, a: f32) -> Self {
        Rgb::random(rng).with_alpha(a)
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(v: Rgba) -> Self {
        [v.r, v.g, v.b, v.a]
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}
