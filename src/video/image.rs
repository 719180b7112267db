//! In-memory pixel images, decoded from and encoded to files through the
//! `image` crate.

use std::path::Path;

use ::image::{ColorType, GenericImage};

use crate::errors::*;

/// The storage type of a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    U8,
    U16,
    F32,
}

impl ImageFormat {
    #[inline]
    pub fn size(self) -> usize {
        match self {
            ImageFormat::U8 => 1,
            ImageFormat::U16 => 2,
            ImageFormat::F32 => 4,
        }
    }
}

/// Rows are stored top-down, channels interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl Image {
    /// Creates a zero-filled 8-bits image.
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Image {
            width,
            height,
            channels,
            format: ImageFormat::U8,
            data: vec![0; len],
        }
    }

    /// Wraps 8-bits pixels, which must cover the whole image exactly.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::Image(format!(
                "{}x{}x{} image needs {} bytes, got {}.",
                width,
                height,
                channels,
                expected,
                data.len()
            )));
        }

        Ok(Image {
            width,
            height,
            channels,
            format: ImageFormat::U8,
            data,
        })
    }

    /// Decodes an image file. Gray, gray-alpha, RGB and RGBA layouts keep
    /// their channels and depth, anything else is converted to 8-bits RGBA.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dynamic = ::image::open(path.as_ref())?;
        let (width, height) = dynamic.dimensions();

        let (channels, format) = match dynamic.color() {
            ColorType::Gray(8) => (1, ImageFormat::U8),
            ColorType::GrayA(8) => (2, ImageFormat::U8),
            ColorType::RGB(8) => (3, ImageFormat::U8),
            ColorType::RGBA(8) => (4, ImageFormat::U8),
            ColorType::Gray(16) => (1, ImageFormat::U16),
            ColorType::GrayA(16) => (2, ImageFormat::U16),
            ColorType::RGB(16) => (3, ImageFormat::U16),
            ColorType::RGBA(16) => (4, ImageFormat::U16),
            _ => {
                let data = dynamic.to_rgba().into_raw();
                return Ok(Image {
                    width,
                    height,
                    channels: 4,
                    format: ImageFormat::U8,
                    data,
                });
            }
        };

        Ok(Image {
            width,
            height,
            channels,
            format,
            data: dynamic.raw_pixels(),
        })
    }

    /// Encodes into a file, with the format picked from its extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.format != ImageFormat::U8 {
            return Err(Error::UnsupportedFormat(format!(
                "saving {:?} images",
                self.format
            )));
        }

        let color = match self.channels {
            1 => ColorType::Gray(8),
            2 => ColorType::GrayA(8),
            3 => ColorType::RGB(8),
            4 => ColorType::RGBA(8),
            n => {
                return Err(Error::UnsupportedFormat(format!("{} channels", n)));
            }
        };

        ::image::save_buffer(path.as_ref(), &self.data, self.width, self.height, color)
            .map_err(|err| Error::Image(format!("{}", err)))
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize * self.format.size()
    }

    /// Returns the channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let size = self.channels as usize * self.format.size();
        let start = y as usize * self.stride() + x as usize * size;
        self.data.get(start..start + size)
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let size = self.channels as usize * self.format.size();
        let start = y as usize * self.stride() + x as usize * size;
        self.data.get_mut(start..start + size)
    }

    /// Reverses the row order in place.
    pub fn flip_vertically(&mut self) {
        let stride = self.stride();
        let rows = self.height as usize;

        for y in 0..rows / 2 {
            let (top, bottom) = self.data.split_at_mut((rows - y - 1) * stride);
            top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
        }
    }
}
