use std::path::Path;

use crate::context::Window;
use crate::errors::*;
use crate::math::Vector2;
use crate::video::backends::ObjectName;
use crate::video::image::{Image, ImageFormat};

/// How texels are sampled when the texture is minified or magnified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// Smooth, sampling the nearest mipmap.
    Bilinear,
    /// Smooth, blending between mipmaps.
    Trilinear,
    /// Blocky, sampling the nearest mipmap.
    PixelBilinear,
    /// Blocky, blending between mipmaps.
    PixelTrilinear,
    /// Blocky, without mipmaps.
    None,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Bilinear
    }
}

impl Filter {
    #[inline]
    pub fn has_mipmaps(self) -> bool {
        self != Filter::None
    }
}

/// How texture coordinates outside `0..1` are resolved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wrap {
    Repeat,
    Clamp,
    MirroredRepeat,
}

impl Default for Wrap {
    fn default() -> Self {
        Wrap::Repeat
    }
}

/// The pixel layouts a texture could hold, all of them with 8-bits channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Luminance,
    LuminanceAlpha,
    Rgb,
    Rgba,
}

impl TextureFormat {
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(TextureFormat::Luminance),
            2 => Some(TextureFormat::LuminanceAlpha),
            3 => Some(TextureFormat::Rgb),
            4 => Some(TextureFormat::Rgba),
            _ => None,
        }
    }

    #[inline]
    pub fn channels(self) -> u8 {
        match self {
            TextureFormat::Luminance => 1,
            TextureFormat::LuminanceAlpha => 2,
            TextureFormat::Rgb => 3,
            TextureFormat::Rgba => 4,
        }
    }

    /// Bytes a `dimensions` sized rectangle of this format occupies.
    #[inline]
    pub fn size(self, dimensions: Vector2<u32>) -> usize {
        dimensions.x as usize * dimensions.y as usize * self.channels() as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureParams {
    pub format: TextureFormat,
    pub dimensions: Vector2<u32>,
    pub filter: Filter,
    pub wrap: Wrap,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            format: TextureFormat::Rgba,
            dimensions: Vector2::new(0, 0),
            filter: Filter::default(),
            wrap: Wrap::default(),
        }
    }
}

fn format_of(image: &Image) -> Result<TextureFormat> {
    if image.format != ImageFormat::U8 {
        return Err(Error::UnsupportedFormat(format!(
            "{:?} samples",
            image.format
        )));
    }

    let format = TextureFormat::from_channels(image.channels)
        .ok_or_else(|| Error::UnsupportedFormat(format!("{} channels", image.channels)))?;

    let dimensions = Vector2::new(image.width, image.height);
    if image.data.len() != format.size(dimensions) {
        return Err(Error::Image(format!(
            "{}x{} image holds {} bytes, {} expected.",
            image.width,
            image.height,
            image.data.len(),
            format.size(dimensions)
        )));
    }

    Ok(format)
}

/// A 2D texture living in the context of one window.
#[derive(Debug, Default, PartialEq)]
pub struct Texture {
    id: ObjectName,
    params: TextureParams,
}

impl Texture {
    pub fn new(window: &mut Window, image: &Image, filter: Filter, wrap: Wrap) -> Result<Self> {
        let params = TextureParams {
            format: format_of(image)?,
            dimensions: Vector2::new(image.width, image.height),
            filter,
            wrap,
        };

        let id = unsafe { window.device().create_texture(&params, &image.data)? };
        Ok(Texture { id, params })
    }

    /// Decodes an image file into a new texture.
    pub fn from_file<P: AsRef<Path>>(
        window: &mut Window,
        path: P,
        filter: Filter,
        wrap: Wrap,
    ) -> Result<Self> {
        let image = Image::open(path)?;
        Texture::new(window, &image, filter, wrap)
    }

    /// Replaces the rectangle at `(x, y)` with `image`, which must share the
    /// channel layout of this texture.
    pub fn update(&mut self, window: &mut Window, image: &Image, x: u32, y: u32) -> Result<()> {
        if !self.is_valid() {
            return Err(Error::Resource("the texture has been freed.".to_owned()));
        }

        let format = format_of(image)?;
        if format != self.params.format {
            return Err(Error::UnsupportedFormat(format!(
                "{:?} pixels into a {:?} texture",
                format, self.params.format
            )));
        }

        let dims = self.params.dimensions;
        if u64::from(x) + u64::from(image.width) > u64::from(dims.x)
            || u64::from(y) + u64::from(image.height) > u64::from(dims.y)
        {
            return Err(Error::Resource(format!(
                "{}x{} at ({}, {}) is out of the {}x{} texture bounds.",
                image.width, image.height, x, y, dims.x, dims.y
            )));
        }

        unsafe {
            window.device().update_texture(
                self.id,
                &self.params,
                Vector2::new(x, y),
                Vector2::new(image.width, image.height),
                &image.data,
            )
        }
    }

    /// Reads the pixels of the base level back.
    pub fn read(&self, window: &mut Window) -> Result<Image> {
        if !self.is_valid() {
            return Err(Error::Resource("the texture has been freed.".to_owned()));
        }

        let data = unsafe { window.device().read_texture(self.id, &self.params)? };
        let dims = self.params.dimensions;
        Image::from_raw(dims.x, dims.y, self.params.format.channels(), data)
    }

    /// Deletes the GPU texture. Freeing twice is a no-op.
    pub fn free(&mut self, window: &mut Window) {
        if !self.is_valid() {
            return;
        }

        unsafe {
            window.device().delete_texture(self.id);
        }

        window.forget_texture(self.id);
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

    #[inline]
    pub fn params(&self) -> &TextureParams {
        &self.params
    }

    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.params.dimensions
    }
}
