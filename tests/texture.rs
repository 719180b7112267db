extern crate kansai;
extern crate rand;

use std::env;

use kansai::prelude::*;
use kansai::video::ImageFormat;
use kansai::window::backends::headless;

fn noise(width: u32, height: u32, channels: u8) -> Image {
    let len = width as usize * height as usize * channels as usize;
    let data = (0..len).map(|_| rand::random::<u8>()).collect();
    Image::from_raw(width, height, channels, data).unwrap()
}

struct Script<F>(Option<F>);

impl<F: FnOnce(&mut Window)> Sketch for Script<F> {
    fn init(&mut self, window: &mut Window) -> SketchResult {
        if let Some(func) = self.0.take() {
            func(window);
        }

        Ok(())
    }
}

fn run<F: FnOnce(&mut Window) + 'static>(func: F) {
    let (platform, _) = headless::new();
    let mut ctx = Context::new(Box::new(platform));
    ctx.start().unwrap();
    ctx.create_window(None, Script(Some(func))).unwrap();
}

#[test]
fn update_and_read_back() {
    run(|window| {
        let image = noise(16, 16, 4);
        let mut texture = Texture::new(window, &image, Filter::Trilinear, Wrap::Repeat).unwrap();
        assert_eq!(texture.read(window).unwrap(), image);

        let patch = noise(4, 3, 4);
        texture.update(window, &patch, 5, 7).unwrap();

        let back = texture.read(window).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                let expected = if x >= 5 && x < 9 && y >= 7 && y < 10 {
                    patch.pixel(x - 5, y - 7)
                } else {
                    image.pixel(x, y)
                };

                assert_eq!(back.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }

        texture.free(window);
        assert!(!texture.is_valid());
        assert!(texture.read(window).is_err());
    });
}

#[test]
fn every_channel_layout() {
    run(|window| {
        for channels in 1..5 {
            let image = noise(3, 5, channels);
            let mut texture = Texture::new(window, &image, Filter::None, Wrap::Clamp).unwrap();
            assert_eq!(texture.params().format.channels(), channels);
            assert_eq!(texture.read(window).unwrap(), image);
            texture.free(window);
        }
    });
}

#[test]
fn rejects_unsupported_images() {
    run(|window| {
        let mut image = noise(2, 2, 4);
        image.format = ImageFormat::U16;
        match Texture::new(window, &image, Filter::None, Wrap::Clamp) {
            Err(Error::UnsupportedFormat(_)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let image = Image::new(2, 2, 5);
        match Texture::new(window, &image, Filter::None, Wrap::Clamp) {
            Err(Error::UnsupportedFormat(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    });
}

#[test]
fn rejects_bad_updates() {
    run(|window| {
        let image = noise(8, 8, 3);
        let mut texture = Texture::new(window, &image, Filter::Bilinear, Wrap::Repeat).unwrap();

        let patch = noise(4, 4, 4);
        match texture.update(window, &patch, 0, 0) {
            Err(Error::UnsupportedFormat(_)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let patch = noise(4, 4, 3);
        match texture.update(window, &patch, 5, 0) {
            Err(Error::Resource(_)) => {}
            other => panic!("unexpected {:?}", other),
        }

        // Failed updates leave the pixels alone.
        assert_eq!(texture.read(window).unwrap(), image);
        texture.free(window);
    });
}

#[test]
fn from_file() {
    let path = env::temp_dir().join(format!("kansai-texture-{}.png", rand::random::<u32>()));
    let image = noise(6, 4, 3);
    image.save(&path).unwrap();

    let expected = image.clone();
    let file = path.clone();
    run(move |window| {
        let mut texture = Texture::from_file(window, &file, Filter::None, Wrap::Clamp).unwrap();
        assert_eq!(texture.dimensions().x, 6);
        assert_eq!(texture.dimensions().y, 4);
        assert_eq!(texture.read(window).unwrap(), expected);
        texture.free(window);
    });

    let _ = std::fs::remove_file(&path);
}
