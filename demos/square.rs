extern crate env_logger;
extern crate kansai;

use std::env;
use std::process;

use kansai::math::{ortho, Deg, InnerSpace, Matrix4, SquareMatrix, Vector2, Vector3};
use kansai::prelude::*;

const EPSILON: f32 = 0.1;

struct Square {
    position: Vector2<f32>,
    rng: Xorshift,
    start_press: bool,
}

impl Sketch for Square {
    fn init(&mut self, window: &mut Window) -> SketchResult {
        window.set_world(Matrix4::identity());
        window.set_camera_matrix(
            ortho(-0.5, 0.5, -0.5, 0.5, 0.0, 2.0),
            Vector3::new(0.0, 0.0, 0.0),
        );

        Ok(())
    }

    fn frame(&mut self, window: &mut Window, events: &Events, delta: f32) -> SketchResult {
        if events.pad.magnitude() > EPSILON {
            self.position += events.pad.normalize() * 0.01 * delta;
        }

        if !events.start {
            self.start_press = false;
        } else if !self.start_press {
            self.start_press = true;
            let color = Rgb::random(&mut self.rng).to_bytes();
            window.set_clear_color(color[0], color[1], color[2]);
        }

        let translation = Vector3::new(self.position.x, self.position.y, 0.0);
        window.set_local(Matrix4::from_translation(translation) * Matrix4::from_angle_z(Deg(45.0)));
        window.draw_default();
        Ok(())
    }

    fn keyboard(&mut self, window: &mut Window, key: Key, gesture: Gesture) -> SketchResult {
        if key == Key::F11 && gesture == Gesture::Released {
            window.switch_fullscreen();
        }

        Ok(())
    }
}

fn run() -> Result<()> {
    let mut config = Configuration::new();
    config.set("kansai.caption", "Square");
    config.merge(&Configuration::from_args(env::args().skip(1)));

    let mut ctx = Context::new(kansai::window::backends::new());
    ctx.start()?;

    let square = Square {
        position: Vector2::new(0.0, 0.0),
        rng: Xorshift::new(0),
        start_press: false,
    };

    ctx.create_window(Some(&config), square)?;
    while ctx.update()? == Status::Running {}

    ctx.stop();
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Square: {}", err);
        process::exit(1);
    }
}
