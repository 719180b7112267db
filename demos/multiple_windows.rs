extern crate env_logger;
extern crate kansai;

use std::process;

use kansai::math::{Matrix4, SquareMatrix, Vector2, Vector3};
use kansai::prelude::*;

struct Wanderer {
    id: usize,
    phase: f32,
    screenshots: usize,
}

impl Wanderer {
    fn new(id: usize) -> Self {
        Wanderer {
            id,
            phase: 0.0,
            screenshots: 0,
        }
    }
}

impl Sketch for Wanderer {
    fn frame(&mut self, window: &mut Window, _: &Events, delta: f32) -> SketchResult {
        let position = Vector3::new(self.phase.sin(), (self.phase / 4.0).sin(), 0.0);
        window.set_local(Matrix4::from_translation(position));
        window.draw_default();

        self.phase += 0.125 * delta;

        if self.id == 0 {
            window.set_local(Matrix4::identity());
            window.draw_default();
        }

        Ok(())
    }

    fn resize(&mut self, _: &mut Window, dimensions: Vector2<u32>) -> SketchResult {
        println!("Window {} resized to {}, {}", self.id, dimensions.x, dimensions.y);
        Ok(())
    }

    fn keyboard(&mut self, window: &mut Window, key: Key, gesture: Gesture) -> SketchResult {
        println!("Window {}, {:?} key {:?}", self.id, gesture, key);

        if window.is_focused() && key == Key::F12 && gesture == Gesture::Released {
            let filename = format!("Multiple windows ({}{}).png", self.id, self.screenshots);
            self.screenshots += 1;
            window.screenshot()?.save(&filename)?;
        }

        Ok(())
    }

    fn close(&mut self, _: &mut Window) -> SketchResult {
        println!("Close request for window {}...", self.id);
        Ok(())
    }
}

fn run() -> Result<()> {
    let mut ctx = Context::new(kansai::window::backends::new());
    ctx.start()?;

    ctx.create_window(None, Wanderer::new(0))?;
    ctx.create_window(None, Wanderer::new(1))?;
    while ctx.update()? == Status::Running {
        ctx.sleep(1);
    }

    ctx.stop();
    Ok(())
}

fn main() {
    env_logger::init();
    println!("Multiple windows");
    println!(" - kansai {}", kansai::version());

    if let Err(err) = run() {
        eprintln!("Multiple windows: {}", err);
        process::exit(1);
    }
}
