#[macro_use]
extern crate failure;
extern crate kansai;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kansai::config::Configuration;
use kansai::math::Vector2;
use kansai::prelude::*;
use kansai::window::backends::headless::{self, Probe};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Init,
    Frame { a: bool, delta: f32 },
    Resize(u32, u32),
    Keyboard(Key, Gesture),
    Close,
}

type Log = Rc<RefCell<Vec<Call>>>;

#[derive(Default)]
struct Recorder {
    log: Log,
    close_on_frame: bool,
    fail_on_frame: bool,
    fail_on_resize: Rc<Cell<bool>>,
    fail_on_close: bool,
    bad_shader: bool,
    unlinked_shader: bool,
}

impl Recorder {
    fn new() -> (Self, Log) {
        let log = Log::default();
        let recorder = Recorder {
            log: log.clone(),
            ..Default::default()
        };

        (recorder, log)
    }
}

impl Sketch for Recorder {
    fn init(&mut self, window: &mut Window) -> SketchResult {
        self.log.borrow_mut().push(Call::Init);
        if self.bad_shader {
            Program::new(window, "void main() { gl_Position = vec4(1.0);", "void main() {}")?;
        }

        if self.unlinked_shader {
            Program::new(window, "void main() {}", "void main() {}")?;
        }

        Ok(())
    }

    fn frame(&mut self, window: &mut Window, events: &Events, delta: f32) -> SketchResult {
        self.log
            .borrow_mut()
            .push(Call::Frame { a: events.a, delta });

        if self.close_on_frame {
            window.close();
        }

        if self.fail_on_frame {
            bail!("frame failed on purpose");
        }

        Ok(())
    }

    fn resize(&mut self, _: &mut Window, dimensions: Vector2<u32>) -> SketchResult {
        self.log
            .borrow_mut()
            .push(Call::Resize(dimensions.x, dimensions.y));

        if self.fail_on_resize.get() {
            bail!("resize failed on purpose");
        }

        Ok(())
    }

    fn keyboard(&mut self, _: &mut Window, key: Key, gesture: Gesture) -> SketchResult {
        self.log.borrow_mut().push(Call::Keyboard(key, gesture));
        Ok(())
    }

    fn close(&mut self, _: &mut Window) -> SketchResult {
        self.log.borrow_mut().push(Call::Close);

        if self.fail_on_close {
            bail!("close failed on purpose");
        }

        Ok(())
    }
}

fn setup() -> (Context, Probe) {
    let (platform, probe) = headless::new();
    let mut ctx = Context::new(Box::new(platform));
    ctx.start().unwrap();
    (ctx, probe)
}

fn frames(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|v| match v {
            Call::Frame { .. } => true,
            _ => false,
        })
        .count()
}

#[test]
fn windows_survive_updates() {
    let (mut ctx, probe) = setup();

    for n in 1..=MAX_WINDOWS {
        ctx.create_window(None, Recorder::default()).unwrap();
        assert_eq!(ctx.len(), n);
    }

    for _ in 0..MAX_WINDOWS {
        assert_eq!(ctx.update().unwrap(), Status::Running);
    }

    assert_eq!(ctx.len(), MAX_WINDOWS);
    assert_eq!(ctx.frame(), MAX_WINDOWS as u64);
    assert_eq!(probe.open_surfaces().len(), MAX_WINDOWS);
}

#[test]
fn capacity() {
    let (mut ctx, probe) = setup();

    let handles: Vec<_> = (0..MAX_WINDOWS)
        .map(|_| ctx.create_window(None, Recorder::default()).unwrap())
        .collect();

    let (recorder, log) = Recorder::new();
    match ctx.create_window(None, recorder) {
        Err(Error::Capacity(n)) => assert_eq!(n, MAX_WINDOWS),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }

    assert!(log.borrow().is_empty());
    assert_eq!(ctx.len(), MAX_WINDOWS);
    assert_eq!(probe.open_surfaces().len(), MAX_WINDOWS);
    assert!(handles.iter().all(|&v| ctx.is_alive(v)));

    // The slot is reusable once a window is gone.
    ctx.delete(handles[1]).unwrap();
    ctx.update().unwrap();
    assert!(!ctx.is_alive(handles[1]));
    assert!(ctx.create_window(None, Recorder::default()).is_ok());
}

#[test]
fn init_then_resize() {
    let (mut ctx, probe) = setup();

    let mut config = Configuration::new();
    config.set("render.width", 800);
    config.set("kansai.caption", "Recorder");

    let (recorder, log) = Recorder::new();
    let handle = ctx.create_window(Some(&config), recorder).unwrap();

    assert_eq!(*log.borrow(), vec![Call::Init, Call::Resize(800, 480)]);
    assert_eq!(ctx.focused(), Some(handle));

    let record = probe.surface(ctx.surface(handle).unwrap()).unwrap();
    assert_eq!(record.title, "Recorder");
    assert_eq!(record.dimensions, Vector2::new(800, 480));
    assert_eq!(record.raised, 1);
}

#[test]
fn delete_before_tick() {
    let (mut ctx, probe) = setup();

    let (recorder, log) = Recorder::new();
    let victim = ctx.create_window(None, recorder).unwrap();
    let other = ctx.create_window(None, Recorder::default()).unwrap();
    let id = ctx.surface(victim).unwrap();
    ctx.focus(victim).unwrap();
    log.borrow_mut().clear();

    probe.resize(id, 800, 600);
    probe.press(Key::A);
    ctx.delete(victim).unwrap();

    assert_eq!(ctx.update().unwrap(), Status::Running);
    assert_eq!(*log.borrow(), vec![Call::Close]);
    assert!(!ctx.is_alive(victim));
    assert!(ctx.is_alive(other));
    assert_eq!(ctx.focused(), None);
    assert!(!probe.surface(id).unwrap().open);

    match ctx.delete(victim) {
        Err(Error::WindowNotExists(v)) => assert_eq!(v, victim),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn closed_by_platform() {
    let (mut ctx, probe) = setup();

    let (recorder, log) = Recorder::new();
    let handle = ctx.create_window(None, recorder).unwrap();
    log.borrow_mut().clear();

    probe.close(ctx.surface(handle).unwrap());
    assert_eq!(ctx.update().unwrap(), Status::Closed);
    assert_eq!(*log.borrow(), vec![Call::Close]);
    assert!(ctx.is_empty());
    assert!(probe.open_surfaces().is_empty());
}

#[test]
fn delete_within_tick() {
    let (mut ctx, probe) = setup();

    let (mut recorder, log) = Recorder::new();
    recorder.close_on_frame = true;
    let handle = ctx.create_window(None, recorder).unwrap();
    ctx.create_window(None, Recorder::default()).unwrap();
    ctx.focus(handle).unwrap();
    log.borrow_mut().clear();

    probe.press(Key::Return);
    assert_eq!(ctx.update().unwrap(), Status::Running);

    // No key transitions after the mark, and the slot is vacated right away.
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Frame {
                a: true,
                delta: 0.0
            },
            Call::Close
        ]
    );

    assert!(!ctx.is_alive(handle));
    assert_eq!(ctx.len(), 1);
    assert_eq!(probe.open_surfaces().len(), 1);
}

#[test]
fn throttling() {
    let (mut ctx, probe) = setup();

    let (focused, focused_log) = Recorder::new();
    let (unfocused, unfocused_log) = Recorder::new();

    let a = ctx.create_window(None, focused).unwrap();
    let b = ctx.create_window(None, unfocused).unwrap();
    ctx.focus(a).unwrap();

    probe.press(Key::Return);
    for _ in 0..8 {
        ctx.update().unwrap();
    }

    assert_eq!(frames(&focused_log), 8);
    assert_eq!(frames(&unfocused_log), 2);

    // Unfocused windows see an idle snapshot.
    assert!(unfocused_log.borrow().iter().all(|v| match v {
        Call::Frame { a, .. } => !a,
        _ => true,
    }));

    assert!(focused_log.borrow().iter().all(|v| match v {
        Call::Frame { a, .. } => *a,
        _ => true,
    }));

    assert_eq!(probe.surface(ctx.surface(a).unwrap()).unwrap().swaps, 8);
    assert_eq!(probe.surface(ctx.surface(b).unwrap()).unwrap().swaps, 2);
}

#[test]
fn delta() {
    let (mut ctx, probe) = setup();

    let (recorder, log) = Recorder::new();
    ctx.create_window(None, recorder).unwrap();
    log.borrow_mut().clear();

    probe.advance(100);
    ctx.update().unwrap();

    match log.borrow()[0] {
        Call::Frame { delta, .. } => assert!((delta - 3.0).abs() < 0.001),
        ref other => panic!("unexpected {:?}", other),
    };
}

#[test]
fn keyboard_order() {
    let (mut ctx, probe) = setup();

    let (focused, focused_log) = Recorder::new();
    let (unfocused, unfocused_log) = Recorder::new();
    ctx.create_window(None, unfocused).unwrap();
    ctx.create_window(None, focused).unwrap();

    probe.press(Key::Z);
    probe.press(Key::A);
    probe.press(Key::Return);
    probe.press(Key::Return);
    probe.release(Key::A);
    ctx.update().unwrap();

    let keys: Vec<_> = focused_log
        .borrow()
        .iter()
        .filter_map(|v| match *v {
            Call::Keyboard(key, gesture) => Some((key, gesture)),
            _ => None,
        })
        .collect();

    assert_eq!(
        keys,
        vec![
            (Key::A, Gesture::Pressed),
            (Key::A, Gesture::Released),
            (Key::Z, Gesture::Pressed),
            (Key::Return, Gesture::Pressed),
        ]
    );

    assert!(unfocused_log.borrow().iter().all(|v| match v {
        Call::Keyboard(..) => false,
        _ => true,
    }));

    // Transitions are retired by the end of the tick.
    focused_log.borrow_mut().clear();
    ctx.update().unwrap();
    assert!(focused_log.borrow().iter().all(|v| match v {
        Call::Keyboard(..) => false,
        _ => true,
    }));
}

#[test]
fn focus_follows_platform() {
    let (mut ctx, probe) = setup();

    let a = ctx.create_window(None, Recorder::default()).unwrap();
    let b = ctx.create_window(None, Recorder::default()).unwrap();
    assert_eq!(ctx.focused(), Some(b));

    probe.focus(ctx.surface(a).unwrap());
    ctx.update().unwrap();
    assert_eq!(ctx.focused(), Some(a));
    assert!(ctx.window(a).unwrap().is_focused());
    assert!(!ctx.window(b).unwrap().is_focused());
}

#[test]
fn resize() {
    let (mut ctx, probe) = setup();

    let (recorder, log) = Recorder::new();
    let handle = ctx.create_window(None, recorder).unwrap();
    let id = ctx.surface(handle).unwrap();
    log.borrow_mut().clear();

    probe.resize(id, 1024, 768);
    ctx.update().unwrap();

    assert_eq!(log.borrow()[0], Call::Resize(1024, 768));
    assert_eq!(probe.stats(id).last_viewport, Some((1024, 768)));
}

#[test]
fn compile_failure() {
    let (mut ctx, probe) = setup();

    let (mut recorder, log) = Recorder::new();
    recorder.bad_shader = true;

    match ctx.create_window(None, recorder) {
        Err(Error::Compile(_)) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }

    assert_eq!(*log.borrow(), vec![Call::Init]);
    assert!(ctx.is_empty());
    assert_eq!(ctx.focused(), None);
    assert!(probe.open_surfaces().is_empty());
}

#[test]
fn callback_failure() {
    let (mut ctx, _) = setup();

    let mut recorder = Recorder::default();
    recorder.fail_on_frame = true;
    let handle = ctx.create_window(None, recorder).unwrap();

    match ctx.update() {
        Err(Error::Callback(err)) => assert_eq!(format!("{}", err), "frame failed on purpose"),
        other => panic!("unexpected {:?}", other),
    }

    assert!(ctx.is_alive(handle));
    assert_eq!(ctx.frame(), 0);
}

#[test]
fn link_failure() {
    let (mut ctx, probe) = setup();

    let (mut recorder, log) = Recorder::new();
    recorder.unlinked_shader = true;

    match ctx.create_window(None, recorder) {
        Err(Error::Link(_)) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }

    assert_eq!(*log.borrow(), vec![Call::Init]);
    assert!(ctx.is_empty());
    assert!(probe.open_surfaces().is_empty());
}

#[test]
fn resize_failure_aborts_tick() {
    let (mut ctx, probe) = setup();

    let (failing, failing_log) = Recorder::new();
    let switch = failing.fail_on_resize.clone();
    let first = ctx.create_window(None, failing).unwrap();
    let (other, other_log) = Recorder::new();
    let second = ctx.create_window(None, other).unwrap();

    failing_log.borrow_mut().clear();
    other_log.borrow_mut().clear();
    switch.set(true);

    probe.resize(ctx.surface(first).unwrap(), 800, 600);
    probe.resize(ctx.surface(second).unwrap(), 800, 600);

    match ctx.update() {
        Err(Error::Callback(err)) => assert_eq!(format!("{}", err), "resize failed on purpose"),
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(*failing_log.borrow(), vec![Call::Resize(800, 600)]);
    assert!(other_log.borrow().is_empty());
    assert!(ctx.is_alive(first) && ctx.is_alive(second));
    assert_eq!(ctx.frame(), 0);
}

#[test]
fn close_failure_still_tears_down() {
    let (mut ctx, probe) = setup();

    let (mut recorder, log) = Recorder::new();
    recorder.fail_on_close = true;
    let handle = ctx.create_window(None, recorder).unwrap();
    let id = ctx.surface(handle).unwrap();
    log.borrow_mut().clear();

    ctx.delete(handle).unwrap();
    match ctx.update() {
        Err(Error::Callback(err)) => assert_eq!(format!("{}", err), "close failed on purpose"),
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(*log.borrow(), vec![Call::Close]);
    assert!(!ctx.is_alive(handle));
    assert!(ctx.is_empty());
    assert!(!probe.surface(id).unwrap().open);

    let stats = probe.stats(id);
    assert_eq!((stats.programs, stats.buffers, stats.textures), (0, 0, 0));
}

#[test]
fn aborted_tick_drops_keys() {
    let (mut ctx, probe) = setup();

    let (other, other_log) = Recorder::new();
    let second = ctx.create_window(None, other).unwrap();
    let (mut failing, failing_log) = Recorder::new();
    failing.fail_on_frame = true;
    let first = ctx.create_window(None, failing).unwrap();
    assert_eq!(ctx.focused(), Some(first));

    probe.press(Key::Q);
    assert!(ctx.update().is_err());

    ctx.delete(first).unwrap();
    probe.focus(ctx.surface(second).unwrap());
    assert_eq!(ctx.update().unwrap(), Status::Running);
    assert_eq!(ctx.focused(), Some(second));

    for log in &[failing_log, other_log] {
        assert!(log.borrow().iter().all(|v| match v {
            Call::Keyboard(..) => false,
            _ => true,
        }));
    }
}

#[test]
fn context_switch_failure() {
    let (mut ctx, probe) = setup();

    ctx.create_window(None, Recorder::default()).unwrap();
    probe.set_fail_make_current(true);

    match ctx.update() {
        Err(Error::ContextSwitch(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    probe.set_fail_make_current(false);
    assert_eq!(ctx.update().unwrap(), Status::Running);
}

#[test]
fn loader_once_per_start() {
    let (mut ctx, probe) = setup();

    for _ in 0..3 {
        ctx.create_window(None, Recorder::default()).unwrap();
    }

    assert_eq!(probe.loads(), 1);

    ctx.stop();
    ctx.start().unwrap();
    ctx.create_window(None, Recorder::default()).unwrap();
    assert_eq!(probe.loads(), 2);
}

#[test]
fn stop_skips_close() {
    let (mut ctx, probe) = setup();

    let (recorder, log) = Recorder::new();
    ctx.create_window(None, recorder).unwrap();
    ctx.create_window(None, Recorder::default()).unwrap();
    ctx.update().unwrap();

    ctx.stop();
    assert!(!log.borrow().contains(&Call::Close));
    assert!(probe.open_surfaces().is_empty());
    assert!(!ctx.is_started());
    assert!(!probe.is_started());

    ctx.start().unwrap();
    assert_eq!(ctx.frame(), 0);
    assert!(ctx.is_empty());
    assert_eq!(ctx.focused(), None);
}

#[test]
fn start_is_counted() {
    let (mut ctx, probe) = setup();
    ctx.start().unwrap();

    let handle = ctx.create_window(None, Recorder::default()).unwrap();
    ctx.stop();
    assert!(ctx.is_started());
    assert!(ctx.is_alive(handle));

    ctx.stop();
    assert!(!ctx.is_started());
    assert!(!probe.is_started());

    // Stopping once more does nothing.
    ctx.stop();
    assert!(!ctx.is_started());
}

#[test]
fn not_started() {
    let (platform, probe) = headless::new();
    let mut ctx = Context::new(Box::new(platform));

    assert!(ctx.update().is_err());
    assert!(ctx.create_window(None, Recorder::default()).is_err());

    probe.set_fail_start(true);
    match ctx.start() {
        Err(Error::Init(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(!ctx.is_started());
}

#[test]
fn sleep_moves_the_clock() {
    let (mut ctx, _) = setup();

    let before = ctx.time();
    ctx.sleep(250);
    let elapsed = ctx.time() - before;
    assert_eq!(elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis()), 250);
}
