//! A scripted platform without any display. Windows are plain records,
//! events are whatever the `Probe` queued, and the clock only moves when
//! told to.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::os::raw::c_void;
use std::rc::Rc;

use crate::errors::*;
use crate::input::events::InputEvent;
use crate::input::keyboard::Key;
use crate::math::Vector2;
use crate::utils::time::Timestamp;
use crate::video::backends::headless::{DeviceStats, HeadlessVisitor as HeadlessDevice};
use crate::video::backends::Visitor as DeviceVisitor;

use super::super::events::{Event, SurfaceId, WindowEvent};
use super::super::WindowParams;
use super::{Platform, Visitor};

/// Creates a headless platform, and the probe that drives it.
pub fn new() -> (HeadlessPlatform, Probe) {
    let shared = Rc::new(Shared::default());
    let platform = HeadlessPlatform {
        shared: shared.clone(),
    };

    (platform, Probe { shared })
}

/// What the headless platform knows about a native window.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub id: SurfaceId,
    pub title: String,
    pub dimensions: Vector2<u32>,
    pub fullscreen: bool,
    pub vsync: bool,
    pub raised: usize,
    pub swaps: usize,
    pub open: bool,
}

#[derive(Default)]
struct State {
    started: bool,
    fail_start: bool,
    fail_make_current: bool,
    next_id: SurfaceId,
    clock: u64,
    loads: usize,
    surfaces: Vec<SurfaceRecord>,
    events: VecDeque<Event>,
    devices: Vec<(SurfaceId, Rc<RefCell<DeviceStats>>)>,
}

#[derive(Default)]
struct Shared {
    state: RefCell<State>,
    current: Rc<Cell<Option<SurfaceId>>>,
}

impl Shared {
    fn with_surface<F>(&self, id: SurfaceId, func: F)
    where
        F: FnOnce(&mut SurfaceRecord),
    {
        let mut state = self.state.borrow_mut();
        if let Some(record) = state.surfaces.iter_mut().find(|v| v.id == id) {
            func(record);
        }
    }
}

pub struct HeadlessPlatform {
    shared: Rc<Shared>,
}

impl Platform for HeadlessPlatform {
    fn start(&mut self) -> Result<()> {
        let mut state = self.shared.state.borrow_mut();
        if state.fail_start {
            return Err(Error::Init("headless platform refused to start.".to_owned()));
        }

        state.started = true;
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.shared.state.borrow_mut();
        state.started = false;
        state.events.clear();
        self.shared.current.set(None);
    }

    fn create_surface(&mut self, params: &WindowParams) -> Result<Box<dyn Visitor>> {
        let mut state = self.shared.state.borrow_mut();
        if !state.started {
            return Err(Error::Init("headless platform is not started.".to_owned()));
        }

        state.next_id += 1;
        let id = state.next_id;

        state.surfaces.push(SurfaceRecord {
            id,
            title: params.title.clone(),
            dimensions: params.size,
            fullscreen: false,
            vsync: params.vsync,
            raised: 0,
            swaps: 0,
            open: true,
        });

        Ok(Box::new(HeadlessSurface {
            id,
            shared: self.shared.clone(),
        }))
    }

    fn load_functions(&mut self, _: &dyn Visitor) -> Result<()> {
        self.shared.state.borrow_mut().loads += 1;
        Ok(())
    }

    fn create_device(&mut self, surface: &dyn Visitor) -> Result<Box<dyn DeviceVisitor>> {
        let stats = Rc::new(RefCell::new(DeviceStats::default()));
        self.shared
            .state
            .borrow_mut()
            .devices
            .push((surface.id(), stats.clone()));

        let device = HeadlessDevice::new(surface.id(), self.shared.current.clone(), stats);
        Ok(Box::new(device))
    }

    fn poll_events(&mut self, events: &mut Vec<Event>) {
        events.extend(self.shared.state.borrow_mut().events.drain(..));
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.shared.state.borrow().clock)
    }

    fn sleep(&mut self, millis: u64) {
        self.shared.state.borrow_mut().clock += millis;
    }
}

pub struct HeadlessSurface {
    id: SurfaceId,
    shared: Rc<Shared>,
}

impl Drop for HeadlessSurface {
    fn drop(&mut self) {
        self.shared.with_surface(self.id, |v| v.open = false);
        if self.shared.current.get() == Some(self.id) {
            self.shared.current.set(None);
        }
    }
}

impl Visitor for HeadlessSurface {
    #[inline]
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn dimensions(&self) -> Vector2<u32> {
        let state = self.shared.state.borrow();
        state
            .surfaces
            .iter()
            .find(|v| v.id == self.id)
            .map(|v| v.dimensions)
            .unwrap_or_else(|| Vector2::new(0, 0))
    }

    #[inline]
    fn resize(&self, _: Vector2<u32>) {}

    fn set_fullscreen(&self, fullscreen: bool) {
        self.shared.with_surface(self.id, |v| v.fullscreen = fullscreen);
    }

    fn raise(&self) {
        self.shared.with_surface(self.id, |v| v.raised += 1);
    }

    fn make_current(&self) -> Result<()> {
        if self.shared.state.borrow().fail_make_current {
            return Err(Error::ContextSwitch(format!(
                "headless surface {} refused to become current.",
                self.id
            )));
        }

        self.shared.current.set(Some(self.id));
        Ok(())
    }

    fn swap_buffers(&self) -> Result<()> {
        self.shared.with_surface(self.id, |v| v.swaps += 1);
        Ok(())
    }

    #[inline]
    fn proc_address(&self, _: &str) -> *const c_void {
        ::std::ptr::null()
    }
}

/// Scripts a headless platform and inspects what happened to it.
#[derive(Clone)]
pub struct Probe {
    shared: Rc<Shared>,
}

impl Probe {
    pub fn send(&self, event: Event) {
        self.shared.state.borrow_mut().events.push_back(event);
    }

    pub fn press(&self, key: Key) {
        self.send(Event::InputDevice(InputEvent::KeyboardPressed { key }));
    }

    pub fn release(&self, key: Key) {
        self.send(Event::InputDevice(InputEvent::KeyboardReleased { key }));
    }

    pub fn close(&self, id: SurfaceId) {
        self.send(Event::Window {
            id,
            event: WindowEvent::Closed,
        });
    }

    pub fn focus(&self, id: SurfaceId) {
        self.send(Event::Window {
            id,
            event: WindowEvent::GainFocus,
        });
    }

    /// Changes the size of a window the way a user drag would.
    pub fn resize(&self, id: SurfaceId, width: u32, height: u32) {
        self.shared
            .with_surface(id, |v| v.dimensions = Vector2::new(width, height));

        self.send(Event::Window {
            id,
            event: WindowEvent::Resized(width, height),
        });
    }

    /// Moves the clock forward.
    pub fn advance(&self, millis: u64) {
        self.shared.state.borrow_mut().clock += millis;
    }

    pub fn set_fail_start(&self, fail: bool) {
        self.shared.state.borrow_mut().fail_start = fail;
    }

    pub fn set_fail_make_current(&self, fail: bool) {
        self.shared.state.borrow_mut().fail_make_current = fail;
    }

    pub fn is_started(&self) -> bool {
        self.shared.state.borrow().started
    }

    /// Returns how many times the GPU functions have been loaded.
    pub fn loads(&self) -> usize {
        self.shared.state.borrow().loads
    }

    /// Returns the ids of windows that are still open, oldest first.
    pub fn open_surfaces(&self) -> Vec<SurfaceId> {
        self.shared
            .state
            .borrow()
            .surfaces
            .iter()
            .filter(|v| v.open)
            .map(|v| v.id)
            .collect()
    }

    pub fn surface(&self, id: SurfaceId) -> Option<SurfaceRecord> {
        let state = self.shared.state.borrow();
        state.surfaces.iter().find(|v| v.id == id).cloned()
    }

    pub fn current(&self) -> Option<SurfaceId> {
        self.shared.current.get()
    }

    /// Returns the counters of the device drawing into `id`.
    pub fn stats(&self, id: SurfaceId) -> DeviceStats {
        let state = self.shared.state.borrow();
        state
            .devices
            .iter()
            .rev()
            .find(|(surface, _)| *surface == id)
            .map(|(_, stats)| *stats.borrow())
            .unwrap_or_default()
    }
}
