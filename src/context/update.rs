use std::mem;

use smallvec::SmallVec;

use crate::errors::*;
use crate::input::{Events, InputEvent};
use crate::window::{Event, WindowEvent, WindowHandle};

use super::{Context, Slot, Status, FRAME_REFERENCE_MS, MAX_WINDOWS, UNFOCUSED_FRAME_DIVISOR};

impl Context {
    /// Runs one tick:
    ///
    /// 1. drains the platform events into the key accumulator and the
    ///    window marks;
    /// 2. takes the `Events` snapshot of the tick;
    /// 3. presents every window due this tick, tears down the ones marked
    ///    for deletion and delivers pending resizes;
    /// 4. runs the frame callbacks, then hands the key transitions to the
    ///    focused window;
    /// 5. tears down the windows closed during 3 and 4.
    ///
    /// A context switch failure or a callback error aborts the tick, and
    /// the key transitions of the aborted tick are dropped.
    pub fn update(&mut self) -> Result<Status> {
        if !self.is_started() {
            return Err(Error::Init("the context is not started.".to_owned()));
        }

        self.dispatch_events();

        let events = self.accumulator.snapshot();
        let result = self.run_windows(&events);

        self.accumulator.retire();
        result?;

        if self.windows.is_empty() {
            return Ok(Status::Closed);
        }

        self.frame += 1;
        Ok(Status::Running)
    }

    fn run_windows(&mut self, events: &Events) -> Result<()> {
        let idle = Events::default();
        let handles: SmallVec<[WindowHandle; MAX_WINDOWS]> = self.windows.iter().collect();
        let throttled = self.frame % UNFOCUSED_FRAME_DIVISOR == 0;

        for &handle in &handles {
            let marked = match self.windows.get_mut(handle) {
                Some(slot) => {
                    slot.window.make_current()?;
                    if slot.window.focused || throttled {
                        slot.window.present()?;
                    }

                    slot.window.delete_mark
                }
                None => continue,
            };

            if marked {
                self.reap(handle)?;
                continue;
            }

            if let Some(slot) = self.windows.get_mut(handle) {
                let Slot {
                    ref mut window,
                    ref mut sketch,
                } = *slot;

                if window.resize_mark {
                    window.resize_mark = false;
                    let dimensions = window.fit();
                    sketch
                        .resize(window, dimensions)
                        .map_err(Error::from_sketch)?;
                }
            }
        }

        let now = self.time();
        for &handle in &handles {
            let slot = match self.windows.get_mut(handle) {
                Some(slot) if !slot.window.delete_mark => slot,
                _ => continue,
            };

            let Slot {
                ref mut window,
                ref mut sketch,
            } = *slot;

            window.make_current()?;

            if window.focused || throttled {
                let elapsed = now - window.last_frame;
                let millis = elapsed.as_secs() as f32 * 1000.0 + elapsed.subsec_millis() as f32;
                window.last_frame = now;

                let snapshot = if window.focused { events } else { &idle };
                sketch
                    .frame(window, snapshot, millis / FRAME_REFERENCE_MS)
                    .map_err(Error::from_sketch)?;
            }

            if window.focused {
                while !window.delete_mark {
                    let (key, gesture) = match self.accumulator.consume(handle) {
                        Some(transition) => transition,
                        None => break,
                    };

                    sketch
                        .keyboard(window, key, gesture)
                        .map_err(Error::from_sketch)?;
                }
            }
        }

        for &handle in &handles {
            let marked = self
                .windows
                .get(handle)
                .map(|v| v.window.delete_mark)
                .unwrap_or(false);

            if marked {
                self.reap(handle)?;
            }
        }

        Ok(())
    }

    fn dispatch_events(&mut self) {
        let mut events = mem::replace(&mut self.events, Vec::new());
        self.platform.poll_events(&mut events);

        for v in events.drain(..) {
            match v {
                Event::InputDevice(InputEvent::KeyboardPressed { key }) => {
                    self.accumulator.press(key)
                }

                Event::InputDevice(InputEvent::KeyboardReleased { key }) => {
                    self.accumulator.release(key)
                }

                Event::Window { id, event } => {
                    let handle = match self.find(id) {
                        Some(handle) => handle,
                        None => continue,
                    };

                    match event {
                        WindowEvent::Closed => {
                            if let Some(slot) = self.windows.get_mut(handle) {
                                slot.window.delete_mark = true;
                            }
                        }

                        WindowEvent::Resized(_, _) => {
                            if let Some(slot) = self.windows.get_mut(handle) {
                                slot.window.resize_mark = true;
                            }
                        }

                        WindowEvent::GainFocus => self.set_focus(handle),
                        WindowEvent::LostFocus => {}
                    }
                }
            }
        }

        self.events = events;
    }
}
