use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::input::events::InputEvent;
use crate::input::keyboard::Key;

use super::super::super::events::{Event, SurfaceId, WindowEvent};

/// Folds the opaque glutin window id into a `SurfaceId`.
pub fn surface_id(id: glutin::WindowId) -> SurfaceId {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

pub fn from_event(source: glutin::Event) -> Option<Event> {
    match source {
        glutin::Event::WindowEvent { window_id, event } => {
            from_window_event(surface_id(window_id), &event)
        }

        _ => None,
    }
}

fn from_window_event(id: SurfaceId, source: &glutin::WindowEvent) -> Option<Event> {
    let window = |event| Some(Event::Window { id, event });

    match *source {
        glutin::WindowEvent::CloseRequested => window(WindowEvent::Closed),

        glutin::WindowEvent::Focused(v) => if v {
            window(WindowEvent::GainFocus)
        } else {
            window(WindowEvent::LostFocus)
        },

        glutin::WindowEvent::Resized(glutin::dpi::LogicalSize { width, height }) => {
            window(WindowEvent::Resized(width as u32, height as u32))
        }

        glutin::WindowEvent::KeyboardInput {
            input:
                glutin::KeyboardInput {
                    state: glutin::ElementState::Pressed,
                    virtual_keycode: Some(key),
                    ..
                },
            ..
        } => from_virtual_key_code(key)
            .map(|key| Event::InputDevice(InputEvent::KeyboardPressed { key })),

        glutin::WindowEvent::KeyboardInput {
            input:
                glutin::KeyboardInput {
                    state: glutin::ElementState::Released,
                    virtual_keycode: Some(key),
                    ..
                },
            ..
        } => from_virtual_key_code(key)
            .map(|key| Event::InputDevice(InputEvent::KeyboardReleased { key })),

        _ => None,
    }
}

fn from_virtual_key_code(key: glutin::VirtualKeyCode) -> Option<Key> {
    use glutin::VirtualKeyCode as V;

    let key = match key {
        V::A => Key::A,
        V::B => Key::B,
        V::C => Key::C,
        V::D => Key::D,
        V::E => Key::E,
        V::F => Key::F,
        V::G => Key::G,
        V::H => Key::H,
        V::I => Key::I,
        V::J => Key::J,
        V::K => Key::K,
        V::L => Key::L,
        V::M => Key::M,
        V::N => Key::N,
        V::O => Key::O,
        V::P => Key::P,
        V::Q => Key::Q,
        V::R => Key::R,
        V::S => Key::S,
        V::T => Key::T,
        V::U => Key::U,
        V::V => Key::V,
        V::W => Key::W,
        V::X => Key::X,
        V::Y => Key::Y,
        V::Z => Key::Z,
        V::Key1 => Key::Key1,
        V::Key2 => Key::Key2,
        V::Key3 => Key::Key3,
        V::Key4 => Key::Key4,
        V::Key5 => Key::Key5,
        V::Key6 => Key::Key6,
        V::Key7 => Key::Key7,
        V::Key8 => Key::Key8,
        V::Key9 => Key::Key9,
        V::Key0 => Key::Key0,
        V::Return | V::NumpadEnter => Key::Return,
        V::Escape => Key::Escape,
        V::Back => Key::Backspace,
        V::Tab => Key::Tab,
        V::Space => Key::Space,
        V::Minus => Key::Minus,
        V::Equals => Key::Equals,
        V::LBracket => Key::LBracket,
        V::RBracket => Key::RBracket,
        V::Backslash => Key::Backslash,
        V::Semicolon => Key::Semicolon,
        V::Apostrophe => Key::Apostrophe,
        V::Grave => Key::Grave,
        V::Comma => Key::Comma,
        V::Period => Key::Period,
        V::Slash => Key::Slash,
        V::Capital => Key::Capital,
        V::F1 => Key::F1,
        V::F2 => Key::F2,
        V::F3 => Key::F3,
        V::F4 => Key::F4,
        V::F5 => Key::F5,
        V::F6 => Key::F6,
        V::F7 => Key::F7,
        V::F8 => Key::F8,
        V::F9 => Key::F9,
        V::F10 => Key::F10,
        V::F11 => Key::F11,
        V::F12 => Key::F12,
        V::Insert => Key::Insert,
        V::Home => Key::Home,
        V::PageUp => Key::PageUp,
        V::Delete => Key::Delete,
        V::End => Key::End,
        V::PageDown => Key::PageDown,
        V::Right => Key::Right,
        V::Left => Key::Left,
        V::Down => Key::Down,
        V::Up => Key::Up,
        _ => return None,
    };

    Some(key)
}
