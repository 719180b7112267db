use smallvec::SmallVec;

use super::events::Events;
use super::keyboard::{Gesture, Key, MAX_KEY_CODES};

struct Transition<C> {
    key: Key,
    gesture: Gesture,
    consumers: SmallVec<[C; 4]>,
}

/// Records keyboard transitions between two ticks. Several windows share
/// the same physical keyboard, so every transition remembers which
/// consumers have already seen it.
pub struct Accumulator<C: Copy + PartialEq> {
    held: [bool; MAX_KEY_CODES],
    transitions: Vec<Transition<C>>,
}

impl<C: Copy + PartialEq> Default for Accumulator<C> {
    fn default() -> Self {
        Accumulator::new()
    }
}

impl<C: Copy + PartialEq> Accumulator<C> {
    pub fn new() -> Self {
        Accumulator {
            held: [false; MAX_KEY_CODES],
            transitions: Vec::new(),
        }
    }

    /// Records a press. Auto-repeat presses of a held key are dropped.
    pub fn press(&mut self, key: Key) {
        let held = &mut self.held[key.code() as usize];
        if *held {
            return;
        }

        *held = true;
        self.push(key, Gesture::Pressed);
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.code() as usize] = false;
        self.push(key, Gesture::Released);
    }

    fn push(&mut self, key: Key, gesture: Gesture) {
        self.transitions.push(Transition {
            key,
            gesture,
            consumers: SmallVec::new(),
        });
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.code() as usize]
    }

    #[inline]
    pub fn snapshot(&self) -> Events {
        Events::from_keys(|key| self.is_held(key))
    }

    /// Returns the number of transitions recorded since the last `retire`.
    #[inline]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Hands the next transition `consumer` has not seen yet, lowest key
    /// code first, and marks it as seen. Transitions of the same key keep
    /// their arrival order.
    pub fn consume(&mut self, consumer: C) -> Option<(Key, Gesture)> {
        let index = self
            .transitions
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.consumers.contains(&consumer))
            .min_by_key(|(i, t)| (t.key.code(), *i))
            .map(|(i, _)| i)?;

        let transition = &mut self.transitions[index];
        transition.consumers.push(consumer);
        Some((transition.key, transition.gesture))
    }

    /// Forgets every recorded transition. Held state is kept.
    #[inline]
    pub fn retire(&mut self) {
        self.transitions.clear();
    }

    pub fn reset(&mut self) {
        self.held = [false; MAX_KEY_CODES];
        self.transitions.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn repeats_are_dropped() {
        let mut acc = Accumulator::<u32>::new();
        acc.press(Key::A);
        acc.press(Key::A);
        acc.press(Key::A);
        assert_eq!(acc.len(), 1);
        assert!(acc.is_held(Key::A));

        acc.release(Key::A);
        assert!(!acc.is_held(Key::A));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn ordered_by_key_code() {
        let mut acc = Accumulator::<u32>::new();
        acc.press(Key::Up);
        acc.press(Key::B);
        acc.release(Key::Up);
        acc.press(Key::A);

        let mut seen = Vec::new();
        while let Some(v) = acc.consume(0) {
            seen.push(v);
        }

        assert_eq!(
            seen,
            vec![
                (Key::A, Gesture::Pressed),
                (Key::B, Gesture::Pressed),
                (Key::Up, Gesture::Pressed),
                (Key::Up, Gesture::Released),
            ]
        );
    }

    #[test]
    fn consumers_are_independent() {
        let mut acc = Accumulator::<u32>::new();
        acc.press(Key::Space);

        assert_eq!(acc.consume(1), Some((Key::Space, Gesture::Pressed)));
        assert_eq!(acc.consume(1), None);
        assert_eq!(acc.consume(2), Some((Key::Space, Gesture::Pressed)));

        acc.retire();
        assert!(acc.is_empty());
        assert_eq!(acc.consume(3), None);
        assert!(acc.snapshot().select);

        acc.reset();
        assert!(!acc.snapshot().select);
    }
}
