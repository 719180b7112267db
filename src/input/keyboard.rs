/// Symbolic name for a keyboard key. The discriminants are the USB HID
/// usage codes of the keys, which is also the order in which pending key
/// transitions are delivered to sketches.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum Key {
    A = 4,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    /// The '1' key over the letters.
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    /// The '0' key over the 'O' and 'P' keys.
    Key0,

    Return,
    /// The Escape key, next to F1.
    Escape,
    Backspace,
    Tab,
    Space,
    Minus,
    Equals,
    LBracket,
    RBracket,
    Backslash,

    Semicolon = 51,
    Apostrophe,
    Grave,
    Comma,
    Period,
    Slash,
    Capital,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Insert = 73,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,

    Right,
    Left,
    Down,
    Up,
}

/// The number of distinct key codes the input accumulator tracks.
pub const MAX_KEY_CODES: usize = 128;

impl Key {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The direction of a key transition.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Gesture {
    Pressed,
    Released,
}
