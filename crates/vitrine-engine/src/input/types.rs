use crate::host::PointerEvent;

/// Keys the gallery host reacts to. Everything else is `Other`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Number row digit, `0..=9`.
    Digit(u8),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Other,
}

/// Platform input after translation, before pointer tracking.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RawInput {
    KeyPressed { key: Key, repeat: bool },
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    PrimaryButton { pressed: bool },
    Wheel { lines: f32 },
    FocusLost,
}

/// Input delivered to the application for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    KeyPressed { key: Key, repeat: bool },
    Pointer(PointerEvent),
}
