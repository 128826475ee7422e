use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Key, RawInput};

/// Logical pixels per wheel line for pixel-precise (trackpad) scrolling.
const PIXELS_PER_LINE: f64 = 40.0;

/// Translates a winit `WindowEvent` into `RawInput`.
///
/// Returns `None` for events the input subsystem does not represent.
pub(crate) fn translate_window_event(scale_factor: f64, event: &WindowEvent) -> Option<RawInput> {
    match event {
        WindowEvent::Focused(false) => Some(RawInput::FocusLost),

        WindowEvent::CursorLeft { .. } => Some(RawInput::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            Some(RawInput::PointerMoved { x, y })
        }

        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => Some(RawInput::PrimaryButton {
            pressed: *state == ElementState::Pressed,
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(p) => {
                    (p.to_logical::<f64>(scale_factor).y / PIXELS_PER_LINE) as f32
                }
            };
            Some(RawInput::Wheel { lines })
        }

        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            Some(RawInput::KeyPressed {
                key: map_key(event.physical_key),
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Other;
    };
    match code {
        KeyCode::Digit0 => Key::Digit(0),
        KeyCode::Digit1 => Key::Digit(1),
        KeyCode::Digit2 => Key::Digit(2),
        KeyCode::Digit3 => Key::Digit(3),
        KeyCode::Digit4 => Key::Digit(4),
        KeyCode::Digit5 => Key::Digit(5),
        KeyCode::Digit6 => Key::Digit(6),
        KeyCode::Digit7 => Key::Digit(7),
        KeyCode::Digit8 => Key::Digit(8),
        KeyCode::Digit9 => Key::Digit(9),
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}
