use crate::host::PointerEvent;

use super::frame::InputFrame;
use super::types::{InputEvent, RawInput};

/// Pointer tracking for a single window.
///
/// Motion while the primary button is held becomes `PointerEvent::Drag`
/// with deltas in logical pixels.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,
    pub primary_down: bool,
}

impl InputState {
    /// Applies one translated event and queues the resulting input, if any.
    pub fn apply(&mut self, frame: &mut InputFrame, raw: RawInput) {
        match raw {
            RawInput::KeyPressed { key, repeat } => {
                frame.push(InputEvent::KeyPressed { key, repeat });
            }

            RawInput::PointerMoved { x, y } => {
                let previous = self.pointer_pos.replace((x, y));
                if let (true, Some((px, py))) = (self.primary_down, previous) {
                    let (dx, dy) = (x - px, y - py);
                    if dx != 0.0 || dy != 0.0 {
                        frame.push(InputEvent::Pointer(PointerEvent::Drag { dx, dy }));
                    }
                }
            }

            RawInput::PointerLeft => {
                self.pointer_pos = None;
            }

            RawInput::PrimaryButton { pressed } => {
                self.primary_down = pressed;
            }

            RawInput::Wheel { lines } => {
                if lines != 0.0 {
                    frame.push(InputEvent::Pointer(PointerEvent::Wheel { delta: lines }));
                }
            }

            // Avoid a stuck drag when focus changes mid-press.
            RawInput::FocusLost => {
                self.primary_down = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_without_button_is_not_a_drag() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, RawInput::PointerMoved { x: 10.0, y: 10.0 });
        state.apply(&mut frame, RawInput::PointerMoved { x: 20.0, y: 15.0 });
        assert!(frame.events().is_empty());
    }

    #[test]
    fn held_button_turns_motion_into_drag() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, RawInput::PointerMoved { x: 10.0, y: 10.0 });
        state.apply(&mut frame, RawInput::PrimaryButton { pressed: true });
        state.apply(&mut frame, RawInput::PointerMoved { x: 14.0, y: 7.0 });
        state.apply(&mut frame, RawInput::FocusLost);
        state.apply(&mut frame, RawInput::PointerMoved { x: 30.0, y: 7.0 });

        assert_eq!(
            frame.events(),
            [InputEvent::Pointer(PointerEvent::Drag { dx: 4.0, dy: -3.0 })]
        );
    }

    #[test]
    fn zero_wheel_is_dropped() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, RawInput::Wheel { lines: 0.0 });
        state.apply(&mut frame, RawInput::Wheel { lines: -1.0 });
        assert_eq!(
            frame.events(),
            [InputEvent::Pointer(PointerEvent::Wheel { delta: -1.0 })]
        );
    }
}
