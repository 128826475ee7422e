use super::types::InputEvent;

/// Input queued since the last rendered frame, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn push(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
