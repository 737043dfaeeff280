use glam::Vec2;

/// Movement and fire keys the engine understands. The host maps physical
/// key codes to these before forwarding; pause is intercepted by the host
/// and never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Input event types the engine understands.
/// Generic, with no game semantics beyond the [`Key`] mapping.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A key was released.
    KeyUp { key: Key },
    /// The cursor moved to surface coordinates.
    PointerMove { pos: Vec2 },
    /// A click/tap began at surface coordinates. Triggers a shot.
    PointerDown { pos: Vec2 },
    /// A touch began or moved; `id` is the host's touch identifier.
    TouchStart { id: u32, pos: Vec2 },
    TouchMove { id: u32, pos: Vec2 },
    /// A touch ended.
    TouchEnd { id: u32 },
}

/// A queue of input events.
/// Host event handlers write events into the queue; the frame loop reads
/// and drains them exactly once per frame. Handlers never iterate, the
/// loop never appends, so there is no iteration-while-mutating hazard.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from host event handlers).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
