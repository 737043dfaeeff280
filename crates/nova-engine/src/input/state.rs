use std::collections::HashSet;

use glam::Vec2;

use super::queue::{InputEvent, Key};

/// Held-key and active-touch state, folded from drained events once per
/// frame and read by the input-resolution step.
///
/// Touches keep insertion order; "the first active touch" drives homing
/// movement even when later touches are added.
pub struct InputState {
    keys: HashSet<Key>,
    touches: Vec<(u32, Vec2)>,
    cursor: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
            touches: Vec::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key } => {
                self.keys.insert(key);
            }
            InputEvent::KeyUp { key } => {
                self.keys.remove(&key);
            }
            InputEvent::PointerMove { pos } => {
                self.cursor = pos;
            }
            InputEvent::PointerDown { .. } => {}
            InputEvent::TouchStart { id, pos } | InputEvent::TouchMove { id, pos } => {
                if let Some(entry) = self.touches.iter_mut().find(|(tid, _)| *tid == id) {
                    entry.1 = pos;
                } else {
                    self.touches.push((id, pos));
                }
            }
            InputEvent::TouchEnd { id } => {
                self.touches.retain(|(tid, _)| *tid != id);
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Cursor position from the last pointer-move. Not used for gameplay.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn first_touch(&self) -> Option<Vec2> {
        self.touches.first().map(|(_, pos)| *pos)
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Resolve held keys and active touches into the player's desired
    /// velocity.
    ///
    /// Each held directional key contributes ± `speed` on its axis. An
    /// active touch beyond the deadzone overrides with the normalized
    /// vector from the player to the touch, scaled to the same speed.
    /// Diagonal keyboard movement is renormalized so the magnitude never
    /// exceeds `speed`.
    pub fn desired_velocity(&self, player_pos: Vec2, speed: f32, deadzone: f32) -> Vec2 {
        let mut velocity = Vec2::ZERO;

        if self.is_held(Key::Up) {
            velocity.y -= speed;
        }
        if self.is_held(Key::Down) {
            velocity.y += speed;
        }
        if self.is_held(Key::Left) {
            velocity.x -= speed;
        }
        if self.is_held(Key::Right) {
            velocity.x += speed;
        }

        if let Some(touch) = self.first_touch() {
            let delta = touch - player_pos;
            let distance = delta.length();
            if distance > deadzone {
                velocity = delta / distance * speed;
            }
        }

        // No diagonal speed bonus
        if velocity.x != 0.0 && velocity.y != 0.0 {
            velocity = velocity.normalize() * speed;
        }

        velocity
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
