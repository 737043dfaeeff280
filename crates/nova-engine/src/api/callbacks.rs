/// Engine-to-host notification channel.
///
/// The engine owns no UI and no persistence; it reports through these
/// callbacks and the host decides what to show or store. Score is
/// monotonically non-decreasing within a session; FPS is sampled roughly
/// once per second.
pub struct EngineCallbacks {
    pub on_game_over: Box<dyn FnMut(u32)>,
    pub on_score_update: Box<dyn FnMut(u32)>,
    pub on_fps_update: Box<dyn FnMut(u32)>,
}

impl EngineCallbacks {
    /// Callbacks that discard every notification. Useful for headless runs
    /// and tests that only inspect engine state.
    pub fn noop() -> Self {
        Self {
            on_game_over: Box::new(|_| {}),
            on_score_update: Box::new(|_| {}),
            on_fps_update: Box::new(|_| {}),
        }
    }
}
