/// Variable real-time frame clock.
/// Produces per-frame deltas in milliseconds and a rolling FPS estimate
/// sampled roughly once per wall-clock second.
pub struct FrameClock {
    last_ms: f64,
    frame_count: u32,
    window_start_ms: f64,
    /// Upper bound on a single delta, so a suspended host (backgrounded tab,
    /// stopped debugger) cannot produce one giant catch-up step.
    max_step_ms: f64,
}

/// Result of a clock tick.
pub struct FrameTiming {
    /// Elapsed time since the previous frame, in milliseconds.
    pub dt_ms: f64,
    /// FPS estimate, present once per ~1000 ms window.
    pub fps: Option<u32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_ms: 0.0,
            frame_count: 0,
            window_start_ms: 0.0,
            max_step_ms: 1000.0,
        }
    }

    /// Reset frame timing to `now_ms`. Called on engine start (and restart).
    pub fn start(&mut self, now_ms: f64) {
        self.last_ms = now_ms;
        self.window_start_ms = now_ms;
        self.frame_count = 0;
    }

    /// Advance the clock to `now_ms` and return the frame delta plus an
    /// FPS sample when a full window has elapsed.
    pub fn tick(&mut self, now_ms: f64) -> FrameTiming {
        let dt_ms = (now_ms - self.last_ms).clamp(0.0, self.max_step_ms);
        self.last_ms = now_ms;

        self.frame_count += 1;
        let window_ms = now_ms - self.window_start_ms;
        let fps = if window_ms >= 1000.0 {
            let fps = (self.frame_count as f64 * 1000.0 / window_ms).round() as u32;
            self.frame_count = 0;
            self.window_start_ms = now_ms;
            Some(fps)
        } else {
            None
        };

        FrameTiming { dt_ms, fps }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
