//! Bounded-retry engine initialization.
//!
//! The drawable surface may not exist yet when the host asks for an engine
//! (it is typically created asynchronously by the host's view layer). Rather
//! than ad hoc delays, acquisition is an explicit state machine the host
//! polls between frames: Pending until the surface appears, Ready once it
//! does, Failed after the retry budget is spent. Cancellation is checked on
//! every poll so teardown mid-initialization never leaks a late surface.

use crate::core::error::EngineError;
use crate::render::surface::DrawSurface;

/// Source of the drawable surface. The host implements this against
/// whatever windowing or canvas layer it uses.
pub trait SurfaceProvider {
    /// Attempt to acquire the surface. `None` means "not ready yet".
    fn try_acquire(&mut self) -> Option<Box<dyn DrawSurface>>;
}

/// Outcome of a single initialization poll.
pub enum InitPoll {
    /// Surface not ready yet; poll again.
    Pending { attempts: u32 },
    /// Surface acquired; initialization is complete.
    Ready(Box<dyn DrawSurface>),
    /// Terminal failure (retry budget exhausted or cancelled).
    Failed(EngineError),
}

/// Polled initializer with a bounded retry budget.
pub struct Initializer<P: SurfaceProvider> {
    provider: P,
    attempts: u32,
    max_attempts: u32,
    cancelled: bool,
    done: bool,
}

impl<P: SurfaceProvider> Initializer<P> {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    pub fn new(provider: P) -> Self {
        Self::with_max_attempts(provider, Self::DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(provider: P, max_attempts: u32) -> Self {
        Self {
            provider,
            attempts: 0,
            max_attempts,
            cancelled: false,
            done: false,
        }
    }

    /// Cancel initialization. Safe to call at any time, including after
    /// completion; subsequent polls report failure instead of acquiring.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Run one acquisition attempt.
    pub fn poll(&mut self) -> InitPoll {
        if self.cancelled {
            self.done = true;
            return InitPoll::Failed(EngineError::Cancelled);
        }
        if self.done {
            return InitPoll::Failed(EngineError::Init {
                attempts: self.attempts,
            });
        }

        self.attempts += 1;
        if let Some(surface) = self.provider.try_acquire() {
            log::info!("surface acquired after {} attempt(s)", self.attempts);
            self.done = true;
            return InitPoll::Ready(surface);
        }

        if self.attempts >= self.max_attempts {
            log::error!("surface unavailable after {} attempts", self.attempts);
            self.done = true;
            InitPoll::Failed(EngineError::Init {
                attempts: self.attempts,
            })
        } else {
            InitPoll::Pending {
                attempts: self.attempts,
            }
        }
    }
}
