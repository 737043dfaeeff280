pub mod api;
pub mod core;
pub mod engine;
pub mod entities;
pub mod input;
pub mod render;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::callbacks::EngineCallbacks;
pub use api::config::EngineConfig;
pub use core::clock::{FrameClock, FrameTiming};
pub use core::error::EngineError;
pub use core::init::{InitPoll, Initializer, SurfaceProvider};
pub use core::rng::Rng;
pub use engine::GameEngine;
pub use entities::{collides_with, Enemy, Entity, Player, Projectile};
pub use input::queue::{InputEvent, InputQueue, Key};
pub use input::state::InputState;
pub use render::pixmap::Pixmap;
pub use render::surface::{BlendMode, DrawSurface, GradientStop, Rgba};
pub use systems::lighting::{Light, LightingSystem};
pub use systems::particles::{BurstOptions, Particle, ParticleSpec, ParticleSystem};
