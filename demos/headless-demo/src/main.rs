//! Headless driver: runs the engine against a CPU pixmap for a few
//! simulated seconds, scripting input to show the full loop (movement,
//! firing, spawning, scoring) without any windowing layer.

use glam::Vec2;
use log::{info, warn};
use nova_engine::{
    DrawSurface, EngineCallbacks, EngineConfig, GameEngine, InitPoll, Initializer, InputEvent,
    Key, Pixmap, SurfaceProvider,
};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const FRAME_MS: f64 = 1000.0 / 60.0;
const FRAMES: u32 = 600;

/// Pretends the surface shows up late, like an asynchronously created
/// canvas would.
struct DelayedPixmap {
    polls_until_ready: u32,
}

impl SurfaceProvider for DelayedPixmap {
    fn try_acquire(&mut self) -> Option<Box<dyn DrawSurface>> {
        if self.polls_until_ready > 0 {
            self.polls_until_ready -= 1;
            None
        } else {
            Some(Box::new(Pixmap::new(WIDTH, HEIGHT)))
        }
    }
}

fn acquire_surface() -> Option<Box<dyn DrawSurface>> {
    let mut init = Initializer::new(DelayedPixmap {
        polls_until_ready: 2,
    });
    loop {
        match init.poll() {
            InitPoll::Pending { attempts } => {
                info!("surface not ready yet (attempt {attempts})");
            }
            InitPoll::Ready(surface) => return Some(surface),
            InitPoll::Failed(e) => {
                warn!("initialization failed: {e}");
                return None;
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let Some(surface) = acquire_surface() else {
        std::process::exit(1);
    };

    let callbacks = EngineCallbacks {
        on_game_over: Box::new(|score| info!("game over at {score} points")),
        on_score_update: Box::new(|score| info!("score: {score}")),
        on_fps_update: Box::new(|fps| info!("fps: {fps}")),
    };
    let mut engine = GameEngine::new(surface, EngineConfig::default(), callbacks);

    engine.start(0.0);
    let mut now = 0.0;
    for frame in 0..FRAMES {
        // Scripted session: drift right for two seconds, firing the
        // whole time
        match frame {
            0 => engine.handle_event(InputEvent::KeyDown { key: Key::Right }),
            120 => engine.handle_event(InputEvent::KeyUp { key: Key::Right }),
            _ => {}
        }
        if frame % 15 == 0 {
            engine.handle_event(InputEvent::PointerDown {
                pos: Vec2::new(WIDTH as f32 / 2.0, 0.0),
            });
        }

        now += FRAME_MS;
        if let Err(e) = engine.frame(now) {
            warn!("stopping after frame error: {e}");
            break;
        }
    }
    engine.stop();

    info!(
        "done: score {}, {} enemies and {} projectiles alive, player at {:?}",
        engine.score(),
        engine.enemy_count(),
        engine.projectile_count(),
        engine.player_position()
    );
}
