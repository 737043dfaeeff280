//! Frame loop orchestration: input capture, spawning, collision detection,
//! lifecycle cleanup, scoring, and per-frame composition of every subsystem.

use std::f32::consts::TAU;

use glam::Vec2;
use log::{debug, error, info};

use crate::api::callbacks::EngineCallbacks;
use crate::api::config::EngineConfig;
use crate::core::clock::FrameClock;
use crate::core::error::EngineError;
use crate::core::rng::Rng;
use crate::entities::{collides_with, Enemy, Entity, Player, Projectile};
use crate::input::queue::{InputEvent, InputQueue, Key};
use crate::input::state::InputState;
use crate::render::surface::{DrawSurface, Rgba};
use crate::systems::lighting::LightingSystem;
use crate::systems::particles::{ParticleSpec, ParticleSystem};

/// The simulation engine.
///
/// Single-threaded and host-driven: the host's frame scheduler calls
/// [`frame`] with a monotonic timestamp; event handlers feed
/// [`handle_event`] between frames. There is no internal thread and no
/// concurrent mutation. The queue is the only state shared with handlers,
/// and it is drained exactly once per frame.
///
/// Reaching the game-over collision invokes the callback but does not stop
/// the loop; the host decides when to call [`stop`].
///
/// [`frame`]: GameEngine::frame
/// [`handle_event`]: GameEngine::handle_event
/// [`stop`]: GameEngine::stop
pub struct GameEngine<S: DrawSurface> {
    surface: S,
    callbacks: EngineCallbacks,
    config: EngineConfig,
    running: bool,
    clock: FrameClock,

    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    particles: ParticleSystem,
    lighting: LightingSystem,

    input_queue: InputQueue,
    input: InputState,
    rng: Rng,

    score: u32,
    level: u32,
    spawn_timer_ms: f64,
    spawn_interval_ms: f64,
}

impl<S: DrawSurface> GameEngine<S> {
    /// Light halo radii/intensities per entity kind.
    const PLAYER_LIGHT: (f32, f32) = (100.0, 0.8);
    const ENEMY_LIGHT: (f32, f32) = (60.0, 0.6);
    const PROJECTILE_LIGHT: (f32, f32) = (30.0, 1.0);

    pub fn new(surface: S, config: EngineConfig, callbacks: EngineCallbacks) -> Self {
        let center = Vec2::new(surface.width() as f32 / 2.0, surface.height() as f32 / 2.0);
        let lighting = LightingSystem::new(surface.width(), surface.height());
        let spawn_interval_ms = config.spawn_interval_start_ms;
        Self {
            player: Player::new(center, &config),
            particles: ParticleSystem::new(config.rng_seed),
            rng: Rng::new(config.rng_seed.wrapping_mul(0x9e37_79b9)),
            lighting,
            surface,
            callbacks,
            config,
            running: false,
            clock: FrameClock::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            input_queue: InputQueue::new(),
            input: InputState::new(),
            score: 0,
            level: 1,
            spawn_timer_ms: 0.0,
            spawn_interval_ms,
        }
    }

    /// Begin (or restart) the loop. Calling while already running resets
    /// frame timing but keeps all simulation state.
    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            info!("engine already running, restarting frame timing");
        } else {
            info!("engine started");
        }
        self.running = true;
        self.clock.start(now_ms);
    }

    /// Halt scheduling of further frames. Safe to call at any time;
    /// subsequent [`frame`](GameEngine::frame) calls are no-ops.
    pub fn stop(&mut self) {
        self.running = false;
        info!("engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record a host input event for the next frame's input pass.
    pub fn handle_event(&mut self, event: InputEvent) {
        self.input_queue.push(event);
    }

    /// Re-fit the drawing surface to the host's viewport. The lighting
    /// buffer follows at the next frame.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        debug!("surface resized to {}x{}", width, height);
    }

    /// Run one frame: update, then render. Any error is logged and
    /// fail-stops the loop; a corrupted frame is never retried.
    pub fn frame(&mut self, now_ms: f64) -> Result<(), EngineError> {
        if !self.running {
            return Ok(());
        }

        let timing = self.clock.tick(now_ms);
        if let Some(fps) = timing.fps {
            (self.callbacks.on_fps_update)(fps);
        }

        let result = self
            .update(timing.dt_ms, now_ms)
            .and_then(|()| self.render(now_ms));
        if let Err(e) = &result {
            error!("frame failed, stopping engine: {e}");
            self.running = false;
        }
        result
    }

    fn update(&mut self, dt_ms: f64, now_ms: f64) -> Result<(), EngineError> {
        if !dt_ms.is_finite() || !now_ms.is_finite() {
            return Err(EngineError::Frame(format!(
                "non-finite frame time: dt={dt_ms} now={now_ms}"
            )));
        }
        let (width, height) = self.surface_size();

        // Input: drain the queue once, fold into held state, fire on
        // click/fire-key edges.
        for event in self.input_queue.drain() {
            match event {
                InputEvent::KeyDown { key: Key::Fire } | InputEvent::PointerDown { .. } => {
                    self.player.shoot(now_ms);
                }
                _ => {}
            }
            self.input.apply(event);
        }
        let velocity = self.input.desired_velocity(
            self.player.position(),
            self.config.player_speed,
            self.config.touch_deadzone,
        );
        self.player.set_velocity(velocity);

        self.player.update(dt_ms);
        if !self.player.position().is_finite() {
            return Err(EngineError::Frame(
                "player position is not finite".to_string(),
            ));
        }
        self.player
            .clamp_to_bounds(width, height, self.config.player_padding);

        // Spawning gets faster over time, down to a hard floor.
        self.spawn_timer_ms += dt_ms;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_enemy();
            self.spawn_timer_ms = 0.0;
            self.spawn_interval_ms = (self.spawn_interval_ms - self.config.spawn_interval_step_ms)
                .max(self.config.spawn_interval_floor_ms);
        }

        // Pure pursuit: every enemy re-aims at the player's current
        // position after integrating.
        let player_pos = self.player.position();
        for enemy in &mut self.enemies {
            enemy.update(dt_ms);
            enemy.move_towards(player_pos);
        }

        for projectile in &mut self.projectiles {
            projectile.update(dt_ms);
        }

        self.check_collisions();
        self.cleanup(width, height);

        self.particles.update(dt_ms);
        self.lighting
            .begin_frame(self.surface.width(), self.surface.height());
        self.lighting.update(now_ms);

        Ok(())
    }

    fn render(&mut self, _now_ms: f64) -> Result<(), EngineError> {
        self.surface.clear(Rgba::BACKGROUND);

        let (radius, intensity) = Self::PLAYER_LIGHT;
        self.lighting
            .add_light(self.player.position(), radius, Rgba::INDIGO, intensity);
        for enemy in &self.enemies {
            let (radius, intensity) = Self::ENEMY_LIGHT;
            self.lighting
                .add_light(enemy.position(), radius, Rgba::BLAST_RED, intensity);
        }
        for projectile in &self.projectiles {
            let (radius, intensity) = Self::PROJECTILE_LIGHT;
            self.lighting
                .add_light(projectile.position(), radius, Rgba::AMBER, intensity);
        }

        self.player.render(&mut self.surface);
        for enemy in &self.enemies {
            enemy.render(&mut self.surface);
        }
        for projectile in &self.projectiles {
            projectile.render(&mut self.surface);
        }
        self.particles.render(&mut self.surface);
        self.lighting.apply(&mut self.surface);

        // Newly fired shots join the simulation next frame.
        self.projectiles.extend(self.player.drain_projectiles());

        Ok(())
    }

    /// Circle-circle collision pass, O(enemies × projectiles).
    ///
    /// Removal is deferred to keep indices valid through the whole pass:
    /// the first processed projectile claims an enemy, later pairs against
    /// a claimed entity are skipped.
    fn check_collisions(&mut self) {
        let mut enemy_dead = vec![false; self.enemies.len()];
        let mut projectile_dead = vec![false; self.projectiles.len()];
        let mut explosions: Vec<(Vec2, Rgba, u32)> = Vec::new();
        let mut player_hit = false;

        for ei in 0..self.enemies.len() {
            if !player_hit && collides_with(&self.player, &self.enemies[ei]) {
                player_hit = true;
                explosions.push((self.player.position(), Rgba::BLAST_RED, 20));
                let score = self.score;
                (self.callbacks.on_game_over)(score);
                continue;
            }

            for pi in 0..self.projectiles.len() {
                if enemy_dead[ei] || projectile_dead[pi] {
                    continue;
                }
                if collides_with(&self.projectiles[pi], &self.enemies[ei]) {
                    enemy_dead[ei] = true;
                    projectile_dead[pi] = true;
                    explosions.push((self.enemies[ei].position(), Rgba::BLAST_GREEN, 15));
                    self.score += self.config.score_per_kill;
                    let score = self.score;
                    (self.callbacks.on_score_update)(score);
                }
            }
        }

        let mut ei = 0;
        self.enemies.retain(|_| {
            let dead = enemy_dead[ei];
            ei += 1;
            !dead
        });
        let mut pi = 0;
        self.projectiles.retain(|_| {
            let dead = projectile_dead[pi];
            pi += 1;
            !dead
        });

        for (position, color, count) in explosions {
            self.explode(position, color, count);
        }
    }

    /// Radial explosion burst: evenly spaced angles, randomized speed,
    /// life and size.
    fn explode(&mut self, position: Vec2, color: Rgba, count: u32) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = self.rng.range(100.0, 300.0);
            self.particles.emit(ParticleSpec {
                position,
                velocity: Vec2::from_angle(angle) * speed,
                color,
                life_ms: 1000.0 + self.rng.range(0.0, 500.0) as f64,
                size: self.rng.range(2.0, 6.0),
            });
        }
    }

    /// Prune entities past their removal conditions. Runs every frame, so
    /// nothing outlives its condition by more than one frame.
    fn cleanup(&mut self, width: f32, height: f32) {
        let margin = self.config.projectile_cull_margin;
        self.projectiles
            .retain(|p| !p.is_expired() && !p.is_offscreen(width, height, margin));

        let margin = self.config.enemy_cull_margin;
        self.enemies
            .retain(|e| !e.is_offscreen(width, height, margin));
    }

    /// Spawn an enemy just outside a uniformly chosen screen edge, with
    /// the perpendicular coordinate uniform along that edge.
    fn spawn_enemy(&mut self) {
        let (width, height) = self.surface_size();
        let offset = self.config.spawn_edge_offset;
        let position = match self.rng.next_int(4) {
            0 => Vec2::new(self.rng.range(0.0, width), -offset),
            1 => Vec2::new(width + offset, self.rng.range(0.0, height)),
            2 => Vec2::new(self.rng.range(0.0, width), height + offset),
            _ => Vec2::new(-offset, self.rng.range(0.0, height)),
        };
        self.spawn_enemy_at(position);
    }

    /// Inject an enemy at an explicit position. Timer-driven spawning uses
    /// the screen edges; hosts can use this for scripted waves.
    pub fn spawn_enemy_at(&mut self, position: Vec2) {
        let phase = self.rng.next_f32() * TAU;
        self.enemies
            .push(Enemy::new(position, self.config.enemy_speed, phase));
        debug!("enemy spawned at {:?}", position);
    }

    fn surface_size(&self) -> (f32, f32) {
        (self.surface.width() as f32, self.surface.height() as f32)
    }

    // -- Host/debug accessors --

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Informational only; difficulty comes from the spawn interval.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawn_interval_ms
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.position()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
