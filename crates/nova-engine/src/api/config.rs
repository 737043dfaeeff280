use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;

/// Gameplay tunables, provided by the host.
///
/// Defaults are the stock game balance. All speeds are px/s, all
/// durations milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Player movement speed.
    pub player_speed: f32,
    /// Player clamp padding from each surface edge.
    pub player_padding: f32,
    /// Minimum time between successful shots.
    pub shot_cooldown_ms: f64,
    /// Projectile launch speed (straight up).
    pub projectile_speed: f32,
    /// Projectile lifetime before forced removal.
    pub projectile_lifetime_ms: f64,
    /// Enemy pursuit speed.
    pub enemy_speed: f32,
    /// Initial enemy spawn interval.
    pub spawn_interval_start_ms: f64,
    /// Interval reduction applied on each spawn.
    pub spawn_interval_step_ms: f64,
    /// Hard floor for the spawn interval.
    pub spawn_interval_floor_ms: f64,
    /// How far outside the visible bounds enemies spawn.
    pub spawn_edge_offset: f32,
    /// Touch displacement below this does not move the player.
    pub touch_deadzone: f32,
    /// Projectiles further than this outside the bounds are pruned.
    pub projectile_cull_margin: f32,
    /// Enemies further than this outside the bounds are pruned.
    pub enemy_cull_margin: f32,
    /// Score awarded per enemy kill.
    pub score_per_kill: u32,
    /// Seed for spawn positions and particle randomness.
    pub rng_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_speed: 300.0,
            player_padding: 20.0,
            shot_cooldown_ms: 200.0,
            projectile_speed: 500.0,
            projectile_lifetime_ms: 3000.0,
            enemy_speed: 80.0,
            spawn_interval_start_ms: 2000.0,
            spawn_interval_step_ms: 10.0,
            spawn_interval_floor_ms: 500.0,
            spawn_edge_offset: 50.0,
            touch_deadzone: 50.0,
            projectile_cull_margin: 50.0,
            enemy_cull_margin: 100.0,
            score_per_kill: 100,
            rng_seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}
