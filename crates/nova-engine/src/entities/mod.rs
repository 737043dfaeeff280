//! Simulated entities: the player avatar, pursuing enemies, and
//! player-fired projectiles.
//!
//! All three implement the [`Entity`] capability: a position/velocity pair
//! integrated each frame, a fixed collision radius and color, and a render
//! pass against the drawable surface. Per-kind behavior lives on the
//! concrete types; there is no inheritance hierarchy.

mod enemy;
mod player;
mod projectile;

pub use enemy::Enemy;
pub use player::Player;
pub use projectile::Projectile;

use glam::Vec2;

use crate::render::surface::{DrawSurface, Rgba};

/// Capability contract shared by every movable simulation object.
///
/// Radius and color are fixed at construction; position and velocity mutate
/// every frame. Velocity is in px/s, `update` receives milliseconds.
pub trait Entity {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn radius(&self) -> f32;
    fn color(&self) -> Rgba;
    fn update(&mut self, dt_ms: f64);
    fn render(&self, surface: &mut dyn DrawSurface);
}

/// Circle-circle overlap test: centers closer than the sum of radii.
/// Symmetric by construction.
pub fn collides_with(a: &dyn Entity, b: &dyn Entity) -> bool {
    a.position().distance(b.position()) < a.radius() + b.radius()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::EngineConfig;

    #[test]
    fn collision_is_symmetric() {
        let cfg = EngineConfig::default();
        let player = Player::new(Vec2::new(100.0, 100.0), &cfg);
        let enemy = Enemy::new(Vec2::new(110.0, 100.0), cfg.enemy_speed, 0.0);
        assert!(collides_with(&player, &enemy));
        assert!(collides_with(&enemy, &player));
    }

    #[test]
    fn distant_entities_do_not_collide() {
        let cfg = EngineConfig::default();
        let player = Player::new(Vec2::new(100.0, 100.0), &cfg);
        let enemy = Enemy::new(Vec2::new(400.0, 100.0), cfg.enemy_speed, 0.0);
        assert!(!collides_with(&player, &enemy));
    }

    #[test]
    fn touching_at_exact_sum_is_not_collision() {
        let cfg = EngineConfig::default();
        let player = Player::new(Vec2::new(0.0, 0.0), &cfg);
        // Player radius 15 + enemy radius 12 = 27
        let enemy = Enemy::new(Vec2::new(27.0, 0.0), cfg.enemy_speed, 0.0);
        assert!(!collides_with(&player, &enemy));
    }

    #[test]
    fn radii_and_colors_fixed_at_construction() {
        let cfg = EngineConfig::default();
        let player = Player::new(Vec2::ZERO, &cfg);
        let enemy = Enemy::new(Vec2::ZERO, cfg.enemy_speed, 1.0);
        let projectile = Projectile::new(Vec2::ZERO, Vec2::ZERO, 3000.0);
        for e in [&player as &dyn Entity, &enemy, &projectile] {
            assert!(e.radius() > 0.0);
            assert!(e.color().a > 0);
        }
    }
}
