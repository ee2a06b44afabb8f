//! Interstellar Pioneers - top-down arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (movement, spawning, collisions, progression)
//! - `platform`: Browser/native abstraction (storage, clock, key mapping, logging)
//! - `persistence`: Coin balance load/save
//! - `settings`: Cosmetic effect preferences

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use persistence::CoinWallet;
pub use settings::{EffectsPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (y grows downward)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Nominal host frame rate; the simulation itself counts ticks
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Nominal frame length handed to `tick` by fixed-rate hosts
    pub const FRAME_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u8 = 3;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 50.0;
    /// Invincibility window after a hit (ticks)
    pub const INVINCIBILITY_TICKS: u32 = 120;

    /// Bullets
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_DAMAGE: f32 = 1.0;
    /// Wall-clock gap between shots (ms)
    pub const SHOT_COOLDOWN_MS: f64 = 200.0;
    /// Angular offset of the side bullets while triple-shot is active
    pub const TRIPLE_SHOT_SPREAD: f32 = 0.2;
    /// Triple-shot buff duration (ticks, 10 seconds at 60 Hz)
    pub const TRIPLE_SHOT_TICKS: u32 = 600;

    /// A player bullet this close to any enemy center detonates
    pub const PROXIMITY_FUSE_RADIUS: f32 = 60.0;

    /// Power-ups and coins
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_SPEED: f32 = 1.5;
    pub const POWERUP_DROP_CHANCE: f32 = 0.1;
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_SPEED: f32 = 1.0;
    pub const COIN_VALUE: u32 = 1;

    /// Ability meter
    pub const CHARGE_MAX: u32 = 100;

    /// Background starfield size
    pub const STAR_COUNT: usize = 100;
}

/// Unit vector for a travel angle (radians, screen space)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a point so a circle of `radius` stays inside the playfield
#[inline]
pub fn clamp_to_playfield(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, consts::GAME_WIDTH - radius),
        pos.y.clamp(radius, consts::GAME_HEIGHT - radius),
    )
}

/// Whether a point lies inside the playfield rectangle (edges inclusive)
#[inline]
pub fn in_playfield(pos: Vec2) -> bool {
    (0.0..=consts::GAME_WIDTH).contains(&pos.x) && (0.0..=consts::GAME_HEIGHT).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_straight_up() {
        let dir = heading(-std::f32::consts::FRAC_PI_2);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_to_playfield() {
        let p = clamp_to_playfield(Vec2::new(-10.0, 900.0), 20.0);
        assert_eq!(p, Vec2::new(20.0, consts::GAME_HEIGHT - 20.0));
    }

    #[test]
    fn test_in_playfield_edges() {
        assert!(in_playfield(Vec2::new(0.0, consts::GAME_HEIGHT)));
        assert!(!in_playfield(Vec2::new(-0.1, 10.0)));
        assert!(!in_playfield(Vec2::new(10.0, consts::GAME_HEIGHT + 0.1)));
    }
}
