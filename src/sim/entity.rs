//! Entity types and their per-type motion rules
//!
//! Every gameplay entity is a circle: a center, a radius and a color hint for the
//! presentation layer. Colors never affect behavior.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_to_playfield, heading};

/// Straight up in screen space
pub const UP: f32 = -std::f32::consts::FRAC_PI_2;

/// Anything that takes part in circle-circle collision tests
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

macro_rules! impl_circle {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Circle for $ty {
                #[inline]
                fn center(&self) -> Vec2 {
                    self.pos
                }
                #[inline]
                fn radius(&self) -> f32 {
                    self.radius
                }
            }
        )*
    };
}

impl_circle!(Player, Enemy, Bullet, PowerUp, Coin);

/// Active player buffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPowerUps {
    /// Ticks of triple-fire left (0 = inactive)
    pub triple_shot_ticks: u32,
    pub shield: bool,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub speed: f32,
    pub health: u8,
    pub max_health: u8,
    /// Ticks of invincibility left
    pub invincible_ticks: u32,
    pub power_ups: PlayerPowerUps,
    /// Ability meter, 0..=CHARGE_MAX
    pub charge: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT - PLAYER_SPAWN_OFFSET),
            radius: PLAYER_RADIUS,
            color: 0x60a5fa,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invincible_ticks: 0,
            power_ups: PlayerPowerUps::default(),
            charge: 0,
        }
    }
}

impl Player {
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn has_triple_shot(&self) -> bool {
        self.power_ups.triple_shot_ticks > 0
    }

    /// Move by a held-direction vector (components in -1..=1), then clamp
    pub fn steer(&mut self, direction: Vec2) {
        self.pos = clamp_to_playfield(self.pos + direction * self.speed, self.radius);
    }

    /// Place directly (pointer/touch hosts), then clamp
    pub fn place(&mut self, pos: Vec2) {
        self.pos = clamp_to_playfield(pos, self.radius);
    }

    /// Count down buffs and invincibility by one tick
    pub fn tick_timers(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.power_ups.triple_shot_ticks = self.power_ups.triple_shot_ticks.saturating_sub(1);
    }

    /// Add ability charge, capped at the meter maximum
    pub fn add_charge(&mut self, amount: u32) {
        self.charge = (self.charge + amount).min(CHARGE_MAX);
    }

    /// Bullet travel angles for one trigger pull
    pub fn firing_angles(&self) -> &'static [f32] {
        const SINGLE: [f32; 1] = [UP];
        const TRIPLE: [f32; 3] = [UP, UP - TRIPLE_SHOT_SPREAD, UP + TRIPLE_SHOT_SPREAD];
        if self.has_triple_shot() { &TRIPLE } else { &SINGLE }
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
}

/// Fixed per-archetype stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyArchetype {
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub score_value: u64,
    pub color: u32,
}

impl EnemyKind {
    pub const fn archetype(self) -> EnemyArchetype {
        match self {
            EnemyKind::Basic => EnemyArchetype {
                radius: 15.0,
                speed: 2.0,
                health: 1.0,
                score_value: 100,
                color: 0x3b82f6,
            },
            EnemyKind::Fast => EnemyArchetype {
                radius: 12.0,
                speed: 4.0,
                health: 1.0,
                score_value: 150,
                color: 0x10b981,
            },
            EnemyKind::Heavy => EnemyArchetype {
                radius: 25.0,
                speed: 1.0,
                health: 3.0,
                score_value: 300,
                color: 0xef4444,
            },
        }
    }
}

/// A hostile ship descending from the top edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub speed: f32,
    pub health: f32,
    pub score_value: u64,
}

impl Enemy {
    /// Build an enemy of `kind` scaled to `level`
    pub fn new(id: u32, kind: EnemyKind, level: u32, pos: Vec2) -> Self {
        let base = kind.archetype();
        Self {
            id,
            kind,
            pos,
            radius: base.radius,
            color: base.color,
            speed: base.speed + level as f32 * 0.2,
            health: base.health + (level / 5) as f32,
            score_value: base.score_value,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Fully below the bottom edge
    pub fn escaped(&self) -> bool {
        self.pos.y > GAME_HEIGHT + self.radius
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub speed: f32,
    pub damage: f32,
    pub is_player_bullet: bool,
    /// Travel angle in radians (screen space, `UP` by default)
    pub angle: f32,
}

impl Bullet {
    pub fn player(id: u32, pos: Vec2, angle: f32) -> Self {
        Self {
            id,
            pos,
            radius: BULLET_RADIUS,
            color: 0xfbbf24,
            speed: BULLET_SPEED,
            damage: BULLET_DAMAGE,
            is_player_bullet: true,
            angle,
        }
    }

    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    Shield,
}

impl PowerUpKind {
    pub const fn color(self) -> u32 {
        match self {
            PowerUpKind::TripleShot => 0xf59e0b,
            PowerUpKind::Shield => 0x8b5cf6,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub speed: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWERUP_RADIUS,
            color: kind.color(),
            speed: POWERUP_SPEED,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y > GAME_HEIGHT
    }
}

/// A falling coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub speed: f32,
    pub value: u32,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: COIN_RADIUS,
            color: 0xfbbf24,
            speed: COIN_SPEED,
            value: COIN_VALUE,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y > GAME_HEIGHT
    }
}

/// Life lost per tick
pub const PARTICLE_FADE_PER_TICK: f32 = 0.02;

/// A particle for visual effects (no gameplay effect)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        self.life.max(0.0)
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= PARTICLE_FADE_PER_TICK;
    }

    pub fn is_spent(&self) -> bool {
        self.life <= 0.0
    }
}

/// Radius gained per tick
pub const SHOCKWAVE_GROWTH_PER_TICK: f32 = 5.0;
/// Alpha lost per tick
pub const SHOCKWAVE_FADE_PER_TICK: f32 = 0.025;
/// Ticks until alpha reaches zero (1.0 / SHOCKWAVE_FADE_PER_TICK)
pub const SHOCKWAVE_LIFETIME_TICKS: u32 = 40;
/// Half-width of the damaging band around the ring
pub const SHOCKWAVE_RING_HALF_WIDTH: f32 = 20.0;
/// Damage per tick to enemies inside the band
pub const SHOCKWAVE_RING_DAMAGE: f32 = 0.2;
/// Nominal extent of impact shockwaves (render hint)
pub const IMPACT_SHOCKWAVE_RADIUS: f32 = 100.0;

/// An expanding, fading ring
///
/// Alpha is derived from the tick age so the lifetime is exact: a fresh
/// shockwave is spent after `SHOCKWAVE_LIFETIME_TICKS` advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shockwave {
    pub pos: Vec2,
    pub radius: f32,
    /// Render hint; growth is not capped by it
    pub max_radius: f32,
    pub color: u32,
    age_ticks: u32,
}

impl Shockwave {
    pub fn new(pos: Vec2, max_radius: f32, color: u32) -> Self {
        Self {
            pos,
            radius: 0.0,
            max_radius,
            color,
            age_ticks: 0,
        }
    }

    /// Impact burst from a bullet hit or detonation
    pub fn impact(pos: Vec2) -> Self {
        Self::new(pos, IMPACT_SHOCKWAVE_RADIUS, 0xfbbf24)
    }

    pub fn alpha(&self) -> f32 {
        (1.0 - self.age_ticks as f32 * SHOCKWAVE_FADE_PER_TICK).max(0.0)
    }

    pub fn advance(&mut self) {
        self.radius += SHOCKWAVE_GROWTH_PER_TICK;
        self.age_ticks += 1;
    }

    pub fn is_spent(&self) -> bool {
        self.age_ticks >= SHOCKWAVE_LIFETIME_TICKS
    }

    /// Whether a point lies strictly inside the damaging band
    pub fn ring_contains(&self, point: Vec2) -> bool {
        let dist = self.pos.distance(point);
        dist > self.radius - SHOCKWAVE_RING_HALF_WIDTH && dist < self.radius + SHOCKWAVE_RING_HALF_WIDTH
    }
}

/// Background star (cosmetic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
}

impl Star {
    /// Scroll down; returns true when the star left the bottom and must wrap
    pub fn advance(&mut self) -> bool {
        self.pos.y += self.speed;
        self.pos.y > GAME_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_scaling_by_level() {
        let e = Enemy::new(1, EnemyKind::Heavy, 10, Vec2::ZERO);
        assert!((e.speed - 3.0).abs() < 1e-5);
        assert_eq!(e.health, 5.0);
        assert_eq!(e.score_value, 300);

        let e = Enemy::new(2, EnemyKind::Basic, 4, Vec2::ZERO);
        assert_eq!(e.health, 1.0);
    }

    #[test]
    fn test_enemy_escape_boundary() {
        let mut e = Enemy::new(1, EnemyKind::Basic, 0, Vec2::new(100.0, GAME_HEIGHT + 15.0));
        assert!(!e.escaped());
        e.advance();
        assert!(e.escaped());
    }

    #[test]
    fn test_player_steer_clamps() {
        let mut p = Player::default();
        for _ in 0..500 {
            p.steer(Vec2::new(-1.0, 1.0));
        }
        assert_eq!(p.pos, Vec2::new(p.radius, GAME_HEIGHT - p.radius));
    }

    #[test]
    fn test_player_charge_caps() {
        let mut p = Player::default();
        p.add_charge(99);
        p.add_charge(2);
        assert_eq!(p.charge, CHARGE_MAX);
    }

    #[test]
    fn test_firing_angles() {
        let mut p = Player::default();
        assert_eq!(p.firing_angles().len(), 1);
        p.power_ups.triple_shot_ticks = 1;
        assert_eq!(p.firing_angles().len(), 3);
        p.tick_timers();
        assert_eq!(p.firing_angles(), &[UP]);
    }

    #[test]
    fn test_bullet_moves_up_by_default() {
        let mut b = Bullet::player(1, Vec2::new(100.0, 100.0), UP);
        b.advance();
        assert!((b.pos.x - 100.0).abs() < 1e-4);
        assert!((b.pos.y - 93.0).abs() < 1e-4);
    }

    #[test]
    fn test_shockwave_lifetime() {
        let mut sw = Shockwave::impact(Vec2::ZERO);
        for _ in 0..39 {
            sw.advance();
        }
        assert!(!sw.is_spent());
        assert!(sw.alpha() > 0.0);
        sw.advance();
        assert!(sw.is_spent());
        assert_eq!(sw.alpha(), 0.0);
        assert_eq!(sw.radius, 200.0);
    }

    #[test]
    fn test_shockwave_ring_band_is_strict() {
        let mut sw = Shockwave::impact(Vec2::ZERO);
        for _ in 0..6 {
            sw.advance();
        }
        // radius 30: band is (10, 50)
        assert!(sw.ring_contains(Vec2::new(30.0, 0.0)));
        assert!(!sw.ring_contains(Vec2::new(10.0, 0.0)));
        assert!(!sw.ring_contains(Vec2::new(50.0, 0.0)));
        assert!(sw.ring_contains(Vec2::new(0.0, 49.0)));
    }

    #[test]
    fn test_star_wraps_signal() {
        let mut s = Star {
            pos: Vec2::new(10.0, GAME_HEIGHT - 0.5),
            size: 1.0,
            speed: 1.0,
            opacity: 0.5,
        };
        assert!(s.advance());
    }
}
