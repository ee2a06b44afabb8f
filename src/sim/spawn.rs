//! Entity creation: enemies on a timer, drops from kills, particles, stars

use glam::Vec2;
use rand::Rng;

use super::entity::{Coin, Enemy, EnemyKind, Particle, PowerUp, PowerUpKind, Star};
use super::state::World;
use crate::consts::*;

/// Spawn interval at level 0 (ticks)
pub const BASE_SPAWN_INTERVAL: u32 = 60;
/// Interval reduction per level (ticks)
pub const SPAWN_INTERVAL_STEP: u32 = 2;
/// Fastest possible spawn interval (ticks)
pub const MIN_SPAWN_INTERVAL: u32 = 20;

/// Type rules: (minimum level, roll must exceed, kind). Evaluated in order and
/// the last matching rule wins, so a later rule may override an earlier one.
const KIND_RULES: [(u32, f32, EnemyKind); 4] = [
    (3, 0.7, EnemyKind::Fast),
    (5, 0.9, EnemyKind::Heavy),
    (8, 0.6, EnemyKind::Fast),
    (10, 0.8, EnemyKind::Heavy),
];

/// Ticks between enemy spawns at `level`
pub fn spawn_interval(level: u32) -> u32 {
    BASE_SPAWN_INTERVAL
        .saturating_sub(level.saturating_mul(SPAWN_INTERVAL_STEP))
        .max(MIN_SPAWN_INTERVAL)
}

/// Pick an enemy kind from the level and a uniform roll in [0, 1)
pub fn choose_enemy_kind(level: u32, roll: f32) -> EnemyKind {
    KIND_RULES
        .iter()
        .rev()
        .find(|(min_level, threshold, _)| level >= *min_level && roll > *threshold)
        .map(|(_, _, kind)| *kind)
        .unwrap_or(EnemyKind::Basic)
}

/// Count the spawn timer up and release an enemy when it runs out
pub fn tick_enemy_spawner(world: &mut World) {
    world.clock.spawn_timer += 1;
    if world.clock.spawn_timer > spawn_interval(world.progress.level) {
        spawn_enemy(world);
        world.clock.spawn_timer = 0;
    }
}

/// Create one enemy just above the top edge
pub fn spawn_enemy(world: &mut World) {
    let level = world.progress.level;
    let roll: f32 = world.rng.random();
    let kind = choose_enemy_kind(level, roll);
    let radius = kind.archetype().radius;
    let x = world.rng.random::<f32>() * (GAME_WIDTH - radius * 2.0) + radius;

    let id = world.next_entity_id();
    let enemy = Enemy::new(id, kind, level, Vec2::new(x, -radius));
    log::debug!("Spawned {:?} #{} at x={:.0}", kind, id, x);
    world.enemies.push(enemy);
}

/// Drop one coin
pub fn spawn_coin(world: &mut World, pos: Vec2) {
    let id = world.next_entity_id();
    world.coins.push(Coin::new(id, pos));
}

/// Roll the power-up drop for a kill
pub fn maybe_spawn_power_up(world: &mut World, pos: Vec2) {
    if world.rng.random::<f32>() >= POWERUP_DROP_CHANCE {
        return;
    }
    let kind = if world.rng.random_bool(0.5) {
        PowerUpKind::TripleShot
    } else {
        PowerUpKind::Shield
    };
    let id = world.next_entity_id();
    log::debug!("Dropped {:?} power-up", kind);
    world.power_ups.push(PowerUp::new(id, kind, pos));
}

/// Scatter `count` particles from `pos`, within the particle budget
pub fn burst_particles(world: &mut World, pos: Vec2, color: u32, count: usize) {
    let room = world
        .settings
        .max_particles()
        .saturating_sub(world.particles.len());
    for _ in 0..count.min(room) {
        let angle = world.rng.random::<f32>() * std::f32::consts::TAU;
        let speed = world.rng.random::<f32>() * 3.0 + 1.0;
        let radius = world.rng.random::<f32>() * 3.0 + 1.0;
        world.particles.push(Particle {
            pos,
            vel: crate::heading(angle) * speed,
            radius,
            color,
            life: 1.0,
        });
    }
}

fn random_star(rng: &mut impl Rng) -> Star {
    Star {
        pos: Vec2::new(
            rng.random::<f32>() * GAME_WIDTH,
            rng.random::<f32>() * GAME_HEIGHT,
        ),
        size: rng.random::<f32>() * 2.0,
        speed: rng.random::<f32>() * 2.0 + 0.5,
        opacity: rng.random(),
    }
}

/// Fill the starfield up to the configured count
pub fn populate_stars(world: &mut World) {
    let count = world.settings.star_count();
    while world.stars.len() < count {
        let star = random_star(&mut world.rng);
        world.stars.push(star);
    }
}

/// Scroll stars; ones leaving the bottom wrap to the top at a new x
pub fn scroll_stars(world: &mut World) {
    for star in &mut world.stars {
        if star.advance() {
            star.pos.y = 0.0;
            star.pos.x = world.rng.random::<f32>() * GAME_WIDTH;
        }
    }
}
