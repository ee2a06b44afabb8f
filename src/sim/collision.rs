//! Collision resolution
//!
//! Every gameplay entity is a circle, so a single overlap test covers every pair.
//! Most passes scan first, then apply the results and prune with `retain`, so
//! nothing is removed from a collection while it is being iterated. Direct hits
//! settle one bullet at a time because a kill can clear the screen.

use glam::Vec2;

use super::entity::{Circle, Enemy, PowerUpKind, SHOCKWAVE_RING_DAMAGE, Shockwave};
use super::spawn;
use super::state::World;
use crate::consts::*;
use crate::in_playfield;

/// Circle-circle overlap (strict, symmetric)
#[inline]
pub fn overlaps(a: &impl Circle, b: &impl Circle) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// What destroyed an enemy; decides the reward details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KillCause {
    DirectHit,
    Shockwave,
    Ability,
}

impl KillCause {
    fn charge(self) -> u32 {
        match self {
            KillCause::DirectHit => 2,
            KillCause::Shockwave => 1,
            KillCause::Ability => 0,
        }
    }

    fn particles(self) -> usize {
        match self {
            KillCause::DirectHit => 15,
            KillCause::Shockwave | KillCause::Ability => 10,
        }
    }

    fn rolls_power_up(self) -> bool {
        !matches!(self, KillCause::Ability)
    }
}

/// Reward a kill for an enemy already taken out of `world.enemies`
///
/// Returns true when the kill pushed the player over the level threshold; the
/// screen has then been cleared and the caller must stop handing out kills.
pub(crate) fn destroy_enemy(world: &mut World, enemy: &Enemy, cause: KillCause) -> bool {
    world
        .progress
        .add_score(enemy.score_value, &mut world.achievements, &mut world.events);
    world
        .progress
        .record_kill(&mut world.achievements, &mut world.events);

    spawn::spawn_coin(world, enemy.pos);
    spawn::burst_particles(world, enemy.pos, enemy.color, cause.particles());
    if cause.rolls_power_up() {
        spawn::maybe_spawn_power_up(world, enemy.pos);
    }
    world.player.add_charge(cause.charge());

    if world
        .progress
        .try_level_up(&mut world.achievements, &mut world.events)
    {
        world.enemies.clear();
        return true;
    }
    false
}

/// Settle a batch of deaths in the order they happened
pub(crate) fn settle_kills(world: &mut World, dead: &[u32], cause: KillCause) {
    for id in dead {
        let Some(index) = world.enemies.iter().position(|e| e.id == *id) else {
            continue;
        };
        let enemy = world.enemies.remove(index);
        if destroy_enemy(world, &enemy, cause) {
            break;
        }
    }
}

/// Run every collision pass for one tick
///
/// Stops right after the player-contact pass if the player ran out of health.
pub fn resolve(world: &mut World) {
    detonate_near_misses(world);
    world.bullets.retain(|b| in_playfield(b.pos));

    resolve_enemy_exits(world);
    resolve_player_contacts(world);
    if world.player.health == 0 {
        return;
    }

    collect_power_ups(world);
    collect_coins(world);
    resolve_direct_hits(world);
    resolve_shockwaves(world);
}

/// Player bullets that pass near an enemy explode without touching it
pub(crate) fn detonate_near_misses(world: &mut World) {
    let mut blasts: Vec<Vec2> = Vec::new();
    let enemies = &world.enemies;
    world.bullets.retain(|bullet| {
        let near = bullet.is_player_bullet
            && enemies
                .iter()
                .any(|e| bullet.pos.distance(e.pos) < PROXIMITY_FUSE_RADIUS);
        if near {
            blasts.push(bullet.pos);
        }
        !near
    });
    world.shockwaves.extend(blasts.into_iter().map(Shockwave::impact));
}

/// Enemies past the bottom edge cost points
pub(crate) fn resolve_enemy_exits(world: &mut World) {
    let before = world.enemies.len();
    world.enemies.retain(|e| !e.escaped());
    for _ in world.enemies.len()..before {
        world.progress.penalize_escape();
    }
}

/// Enemies ramming the player
pub(crate) fn resolve_player_contacts(world: &mut World) {
    let mut i = 0;
    while i < world.enemies.len() {
        if world.player.is_invincible() || !overlaps(&world.player, &world.enemies[i]) {
            i += 1;
            continue;
        }

        let enemy = world.enemies.remove(i);
        let player = &mut world.player;
        if player.power_ups.shield {
            player.power_ups.shield = false;
            log::debug!("Shield absorbed a hit");
        } else {
            player.health = player.health.saturating_sub(1);
        }
        player.invincible_ticks = INVINCIBILITY_TICKS;
        spawn::burst_particles(world, enemy.pos, enemy.color, 10);

        if world.player.health == 0 {
            return;
        }
    }
}

pub(crate) fn collect_power_ups(world: &mut World) {
    let player = &world.player;
    let mut taken: Vec<PowerUpKind> = Vec::new();
    world.power_ups.retain(|p| {
        if overlaps(player, p) {
            taken.push(p.kind);
            return false;
        }
        !p.off_screen()
    });

    for kind in taken {
        match kind {
            PowerUpKind::TripleShot => world.player.power_ups.triple_shot_ticks = TRIPLE_SHOT_TICKS,
            PowerUpKind::Shield => world.player.power_ups.shield = true,
        }
        world
            .progress
            .record_pickup(&mut world.achievements, &mut world.events);
    }
}

pub(crate) fn collect_coins(world: &mut World) {
    let player = &world.player;
    let mut value = 0;
    world.coins.retain(|c| {
        if overlaps(player, c) {
            value += c.value;
            return false;
        }
        !c.off_screen()
    });
    if value > 0 {
        world.ledger.deposit(value);
    }
}

/// Player bullets striking an enemy body
///
/// Each bullet damages the first enemy it overlaps and is consumed. A kill is
/// rewarded before the next bullet is checked, so bullets behind a level-up
/// clear find nothing and keep flying.
pub(crate) fn resolve_direct_hits(world: &mut World) {
    let mut i = 0;
    while i < world.bullets.len() {
        let bullet = &world.bullets[i];
        let target = if bullet.is_player_bullet {
            world.enemies.iter().position(|e| overlaps(bullet, e))
        } else {
            None
        };
        let Some(index) = target else {
            i += 1;
            continue;
        };

        let bullet = world.bullets.remove(i);
        world.shockwaves.push(Shockwave::impact(bullet.pos));
        let enemy = &mut world.enemies[index];
        enemy.take_damage(bullet.damage);
        if enemy.is_dead() {
            let enemy = world.enemies.remove(index);
            destroy_enemy(world, &enemy, KillCause::DirectHit);
        }
    }
}

/// Grow each shockwave and let its ring wear down enemies
pub(crate) fn resolve_shockwaves(world: &mut World) {
    for i in 0..world.shockwaves.len() {
        world.shockwaves[i].advance();
        let wave = &world.shockwaves[i];

        let mut dead: Vec<u32> = Vec::new();
        for enemy in world.enemies.iter_mut() {
            if wave.ring_contains(enemy.pos) {
                enemy.take_damage(SHOCKWAVE_RING_DAMAGE);
                if enemy.is_dead() {
                    dead.push(enemy.id);
                }
            }
        }
        settle_kills(world, &dead, KillCause::Shockwave);
    }
    world.shockwaves.retain(|sw| !sw.is_spent());
}
