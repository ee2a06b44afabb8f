//! Fixed-step simulation tick
//!
//! One call advances the world by one logical step: input, movement, spawning,
//! collisions and the ability, level bookkeeping, pruning, then notifications.

use glam::Vec2;

use super::ability;
use super::collision;
use super::entity::Bullet;
use super::events::GameEvent;
use super::spawn;
use super::state::{GamePhase, Hud, World};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Trigger held
    pub fire: bool,
    /// Ability trigger
    pub ability: bool,
    /// Pointer/touch position; places the player directly when present
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Held-direction vector, components in -1..=1
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the world by one step
///
/// `elapsed_ms` is the host's frame time and only drives the firing cooldown.
/// Outside active play this is a no-op that returns no events.
pub fn tick(world: &mut World, input: &TickInput, elapsed_ms: f64) -> Vec<GameEvent> {
    if world.phase != GamePhase::Playing {
        return Vec::new();
    }

    let before = world.hud();
    let milestone_latched = world.progress.milestone_reached;
    world.clock.now_ms += elapsed_ms.max(0.0);
    world.clock.ticks += 1;

    // Player
    match input.pointer {
        Some(pos) => world.player.place(pos),
        None => world.player.steer(input.direction()),
    }
    if input.fire {
        fire(world);
    }
    world.player.tick_timers();

    spawn::tick_enemy_spawner(world);
    advance_entities(world);

    if input.ability {
        ability::activate(world);
    }

    collision::resolve(world);
    if world.player.health == 0 {
        publish_hud_changes(world, before);
        world.end_session();
        return world.drain_events();
    }

    if world
        .progress
        .try_level_up(&mut world.achievements, &mut world.events)
    {
        world.enemies.clear();
    }

    world.particles.retain(|p| !p.is_spent());

    publish_hud_changes(world, before);
    if world.progress.milestone_reached && !milestone_latched {
        world.phase = GamePhase::Milestone;
    }
    world.drain_events()
}

/// Shoot if the cooldown allows it
fn fire(world: &mut World) {
    let now = world.clock.now_ms;
    let ready = match world.clock.last_shot_ms {
        Some(last) => now - last > SHOT_COOLDOWN_MS,
        None => true,
    };
    if !ready {
        return;
    }

    let origin = world.player.pos;
    for &angle in world.player.firing_angles() {
        let id = world.next_entity_id();
        world.bullets.push(Bullet::player(id, origin, angle));
    }
    world.clock.last_shot_ms = Some(now);
}

fn advance_entities(world: &mut World) {
    spawn::scroll_stars(world);
    for bullet in &mut world.bullets {
        bullet.advance();
    }
    for enemy in &mut world.enemies {
        enemy.advance();
    }
    for power_up in &mut world.power_ups {
        power_up.advance();
    }
    for coin in &mut world.coins {
        coin.advance();
    }
    for particle in &mut world.particles {
        particle.advance();
    }
}

/// Queue a change event for each HUD number that moved this tick
fn publish_hud_changes(world: &mut World, before: Hud) {
    let after = world.hud();
    if after.score != before.score {
        world.events.push(GameEvent::ScoreChanged(after.score));
    }
    if after.health != before.health {
        world.events.push(GameEvent::HealthChanged(after.health));
    }
    if after.coins != before.coins {
        world.events.push(GameEvent::CoinsChanged(after.coins));
    }
    if after.charge != before.charge {
        world.events.push(GameEvent::ChargeChanged(after.charge));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Enemy, EnemyKind, Shockwave};
    use crate::sim::progress::AchievementId;

    fn playing_world(seed: u64) -> World {
        let mut world = World::with_seed(seed);
        world.start();
        world
    }

    fn add_enemy(world: &mut World, kind: EnemyKind, pos: Vec2) {
        let id = world.next_entity_id();
        world.enemies.push(Enemy::new(id, kind, 0, pos));
    }

    fn count_milestones(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::MilestoneReached))
            .count()
    }

    #[test]
    fn test_tick_is_noop_unless_playing() {
        let mut world = World::with_seed(1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        assert!(tick(&mut world, &input, FRAME_MS).is_empty());
        assert_eq!(world.clock.ticks, 0);

        world.start();
        world.pause();
        assert!(tick(&mut world, &input, FRAME_MS).is_empty());
        assert!(world.bullets.is_empty());
        assert_eq!(world.clock.ticks, 0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut world = playing_world(1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input, FRAME_MS);
        assert_eq!(world.bullets.len(), 1);

        // Eleven more frames is still inside the cooldown
        for _ in 0..11 {
            tick(&mut world, &input, FRAME_MS);
        }
        assert_eq!(world.clock.last_shot_ms, Some(FRAME_MS));
        tick(&mut world, &input, FRAME_MS);
        tick(&mut world, &input, FRAME_MS);
        assert!(world.clock.last_shot_ms.is_some_and(|t| t > FRAME_MS));
    }

    #[test]
    fn test_triple_shot_fires_three() {
        let mut world = playing_world(1);
        world.player.power_ups.triple_shot_ticks = 10;
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input, FRAME_MS);
        assert_eq!(world.bullets.len(), 3);
        assert_eq!(world.player.power_ups.triple_shot_ticks, 9);
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let mut world = playing_world(3);
        world.player.invincible_ticks = 10_000;
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..400 {
            tick(&mut world, &input, FRAME_MS);
            world.enemies.clear();
        }
        assert_eq!(world.player.pos, Vec2::splat(world.player.radius));

        let input = TickInput {
            pointer: Some(Vec2::new(5000.0, 5000.0)),
            ..Default::default()
        };
        tick(&mut world, &input, FRAME_MS);
        let r = world.player.radius;
        assert_eq!(world.player.pos, Vec2::new(GAME_WIDTH - r, GAME_HEIGHT - r));
    }

    #[test]
    fn test_level_up_at_threshold_clears_enemies() {
        let mut world = playing_world(4);
        world.progress.score = 1000;
        add_enemy(&mut world, EnemyKind::Heavy, Vec2::new(100.0, 100.0));
        add_enemy(&mut world, EnemyKind::Basic, Vec2::new(600.0, 100.0));

        let events = tick(&mut world, &TickInput::default(), FRAME_MS);

        assert_eq!(world.progress.level, 2);
        assert!(world.enemies.is_empty());
        assert_eq!(world.progress.score, 1000);
        assert!(events.contains(&GameEvent::LevelChanged(2)));
    }

    #[test]
    fn test_milestone_fires_once_and_suspends_play() {
        let mut world = playing_world(5);
        world.progress.score = 4950;
        world.progress.level = 3;
        world.player.charge = CHARGE_MAX;
        add_enemy(&mut world, EnemyKind::Basic, Vec2::new(400.0, 100.0));

        let input = TickInput {
            ability: true,
            ..Default::default()
        };
        let events = tick(&mut world, &input, FRAME_MS);

        assert_eq!(world.progress.score, 5050);
        assert!(world.enemies.is_empty());
        assert_eq!(world.player.charge, 0);
        assert_eq!(count_milestones(&events), 1);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::AchievementUnlocked(snap) if snap.id == AchievementId::Sharpshooter
        )));
        assert_eq!(world.phase, GamePhase::Milestone);

        // Suspended until the host resumes
        assert!(tick(&mut world, &TickInput::default(), FRAME_MS).is_empty());
        assert!(world.resume());

        world.player.charge = CHARGE_MAX;
        add_enemy(&mut world, EnemyKind::Heavy, Vec2::new(400.0, 100.0));
        let events = tick(&mut world, &input, FRAME_MS);
        assert_eq!(world.progress.score, 5350);
        assert!(world.enemies.is_empty());
        assert_eq!(count_milestones(&events), 0);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shockwave_lives_forty_ticks() {
        let mut world = playing_world(6);
        world.shockwaves.push(Shockwave::impact(Vec2::new(400.0, 300.0)));
        for _ in 0..39 {
            tick(&mut world, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(world.shockwaves.len(), 1);
        tick(&mut world, &TickInput::default(), FRAME_MS);
        assert!(world.shockwaves.is_empty());
    }

    #[test]
    fn test_game_over_when_health_runs_out() {
        let mut world = playing_world(7);
        world.player.health = 1;
        world.progress.score = 250;
        let at = world.player.pos;
        add_enemy(&mut world, EnemyKind::Basic, at - Vec2::new(0.0, 2.0));

        let events = tick(&mut world, &TickInput::default(), FRAME_MS);

        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(world.player.health, 0);
        assert!(matches!(events.as_slice(), [
            GameEvent::HealthChanged(0),
            GameEvent::GameOver(report),
        ] if report.score == 250 && report.level == 1));
        assert!(tick(&mut world, &TickInput::default(), FRAME_MS).is_empty());
    }

    #[test]
    fn test_ability_tick_leaves_no_enemies() {
        let mut world = playing_world(10);
        world.player.charge = CHARGE_MAX;
        // Spawn on this very tick as well
        world.clock.spawn_timer = crate::sim::spawn::spawn_interval(world.progress.level);
        for x in [100.0, 300.0, 500.0, 700.0] {
            add_enemy(&mut world, EnemyKind::Fast, Vec2::new(x, 150.0));
        }
        let input = TickInput {
            ability: true,
            ..Default::default()
        };

        let events = tick(&mut world, &input, FRAME_MS);

        assert!(world.enemies.is_empty());
        assert_eq!(world.player.charge, 0);
        assert_eq!(world.progress.kills, 5);
        assert!(events.contains(&GameEvent::ChargeChanged(0)));
    }

    #[test]
    fn test_ability_input_without_charge_does_nothing() {
        let mut world = playing_world(8);
        world.player.charge = 40;
        add_enemy(&mut world, EnemyKind::Basic, Vec2::new(400.0, 100.0));
        let input = TickInput {
            ability: true,
            ..Default::default()
        };
        tick(&mut world, &input, FRAME_MS);
        assert!(!world.enemies.is_empty());
        assert_eq!(world.player.charge, 40);
    }

    #[test]
    fn test_queued_purchase_events_delivered_by_next_tick() {
        let mut world = World::new(9, crate::Settings::default(), 60);
        world.start();
        assert!(world.purchase("SHIELD", 30));
        let events = tick(&mut world, &TickInput::default(), FRAME_MS);
        assert_eq!(events.first(), Some(&GameEvent::CoinsChanged(30)));
    }

    #[test]
    fn test_determinism() {
        let input = TickInput {
            fire: true,
            right: true,
            ..Default::default()
        };
        let mut a = playing_world(12345);
        let mut b = playing_world(12345);
        for _ in 0..600 {
            let ea = tick(&mut a, &input, FRAME_MS);
            let eb = tick(&mut b, &input, FRAME_MS);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.progress, b.progress);
        assert_eq!(a.player, b.player);
    }
}
