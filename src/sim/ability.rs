//! The screen-clearing ability

use super::collision::{KillCause, destroy_enemy};
use super::entity::Shockwave;
use super::state::World;
use crate::consts::CHARGE_MAX;

/// Extent of the ability's visual ring
pub const ABILITY_SHOCKWAVE_RADIUS: f32 = 1000.0;
const ABILITY_SHOCKWAVE_COLOR: u32 = 0x60a5fa;

/// Whether the meter is full
pub fn is_ready(world: &World) -> bool {
    world.player.charge >= CHARGE_MAX
}

/// Spend a full meter to destroy every enemy on screen
///
/// Returns false and changes nothing when the meter is not full. Kills pay
/// score and coins and count toward achievements, but give no charge back and
/// never drop power-ups.
pub fn activate(world: &mut World) -> bool {
    if !is_ready(world) {
        return false;
    }

    world.player.charge = 0;
    world.shockwaves.push(Shockwave::new(
        world.player.pos,
        ABILITY_SHOCKWAVE_RADIUS,
        ABILITY_SHOCKWAVE_COLOR,
    ));

    let targets = std::mem::take(&mut world.enemies);
    log::info!("Ability fired, {} enemies destroyed", targets.len());
    for enemy in &targets {
        destroy_enemy(world, enemy, KillCause::Ability);
    }
    world.enemies.clear();
    true
}
