//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical fixed step; host time only feeds the firing cooldown
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids allocated per world)
//! - No rendering or platform dependencies

pub mod ability;
pub mod collision;
pub mod economy;
pub mod entity;
pub mod events;
pub mod progress;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::overlaps;
pub use economy::{Ledger, ShopItem};
pub use entity::{
    Bullet, Circle, Coin, Enemy, EnemyKind, Particle, Player, PlayerPowerUps, PowerUp,
    PowerUpKind, Shockwave, Star,
};
pub use events::{GameEvent, GameOverReport};
pub use progress::{AchievementId, AchievementSnapshot, Achievements, Progress};
pub use state::{GamePhase, Hud, RenderView, SimClock, World};
pub use tick::{TickInput, tick};
