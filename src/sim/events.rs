//! Notifications produced by the simulation for the host to dispatch
//!
//! Events are plain values: payloads are copies, never handles into world state.

use serde::Serialize;

use super::progress::AchievementSnapshot;

/// Final numbers of a finished session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverReport {
    pub score: u64,
    pub level: u32,
    /// Full catalog with unlock state at the moment of game over
    pub achievements: Vec<AchievementSnapshot>,
}

/// Something the host should surface, in emission order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    HealthChanged(u8),
    LevelChanged(u32),
    CoinsChanged(u32),
    ChargeChanged(u32),
    AchievementUnlocked(AchievementSnapshot),
    /// One-shot, the first time the score milestone is crossed in a session
    MilestoneReached,
    GameOver(GameOverReport),
}
