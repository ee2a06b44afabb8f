//! Score, level, kill counters and achievements
//!
//! The achievement catalog is immutable; unlock state is a separate id set that
//! only ever grows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::events::GameEvent;

/// Score at which `sharpshooter` unlocks and the milestone fires
pub const MILESTONE_SCORE: u64 = 5000;
/// Kills needed for `ace_pilot`
pub const ACE_PILOT_KILLS: u32 = 100;
/// Pickups needed for `power_collector`
pub const POWER_COLLECTOR_PICKUPS: u32 = 5;
/// Level that unlocks `survivor`
pub const SURVIVOR_LEVEL: u32 = 5;
/// Score lost when an enemy slips past the bottom edge
pub const ESCAPE_PENALTY: u64 = 50;

/// Achievement identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBlood,
    Survivor,
    PowerCollector,
    Sharpshooter,
    AcePilot,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::Survivor => "survivor",
            AchievementId::PowerCollector => "power_collector",
            AchievementId::Sharpshooter => "sharpshooter",
            AchievementId::AcePilot => "ace_pilot",
        }
    }

    /// Catalog entry (catalog order matches declaration order)
    pub fn def(self) -> &'static AchievementDef {
        &CATALOG[self as usize]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        CATALOG.iter().map(|def| def.id).find(|id| id.as_str() == s)
    }
}

/// Catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CATALOG: [AchievementDef; 5] = [
    AchievementDef {
        id: AchievementId::FirstBlood,
        title: "First Blood",
        description: "Destroy your first enemy ship",
    },
    AchievementDef {
        id: AchievementId::Survivor,
        title: "Survivor",
        description: "Reach level 5",
    },
    AchievementDef {
        id: AchievementId::PowerCollector,
        title: "Power Collector",
        description: "Pick up 5 power-ups",
    },
    AchievementDef {
        id: AchievementId::Sharpshooter,
        title: "Sharpshooter",
        description: "Score more than 5000 points",
    },
    AchievementDef {
        id: AchievementId::AcePilot,
        title: "Ace Pilot",
        description: "Destroy 100 enemy ships",
    },
];

/// Copied catalog entry plus unlock state, safe to hand to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementSnapshot {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Unlocked achievement ids; survives session restarts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    unlocked: BTreeSet<AchievementId>,
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Unlock `id`; returns the snapshot only the first time
    pub fn unlock(&mut self, id: AchievementId) -> Option<AchievementSnapshot> {
        if !self.unlocked.insert(id) {
            return None;
        }
        log::info!("Achievement unlocked: {}", id.as_str());
        Some(self.snapshot_of(id))
    }

    fn snapshot_of(&self, id: AchievementId) -> AchievementSnapshot {
        let def = id.def();
        AchievementSnapshot {
            id: def.id,
            title: def.title,
            description: def.description,
            unlocked: self.is_unlocked(def.id),
        }
    }

    /// Whole catalog in declaration order
    pub fn snapshot(&self) -> Vec<AchievementSnapshot> {
        CATALOG.iter().map(|def| self.snapshot_of(def.id)).collect()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }
}

/// Per-session progression counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u64,
    pub level: u32,
    pub kills: u32,
    pub pickups: u32,
    /// Latched once the milestone has fired this session
    pub milestone_reached: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            kills: 0,
            pickups: 0,
            milestone_reached: false,
        }
    }
}

impl Progress {
    /// Score needed to leave the current level
    pub fn level_threshold(&self) -> u64 {
        let level = self.level as u64;
        level * level * 1000
    }

    /// Add points and evaluate score-driven unlocks
    pub fn add_score(
        &mut self,
        points: u64,
        achievements: &mut Achievements,
        events: &mut Vec<GameEvent>,
    ) {
        self.score += points;
        if self.score >= MILESTONE_SCORE {
            events.extend(
                achievements
                    .unlock(AchievementId::Sharpshooter)
                    .map(GameEvent::AchievementUnlocked),
            );
            if !self.milestone_reached {
                self.milestone_reached = true;
                log::info!("Milestone reached at score {}", self.score);
                events.push(GameEvent::MilestoneReached);
            }
        }
    }

    /// Escape penalty, floored at zero
    pub fn penalize_escape(&mut self) {
        self.score = self.score.saturating_sub(ESCAPE_PENALTY);
    }

    /// Count a kill and evaluate kill-driven unlocks
    pub fn record_kill(&mut self, achievements: &mut Achievements, events: &mut Vec<GameEvent>) {
        self.kills += 1;
        if self.kills == 1 {
            events.extend(
                achievements
                    .unlock(AchievementId::FirstBlood)
                    .map(GameEvent::AchievementUnlocked),
            );
        }
        if self.kills >= ACE_PILOT_KILLS {
            events.extend(
                achievements
                    .unlock(AchievementId::AcePilot)
                    .map(GameEvent::AchievementUnlocked),
            );
        }
    }

    /// Count a power-up pickup
    pub fn record_pickup(&mut self, achievements: &mut Achievements, events: &mut Vec<GameEvent>) {
        self.pickups += 1;
        if self.pickups >= POWER_COLLECTOR_PICKUPS {
            events.extend(
                achievements
                    .unlock(AchievementId::PowerCollector)
                    .map(GameEvent::AchievementUnlocked),
            );
        }
    }

    /// Advance one level if the score allows it
    ///
    /// Returns true when a level-up happened; the caller clears the enemies.
    pub fn try_level_up(
        &mut self,
        achievements: &mut Achievements,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.score < self.level_threshold() {
            return false;
        }
        self.level += 1;
        log::info!("Level up: {} (score {})", self.level, self.score);
        events.push(GameEvent::LevelChanged(self.level));
        if self.level == SURVIVOR_LEVEL {
            events.extend(
                achievements
                    .unlock(AchievementId::Survivor)
                    .map(GameEvent::AchievementUnlocked),
            );
        }
        true
    }
}
