//! World state and session lifecycle
//!
//! `World` is the single mutable aggregate the simulation works on. Per-session
//! state (player, entity collections, progression, timers) is rebuilt in one
//! assignment on restart; the coin ledger, unlocked achievements, settings and
//! RNG stream carry over.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::economy::Ledger;
use super::entity::{Bullet, Coin, Enemy, Particle, Player, PowerUp, Shockwave, Star};
use super::events::{GameEvent, GameOverReport};
use super::progress::{Achievements, Progress};
use super::spawn;
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no session yet
    Idle,
    /// Active gameplay; the only phase in which `tick` does anything
    Playing,
    /// Suspended by the player (or the shop)
    Paused,
    /// Suspended after the score milestone; resume continues, exit ends the run
    Milestone,
    /// Run ended
    GameOver,
}

/// Timers owned by the tick loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Sum of elapsed time handed to `tick` this session (ms)
    pub now_ms: f64,
    /// Time of the last shot, `None` until the first one
    pub last_shot_ms: Option<f64>,
    /// Simulation tick counter
    pub ticks: u64,
    /// Ticks since the last enemy spawn
    pub spawn_timer: u32,
}

/// Counters compared before/after a tick to publish change events
///
/// Level is absent: level changes are announced the moment they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub health: u8,
    pub coins: u32,
    pub charge: u32,
}

/// Read-only view handed to the presentation layer after a tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub power_ups: &'a [PowerUp],
    pub coins: &'a [Coin],
    pub particles: &'a [Particle],
    pub shockwaves: &'a [Shockwave],
    pub stars: &'a [Star],
    pub score: u64,
    pub level: u32,
    pub balance: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub coins: Vec<Coin>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub shockwaves: Vec<Shockwave>,
    /// Background starfield (not gameplay-affecting)
    pub stars: Vec<Star>,
    pub progress: Progress,
    pub achievements: Achievements,
    pub ledger: Ledger,
    pub clock: SimClock,
    pub(crate) settings: Settings,
    pub(crate) rng: Pcg32,
    /// Events raised since the last drain
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Create an idle world
    pub fn new(seed: u64, settings: Settings, initial_coins: u32) -> Self {
        let mut world = Self::blank(
            settings,
            Ledger::new(initial_coins),
            Achievements::new(),
            Pcg32::seed_from_u64(seed),
        );
        spawn::populate_stars(&mut world);
        world
    }

    /// Fresh session state around the parts that outlive a session
    fn blank(settings: Settings, ledger: Ledger, achievements: Achievements, rng: Pcg32) -> Self {
        Self {
            phase: GamePhase::Idle,
            player: Player::default(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            shockwaves: Vec::new(),
            stars: Vec::new(),
            progress: Progress::default(),
            achievements,
            ledger,
            clock: SimClock::default(),
            settings,
            rng,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Idle world with default settings and an empty wallet
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Settings::default(), 0)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace all per-session state in one step
    fn reset_session(&mut self) {
        let mut fresh = Self::blank(
            self.settings.clone(),
            self.ledger.clone(),
            std::mem::take(&mut self.achievements),
            self.rng.clone(),
        );
        fresh.phase = GamePhase::Playing;
        fresh.stars = std::mem::take(&mut self.stars);
        fresh.events = std::mem::take(&mut self.events);
        *self = fresh;
    }

    /// Begin a session from the title screen or after game over
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.reset_session();
                log::info!("Session started (balance {})", self.ledger.balance());
                true
            }
            _ => false,
        }
    }

    /// Throw away the current session and begin a new one from any phase
    pub fn restart(&mut self) {
        self.reset_session();
        log::info!("Session restarted");
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Continue after a pause or the milestone screen
    pub fn resume(&mut self) -> bool {
        match self.phase {
            GamePhase::Paused | GamePhase::Milestone => {
                self.phase = GamePhase::Playing;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Abandon the run; queues a game-over report
    pub fn exit(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing | GamePhase::Paused | GamePhase::Milestone => {
                self.end_session();
                true
            }
            _ => false,
        }
    }

    /// Terminal transition
    pub(crate) fn end_session(&mut self) {
        self.phase = GamePhase::GameOver;
        let report = self.game_over_report();
        log::info!(
            "Game over: score {}, level {}, {} achievements",
            report.score,
            report.level,
            self.achievements.unlocked_count()
        );
        self.events.push(GameEvent::GameOver(report));
    }

    pub fn game_over_report(&self) -> GameOverReport {
        GameOverReport {
            score: self.progress.score,
            level: self.progress.level,
            achievements: self.achievements.snapshot(),
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.progress.score,
            health: self.player.health,
            coins: self.ledger.balance(),
            charge: self.player.charge,
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            phase: self.phase,
            player: &self.player,
            enemies: &self.enemies,
            bullets: &self.bullets,
            power_ups: &self.power_ups,
            coins: &self.coins,
            particles: &self.particles,
            shockwaves: &self.shockwaves,
            stars: &self.stars,
            score: self.progress.score,
            level: self.progress.level,
            balance: self.ledger.balance(),
        }
    }
}
