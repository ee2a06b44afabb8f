//! Interstellar Pioneers entry point
//!
//! The native build runs a headless session flown by a simple autopilot. It logs
//! every notification and keeps the coin balance on disk between runs. Browser
//! hosts embed the library directly.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use interstellar_pioneers::consts::*;
    use interstellar_pioneers::platform::{self, KeysHeld, Storage};
    use interstellar_pioneers::sim::{GameEvent, GamePhase, ShopItem, World, tick};
    use interstellar_pioneers::{CoinWallet, Settings};

    const SAVE_PATH: &str = "pioneer_save.json";
    const DEFAULT_TICKS: u64 = 3600;
    /// Horizontal slack before the autopilot bothers to steer
    const AIM_DEADZONE: f32 = 8.0;

    fn seed_from_clock() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Hold fire, drift under the lowest enemy, dump the meter when it is full
    fn autopilot(world: &World, keys: &mut KeysHeld) {
        keys.key_down("Space");
        for code in ["ArrowLeft", "ArrowRight", "KeyE"] {
            keys.key_up(code);
        }

        let target = world
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        if let Some(enemy) = target {
            let dx = enemy.pos.x - world.player.pos.x;
            if dx < -AIM_DEADZONE {
                keys.key_down("ArrowLeft");
            } else if dx > AIM_DEADZONE {
                keys.key_down("ArrowRight");
            }
        }
        if world.player.charge >= CHARGE_MAX && world.enemies.len() >= 3 {
            keys.key_down("KeyE");
        }
    }

    /// Patch up the hull between waves when the wallet allows it
    fn visit_shop(world: &mut World) {
        let item = ShopItem::Health;
        if world.player.health < world.player.max_health && world.ledger.can_afford(item.price()) {
            world.purchase(item.as_str(), item.price());
        }
    }

    fn report(events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::AchievementUnlocked(snap) => {
                    log::info!("Achievement: {} ({})", snap.title, snap.description)
                }
                GameEvent::LevelChanged(level) => log::info!("Reached level {}", level),
                GameEvent::HealthChanged(health) => log::info!("Hull at {}", health),
                GameEvent::MilestoneReached => log::info!("Milestone reached"),
                GameEvent::GameOver(report) => log::info!(
                    "Final score {} at level {} ({} achievements)",
                    report.score,
                    report.level,
                    report.achievements.iter().filter(|a| a.unlocked).count()
                ),
                other => log::debug!("{:?}", other),
            }
        }
    }

    pub fn run() {
        platform::init_logging();

        let ticks = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or(DEFAULT_TICKS);
        let seed = std::env::args()
            .nth(2)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(seed_from_clock);

        let mut storage = Storage::open(SAVE_PATH);
        let settings = Settings::load(&storage);
        let mut wallet = CoinWallet::load(&storage);

        log::info!("Interstellar Pioneers (headless) seed {} for {} ticks", seed, ticks);
        let mut world = World::new(seed, settings, wallet.balance);
        world.start();

        let started = platform::now_ms();
        let mut keys = KeysHeld::new();
        for _ in 0..ticks {
            match world.phase {
                GamePhase::Milestone => {
                    world.resume();
                }
                GamePhase::GameOver => break,
                _ => {}
            }

            autopilot(&world, &mut keys);
            let events = tick(&mut world, &keys.to_tick_input(), FRAME_MS);
            if world.phase == GamePhase::Playing && world.enemies.is_empty() {
                visit_shop(&mut world);
            }

            report(&events);
            wallet.sync(&events, &mut storage);
        }

        if world.phase != GamePhase::GameOver {
            world.exit();
        }
        let events = world.drain_events();
        report(&events);
        wallet.sync(&events, &mut storage);

        log::info!(
            "Simulated {} ticks in {:.0} ms, balance {}",
            world.clock.ticks,
            platform::now_ms() - started,
            world.ledger.balance()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}
