//! Coin balance and the shop
//!
//! Coins only enter through pickups and only leave through purchases. A failed
//! purchase touches nothing.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{GamePhase, World};
use crate::consts::{CHARGE_MAX, TRIPLE_SHOT_TICKS};

/// Shop items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShopItem {
    TripleShot,
    Shield,
    Health,
    Ultimate,
}

impl ShopItem {
    pub const ALL: [ShopItem; 4] = [
        ShopItem::TripleShot,
        ShopItem::Shield,
        ShopItem::Health,
        ShopItem::Ultimate,
    ];

    /// Host-facing identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopItem::TripleShot => "TRIPLE_SHOT",
            ShopItem::Shield => "SHIELD",
            ShopItem::Health => "HEALTH",
            ShopItem::Ultimate => "ULTIMATE",
        }
    }

    /// Parse a host identifier; unknown ids are rejected rather than defaulted
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.as_str() == id)
    }

    /// List price
    pub fn price(&self) -> u32 {
        match self {
            ShopItem::TripleShot => 50,
            ShopItem::Shield => 30,
            ShopItem::Health => 40,
            ShopItem::Ultimate => 100,
        }
    }
}

/// Coin balance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u32,
}

impl Ledger {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn deposit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn can_afford(&self, price: u32) -> bool {
        self.balance >= price
    }

    /// Debit `price` if affordable
    pub fn try_debit(&mut self, price: u32) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.balance -= price;
        true
    }
}

impl World {
    /// Buy `item_id` for `price` coins
    ///
    /// Returns false without touching the balance or the player when no session
    /// is live, the item is unknown, the balance is short, or health is full.
    pub fn purchase(&mut self, item_id: &str, price: u32) -> bool {
        let Some(item) = ShopItem::from_id(item_id) else {
            log::warn!("Rejected purchase of unknown item {:?}", item_id);
            return false;
        };
        self.purchase_item(item, price)
    }

    pub fn purchase_item(&mut self, item: ShopItem, price: u32) -> bool {
        if !matches!(
            self.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::Milestone
        ) {
            log::debug!("Shop closed while {:?}", self.phase);
            return false;
        }
        if !self.ledger.can_afford(price) {
            log::debug!(
                "Cannot afford {} ({} < {})",
                item.as_str(),
                self.ledger.balance(),
                price
            );
            return false;
        }
        if item == ShopItem::Health && self.player.health >= self.player.max_health {
            log::debug!("Health already full, purchase refused");
            return false;
        }

        if !self.ledger.try_debit(price) {
            return false;
        }
        match item {
            ShopItem::TripleShot => {
                self.player.power_ups.triple_shot_ticks = TRIPLE_SHOT_TICKS;
            }
            ShopItem::Shield => {
                self.player.power_ups.shield = true;
            }
            ShopItem::Health => {
                self.player.health += 1;
                self.events.push(GameEvent::HealthChanged(self.player.health));
            }
            ShopItem::Ultimate => {
                self.player.charge = CHARGE_MAX;
                self.events.push(GameEvent::ChargeChanged(self.player.charge));
            }
        }
        self.events.push(GameEvent::CoinsChanged(self.ledger.balance()));
        log::debug!("Purchased {} for {}", item.as_str(), price);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn world_with_coins(coins: u32) -> World {
        let mut world = World::new(1, Settings::default(), coins);
        world.start();
        world
    }

    #[test]
    fn test_health_purchase_refused_at_full_health() {
        let mut world = world_with_coins(100);
        let player_before = world.player.clone();
        assert!(!world.purchase("HEALTH", 40));
        assert_eq!(world.ledger.balance(), 100);
        assert_eq!(world.player, player_before);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_health_purchase_heals_one() {
        let mut world = world_with_coins(100);
        world.player.health = 1;
        assert!(world.purchase("HEALTH", 40));
        assert_eq!(world.player.health, 2);
        assert_eq!(world.ledger.balance(), 60);
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::HealthChanged(2), GameEvent::CoinsChanged(60)]
        );
    }

    #[test]
    fn test_insufficient_funds() {
        let mut world = world_with_coins(29);
        assert!(!world.purchase("SHIELD", 30));
        assert!(!world.player.power_ups.shield);
        assert_eq!(world.ledger.balance(), 29);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let mut world = world_with_coins(500);
        assert!(!world.purchase("LASER", 1));
        assert!(!world.purchase("triple_shot", 1));
        assert_eq!(world.ledger.balance(), 500);
    }

    #[test]
    fn test_triple_shot_overwrites_duration() {
        let mut world = world_with_coins(100);
        world.player.power_ups.triple_shot_ticks = 12;
        assert!(world.purchase("TRIPLE_SHOT", 50));
        assert_eq!(world.player.power_ups.triple_shot_ticks, TRIPLE_SHOT_TICKS);
        assert_eq!(world.ledger.balance(), 50);
    }

    #[test]
    fn test_ultimate_fills_charge() {
        let mut world = world_with_coins(100);
        assert!(world.purchase("ULTIMATE", ShopItem::Ultimate.price()));
        assert_eq!(world.player.charge, CHARGE_MAX);
        assert_eq!(world.ledger.balance(), 0);
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let mut world = world_with_coins(30);
        assert!(world.purchase_item(ShopItem::Shield, 30));
        assert!(world.player.power_ups.shield);
        assert_eq!(world.ledger.balance(), 0);
    }

    #[test]
    fn test_shop_closed_outside_a_session() {
        let mut world = World::new(1, Settings::default(), 100);
        assert!(!world.purchase("SHIELD", 30));
        assert_eq!(world.ledger.balance(), 100);
        world.start();
        assert!(!world.player.power_ups.shield);

        world.player.health = 1;
        world.exit();
        world.drain_events();
        let player_before = world.player.clone();
        assert!(!world.purchase("ULTIMATE", 50));
        assert!(!world.purchase("HEALTH", 40));
        assert_eq!(world.ledger.balance(), 100);
        assert_eq!(world.player, player_before);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_shop_open_while_paused() {
        let mut world = world_with_coins(30);
        world.pause();
        assert!(world.purchase("SHIELD", 30));
        assert!(world.player.power_ups.shield);
    }

    #[test]
    fn test_item_ids_round_trip() {
        for item in ShopItem::ALL {
            assert_eq!(ShopItem::from_id(item.as_str()), Some(item));
        }
    }
}
