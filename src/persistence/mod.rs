//! Coin balance persistence
//!
//! The only state that outlives a process is the coin balance, stored as a
//! decimal integer string under a fixed key. The host loads it at startup and
//! writes it back whenever a `CoinsChanged` event arrives.

use crate::platform::Storage;
use crate::sim::GameEvent;

/// Persisted coin balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinWallet {
    pub balance: u32,
}

impl CoinWallet {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pioneer_coins";

    /// Load the balance; missing or malformed values read as zero
    pub fn load(storage: &Storage) -> Self {
        let balance = match storage.get_item(Self::STORAGE_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed coin balance {:?}", raw);
                0
            }),
            None => 0,
        };
        log::info!("Loaded coin balance: {}", balance);
        Self { balance }
    }

    pub fn save(&self, storage: &mut Storage) {
        storage.set_item(Self::STORAGE_KEY, &self.balance.to_string());
        log::debug!("Coin balance saved ({})", self.balance);
    }

    /// Persist any balance change carried by `events`; returns true if saved
    pub fn sync(&mut self, events: &[GameEvent], storage: &mut Storage) -> bool {
        let latest = events.iter().rev().find_map(|event| match event {
            GameEvent::CoinsChanged(coins) => Some(*coins),
            _ => None,
        });
        match latest {
            Some(balance) if balance != self.balance => {
                self.balance = balance;
                self.save(storage);
                true
            }
            _ => false,
        }
    }
}
