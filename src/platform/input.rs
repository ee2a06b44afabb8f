//! Held-key normalization
//!
//! Hosts record key codes (DOM `KeyboardEvent.code` names) as they go down and
//! up; the simulation only ever sees the resulting `TickInput`.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

const UP_KEYS: [&str; 2] = ["ArrowUp", "KeyW"];
const DOWN_KEYS: [&str; 2] = ["ArrowDown", "KeyS"];
const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "KeyA"];
const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "KeyD"];
const FIRE_KEY: &str = "Space";
const ABILITY_KEY: &str = "KeyE";

/// Keys currently held plus an optional pointer/touch position
#[derive(Debug, Clone, Default)]
pub struct KeysHeld {
    held: HashSet<String>,
    pointer: Option<Vec2>,
}

impl KeysHeld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.held.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Touch/pointer down or moved: the ship follows it and fires
    pub fn pointer_at(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn pointer_released(&mut self) {
        self.pointer = None;
    }

    fn any_held(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.is_held(code))
    }

    /// Snapshot for one tick
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            up: self.any_held(&UP_KEYS),
            down: self.any_held(&DOWN_KEYS),
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
            fire: self.is_held(FIRE_KEY) || self.pointer.is_some(),
            ability: self.is_held(ABILITY_KEY),
            pointer: self.pointer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_map_to_directions() {
        let mut keys = KeysHeld::new();
        keys.key_down("KeyW");
        keys.key_down("ArrowRight");
        let input = keys.to_tick_input();
        assert!(input.up && input.right);
        assert!(!input.down && !input.left && !input.fire);

        keys.key_up("KeyW");
        assert!(!keys.to_tick_input().up);
    }

    #[test]
    fn test_pointer_holds_fire() {
        let mut keys = KeysHeld::new();
        keys.pointer_at(Vec2::new(10.0, 20.0));
        let input = keys.to_tick_input();
        assert!(input.fire);
        assert_eq!(input.pointer, Some(Vec2::new(10.0, 20.0)));

        keys.pointer_released();
        assert!(!keys.to_tick_input().fire);
    }

    #[test]
    fn test_ability_key() {
        let mut keys = KeysHeld::new();
        keys.key_down("KeyE");
        assert!(keys.to_tick_input().ability);
    }
}
