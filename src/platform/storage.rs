//! String key/value storage
//!
//! LocalStorage in the browser, a JSON file on native, or a plain map for tests
//! and hosts that do not persist anything.

use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

enum Backend {
    Memory,
    #[cfg(not(target_arch = "wasm32"))]
    File(PathBuf),
    #[cfg(target_arch = "wasm32")]
    Local(web_sys::Storage),
}

/// Key/value store with LocalStorage semantics (string keys, string values)
pub struct Storage {
    items: BTreeMap<String, String>,
    backend: Backend,
}

impl Storage {
    /// Non-persistent storage
    pub fn in_memory() -> Self {
        Self {
            items: BTreeMap::new(),
            backend: Backend::Memory,
        }
    }

    /// Storage backed by a JSON object file; a missing or malformed file starts empty
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let items = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Cannot read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            items,
            backend: Backend::File(path),
        }
    }

    /// Browser LocalStorage, or in-memory storage when it is unavailable
    #[cfg(target_arch = "wasm32")]
    pub fn local() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => Self {
                items: BTreeMap::new(),
                backend: Backend::Local(storage),
            },
            None => {
                log::warn!("LocalStorage unavailable, settings will not persist");
                Self::in_memory()
            }
        }
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        match &self.backend {
            #[cfg(target_arch = "wasm32")]
            Backend::Local(storage) => storage.get_item(key).ok().flatten(),
            _ => self.items.get(key).cloned(),
        }
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
        match &self.backend {
            Backend::Memory => {}
            #[cfg(not(target_arch = "wasm32"))]
            Backend::File(path) => Self::flush(path, &self.items),
            #[cfg(target_arch = "wasm32")]
            Backend::Local(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("LocalStorage write failed for {}", key);
                }
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn flush(path: &Path, items: &BTreeMap<String, String>) {
        let json = match serde_json::to_string_pretty(items) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize storage: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            log::warn!("Cannot write storage file {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_get_set() {
        let mut storage = Storage::in_memory();
        assert_eq!(storage.get_item("k"), None);
        storage.set_item("k", "v");
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_persists() {
        let path = std::env::temp_dir().join(format!(
            "pioneer_storage_test_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut storage = Storage::open(&path);
        storage.set_item("pioneer_coins", "42");

        let reopened = Storage::open(&path);
        assert_eq!(reopened.get_item("pioneer_coins").as_deref(), Some("42"));
        let _ = std::fs::remove_file(&path);
    }
}
