use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::StoreError;
use crate::settings::policy::{FillPolicy, Profile};

pub const OPTIONS_KEY: &str = "options";
pub const PROFILES_KEY: &str = "profiles";

// ============================================================================
// KeyValueStore trait (raw storage backends)
// ============================================================================

/// Backend holding JSON values under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// A missing or unreadable file reads as empty; every write rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Map<String, Value> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "settings file is malformed, ignoring it");
                Map::new()
            }
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut all = self.read_all();
        all.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&all).map_err(|e| StoreError::Json {
            context: key.to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

// ============================================================================
// Settings: typed facade over a KeyValueStore
// ============================================================================

/// Typed access to the fill policy and profiles.
///
/// Reads never fail: an absent or malformed entry yields the default.
#[derive(Debug, Clone)]
pub struct Settings<S> {
    store: S,
}

impl<S: KeyValueStore> Settings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn policy(&self) -> FillPolicy {
        self.read(OPTIONS_KEY).unwrap_or_default()
    }

    pub fn set_policy(&mut self, policy: &FillPolicy) -> Result<(), StoreError> {
        self.write(OPTIONS_KEY, policy)
    }

    /// Read the policy, apply `change`, store and return the result.
    pub fn update_policy(
        &mut self,
        change: impl FnOnce(&mut FillPolicy),
    ) -> Result<FillPolicy, StoreError> {
        let mut policy = self.policy();
        change(&mut policy);
        self.set_policy(&policy)?;
        Ok(policy)
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.read(PROFILES_KEY).unwrap_or_default()
    }

    pub fn set_profiles(&mut self, profiles: &[Profile]) -> Result<(), StoreError> {
        self.write(PROFILES_KEY, profiles)
    }

    /// Insert a profile, replacing any with the same id.
    pub fn upsert_profile(&mut self, profile: Profile) -> Result<(), StoreError> {
        let mut profiles = self.profiles();
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        self.set_profiles(&profiles)
    }

    /// Remove a profile by id. Returns whether one was removed.
    pub fn remove_profile(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut profiles = self.profiles();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Ok(false);
        }
        self.set_profiles(&profiles)?;
        Ok(true)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.store.get(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, using default");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_value(value).map_err(|e| StoreError::Json {
            context: key.to_string(),
            source: e,
        })?;
        self.store.set(key, json)
    }
}
