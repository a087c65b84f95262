//! Session-scoped key-value persistence
//!
//! The store mirrors browser-local storage: string keys, string values.
//! [`SessionStore`] layers the two typed entries on top of it:
//!
//! - `userDetails`: JSON of [`ProfileForm`], numeric fields as text
//! - `healthScore`: the raw total as decimal text

use crate::errors::{AssessmentError, AssessmentResult};
use crate::profile::{Profile, ProfileForm};
use std::collections::HashMap;

pub const USER_DETAILS_KEY: &str = "userDetails";
pub const HEALTH_SCORE_KEY: &str = "healthScore";

/// String key-value storage backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AssessmentResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> AssessmentResult<()>;
    fn remove(&mut self, key: &str) -> AssessmentResult<()>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with entries, e.g. values read from `localStorage`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AssessmentResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> AssessmentResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AssessmentResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed access to the persisted session entries
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Overwrite the stored profile
    pub fn save_profile(&mut self, profile: &Profile) -> AssessmentResult<()> {
        let json = serde_json::to_string(&profile.to_form())
            .map_err(|e| AssessmentError::Storage(e.to_string()))?;
        self.backend.set(USER_DETAILS_KEY, json)
    }

    /// Load and re-validate the stored profile
    pub fn load_profile(&self) -> AssessmentResult<Option<Profile>> {
        let Some(json) = self.backend.get(USER_DETAILS_KEY)? else {
            return Ok(None);
        };
        let form: ProfileForm = serde_json::from_str(&json).map_err(|e| {
            AssessmentError::Storage(format!("unreadable {}: {}", USER_DETAILS_KEY, e))
        })?;
        form.parse().map(Some)
    }

    /// Overwrite the stored raw score
    pub fn save_health_score(&mut self, raw_total: u32) -> AssessmentResult<()> {
        self.backend.set(HEALTH_SCORE_KEY, raw_total.to_string())
    }

    pub fn load_health_score(&self) -> AssessmentResult<Option<u32>> {
        let Some(text) = self.backend.get(HEALTH_SCORE_KEY)? else {
            return Ok(None);
        };
        text.trim()
            .parse()
            .map(Some)
            .map_err(|_| AssessmentError::invalid(HEALTH_SCORE_KEY, "is not a whole number"))
    }

    pub fn clear(&mut self) -> AssessmentResult<()> {
        self.backend.remove(USER_DETAILS_KEY)?;
        self.backend.remove(HEALTH_SCORE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Gender;

    fn profile() -> Profile {
        Profile {
            name: "Meera".to_string(),
            age: 31,
            gender: Gender::Female,
            weight_kg: 60.0,
            height_cm: 160.5,
        }
    }

    #[test]
    fn test_with_entries_preloads_store() {
        let store = SessionStore::new(MemoryStore::with_entries([(HEALTH_SCORE_KEY, "75")]));
        assert_eq!(store.load_health_score().unwrap(), Some(75));
        assert_eq!(store.load_profile().unwrap(), None);
    }

    #[test]
    fn test_profile_stored_as_text_fields() {
        let mut store = SessionStore::new(MemoryStore::new());
        store.save_profile(&profile()).unwrap();

        let raw = store.backend().get(USER_DETAILS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["age"], "31");
        assert_eq!(value["weight"], "60");
        assert_eq!(value["height"], "160.5");
        assert_eq!(value["gender"], "Female");

        assert_eq!(store.load_profile().unwrap(), Some(profile()));
    }

    #[test]
    fn test_saving_same_profile_twice_is_identical() {
        let mut store = SessionStore::new(MemoryStore::new());
        store.save_profile(&profile()).unwrap();
        let first = store.backend().get(USER_DETAILS_KEY).unwrap();
        store.save_profile(&profile()).unwrap();
        let second = store.backend().get(USER_DETAILS_KEY).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_health_score_round_trip() {
        let mut store = SessionStore::new(MemoryStore::new());
        assert_eq!(store.load_health_score().unwrap(), None);
        store.save_health_score(120).unwrap();
        assert_eq!(
            store.backend().get(HEALTH_SCORE_KEY).unwrap().as_deref(),
            Some("120")
        );
        assert_eq!(store.load_health_score().unwrap(), Some(120));
    }

    #[test]
    fn test_corrupt_entries() {
        let mut backend = MemoryStore::new();
        backend.set(USER_DETAILS_KEY, "{not json".to_string()).unwrap();
        backend.set(HEALTH_SCORE_KEY, "NaN".to_string()).unwrap();
        let store = SessionStore::new(backend);

        assert_eq!(store.load_profile().unwrap_err().code(), "STORAGE_ERROR");
        assert_eq!(
            store.load_health_score().unwrap_err().field(),
            Some(HEALTH_SCORE_KEY)
        );
    }

    #[test]
    fn test_stored_profile_is_revalidated() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                USER_DETAILS_KEY,
                r#"{"name":"Meera","age":"31","gender":"Female","weight":"60","height":"0"}"#
                    .to_string(),
            )
            .unwrap();
        let store = SessionStore::new(backend);
        assert_eq!(store.load_profile().unwrap_err().field(), Some("height"));
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let mut store = SessionStore::new(MemoryStore::new());
        store.save_profile(&profile()).unwrap();
        store.save_health_score(10).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load_profile().unwrap(), None);
        assert_eq!(store.load_health_score().unwrap(), None);
    }
}
