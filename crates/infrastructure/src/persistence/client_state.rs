//! JSON client-state store
//!
//! Backs the settings, history, and credential ports with a single JSON
//! file. Sections are independent: saving one rewrites the file but leaves
//! the other sections as they were. A missing file means first run and
//! every loader answers `None`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain::{AppSettings, TripHistory};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use application::ports::{CredentialStore, HistoryStore, SettingsStore, StateStoreError};

/// On-disk shape of the state file
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<AppSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    history: Option<TripHistory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maps_api_key: Option<String>,
}

/// Client-state store over a single JSON file
#[derive(Debug)]
pub struct JsonClientStateStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonClientStateStore {
    /// Create a store over the given file path
    ///
    /// The file is created on first save; the parent directory must exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_state(&self) -> Result<PersistedState, StateStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StateStoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet");
                Ok(PersistedState::default())
            },
            Err(e) => Err(StateStoreError::Io(e.to_string())),
        }
    }

    async fn write_state(&self, state: &PersistedState) -> Result<(), StateStoreError> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| StateStoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StateStoreError::Io(e.to_string()))
    }

    async fn update<F>(&self, mutate: F) -> Result<(), StateStoreError>
    where
        F: FnOnce(&mut PersistedState),
    {
        let _guard = self.write_lock.lock().await;
        let mut state = self.read_state().await?;
        mutate(&mut state);
        self.write_state(&state).await
    }
}

#[async_trait]
impl SettingsStore for JsonClientStateStore {
    async fn load_settings(&self) -> Result<Option<AppSettings>, StateStoreError> {
        Ok(self.read_state().await?.settings)
    }

    #[instrument(skip(self, settings))]
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StateStoreError> {
        let settings = settings.clone();
        self.update(|state| state.settings = Some(settings)).await
    }
}

#[async_trait]
impl HistoryStore for JsonClientStateStore {
    async fn load_history(&self) -> Result<Option<TripHistory>, StateStoreError> {
        Ok(self.read_state().await?.history)
    }

    #[instrument(skip(self, history))]
    async fn save_history(&self, history: &TripHistory) -> Result<(), StateStoreError> {
        let history = history.clone();
        self.update(|state| state.history = Some(history)).await
    }
}

#[async_trait]
impl CredentialStore for JsonClientStateStore {
    async fn load_credential(&self) -> Result<Option<String>, StateStoreError> {
        Ok(self.read_state().await?.maps_api_key)
    }

    #[instrument(skip(self, credential))]
    async fn save_credential(&self, credential: &str) -> Result<(), StateStoreError> {
        let credential = credential.to_string();
        self.update(|state| state.maps_api_key = Some(credential))
            .await
    }
}

#[cfg(test)]
mod tests {
    use domain::Theme;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonClientStateStore {
        JsonClientStateStore::new(dir.path().join("state.json"))
    }

    #[tokio::test]
    async fn first_run_loads_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        assert!(store.load_settings().await.expect("load").is_none());
        assert!(store.load_history().await.expect("load").is_none());
        assert!(store.load_credential().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let mut settings = AppSettings::default();
        settings.rate_per_km = 750.0;
        settings.theme = Theme::Dark;
        store.save_settings(&settings).await.expect("save");

        let loaded = store.load_settings().await.expect("load").expect("some");
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn sections_survive_each_other() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        store
            .save_settings(&AppSettings::default())
            .await
            .expect("save settings");
        store.save_credential("maps-key").await.expect("save key");
        store
            .save_history(&TripHistory::new())
            .await
            .expect("save history");

        assert!(store.load_settings().await.expect("load").is_some());
        assert_eq!(
            store.load_credential().await.expect("load").as_deref(),
            Some("maps-key")
        );
        assert!(store.load_history().await.expect("load").is_some());
    }

    #[tokio::test]
    async fn history_round_trip_keeps_order() {
        use domain::{RouteOption, TrafficLevel, TripEstimation};

        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let route = RouteOption {
            id: "r1".to_string(),
            name: "Via Airport Road".to_string(),
            description: String::new(),
            distance_km: 12.5,
            duration_min: 22.0,
            traffic_level: TrafficLevel::Low,
            tags: vec![],
        };
        let mut history = TripHistory::new();
        let older = TripEstimation::new("A", "B", vec![route.clone()], "r1");
        let newer = TripEstimation::new("C", "D", vec![route], "r1");
        history.insert(older.clone());
        history.insert(newer.clone());

        store.save_history(&history).await.expect("save");
        let loaded = store.load_history().await.expect("load").expect("some");

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.iter().next().map(|t| t.id.clone()), Some(newer.id));
    }

    #[tokio::test]
    async fn corrupt_file_reports_serialization_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").expect("write");

        let store = JsonClientStateStore::new(path);
        let error = store.load_settings().await.expect_err("should fail");
        assert!(matches!(error, StateStoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn save_overwrites_previous_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        store.save_credential("old").await.expect("save");
        store.save_credential("new").await.expect("save");
        assert_eq!(
            store.load_credential().await.expect("load").as_deref(),
            Some("new")
        );
    }
}
