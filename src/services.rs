//! Backend wiring: picks the auth service, document store and per-screen data
//! sources from configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::info;

use crate::auth::firebase::FirebaseEndpoints;
use crate::auth::{AuthService, FirebaseAuth, LocalAuth, SessionHub};
use crate::config::{Config, DataConfig, DataSourceKind};
use crate::placeholder;
use crate::screens::diet::{DailyPlan, DietPlan};
use crate::screens::home::HomeSummary;
use crate::screens::playlists::{Playlist, Track};
use crate::screens::profile::{ProfileSource, UserProfile};
use crate::screens::workouts::WorkoutsOverview;
use crate::screens::{CollectionSource, DataSource, PlaceholderSource};
use crate::store::{DocumentStore, FirestoreStore, MemoryStore};

/// Upper bound on documents read per collection
const COLLECTION_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Firebase,
    /// No Firebase project configured: local accounts, in-memory documents
    Offline,
}

/// Everything the UI needs, shared through the root context.
#[derive(Clone)]
pub struct Services {
    pub backend: Backend,
    pub sessions: SessionHub,
    pub auth: Arc<dyn AuthService>,
    pub store: Arc<dyn DocumentStore>,
    pub profile: Arc<dyn DataSource<UserProfile>>,
    pub diet_plan: Arc<dyn DataSource<DietPlan>>,
    pub playlists: Arc<dyn DataSource<Vec<Playlist>>>,
    pub home: Arc<dyn DataSource<HomeSummary>>,
    pub workouts: Arc<dyn DataSource<WorkoutsOverview>>,
    /// Mini player queue
    pub tracks: Vec<Track>,
}

impl Services {
    pub fn from_config(config: &Config, data_dir: PathBuf) -> Result<Self> {
        let sessions = SessionHub::new();

        let (backend, auth, store): (Backend, Arc<dyn AuthService>, Arc<dyn DocumentStore>) =
            match config.firebase.api_key() {
                Some(api_key) => {
                    let Some(project_id) = config.firebase.project_id() else {
                        bail!("firebase.project_id is required when firebase.api_key is set");
                    };
                    let endpoints = FirebaseEndpoints {
                        api_key: api_key.to_string(),
                        auth_url: config.firebase.auth_url.clone(),
                        token_url: config.firebase.token_url.clone(),
                    };
                    let mut auth = FirebaseAuth::new(endpoints, sessions.clone());
                    if config.auth.persist_session {
                        auth = auth.with_persistence(data_dir);
                    }
                    // Firestore requests take their token from the auth service,
                    // which refreshes it once expired
                    let auth = Arc::new(auth);
                    let store = FirestoreStore::new(
                        &config.firebase.firestore_url,
                        project_id,
                        auth.clone(),
                    );
                    info!("Using Firebase project {}", project_id);
                    let auth: Arc<dyn AuthService> = auth;
                    let store: Arc<dyn DocumentStore> = Arc::new(store);
                    (Backend::Firebase, auth, store)
                }
                None => {
                    info!("No Firebase API key configured, using offline accounts");
                    let auth: Arc<dyn AuthService> =
                        Arc::new(LocalAuth::with_data_dir(sessions.clone(), data_dir));
                    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
                    (Backend::Offline, auth, store)
                }
            };

        Ok(Self::assemble(backend, sessions, auth, store, &config.data))
    }

    /// Wire data sources over an existing auth service and store.
    pub fn assemble(
        backend: Backend,
        sessions: SessionHub,
        auth: Arc<dyn AuthService>,
        store: Arc<dyn DocumentStore>,
        data: &DataConfig,
    ) -> Self {
        let delay = Duration::from_millis(data.placeholder_delay_ms);

        let diet_plan: Arc<dyn DataSource<DietPlan>>;
        let playlists: Arc<dyn DataSource<Vec<Playlist>>>;
        match data.source {
            DataSourceKind::Placeholder => {
                diet_plan = Arc::new(PlaceholderSource::new(placeholder::diet_plan(), delay));
                playlists = Arc::new(PlaceholderSource::new(placeholder::playlists(), delay));
            }
            DataSourceKind::Remote => {
                diet_plan = Arc::new(CollectionSource::<DailyPlan>::new(
                    store.clone(),
                    "dietPlan",
                    COLLECTION_LIMIT,
                ));
                playlists = Arc::new(CollectionSource::<Playlist>::new(
                    store.clone(),
                    "playlists",
                    COLLECTION_LIMIT,
                ));
            }
        }
        info!("Screen data source: {:?}", data.source);

        Self {
            backend,
            sessions,
            auth,
            profile: Arc::new(ProfileSource::new(store.clone())),
            store,
            diet_plan,
            playlists,
            home: Arc::new(PlaceholderSource::new(
                placeholder::home_summary(),
                Duration::ZERO,
            )),
            workouts: Arc::new(PlaceholderSource::new(
                placeholder::workouts(),
                Duration::ZERO,
            )),
            tracks: placeholder::tracks(),
        }
    }

    /// Offline services with instant placeholder data
    pub fn offline() -> Self {
        let sessions = SessionHub::new();
        let auth = Arc::new(LocalAuth::new(sessions.clone()));
        let data = DataConfig {
            source: DataSourceKind::Placeholder,
            placeholder_delay_ms: 0,
        };
        Self::assemble(
            Backend::Offline,
            sessions,
            auth,
            Arc::new(MemoryStore::new()),
            &data,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirebaseConfig;
    use crate::screens::test_support::session;

    #[test]
    fn test_without_api_key_runs_offline() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let services =
            Services::from_config(&Config::default(), dir.path().to_path_buf()).unwrap();
        assert_eq!(services.backend, Backend::Offline);
    }

    #[test]
    fn test_api_key_requires_project() {
        let config = Config {
            firebase: FirebaseConfig {
                api_key: Some("key".to_string()),
                ..FirebaseConfig::default()
            },
            ..Config::default()
        };
        let err = Services::from_config(&config, PathBuf::from("/tmp"))
            .err()
            .map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("firebase.project_id is required when firebase.api_key is set")
        );
    }

    #[test]
    fn test_firebase_backend() {
        let config = Config {
            firebase: FirebaseConfig {
                api_key: Some("key".to_string()),
                project_id: Some("demo".to_string()),
                ..FirebaseConfig::default()
            },
            ..Config::default()
        };
        let services = Services::from_config(&config, PathBuf::from("/tmp")).unwrap();
        assert_eq!(services.backend, Backend::Firebase);
    }

    #[tokio::test]
    async fn test_remote_sources_read_user_collections() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let sessions = SessionHub::new();
        let services = Services::assemble(
            Backend::Offline,
            sessions.clone(),
            Arc::new(LocalAuth::new(sessions)),
            store,
            &DataConfig {
                source: DataSourceKind::Remote,
                placeholder_delay_ms: 0,
            },
        );

        let playlists = services.playlists.load(Some(&session("u1"))).await.unwrap();
        assert!(playlists.is_empty());
        let plan = services.diet_plan.load(Some(&session("u1"))).await.unwrap();
        assert!(plan.days().is_empty());
    }

    #[tokio::test]
    async fn test_offline_placeholder_data() {
        let services = Services::offline();
        assert_eq!(services.playlists.load(None).await.unwrap().len(), 4);
        assert_eq!(services.diet_plan.load(None).await.unwrap().days().len(), 2);
        assert_eq!(services.tracks.len(), 3);
    }
}
