//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server. Stores are
//! loaded from the configured paths at startup and handed to the state
//! explicitly; nothing here is a process-wide singleton.

use crate::auth::users::UserStore;
use crate::auth::{bearer_token, Sessions, User};
use crate::config::Config;
use crate::error::Result;
use crate::store::SpotStore;
use crate::upload::UploadStore;
use crate::view::MapView;
use axum::http::{header, HeaderMap};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Spot repository
    pub spots: RwLock<SpotStore>,

    /// User accounts
    pub users: RwLock<UserStore>,

    /// Active login sessions
    pub sessions: RwLock<Sessions>,

    /// Interaction state machines, one per view session id
    pub views: RwLock<HashMap<String, MapView>>,

    /// Blob store for uploaded images
    pub uploads: UploadStore,

    started_at: Instant,
}

impl AppState {
    /// Create application state, loading the stores from the configured paths
    pub fn new(config: Config) -> Result<Self> {
        let spots = SpotStore::load_from(config.spots_path()?)?;
        let users = UserStore::load_from(config.users_path()?)?;
        let uploads = UploadStore::new(config.uploads_dir()?, config.uploads.max_bytes);

        Ok(Self {
            config,
            spots: RwLock::new(spots),
            users: RwLock::new(users),
            sessions: RwLock::new(Sessions::new()),
            views: RwLock::new(HashMap::new()),
            uploads,
            started_at: Instant::now(),
        })
    }

    /// Resolve the user behind the request's bearer token, if any
    pub async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)?;

        self.sessions.read().await.current_user(token).cloned()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
