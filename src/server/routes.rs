//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::auth::User;
use crate::error::Error;
use crate::server::state::AppState;
use crate::spot::filter::{match_suggestions, TagSuggestion};
use crate::spot::group::SpotGroup;
use crate::spot::{derive, Spot, SpotInput};
use crate::view::{MapView, ViewEvent, ViewModel};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::warn;
use uuid::Uuid;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Determine static files path
    // Try relative to cwd first, then fallback to common locations
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let path = exe_dir.join("static");
            if path.exists() {
                path.to_string_lossy().to_string()
            } else {
                "static".to_string()
            }
        } else {
            "static".to_string()
        }
    } else {
        "static".to_string()
    };

    let uploads_dir = state.uploads.dir().to_path_buf();

    Router::new()
        .route("/api/spots", get(list_spots_handler).post(create_spot_handler))
        .route("/api/upload", post(upload_handler))
        .route("/api/board", get(board_handler))
        .route("/api/suggestions", get(suggestions_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/session", get(session_handler))
        .route("/api/view", post(create_view_handler))
        .route(
            "/api/view/:id",
            get(get_view_handler).delete(delete_view_handler),
        )
        .route("/api/view/:id/events", post(view_event_handler))
        .route("/api/status", get(status_handler))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .nest_service(
            "/",
            ServeDir::new(&static_path).append_index_html_on_directories(true),
        )
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "INVALID_INPUT" | "INVALID_COORDINATES" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::Unauthorized => "UNAUTHORIZED",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Upload(_) => "UPLOAD_ERROR",
            Error::Store(_) => "STORE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError::new(code, err.to_string())
    }
}

/// Resolve the session user or fail with 401
async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    state
        .current_user(headers)
        .await
        .ok_or_else(|| ApiError::from(Error::Unauthorized))
}

/// Resolve a session user with write capability or fail with 401/403
async fn require_writer(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let user = require_user(state, headers).await?;
    if !user.can_write() {
        return Err(ApiError::new(
            "FORBIDDEN",
            "This account has no write capability",
        ));
    }
    Ok(user)
}

/// List all spots
///
/// GET /api/spots
async fn list_spots_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Spot>> {
    let spots = state.spots.read().await;
    Json(spots.list().to_vec())
}

/// Create a spot
///
/// POST /api/spots
async fn create_spot_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<SpotInput>,
) -> Result<(StatusCode, Json<Spot>), ApiError> {
    let user = require_writer(&state, &headers).await?;

    let mut spots = state.spots.write().await;
    let spot = spots.add(input, &user.id).map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(spot)))
}

/// Upload response body
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Store an uploaded image
///
/// POST /api/upload (multipart, field "image")
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    require_writer(&state, &headers).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new("INVALID_INPUT", format!("Bad multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new("INVALID_INPUT", format!("Bad multipart body: {}", e)))?;

        let url = state.uploads.store(&file_name, &bytes).map_err(|e| {
            warn!("Upload of {} failed: {}", file_name, e);
            ApiError::from(e)
        })?;

        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::new("INVALID_INPUT", "No image field provided"))
}

/// Board query parameters
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    /// Comment filter applied to the grouped spots
    pub filter: Option<String>,
}

/// Board response body: the derived map view
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub groups: Vec<SpotGroup>,
    pub suggestions: Vec<TagSuggestion>,
    pub spot_count: usize,
}

/// Grouped and filtered spots plus tag suggestions
///
/// GET /api/board
async fn board_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Json<BoardResponse> {
    let spots = state.spots.read().await;
    let (groups, suggestions) = derive(spots.list(), query.filter.as_deref());

    Json(BoardResponse {
        groups,
        suggestions,
        spot_count: spots.len(),
    })
}

/// Suggestion query parameters
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// In-progress filter input
    #[serde(default)]
    pub q: String,
}

/// Tag suggestions narrowed by the typed input
///
/// GET /api/suggestions
async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestionsQuery>,
) -> Json<Vec<TagSuggestion>> {
    let spots = state.spots.read().await;
    let all = crate::spot::filter::suggestions(spots.list());
    Json(match_suggestions(&all, &query.q))
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Start a session
///
/// POST /api/auth/login
async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = {
        let users = state.users.read().await;
        users.verify(&req.email, &req.password)
    };

    let user = user.ok_or_else(|| ApiError::new("UNAUTHORIZED", "Invalid email or password"))?;

    let token = state.sessions.write().await.open(user.clone());
    Ok(Json(LoginResponse { token, user }))
}

/// End the current session
///
/// POST /api/auth/logout
async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(crate::auth::bearer_token)
        .ok_or_else(|| ApiError::new("UNAUTHORIZED", "No valid session"))?;

    if state.sessions.write().await.revoke(token) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::new("UNAUTHORIZED", "No valid session"))
    }
}

/// Session response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
}

/// Show the current session's user
///
/// GET /api/auth/session
async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(SessionResponse { user }))
}

/// View session response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub id: String,
    #[serde(flatten)]
    pub view: ViewModel,
}

/// Snapshot a view session against the current spot list
async fn snapshot_view(state: &AppState, id: &str, view: &mut MapView) -> ViewResponse {
    let spots = state.spots.read().await;
    view.sync(spots.revision());
    let (groups, suggestions) = derive(spots.list(), view.active_filter());

    ViewResponse {
        id: id.to_string(),
        view: view.snapshot(&groups, &suggestions),
    }
}

/// Open an interaction view session
///
/// POST /api/view
async fn create_view_handler(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    let revision = state.spots.read().await.revision();
    let id = Uuid::new_v4().to_string();
    let mut view = MapView::new(revision);

    let response = snapshot_view(&state, &id, &mut view).await;
    state.views.write().await.insert(id, view);

    Json(response)
}

/// Snapshot a view session
///
/// GET /api/view/:id
async fn get_view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut views = state.views.write().await;
    let view = views
        .get_mut(&id)
        .ok_or_else(|| ApiError::new("NOT_FOUND", format!("View session not found: {}", id)))?;

    let response = snapshot_view(&state, &id, view).await;
    Ok(Json(response))
}

/// Dispatch an interaction event into a view session
///
/// POST /api/view/:id/events
async fn view_event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(event): Json<ViewEvent>,
) -> Result<Json<ViewResponse>, ApiError> {
    // The register toggle is only offered to writers; enforce that here too
    if matches!(event, ViewEvent::SetRegister { .. }) {
        require_writer(&state, &headers).await?;
    }

    let mut views = state.views.write().await;
    let view = views
        .get_mut(&id)
        .ok_or_else(|| ApiError::new("NOT_FOUND", format!("View session not found: {}", id)))?;

    {
        let spots = state.spots.read().await;
        view.sync(spots.revision());

        let (groups, _) = derive(spots.list(), view.active_filter());

        if let ViewEvent::MarkerClick { group } = &event {
            if *group >= groups.len() {
                return Err(ApiError::new(
                    "INVALID_INPUT",
                    format!("Group index {} out of range", group),
                ));
            }
        }

        view.apply(event, &groups);
    }

    let response = snapshot_view(&state, &id, view).await;
    Ok(Json(response))
}

/// Close a view session
///
/// DELETE /api/view/:id
async fn delete_view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.views.write().await.remove(&id).is_some() {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::new(
            "NOT_FOUND",
            format!("View session not found: {}", id),
        ))
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Number of stored spots
    pub spots: usize,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Map defaults for the frontend
    pub map: MapDefaults,
}

/// Map defaults served to the frontend
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDefaults {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let spots = state.spots.read().await;

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        spots: spots.len(),
        uptime_secs: state.uptime_secs(),
        map: MapDefaults {
            center_lat: state.config.map.center_lat,
            center_lng: state.config.map.center_lng,
            zoom: state.config.map.zoom,
        },
    })
}
