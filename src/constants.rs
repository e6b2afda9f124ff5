//! Centralized constants for the spotlog crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Data file names under the application data directory
pub mod files {
    /// Spot store file name
    pub const SPOTS_FILE_NAME: &str = "spots.json";

    /// User store file name
    pub const USERS_FILE_NAME: &str = "users.json";

    /// Directory for uploaded images, served under /uploads/
    pub const UPLOADS_DIR_NAME: &str = "uploads";
}

/// Map display defaults
pub mod map {
    /// Fallback map center latitude when no spots exist (Tokyo)
    pub const DEFAULT_CENTER_LAT: f64 = 35.6895;

    /// Fallback map center longitude when no spots exist (Tokyo)
    pub const DEFAULT_CENTER_LNG: f64 = 139.6917;

    /// Initial map zoom level
    pub const DEFAULT_ZOOM: u8 = 13;
}

/// Hard limits
pub mod limits {
    /// Maximum number of tag suggestions surfaced to the UI
    pub const MAX_SUGGESTIONS: usize = 3;

    /// Default maximum upload size in bytes (8 MiB)
    pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;
}
