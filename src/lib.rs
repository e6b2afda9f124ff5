//! spotlog: Location Diary
//!
//! A library and CLI tool for keeping a map-based diary: authenticated users
//! pin spots, attach a title, comment, description, and photo, and visitors
//! browse the spots grouped by coordinate.
//!
//! ## Features
//!
//! - Coordinate grouping and case-insensitive comment filtering
//! - Top-tag suggestions over the full corpus
//! - An explicit interaction state machine (idle / placing / viewing)
//! - File-backed spot and user stores
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use spotlog::spot::{self, Spot};
//! use spotlog::view::{MapView, NavDirection};
//!
//! let make_spot = |id: &str, lat: f64, lng: f64, comment: &str| Spot {
//!     id: id.to_string(),
//!     title: format!("spot {}", id),
//!     comment: comment.to_string(),
//!     description: None,
//!     image_url: None,
//!     latitude: lat,
//!     longitude: lng,
//!     owner_id: "u1".to_string(),
//!     created_at: chrono::Utc::now(),
//! };
//!
//! let spots = vec![
//!     make_spot("1", 10.0, 20.0, "cafe"),
//!     make_spot("2", 10.0, 20.0, "cafe"),
//!     make_spot("3", 30.0, 40.0, "bar"),
//! ];
//!
//! // Derive the map board: co-located groups plus top tags
//! let (groups, suggestions) = spot::derive(&spots, None);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(suggestions[0].tag, "cafe");
//!
//! // Drive the interaction state machine
//! let mut view = MapView::new(0);
//! view.marker_clicked(&groups, 0);
//! view.navigate(&groups, NavDirection::Next);
//! let snapshot = view.snapshot(&groups, &suggestions);
//! assert_eq!(snapshot.carousel_index, Some(1));
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod server;
pub mod spot;
pub mod store;
pub mod upload;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use spot::{Coordinates, Spot, SpotInput};
pub use store::SpotStore;
pub use view::{MapView, Mode, ViewModel};
