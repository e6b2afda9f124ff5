//! Spot storage
//!
//! Persists spot records in a JSON file under the XDG data directory
//! (~/.local/share/spotlog/). The store path is injected at construction so
//! tests and alternate deployments never touch the real data dir; there is
//! no process-wide store instance.

use crate::constants::files::SPOTS_FILE_NAME;
use crate::error::{Error, Result};
use crate::spot::{Spot, SpotInput};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const APP_DIR_NAME: &str = "spotlog";

/// File-backed spot repository
///
/// The revision counter increments on every mutation; consumers that derive
/// state from the list (the interaction state machine) compare revisions to
/// detect a reload.
#[derive(Debug)]
pub struct SpotStore {
    spots: Vec<Spot>,
    path: PathBuf,
    revision: u64,
}

impl SpotStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Store("Could not determine data directory".to_string()))
    }

    /// Get the spot store file path
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(SPOTS_FILE_NAME))
    }

    /// Load the store from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::store_path()?)
    }

    /// Load the store from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let spots = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Store(format!("Failed to read spot file: {}", e)))?;

            serde_json::from_str(&content)
                .map_err(|e| Error::Store(format!("Failed to parse spot file: {}", e)))?
        } else {
            Vec::new()
        };

        Ok(Self {
            spots,
            path,
            revision: 0,
        })
    }

    /// Save the store to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("Failed to create data directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(&self.spots)
            .map_err(|e| Error::Store(format!("Failed to serialize spots: {}", e)))?;

        fs::write(&self.path, content)
            .map_err(|e| Error::Store(format!("Failed to write spot file: {}", e)))?;

        Ok(())
    }

    /// Validate and persist a new spot
    ///
    /// Assigns the id and creation timestamp, appends, saves, and bumps the
    /// revision.
    pub fn add(&mut self, input: SpotInput, owner_id: &str) -> Result<Spot> {
        input.validate()?;

        let spot = Spot {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            comment: input.comment,
            description: input.description.filter(|d| !d.is_empty()),
            image_url: input.image_url.filter(|u| !u.is_empty()),
            latitude: input.lat,
            longitude: input.lng,
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
        };

        self.spots.push(spot.clone());
        self.save()?;
        self.revision += 1;
        Ok(spot)
    }

    /// All spots, in insertion order
    pub fn list(&self) -> &[Spot] {
        &self.spots
    }

    /// Get a spot by id
    pub fn get(&self, id: &str) -> Option<&Spot> {
        self.spots.iter().find(|s| s.id == id)
    }

    /// Remove a spot by id
    pub fn remove(&mut self, id: &str) -> Result<Option<Spot>> {
        match self.spots.iter().position(|s| s.id == id) {
            Some(idx) => {
                let removed = self.spots.remove(idx);
                self.save()?;
                self.revision += 1;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    /// Remove all spots
    pub fn clear(&mut self) -> Result<usize> {
        let count = self.spots.len();
        self.spots.clear();
        self.save()?;
        self.revision += 1;
        Ok(count)
    }

    /// Number of spots
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Current list revision
    ///
    /// Starts at zero on load and increments on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
