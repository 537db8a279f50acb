//! Persisted per-surface schedule and smoothing state
//!
//! Stored as JSON keyed by surface id so the smoothing fade and the
//! last-fired hour survive a process restart. Fields are versioned by name;
//! anything absent on load gets its default, so older state files keep
//! working after the schema grows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{LapseError, Result};
use crate::schedule::ScheduleState;
use crate::smooth::SmoothingState;
use crate::types::SurfaceId;

/// Runtime state of one capture surface
///
/// Exclusively owned by that surface; two surfaces never share a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceState {
    /// Trigger timing state
    #[serde(default)]
    pub schedule: ScheduleState,
    /// Region smoothing state
    #[serde(default)]
    pub smoothing: SmoothingState,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    surfaces: HashMap<String, SurfaceState>,
}

/// On-disk store of all surface states
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    surfaces: HashMap<String, SurfaceState>,
}

impl StateStore {
    /// Create an empty store that will save to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            surfaces: HashMap::new(),
        }
    }

    /// Load a store from `path`
    ///
    /// A missing file is not an error; it yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("State file not found at {:?}, starting fresh", path);
            return Ok(Self::new(path));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| LapseError::State(format!("Failed to read state file: {}", e)))?;
        let file: StateFile = serde_json::from_str(&content)
            .map_err(|e| LapseError::State(format!("Failed to parse state file: {}", e)))?;

        info!(
            "Loaded state for {} surface(s) from {:?}",
            file.surfaces.len(),
            path
        );
        Ok(Self {
            path,
            surfaces: file.surfaces,
        })
    }

    /// Load a store, logging and starting fresh on error
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!("Failed to load state file: {}, starting fresh", e);
                Self::new(path)
            }
        }
    }

    /// Save the store back to its path
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LapseError::State(format!("Failed to create state directory: {}", e))
                })?;
            }
        }

        let file = StateFile {
            surfaces: self.surfaces.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, content)
            .map_err(|e| LapseError::State(format!("Failed to write state file: {}", e)))?;

        debug!("Saved state for {} surface(s)", self.surfaces.len());
        Ok(())
    }

    /// The path this store saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a surface's state
    pub fn surface(&self, id: &SurfaceId) -> Option<&SurfaceState> {
        self.surfaces.get(id.as_str())
    }

    /// Get a surface's state, creating a default record on first use
    pub fn surface_mut(&mut self, id: &SurfaceId) -> &mut SurfaceState {
        self.surfaces.entry(id.as_str().to_string()).or_default()
    }

    /// Number of surfaces with a state record
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the store has no records
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
