//! # Estimate Data Structures
//!
//! An `Estimate` groups the rooms of one job under a single set of layout
//! settings. Estimates serialize to `.fce` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Estimate
//! ├── meta: EstimateMetadata (version, estimator, job info, timestamps)
//! ├── settings: LayoutConfig (stock sizes, spacings, thresholds)
//! └── rooms: HashMap<Uuid, Room> (labelled room dimensions)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::calculations::RoomDimensions;
//! use ceiling_core::project::{Estimate, Room};
//!
//! let mut estimate = Estimate::new("Jane Estimator", "25-042", "ACME Offices");
//! estimate.add_room(Room::new("Lobby", RoomDimensions::new(20.0, 19.5, 14.0, 14.0, 2.0)));
//!
//! let takeoffs = estimate.calculate_all().unwrap();
//! assert_eq!(takeoffs[0].label, "Lobby");
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{calculate_ceiling_requirements, CeilingCalculation, RoomDimensions};
use crate::config::LayoutConfig;
use crate::errors::{CalcError, CalcResult};

/// Current schema version for .fce files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root estimate container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// Estimate metadata (version, estimator, job info)
    pub meta: EstimateMetadata,

    /// Layout settings shared by every room
    pub settings: LayoutConfig,

    /// All rooms, keyed by UUID
    pub rooms: HashMap<Uuid, Room>,
}

/// A labelled room in an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// User label (e.g., "Lobby", "Office 2")
    pub label: String,

    /// Wall measurements in feet
    pub dimensions: RoomDimensions,
}

impl Room {
    pub fn new(label: impl Into<String>, dimensions: RoomDimensions) -> Self {
        Room {
            label: label.into(),
            dimensions,
        }
    }
}

/// Quantities for one room of an estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTakeoff {
    pub id: Uuid,
    pub label: String,
    pub calculation: CeilingCalculation,
}

impl Estimate {
    /// Create a new empty estimate.
    ///
    /// # Arguments
    ///
    /// * `estimator` - Name of the person preparing the estimate
    /// * `job_id` - Job number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(estimator: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Estimate {
            meta: EstimateMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: LayoutConfig::default(),
            rooms: HashMap::new(),
        }
    }

    /// Add a room to the estimate. Returns the UUID assigned to it.
    pub fn add_room(&mut self, room: Room) -> Uuid {
        let id = Uuid::new_v4();
        self.rooms.insert(id, room);
        self.touch();
        id
    }

    /// Remove a room by UUID.
    ///
    /// Returns the removed room if it existed.
    pub fn remove_room(&mut self, id: &Uuid) -> Option<Room> {
        let room = self.rooms.remove(id);
        if room.is_some() {
            self.touch();
        }
        room
    }

    /// Get a room by UUID.
    pub fn get_room(&self, id: &Uuid) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Calculate one room with the estimate's settings.
    pub fn calculate_room(&self, id: &Uuid) -> CalcResult<CeilingCalculation> {
        let room = self.get_room(id).ok_or_else(|| CalcError::room_not_found(id))?;
        calculate_ceiling_requirements(&room.dimensions, &self.settings)
    }

    /// Calculate every room, ordered by label.
    ///
    /// Fails on the first room whose dimensions are invalid.
    pub fn calculate_all(&self) -> CalcResult<Vec<RoomTakeoff>> {
        let mut takeoffs = self
            .rooms
            .iter()
            .map(|(id, room)| {
                Ok(RoomTakeoff {
                    id: *id,
                    label: room.label.clone(),
                    calculation: calculate_ceiling_requirements(&room.dimensions, &self.settings)?,
                })
            })
            .collect::<CalcResult<Vec<_>>>()?;
        takeoffs.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        Ok(takeoffs)
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Estimate::new("", "", "")
    }
}

/// Estimate metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the person preparing the estimate
    pub estimator: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the estimate was created
    pub created: DateTime<Utc>,

    /// When the estimate was last modified
    pub modified: DateTime<Utc>,
}
