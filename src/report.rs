//! Status report payload sent to the rescue coordination backend.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::status::{
    ResourceKind, ResourceLevel, ResourceStatus, ShelterStatus, resource_status, shelter_status,
};

/// Modeled shelter size; the capacity slider covers `0..=MAXIMUM_CAPACITY` people.
pub const MAXIMUM_CAPACITY: u32 = 200;

/// Occupants per capacity percent point.
const CAPACITY_SCALE: u32 = MAXIMUM_CAPACITY / 100;

/// Slider positions at the moment of submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceLevels {
    pub capacity: ResourceLevel,
    pub food: ResourceLevel,
    pub water: ResourceLevel,
    pub medical: ResourceLevel,
}

impl ResourceLevels {
    /// Level of one slider.
    pub fn get(&self, kind: ResourceKind) -> ResourceLevel {
        match kind {
            ResourceKind::Capacity => self.capacity,
            ResourceKind::Food => self.food,
            ResourceKind::Water => self.water,
            ResourceKind::Medical => self.medical,
        }
    }

    /// Mutable access to one slider.
    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut ResourceLevel {
        match kind {
            ResourceKind::Capacity => &mut self.capacity,
            ResourceKind::Food => &mut self.food,
            ResourceKind::Water => &mut self.water,
            ResourceKind::Medical => &mut self.medical,
        }
    }
}

/// `capacity` object of the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub current: u32,
    pub maximum: u32,
}

/// `resources` object of the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceReport {
    pub food: ResourceStatus,
    pub water: ResourceStatus,
    pub medical: ResourceStatus,
}

/// Full status update. Field order matches the wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShelterReport {
    pub capacity: CapacityReport,
    pub resources: ResourceReport,
    pub status: ShelterStatus,
    /// RFC 3339 UTC instant with millisecond precision.
    pub timestamp: String,
}

impl ShelterReport {
    /// Compact JSON body for the backend.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON used by the preview panel.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Combine the four slider positions into a report captured at `captured_at`.
pub fn build_report(levels: &ResourceLevels, captured_at: DateTime<Utc>) -> ShelterReport {
    ShelterReport {
        capacity: CapacityReport {
            current: u32::from(levels.capacity.percent()) * CAPACITY_SCALE,
            maximum: MAXIMUM_CAPACITY,
        },
        resources: ResourceReport {
            food: resource_status(levels.food),
            water: resource_status(levels.water),
            medical: resource_status(levels.medical),
        },
        status: shelter_status(levels.capacity),
        timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
