//! Types shared by every resource

use serde::{Deserialize, Serialize};
use std::fmt;

/// An in-game location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub world: String,
}

impl Location {
    pub fn new(x: i64, y: i64, z: i64, world: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            world: world.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {}, {})", self.world, self.x, self.y, self.z)
    }
}

/// Server-side lifecycle state of a resource. Observed, never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Initializing,
    Ready,
    Deleting,
    Updating,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Initializing => "initializing",
            ResourceStatus::Ready => "ready",
            ResourceStatus::Deleting => "deleting",
            ResourceStatus::Updating => "updating",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
