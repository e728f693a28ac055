//! Entities

use super::location::{Location, ResourceStatus};
use crate::error::ValidationError;
use crate::validation::{not_none, valid_string};
use serde::{Deserialize, Serialize};

/// A game entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub location: Location,
    pub entity_type: String,
    #[serde(default)]
    pub custom_name: String,
    pub status: ResourceStatus,
}

/// Options for listing entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityListOptions {
    /// Advisory page size; zero asks for no limit
    pub limit: usize,
}

/// Options for creating an entity. All fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCreateOptions {
    pub location: Option<Location>,
    pub entity_type: String,
    pub custom_name: String,
}

impl EntityCreateOptions {
    pub fn new(
        location: Location,
        entity_type: impl Into<String>,
        custom_name: impl Into<String>,
    ) -> Self {
        Self {
            location: Some(location),
            entity_type: entity_type.into(),
            custom_name: custom_name.into(),
        }
    }

    pub(crate) fn valid(&self) -> Result<(), ValidationError> {
        if !valid_string(Some(self.entity_type.as_str())) {
            return Err(ValidationError::MissingField("entity type"));
        }
        if !valid_string(Some(self.custom_name.as_str())) {
            return Err(ValidationError::MissingField("custom name"));
        }
        if !not_none(&self.location) {
            return Err(ValidationError::MissingField("location"));
        }
        Ok(())
    }
}

/// Options for updating an entity. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_wire_form() {
        let entity: Entity = serde_json::from_value(json!({
            "id": "e-1",
            "location": {"x": 5, "y": 70, "z": -5, "world": "overworld"},
            "entityType": "minecraft:sheep",
            "customName": "Dolly",
            "status": "initializing"
        }))
        .unwrap();
        assert_eq!(entity.entity_type, "minecraft:sheep");
        assert_eq!(entity.location, Location::new(5, 70, -5, "overworld"));
        assert_eq!(entity.status, ResourceStatus::Initializing);
    }

    #[test]
    fn test_create_validation_order() {
        let mut opts = EntityCreateOptions::default();
        assert_eq!(opts.valid(), Err(ValidationError::MissingField("entity type")));
        opts.entity_type = "minecraft:cow".to_string();
        assert_eq!(opts.valid(), Err(ValidationError::MissingField("custom name")));
        opts.custom_name = "Bessie".to_string();
        assert_eq!(opts.valid(), Err(ValidationError::MissingField("location")));
        opts.location = Some(Location::new(0, 0, 0, "overworld"));
        assert!(opts.valid().is_ok());
    }

    #[test]
    fn test_create_body() {
        let opts = EntityCreateOptions::new(Location::new(1, 2, 3, "end"), "minecraft:pig", "Pork");
        assert_eq!(
            serde_json::to_value(opts).unwrap(),
            json!({
                "location": {"x": 1, "y": 2, "z": 3, "world": "end"},
                "entityType": "minecraft:pig",
                "customName": "Pork"
            })
        );
    }
}
