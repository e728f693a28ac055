//! Shapes and their polymorphic dimensions

use super::location::{Location, ResourceStatus};
use crate::dimensions::DecodeError;
use crate::error::ValidationError;
use crate::validation::{not_none, valid_string};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Discriminant selecting which [`Dimensions`] variant a shape carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Cube,
    Cylinder,
}

impl ShapeType {
    pub const ALL: [ShapeType; 2] = [ShapeType::Cube, ShapeType::Cylinder];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Cube => "cube",
            ShapeType::Cylinder => "cylinder",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cube" => Ok(ShapeType::Cube),
            "cylinder" => Ok(ShapeType::Cylinder),
            other => Err(DecodeError::UnsupportedShapeType(other.to_string())),
        }
    }
}

/// Dimensions of a cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeDimensions {
    pub length_x: i64,
    pub height_y: i64,
    pub width_z: i64,
}

impl CubeDimensions {
    pub fn new(length_x: i64, height_y: i64, width_z: i64) -> Self {
        Self {
            length_x,
            height_y,
            width_z,
        }
    }
}

/// Dimensions of a cylinder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CylinderDimensions {
    pub height: i64,
    pub radius: i64,
}

impl CylinderDimensions {
    pub fn new(height: i64, radius: i64) -> Self {
        Self { height, radius }
    }
}

/// Shape-type dependent dimensions.
///
/// Serializes to the flat object the API expects, with no type marker; the
/// sibling `shapeType` field is the only tag. Incoming dimensions are only
/// ever built by [`crate::dimensions::decode_dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Dimensions {
    Cube(CubeDimensions),
    Cylinder(CylinderDimensions),
}

impl Dimensions {
    /// The shape type these dimensions belong to
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Dimensions::Cube(_) => ShapeType::Cube,
            Dimensions::Cylinder(_) => ShapeType::Cylinder,
        }
    }

    pub fn as_cube(&self) -> Option<&CubeDimensions> {
        match self {
            Dimensions::Cube(d) => Some(d),
            Dimensions::Cylinder(_) => None,
        }
    }

    pub fn as_cylinder(&self) -> Option<&CylinderDimensions> {
        match self {
            Dimensions::Cylinder(d) => Some(d),
            Dimensions::Cube(_) => None,
        }
    }
}

impl From<CubeDimensions> for Dimensions {
    fn from(d: CubeDimensions) -> Self {
        Dimensions::Cube(d)
    }
}

impl From<CylinderDimensions> for Dimensions {
    fn from(d: CylinderDimensions) -> Self {
        Dimensions::Cylinder(d)
    }
}

/// A shape placed in the world.
///
/// The shape type is not stored separately: it is read off the dimensions
/// variant, so a shape can never carry dimensions of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub id: String,
    pub location: Location,
    pub material: String,
    /// Server-written audit trail of earlier snapshots, oldest first
    pub previous_data: Vec<String>,
    pub dimensions: Dimensions,
    pub status: ResourceStatus,
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        self.dimensions.shape_type()
    }
}

/// Wire layout of a shape, borrowed for serialization
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShapeWire<'a> {
    id: &'a str,
    location: &'a Location,
    shape_type: ShapeType,
    material: &'a str,
    previous_data: &'a [String],
    dimensions: &'a Dimensions,
    status: ResourceStatus,
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ShapeWire {
            id: &self.id,
            location: &self.location,
            shape_type: self.shape_type(),
            material: &self.material,
            previous_data: &self.previous_data,
            dimensions: &self.dimensions,
            status: self.status,
        }
        .serialize(serializer)
    }
}

/// Options for listing shapes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeListOptions {
    /// Advisory page size; zero asks for no limit
    pub limit: usize,
}

/// Options for creating a shape. All fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeCreateOptions {
    pub location: Option<Location>,
    pub shape_type: Option<ShapeType>,
    pub material: String,
    pub dimensions: Option<Dimensions>,
}

impl ShapeCreateOptions {
    /// Fully populated options, with the shape type taken from the dimensions
    pub fn new(
        location: Location,
        material: impl Into<String>,
        dimensions: impl Into<Dimensions>,
    ) -> Self {
        let dimensions = dimensions.into();
        Self {
            location: Some(location),
            shape_type: Some(dimensions.shape_type()),
            material: material.into(),
            dimensions: Some(dimensions),
        }
    }

    pub(crate) fn valid(&self) -> Result<(), ValidationError> {
        if !not_none(&self.shape_type) {
            return Err(ValidationError::MissingField("shape type"));
        }
        if !valid_string(Some(self.material.as_str())) {
            return Err(ValidationError::MissingField("material"));
        }
        if !not_none(&self.dimensions) {
            return Err(ValidationError::MissingField("dimensions"));
        }
        if !not_none(&self.location) {
            return Err(ValidationError::MissingField("location"));
        }
        if let (Some(expected), Some(dimensions)) = (self.shape_type, self.dimensions) {
            if dimensions.shape_type() != expected {
                return Err(ValidationError::DimensionsMismatch {
                    expected,
                    found: dimensions.shape_type(),
                });
            }
        }
        Ok(())
    }
}

/// Options for updating a shape. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}
