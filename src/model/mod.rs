//! Resource model
//!
//! Plain data definitions for the resources the API serves, and the option
//! structs accepted by each operation.
//!
//! - [`location`] - `Location` and `ResourceStatus`, shared by every resource
//! - [`shape`] - `Shape` and its polymorphic `Dimensions`
//! - [`entity`] - `Entity`

pub mod entity;
pub mod location;
pub mod shape;

pub use entity::{Entity, EntityCreateOptions, EntityListOptions, EntityUpdateOptions};
pub use location::{Location, ResourceStatus};
pub use shape::{
    CubeDimensions, CylinderDimensions, Dimensions, Shape, ShapeCreateOptions, ShapeListOptions,
    ShapeType, ShapeUpdateOptions,
};
