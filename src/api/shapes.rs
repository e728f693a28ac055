//! Shape operations
//!
//! Every operation that returns shape data runs each returned shape through
//! [`decode_dimensions`] before handing it back, so callers never see the
//! untyped wire form.

use super::transport::{Request, Transport};
use super::{id_path, ItemList};
use crate::dimensions::decode_dimensions;
use crate::error::Result;
use crate::model::{
    Location, ResourceStatus, Shape, ShapeCreateOptions, ShapeListOptions, ShapeUpdateOptions,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

const SHAPES_PATH: &str = "shapes";

/// A shape as it arrives, before its dimensions are decoded
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShape {
    id: String,
    location: Location,
    #[serde(default)]
    shape_type: Option<String>,
    material: String,
    #[serde(default)]
    previous_data: Option<Vec<String>>,
    #[serde(default)]
    dimensions: Value,
    status: ResourceStatus,
}

impl RawShape {
    fn decode(self) -> Result<Shape> {
        // An absent type decodes as the empty tag, which is unsupported
        let shape_type = self.shape_type.as_deref().unwrap_or("");
        let dimensions = decode_dimensions(&self.dimensions, shape_type)?;
        Ok(Shape {
            id: self.id,
            location: self.location,
            material: self.material,
            previous_data: self.previous_data.unwrap_or_default(),
            dimensions,
            status: self.status,
        })
    }
}

/// Parse a single shape response
fn parse_shape(value: Value) -> Result<Shape> {
    let raw: RawShape = serde_json::from_value(value).map_err(super::malformed)?;
    raw.decode()
}

/// Shape operations over a borrowed transport
pub struct Shapes<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Shapes<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List all shapes, in server order
    pub async fn list(&self, options: ShapeListOptions) -> Result<Vec<Shape>> {
        let mut request = Request::new(Method::GET, SHAPES_PATH);
        if options.limit > 0 {
            request = request.query("limit", options.limit);
        }

        let response = self.transport.send(request).await?;
        let list: ItemList<RawShape> = serde_json::from_value(response).map_err(super::malformed)?;

        let shapes = list
            .items
            .into_iter()
            .map(RawShape::decode)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("listed {} shapes", shapes.len());
        Ok(shapes)
    }

    /// Create a shape. Invalid options fail before any request is sent.
    pub async fn create(&self, options: ShapeCreateOptions) -> Result<Shape> {
        options.valid()?;

        let request = Request::new(Method::POST, SHAPES_PATH).json(&options)?;
        let shape = parse_shape(self.transport.send(request).await?)?;
        tracing::info!("created {} shape {}", shape.shape_type(), shape.id);
        Ok(shape)
    }

    /// Read a shape by id
    pub async fn read(&self, shape_id: &str) -> Result<Shape> {
        let path = id_path(SHAPES_PATH, "shape ID", shape_id)?;

        let request = Request::new(Method::GET, path);
        parse_shape(self.transport.send(request).await?)
    }

    /// Update attributes of an existing shape
    pub async fn update(&self, shape_id: &str, options: ShapeUpdateOptions) -> Result<Shape> {
        let path = id_path(SHAPES_PATH, "shape ID", shape_id)?;

        let request = Request::new(Method::PATCH, path).json(&options)?;
        parse_shape(self.transport.send(request).await?)
    }

    /// Request deletion of a shape. The server finishes removal asynchronously.
    pub async fn delete(&self, shape_id: &str) -> Result<()> {
        let path = id_path(SHAPES_PATH, "shape ID", shape_id)?;

        let request = Request::new(Method::DELETE, path).discard_body();
        self.transport.send(request).await?;
        tracing::info!("requested deletion of shape {}", shape_id);
        Ok(())
    }
}
