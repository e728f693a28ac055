//! World API interaction module
//!
//! # Module Structure
//!
//! - [`transport`] - The `Transport` trait resource clients send requests through
//! - [`http`] - reqwest implementation of `Transport`
//! - [`client`] - Main client handing out resource clients
//! - [`shapes`] - Shape CRUD with dimension decoding
//! - [`entities`] - Entity CRUD
//!
//! # Example
//!
//! ```ignore
//! use mcworld::{Client, ShapeListOptions};
//!
//! async fn example() -> mcworld::Result<()> {
//!     let client = Client::connect("http://localhost:8080/")?;
//!     let shapes = client.shapes().list(ShapeListOptions::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod entities;
pub mod http;
pub mod shapes;
pub mod transport;

use crate::error::{Error, ValidationError};
use crate::validation::valid_string_id;
use serde::Deserialize;
use transport::TransportError;

/// List response envelope
#[derive(Debug, Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new", alias = "Items")]
    items: Vec<T>,
}

/// Validate a resource id and build `<collection>/<id>`
fn id_path(collection: &str, field: &'static str, id: &str) -> Result<String, ValidationError> {
    if !valid_string_id(id) {
        return Err(ValidationError::InvalidId {
            field,
            value: id.to_string(),
        });
    }
    Ok(format!("{}/{}", collection, urlencoding::encode(id)))
}

/// A success response that does not match the expected resource layout
fn malformed(e: serde_json::Error) -> Error {
    Error::Transport(TransportError::Json(e))
}
