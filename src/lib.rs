//! Typed client for the game-world API
//!
//! The API serves two resources, shapes and entities, each with a location
//! and a server-driven status. A shape's `dimensions` arrive as an untyped
//! JSON object; the shape client decodes them into [`Dimensions`] using the
//! shape's type before returning anything.
//!
//! - [`model`] - Resource types and operation options
//! - [`dimensions`] - Decoding of untyped dimensions payloads
//! - [`api`] - Transport seam, HTTP transport and resource clients
//! - [`config`] - Persistent user configuration
//! - [`validation`] - Input predicates checked before any request

pub mod api;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod model;
pub mod validation;

pub use api::client::Client;
pub use api::http::HttpTransport;
pub use api::transport::{Request, Transport, TransportError};
pub use dimensions::{decode_dimensions, DecodeError};
pub use error::{format_api_error, Error, Result, ValidationError};
pub use model::*;
