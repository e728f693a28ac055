//! World API Client
//!
//! Main client, owning a transport and handing out the per-resource clients.

use super::entities::Entities;
use super::http::HttpTransport;
use super::shapes::Shapes;
use super::transport::Transport;
use crate::config::Config;
use crate::error::Result;

/// Main world API client
#[derive(Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
}

impl Client<HttpTransport> {
    /// Client for the API at `base_url`, without authentication
    pub fn connect(base_url: &str) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(base_url)?))
    }

    /// Client built from the effective configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::with_options(
            &config.effective_base_url(),
            config.effective_token(),
            config.timeout(),
        )?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn shapes(&self) -> Shapes<'_, T> {
        Shapes::new(&self.transport)
    }

    pub fn entities(&self) -> Entities<'_, T> {
        Entities::new(&self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::RecordingTransport;
    use crate::model::{CubeDimensions, Location, ShapeCreateOptions};
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::block_on;

    #[test]
    fn test_shared_transport_serves_both_resources() {
        let transport = Arc::new(
            RecordingTransport::new()
                .respond(json!({"items": []}))
                .respond(json!({"items": []})),
        );
        let client = Client::new(Arc::clone(&transport));

        block_on(client.shapes().list(Default::default())).unwrap();
        block_on(client.entities().list(Default::default())).unwrap();

        let paths: Vec<String> = transport
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.path.clone())
            .collect();
        assert_eq!(paths, vec!["shapes", "entities"]);
    }

    #[test]
    fn test_concurrent_calls_are_independent() {
        let client = Client::new(
            RecordingTransport::new()
                .respond(json!({"items": []}))
                .respond(json!({"items": []})),
        );

        let shapes = client.shapes();
        let entities = client.entities();

        let (a, b) = block_on(async {
            futures::join!(
                shapes.list(Default::default()),
                entities.list(Default::default())
            )
        });
        assert!(a.unwrap().is_empty());
        assert!(b.unwrap().is_empty());
        assert_eq!(client.transport().calls(), 2);
    }

    #[test]
    fn test_validation_happens_before_transport() {
        let client = Client::new(RecordingTransport::new());
        let mut options = ShapeCreateOptions::new(
            Location::new(0, 0, 0, "overworld"),
            "stone",
            CubeDimensions::new(1, 1, 1),
        );
        options.material.clear();

        assert!(block_on(client.shapes().create(options)).unwrap_err().is_validation());
        assert_eq!(client.transport().calls(), 0);
    }
}
