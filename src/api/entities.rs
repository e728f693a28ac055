//! Entity operations

use super::transport::{Request, Transport};
use super::{id_path, ItemList};
use crate::error::Result;
use crate::model::{Entity, EntityCreateOptions, EntityListOptions, EntityUpdateOptions};
use reqwest::Method;
use serde_json::Value;

const ENTITIES_PATH: &str = "entities";

fn parse_entity(value: Value) -> Result<Entity> {
    serde_json::from_value(value).map_err(super::malformed)
}

/// Entity operations over a borrowed transport
pub struct Entities<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Entities<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List all entities
    pub async fn list(&self, options: EntityListOptions) -> Result<Vec<Entity>> {
        let mut request = Request::new(Method::GET, ENTITIES_PATH);
        if options.limit > 0 {
            request = request.query("limit", options.limit);
        }

        let response = self.transport.send(request).await?;
        let list: ItemList<Entity> = serde_json::from_value(response).map_err(super::malformed)?;
        Ok(list.items)
    }

    /// Create an entity. Invalid options fail before any request is sent.
    pub async fn create(&self, options: EntityCreateOptions) -> Result<Entity> {
        options.valid()?;

        let request = Request::new(Method::POST, ENTITIES_PATH).json(&options)?;
        let entity = parse_entity(self.transport.send(request).await?)?;
        tracing::info!("created entity {} ({})", entity.id, entity.entity_type);
        Ok(entity)
    }

    pub async fn read(&self, entity_id: &str) -> Result<Entity> {
        let path = id_path(ENTITIES_PATH, "entity ID", entity_id)?;

        let request = Request::new(Method::GET, path);
        parse_entity(self.transport.send(request).await?)
    }

    pub async fn update(&self, entity_id: &str, options: EntityUpdateOptions) -> Result<Entity> {
        let path = id_path(ENTITIES_PATH, "entity ID", entity_id)?;

        let request = Request::new(Method::PATCH, path).json(&options)?;
        parse_entity(self.transport.send(request).await?)
    }

    pub async fn delete(&self, entity_id: &str) -> Result<()> {
        let path = id_path(ENTITIES_PATH, "entity ID", entity_id)?;

        self.transport
            .send(Request::new(Method::DELETE, path).discard_body())
            .await?;
        tracing::info!("requested deletion of entity {}", entity_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::RecordingTransport;
    use crate::model::{Location, ResourceStatus};
    use serde_json::json;
    use tokio_test::block_on;

    fn entity_json(id: &str) -> Value {
        json!({
            "id": id,
            "location": {"x": 1, "y": 2, "z": 3, "world": "overworld"},
            "entityType": "minecraft:sheep",
            "customName": "Dolly",
            "status": "ready"
        })
    }

    #[test]
    fn test_list_entities() {
        let transport = RecordingTransport::new()
            .respond(json!({"items": [entity_json("e-1"), entity_json("e-2")]}));
        let entities = Entities::new(&transport);

        let list = block_on(entities.list(EntityListOptions { limit: 2 })).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, "e-2");
        let req = transport.last_request();
        assert_eq!(req.path, "entities");
        assert_eq!(req.query, vec![("limit".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_create_entity() {
        let transport = RecordingTransport::new().respond(entity_json("e-1"));
        let entities = Entities::new(&transport);

        let options =
            EntityCreateOptions::new(Location::new(1, 2, 3, "overworld"), "minecraft:sheep", "Dolly");
        let entity = block_on(entities.create(options)).unwrap();

        assert_eq!(entity.status, ResourceStatus::Ready);
        let req = transport.last_request();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.unwrap()["customName"], "Dolly");
    }

    #[test]
    fn test_create_invalid_sends_nothing() {
        let transport = RecordingTransport::new();
        let entities = Entities::new(&transport);

        let options = EntityCreateOptions {
            location: None,
            entity_type: "minecraft:cow".to_string(),
            custom_name: "Bessie".to_string(),
        };
        assert!(block_on(entities.create(options)).unwrap_err().is_validation());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_read_update_delete_paths() {
        let transport = RecordingTransport::new()
            .respond(entity_json("e.1"))
            .respond(entity_json("e.1"));
        let entities = Entities::new(&transport);

        block_on(entities.read("e.1")).unwrap();
        assert_eq!(transport.last_request().path, "entities/e.1");

        let options = EntityUpdateOptions {
            custom_name: Some("Molly".to_string()),
            ..Default::default()
        };
        block_on(entities.update("e.1", options)).unwrap();
        let req = transport.last_request();
        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.body, Some(json!({"customName": "Molly"})));

        block_on(entities.delete("e.1")).unwrap();
        assert_eq!(transport.last_request().method, Method::DELETE);
        assert!(transport.last_request().discard_body);
        assert_eq!(transport.calls(), 3);
    }

    #[test]
    fn test_invalid_entity_id_sends_nothing() {
        let transport = RecordingTransport::new();
        let entities = Entities::new(&transport);

        assert!(block_on(entities.read("bad id")).unwrap_err().is_validation());
        assert!(block_on(entities.delete("")).unwrap_err().is_validation());
        assert_eq!(transport.calls(), 0);
    }
}
