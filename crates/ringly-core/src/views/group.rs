// ── Light group view ──

use std::fmt;
use std::time::Duration;

use ringly_api::Transport;
use ringly_api::endpoints;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::attrs::Attrs;
use crate::config::Host;
use crate::error::CoreError;
use crate::model::ResourceId;
use crate::query::Query;
use crate::ring::Ring;
use crate::store::Record;

/// A group of lights at one location, read from the groups snapshot.
pub struct RingLightGroup<T> {
    ring: Ring<T>,
    id: ResourceId,
}

impl<T> fmt::Debug for RingLightGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingLightGroup")
            .field("id", &self.id)
            .finish()
    }
}

impl<T: Transport> RingLightGroup<T> {
    /// Family tag shared by all light groups.
    pub const FAMILY: &str = "group";

    pub fn new(ring: &Ring<T>, id: ResourceId) -> Self {
        Self {
            ring: ring.clone(),
            id,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn record(&self) -> Result<Record, CoreError> {
        self.ring.group_record(&self.id)
    }

    fn read<R>(&self, f: impl FnOnce(&Attrs<'_>) -> Result<R, CoreError>) -> Result<R, CoreError> {
        let record = self.record()?;
        f(&Attrs::new("group", &self.id, &record))
    }

    pub fn name(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["name"]))
    }

    pub fn location_id(&self) -> Result<ResourceId, CoreError> {
        self.read(|a| a.id(&["location_id"]))
    }

    fn devices_path(&self) -> Result<String, CoreError> {
        let location_id = self.location_id()?;
        Ok(endpoints::group_devices(
            &location_id.to_string(),
            &self.id.to_string(),
        ))
    }

    /// Fetch whether the group's lights are currently on.
    pub async fn lights_on(&self) -> Result<bool, CoreError> {
        let body = self
            .ring
            .query(Query::get(self.devices_path()?).host(Host::App))
            .await?
            .json()?;
        Attrs::new("group devices", &self.id, &body).bool(&["lights_on", "enabled"])
    }

    /// Switch the group's lights. `duration` bounds how long they stay on;
    /// `None` leaves it to the server default.
    pub async fn set_lights(&self, on: bool, duration: Option<Duration>) -> Result<(), CoreError> {
        let mut lights = Map::new();
        lights.insert("enabled".into(), Value::Bool(on));
        if let Some(duration) = duration {
            lights.insert("duration_seconds".into(), json!(duration.as_secs()));
        }

        debug!(group = %self.id, on, "switching group lights");
        self.ring
            .query(
                Query::post(self.devices_path()?)
                    .host(Host::App)
                    .json(json!({ "lights_on": lights })),
            )
            .await?;
        Ok(())
    }
}
