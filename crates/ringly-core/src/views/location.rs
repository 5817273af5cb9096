// ── Location view ──

use std::fmt;

use ringly_api::Transport;
use ringly_api::endpoints;
use serde_json::json;
use tracing::{debug, warn};

use super::attrs::Attrs;
use crate::config::Host;
use crate::error::CoreError;
use crate::model::{LocationMode, ResourceId};
use crate::query::Query;
use crate::ring::Ring;

/// Live view of one location record.
///
/// Holds no data of its own: every accessor re-reads the façade's current
/// locations snapshot, so values track the latest refresh and fail with
/// [`CoreError::NotFound`] once the location disappears from it.
pub struct RingLocation<T> {
    ring: Ring<T>,
    id: ResourceId,
    mode_path: String,
}

impl<T> fmt::Debug for RingLocation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingLocation").field("id", &self.id).finish()
    }
}

impl<T: Transport> RingLocation<T> {
    pub fn new(ring: &Ring<T>, id: ResourceId) -> Self {
        let mode_path = endpoints::location_mode(&id.to_string());
        Self {
            ring: ring.clone(),
            id,
            mode_path,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    fn read<R>(&self, f: impl FnOnce(&Attrs<'_>) -> Result<R, CoreError>) -> Result<R, CoreError> {
        let record = self.ring.location_record(&self.id)?;
        f(&Attrs::new("location", &self.id, &record))
    }

    pub fn owner_id(&self) -> Result<u64, CoreError> {
        self.read(|a| a.u64(&["owner_id"]))
    }

    pub fn name(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["name"]))
    }

    pub fn latitude(&self) -> Result<f64, CoreError> {
        self.read(|a| a.f64(&["geo_coordinates", "latitude"]))
    }

    pub fn longitude(&self) -> Result<f64, CoreError> {
        self.read(|a| a.f64(&["geo_coordinates", "longitude"]))
    }

    // ── Postal address ───────────────────────────────────────────────

    pub fn address1(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["address", "address1"]))
    }

    pub fn address2(&self) -> Result<Option<String>, CoreError> {
        self.read(|a| a.opt_str(&["address", "address2"]))
    }

    pub fn cross_street(&self) -> Result<Option<String>, CoreError> {
        self.read(|a| a.opt_str(&["address", "cross_street"]))
    }

    pub fn city(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["address", "city"]))
    }

    pub fn state(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["address", "state"]))
    }

    pub fn zip_code(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["address", "zip_code"]))
    }

    pub fn country(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["address", "country"]))
    }

    pub fn timezone(&self) -> Result<String, CoreError> {
        self.read(|a| a.str(&["address", "timezone"]))
    }

    // ── Mode ─────────────────────────────────────────────────────────

    /// Fetch the location's current mode from the app host.
    ///
    /// A `mode` outside the known set yields `Ok(None)`; only a body with
    /// no `mode` field at all is an error.
    pub async fn get_mode(&self) -> Result<Option<LocationMode>, CoreError> {
        let body = self
            .ring
            .query(Query::get(&self.mode_path).host(Host::App))
            .await?
            .json()?;

        let raw = body.get("mode").ok_or_else(|| CoreError::MissingField {
            resource: "location mode".into(),
            id: self.id.to_string(),
            field: "mode".into(),
        })?;

        let mode = LocationMode::from_api(raw);
        if mode.is_none() {
            warn!(location = %self.id, value = %raw, "unrecognized location mode");
        }
        Ok(mode)
    }

    /// Ask the app host to switch modes. Nothing local changes; call
    /// [`get_mode`](Self::get_mode) to observe the result.
    pub async fn set_mode(&self, mode: LocationMode) -> Result<(), CoreError> {
        debug!(location = %self.id, %mode, "setting location mode");
        self.ring
            .query(
                Query::post(&self.mode_path)
                    .host(Host::App)
                    .json(json!({ "mode": mode })),
            )
            .await?;
        Ok(())
    }
}
