// ── Ring façade ──
//
// Owns the snapshot slices, performs the round-trips that refresh them,
// and vends view objects. Cheaply cloneable: every clone (and every view)
// shares one `RingInner`, so a refresh is visible everywhere at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ringly_api::endpoints::{
    self, DEVICES_ENDPOINT, DINGS_ENDPOINT, HARDWARE_ID_FIELD, LOCATIONS_ENDPOINT,
    NEW_SESSION_ENDPOINT, SESSION_FORM,
};
use ringly_api::{Auth, Request, Response, Transport};
use tracing::{debug, info};

use crate::config::RingConfig;
use crate::error::CoreError;
use crate::model::{DeviceKind, ResourceId};
use crate::query::Query;
use crate::store::index::{
    device_location_ids, ding_expiry, index_devices, index_dings, index_locations, merge_groups,
};
use crate::store::{Record, RecordIndex, SnapshotStore};
use crate::views::{RingDevice, RingLightGroup, RingLocation};

/// Aggregation façade over one authenticated Ring account.
///
/// Snapshots start empty; nothing is fetched until an `update_*` call.
/// Reads of a slice that was never refreshed fail with
/// [`CoreError::NotLoaded`].
pub struct Ring<T = Auth> {
    inner: Arc<RingInner<T>>,
}

struct RingInner<T> {
    transport: T,
    config: RingConfig,
    store: SnapshotStore,
}

impl<T> Clone for Ring<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("config", &self.inner.config)
            .field("has_session", &self.inner.store.session.load().is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Ring<T> {
    pub fn new(transport: T, config: RingConfig) -> Self {
        Self {
            inner: Arc::new(RingInner {
                transport,
                config,
                store: SnapshotStore::default(),
            }),
        }
    }

    pub fn config(&self) -> &RingConfig {
        &self.inner.config
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// `true` when both handles share the same snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ── Transport pass-through ───────────────────────────────────────

    /// Resolve `query` against the configured hosts and send it.
    ///
    /// Transport failures come back unchanged as [`CoreError::Api`].
    pub async fn query(&self, query: Query) -> Result<Response, CoreError> {
        let url = self.inner.config.resolve(query.host, &query.path)?;
        let mut request = Request::new(query.method, url)
            .with_params(query.params)
            .with_timeout(query.timeout.or(self.inner.config.timeout));
        if let Some(form) = query.form {
            request = request.with_form(form);
        }
        if let Some(json) = query.json {
            request = request.with_json(json);
        }
        Ok(self.inner.transport.query(request).await?)
    }

    async fn fetch_json(&self, query: Query) -> Result<serde_json::Value, CoreError> {
        Ok(self.query(query).await?.json()?)
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// POST a new session. Every call re-POSTs and replaces the stored
    /// session; `update_data` only calls this when none exists.
    pub async fn create_session(&self) -> Result<(), CoreError> {
        let mut form: Vec<(String, String)> = SESSION_FORM
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        form.push((
            HARDWARE_ID_FIELD.to_owned(),
            self.inner.transport.hardware_id().to_owned(),
        ));

        debug!("creating session");
        let session = self
            .fetch_json(Query::post(NEW_SESSION_ENDPOINT).form(form))
            .await?;
        self.inner.store.session.store(Some(Arc::new(session)));
        Ok(())
    }

    /// The stored session handshake, if one was created.
    pub fn session(&self) -> Option<Arc<serde_json::Value>> {
        self.inner.store.session.load_full()
    }

    /// Replace the devices snapshot with a fresh `tag -> id -> record` index.
    pub async fn update_devices(&self) -> Result<(), CoreError> {
        let body = self.fetch_json(Query::get(DEVICES_ENDPOINT)).await?;
        let index = index_devices(body)?;
        debug!(
            tags = index.len(),
            devices = index.values().map(RecordIndex::len).sum::<usize>(),
            "devices refreshed"
        );
        self.inner.store.devices.store(Some(Arc::new(index)));
        Ok(())
    }

    /// Replace the dings snapshot with the raw alert list.
    pub async fn update_dings(&self) -> Result<(), CoreError> {
        let body = self.fetch_json(Query::get(DINGS_ENDPOINT)).await?;
        let dings = index_dings(body)?;
        debug!(dings = dings.len(), "dings refreshed");
        self.inner.store.dings.store(Some(Arc::new(dings)));
        Ok(())
    }

    /// Replace the locations snapshot. A null `user_locations` leaves an
    /// empty (but loaded) snapshot.
    pub async fn update_locations(&self) -> Result<(), CoreError> {
        let body = self.fetch_json(Query::get(LOCATIONS_ENDPOINT)).await?;
        let index = index_locations(body)?;
        debug!(locations = index.len(), "locations refreshed");
        self.inner.store.locations.store(Some(Arc::new(index)));
        Ok(())
    }

    /// Rebuild the groups snapshot with one request per distinct location
    /// referenced by the current devices snapshot.
    ///
    /// Locations are visited in ascending ID order; when two locations
    /// report the same group ID, the later location wins. The first failed
    /// request aborts the refresh and leaves the previous groups in place.
    pub async fn update_groups(&self) -> Result<(), CoreError> {
        let devices = self.inner.store.devices()?;
        let location_ids = device_location_ids(&devices);

        let mut groups = RecordIndex::new();
        for location_id in &location_ids {
            debug!(%location_id, "fetching groups");
            let body = self
                .fetch_json(Query::get(endpoints::groups(&location_id.to_string())))
                .await?;
            merge_groups(&mut groups, body)?;
        }

        debug!(
            locations = location_ids.len(),
            groups = groups.len(),
            "groups refreshed"
        );
        self.inner.store.groups.store(Some(Arc::new(groups)));
        Ok(())
    }

    /// Ensure a session, then refresh devices, dings, locations and groups
    /// in that order.
    pub async fn update_data(&self) -> Result<(), CoreError> {
        if self.session().is_none() {
            self.create_session().await?;
        }

        self.update_devices().await?;
        self.update_dings().await?;
        self.update_locations().await?;
        self.update_groups().await?;

        info!("account data refreshed");
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────

    /// One view per indexed device, for every known kind. Kinds absent
    /// from the last response map to an empty list.
    pub fn devices(&self) -> Result<BTreeMap<DeviceKind, Vec<RingDevice<T>>>, CoreError> {
        let devices = self.inner.store.devices()?;
        Ok(DeviceKind::all()
            .map(|kind| {
                let views = devices
                    .get(kind.tag())
                    .map(|by_id| {
                        by_id
                            .keys()
                            .map(|id| kind.construct(self, id.clone()))
                            .collect()
                    })
                    .unwrap_or_default();
                (kind, views)
            })
            .collect())
    }

    pub fn locations(&self) -> Result<IndexMap<ResourceId, RingLocation<T>>, CoreError> {
        Ok(self
            .inner
            .store
            .locations()?
            .keys()
            .map(|id| (id.clone(), RingLocation::new(self, id.clone())))
            .collect())
    }

    pub fn groups(&self) -> Result<IndexMap<ResourceId, RingLightGroup<T>>, CoreError> {
        Ok(self
            .inner
            .store
            .groups()?
            .keys()
            .map(|id| (id.clone(), RingLightGroup::new(self, id.clone())))
            .collect())
    }

    // ── Alerts ───────────────────────────────────────────────────────

    /// The raw dings list from the last refresh.
    pub fn dings(&self) -> Result<Arc<Vec<Record>>, CoreError> {
        self.inner.store.dings()
    }

    /// Dings that have not expired as of now.
    pub fn active_alerts(&self) -> Result<Vec<Record>, CoreError> {
        self.active_alerts_at(Utc::now())
    }

    /// Dings whose `now + expires_in` lies strictly after `at`, in
    /// original order.
    #[allow(clippy::cast_precision_loss)]
    pub fn active_alerts_at(&self, at: DateTime<Utc>) -> Result<Vec<Record>, CoreError> {
        let at_secs = at.timestamp_millis() as f64 / 1000.0;
        let mut active = Vec::new();
        for ding in self.inner.store.dings()?.iter() {
            if at_secs < ding_expiry(ding)? {
                active.push(Arc::clone(ding));
            }
        }
        Ok(active)
    }

    // ── Snapshot reads (used by views) ───────────────────────────────

    pub fn device_record(&self, kind: DeviceKind, id: &ResourceId) -> Result<Record, CoreError> {
        self.inner.store.device_record(kind, id)
    }

    pub fn location_record(&self, id: &ResourceId) -> Result<Record, CoreError> {
        self.inner.store.location_record(id)
    }

    pub fn group_record(&self, id: &ResourceId) -> Result<Record, CoreError> {
        self.inner.store.group_record(id)
    }
}
