// ── Snapshot storage ──
//
// One atomically swappable cell per resource category. A refresh builds a
// complete new index off to the side and publishes it with a single store,
// so readers see either the previous snapshot or the new one.

pub(crate) mod index;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use indexmap::IndexMap;

use crate::error::CoreError;
use crate::model::{DeviceKind, ResourceId};

/// A raw JSON record as returned by the API.
pub type Record = Arc<serde_json::Value>;

/// ID-keyed records, in response order.
pub type RecordIndex = IndexMap<ResourceId, Record>;

/// Device-type tag -> ID-keyed device records.
pub type DeviceIndex = IndexMap<String, RecordIndex>;

#[derive(Default)]
pub(crate) struct SnapshotStore {
    pub(crate) session: ArcSwapOption<serde_json::Value>,
    pub(crate) devices: ArcSwapOption<DeviceIndex>,
    pub(crate) dings: ArcSwapOption<Vec<Record>>,
    pub(crate) locations: ArcSwapOption<RecordIndex>,
    pub(crate) groups: ArcSwapOption<RecordIndex>,
}

impl SnapshotStore {
    pub(crate) fn devices(&self) -> Result<Arc<DeviceIndex>, CoreError> {
        self.devices
            .load_full()
            .ok_or(CoreError::NotLoaded { snapshot: "devices" })
    }

    pub(crate) fn dings(&self) -> Result<Arc<Vec<Record>>, CoreError> {
        self.dings
            .load_full()
            .ok_or(CoreError::NotLoaded { snapshot: "dings" })
    }

    pub(crate) fn locations(&self) -> Result<Arc<RecordIndex>, CoreError> {
        self.locations
            .load_full()
            .ok_or(CoreError::NotLoaded {
                snapshot: "locations",
            })
    }

    pub(crate) fn groups(&self) -> Result<Arc<RecordIndex>, CoreError> {
        self.groups
            .load_full()
            .ok_or(CoreError::NotLoaded { snapshot: "groups" })
    }

    pub(crate) fn device_record(
        &self,
        kind: DeviceKind,
        id: &ResourceId,
    ) -> Result<Record, CoreError> {
        self.devices()?
            .get(kind.tag())
            .and_then(|by_id| by_id.get(id))
            .cloned()
            .ok_or_else(|| CoreError::not_found(kind.tag(), id))
    }

    pub(crate) fn location_record(&self, id: &ResourceId) -> Result<Record, CoreError> {
        self.locations()?
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("location", id))
    }

    pub(crate) fn group_record(&self, id: &ResourceId) -> Result<Record, CoreError> {
        self.groups()?
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("group", id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn devices_with_chime(id: u64) -> DeviceIndex {
        let mut chimes = RecordIndex::new();
        chimes.insert(ResourceId::from(id), Arc::new(json!({"id": id})));
        let mut index = DeviceIndex::new();
        index.insert("chimes".into(), chimes);
        index
    }

    #[test]
    fn empty_store_reports_not_loaded() {
        let store = SnapshotStore::default();
        assert!(matches!(
            store.locations(),
            Err(CoreError::NotLoaded {
                snapshot: "locations"
            })
        ));
        assert!(matches!(
            store.device_record(DeviceKind::Chime, &ResourceId::from(1)),
            Err(CoreError::NotLoaded { snapshot: "devices" })
        ));
    }

    #[test]
    fn device_record_lookup_by_kind() {
        let store = SnapshotStore::default();
        store.devices.store(Some(Arc::new(devices_with_chime(5))));

        let rec = store
            .device_record(DeviceKind::Chime, &ResourceId::from(5))
            .unwrap();
        assert_eq!(rec["id"], 5);

        let err = store
            .device_record(DeviceKind::Doorbot, &ResourceId::from(5))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { ref resource, .. } if resource == "doorbots"));
    }

    #[test]
    fn swapped_snapshot_is_seen_by_later_reads() {
        let store = SnapshotStore::default();
        store.devices.store(Some(Arc::new(devices_with_chime(5))));
        store.devices.store(Some(Arc::new(devices_with_chime(6))));

        assert!(
            store
                .device_record(DeviceKind::Chime, &ResourceId::from(5))
                .is_err()
        );
        assert!(
            store
                .device_record(DeviceKind::Chime, &ResourceId::from(6))
                .is_ok()
        );
    }
}
