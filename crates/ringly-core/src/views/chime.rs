// ── Chime view ──

use std::fmt;

use ringly_api::Transport;

use super::device::{RingGeneric, read_device};
use crate::error::CoreError;
use crate::model::{DeviceKind, ResourceId};
use crate::ring::Ring;
use crate::store::Record;

pub struct RingChime<T> {
    ring: Ring<T>,
    id: ResourceId,
}

impl<T> fmt::Debug for RingChime<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingChime").field("id", &self.id).finish()
    }
}

impl<T: Transport> RingChime<T> {
    pub fn new(ring: &Ring<T>, id: ResourceId) -> Self {
        Self {
            ring: ring.clone(),
            id,
        }
    }

    /// Chime volume, 0-10.
    pub fn volume(&self) -> Result<u64, CoreError> {
        read_device(self, |a| a.u64(&["settings", "volume"]))
    }
}

impl<T: Transport> RingGeneric for RingChime<T> {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Chime
    }

    fn record(&self) -> Result<Record, CoreError> {
        self.ring.device_record(DeviceKind::Chime, &self.id)
    }
}
