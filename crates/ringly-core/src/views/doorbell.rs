// ── Doorbell view ──

use std::fmt;

use ringly_api::Transport;

use super::device::{RingGeneric, read_device};
use crate::error::CoreError;
use crate::model::{DeviceKind, ResourceId};
use crate::ring::Ring;
use crate::store::Record;

/// A doorbell, either owned (`doorbots`) or shared with this account
/// (`authorized_doorbots`).
pub struct RingDoorBell<T> {
    ring: Ring<T>,
    id: ResourceId,
    shared: bool,
}

impl<T> fmt::Debug for RingDoorBell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingDoorBell")
            .field("id", &self.id)
            .field("shared", &self.shared)
            .finish()
    }
}

impl<T: Transport> RingDoorBell<T> {
    pub fn new(ring: &Ring<T>, id: ResourceId, shared: bool) -> Self {
        Self {
            ring: ring.clone(),
            id,
            shared,
        }
    }

    /// `true` for doorbells another owner shared with this account.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Ring volume, 0-11.
    pub fn volume(&self) -> Result<u64, CoreError> {
        read_device(self, |a| a.u64(&["settings", "doorbell_volume"]))
    }

    /// Doorbell wiring type (0 = mechanical, 1 = digital, 2 = none).
    pub fn existing_doorbell_type(&self) -> Result<Option<u64>, CoreError> {
        read_device(self, |a| {
            a.opt_u64(&["settings", "chime_settings", "type"])
        })
    }
}

impl<T: Transport> RingGeneric for RingDoorBell<T> {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        if self.shared {
            DeviceKind::AuthorizedDoorbot
        } else {
            DeviceKind::Doorbot
        }
    }

    fn record(&self) -> Result<Record, CoreError> {
        self.ring.device_record(self.kind(), &self.id)
    }
}
