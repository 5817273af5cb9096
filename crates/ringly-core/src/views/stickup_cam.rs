// ── Stick Up Cam view ──

use std::fmt;

use ringly_api::Transport;

use super::device::{RingGeneric, read_device};
use crate::error::CoreError;
use crate::model::{DeviceKind, ResourceId};
use crate::ring::Ring;
use crate::store::Record;

/// A stick-up, floodlight or spotlight camera.
pub struct RingStickUpCam<T> {
    ring: Ring<T>,
    id: ResourceId,
}

impl<T> fmt::Debug for RingStickUpCam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingStickUpCam")
            .field("id", &self.id)
            .finish()
    }
}

impl<T: Transport> RingStickUpCam<T> {
    pub fn new(ring: &Ring<T>, id: ResourceId) -> Self {
        Self {
            ring: ring.clone(),
            id,
        }
    }

    /// Floodlight state (`"on"` / `"off"`); `None` on cameras without lights.
    pub fn light_status(&self) -> Result<Option<String>, CoreError> {
        read_device(self, |a| a.opt_str(&["led_status"]))
    }

    pub fn has_light(&self) -> Result<bool, CoreError> {
        Ok(self.light_status()?.is_some())
    }

    /// Seconds until the siren stops; 0 when silent.
    pub fn siren_seconds_remaining(&self) -> Result<u64, CoreError> {
        read_device(self, |a| {
            Ok(a.opt_u64(&["siren_status", "seconds_remaining"])?
                .unwrap_or(0))
        })
    }
}

impl<T: Transport> RingGeneric for RingStickUpCam<T> {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::StickupCam
    }

    fn record(&self) -> Result<Record, CoreError> {
        self.ring.device_record(DeviceKind::StickupCam, &self.id)
    }
}
