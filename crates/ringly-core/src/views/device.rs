// ── Device views: shared contract + kind registry ──
//
// Every device view is an (ID, kind) pair reading one record out of the
// devices snapshot. `RingGeneric` supplies the accessors common to all
// kinds; `DeviceKind::construct` maps each kind to its view type.

use std::fmt;

use ringly_api::Transport;

use super::attrs::Attrs;
use super::{RingChime, RingDoorBell, RingStickUpCam};
use crate::error::CoreError;
use crate::model::{DeviceKind, ResourceId};
use crate::ring::Ring;
use crate::store::Record;

pub(crate) fn read_device<V, R>(
    view: &V,
    f: impl FnOnce(&Attrs<'_>) -> Result<R, CoreError>,
) -> Result<R, CoreError>
where
    V: RingGeneric + ?Sized,
{
    let record = view.record()?;
    let id = view.id();
    f(&Attrs::new(view.kind().tag(), id, &record))
}

/// Accessors shared by every device view.
pub trait RingGeneric {
    fn id(&self) -> &ResourceId;

    fn kind(&self) -> DeviceKind;

    /// The current raw record for this device.
    fn record(&self) -> Result<Record, CoreError>;

    /// The device-type tag this view reads from.
    fn family(&self) -> &'static str {
        self.kind().tag()
    }

    /// User-assigned name.
    fn name(&self) -> Result<String, CoreError> {
        read_device(self, |a| a.str(&["description"]))
    }

    /// Vendor device identifier (distinct from the numeric `id`).
    fn device_api_id(&self) -> Result<String, CoreError> {
        read_device(self, |a| a.str(&["device_id"]))
    }

    /// Hardware model code, e.g. `lpd_v1`.
    fn model(&self) -> Result<String, CoreError> {
        read_device(self, |a| a.str(&["kind"]))
    }

    fn firmware(&self) -> Result<String, CoreError> {
        read_device(self, |a| a.str(&["firmware_version"]))
    }

    fn address(&self) -> Result<String, CoreError> {
        read_device(self, |a| a.str(&["address"]))
    }

    fn timezone(&self) -> Result<String, CoreError> {
        read_device(self, |a| a.str(&["time_zone"]))
    }

    fn latitude(&self) -> Result<f64, CoreError> {
        read_device(self, |a| a.f64(&["latitude"]))
    }

    fn longitude(&self) -> Result<f64, CoreError> {
        read_device(self, |a| a.f64(&["longitude"]))
    }

    /// Location the device is assigned to; `None` when unassigned.
    fn location_id(&self) -> Result<Option<ResourceId>, CoreError> {
        read_device(self, |a| match a.lookup(&["location_id"]) {
            Some(_) => a.id(&["location_id"]).map(Some),
            None => Ok(None),
        })
    }

    /// Battery percentage; `None` for wired devices.
    fn battery_life(&self) -> Result<Option<u64>, CoreError> {
        read_device(self, |a| a.opt_u64(&["battery_life"]))
    }
}

/// Any device view, tagged by its concrete type.
pub enum RingDevice<T> {
    DoorBell(RingDoorBell<T>),
    Chime(RingChime<T>),
    StickUpCam(RingStickUpCam<T>),
}

impl<T> fmt::Debug for RingDevice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoorBell(v) => v.fmt(f),
            Self::Chime(v) => v.fmt(f),
            Self::StickUpCam(v) => v.fmt(f),
        }
    }
}

impl<T: Transport> RingDevice<T> {
    fn inner(&self) -> &dyn RingGeneric {
        match self {
            Self::DoorBell(v) => v,
            Self::Chime(v) => v,
            Self::StickUpCam(v) => v,
        }
    }

    pub fn as_doorbell(&self) -> Option<&RingDoorBell<T>> {
        match self {
            Self::DoorBell(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_chime(&self) -> Option<&RingChime<T>> {
        match self {
            Self::Chime(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_stickup_cam(&self) -> Option<&RingStickUpCam<T>> {
        match self {
            Self::StickUpCam(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is a doorbell shared with the account by another owner.
    pub fn is_shared(&self) -> bool {
        self.as_doorbell().is_some_and(RingDoorBell::is_shared)
    }
}

impl<T: Transport> RingGeneric for RingDevice<T> {
    fn id(&self) -> &ResourceId {
        self.inner().id()
    }

    fn kind(&self) -> DeviceKind {
        self.inner().kind()
    }

    fn record(&self) -> Result<Record, CoreError> {
        self.inner().record()
    }
}

impl DeviceKind {
    /// Build the view for a device of this kind. Authorized doorbots are
    /// doorbells flagged as shared.
    pub fn construct<T: Transport>(self, ring: &Ring<T>, id: ResourceId) -> RingDevice<T> {
        match self {
            Self::StickupCam => RingDevice::StickUpCam(RingStickUpCam::new(ring, id)),
            Self::Chime => RingDevice::Chime(RingChime::new(ring, id)),
            Self::Doorbot => RingDevice::DoorBell(RingDoorBell::new(ring, id, false)),
            Self::AuthorizedDoorbot => RingDevice::DoorBell(RingDoorBell::new(ring, id, true)),
        }
    }
}
