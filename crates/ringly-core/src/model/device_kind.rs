// ── Device kinds ──
//
// The closed set of device-type tags the façade surfaces. The devices
// response may carry other tags; those stay in the snapshot but have no
// view type.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
pub enum DeviceKind {
    #[serde(rename = "stickup_cams")]
    #[strum(serialize = "stickup_cams")]
    StickupCam,
    #[serde(rename = "chimes")]
    #[strum(serialize = "chimes")]
    Chime,
    #[serde(rename = "doorbots")]
    #[strum(serialize = "doorbots")]
    Doorbot,
    /// Doorbells shared with this account by another owner.
    #[serde(rename = "authorized_doorbots")]
    #[strum(serialize = "authorized_doorbots")]
    AuthorizedDoorbot,
}

impl DeviceKind {
    /// The tag partitioning the devices response.
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Whether views of this kind are flagged as shared/guest devices.
    pub fn is_shared(self) -> bool {
        matches!(self, Self::AuthorizedDoorbot)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}
