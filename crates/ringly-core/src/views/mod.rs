// ── View objects ──
//
// Named lenses over the façade's snapshot. A view is a façade handle plus
// an ID; it owns no data and re-reads on every access.

mod attrs;
mod chime;
mod device;
mod doorbell;
mod group;
mod location;
mod stickup_cam;

pub use chime::RingChime;
pub use device::{RingDevice, RingGeneric};
pub use doorbell::RingDoorBell;
pub use group::RingLightGroup;
pub use location::RingLocation;
pub use stickup_cam::RingStickUpCam;
