pub mod device_kind;
pub mod location_mode;
pub mod resource_id;

pub use device_kind::DeviceKind;
pub use location_mode::LocationMode;
pub use resource_id::ResourceId;
