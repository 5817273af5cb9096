//! Snapshot façade and live views over a Ring account.
//!
//! - **[`Ring`]**: aggregation façade. Owns one snapshot per resource
//!   category (devices, dings, locations, groups, session), refreshed only
//!   by explicit `update_*` calls. [`update_data()`](Ring::update_data)
//!   refreshes everything in dependency order.
//!
//! - **Views** ([`RingLocation`], [`RingDoorBell`], [`RingChime`],
//!   [`RingStickUpCam`], [`RingLightGroup`]): a façade handle plus an ID.
//!   Every accessor reads the *current* snapshot, so a refresh is visible
//!   through views built before it, and a view whose ID vanished reports
//!   [`CoreError::NotFound`].
//!
//! - **[`DeviceKind`]**: the closed set of device-type tags, each mapped
//!   to its view constructor.
//!
//! Transport is pluggable through [`ringly_api::Transport`]; the default
//! is the bearer-token [`ringly_api::Auth`].

pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod ring;
pub mod store;
pub mod views;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{Host, RingConfig};
pub use error::CoreError;
pub use model::{DeviceKind, LocationMode, ResourceId};
pub use query::Query;
pub use ring::Ring;
pub use store::{DeviceIndex, Record, RecordIndex};
pub use views::{
    RingChime, RingDevice, RingDoorBell, RingGeneric, RingLightGroup, RingLocation,
    RingStickUpCam,
};
