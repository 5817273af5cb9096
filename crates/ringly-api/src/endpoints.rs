// Ring cloud endpoint table
//
// Hosts and relative paths consumed by the client. Paths are joined onto
// a host URI by plain concatenation, so every path starts with `/`.

/// Primary API host.
pub const API_URI: &str = "https://api.ring.com";
/// Alternate "app" host serving location modes and group devices.
pub const APP_URI: &str = "https://app.ring.com";
/// OAuth token endpoint (absolute).
pub const OAUTH_URI: &str = "https://oauth.ring.com/oauth/token";

pub const NEW_SESSION_ENDPOINT: &str = "/clients_api/session";
pub const DEVICES_ENDPOINT: &str = "/clients_api/ring_devices";
pub const DINGS_ENDPOINT: &str = "/clients_api/dings/active";
pub const LOCATIONS_ENDPOINT: &str = "/devices/v1/locations";

/// OAuth client identity expected by the token endpoint.
pub const OAUTH_CLIENT_ID: &str = "ring_official_android";
pub const OAUTH_SCOPE: &str = "client";

/// Fixed form fields sent with every session creation request.
/// The caller appends `device[hardware_id]`.
pub const SESSION_FORM: &[(&str, &str)] = &[
    ("api_version", "9"),
    ("device[os]", "android"),
    ("device[app_brand]", "ring"),
    ("device[metadata][device_model]", "KVM"),
    ("device[metadata][device_name]", "ringly"),
    ("device[metadata][resolution]", "600x800"),
    ("device[metadata][app_version]", "1.3.806"),
    ("device[metadata][app_instalation_date]", ""),
    ("device[metadata][manufacturer]", "Qemu"),
    ("device[metadata][device_type]", "desktop"),
    ("device[metadata][architecture]", "desktop"),
    ("device[metadata][language]", "en"),
];

/// Form key carrying the client's hardware identifier.
pub const HARDWARE_ID_FIELD: &str = "device[hardware_id]";

/// `GET /groups/v1/locations/{location}/groups`
pub fn groups(location_id: &str) -> String {
    format!("/groups/v1/locations/{location_id}/groups")
}

/// `GET|POST /groups/v1/locations/{location}/groups/{group}/devices` (app host)
pub fn group_devices(location_id: &str, group_id: &str) -> String {
    format!("/groups/v1/locations/{location_id}/groups/{group_id}/devices")
}

/// `GET|POST /api/v1/mode/location/{location}` (app host)
pub fn location_mode(location_id: &str) -> String {
    format!("/api/v1/mode/location/{location_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templated_paths() {
        assert_eq!(groups("loc-1"), "/groups/v1/locations/loc-1/groups");
        assert_eq!(
            group_devices("loc-1", "grp-9"),
            "/groups/v1/locations/loc-1/groups/grp-9/devices"
        );
        assert_eq!(location_mode("loc-1"), "/api/v1/mode/location/loc-1");
    }
}
