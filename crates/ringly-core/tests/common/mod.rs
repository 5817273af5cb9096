#![allow(clippy::unwrap_used, dead_code)]
// Shared wiremock fixtures for the façade and view tests.

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ringly_api::Auth;
use ringly_core::{Ring, RingConfig};

pub const APP_PREFIX: &str = "/app";

/// A façade whose API host is the mock server root and whose app host is
/// the same server under `/app`.
pub async fn setup() -> (MockServer, Ring) {
    let server = MockServer::start().await;
    let auth = Auth::with_client(
        reqwest::Client::new(),
        SecretString::from("test-token".to_string()),
        "hw-test".into(),
    );
    let config = RingConfig {
        api_uri: Url::parse(&server.uri()).unwrap(),
        app_uri: Url::parse(&format!("{}{APP_PREFIX}", server.uri())).unwrap(),
        timeout: None,
    };
    (server, Ring::new(auth, config))
}

pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `body` for the next request only; later requests fall through to
/// mocks mounted afterwards.
pub async fn mount_get_once(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

pub fn devices_body() -> Value {
    json!({
        "doorbots": [
            {
                "id": 101,
                "description": "Front Door",
                "device_id": "aabbccddeeff",
                "kind": "lpd_v1",
                "firmware_version": "Up to Date",
                "address": "1 Main St",
                "time_zone": "America/Chicago",
                "latitude": 30.25,
                "longitude": -97.75,
                "location_id": "loc-a",
                "battery_life": "87",
                "settings": {"doorbell_volume": 7, "chime_settings": {"type": 1}}
            }
        ],
        "authorized_doorbots": [
            {"id": 202, "description": "Neighbour", "location_id": "loc-b"}
        ],
        "chimes": [
            {"id": 303, "description": "Hallway", "location_id": "loc-a", "settings": {"volume": 4}}
        ],
        "stickup_cams": [
            {
                "id": 404,
                "description": "Driveway",
                "location_id": null,
                "led_status": "off",
                "siren_status": {"seconds_remaining": 12}
            },
            {"id": 405, "description": "Shed"}
        ],
        "base_stations": [
            {"id": 505, "location_id": "loc-c"}
        ]
    })
}

pub fn locations_body() -> Value {
    json!({
        "user_locations": [
            {
                "location_id": "loc-a",
                "owner_id": 42,
                "name": "Home",
                "geo_coordinates": {"latitude": "30.2672", "longitude": "-97.7431"},
                "address": {
                    "address1": "1 Main St",
                    "address2": "",
                    "cross_street": null,
                    "city": "Austin",
                    "state": "TX",
                    "zip_code": "78701",
                    "country": "US",
                    "timezone": "America/Chicago"
                }
            }
        ]
    })
}
