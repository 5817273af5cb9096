// ── Response indexing ──
//
// Turns raw response bodies into the ID-keyed snapshot shapes. Pure
// functions: no I/O, no snapshot access, so every rule is unit-testable.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use super::{DeviceIndex, Record, RecordIndex};
use crate::error::CoreError;
use crate::model::ResourceId;

fn into_array(value: Value, context: &'static str) -> Result<Vec<Value>, CoreError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CoreError::UnexpectedShape {
            context,
            message: format!("expected an array, got {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Key a list of records by the ID found under `key`. A later record with
/// the same ID replaces an earlier one.
fn index_by(
    items: Vec<Value>,
    key: &str,
    context: &'static str,
    into: &mut RecordIndex,
) -> Result<(), CoreError> {
    for item in items {
        let id = item
            .get(key)
            .and_then(ResourceId::from_json)
            .ok_or_else(|| CoreError::UnexpectedShape {
                context,
                message: format!("record without a usable '{key}'"),
            })?;
        trace!(%id, context, "indexed record");
        into.insert(id, Arc::new(item));
    }
    Ok(())
}

/// `{ tag: [record, ...], ... }` -> `tag -> (id -> record)`.
pub(crate) fn index_devices(body: Value) -> Result<DeviceIndex, CoreError> {
    let Value::Object(by_tag) = body else {
        return Err(CoreError::UnexpectedShape {
            context: "devices",
            message: format!("expected an object, got {}", kind_of(&body)),
        });
    };

    let mut index = DeviceIndex::with_capacity(by_tag.len());
    for (tag, devices) in by_tag {
        let mut by_id = RecordIndex::new();
        index_by(into_array(devices, "devices")?, "id", "devices", &mut by_id)?;
        index.insert(tag, by_id);
    }
    Ok(index)
}

pub(crate) fn index_dings(body: Value) -> Result<Vec<Record>, CoreError> {
    Ok(into_array(body, "dings")?
        .into_iter()
        .map(Arc::new)
        .collect())
}

/// `{ "user_locations": [...] | null }` -> `location_id -> record`.
/// A null collection yields an empty index.
pub(crate) fn index_locations(body: Value) -> Result<RecordIndex, CoreError> {
    let Value::Object(mut fields) = body else {
        return Err(CoreError::UnexpectedShape {
            context: "locations",
            message: format!("expected an object, got {}", kind_of(&body)),
        });
    };

    let mut index = RecordIndex::new();
    match fields.remove("user_locations") {
        Some(Value::Null) => {}
        Some(locations) => index_by(
            into_array(locations, "locations")?,
            "location_id",
            "locations",
            &mut index,
        )?,
        None => {
            return Err(CoreError::UnexpectedShape {
                context: "locations",
                message: "missing 'user_locations'".into(),
            });
        }
    }
    Ok(index)
}

/// Distinct location IDs referenced by indexed devices. Devices without a
/// `location_id` field, or with a null one, contribute nothing.
pub(crate) fn device_location_ids(devices: &DeviceIndex) -> BTreeSet<ResourceId> {
    devices
        .values()
        .flat_map(RecordIndex::values)
        .filter_map(|device| device.get("location_id"))
        .filter_map(ResourceId::from_json)
        .collect()
}

/// Merge one location's `{ "device_groups": [...] | null }` into `into`,
/// keyed by `device_group_id`.
pub(crate) fn merge_groups(into: &mut RecordIndex, body: Value) -> Result<(), CoreError> {
    let Value::Object(mut fields) = body else {
        return Err(CoreError::UnexpectedShape {
            context: "groups",
            message: format!("expected an object, got {}", kind_of(&body)),
        });
    };

    match fields.remove("device_groups") {
        Some(Value::Null) => Ok(()),
        Some(groups) => index_by(
            into_array(groups, "groups")?,
            "device_group_id",
            "groups",
            into,
        ),
        None => Err(CoreError::UnexpectedShape {
            context: "groups",
            message: "missing 'device_groups'".into(),
        }),
    }
}

/// Absolute expiry (`now + expires_in`, epoch seconds) of a ding.
pub(crate) fn ding_expiry(ding: &Value) -> Result<f64, CoreError> {
    let field = |name: &str| {
        ding.get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| CoreError::MissingField {
                resource: "ding".into(),
                id: ding
                    .get("id")
                    .map_or_else(|| "?".into(), ToString::to_string),
                field: name.into(),
            })
    };
    Ok(field("now")? + field("expires_in")?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn devices_indexed_by_tag_and_id() {
        let index = index_devices(json!({
            "doorbots": [{"id": 1}, {"id": 2}],
            "chimes": [{"id": 3}],
            "stickup_cams": []
        }))
        .unwrap();

        assert_eq!(index.len(), 3);
        let doorbots: Vec<_> = index["doorbots"].keys().cloned().collect();
        assert_eq!(doorbots, vec![ResourceId::from(1), ResourceId::from(2)]);
        assert!(index["stickup_cams"].is_empty());
    }

    #[test]
    fn devices_require_object_of_arrays() {
        assert!(matches!(
            index_devices(json!([])),
            Err(CoreError::UnexpectedShape { .. })
        ));
        assert!(matches!(
            index_devices(json!({"doorbots": {"id": 1}})),
            Err(CoreError::UnexpectedShape { .. })
        ));
        assert!(matches!(
            index_devices(json!({"doorbots": [{"name": "no id"}]})),
            Err(CoreError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn null_locations_are_empty() {
        let index = index_locations(json!({"user_locations": null})).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn locations_keyed_by_location_id() {
        let index = index_locations(json!({
            "user_locations": [{"location_id": "a", "name": "Home"}]
        }))
        .unwrap();
        assert_eq!(index[&ResourceId::from("a")]["name"], "Home");
    }

    #[test]
    fn missing_locations_field_is_an_error() {
        assert!(index_locations(json!({})).is_err());
    }

    #[test]
    fn location_ids_skip_missing_and_null() {
        let devices = index_devices(json!({
            "doorbots": [
                {"id": 1, "location_id": "A"},
                {"id": 2, "location_id": "B"},
                {"id": 3, "location_id": null}
            ],
            "chimes": [
                {"id": 4},
                {"id": 5, "location_id": "A"}
            ]
        }))
        .unwrap();

        let ids: Vec<_> = device_location_ids(&devices).into_iter().collect();
        assert_eq!(ids, vec![ResourceId::from("A"), ResourceId::from("B")]);
    }

    #[test]
    fn merge_groups_overwrites_duplicate_ids() {
        let mut index = RecordIndex::new();
        merge_groups(
            &mut index,
            json!({"device_groups": [{"device_group_id": "g1", "name": "first"}]}),
        )
        .unwrap();
        merge_groups(&mut index, json!({"device_groups": null})).unwrap();
        merge_groups(
            &mut index,
            json!({"device_groups": [{"device_group_id": "g1", "name": "second"}]}),
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index[&ResourceId::from("g1")]["name"], "second");
    }

    #[test]
    fn ding_expiry_sums_fields() {
        let expiry = ding_expiry(&json!({"id": 9, "now": 100.0, "expires_in": 50})).unwrap();
        assert!((expiry - 150.0).abs() < f64::EPSILON);

        let err = ding_expiry(&json!({"id": 9, "now": 100.0})).unwrap_err();
        assert!(matches!(err, CoreError::MissingField { ref field, .. } if field == "expires_in"));
    }
}
