// ── Typed field access over a raw record ──
//
// Views never index JSON directly. Every read goes through `Attrs`, which
// turns an absent or mistyped field into `CoreError::MissingField` naming
// the resource, its ID, and the dotted field path.

use serde_json::Value;

use crate::error::CoreError;
use crate::model::ResourceId;

pub(crate) struct Attrs<'a> {
    resource: &'a str,
    id: &'a ResourceId,
    record: &'a Value,
}

impl<'a> Attrs<'a> {
    pub(crate) fn new(resource: &'a str, id: &'a ResourceId, record: &'a Value) -> Self {
        Self {
            resource,
            id,
            record,
        }
    }

    /// Follow `path` through nested objects. `null` counts as absent.
    pub(crate) fn lookup(&self, path: &[&str]) -> Option<&'a Value> {
        path.iter()
            .try_fold(self.record, |value, key| value.get(key))
            .filter(|value| !value.is_null())
    }

    fn missing(&self, path: &[&str]) -> CoreError {
        CoreError::MissingField {
            resource: self.resource.to_owned(),
            id: self.id.to_string(),
            field: path.join("."),
        }
    }

    pub(crate) fn value(&self, path: &[&str]) -> Result<&'a Value, CoreError> {
        self.lookup(path).ok_or_else(|| self.missing(path))
    }

    pub(crate) fn str(&self, path: &[&str]) -> Result<String, CoreError> {
        self.value(path)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.missing(path))
    }

    /// Absent or null is `None`; present with the wrong type is an error.
    pub(crate) fn opt_str(&self, path: &[&str]) -> Result<Option<String>, CoreError> {
        self.lookup(path)
            .map(|v| v.as_str().map(str::to_owned).ok_or_else(|| self.missing(path)))
            .transpose()
    }

    /// Accepts JSON numbers and numeric strings; the API uses both for
    /// coordinates.
    pub(crate) fn f64(&self, path: &[&str]) -> Result<f64, CoreError> {
        let value = self.value(path)?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
            .ok_or_else(|| self.missing(path))
    }

    pub(crate) fn u64(&self, path: &[&str]) -> Result<u64, CoreError> {
        self.opt_u64(path)?.ok_or_else(|| self.missing(path))
    }

    /// Accepts JSON integers and integer strings; absent or null is `None`.
    pub(crate) fn opt_u64(&self, path: &[&str]) -> Result<Option<u64>, CoreError> {
        self.lookup(path)
            .map(|v| {
                v.as_u64()
                    .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
                    .ok_or_else(|| self.missing(path))
            })
            .transpose()
    }

    pub(crate) fn bool(&self, path: &[&str]) -> Result<bool, CoreError> {
        self.value(path)?
            .as_bool()
            .ok_or_else(|| self.missing(path))
    }

    pub(crate) fn id(&self, path: &[&str]) -> Result<ResourceId, CoreError> {
        ResourceId::from_json(self.value(path)?).ok_or_else(|| self.missing(path))
    }
}
