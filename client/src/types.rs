use serde::Deserialize;
use serde_json::Value;

use crate::ClientError;

/// One project as the listing service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Extract the `projects` array from a listing response body.
///
/// A body that is not an object, or has no (or a null) `projects` field,
/// yields an empty list. A `projects` field of any other non-array shape is
/// a decode error.
pub fn parse_listing(body: &[u8]) -> Result<Vec<ProjectRecord>, ClientError> {
    let value: Value = serde_json::from_slice(body)?;
    let projects = match value {
        Value::Object(mut map) => map.remove("projects").unwrap_or(Value::Null),
        _ => Value::Null,
    };
    if projects.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(projects)?)
}
