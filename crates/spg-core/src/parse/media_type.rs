use serde::Deserialize;

use super::schema::SchemaOrRef;

/// A media type object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,

    #[serde(default)]
    pub example: Option<serde_json::Value>,
}
