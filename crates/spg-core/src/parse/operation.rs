use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use crate::ir::HttpVerb;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(default)]
    pub deprecated: Option<bool>,
}

/// A path item: the parameters shared by every operation on the path, and
/// the operations keyed by HTTP verb in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ParameterOrRef>,
    pub operations: IndexMap<HttpVerb, Operation>,
    /// Keys that are neither HTTP verbs nor path-item fields: `x-` extensions,
    /// `$ref`, `servers`. They never produce operations.
    pub ignored_keys: Vec<String>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PathItemVisitor)
    }
}

struct PathItemVisitor;

impl<'de> Visitor<'de> for PathItemVisitor {
    type Value = PathItem;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an OpenAPI path item object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut item = PathItem::default();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "summary" => item.summary = map.next_value()?,
                "description" => item.description = map.next_value()?,
                "parameters" => item.parameters = map.next_value()?,
                other => match other.parse::<HttpVerb>() {
                    Ok(verb) => {
                        let operation: Operation = map.next_value()?;
                        if item.operations.insert(verb, operation).is_some() {
                            return Err(de::Error::custom(format!(
                                "duplicate operation `{other}`"
                            )));
                        }
                    }
                    Err(_) => {
                        map.next_value::<IgnoredAny>()?;
                        item.ignored_keys.push(other.to_string());
                    }
                },
            }
        }

        Ok(item)
    }
}
