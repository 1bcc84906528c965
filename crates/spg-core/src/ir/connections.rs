use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::InputType;

/// OAuth2 grant a connection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuth2Type {
    AuthorizationCode,
    ClientCredentials,
}

impl OAuth2Type {
    /// Wire value, as written in descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuth2Type::AuthorizationCode => "authorization_code",
            OAuth2Type::ClientCredentials => "client_credentials",
        }
    }

    /// Member name of the runtime's `OAuth2Type` enum.
    pub fn variant_name(&self) -> &'static str {
        match self {
            OAuth2Type::AuthorizationCode => "AuthorizationCode",
            OAuth2Type::ClientCredentials => "ClientCredentials",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown OAuth2 type: {0}")]
pub struct UnknownOAuth2Type(pub String);

impl FromStr for OAuth2Type {
    type Err = UnknownOAuth2Type;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorization_code" => Ok(OAuth2Type::AuthorizationCode),
            "client_credentials" => Ok(OAuth2Type::ClientCredentials),
            other => Err(UnknownOAuth2Type(other.to_string())),
        }
    }
}

/// One field a caller fills in when configuring a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInput {
    pub label: String,

    #[serde(rename = "type")]
    pub input_type: InputType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shown: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl ConnectionInput {
    pub fn new(label: impl Into<String>, input_type: InputType) -> Self {
        Self {
            label: label.into(),
            input_type,
            required: None,
            shown: None,
            placeholder: None,
            default: None,
            example: None,
            comments: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn shown(mut self, shown: bool) -> Self {
        self.shown = Some(shown);
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comments(mut self, comments: Option<String>) -> Self {
        self.comments = comments;
        self
    }
}

/// How a caller authenticates to the API.
///
/// `oauth2_type` is kept as written so that an unrecognized grant surfaces
/// when the declaration is built rather than when the descriptor is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
    pub key: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth2_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default)]
    pub inputs: IndexMap<String, ConnectionInput>,
}

impl ConnectionDescriptor {
    /// The OAuth2 grant, `None` for a plain connection.
    pub fn oauth2_variant(&self) -> Result<Option<OAuth2Type>, UnknownOAuth2Type> {
        self.oauth2_type.as_deref().map(OAuth2Type::from_str).transpose()
    }
}
