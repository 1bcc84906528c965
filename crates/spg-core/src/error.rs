use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("circular reference detected: {0}")]
    CircularRef(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

/// Raised by an input classifier when a parameter cannot be turned into an input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("unclassifiable parameter `{name}`: {reason}")]
    UnclassifiableParameter { name: String, reason: String },
}

impl ClassifyError {
    pub(crate) fn unresolved(name: impl Into<String>, err: ResolveError) -> Self {
        ClassifyError::UnclassifiableParameter {
            name: name.into(),
            reason: err.to_string(),
        }
    }
}
