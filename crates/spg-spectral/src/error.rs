use spg_core::error::ClassifyError;
use spg_core::ir::HttpVerb;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("operation {verb} {path} has no operationId")]
    MissingOperationIdentifier { path: String, verb: HttpVerb },

    #[error("connection `{connection}` has unsupported OAuth2 type `{variant}`")]
    UnsupportedOAuth2Variant { connection: String, variant: String },

    #[error("failed to classify inputs of {verb} {path}: {source}")]
    Classify {
        path: String,
        verb: HttpVerb,
        #[source]
        source: ClassifyError,
    },

    #[error("duplicate declaration name `{name}`")]
    DuplicateDeclaration { name: String },

    #[error("template render error: {0}")]
    Render(#[from] minijinja::Error),
}
