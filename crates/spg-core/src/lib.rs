pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// An item a generation run skipped under the `skip` error policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Locates the item, e.g. `GET /pets` or `connection apiKey`.
    pub context: String,
    pub reason: String,
}

/// Everything a generator produced in one run.
#[derive(Debug, Clone, Default)]
pub struct GeneratedOutput {
    pub files: Vec<GeneratedFile>,
    pub skipped: Vec<SkippedItem>,
}

/// Trait for code generators that produce files from a parsed OpenAPI document.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        spec: &parse::spec::OpenApiSpec,
        config: &Self::Config,
    ) -> Result<GeneratedOutput, Self::Error>;
}
