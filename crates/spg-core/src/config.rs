use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ir::ConnectionDescriptor;

/// Top-level project configuration loaded from `.spg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpgConfig {
    pub input: String,
    pub output: String,
    pub on_error: ErrorPolicy,
    /// Derive connections from `components.securitySchemes` when none are listed.
    pub derive_connections: bool,
    pub connections: Vec<ConnectionDescriptor>,
    pub output_options: OutputOptions,
}

impl Default for SpgConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "src/generated".to_string(),
            on_error: ErrorPolicy::default(),
            derive_connections: true,
            connections: Vec::new(),
            output_options: OutputOptions::default(),
        }
    }
}

/// What a run does when one operation or connection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing item.
    #[default]
    Abort,
    /// Report the failing item and keep going.
    Skip,
}

/// Output structure options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Generate an `index.ts` barrel.
    pub index: bool,
    /// Module the emitted code imports the runtime helpers from.
    pub runtime_module: String,
    /// Module that exports `createClient`.
    pub client_module: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            index: true,
            runtime_module: "@prismatic-io/spectral".to_string(),
            client_module: "./client".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".spg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SpgConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SpgConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# spg configuration
input: openapi.yaml
output: src/generated
on_error: abort          # abort | skip

# Connections are derived from components.securitySchemes unless listed here.
derive_connections: true
connections: []
  # - key: apiKey
  #   label: API Key
  #   inputs:
  #     apiKey:
  #       label: API Key
  #       type: password
  #       required: true

output_options:
  index: true                          # generate index.ts barrel exports
  runtime_module: "@prismatic-io/spectral"
  client_module: ./client              # module exporting createClient
"#
}
