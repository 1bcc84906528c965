use std::collections::HashSet;

use log::{info, warn};

use spg_core::config::{ErrorPolicy, SpgConfig};
use spg_core::ir::ConnectionDescriptor;
use spg_core::parse::spec::OpenApiSpec;
use spg_core::transform::{SchemaClassifier, security_schemes_to_connections};
use spg_core::{CodeGenerator, GeneratedFile, GeneratedOutput, SkippedItem};

use crate::actions::{ActionDescriptor, operations_to_actions};
use crate::connections::build_connection_declaration;
use crate::emitters::{self, EmitOptions};
use crate::error::GenerateError;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct SpectralConfig {
    pub on_error: ErrorPolicy,
    /// Explicit connections; take precedence over derived ones.
    pub connections: Vec<ConnectionDescriptor>,
    pub derive_connections: bool,
    pub runtime_module: String,
    pub client_module: String,
    /// Emit `index.ts`.
    pub index: bool,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self::from(&SpgConfig::default())
    }
}

impl From<&SpgConfig> for SpectralConfig {
    fn from(config: &SpgConfig) -> Self {
        Self {
            on_error: config.on_error,
            connections: config.connections.clone(),
            derive_connections: config.derive_connections,
            runtime_module: config.output_options.runtime_module.clone(),
            client_module: config.output_options.client_module.clone(),
            index: config.output_options.index,
        }
    }
}

/// Everything synthesized from a document before any file is emitted.
#[derive(Debug, Clone, Default)]
pub struct Descriptors {
    pub actions: Vec<ActionDescriptor>,
    pub connections: Vec<ConnectionDescriptor>,
    pub skipped: Vec<SkippedItem>,
}

/// Generator for Spectral integration components.
pub struct SpectralGenerator;

impl SpectralGenerator {
    /// Synthesize the action and connection descriptors of a document.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failing item ends the run; under
    /// [`ErrorPolicy::Skip`] it is logged, recorded and left out.
    pub fn descriptors(
        &self,
        spec: &OpenApiSpec,
        config: &SpectralConfig,
    ) -> Result<Descriptors, GenerateError> {
        let mut out = Descriptors::default();
        let classifier = SchemaClassifier::new(spec);

        let mut action_names: HashSet<String> = emitters::actions::imported_names()
            .map(String::from)
            .collect();
        for (path, item) in &spec.paths {
            for (verb, result) in operations_to_actions(path, item, &classifier) {
                let checked = result.and_then(|action| {
                    let name = action.declaration_name();
                    if action_names.insert(name.clone()) {
                        Ok(action)
                    } else {
                        Err(GenerateError::DuplicateDeclaration { name })
                    }
                });
                match checked {
                    Ok(action) => out.actions.push(action),
                    Err(err) => {
                        handle_failure(config.on_error, format!("{verb} {path}"), err, &mut out)?
                    }
                }
            }
        }

        let connections = if !config.connections.is_empty() || !config.derive_connections {
            config.connections.clone()
        } else {
            security_schemes_to_connections(spec)
        };

        let mut connection_names: HashSet<String> = emitters::connections::imported_names()
            .map(String::from)
            .collect();
        for connection in connections {
            let checked = build_connection_declaration(&connection).and_then(|decl| {
                if connection_names.insert(decl.name.clone()) {
                    Ok(())
                } else {
                    Err(GenerateError::DuplicateDeclaration { name: decl.name })
                }
            });
            match checked {
                Ok(()) => out.connections.push(connection),
                Err(err) => handle_failure(
                    config.on_error,
                    format!("connection {}", connection.key),
                    err,
                    &mut out,
                )?,
            }
        }

        info!(
            "synthesized {} actions and {} connections ({} skipped)",
            out.actions.len(),
            out.connections.len(),
            out.skipped.len()
        );
        Ok(out)
    }
}

fn handle_failure(
    policy: ErrorPolicy,
    context: String,
    err: GenerateError,
    out: &mut Descriptors,
) -> Result<(), GenerateError> {
    match policy {
        ErrorPolicy::Abort => Err(err),
        ErrorPolicy::Skip => {
            warn!("skipping {context}: {err}");
            out.skipped.push(SkippedItem {
                context,
                reason: err.to_string(),
            });
            Ok(())
        }
    }
}

impl CodeGenerator for SpectralGenerator {
    type Config = SpectralConfig;
    type Error = GenerateError;

    fn generate(
        &self,
        spec: &OpenApiSpec,
        config: &SpectralConfig,
    ) -> Result<GeneratedOutput, GenerateError> {
        let descriptors = self.descriptors(spec, config)?;
        let options = EmitOptions {
            title: spec.info.title.clone(),
            runtime_module: config.runtime_module.clone(),
            client_module: config.client_module.clone(),
        };

        let mut files = vec![
            GeneratedFile {
                path: "actions.ts".to_string(),
                content: emitters::actions::emit_actions(&descriptors.actions, &options)?,
            },
            GeneratedFile {
                path: "connections.ts".to_string(),
                content: emitters::connections::emit_connections(
                    &descriptors.connections,
                    &options,
                )?,
            },
        ];
        if config.index {
            files.push(GeneratedFile {
                path: "index.ts".to_string(),
                content: emitters::index::emit_index(&options)?,
            });
        }

        Ok(GeneratedOutput {
            files,
            skipped: descriptors.skipped,
        })
    }
}
