use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use spg_core::config::{self, CONFIG_FILE_NAME, ErrorPolicy, SpgConfig};
use spg_core::parse::{self, spec::OpenApiSpec};
use spg_core::{CodeGenerator, GeneratedFile, SkippedItem};
use spg_spectral::{Descriptors, SpectralConfig, SpectralGenerator};

#[derive(Parser)]
#[command(
    name = "spg",
    about = "Generate Spectral actions and connections from OpenAPI 3.x",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate actions and connections from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an OpenAPI spec and dry-run generation
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the action and connection descriptors of an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new spg configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "spg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SpgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// The project config with failures collected instead of aborting.
fn dry_run_config(cfg: &SpgConfig) -> SpectralConfig {
    SpectralConfig {
        on_error: ErrorPolicy::Skip,
        ..SpectralConfig::from(cfg)
    }
}

fn load_spec(path: &Path) -> Result<OpenApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    debug!("parsing {} as {ext}", path.display());

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(parsed)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn report_skipped(skipped: &[SkippedItem]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("Skipped {} item(s):", skipped.len());
    for item in skipped {
        eprintln!("  {}: {}", item.context, item.reason);
    }
}

/// Generate the "do not edit" README.
fn readme_content() -> &'static str {
    r#"# Generated Code (Do Not Edit)

This directory is **auto-generated** by `spg`.
Any manual changes will be overwritten the next time `spg generate` is run.

To regenerate, run:
```
spg generate
```

To customize the generated output, edit your `.spg.yaml` configuration file.
"#
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let spec = load_spec(&input)?;

    eprintln!("Generating {} → {}", input.display(), output_dir.display());
    let generated = SpectralGenerator
        .generate(&spec, &SpectralConfig::from(&cfg))
        .context("generation failed")?;

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    write_files(&output_dir, &generated.files)?;

    let readme_path = output_dir.join("README.md");
    fs::write(&readme_path, readme_content())
        .with_context(|| format!("failed to write {}", readme_path.display()))?;
    eprintln!("  wrote {}", readme_path.display());

    report_skipped(&generated.skipped);

    eprintln!(
        "Generated {} files in {}",
        generated.files.len() + 1, // +1 for README
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let spec = load_spec(&input)?;

    eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());

    let operations: usize = spec.paths.values().map(|item| item.operations.len()).sum();
    eprintln!("  Operations: {operations}");

    if let Some(ref components) = spec.components {
        eprintln!("  Security schemes: {}", components.security_schemes.len());
    }

    let cfg = try_load_config()?.unwrap_or_default();
    let descriptors = SpectralGenerator.descriptors(&spec, &dry_run_config(&cfg))?;
    eprintln!("  Actions: {}", descriptors.actions.len());
    eprintln!("  Connections: {}", descriptors.connections.len());

    if descriptors.skipped.is_empty() {
        eprintln!("Validation successful.");
        Ok(())
    } else {
        report_skipped(&descriptors.skipped);
        anyhow::bail!("{} item(s) cannot be generated", descriptors.skipped.len())
    }
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;
    let cfg = try_load_config()?.unwrap_or_default();
    let descriptors = SpectralGenerator.descriptors(&spec, &dry_run_config(&cfg))?;

    let summary = build_inspect_summary(&spec, &descriptors)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &OpenApiSpec, descriptors: &Descriptors) -> Result<serde_json::Value> {
    let skipped: Vec<serde_json::Value> = descriptors
        .skipped
        .iter()
        .map(|item| {
            serde_json::json!({
                "context": item.context,
                "reason": item.reason,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "actions": serde_json::to_value(&descriptors.actions)?,
        "connections": serde_json::to_value(&descriptors.connections)?,
        "skipped": skipped,
    }))
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
