//! bom-codec: version-aware CycloneDX codec
//!
//! Reads CycloneDX BOMs in XML or JSON and writes them for any schema
//! version from 1.0 to 1.6.

use anyhow::{Context, Result};
use bom_codec::{
    cli,
    config::{self, CodecConfig, ConfigPreset},
    pipeline::exit_codes,
    SchemaVersion, WireFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported CycloneDX versions:",
        "\n  XML:  1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6",
        "\n  JSON: 1.2, 1.3, 1.4, 1.5, 1.6"
    )
}

#[derive(Parser)]
#[command(name = "bom-codec")]
#[command(version, long_version = build_long_version())]
#[command(about = "Version-aware CycloneDX BOM codec", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Values were dropped and --fail-on-drop is set
    2  Format is not available for the target version
    3  Error occurred

EXAMPLES:
    # Upgrade an XML BOM to the latest schema
    bom-codec convert bom.xml --spec-version 1.6

    # Convert XML to JSON for a 1.4 consumer
    bom-codec convert bom.xml -f json --spec-version 1.4 -O bom.json

    # Show format and version of a document
    bom-codec detect bom.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `convert` subcommand
#[derive(Parser)]
struct ConvertArgs {
    /// Path to the input BOM
    input: PathBuf,

    /// Output format (defaults to the input format)
    #[arg(short, long, value_enum)]
    format: Option<WireFormat>,

    /// Target schema version (defaults to the input version)
    #[arg(long, value_parser = clap::value_parser!(SchemaVersion))]
    spec_version: Option<SchemaVersion>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Maximum element nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Reject JSON documents without a bomFormat marker
    #[arg(long)]
    require_bom_format: bool,

    /// Exit with code 1 if any value cannot be represented in the target version
    #[arg(long)]
    fail_on_drop: bool,

    /// Configuration preset (default, strict, interop, archive)
    #[arg(long, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a BOM between formats and schema versions
    Convert(ConvertArgs),

    /// Report the format and schema version of a BOM
    Detect {
        /// Path to the BOM
        input: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .bom-codec.yaml in the current directory
    Init,
}

fn parse_preset(name: &str) -> Result<ConfigPreset, String> {
    ConfigPreset::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
        format!("unknown preset '{name}' (known: {})", known.join(", "))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Convert(args) => {
            let (file_config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }

            let mut config = args
                .preset
                .map_or_else(CodecConfig::default, CodecConfig::from_preset);
            config.merge(&file_config);

            let mut overrides = CodecConfig::builder()
                .pretty(args.pretty)
                .output_file(args.output_file)
                .require_bom_format(args.require_bom_format)
                .quiet(cli.quiet);
            if let Some(format) = args.format {
                overrides = overrides.output_format(format);
            }
            if let Some(version) = args.spec_version {
                overrides = overrides.output_version(version);
            }
            if let Some(max_depth) = args.max_depth {
                overrides = overrides.max_depth(max_depth);
            }
            let mut overrides = overrides.build();
            overrides.behavior.fail_on_drop = args.fail_on_drop;
            config.merge(&overrides);

            let exit_code = match cli::run_convert(&args.input, &config) {
                Ok(code) => code,
                Err(e) => {
                    tracing::error!("{e:#}");
                    exit_codes::ERROR
                }
            };
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Detect { input } => {
            if let Err(e) = cli::run_detect(&input) {
                tracing::error!("{e:#}");
                std::process::exit(exit_codes::ERROR);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "bom-codec", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("bom-codec").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".bom-codec.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args_parse() {
        let cli = Cli::try_parse_from([
            "bom-codec",
            "convert",
            "bom.xml",
            "-f",
            "json",
            "--spec-version",
            "1.4",
            "--preset",
            "strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.format, Some(WireFormat::Json));
                assert_eq!(args.spec_version, Some(SchemaVersion::V1_4));
                assert_eq!(args.preset, Some(ConfigPreset::Strict));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_unknown_spec_version_is_rejected() {
        assert!(
            Cli::try_parse_from(["bom-codec", "convert", "bom.xml", "--spec-version", "2.0"])
                .is_err()
        );
    }
}
