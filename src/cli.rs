//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// brokergen - static broker review and comparison site generator
///
/// Stamps out one review page per broker record, renders side-by-side
/// comparison pages and a sitemap, and validates account settings files.
///
/// Examples:
///   brokergen generate
///   brokergen generate --brokers "FXOpen,Dukascopy" --format markdown
///   brokergen generate --catalog brokers.toml --sitemap
///   brokergen compare xm ic-markets
///   brokergen settings settings.toml --section profile
///   brokergen --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory the site is written to
    ///
    /// Defaults to the value in .brokergen.toml, or "site".
    #[arg(short, long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .brokergen.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Public base URL used for canonical links and the sitemap
    #[arg(long, global = true, value_name = "URL", env = "BROKERGEN_SITE_URL")]
    pub site_url: Option<String>,

    /// Generate a default .brokergen.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate one review page per broker
    Generate(GenerateArgs),

    /// Render a side-by-side comparison page
    Compare(CompareArgs),

    /// Rebuild sitemap.xml from the pages already in the output directory
    Sitemap,

    /// List the brokers in the catalog
    List(ListArgs),

    /// Validate and submit an account settings file
    Settings(SettingsArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Broker catalog (TOML or JSON); the built-in catalog when omitted
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Broker names or slugs to generate (comma-separated); all when omitted
    ///
    /// Example: --brokers "FXOpen,Dukascopy,BlackBull Markets"
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub brokers: Option<Vec<String>>,

    /// Output format
    #[arg(long, default_value = "html", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Resolve the selection and print target paths without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Exit successfully even if requested brokers are missing
    #[arg(long)]
    pub allow_missing: bool,

    /// Write sitemap.xml after generation
    #[arg(long)]
    pub sitemap: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CompareArgs {
    /// Broker names or slugs to compare
    #[arg(required = true, num_args = 2.., value_name = "BROKER")]
    pub brokers: Vec<String>,

    /// Broker catalog (TOML or JSON); the built-in catalog when omitted
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "html", value_name = "FORMAT")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Broker catalog (TOML or JSON); the built-in catalog when omitted
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Settings file (TOML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Section to submit
    #[arg(long, default_value = "all", value_name = "SECTION")]
    pub section: SettingsSection,

    /// Only validate; do not submit
    #[arg(long)]
    pub validate_only: bool,
}

/// Output format for generated pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// HTML page (default)
    #[default]
    Html,
    /// Markdown document
    Markdown,
    /// JSON page model
    Json,
}

impl OutputFormat {
    /// File extension of the `index.<ext>` page file.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Settings section selector for the settings subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SettingsSection {
    Profile,
    Notifications,
    Privacy,
    #[default]
    All,
}

impl SettingsSection {
    /// The concrete form sections this selector covers.
    pub fn sections(&self) -> Vec<crate::settings::Section> {
        use crate::settings::Section;
        match self {
            SettingsSection::Profile => vec![Section::Profile],
            SettingsSection::Notifications => vec![Section::Notifications],
            SettingsSection::Privacy => vec![Section::Privacy],
            SettingsSection::All => vec![Section::Profile, Section::Notifications, Section::Privacy],
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let Some(command) = &self.command else {
            return Err(
                "A subcommand is required (generate, compare, sitemap, list, settings)".to_string(),
            );
        };

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref url) = self.site_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Site URL must start with 'http://' or 'https://'".to_string());
            }
        }

        match command {
            Command::Generate(generate) => {
                check_catalog(generate.catalog.as_ref())?;
                if let Some(ref brokers) = generate.brokers {
                    if brokers.iter().any(|name| name.trim().is_empty()) {
                        return Err("Broker names in --brokers must not be empty".to_string());
                    }
                }
            }
            Command::Compare(compare) => {
                check_catalog(compare.catalog.as_ref())?;
                if compare.brokers.len() < 2 {
                    return Err("Compare needs at least two brokers".to_string());
                }
            }
            Command::List(list) => check_catalog(list.catalog.as_ref())?,
            Command::Settings(settings) => {
                if !settings.file.exists() {
                    return Err(format!(
                        "Settings file does not exist: {}",
                        settings.file.display()
                    ));
                }
            }
            Command::Sitemap => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

fn check_catalog(catalog: Option<&PathBuf>) -> Result<(), String> {
    match catalog {
        Some(path) if !path.is_file() => Err(format!(
            "Catalog file does not exist: {}",
            path.display()
        )),
        _ => Ok(()),
    }
}
