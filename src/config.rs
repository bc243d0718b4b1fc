//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.brokergen.toml` files.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".brokergen.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Site identity used in metadata and links.
    #[serde(default)]
    pub site: SiteConfig,

    /// Review page generation.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Comparison pages.
    #[serde(default)]
    pub compare: CompareConfig,

    /// Settings form.
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            verbose: false,
        }
    }
}

fn default_out_dir() -> String {
    "site".to_string()
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Publisher name shown in footers and structured data.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public base URL, without a trailing slash.
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Publisher logo used in structured data.
    #[serde(default = "default_logo_url")]
    pub logo_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            logo_url: default_logo_url(),
        }
    }
}

fn default_site_name() -> String {
    "BrokerAnalysis".to_string()
}

fn default_site_url() -> String {
    "https://brokeranalysis.com".to_string()
}

fn default_logo_url() -> String {
    "https://brokeranalysis.com/logo.png".to_string()
}

/// Review page generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Catalog file; the built-in catalog when unset.
    #[serde(default)]
    pub catalog: Option<String>,

    /// Brokers to generate; every catalog entry when empty.
    #[serde(default)]
    pub brokers: Vec<String>,

    /// `datePublished` of every review (YYYY-MM-DD).
    #[serde(default = "default_published_date")]
    pub published_date: String,

    /// `dateModified` of every review; the published date when unset.
    #[serde(default)]
    pub modified_date: Option<String>,

    /// Year used in titles; the current year when unset.
    ///
    /// Pin this to keep output byte-identical across a new year.
    #[serde(default)]
    pub review_year: Option<i32>,

    /// Number of similar brokers listed at the bottom of a review.
    #[serde(default = "default_similar_brokers")]
    pub similar_brokers: usize,

    /// Exit successfully when requested brokers are missing.
    #[serde(default)]
    pub allow_missing: bool,

    /// Write sitemap.xml after generation.
    #[serde(default)]
    pub sitemap: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            brokers: Vec::new(),
            published_date: default_published_date(),
            modified_date: None,
            review_year: None,
            similar_brokers: default_similar_brokers(),
            allow_missing: false,
            sitemap: false,
        }
    }
}

fn default_published_date() -> String {
    "2023-05-15".to_string()
}

fn default_similar_brokers() -> usize {
    3
}

/// Comparison page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Upper bound on brokers in one comparison.
    #[serde(default = "default_max_brokers")]
    pub max_brokers: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_brokers: default_max_brokers(),
        }
    }
}

fn default_max_brokers() -> usize {
    5
}

/// Settings form behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Simulated round trip of a settings submit, in milliseconds.
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
        }
    }
}

fn default_submit_delay() -> u64 {
    1000
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        parse_date("generator.published_date", &self.generator.published_date)?;
        if let Some(ref modified) = self.generator.modified_date {
            parse_date("generator.modified_date", modified)?;
        }

        if self.compare.max_brokers < 2 {
            bail!("compare.max_brokers must be at least 2");
        }

        if !self.site.url.starts_with("http://") && !self.site.url.starts_with("https://") {
            bail!("site.url must start with 'http://' or 'https://'");
        }

        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref out_dir) = args.out_dir {
            self.general.out_dir = out_dir.display().to_string();
        }

        if let Some(ref url) = args.site_url {
            self.site.url = url.trim_end_matches('/').to_string();
        }

        if let Some(crate::cli::Command::Generate(ref generate)) = args.command {
            if let Some(ref catalog) = generate.catalog {
                self.generator.catalog = Some(catalog.display().to_string());
            }
            if let Some(ref brokers) = generate.brokers {
                self.generator.brokers = brokers.iter().map(|b| b.trim().to_string()).collect();
            }
            if generate.allow_missing {
                self.generator.allow_missing = true;
            }
            if generate.sitemap {
                self.generator.sitemap = true;
            }
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level from the CLI flags, raised to DEBUG by `general.verbose`.
    /// `--quiet` always wins.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if !args.quiet && self.general.verbose {
            tracing::Level::DEBUG
        } else {
            args.log_level()
        }
    }

    pub fn out_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.out_dir)
    }

    /// `dateModified` value, falling back to the published date.
    pub fn modified_date(&self) -> &str {
        self.generator
            .modified_date
            .as_deref()
            .unwrap_or(&self.generator.published_date)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{} must be a YYYY-MM-DD date, got '{}'", field, value))
}
