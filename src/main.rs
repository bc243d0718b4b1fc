//! brokergen - static broker review and comparison site generator
//!
//! A CLI tool that turns a catalog of broker records into review pages,
//! side-by-side comparison pages and a sitemap, and validates account
//! settings files.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime or validation error (bad catalog, config, settings, etc.)
//!   2 - Requested brokers missing from the catalog (without --allow-missing)

mod analysis;
mod catalog;
mod cli;
mod config;
mod error;
mod generator;
mod models;
mod render;
mod scanner;
mod settings;
mod sitemap;

use anyhow::{Context, Result};
use catalog::Catalog;
use cli::{Args, Command, CompareArgs, GenerateArgs, ListArgs, SettingsArgs, SettingsSection};
use config::{Config, DEFAULT_CONFIG_FILE};
use error::SettingsError;
use generator::{Generator, GeneratorOptions};
use models::GenerationSummary;
use render::SiteContext;
use settings::SettingsForm;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit code when requested brokers have no catalog entry.
const EXIT_MISSING: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded first so `general.verbose` can set the log level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(config.log_level(&args));

    info!("brokergen v{}", env!("CARGO_PKG_VERSION"));
    source.log();
    debug!("Arguments: {:?}", args);

    match run(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("brokergen failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .brokergen.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to set the site URL, catalog, review dates, and more.");
    Ok(())
}

/// Initialize logging at `level`. `RUST_LOG` wins when set.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the subcommand. Returns the process exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    let Some(command) = args.command.clone() else {
        return Ok(0);
    };

    match command {
        Command::Generate(generate) => run_generate(&args, &config, &generate),
        Command::Compare(compare) => run_compare(&args, &config, &compare),
        Command::Sitemap => run_sitemap(&args, &config),
        Command::List(list) => run_list(&config, &list),
        Command::Settings(settings) => run_settings(&args, &config, &settings).await,
    }
}

fn run_generate(args: &Args, config: &Config, generate: &GenerateArgs) -> Result<i32> {
    let start_time = Instant::now();
    let catalog = load_catalog(generate.catalog.as_deref(), config)?;
    let site = SiteContext::from_config(config);

    let options = GeneratorOptions {
        out_dir: config.out_dir(),
        format: generate.format,
        similar_brokers: config.generator.similar_brokers,
        dry_run: generate.dry_run,
        quiet: args.quiet,
    };

    if !args.quiet {
        let target = if config.generator.brokers.is_empty() {
            format!("all {} brokers", catalog.len())
        } else {
            format!("{} requested broker(s)", config.generator.brokers.len())
        };
        println!("🏗️  Generating review pages for {}...", target);
        if generate.dry_run {
            println!("   Dry run: nothing will be written.");
        }
    }

    let generator = Generator::new(&catalog, site.clone(), options);
    let summary = generator.generate(&config.generator.brokers)?;

    if config.generator.sitemap && !generate.dry_run {
        let pages = scanner::SiteScanner::new(config.out_dir()).pages()?;
        let path = sitemap::write_sitemap(&config.out_dir(), &site.url, &pages, &site.modified)?;
        if !args.quiet {
            println!("🗺️  Sitemap written to {}", path.display());
        }
    }

    if !args.quiet {
        println!("\n📊 Generation Summary:");
        println!("   Requested: {}", summary.requested);
        println!(
            "   Pages: {} ({} written, {} unchanged)",
            summary.pages.len(),
            summary.written(),
            summary.unchanged()
        );
        println!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());
    }

    if !summary.missing.is_empty() {
        eprintln!(
            "\n⚠️  Missing from catalog ({}): {}",
            summary.missing.len(),
            summary.missing.join(", ")
        );
    }

    let exit_code = generation_exit_code(&summary, config.generator.allow_missing);
    if exit_code == EXIT_MISSING {
        eprintln!("⛔ Requested brokers are missing. Failing (exit code 2).");
        return Ok(exit_code);
    }
    if !summary.missing.is_empty() {
        warn!("Continuing despite missing brokers (allow_missing is set)");
    }

    if !args.quiet {
        println!(
            "\n✅ Generation complete! Site at: {}",
            config.out_dir().display()
        );
    }
    Ok(0)
}

/// Exit code of a generation run: missing brokers fail the run unless
/// `allow_missing` is set.
fn generation_exit_code(summary: &GenerationSummary, allow_missing: bool) -> i32 {
    if summary.missing.is_empty() || allow_missing {
        0
    } else {
        EXIT_MISSING
    }
}

fn run_compare(args: &Args, config: &Config, compare: &CompareArgs) -> Result<i32> {
    let catalog = load_catalog(compare.catalog.as_deref(), config)?;
    let site = SiteContext::from_config(config);

    let options = GeneratorOptions {
        out_dir: config.out_dir(),
        format: compare.format,
        similar_brokers: config.generator.similar_brokers,
        dry_run: false,
        quiet: args.quiet,
    };

    let generator = Generator::new(&catalog, site, options);
    let page = generator.compare(&compare.brokers, config.compare.max_brokers)?;
    info!("Comparison {} ({} bytes)", page.slug, page.bytes);
    Ok(0)
}

fn run_sitemap(args: &Args, config: &Config) -> Result<i32> {
    let site = SiteContext::from_config(config);
    let out_dir = config.out_dir();

    let pages = scanner::SiteScanner::new(&out_dir).pages()?;
    for page in &pages {
        debug!("{} <- {}", page.route, page.path.display());
    }
    if pages.is_empty() {
        warn!(
            "No pages found under {}; the sitemap will only list the home page",
            out_dir.display()
        );
    }

    let path = sitemap::write_sitemap(&out_dir, &site.url, &pages, &site.modified)?;
    if !args.quiet {
        println!(
            "🗺️  Sitemap with {} page(s) written to {}",
            pages.len(),
            path.display()
        );
    }
    Ok(0)
}

fn run_list(config: &Config, list: &ListArgs) -> Result<i32> {
    let catalog = load_catalog(list.catalog.as_deref(), config)?;
    if catalog.is_empty() {
        println!("📚 The catalog is empty.");
        return Ok(0);
    }

    println!("📚 {} broker(s) in catalog:\n", catalog.len());
    for record in catalog.records() {
        println!(
            "   {:<24} {:<24} ⭐ {}  {}",
            record.name,
            record.slug,
            record.rating_text(),
            record.regulation_text()
        );
    }
    Ok(0)
}

async fn run_settings(args: &Args, config: &Config, settings: &SettingsArgs) -> Result<i32> {
    let form = SettingsForm::load(&settings.file)?;
    let sections = settings.section.sections();

    if settings.validate_only {
        let result = if settings.section == SettingsSection::All {
            form.validate()
        } else {
            let errors: Vec<_> = sections
                .iter()
                .flat_map(|section| form.section_errors(*section))
                .collect();
            if errors.is_empty() {
                Ok(())
            } else {
                Err(SettingsError::Invalid(errors))
            }
        };
        if let Err(e) = result {
            report_field_errors(&e);
            return Ok(1);
        }
        if !args.quiet {
            println!("✅ {} is valid.", settings.file.display());
        }
        return Ok(0);
    }

    let delay = Duration::from_millis(config.settings.submit_delay_ms);
    if !args.quiet {
        println!(
            "💾 Saving settings for {} ({})...",
            form.profile.display_name,
            form.profile.initials()
        );
    }

    match form.submit_all(&sections, delay).await {
        Ok(toasts) => {
            if !args.quiet {
                for toast in toasts {
                    println!("✅ {}", toast);
                }
            }
            Ok(0)
        }
        Err(e) => {
            report_field_errors(&e);
            Ok(1)
        }
    }
}

fn report_field_errors(err: &SettingsError) {
    eprintln!("❌ Settings are invalid:");
    match err {
        SettingsError::Invalid(errors) => {
            for field in errors {
                eprintln!("   - {}", field);
            }
        }
        other => eprintln!("   - {}", other),
    }
}

/// Catalog from the CLI flag, the config file, or the built-in records.
fn load_catalog(cli_path: Option<&Path>, config: &Config) -> Result<Catalog> {
    let path: Option<PathBuf> = cli_path
        .map(Path::to_path_buf)
        .or_else(|| config.generator.catalog.as_ref().map(PathBuf::from));

    Catalog::load_or_builtin(path.as_deref())
}

/// Where the configuration came from, logged once the subscriber is up.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Defaults,
    /// The default file exists but could not be loaded.
    Fallback(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => info!("Loaded default config from {}", DEFAULT_CONFIG_FILE),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Fallback(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    Ok(match Config::load_default() {
        Ok(Some(config)) => (config, ConfigSource::DefaultFile),
        Ok(None) => (Config::default(), ConfigSource::Defaults),
        Err(e) => (Config::default(), ConfigSource::Fallback(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(missing: &[&str]) -> GenerationSummary {
        GenerationSummary {
            requested: 2,
            missing: missing.iter().map(|s| s.to_string()).collect(),
            ..GenerationSummary::default()
        }
    }

    #[test]
    fn test_exit_code_without_missing_brokers() {
        assert_eq!(generation_exit_code(&summary(&[]), false), 0);
        assert_eq!(generation_exit_code(&summary(&[]), true), 0);
    }

    #[test]
    fn test_exit_code_with_missing_brokers() {
        assert_eq!(generation_exit_code(&summary(&["Nope"]), false), EXIT_MISSING);
    }

    #[test]
    fn test_exit_code_allows_missing_brokers() {
        assert_eq!(generation_exit_code(&summary(&["Nope"]), true), 0);
    }
}
