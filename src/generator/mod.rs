//! Page generator.
//!
//! Stamps one review page per selected broker into
//! `<out_dir>/broker/<slug>/index.<ext>` and comparison pages into
//! `<out_dir>/compare/<a>-vs-<b>/index.<ext>`. Files whose content is
//! already identical are left untouched.

use crate::analysis::Comparison;
use crate::catalog::Catalog;
use crate::cli::OutputFormat;
use crate::models::{GeneratedPage, GenerationSummary};
use crate::render::{self, SiteContext};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Generator settings resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    /// Similar brokers listed per review.
    pub similar_brokers: usize,
    /// Resolve and render, but write nothing.
    pub dry_run: bool,
    /// Suppress progress bar and per-page lines.
    pub quiet: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("site"),
            format: OutputFormat::Html,
            similar_brokers: 3,
            dry_run: false,
            quiet: false,
        }
    }
}

pub struct Generator<'a> {
    catalog: &'a Catalog,
    site: SiteContext,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    pub fn new(catalog: &'a Catalog, site: SiteContext, options: GeneratorOptions) -> Self {
        Self {
            catalog,
            site,
            options,
        }
    }

    /// Target file of a broker's review page.
    pub fn review_path(&self, slug: &str) -> PathBuf {
        self.options
            .out_dir
            .join("broker")
            .join(slug)
            .join(format!("index.{}", self.options.format.extension()))
    }

    /// Target file of a comparison page.
    pub fn comparison_path(&self, slug: &str) -> PathBuf {
        self.options
            .out_dir
            .join("compare")
            .join(slug)
            .join(format!("index.{}", self.options.format.extension()))
    }

    /// Generate review pages for `names` in request order; every broker
    /// when `names` is empty. Names without a catalog entry are reported
    /// in the summary, not treated as errors.
    pub fn generate(&self, names: &[String]) -> Result<GenerationSummary> {
        let selection = self.catalog.select(names);
        let mut summary = GenerationSummary {
            requested: if names.is_empty() {
                self.catalog.len()
            } else {
                names.len()
            },
            ..GenerationSummary::default()
        };

        for name in &selection.missing {
            warn!("No catalog entry for '{}', skipping", name);
        }
        summary.missing = selection.missing.clone();

        info!(
            "Generating {} review page(s) into {}",
            selection.found.len(),
            self.options.out_dir.display()
        );

        let pb = self.progress_bar(selection.found.len() as u64);

        for record in &selection.found {
            pb.set_message(record.name.clone());

            let page = render::build_review_page(
                record,
                self.catalog,
                &self.site,
                self.options.similar_brokers,
            );
            let content = render::render_review(&page, &self.site, self.options.format)
                .with_context(|| format!("Failed to render page for {}", record.name))?;
            let path = self.review_path(&record.slug);

            let written = self.emit(&path, &content)?;
            self.report(&pb, &record.name, &path, written);

            summary.pages.push(GeneratedPage {
                name: record.name.clone(),
                slug: record.slug.clone(),
                path,
                bytes: content.len(),
                written,
            });
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(summary)
    }

    /// Render and write one comparison page for the given broker keys.
    pub fn compare(&self, keys: &[String], max_brokers: usize) -> Result<GeneratedPage> {
        let brokers = keys
            .iter()
            .map(|key| self.catalog.require(key))
            .collect::<Result<Vec<_>, _>>()?;

        let comparison = Comparison::new(brokers, max_brokers)?;
        if let Some(winner) = comparison.winner() {
            debug!("{} wins {}", winner.name, comparison.title());
        }

        let content = render::render_comparison(&comparison, &self.site, self.options.format)
            .with_context(|| format!("Failed to render comparison {}", comparison.title()))?;
        let slug = comparison.slug();
        let path = self.comparison_path(&slug);
        let written = self.emit(&path, &content)?;

        let pb = ProgressBar::hidden();
        self.report(&pb, &comparison.title(), &path, written);

        Ok(GeneratedPage {
            name: comparison.title(),
            slug,
            path,
            bytes: content.len(),
            written,
        })
    }

    fn emit(&self, path: &Path, content: &str) -> Result<bool> {
        if self.options.dry_run {
            return Ok(false);
        }
        write_if_changed(path, content)
    }

    fn report(&self, pb: &ProgressBar, name: &str, path: &Path, written: bool) {
        if self.options.quiet {
            return;
        }

        let line = if self.options.dry_run {
            format!("📝 Would create {} page at {}", name, path.display())
        } else if written {
            format!("✅ Created {} page at {}", name, path.display())
        } else {
            format!("⏭️  {} page unchanged at {}", name, path.display())
        };
        pb.suspend(|| println!("{}", line));
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.options.quiet || len == 0 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

/// Write `content` to `path`, creating parent directories. Returns false
/// without touching the file when it already holds exactly `content`.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if let Ok(existing) = std::fs::read(path) {
        if existing == content.as_bytes() {
            debug!("{} is up to date", path.display());
            return Ok(false);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write page: {}", path.display()))?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(true)
}
