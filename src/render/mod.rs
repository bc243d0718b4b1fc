//! Page rendering.
//!
//! Review and comparison pages are built as plain models first
//! ([`ReviewPage`], [`Comparison`]) and then rendered to HTML, Markdown or
//! JSON. Nothing here reads the clock, so output depends only on the
//! catalog and the [`SiteContext`].

pub mod compare;
pub mod html;
pub mod json;
pub mod markdown;
pub mod review;
pub mod seo;

use crate::analysis::{trust_score, Comparison};
use crate::catalog::Catalog;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::models::{BrokerRecord, ReviewPage, SimilarBroker};
use anyhow::Result;
use chrono::Datelike;

/// Site-wide values every page needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    pub name: String,
    /// Base URL without a trailing slash.
    pub url: String,
    pub logo_url: String,
    /// Year shown in titles and descriptions.
    pub year: i32,
    pub published: String,
    pub modified: String,
}

impl SiteContext {
    pub fn from_config(config: &Config) -> Self {
        let year = config
            .generator
            .review_year
            .unwrap_or_else(|| chrono::Local::now().year());

        Self {
            name: config.site.name.clone(),
            url: config.site.url.trim_end_matches('/').to_string(),
            logo_url: config.site.logo_url.clone(),
            year,
            published: config.generator.published_date.clone(),
            modified: config.modified_date().to_string(),
        }
    }

    /// Absolute URL for a site path; absolute inputs are returned as-is.
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path == "/" {
            format!("{}/", self.url)
        } else {
            format!("{}/{}", self.url, path.trim_start_matches('/'))
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            name: "BrokerAnalysis".to_string(),
            url: "https://brokeranalysis.com".to_string(),
            logo_url: "https://brokeranalysis.com/logo.png".to_string(),
            year: 2025,
            published: "2023-05-15".to_string(),
            modified: "2023-05-15".to_string(),
        }
    }
}

/// Assemble the review page model for one record.
pub fn build_review_page(
    record: &BrokerRecord,
    catalog: &Catalog,
    site: &SiteContext,
    similar_count: usize,
) -> ReviewPage {
    let metadata = seo::page_metadata(record, site);

    let mut structured_data = vec![seo::review_schema(record, site, &metadata.title)];
    if let Some(faq) = seo::faq_schema(&record.faqs) {
        structured_data.push(faq);
    }
    structured_data.push(seo::breadcrumb_schema(record, site));

    let similar = catalog
        .similar_to(record, similar_count)
        .into_iter()
        .map(SimilarBroker::from)
        .collect();

    ReviewPage {
        record: record.clone(),
        metadata,
        structured_data,
        similar,
        trust: trust_score(record, site.year),
        published: site.published.clone(),
        modified: site.modified.clone(),
        site_name: site.name.clone(),
    }
}

/// Render a review page in the requested format.
pub fn render_review(page: &ReviewPage, site: &SiteContext, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(review::render_html(page, site)),
        OutputFormat::Markdown => markdown::render_review(page),
        OutputFormat::Json => json::render(page),
    }
}

/// Render a comparison page in the requested format.
pub fn render_comparison(
    comparison: &Comparison<'_>,
    site: &SiteContext,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(compare::render_html(comparison, site)),
        OutputFormat::Markdown => Ok(markdown::render_comparison(comparison, site)),
        OutputFormat::Json => json::render(comparison),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_context_from_config() {
        let mut config = Config::default();
        config.site.url = "https://example.org/".to_string();
        config.generator.review_year = Some(2024);
        config.generator.modified_date = Some("2024-02-01".to_string());

        let site = SiteContext::from_config(&config);
        assert_eq!(site.url, "https://example.org");
        assert_eq!(site.year, 2024);
        assert_eq!(site.published, "2023-05-15");
        assert_eq!(site.modified, "2024-02-01");
    }

    #[test]
    fn test_absolute() {
        let site = SiteContext::for_tests();
        assert_eq!(site.absolute("/"), "https://brokeranalysis.com/");
        assert_eq!(
            site.absolute("/broker/xm"),
            "https://brokeranalysis.com/broker/xm"
        );
        assert_eq!(
            site.absolute("images/a.png"),
            "https://brokeranalysis.com/images/a.png"
        );
        assert_eq!(site.absolute("https://cdn.example/x.png"), "https://cdn.example/x.png");
    }

    #[test]
    fn test_build_review_page() {
        let catalog = Catalog::builtin().unwrap();
        let record = catalog.require("FXOpen").unwrap();
        let page = build_review_page(record, &catalog, &SiteContext::for_tests(), 3);

        assert_eq!(page.record.id, record.id);
        assert_eq!(page.similar.len(), 3);
        assert!(page.similar.iter().all(|s| s.slug != record.slug));
        // Review, FAQ and breadcrumbs
        assert_eq!(page.structured_data.len(), 3);
        assert_eq!(page.structured_data[0]["@type"], "Review");
        assert_eq!(page.structured_data[1]["@type"], "FAQPage");
        assert!(page.trust.score > 0);
    }

    #[test]
    fn test_review_without_faqs_skips_faq_schema() {
        let record = BrokerRecord::new("n1", "Nobody", 3.0, "https://nobody.example");
        let catalog = Catalog::from_records(vec![record.clone()]).unwrap();
        let page = build_review_page(&record, &catalog, &SiteContext::for_tests(), 3);

        assert!(page.similar.is_empty());
        assert_eq!(page.structured_data.len(), 2);
        assert_eq!(page.structured_data[1]["@type"], "BreadcrumbList");
        assert_eq!(page.metadata.title, "Nobody Review 2025");
    }
}
