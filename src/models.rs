//! Data models for the broker site generator.
//!
//! This module contains the broker record authored in catalogs and the
//! page models produced from it during generation.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Display fallback for missing scalar fields and empty lists.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Highest rating a broker (or rating category) can receive.
pub const MAX_RATING: f64 = 5.0;

/// A question/answer pair shown in a review's FAQ section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Client fund protections disclosed by a broker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProtection {
    /// Client money held in segregated accounts.
    #[serde(default)]
    pub segregated_accounts: Option<bool>,
    /// Balances cannot go below zero.
    #[serde(default)]
    pub negative_balance_protection: Option<bool>,
    /// Covered by an investor compensation scheme.
    #[serde(default)]
    pub investor_compensation: Option<bool>,
}

/// Per-category ratings on the same 0-5 scale as the overall rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRatings {
    #[serde(default)]
    pub fees: Option<f64>,
    #[serde(default)]
    pub platforms: Option<f64>,
    #[serde(default)]
    pub markets: Option<f64>,
    #[serde(default)]
    pub research: Option<f64>,
    #[serde(default)]
    pub customer_service: Option<f64>,
    #[serde(default)]
    pub deposit: Option<f64>,
}

impl CategoryRatings {
    /// Category name and value pairs in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("Fees", self.fees),
            ("Platforms & Tools", self.platforms),
            ("Range of Markets", self.markets),
            ("Research & Education", self.research),
            ("Customer Service", self.customer_service),
            ("Deposit & Withdrawal", self.deposit),
        ]
    }
}

/// One brokerage as authored in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerRecord {
    /// Stable identifier, unique per catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug; derived from the name when left empty.
    #[serde(default)]
    pub slug: String,
    /// Logo path or URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Overall rating (0.0 - 5.0).
    pub rating: f64,
    /// Minimum deposit in USD.
    #[serde(default)]
    pub min_deposit: Option<u32>,
    /// Spread description, e.g. "From 0.0 pips".
    #[serde(default)]
    pub spread: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub regulation: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    /// The broker's own website.
    pub url: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Founding year.
    #[serde(default)]
    pub established: Option<u16>,
    /// Marketing tag, e.g. "Swiss Banking Excellence".
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub max_leverage: Option<String>,
    #[serde(default)]
    pub account_types: Vec<String>,
    /// Trading fee as a percentage.
    #[serde(default)]
    pub trading_fee: Option<f64>,
    /// Asset classes on offer, e.g. "Forex", "Stocks".
    #[serde(default)]
    pub supported_assets: Vec<String>,
    #[serde(default)]
    pub publicly_traded: Option<bool>,
    #[serde(default)]
    pub parent_company: Option<String>,
    #[serde(default)]
    pub protection: ClientProtection,
    #[serde(default)]
    pub category_ratings: CategoryRatings,
}

impl BrokerRecord {
    /// Minimal record; the remaining fields start empty.
    pub fn new(id: &str, name: &str, rating: f64, url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: crate::catalog::slugify(name),
            logo: None,
            rating,
            min_deposit: None,
            spread: None,
            platforms: Vec::new(),
            regulation: Vec::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            url: url.to_string(),
            country: None,
            established: None,
            feature: None,
            description: String::new(),
            headline: String::new(),
            faqs: Vec::new(),
            max_leverage: None,
            account_types: Vec::new(),
            trading_fee: None,
            supported_assets: Vec::new(),
            publicly_traded: None,
            parent_company: None,
            protection: ClientProtection::default(),
            category_ratings: CategoryRatings::default(),
        }
    }

    /// Check the record-level invariants (catalog-level uniqueness is
    /// checked by [`crate::catalog::Catalog`]).
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (field, value) in [("id", &self.id), ("name", &self.name), ("url", &self.url)] {
            if value.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    field,
                    name: self.name.clone(),
                });
            }
        }

        if !crate::catalog::is_valid_slug(&self.slug) {
            return Err(CatalogError::InvalidSlug {
                name: self.name.clone(),
                slug: self.slug.clone(),
            });
        }

        check_rating(&self.name, "rating", self.rating)?;
        for (category, value) in self.category_ratings.entries() {
            if let Some(value) = value {
                check_rating(&self.name, category_field(category), value)?;
            }
        }

        Ok(())
    }

    /// Regulators joined for display, e.g. "FCA, CySEC".
    pub fn regulation_text(&self) -> String {
        join_or_placeholder(&self.regulation)
    }

    /// Platforms joined for display.
    pub fn platforms_text(&self) -> String {
        join_or_placeholder(&self.platforms)
    }

    /// Account types joined for display.
    pub fn account_types_text(&self) -> String {
        join_or_placeholder(&self.account_types)
    }

    pub fn assets_text(&self) -> String {
        join_or_placeholder(&self.supported_assets)
    }

    /// Fee percentage, e.g. "0.1%".
    pub fn trading_fee_text(&self) -> String {
        match self.trading_fee {
            Some(fee) => format!("{}%", fee),
            None => NOT_SPECIFIED.to_string(),
        }
    }

    pub fn min_deposit_text(&self) -> String {
        match self.min_deposit {
            Some(amount) => format!("${}", amount),
            None => NOT_SPECIFIED.to_string(),
        }
    }

    pub fn spread_text(&self) -> &str {
        self.spread.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn leverage_text(&self) -> &str {
        self.max_leverage.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn country_text(&self) -> &str {
        self.country.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn established_text(&self) -> String {
        self.established
            .map(|year| year.to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    }

    /// Rating with one decimal, e.g. "4.4".
    pub fn rating_text(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

fn check_rating(name: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && (0.0..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::InvalidRating {
            name: name.to_string(),
            field,
            value,
        })
    }
}

fn category_field(category: &'static str) -> &'static str {
    match category {
        "Fees" => "fees rating",
        "Platforms & Tools" => "platforms rating",
        "Range of Markets" => "markets rating",
        "Research & Education" => "research rating",
        "Customer Service" => "customer service rating",
        _ => "deposit rating",
    }
}

/// Join a list with ", ", falling back to [`NOT_SPECIFIED`] when empty.
pub fn join_or_placeholder(items: &[String]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

/// A competing broker listed at the bottom of a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarBroker {
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    pub rating: f64,
    pub min_deposit: String,
    pub max_leverage: String,
    pub regulation: String,
    pub spread: String,
    pub key_feature: Option<String>,
    pub url: String,
}

impl From<&BrokerRecord> for SimilarBroker {
    fn from(record: &BrokerRecord) -> Self {
        Self {
            name: record.name.clone(),
            slug: record.slug.clone(),
            logo: record.logo.clone(),
            rating: record.rating,
            min_deposit: record.min_deposit_text(),
            max_leverage: record.leverage_text().to_string(),
            regulation: record.regulation_text(),
            spread: record.spread_text().to_string(),
            key_feature: record.feature.clone(),
            url: record.url.clone(),
        }
    }
}

/// Open Graph fields for social previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Head metadata of a generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
}

/// Display score for how trustworthy a broker appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrustScore {
    /// 0 - 100.
    pub score: u8,
    pub label: &'static str,
}

/// Everything needed to render one broker review page.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPage {
    pub record: BrokerRecord,
    pub metadata: PageMetadata,
    /// JSON-LD blocks embedded in the page head.
    pub structured_data: Vec<serde_json::Value>,
    pub similar: Vec<SimilarBroker>,
    pub trust: TrustScore,
    pub published: String,
    pub modified: String,
    pub site_name: String,
}

/// A page written (or left untouched) by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    pub name: String,
    pub slug: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// False when the file already had identical content.
    pub written: bool,
}

/// Outcome of one generator run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationSummary {
    pub requested: usize,
    pub pages: Vec<GeneratedPage>,
    /// Requested names with no catalog record.
    pub missing: Vec<String>,
}

impl GenerationSummary {
    pub fn written(&self) -> usize {
        self.pages.iter().filter(|p| p.written).count()
    }

    pub fn unchanged(&self) -> usize {
        self.pages.iter().filter(|p| !p.written).count()
    }
}
