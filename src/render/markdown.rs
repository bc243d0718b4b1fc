//! Markdown rendering.
//!
//! This module renders review and comparison pages as Markdown documents,
//! for static site generators that take Markdown input.

use super::compare::detail_rows;
use super::SiteContext;
use crate::analysis::{advantages, Comparison};
use crate::models::{join_or_placeholder, ReviewPage, NOT_SPECIFIED};
use crate::render::html::rating_cell;
use anyhow::{Context, Result};
use serde::Serialize;

/// Generate a complete Markdown review.
pub fn render_review(page: &ReviewPage) -> Result<String> {
    let mut output = String::new();

    // Front matter
    output.push_str(&generate_front_matter(page)?);

    // Title
    output.push_str(&format!("# {} Review\n\n", page.record.name));
    if !page.record.headline.is_empty() {
        output.push_str(&format!("> {}\n\n", page.record.headline));
    }

    // Overview
    output.push_str(&generate_overview_section(page));

    // Trading conditions
    output.push_str(&generate_conditions_section(page));

    // Pros & cons
    output.push_str(&generate_list_section("Pros", &page.record.pros));
    output.push_str(&generate_list_section("Cons", &page.record.cons));

    // Similar brokers
    output.push_str(&generate_similar_section(page));

    // FAQ
    output.push_str(&generate_faq_section(page));

    // Footer
    output.push_str(&generate_footer(&page.site_name, &page.modified));

    Ok(output)
}

/// Head metadata emitted as YAML front matter.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq))]
struct FrontMatter {
    title: String,
    description: String,
    canonical: String,
    broker_id: String,
    slug: String,
    date: String,
    lastmod: String,
    keywords: Vec<String>,
}

impl FrontMatter {
    fn from_page(page: &ReviewPage) -> Self {
        let meta = &page.metadata;
        Self {
            title: meta.title.clone(),
            description: meta.description.clone(),
            canonical: meta.canonical_url.clone(),
            broker_id: page.record.id.clone(),
            slug: page.record.slug.clone(),
            date: page.published.clone(),
            lastmod: page.modified.clone(),
            keywords: meta.keywords.clone(),
        }
    }
}

fn generate_front_matter(page: &ReviewPage) -> Result<String> {
    let yaml = serde_yaml::to_string(&FrontMatter::from_page(page))
        .context("Failed to serialize front matter")?;
    Ok(format!("---\n{}---\n\n", yaml))
}

fn generate_overview_section(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str(&format!(
        "- **Rating:** {}/5\n- **Trust Score:** {}/100 ({})\n",
        record.rating_text(),
        page.trust.score,
        page.trust.label
    ));
    if let Some(feature) = record.feature.as_deref() {
        section.push_str(&format!("- **Key Feature:** {}\n", feature));
    }
    section.push_str(&format!("- **Website:** <{}>\n\n", record.url));

    if record.description.trim().is_empty() {
        section.push_str(NOT_SPECIFIED);
    } else {
        section.push_str(record.description.trim());
    }
    section.push_str("\n\n");

    section
}

fn generate_conditions_section(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut section = String::new();

    section.push_str("## Trading Conditions\n\n");
    section.push_str("| | |\n|---|---|\n");
    for (label, value) in [
        ("Minimum Deposit", record.min_deposit_text()),
        ("Spreads", record.spread_text().to_string()),
        ("Maximum Leverage", record.leverage_text().to_string()),
        ("Regulation", record.regulation_text()),
        ("Trading Platforms", record.platforms_text()),
        ("Account Types", record.account_types_text()),
        ("Headquarters", record.country_text().to_string()),
        ("Founded", record.established_text()),
    ] {
        section.push_str(&format!("| {} | {} |\n", label, table_cell(&value)));
    }
    section.push('\n');

    section
}

fn generate_list_section(title: &str, items: &[String]) -> String {
    let mut section = format!("## {}\n\n", title);

    if items.is_empty() {
        section.push_str(NOT_SPECIFIED);
        section.push('\n');
    }
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');

    section
}

fn generate_similar_section(page: &ReviewPage) -> String {
    let mut section = String::new();

    section.push_str("## Similar Brokers\n\n");
    if page.similar.is_empty() {
        section.push_str("No similar brokers available for comparison.\n\n");
        return section;
    }

    section.push_str("| Broker | Rating | Min. Deposit | Max. Leverage | Regulation |\n");
    section.push_str("|---|:---:|---|---|---|\n");
    for similar in &page.similar {
        section.push_str(&format!(
            "| [{}](/broker/{}/) | {:.1} | {} | {} | {} |\n",
            similar.name,
            similar.slug,
            similar.rating,
            table_cell(&similar.min_deposit),
            table_cell(&similar.max_leverage),
            table_cell(&similar.regulation)
        ));
    }
    section.push('\n');

    section
}

fn generate_faq_section(page: &ReviewPage) -> String {
    let mut section = String::new();

    section.push_str("## Frequently Asked Questions\n\n");
    if page.record.faqs.is_empty() {
        section.push_str(NOT_SPECIFIED);
        section.push_str("\n\n");
    }
    for faq in &page.record.faqs {
        section.push_str(&format!("### {}\n\n{}\n\n", faq.question, faq.answer));
    }

    section
}

fn generate_footer(site_name: &str, modified: &str) -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!("*{} - last updated {}*\n", site_name, modified));

    footer
}

/// Generate a Markdown comparison.
pub fn render_comparison(comparison: &Comparison<'_>, site: &SiteContext) -> String {
    let mut output = String::new();
    let names: Vec<String> = comparison.brokers.iter().map(|b| b.name.clone()).collect();

    output.push_str(&format!("# {}\n\n", comparison.title()));
    output.push_str(&format!("*Last updated {}*\n\n", site.modified));

    // Badges
    for (broker, badge) in comparison.brokers.iter().zip(&comparison.badges) {
        output.push_str(&format!(
            "- **{}** ({}/5): {}\n",
            broker.name,
            broker.rating_text(),
            badge
        ));
    }
    output.push('\n');

    // Key differences
    output.push_str("## Key Differences\n\n");
    for broker in &comparison.brokers {
        output.push_str(&format!("### {} Advantages\n\n", broker.name));
        for advantage in advantages(broker) {
            output.push_str(&format!("- {}\n", advantage));
        }
        output.push('\n');
    }

    // Ratings
    output.push_str("## Ratings Comparison\n\n");
    output.push_str(&table_header("Category", &names));
    for row in &comparison.ratings {
        let cells: Vec<String> = row
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if row.leader == Some(i) {
                    format!("**{}**", rating_cell(*value))
                } else {
                    rating_cell(*value)
                }
            })
            .collect();
        output.push_str(&format!("| {} | {} |\n", row.category, cells.join(" | ")));
    }
    output.push('\n');

    // Details
    output.push_str("## Broker Details\n\n");
    output.push_str(&table_header("Feature", &names));
    let columns: Vec<_> = comparison.brokers.iter().map(|b| detail_rows(b)).collect();
    for (row, (label, _)) in detail_rows(comparison.brokers[0]).iter().enumerate() {
        let cells: Vec<String> = columns.iter().map(|c| table_cell(&c[row].1)).collect();
        output.push_str(&format!("| {} | {} |\n", label, cells.join(" | ")));
    }
    output.push('\n');

    // Features
    output.push_str("## Safety & Features\n\n");
    output.push_str(&table_header("Feature", &names));
    for row in &comparison.features {
        let cells: Vec<&str> = row
            .values
            .iter()
            .map(|value| match value {
                Some(true) => "✓",
                Some(false) => "✗",
                None => "-",
            })
            .collect();
        output.push_str(&format!("| {} | {} |\n", row.feature, cells.join(" | ")));
    }
    output.push('\n');

    // Pros & cons
    for broker in &comparison.brokers {
        output.push_str(&format!(
            "## {}\n\n**Pros:** {}\n\n**Cons:** {}\n\n",
            broker.name,
            join_or_placeholder(&broker.pros),
            join_or_placeholder(&broker.cons)
        ));
    }

    output.push_str(&generate_footer(&site.name, &site.modified));
    output
}

fn table_header(first: &str, names: &[String]) -> String {
    format!(
        "| {} | {} |\n|---|{}\n",
        first,
        names.join(" | "),
        ":---:|".repeat(names.len())
    )
}

/// Escape pipes so a value stays in its table cell.
fn table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::BrokerRecord;
    use crate::render::build_review_page;

    #[test]
    fn test_render_review() {
        let catalog = Catalog::builtin().unwrap();
        let record = catalog.require("FXOpen").unwrap();
        let page = build_review_page(record, &catalog, &SiteContext::for_tests(), 3);
        let markdown = render_review(&page).unwrap();

        let front = parse_front_matter(&markdown);
        assert_eq!(front.title, page.metadata.title);
        assert_eq!(front.broker_id, record.id);
        assert_eq!(front.date, "2023-05-15");
        assert!(markdown.contains("# FXOpen Review"));
        assert!(markdown.contains("| Regulation | FCA, CySEC, ASIC |"));
        assert!(markdown.contains("## Similar Brokers"));
        for faq in &record.faqs {
            assert!(markdown.contains(&format!("### {}\n\n{}", faq.question, faq.answer)));
        }
    }

    #[test]
    fn test_render_review_placeholders() {
        let record = BrokerRecord::new("e1", "Empty", 3.0, "https://empty.example");
        let catalog = Catalog::from_records(vec![record.clone()]).unwrap();
        let page = build_review_page(&record, &catalog, &SiteContext::for_tests(), 3);
        let markdown = render_review(&page).unwrap();

        assert!(markdown.contains("| Regulation | Not specified |"));
        assert!(markdown.contains("## Pros\n\nNot specified\n"));
        assert!(markdown.contains("No similar brokers available for comparison."));
    }

    #[test]
    fn test_render_comparison() {
        let a = BrokerRecord::new("1", "IC Markets", 4.9, "https://icmarkets.com");
        let b = BrokerRecord::new("2", "eToro", 4.5, "https://etoro.com");
        let comparison = Comparison::new(vec![&a, &b], 5).unwrap();
        let markdown = render_comparison(&comparison, &SiteContext::for_tests());

        assert!(markdown.starts_with("# IC Markets vs eToro\n"));
        assert!(markdown.contains("- **IC Markets** (4.9/5): 🏆 Overall Winner"));
        assert!(markdown.contains("- **eToro** (4.5/5): ⚖️ Comparable"));
        assert!(markdown.contains("| Overall Rating | **4.9** | 4.5 |"));
        assert!(markdown.contains("| Fees | - | - |"));
        assert!(markdown.contains("| Segregated client funds | - | - |"));
    }

    #[test]
    fn test_front_matter_keeps_control_characters() {
        let mut record = BrokerRecord::new("7", "Quote \"Co\"", 4.0, "https://quote.example");
        record.feature = Some("Low\nSpreads\t(Raw): #1".to_string());
        let catalog = Catalog::from_records(vec![record.clone()]).unwrap();
        let page = build_review_page(&record, &catalog, &SiteContext::for_tests(), 3);

        let front = parse_front_matter(&render_review(&page).unwrap());
        assert_eq!(front, FrontMatter::from_page(&page));
        assert!(front.title.contains("Low\nSpreads\t(Raw): #1"));
        assert_eq!(front.broker_id, "7");
    }

    fn parse_front_matter(markdown: &str) -> FrontMatter {
        let body = markdown.strip_prefix("---\n").unwrap();
        let end = body.find("\n---\n").unwrap();
        serde_yaml::from_str(&body[..end]).unwrap()
    }
}
