//! Head metadata and JSON-LD structured data.

use super::SiteContext;
use crate::analysis::Comparison;
use crate::models::{BrokerRecord, Faq, OpenGraph, PageMetadata};
use serde_json::{json, Value};

/// Title, description, keywords and Open Graph fields for a review page.
pub fn page_metadata(record: &BrokerRecord, site: &SiteContext) -> PageMetadata {
    let title = match record.feature.as_deref() {
        Some(feature) if !feature.trim().is_empty() => format!(
            "{} Review {} | Expert Analysis of {}",
            record.name, site.year, feature
        ),
        _ => format!("{} Review {}", record.name, site.year),
    };

    let description = format!(
        "Comprehensive {} review. Discover trading fees, platforms, regulation, and key features. Updated for {}.",
        record.name, site.year
    );

    let canonical_url = site.absolute(&format!("/broker/{}", record.slug));

    PageMetadata {
        keywords: vec![
            format!("{} review", record.name),
            format!("{} trading fees", record.name),
            format!("{} platforms", record.name),
            format!("{} regulation", record.name),
            "forex broker review".to_string(),
        ],
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical_url.clone(),
            kind: "article".to_string(),
        },
        title,
        description,
        canonical_url,
    }
}

/// Metadata for a comparison page.
pub fn comparison_metadata(comparison: &Comparison<'_>, site: &SiteContext) -> PageMetadata {
    let title = format!("{} Comparison {}", comparison.title(), site.year);
    let names: Vec<&str> = comparison.brokers.iter().map(|b| b.name.as_str()).collect();
    let description = format!(
        "Compare {} side by side: ratings, fees, platforms, regulation and client protection. Updated for {}.",
        names.join(" and "),
        site.year
    );
    let canonical_url = site.absolute(&format!("/compare/{}", comparison.slug()));

    PageMetadata {
        keywords: vec![
            format!("{} comparison", comparison.title()),
            "broker comparison".to_string(),
        ],
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical_url.clone(),
            kind: "article".to_string(),
        },
        title,
        description,
        canonical_url,
    }
}

/// Review schema with the reviewed service, rating, author and publisher.
pub fn review_schema(record: &BrokerRecord, site: &SiteContext, headline: &str) -> Value {
    let logo = record
        .logo
        .as_deref()
        .map(|logo| site.absolute(logo))
        .unwrap_or_default();

    json!({
        "@context": "https://schema.org",
        "@type": "Review",
        "itemReviewed": {
            "@type": "FinancialService",
            "name": record.name,
            "description": record.description,
            "url": record.url,
            "logo": logo,
        },
        "reviewRating": {
            "@type": "Rating",
            "ratingValue": record.rating,
            "bestRating": "5",
            "worstRating": "1",
        },
        "author": {
            "@type": "Organization",
            "name": site.name,
        },
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": {
                "@type": "ImageObject",
                "url": site.logo_url,
            },
        },
        "headline": headline,
        "datePublished": site.published,
        "dateModified": site.modified,
    })
}

/// FAQPage schema, or `None` when there are no questions.
pub fn faq_schema(faqs: &[Faq]) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }

    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    Some(json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    }))
}

/// Home > Brokers > name.
pub fn breadcrumb_schema(record: &BrokerRecord, site: &SiteContext) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": "Home",
                "item": site.absolute("/"),
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": "Brokers",
                "item": site.absolute("/broker"),
            },
            {
                "@type": "ListItem",
                "position": 3,
                "name": record.name,
                "item": site.absolute(&format!("/broker/{}", record.slug)),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BrokerRecord {
        let mut record = BrokerRecord::new("fx-1", "FXOpen", 4.4, "https://www.fxopen.com");
        record.feature = Some("ECN Trading".to_string());
        record.logo = Some("/images/brokers/fxopen.png".to_string());
        record.faqs = vec![Faq::new("Is FXOpen regulated?", "Yes, by the FCA.")];
        record
    }

    #[test]
    fn test_page_metadata_title_and_description() {
        let site = SiteContext::for_tests();
        let meta = page_metadata(&record(), &site);

        assert_eq!(meta.title, "FXOpen Review 2025 | Expert Analysis of ECN Trading");
        assert_eq!(
            meta.description,
            "Comprehensive FXOpen review. Discover trading fees, platforms, regulation, and key features. Updated for 2025."
        );
        assert_eq!(meta.canonical_url, "https://brokeranalysis.com/broker/fxopen");
        assert_eq!(meta.open_graph.url, meta.canonical_url);
        assert_eq!(meta.open_graph.kind, "article");
    }

    #[test]
    fn test_title_without_feature() {
        let mut record = record();
        record.feature = None;
        let meta = page_metadata(&record, &SiteContext::for_tests());
        assert_eq!(meta.title, "FXOpen Review 2025");
    }

    #[test]
    fn test_review_schema_shape() {
        let site = SiteContext::for_tests();
        let schema = review_schema(&record(), &site, "FXOpen Review");

        assert_eq!(schema["@type"], "Review");
        assert_eq!(schema["itemReviewed"]["name"], "FXOpen");
        assert_eq!(
            schema["itemReviewed"]["logo"],
            "https://brokeranalysis.com/images/brokers/fxopen.png"
        );
        assert_eq!(schema["reviewRating"]["ratingValue"], 4.4);
        assert_eq!(schema["publisher"]["name"], "BrokerAnalysis");
        assert_eq!(schema["datePublished"], "2023-05-15");
    }

    #[test]
    fn test_faq_schema() {
        assert!(faq_schema(&[]).is_none());

        let schema = faq_schema(&record().faqs).unwrap();
        assert_eq!(schema["@type"], "FAQPage");
        assert_eq!(schema["mainEntity"][0]["name"], "Is FXOpen regulated?");
        assert_eq!(
            schema["mainEntity"][0]["acceptedAnswer"]["text"],
            "Yes, by the FCA."
        );
    }

    #[test]
    fn test_breadcrumbs() {
        let schema = breadcrumb_schema(&record(), &SiteContext::for_tests());
        let items = schema["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2]["item"], "https://brokeranalysis.com/broker/fxopen");
    }
}
