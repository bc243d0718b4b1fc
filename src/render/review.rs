//! HTML review page.

use super::html::{
    escape_attr, escape_text, json_ld, list_or_placeholder, outbound_link, stars, table_row,
    yes_no_icon,
};
use super::SiteContext;
use crate::analysis::trust_color;
use crate::models::{ReviewPage, SimilarBroker, NOT_SPECIFIED};

/// In-page sections, in navigation order.
const SECTIONS: &[(&str, &str)] = &[
    ("overview", "Overview"),
    ("trading-conditions", "Trading Conditions"),
    ("platforms", "Platforms"),
    ("pros-cons", "Pros & Cons"),
    ("accounts", "Account Types"),
    ("safety", "Safety"),
    ("similar", "Similar Brokers"),
    ("faq", "FAQ"),
];

/// Render the complete review document.
pub fn render_html(page: &ReviewPage, site: &SiteContext) -> String {
    let record = &page.record;
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
    out.push_str(&render_head(page));
    out.push_str("<body>\n");
    out.push_str(&format!(
        "<article class=\"broker-review\" data-broker-id=\"{}\" data-broker-slug=\"{}\">\n",
        escape_attr(&record.id),
        escape_attr(&record.slug)
    ));

    out.push_str(&render_hero(page));
    out.push_str(&render_nav());
    out.push_str(&render_overview(page));
    out.push_str(&render_conditions(page));

    out.push_str("<section id=\"platforms\" class=\"tab-panel\" role=\"tabpanel\">\n<h2>Trading Platforms</h2>\n");
    out.push_str(&list_or_placeholder(&record.platforms, "platforms"));
    out.push_str("</section>\n");

    out.push_str(&render_pros_cons(page));

    out.push_str("<section id=\"accounts\">\n<h2>Account Types</h2>\n");
    out.push_str(&list_or_placeholder(&record.account_types, "account-types"));
    out.push_str("</section>\n");

    out.push_str(&render_safety(page));
    out.push_str(&render_similar(page));
    out.push_str(&render_faqs(page));

    out.push_str("</article>\n");
    out.push_str(&format!(
        "<footer>\n<p>&copy; {} {}. Published {}. Last updated {}.</p>\n</footer>\n",
        site.year,
        escape_text(&page.site_name),
        escape_text(&page.published),
        escape_text(&page.modified)
    ));
    out.push_str("</body>\n</html>\n");
    out
}

fn render_head(page: &ReviewPage) -> String {
    let meta = &page.metadata;
    let mut head = String::from("<head>\n");

    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    head.push_str(&format!("<title>{}</title>\n", escape_text(&meta.title)));
    head.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape_attr(&meta.description)
    ));
    head.push_str(&format!(
        "<meta name=\"keywords\" content=\"{}\">\n",
        escape_attr(&meta.keywords.join(", "))
    ));
    head.push_str(&format!(
        "<link rel=\"canonical\" href=\"{}\">\n",
        escape_attr(&meta.canonical_url)
    ));

    let og = &meta.open_graph;
    for (property, value) in [
        ("og:title", &og.title),
        ("og:description", &og.description),
        ("og:url", &og.url),
        ("og:type", &og.kind),
        ("og:site_name", &page.site_name),
    ] {
        head.push_str(&format!(
            "<meta property=\"{}\" content=\"{}\">\n",
            property,
            escape_attr(value)
        ));
    }

    for block in &page.structured_data {
        head.push_str(&json_ld(block));
    }

    head.push_str("</head>\n");
    head
}

fn render_hero(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut hero = String::from("<header class=\"hero\">\n");

    match record.logo.as_deref() {
        Some(logo) => hero.push_str(&format!(
            "<img class=\"logo\" src=\"{}\" alt=\"{} logo\">\n",
            escape_attr(logo),
            escape_attr(&record.name)
        )),
        None => hero.push_str(&format!(
            "<div class=\"logo placeholder\">{}</div>\n",
            escape_text(&record.name)
        )),
    }

    hero.push_str(&format!("<h1>{} Review</h1>\n", escape_text(&record.name)));
    hero.push_str(&format!(
        "<p class=\"rating\">{} <strong>{}</strong>/5</p>\n",
        stars(record.rating),
        record.rating_text()
    ));
    if let Some(feature) = record.feature.as_deref() {
        hero.push_str(&format!(
            "<span class=\"badge feature\">{}</span>\n",
            escape_text(feature)
        ));
    }
    if !record.headline.is_empty() {
        hero.push_str(&format!(
            "<p class=\"headline\">{}</p>\n",
            escape_text(&record.headline)
        ));
    }
    hero.push_str(&outbound_link(&record.url, &format!("Visit {}", record.name)));
    hero.push_str("\n</header>\n");
    hero
}

fn render_nav() -> String {
    let mut nav = String::from("<nav class=\"section-nav\" role=\"tablist\">\n");
    for (id, label) in SECTIONS {
        nav.push_str(&format!(
            "  <a href=\"#{}\" role=\"tab\" aria-controls=\"{}\">{}</a>\n",
            id,
            id,
            escape_text(label)
        ));
    }
    nav.push_str("</nav>\n");
    nav
}

fn render_overview(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut section =
        String::from("<section id=\"overview\" class=\"tab-panel\" role=\"tabpanel\">\n");
    section.push_str(&format!("<h2>{} Overview</h2>\n", escape_text(&record.name)));

    if record.description.trim().is_empty() {
        section.push_str(&format!("<p class=\"placeholder\">{}</p>\n", NOT_SPECIFIED));
    } else {
        for paragraph in record.description.split("\n\n") {
            section.push_str(&format!("<p>{}</p>\n", escape_text(paragraph.trim())));
        }
    }

    section.push_str(&format!(
        "<div class=\"trust-score\" style=\"border-color: {}\">\n  <span class=\"score\">{}</span>/100\n  <span class=\"label\">{}</span>\n</div>\n",
        trust_color(page.trust.score),
        page.trust.score,
        page.trust.label
    ));
    section.push_str("</section>\n");
    section
}

fn render_conditions(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut section = String::from(
        "<section id=\"trading-conditions\" class=\"tab-panel\" role=\"tabpanel\">\n<h2>Trading Conditions</h2>\n<table class=\"details\">\n  <tbody>\n",
    );

    section.push_str(&table_row("Minimum Deposit", &record.min_deposit_text()));
    section.push_str(&table_row("Spreads", record.spread_text()));
    section.push_str(&table_row("Maximum Leverage", record.leverage_text()));
    section.push_str(&table_row("Regulation", &record.regulation_text()));
    section.push_str(&table_row("Trading Platforms", &record.platforms_text()));
    section.push_str(&table_row("Account Types", &record.account_types_text()));
    section.push_str(&table_row("Headquarters", record.country_text()));
    section.push_str(&table_row("Founded", &record.established_text()));

    section.push_str("  </tbody>\n</table>\n</section>\n");
    section
}

fn render_pros_cons(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut section =
        String::from("<section id=\"pros-cons\" class=\"tab-panel\" role=\"tabpanel\">\n");

    section.push_str("<div class=\"pros\">\n<h2>Pros</h2>\n");
    section.push_str(&list_or_placeholder(&record.pros, "pros"));
    section.push_str("</div>\n<div class=\"cons\">\n<h2>Cons</h2>\n");
    section.push_str(&list_or_placeholder(&record.cons, "cons"));
    section.push_str("</div>\n</section>\n");
    section
}

fn render_safety(page: &ReviewPage) -> String {
    let protection = &page.record.protection;
    let rows = [
        ("Segregated client funds", protection.segregated_accounts),
        (
            "Negative balance protection",
            protection.negative_balance_protection,
        ),
        ("Investor compensation scheme", protection.investor_compensation),
        ("Publicly traded", page.record.publicly_traded),
    ];

    let mut section = String::from(
        "<section id=\"safety\">\n<h2>Safety &amp; Client Protection</h2>\n<table class=\"features\">\n  <tbody>\n",
    );
    for (label, value) in rows {
        section.push_str(&format!(
            "    <tr><th scope=\"row\">{}</th><td>{}</td></tr>\n",
            escape_text(label),
            yes_no_icon(value)
        ));
    }
    section.push_str("  </tbody>\n</table>\n</section>\n");
    section
}

fn render_similar(page: &ReviewPage) -> String {
    let mut section = String::from("<section id=\"similar\">\n<h2>Similar Brokers</h2>\n");

    if page.similar.is_empty() {
        section.push_str("<p class=\"placeholder\">No similar brokers available for comparison.</p>\n");
    } else {
        section.push_str("<div class=\"broker-cards\">\n");
        for similar in &page.similar {
            section.push_str(&similar_card(&page.record.slug, similar));
        }
        section.push_str("</div>\n");
    }

    section.push_str("</section>\n");
    section
}

fn similar_card(current_slug: &str, broker: &SimilarBroker) -> String {
    let mut card = format!(
        "<div class=\"broker-card\">\n  <h3><a href=\"/broker/{}/\">{}</a></h3>\n  <p class=\"rating\">{} {:.1}/5</p>\n  <dl>\n",
        escape_attr(&broker.slug),
        escape_text(&broker.name),
        stars(broker.rating),
        broker.rating
    );

    for (label, value) in [
        ("Min. Deposit", &broker.min_deposit),
        ("Max. Leverage", &broker.max_leverage),
        ("Regulation", &broker.regulation),
        ("Spreads", &broker.spread),
    ] {
        card.push_str(&format!(
            "    <dt>{}</dt><dd>{}</dd>\n",
            label,
            escape_text(value)
        ));
    }
    card.push_str("  </dl>\n");

    if let Some(feature) = broker.key_feature.as_deref() {
        card.push_str(&format!(
            "  <span class=\"badge feature\">{}</span>\n",
            escape_text(feature)
        ));
    }

    card.push_str(&format!(
        "  <a class=\"compare-link\" href=\"/compare/{}-vs-{}/\">Compare</a>\n</div>\n",
        escape_attr(current_slug),
        escape_attr(&broker.slug)
    ));
    card
}

fn render_faqs(page: &ReviewPage) -> String {
    let record = &page.record;
    let mut section = format!(
        "<section id=\"faq\">\n<h2>{} FAQ</h2>\n",
        escape_text(&record.name)
    );

    if record.faqs.is_empty() {
        section.push_str(&format!("<p class=\"placeholder\">{}</p>\n", NOT_SPECIFIED));
    }

    for faq in &record.faqs {
        section.push_str(&format!(
            "<details class=\"faq\">\n  <summary>{}</summary>\n  <p>{}</p>\n</details>\n",
            escape_text(&faq.question),
            escape_text(&faq.answer)
        ));
    }

    section.push_str("</section>\n");
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{BrokerRecord, Faq};
    use crate::render::build_review_page;

    fn render(record: &BrokerRecord, catalog: &Catalog) -> String {
        let site = SiteContext::for_tests();
        let page = build_review_page(record, catalog, &site, 3);
        render_html(&page, &site)
    }

    #[test]
    fn test_page_contains_id_name_and_faqs_verbatim() {
        let catalog = Catalog::builtin().unwrap();
        let record = catalog.require("Dukascopy").unwrap();
        let html = render(record, &catalog);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!("data-broker-id=\"{}\"", record.id)));
        assert!(html.contains(&record.name));
        assert!(!record.faqs.is_empty());
        for faq in &record.faqs {
            assert!(html.contains(&faq.question), "missing question {}", faq.question);
            assert!(html.contains(&faq.answer), "missing answer {}", faq.answer);
        }
    }

    #[test]
    fn test_regulation_cell_is_joined() {
        let mut record = BrokerRecord::new("r1", "FXOpen", 4.4, "https://www.fxopen.com");
        record.regulation = vec!["FCA".to_string(), "CySEC".to_string()];
        let catalog = Catalog::from_records(vec![record.clone()]).unwrap();

        let html = render(&record, &catalog);
        assert!(html.contains("<th scope=\"row\">Regulation</th><td>FCA, CySEC</td>"));
    }

    #[test]
    fn test_empty_fields_render_placeholder() {
        let record = BrokerRecord::new("e1", "Empty Broker", 3.0, "https://empty.example");
        let catalog = Catalog::from_records(vec![record.clone()]).unwrap();
        let html = render(&record, &catalog);

        assert!(html.contains("<th scope=\"row\">Regulation</th><td>Not specified</td>"));
        assert!(html.contains("<th scope=\"row\">Minimum Deposit</th><td>Not specified</td>"));
        assert!(html.contains("<p class=\"placeholder\">Not specified</p>"));
        assert!(html.contains("No similar brokers available for comparison."));
        assert!(html.contains("aria-label=\"Unknown\">-</span>"));
    }

    #[test]
    fn test_faq_with_markup_is_escaped_but_quotes_survive() {
        let mut record = BrokerRecord::new("q1", "Quote Broker", 4.0, "https://quote.example");
        record.faqs = vec![Faq::new(
            "What's the \"minimum\" deposit?",
            "Deposits < $100 are accepted & processed instantly.",
        )];
        let catalog = Catalog::from_records(vec![record.clone()]).unwrap();
        let html = render(&record, &catalog);

        assert!(html.contains("<summary>What's the \"minimum\" deposit?</summary>"));
        assert!(html.contains("Deposits &lt; $100 are accepted & processed instantly."));
    }

    #[test]
    fn test_head_metadata() {
        let catalog = Catalog::builtin().unwrap();
        let record = catalog.require("xm").unwrap();
        let html = render(record, &catalog);

        assert!(html.contains("<link rel=\"canonical\" href=\"https://brokeranalysis.com/broker/xm\">"));
        assert!(html.contains("<meta property=\"og:type\" content=\"article\">"));
        assert_eq!(html.matches("application/ld+json").count(), 3);
        assert!(html.contains("target=\"_blank\" rel=\"nofollow noopener noreferrer\">Visit XM</a>"));
    }
}
