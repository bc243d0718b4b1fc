//! HTML comparison page.

use super::html::{
    escape_attr, escape_text, json_ld, list_or_placeholder, outbound_link, rating_cell, stars,
    yes_no_icon,
};
use super::{seo, SiteContext};
use crate::analysis::{advantages, Badge, Comparison};
use crate::models::BrokerRecord;

/// Detail rows shown for every broker, in display order.
pub fn detail_rows(broker: &BrokerRecord) -> [(&'static str, String); 10] {
    [
        ("Country", broker.country_text().to_string()),
        ("Founded", broker.established_text()),
        ("Minimum Deposit", broker.min_deposit_text()),
        ("Trading Platforms", broker.platforms_text()),
        ("Regulation", broker.regulation_text()),
        ("Maximum Leverage", broker.leverage_text().to_string()),
        ("Spreads", broker.spread_text().to_string()),
        ("Trading Fee", broker.trading_fee_text()),
        ("Account Types", broker.account_types_text()),
        ("Tradable Assets", broker.assets_text()),
    ]
}

/// Render the comparison document.
pub fn render_html(comparison: &Comparison<'_>, site: &SiteContext) -> String {
    let meta = seo::comparison_metadata(comparison, site);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_text(&meta.title)));
    out.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape_attr(&meta.description)
    ));
    out.push_str(&format!(
        "<link rel=\"canonical\" href=\"{}\">\n",
        escape_attr(&meta.canonical_url)
    ));
    out.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n<meta property=\"og:type\" content=\"{}\">\n",
        escape_attr(&meta.open_graph.title),
        escape_attr(&meta.open_graph.kind)
    ));
    out.push_str(&json_ld(&serde_json::json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": meta.title,
        "url": meta.canonical_url,
        "dateModified": site.modified,
    })));
    out.push_str("</head>\n<body>\n");

    out.push_str(&format!(
        "<main class=\"broker-comparison\" data-compare=\"{}\">\n<h1>{}</h1>\n<p class=\"updated\">Last updated {}</p>\n",
        escape_attr(&comparison.slug()),
        escape_text(&comparison.title()),
        escape_text(&site.modified)
    ));

    out.push_str(&render_header_cards(comparison));
    out.push_str(&render_key_differences(comparison));
    out.push_str(&render_ratings(comparison));
    out.push_str(&render_details(comparison));
    out.push_str(&render_features(comparison));
    out.push_str(&render_pros_cons(comparison));

    out.push_str("</main>\n");
    out.push_str(&format!(
        "<footer>\n<p>&copy; {} {}.</p>\n</footer>\n</body>\n</html>\n",
        site.year,
        escape_text(&site.name)
    ));
    out
}

fn render_header_cards(comparison: &Comparison<'_>) -> String {
    let mut section = String::from("<section class=\"compare-header\">\n");

    for (broker, badge) in comparison.brokers.iter().zip(&comparison.badges) {
        let class = match badge {
            Badge::OverallWinner => "winner",
            Badge::Comparable => "comparable",
        };
        section.push_str(&format!(
            "<div class=\"broker-card\" data-broker-id=\"{}\">\n  <h2><a href=\"/broker/{}/\">{}</a></h2>\n  <p class=\"rating\">{} {}/5</p>\n  <span class=\"badge {}\">{}</span>\n  {}\n</div>\n",
            escape_attr(&broker.id),
            escape_attr(&broker.slug),
            escape_text(&broker.name),
            stars(broker.rating),
            broker.rating_text(),
            class,
            badge,
            outbound_link(&broker.url, &format!("Visit {}", broker.name))
        ));
    }

    section.push_str("</section>\n");
    section
}

fn render_key_differences(comparison: &Comparison<'_>) -> String {
    let mut section = String::from("<section class=\"key-differences\">\n<h2>Key Differences</h2>\n");

    for broker in &comparison.brokers {
        section.push_str(&format!(
            "<div class=\"advantages\">\n<h3>{} Advantages</h3>\n",
            escape_text(&broker.name)
        ));
        section.push_str(&list_or_placeholder(&advantages(broker), "advantages"));
        section.push_str("</div>\n");
    }

    section.push_str("</section>\n");
    section
}

fn render_ratings(comparison: &Comparison<'_>) -> String {
    let two_way = comparison.brokers.len() == 2;
    let mut section = String::from(
        "<section class=\"ratings\">\n<h2>Ratings Comparison</h2>\n<table>\n  <thead>\n    <tr><th>Category</th>",
    );

    if two_way {
        section.push_str(&format!(
            "<th>{}</th><th>vs</th><th>{}</th>",
            escape_text(&comparison.brokers[0].name),
            escape_text(&comparison.brokers[1].name)
        ));
    } else {
        for broker in &comparison.brokers {
            section.push_str(&format!("<th>{}</th>", escape_text(&broker.name)));
        }
    }
    section.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for row in &comparison.ratings {
        section.push_str(&format!("    <tr><th scope=\"row\">{}</th>", escape_text(row.category)));

        if two_way {
            section.push_str(&format!(
                "<td>{}</td><td class=\"outcome\">{}</td><td>{}</td>",
                rating_cell(row.values[0]),
                row.outcome().marker(),
                rating_cell(row.values[1])
            ));
        } else {
            for (i, value) in row.values.iter().enumerate() {
                let class = if row.leader == Some(i) { " class=\"leader\"" } else { "" };
                section.push_str(&format!("<td{}>{}</td>", class, rating_cell(*value)));
            }
        }

        section.push_str("</tr>\n");
    }

    section.push_str("  </tbody>\n</table>\n</section>\n");
    section
}

fn render_details(comparison: &Comparison<'_>) -> String {
    let mut section = String::from("<section class=\"details\">\n<h2>Broker Details</h2>\n<table>\n  <thead>\n    <tr><th>Feature</th>");
    for broker in &comparison.brokers {
        section.push_str(&format!("<th>{}</th>", escape_text(&broker.name)));
    }
    section.push_str("</tr>\n  </thead>\n  <tbody>\n");

    let columns: Vec<_> = comparison.brokers.iter().map(|b| detail_rows(b)).collect();
    for (row, (label, _)) in detail_rows(comparison.brokers[0]).iter().enumerate() {
        section.push_str(&format!("    <tr><th scope=\"row\">{}</th>", label));
        for column in &columns {
            section.push_str(&format!("<td>{}</td>", escape_text(&column[row].1)));
        }
        section.push_str("</tr>\n");
    }

    section.push_str("  </tbody>\n</table>\n</section>\n");
    section
}

fn render_features(comparison: &Comparison<'_>) -> String {
    let mut section = String::from("<section class=\"features\">\n<h2>Safety &amp; Features</h2>\n<table>\n  <tbody>\n");

    for row in &comparison.features {
        section.push_str(&format!("    <tr><th scope=\"row\">{}</th>", escape_text(row.feature)));
        for value in &row.values {
            section.push_str(&format!("<td>{}</td>", yes_no_icon(*value)));
        }
        section.push_str("</tr>\n");
    }

    section.push_str("  </tbody>\n</table>\n</section>\n");
    section
}

fn render_pros_cons(comparison: &Comparison<'_>) -> String {
    let mut section = String::from("<section class=\"pros-cons\">\n<h2>Pros &amp; Cons</h2>\n");

    for broker in &comparison.brokers {
        section.push_str(&format!(
            "<div class=\"broker-pros-cons\">\n<h3>{}</h3>\n<h4>Pros</h4>\n",
            escape_text(&broker.name)
        ));
        section.push_str(&list_or_placeholder(&broker.pros, "pros"));
        section.push_str("<h4>Cons</h4>\n");
        section.push_str(&list_or_placeholder(&broker.cons, "cons"));
        section.push_str("</div>\n");
    }

    section.push_str("</section>\n");
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broker(id: &str, name: &str, rating: f64) -> BrokerRecord {
        BrokerRecord::new(id, name, rating, "https://example.com")
    }

    #[test]
    fn test_winner_and_comparable_badges() {
        let a = broker("1", "IC Markets", 4.9);
        let b = broker("2", "eToro", 4.5);
        let comparison = Comparison::new(vec![&a, &b], 5).unwrap();
        let html = render_html(&comparison, &SiteContext::for_tests());

        assert!(html.contains("<span class=\"badge winner\">🏆 Overall Winner</span>"));
        assert!(html.contains("<span class=\"badge comparable\">⚖️ Comparable</span>"));
        let winner = html.find("Overall Winner").unwrap();
        let comparable = html.find("⚖️ Comparable").unwrap();
        assert!(winner < comparable);
    }

    #[test]
    fn test_equal_ratings_are_both_comparable() {
        let a = broker("1", "FXOpen", 4.4);
        let b = broker("2", "Dukascopy", 4.4);
        let comparison = Comparison::new(vec![&a, &b], 5).unwrap();
        let html = render_html(&comparison, &SiteContext::for_tests());

        assert!(!html.contains("Overall Winner"));
        assert_eq!(html.matches("⚖️ Comparable").count(), 2);
        assert!(html.contains("<td>4.4</td><td class=\"outcome\">=</td><td>4.4</td>"));
    }

    #[test]
    fn test_missing_values_render_placeholders() {
        let a = broker("1", "A", 4.0);
        let mut b = broker("2", "B", 3.0);
        b.regulation = vec!["FCA".to_string(), "CySEC".to_string()];
        let comparison = Comparison::new(vec![&a, &b], 5).unwrap();
        let html = render_html(&comparison, &SiteContext::for_tests());

        assert!(html.contains(
            "<tr><th scope=\"row\">Regulation</th><td>Not specified</td><td>FCA, CySEC</td></tr>"
        ));
        assert!(html.contains("<td>-</td><td class=\"outcome\">-</td><td>-</td>"));
        assert!(html.contains("aria-label=\"Unknown\">-</span>"));
    }

    #[test]
    fn test_fee_and_asset_rows() {
        let mut a = broker("1", "A", 4.0);
        a.trading_fee = Some(0.1);
        a.supported_assets = vec!["Forex".to_string(), "Stocks".to_string()];
        let b = broker("2", "B", 3.0);
        let comparison = Comparison::new(vec![&a, &b], 5).unwrap();
        let html = render_html(&comparison, &SiteContext::for_tests());

        assert!(html.contains(
            "<tr><th scope=\"row\">Trading Fee</th><td>0.1%</td><td>Not specified</td></tr>"
        ));
        assert!(html.contains(
            "<tr><th scope=\"row\">Tradable Assets</th><td>Forex, Stocks</td><td>Not specified</td></tr>"
        ));
    }

    #[test]
    fn test_three_way_marks_leader() {
        let a = broker("1", "A", 4.1);
        let b = broker("2", "B", 4.8);
        let c = broker("3", "C", 4.3);
        let comparison = Comparison::new(vec![&a, &b, &c], 5).unwrap();
        let html = render_html(&comparison, &SiteContext::for_tests());

        assert!(html.contains("<td>4.1</td><td class=\"leader\">4.8</td><td>4.3</td>"));
        assert!(html.contains("data-compare=\"a-vs-b-vs-c\""));
    }
}
