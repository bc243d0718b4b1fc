//! Trust score calculation.
//!
//! Scores a broker from 0 to 100:
//! - regulatory licenses (up to 40 points)
//! - years in business (up to 20 points)
//! - company structure (up to 10 points)
//! - client fund protection (up to 15 points)
//! - transparency and disclosure (up to 15 points)

use crate::models::{BrokerRecord, TrustScore};

/// Top-tier regulators, 8 points each.
pub const TIER_1_REGULATORS: &[&str] = &[
    "FCA", "ASIC", "SEC", "CFTC", "BaFin", "MAS", "FINMA", "JFSA", "IIROC", "CIMA",
];

/// Second-tier regulators, 4 points each.
pub const TIER_2_REGULATORS: &[&str] = &[
    "CySEC", "FSC", "FSCA", "DFSA", "FSRA", "CNMV", "CONSOB", "ESMA",
];

/// Compute the trust score as of `reference_year`.
pub fn trust_score(broker: &BrokerRecord, reference_year: i32) -> TrustScore {
    let score = regulatory_score(broker)
        + years_in_business_score(broker, reference_year)
        + company_structure_score(broker)
        + client_fund_protection_score(broker)
        + transparency_score(broker);

    let score = score.min(100) as u8;
    TrustScore {
        score,
        label: trust_label(score),
    }
}

/// Verbal description of a score.
pub fn trust_label(score: u8) -> &'static str {
    match score {
        90.. => "Highly Trusted",
        80..=89 => "Very Trustworthy",
        70..=79 => "Trustworthy",
        60..=69 => "Moderately Trustworthy",
        50..=59 => "Average Trust",
        40..=49 => "Exercise Caution",
        30..=39 => "Low Trust",
        _ => "Not Recommended",
    }
}

/// CSS color for a score badge.
pub fn trust_color(score: u8) -> &'static str {
    match score {
        90.. => "green",
        80..=89 => "#00a86b",
        70..=79 => "#4caf50",
        60..=69 => "#8bc34a",
        50..=59 => "#cddc39",
        40..=49 => "#ffc107",
        30..=39 => "#ff9800",
        _ => "#f44336",
    }
}

/// Whole-token match, so "CySEC" never counts as "SEC" and "FSCA" never as "FSC".
fn holds_license(broker: &BrokerRecord, regulator: &str) -> bool {
    broker.regulation.iter().any(|entry| {
        entry
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|token| token == regulator)
    })
}

fn regulatory_score(broker: &BrokerRecord) -> u32 {
    let tier1 = TIER_1_REGULATORS
        .iter()
        .filter(|reg| holds_license(broker, reg))
        .count() as u32;
    let tier2 = TIER_2_REGULATORS
        .iter()
        .filter(|reg| holds_license(broker, reg))
        .count() as u32;

    (tier1 * 8 + tier2 * 4).min(40)
}

fn years_in_business_score(broker: &BrokerRecord, reference_year: i32) -> u32 {
    let Some(founded) = broker.established else {
        return 0;
    };

    match reference_year - i32::from(founded) {
        years if years < 0 => 0,
        0..=2 => 5,
        3..=5 => 10,
        6..=10 => 15,
        _ => 20,
    }
}

fn company_structure_score(broker: &BrokerRecord) -> u32 {
    if broker.publicly_traded == Some(true) {
        return 10;
    }

    match broker.parent_company.as_deref() {
        Some(parent) if parent.contains("Bank") || parent.contains("Financial") => 7,
        _ => 5,
    }
}

fn client_fund_protection_score(broker: &BrokerRecord) -> u32 {
    let mut score = 0;

    if broker.protection.segregated_accounts == Some(true) {
        score += 7;
    }

    if broker.protection.investor_compensation == Some(true)
        || holds_license(broker, "FCA")
        || holds_license(broker, "CySEC")
    {
        score += 5;
    }

    if broker.protection.negative_balance_protection == Some(true) {
        score += 3;
    }

    score.min(15)
}

fn transparency_score(broker: &BrokerRecord) -> u32 {
    let mut score = 0;

    if broker.trading_fee.is_some() {
        score += 5;
    }
    if !broker.regulation.is_empty() {
        score += 5;
    }
    if broker.established.is_some() && broker.country.is_some() {
        score += 5;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broker() -> BrokerRecord {
        BrokerRecord::new("1", "Test Broker", 4.0, "https://example.com")
    }

    #[test]
    fn test_bare_record_scores_structure_only() {
        let score = trust_score(&broker(), 2025);
        assert_eq!(score.score, 5);
        assert_eq!(score.label, "Not Recommended");
    }

    #[test]
    fn test_regulatory_score_is_capped() {
        let mut b = broker();
        b.regulation = ["FCA", "ASIC", "SEC", "CFTC", "MAS", "CySEC"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(regulatory_score(&b), 40);

        b.regulation = vec!["FCA".to_string(), "CySEC".to_string()];
        assert_eq!(regulatory_score(&b), 12);
    }

    #[test]
    fn test_regulators_match_whole_names() {
        let mut b = broker();
        b.regulation = vec!["CySEC".to_string()];
        assert_eq!(regulatory_score(&b), 4);

        b.regulation = vec!["FSCA".to_string()];
        assert_eq!(regulatory_score(&b), 4);

        b.regulation = vec!["FCA (UK)".to_string(), "SEC/CFTC".to_string()];
        assert_eq!(regulatory_score(&b), 24);
    }

    #[test]
    fn test_years_in_business_bands() {
        let mut b = broker();
        for (founded, expected) in [(2030, 0), (2024, 5), (2021, 10), (2016, 15), (1998, 20)] {
            b.established = Some(founded);
            assert_eq!(years_in_business_score(&b, 2025), expected, "founded {}", founded);
        }
    }

    #[test]
    fn test_company_structure() {
        let mut b = broker();
        b.parent_company = Some("Bank of America".to_string());
        assert_eq!(company_structure_score(&b), 7);

        b.publicly_traded = Some(true);
        assert_eq!(company_structure_score(&b), 10);
    }

    #[test]
    fn test_fully_disclosed_broker() {
        let mut b = broker();
        b.regulation = vec!["FCA".to_string(), "ASIC".to_string(), "CySEC".to_string()];
        b.established = Some(2005);
        b.country = Some("UK".to_string());
        b.trading_fee = Some(0.1);
        b.publicly_traded = Some(true);
        b.protection.segregated_accounts = Some(true);
        b.protection.negative_balance_protection = Some(true);

        // 20 regulatory + 20 years + 10 public + 15 protection + 15 transparency
        let score = trust_score(&b, 2025);
        assert_eq!(score.score, 80);
        assert_eq!(score.label, "Very Trustworthy");
        assert_eq!(trust_color(score.score), "#00a86b");
    }

    #[test]
    fn test_labels() {
        assert_eq!(trust_label(100), "Highly Trusted");
        assert_eq!(trust_label(70), "Trustworthy");
        assert_eq!(trust_label(45), "Exercise Caution");
        assert_eq!(trust_label(0), "Not Recommended");
    }
}
