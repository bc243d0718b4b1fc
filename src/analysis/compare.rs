//! Side-by-side broker comparison.
//!
//! Everything here is display-only: winner badges from a plain
//! greater-than on ratings, per-category leaders and yes/no feature rows.

use crate::error::CompareError;
use crate::models::BrokerRecord;
use serde::Serialize;
use std::fmt;

/// Ratings closer than this are treated as equal.
const RATING_EPSILON: f64 = 1e-9;

/// Badge shown under each broker in the comparison header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    OverallWinner,
    Comparable,
}

impl Badge {
    /// Badge text without the icon.
    pub fn text(&self) -> &'static str {
        match self {
            Badge::OverallWinner => "Overall Winner",
            Badge::Comparable => "Comparable",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Badge::OverallWinner => "🏆",
            Badge::Comparable => "⚖️",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.text())
    }
}

/// How one rating row compares between exactly two brokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Left,
    Right,
    Tie,
    /// At least one side has no value.
    Unknown,
}

impl Outcome {
    /// Marker for the middle column: W/L from the left broker's point of view.
    pub fn marker(&self) -> &'static str {
        match self {
            Outcome::Left => "W",
            Outcome::Right => "L",
            Outcome::Tie => "=",
            Outcome::Unknown => "-",
        }
    }
}

/// One rating category across every compared broker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRow {
    pub category: &'static str,
    pub values: Vec<Option<f64>>,
    /// Index of the broker strictly ahead of all others, if any.
    pub leader: Option<usize>,
}

impl RatingRow {
    fn new(category: &'static str, values: Vec<Option<f64>>) -> Self {
        let known: Option<Vec<f64>> = values.iter().copied().collect();
        let leader = known.and_then(|v| strict_leader(&v));
        Self {
            category,
            values,
            leader,
        }
    }

    /// Two-broker view of this row.
    pub fn outcome(&self) -> Outcome {
        if self.values.iter().any(Option::is_none) {
            return Outcome::Unknown;
        }
        match self.leader {
            Some(0) => Outcome::Left,
            Some(_) => Outcome::Right,
            None => Outcome::Tie,
        }
    }
}

/// A yes/no feature across every compared broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub feature: &'static str,
    pub values: Vec<Option<bool>>,
}

/// Comparison model rendered by the compare page.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison<'a> {
    pub brokers: Vec<&'a BrokerRecord>,
    pub badges: Vec<Badge>,
    pub ratings: Vec<RatingRow>,
    pub features: Vec<FeatureRow>,
}

impl<'a> Comparison<'a> {
    /// Build a comparison of 2..=`max_brokers` distinct records.
    pub fn new(brokers: Vec<&'a BrokerRecord>, max_brokers: usize) -> Result<Self, CompareError> {
        if brokers.len() < 2 {
            return Err(CompareError::TooFew(brokers.len()));
        }
        if brokers.len() > max_brokers {
            return Err(CompareError::TooMany {
                max: max_brokers,
                got: brokers.len(),
            });
        }
        for (i, broker) in brokers.iter().enumerate() {
            if brokers[..i].iter().any(|b| b.id == broker.id) {
                return Err(CompareError::Repeated(broker.name.clone()));
            }
        }

        let badges = overall_badges(&brokers);
        let ratings = rating_rows(&brokers);
        let features = feature_rows(&brokers);

        Ok(Self {
            brokers,
            badges,
            ratings,
            features,
        })
    }

    /// The broker holding the Overall Winner badge.
    pub fn winner(&self) -> Option<&'a BrokerRecord> {
        self.badges
            .iter()
            .position(|b| *b == Badge::OverallWinner)
            .map(|i| self.brokers[i])
    }

    /// Route segment, e.g. "xm-vs-ic-markets".
    pub fn slug(&self) -> String {
        self.brokers
            .iter()
            .map(|b| b.slug.as_str())
            .collect::<Vec<_>>()
            .join("-vs-")
    }

    /// Page heading, e.g. "XM vs IC Markets".
    pub fn title(&self) -> String {
        self.brokers
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(" vs ")
    }
}

/// Overall Winner for the broker whose rating is strictly above every
/// other; Comparable for everyone else. A shared top rating makes every
/// broker Comparable.
pub fn overall_badges(brokers: &[&BrokerRecord]) -> Vec<Badge> {
    let ratings: Vec<f64> = brokers.iter().map(|b| b.rating).collect();
    let leader = strict_leader(&ratings);

    (0..brokers.len())
        .map(|i| {
            if leader == Some(i) {
                Badge::OverallWinner
            } else {
                Badge::Comparable
            }
        })
        .collect()
}

/// Overall rating followed by the category ratings.
pub fn rating_rows(brokers: &[&BrokerRecord]) -> Vec<RatingRow> {
    let mut rows = vec![RatingRow::new(
        "Overall Rating",
        brokers.iter().map(|b| Some(b.rating)).collect(),
    )];

    let categories = crate::models::CategoryRatings::default().entries();
    for (index, (category, _)) in categories.into_iter().enumerate() {
        let values = brokers
            .iter()
            .map(|b| b.category_ratings.entries()[index].1)
            .collect();
        rows.push(RatingRow::new(category, values));
    }

    rows
}

pub fn feature_rows(brokers: &[&BrokerRecord]) -> Vec<FeatureRow> {
    let row = |feature: &'static str, get: fn(&BrokerRecord) -> Option<bool>| FeatureRow {
        feature,
        values: brokers.iter().map(|b| get(b)).collect(),
    };

    vec![
        row("Segregated client funds", |b| b.protection.segregated_accounts),
        row("Negative balance protection", |b| {
            b.protection.negative_balance_protection
        }),
        row("Investor compensation scheme", |b| {
            b.protection.investor_compensation
        }),
        row("Publicly traded", |b| b.publicly_traded),
    ]
}

/// "Key differences" bullet points for one broker.
pub fn advantages(broker: &BrokerRecord) -> Vec<String> {
    let regulation = if broker.regulation.is_empty() {
        format!("{} is established in the industry", broker.name)
    } else {
        format!("{} is regulated by {}", broker.name, broker.regulation_text())
    };

    let deposit = match broker.min_deposit {
        Some(amount) if amount > 0 => format!("Offers lower minimum deposit (${})", amount),
        Some(_) => "Offers no minimum deposit".to_string(),
        None => "Offers competitive trading conditions".to_string(),
    };

    let platforms = if broker.platforms.is_empty() {
        "Offers multiple trading platforms".to_string()
    } else {
        format!("Provides {}", broker.platforms_text())
    };

    vec![regulation, deposit, platforms]
}

/// Index of the value strictly greater than every other value.
fn strict_leader(values: &[f64]) -> Option<usize> {
    let (best, &max) = values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))?;

    let shared = values
        .iter()
        .enumerate()
        .any(|(i, v)| i != best && (max - v).abs() < RATING_EPSILON);

    if shared {
        None
    } else {
        Some(best)
    }
}
