//! Provider-agnostic data model shared by the pipeline and its collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentLabel;

/// Hard upper bound on the number of reviews analysed per audit.
pub const MAX_REVIEWS: usize = 100;

/// Marketplace item code (8 to 10 ASCII alphanumerics).
///
/// Only constructed through [`ItemId::parse`], so holding one means the
/// shape has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItemId(String);

impl ItemId {
    /// Parses a trimmed item code. Case is preserved.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        crate::classifier::is_item_id(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an audit is run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTarget {
    /// Listing on the marketplace, addressed by its item code.
    Item(ItemId),
    /// Merchant-hosted product page.
    Storefront(String),
}

impl ListingTarget {
    /// Short, stable name of the source, used in logs and messages.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Item(_) => "marketplace",
            Self::Storefront(_) => "storefront",
        }
    }
}

impl fmt::Display for ListingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "item {id}"),
            Self::Storefront(url) => write!(f, "storefront page {url}"),
        }
    }
}

/// Normalized listing content. Absent fields are empty, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub bullets: Vec<String>,
    pub description: String,
    /// Image URLs in page order, without duplicates.
    pub images: Vec<String>,
}

impl ListingRecord {
    /// Builds a record with trimmed text, empty bullets dropped and images
    /// deduplicated (first occurrence wins).
    pub fn new(
        title: impl Into<String>,
        bullets: impl IntoIterator<Item = String>,
        description: impl Into<String>,
        images: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for image in images {
            let image = image.trim();
            if !image.is_empty() && !unique.iter().any(|u| u == image) {
                unique.push(image.to_string());
            }
        }

        Self {
            title: title.into().trim().to_string(),
            bullets: bullets
                .into_iter()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect(),
            description: description.into().trim().to_string(),
            images: unique,
        }
    }
}

/// Collected review texts, never longer than [`MAX_REVIEWS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSet(Vec<String>);

impl ReviewSet {
    /// Keeps at most `cap` reviews (and never more than [`MAX_REVIEWS`]).
    pub fn truncated(mut reviews: Vec<String>, cap: usize) -> Self {
        reviews.truncate(cap.min(MAX_REVIEWS));
        Self(reviews)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Result of one audit. Built once, returned to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Quality score in `0..=100`.
    pub listing_score: u8,
    /// `None` when no review sentiment was part of the audit.
    pub sentiment_summary: Option<SentimentLabel>,
    /// Recommendations in rule evaluation order.
    pub recommendations: Vec<String>,
}

impl AuditReport {
    /// Recommendations as one newline-joined string: `"1. ...\n2. ..."`.
    pub fn numbered_recommendations(&self) -> String {
        self.recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| format!("{}. {rec}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_normalizes_fields() {
        let record = ListingRecord::new(
            "  Steel Bottle ",
            vec!["  keeps cold ".to_string(), "   ".to_string()],
            "\nDouble walled.\n",
            vec![
                "https://img/a.jpg".to_string(),
                "https://img/b.jpg".to_string(),
                "https://img/a.jpg".to_string(),
            ],
        );

        assert_eq!(record.title, "Steel Bottle");
        assert_eq!(record.bullets, vec!["keeps cold"]);
        assert_eq!(record.description, "Double walled.");
        assert_eq!(record.images, vec!["https://img/a.jpg", "https://img/b.jpg"]);
    }

    #[test]
    fn review_set_never_exceeds_hard_cap() {
        let reviews = vec!["ok".to_string(); 250];
        assert_eq!(ReviewSet::truncated(reviews.clone(), 500).len(), MAX_REVIEWS);
        assert_eq!(ReviewSet::truncated(reviews, 7).len(), 7);
    }

    #[test]
    fn recommendations_are_numbered_from_one() {
        let report = AuditReport {
            listing_score: 90,
            sentiment_summary: None,
            recommendations: vec!["First".into(), "Second".into()],
        };
        assert_eq!(report.numbered_recommendations(), "1. First\n2. Second");
    }
}
