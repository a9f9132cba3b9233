//! Deterministic point-deduction scoring of a listing.
//!
//! The score starts at [`BASELINE`] and every triggered rule subtracts its
//! points and contributes one recommendation. Rules run in a fixed category
//! order (title, bullets, description, images, sentiment) and the general
//! recommendation always closes the list. Within a category the branches are
//! mutually exclusive; across categories they accumulate.

mod recommendations;

use serde::Serialize;

use crate::sentiment::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, SentimentScore};
use crate::types::{AuditReport, ListingRecord};

pub use recommendations::GENERAL_RECOMMENDATION;

pub const BASELINE: i32 = 100;

pub const SHORT_TITLE_CHARS: usize = 50;
pub const LONG_TITLE_CHARS: usize = 200;
pub const TARGET_BULLETS: usize = 5;
pub const MIN_BULLET_WORDS: usize = 7;
pub const SHORT_DESCRIPTION_CHARS: usize = 150;
pub const MIN_IMAGES: usize = 3;

/// Every deduction rule the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    MissingTitle,
    ShortTitle,
    OverlongTitle,
    NoBullets,
    FewBullets,
    ThinBullet,
    MissingDescription,
    ShortDescription,
    NoImages,
    FewImages,
    NegativeSentiment,
    MixedSentiment,
}

impl Rule {
    /// Points subtracted when the rule fires.
    pub fn points(self) -> i32 {
        match self {
            Self::MissingTitle => 25,
            Self::ShortTitle => 10,
            Self::OverlongTitle => 5,
            Self::NoBullets => 20,
            Self::FewBullets => 10,
            Self::ThinBullet => 2,
            Self::MissingDescription => 25,
            Self::ShortDescription => 10,
            Self::NoImages => 20,
            Self::FewImages => 10,
            Self::NegativeSentiment => 15,
            Self::MixedSentiment => 5,
        }
    }
}

/// One triggered rule and the advice that goes with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub rule: Rule,
    pub recommendation: String,
}

impl Finding {
    fn new(rule: Rule, recommendation: String) -> Self {
        Self {
            rule,
            recommendation,
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn title_findings(title: &str) -> Option<Finding> {
    let length = char_len(title);
    if length == 0 {
        Some(Finding::new(Rule::MissingTitle, recommendations::missing_title()))
    } else if length < SHORT_TITLE_CHARS {
        Some(Finding::new(Rule::ShortTitle, recommendations::short_title(length)))
    } else if length > LONG_TITLE_CHARS {
        Some(Finding::new(Rule::OverlongTitle, recommendations::overlong_title(length)))
    } else {
        None
    }
}

fn bullet_findings(bullets: &[String]) -> Vec<Finding> {
    match bullets.len() {
        0 => vec![Finding::new(Rule::NoBullets, recommendations::no_bullets())],
        n if n < TARGET_BULLETS => {
            vec![Finding::new(Rule::FewBullets, recommendations::few_bullets(n))]
        }
        _ => bullets
            .iter()
            .take(TARGET_BULLETS)
            .enumerate()
            .filter_map(|(i, bullet)| {
                let words = bullet.split_whitespace().count();
                (words < MIN_BULLET_WORDS)
                    .then(|| Finding::new(Rule::ThinBullet, recommendations::thin_bullet(i + 1, words)))
            })
            .collect(),
    }
}

fn description_findings(description: &str) -> Option<Finding> {
    let length = char_len(description);
    if length == 0 {
        Some(Finding::new(
            Rule::MissingDescription,
            recommendations::missing_description(),
        ))
    } else if length < SHORT_DESCRIPTION_CHARS {
        Some(Finding::new(
            Rule::ShortDescription,
            recommendations::short_description(length),
        ))
    } else {
        None
    }
}

fn image_findings(images: &[String]) -> Option<Finding> {
    match images.len() {
        0 => Some(Finding::new(Rule::NoImages, recommendations::no_images())),
        n if n < MIN_IMAGES => Some(Finding::new(Rule::FewImages, recommendations::few_images(n))),
        _ => None,
    }
}

fn sentiment_findings(sentiment: SentimentScore) -> Option<Finding> {
    let value = sentiment.value();
    if value < NEGATIVE_THRESHOLD {
        Some(Finding::new(
            Rule::NegativeSentiment,
            recommendations::negative_sentiment(value),
        ))
    } else if value < POSITIVE_THRESHOLD {
        Some(Finding::new(
            Rule::MixedSentiment,
            recommendations::mixed_sentiment(value),
        ))
    } else {
        None
    }
}

/// Runs every rule in evaluation order.
///
/// `sentiment` is `None` when the audit had no review sentiment at all
/// (storefront pages); the sentiment rules are skipped in that case.
pub fn evaluate(listing: &ListingRecord, sentiment: Option<SentimentScore>) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(title_findings(&listing.title));
    findings.extend(bullet_findings(&listing.bullets));
    findings.extend(description_findings(&listing.description));
    findings.extend(image_findings(&listing.images));
    findings.extend(sentiment.and_then(sentiment_findings));
    findings
}

/// Scores a listing. Pure: equal inputs always give equal reports.
pub fn audit(listing: &ListingRecord, sentiment: Option<SentimentScore>) -> AuditReport {
    let findings = evaluate(listing, sentiment);

    let deducted: i32 = findings.iter().map(|f| f.rule.points()).sum();
    let listing_score = (BASELINE - deducted).clamp(0, 100) as u8;

    let mut recommendations: Vec<String> =
        findings.into_iter().map(|f| f.recommendation).collect();
    recommendations.push(GENERAL_RECOMMENDATION.to_string());

    AuditReport {
        listing_score,
        sentiment_summary: sentiment.map(SentimentScore::label),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::sentiment::SentimentLabel;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn strong_listing() -> ListingRecord {
        ListingRecord {
            title: "t".repeat(80),
            bullets: (0..5).map(|_| words(8)).collect(),
            description: "d".repeat(300),
            images: (0..4).map(|i| format!("https://img.example.com/{i}.jpg")).collect(),
        }
    }

    #[test]
    fn empty_listing_without_sentiment_scores_ten() {
        let report = audit(&ListingRecord::default(), None);

        assert_eq!(report.listing_score, 10);
        assert_eq!(report.sentiment_summary, None);
        assert_eq!(report.recommendations.len(), 5);
        assert!(report.recommendations[0].starts_with("Title is missing"));
        assert!(report.recommendations[1].starts_with("No bullet points"));
        assert!(report.recommendations[2].starts_with("Description is missing"));
        assert!(report.recommendations[3].starts_with("No images"));
        assert_eq!(report.recommendations[4], GENERAL_RECOMMENDATION);
    }

    #[test]
    fn empty_listing_with_zero_sentiment_also_loses_mixed_points() {
        let report = audit(&ListingRecord::default(), Some(SentimentScore::new(0.0)));

        assert_eq!(report.listing_score, 5);
        assert_eq!(report.sentiment_summary, Some(SentimentLabel::Neutral));
        assert_eq!(report.recommendations.len(), 6);
        assert!(report.recommendations[4].starts_with("Customer sentiment is mixed"));
    }

    #[test]
    fn strong_listing_keeps_full_score() {
        let report = audit(&strong_listing(), Some(SentimentScore::new(0.5)));

        assert_eq!(report.listing_score, 100);
        assert_eq!(report.sentiment_summary, Some(SentimentLabel::Positive));
        assert_eq!(report.recommendations, vec![GENERAL_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn title_branches_are_exclusive_and_carry_lengths() {
        let mut listing = strong_listing();

        listing.title = "x".repeat(49);
        let findings = evaluate(&listing, None);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::ShortTitle);
        assert!(findings[0].recommendation.contains("49 characters"));

        listing.title = "x".repeat(50);
        assert!(evaluate(&listing, None).is_empty());

        listing.title = "x".repeat(200);
        assert!(evaluate(&listing, None).is_empty());

        listing.title = "x".repeat(201);
        let findings = evaluate(&listing, None);
        assert_eq!(findings[0].rule, Rule::OverlongTitle);
        assert!(findings[0].recommendation.contains("201 characters"));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let mut listing = strong_listing();
        // 50 characters, 100 bytes.
        listing.title = "é".repeat(50);
        assert!(evaluate(&listing, None).is_empty());
    }

    #[test]
    fn few_bullets_reports_count_and_skips_word_check() {
        let mut listing = strong_listing();
        listing.bullets = vec!["short".into(), "tiny".into()];

        let findings = evaluate(&listing, None);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::FewBullets);
        assert!(findings[0].recommendation.contains("Only 2 bullet points"));
        assert_eq!(audit(&listing, None).listing_score, 90);
    }

    #[test]
    fn thin_bullets_cost_two_points_each_within_first_five() {
        let mut listing = strong_listing();
        listing.bullets = vec![
            words(8),
            words(3),
            words(7),
            words(6),
            words(9),
            words(1), // sixth bullet is never inspected
        ];

        let findings = evaluate(&listing, None);
        let rules: Vec<Rule> = findings.iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec![Rule::ThinBullet, Rule::ThinBullet]);
        assert!(findings[0].recommendation.starts_with("Bullet 2 "));
        assert!(findings[1].recommendation.starts_with("Bullet 4 "));
        assert_eq!(audit(&listing, None).listing_score, 96);
    }

    #[test]
    fn description_and_image_thresholds() {
        let mut listing = strong_listing();
        listing.description = "d".repeat(149);
        listing.images.truncate(2);

        let findings = evaluate(&listing, None);
        let rules: Vec<Rule> = findings.iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec![Rule::ShortDescription, Rule::FewImages]);
        assert!(findings[0].recommendation.contains("149 characters"));
        assert!(findings[1].recommendation.contains("Only 2 images"));

        listing.description = "d".repeat(150);
        listing.images.push("https://img.example.com/x.jpg".into());
        assert!(evaluate(&listing, None).is_empty());
    }

    #[test]
    fn sentiment_bands() {
        let listing = strong_listing();
        let rule_for = |value: f64| {
            evaluate(&listing, Some(SentimentScore::new(value)))
                .first()
                .map(|f| f.rule)
        };

        assert_eq!(rule_for(-0.21), Some(Rule::NegativeSentiment));
        assert_eq!(rule_for(-0.2), Some(Rule::MixedSentiment));
        assert_eq!(rule_for(0.19), Some(Rule::MixedSentiment));
        assert_eq!(rule_for(0.2), None);
        assert_eq!(audit(&listing, Some(SentimentScore::new(-0.9))).listing_score, 85);
    }

    #[test]
    fn worst_listing_is_clamped_to_zero() {
        let listing = ListingRecord {
            title: String::new(),
            bullets: vec![],
            description: String::new(),
            images: vec![],
        };
        let report = audit(&listing, Some(SentimentScore::new(-1.0)));

        // 25 + 20 + 25 + 20 + 15 = 105 points deducted.
        assert_eq!(report.listing_score, 0);
        assert_eq!(report.sentiment_summary, Some(SentimentLabel::Negative));
    }

    #[test]
    fn categories_keep_fixed_order() {
        let listing = ListingRecord {
            title: "short".into(),
            bullets: vec!["one".into()],
            description: "brief".into(),
            images: vec!["https://img.example.com/a.jpg".into()],
        };
        let rules: Vec<Rule> = evaluate(&listing, Some(SentimentScore::new(-0.5)))
            .into_iter()
            .map(|f| f.rule)
            .collect();

        assert_eq!(
            rules,
            vec![
                Rule::ShortTitle,
                Rule::FewBullets,
                Rule::ShortDescription,
                Rule::FewImages,
                Rule::NegativeSentiment,
            ]
        );
    }

    fn arb_listing() -> impl Strategy<Value = ListingRecord> {
        (
            ".{0,260}",
            prop::collection::vec("[a-z ]{0,60}", 0..8),
            ".{0,200}",
            prop::collection::vec("[a-z]{1,8}", 0..6),
        )
            .prop_map(|(title, bullets, description, images)| ListingRecord {
                title,
                bullets,
                description,
                images,
            })
    }

    proptest! {
        #[test]
        fn score_is_always_bounded(
            listing in arb_listing(),
            sentiment in prop::option::of(-1.0f64..=1.0),
        ) {
            let report = audit(&listing, sentiment.map(SentimentScore::new));
            prop_assert!(report.listing_score <= 100);
            prop_assert_eq!(
                report.recommendations.last().map(String::as_str),
                Some(GENERAL_RECOMMENDATION)
            );
        }

        #[test]
        fn scoring_is_idempotent(
            listing in arb_listing(),
            sentiment in prop::option::of(-1.0f64..=1.0),
        ) {
            let sentiment = sentiment.map(SentimentScore::new);
            prop_assert_eq!(audit(&listing, sentiment), audit(&listing, sentiment));
        }
    }
}
