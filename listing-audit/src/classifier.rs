//! Decides whether caller input names a marketplace item or a storefront page.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ItemId, ListingTarget};

lazy_static! {
    // Generic item-code shape; not checked against a live catalog.
    static ref ITEM_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{8,10}$").unwrap();
}

/// Outcome of classifying a caller-supplied string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Identifier(ItemId),
    StorefrontUrl(String),
    Invalid,
}

impl InputKind {
    pub fn into_target(self) -> Option<ListingTarget> {
        match self {
            Self::Identifier(id) => Some(ListingTarget::Item(id)),
            Self::StorefrontUrl(url) => Some(ListingTarget::Storefront(url)),
            Self::Invalid => None,
        }
    }
}

pub(crate) fn is_item_id(value: &str) -> bool {
    ITEM_ID_REGEX.is_match(value)
}

fn has_http_scheme(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Classifies trimmed input. The item-code shape is checked first, so it
/// wins over the URL check.
pub fn classify(input: &str) -> InputKind {
    let trimmed = input.trim();

    if let Some(id) = ItemId::parse(trimmed) {
        InputKind::Identifier(id)
    } else if has_http_scheme(trimmed) {
        InputKind::StorefrontUrl(trimmed.to_string())
    } else {
        InputKind::Invalid
    }
}
