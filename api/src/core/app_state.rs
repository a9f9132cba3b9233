use std::{sync::Arc, time::Duration};

use listing_audit::{ListingAuditor, ReviewPolicy};
use listing_scraper::{DEFAULT_MARKETPLACE_BASE, DEFAULT_USER_AGENT, ScraperConfig};
use thiserror::Error;

use crate::core::quota::AuditQuota;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_AUDIT_LIMIT: u32 = 3;
const DEFAULT_SCRAPER_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        reason: &'static str,
    },
}

/// Service configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address, e.g. "0.0.0.0:5000".
    pub api_address: String,
    /// Free audits per client identity for the lifetime of the process.
    pub audit_limit: u32,
    /// Take the client identity from proxy headers instead of the socket peer.
    pub trust_forwarded_for: bool,
    pub review_policy: ReviewPolicy,
    pub scraper: ScraperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_address: format!("0.0.0.0:{DEFAULT_PORT}"),
            audit_limit: DEFAULT_AUDIT_LIMIT,
            trust_forwarded_for: false,
            review_policy: ReviewPolicy::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_address = match env_opt("API_ADDRESS") {
            Some(addr) => addr,
            None => {
                let port = env_parse::<u16>("PORT", "expected a port number")?
                    .unwrap_or(DEFAULT_PORT);
                format!("0.0.0.0:{port}")
            }
        };

        let defaults = ReviewPolicy::default();
        let max_reviews = env_parse::<usize>("REVIEW_MAX", "expected a review count")?
            .unwrap_or(defaults.max_reviews);
        let max_pages = env_parse::<u32>("REVIEW_MAX_PAGES", "expected a page count")?
            .unwrap_or(defaults.max_pages);
        let delay = env_parse::<u64>("REVIEW_PAGE_DELAY_MS", "expected milliseconds")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.inter_page_delay);
        let jitter = env_parse::<u64>("REVIEW_PAGE_JITTER_MS", "expected milliseconds")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.inter_page_jitter);

        let mut review_policy = defaults
            .with_max_reviews(max_reviews)
            .with_max_pages(max_pages)
            .with_delay(delay, jitter);
        if let Some(secs) = env_parse::<u64>("REVIEW_DEADLINE_SECS", "expected seconds")? {
            review_policy = review_policy.with_deadline(Duration::from_secs(secs));
        }

        let scraper = ScraperConfig {
            marketplace_base: env_opt("MARKETPLACE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_MARKETPLACE_BASE.into()),
            timeout: Duration::from_secs(
                env_parse::<u64>("SCRAPER_TIMEOUT_SECS", "expected seconds")?
                    .unwrap_or(DEFAULT_SCRAPER_TIMEOUT_SECS),
            ),
            user_agent: env_opt("SCRAPER_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
        };

        Ok(Self {
            api_address,
            audit_limit: env_parse::<u32>("AUDIT_LIMIT_PER_CLIENT", "expected a count")?
                .unwrap_or(DEFAULT_AUDIT_LIMIT),
            trust_forwarded_for: env_flag("TRUST_FORWARDED_FOR")?,
            review_policy,
            scraper,
        })
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub config: AppConfig,
    /// Audit pipeline with its scraping and sentiment collaborators.
    pub auditor: ListingAuditor,
    /// Per-client audit counter.
    pub quota: AuditQuota,
}

impl AppState {
    pub fn new(config: AppConfig, auditor: ListingAuditor) -> Arc<Self> {
        let quota = AuditQuota::new(config.audit_limit);
        Arc::new(Self {
            config,
            auditor,
            quota,
        })
    }
}

/// Trimmed value of `name`, `None` if unset or blank.
fn env_opt(name: &'static str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Parses an optional value from env (`Ok(None)` if unset/blank).
fn env_parse<T: std::str::FromStr>(
    name: &'static str,
    reason: &'static str,
) -> Result<Option<T>, ConfigError> {
    match env_opt(name) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var: name, reason }),
        None => Ok(None),
    }
}

fn env_flag(name: &'static str) -> Result<bool, ConfigError> {
    match env_opt(name).map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("0" | "false" | "no" | "off") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some(_) => Err(ConfigError::InvalidValue {
            var: name,
            reason: "expected true or false",
        }),
    }
}
