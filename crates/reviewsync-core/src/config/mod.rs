//! Runtime configuration: built-in defaults, then an optional TOML file,
//! then `REVIEWSYNC_*` environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ReviewSyncError};
use crate::normalize::DEFAULT_SITE_BASE;
use crate::reconcile::DEFAULT_SEARCH_LIMIT;
use crate::similarity::{DEFAULT_MIN_AUTHOR_OVERLAP, DEFAULT_MIN_TITLE_SIMILARITY, MatchPolicy};
use crate::upstream::HttpSourceConfig;
use crate::venue::{DEFAULT_VENUE_TEMPLATES, DEFAULT_YEAR_SPAN, MAX_YEAR_SPAN, YEAR_PLACEHOLDER};

mod env;

use env::{parse_list, parse_non_empty, parse_ratio, parse_u64, parse_usize};

pub const ENV_API_BASE: &str = "REVIEWSYNC_API_BASE";
pub const ENV_LEGACY_API_BASE: &str = "REVIEWSYNC_LEGACY_API_BASE";
pub const ENV_SITE_BASE: &str = "REVIEWSYNC_SITE_BASE";
pub const ENV_API_TOKEN: &str = "REVIEWSYNC_API_TOKEN";
pub const ENV_TIMEOUT_MS: &str = "REVIEWSYNC_TIMEOUT_MS";
pub const ENV_PAGE_SIZE: &str = "REVIEWSYNC_PAGE_SIZE";
pub const ENV_MAX_PAGES: &str = "REVIEWSYNC_MAX_PAGES";
pub const ENV_VENUE_TEMPLATES: &str = "REVIEWSYNC_VENUE_TEMPLATES";
pub const ENV_YEAR_SPAN: &str = "REVIEWSYNC_YEAR_SPAN";
pub const ENV_SEARCH_LIMIT: &str = "REVIEWSYNC_SEARCH_LIMIT";
pub const ENV_MIN_TITLE_SIMILARITY: &str = "REVIEWSYNC_MIN_TITLE_SIMILARITY";
pub const ENV_MIN_AUTHOR_OVERLAP: &str = "REVIEWSYNC_MIN_AUTHOR_OVERLAP";

const DEFAULT_API_BASE: &str = "https://api2.openreview.net";
const DEFAULT_LEGACY_API_BASE: &str = "https://api.openreview.net";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_PAGE_SIZE: usize = 1000;
const DEFAULT_MAX_PAGES: usize = 50;
const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewSyncConfig {
    pub api_base: String,
    pub legacy_api_base: String,
    pub site_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub timeout_ms: u64,
    pub page_size: usize,
    pub max_pages: usize,
    pub venue_templates: Vec<String>,
    pub year_span: usize,
    pub search_limit: usize,
    pub min_title_similarity: f64,
    pub min_author_overlap: f64,
}

impl Default for ReviewSyncConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            legacy_api_base: DEFAULT_LEGACY_API_BASE.to_string(),
            site_base: DEFAULT_SITE_BASE.to_string(),
            api_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            venue_templates: DEFAULT_VENUE_TEMPLATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            year_span: DEFAULT_YEAR_SPAN,
            search_limit: DEFAULT_SEARCH_LIMIT,
            min_title_similarity: DEFAULT_MIN_TITLE_SIMILARITY,
            min_author_overlap: DEFAULT_MIN_AUTHOR_OVERLAP,
        }
    }
}

impl ReviewSyncConfig {
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Defaults, overlaid by `path` when given, overlaid by the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Self::parse_toml(&text)?
            }
            None => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())?
            .validated()
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse_toml(text)?.validated()
    }

    fn parse_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str::<Self>(text)?)
    }

    /// Applies `REVIEWSYNC_*` overrides looked up through `read`. Integer values
    /// that fail to parse or fall below their minimum keep the current value.
    pub fn with_overrides(mut self, read: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = parse_non_empty(read(ENV_API_BASE).as_deref()) {
            self.api_base = value;
        }
        if let Some(value) = parse_non_empty(read(ENV_LEGACY_API_BASE).as_deref()) {
            self.legacy_api_base = value;
        }
        if let Some(value) = parse_non_empty(read(ENV_SITE_BASE).as_deref()) {
            self.site_base = value;
        }
        if let Some(value) = parse_non_empty(read(ENV_API_TOKEN).as_deref()) {
            self.api_token = Some(value);
        }
        self.timeout_ms = parse_u64(read(ENV_TIMEOUT_MS).as_deref(), self.timeout_ms, 1);
        self.page_size = parse_usize(read(ENV_PAGE_SIZE).as_deref(), self.page_size, 1);
        self.max_pages = parse_usize(read(ENV_MAX_PAGES).as_deref(), self.max_pages, 1);
        if let Some(templates) = parse_list(read(ENV_VENUE_TEMPLATES).as_deref()) {
            self.venue_templates = templates;
        }
        self.year_span = parse_usize(read(ENV_YEAR_SPAN).as_deref(), self.year_span, 1);
        self.search_limit = parse_usize(read(ENV_SEARCH_LIMIT).as_deref(), self.search_limit, 1);
        if let Some(value) = parse_ratio(
            ENV_MIN_TITLE_SIMILARITY,
            read(ENV_MIN_TITLE_SIMILARITY).as_deref(),
        )? {
            self.min_title_similarity = value;
        }
        if let Some(value) = parse_ratio(
            ENV_MIN_AUTHOR_OVERLAP,
            read(ENV_MIN_AUTHOR_OVERLAP).as_deref(),
        )? {
            self.min_author_overlap = value;
        }
        Ok(self)
    }

    /// Checks invariants and normalizes base URLs.
    pub fn validated(mut self) -> Result<Self> {
        self.api_base = normalize_base_url("api_base", &self.api_base)?;
        self.legacy_api_base = normalize_base_url("legacy_api_base", &self.legacy_api_base)?;
        self.site_base = normalize_base_url("site_base", &self.site_base)?;
        self.api_token = self
            .api_token
            .as_deref()
            .and_then(|token| parse_non_empty(Some(token)));

        if self.timeout_ms == 0 {
            return Err(ReviewSyncError::ConfigInvalid(
                "timeout_ms must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("page_size", self.page_size),
            ("max_pages", self.max_pages),
            ("year_span", self.year_span),
            ("search_limit", self.search_limit),
        ] {
            if value == 0 {
                return Err(ReviewSyncError::ConfigInvalid(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        if self.year_span > MAX_YEAR_SPAN {
            return Err(ReviewSyncError::ConfigInvalid(format!(
                "year_span must be at most {MAX_YEAR_SPAN}, got {}",
                self.year_span
            )));
        }

        check_ratio("min_title_similarity", self.min_title_similarity)?;
        check_ratio("min_author_overlap", self.min_author_overlap)?;

        if self.venue_templates.is_empty() {
            return Err(ReviewSyncError::ConfigInvalid(
                "venue_templates must not be empty".to_string(),
            ));
        }
        if let Some(template) = self
            .venue_templates
            .iter()
            .find(|template| !template.contains(YEAR_PLACEHOLDER))
        {
            return Err(ReviewSyncError::ConfigInvalid(format!(
                "venue template '{template}' lacks {YEAR_PLACEHOLDER}"
            )));
        }
        Ok(self)
    }

    /// Copy safe to print.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            api_token: self.api_token.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn current_source(&self) -> HttpSourceConfig {
        self.source_config(&self.api_base)
    }

    #[must_use]
    pub fn legacy_source(&self) -> HttpSourceConfig {
        self.source_config(&self.legacy_api_base)
    }

    #[must_use]
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            min_title_similarity: self.min_title_similarity,
            min_author_overlap: self.min_author_overlap,
        }
    }

    fn source_config(&self, base_url: &str) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: base_url.to_string(),
            api_token: self.api_token.clone(),
            timeout_ms: self.timeout_ms,
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }
}

fn normalize_base_url(name: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ReviewSyncError::ConfigInvalid(format!(
            "{name} must be an http(s) URL: {raw}"
        )));
    }
    Ok(trimmed.to_string())
}

fn check_ratio(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ReviewSyncError::ConfigInvalid(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
