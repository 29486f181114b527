use crate::config::ReviewSyncConfig;
use crate::error::Result;
use crate::models::{
    ForumThread, Generation, ResolutionResult, ResolveRequest, ReviewRecord, ValidationResult,
};
use crate::normalize::Normalizer;
use crate::query::QueryEngine;
use crate::reconcile::Reconciler;
use crate::upstream::{ForumSource, HttpForumSource};

/// Entry point wiring configuration, both upstream generations, the query
/// engine and the reconciler.
pub struct ReviewSync {
    config: ReviewSyncConfig,
    reconciler: Reconciler,
}

impl std::fmt::Debug for ReviewSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSync")
            .field("api_base", &self.config.api_base)
            .field("legacy_api_base", &self.config.legacy_api_base)
            .finish_non_exhaustive()
    }
}

impl ReviewSync {
    pub fn new(config: ReviewSyncConfig) -> Result<Self> {
        let config = config.validated()?;
        let current = HttpForumSource::new(Generation::Current, config.current_source())?;
        let legacy = HttpForumSource::new(Generation::Legacy, config.legacy_source())?;
        Ok(Self::with_sources(config, Box::new(current), Box::new(legacy)))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ReviewSyncConfig::from_env()?)
    }

    /// Same wiring as [`ReviewSync::new`] over caller-supplied sources.
    #[must_use]
    pub fn with_sources(
        config: ReviewSyncConfig,
        current: Box<dyn ForumSource>,
        legacy: Box<dyn ForumSource>,
    ) -> Self {
        let engine = QueryEngine::new(current, legacy)
            .with_normalizer(Normalizer::new(config.site_base.as_str()))
            .with_venue_templates(config.venue_templates.clone())
            .with_year_span(config.year_span);
        let reconciler = Reconciler::new(engine)
            .with_policy(config.match_policy())
            .with_search_limit(config.search_limit);
        Self { config, reconciler }
    }

    pub const fn config(&self) -> &ReviewSyncConfig {
        &self.config
    }

    pub const fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn resolve_by_title(&self, request: &ResolveRequest) -> ResolutionResult {
        self.reconciler.resolve_by_title(request)
    }

    pub fn validate_identifier(
        &self,
        expected_title: &str,
        expected_authors: &[String],
        identifier: &str,
    ) -> ValidationResult {
        self.reconciler
            .validate_identifier(expected_title, expected_authors, identifier)
    }

    pub fn fetch_reviews(&self, identifier: &str, include_meta_review: bool) -> Vec<ReviewRecord> {
        self.reconciler.fetch_reviews(identifier, include_meta_review)
    }

    pub fn fetch_thread(&self, identifier: &str, include_meta_review: bool) -> ForumThread {
        self.reconciler.fetch_thread(identifier, include_meta_review)
    }
}
