//! Generation-fallback query engine.
//!
//! Every operation asks the current generation first and the legacy
//! generation second. The first generation that yields usable records wins;
//! a generation that errors and one that answers with nothing are treated
//! alike.

use chrono::{Datelike, Utc};

use crate::error::{Result, ReviewSyncError};
use crate::models::{DiscussionRecord, Generation, PaperRecord, RawRecord, ReviewRecord};
use crate::normalize::Normalizer;
use crate::upstream::{FetchOutcome, ForumSource};
use crate::venue::{
    DEFAULT_VENUE_TEMPLATES, DEFAULT_YEAR_SPAN, candidate_venues, submission_invitation,
};

/// Raw notes of one forum, split by kind. Each side was fetched on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForumRecords {
    pub reviews: Vec<RawRecord>,
    pub discussions: Vec<RawRecord>,
}

pub struct QueryEngine {
    current: Box<dyn ForumSource>,
    legacy: Box<dyn ForumSource>,
    normalizer: Normalizer,
    venue_templates: Vec<String>,
    year_span: usize,
    current_year: i32,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("venue_templates", &self.venue_templates)
            .field("year_span", &self.year_span)
            .field("current_year", &self.current_year)
            .finish_non_exhaustive()
    }
}

impl QueryEngine {
    pub fn new(current: Box<dyn ForumSource>, legacy: Box<dyn ForumSource>) -> Self {
        Self {
            current,
            legacy,
            normalizer: Normalizer::default(),
            venue_templates: DEFAULT_VENUE_TEMPLATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            year_span: DEFAULT_YEAR_SPAN,
            current_year: Utc::now().year(),
        }
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_venue_templates(mut self, templates: Vec<String>) -> Self {
        self.venue_templates = templates;
        self
    }

    #[must_use]
    pub fn with_year_span(mut self, year_span: usize) -> Self {
        self.year_span = year_span;
        self
    }

    #[must_use]
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Candidate submission notes for a title, at most `limit`.
    pub fn search(
        &self,
        title: &str,
        venue: Option<&str>,
        year: Option<i32>,
        limit: usize,
    ) -> Vec<RawRecord> {
        let outcome = self.with_fallback(
            "search",
            |source| match source.generation() {
                Generation::Current => self.scan_submissions(source, title, venue, year),
                Generation::Legacy => source.search_by_title(title),
            },
            |records| {
                records
                    .into_iter()
                    .filter(|raw| self.normalizer.paper(raw).is_some())
                    .collect()
            },
        );
        let mut records = outcome.unwrap_or_default();
        records.truncate(limit);
        records
    }

    pub fn search_papers(
        &self,
        title: &str,
        venue: Option<&str>,
        year: Option<i32>,
        limit: usize,
    ) -> Vec<PaperRecord> {
        self.search(title, venue, year, limit)
            .iter()
            .filter_map(|raw| self.normalizer.paper(raw))
            .collect()
    }

    pub fn fetch_by_forum(&self, forum_id: &str, include_meta_review: bool) -> ForumRecords {
        ForumRecords {
            reviews: self.review_notes(forum_id, include_meta_review),
            discussions: self.discussion_notes(forum_id, include_meta_review),
        }
    }

    pub fn fetch_reviews(&self, forum_id: &str, include_meta_review: bool) -> Vec<ReviewRecord> {
        self.review_notes(forum_id, include_meta_review)
            .iter()
            .filter_map(|raw| self.normalizer.review(raw))
            .collect()
    }

    pub fn fetch_discussions(&self, forum_id: &str) -> Vec<DiscussionRecord> {
        self.discussion_notes(forum_id, true)
            .iter()
            .filter_map(|raw| self.normalizer.discussion(raw))
            .collect()
    }

    /// The leading note of a forum. Unlike the other lookups this keeps the
    /// difference between "nothing there" and "nobody answered".
    pub fn fetch_submission(&self, forum_id: &str) -> Result<RawRecord> {
        let records = self
            .with_fallback(
                "fetch_submission",
                |source| source.get_forum_records(forum_id, Some(1)),
                |records| records,
            )
            .map_err(ReviewSyncError::UpstreamUnavailable)?;
        records.into_iter().next().ok_or_else(|| {
            ReviewSyncError::MalformedIdentifier(format!("forum '{forum_id}' returned no records"))
        })
    }

    fn review_notes(&self, forum_id: &str, include_meta_review: bool) -> Vec<RawRecord> {
        self.with_fallback(
            "fetch_reviews",
            |source| source.get_forum_records(forum_id, None),
            |records| {
                records
                    .into_iter()
                    .filter(|raw| is_review(raw, include_meta_review))
                    .filter(|raw| self.normalizer.review(raw).is_some())
                    .collect()
            },
        )
        .unwrap_or_default()
    }

    fn discussion_notes(&self, forum_id: &str, include_meta_review: bool) -> Vec<RawRecord> {
        self.with_fallback(
            "fetch_discussions",
            |source| source.get_forum_records(forum_id, None),
            |records| {
                records
                    .into_iter()
                    .filter(|raw| is_discussion(raw, include_meta_review))
                    .filter(|raw| self.normalizer.discussion(raw).is_some())
                    .collect()
            },
        )
        .unwrap_or_default()
    }

    /// Scans venue invitations in order and filters locally by title; the
    /// current generation cannot match free-text titles itself.
    fn scan_submissions(
        &self,
        source: &dyn ForumSource,
        title: &str,
        venue: Option<&str>,
        year: Option<i32>,
    ) -> FetchOutcome {
        let needle = title.trim().to_lowercase();
        let venues = candidate_venues(
            venue,
            year,
            self.current_year,
            &self.venue_templates,
            self.year_span,
        );

        let mut last_failure = None;
        let mut failures = 0usize;
        for venue in &venues {
            let invitation = submission_invitation(venue);
            match source.search_submissions(&invitation) {
                FetchOutcome::Records(records) => {
                    let hits = records
                        .into_iter()
                        .filter(|raw| self.title_contains(raw, &needle))
                        .collect::<Vec<_>>();
                    tracing::debug!(invitation = %invitation, hits = hits.len(), "scanned venue");
                    if !hits.is_empty() {
                        return FetchOutcome::Records(hits);
                    }
                }
                FetchOutcome::Unavailable(reason) => {
                    tracing::debug!(invitation = %invitation, reason = %reason, "venue scan failed");
                    failures += 1;
                    last_failure = Some(reason);
                }
            }
        }

        match last_failure {
            Some(reason) if failures == venues.len() => FetchOutcome::Unavailable(format!(
                "all {failures} venue scans failed; last: {reason}"
            )),
            _ => FetchOutcome::Records(Vec::new()),
        }
    }

    fn title_contains(&self, raw: &RawRecord, needle: &str) -> bool {
        self.normalizer
            .paper(raw)
            .is_some_and(|paper| paper.title.to_lowercase().contains(needle))
    }

    /// Runs `call` per generation in priority order and returns the first
    /// non-empty `keep` result. `Err` only when both generations were
    /// unavailable.
    fn with_fallback<T>(
        &self,
        operation: &str,
        call: impl Fn(&dyn ForumSource) -> FetchOutcome,
        keep: impl Fn(Vec<RawRecord>) -> Vec<T>,
    ) -> std::result::Result<Vec<T>, String> {
        let mut failures = Vec::<String>::new();
        for source in [self.current.as_ref(), self.legacy.as_ref()] {
            let generation = source.generation();
            match call(source) {
                FetchOutcome::Records(records) => {
                    let kept = keep(records);
                    if !kept.is_empty() {
                        return Ok(kept);
                    }
                    tracing::debug!(%generation, operation, "generation returned no usable records");
                }
                FetchOutcome::Unavailable(reason) => {
                    tracing::warn!(%generation, operation, reason = %reason, "generation unavailable");
                    failures.push(format!("{generation}: {reason}"));
                }
            }
        }

        if failures.len() == 2 {
            Err(failures.join("; "))
        } else {
            Ok(Vec::new())
        }
    }
}

/// Review classification over invitation tags. The legacy generation names
/// reviews loosely, so any tag mentioning "review" qualifies there.
#[must_use]
pub fn is_review(raw: &RawRecord, include_meta_review: bool) -> bool {
    let generation = raw.generation();
    raw.tags().iter().any(|tag| {
        let tag = tag.to_lowercase();
        let review = match generation {
            Generation::Current => tag.contains("official_review"),
            Generation::Legacy => tag.contains("review"),
        };
        review || (include_meta_review && (tag.contains("meta_review") || tag.contains("decision")))
    })
}

#[must_use]
pub fn is_discussion(raw: &RawRecord, include_meta_review: bool) -> bool {
    if is_review(raw, include_meta_review) {
        return false;
    }
    raw.tags().iter().any(|tag| {
        let tag = tag.to_lowercase();
        tag.contains("comment") || tag.contains("discussion") || tag.contains("rebuttal")
    })
}
