//! Top-level reconciliation workflows.
//!
//! Public operations are total: every failure is folded into the returned
//! result together with enough context to retry with better hints.

use crate::error::ReviewSyncError;
use crate::models::{
    ForumThread, MatchResult, PaperRecord, ResolutionResult, ResolveRequest, ReviewRecord,
    ValidationResult,
};
use crate::query::QueryEngine;
use crate::similarity::{MatchPolicy, author_overlap, title_similarity};

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

#[derive(Debug)]
pub struct Reconciler {
    engine: QueryEngine,
    policy: MatchPolicy,
    search_limit: usize,
}

impl Reconciler {
    pub fn new(engine: QueryEngine) -> Self {
        Self {
            engine,
            policy: MatchPolicy::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit.max(1);
        self
    }

    pub const fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub const fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn resolve_by_title(&self, request: &ResolveRequest) -> ResolutionResult {
        let title = request.title.as_str();
        let candidates = self.engine.search_papers(
            title,
            request.venue.as_deref(),
            request.year,
            self.search_limit,
        );

        let Some(best) = best_match(title, &request.authors, candidates, &self.policy) else {
            tracing::info!(title, "no candidates found");
            let err = ReviewSyncError::NotFound("no papers found matching the title".to_string());
            return ResolutionResult::failure(title, err.to_payload("resolve_by_title"));
        };

        let author_match = (!request.authors.is_empty()).then_some(best.author_score);
        if request.verify && !best.valid {
            tracing::info!(
                title,
                best_title = %best.candidate.title,
                score = best.title_score,
                "best candidate below title threshold"
            );
            let err = ReviewSyncError::LowConfidenceMatch {
                title: best.candidate.title.clone(),
                score: best.title_score,
            };
            let mut result = ResolutionResult::failure(title, err.to_payload("resolve_by_title"));
            result.title_match = Some(best.title_score);
            result.author_match = author_match;
            result.url = Some(best.candidate.url.clone());
            result.paper = Some(best.candidate);
            return result;
        }

        let paper = best.candidate;
        let reviews = self
            .engine
            .fetch_reviews(&paper.forum_id, request.include_meta_review);
        let discussions = if request.include_discussions {
            self.engine.fetch_discussions(&paper.forum_id)
        } else {
            Vec::new()
        };
        tracing::info!(
            title,
            forum_id = %paper.forum_id,
            score = best.title_score,
            reviews = reviews.len(),
            "resolved paper"
        );

        ResolutionResult {
            success: true,
            query_title: title.to_string(),
            url: Some(paper.url.clone()),
            paper: Some(paper),
            reviews,
            discussions,
            title_match: Some(best.title_score),
            author_match,
            error: None,
        }
    }

    /// Checks that `identifier` names the expected paper. Title or authors
    /// alone can confirm it.
    pub fn validate_identifier(
        &self,
        expected_title: &str,
        expected_authors: &[String],
        identifier: &str,
    ) -> ValidationResult {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            let err = ReviewSyncError::MalformedIdentifier("identifier is empty".to_string());
            return ValidationResult::failure(err.to_payload("validate_identifier"));
        }

        let raw = match self.engine.fetch_submission(identifier) {
            Ok(raw) => raw,
            Err(err) => return ValidationResult::failure(err.to_payload("validate_identifier")),
        };
        let Some(paper) = self.engine.normalizer().paper(&raw) else {
            let err = ReviewSyncError::MalformedIdentifier(format!(
                "forum '{identifier}' does not hold a readable submission"
            ));
            return ValidationResult::failure(err.to_payload("validate_identifier"));
        };

        let title_match = title_similarity(expected_title, &paper.title);
        let author_match = author_overlap(expected_authors, &paper.authors);
        ValidationResult {
            valid: self.policy.identity_confirmed(title_match, author_match),
            title_match,
            author_match,
            found_title: Some(paper.title),
            found_authors: paper.authors,
            url: Some(paper.url),
            error: None,
        }
    }

    pub fn fetch_reviews(&self, identifier: &str, include_meta_review: bool) -> Vec<ReviewRecord> {
        self.engine
            .fetch_reviews(identifier.trim(), include_meta_review)
    }

    /// Reviews and discussions of a forum, fetched independently of each other.
    pub fn fetch_thread(&self, identifier: &str, include_meta_review: bool) -> ForumThread {
        let forum_id = identifier.trim();
        ForumThread {
            forum_id: forum_id.to_string(),
            reviews: self.engine.fetch_reviews(forum_id, include_meta_review),
            discussions: self.engine.fetch_discussions(forum_id),
        }
    }
}

/// Highest title score wins; ties keep the earlier candidate.
#[must_use]
pub fn best_match(
    query_title: &str,
    query_authors: &[String],
    candidates: Vec<PaperRecord>,
    policy: &MatchPolicy,
) -> Option<MatchResult> {
    let mut best: Option<(PaperRecord, f64)> = None;
    for candidate in candidates {
        let score = title_similarity(query_title, &candidate.title);
        let improves = best.as_ref().is_none_or(|(_, best_score)| score > *best_score);
        if improves {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, title_score)| {
        let author_score = author_overlap(query_authors, &candidate.authors);
        MatchResult {
            query_title: query_title.to_string(),
            valid: policy.title_accepted(title_score),
            candidate,
            title_score,
            author_score,
        }
    })
}
