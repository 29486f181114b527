use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;

use super::records::{DiscussionRecord, PaperRecord, ReviewRecord};

/// Scored pairing of a query against one candidate paper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub query_title: String,
    pub candidate: PaperRecord,
    pub title_score: f64,
    pub author_score: f64,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub title: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default = "default_true")]
    pub verify: bool,
    #[serde(default = "default_true")]
    pub include_meta_review: bool,
    #[serde(default)]
    pub include_discussions: bool,
}

const fn default_true() -> bool {
    true
}

impl ResolveRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            venue: None,
            year: None,
            authors: Vec::new(),
            verify: true,
            include_meta_review: true,
            include_discussions: false,
        }
    }

    #[must_use]
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub success: bool,
    pub query_title: String,
    pub paper: Option<PaperRecord>,
    pub reviews: Vec<ReviewRecord>,
    pub discussions: Vec<DiscussionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_match: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_match: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ResolutionResult {
    pub(crate) fn failure(query_title: &str, error: ErrorPayload) -> Self {
        Self {
            success: false,
            query_title: query_title.to_string(),
            paper: None,
            reviews: Vec::new(),
            discussions: Vec::new(),
            title_match: None,
            author_match: None,
            url: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub title_match: f64,
    pub author_match: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub found_authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ValidationResult {
    pub(crate) fn failure(error: ErrorPayload) -> Self {
        Self {
            valid: false,
            title_match: 0.0,
            author_match: 0.0,
            found_title: None,
            found_authors: Vec::new(),
            url: None,
            error: Some(error),
        }
    }
}

/// Reviews and discussion comments attached to one forum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForumThread {
    pub forum_id: String,
    pub reviews: Vec<ReviewRecord>,
    pub discussions: Vec<DiscussionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_request_defaults_to_verified_lookup_with_meta_reviews() {
        let request: ResolveRequest =
            serde_json::from_str(r#"{"title": "Attention Is All You Need"}"#).expect("parse");
        assert_eq!(request, ResolveRequest::new("Attention Is All You Need"));
        assert!(request.verify);
        assert!(request.include_meta_review);
        assert!(!request.include_discussions);
    }

    #[test]
    fn builder_sets_optional_hints() {
        let request = ResolveRequest::new("t")
            .with_venue("iclr")
            .with_year(2024)
            .with_authors(vec!["A".to_string()])
            .with_verify(false);
        assert_eq!(request.venue.as_deref(), Some("iclr"));
        assert_eq!(request.year, Some(2024));
        assert_eq!(request.authors, vec!["A".to_string()]);
        assert!(!request.verify);
    }
}
