use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const TITLE_STOPWORDS: [&str; 11] = [
    "a", "an", "the", "of", "for", "and", "or", "in", "on", "to", "with",
];

pub const DEFAULT_MIN_TITLE_SIMILARITY: f64 = 0.5;
pub const DEFAULT_MIN_AUTHOR_OVERLAP: f64 = 0.3;

/// Jaccard similarity of the lowercased, stopword-free whitespace tokens of two titles.
#[must_use]
pub fn title_similarity(left: &str, right: &str) -> f64 {
    jaccard(&title_tokens(left), &title_tokens(right))
}

/// Jaccard similarity of two lowercased author-name sets.
#[must_use]
pub fn author_overlap(left: &[String], right: &[String]) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    jaccard(&author_set(left), &author_set(right))
}

fn title_tokens(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .filter(|token| !TITLE_STOPWORDS.contains(token))
        .map(ToString::to_string)
        .collect()
}

fn author_set(authors: &[String]) -> HashSet<String> {
    authors.iter().map(|name| name.to_lowercase()).collect()
}

// Empty-vs-empty is a non-match.
fn jaccard(left: &HashSet<String>, right: &HashSet<String>) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(right).count();
    let union = left.union(right).count();
    intersection as f64 / union as f64
}

/// Thresholds deciding when a candidate counts as the same paper.
///
/// Neither constant is calibrated against labelled data; both are exposed
/// through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub min_title_similarity: f64,
    pub min_author_overlap: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_title_similarity: DEFAULT_MIN_TITLE_SIMILARITY,
            min_author_overlap: DEFAULT_MIN_AUTHOR_OVERLAP,
        }
    }
}

impl MatchPolicy {
    #[must_use]
    pub fn title_accepted(&self, title_score: f64) -> bool {
        title_score >= self.min_title_similarity
    }

    /// Either signal alone is sufficient; authors can confirm a paraphrased title.
    #[must_use]
    pub fn identity_confirmed(&self, title_score: f64, author_score: f64) -> bool {
        self.title_accepted(title_score) || author_score >= self.min_author_overlap
    }
}
