//! Maps generation-specific raw notes onto the canonical paper, review and
//! discussion shapes.
//!
//! Every entry point is pure. A note that cannot be mapped is dropped
//! (`None`) and logged at debug level; it never fails the surrounding batch.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{Result, ReviewSyncError};
use crate::models::{
    DiscussionRecord, PaperRecord, RawRecord, ReviewField, ReviewFields, ReviewRecord,
    UNKNOWN_LABEL,
};

mod aliases;

pub use aliases::review_aliases;

pub const DEFAULT_SITE_BASE: &str = "https://openreview.net";
pub const AREA_CHAIR_LABEL: &str = "Area Chair";
const VENUE_DELIMITER: &str = "/-/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    site_base: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_BASE)
    }
}

impl Normalizer {
    pub fn new(site_base: impl Into<String>) -> Self {
        let site_base = site_base.into();
        Self {
            site_base: site_base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn forum_url(&self, forum_id: &str) -> String {
        format!("{}/forum?id={forum_id}", self.site_base)
    }

    pub fn paper(&self, raw: &RawRecord) -> Option<PaperRecord> {
        skip_on_error(raw, "paper", self.try_paper(raw))
    }

    pub fn review(&self, raw: &RawRecord) -> Option<ReviewRecord> {
        skip_on_error(raw, "review", try_review(raw))
    }

    pub fn discussion(&self, raw: &RawRecord) -> Option<DiscussionRecord> {
        skip_on_error(raw, "discussion", try_discussion(raw))
    }

    fn try_paper(&self, raw: &RawRecord) -> Result<PaperRecord> {
        let content = raw.content();
        let forum_id = paper_identifier(raw)?;
        let title = match lookup(content, aliases::TITLE_KEYS) {
            Some(value) => expect_string(value, "title")?,
            None => UNKNOWN_LABEL.to_string(),
        };
        let authors = match lookup(content, aliases::AUTHORS_KEYS) {
            Some(value) => expect_string_list(value, "authors")?,
            None => Vec::new(),
        };
        let abstract_text = match lookup(content, aliases::ABSTRACT_KEYS) {
            Some(value) => expect_string(value, "abstract")?,
            None => String::new(),
        };
        let decision = lookup(content, aliases::DECISION_KEYS).map(scalar_text);

        Ok(PaperRecord {
            url: self.forum_url(&forum_id),
            forum_id,
            title,
            authors,
            abstract_text,
            venue: venue_from_tags(&raw.tags()),
            decision,
        })
    }
}

pub fn normalize_paper(raw: &RawRecord) -> Option<PaperRecord> {
    Normalizer::default().paper(raw)
}

pub fn normalize_review(raw: &RawRecord) -> Option<ReviewRecord> {
    Normalizer::default().review(raw)
}

pub fn normalize_discussion(raw: &RawRecord) -> Option<DiscussionRecord> {
    Normalizer::default().discussion(raw)
}

fn skip_on_error<T>(raw: &RawRecord, kind: &str, outcome: Result<T>) -> Option<T> {
    match outcome {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(
                id = raw.id(),
                generation = %raw.generation(),
                kind,
                error = %err,
                "dropping unmappable record"
            );
            None
        }
    }
}

fn try_review(raw: &RawRecord) -> Result<ReviewRecord> {
    let review_id = required(raw.id(), "id")?;
    let forum_id = required(raw.forum(), "forum")?;
    let content = raw.content();
    let generation = raw.generation();

    let mut fields = ReviewFields::default();
    for field in ReviewField::ALL {
        let value = lookup(content, review_aliases(field, generation)).map(scalar_text);
        fields.set(field, value);
    }

    Ok(ReviewRecord {
        review_id,
        forum_id,
        reviewer: reviewer_label(raw.signatures()),
        fields,
        raw_content: content.clone(),
    })
}

fn try_discussion(raw: &RawRecord) -> Result<DiscussionRecord> {
    let comment_id = required(raw.id(), "id")?;
    let forum_id = required(raw.forum(), "forum")?;
    let content = raw.content();
    let text = match lookup(content, aliases::COMMENT_KEYS) {
        Some(value) => scalar_text(value),
        None => serde_json::to_string(content)?,
    };

    Ok(DiscussionRecord {
        comment_id,
        forum_id,
        author: raw
            .signatures()
            .first()
            .map_or_else(|| UNKNOWN_LABEL.to_string(), |sig| trailing_segment(sig)),
        content: text,
        reply_to: raw.reply_to().map(ToString::to_string),
        created_at: raw.created_at_ms().and_then(DateTime::<Utc>::from_timestamp_millis),
    })
}

fn paper_identifier(raw: &RawRecord) -> Result<String> {
    if !raw.forum().trim().is_empty() {
        return Ok(raw.forum().to_string());
    }
    required(raw.id(), "forum")
}

fn required(value: &str, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ReviewSyncError::RecordParseSkipped(format!(
            "missing {field}"
        )));
    }
    Ok(value.to_string())
}

/// First alias carrying a value. `{"value": x}` wrappers are unwrapped; a
/// wrapper without `value`, or an explicit null, counts as absent.
fn lookup<'a>(content: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| content.get(*key))
        .filter_map(unwrap_value)
        .find(|value| !value.is_null())
}

fn unwrap_value(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(wrapper) => wrapper.get("value"),
        other => Some(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn expect_string(value: &Value, field: &str) -> Result<String> {
    value.as_str().map(ToString::to_string).ok_or_else(|| {
        ReviewSyncError::RecordParseSkipped(format!("{field} is not a string"))
    })
}

fn expect_string_list(value: &Value, field: &str) -> Result<Vec<String>> {
    let items = value.as_array().ok_or_else(|| {
        ReviewSyncError::RecordParseSkipped(format!("{field} is not a list"))
    })?;
    items
        .iter()
        .map(|item| expect_string(item, field))
        .collect()
}

/// Anonymized role label derived from the first signature.
#[must_use]
pub fn reviewer_label(signatures: &[String]) -> String {
    let Some(signature) = signatures.first() else {
        return UNKNOWN_LABEL.to_string();
    };
    if signature.contains("Reviewer") || signature.contains("AnonReviewer") {
        return trailing_segment(signature);
    }
    if signature.contains("Area_Chair") || signature.contains("AC") {
        return AREA_CHAIR_LABEL.to_string();
    }
    trailing_segment(signature)
}

/// Venue label: the first invitation path up to `/-/`.
#[must_use]
pub fn venue_from_tags(tags: &[&str]) -> String {
    let Some(path) = tags.first() else {
        return UNKNOWN_LABEL.to_string();
    };
    match path.split_once(VENUE_DELIMITER) {
        Some((venue, _)) => venue.to_string(),
        None => (*path).to_string(),
    }
}

fn trailing_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}
