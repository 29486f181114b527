use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub forum_id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub venue: String,
    pub url: String,
    pub decision: Option<String>,
}

/// Canonical review fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewField {
    Rating,
    Confidence,
    Summary,
    Strengths,
    Weaknesses,
    Questions,
    Limitations,
    Soundness,
    Presentation,
    Contribution,
    Recommendation,
}

impl ReviewField {
    pub const ALL: [Self; 11] = [
        Self::Rating,
        Self::Confidence,
        Self::Summary,
        Self::Strengths,
        Self::Weaknesses,
        Self::Questions,
        Self::Limitations,
        Self::Soundness,
        Self::Presentation,
        Self::Contribution,
        Self::Recommendation,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Confidence => "confidence",
            Self::Summary => "summary",
            Self::Strengths => "strengths",
            Self::Weaknesses => "weaknesses",
            Self::Questions => "questions",
            Self::Limitations => "limitations",
            Self::Soundness => "soundness",
            Self::Presentation => "presentation",
            Self::Contribution => "contribution",
            Self::Recommendation => "recommendation",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFields {
    pub rating: Option<String>,
    pub confidence: Option<String>,
    pub summary: Option<String>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub questions: Option<String>,
    pub limitations: Option<String>,
    pub soundness: Option<String>,
    pub presentation: Option<String>,
    pub contribution: Option<String>,
    pub recommendation: Option<String>,
}

impl ReviewFields {
    pub fn get(&self, field: ReviewField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: ReviewField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    pub fn populated_count(&self) -> usize {
        ReviewField::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }

    const fn slot(&self, field: ReviewField) -> &Option<String> {
        match field {
            ReviewField::Rating => &self.rating,
            ReviewField::Confidence => &self.confidence,
            ReviewField::Summary => &self.summary,
            ReviewField::Strengths => &self.strengths,
            ReviewField::Weaknesses => &self.weaknesses,
            ReviewField::Questions => &self.questions,
            ReviewField::Limitations => &self.limitations,
            ReviewField::Soundness => &self.soundness,
            ReviewField::Presentation => &self.presentation,
            ReviewField::Contribution => &self.contribution,
            ReviewField::Recommendation => &self.recommendation,
        }
    }

    fn slot_mut(&mut self, field: ReviewField) -> &mut Option<String> {
        match field {
            ReviewField::Rating => &mut self.rating,
            ReviewField::Confidence => &mut self.confidence,
            ReviewField::Summary => &mut self.summary,
            ReviewField::Strengths => &mut self.strengths,
            ReviewField::Weaknesses => &mut self.weaknesses,
            ReviewField::Questions => &mut self.questions,
            ReviewField::Limitations => &mut self.limitations,
            ReviewField::Soundness => &mut self.soundness,
            ReviewField::Presentation => &mut self.presentation,
            ReviewField::Contribution => &mut self.contribution,
            ReviewField::Recommendation => &mut self.recommendation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_id: String,
    pub forum_id: String,
    /// Anonymized role label, e.g. `Reviewer_2` or `Area Chair`.
    pub reviewer: String,
    #[serde(flatten)]
    pub fields: ReviewFields,
    pub raw_content: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionRecord {
    pub comment_id: String,
    pub forum_id: String,
    pub author: String,
    pub content: String,
    pub reply_to: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
