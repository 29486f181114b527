use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Upstream API generation a raw record was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    Current,
    Legacy,
}

impl Generation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note shape served by the current API: plural `invitations`, content values
/// wrapped as `{"value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentNote {
    pub id: String,
    #[serde(default)]
    pub forum: String,
    #[serde(default)]
    pub replyto: Option<String>,
    #[serde(default)]
    pub cdate: Option<i64>,
    #[serde(default)]
    pub invitations: Vec<String>,
    /// Older current-generation payloads still carry a singular invitation.
    #[serde(default)]
    pub invitation: Option<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub content: Map<String, Value>,
}

/// Note shape served by the legacy API: singular `invitation`, flat content values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyNote {
    pub id: String,
    #[serde(default)]
    pub forum: String,
    #[serde(default)]
    pub replyto: Option<String>,
    #[serde(default)]
    pub cdate: Option<i64>,
    #[serde(default)]
    pub invitation: Option<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub content: Map<String, Value>,
}

/// Generation-tagged raw record as produced by a [`crate::upstream::ForumSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Current(CurrentNote),
    Legacy(LegacyNote),
}

impl RawRecord {
    /// Decode one upstream note. Malformed notes are rejected here so that
    /// adapters can drop them without failing the surrounding page.
    pub fn from_value(generation: Generation, value: Value) -> Result<Self> {
        Ok(match generation {
            Generation::Current => Self::Current(serde_json::from_value(value)?),
            Generation::Legacy => Self::Legacy(serde_json::from_value(value)?),
        })
    }

    pub const fn generation(&self) -> Generation {
        match self {
            Self::Current(_) => Generation::Current,
            Self::Legacy(_) => Generation::Legacy,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Current(note) => &note.id,
            Self::Legacy(note) => &note.id,
        }
    }

    pub fn forum(&self) -> &str {
        match self {
            Self::Current(note) => &note.forum,
            Self::Legacy(note) => &note.forum,
        }
    }

    pub fn reply_to(&self) -> Option<&str> {
        match self {
            Self::Current(note) => note.replyto.as_deref(),
            Self::Legacy(note) => note.replyto.as_deref(),
        }
    }

    pub const fn created_at_ms(&self) -> Option<i64> {
        match self {
            Self::Current(note) => note.cdate,
            Self::Legacy(note) => note.cdate,
        }
    }

    /// Invitation paths in priority order.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            Self::Current(note) if !note.invitations.is_empty() => {
                note.invitations.iter().map(String::as_str).collect()
            }
            Self::Current(note) => note.invitation.as_deref().into_iter().collect(),
            Self::Legacy(note) => note.invitation.as_deref().into_iter().collect(),
        }
    }

    pub fn signatures(&self) -> &[String] {
        match self {
            Self::Current(note) => &note.signatures,
            Self::Legacy(note) => &note.signatures,
        }
    }

    pub const fn content(&self) -> &Map<String, Value> {
        match self {
            Self::Current(note) => &note.content,
            Self::Legacy(note) => &note.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn current_note_prefers_plural_invitations() {
        let raw = RawRecord::from_value(
            Generation::Current,
            json!({
                "id": "r1",
                "forum": "f1",
                "invitations": ["ICLR.cc/2024/Conference/Submission7/-/Official_Review"],
                "invitation": "ignored",
                "content": {}
            }),
        )
        .expect("decode");
        assert_eq!(
            raw.tags(),
            vec!["ICLR.cc/2024/Conference/Submission7/-/Official_Review"]
        );
    }

    #[test]
    fn current_note_falls_back_to_singular_invitation() {
        let raw = RawRecord::from_value(
            Generation::Current,
            json!({"id": "r1", "invitation": "X/-/Comment"}),
        )
        .expect("decode");
        assert_eq!(raw.tags(), vec!["X/-/Comment"]);
        assert_eq!(raw.forum(), "");
        assert!(raw.reply_to().is_none());
    }

    #[test]
    fn legacy_note_accepts_null_optional_fields() {
        let raw = RawRecord::from_value(
            Generation::Legacy,
            json!({
                "id": "n1",
                "forum": "f1",
                "replyto": null,
                "cdate": null,
                "invitation": "ICLR.cc/2019/Conference/-/Blind_Submission",
                "signatures": ["ICLR.cc/2019/Conference"],
                "content": {"title": "Plain"}
            }),
        )
        .expect("decode");
        assert_eq!(raw.generation(), Generation::Legacy);
        assert_eq!(raw.created_at_ms(), None);
        assert_eq!(raw.content()["title"], "Plain");
    }

    #[test]
    fn note_without_id_is_rejected() {
        let err = RawRecord::from_value(Generation::Current, json!({"forum": "f1"}))
            .expect_err("id is required");
        assert_eq!(err.code(), "JSON_ERROR");
    }
}
