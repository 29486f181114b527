//! Capability boundary towards the upstream review-hosting service.
//!
//! The engine only sees [`ForumSource`]; transports live behind it.

use crate::models::{Generation, RawRecord};

mod http;

pub use http::{HttpForumSource, HttpSourceConfig};

/// Result of one upstream call. `Unavailable` carries the reason for logs and
/// is never raised as an error past the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Records(Vec<RawRecord>),
    Unavailable(String),
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

pub trait ForumSource {
    fn generation(&self) -> Generation;

    /// Every note filed under one submission invitation.
    fn search_submissions(&self, invitation: &str) -> FetchOutcome;

    /// Title lookup; only the legacy generation serves it.
    fn search_by_title(&self, title: &str) -> FetchOutcome {
        let _ = title;
        FetchOutcome::Unavailable(format!(
            "{} generation does not support title search",
            self.generation()
        ))
    }

    /// Notes attached to a forum, optionally capped.
    fn get_forum_records(&self, forum_id: &str, limit: Option<usize>) -> FetchOutcome;
}
