// Public fallible APIs in this crate share one concrete error contract (`ReviewSyncError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod query;
pub mod reconcile;
pub mod reference;
pub mod similarity;
pub mod upstream;
pub mod venue;

#[cfg(test)]
mod test_support;

pub use client::ReviewSync;
pub use config::ReviewSyncConfig;
pub use error::{ErrorPayload, Result, ReviewSyncError};
pub use models::{
    DiscussionRecord, ForumThread, Generation, MatchResult, PaperRecord, RawRecord,
    ResolutionResult, ResolveRequest, ReviewRecord, ValidationResult,
};
pub use reference::extract_identifier_from_reference;
pub use similarity::{MatchPolicy, author_overlap, title_similarity};
