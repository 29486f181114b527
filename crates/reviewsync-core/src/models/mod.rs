mod raw;
mod records;
mod resolution;

pub use raw::{CurrentNote, Generation, LegacyNote, RawRecord};
pub use records::{
    DiscussionRecord, PaperRecord, ReviewField, ReviewFields, ReviewRecord, UNKNOWN_LABEL,
};
pub use resolution::{
    ForumThread, MatchResult, ResolutionResult, ResolveRequest, ValidationResult,
};
