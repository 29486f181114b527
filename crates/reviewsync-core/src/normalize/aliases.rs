use crate::models::{Generation, ReviewField};

pub(crate) const TITLE_KEYS: &[&str] = &["title"];
pub(crate) const AUTHORS_KEYS: &[&str] = &["authors"];
pub(crate) const ABSTRACT_KEYS: &[&str] = &["abstract"];
pub(crate) const DECISION_KEYS: &[&str] = &["decision"];
pub(crate) const COMMENT_KEYS: &[&str] = &["comment"];

/// Ordered content keys for one canonical review field. The first key that
/// carries a value wins.
#[must_use]
pub fn review_aliases(field: ReviewField, generation: Generation) -> &'static [&'static str] {
    match (field, generation) {
        (ReviewField::Rating, _) => &["rating", "recommendation"],
        (ReviewField::Confidence, _) => &["confidence"],
        (ReviewField::Summary, Generation::Current) => {
            &["summary", "summary_of_the_paper", "metareview"]
        }
        (ReviewField::Summary, Generation::Legacy) => &["review", "summary", "metareview"],
        (ReviewField::Strengths, Generation::Current) => {
            &["strengths", "strengths_and_contributions"]
        }
        (ReviewField::Strengths, Generation::Legacy) => &["strengths"],
        (ReviewField::Weaknesses, Generation::Current) => {
            &["weaknesses", "weaknesses_and_limitations"]
        }
        (ReviewField::Weaknesses, Generation::Legacy) => &["weaknesses"],
        (ReviewField::Questions, Generation::Current) => &["questions", "questions_for_authors"],
        (ReviewField::Questions, Generation::Legacy) => &["questions"],
        (ReviewField::Limitations, _) => &["limitations"],
        (ReviewField::Soundness, _) => &["soundness"],
        (ReviewField::Presentation, _) => &["presentation"],
        (ReviewField::Contribution, _) => &["contribution"],
        (ReviewField::Recommendation, _) => &["recommendation", "decision"],
    }
}
