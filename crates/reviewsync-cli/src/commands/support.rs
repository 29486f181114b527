use std::io::{self, Write};

use anyhow::{Result, anyhow};
use reviewsync_core::ErrorPayload;
use reviewsync_core::extract_identifier_from_reference;

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Accepts a bare identifier, a forum URL, or citation text carrying one.
pub(super) fn forum_identifier(reference: &str) -> Result<String> {
    extract_identifier_from_reference(reference)
        .ok_or_else(|| anyhow!("no forum identifier found in '{}'", reference.trim()))
}

pub(super) fn failure_reason(operation: &str, error: Option<&ErrorPayload>) -> anyhow::Error {
    match error {
        Some(payload) => anyhow!("{operation} failed [{}]: {}", payload.code, payload.message),
        None => anyhow!("{operation} failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forum_identifier_accepts_urls_and_bare_ids() {
        assert_eq!(
            forum_identifier("https://openreview.net/forum?id=abc-1").expect("url"),
            "abc-1"
        );
        assert_eq!(forum_identifier(" abc-1 ").expect("bare"), "abc-1");
        let err = forum_identifier("https://example.org/p/1").expect_err("no id");
        assert!(err.to_string().contains("example.org"));
    }

    #[test]
    fn failure_reason_carries_error_code() {
        let payload = ErrorPayload {
            code: "NOT_FOUND".to_string(),
            message: "not found: nothing".to_string(),
            operation: "resolve_by_title".to_string(),
            details: None,
        };
        let err = failure_reason("resolve", Some(&payload));
        assert_eq!(err.to_string(), "resolve failed [NOT_FOUND]: not found: nothing");
        assert_eq!(failure_reason("validate", None).to_string(), "validate failed");
    }
}
