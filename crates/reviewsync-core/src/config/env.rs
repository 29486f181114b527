use crate::error::{Result, ReviewSyncError};

#[must_use]
pub(super) fn parse_non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[must_use]
pub(super) fn parse_usize(raw: Option<&str>, default_value: usize, min_value: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

#[must_use]
pub(super) fn parse_u64(raw: Option<&str>, default_value: u64, min_value: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

/// Unlike the integer readers, a malformed ratio is an error.
pub(super) fn parse_ratio(name: &str, raw: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = parse_non_empty(raw) else {
        return Ok(None);
    };
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| ReviewSyncError::ConfigInvalid(format!("invalid {name}: {raw}")))
}

#[must_use]
pub(super) fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items = raw?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_parsers_fall_back_below_minimum_or_on_garbage() {
        assert_eq!(parse_usize(Some(" 7 "), 3, 1), 7);
        assert_eq!(parse_usize(Some("0"), 3, 1), 3);
        assert_eq!(parse_usize(Some("many"), 3, 1), 3);
        assert_eq!(parse_u64(None, 30_000, 1), 30_000);
    }

    #[test]
    fn ratio_parser_rejects_garbage() {
        assert_eq!(parse_ratio("X", Some("0.4")).expect("ratio"), Some(0.4));
        assert_eq!(parse_ratio("X", Some("  ")).expect("blank"), None);
        let err = parse_ratio("X", Some("high")).expect_err("garbage");
        assert_eq!(err.code(), "CONFIG_INVALID");
    }

    #[test]
    fn list_parser_drops_blank_items() {
        assert_eq!(
            parse_list(Some("A/{year}/Conference, ,B/{year}")),
            Some(vec!["A/{year}/Conference".to_string(), "B/{year}".to_string()])
        );
        assert_eq!(parse_list(Some(" , ")), None);
    }
}
