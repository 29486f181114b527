pub const YEAR_PLACEHOLDER: &str = "{year}";

pub const DEFAULT_VENUE_TEMPLATES: [&str; 3] = [
    "ICLR.cc/{year}/Conference",
    "NeurIPS.cc/{year}/Conference",
    "ICML.cc/{year}/Conference",
];

pub const DEFAULT_YEAR_SPAN: usize = 3;
pub const MAX_YEAR_SPAN: usize = 50;

/// Short conference names and the upstream organisation prefix they map to.
pub const KNOWN_VENUES: [(&str, &str); 11] = [
    ("neurips", "NeurIPS.cc"),
    ("nips", "NeurIPS.cc"),
    ("iclr", "ICLR.cc"),
    ("icml", "ICML.cc"),
    ("aaai", "AAAI.org"),
    ("cvpr", "CVPR"),
    ("eccv", "ECCV"),
    ("acl", "aclweb.org"),
    ("emnlp", "EMNLP"),
    ("naacl", "NAACL"),
    ("coling", "COLING"),
];

#[must_use]
pub fn known_venue_prefix(hint: &str) -> Option<&'static str> {
    let hint = hint.trim();
    KNOWN_VENUES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(hint))
        .map(|(_, prefix)| *prefix)
}

#[must_use]
pub fn submission_invitation(venue: &str) -> String {
    format!("{venue}/-/Submission")
}

/// Years to try, most recent first.
#[must_use]
pub fn candidate_years(year: Option<i32>, current_year: i32, span: usize) -> Vec<i32> {
    if let Some(year) = year {
        return vec![year];
    }
    let span = i32::try_from(span.clamp(1, MAX_YEAR_SPAN)).unwrap_or(1);
    (0..span).map(|back| current_year - back).collect()
}

/// Venue paths to try in order. An explicit path (anything containing `/`)
/// is used verbatim; a known short name expands per candidate year; otherwise the
/// configured templates are expanded for every candidate year.
#[must_use]
pub fn candidate_venues(
    venue: Option<&str>,
    year: Option<i32>,
    current_year: i32,
    templates: &[String],
    year_span: usize,
) -> Vec<String> {
    let years = candidate_years(year, current_year, year_span);
    let venue = venue.map(str::trim).filter(|value| !value.is_empty());

    match venue {
        Some(path) if path.contains('/') => vec![path.to_string()],
        Some(hint) => match known_venue_prefix(hint) {
            Some(prefix) => years
                .iter()
                .map(|year| format!("{prefix}/{year}/Conference"))
                .collect(),
            None => vec![hint.to_string()],
        },
        None => years
            .iter()
            .flat_map(|year| {
                templates
                    .iter()
                    .map(move |template| template.replace(YEAR_PLACEHOLDER, &year.to_string()))
            })
            .collect(),
    }
}
