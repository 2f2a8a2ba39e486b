//! Boolean environment values and typo suggestions
//!
//! Validation here is pure: an invalid value comes back as an
//! [`InvalidEnvValue`] and the caller decides how to report it.

use thiserror::Error;

/// Spellings accepted for boolean `SAVE_BACKUP_*` variables
pub const BOOL_VALUES: &[&str] = &["true", "false", "1", "0", "yes", "no", "on", "off"];

/// A `SAVE_BACKUP_*` variable held a value that could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid {var} value '{value}'{}; expected one of: {}",
    did_you_mean(.suggestion),
    BOOL_VALUES.join(", ")
)]
pub struct InvalidEnvValue {
    pub var: String,
    /// The raw value, lossily decoded if it was not UTF-8
    pub value: String,
    pub suggestion: Option<&'static str>,
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    suggestion
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Parse a boolean spelling from [`BOOL_VALUES`], ignoring case and
/// surrounding whitespace.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse the value of boolean variable `var`.
pub fn validate_bool(var: &str, value: &str) -> Result<bool, InvalidEnvValue> {
    parse_bool(value).ok_or_else(|| InvalidEnvValue {
        var: var.to_string(),
        value: value.to_string(),
        suggestion: closest(&value.trim().to_lowercase(), BOOL_VALUES, 2),
    })
}

/// Candidate within `max_distance` edits of `input`, nearest first; ties go
/// to the earlier candidate.
pub fn closest<'a>(input: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (levenshtein(input, candidate), candidate))
        .filter(|&(dist, _)| dist <= max_distance)
        .min_by_key(|&(dist, _)| dist)
        .map(|(_, candidate)| candidate)
}

/// Edit distance over bytes, single-row dynamic programming.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b = b.as_bytes();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ca) in a.as_bytes().iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}
