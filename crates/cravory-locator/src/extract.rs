//! Coordinate extraction from map links and map page HTML.
//!
//! Rules are tried in priority order (`@lat,lng` marker, `q=`/`query=`,
//! `ll=`, `!3d..!4d..`, `center=..%2C..`, embedded `"center"` JSON, generic
//! number pair) and the first rule that yields a parseable pair wins.

use std::sync::LazyLock;

use cravory_core::Coordinate;
use regex::{Captures, Regex};

/// Signed decimal number as it appears in map URLs.
const NUM: &str = r"[-+]?\d+(?:\.\d+)?";

/// Which extraction rule produced a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    AtMarker,
    QueryParam,
    LatLngParam,
    DataPath,
    EncodedCenter,
    CenterJson,
    NumberPair,
}

impl ExtractionRule {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionRule::AtMarker => "at_marker",
            ExtractionRule::QueryParam => "query_param",
            ExtractionRule::LatLngParam => "ll_param",
            ExtractionRule::DataPath => "data_path",
            ExtractionRule::EncodedCenter => "encoded_center",
            ExtractionRule::CenterJson => "center_json",
            ExtractionRule::NumberPair => "number_pair",
        }
    }
}

impl std::fmt::Display for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct RuleEntry {
    rule: ExtractionRule,
    pattern: Regex,
    extract: fn(&Captures<'_>) -> Option<Coordinate>,
}

impl RuleEntry {
    fn new(rule: ExtractionRule, pattern: &str) -> Self {
        Self {
            rule,
            pattern: Regex::new(pattern).expect("valid regex"),
            extract: lat_lng_groups,
        }
    }
}

static RULES: LazyLock<Vec<RuleEntry>> = LazyLock::new(|| {
    vec![
        RuleEntry::new(ExtractionRule::AtMarker, &format!(r"@({NUM}),({NUM})")),
        RuleEntry::new(
            ExtractionRule::QueryParam,
            &format!(r"\b(?:q|query)=({NUM}),({NUM})"),
        ),
        RuleEntry::new(ExtractionRule::LatLngParam, &format!(r"\bll=({NUM}),({NUM})")),
        RuleEntry::new(ExtractionRule::DataPath, &format!(r"!3d({NUM})!4d({NUM})")),
        RuleEntry::new(
            ExtractionRule::EncodedCenter,
            &format!(r"\bcenter=({NUM})%2[cC]({NUM})"),
        ),
        RuleEntry::new(
            ExtractionRule::CenterJson,
            &format!(r#""center"\s*:\s*\{{\s*"lat"\s*:\s*({NUM})\s*,\s*"lng"\s*:\s*({NUM})"#),
        ),
        RuleEntry::new(
            ExtractionRule::NumberPair,
            r"([-+]?\d+\.\d+)(?:\s*,\s*|\s+)([-+]?\d+\.\d+)",
        ),
    ]
});

/// Parse capture groups 1 and 2 as latitude and longitude.
fn lat_lng_groups(caps: &Captures<'_>) -> Option<Coordinate> {
    let lat = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lng = caps.get(2)?.as_str().parse::<f64>().ok()?;
    if !(lat.is_finite() && lng.is_finite()) {
        return None;
    }
    Some(Coordinate::new(lat, lng))
}

/// Extract a coordinate from a map URL or an HTML document.
///
/// Never fails: a string without a recognizable pair yields `None`.
#[must_use]
pub fn extract_coordinate(text: &str) -> Option<Coordinate> {
    extract_coordinate_with_rule(text).map(|(coord, _)| coord)
}

/// Like [`extract_coordinate`], also reporting which rule matched.
///
/// A rule whose match does not parse is treated as a miss and the next rule
/// is tried.
#[must_use]
pub fn extract_coordinate_with_rule(text: &str) -> Option<(Coordinate, ExtractionRule)> {
    RULES.iter().find_map(|entry| {
        let caps = entry.pattern.captures(text)?;
        let coord = (entry.extract)(&caps)?;
        Some((coord, entry.rule))
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
