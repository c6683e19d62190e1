//! Field-level parsing for the Silver stage
//!
//! Each function handles one raw column. Failure policy differs per field:
//! category/bib and time-shape problems degrade to placeholder values with a
//! warning, malformed ranks and non-numeric time segments are errors.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::{GENDER_MEN, GENDER_WOMEN, UNKNOWN};
use crate::pipeline::{PipelineError, PipelineResult};

/// Marker the timing export appends to every rank
pub const ORDINAL_MARKER: char = 'º';

/// Pace reported when it cannot be computed
pub const ZERO_PACE: &str = "0:00";

static CATEGORY_BIB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^({GENDER_MEN}|{GENDER_WOMEN})\s+(.+?)dorsal:\s*(\d+)$"
    ))
    .unwrap()
});

/// Result of splitting the glued `categoria_dorsal` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBib {
    pub gender: String,
    pub age_range: String,
    pub category: String,
    pub bib: Option<u32>,
}

impl CategoryBib {
    fn unknown(raw: &str) -> Self {
        Self {
            gender: UNKNOWN.to_string(),
            age_range: UNKNOWN.to_string(),
            category: raw.to_string(),
            bib: None,
        }
    }
}

/// Split `"Varones 30 a 39 añosdorsal: 2395"` into gender, age range,
/// category and bib.
///
/// Text that does not match keeps the raw value as its category and reports
/// [`UNKNOWN`] for gender and age range.
pub fn parse_category_bib(raw: &str) -> CategoryBib {
    let Some(caps) = CATEGORY_BIB_REGEX.captures(raw) else {
        warn!(value = raw, "Could not parse category/bib field");
        return CategoryBib::unknown(raw);
    };

    let bib = match caps[3].parse::<u32>() {
        Ok(bib) => bib,
        Err(_) => {
            warn!(value = raw, "Bib number out of range");
            return CategoryBib::unknown(raw);
        }
    };

    let gender = capitalize(&caps[1]);
    let age_range = caps[2].trim().to_string();
    let category = format!("{} {}", gender, age_range);

    CategoryBib {
        gender,
        age_range,
        category,
        bib: Some(bib),
    }
}

/// Strip the ordinal marker from a rank and parse the number.
///
/// A missing marker or a non-numeric remainder is a malformed-field error.
pub fn parse_rank(column: &str, row: usize, raw: &str) -> PipelineResult<u32> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix(ORDINAL_MARKER).ok_or_else(|| {
        PipelineError::malformed(column, row, raw, "missing ordinal marker")
    })?;

    digits
        .parse::<u32>()
        .map_err(|_| PipelineError::malformed(column, row, raw, "rank is not a whole number"))
}

/// Title-case a name: first letter of every whitespace-separated token upper
/// case, the rest lower case. Whitespace is kept as-is.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_token_start = true;

    for c in name.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_token_start = true;
        } else if at_token_start {
            out.extend(c.to_uppercase());
            at_token_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Convert `H:MM:SS` or `MM:SS` to total seconds.
///
/// Any other number of segments logs a warning and yields 0. Segments that
/// are not whole numbers are a malformed-field error.
pub fn time_to_seconds(column: &str, row: usize, raw: &str) -> PipelineResult<u32> {
    let parts: Vec<&str> = raw.trim().split(':').collect();

    let numbers = match parts.len() {
        2 | 3 => parts
            .iter()
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| PipelineError::malformed(column, row, raw, "time segment is not a number"))?,
        _ => {
            warn!(row, value = raw, "Unrecognized time format, using 0 seconds");
            return Ok(0);
        }
    };

    let total = match numbers.as_slice() {
        [hours, minutes, seconds] => hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes.checked_mul(60)?))
            .and_then(|t| t.checked_add(*seconds)),
        [minutes, seconds] => minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(*seconds)),
        _ => None,
    };

    total.ok_or_else(|| PipelineError::malformed(column, row, raw, "time is out of range"))
}

/// Pace per kilometre as `M:SS`.
///
/// Returns [`ZERO_PACE`] when either the time or the distance is not positive.
pub fn pace(seconds: u32, distance_km: f64) -> String {
    if seconds == 0 || distance_km <= 0.0 {
        return ZERO_PACE.to_string();
    }

    let seconds_per_km = f64::from(seconds) / distance_km;
    let minutes = (seconds_per_km / 60.0).floor() as u64;
    let remainder = (seconds_per_km % 60.0).floor() as u64;

    format!("{}:{:02}", minutes, remainder)
}

/// Average speed in km/h rounded to two decimals, `None` for a zero time.
pub fn speed(seconds: u32, distance_km: f64) -> Option<f64> {
    if seconds == 0 {
        return None;
    }
    Some(round2(distance_km / (f64::from(seconds) / 3600.0)))
}

/// Round to two decimal places, halves to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
