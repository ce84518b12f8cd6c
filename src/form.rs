use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_models::SearchRequest;
use crate::error::FormError;

/// The six inputs the search form tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Origin,
    Destination,
    DepartAfter,
    ArriveBefore,
    MaxLayovers,
    OptimizeFor,
}

impl FieldId {
    pub const ALL: [FieldId; 6] = [
        FieldId::Origin,
        FieldId::Destination,
        FieldId::DepartAfter,
        FieldId::ArriveBefore,
        FieldId::MaxLayovers,
        FieldId::OptimizeFor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Origin => "origin",
            FieldId::Destination => "destination",
            FieldId::DepartAfter => "depart_after",
            FieldId::ArriveBefore => "arrive_before",
            FieldId::MaxLayovers => "max_layovers",
            FieldId::OptimizeFor => "optimize_for",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Raw text of every form input, exactly as typed. All six must be
/// submitted; an empty input is sent as an empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FormState {
    pub origin: String,
    pub destination: String,
    pub depart_after: String,
    pub arrive_before: String,
    pub max_layovers: String,
    pub optimize_for: String,
}

// Seeds the page on first load only.
impl Default for FormState {
    fn default() -> Self {
        FormState {
            origin: "LON".to_string(),
            destination: "NYC".to_string(),
            depart_after: String::new(),
            arrive_before: String::new(),
            max_layovers: "2".to_string(),
            optimize_for: "balanced".to_string(),
        }
    }
}

impl FormState {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Origin => &self.origin,
            FieldId::Destination => &self.destination,
            FieldId::DepartAfter => &self.depart_after,
            FieldId::ArriveBefore => &self.arrive_before,
            FieldId::MaxLayovers => &self.max_layovers,
            FieldId::OptimizeFor => &self.optimize_for,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::Origin => &mut self.origin,
            FieldId::Destination => &mut self.destination,
            FieldId::DepartAfter => &mut self.depart_after,
            FieldId::ArriveBefore => &mut self.arrive_before,
            FieldId::MaxLayovers => &mut self.max_layovers,
            FieldId::OptimizeFor => &mut self.optimize_for,
        };
        *slot = value.into();
    }

    /// Builds the request from the current text. Strings are trimmed and the
    /// layover count is coerced, nothing is validated.
    pub fn build_request(&self) -> SearchRequest {
        SearchRequest {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            depart_after: self.depart_after.trim().to_string(),
            arrive_before: self.arrive_before.trim().to_string(),
            max_layovers: coerce_number(&self.max_layovers),
            optimize_for: self.optimize_for.trim().to_string(),
        }
    }
}

/// Text to number the way a browser `Number(..)` does it: blank is 0,
/// garbage is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    // Rust also accepts "inf" and "nan" spellings; those are not numbers here.
    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

// Accumulates into f64 so literals wider than 64 bits stay finite.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}
