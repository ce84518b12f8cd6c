use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Shown wherever a plan metric is missing.
pub const PLACEHOLDER: &str = "—";

/// Body sent to `POST /api/search`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub depart_after: String,
    pub arrive_before: String,
    #[serde(serialize_with = "serialize_layovers")]
    pub max_layovers: f64,
    pub optimize_for: String,
}

impl SearchRequest {
    pub fn has_valid_layovers(&self) -> bool {
        self.max_layovers.is_finite()
    }
}

// Whole numbers go out as integers so `2` stays `2` in the preview and on the
// wire. NaN and infinities become `null`.
fn serialize_layovers<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// A JSON scalar as the planner sent it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Zero, empty text and `false` count as "not there".
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => match n.as_f64() {
                // Whole floats print without a trailing `.0`, so 160.0 reads 160.
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{n}"),
            },
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlanMetrics {
    #[serde(default, deserialize_with = "lenient")]
    pub total_price_gbp: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_duration_minutes: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_emissions_kg: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub risk_score: Option<Scalar>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Leg {
    #[serde(default, deserialize_with = "lenient")]
    pub origin: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub destination: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub provider: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub mode: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration_minutes: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub depart_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub arrive_at: Option<String>,
}

impl Leg {
    pub fn origin_or_default(&self) -> String {
        display_or(self.origin.as_ref(), "?")
    }

    pub fn destination_or_default(&self) -> String {
        display_or(self.destination.as_ref(), "?")
    }

    pub fn provider_or_default(&self) -> String {
        display_or(self.provider.as_ref(), "provider")
    }

    pub fn mode_or_default(&self) -> String {
        display_or(self.mode.as_ref(), "")
    }

    /// `None` when the duration is absent or zero.
    pub fn minutes(&self) -> Option<&Scalar> {
        self.duration_minutes.as_ref().filter(|d| d.is_truthy())
    }

    /// Text inside the parentheses, e.g. `BA, flight, 480m`.
    pub fn detail(&self) -> String {
        let mut detail = format!("{}, {}", self.provider_or_default(), self.mode_or_default());
        if let Some(mins) = self.minutes() {
            detail.push_str(&format!(", {mins}m"));
        }
        detail
    }

    /// One-line description, e.g. `LHR → JFK (BA, flight, 480m)`.
    pub fn summary(&self) -> String {
        format!(
            "{} → {} ({})",
            self.origin_or_default(),
            self.destination_or_default(),
            self.detail()
        )
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Plan {
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub metrics: Option<PlanMetrics>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub legs: Vec<Leg>,
    #[serde(default, deserialize_with = "lenient")]
    pub explanation: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub layovers: Option<Scalar>,
}

impl Plan {
    pub fn score_text(&self) -> String {
        display_or_placeholder(self.score.as_ref())
    }

    pub fn price_text(&self) -> String {
        display_or_placeholder(self.metric(|m| m.total_price_gbp.as_ref()))
    }

    pub fn duration_text(&self) -> String {
        display_or_placeholder(self.metric(|m| m.total_duration_minutes.as_ref()))
    }

    pub fn emissions_text(&self) -> String {
        display_or_placeholder(self.metric(|m| m.total_emissions_kg.as_ref()))
    }

    pub fn risk_text(&self) -> String {
        display_or_placeholder(self.metric(|m| m.risk_score.as_ref()))
    }

    /// The explanation, only when present and truthy.
    pub fn explanation(&self) -> Option<String> {
        self.explanation
            .as_ref()
            .filter(|e| e.is_truthy())
            .map(|e| e.to_string())
    }

    fn metric<'a>(&'a self, pick: impl Fn(&'a PlanMetrics) -> Option<&'a Scalar>) -> Option<&'a Scalar> {
        self.metrics.as_ref().and_then(pick)
    }
}

fn display_or_placeholder(value: Option<&Scalar>) -> String {
    display_or(value, PLACEHOLDER)
}

fn display_or(value: Option<&Scalar>, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_string(), |v| v.to_string())
}

/// What the planner answered. Anything that is not an object with a `plans`
/// array reads as "no plans".
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub plans: Vec<Plan>,
}

impl SearchResponse {
    pub fn from_value(value: Value) -> SearchResponse {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Reads a field of the wrong JSON type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Non-arrays become empty; elements that don't fit become `T::default()`.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
