use serde::{Deserialize, Serialize};

/// Service-assigned patron identifier
pub type PatronId = i64;

/// A tracked patron as stored by the tally service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patron {
    /// Unique identifier (assigned by the service, never changes)
    pub id: PatronId,
    /// Display name
    pub name: String,
    /// Body mass in kilograms
    pub body_mass: f64,
    /// Estimated blood-alcohol saturation, conceptually in [0, 1]
    pub alcohol_saturation_level: f64,
}

impl Patron {
    /// Merge a partial update into this record
    pub fn apply_patch(&mut self, patch: &PatronPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(body_mass) = patch.body_mass {
            self.body_mass = body_mass;
        }
        if let Some(level) = patch.alcohol_saturation_level {
            self.alcohol_saturation_level = level;
        }
    }
}

/// Request body for creating a patron
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPatron {
    pub name: String,
    pub body_mass: f64,
    pub alcohol_saturation_level: f64,
}

impl NewPatron {
    /// Build a create request from raw form text.
    /// New patrons always start sober.
    pub fn from_form(name: &str, body_mass_text: &str) -> Self {
        NewPatron {
            name: name.to_string(),
            body_mass: coerce_body_mass(body_mass_text),
            alcohol_saturation_level: 0.0,
        }
    }
}

/// Partial patron record, merged field by field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatronPatch {
    pub name: Option<String>,
    pub body_mass: Option<f64>,
    pub alcohol_saturation_level: Option<f64>,
}

impl PatronPatch {
    /// Patch that only touches the saturation level
    pub fn saturation(level: f64) -> Self {
        PatronPatch {
            alcohol_saturation_level: Some(level),
            ..Default::default()
        }
    }
}

/// Body of the saturation level endpoint
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SaturationReading {
    pub alcohol_saturation_level: f64,
}

/// Suggested values for a new patron, as served by the tally service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatronDefaults {
    pub name: String,
    pub body_mass: f64,
    #[serde(default)]
    pub alcohol_saturation_level: f64,
}

/// Coerce free-form body mass text to a number.
///
/// Whitespace is ignored and empty text becomes 0. `0x`/`0o`/`0b` integer
/// literals are read in their radix, and `Infinity` (optionally signed) is the
/// only infinity spelling; `inf` and `nan` in any case do not count. Anything
/// else unparseable becomes NaN, which serde_json writes as `null`, as do the
/// infinities. No range checks.
pub fn coerce_body_mass(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // f64::from_str also takes "inf", "nan" and friends; keep to plain decimals
    let is_decimal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned `0x..`, `0o..` or `0b..` literal. None if `text` has no such prefix.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Format a numeric field the way the roster displays it (no trailing `.0`)
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{}", value)
    }
}
