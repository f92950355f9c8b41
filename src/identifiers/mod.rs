//! # Minor-planet identifier classification
//!
//! Turn a loosely formatted identifier (number, name, provisional designation, survey
//! designation, comet designation) into a [`NormalizedIdentifier`]: a canonical string
//! plus an [`IdentifierKind`] tag.
//!
//! ## Overview
//! -----------------
//! Classification is a **pure, total** function: it never consults the local index or
//! the network and never fails. Input that matches no rule is tagged
//! [`IdentifierKind::Unrecognized`] and kept as-is, so exotic names with punctuation can
//! still be looked up verbatim later on.
//!
//! The string rules are applied in a fixed order, first match wins (see [`rules`]):
//!
//! 1. digits only → [`IdentifierKind::Number`]
//! 2. letters only → [`IdentifierKind::Name`] (`"ceres"` → `"Ceres"`)
//! 3. provisional designation → [`IdentifierKind::Designation`] (`"2014_yc62"` → `"2014 YC62"`,
//!    `"A898 pa"` → `"1898 PA"`)
//! 4. Palomar–Leiden / Trojan survey → [`IdentifierKind::SurveyDesignation`] (`"2040_P-L"` → `"2040 P-L"`)
//! 5. comet prefix → [`IdentifierKind::Comet`] (passed through)
//!
//! ## Malformed input
//! -----------------
//! A structurally invalid identifier ([`Identifier::Malformed`]), a negative integer or a
//! non-finite float cannot name a body. They classify as `Unrecognized` with an empty
//! canonical string, which [`NormalizedIdentifier::is_malformed`] reports so the resolver
//! can short-circuit them without any lookup.
//!
//! ## Example
//! -----------------
//! ```rust
//! use rocks::identifiers::{classify, IdentifierKind};
//!
//! let id = classify("2014yc62");
//! assert_eq!(id.canonical(), "2014 YC62");
//! assert_eq!(id.kind(), IdentifierKind::Designation);
//!
//! let id = classify(4.0_f64);
//! assert_eq!(id.canonical(), "4");
//! assert_eq!(id.kind(), IdentifierKind::Number);
//! ```
pub mod rules;

use std::fmt;

use crate::constants::AsteroidNumber;
use rules::CLASSIFICATION_RULES;

/// Raw user-supplied identifier.
///
/// No canonical form is assumed: numbers may arrive as floats (e.g. read from a
/// spreadsheet column), names in any case, designations with any separator.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    /// Integer-like input
    Int(i64),
    /// Floating-point-like input
    Float(f64),
    /// Free-text input
    Text(String),
    /// Input that is neither a number nor a string (e.g. a JSON `null` or array)
    Malformed,
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Int(n)
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        Identifier::Int(n.into())
    }
}

impl From<u32> for Identifier {
    fn from(n: u32) -> Self {
        Identifier::Int(n.into())
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        i64::try_from(n)
            .map(Identifier::Int)
            .unwrap_or(Identifier::Malformed)
    }
}

impl From<f64> for Identifier {
    fn from(x: f64) -> Self {
        Identifier::Float(x)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

impl From<&String> for Identifier {
    fn from(s: &String) -> Self {
        Identifier::Text(s.clone())
    }
}

impl From<serde_json::Value> for Identifier {
    /// Map a JSON value onto an identifier.
    /// - integers → `Int`, other numbers → `Float`, strings → `Text`
    /// - `null`, booleans, arrays and objects → `Malformed`
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Identifier::Int(i),
                None => n.as_f64().map_or(Identifier::Malformed, Identifier::Float),
            },
            Value::String(s) => Identifier::Text(s),
            _ => Identifier::Malformed,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(n) => write!(f, "{n}"),
            Identifier::Float(x) => write!(f, "{x}"),
            Identifier::Text(s) => write!(f, "{s}"),
            Identifier::Malformed => write!(f, "<malformed>"),
        }
    }
}

/// Syntactic family of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Number,
    Name,
    Designation,
    SurveyDesignation,
    Comet,
    Unrecognized,
}

/// Canonical form of an identifier together with its syntactic family.
///
/// Immutable once built; derived purely from the raw [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedIdentifier {
    canonical: String,
    kind: IdentifierKind,
}

impl NormalizedIdentifier {
    pub(crate) fn new(canonical: String, kind: IdentifierKind) -> Self {
        NormalizedIdentifier { canonical, kind }
    }

    fn malformed() -> Self {
        Self::new(String::new(), IdentifierKind::Unrecognized)
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The asteroid number carried by a [`IdentifierKind::Number`] identifier.
    pub fn number(&self) -> Option<AsteroidNumber> {
        match self.kind {
            IdentifierKind::Number => self.canonical.parse().ok(),
            _ => None,
        }
    }

    /// True when the identifier cannot name any body and must not be looked up.
    pub fn is_malformed(&self) -> bool {
        self.kind == IdentifierKind::Unrecognized && self.canonical.is_empty()
    }
}

impl fmt::Display for NormalizedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

/// Classify a raw identifier into its canonical form.
///
/// Arguments
/// -----------------
/// * `identifier`: anything convertible into an [`Identifier`] (integers, floats, strings,
///   JSON values).
///
/// Return
/// ----------
/// * The [`NormalizedIdentifier`]. Never fails: unmatched strings are tagged
///   [`IdentifierKind::Unrecognized`] and returned trimmed but otherwise unchanged.
///
/// See also
/// ------------
/// * [`rules::CLASSIFICATION_RULES`] – The ordered string rule chain.
pub fn classify(identifier: impl Into<Identifier>) -> NormalizedIdentifier {
    match identifier.into() {
        Identifier::Int(n) if n >= 0 => {
            NormalizedIdentifier::new(n.to_string(), IdentifierKind::Number)
        }
        // same range as integer input: above i64::MAX the cast would saturate
        Identifier::Float(x) if x >= 0.0 && x < I64_UPPER_BOUND => {
            NormalizedIdentifier::new((x.trunc() as i64).to_string(), IdentifierKind::Number)
        }
        Identifier::Text(s) => classify_str(&s),
        Identifier::Int(_) | Identifier::Float(_) | Identifier::Malformed => {
            NormalizedIdentifier::malformed()
        }
    }
}

/// 2^63, exactly representable; every float below it truncates into an `i64`.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Run the ordered rule chain on a free-text identifier.
fn classify_str(raw: &str) -> NormalizedIdentifier {
    let trimmed = raw.trim();

    CLASSIFICATION_RULES
        .iter()
        .find_map(|rule| rule.apply(trimmed))
        .unwrap_or_else(|| {
            NormalizedIdentifier::new(trimmed.to_string(), IdentifierKind::Unrecognized)
        })
}
