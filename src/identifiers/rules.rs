//! Ordered rule chain used by [`classify`](super::classify) on free-text identifiers.
//!
//! Each [`ClassificationRule`] pairs a kind with a normalizer that returns `Some(canonical)`
//! when the rule matches. Rules are tried in the order of [`CLASSIFICATION_RULES`]; the first
//! match wins. Keeping the chain as data makes the precedence auditable and lets every rule be
//! tested on its own.
use once_cell::sync::Lazy;
use regex::Regex;

use super::{IdentifierKind, NormalizedIdentifier};
use crate::constants::AsteroidNumber;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("number regex"));

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}+$").expect("name regex"));

// 18xx/19xx/20xx, or the packed century marker A8/A9, then 1-2 letters and up to 3 digits
static DESIGNATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(1[89]|20|[Aa][89])(\d{2})[ _]?([A-Za-z]{1,2})(\d{0,3})$")
        .expect("designation regex")
});

static SURVEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{4})[ _]?(P-L|T-[123])$").expect("survey regex"));

static COMET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[PDCXAI]/").expect("comet regex"));

/// One step of the classification chain.
pub struct ClassificationRule {
    pub kind: IdentifierKind,
    pub normalize: fn(&str) -> Option<String>,
}

impl ClassificationRule {
    /// Apply the rule to an already trimmed string.
    pub fn apply(&self, trimmed: &str) -> Option<NormalizedIdentifier> {
        (self.normalize)(trimmed).map(|canonical| NormalizedIdentifier::new(canonical, self.kind))
    }
}

/// The classification chain, highest precedence first.
pub static CLASSIFICATION_RULES: [ClassificationRule; 5] = [
    ClassificationRule {
        kind: IdentifierKind::Number,
        normalize: normalize_number,
    },
    ClassificationRule {
        kind: IdentifierKind::Name,
        normalize: normalize_name,
    },
    ClassificationRule {
        kind: IdentifierKind::Designation,
        normalize: normalize_designation,
    },
    ClassificationRule {
        kind: IdentifierKind::SurveyDesignation,
        normalize: normalize_survey,
    },
    ClassificationRule {
        kind: IdentifierKind::Comet,
        normalize: normalize_comet,
    },
];

/// `"0004"` → `"4"`. Strings too long for an [`AsteroidNumber`] do not match.
pub fn normalize_number(s: &str) -> Option<String> {
    if !NUMBER_RE.is_match(s) {
        return None;
    }
    s.parse::<AsteroidNumber>().ok().map(|n| n.to_string())
}

/// `"cERES"` → `"Ceres"`.
pub fn normalize_name(s: &str) -> Option<String> {
    if !NAME_RE.is_match(s) {
        return None;
    }
    let mut chars = s.chars();
    chars.next().map(|first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// `"2014_yc62"` → `"2014 YC62"`, `"A898PA"` → `"1898 PA"`.
pub fn normalize_designation(s: &str) -> Option<String> {
    let caps = DESIGNATION_RE.captures(s)?;

    let century = match &caps[1] {
        "A8" | "a8" => "18",
        "A9" | "a9" => "19",
        other => other,
    };
    Some(format!(
        "{century}{} {}{}",
        &caps[2],
        caps[3].to_uppercase(),
        &caps[4]
    ))
}

/// `"2040_p-l"` → `"2040 P-L"`.
pub fn normalize_survey(s: &str) -> Option<String> {
    let caps = SURVEY_RE.captures(s)?;
    Some(format!("{} {}", &caps[1], caps[2].to_uppercase()))
}

/// Comet designations are passed through unmodified.
pub fn normalize_comet(s: &str) -> Option<String> {
    COMET_RE.is_match(s).then(|| s.to_string())
}

#[cfg(test)]
mod rules_test {
    use super::*;
    use crate::identifiers::classify;

    #[test]
    fn test_rule_order() {
        let kinds: Vec<_> = CLASSIFICATION_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IdentifierKind::Number,
                IdentifierKind::Name,
                IdentifierKind::Designation,
                IdentifierKind::SurveyDesignation,
                IdentifierKind::Comet,
            ]
        );
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("0004"), Some("4".into()));
        assert_eq!(normalize_number("4a"), None);
        assert_eq!(normalize_number("99999999999999999999999"), None);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("cERES"), Some("Ceres".into()));
        assert_eq!(normalize_name("šteins"), Some("Šteins".into()));
        assert_eq!(normalize_name("van Gogh"), None);
        assert_eq!(normalize_name("2014"), None);
    }

    #[test]
    fn test_normalize_designation() {
        for raw in ["2014_yc62", "2014 YC62", "2014yc62", "2014 yc62", "2014_YC62"] {
            assert_eq!(normalize_designation(raw), Some("2014 YC62".into()), "{raw}");
        }
        assert_eq!(normalize_designation("A898 PA"), Some("1898 PA".into()));
        assert_eq!(normalize_designation("a916oa"), Some("1916 OA".into()));
        assert_eq!(normalize_designation("1950 DA"), Some("1950 DA".into()));
        assert_eq!(normalize_designation("2019 A"), Some("2019 A".into()));
        assert_eq!(normalize_designation("1750 AB"), None);
        assert_eq!(normalize_designation("2014 YC6222"), None);
        assert_eq!(normalize_designation("2014 YCA"), None);
    }

    #[test]
    fn test_normalize_survey() {
        assert_eq!(normalize_survey("2040 P-L"), Some("2040 P-L".into()));
        assert_eq!(normalize_survey("2040_P-L"), Some("2040 P-L".into()));
        assert_eq!(normalize_survey("2040P-L"), Some("2040 P-L".into()));
        assert_eq!(normalize_survey("3138 t-1"), Some("3138 T-1".into()));
        assert_eq!(normalize_survey("3138 T-4"), None);
    }

    #[test]
    fn test_normalize_comet() {
        assert_eq!(normalize_comet("C/2020 F3"), Some("C/2020 F3".into()));
        assert_eq!(normalize_comet("1P/Halley"), None);
        assert_eq!(normalize_comet("c/2020 F3"), None);
    }

    #[test]
    fn test_first_match_wins() {
        // letters-only input never reaches the designation or comet rules
        assert_eq!(classify("Pallas").kind(), IdentifierKind::Name);
        // a designation that does not exist anywhere is still a designation
        assert_eq!(classify("2099 ZZ999").kind(), IdentifierKind::Designation);
        assert_eq!(classify("1P/Halley").kind(), IdentifierKind::Unrecognized);
    }
}
