//! Taxonomic classification selection.
//!
//! Each classification earns points on three independent axes, looked up
//! case-insensitively in fixed tables:
//!
//! * scheme: bus-demeo 3, bus 2, smass 2, tholen 1, sdss 1
//! * waverange: vis 1, nir 3, visnir 6, mix 4
//! * method: spec 7, phot 3, mix 4
//!
//! The classification with the highest total is preferred. Input order is taken as
//! chronological, so on a tie the **latest** classification wins. A value missing from a
//! table is an error rather than zero points, since an unscored axis would skew the ranking.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{METHOD_POINTS, SCHEME_POINTS, WAVERANGE_POINTS},
    rocks_errors::RocksError,
};

/// Class → complex, Bus-DeMeo and Tholen vocabularies.
static CLASS_COMPLEX: &[(&str, &str)] = &[
    ("A", "A"),
    ("B", "B"),
    ("C", "C"),
    ("Cb", "C"),
    ("Cg", "C"),
    ("Cgh", "C"),
    ("Ch", "C"),
    ("F", "C"),
    ("G", "C"),
    ("D", "D"),
    ("E", "X"),
    ("M", "X"),
    ("P", "X"),
    ("X", "X"),
    ("Xc", "X"),
    ("Xe", "X"),
    ("Xk", "X"),
    ("Xn", "X"),
    ("K", "K"),
    ("L", "L"),
    ("Ld", "L"),
    ("O", "O"),
    ("Q", "Q"),
    ("R", "R"),
    ("S", "S"),
    ("Sa", "S"),
    ("Sk", "S"),
    ("Sl", "S"),
    ("Sq", "S"),
    ("Sqw", "S"),
    ("Sr", "S"),
    ("Srw", "S"),
    ("Sv", "S"),
    ("Svw", "S"),
    ("Sw", "S"),
    ("T", "T"),
    ("V", "V"),
    ("Vw", "V"),
    ("Z", "Z"),
    ("U", "U"),
];

/// One published taxonomic classification.
///
/// `selected` is an output field, written by [`select_taxonomy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub class: String,
    pub scheme: String,
    pub waverange: String,
    pub method: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub bibref: String,
    #[serde(default)]
    pub selected: bool,
}

impl Classification {
    pub fn new(
        class: impl Into<String>,
        scheme: impl Into<String>,
        waverange: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Classification {
            class: class.into(),
            scheme: scheme.into(),
            waverange: waverange.into(),
            method: method.into(),
            year: None,
            bibref: String::new(),
            selected: false,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_bibref(mut self, bibref: impl Into<String>) -> Self {
        self.bibref = bibref.into();
        self
    }

    /// Total points of the classification.
    ///
    /// Return
    /// ----------
    /// * The sum of the scheme, waverange and method points, or the
    ///   `Unknown{Scheme,Waverange,Method}` error of the first unlisted value.
    pub fn score(&self) -> Result<u32, RocksError> {
        let scheme = points(&SCHEME_POINTS, &self.scheme)
            .ok_or_else(|| RocksError::UnknownScheme(self.scheme.clone()))?;
        let waverange = points(&WAVERANGE_POINTS, &self.waverange)
            .ok_or_else(|| RocksError::UnknownWaverange(self.waverange.clone()))?;
        let method = points(&METHOD_POINTS, &self.method)
            .ok_or_else(|| RocksError::UnknownMethod(self.method.clone()))?;
        Ok(scheme + waverange + method)
    }
}

fn points(table: &[(&str, u32)], key: &str) -> Option<u32> {
    let key = key.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, points)| *points)
}

/// Outcome of the taxonomy policy.
///
/// [`TaxonomySelection::none`] (every field `None`) stands for "no classification".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaxonomySelection {
    pub class: Option<String>,
    pub complex: Option<String>,
    pub scheme: Option<String>,
    pub waverange: Option<String>,
    pub method: Option<String>,
    pub bibref: Option<String>,
}

impl TaxonomySelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.class.is_none()
    }
}

impl From<&Classification> for TaxonomySelection {
    fn from(c: &Classification) -> Self {
        TaxonomySelection {
            class: Some(c.class.clone()),
            complex: class_to_complex(&c.class).map(str::to_string),
            scheme: Some(c.scheme.clone()),
            waverange: Some(c.waverange.clone()),
            method: Some(c.method.clone()),
            bibref: (!c.bibref.is_empty()).then(|| c.bibref.clone()),
        }
    }
}

/// Complex a taxonomic class belongs to (`"Sk"` → `"S"`, `"Xc"` → `"X"`).
///
/// Unknown classes map to `None`.
pub fn class_to_complex(class: &str) -> Option<&'static str> {
    let class = class.trim();
    CLASS_COMPLEX
        .iter()
        .find(|(c, _)| *c == class)
        .map(|(_, complex)| *complex)
}

/// Pick the preferred classification of one asteroid.
///
/// Arguments
/// -----------------
/// * `classifications`: the asteroid's classifications in chronological order; `selected`
///   flags are rewritten.
///
/// Return
/// ----------
/// * The preferred classification and its complex.
/// * [`TaxonomySelection::none`] if there is no usable classification (empty input, or only
///   records without a class label).
/// * An `Unknown{Scheme,Waverange,Method}` error if a record cannot be scored.
pub fn select_taxonomy(
    classifications: &mut [Classification],
) -> Result<TaxonomySelection, RocksError> {
    classifications.iter_mut().for_each(|c| c.selected = false);

    let scores = classifications
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.class.trim().is_empty())
        .map(|(i, c)| c.score().map(|score| (i, score)))
        .collect::<Result<Vec<_>, _>>()?;

    // max_by_key keeps the last of equal maxima: most recent wins
    let Some(&(best, score)) = scores.iter().max_by_key(|(_, score)| *score) else {
        return Ok(TaxonomySelection::none());
    };

    let preferred = &mut classifications[best];
    preferred.selected = true;
    debug!(class = %preferred.class, score, "taxonomy selected");

    Ok(TaxonomySelection::from(&*preferred))
}

/// Batch form of [`select_taxonomy`]: one selection per asteroid, in input order.
pub fn select_taxonomy_batch(
    groups: &mut [Vec<Classification>],
) -> Result<Vec<TaxonomySelection>, RocksError> {
    groups
        .iter_mut()
        .map(|group| select_taxonomy(group))
        .collect()
}
