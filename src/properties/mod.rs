//! # Physical property aggregation
//!
//! Reduce several literature measurements of one property of one asteroid to a single
//! best estimate, and flag the measurements that contributed to it.
//!
//! ## Policies
//! -----------------
//! * [`method_tiers`] – albedo and diameter: keep only the best ranked family of methods,
//!   inflate simple thermal-model uncertainties, combine with [`weighted_average`].
//! * [`taxonomy`] – taxonomic class: additive point score over scheme, waverange and
//!   method, most recent classification wins ties.
//!
//! Every policy resets and then sets the `selected` flag of the records it is given, so the
//! caller can display which measurements were preferred.
//!
//! ## Example
//! -----------------
//! ```rust
//! use rocks::properties::{aggregate, Observation, PhysicalProperty};
//!
//! let mut albedos = vec![
//!     Observation::new(0.140, 0.010, "STM"),
//!     Observation::new(0.121, 0.019, "NEATM"),
//!     Observation::new(0.131, 0.014, "NEATM"),
//! ];
//! let best = aggregate(PhysicalProperty::Albedo, &mut albedos).unwrap();
//! assert!(!albedos[0].selected && albedos[1].selected && albedos[2].selected);
//! assert!((best.value - 0.1268).abs() < 1e-3);
//! ```
pub mod method_tiers;
pub mod taxonomy;
mod weighted;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::rocks_errors::RocksError;
pub use method_tiers::{select_albedo, select_diameter};
pub use taxonomy::{
    class_to_complex, select_taxonomy, select_taxonomy_batch, Classification, TaxonomySelection,
};
pub use weighted::weighted_average;

/// One published measurement of a numeric physical property.
///
/// `selected` is an output field, written by the selection policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub uncertainty: f64,
    pub method: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub bibref: String,
    #[serde(default)]
    pub selected: bool,
}

impl Observation {
    pub fn new(value: f64, uncertainty: f64, method: impl Into<String>) -> Self {
        Observation {
            value,
            uncertainty,
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
}

/// Best estimate of a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationResult {
    pub value: f64,
    pub uncertainty: f64,
}

impl fmt::Display for AggregationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ± {}", self.value, self.uncertainty)
    }
}

/// Numeric properties with a selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalProperty {
    Albedo,
    Diameter,
}

impl FromStr for PhysicalProperty {
    type Err = RocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "albedo" => Ok(PhysicalProperty::Albedo),
            "diameter" => Ok(PhysicalProperty::Diameter),
            _ => Err(RocksError::UnknownProperty(s.to_string())),
        }
    }
}

/// Apply the selection policy of `property` to one asteroid's measurements.
///
/// See also
/// ------------
/// * [`select_albedo`], [`select_diameter`] – The policies dispatched to.
pub fn aggregate(
    property: PhysicalProperty,
    observations: &mut [Observation],
) -> Result<AggregationResult, RocksError> {
    match property {
        PhysicalProperty::Albedo => select_albedo(observations),
        PhysicalProperty::Diameter => select_diameter(observations),
    }
}
