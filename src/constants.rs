//! # Constants and type definitions for rocks
//!
//! This module centralizes the **defaults**, **ranking tables** and **common type
//! definitions** used throughout the `rocks` library.
//!
//! ## Overview
//!
//! - Remote provider endpoint and client defaults
//! - Worker-pool sizing for batch resolution
//! - Method tiers used by the albedo/diameter selection policy
//! - Point tables used by the taxonomy selection policy
//!
//! These definitions are shared by the resolver and the property aggregators.

use std::time::Duration;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// IAU number of a minor planet (e.g. 1 for Ceres)
pub type AsteroidNumber = u64;

/// Canonical name or designation of a minor planet (e.g. `"Ceres"`, `"2014 YC62"`)
pub type AsteroidName = String;

// -------------------------------------------------------------------------------------------------
// Remote provider and resolver defaults
// -------------------------------------------------------------------------------------------------

/// SsODNet quaero search endpoint
pub const QUAERO_SEARCH_URL: &str = "https://api.ssodnet.imcce.fr/quaero/1/sso/search";

/// Maximum number of quaero hits inspected per lookup
pub const QUAERO_LIMIT: usize = 20;

/// Quaero body types that can answer a minor-planet lookup
pub const MINOR_BODY_TYPES: [&str; 3] = ["Asteroid", "Dwarf Planet", "Comet"];

/// Global deadline applied to every remote call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of workers used by batch resolution
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Directory created under the user cache dir to hold the local snapshot
pub const CACHE_DIR_NAME: &str = "rocks";

/// File name of the number/name snapshot
pub const INDEX_FILE_NAME: &str = "index.csv";

// -------------------------------------------------------------------------------------------------
// Property aggregation tables
// -------------------------------------------------------------------------------------------------

/// Measurement methods grouped by decreasing reliability, highest priority first.
///
/// Shared by the albedo and diameter policies.
pub const METHOD_TIERS: [&[&str]; 6] = [
    &["SPACE"],
    &["ADAM", "KOALA", "SAGE", "Radar"],
    &["LC+TPM", "TPM", "LC+AO", "LC+Occ", "TE-IM"],
    &["AO", "Occ", "IM"],
    &["NEATM"],
    &["STM"],
];

/// Methods whose published uncertainty is inflated by a systematic floor
pub const THERMAL_MODEL_METHODS: [&str; 2] = ["NEATM", "STM"];

/// Relative systematic error of simple thermal models
pub const THERMAL_MODEL_FLOOR: f64 = 0.1;

/// Points awarded per taxonomic scheme
pub const SCHEME_POINTS: [(&str, u32); 5] = [
    ("bus-demeo", 3),
    ("bus", 2),
    ("smass", 2),
    ("tholen", 1),
    ("sdss", 1),
];

/// Points awarded per spectral waverange
pub const WAVERANGE_POINTS: [(&str, u32); 4] = [("vis", 1), ("nir", 3), ("visnir", 6), ("mix", 4)];

/// Points awarded per observing method
pub const METHOD_POINTS: [(&str, u32); 3] = [("spec", 7), ("phot", 3), ("mix", 4)];
