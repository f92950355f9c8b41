//! # rocks
//!
//! Client-side core for minor-planet identification and physical property selection.
//!
//! - [`identifiers`] – classify loosely formatted names, numbers and designations
//! - [`index`] – in-memory number ↔ name index built from a cached snapshot
//! - [`resolver`] – local-first resolution with a memoized remote fallback, batch-parallel
//! - [`properties`] – albedo/diameter tier selection, taxonomy scoring, weighted averages
pub mod constants;
pub mod env_state;
pub mod identifiers;
pub mod index;
pub mod properties;
pub mod resolver;
pub mod rocks_errors;

pub use identifiers::{classify, Identifier, IdentifierKind, NormalizedIdentifier};
pub use index::LocalIndex;
pub use properties::{
    aggregate, select_albedo, select_diameter, select_taxonomy, weighted_average,
    AggregationResult, Classification, Observation, PhysicalProperty, TaxonomySelection,
};
pub use resolver::{RemoteRecord, RemoteResolver, ResolvedIdentity, Resolver, ResolverConfig};
pub use rocks_errors::RocksError;
