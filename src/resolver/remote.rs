//! # Remote name-resolution collaborator
//!
//! The [`RemoteResolver`] trait is the seam between the orchestrator and whatever service
//! knows about bodies missing from the local index. The production implementation,
//! [`SsodnetClient`], queries the SsODNet *quaero* search API with a blocking `ureq` agent.
//!
//! ## Contract
//! -----------------
//! * `Ok(Some(record))` – the provider identified the body.
//! * `Ok(None)` – the provider answered and knows no such body. This answer is definitive
//!   and gets memoized.
//! * `Err(_)` – timeout, transport failure or undecodable payload. Transient: the
//!   orchestrator returns the null identity for this call but does not memoize it.
//!
//! ## Hit selection
//! -----------------
//! The search is restricted to asteroids, dwarf planets and comets ([`MINOR_BODY_TYPES`]),
//! and hits of any other type are dropped again on decoding. Among the remaining hits, the
//! one whose name or an alias equals the searched identifier wins; the best ranked hit is
//! only a fallback.
//!
//! ## Number selection
//! -----------------
//! A body can carry several numeric aliases (historical renumberings). The number reported
//! for it is the **smallest** integer-valued alias, see [`RemoteRecord::number`].
use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;
use tracing::debug;

use super::ResolverConfig;
use crate::{
    constants::{AsteroidName, AsteroidNumber, MINOR_BODY_TYPES, QUAERO_LIMIT},
    env_state::RocksEnv,
    rocks_errors::RocksError,
};

/// What the provider returns for a matched body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteRecord {
    pub name: AsteroidName,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl RemoteRecord {
    pub fn new(name: impl Into<AsteroidName>, aliases: &[&str]) -> Self {
        RemoteRecord {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Smallest alias that parses as an integer, if any.
    pub fn number(&self) -> Option<AsteroidNumber> {
        self.aliases
            .iter()
            .filter_map(|alias| alias.trim().parse::<AsteroidNumber>().ok())
            .min()
    }
}

/// Name-resolution service queried when the local index misses.
pub trait RemoteResolver: Send + Sync {
    /// Resolve one canonical identifier string.
    fn query(&self, identifier: &str) -> Result<Option<RemoteRecord>, RocksError>;
}

impl<T: RemoteResolver + ?Sized> RemoteResolver for Arc<T> {
    fn query(&self, identifier: &str) -> Result<Option<RemoteRecord>, RocksError> {
        (**self).query(identifier)
    }
}

#[derive(Debug, Deserialize)]
struct QuaeroResponse {
    #[serde(default)]
    data: Vec<QuaeroHit>,
}

#[derive(Debug, Deserialize)]
struct QuaeroHit {
    name: AsteroidName,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(rename = "type", default)]
    body_type: Option<String>,
}

impl QuaeroHit {
    /// Hits without a type are kept, the provider does not always report it.
    fn is_minor_body(&self) -> bool {
        self.body_type.as_deref().map_or(true, |body_type| {
            MINOR_BODY_TYPES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(body_type.trim()))
        })
    }

    fn matches(&self, identifier: &str) -> bool {
        std::iter::once(&self.name)
            .chain(&self.aliases)
            .any(|alias| alias.trim().eq_ignore_ascii_case(identifier))
    }
}

impl From<QuaeroHit> for RemoteRecord {
    fn from(hit: QuaeroHit) -> Self {
        RemoteRecord {
            name: hit.name,
            aliases: hit.aliases,
        }
    }
}

/// Decode a quaero search payload and pick the record answering `identifier`.
///
/// Arguments
/// -----------------
/// * `body`: the JSON payload
/// * `identifier`: the canonical identifier that was searched for
///
/// Return
/// ----------
/// * Among minor-body hits, the first whose name or an alias equals `identifier`,
///   otherwise the first minor-body hit.
/// * `Ok(None)` if no hit is a minor body.
/// * [`RocksError::JsonError`] or [`RocksError::InvalidRemoteResponse`] on a malformed payload.
pub(crate) fn parse_quaero_response(
    body: &str,
    identifier: &str,
) -> Result<Option<RemoteRecord>, RocksError> {
    let response: QuaeroResponse = serde_json::from_str(body)?;
    let mut hits = response
        .data
        .into_iter()
        .filter(QuaeroHit::is_minor_body)
        .collect_vec();

    let best = hits
        .iter()
        .position(|hit| hit.matches(identifier))
        .unwrap_or(0);
    if best >= hits.len() {
        return Ok(None);
    }
    let hit = hits.swap_remove(best);
    if hit.name.trim().is_empty() {
        return Err(RocksError::InvalidRemoteResponse(
            "matched record without a name".into(),
        ));
    }
    Ok(Some(hit.into()))
}

/// Map the outcome of a search request onto the [`RemoteResolver`] contract.
///
/// A 404 means the provider knows no such body and is definitive; any other HTTP or
/// transport error is transient and returned as is.
pub(crate) fn decode_search_result(
    identifier: &str,
    result: Result<String, RocksError>,
) -> Result<Option<RemoteRecord>, RocksError> {
    match result {
        Ok(body) => parse_quaero_response(&body, identifier),
        Err(RocksError::UreqHttpError(ureq::Error::StatusCode(404))) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Quaero full-text query restricted to minor bodies.
fn quaero_query(identifier: &str) -> String {
    let types = MINOR_BODY_TYPES
        .iter()
        .map(|t| if t.contains(' ') { format!("\"{t}\"") } else { t.to_string() })
        .join(" OR ");
    format!("type:({types}) AND \"{identifier}\"")
}

/// Blocking client of the SsODNet quaero search API.
#[derive(Debug, Clone)]
pub struct SsodnetClient {
    env: RocksEnv,
    endpoint: String,
}

impl SsodnetClient {
    pub fn new(env: RocksEnv, endpoint: impl Into<String>) -> Self {
        SsodnetClient {
            env,
            endpoint: endpoint.into(),
        }
    }

    /// Client honoring the endpoint and timeout of a resolver configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(RocksEnv::new(config.timeout), config.endpoint.clone())
    }
}

impl RemoteResolver for SsodnetClient {
    fn query(&self, identifier: &str) -> Result<Option<RemoteRecord>, RocksError> {
        debug!(identifier, endpoint = %self.endpoint, "querying remote provider");
        let query = quaero_query(identifier);
        let limit = QUAERO_LIMIT.to_string();
        let result = self.env.get_with_query(
            &self.endpoint,
            &[("q", query.as_str()), ("limit", limit.as_str())],
        );
        decode_search_result(identifier, result)
    }
}

#[cfg(test)]
mod remote_test {
    use super::*;

    #[test]
    fn test_smallest_numeric_alias_wins() {
        let record = RemoteRecord::new("Ceres", &["A801 AA", "1943 XB", "1", "A899 OF"]);
        assert_eq!(record.number(), Some(1));

        let record = RemoteRecord::new("Renumbered", &["2001 AB", "12345", "678", " 90000 "]);
        assert_eq!(record.number(), Some(678));

        let record = RemoteRecord::new("2014 YC62", &["2014 YC62", "K14Y62C"]);
        assert_eq!(record.number(), None);
    }

    #[test]
    fn test_parse_quaero_response() {
        let body = r#"{
            "data": [
                {"id": "Ceres", "name": "Ceres", "type": "Dwarf Planet",
                 "aliases": ["1", "A801 AA", "A899 OF", "1943 XB"]}
            ],
            "total": 1
        }"#;
        let record = parse_quaero_response(body, "Ceres").unwrap().unwrap();
        assert_eq!(record.name, "Ceres");
        assert_eq!(record.number(), Some(1));

        assert_eq!(
            parse_quaero_response(r#"{"data": [], "total": 0}"#, "Ceres").unwrap(),
            None
        );
        assert_eq!(parse_quaero_response(r#"{"total": 0}"#, "Ceres").unwrap(), None);
    }

    #[test]
    fn test_exact_alias_match_is_preferred() {
        let body = r#"{
            "data": [
                {"name": "Astraea", "type": "Asteroid", "aliases": ["5", "A845 XA"]},
                {"name": "Hebe", "type": "Asteroid", "aliases": ["6", "A847 NA"]},
                {"name": "Juno", "type": "Asteroid", "aliases": ["3", "A804 RA"]}
            ]
        }"#;
        let record = parse_quaero_response(body, "3").unwrap().unwrap();
        assert_eq!(record.name, "Juno");
        assert_eq!(record.number(), Some(3));

        let record = parse_quaero_response(body, "hebe").unwrap().unwrap();
        assert_eq!(record.name, "Hebe");

        // no exact match: best ranked hit
        let record = parse_quaero_response(body, "Astr").unwrap().unwrap();
        assert_eq!(record.name, "Astraea");
    }

    #[test]
    fn test_non_minor_bodies_are_ignored() {
        let body = r#"{
            "data": [
                {"name": "Jupiter", "type": "Planet", "aliases": ["5", "599"]},
                {"name": "Europa", "type": "Satellite", "aliases": ["Jupiter II", "502"]},
                {"name": "Astraea", "type": "Asteroid", "aliases": ["5", "A845 XA"]}
            ]
        }"#;
        let record = parse_quaero_response(body, "5").unwrap().unwrap();
        assert_eq!(record.name, "Astraea");
        assert_eq!(record.number(), Some(5));

        let only_planets = r#"{"data": [{"name": "Mars", "type": "Planet", "aliases": ["4"]}]}"#;
        assert_eq!(parse_quaero_response(only_planets, "4").unwrap(), None);

        let comet = r#"{"data": [{"name": "P/2010 A2", "type": "Comet", "aliases": []}]}"#;
        let record = parse_quaero_response(comet, "P/2010 A2").unwrap().unwrap();
        assert_eq!(record.name, "P/2010 A2");
        assert_eq!(record.number(), None);
    }

    #[test]
    fn test_parse_invalid_quaero_response() {
        assert!(matches!(
            parse_quaero_response("<html>oops</html>", "Ceres"),
            Err(RocksError::JsonError(_))
        ));
        assert!(matches!(
            parse_quaero_response(r#"{"data": [{"name": " "}]}"#, "Ceres"),
            Err(RocksError::InvalidRemoteResponse(_))
        ));
    }

    #[test]
    fn test_not_found_status_is_a_definitive_miss() {
        let result = Err(RocksError::UreqHttpError(ureq::Error::StatusCode(404)));
        assert_eq!(decode_search_result("Nowhere", result), Ok(None));

        let body = r#"{"data": [{"name": "Vesta", "type": "Asteroid", "aliases": ["4"]}]}"#;
        let record = decode_search_result("Vesta", Ok(body.to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(record.number(), Some(4));
    }

    #[test]
    fn test_other_failures_are_transient() {
        let result = Err(RocksError::UreqHttpError(ureq::Error::StatusCode(503)));
        assert!(matches!(
            decode_search_result("Vesta", result),
            Err(RocksError::UreqHttpError(ureq::Error::StatusCode(503)))
        ));

        let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline exceeded");
        assert!(matches!(
            decode_search_result("Vesta", Err(RocksError::IoError(timeout))),
            Err(RocksError::IoError(_))
        ));
    }

    #[test]
    fn test_quaero_query() {
        assert_eq!(
            quaero_query("2004 MN4"),
            r#"type:(Asteroid OR "Dwarf Planet" OR Comet) AND "2004 MN4""#
        );
    }

    #[test]
    #[ignore]
    fn test_ssodnet_query() {
        let client = SsodnetClient::from_config(&ResolverConfig::default());
        let record = client.query("Ceres").unwrap().unwrap();
        assert_eq!(record.name, "Ceres");
        assert_eq!(record.number(), Some(1));
    }
}
