//! # Identifier resolution
//!
//! The [`Resolver`] turns raw identifiers into canonical `(name, number)` pairs
//! ([`ResolvedIdentity`]).
//!
//! ## Pipeline
//! -----------------
//! For every identifier:
//!
//! 1. classify it ([`classify`]); malformed input short-circuits to the null identity,
//! 2. numbers are looked up in the number → name side of the [`LocalIndex`],
//!    names and designations in the name → number side, comets skip the index,
//! 3. on a miss, consult the [`ResolutionCache`], then the [`RemoteResolver`] exactly once
//!    and memoize its answer (match or definitive miss).
//!
//! Timeouts and transport errors from the remote side return the null identity for that
//! identifier only and leave the cache untouched, so the next lookup retries.
//!
//! ## Batches
//! -----------------
//! [`Resolver::resolve_many`] spreads a batch over a `rayon` pool of
//! [`ResolverConfig::concurrency`] workers. Output `i` always corresponds to input `i`.
//!
//! ## Example
//! -----------------
//! ```rust, no_run
//! use std::sync::Arc;
//! use rocks::index::LocalIndex;
//! use rocks::resolver::{Resolver, ResolverConfig};
//!
//! let index = Arc::new(LocalIndex::load_default().unwrap());
//! let resolver = Resolver::with_ssodnet(index, ResolverConfig::default()).unwrap();
//!
//! let ids = resolver.resolve_many(&["ceres", "2014_yc62", "1P/Halley"]);
//! for id in ids {
//!     println!("{id}");
//! }
//! ```
pub mod cache;
mod progress;
pub mod remote;

use std::{fmt, sync::Arc, time::Duration};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    constants::{
        AsteroidName, AsteroidNumber, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, QUAERO_SEARCH_URL,
    },
    identifiers::{classify, Identifier, IdentifierKind, NormalizedIdentifier},
    index::LocalIndex,
    rocks_errors::RocksError,
};
pub use cache::ResolutionCache;
use progress::BatchProgress;
pub use remote::{RemoteRecord, RemoteResolver, SsodnetClient};

/// Canonical identity of a minor planet.
///
/// Both fields are `None` only when resolution failed. An unnumbered body has a name and
/// no number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ResolvedIdentity {
    pub name: Option<AsteroidName>,
    pub number: Option<AsteroidNumber>,
}

impl ResolvedIdentity {
    pub fn new(name: impl Into<AsteroidName>, number: Option<AsteroidNumber>) -> Self {
        ResolvedIdentity {
            name: Some(name.into()),
            number,
        }
    }

    /// The null identity returned for anything that could not be resolved.
    pub fn unresolved() -> Self {
        ResolvedIdentity::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.name.is_some() || self.number.is_some()
    }
}

impl From<RemoteRecord> for ResolvedIdentity {
    fn from(record: RemoteRecord) -> Self {
        let number = record.number();
        ResolvedIdentity::new(record.name, number)
    }
}

impl fmt::Display for ResolvedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.number, &self.name) {
            (Some(number), Some(name)) => write!(f, "({number}) {name}"),
            (None, Some(name)) => write!(f, "{name}"),
            (Some(number), None) => write!(f, "({number})"),
            (None, None) => write!(f, "<unresolved>"),
        }
    }
}

/// Tuning of a [`Resolver`].
///
/// # Fields
///
/// * `concurrency` - Number of workers used by batch resolution (0 is treated as 1)
/// * `timeout` - Deadline of a single remote call
/// * `verbose` - Emit a warning for malformed or unresolved identifiers
/// * `endpoint` - URL of the remote search API
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub concurrency: usize,
    pub timeout: Duration,
    pub verbose: bool,
    pub endpoint: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            verbose: true,
            endpoint: QUAERO_SEARCH_URL.to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Identifier resolution orchestrator.
///
/// Owns its [`ResolutionCache`]: the memoized remote answers live exactly as long as the
/// resolver and are dropped with it.
pub struct Resolver<R: RemoteResolver> {
    index: Arc<LocalIndex>,
    remote: R,
    cache: ResolutionCache,
    config: ResolverConfig,
    pool: rayon::ThreadPool,
}

impl Resolver<SsodnetClient> {
    /// Resolver backed by the SsODNet quaero API.
    pub fn with_ssodnet(
        index: Arc<LocalIndex>,
        config: ResolverConfig,
    ) -> Result<Self, RocksError> {
        let remote = SsodnetClient::from_config(&config);
        Self::new(index, remote, config)
    }
}

impl<R: RemoteResolver> Resolver<R> {
    /// Construct a new resolver.
    ///
    /// Arguments
    /// -----------------
    /// * `index`: The local number ↔ name index, shared read-only.
    /// * `remote`: The collaborator queried on local misses.
    /// * `config`: Pool size, verbosity and remote settings.
    ///
    /// Return
    /// ----------
    /// * The resolver, or a [`RocksError::ThreadPoolError`] if the worker pool cannot start.
    pub fn new(
        index: Arc<LocalIndex>,
        remote: R,
        config: ResolverConfig,
    ) -> Result<Self, RocksError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.concurrency.max(1))
            .thread_name(|i| format!("rocks-resolver-{i}"))
            .build()?;

        Ok(Resolver {
            index,
            remote,
            cache: ResolutionCache::new(),
            config,
            pool,
        })
    }

    pub fn index(&self) -> &LocalIndex {
        &self.index
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a single identifier.
    pub fn resolve(&self, identifier: impl Into<Identifier>) -> ResolvedIdentity {
        let identifier = identifier.into();
        let normalized = classify(identifier.clone());
        if normalized.is_malformed() {
            if self.config.verbose {
                warn!(identifier = %identifier, "malformed identifier, cannot resolve");
            }
            return ResolvedIdentity::unresolved();
        }
        self.resolve_normalized(&normalized)
    }

    /// Resolve an already classified identifier.
    pub fn resolve_normalized(&self, id: &NormalizedIdentifier) -> ResolvedIdentity {
        if id.is_malformed() {
            return ResolvedIdentity::unresolved();
        }
        self.lookup_local(id).unwrap_or_else(|| self.lookup_remote(id))
    }

    /// Resolve a batch of identifiers on the worker pool.
    ///
    /// Arguments
    /// -----------------
    /// * `identifiers`: Any slice of values convertible into [`Identifier`].
    ///
    /// Return
    /// ----------
    /// * One [`ResolvedIdentity`] per input, in input order.
    pub fn resolve_many<T>(&self, identifiers: &[T]) -> Vec<ResolvedIdentity>
    where
        T: Clone + Into<Identifier> + Sync,
    {
        let progress = BatchProgress::new(identifiers.len());

        let identities: Vec<ResolvedIdentity> = self.pool.install(|| {
            identifiers
                .par_iter()
                .map(|identifier| {
                    let identity = self.resolve(identifier.clone());
                    progress.inc();
                    identity
                })
                .collect()
        });

        progress.finish();
        identities
    }

    fn lookup_local(&self, id: &NormalizedIdentifier) -> Option<ResolvedIdentity> {
        match id.kind() {
            IdentifierKind::Number => {
                let number = id.number()?;
                self.index
                    .name_from_number(number)
                    .map(|name| ResolvedIdentity::new(name, Some(number)))
            }
            IdentifierKind::Comet => None,
            IdentifierKind::Name
            | IdentifierKind::Designation
            | IdentifierKind::SurveyDesignation
            | IdentifierKind::Unrecognized => self
                .index
                .number_from_name(id.canonical())
                .map(|number| ResolvedIdentity::new(id.canonical(), number)),
        }
    }

    fn lookup_remote(&self, id: &NormalizedIdentifier) -> ResolvedIdentity {
        let key = id.canonical();
        if let Some(identity) = self.cache.get(key) {
            debug!(identifier = key, "resolution cache hit");
            return identity;
        }

        match self.remote.query(key) {
            Ok(Some(record)) => self.cache.insert(key, record.into()),
            Ok(None) => {
                if self.config.verbose {
                    warn!(identifier = key, "could not identify minor planet");
                }
                self.cache.insert(key, ResolvedIdentity::unresolved())
            }
            Err(err) => {
                warn!(identifier = key, error = %err, "remote resolution failed");
                ResolvedIdentity::unresolved()
            }
        }
    }
}
