#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use approx::assert_relative_eq;
use rocks::{
    AggregationResult, LocalIndex, RemoteRecord, RemoteResolver, Resolver, ResolverConfig,
    RocksError,
};

/// Remote stand-in counting its calls.
///
/// Knows a handful of bodies absent from [`test_index`]. Queries sleep a few milliseconds,
/// longer for short identifiers, so that concurrent answers arrive out of input order.
#[derive(Default)]
pub struct CountingRemote {
    pub calls: AtomicUsize,
    pub transient_failures: bool,
}

impl CountingRemote {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteResolver for CountingRemote {
    fn query(&self, identifier: &str) -> Result<Option<RemoteRecord>, RocksError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(
            20u64.saturating_sub(identifier.len() as u64),
        ));

        if self.transient_failures {
            return Err(RocksError::InvalidRemoteResponse("simulated timeout".into()));
        }
        Ok(match identifier {
            "Hygiea" | "10" => Some(RemoteRecord::new("Hygiea", &["10", "A849 GA"])),
            "Eunomia" | "15" => Some(RemoteRecord::new("Eunomia", &["15", "A851 OA"])),
            "2004 MN4" => Some(RemoteRecord::new("Apophis", &["99942", "2004 MN4"])),
            "P/2010 A2" => Some(RemoteRecord::new("P/2010 A2", &["P/2010 A2"])),
            "Renumbered" => Some(RemoteRecord::new("Renumbered", &["700", "20", "1999 XY"])),
            _ => None,
        })
    }
}

pub fn test_index() -> Arc<LocalIndex> {
    Arc::new(LocalIndex::from_pairs([
        (Some(1), "Ceres"),
        (Some(2), "Pallas"),
        (Some(3), "Juno"),
        (Some(4), "Vesta"),
        (Some(433), "Eros"),
        (Some(6000), "2040 P-L"),
        (Some(12345), "1993 FT8"),
        (None, "2014 YC62"),
    ]))
}

pub fn test_resolver(
    remote: Arc<CountingRemote>,
    concurrency: usize,
) -> Resolver<Arc<CountingRemote>> {
    let config = ResolverConfig::default()
        .with_concurrency(concurrency)
        .with_verbose(false);
    Resolver::new(test_index(), remote, config).expect("resolver")
}

pub fn assert_aggregation_close(
    actual: &AggregationResult,
    value: f64,
    uncertainty: f64,
    epsilon: f64,
) {
    assert_relative_eq!(actual.value, value, epsilon = epsilon);
    assert_relative_eq!(actual.uncertainty, uncertainty, epsilon = epsilon);
}
