//! # Local number ↔ name index
//!
//! In-memory, read-only lookup table of known minor planets, built once per process from a
//! cached snapshot and shared (behind an `Arc`) by every resolver worker.
//!
//! ## Snapshot format
//! -----------------
//! A CSV file with a `number,name` header. The `number` column is empty for bodies that
//! carry a name or designation but no number yet:
//!
//! ```text
//! number,name
//! 1,Ceres
//! 2,Pallas
//! ,2014 YC62
//! ```
//!
//! Numbered rows populate a [`BiMap`] so that both directions are always consistent. A row
//! whose number or name is already mapped is skipped with a warning: the first occurrence
//! wins. The snapshot itself is produced and refreshed by an external cache-maintenance
//! tool; this module only reads it.
//!
//! ## Default location
//! -----------------
//! [`default_snapshot_path`] points to `<user cache dir>/rocks/index.csv`.
pub mod bimap;

use std::{collections::HashSet, io::Read};

use ahash::RandomState;
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    constants::{AsteroidName, AsteroidNumber, CACHE_DIR_NAME, INDEX_FILE_NAME},
    rocks_errors::RocksError,
};
use bimap::BiMap;

/// One row of the snapshot file.
#[derive(Debug, Deserialize, PartialEq)]
struct SnapshotRecord {
    number: Option<AsteroidNumber>,
    name: AsteroidName,
}

/// Bidirectional number ↔ name table, bijective on the numbered subset.
#[derive(Debug, Clone, Default)]
pub struct LocalIndex {
    numbered: BiMap<AsteroidNumber, AsteroidName>,
    unnumbered: HashSet<AsteroidName, RandomState>,
}

impl LocalIndex {
    /// Build an index from `(number, name)` pairs.
    ///
    /// Arguments
    /// -----------------
    /// * `pairs`: the snapshot rows; `None` marks an unnumbered body.
    ///
    /// Return
    /// ----------
    /// * The index. Rows colliding with an already mapped number or name are skipped.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Option<AsteroidNumber>, S)>,
        S: Into<AsteroidName>,
    {
        let pairs = pairs.into_iter();
        let mut index = LocalIndex {
            numbered: BiMap::with_capacity(pairs.size_hint().0),
            unnumbered: HashSet::default(),
        };
        for (number, name) in pairs {
            index.insert(number, name.into());
        }
        index
    }

    fn insert(&mut self, number: Option<AsteroidNumber>, name: AsteroidName) {
        match number {
            Some(number) => {
                if self.numbered.try_insert(number, name.clone()) {
                    self.unnumbered.remove(&name);
                } else {
                    warn!(number, name = %name, "duplicate entry in local index snapshot, skipped");
                }
            }
            None => {
                if self.numbered.get_by_value(name.as_str()).is_none() {
                    self.unnumbered.insert(name);
                }
            }
        }
    }

    /// Build an index from any CSV source with a `number,name` header.
    ///
    /// Return
    /// ----------
    /// * The index, or a [`RocksError::CsvError`] on the first undecodable row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RocksError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut index = LocalIndex::default();
        for record in csv_reader.deserialize::<SnapshotRecord>() {
            let record = record?;
            index.insert(record.number, record.name);
        }
        debug!(
            numbered = index.numbered.len(),
            unnumbered = index.unnumbered.len(),
            "local index loaded"
        );
        Ok(index)
    }

    /// Build an index from a snapshot file on disk.
    pub fn from_path(path: &Utf8Path) -> Result<Self, RocksError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Build an index from the snapshot stored in the default cache location.
    ///
    /// See also
    /// ------------
    /// * [`default_snapshot_path`] – Where the snapshot is expected.
    pub fn load_default() -> Result<Self, RocksError> {
        Self::from_path(&default_snapshot_path()?)
    }

    /// Name of a numbered body.
    pub fn name_from_number(&self, number: AsteroidNumber) -> Option<&str> {
        self.numbered.get_by_key(&number).map(String::as_str)
    }

    /// Look up a canonical name or designation.
    ///
    /// Return
    /// ----------
    /// * `None` if the name is unknown
    /// * `Some(Some(number))` for a numbered body
    /// * `Some(None)` for a known but unnumbered body
    pub fn number_from_name(&self, name: &str) -> Option<Option<AsteroidNumber>> {
        if let Some(number) = self.numbered.get_by_value(name) {
            return Some(Some(*number));
        }
        self.unnumbered.contains(name).then_some(None)
    }

    /// Number of bodies known to the index.
    pub fn len(&self) -> usize {
        self.numbered.len() + self.unnumbered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Location of the snapshot in the user cache directory (`<cache>/rocks/index.csv`).
pub fn default_snapshot_path() -> Result<Utf8PathBuf, RocksError> {
    let base_dir = BaseDirs::new().ok_or(RocksError::CacheDirNotFound)?;
    let cache_path = Utf8Path::from_path(base_dir.cache_dir())
        .ok_or_else(|| RocksError::Utf8PathError(base_dir.cache_dir().display().to_string()))?;
    Ok(cache_path.join(CACHE_DIR_NAME).join(INDEX_FILE_NAME))
}
