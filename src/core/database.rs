use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{info, warn};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::{Counters, DatabaseStats};
use crate::core::types::{Drug, PrimaryKey};
use crate::ingest;
use crate::ingest::rows::create_db;
use crate::query::ast::{FieldValue, Predicate};
use crate::query::builder::Query;
use crate::query::field::Field;
use crate::storage::backing_file;
use crate::storage::file_lock::FileLock;
use crate::storage::layout::StorageLayout;

/// In-memory drug records kept in step with a tab-separated backing file.
///
/// Record `i` (1-based) lives on backing-file line `i`, below the header.
/// Insert and delete hold the store lock across the file write and the
/// in-memory update, so the two are never observed out of step.
pub struct DrugDB {
    config: Config,
    storage: StorageLayout,
    state: Mutex<State>,
    opened_at: DateTime<Utc>,
}

struct State {
    drugs: Vec<Drug>,
    counters: Counters,
}

impl DrugDB {
    /// Load every record from a tab-separated source with default settings
    pub fn new(source_path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::for_source(source_path))
    }

    pub fn open(config: Config) -> Result<Self> {
        let storage = config.layout();

        let rows = ingest::load_rows(&storage.source_path, storage.csv_copy_path.as_deref())?;
        let drugs = create_db(&rows)?;

        info!(
            records = drugs.len(),
            path = %storage.source_path.display(),
            "Loaded drug database"
        );

        Ok(DrugDB {
            config,
            storage,
            state: Mutex::new(State {
                drugs,
                counters: Counters::default(),
            }),
            opened_at: Utc::now(),
        })
    }

    /// Start a query by field name; unknown names fail here, not at scan time
    pub fn query(&self, field: &str, value: impl Into<FieldValue>) -> Result<Query<'_>> {
        let field = Field::from_name(field)?;
        self.query_field(field, value)
    }

    pub fn query_field(&self, field: Field, value: impl Into<FieldValue>) -> Result<Query<'_>> {
        let predicate = Predicate::new(field, value.into())?;
        Ok(Query::new(self, predicate))
    }

    pub fn is_unique(&self, appl_no: i64, product_no: i64) -> bool {
        let state = self.state.lock();
        position_of(&state.drugs, PrimaryKey::new(appl_no, product_no)).is_none()
    }

    /// 1-based position of the record, which is also its backing-file line
    pub fn find_index_by_primary_key(&self, appl_no: i64, product_no: i64) -> Option<usize> {
        let state = self.state.lock();
        position_of(&state.drugs, PrimaryKey::new(appl_no, product_no))
    }

    pub fn get(&self, appl_no: i64, product_no: i64) -> Option<Drug> {
        let state = self.state.lock();
        position_of(&state.drugs, PrimaryKey::new(appl_no, product_no))
            .map(|position| state.drugs[position - 1].clone())
    }

    /// Append a record to the file and the collection.
    /// `Ok(false)` when the primary key is already taken; `InvalidArgument`
    /// when a value cannot be written as one backing-file line.
    pub fn insert(&self, drug: Drug) -> Result<bool> {
        match self.try_insert(drug) {
            Ok(()) => Ok(true),
            Err(e) if e.kind == ErrorKind::DuplicateKey => {
                warn!("{}", e.context);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn try_insert(&self, drug: Drug) -> Result<()> {
        let mut state = self.state.lock();
        let key = drug.primary_key();

        if position_of(&state.drugs, key).is_some() {
            state.counters.rejected_inserts += 1;
            return Err(Error::new(
                ErrorKind::DuplicateKey,
                format!("Cannot insert drug {:?}: primary key {} is already used", drug.drug_name, key),
            ));
        }

        let line = drug.to_checked_line()?;

        let _lock = self.lock_backing_file()?;
        backing_file::append_line(&self.storage.source_path, &line)?;

        info!(key = %key, "Drug {:?} added to db and backing file", drug.drug_name);
        state.drugs.push(drug);
        state.counters.inserts += 1;
        Ok(())
    }

    /// Remove a record, matched by primary key, from the file and the collection.
    /// `Ok(false)` when no record has that key.
    pub fn delete(&self, drug: &Drug) -> Result<bool> {
        match self.try_delete(drug) {
            Ok(()) => Ok(true),
            Err(e) if e.kind == ErrorKind::NotFound => {
                warn!("{}", e.context);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn try_delete(&self, drug: &Drug) -> Result<()> {
        let mut state = self.state.lock();
        let key = drug.primary_key();

        let Some(position) = position_of(&state.drugs, key) else {
            state.counters.rejected_deletes += 1;
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("Cannot delete drug {:?}: primary key {} is not in the db", drug.drug_name, key),
            ));
        };

        let _lock = self.lock_backing_file()?;
        let line = StorageLayout::line_for_position(position);
        backing_file::remove_line(
            &self.storage.source_path,
            self.storage.directory(),
            line,
            |text| check_line_key(text, line, key),
        )?;

        let removed = state.drugs.remove(position - 1);
        state.counters.deletes += 1;
        info!(key = %key, "Drug {:?} deleted from db and backing file", removed.drug_name);
        Ok(())
    }

    /// Snapshot of every record, in file order
    pub fn drugs(&self) -> Vec<Drug> {
        self.state.lock().drugs.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn print_drugs(&self) {
        let state = self.state.lock();
        for drug in &state.drugs {
            println!("{}", drug);
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage.source_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        let state = self.state.lock();
        let backing_file_bytes = fs::metadata(&self.storage.source_path)?.len();

        Ok(DatabaseStats {
            opened_at: self.opened_at,
            record_count: state.drugs.len(),
            backing_file_bytes,
            inserts: state.counters.inserts,
            deletes: state.counters.deletes,
            rejected_inserts: state.counters.rejected_inserts,
            rejected_deletes: state.counters.rejected_deletes,
            queries: state.counters.queries,
        })
    }

    /// Run `f` over the current collection under the store lock
    pub(crate) fn read_for_query<R>(&self, f: impl FnOnce(&[Drug]) -> R) -> R {
        let mut state = self.state.lock();
        state.counters.queries += 1;
        f(&state.drugs)
    }

    fn lock_backing_file(&self) -> Result<Option<FileLock>> {
        if self.config.lock_backing_file {
            FileLock::acquire(&self.storage).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// 1-based position of the first record with `key`
fn position_of(drugs: &[Drug], key: PrimaryKey) -> Option<usize> {
    drugs
        .iter()
        .position(|drug| drug.primary_key() == key)
        .map(|i| i + 1)
}

/// The line about to be dropped must hold the record being deleted
fn check_line_key(text: &str, line: usize, key: PrimaryKey) -> Result<()> {
    let on_disk = Drug::from_line(text).map_err(|e| {
        Error::new(
            ErrorKind::InvalidState,
            format!("backing file line {} is not a record: {}", line, e.context),
        )
    })?;

    if on_disk.primary_key() != key {
        return Err(Error::new(
            ErrorKind::InvalidState,
            format!(
                "backing file out of sync: line {} holds {}, expected {}",
                line,
                on_disk.primary_key(),
                key
            ),
        ));
    }

    Ok(())
}
