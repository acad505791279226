use crate::domain::ports::SimulationStore;
use crate::domain::simulation::{NewSimulation, SimulationRecord, sort_newest_first};
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing simulation records, keyed by big-endian id.
pub const CF_SIMULATIONS: &str = "simulations";
/// Column Family for bookkeeping such as the id sequence.
pub const CF_META: &str = "meta";

const SEQUENCE_KEY: &[u8] = b"simulation_seq";

/// A persistent simulation store backed by RocksDB.
///
/// A record and the id sequence it advances are written in one `WriteBatch`, so a
/// crash never leaves a half-written record or a reused id behind.
///
/// `Clone` shares the underlying `Arc<DB>` and the writer lock.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    writer: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// column families on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_simulations = ColumnFamilyDescriptor::new(CF_SIMULATIONS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_simulations, cf_meta])?;

        Ok(Self {
            db: Arc::new(db),
            writer: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LoanError::internal(std::io::Error::other(format!(
                "{name} column family not found"
            )))
        })
    }

    fn current_sequence(&self) -> Result<u64> {
        let meta = self.cf(CF_META)?;
        match self.db.get_pinned_cf(meta, SEQUENCE_KEY)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_ref().try_into().map_err(|_| {
                    LoanError::internal(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "corrupted simulation sequence",
                    ))
                })?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    fn decode(bytes: &[u8]) -> Result<SimulationRecord> {
        serde_json::from_slice(bytes).map_err(|e| {
            LoanError::internal(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Deserialization error: {}", e),
            ))
        })
    }
}

#[async_trait]
impl SimulationStore for RocksDBStore {
    async fn save(&self, simulation: NewSimulation) -> Result<u64> {
        simulation.validate()?;

        let _guard = self.writer.lock().await;
        let id = self.current_sequence()? + 1;
        let record = simulation.into_record(id, Utc::now());
        let value = serde_json::to_vec(&record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_SIMULATIONS)?, id.to_be_bytes(), value);
        batch.put_cf(self.cf(CF_META)?, SEQUENCE_KEY, id.to_be_bytes());
        self.db.write(batch)?;

        tracing::debug!(id, "simulation persisted");
        Ok(id)
    }

    async fn list(&self, limit: usize) -> Result<Vec<SimulationRecord>> {
        let cf = self.cf(CF_SIMULATIONS)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::End) {
            let (_key, value) = item?;
            records.push(Self::decode(&value)?);
        }

        sort_newest_first(&mut records);
        records.truncate(limit);
        Ok(records)
    }

    async fn get(&self, id: u64) -> Result<SimulationRecord> {
        let cf = self.cf(CF_SIMULATIONS)?;
        match self.db.get_pinned_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Self::decode(&bytes),
            None => Err(LoanError::NotFound(id)),
        }
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.writer.lock().await;
        let cf = self.cf(CF_SIMULATIONS)?;

        if self.db.get_pinned_cf(cf, id.to_be_bytes())?.is_none() {
            return Err(LoanError::NotFound(id));
        }
        self.db.delete_cf(cf, id.to_be_bytes())?;

        tracing::debug!(id, "simulation deleted");
        Ok(())
    }
}
