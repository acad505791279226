use crate::domain::ports::SimulationStore;
use crate::domain::simulation::{NewSimulation, SimulationRecord, sort_newest_first};
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<u64, SimulationRecord>,
}

/// A thread-safe in-memory simulation store.
///
/// Ids start at 1 and are never reused, even after deletes. Nothing survives the
/// process, so this backend serves tests and the no-persistence fallback.
#[derive(Default, Clone)]
pub struct InMemorySimulationStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemorySimulationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SimulationStore for InMemorySimulationStore {
    async fn save(&self, simulation: NewSimulation) -> Result<u64> {
        simulation.validate()?;

        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .records
            .insert(id, simulation.into_record(id, Utc::now()));
        Ok(id)
    }

    async fn list(&self, limit: usize) -> Result<Vec<SimulationRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<SimulationRecord> = inner.records.values().cloned().collect();
        sort_newest_first(&mut records);
        records.truncate(limit);
        Ok(records)
    }

    async fn get(&self, id: u64) -> Result<SimulationRecord> {
        let inner = self.inner.read().await;
        inner.records.get(&id).cloned().ok_or(LoanError::NotFound(id))
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(LoanError::NotFound(id))
    }
}
