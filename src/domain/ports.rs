use super::category::CategoryInfo;
use super::rate::{ApplicantProfile, RateQuote};
use super::simulation::{NewSimulation, SimulationRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for simulation history.
#[async_trait]
pub trait SimulationStore: Send + Sync {
    /// Validates and persists a simulation, returning its assigned id.
    async fn save(&self, simulation: NewSimulation) -> Result<u64>;
    /// Up to `limit` records, newest first.
    async fn list(&self, limit: usize) -> Result<Vec<SimulationRecord>>;
    async fn get(&self, id: u64) -> Result<SimulationRecord>;
    async fn delete(&self, id: u64) -> Result<()>;
}

/// Anything able to price an applicant profile, in process or across the network.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn quote(&self, profile: &ApplicantProfile) -> Result<RateQuote>;
    async fn age_categories(&self) -> Result<Vec<CategoryInfo>>;
    async fn professional_categories(&self) -> Result<Vec<CategoryInfo>>;
}

pub type SimulationStoreBox = Box<dyn SimulationStore>;
pub type RateProviderBox = Box<dyn RateProvider>;
