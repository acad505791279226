use crate::domain::category::CategoryInfo;
use crate::domain::loan::{LoanQuote, LoanTerms, RateSource, compute_loan};
use crate::domain::ports::{RateProviderBox, SimulationStoreBox};
use crate::domain::rate::{ApplicantProfile, RateQuote};
use crate::domain::simulation::{NewSimulation, SimulationRecord};
use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A loan simulation request with its rate source already made explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    pub amount: Decimal,
    pub duration_years: u32,
    pub rate: RateSource,
}

/// The person a saved simulation belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub profile: ApplicantProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub loan: LoanQuote,
    /// Present when the rate was derived from an applicant profile.
    pub rate: Option<RateQuote>,
}

/// Orchestrates rate resolution, amortization and history persistence.
///
/// The rate provider and the store are injected so the same simulator runs
/// against an in-process engine and memory in tests, and against a remote rate
/// service and RocksDB in production.
pub struct LoanSimulator {
    rates: RateProviderBox,
    store: SimulationStoreBox,
    upstream_timeout: Duration,
}

impl LoanSimulator {
    pub fn new(
        rates: RateProviderBox,
        store: SimulationStoreBox,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            rates,
            store,
            upstream_timeout,
        }
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.upstream_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.upstream_timeout, "rate provider timed out");
                Err(LoanError::UpstreamUnavailable(format!(
                    "no answer from the rate provider within {:?}",
                    self.upstream_timeout
                )))
            }
        }
    }

    /// Prices a profile through the rate provider, bounded by the upstream timeout.
    pub async fn quote_rate(&self, profile: &ApplicantProfile) -> Result<RateQuote> {
        self.bounded(self.rates.quote(profile)).await
    }

    pub async fn age_categories(&self) -> Result<Vec<CategoryInfo>> {
        self.bounded(self.rates.age_categories()).await
    }

    pub async fn professional_categories(&self) -> Result<Vec<CategoryInfo>> {
        self.bounded(self.rates.professional_categories()).await
    }

    async fn resolve_rate(&self, source: &RateSource) -> Result<(Decimal, Option<RateQuote>)> {
        match source {
            RateSource::Explicit(rate) => Ok((*rate, None)),
            RateSource::Derived(profile) => {
                let quote = self.quote_rate(profile).await?;
                debug!(rate = %quote.annual_interest_rate, "rate derived from profile");
                Ok((quote.annual_interest_rate, Some(quote)))
            }
        }
    }

    /// Resolves the rate then amortizes. A failed rate lookup fails the whole call.
    pub async fn simulate(&self, request: &LoanRequest) -> Result<SimulationOutcome> {
        let (annual_rate, rate) = self.resolve_rate(&request.rate).await?;
        let terms = LoanTerms::new(request.amount, request.duration_years, annual_rate)?;
        let loan = compute_loan(&terms)?;
        Ok(SimulationOutcome { loan, rate })
    }

    /// Simulates and records the result in the history. Returns the new record id.
    pub async fn simulate_and_save(
        &self,
        request: &LoanRequest,
        applicant: Applicant,
    ) -> Result<(u64, SimulationOutcome)> {
        let outcome = self.simulate(request).await?;
        let simulation = NewSimulation::from_quote(
            applicant.first_name,
            applicant.last_name,
            applicant.profile.age_category,
            applicant.profile.professional_category,
            applicant.profile.monthly_income,
            request.duration_years,
            &outcome.loan,
        )?;
        let id = self.save(simulation).await?;
        Ok((id, outcome))
    }

    pub async fn save(&self, simulation: NewSimulation) -> Result<u64> {
        let id = self.store.save(simulation).await?;
        info!(id, "simulation saved");
        Ok(id)
    }

    pub async fn history(&self, limit: usize) -> Result<Vec<SimulationRecord>> {
        self.store.list(limit).await
    }

    pub async fn get(&self, id: u64) -> Result<SimulationRecord> {
        self.store.get(id).await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.store.delete(id).await?;
        info!(id, "simulation deleted");
        Ok(())
    }
}
