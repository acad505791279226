use super::category::{AgeCategory, ProfessionalCategory};
use super::loan::LoanQuote;
use super::rate::pad_cents;
use crate::error::{LoanError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A simulation awaiting persistence. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSimulation {
    pub first_name: String,
    pub last_name: String,
    pub age_category: String,
    pub professional_category: String,
    pub monthly_net_income: Decimal,
    pub loan_amount: Decimal,
    pub duration_years: u32,
    pub annual_interest_rate: Decimal,
    pub total_interest: Decimal,
    pub total_cost: Decimal,
    pub monthly_payment: Decimal,
}

impl NewSimulation {
    /// Combines an applicant with the figures of an already computed loan.
    pub fn from_quote(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age_category: AgeCategory,
        professional_category: ProfessionalCategory,
        monthly_net_income: Decimal,
        duration_years: u32,
        quote: &LoanQuote,
    ) -> Result<Self> {
        let annual_interest_rate = quote.annual_interest_rate.ok_or_else(|| {
            LoanError::ValidationError("the applied interest rate is required".to_string())
        })?;
        Ok(Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age_category: age_category.code().to_string(),
            professional_category: professional_category.code().to_string(),
            monthly_net_income: pad_cents(monthly_net_income),
            loan_amount: quote.loan_amount,
            duration_years,
            annual_interest_rate,
            total_interest: quote.total_interest,
            total_cost: quote.total_cost,
            monthly_payment: quote.monthly_payment,
        })
    }

    /// Identity and category fields must be present before a record is stored.
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(LoanError::ValidationError(
                "first name and last name are required".to_string(),
            ));
        }
        if self.age_category.trim().is_empty() || self.professional_category.trim().is_empty() {
            return Err(LoanError::ValidationError(
                "age and professional categories are required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_record(self, id: u64, created_at: DateTime<Utc>) -> SimulationRecord {
        SimulationRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age_category: self.age_category,
            professional_category: self.professional_category,
            monthly_net_income: self.monthly_net_income,
            loan_amount: self.loan_amount,
            duration_years: self.duration_years,
            annual_interest_rate: self.annual_interest_rate,
            total_interest: self.total_interest,
            total_cost: self.total_cost,
            monthly_payment: self.monthly_payment,
            created_at,
        }
    }
}

/// A persisted simulation. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub age_category: String,
    pub professional_category: String,
    pub monthly_net_income: Decimal,
    pub loan_amount: Decimal,
    pub duration_years: u32,
    pub annual_interest_rate: Decimal,
    pub total_interest: Decimal,
    pub total_cost: Decimal,
    pub monthly_payment: Decimal,
    pub created_at: DateTime<Utc>,
}

impl SimulationRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn formatted_created_at(&self) -> String {
        self.created_at.format("%d/%m/%Y at %H:%M").to_string()
    }
}

/// Newest first; ids break ties between identical timestamps.
pub fn sort_newest_first(records: &mut [SimulationRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
