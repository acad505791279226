use super::rate::{ApplicantProfile, pad_cents, round_cents};
use crate::error::{LoanError, Result};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: u32 = 12;

/// Validated input to the amortization formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    principal: Decimal,
    duration_years: u32,
    annual_rate: Decimal,
}

impl LoanTerms {
    pub fn new(principal: Decimal, duration_years: u32, annual_rate: Decimal) -> Result<Self> {
        if principal <= Decimal::ZERO {
            return Err(LoanError::InvalidInput(
                "loan amount must be positive".to_string(),
            ));
        }
        if duration_years == 0 {
            return Err(LoanError::InvalidInput(
                "duration must be at least one year".to_string(),
            ));
        }
        if annual_rate < Decimal::ZERO {
            return Err(LoanError::InvalidInput(
                "annual interest rate cannot be negative".to_string(),
            ));
        }
        if duration_years.checked_mul(MONTHS_PER_YEAR).is_none() {
            return Err(overflow());
        }
        Ok(Self {
            principal,
            duration_years,
            annual_rate,
        })
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn duration_years(&self) -> u32 {
        self.duration_years
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn number_of_payments(&self) -> u32 {
        // bounded by the check in `new`
        self.duration_years.saturating_mul(MONTHS_PER_YEAR)
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
    }
}

fn overflow() -> LoanError {
    LoanError::InvalidInput("loan terms overflow".to_string())
}

/// Amortization result, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub loan_amount: Decimal,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_interest_rate: Option<Decimal>,
}

/// Fixed-rate, level-payment amortization.
pub fn compute_loan(terms: &LoanTerms) -> Result<LoanQuote> {
    let monthly_rate = terms.monthly_rate();
    let n = terms.number_of_payments();
    let principal = terms.principal();

    // Exact comparison only: a tiny non-zero rate goes through the general formula.
    let monthly_payment = if monthly_rate == Decimal::ZERO {
        principal.checked_div(Decimal::from(n)).ok_or_else(overflow)?
    } else {
        let growth = (Decimal::ONE + monthly_rate)
            .checked_powu(u64::from(n))
            .ok_or_else(overflow)?;
        monthly_rate
            .checked_mul(growth)
            .and_then(|scaled| principal.checked_mul(scaled))
            .and_then(|numerator| numerator.checked_div(growth - Decimal::ONE))
            .ok_or_else(overflow)?
    };

    let total_cost = monthly_payment
        .checked_mul(Decimal::from(n))
        .ok_or_else(overflow)?;
    let total_interest = total_cost - principal;

    Ok(LoanQuote {
        loan_amount: round_cents(principal),
        monthly_payment: round_cents(monthly_payment),
        total_interest: round_cents(total_interest),
        total_cost: round_cents(total_cost),
        annual_interest_rate: Some(pad_cents(terms.annual_rate())),
    })
}

/// Where the annual rate for a loan comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateSource {
    Explicit(Decimal),
    Derived(ApplicantProfile),
}

impl RateSource {
    /// Builds a source from the optional fields of a loosely-shaped request.
    /// An explicit rate wins; otherwise the full profile is required.
    pub fn from_parts(rate: Option<Decimal>, profile: Option<ApplicantProfile>) -> Result<Self> {
        match (rate, profile) {
            (Some(rate), _) => Ok(RateSource::Explicit(rate)),
            (None, Some(profile)) => Ok(RateSource::Derived(profile)),
            (None, None) => Err(LoanError::MissingRate),
        }
    }
}
