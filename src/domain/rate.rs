use super::category::{AgeCategory, CategoryInfo, ProfessionalCategory};
use crate::config::RateConfig;
use crate::error::{LoanError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a figure to cents, half away from zero, always carrying two decimals.
pub fn round_cents(value: Decimal) -> Decimal {
    pad_cents(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Widens the scale to at least two decimals without rounding, so `100000` renders
/// as `100000.00`. Finer scales are left alone.
pub fn pad_cents(mut value: Decimal) -> Decimal {
    if value.scale() < 2 {
        value.rescale(2);
    }
    value
}

/// The sociodemographic inputs a rate is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age_category: AgeCategory,
    pub professional_category: ProfessionalCategory,
    pub monthly_income: Decimal,
}

/// Breakdown of a computed annual rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub annual_interest_rate: Decimal,
    pub base_rate: Decimal,
    pub age_modifier: Decimal,
    pub professional_modifier: Decimal,
    pub income_modifier: Decimal,
    pub age_category: AgeCategory,
    pub professional_category: ProfessionalCategory,
    pub monthly_income: Decimal,
}

/// Prices an applicant with a base rate plus three additive modifiers.
#[derive(Debug, Clone, Default)]
pub struct RateEngine {
    config: RateConfig,
}

impl RateEngine {
    pub fn new(config: RateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    pub fn compute_rate(
        &self,
        age_category: AgeCategory,
        professional_category: ProfessionalCategory,
        monthly_income: Decimal,
    ) -> Result<RateQuote> {
        if monthly_income <= Decimal::ZERO {
            return Err(LoanError::InvalidInput(
                "monthly income must be positive".to_string(),
            ));
        }

        let base_rate = self.config.base_rate;
        let age_modifier = age_category.info().rate_modifier;
        let professional_modifier = professional_category.info().rate_modifier;
        let income_modifier = self.config.income_thresholds.modifier_for(monthly_income);

        let annual_interest_rate =
            round_cents(base_rate + age_modifier + professional_modifier + income_modifier);

        Ok(RateQuote {
            annual_interest_rate,
            base_rate,
            age_modifier,
            professional_modifier,
            income_modifier,
            age_category,
            professional_category,
            monthly_income,
        })
    }

    pub fn quote(&self, profile: &ApplicantProfile) -> Result<RateQuote> {
        self.compute_rate(
            profile.age_category,
            profile.professional_category,
            profile.monthly_income,
        )
    }

    pub fn list_age_categories(&self) -> Vec<CategoryInfo> {
        AgeCategory::ALL.into_iter().map(CategoryInfo::from).collect()
    }

    pub fn list_professional_categories(&self) -> Vec<CategoryInfo> {
        ProfessionalCategory::ALL
            .into_iter()
            .map(CategoryInfo::from)
            .collect()
    }
}
