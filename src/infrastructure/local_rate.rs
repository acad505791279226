use crate::domain::category::CategoryInfo;
use crate::domain::ports::RateProvider;
use crate::domain::rate::{ApplicantProfile, RateEngine, RateQuote};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Prices applicants with an in-process `RateEngine`. Never suspends.
#[derive(Debug, Clone, Default)]
pub struct LocalRateProvider {
    engine: Arc<RateEngine>,
}

impl LocalRateProvider {
    pub fn new(engine: RateEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

#[async_trait]
impl RateProvider for LocalRateProvider {
    async fn quote(&self, profile: &ApplicantProfile) -> Result<RateQuote> {
        self.engine.quote(profile)
    }

    async fn age_categories(&self) -> Result<Vec<CategoryInfo>> {
        Ok(self.engine.list_age_categories())
    }

    async fn professional_categories(&self) -> Result<Vec<CategoryInfo>> {
        Ok(self.engine.list_professional_categories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{AgeCategory, ProfessionalCategory};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_local_provider_delegates_to_engine() {
        let provider = LocalRateProvider::default();
        let profile = ApplicantProfile {
            age_category: AgeCategory::Senior,
            professional_category: ProfessionalCategory::Freelancer,
            monthly_income: dec!(4500),
        };
        let quote = provider.quote(&profile).await.unwrap();
        // 1.5 + 0.3 + 0.4 - 0.1
        assert_eq!(quote.annual_interest_rate, dec!(2.10));
        assert_eq!(quote.age_category, AgeCategory::Senior);
    }

    #[tokio::test]
    async fn test_local_provider_lists_categories() {
        let provider = LocalRateProvider::default();
        assert_eq!(provider.age_categories().await.unwrap().len(), 4);
        let professions = provider.professional_categories().await.unwrap();
        assert_eq!(professions.len(), 7);
        assert_eq!(professions[0].code, "EMPLOYEE");
    }
}
