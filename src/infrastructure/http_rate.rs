use crate::domain::category::{AgeCategory, CategoryInfo, ProfessionalCategory};
use crate::domain::ports::RateProvider;
use crate::domain::rate::{ApplicantProfile, RateQuote};
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CALCULATE_PATH: &str = "/api/interest-rate/calculate";
pub const AGE_CATEGORIES_PATH: &str = "/api/interest-rate/categories/age";
pub const PROFESSIONAL_CATEGORIES_PATH: &str = "/api/interest-rate/categories/professional";

#[derive(Debug, Serialize)]
struct CalculateRequest {
    age_category: AgeCategory,
    professional_category: ProfessionalCategory,
    #[serde(with = "rust_decimal::serde::float")]
    monthly_net_income: Decimal,
}

#[derive(Debug, Deserialize)]
struct CalculateResponse {
    #[serde(with = "rust_decimal::serde::float")]
    annual_interest_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    age_modifier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    professional_modifier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    income_modifier: Decimal,
}

/// A category as listed by the rate service. Older services omit `code` and put
/// the code in `name`.
#[derive(Debug, Deserialize)]
struct CategoryEntry {
    #[serde(default)]
    code: Option<String>,
    name: String,
    description: String,
    #[serde(default)]
    age_range: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    rate_modifier: Decimal,
}

impl From<CategoryEntry> for CategoryInfo {
    fn from(entry: CategoryEntry) -> Self {
        Self {
            code: entry.code.unwrap_or_else(|| entry.name.clone()),
            name: entry.name,
            description: entry.description,
            age_range: entry.age_range,
            rate_modifier: entry.rate_modifier,
        }
    }
}

/// Resolves rates through a remote rate service over HTTP.
///
/// Every request is bounded by `timeout`. Transport failures, timeouts and 5xx
/// answers become `UpstreamUnavailable`; 4xx answers mean the service rejected our
/// input and become `InvalidInput`. No retries are attempted.
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
}

impl HttpRateProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LoanError::internal)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        self.url(CALCULATE_PATH)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success status onto the error taxonomy.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoanError::InvalidInput(format!(
                "rate service rejected the request ({status}): {body}"
            )));
        }
        if !status.is_success() {
            return Err(LoanError::UpstreamUnavailable(format!(
                "rate service answered {status}"
            )));
        }
        Ok(response)
    }

    async fn categories(&self, path: &str) -> Result<Vec<CategoryInfo>> {
        let response = self.client.get(self.url(path)).send().await.map_err(|e| {
            LoanError::UpstreamUnavailable(format!("category request failed: {e}"))
        })?;

        let entries: Vec<CategoryEntry> =
            Self::check(response).await?.json().await.map_err(|e| {
                LoanError::UpstreamUnavailable(format!("unreadable category listing: {e}"))
            })?;
        Ok(entries.into_iter().map(CategoryInfo::from).collect())
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn quote(&self, profile: &ApplicantProfile) -> Result<RateQuote> {
        let request = CalculateRequest {
            age_category: profile.age_category,
            professional_category: profile.professional_category,
            monthly_net_income: profile.monthly_income,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| LoanError::UpstreamUnavailable(format!("rate request failed: {e}")))?;

        let body: CalculateResponse = Self::check(response).await?.json().await.map_err(|e| {
            LoanError::UpstreamUnavailable(format!("unreadable rate response: {e}"))
        })?;

        Ok(RateQuote {
            annual_interest_rate: body.annual_interest_rate,
            base_rate: body.base_rate,
            age_modifier: body.age_modifier,
            professional_modifier: body.professional_modifier,
            income_modifier: body.income_modifier,
            age_category: profile.age_category,
            professional_category: profile.professional_category,
            monthly_income: profile.monthly_income,
        })
    }

    async fn age_categories(&self) -> Result<Vec<CategoryInfo>> {
        self.categories(AGE_CATEGORIES_PATH).await
    }

    async fn professional_categories(&self) -> Result<Vec<CategoryInfo>> {
        self.categories(PROFESSIONAL_CATEGORIES_PATH).await
    }
}
