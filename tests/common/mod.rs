#![allow(dead_code)]

use loansim::domain::category::{AgeCategory, ProfessionalCategory};
use loansim::domain::rate::ApplicantProfile;
use loansim::domain::simulation::NewSimulation;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn sample_simulation(first_name: &str, last_name: &str) -> NewSimulation {
    NewSimulation {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age_category: "ADULT".to_string(),
        professional_category: "EMPLOYEE".to_string(),
        monthly_net_income: dec!(3500),
        loan_amount: dec!(250000.00),
        duration_years: 20,
        annual_interest_rate: dec!(1.7),
        total_interest: dec!(45079.05),
        total_cost: dec!(295079.05),
        monthly_payment: dec!(1229.50),
    }
}

/// Income in cents between 0.01 and `max_whole` units.
pub fn random_income<R: Rng>(rng: &mut R, max_whole: i64) -> Decimal {
    Decimal::new(rng.gen_range(1..=max_whole * 100), 2)
}

pub fn random_profile<R: Rng>(rng: &mut R) -> ApplicantProfile {
    let ages = AgeCategory::ALL;
    let professions = ProfessionalCategory::ALL;
    ApplicantProfile {
        age_category: ages[rng.gen_range(0..ages.len())],
        professional_category: professions[rng.gen_range(0..professions.len())],
        monthly_income: random_income(rng, 20_000),
    }
}

pub fn json_decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("decimal fields are serialized as strings")
        .parse()
        .expect("valid decimal")
}
