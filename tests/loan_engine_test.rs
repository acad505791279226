use loansim::domain::loan::{LoanTerms, compute_loan};
use loansim::error::LoanError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_cost_minus_interest_is_principal() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let principal = Decimal::new(rng.gen_range(1_000_00..=2_000_000_00), 2);
        let years = rng.gen_range(1..=35);
        let rate = Decimal::new(rng.gen_range(0..=800), 2);

        let terms = LoanTerms::new(principal, years, rate).unwrap();
        let quote = compute_loan(&terms).unwrap();

        assert_eq!(quote.loan_amount, principal);
        assert!(
            (quote.total_cost - quote.total_interest - principal).abs() <= dec!(0.01),
            "principal {principal}, {years} years at {rate}%"
        );
        assert!(quote.total_interest >= Decimal::ZERO);
    }
}

#[test]
fn test_reference_mortgage() {
    let terms = LoanTerms::new(dec!(250000), 20, dec!(1.7)).unwrap();
    let quote = compute_loan(&terms).unwrap();

    assert_eq!(quote.monthly_payment, dec!(1229.50));
    assert_eq!(quote.total_cost, dec!(295079.05));
    assert_eq!(quote.total_interest, dec!(45079.05));
}

#[test]
fn test_interest_free_loan() {
    let terms = LoanTerms::new(dec!(120000), 10, Decimal::ZERO).unwrap();
    let quote = compute_loan(&terms).unwrap();

    assert_eq!(quote.monthly_payment, dec!(1000.00));
    assert_eq!(quote.total_interest, dec!(0.00));
}

#[test]
fn test_tiny_rate_uses_general_formula() {
    // not exactly zero, so the general formula runs; it still converges on straight-line
    let terms = LoanTerms::new(dec!(120000), 10, dec!(0.0000001)).unwrap();
    let quote = compute_loan(&terms).unwrap();

    assert_eq!(quote.monthly_payment, dec!(1000.00));
    assert_eq!(quote.total_interest, dec!(0.00));
    assert_eq!(quote.total_cost, dec!(120000.00));
}

#[test]
fn test_duration_overflowing_months_is_rejected() {
    let result =
        LoanTerms::new(dec!(100000), 1_073_741_824, dec!(0)).and_then(|t| compute_loan(&t));
    assert!(matches!(result, Err(LoanError::InvalidInput(msg)) if msg == "loan terms overflow"));

    let result =
        LoanTerms::new(dec!(100000), 400_000_000, dec!(1)).and_then(|t| compute_loan(&t));
    assert!(matches!(result, Err(LoanError::InvalidInput(_))));
}

#[test]
fn test_amount_overflowing_decimal_is_rejected() {
    let huge = Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0);
    let terms = LoanTerms::new(huge, 1, dec!(50)).unwrap();
    let result = compute_loan(&terms);
    assert!(matches!(result, Err(LoanError::InvalidInput(msg)) if msg == "loan terms overflow"));
}

#[test]
fn test_very_long_duration_without_interest_still_amortizes() {
    let terms = LoanTerms::new(dec!(100000), 300_000_000, dec!(0)).unwrap();
    let quote = compute_loan(&terms).unwrap();
    assert_eq!(quote.monthly_payment, dec!(0.00));
    assert_eq!(quote.loan_amount, dec!(100000));
}
