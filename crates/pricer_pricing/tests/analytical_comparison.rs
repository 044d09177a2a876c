//! Monte Carlo against closed-form solutions.
//!
//! # Test Categories
//!
//! 1. **Geometric control**: simulated geometric average vs the discrete formula
//! 2. **Arithmetic Asians**: bounds and convergence with path count
//! 3. **Reproducibility**: fixed seeds give bit-identical prices

use pricer_core::types::OptionType;
use pricer_models::analytical::{geometric_asian_price, GeometricAsianParams};
use pricer_pricing::mc::{ArithmeticAsianMc, AsianPathSpec, MonteCarloConfig};

fn spec(option_type: OptionType) -> AsianPathSpec {
    AsianPathSpec {
        spot: 100.0,
        strike: 100.0,
        rate: 0.05,
        volatility: 0.2,
        expiry: 1.0,
        option_type,
        num_fixings: 12,
        past_fixings: 0,
        running_sum: 0.0,
    }
}

// ============================================================================
// Geometric control vs closed form
// ============================================================================

#[test]
fn test_simulated_geometric_average_matches_formula() {
    let config = MonteCarloConfig::builder().n_paths(100_000).build().unwrap();
    for option_type in [OptionType::Call, OptionType::Put] {
        let estimate = ArithmeticAsianMc::new(config).price(&spec(option_type)).unwrap();
        let params = GeometricAsianParams::new(100.0, 100.0, 0.05, 0.2, 1.0, 12);
        let analytical = geometric_asian_price(option_type, &params).unwrap().price;

        let error = (estimate.control_estimate - analytical).abs();
        assert!(
            error < 0.05,
            "{}: MC={:.4}, Analytical={:.4}",
            option_type,
            estimate.control_estimate,
            analytical
        );
    }
}

// ============================================================================
// Arithmetic Asians
// ============================================================================

#[test]
fn test_arithmetic_call_reference() {
    let estimate = ArithmeticAsianMc::default().price(&spec(OptionType::Call)).unwrap();
    assert!((estimate.price - 6.1559).abs() < 0.01, "price {}", estimate.price);
    assert!(estimate.std_error < 0.005);
    assert_eq!(estimate.n_samples, 20_000);
}

#[test]
fn test_arithmetic_put_call_parity_on_average() {
    // C - P = e^{-rT}(E[A] - K)
    let engine = ArithmeticAsianMc::default();
    let call = engine.price(&spec(OptionType::Call)).unwrap().price;
    let put = engine.price(&spec(OptionType::Put)).unwrap().price;
    let forward = pricer_models::analytical::expected_future_average(100.0, 0.05, 1.0, 12);
    let expected = (-0.05_f64).exp() * (forward - 100.0);
    assert!((call - put - expected).abs() < 0.02, "{} vs {}", call - put, expected);
}

#[test]
fn test_error_shrinks_with_paths() {
    let small = MonteCarloConfig::builder().n_paths(2_000).build().unwrap();
    let large = MonteCarloConfig::builder().n_paths(50_000).build().unwrap();
    let a = ArithmeticAsianMc::new(small).price(&spec(OptionType::Call)).unwrap();
    let b = ArithmeticAsianMc::new(large).price(&spec(OptionType::Call)).unwrap();
    assert!(b.std_error < a.std_error);
}

#[test]
fn test_seasoned_contract_between_bounds() {
    let seasoned = AsianPathSpec {
        past_fixings: 6,
        running_sum: 6.0 * 105.0,
        ..spec(OptionType::Call)
    };
    let estimate = ArithmeticAsianMc::default().price(&seasoned).unwrap();
    // Half the average is already locked in above the strike
    let locked = (-0.05_f64).exp() * 0.5 * 5.0;
    assert!(estimate.price > locked);
    assert!(estimate.price < 20.0);
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_fixed_seed_is_bit_reproducible() {
    let config = MonteCarloConfig::builder().n_paths(10_000).seed(2024).build().unwrap();
    let first = ArithmeticAsianMc::new(config).price(&spec(OptionType::Put)).unwrap();
    let second = ArithmeticAsianMc::new(config).price(&spec(OptionType::Put)).unwrap();
    assert_eq!(first.price.to_bits(), second.price.to_bits());
    assert_eq!(first.std_error.to_bits(), second.std_error.to_bits());
}
