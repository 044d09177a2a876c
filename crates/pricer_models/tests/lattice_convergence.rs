//! Lattice behaviour against the closed forms.
//!
//! # Test Categories
//!
//! 1. **Convergence**: European lattice error shrinks towards Black-Scholes
//! 2. **Early exercise**: American values dominate European values
//! 3. **Domain errors**: Arbitrage-admitting discretisations are rejected

use approx::assert_relative_eq;
use pricer_core::types::{OptionType, PricingError};
use pricer_models::analytical::BlackScholes;
use pricer_models::lattice::{american_price, build_tree, european_price, ExerciseStyle};
use proptest::prelude::*;

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const RATE: f64 = 0.05;
const EXPIRY: f64 = 1.0;
const VOL: f64 = 0.2;

fn bs_call() -> f64 {
    BlackScholes::new(SPOT, RATE, VOL)
        .unwrap()
        .price(OptionType::Call, STRIKE, EXPIRY)
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_european_error_decreases_with_steps() {
    let reference = bs_call();
    let errors: Vec<f64> = [100, 200, 500, 1000]
        .iter()
        .map(|&n| {
            let price = european_price(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Call, n).unwrap();
            (price - reference).abs()
        })
        .collect();

    for pair in errors.windows(2) {
        assert!(pair[1] < pair[0], "errors not decreasing: {:?}", errors);
    }
    assert!(errors[2] < 5e-3, "N=500 error {}", errors[2]);
}

#[test]
fn test_european_within_tenth_of_a_cent_at_high_resolution() {
    let price = european_price(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Call, 4000).unwrap();
    assert!((price - bs_call()).abs() < 1e-3);
}

#[test]
fn test_european_put_converges() {
    let reference = BlackScholes::new(SPOT, RATE, VOL)
        .unwrap()
        .price(OptionType::Put, STRIKE, EXPIRY);
    let price = european_price(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Put, 1000).unwrap();
    assert_relative_eq!(price, reference, epsilon = 3e-3);
}

// ============================================================================
// Early exercise
// ============================================================================

#[test]
fn test_american_put_reference_values() {
    let price = american_price(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Put, 500).unwrap();
    assert_relative_eq!(price, 6.088_810_110_702_636, epsilon = 1e-8);

    let price = american_price(SPOT, 110.0, RATE, EXPIRY, 0.3, OptionType::Put, 200).unwrap();
    assert_relative_eq!(price, 15.625_332_040_296_78, epsilon = 1e-8);
}

#[test]
fn test_american_call_flags_no_early_exercise() {
    for strike in [80.0, 100.0, 120.0] {
        let grid = build_tree(SPOT, strike, RATE, EXPIRY, VOL, OptionType::Call, 150, ExerciseStyle::American)
            .unwrap();
        assert!(!grid.has_early_exercise(), "strike {}", strike);
    }
}

#[test]
fn test_grid_root_matches_scalar_price() {
    let grid = build_tree(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Put, 120, ExerciseStyle::American)
        .unwrap();
    let scalar = american_price(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Put, 120).unwrap();
    assert_eq!(grid.price(), scalar);
}

// ============================================================================
// Domain errors
// ============================================================================

#[test]
fn test_probability_out_of_range_is_numerical_domain() {
    let err = european_price(SPOT, STRIKE, 0.5, EXPIRY, 0.01, OptionType::Call, 1).unwrap_err();
    assert!(err.is_numerical_domain(), "{:?}", err);
}

#[test]
fn test_invalid_inputs_are_invalid_parameter() {
    let cases = [
        european_price(SPOT, STRIKE, RATE, EXPIRY, VOL, OptionType::Call, 0),
        european_price(SPOT, STRIKE, RATE, EXPIRY, 0.0, OptionType::Call, 10),
        european_price(SPOT, STRIKE, RATE, 0.0, VOL, OptionType::Call, 10),
        european_price(0.0, STRIKE, RATE, EXPIRY, VOL, OptionType::Call, 10),
        european_price(SPOT, -1.0, RATE, EXPIRY, VOL, OptionType::Call, 10),
        european_price(SPOT, STRIKE, f64::NAN, EXPIRY, VOL, OptionType::Call, 10),
    ];
    for result in cases {
        assert!(matches!(result, Err(PricingError::InvalidParameter(_))), "{:?}", result);
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_american_dominates_european(
        spot in 60.0f64..140.0,
        strike in 60.0f64..140.0,
        rate in 0.0f64..0.08,
        vol in 0.1f64..0.5,
        expiry in 0.1f64..2.0,
        steps in 10usize..150,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let european = european_price(spot, strike, rate, expiry, vol, option_type, steps).unwrap();
        let american = american_price(spot, strike, rate, expiry, vol, option_type, steps).unwrap();
        prop_assert!(american >= european - 1e-12);
        prop_assert!(american >= option_type.intrinsic(spot, strike) - 1e-12);
    }

    #[test]
    fn prop_european_prices_within_no_arbitrage_bounds(
        spot in 60.0f64..140.0,
        strike in 60.0f64..140.0,
        vol in 0.1f64..0.5,
        steps in 1usize..100,
    ) {
        let call = european_price(spot, strike, RATE, EXPIRY, vol, OptionType::Call, steps).unwrap();
        let lower = (spot - strike * (-RATE * EXPIRY).exp()).max(0.0);
        prop_assert!(call >= lower - 1e-9);
        prop_assert!(call <= spot + 1e-9);
    }
}
