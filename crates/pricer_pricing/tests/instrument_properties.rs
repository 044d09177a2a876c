//! Cross-model properties of the instrument layer.
//!
//! # Test Categories
//!
//! 1. **Convergence**: lattice-routed European converges to Black-Scholes
//! 2. **No-arbitrage**: American ≥ European, put-call parity, in-out parity
//! 3. **Validation**: every variant rejects invalid contracts and markets

use approx::assert_relative_eq;
use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{OptionType, PricingModel};
use pricer_models::analytical::{AverageKind, BarrierKind};
use pricer_pricing::instruments::{
    AmericanOption, AsianOption, BarrierOption, EuropeanOption, Instrument, OptionInstrument,
};
use proptest::prelude::*;

fn market() -> MarketSnapshot {
    MarketSnapshot::new("TEST", 100.0, 0.05, 0.2)
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_lattice_european_converges_to_black_scholes() {
    let bs = EuropeanOption::new(OptionType::Call, 100.0, 1.0, "TEST").unwrap();
    let reference = bs.price(&market()).unwrap();

    let mut previous = f64::INFINITY;
    for steps in [100, 200, 500, 1000] {
        let lattice = bs
            .clone()
            .with_pricing_model(PricingModel::Binomial)
            .with_binomial_steps(steps)
            .unwrap();
        let error = (lattice.price(&market()).unwrap() - reference).abs();
        assert!(error < previous, "N={} error {} not below {}", steps, error, previous);
        previous = error;
    }
    assert!(previous < 3e-3);
}

// ============================================================================
// No-arbitrage
// ============================================================================

#[test]
fn test_put_call_parity_black_scholes() {
    for strike in [80.0, 100.0, 125.0] {
        let call = EuropeanOption::new(OptionType::Call, strike, 0.75, "TEST").unwrap();
        let put = EuropeanOption::new(OptionType::Put, strike, 0.75, "TEST").unwrap();
        let lhs = call.price(&market()).unwrap() - put.price(&market()).unwrap();
        assert_relative_eq!(lhs, 100.0 - strike * (-0.05_f64 * 0.75).exp(), epsilon = 1e-10);
    }
}

#[test]
fn test_in_out_parity_both_directions() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let vanilla = EuropeanOption::new(option_type, 100.0, 1.0, "TEST")
            .unwrap()
            .price(&market())
            .unwrap();
        for (knock_in, knock_out, barrier) in [
            (BarrierKind::DownIn, BarrierKind::DownOut, 85.0),
            (BarrierKind::UpIn, BarrierKind::UpOut, 120.0),
        ] {
            let a = BarrierOption::new(option_type, 100.0, barrier, knock_in, 1.0, "TEST").unwrap();
            let b = BarrierOption::new(option_type, 100.0, barrier, knock_out, 1.0, "TEST").unwrap();
            let sum = a.price(&market()).unwrap() + b.price(&market()).unwrap();
            assert_relative_eq!(sum, vanilla, epsilon = 1e-9);
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_every_variant_rejects_non_positive_strike_and_expiry() {
    for (strike, expiry) in [(0.0, 1.0), (-5.0, 1.0), (100.0, 0.0), (100.0, -1.0)] {
        let results = [
            EuropeanOption::new(OptionType::Call, strike, expiry, "X").map(OptionInstrument::from),
            AmericanOption::new(OptionType::Call, strike, expiry, "X").map(OptionInstrument::from),
            BarrierOption::new(OptionType::Call, strike, 90.0, BarrierKind::DownOut, expiry, "X")
                .map(OptionInstrument::from),
            AsianOption::new(OptionType::Call, strike, expiry, "X", AverageKind::Arithmetic, 12)
                .map(OptionInstrument::from),
        ];
        for result in results {
            assert!(result.unwrap_err().is_invalid_parameter());
        }
    }
}

#[test]
fn test_every_variant_rejects_non_positive_volatility() {
    let book: Vec<OptionInstrument> = vec![
        EuropeanOption::new(OptionType::Call, 100.0, 1.0, "X").unwrap().into(),
        AmericanOption::new(OptionType::Put, 100.0, 1.0, "X").unwrap().into(),
        BarrierOption::new(OptionType::Call, 100.0, 90.0, BarrierKind::DownOut, 1.0, "X")
            .unwrap()
            .into(),
        AsianOption::new(OptionType::Call, 100.0, 1.0, "X", AverageKind::Arithmetic, 12)
            .unwrap()
            .into(),
    ];
    for vol in [0.0, -0.2] {
        let bad = market().with_volatility(vol);
        for instrument in &book {
            assert!(instrument.price(&bad).unwrap_err().is_invalid_parameter());
            assert!(instrument.gamma(&bad).unwrap_err().is_invalid_parameter());
            assert!(instrument.theta(&bad).unwrap_err().is_invalid_parameter());
        }
    }
}

#[test]
fn test_lattice_domain_error_surfaces() {
    let option = EuropeanOption::new(OptionType::Call, 100.0, 1.0, "X")
        .unwrap()
        .with_pricing_model(PricingModel::Binomial)
        .with_binomial_steps(1)
        .unwrap();
    let err = option
        .price(&MarketSnapshot::new("X", 100.0, 0.5, 0.01))
        .unwrap_err();
    assert!(err.is_numerical_domain());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_american_at_least_european(
        spot in 70.0f64..130.0,
        strike in 70.0f64..130.0,
        vol in 0.1f64..0.4,
        expiry in 0.25f64..2.0,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let md = MarketSnapshot::new("P", spot, 0.03, vol);
        let american = AmericanOption::new(option_type, strike, expiry, "P").unwrap();
        let european = EuropeanOption::new(option_type, strike, expiry, "P")
            .unwrap()
            .with_pricing_model(PricingModel::Binomial);
        prop_assert!(american.price(&md).unwrap() >= european.price(&md).unwrap() - 1e-12);
    }

    #[test]
    fn prop_put_call_parity(
        spot in 10.0f64..400.0,
        strike in 10.0f64..400.0,
        rate in -0.02f64..0.12,
        expiry in 0.05f64..5.0,
        vol in 0.05f64..1.0,
    ) {
        let md = MarketSnapshot::new("P", spot, rate, vol);
        let call = EuropeanOption::new(OptionType::Call, strike, expiry, "P").unwrap();
        let put = EuropeanOption::new(OptionType::Put, strike, expiry, "P").unwrap();
        let lhs = call.price(&md).unwrap() - put.price(&md).unwrap();
        let rhs = spot - strike * (-rate * expiry).exp();
        prop_assert!(
            (lhs - rhs).abs() <= 1e-9 * (spot + strike),
            "C - P = {} but S - K·e^(-rT) = {}", lhs, rhs
        );
    }

    #[test]
    fn prop_barrier_never_exceeds_vanilla(
        strike in 80.0f64..120.0,
        barrier in 60.0f64..95.0,
        vol in 0.1f64..0.4,
    ) {
        let vanilla = EuropeanOption::new(OptionType::Call, strike, 1.0, "P").unwrap();
        let knock_out = BarrierOption::new(OptionType::Call, strike, barrier, BarrierKind::DownOut, 1.0, "P").unwrap();
        let md = market().with_volatility(vol);
        prop_assert!(knock_out.price(&md).unwrap() <= vanilla.price(&md).unwrap() + 1e-10);
        prop_assert!(knock_out.price(&md).unwrap() >= 0.0);
    }
}
