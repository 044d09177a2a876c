//! Option vocabulary shared by every pricing layer.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::option::{OptionType, PricingModel};
//!
//! assert_eq!(OptionType::Put.intrinsic(90.0_f64, 100.0), 10.0);
//! assert_eq!("merton".parse::<PricingModel>().unwrap(), PricingModel::MertonJumpDiffusion);
//! ```

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::PricingError;

/// Payoff direction of a vanilla-style option.
///
/// # Variants
/// - `Call`: pays max(S - K, 0)
/// - `Put`: pays max(K - S, 0)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// Immediate exercise value for the given spot and strike.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    ///
    /// assert_eq!(OptionType::Call.intrinsic(110.0_f64, 100.0), 10.0);
    /// assert_eq!(OptionType::Call.intrinsic(90.0_f64, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionType::Call => (spot - strike).max(T::zero()),
            OptionType::Put => (strike - spot).max(T::zero()),
        }
    }

    /// +1 for calls, -1 for puts.
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            OptionType::Call => T::one(),
            OptionType::Put => -T::one(),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    /// Parses `call` / `put` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidParameter(format!(
                "unknown option type '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine selection for European options.
///
/// # Variants
/// - `BlackScholes`: closed-form lognormal pricing (default)
/// - `Binomial`: Cox-Ross-Rubinstein lattice without early exercise
/// - `MertonJumpDiffusion`: Poisson-weighted series of Black-Scholes terms
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PricingModel {
    /// Closed-form Black-Scholes
    #[default]
    BlackScholes,
    /// Binomial lattice
    Binomial,
    /// Merton jump-diffusion series
    MertonJumpDiffusion,
}

impl PricingModel {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            PricingModel::BlackScholes => "black_scholes",
            PricingModel::Binomial => "binomial",
            PricingModel::MertonJumpDiffusion => "merton",
        }
    }
}

impl FromStr for PricingModel {
    type Err = PricingError;

    /// Accepts `black_scholes`/`bs`, `binomial`/`crr`, `merton`/`jump_diffusion`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "black_scholes" | "blackscholes" | "bs" => Ok(PricingModel::BlackScholes),
            "binomial" | "crr" | "lattice" => Ok(PricingModel::Binomial),
            "merton" | "merton_jump_diffusion" | "jump_diffusion" => {
                Ok(PricingModel::MertonJumpDiffusion)
            }
            _ => Err(PricingError::InvalidParameter(format!(
                "unknown pricing model '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_intrinsic_call() {
        assert_eq!(OptionType::Call.intrinsic(110.0_f64, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(100.0_f64, 100.0), 0.0);
        assert_eq!(OptionType::Call.intrinsic(80.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_intrinsic_put() {
        assert_eq!(OptionType::Put.intrinsic(80.0_f64, 100.0), 20.0);
        assert_eq!(OptionType::Put.intrinsic(120.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_intrinsic_near_the_money() {
        assert_relative_eq!(OptionType::Put.intrinsic(99.9_f64, 100.0), 0.1, epsilon = 1e-12);
        assert_relative_eq!(OptionType::Call.intrinsic(100.3_f64, 100.0), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_intrinsic_f32() {
        assert_eq!(OptionType::Call.intrinsic(3.0_f32, 1.0), 2.0);
    }

    #[test]
    fn test_sign() {
        assert_eq!(OptionType::Call.sign::<f64>(), 1.0);
        assert_eq!(OptionType::Put.sign::<f64>(), -1.0);
    }

    #[test]
    fn test_option_type_from_str() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!(" Call ".parse::<OptionType>().unwrap(), OptionType::Call);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_option_type_display_round_trip() {
        for ty in [OptionType::Call, OptionType::Put] {
            assert_eq!(ty.to_string().parse::<OptionType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_pricing_model_from_str() {
        assert_eq!(
            "black-scholes".parse::<PricingModel>().unwrap(),
            PricingModel::BlackScholes
        );
        assert_eq!("crr".parse::<PricingModel>().unwrap(), PricingModel::Binomial);
        assert_eq!(
            "Jump_Diffusion".parse::<PricingModel>().unwrap(),
            PricingModel::MertonJumpDiffusion
        );

        let err = "heston".parse::<PricingModel>().unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_pricing_model_default() {
        assert_eq!(PricingModel::default(), PricingModel::BlackScholes);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&OptionType::Put).unwrap();
        assert_eq!(json, "\"put\"");

        let model: PricingModel = serde_json::from_str("\"merton_jump_diffusion\"").unwrap();
        assert_eq!(model, PricingModel::MertonJumpDiffusion);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_intrinsic_non_negative(spot in 0.01..1000.0_f64, strike in 0.01..1000.0_f64) {
                prop_assert!(OptionType::Call.intrinsic(spot, strike) >= 0.0);
                prop_assert!(OptionType::Put.intrinsic(spot, strike) >= 0.0);
            }

            #[test]
            fn test_intrinsic_parity(spot in 0.01..1000.0_f64, strike in 0.01..1000.0_f64) {
                // max(S-K,0) - max(K-S,0) = S - K
                let diff = OptionType::Call.intrinsic(spot, strike)
                    - OptionType::Put.intrinsic(spot, strike);
                prop_assert!((diff - (spot - strike)).abs() < 1e-9);
            }
        }
    }
}
