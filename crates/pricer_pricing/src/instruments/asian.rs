//! Discrete-average Asian option.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{OptionType, PricingResult};
use pricer_models::analytical::{geometric_asian_price, AverageKind, GeometricAsianParams};
use tracing::debug;

use super::error::{check_contract, InstrumentError};
use super::traits::Instrument;
use crate::greeks::FiniteDifference;
use crate::mc::{ArithmeticAsianMc, AsianPathSpec, MonteCarloConfig};

/// Asian option on `num_fixings` equally spaced observations.
///
/// - `Geometric`: closed form; `running_sum` holds the running *product*
///   of observed fixings
/// - `Arithmetic`: seeded Monte Carlo; `running_sum` holds the sum of
///   observed fixings
///
/// Remaining fixings fall at `t_i = i·T/m` for the `m` still to come. Monte
/// Carlo Greeks reuse the configured seed at every bump.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::AverageKind;
/// use pricer_pricing::instruments::{AsianOption, Instrument};
///
/// let market = MarketSnapshot::new("SPX", 100.0, 0.05, 0.2);
/// let geometric = AsianOption::new(OptionType::Call, 100.0, 1.0, "SPX", AverageKind::Geometric, 12).unwrap();
/// assert!((geometric.price(&market).unwrap() - 5.940_200_2).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsianOption {
    option_type: OptionType,
    strike: f64,
    expiry: f64,
    asset_id: String,
    average_kind: AverageKind,
    num_fixings: usize,
    past_fixings: usize,
    running_sum: f64,
    mc: MonteCarloConfig,
}

impl AsianOption {
    /// Creates an unseasoned Asian option with the default Monte Carlo
    /// settings.
    pub fn new(
        option_type: OptionType,
        strike: f64,
        expiry: f64,
        asset_id: impl Into<String>,
        average_kind: AverageKind,
        num_fixings: usize,
    ) -> PricingResult<Self> {
        let option = Self {
            option_type,
            strike,
            expiry,
            asset_id: asset_id.into(),
            average_kind,
            num_fixings,
            past_fixings: 0,
            running_sum: 0.0,
            mc: MonteCarloConfig::default(),
        };
        option.validate_parameters()?;
        Ok(option)
    }

    /// Records already observed fixings.
    ///
    /// `running_sum` is the sum of the observed fixings for arithmetic
    /// averages and their product for geometric averages.
    pub fn with_history(mut self, past_fixings: usize, running_sum: f64) -> PricingResult<Self> {
        self.past_fixings = past_fixings;
        self.running_sum = running_sum;
        self.validate_parameters()?;
        Ok(self)
    }

    /// Replaces the Monte Carlo settings used for arithmetic averages.
    pub fn with_mc_config(mut self, config: MonteCarloConfig) -> Self {
        self.mc = config;
        self
    }

    /// Payoff direction.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Averaging method.
    #[inline]
    pub fn average_kind(&self) -> AverageKind {
        self.average_kind
    }

    /// Total number of fixings.
    #[inline]
    pub fn num_fixings(&self) -> usize {
        self.num_fixings
    }

    /// Fixings already observed.
    #[inline]
    pub fn past_fixings(&self) -> usize {
        self.past_fixings
    }

    /// Sum (arithmetic) or product (geometric) of observed fixings.
    #[inline]
    pub fn running_sum(&self) -> f64 {
        self.running_sum
    }

    /// Monte Carlo settings.
    #[inline]
    pub fn mc_config(&self) -> &MonteCarloConfig {
        &self.mc
    }

    fn value(&self, market: &MarketSnapshot, expiry: f64) -> PricingResult<f64> {
        match self.average_kind {
            AverageKind::Geometric => {
                let params = GeometricAsianParams::new(
                    market.spot,
                    self.strike,
                    market.rate,
                    market.volatility,
                    expiry,
                    self.num_fixings,
                )
                .with_history(self.past_fixings, self.running_sum);
                Ok(geometric_asian_price(self.option_type, &params)?.price)
            }
            AverageKind::Arithmetic => {
                let spec = AsianPathSpec {
                    spot: market.spot,
                    strike: self.strike,
                    rate: market.rate,
                    volatility: market.volatility,
                    expiry,
                    option_type: self.option_type,
                    num_fixings: self.num_fixings,
                    past_fixings: self.past_fixings,
                    running_sum: self.running_sum,
                };
                Ok(ArithmeticAsianMc::new(self.mc).price(&spec)?.price)
            }
        }
    }

    fn spot_bump(&self, fd: &FiniteDifference, spot: f64) -> f64 {
        match self.average_kind {
            AverageKind::Arithmetic => fd.bumps().simulation_spot_bump(spot),
            AverageKind::Geometric => fd.bumps().spot_bump(spot),
        }
    }
}

impl Instrument for AsianOption {
    fn price(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        debug!(
            asset_id = %self.asset_id,
            average = %self.average_kind,
            fixings = self.num_fixings,
            past_fixings = self.past_fixings,
            "pricing Asian option"
        );
        self.value(market, self.expiry)
    }

    fn delta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        let fd = FiniteDifference::default();
        let h = self.spot_bump(&fd, market.spot);
        fd.delta(market, h, |m| self.value(m, self.expiry))
    }

    fn gamma(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        let fd = FiniteDifference::default();
        let h = self.spot_bump(&fd, market.spot);
        fd.gamma(market, h, |m| self.value(m, self.expiry))
    }

    fn vega(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        FiniteDifference::default().vega(market, |m| self.value(m, self.expiry))
    }

    fn theta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        FiniteDifference::default().theta(self.expiry, |t| self.value(market, t))
    }

    fn rho(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        FiniteDifference::default().rho(market, |m| self.value(m, self.expiry))
    }

    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn instrument_type(&self) -> &'static str {
        "Asian Option"
    }

    fn validate_parameters(&self) -> PricingResult<()> {
        check_contract(self.strike, self.expiry)?;
        if self.num_fixings == 0 {
            return Err(InstrumentError::InvalidFixings {
                message: "num_fixings must be at least 1".to_string(),
            }
            .into());
        }
        if self.past_fixings > self.num_fixings {
            return Err(InstrumentError::InvalidFixings {
                message: format!(
                    "past_fixings {} exceeds num_fixings {}",
                    self.past_fixings, self.num_fixings
                ),
            }
            .into());
        }
        if !self.running_sum.is_finite() || self.running_sum < 0.0 {
            return Err(InstrumentError::InvalidFixings {
                message: format!("running_sum must be non-negative, got {}", self.running_sum),
            }
            .into());
        }
        if self.average_kind == AverageKind::Geometric
            && self.past_fixings > 0
            && self.running_sum <= 0.0
        {
            return Err(InstrumentError::InvalidFixings {
                message: "geometric running product must be positive".to_string(),
            }
            .into());
        }
        self.mc.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market() -> MarketSnapshot {
        MarketSnapshot::new("TEST", 100.0, 0.05, 0.2)
    }

    fn asian(kind: AverageKind) -> AsianOption {
        AsianOption::new(OptionType::Call, 100.0, 1.0, "TEST", kind, 12).unwrap()
    }

    // ==========================================================
    // Geometric
    // ==========================================================

    #[test]
    fn test_geometric_reference_prices() {
        assert_relative_eq!(
            asian(AverageKind::Geometric).price(&market()).unwrap(),
            5.940_200_221_633_52,
            epsilon = 1e-10
        );

        let seasoned = asian(AverageKind::Geometric)
            .with_history(4, 98.0 * 102.0 * 101.0 * 99.0)
            .unwrap();
        assert_relative_eq!(seasoned.price(&market()).unwrap(), 3.972_600_626_544, epsilon = 1e-9);
    }

    #[test]
    fn test_geometric_greeks_are_sensible() {
        let greeks = asian(AverageKind::Geometric).greeks(&market()).unwrap();
        assert!(greeks.is_finite());
        assert!(greeks.delta > 0.0 && greeks.delta < 1.0);
        assert!(greeks.gamma > 0.0);
        assert!(greeks.vega > 0.0);
        assert!(greeks.rho > 0.0);
    }

    #[test]
    fn test_geometric_history_needs_positive_product() {
        let err = asian(AverageKind::Geometric).with_history(3, 0.0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    // ==========================================================
    // Arithmetic
    // ==========================================================

    #[test]
    fn test_arithmetic_price_near_reference() {
        let price = asian(AverageKind::Arithmetic).price(&market()).unwrap();
        assert!((price - 6.156).abs() < 0.02, "price {}", price);
    }

    #[test]
    fn test_arithmetic_fully_fixed() {
        let fixed = asian(AverageKind::Arithmetic)
            .with_history(12, 12.0 * 103.0)
            .unwrap();
        assert_relative_eq!(
            fixed.price(&market()).unwrap(),
            3.0 * (-0.05_f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_arithmetic_greeks_use_common_random_numbers() {
        let option = asian(AverageKind::Arithmetic).with_mc_config(
            MonteCarloConfig::builder().n_paths(5_000).build().unwrap(),
        );
        let greeks = option.greeks(&market()).unwrap();
        assert!(greeks.is_finite());
        assert!(greeks.delta > 0.4 && greeks.delta < 0.8, "delta {}", greeks.delta);
        assert!(greeks.gamma > 0.0 && greeks.gamma < 0.1, "gamma {}", greeks.gamma);
        assert!(greeks.vega > 0.0, "vega {}", greeks.vega);
        assert!(greeks.theta < 0.0, "theta {}", greeks.theta);
    }

    #[test]
    fn test_seeded_price_is_reproducible() {
        let option = asian(AverageKind::Arithmetic);
        assert_eq!(option.price(&market()).unwrap(), option.price(&market()).unwrap());
    }

    // ==========================================================
    // Validation
    // ==========================================================

    #[test]
    fn test_validation() {
        assert!(AsianOption::new(OptionType::Put, 0.0, 1.0, "X", AverageKind::Arithmetic, 12).is_err());
        assert!(AsianOption::new(OptionType::Put, 100.0, 0.0, "X", AverageKind::Arithmetic, 12).is_err());
        assert!(AsianOption::new(OptionType::Put, 100.0, 1.0, "X", AverageKind::Arithmetic, 0).is_err());
        assert!(asian(AverageKind::Arithmetic).with_history(13, 1_300.0).is_err());
        assert!(asian(AverageKind::Arithmetic).with_history(2, -5.0).is_err());
    }
}
