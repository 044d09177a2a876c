//! European option routed by pricing model.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{OptionType, PricingModel, PricingResult};
use pricer_models::analytical::{BlackScholes, JumpParams, MertonJumpDiffusion};
use pricer_models::lattice::european_price;
use tracing::debug;

use super::error::{check_contract, InstrumentError};
use super::traits::Instrument;
use super::DEFAULT_BINOMIAL_STEPS;
use crate::greeks::FiniteDifference;

/// European option.
///
/// | Model | Price | Greeks |
/// |-------|-------|--------|
/// | `BlackScholes` | closed form | analytic |
/// | `Binomial` | CRR lattice, no early exercise | finite differences, lattice-wide spot bump |
/// | `MertonJumpDiffusion` | Poisson series | finite differences |
///
/// Spot bumps for delta and gamma differ by model. Merton uses `1e-4·S`.
/// The lattice uses one recombination level,
/// `h = S·(exp(2σ√(T/N)) − 1)`, floored at `1e-4·S` and capped at `0.5·S`:
/// about `0.04·S` for σ = 0.2, T = 1 and the default N = 100. See
/// [`lattice_spot_bump`](crate::greeks::lattice_spot_bump).
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::{OptionType, PricingModel};
/// use pricer_pricing::instruments::{EuropeanOption, Instrument};
///
/// let market = MarketSnapshot::new("SPX", 100.0, 0.05, 0.2);
/// let call = EuropeanOption::new(OptionType::Call, 100.0, 1.0, "SPX").unwrap();
/// assert!((call.price(&market).unwrap() - 10.450_583_6).abs() < 1e-6);
///
/// let lattice = call.with_pricing_model(PricingModel::Binomial);
/// assert!((lattice.price(&market).unwrap() - 10.430_611_7).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanOption {
    option_type: OptionType,
    strike: f64,
    expiry: f64,
    asset_id: String,
    pricing_model: PricingModel,
    binomial_steps: usize,
    jump: JumpParams,
}

impl EuropeanOption {
    /// Creates a Black-Scholes-priced option with 100 lattice steps and no
    /// jumps.
    ///
    /// # Errors
    /// `InvalidParameter` for a non-positive strike or expiry.
    pub fn new(
        option_type: OptionType,
        strike: f64,
        expiry: f64,
        asset_id: impl Into<String>,
    ) -> PricingResult<Self> {
        check_contract(strike, expiry)?;
        Ok(Self {
            option_type,
            strike,
            expiry,
            asset_id: asset_id.into(),
            pricing_model: PricingModel::BlackScholes,
            binomial_steps: DEFAULT_BINOMIAL_STEPS,
            jump: JumpParams::none(),
        })
    }

    /// Selects the pricing model.
    pub fn with_pricing_model(mut self, model: PricingModel) -> Self {
        self.pricing_model = model;
        self
    }

    /// Sets the lattice resolution used by [`PricingModel::Binomial`].
    pub fn with_binomial_steps(mut self, steps: usize) -> PricingResult<Self> {
        if steps < 1 {
            return Err(InstrumentError::InvalidSteps { steps }.into());
        }
        self.binomial_steps = steps;
        Ok(self)
    }

    /// Sets the jump parameters used by [`PricingModel::MertonJumpDiffusion`].
    pub fn with_jump(mut self, jump: JumpParams) -> PricingResult<Self> {
        jump.validate()?;
        self.jump = jump;
        Ok(self)
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

    /// Pricing model.
    #[inline]
    pub fn pricing_model(&self) -> PricingModel {
        self.pricing_model
    }

    /// Lattice steps.
    #[inline]
    pub fn binomial_steps(&self) -> usize {
        self.binomial_steps
    }

    /// Jump parameters.
    #[inline]
    pub fn jump(&self) -> &JumpParams {
        &self.jump
    }

    fn black_scholes(&self, market: &MarketSnapshot) -> PricingResult<BlackScholes<f64>> {
        Ok(BlackScholes::new(market.spot, market.rate, market.volatility)?)
    }

    fn value(&self, market: &MarketSnapshot, expiry: f64) -> PricingResult<f64> {
        match self.pricing_model {
            PricingModel::BlackScholes => {
                Ok(self.black_scholes(market)?.price(self.option_type, self.strike, expiry))
            }
            PricingModel::Binomial => european_price(
                market.spot,
                self.strike,
                market.rate,
                expiry,
                market.volatility,
                self.option_type,
                self.binomial_steps,
            ),
            PricingModel::MertonJumpDiffusion => {
                let model = MertonJumpDiffusion::new(
                    market.spot,
                    market.rate,
                    market.volatility,
                    self.jump,
                )?;
                Ok(model.price(self.option_type, self.strike, expiry)?)
            }
        }
    }

    fn spot_bump(&self, fd: &FiniteDifference, market: &MarketSnapshot) -> f64 {
        match self.pricing_model {
            PricingModel::Binomial => fd.bumps().lattice_spot_bump(
                market.spot,
                market.volatility,
                self.expiry,
                self.binomial_steps,
            ),
            _ => fd.bumps().spot_bump(market.spot),
        }
    }
}

impl Instrument for EuropeanOption {
    fn price(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        debug!(
            asset_id = %self.asset_id,
            model = %self.pricing_model,
            option_type = %self.option_type,
            "pricing European option"
        );
        self.value(market, self.expiry)
    }

    fn delta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        if self.pricing_model == PricingModel::BlackScholes {
            return Ok(self
                .black_scholes(market)?
                .delta(self.option_type, self.strike, self.expiry));
        }
        let fd = FiniteDifference::default();
        let h = self.spot_bump(&fd, market);
        fd.delta(market, h, |m| self.value(m, self.expiry))
    }

    fn gamma(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        if self.pricing_model == PricingModel::BlackScholes {
            return Ok(self.black_scholes(market)?.gamma(self.strike, self.expiry));
        }
        let fd = FiniteDifference::default();
        let h = self.spot_bump(&fd, market);
        fd.gamma(market, h, |m| self.value(m, self.expiry))
    }

    fn vega(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        if self.pricing_model == PricingModel::BlackScholes {
            return Ok(self.black_scholes(market)?.vega(self.strike, self.expiry));
        }
        FiniteDifference::default().vega(market, |m| self.value(m, self.expiry))
    }

    fn theta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        if self.pricing_model == PricingModel::BlackScholes {
            return Ok(self
                .black_scholes(market)?
                .theta(self.option_type, self.strike, self.expiry));
        }
        FiniteDifference::default().theta(self.expiry, |t| self.value(market, t))
    }

    fn rho(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        if self.pricing_model == PricingModel::BlackScholes {
            return Ok(self
                .black_scholes(market)?
                .rho(self.option_type, self.strike, self.expiry));
        }
        FiniteDifference::default().rho(market, |m| self.value(m, self.expiry))
    }

    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn instrument_type(&self) -> &'static str {
        "European Option"
    }

    fn validate_parameters(&self) -> PricingResult<()> {
        check_contract(self.strike, self.expiry)?;
        if self.binomial_steps < 1 {
            return Err(InstrumentError::InvalidSteps {
                steps: self.binomial_steps,
            }
            .into());
        }
        self.jump.validate()?;
        Ok(())
    }
}
