//! Immutable market snapshot consumed by every pricing entry point.

use super::error::MarketDataError;
use crate::types::PricingResult;

/// Spot, continuously-compounded risk-free rate and lognormal volatility
/// for one underlying.
///
/// Values are not validated on construction; instruments call
/// [`MarketSnapshot::validate`] before any numeric work.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
///
/// let md = MarketSnapshot::new("AAPL", 100.0, 0.05, 0.2);
/// assert!(md.validate().is_ok());
/// assert!(md.with_volatility(0.0).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    /// Underlying identifier
    pub asset_id: String,
    /// Current spot price (> 0)
    pub spot: f64,
    /// Continuously-compounded risk-free rate
    pub rate: f64,
    /// Annualised volatility (> 0)
    pub volatility: f64,
}

impl MarketSnapshot {
    /// Creates a snapshot.
    pub fn new(asset_id: impl Into<String>, spot: f64, rate: f64, volatility: f64) -> Self {
        Self {
            asset_id: asset_id.into(),
            spot,
            rate,
            volatility,
        }
    }

    /// Checks spot > 0, volatility > 0 and a finite rate.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the offending field.
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(MarketDataError::InvalidSpot { spot: self.spot }.into());
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(MarketDataError::InvalidVolatility {
                volatility: self.volatility,
            }
            .into());
        }
        if !self.rate.is_finite() {
            return Err(MarketDataError::InvalidRate { rate: self.rate }.into());
        }
        Ok(())
    }

    /// Copy with a different spot.
    #[inline]
    pub fn with_spot(&self, spot: f64) -> Self {
        Self {
            spot,
            ..self.clone()
        }
    }

    /// Copy with a different volatility.
    #[inline]
    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self {
            volatility,
            ..self.clone()
        }
    }

    /// Copy with a different rate.
    #[inline]
    pub fn with_rate(&self, rate: f64) -> Self {
        Self {
            rate,
            ..self.clone()
        }
    }
}
