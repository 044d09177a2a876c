//! Bump sizes for finite-difference Greeks.

/// Bump sizes per input.
///
/// Spot bumps are relative to the spot; the others are absolute.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::BumpSizes;
///
/// let bumps = BumpSizes::default();
/// assert_eq!(bumps.spot_bump(200.0), 0.02);
/// assert_eq!(bumps.time, 1.0 / 365.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpSizes {
    /// Relative spot bump for deterministic engines
    pub spot_relative: f64,
    /// Relative spot bump for simulation engines
    pub simulation_spot_relative: f64,
    /// Absolute volatility bump
    pub volatility: f64,
    /// Time bump in years
    pub time: f64,
    /// Absolute rate bump
    pub rate: f64,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            spot_relative: 1e-4,
            simulation_spot_relative: 1e-2,
            volatility: 1e-4,
            time: 1.0 / 365.0,
            rate: 1e-4,
        }
    }
}

impl BumpSizes {
    /// Absolute spot bump for closed-form pricing.
    #[inline]
    pub fn spot_bump(&self, spot: f64) -> f64 {
        self.spot_relative * spot
    }

    /// Absolute spot bump for Monte Carlo pricing.
    #[inline]
    pub fn simulation_spot_bump(&self, spot: f64) -> f64 {
        self.simulation_spot_relative * spot
    }

    /// Absolute spot bump for a `steps`-step lattice.
    ///
    /// See [`lattice_spot_bump`].
    #[inline]
    pub fn lattice_spot_bump(&self, spot: f64, volatility: f64, expiry: f64, steps: usize) -> f64 {
        lattice_spot_bump(spot, volatility, expiry, steps, self.spot_relative)
    }

    /// Time bump for an option with `expiry` left, capped at half the expiry.
    #[inline]
    pub fn time_bump(&self, expiry: f64) -> f64 {
        self.time.min(0.5 * expiry)
    }
}

/// Spot bump wide enough to span one recombination level of the lattice.
///
/// Neighbouring terminal nodes sit a factor `u² = exp(2σ√(T/N))` apart; a
/// narrower bump only moves the root along a piecewise-linear segment of
/// the terminal payoff and gamma collapses to noise. The bump never exceeds
/// half the spot.
///
/// ```rust
/// use pricer_pricing::greeks::lattice_spot_bump;
///
/// let h = lattice_spot_bump(100.0, 0.2, 1.0, 100, 1e-4);
/// assert!((h - 100.0 * (0.04_f64.exp() - 1.0)).abs() < 1e-12);
/// ```
pub fn lattice_spot_bump(
    spot: f64,
    volatility: f64,
    expiry: f64,
    steps: usize,
    relative: f64,
) -> f64 {
    let dt = expiry / steps.max(1) as f64;
    let level = spot * ((2.0 * volatility * dt.sqrt()).exp() - 1.0);
    level.min(0.5 * spot).max(relative * spot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_sizes() {
        let bumps = BumpSizes::default();
        assert_eq!(bumps.spot_relative, 1e-4);
        assert_eq!(bumps.simulation_spot_relative, 1e-2);
        assert_eq!(bumps.volatility, 1e-4);
        assert_eq!(bumps.rate, 1e-4);
        assert_relative_eq!(bumps.time, 1.0 / 365.0);
    }

    #[test]
    fn test_time_bump_capped_at_half_expiry() {
        let bumps = BumpSizes::default();
        assert_eq!(bumps.time_bump(1.0), 1.0 / 365.0);
        assert_eq!(bumps.time_bump(0.002), 0.001);
    }

    #[test]
    fn test_lattice_bump_shrinks_with_steps() {
        let coarse = lattice_spot_bump(100.0, 0.2, 1.0, 50, 1e-4);
        let fine = lattice_spot_bump(100.0, 0.2, 1.0, 5_000, 1e-4);
        assert!(fine < coarse);
        assert!(fine > 1e-2);
    }

    #[test]
    fn test_lattice_bump_ceiling() {
        let h = lattice_spot_bump(100.0, 1.5, 1.0, 1, 1e-4);
        assert_eq!(h, 50.0);
    }

    #[test]
    fn test_lattice_bump_floor() {
        // Tiny volatility leaves the relative bump in charge
        let h = lattice_spot_bump(100.0, 1e-8, 1.0, 100, 1e-4);
        assert_eq!(h, 1e-2);
    }
}
