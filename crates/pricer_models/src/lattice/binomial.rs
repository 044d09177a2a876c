//! Cox-Ross-Rubinstein binomial lattice.
//!
//! ```text
//! dt = T/N,  u = e^{σ√dt},  d = 1/u,  p = (e^{r·dt} - d)/(u - d)
//! ```
//!
//! Backward induction discounts `p·V_up + (1-p)·V_down` by `e^{-r·dt}`. With
//! early exercise each node takes `max(continuation, intrinsic)`; ties keep
//! the continuation value and are not flagged as exercised.
//!
//! The scalar path keeps a single `N + 1` value buffer. Requesting
//! [`LatticeOutput::FullGrid`] records every node on the same pass.

use pricer_core::types::{OptionType, PricingResult};

use super::error::LatticeError;
use super::node::{LatticeGrid, LatticeNode};

/// Whether the holder may exercise before expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercise at expiry only
    #[default]
    European,
    /// Exercise at any node
    American,
}

impl ExerciseStyle {
    /// Returns whether intermediate nodes may exercise.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

/// What an evaluation returns besides the root price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LatticeOutput {
    /// Root value only
    #[default]
    PriceOnly,
    /// Root value plus every node
    FullGrid,
}

/// CRR discretisation for one (r, σ, T, N) combination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrrParameters {
    /// Time step
    pub dt: f64,
    /// Up factor u
    pub up: f64,
    /// Down factor d = 1/u
    pub down: f64,
    /// Risk-neutral up probability
    pub probability: f64,
    /// One-step discount factor e^{-r·dt}
    pub discount: f64,
}

impl CrrParameters {
    /// Builds the discretisation.
    ///
    /// # Errors
    /// - `InvalidSteps` if `steps == 0`
    /// - `NonPositive` for volatility or expiry ≤ 0
    /// - `NonFinite` for a NaN/infinite rate
    /// - `ProbabilityOutOfRange` if `p ∉ [0, 1]`; the value is never clamped
    pub fn new(rate: f64, volatility: f64, expiry: f64, steps: usize) -> Result<Self, LatticeError> {
        if steps < 1 {
            return Err(LatticeError::InvalidSteps { steps });
        }
        positive("volatility", volatility)?;
        positive("expiry", expiry)?;
        if !rate.is_finite() {
            return Err(LatticeError::NonFinite {
                field: "rate",
                value: rate,
            });
        }

        let dt = expiry / steps as f64;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (rate * dt).exp();
        let probability = (growth - down) / (up - down);

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(LatticeError::ProbabilityOutOfRange {
                probability,
                up,
                down,
                growth,
            });
        }

        Ok(Self {
            dt,
            up,
            down,
            probability,
            discount: (-rate * dt).exp(),
        })
    }
}

/// Contract and market inputs for one lattice evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSpec {
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Volatility
    pub volatility: f64,
    /// Payoff direction
    pub option_type: OptionType,
}

/// Result of [`BinomialLattice::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeEvaluation {
    /// Root value
    pub price: f64,
    /// Every node, present only for [`LatticeOutput::FullGrid`]
    pub grid: Option<LatticeGrid>,
}

/// Binomial lattice engine.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::lattice::{BinomialLattice, LatticeSpec};
///
/// let spec = LatticeSpec {
///     spot: 100.0, strike: 100.0, rate: 0.05, expiry: 1.0,
///     volatility: 0.2, option_type: OptionType::Put,
/// };
/// let european = BinomialLattice::european(200).price(&spec).unwrap();
/// let american = BinomialLattice::american(200).price(&spec).unwrap();
/// assert!(american > european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialLattice {
    steps: usize,
    exercise: ExerciseStyle,
    output: LatticeOutput,
}

impl BinomialLattice {
    /// Creates an engine returning prices only.
    pub fn new(steps: usize, exercise: ExerciseStyle) -> Self {
        Self {
            steps,
            exercise,
            output: LatticeOutput::PriceOnly,
        }
    }

    /// European engine with `steps` time steps.
    pub fn european(steps: usize) -> Self {
        Self::new(steps, ExerciseStyle::European)
    }

    /// American engine with `steps` time steps.
    pub fn american(steps: usize) -> Self {
        Self::new(steps, ExerciseStyle::American)
    }

    /// Sets the output mode.
    pub fn with_output(mut self, output: LatticeOutput) -> Self {
        self.output = output;
        self
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Root value, ignoring the output mode.
    pub fn price(&self, spec: &LatticeSpec) -> Result<f64, LatticeError> {
        self.with_output(LatticeOutput::PriceOnly)
            .evaluate(spec)
            .map(|evaluation| evaluation.price)
    }

    /// Runs backward induction.
    ///
    /// Inputs are validated before the lattice is built, in this order:
    /// step count, volatility, expiry, spot, strike, rate.
    pub fn evaluate(&self, spec: &LatticeSpec) -> Result<LatticeEvaluation, LatticeError> {
        if self.steps < 1 {
            return Err(LatticeError::InvalidSteps { steps: self.steps });
        }
        positive("volatility", spec.volatility)?;
        positive("expiry", spec.expiry)?;
        positive("spot", spec.spot)?;
        positive("strike", spec.strike)?;

        let crr = CrrParameters::new(spec.rate, spec.volatility, spec.expiry, self.steps)?;

        let n = self.steps;
        let keep_grid = self.output == LatticeOutput::FullGrid;
        let early = self.exercise.allows_early_exercise();
        let ratio = crr.up / crr.down;
        let disc_up = crr.discount * crr.probability;
        let disc_down = crr.discount * (1.0 - crr.probability);
        let payoff = |s: f64| spec.option_type.intrinsic(s, spec.strike);

        let mut levels: Vec<Vec<LatticeNode>> = Vec::new();
        if keep_grid {
            levels.reserve(n + 1);
        }

        // Terminal layer
        let mut values = Vec::with_capacity(n + 1);
        let mut terminal = Vec::new();
        let mut s = spec.spot * crr.down.powi(n as i32);
        for _ in 0..=n {
            let value = payoff(s);
            values.push(value);
            if keep_grid {
                terminal.push(LatticeNode {
                    stock_price: s,
                    option_value: value,
                    exercised: value > 0.0,
                });
            }
            s *= ratio;
        }
        if keep_grid {
            levels.push(terminal);
        }

        for i in (0..n).rev() {
            let mut level = Vec::new();
            if keep_grid {
                level.reserve(i + 1);
            }
            let mut s = spec.spot * crr.down.powi(i as i32);
            for j in 0..=i {
                let continuation = disc_up * values[j + 1] + disc_down * values[j];
                let (value, exercised) = if early {
                    let intrinsic = payoff(s);
                    if intrinsic > continuation {
                        (intrinsic, true)
                    } else {
                        (continuation, false)
                    }
                } else {
                    (continuation, false)
                };
                values[j] = value;
                if keep_grid {
                    level.push(LatticeNode {
                        stock_price: s,
                        option_value: value,
                        exercised,
                    });
                }
                s *= ratio;
            }
            if keep_grid {
                levels.push(level);
            }
        }

        let grid = keep_grid.then(|| {
            levels.reverse();
            LatticeGrid::new(levels, crr)
        });

        Ok(LatticeEvaluation {
            price: values[0],
            grid,
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), LatticeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LatticeError::NonPositive { field, value })
    }
}

/// European option value on a `steps`-step CRR lattice.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::lattice::european_price;
///
/// let price = european_price(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Call, 1000).unwrap();
/// assert!((price - 10.450_583_6).abs() < 3e-3);
/// ```
pub fn european_price(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    volatility: f64,
    option_type: OptionType,
    steps: usize,
) -> PricingResult<f64> {
    let spec = LatticeSpec {
        spot,
        strike,
        rate,
        expiry,
        volatility,
        option_type,
    };
    Ok(BinomialLattice::european(steps).price(&spec)?)
}

/// American option value on a `steps`-step CRR lattice.
pub fn american_price(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    volatility: f64,
    option_type: OptionType,
    steps: usize,
) -> PricingResult<f64> {
    let spec = LatticeSpec {
        spot,
        strike,
        rate,
        expiry,
        volatility,
        option_type,
    };
    Ok(BinomialLattice::american(steps).price(&spec)?)
}

/// Builds and returns the full node grid (diagnostic mode).
#[allow(clippy::too_many_arguments)]
pub fn build_tree(
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    volatility: f64,
    option_type: OptionType,
    steps: usize,
    exercise: ExerciseStyle,
) -> PricingResult<LatticeGrid> {
    let spec = LatticeSpec {
        spot,
        strike,
        rate,
        expiry,
        volatility,
        option_type,
    };
    let evaluation = BinomialLattice::new(steps, exercise)
        .with_output(LatticeOutput::FullGrid)
        .evaluate(&spec)?;
    evaluation.grid.ok_or_else(|| {
        pricer_core::types::PricingError::NumericalDomain(
            "lattice evaluation returned no grid".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::PricingError;

    fn atm(option_type: OptionType) -> LatticeSpec {
        LatticeSpec {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            expiry: 1.0,
            volatility: 0.2,
            option_type,
        }
    }

    // ==========================================================
    // CRR parameters
    // ==========================================================

    #[test]
    fn test_crr_parameters() {
        let crr = CrrParameters::new(0.05, 0.2, 1.0, 1).unwrap();
        assert_relative_eq!(crr.up, 0.2_f64.exp(), epsilon = 1e-15);
        assert_relative_eq!(crr.up * crr.down, 1.0, epsilon = 1e-15);
        assert_relative_eq!(
            crr.probability,
            (0.05_f64.exp() - crr.down) / (crr.up - crr.down),
            epsilon = 1e-15
        );
        assert_relative_eq!(crr.discount, (-0.05_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_probability_out_of_range() {
        // r·dt > σ·√dt pushes p above one
        let err = CrrParameters::new(0.5, 0.01, 1.0, 1).unwrap_err();
        assert!(matches!(err, LatticeError::ProbabilityOutOfRange { probability, .. } if probability > 1.0));

        // Strongly negative rate pushes p below zero
        let err = CrrParameters::new(-0.5, 0.01, 1.0, 1).unwrap_err();
        assert!(matches!(err, LatticeError::ProbabilityOutOfRange { probability, .. } if probability < 0.0));
    }

    // ==========================================================
    // Pricing
    // ==========================================================

    #[test]
    fn test_one_step_by_hand() {
        let u = 0.2_f64.exp();
        let d = 1.0 / u;
        let p = (0.05_f64.exp() - d) / (u - d);
        let expected = (-0.05_f64).exp() * p * (100.0 * u - 100.0);

        let price = BinomialLattice::european(1).price(&atm(OptionType::Call)).unwrap();
        assert_relative_eq!(price, expected, epsilon = 1e-12);
        assert_relative_eq!(price, 12.162_284_964_623_95, epsilon = 1e-10);
    }

    #[test]
    fn test_reference_values() {
        let call = BinomialLattice::european(100).price(&atm(OptionType::Call)).unwrap();
        assert_relative_eq!(call, 10.430_611_662_249_405, epsilon = 1e-9);

        let put = BinomialLattice::european(100).price(&atm(OptionType::Put)).unwrap();
        assert_relative_eq!(put, 5.553_554_112_321_232, epsilon = 1e-9);

        let american_put = BinomialLattice::american(100).price(&atm(OptionType::Put)).unwrap();
        assert_relative_eq!(american_put, 6.082_354_409_142_347, epsilon = 1e-9);
    }

    #[test]
    fn test_american_call_equals_european_call() {
        let european = BinomialLattice::european(100).price(&atm(OptionType::Call)).unwrap();
        let american = BinomialLattice::american(100).price(&atm(OptionType::Call)).unwrap();
        assert_relative_eq!(american, european, epsilon = 1e-12);
    }

    #[test]
    fn test_european_parity_on_lattice() {
        // C - P = S - K·e^{-rT} holds exactly on a risk-neutral lattice
        for steps in [1, 7, 50, 301] {
            let call = BinomialLattice::european(steps).price(&atm(OptionType::Call)).unwrap();
            let put = BinomialLattice::european(steps).price(&atm(OptionType::Put)).unwrap();
            assert_relative_eq!(call - put, 100.0 - 100.0 * (-0.05_f64).exp(), epsilon = 1e-9);
        }
    }

    // ==========================================================
    // Grid mode
    // ==========================================================

    #[test]
    fn test_grid_shape_and_price_match() {
        let lattice = BinomialLattice::american(25).with_output(LatticeOutput::FullGrid);
        let evaluation = lattice.evaluate(&atm(OptionType::Put)).unwrap();
        let grid = evaluation.grid.as_ref().unwrap();

        assert_eq!(grid.steps(), 25);
        assert_eq!(grid.levels().len(), 26);
        for (i, level) in grid.levels().iter().enumerate() {
            assert_eq!(level.len(), i + 1);
        }
        assert_eq!(grid.price(), evaluation.price);

        let scalar = BinomialLattice::american(25).price(&atm(OptionType::Put)).unwrap();
        assert_eq!(scalar, evaluation.price);
    }

    #[test]
    fn test_grid_recombines() {
        let grid = build_tree(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Call, 4, ExerciseStyle::European)
            .unwrap();
        let crr = *grid.parameters();
        // up then down returns to the starting price
        assert_relative_eq!(grid.node(2, 1).unwrap().stock_price, 100.0, epsilon = 1e-10);
        assert_relative_eq!(
            grid.node(4, 4).unwrap().stock_price,
            100.0 * crr.up.powi(4),
            epsilon = 1e-9
        );
        assert!(grid.node(2, 3).is_none());
        assert!(grid.level(9).is_empty());
    }

    #[test]
    fn test_terminal_flags_follow_payoff() {
        let grid = build_tree(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Put, 10, ExerciseStyle::European)
            .unwrap();
        for node in grid.level(10) {
            assert_eq!(node.exercised, node.stock_price < 100.0);
            assert_eq!(node.option_value, (100.0 - node.stock_price).max(0.0));
        }
        assert!(!grid.has_early_exercise());
    }

    #[test]
    fn test_american_put_exercises_early() {
        let grid = build_tree(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Put, 50, ExerciseStyle::American)
            .unwrap();
        assert!(grid.has_early_exercise());
        for (_, _, node) in grid.early_exercise_nodes() {
            assert!(node.stock_price < 100.0);
            assert_relative_eq!(node.option_value, 100.0 - node.stock_price, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_american_call_never_exercises_early() {
        let grid = build_tree(100.0, 90.0, 0.05, 1.0, 0.3, OptionType::Call, 200, ExerciseStyle::American)
            .unwrap();
        assert!(!grid.has_early_exercise());
    }

    // ==========================================================
    // Validation
    // ==========================================================

    #[test]
    fn test_invalid_inputs() {
        let spec = atm(OptionType::Call);
        assert_eq!(
            BinomialLattice::european(0).price(&spec),
            Err(LatticeError::InvalidSteps { steps: 0 })
        );

        let cases = [
            ("volatility", LatticeSpec { volatility: 0.0, ..spec }),
            ("expiry", LatticeSpec { expiry: -1.0, ..spec }),
            ("spot", LatticeSpec { spot: 0.0, ..spec }),
            ("strike", LatticeSpec { strike: -5.0, ..spec }),
        ];
        for (field, bad) in cases {
            match BinomialLattice::european(10).price(&bad) {
                Err(LatticeError::NonPositive { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected NonPositive({}), got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_free_functions_map_errors() {
        let err = european_price(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Call, 0).unwrap_err();
        assert!(err.is_invalid_parameter());

        let err = american_price(100.0, 100.0, 0.5, 1.0, 0.01, OptionType::Put, 1).unwrap_err();
        assert!(matches!(err, PricingError::NumericalDomain(_)));
    }
}
