//! Lattice nodes and the diagnostic grid.

use super::binomial::CrrParameters;

/// One node of an evaluated binomial lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeNode {
    /// Underlying price at this node
    pub stock_price: f64,
    /// Option value after backward induction
    pub option_value: f64,
    /// Exercise beat continuation here (at expiry: payoff is positive)
    pub exercised: bool,
}

/// Fully evaluated recombining lattice.
///
/// Level `i` (time `i·dt`) holds `i + 1` nodes ordered by number of up
/// moves, so node `(i, j)` sits at `S·u^j·d^(i-j)`. The grid is read-only
/// once built.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::lattice::build_tree;
/// use pricer_models::lattice::ExerciseStyle;
///
/// let grid = build_tree(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Put, 3, ExerciseStyle::American).unwrap();
/// assert_eq!(grid.steps(), 3);
/// assert_eq!(grid.level(2).len(), 3);
/// assert_eq!(grid.node(0, 0).unwrap().stock_price, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeGrid {
    levels: Vec<Vec<LatticeNode>>,
    parameters: CrrParameters,
}

impl LatticeGrid {
    pub(crate) fn new(levels: Vec<Vec<LatticeNode>>, parameters: CrrParameters) -> Self {
        Self { levels, parameters }
    }

    /// Number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Root value.
    pub fn price(&self) -> f64 {
        self.levels
            .first()
            .and_then(|root| root.first())
            .map_or(f64::NAN, |node| node.option_value)
    }

    /// Discretisation used to build the grid.
    #[inline]
    pub fn parameters(&self) -> &CrrParameters {
        &self.parameters
    }

    /// All levels, root first.
    #[inline]
    pub fn levels(&self) -> &[Vec<LatticeNode>] {
        &self.levels
    }

    /// Nodes at time step `i`; empty past expiry.
    pub fn level(&self, i: usize) -> &[LatticeNode] {
        self.levels.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Node with `j` up moves at time step `i`.
    pub fn node(&self, i: usize, j: usize) -> Option<&LatticeNode> {
        self.levels.get(i).and_then(|level| level.get(j))
    }

    /// Nodes flagged for exercise strictly before expiry, as `(i, j, node)`.
    pub fn early_exercise_nodes(&self) -> impl Iterator<Item = (usize, usize, &LatticeNode)> {
        let expiry_level = self.steps();
        self.levels
            .iter()
            .enumerate()
            .take(expiry_level)
            .flat_map(|(i, level)| {
                level
                    .iter()
                    .enumerate()
                    .filter(|(_, node)| node.exercised)
                    .map(move |(j, node)| (i, j, node))
            })
    }

    /// Whether any node before expiry is exercised.
    pub fn has_early_exercise(&self) -> bool {
        self.early_exercise_nodes().next().is_some()
    }
}
