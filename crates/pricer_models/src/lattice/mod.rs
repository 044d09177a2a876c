//! Cox-Ross-Rubinstein binomial lattice.
//!
//! This module provides:
//! - `binomial`: CRR discretisation and backward-induction engine
//! - `node`: Lattice nodes and the read-only diagnostic grid
//! - `error`: Lattice input and domain errors
//!
//! One backward-induction routine serves both output modes; the full grid is
//! only materialised for [`LatticeOutput::FullGrid`].

pub mod binomial;
pub mod error;
pub mod node;

// Re-export commonly used types at module level
pub use binomial::{
    american_price, build_tree, european_price, BinomialLattice, CrrParameters, ExerciseStyle,
    LatticeEvaluation, LatticeOutput, LatticeSpec,
};
pub use error::LatticeError;
pub use node::{LatticeGrid, LatticeNode};
