//! Greeks: result type, bump policy and finite-difference driver.
//!
//! Closed-form engines report analytic Greeks where they exist; everything
//! else goes through [`FiniteDifference`], which reprices the full
//! instrument at each bump.

mod bump;
mod finite_difference;
mod result;

pub use bump::{lattice_spot_bump, BumpSizes};
pub use finite_difference::FiniteDifference;
pub use result::GreeksResult;
