//! # Core Module
//!
//! Stateless building blocks of the mix design engine.
//!
//! - **Data models** ([`models`]) - specific gravities, specimen records, the sieve
//!   catalog, gradation matrices and mix proportions.
//! - **Formulas** ([`formulas`]) - Marshall volumetrics, optimum content selection and
//!   gradation blending. Every function here is pure.
//! - **Chart series** ([`series`]) - the plot-ready point sequences derived from results.

pub mod formulas;
pub mod models;
pub mod series;
