//! # Engine Module
//!
//! Holds the state and policy around the pure formulas of [`crate::core`].
//!
//! - **Configuration** ([`config`]) - validated design settings assembled through a builder
//! - **Errors** ([`error`]) - structural failures that abort a whole calculation
//! - **Warnings** ([`warning`]) - non-fatal findings returned next to results
//! - **Session** ([`session`]) - the explicit, editable state of one design interaction
//!
//! Per-record failures are not errors at this level: they travel inside the result
//! sequences and are mirrored as [`warning::Warning::InvalidSpecimen`].

pub mod config;
pub mod error;
pub mod session;
pub mod warning;
