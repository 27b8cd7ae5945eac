//! # Workflows Module
//!
//! End-to-end calculations triggered by an explicit user action. Each workflow reads a
//! [`crate::engine::session::DesignSession`], runs the relevant formulas and returns a
//! complete report: results, invalid-record markers and warnings together.
//!
//! - **Marshall workflow** ([`marshall`]) - specimen volumetrics and optimum asphalt content
//! - **Gradation workflow** ([`gradation`]) - combined gradation of the aggregate blend

pub mod gradation;
pub mod marshall;
