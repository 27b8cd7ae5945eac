//! # MarshallMix Core Library
//!
//! Calculation engine for asphalt mix design by the Marshall method: volumetric
//! properties of compacted specimens, selection of the optimum asphalt content, and
//! blending of aggregate gradations.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Plain data models (`MaterialProperties`,
//!   `SpecimenRecord`, `GradationMatrix`, ...) and the closed-form formulas that act
//!   on them (`volumetrics`, `optimum`, `blend`).
//!
//! - **[`engine`]: The Session Layer.** Validated configuration, the error and warning
//!   taxonomy, and the explicit `DesignSession` that carries all editable state for one
//!   user interaction.
//!
//! - **[`workflows`]: The Public API.** End-to-end pipelines that take a session,
//!   run the calculators, and return a report with results, invalid-record markers and
//!   warnings side by side.

pub mod core;
pub mod engine;
pub mod workflows;
