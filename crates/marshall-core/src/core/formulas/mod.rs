//! Closed-form calculations of the mix design.
//!
//! - [`volumetrics`] - Gmb, VTM, VMA and VFA of a compacted specimen
//! - [`optimum`] - nearest-to-target selection and bracketing estimate of asphalt content
//! - [`blend`] - combined gradation of an aggregate blend

pub mod blend;
pub mod optimum;
pub mod volumetrics;
