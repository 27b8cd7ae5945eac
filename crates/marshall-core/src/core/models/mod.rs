//! # Core Models Module
//!
//! Data structures describing the laboratory inputs of a mix design.
//!
//! - [`materials`] - the four specific-gravity constants shared by all specimens
//! - [`specimen`] - one compacted Marshall specimen and the ordered table of them
//! - [`sieve`] - the fixed catalog of standard sieves, coarse to fine
//! - [`gradation`] - percent-passing matrix, aggregate identifiers and mix proportions

pub mod gradation;
pub mod materials;
pub mod sieve;
pub mod specimen;
