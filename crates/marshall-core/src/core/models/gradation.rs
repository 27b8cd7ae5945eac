use super::sieve::{SIEVE_COUNT, SieveSize};
use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const AGGREGATE_COUNT: usize = 4;

/// Dense percent-passing matrix: one row per sieve, one column per aggregate.
pub type PassingMatrix = SMatrix<f64, SIEVE_COUNT, AGGREGATE_COUNT>;
/// Mix proportions as a column vector, aligned with the matrix columns.
pub type ProportionVector = SVector<f64, AGGREGATE_COUNT>;
/// One value per sieve, in catalog order.
pub type SieveVector = SVector<f64, SIEVE_COUNT>;

/// One of the four stockpile aggregates of a blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AggregateId {
    First = 0,
    Second = 1,
    Third = 2,
    Fourth = 3,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AggregateParseError {
    #[error("Unknown aggregate '{0}'. Expected 'aggregate-1' through 'aggregate-4'.")]
    Unknown(String),
}

impl AggregateId {
    pub const ALL: [AggregateId; AGGREGATE_COUNT] = [
        AggregateId::First,
        AggregateId::Second,
        AggregateId::Third,
        AggregateId::Fourth,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Configuration key, e.g. `aggregate-1`.
    pub fn key(self) -> &'static str {
        match self {
            AggregateId::First => "aggregate-1",
            AggregateId::Second => "aggregate-2",
            AggregateId::Third => "aggregate-3",
            AggregateId::Fourth => "aggregate-4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AggregateId::First => "Aggregate 1",
            AggregateId::Second => "Aggregate 2",
            AggregateId::Third => "Aggregate 3",
            AggregateId::Fourth => "Aggregate 4",
        }
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AggregateId {
    type Err = AggregateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let number = trimmed
            .strip_prefix("aggregate-")
            .or_else(|| trimmed.strip_prefix("aggregate "))
            .or_else(|| trimmed.strip_prefix("agregado "))
            .unwrap_or(&trimmed);
        number
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(Self::from_index)
            .ok_or_else(|| AggregateParseError::Unknown(s.to_string()))
    }
}

/// Percent passing per sieve and aggregate, with unset cells.
///
/// An unset cell reads as `0.0` wherever a dense value is required; the matrix never
/// hands a gap to the blender.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GradationMatrix {
    cells: [[Option<f64>; AGGREGATE_COUNT]; SIEVE_COUNT],
}

impl GradationMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fully populated matrix from rows in catalog order.
    pub fn from_rows(rows: [[f64; AGGREGATE_COUNT]; SIEVE_COUNT]) -> Self {
        let mut matrix = Self::new();
        for (sieve_row, row) in matrix.cells.iter_mut().zip(rows.iter()) {
            for (cell, value) in sieve_row.iter_mut().zip(row.iter()) {
                *cell = Some(*value);
            }
        }
        matrix
    }

    pub fn set(&mut self, sieve: SieveSize, aggregate: AggregateId, percent_passing: f64) {
        self.cells[sieve.index()][aggregate.index()] = Some(percent_passing);
    }

    pub fn clear(&mut self, sieve: SieveSize, aggregate: AggregateId) {
        self.cells[sieve.index()][aggregate.index()] = None;
    }

    pub fn get(&self, sieve: SieveSize, aggregate: AggregateId) -> Option<f64> {
        self.cells[sieve.index()][aggregate.index()]
    }

    /// Cell value with unset cells defaulted to `0.0`.
    pub fn passing(&self, sieve: SieveSize, aggregate: AggregateId) -> f64 {
        self.get(sieve, aggregate).unwrap_or(0.0)
    }

    pub fn missing_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_cells() == 0
    }

    /// Dense column for one aggregate, in catalog order.
    pub fn column(&self, aggregate: AggregateId) -> [f64; SIEVE_COUNT] {
        SieveSize::CATALOG.map(|sieve| self.passing(sieve, aggregate))
    }

    pub fn fill_missing(&self) -> PassingMatrix {
        PassingMatrix::from_fn(|row, col| self.cells[row][col].unwrap_or(0.0))
    }
}

/// Fractional weight of each aggregate in the blend.
///
/// The proportions are expected to sum to 1.0, but nothing here enforces it; see
/// [`MixProportions::is_balanced`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixProportions([f64; AGGREGATE_COUNT]);

impl Default for MixProportions {
    fn default() -> Self {
        Self([0.25; AGGREGATE_COUNT])
    }
}

impl MixProportions {
    pub fn new(proportions: [f64; AGGREGATE_COUNT]) -> Self {
        Self(proportions)
    }

    pub fn get(&self, aggregate: AggregateId) -> f64 {
        self.0[aggregate.index()]
    }

    pub fn set(&mut self, aggregate: AggregateId, proportion: f64) {
        self.0[aggregate.index()] = proportion;
    }

    pub fn as_array(&self) -> [f64; AGGREGATE_COUNT] {
        self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }

    /// Proportions outside `[0, 1]`, with their aggregate.
    pub fn out_of_range(&self) -> Vec<(AggregateId, f64)> {
        AggregateId::ALL
            .iter()
            .map(|&a| (a, self.get(a)))
            .filter(|&(_, p)| !(0.0..=1.0).contains(&p))
            .collect()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.map(|p| p * factor))
    }

    pub fn to_vector(&self) -> ProportionVector {
        ProportionVector::from(self.0)
    }
}
