use crate::core::models::gradation::{
    GradationMatrix, MixProportions, PassingMatrix, ProportionVector, SieveVector,
};
use crate::core::models::sieve::SieveSize;
use serde::Serialize;

/// Combined percent passing at one sieve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub sieve: SieveSize,
    pub percent_passing: f64,
}

/// Combined gradation of a blend, one point per sieve in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedCurve {
    points: Vec<CurvePoint>,
}

impl CombinedCurve {
    pub fn from_vector(values: &SieveVector) -> Self {
        let points = SieveSize::CATALOG
            .iter()
            .map(|&sieve| CurvePoint {
                sieve,
                percent_passing: values[sieve.index()],
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn get(&self, sieve: SieveSize) -> f64 {
        self.points[sieve.index()].percent_passing
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.percent_passing).collect()
    }
}

/// `combined = passing · proportions`
#[inline]
pub fn blend(passing: &PassingMatrix, proportions: &ProportionVector) -> SieveVector {
    passing * proportions
}

/// Blends a gradation matrix, reading unset cells as `0.0`.
///
/// The proportions are used as given: an unbalanced mix is not renormalised.
pub fn combine(gradation: &GradationMatrix, mix: &MixProportions) -> CombinedCurve {
    CombinedCurve::from_vector(&blend(&gradation.fill_missing(), &mix.to_vector()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::gradation::AggregateId;

    fn sample_rows() -> [[f64; 4]; 9] {
        [
            [100.0, 100.0, 100.0, 100.0],
            [90.0, 100.0, 100.0, 100.0],
            [40.0, 85.0, 100.0, 100.0],
            [12.0, 60.0, 95.0, 100.0],
            [5.0, 42.0, 78.0, 100.0],
            [3.0, 30.0, 55.0, 98.0],
            [2.0, 18.0, 32.0, 95.0],
            [1.5, 10.0, 16.0, 90.0],
            [1.0, 4.0, 7.5, 80.0],
        ]
    }

    #[test]
    fn unit_proportion_reproduces_first_aggregate_exactly() {
        let gradation = GradationMatrix::from_rows(sample_rows());
        let curve = combine(&gradation, &MixProportions::new([1.0, 0.0, 0.0, 0.0]));
        assert_eq!(curve.values(), gradation.column(AggregateId::First).to_vec());
    }

    #[test]
    fn equal_quarters_give_the_row_mean() {
        let rows = sample_rows();
        let curve = combine(&GradationMatrix::from_rows(rows), &MixProportions::default());
        for (point, row) in curve.points().iter().zip(rows.iter()) {
            let mean = row.iter().sum::<f64>() / 4.0;
            assert!((point.percent_passing - mean).abs() < 1e-9);
        }
    }

    #[test]
    fn blend_is_linear_in_proportions() {
        let gradation = GradationMatrix::from_rows(sample_rows());
        let mix = MixProportions::new([0.35, 0.25, 0.3, 0.1]);
        let base = combine(&gradation, &mix);
        let k = 2.5;
        let scaled = combine(&gradation, &mix.scaled(k));
        for (b, s) in base.values().iter().zip(scaled.values()) {
            assert!((b * k - s).abs() < 1e-9);
        }
    }

    #[test]
    fn unbalanced_mix_is_not_renormalised() {
        let rows = sample_rows();
        let curve = combine(
            &GradationMatrix::from_rows(rows),
            &MixProportions::new([0.3, 0.3, 0.3, 0.3]),
        );
        assert!((curve.get(SieveSize::OneAndHalfInch) - 120.0).abs() < 1e-9);
        let expected_no200 = 0.3 * (1.0 + 4.0 + 7.5 + 80.0);
        assert!((curve.get(SieveSize::No200) - expected_no200).abs() < 1e-9);
    }

    #[test]
    fn unset_cells_contribute_zero() {
        let mut gradation = GradationMatrix::new();
        gradation.set(SieveSize::No4, AggregateId::First, 60.0);
        gradation.set(SieveSize::No4, AggregateId::Third, 40.0);
        let curve = combine(&gradation, &MixProportions::default());
        assert!((curve.get(SieveSize::No4) - 25.0).abs() < 1e-12);
        assert_eq!(curve.get(SieveSize::No8), 0.0);
        assert_eq!(curve.points().len(), 9);
    }

    #[test]
    fn curve_points_follow_catalog_order() {
        let curve = combine(&GradationMatrix::new(), &MixProportions::default());
        let sieves: Vec<SieveSize> = curve.points().iter().map(|p| p.sieve).collect();
        assert_eq!(sieves, SieveSize::CATALOG.to_vec());
    }
}
