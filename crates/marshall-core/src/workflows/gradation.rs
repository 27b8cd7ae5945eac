use crate::core::formulas::blend::{self, CombinedCurve};
use crate::core::models::gradation::{AggregateId, GradationMatrix, MixProportions};
use crate::core::models::sieve::SieveSize;
use crate::core::series::Series;
use crate::engine::session::DesignSession;
use crate::engine::warning::Warning;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct GradationReport {
    pub curve: CombinedCurve,
    pub gradation: GradationMatrix,
    pub proportions: MixProportions,
    /// Cells that were unset and read as `0.0`.
    pub missing_cells: usize,
    pub warnings: Vec<Warning>,
}

impl GradationReport {
    /// One series per aggregate followed by the combined curve, x in catalog order.
    pub fn series(&self) -> Vec<Series<SieveSize>> {
        let mut all: Vec<Series<SieveSize>> = AggregateId::ALL
            .iter()
            .map(|&aggregate| {
                let mut series = Series::new(aggregate.label());
                for (sieve, value) in SieveSize::CATALOG
                    .iter()
                    .zip(self.gradation.column(aggregate))
                {
                    series.push(*sieve, value);
                }
                series
            })
            .collect();

        let mut combined = Series::new("Combined");
        for point in self.curve.points() {
            combined.push(point.sieve, point.percent_passing);
        }
        all.push(combined);
        all
    }
}

/// Blends the session's gradation matrix with its mix proportions.
#[instrument(skip_all, name = "gradation_workflow")]
pub fn run(session: &DesignSession) -> GradationReport {
    evaluate(
        session.gradation(),
        session.proportions(),
        session.sum_tolerance(),
    )
}

/// Computes the combined curve and collects mix warnings.
///
/// An unbalanced or out-of-range mix is reported but still blended as given.
pub fn evaluate(
    gradation: &GradationMatrix,
    proportions: &MixProportions,
    sum_tolerance: f64,
) -> GradationReport {
    info!(
        proportions = ?proportions.as_array(),
        "Blending aggregate gradations."
    );

    let mut warnings = Vec::new();

    if !proportions.is_balanced(sum_tolerance) {
        let sum = proportions.sum();
        warn!(sum, tolerance = sum_tolerance, "Mix proportions do not sum to 1.0.");
        warnings.push(Warning::MixProportionImbalance {
            sum,
            tolerance: sum_tolerance,
        });
    }
    for (aggregate, value) in proportions.out_of_range() {
        warn!(%aggregate, value, "Mix proportion outside [0, 1].");
        warnings.push(Warning::ProportionOutOfRange { aggregate, value });
    }

    let missing_cells = gradation.missing_cells();
    if missing_cells > 0 {
        debug!(missing_cells, "Unset gradation cells read as 0.0.");
    }

    GradationReport {
        curve: blend::combine(gradation, proportions),
        gradation: gradation.clone(),
        proportions: *proportions,
        missing_cells,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::DEFAULT_SUM_TOLERANCE;

    fn laboratory_gradation() -> GradationMatrix {
        GradationMatrix::from_rows([
            [100.0, 100.0, 100.0, 100.0],
            [90.0, 100.0, 100.0, 100.0],
            [45.0, 88.0, 100.0, 100.0],
            [15.0, 62.0, 96.0, 100.0],
            [7.0, 40.0, 80.0, 100.0],
            [4.0, 28.0, 58.0, 99.0],
            [3.0, 17.0, 35.0, 96.0],
            [2.0, 9.0, 18.0, 91.0],
            [1.2, 4.5, 8.0, 82.0],
        ])
    }

    #[test]
    fn balanced_quarters_emit_no_warning_and_average_each_sieve() {
        let gradation = laboratory_gradation();
        let report = evaluate(&gradation, &MixProportions::default(), DEFAULT_SUM_TOLERANCE);
        assert!(report.warnings.is_empty());
        for sieve in SieveSize::CATALOG {
            let mean = AggregateId::ALL
                .iter()
                .map(|&a| gradation.passing(sieve, a))
                .sum::<f64>()
                / 4.0;
            assert!((report.curve.get(sieve) - mean).abs() < 1e-9);
        }
    }

    #[test]
    fn unbalanced_mix_warns_and_keeps_weighted_sum() {
        let gradation = laboratory_gradation();
        let mix = MixProportions::new([0.3, 0.3, 0.3, 0.3]);
        let report = evaluate(&gradation, &mix, DEFAULT_SUM_TOLERANCE);

        assert_eq!(report.warnings.len(), 1);
        match &report.warnings[0] {
            Warning::MixProportionImbalance { sum, .. } => assert!((sum - 1.2).abs() < 1e-12),
            other => panic!("unexpected warning: {other:?}"),
        }
        for sieve in SieveSize::CATALOG {
            let weighted = AggregateId::ALL
                .iter()
                .map(|&a| gradation.passing(sieve, a) * 0.3)
                .sum::<f64>();
            assert!((report.curve.get(sieve) - weighted).abs() < 1e-9);
        }
    }

    #[test]
    fn proportion_outside_unit_interval_is_reported() {
        let mix = MixProportions::new([1.5, -0.5, 0.0, 0.0]);
        let report = evaluate(&laboratory_gradation(), &mix, DEFAULT_SUM_TOLERANCE);
        assert_eq!(
            report.warnings,
            vec![
                Warning::ProportionOutOfRange {
                    aggregate: AggregateId::First,
                    value: 1.5
                },
                Warning::ProportionOutOfRange {
                    aggregate: AggregateId::Second,
                    value: -0.5
                },
            ]
        );
    }

    #[test]
    fn missing_cells_are_counted_without_warning() {
        let mut gradation = laboratory_gradation();
        gradation.clear(SieveSize::No200, AggregateId::Fourth);
        let report = evaluate(&gradation, &MixProportions::default(), DEFAULT_SUM_TOLERANCE);
        assert_eq!(report.missing_cells, 1);
        assert!(report.warnings.is_empty());
        let expected = (1.2 + 4.5 + 8.0) * 0.25;
        assert!((report.curve.get(SieveSize::No200) - expected).abs() < 1e-9);
    }

    #[test]
    fn session_run_uses_session_inputs() {
        let mut session = DesignSession::default();
        session.set_gradation(laboratory_gradation());
        session.set_proportions(MixProportions::new([1.0, 0.0, 0.0, 0.0]));
        let report = run(&session);
        assert_eq!(
            report.curve.values(),
            laboratory_gradation().column(AggregateId::First).to_vec()
        );
    }

    #[test]
    fn series_lists_each_aggregate_then_combined() {
        let report = evaluate(
            &laboratory_gradation(),
            &MixProportions::default(),
            DEFAULT_SUM_TOLERANCE,
        );
        let series = report.series();
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Aggregate 1", "Aggregate 2", "Aggregate 3", "Aggregate 4", "Combined"]
        );
        assert!(series.iter().all(|s| s.len() == 9));
        assert_eq!(series[0].points[1], (SieveSize::ThreeEighthsInch, 90.0));
        assert_eq!(series[4].points[0].0, SieveSize::OneAndHalfInch);
    }
}
