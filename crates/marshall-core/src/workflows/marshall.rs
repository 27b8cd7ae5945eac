use crate::core::formulas::optimum::{self, BracketEstimate, VtmPoint};
use crate::core::formulas::volumetrics::{self, MetricError, MetricResult, SpecimenMetrics};
use crate::core::models::materials::MaterialProperties;
use crate::core::models::specimen::SpecimenRecord;
use crate::core::series::{MarshallProperty, Series};
use crate::engine::error::EngineError;
use crate::engine::session::DesignSession;
use crate::engine::warning::Warning;
use tracing::{debug, info, instrument, warn};

/// One row of the enriched specimen table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenResult {
    pub index: usize,
    pub record: SpecimenRecord,
    pub metrics: MetricResult,
}

impl SpecimenResult {
    pub fn is_valid(&self) -> bool {
        self.metrics.is_ok()
    }

    pub fn error(&self) -> Option<&MetricError> {
        self.metrics.as_ref().err()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimumSpecimen {
    pub index: usize,
    pub record: SpecimenRecord,
    pub metrics: SpecimenMetrics,
    /// `|VTM - target|`
    pub vtm_deviation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptimumOutcome {
    Selected(OptimumSpecimen),
    NoEligibleSpecimen,
}

impl OptimumOutcome {
    pub fn selected(&self) -> Option<&OptimumSpecimen> {
        match self {
            OptimumOutcome::Selected(s) => Some(s),
            OptimumOutcome::NoEligibleSpecimen => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarshallReport {
    pub specimens: Vec<SpecimenResult>,
    pub target_vtm: f64,
    /// Specimen whose VTM is nearest the target.
    pub optimum: OptimumOutcome,
    /// Interpolated asphalt content at the target VTM, when two specimens straddle it.
    pub bracket: Option<BracketEstimate>,
    pub warnings: Vec<Warning>,
}

impl MarshallReport {
    pub fn valid_specimens(&self) -> impl Iterator<Item = (&SpecimenResult, &SpecimenMetrics)> {
        self.specimens
            .iter()
            .filter_map(|s| s.metrics.as_ref().ok().map(|m| (s, m)))
    }

    pub fn invalid_indices(&self) -> Vec<usize> {
        self.specimens
            .iter()
            .filter(|s| !s.is_valid())
            .map(|s| s.index)
            .collect()
    }

    /// Chart series of one property against asphalt content, in table order.
    /// Specimens without defined metrics are left out.
    pub fn series(&self, property: MarshallProperty) -> Series<f64> {
        let mut series = Series::new(property.to_string());
        for (specimen, metrics) in self.valid_specimens() {
            series.push(
                specimen.record.asphalt_percent,
                property.value(&specimen.record, metrics),
            );
        }
        series
    }

    pub fn all_series(&self) -> Vec<Series<f64>> {
        MarshallProperty::ALL
            .iter()
            .map(|&p| self.series(p))
            .collect()
    }
}

/// Runs the Marshall calculation on the session's current inputs.
#[instrument(skip_all, name = "marshall_workflow")]
pub fn run(session: &DesignSession) -> Result<MarshallReport, EngineError> {
    evaluate(
        session.specimens().records(),
        session.materials(),
        session.target_vtm(),
    )
}

/// Derives metrics for every record, then selects the optimum asphalt content.
///
/// Fails only on an empty table. Invalid specimens stay in the report, marked, and
/// are excluded from the optimum and from chart series.
pub fn evaluate(
    records: &[SpecimenRecord],
    materials: &MaterialProperties,
    target_vtm: f64,
) -> Result<MarshallReport, EngineError> {
    if records.is_empty() {
        return Err(EngineError::EmptySpecimenTable);
    }
    info!(specimens = records.len(), target_vtm, "Evaluating Marshall specimens.");

    let mut warnings: Vec<Warning> = materials
        .suspect_constants()
        .into_iter()
        .map(|(constant, value)| Warning::SuspectSpecificGravity { constant, value })
        .collect();

    let specimens: Vec<SpecimenResult> = volumetrics::compute_all(records, materials)
        .into_iter()
        .zip(records.iter())
        .enumerate()
        .map(|(index, (metrics, record))| SpecimenResult {
            index,
            record: *record,
            metrics,
        })
        .collect();

    for specimen in &specimens {
        match &specimen.metrics {
            Ok(metrics) if !metrics.has_plausible_gmb() => {
                warn!(index = specimen.index, gmb = metrics.gmb, "Implausible bulk specific gravity.");
                warnings.push(Warning::ImplausibleBulkGravity {
                    index: specimen.index,
                    gmb: metrics.gmb,
                });
            }
            Ok(_) => {}
            Err(error) => {
                debug!(index = specimen.index, %error, "Specimen excluded.");
                warnings.push(Warning::InvalidSpecimen {
                    index: specimen.index,
                    error: *error,
                });
            }
        }
    }

    let candidates: Vec<(&SpecimenResult, &SpecimenMetrics)> = specimens
        .iter()
        .filter_map(|s| s.metrics.as_ref().ok().map(|m| (s, m)))
        .collect();
    let points: Vec<VtmPoint> = candidates
        .iter()
        .map(|(s, m)| VtmPoint {
            index: s.index,
            asphalt_percent: s.record.asphalt_percent,
            vtm: m.vtm,
        })
        .collect();

    let optimum = match optimum::nearest_position(&points, target_vtm) {
        Some(position) => {
            let (chosen, metrics) = candidates[position];
            OptimumOutcome::Selected(OptimumSpecimen {
                index: chosen.index,
                record: chosen.record,
                metrics: *metrics,
                vtm_deviation: (metrics.vtm - target_vtm).abs(),
            })
        }
        None => OptimumOutcome::NoEligibleSpecimen,
    };
    let bracket = optimum::interpolate_bracketing(&points, target_vtm);

    match &optimum {
        OptimumOutcome::Selected(s) => info!(
            index = s.index,
            asphalt_percent = s.record.asphalt_percent,
            vtm = s.metrics.vtm,
            "Optimum specimen selected."
        ),
        OptimumOutcome::NoEligibleSpecimen => {
            warn!("No specimen with a defined VTM; optimum content cannot be selected.")
        }
    }

    Ok(MarshallReport {
        specimens,
        target_vtm,
        optimum,
        bracket,
        warnings,
    })
}
