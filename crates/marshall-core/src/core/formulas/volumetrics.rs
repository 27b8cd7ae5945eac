use crate::core::models::materials::{MaterialProperties, is_plausible_specific_gravity};
use crate::core::models::specimen::SpecimenRecord;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A derived volumetric property of a specimen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Gmb,
    Vtm,
    Vma,
    Vfa,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Gmb => "Gmb",
            Metric::Vtm => "VTM",
            Metric::Vma => "VMA",
            Metric::Vfa => "VFA",
        })
    }
}

/// Why the metrics of a single specimen could not be derived.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MetricError {
    #[error(
        "Invalid specimen geometry: SSD weight ({weight_ssd} g) does not exceed submerged weight ({weight_submerged} g), Gmb is undefined"
    )]
    InvalidSpecimenGeometry {
        weight_ssd: f64,
        weight_submerged: f64,
    },

    #[error("VMA is zero, VFA is undefined")]
    UndefinedVma,

    #[error("{metric} evaluated to a non-finite value ({value})")]
    NonFiniteMetric { metric: Metric, value: f64 },
}

/// Volumetric properties of one compacted specimen. All percentages are by volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecimenMetrics {
    /// Bulk specific gravity of the compacted mix.
    pub gmb: f64,
    /// Air voids in the total mix, %.
    pub vtm: f64,
    /// Voids in the mineral aggregate, %.
    pub vma: f64,
    /// Voids filled with asphalt, %.
    pub vfa: f64,
}

impl SpecimenMetrics {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Gmb => self.gmb,
            Metric::Vtm => self.vtm,
            Metric::Vma => self.vma,
            Metric::Vfa => self.vfa,
        }
    }

    /// `false` when Gmb falls outside the range a real asphalt mixture can have.
    pub fn has_plausible_gmb(&self) -> bool {
        is_plausible_specific_gravity(self.gmb)
    }
}

pub type MetricResult = Result<SpecimenMetrics, MetricError>;

#[inline]
fn ensure_finite(metric: Metric, value: f64) -> Result<f64, MetricError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MetricError::NonFiniteMetric { metric, value })
    }
}

/// `Gmb = W_air / (W_ssd - W_submerged)`
///
/// The SSD weight must exceed the submerged weight; otherwise the displaced
/// volume is zero or negative and the specimen is rejected.
pub fn bulk_specific_gravity(record: &SpecimenRecord) -> Result<f64, MetricError> {
    let displaced = record.displaced_water();
    if displaced <= 0.0 {
        return Err(MetricError::InvalidSpecimenGeometry {
            weight_ssd: record.weight_ssd,
            weight_submerged: record.weight_submerged,
        });
    }
    ensure_finite(Metric::Gmb, record.weight_air / displaced)
}

/// `VTM = (1 - Gmb / Gmm) * 100`
#[inline]
pub fn voids_in_total_mix(gmb: f64, gmm: f64) -> f64 {
    (1.0 - gmb / gmm) * 100.0
}

/// `VMA = 100 - (Gmb * (100 - Pb) / 100) / Gsb`
#[inline]
pub fn voids_in_mineral_aggregate(gmb: f64, asphalt_percent: f64, gsb: f64) -> f64 {
    100.0 - (gmb * (100.0 - asphalt_percent) / 100.0) / gsb
}

/// `VFA = (VMA - VTM) / VMA * 100`
pub fn voids_filled_with_asphalt(vma: f64, vtm: f64) -> Result<f64, MetricError> {
    if vma == 0.0 {
        return Err(MetricError::UndefinedVma);
    }
    ensure_finite(Metric::Vfa, (vma - vtm) / vma * 100.0)
}

/// Derives Gmb, VTM, VMA and VFA of one specimen, in that order.
///
/// No clamping is applied: physically implausible inputs produce the exact
/// arithmetic result as long as it is finite.
pub fn compute_metrics(record: &SpecimenRecord, materials: &MaterialProperties) -> MetricResult {
    let gmb = bulk_specific_gravity(record)?;
    let vtm = ensure_finite(Metric::Vtm, voids_in_total_mix(gmb, materials.gmm))?;
    let vma = ensure_finite(
        Metric::Vma,
        voids_in_mineral_aggregate(gmb, record.asphalt_percent, materials.gsb),
    )?;
    let vfa = voids_filled_with_asphalt(vma, vtm)?;
    Ok(SpecimenMetrics { gmb, vtm, vma, vfa })
}

/// Applies [`compute_metrics`] to each record; the output is index-aligned with `records`.
pub fn compute_all(records: &[SpecimenRecord], materials: &MaterialProperties) -> Vec<MetricResult> {
    records
        .iter()
        .map(|record| compute_metrics(record, materials))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn reference_materials() -> MaterialProperties {
        MaterialProperties::default()
    }

    #[test]
    fn gmb_matches_reference_arithmetic_without_clamping() {
        let materials = MaterialProperties::new(2.703, 2.454, 2.730, 2.758);
        let record = SpecimenRecord::new(5.0, 1200.0, 680.0, 700.0, 0.0, 0.0);
        let metrics = compute_metrics(&record, &materials).unwrap();
        assert_eq!(metrics.gmb, 60.0);
        assert!(!metrics.has_plausible_gmb());
    }

    #[test]
    fn metrics_follow_formula_chain() {
        let record = SpecimenRecord::new(5.0, 1250.0, 735.0, 1255.0, 2000.0, 11.0);
        let m = compute_metrics(&record, &reference_materials()).unwrap();

        let gmb = 1250.0 / 520.0;
        let vtm = (1.0 - gmb / 2.454) * 100.0;
        let vma = 100.0 - (gmb * 95.0 / 100.0) / 2.703;
        let vfa = (vma - vtm) / vma * 100.0;

        assert!(f64_approx_equal(m.gmb, gmb));
        assert!(f64_approx_equal(m.vtm, vtm));
        assert!(f64_approx_equal(m.vma, vma));
        assert!(f64_approx_equal(m.vfa, vfa));
        assert!(m.has_plausible_gmb());
    }

    #[test]
    fn gmb_is_finite_and_positive_for_well_formed_specimens() {
        let cases = [
            (1200.0, 690.0, 1205.0),
            (1.0, 0.5, 1.0),
            (5000.0, 1.0, 2.0),
            (0.001, 100.0, 100.5),
        ];
        for (air, sub, ssd) in cases {
            let record = SpecimenRecord::new(5.0, air, sub, ssd, 0.0, 0.0);
            let gmb = bulk_specific_gravity(&record).unwrap();
            assert!(gmb.is_finite() && gmb > 0.0, "gmb = {gmb}");
        }
    }

    #[test]
    fn equal_ssd_and_submerged_weights_yield_invalid_geometry() {
        let record = SpecimenRecord::new(5.0, 1200.0, 700.0, 700.0, 0.0, 0.0);
        assert_eq!(
            compute_metrics(&record, &reference_materials()),
            Err(MetricError::InvalidSpecimenGeometry {
                weight_ssd: 700.0,
                weight_submerged: 700.0
            })
        );
    }

    #[test]
    fn ssd_below_submerged_weight_yields_invalid_geometry() {
        let record = SpecimenRecord::new(5.0, 1200.0, 700.0, 680.0, 0.0, 0.0);
        assert_eq!(
            bulk_specific_gravity(&record),
            Err(MetricError::InvalidSpecimenGeometry {
                weight_ssd: 680.0,
                weight_submerged: 700.0
            })
        );
        assert!(compute_metrics(&record, &reference_materials()).is_err());
    }

    #[test]
    fn zeroed_row_yields_invalid_geometry() {
        let result = compute_metrics(&SpecimenRecord::zeroed(), &reference_materials());
        assert!(matches!(
            result,
            Err(MetricError::InvalidSpecimenGeometry { .. })
        ));
    }

    #[test]
    fn zero_vma_yields_undefined_vma() {
        // Gmb = 3.125 with Gsb = 0.03125 and Pb = 0 makes VMA exactly zero.
        let materials = MaterialProperties::new(0.03125, 2.454, 2.730, 2.758);
        let record = SpecimenRecord::new(0.0, 3.125, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(
            compute_metrics(&record, &materials),
            Err(MetricError::UndefinedVma)
        );
        assert_eq!(voids_filled_with_asphalt(0.0, 3.0), Err(MetricError::UndefinedVma));
    }

    #[test]
    fn zero_gmm_is_reported_as_non_finite_vtm() {
        let materials = MaterialProperties::new(2.703, 0.0, 2.730, 2.758);
        let record = SpecimenRecord::new(5.0, 1200.0, 690.0, 1205.0, 0.0, 0.0);
        assert!(matches!(
            compute_metrics(&record, &materials),
            Err(MetricError::NonFiniteMetric {
                metric: Metric::Vtm,
                ..
            })
        ));
    }

    #[test]
    fn nan_weights_are_reported_as_non_finite_gmb() {
        let record = SpecimenRecord::new(5.0, f64::NAN, 690.0, 1205.0, 0.0, 0.0);
        assert!(matches!(
            bulk_specific_gravity(&record),
            Err(MetricError::NonFiniteMetric {
                metric: Metric::Gmb,
                ..
            })
        ));
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let record = SpecimenRecord::new(5.5, 1187.3, 681.2, 1190.4, 1850.0, 12.0);
        let a = compute_metrics(&record, &reference_materials()).unwrap();
        let b = compute_metrics(&record, &reference_materials()).unwrap();
        assert_eq!(a.gmb.to_bits(), b.gmb.to_bits());
        assert_eq!(a.vtm.to_bits(), b.vtm.to_bits());
        assert_eq!(a.vma.to_bits(), b.vma.to_bits());
        assert_eq!(a.vfa.to_bits(), b.vfa.to_bits());
    }

    #[test]
    fn compute_all_is_index_aligned() {
        let records = [
            SpecimenRecord::new(4.5, 1200.0, 690.0, 1205.0, 0.0, 0.0),
            SpecimenRecord::zeroed(),
            SpecimenRecord::new(5.5, 1210.0, 700.0, 1212.0, 0.0, 0.0),
        ];
        let results = compute_all(&records, &reference_materials());
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
