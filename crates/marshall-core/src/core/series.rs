use crate::core::formulas::volumetrics::{Metric, SpecimenMetrics};
use crate::core::models::specimen::SpecimenRecord;
use serde::Serialize;
use std::fmt;

/// A property plotted against asphalt content in the Marshall charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarshallProperty {
    Stability,
    Flow,
    Vtm,
    Vma,
    Vfa,
    Gmb,
}

impl MarshallProperty {
    /// Chart order: stability, flow and VTM on the first row; VMA, VFA and Gmb on the second.
    pub const ALL: [MarshallProperty; 6] = [
        MarshallProperty::Stability,
        MarshallProperty::Flow,
        MarshallProperty::Vtm,
        MarshallProperty::Vma,
        MarshallProperty::Vfa,
        MarshallProperty::Gmb,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MarshallProperty::Stability => "Stability vs % Asphalt",
            MarshallProperty::Flow => "Flow vs % Asphalt",
            MarshallProperty::Vtm => "VTM vs % Asphalt",
            MarshallProperty::Vma => "VMA vs % Asphalt",
            MarshallProperty::Vfa => "VFA vs % Asphalt",
            MarshallProperty::Gmb => "Bulk Density (Gmb) vs % Asphalt",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MarshallProperty::Stability => "lbf",
            MarshallProperty::Flow => "0.01 in",
            MarshallProperty::Vtm | MarshallProperty::Vma | MarshallProperty::Vfa => "%",
            MarshallProperty::Gmb => "-",
        }
    }

    /// Reads the property from a specimen whose metrics are defined.
    pub fn value(self, record: &SpecimenRecord, metrics: &SpecimenMetrics) -> f64 {
        match self {
            MarshallProperty::Stability => record.stability,
            MarshallProperty::Flow => record.flow,
            MarshallProperty::Vtm => metrics.get(Metric::Vtm),
            MarshallProperty::Vma => metrics.get(Metric::Vma),
            MarshallProperty::Vfa => metrics.get(Metric::Vfa),
            MarshallProperty::Gmb => metrics.get(Metric::Gmb),
        }
    }
}

impl fmt::Display for MarshallProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarshallProperty::Stability => "Stability",
            MarshallProperty::Flow => "Flow",
            MarshallProperty::Vtm => "VTM",
            MarshallProperty::Vma => "VMA",
            MarshallProperty::Vfa => "VFA",
            MarshallProperty::Gmb => "Gmb",
        })
    }
}

/// A named sequence of chart points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<X> {
    pub name: String,
    pub points: Vec<(X, f64)>,
}

impl<X> Series<X> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, x: X, y: f64) {
        self.points.push((x, y));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_reads_raw_inputs_and_derived_metrics() {
        let record = SpecimenRecord::new(5.0, 1200.0, 690.0, 1205.0, 1850.0, 11.0);
        let metrics = SpecimenMetrics {
            gmb: 2.33,
            vtm: 5.1,
            vma: 15.2,
            vfa: 66.4,
        };
        assert_eq!(MarshallProperty::Stability.value(&record, &metrics), 1850.0);
        assert_eq!(MarshallProperty::Flow.value(&record, &metrics), 11.0);
        assert_eq!(MarshallProperty::Vtm.value(&record, &metrics), 5.1);
        assert_eq!(MarshallProperty::Gmb.value(&record, &metrics), 2.33);
    }

    #[test]
    fn series_collects_points_in_push_order() {
        let mut series = Series::new("VTM");
        assert!(series.is_empty());
        series.push(4.0, 6.0);
        series.push(5.0, 4.0);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points, vec![(4.0, 6.0), (5.0, 4.0)]);
    }
}
