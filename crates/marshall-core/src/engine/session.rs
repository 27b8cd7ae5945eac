use super::config::DesignConfig;
use super::error::EngineError;
use crate::core::models::gradation::{AggregateId, GradationMatrix, MixProportions};
use crate::core::models::materials::MaterialProperties;
use crate::core::models::sieve::SieveSize;
use crate::core::models::specimen::{
    MAX_SPECIMEN_COUNT, MIN_SPECIMEN_COUNT, SpecimenRecord, SpecimenTable,
};
use tracing::debug;

/// All editable inputs of one design interaction.
///
/// A session is created from a [`DesignConfig`], edited in place, handed to the
/// workflows whenever a calculation is requested, and dropped when the interaction
/// ends. Nothing is recomputed implicitly on edit.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSession {
    materials: MaterialProperties,
    target_vtm: f64,
    sum_tolerance: f64,
    specimens: SpecimenTable,
    gradation: GradationMatrix,
    proportions: MixProportions,
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new(DesignConfig::default())
    }
}

impl DesignSession {
    /// Starts a session with `config.marshall.specimen_count` zeroed specimens, an
    /// empty gradation matrix and equal mix proportions.
    pub fn new(config: DesignConfig) -> Self {
        debug!(
            rows = config.marshall.specimen_count,
            "Creating design session."
        );
        Self {
            materials: config.marshall.materials,
            target_vtm: config.marshall.target_vtm,
            sum_tolerance: config.gradation.sum_tolerance,
            specimens: SpecimenTable::with_rows(config.marshall.specimen_count),
            gradation: GradationMatrix::new(),
            proportions: MixProportions::default(),
        }
    }

    pub fn materials(&self) -> &MaterialProperties {
        &self.materials
    }

    pub fn set_materials(&mut self, materials: MaterialProperties) {
        self.materials = materials;
    }

    pub fn target_vtm(&self) -> f64 {
        self.target_vtm
    }

    pub fn set_target_vtm(&mut self, target: f64) {
        self.target_vtm = target;
    }

    pub fn sum_tolerance(&self) -> f64 {
        self.sum_tolerance
    }

    pub fn set_sum_tolerance(&mut self, tolerance: f64) {
        self.sum_tolerance = tolerance;
    }

    // --- Specimen table ---

    pub fn specimens(&self) -> &SpecimenTable {
        &self.specimens
    }

    pub fn specimen_count(&self) -> usize {
        self.specimens.len()
    }

    /// Resizes the table, appending zeroed rows or dropping rows from the end.
    pub fn set_specimen_count(&mut self, count: usize) -> Result<(), EngineError> {
        if !(MIN_SPECIMEN_COUNT..=MAX_SPECIMEN_COUNT).contains(&count) {
            return Err(EngineError::RowCountOutOfRange {
                requested: count,
                min: MIN_SPECIMEN_COUNT,
                max: MAX_SPECIMEN_COUNT,
            });
        }
        debug!(from = self.specimens.len(), to = count, "Resizing specimen table.");
        self.specimens.resize(count);
        Ok(())
    }

    pub fn specimen_mut(&mut self, index: usize) -> Result<&mut SpecimenRecord, EngineError> {
        let len = self.specimens.len();
        self.specimens
            .get_mut(index)
            .ok_or(EngineError::SpecimenIndexOutOfRange { index, len })
    }

    pub fn set_specimen(&mut self, index: usize, record: SpecimenRecord) -> Result<(), EngineError> {
        *self.specimen_mut(index)? = record;
        Ok(())
    }

    /// Appends a row and returns its index.
    pub fn add_specimen(&mut self, record: SpecimenRecord) -> Result<usize, EngineError> {
        if self.specimens.len() >= MAX_SPECIMEN_COUNT {
            return Err(EngineError::RowCountOutOfRange {
                requested: self.specimens.len() + 1,
                min: MIN_SPECIMEN_COUNT,
                max: MAX_SPECIMEN_COUNT,
            });
        }
        Ok(self.specimens.push(record))
    }

    // --- Gradation ---

    pub fn gradation(&self) -> &GradationMatrix {
        &self.gradation
    }

    pub fn set_passing(&mut self, sieve: SieveSize, aggregate: AggregateId, percent_passing: f64) {
        self.gradation.set(sieve, aggregate, percent_passing);
    }

    pub fn clear_passing(&mut self, sieve: SieveSize, aggregate: AggregateId) {
        self.gradation.clear(sieve, aggregate);
    }

    pub fn set_gradation(&mut self, gradation: GradationMatrix) {
        self.gradation = gradation;
    }

    pub fn proportions(&self) -> &MixProportions {
        &self.proportions
    }

    pub fn set_proportions(&mut self, proportions: MixProportions) {
        self.proportions = proportions;
    }

    pub fn set_proportion(&mut self, aggregate: AggregateId, proportion: f64) {
        self.proportions.set(aggregate, proportion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::DesignConfigBuilder;

    #[test]
    fn new_session_has_default_rows_and_empty_gradation() {
        let session = DesignSession::default();
        assert_eq!(session.specimen_count(), 10);
        assert!(session.specimens().iter().all(|r| *r == SpecimenRecord::zeroed()));
        assert_eq!(session.gradation().missing_cells(), 36);
        assert_eq!(session.proportions().as_array(), [0.25; 4]);
        assert_eq!(session.target_vtm(), 4.0);
    }

    #[test]
    fn new_session_uses_configured_row_count() {
        let config = DesignConfigBuilder::new()
            .materials(MaterialProperties::default())
            .target_vtm(3.5)
            .specimen_count(3)
            .sum_tolerance(1e-6)
            .build()
            .unwrap();
        let session = DesignSession::new(config);
        assert_eq!(session.specimen_count(), 3);
        assert_eq!(session.target_vtm(), 3.5);
        assert_eq!(session.sum_tolerance(), 1e-6);
    }

    #[test]
    fn set_specimen_count_enforces_bounds() {
        let mut session = DesignSession::default();
        assert_eq!(
            session.set_specimen_count(0),
            Err(EngineError::RowCountOutOfRange {
                requested: 0,
                min: 1,
                max: 20
            })
        );
        assert!(session.set_specimen_count(21).is_err());
        assert_eq!(session.specimen_count(), 10);

        session.set_specimen_count(20).unwrap();
        assert_eq!(session.specimen_count(), 20);
        session.set_specimen_count(1).unwrap();
        assert_eq!(session.specimen_count(), 1);
    }

    #[test]
    fn editing_specimens_is_index_checked() {
        let mut session = DesignSession::default();
        let record = SpecimenRecord::new(5.0, 1200.0, 690.0, 1205.0, 1800.0, 10.0);
        session.set_specimen(9, record).unwrap();
        assert_eq!(session.specimens().records()[9], record);

        session.specimen_mut(0).unwrap().flow = 12.0;
        assert_eq!(session.specimens().records()[0].flow, 12.0);

        assert_eq!(
            session.set_specimen(10, record),
            Err(EngineError::SpecimenIndexOutOfRange { index: 10, len: 10 })
        );
    }

    #[test]
    fn add_specimen_stops_at_maximum() {
        let mut session = DesignSession::default();
        session.set_specimen_count(19).unwrap();
        assert_eq!(session.add_specimen(SpecimenRecord::zeroed()), Ok(19));
        assert!(matches!(
            session.add_specimen(SpecimenRecord::zeroed()),
            Err(EngineError::RowCountOutOfRange { requested: 21, .. })
        ));
    }

    #[test]
    fn gradation_edits_are_applied_in_place() {
        let mut session = DesignSession::default();
        session.set_passing(SieveSize::No4, AggregateId::Second, 72.0);
        session.set_proportion(AggregateId::Fourth, 0.1);
        assert_eq!(
            session.gradation().get(SieveSize::No4, AggregateId::Second),
            Some(72.0)
        );
        assert_eq!(session.proportions().get(AggregateId::Fourth), 0.1);

        session.clear_passing(SieveSize::No4, AggregateId::Second);
        assert_eq!(session.gradation().get(SieveSize::No4, AggregateId::Second), None);
    }
}
