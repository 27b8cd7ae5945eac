use serde::{Deserialize, Serialize};

pub const DEFAULT_SPECIMEN_COUNT: usize = 10;
pub const MIN_SPECIMEN_COUNT: usize = 1;
pub const MAX_SPECIMEN_COUNT: usize = 20;

/// Raw laboratory measurements of one compacted Marshall specimen.
///
/// Weights are in grams, `asphalt_percent` is the binder content by total mix weight
/// (0-100), `stability` is in pounds-force and `flow` in hundredths of an inch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecimenRecord {
    pub asphalt_percent: f64,
    pub weight_air: f64,
    pub weight_submerged: f64,
    pub weight_ssd: f64,
    pub stability: f64,
    pub flow: f64,
}

impl SpecimenRecord {
    pub fn new(
        asphalt_percent: f64,
        weight_air: f64,
        weight_submerged: f64,
        weight_ssd: f64,
        stability: f64,
        flow: f64,
    ) -> Self {
        Self {
            asphalt_percent,
            weight_air,
            weight_submerged,
            weight_ssd,
            stability,
            flow,
        }
    }

    /// A freshly inserted row: every measurement is zero.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Mass of water displaced by the specimen (`W_ssd - W_submerged`), numerically
    /// equal to its bulk volume in cm³.
    #[inline]
    pub fn displaced_water(&self) -> f64 {
        self.weight_ssd - self.weight_submerged
    }
}

/// Ordered collection of specimens in entry order.
///
/// The table never reorders its rows; result sequences produced from it are
/// index-aligned with [`SpecimenTable::records`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecimenTable {
    records: Vec<SpecimenRecord>,
}

impl SpecimenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(count: usize) -> Self {
        Self {
            records: vec![SpecimenRecord::zeroed(); count],
        }
    }

    pub fn from_records(records: Vec<SpecimenRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SpecimenRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SpecimenRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SpecimenRecord> {
        self.records.get_mut(index)
    }

    pub fn push(&mut self, record: SpecimenRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Grows the table with zeroed rows or truncates it from the end.
    pub fn resize(&mut self, count: usize) {
        self.records.resize(count, SpecimenRecord::zeroed());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpecimenRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a SpecimenTable {
    type Item = &'a SpecimenRecord;
    type IntoIter = std::slice::Iter<'a, SpecimenRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
