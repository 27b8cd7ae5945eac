use marshallmix::core::formulas::optimum::DEFAULT_TARGET_VTM;
use marshallmix::core::models::gradation::MixProportions;
use marshallmix::core::models::materials::MaterialProperties;
use marshallmix::core::models::specimen::DEFAULT_SPECIMEN_COUNT;
use marshallmix::engine::config::DEFAULT_SUM_TOLERANCE;

pub struct DefaultsConfig {
    pub materials: MaterialProperties,
    pub target_vtm: f64,
    pub specimen_count: usize,
    pub mix_proportions: MixProportions,
    pub sum_tolerance: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            materials: MaterialProperties::default(),
            target_vtm: DEFAULT_TARGET_VTM,
            specimen_count: DEFAULT_SPECIMEN_COUNT,
            mix_proportions: MixProportions::default(),
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }
}
