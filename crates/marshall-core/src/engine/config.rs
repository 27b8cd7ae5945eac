use crate::core::formulas::optimum::DEFAULT_TARGET_VTM;
use crate::core::models::materials::MaterialProperties;
use crate::core::models::specimen::{DEFAULT_SPECIMEN_COUNT, MAX_SPECIMEN_COUNT, MIN_SPECIMEN_COUNT};
use thiserror::Error;

/// Tolerance on `|sum(proportions) - 1|` before a mix is reported as unbalanced.
pub const DEFAULT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarshallConfig {
    pub materials: MaterialProperties,
    pub target_vtm: f64,
    pub specimen_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradationConfig {
    pub sum_tolerance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    pub marshall: MarshallConfig,
    pub gradation: GradationConfig,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            marshall: MarshallConfig {
                materials: MaterialProperties::default(),
                target_vtm: DEFAULT_TARGET_VTM,
                specimen_count: DEFAULT_SPECIMEN_COUNT,
            },
            gradation: GradationConfig {
                sum_tolerance: DEFAULT_SUM_TOLERANCE,
            },
        }
    }
}

#[derive(Default)]
pub struct DesignConfigBuilder {
    materials: Option<MaterialProperties>,
    target_vtm: Option<f64>,
    specimen_count: Option<usize>,
    sum_tolerance: Option<f64>,
}

impl DesignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn materials(mut self, materials: MaterialProperties) -> Self {
        self.materials = Some(materials);
        self
    }
    pub fn target_vtm(mut self, target: f64) -> Self {
        self.target_vtm = Some(target);
        self
    }
    pub fn specimen_count(mut self, count: usize) -> Self {
        self.specimen_count = Some(count);
        self
    }
    pub fn sum_tolerance(mut self, tolerance: f64) -> Self {
        self.sum_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<DesignConfig, ConfigError> {
        let materials = self
            .materials
            .ok_or(ConfigError::MissingParameter("materials"))?;

        let target_vtm = self
            .target_vtm
            .ok_or(ConfigError::MissingParameter("target_vtm"))?;
        if !target_vtm.is_finite() {
            return Err(ConfigError::Invalid {
                parameter: "target_vtm",
                reason: format!("must be a finite percentage, got {}", target_vtm),
            });
        }

        let specimen_count = self
            .specimen_count
            .ok_or(ConfigError::MissingParameter("specimen_count"))?;
        if !(MIN_SPECIMEN_COUNT..=MAX_SPECIMEN_COUNT).contains(&specimen_count) {
            return Err(ConfigError::Invalid {
                parameter: "specimen_count",
                reason: format!(
                    "must be between {} and {}, got {}",
                    MIN_SPECIMEN_COUNT, MAX_SPECIMEN_COUNT, specimen_count
                ),
            });
        }

        let sum_tolerance = self
            .sum_tolerance
            .ok_or(ConfigError::MissingParameter("sum_tolerance"))?;
        if !sum_tolerance.is_finite() || sum_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                parameter: "sum_tolerance",
                reason: format!("must be a non-negative number, got {}", sum_tolerance),
            });
        }

        Ok(DesignConfig {
            marshall: MarshallConfig {
                materials,
                target_vtm,
                specimen_count,
            },
            gradation: GradationConfig { sum_tolerance },
        })
    }
}
