use crate::error::{CliError, Result};
use marshallmix::core::models::specimen::SpecimenRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileMaterials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gse: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsa: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileMarshallConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_vtm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen_count: Option<usize>,
}

/// One `[[specimens]]` entry. Omitted measurements read as zero.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct FileSpecimen {
    pub asphalt_percent: f64,
    pub weight_air: f64,
    pub weight_submerged: f64,
    pub weight_ssd: f64,
    pub stability: f64,
    pub flow: f64,
}

impl From<FileSpecimen> for SpecimenRecord {
    fn from(s: FileSpecimen) -> Self {
        SpecimenRecord::new(
            s.asphalt_percent,
            s.weight_air,
            s.weight_submerged,
            s.weight_ssd,
            s.stability,
            s.flow,
        )
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGradationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix_proportions: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_tolerance: Option<f64>,
    /// Sieve label -> aggregate key -> percent passing.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub passing: BTreeMap<String, BTreeMap<String, f64>>,
}

/// A design session as written on disk.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<FileMaterials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marshall: Option<FileMarshallConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specimens: Vec<FileSpecimen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradation: Option<FileGradationConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading design session from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CliError::Other(e.into()))
    }
}
