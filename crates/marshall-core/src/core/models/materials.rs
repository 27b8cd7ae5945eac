use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the physically plausible specific-gravity range for
/// mineral aggregates and asphalt mixtures.
pub const MAX_PLAUSIBLE_SPECIFIC_GRAVITY: f64 = 3.2;

/// Identifies one of the four specific-gravity constants of a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GravityConstant {
    /// Bulk specific gravity of the aggregate blend.
    Gsb,
    /// Theoretical maximum specific gravity of the loose mixture.
    Gmm,
    /// Effective specific gravity of the aggregate.
    Gse,
    /// Apparent specific gravity of the aggregate.
    Gsa,
}

impl GravityConstant {
    pub const ALL: [GravityConstant; 4] = [
        GravityConstant::Gsb,
        GravityConstant::Gmm,
        GravityConstant::Gse,
        GravityConstant::Gsa,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            GravityConstant::Gsb => "Gsb",
            GravityConstant::Gmm => "Gmm",
            GravityConstant::Gse => "Gse",
            GravityConstant::Gsa => "Gsa",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GravityConstant::Gsb => "bulk specific gravity of aggregate",
            GravityConstant::Gmm => "theoretical maximum specific gravity",
            GravityConstant::Gse => "effective specific gravity of aggregate",
            GravityConstant::Gsa => "apparent specific gravity of aggregate",
        }
    }
}

impl fmt::Display for GravityConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returns `true` when `value` lies in the open interval `(0, 3.2)`.
pub fn is_plausible_specific_gravity(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value < MAX_PLAUSIBLE_SPECIFIC_GRAVITY
}

/// Specific gravities shared by every specimen of a design.
///
/// Only `gsb` and `gmm` enter the Marshall formulas; `gse` and `gsa` are carried for
/// reporting and plausibility checks. Out-of-range values are accepted as given and
/// reported through [`MaterialProperties::suspect_constants`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub gsb: f64,
    pub gmm: f64,
    pub gse: f64,
    pub gsa: f64,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            gsb: 2.703,
            gmm: 2.454,
            gse: 2.730,
            gsa: 2.758,
        }
    }
}

impl MaterialProperties {
    pub fn new(gsb: f64, gmm: f64, gse: f64, gsa: f64) -> Self {
        Self { gsb, gmm, gse, gsa }
    }

    pub fn get(&self, constant: GravityConstant) -> f64 {
        match constant {
            GravityConstant::Gsb => self.gsb,
            GravityConstant::Gmm => self.gmm,
            GravityConstant::Gse => self.gse,
            GravityConstant::Gsa => self.gsa,
        }
    }

    pub fn set(&mut self, constant: GravityConstant, value: f64) {
        match constant {
            GravityConstant::Gsb => self.gsb = value,
            GravityConstant::Gmm => self.gmm = value,
            GravityConstant::Gse => self.gse = value,
            GravityConstant::Gsa => self.gsa = value,
        }
    }

    /// Lists the constants outside the plausible range, in `Gsb, Gmm, Gse, Gsa` order.
    pub fn suspect_constants(&self) -> Vec<(GravityConstant, f64)> {
        GravityConstant::ALL
            .iter()
            .map(|&c| (c, self.get(c)))
            .filter(|&(_, value)| !is_plausible_specific_gravity(value))
            .collect()
    }
}
