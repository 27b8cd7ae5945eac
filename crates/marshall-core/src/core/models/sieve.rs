use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Standard sieves of the gradation catalog, ordered from coarse to fine.
///
/// The discriminant is the row index in every gradation matrix and combined curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SieveSize {
    OneAndHalfInch = 0,
    ThreeEighthsInch = 1,
    No4 = 2,
    No8 = 3,
    No16 = 4,
    No30 = 5,
    No50 = 6,
    No100 = 7,
    No200 = 8,
}

pub const SIEVE_COUNT: usize = 9;

static SIEVE_ALIASES: Map<&'static str, SieveSize> = phf_map! {
    "11/2\"" => SieveSize::OneAndHalfInch, "11/2in" => SieveSize::OneAndHalfInch,
    "1.5\"" => SieveSize::OneAndHalfInch, "1.5in" => SieveSize::OneAndHalfInch,
    "37.5mm" => SieveSize::OneAndHalfInch,
    "3/8\"" => SieveSize::ThreeEighthsInch, "3/8in" => SieveSize::ThreeEighthsInch,
    "9.5mm" => SieveSize::ThreeEighthsInch,
    "n°4" => SieveSize::No4, "no4" => SieveSize::No4, "no.4" => SieveSize::No4,
    "#4" => SieveSize::No4, "4.75mm" => SieveSize::No4,
    "n°8" => SieveSize::No8, "no8" => SieveSize::No8, "no.8" => SieveSize::No8,
    "#8" => SieveSize::No8, "2.36mm" => SieveSize::No8,
    "n°16" => SieveSize::No16, "no16" => SieveSize::No16, "no.16" => SieveSize::No16,
    "#16" => SieveSize::No16, "1.18mm" => SieveSize::No16,
    "n°30" => SieveSize::No30, "no30" => SieveSize::No30, "no.30" => SieveSize::No30,
    "#30" => SieveSize::No30, "0.6mm" => SieveSize::No30, "0.600mm" => SieveSize::No30,
    "600µm" => SieveSize::No30,
    "n°50" => SieveSize::No50, "no50" => SieveSize::No50, "no.50" => SieveSize::No50,
    "#50" => SieveSize::No50, "0.3mm" => SieveSize::No50, "0.300mm" => SieveSize::No50,
    "300µm" => SieveSize::No50,
    "n°100" => SieveSize::No100, "no100" => SieveSize::No100, "no.100" => SieveSize::No100,
    "#100" => SieveSize::No100, "0.15mm" => SieveSize::No100, "0.150mm" => SieveSize::No100,
    "150µm" => SieveSize::No100,
    "n°200" => SieveSize::No200, "no200" => SieveSize::No200, "no.200" => SieveSize::No200,
    "#200" => SieveSize::No200, "0.075mm" => SieveSize::No200, "75µm" => SieveSize::No200,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SieveParseError {
    #[error("Unknown sieve designation '{0}'. Expected one of 1 1/2\", 3/8\", N°4, N°8, N°16, N°30, N°50, N°100, N°200.")]
    Unknown(String),
}

impl SieveSize {
    pub const CATALOG: [SieveSize; SIEVE_COUNT] = [
        SieveSize::OneAndHalfInch,
        SieveSize::ThreeEighthsInch,
        SieveSize::No4,
        SieveSize::No8,
        SieveSize::No16,
        SieveSize::No30,
        SieveSize::No50,
        SieveSize::No100,
        SieveSize::No200,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::CATALOG.get(index).copied()
    }

    /// Designation as printed on laboratory sheets.
    pub fn label(self) -> &'static str {
        match self {
            SieveSize::OneAndHalfInch => "1 1/2\"",
            SieveSize::ThreeEighthsInch => "3/8\"",
            SieveSize::No4 => "N°4",
            SieveSize::No8 => "N°8",
            SieveSize::No16 => "N°16",
            SieveSize::No30 => "N°30",
            SieveSize::No50 => "N°50",
            SieveSize::No100 => "N°100",
            SieveSize::No200 => "N°200",
        }
    }

    /// Nominal opening in millimetres.
    pub fn opening_mm(self) -> f64 {
        match self {
            SieveSize::OneAndHalfInch => 37.5,
            SieveSize::ThreeEighthsInch => 9.5,
            SieveSize::No4 => 4.75,
            SieveSize::No8 => 2.36,
            SieveSize::No16 => 1.18,
            SieveSize::No30 => 0.600,
            SieveSize::No50 => 0.300,
            SieveSize::No100 => 0.150,
            SieveSize::No200 => 0.075,
        }
    }
}

impl fmt::Display for SieveSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_designation(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| if c == 'º' { '°' } else { c })
        .collect::<String>()
        .to_lowercase()
}

impl FromStr for SieveSize {
    type Err = SieveParseError;

    /// Parses a sieve designation, ignoring case, whitespace and hyphens
    /// (`1-1/2in`, `N°4`, `no.4`, `#4`, `4.75mm`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SIEVE_ALIASES
            .get(normalize_designation(s).as_str())
            .copied()
            .ok_or_else(|| SieveParseError::Unknown(s.to_string()))
    }
}
