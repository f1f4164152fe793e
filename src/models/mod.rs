//! Antenna model contract and the per-family implementations.
//!
//! Every family follows the same lifecycle: validate raw parameters
//! against its schema, derive dependent/default parameters on the fresh
//! set, commit atomically, then answer gain queries and sample the full
//! radiation pattern from its closed-form envelope.

use crate::direction::Direction;
use crate::pattern::PatternSpec;
use crate::schema::ParamSchema;
use crate::{AntennaError, ParamSet, RawParams, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod f1245;
pub mod f1336lg;
pub mod f1336o;
pub mod f1336s;
pub mod f699;
pub mod s465;
pub mod s580;

pub use f1245::ItuF1245;
pub use f1336lg::ItuF1336LowGain;
pub use f1336o::ItuF1336Omni;
pub use f1336s::ItuF1336Sectoral;
pub use f699::ItuF699;
pub use s465::ItuS465;
pub use s580::ItuS580;

/// Lifecycle contract every antenna family implements.
///
/// An instance is constructed parameter-less and becomes usable after the
/// first successful [`set_params`](Self::set_params); each later call
/// replaces the parameter state wholesale, and a failed call leaves the
/// prior state untouched. Gain queries and pattern sampling before
/// parameterization fail with the missing-parameter error class.
pub trait AntennaModel {
    fn family(&self) -> ModelFamily;

    fn schema(&self) -> &'static ParamSchema;

    /// The currently committed (validated + derived) parameter set;
    /// empty until the first successful `set_params`.
    fn params(&self) -> &ParamSet;

    /// Validate, derive and atomically commit a new parameter set.
    fn set_params(&mut self, raw: &RawParams) -> Result<()>;

    /// Gain (dBi) in the given direction, `Ok(None)` where the governing
    /// Recommendation defines no value.
    fn gain(&self, direction: Direction) -> Result<Option<f64>>;

    /// Recompute the full pattern specification from the current
    /// parameters. Always recomputes; never serves stale samples.
    fn pattern(&self) -> Result<PatternSpec>;
}

/// Identifier of a supported antenna model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    F699,
    F1245,
    F1336LowGain,
    F1336Omni,
    F1336Sectoral,
    S465,
    S580,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 7] = [
        ModelFamily::F699,
        ModelFamily::F1245,
        ModelFamily::F1336LowGain,
        ModelFamily::F1336Omni,
        ModelFamily::F1336Sectoral,
        ModelFamily::S465,
        ModelFamily::S580,
    ];

    /// External identifier accepted by the factory and the CLI.
    pub fn identifier(&self) -> &'static str {
        match self {
            ModelFamily::F699 => "ITUF699",
            ModelFamily::F1245 => "ITUF1245",
            ModelFamily::F1336LowGain => "ITUF1336lg",
            ModelFamily::F1336Omni => "ITUF1336o",
            ModelFamily::F1336Sectoral => "ITUF1336s",
            ModelFamily::S465 => "ITUS465",
            ModelFamily::S580 => "ITUS580",
        }
    }

    /// Recommendation title used in pattern headers.
    pub fn title(&self) -> &'static str {
        match self {
            ModelFamily::F699 => "ITU-R F.699-8",
            ModelFamily::F1245 => "ITU-R F.1245-3",
            ModelFamily::F1336LowGain => "ITU-R F.1336-5 Low-Gain",
            ModelFamily::F1336Omni => "ITU-R F.1336-5 Omnidirectional",
            ModelFamily::F1336Sectoral => "ITU-R F.1336-5 Sectoral",
            ModelFamily::S465 => "ITU-R S.465-6",
            ModelFamily::S580 => "ITU-R S.580-6",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ModelFamily {
    type Err = AntennaError;

    fn from_str(s: &str) -> Result<Self> {
        ModelFamily::ALL
            .iter()
            .find(|family| family.identifier().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| AntennaError::UnknownModel(s.to_string()))
    }
}

/// Construct a fresh, unparameterized model instance for a family.
pub fn create_model(family: ModelFamily) -> Box<dyn AntennaModel> {
    match family {
        ModelFamily::F699 => Box::new(ItuF699::new()),
        ModelFamily::F1245 => Box::new(ItuF1245::new()),
        ModelFamily::F1336LowGain => Box::new(ItuF1336LowGain::new()),
        ModelFamily::F1336Omni => Box::new(ItuF1336Omni::new()),
        ModelFamily::F1336Sectoral => Box::new(ItuF1336Sectoral::new()),
        ModelFamily::S465 => Box::new(ItuS465::new()),
        ModelFamily::S580 => Box::new(ItuS580::new()),
    }
}

/// Speed of light expressed so that wavelength (m) = C / frequency (MHz).
pub(crate) const SPEED_OF_LIGHT_M_MHZ: f64 = 299.792458;

pub(crate) fn wavelength_m(freq_mhz: f64) -> f64 {
    SPEED_OF_LIGHT_M_MHZ / freq_mhz
}

/// D/lambda from peak gain, 10^((G_max - 7.7) / 20).
pub(crate) fn d_to_l_from_gain(g_max: f64) -> f64 {
    10f64.powf((g_max - 7.7) / 20.0)
}

/// Peak gain from D/lambda, 20 log10(D/lambda) + 7.7.
pub(crate) fn gain_from_d_to_l(d_to_l: f64) -> f64 {
    20.0 * d_to_l.log10() + 7.7
}

/// Gain of the first side lobe, G_1 = 2 + 15 log10(D/lambda).
pub(crate) fn first_sidelobe_dbi(d_to_l: f64) -> f64 {
    2.0 + 15.0 * d_to_l.log10()
}

/// Main-lobe edge angle phi_m = 20 / (D/lambda) * sqrt(G_max - G_1).
///
/// Rejects G_max < G_1, where the square root leaves the real domain.
pub(crate) fn main_lobe_edge_deg(g_max: f64, g_1: f64, d_to_l: f64) -> Result<f64> {
    if g_max < g_1 {
        return Err(AntennaError::Inconsistent(format!(
            "max gain {g_max:.2} dBi is below the first side-lobe gain {g_1:.2} dBi; \
             the main-lobe edge angle is undefined"
        )));
    }
    Ok(20.0 / d_to_l * (g_max - g_1).sqrt())
}
