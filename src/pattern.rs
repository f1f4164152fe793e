//! Sampled radiation pattern specification.
//!
//! A [`PatternSpec`] is the derived data display and export collaborators
//! consume: MSI-Planet header fields, the two 361-point plane samples
//! (integer degrees 0..=360 inclusive) and the validated parameter set
//! that produced them. It is recomputed in full by every
//! [`crate::AntennaModel::pattern`] call; consumers never re-derive gain
//! themselves.

use crate::{ParamSet, Result};
use serde::{Deserialize, Serialize};

/// Samples per plane: integer degrees 0..=360 inclusive.
pub const PLANE_POINTS: usize = 361;

/// Gain sample at one integer degree.
///
/// `gain_dbi` is `None` where the governing Recommendation defines no
/// value (e.g. S.465/S.580 inside the minimum off-axis angle); the
/// sentinel is preserved verbatim, never interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternPoint {
    pub angle_deg: u16,
    pub gain_dbi: Option<f64>,
}

/// Full angular radiation-pattern sample plus header metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Model name, e.g. "ITU-R F.699-8".
    pub name: String,
    /// Pattern source, "ITU" for all reference models.
    pub make: String,
    /// Design frequency (MHz) when the model carries one.
    pub frequency_mhz: Option<f64>,
    /// Horizontal 3 dB beamwidth (degrees).
    pub h_width_deg: Option<f64>,
    /// Vertical 3 dB beamwidth (degrees).
    pub v_width_deg: Option<f64>,
    /// Front-to-back ratio (dB).
    pub front_to_back_db: Option<f64>,
    /// Peak gain of the pattern (dBi); for S.465/S.580 this is the gain
    /// at the minimum defined off-axis angle, not a physical peak.
    pub gain_dbi: f64,
    /// Downward tilt of the main beam (degrees).
    pub tilt_deg: f64,
    pub polarization: Option<String>,
    pub comment: String,
    /// Horizontal-plane gain samples, indexed by integer degree.
    pub h_pattern: Vec<PatternPoint>,
    /// Vertical-plane gain samples, indexed by integer degree.
    pub v_pattern: Vec<PatternPoint>,
    /// The validated parameter set the pattern was computed from.
    pub params: ParamSet,
}

impl PatternSpec {
    /// Attenuation (dB) of a sample relative to the pattern peak,
    /// rounded to two decimals as the MSI-Planet convention expects.
    pub fn loss_db(&self, point: &PatternPoint) -> Option<f64> {
        point.gain_dbi.map(|g| round2(self.gain_dbi - g))
    }
}

/// Evaluate a gain closure at every integer degree 0..=360.
///
/// Deterministic and stateless: two calls with the same closure over
/// unchanged parameters produce bit-identical sequences.
pub(crate) fn sample_plane(
    mut gain_at: impl FnMut(f64) -> Result<Option<f64>>,
) -> Result<Vec<PatternPoint>> {
    (0..PLANE_POINTS as u16)
        .map(|angle_deg| {
            Ok(PatternPoint {
                angle_deg,
                gain_dbi: gain_at(f64::from(angle_deg))?,
            })
        })
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
