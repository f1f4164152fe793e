//! ITU-R S.465-6 earth-station reference pattern.
//!
//! Reference radiation pattern for earth station antennas in the
//! fixed-satellite service, 2 to 31 GHz. The Recommendation defines no
//! gain inside the minimum off-axis angle phi_min; queries there return
//! the undefined sentinel and the pattern peak is the value at phi_min.

use crate::direction::{normalize_off_axis, Direction};
use crate::models::{wavelength_m, AntennaModel, ModelFamily};
use crate::pattern::{round2, sample_plane, PatternSpec};
use crate::schema::{ParamKind, ParamRule, ParamSchema};
use crate::{AntennaError, ParamSet, RawParams, Result};

static SCHEMA: ParamSchema = ParamSchema {
    rules: &[
        // Operating frequency (MHz)
        ParamRule::optional("oper_freq_mhz", ParamKind::Number).range(2000.0, 31000.0),
        // Antenna diameter (m)
        ParamRule::optional("diameter_m", ParamKind::Number).range(0.001, 99.999),
        // Diameter to wavelength ratio
        ParamRule::optional("d_to_l", ParamKind::Number).range(0.001, 10000.0),
    ],
};

#[derive(Debug, Default)]
pub struct ItuS465 {
    params: ParamSet,
}

/// Resolve D/lambda from whichever of {frequency, diameter, d_to_l} the
/// caller supplied; shared with the S.580 model, which layers its own
/// constraints on top.
pub(crate) fn derive_d_to_l(params: &mut ParamSet) -> Result<()> {
    let frequency = params.opt_num("oper_freq_mhz");
    let diameter = params.opt_num("diameter_m");
    let d_to_l = params.opt_num("d_to_l");

    match (frequency, diameter, d_to_l) {
        (None, None, None) => Err(AntennaError::Inconsistent(
            "at least d_to_l, or oper_freq_mhz together with diameter_m, must be provided"
                .to_string(),
        )),
        (None, Some(_), None) => Err(AntennaError::Inconsistent(
            "diameter_m alone is not enough; also provide oper_freq_mhz or d_to_l".to_string(),
        )),
        (Some(_), None, None) => Err(AntennaError::Inconsistent(
            "oper_freq_mhz alone is not enough; also provide diameter_m or d_to_l".to_string(),
        )),
        (Some(f), Some(d), None) => {
            params.insert_num("d_to_l", d / wavelength_m(f));
            Ok(())
        }
        // d_to_l supplied directly wins over any derivation.
        _ => Ok(()),
    }
}

/// Minimum defined off-axis angle, Recommends 2 and NOTE 5.
pub(crate) fn phi_min_deg(d_to_l: f64) -> f64 {
    if d_to_l >= 50.0 {
        1f64.max(100.0 / d_to_l)
    } else if d_to_l >= 33.3 {
        2f64.max(114.0 * d_to_l.powf(-1.09))
    } else {
        2.5
    }
}

/// The side-lobe envelope beyond phi_min, Recommends 2.
pub(crate) fn reference_envelope(phi: f64) -> f64 {
    if phi < 48.0 {
        32.0 - 25.0 * phi.log10()
    } else {
        -10.0
    }
}

impl ItuS465 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AntennaModel for ItuS465 {
    fn family(&self) -> ModelFamily {
        ModelFamily::S465
    }

    fn schema(&self) -> &'static ParamSchema {
        &SCHEMA
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn set_params(&mut self, raw: &RawParams) -> Result<()> {
        let mut params = crate::schema::validate(raw, &SCHEMA)?;
        derive_d_to_l(&mut params)?;
        self.params = params;
        Ok(())
    }

    fn gain(&self, direction: Direction) -> Result<Option<f64>> {
        let phi = direction.require_off_axis(self.family().identifier())?;
        let phi = normalize_off_axis(phi);
        let d_to_l = self.params.num("d_to_l")?;

        if phi < phi_min_deg(d_to_l) {
            return Ok(None);
        }
        Ok(Some(reference_envelope(phi)))
    }

    fn pattern(&self) -> Result<PatternSpec> {
        let d_to_l = self.params.num("d_to_l")?;
        let phi_min = phi_min_deg(d_to_l);
        // The envelope is defined from phi_min on; the reported peak is
        // the value there, not a physically implied boresight gain.
        let g_max = round2(reference_envelope(phi_min));

        let h_pattern = sample_plane(|angle| self.gain(Direction::off_axis(angle)))?;
        let v_pattern = h_pattern.clone();

        Ok(PatternSpec {
            name: self.family().title().to_string(),
            make: "ITU".to_string(),
            frequency_mhz: self.params.opt_num("oper_freq_mhz"),
            h_width_deg: None,
            v_width_deg: None,
            front_to_back_db: None,
            gain_dbi: g_max,
            tilt_deg: 0.0,
            polarization: None,
            comment: format!("D/lambda: {d_to_l:.2}. Gain relates to +/-{phi_min:.2} deg."),
            h_pattern,
            v_pattern,
            params: self.params.clone(),
        })
    }
}
