//! ITU-R F.1336-5 low-gain circular-symmetry pattern.
//!
//! Recommends 4: antennas in the 1-3 GHz range with a main-lobe gain
//! below about 20 dBi and circular symmetry about the 3 dB beamwidth.

use crate::direction::{normalize_off_axis, Direction};
use crate::models::{AntennaModel, ModelFamily};
use crate::pattern::{round2, sample_plane, PatternSpec};
use crate::schema::{ParamKind, ParamRule, ParamSchema};
use crate::{ParamSet, RawParams, Result};

static SCHEMA: ParamSchema = ParamSchema {
    rules: &[
        // Operating frequency (MHz)
        ParamRule::mandatory("oper_freq_mhz", ParamKind::Number).range(1000.0, 3000.0),
        // Maximum main-lobe antenna gain (dBi)
        ParamRule::mandatory("max_gain_dbi", ParamKind::Number).range(-29.9, 20.0),
    ],
};

#[derive(Debug, Default)]
pub struct ItuF1336LowGain {
    params: ParamSet,
}

impl ItuF1336LowGain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 3 dB beamwidth implied by the peak gain,
    /// phi_3 = sqrt(27000 * 10^(-0.1 G_0)).
    fn beamwidth_deg(g_0: f64) -> f64 {
        (27000.0 * 10f64.powf(-0.1 * g_0)).sqrt()
    }

    fn envelope(&self, theta: f64) -> Result<f64> {
        let g_0 = self.params.num("max_gain_dbi")?;
        let phi_3 = Self::beamwidth_deg(g_0);
        let phi_1 = 1.9 * phi_3;
        let phi_2 = phi_1 * 10f64.powf((g_0 - 6.0) / 32.0);

        Ok(if theta < 1.08 * phi_3 {
            g_0 - 12.0 * (theta / phi_3).powi(2)
        } else if theta < phi_1 {
            g_0 - 14.0
        } else if theta < phi_2 {
            g_0 - 14.0 - 32.0 * (theta / phi_1).log10()
        } else {
            -8.0
        })
    }
}

impl AntennaModel for ItuF1336LowGain {
    fn family(&self) -> ModelFamily {
        ModelFamily::F1336LowGain
    }

    fn schema(&self) -> &'static ParamSchema {
        &SCHEMA
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn set_params(&mut self, raw: &RawParams) -> Result<()> {
        // No derivations beyond validation for this family.
        self.params = crate::schema::validate(raw, &SCHEMA)?;
        Ok(())
    }

    fn gain(&self, direction: Direction) -> Result<Option<f64>> {
        let theta = direction.require_off_axis(self.family().identifier())?;
        let theta = normalize_off_axis(theta);
        self.envelope(theta).map(Some)
    }

    fn pattern(&self) -> Result<PatternSpec> {
        let g_0 = self.params.num("max_gain_dbi")?;
        let phi_3 = round2(Self::beamwidth_deg(g_0));

        let h_pattern = sample_plane(|angle| self.gain(Direction::off_axis(angle)))?;
        let v_pattern = h_pattern.clone();

        Ok(PatternSpec {
            name: self.family().title().to_string(),
            make: "ITU".to_string(),
            frequency_mhz: Some(self.params.num("oper_freq_mhz")?),
            h_width_deg: Some(phi_3),
            v_width_deg: Some(phi_3),
            front_to_back_db: None,
            gain_dbi: g_0,
            tilt_deg: 0.0,
            polarization: None,
            comment: String::new(),
            h_pattern,
            v_pattern,
            params: self.params.clone(),
        })
    }
}
