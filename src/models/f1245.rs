//! ITU-R F.1245-3 average radiation pattern.
//!
//! Mathematical model of average and related radiation patterns for
//! point-to-point fixed wireless system antennas, 1 GHz to 86 GHz.
//! Recommends 2 gives the average envelope, Recommends 3 the related
//! pattern with the oscillating side-lobe term F(phi).

use crate::direction::{normalize_off_axis, Direction};
use crate::models::{
    d_to_l_from_gain, first_sidelobe_dbi, gain_from_d_to_l, main_lobe_edge_deg, wavelength_m,
    AntennaModel, ModelFamily,
};
use crate::pattern::{round2, sample_plane, PatternSpec};
use crate::schema::{ParamKind, ParamRule, ParamSchema};
use crate::{AntennaError, ParamSet, RawParams, Result};

pub const CALC_OPT_REC2: &str = "Rec. 2";
pub const CALC_OPT_REC3: &str = "Rec. 3";

static SCHEMA: ParamSchema = ParamSchema {
    rules: &[
        // Operating frequency (MHz)
        ParamRule::mandatory("oper_freq_mhz", ParamKind::Number).range(1000.0, 86000.0),
        // Which Recommends clause to evaluate
        ParamRule::mandatory("calc_opt", ParamKind::Text).allowed(&[CALC_OPT_REC2, CALC_OPT_REC3]),
        // Maximum main-lobe antenna gain (dBi)
        ParamRule::optional("max_gain_dbi", ParamKind::Number).range(-29.9, 89.9),
        // Antenna diameter (m)
        ParamRule::optional("diameter_m", ParamKind::Number).range(0.001, 99.999),
    ],
};

const BAND_1_70GHZ: &str = "1-70 GHz";
const BAND_70_86GHZ: &str = "70-86 GHz";

#[derive(Debug, Default)]
pub struct ItuF1245 {
    params: ParamSet,
}

impl ItuF1245 {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(params: &mut ParamSet) -> Result<()> {
        let diameter = params.opt_num("diameter_m");
        let max_gain = params.opt_num("max_gain_dbi");

        let frequency = params.num("oper_freq_mhz")?;
        let band = if frequency < 70000.0 {
            BAND_1_70GHZ
        } else {
            BAND_70_86GHZ
        };
        params.insert_text("freq_band", band);

        match (max_gain, diameter) {
            (None, None) => {
                return Err(AntennaError::Inconsistent(
                    "at least one of max_gain_dbi, diameter_m must be provided".to_string(),
                ));
            }
            (Some(g), None) => {
                params.insert_num("d_to_l", d_to_l_from_gain(g));
            }
            (_, Some(d)) => {
                let d_to_l = d / wavelength_m(frequency);
                params.insert_num("d_to_l", d_to_l);
                if max_gain.is_none() {
                    params.insert_num("max_gain_dbi", gain_from_d_to_l(d_to_l));
                }
            }
        }
        Ok(())
    }

    /// Recommends 2: average side-lobe envelope.
    fn gain_rec2(&self, phi: f64) -> Result<f64> {
        let g_max = self.params.num("max_gain_dbi")?;
        if phi == 0.0 {
            return Ok(g_max);
        }

        let d_to_l = self.params.num("d_to_l")?;
        let g_1 = first_sidelobe_dbi(d_to_l);
        let phi_m = main_lobe_edge_deg(g_max, g_1, d_to_l)?;

        let (slope_end, high_band) = if self.params.text("freq_band")? == BAND_70_86GHZ {
            (120.0, true)
        } else {
            (48.0, false)
        };

        Ok(if d_to_l > 100.0 {
            let phi_r = 12.02 * d_to_l.powf(-0.6);
            let floor = if high_band { -23.0 } else { -13.0 };
            if phi < phi_m {
                g_max - 2.5e-3 * (d_to_l * phi).powi(2)
            } else if phi < phi_m.max(phi_r) {
                g_1
            } else if phi < slope_end {
                29.0 - 25.0 * phi.log10()
            } else {
                floor
            }
        } else {
            let floor = if high_band {
                -13.0 - 5.0 * d_to_l.log10()
            } else {
                -3.0 - 5.0 * d_to_l.log10()
            };
            if phi < phi_m {
                g_max - 2.5e-3 * (d_to_l * phi).powi(2)
            } else if phi < slope_end {
                39.0 - 5.0 * d_to_l.log10() - 25.0 * phi.log10()
            } else {
                floor
            }
        })
    }

    /// Recommends 3: related pattern with the oscillating term F(phi).
    fn gain_rec3(&self, phi: f64) -> Result<f64> {
        let g_max = self.params.num("max_gain_dbi")?;
        if phi == 0.0 {
            return Ok(g_max);
        }

        let d_to_l = self.params.num("d_to_l")?;
        let high_band = self.params.text("freq_band")? == BAND_70_86GHZ;
        let slope_end = if high_band { 120.0 } else { 48.0 };

        let g_1 = first_sidelobe_dbi(d_to_l);
        let phi_r = if d_to_l > 100.0 {
            15.85 * d_to_l.powf(-0.6)
        } else {
            39.8 * d_to_l.powf(-0.8)
        };

        let sin_arg = (3.0 * std::f64::consts::PI * phi / (2.0 * phi_r)).to_radians();
        let f_phi = 10.0 * (0.9 * sin_arg.sin().powi(2) + 0.1).log10();
        let g_a = g_max - 2.5e-3 * (d_to_l * phi).powi(2);
        let g_b = g_1 + f_phi;

        Ok(if d_to_l > 100.0 {
            let floor = if high_band { -20.0 } else { -10.0 };
            if phi < phi_r {
                g_a.max(g_b)
            } else if phi < slope_end {
                32.0 - 25.0 * phi.log10() + f_phi
            } else {
                floor + f_phi
            }
        } else {
            let floor = if high_band {
                -10.0 - 5.0 * d_to_l.log10()
            } else {
                -5.0 * d_to_l.log10()
            };
            if phi < phi_r {
                g_a.max(g_b)
            } else if phi < slope_end {
                42.0 - 5.0 * d_to_l.log10() - 25.0 * phi.log10() + f_phi
            } else {
                floor + f_phi
            }
        })
    }
}

impl AntennaModel for ItuF1245 {
    fn family(&self) -> ModelFamily {
        ModelFamily::F1245
    }

    fn schema(&self) -> &'static ParamSchema {
        &SCHEMA
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn set_params(&mut self, raw: &RawParams) -> Result<()> {
        let mut params = crate::schema::validate(raw, &SCHEMA)?;
        Self::derive(&mut params)?;
        self.params = params;
        Ok(())
    }

    fn gain(&self, direction: Direction) -> Result<Option<f64>> {
        let phi = direction.require_off_axis(self.family().identifier())?;
        let phi = normalize_off_axis(phi);

        if self.params.text("calc_opt")? == CALC_OPT_REC2 {
            self.gain_rec2(phi).map(Some)
        } else {
            self.gain_rec3(phi).map(Some)
        }
    }

    fn pattern(&self) -> Result<PatternSpec> {
        let g_max = self.params.num("max_gain_dbi")?;
        let d_to_l = self.params.num("d_to_l")?;
        // Recommends 4: phi_3 = 35 / (D/lambda)
        let phi_3 = round2(35.0 / d_to_l);

        let front_to_back = {
            let at_peak = self.gain(Direction::off_axis(0.0))?.unwrap_or(g_max);
            let at_back = self.gain(Direction::off_axis(180.0))?.unwrap_or(g_max);
            round2(at_peak - at_back)
        };

        let h_pattern = sample_plane(|angle| self.gain(Direction::off_axis(angle)))?;
        let v_pattern = h_pattern.clone();

        Ok(PatternSpec {
            name: self.family().title().to_string(),
            make: "ITU".to_string(),
            frequency_mhz: Some(self.params.num("oper_freq_mhz")?),
            h_width_deg: Some(phi_3),
            v_width_deg: Some(phi_3),
            front_to_back_db: Some(front_to_back),
            gain_dbi: round2(g_max),
            tilt_deg: 0.0,
            polarization: None,
            comment: format!("Ant. diam to wavelength ratio: {d_to_l:.2}"),
            h_pattern,
            v_pattern,
            params: self.params.clone(),
        })
    }
}
