//! ITU-R F.699-8 reference pattern.
//!
//! Reference radiation patterns for fixed wireless system antennas for
//! coordination studies and interference assessment, 100 MHz to 86 GHz.
//! Recommends 2.1 applies above 1 GHz for D/lambda > 100, Recommends 2.2
//! above 1 GHz for D/lambda <= 100, and Recommends 2.3 below 1 GHz for
//! D/lambda > 0.63.

use crate::direction::{normalize_off_axis, Direction};
use crate::models::{
    d_to_l_from_gain, first_sidelobe_dbi, gain_from_d_to_l, main_lobe_edge_deg, wavelength_m,
    AntennaModel, ModelFamily,
};
use crate::pattern::{round2, sample_plane, PatternSpec};
use crate::schema::{ParamKind, ParamRule, ParamSchema};
use crate::{AntennaError, ParamSet, RawParams, Result};

static SCHEMA: ParamSchema = ParamSchema {
    rules: &[
        // Operating frequency (MHz)
        ParamRule::mandatory("oper_freq_mhz", ParamKind::Number).range(100.0, 86000.0),
        // Antenna diameter (m)
        ParamRule::optional("diameter_m", ParamKind::Number).range(0.001, 99.999),
        // Maximum main-lobe antenna gain (dBi)
        ParamRule::optional("max_gain_dbi", ParamKind::Number).range(-29.9, 89.9),
        // 3 dB beamwidth (degrees)
        ParamRule::optional("beamwidth_deg", ParamKind::Number).range(0.001, 179.999),
    ],
};

const BAND_SUB_1GHZ: &str = "0.1-1 GHz";
const BAND_1_70GHZ: &str = "1-70 GHz";
const BAND_70_86GHZ: &str = "70-86 GHz";

#[derive(Debug, Default)]
pub struct ItuF699 {
    params: ParamSet,
}

impl ItuF699 {
    pub fn new() -> Self {
        Self::default()
    }

    /// D/lambda from the -3 dB beamwidth, Recommends 4.1.
    fn d_to_l_from_beamwidth(beamwidth: f64) -> f64 {
        70.0 / beamwidth
    }

    /// Peak gain from the -3 dB beamwidth, Recommends 4.2.
    fn gain_from_beamwidth(beamwidth: f64) -> f64 {
        44.5 - 20.0 * beamwidth.log10()
    }

    /// -3 dB beamwidth from peak gain, Recommends 4.2 inverted.
    fn beamwidth_from_gain(g_max: f64) -> f64 {
        10f64.powf((44.5 - g_max) / 20.0)
    }

    /// Derive the frequency band, D/lambda and peak gain from whichever
    /// subset of {diameter, max gain, beamwidth} the caller supplied.
    fn derive(params: &mut ParamSet) -> Result<()> {
        let diameter = params.opt_num("diameter_m");
        let max_gain = params.opt_num("max_gain_dbi");
        let beamwidth = params.opt_num("beamwidth_deg");

        let frequency = params.num("oper_freq_mhz")?;
        let band = if frequency <= 1000.0 {
            BAND_SUB_1GHZ
        } else if frequency <= 70000.0 {
            BAND_1_70GHZ
        } else {
            BAND_70_86GHZ
        };
        params.insert_text("freq_band", band);

        // A supplied max gain wins over one implied by the beamwidth; a
        // supplied diameter wins as the D/lambda source.
        match (max_gain, diameter, beamwidth) {
            (None, None, None) => {
                return Err(AntennaError::Inconsistent(
                    "at least one of max_gain_dbi, diameter_m, beamwidth_deg must be provided"
                        .to_string(),
                ));
            }
            (Some(g), None, _) => {
                params.insert_num("d_to_l", d_to_l_from_gain(g));
            }
            (_, Some(d), _) => {
                let d_to_l = d / wavelength_m(frequency);
                params.insert_num("d_to_l", d_to_l);
                if max_gain.is_none() {
                    params.insert_num("max_gain_dbi", gain_from_d_to_l(d_to_l));
                }
            }
            (None, None, Some(bw)) => {
                params.insert_num("d_to_l", Self::d_to_l_from_beamwidth(bw));
                params.insert_num("max_gain_dbi", Self::gain_from_beamwidth(bw));
            }
        }
        Ok(())
    }

    /// Recommends 2.1: D/lambda > 100, above 1 GHz.
    fn gain_rec21(&self, phi: f64) -> Result<f64> {
        let g_max = self.params.num("max_gain_dbi")?;
        if phi == 0.0 {
            return Ok(g_max);
        }

        let d_to_l = self.params.num("d_to_l")?;
        let g_1 = first_sidelobe_dbi(d_to_l);
        let phi_m = main_lobe_edge_deg(g_max, g_1, d_to_l)?;
        let phi_r = 15.85 * d_to_l.powf(-0.6);

        let (slope_end, floor) = if self.params.text("freq_band")? == BAND_70_86GHZ {
            (120.0, -20.0)
        } else {
            (48.0, -10.0)
        };

        Ok(if phi < phi_m {
            g_max - 2.5e-3 * (d_to_l * phi).powi(2)
        } else if phi < phi_r {
            g_1
        } else if phi < slope_end {
            32.0 - 25.0 * phi.log10()
        } else {
            floor
        })
    }

    /// Recommends 2.2: D/lambda <= 100, above 1 GHz.
    fn gain_rec22(&self, phi: f64) -> Result<f64> {
        let g_max = self.params.num("max_gain_dbi")?;
        if phi == 0.0 {
            return Ok(g_max);
        }

        let d_to_l = self.params.num("d_to_l")?;
        let g_1 = first_sidelobe_dbi(d_to_l);
        let phi_m = main_lobe_edge_deg(g_max, g_1, d_to_l)?;

        let (slope_end, floor) = if self.params.text("freq_band")? == BAND_70_86GHZ {
            (120.0, -10.0 * d_to_l.log10())
        } else {
            (48.0, 10.0 - 10.0 * d_to_l.log10())
        };

        Ok(if phi < phi_m {
            g_max - 2.5e-3 * (d_to_l * phi).powi(2)
        } else if phi < 100.0 / d_to_l {
            g_1
        } else if phi < slope_end {
            52.0 - 10.0 * d_to_l.log10() - 25.0 * phi.log10()
        } else {
            floor
        })
    }

    /// Recommends 2.3: below 1 GHz, D/lambda > 0.63.
    fn gain_rec23(&self, phi: f64) -> Result<f64> {
        let g_max = self.params.num("max_gain_dbi")?;
        if phi == 0.0 {
            return Ok(g_max);
        }

        let d_to_l = self.params.num("d_to_l")?;
        let g_1 = first_sidelobe_dbi(d_to_l);
        let phi_m = main_lobe_edge_deg(g_max, g_1, d_to_l)?;
        let phi_s = 144.5 * d_to_l.powf(-0.2);

        Ok(if phi < phi_m {
            g_max - 2.5e-3 * (d_to_l * phi).powi(2)
        } else if phi < 100.0 / d_to_l {
            g_1
        } else if phi < phi_s {
            52.0 - 10.0 * d_to_l.log10() - 25.0 * phi.log10()
        } else {
            -2.0 - 5.0 * d_to_l.log10()
        })
    }
}

impl AntennaModel for ItuF699 {
    fn family(&self) -> ModelFamily {
        ModelFamily::F699
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

        let d_to_l = self.params.num("d_to_l")?;
        if self.params.text("freq_band")? == BAND_SUB_1GHZ {
            if d_to_l < 0.63 {
                return Err(AntennaError::Inconsistent(
                    "ITU-R F.699-8 below 1 GHz applies only for D/lambda > 0.63".to_string(),
                ));
            }
            return self.gain_rec23(phi).map(Some);
        }

        if d_to_l > 100.0 {
            self.gain_rec21(phi).map(Some)
        } else {
            self.gain_rec22(phi).map(Some)
        }
    }

    fn pattern(&self) -> Result<PatternSpec> {
        let g_max = self.params.num("max_gain_dbi")?;
        let d_to_l = self.params.num("d_to_l")?;
        let phi_3 = round2(Self::beamwidth_from_gain(g_max));

        let h_pattern = sample_plane(|angle| self.gain(Direction::off_axis(angle)))?;
        let v_pattern = h_pattern.clone();

        Ok(PatternSpec {
            name: self.family().title().to_string(),
            make: "ITU".to_string(),
            frequency_mhz: Some(self.params.num("oper_freq_mhz")?),
            h_width_deg: Some(phi_3),
            v_width_deg: Some(phi_3),
            front_to_back_db: None,
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
