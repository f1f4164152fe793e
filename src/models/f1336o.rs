//! ITU-R F.1336-5 omnidirectional pattern.
//!
//! Recommends 2.1 (peak side-lobe envelope) and 2.2 (average side-lobe
//! envelope) for omnidirectional antennas in the 400 MHz to 70 GHz
//! range, with the electrical-tilt elevation remapping of Recommends 2.5.

use crate::direction::{normalize_elevation, Direction};
use crate::models::{AntennaModel, ModelFamily};
use crate::pattern::{round2, sample_plane, PatternSpec};
use crate::schema::{Dependency, ParamKind, ParamRule, ParamSchema, Requirement};
use crate::{ParamSet, RawParams, Result};

pub const PATTERN_PEAK: &str = "peak";
pub const PATTERN_AVERAGE: &str = "average";
pub const PERFORMANCE_TYPICAL: &str = "typical";
pub const PERFORMANCE_IMPROVED: &str = "improved";
pub const TILT_NONE: &str = "none";
pub const TILT_ELECTRICAL: &str = "electrical";

static SCHEMA: ParamSchema = ParamSchema {
    rules: &[
        // Operating frequency (MHz)
        ParamRule::mandatory("oper_freq_mhz", ParamKind::Number).range(400.0, 70000.0),
        // Maximum main-lobe antenna gain (dBi)
        ParamRule::mandatory("max_gain_dbi", ParamKind::Number).range(-29.9, 59.9),
        // Side-lobe pattern type
        ParamRule::mandatory("pattern_type", ParamKind::Text)
            .allowed(&[PATTERN_AVERAGE, PATTERN_PEAK]),
        // Side-lobe performance type
        ParamRule::mandatory("performance_type", ParamKind::Text)
            .allowed(&[PERFORMANCE_TYPICAL, PERFORMANCE_IMPROVED]),
        // Downward tilt type
        ParamRule::mandatory("tilt_type", ParamKind::Text).allowed(&[TILT_NONE, TILT_ELECTRICAL]),
        // Downward tilt angle (degrees); below-horizon angles are positive
        ParamRule::conditional(
            "tilt_angle_deg",
            ParamKind::Number,
            &[Dependency {
                on: "tilt_type",
                requirement: Requirement::NotEquals(TILT_NONE),
            }],
        )
        .range(-89.9, 89.9),
        // 3 dB beamwidth (degrees) in the elevation plane
        ParamRule::optional("beamwidth_el_deg", ParamKind::Number).range(0.1, 179.9),
        // Side-lobe level adjustment; 0.7 typical, 0 improved
        ParamRule::optional("k", ParamKind::Number).range(0.001, 0.999),
    ],
};

#[derive(Debug, Default)]
pub struct ItuF1336Omni {
    params: ParamSet,
}

impl ItuF1336Omni {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(params: &mut ParamSet) -> Result<()> {
        // Formula (23b): elevation beamwidth from the peak gain.
        if !params.contains("beamwidth_el_deg") {
            let g_0 = params.num("max_gain_dbi")?;
            params.insert_num("beamwidth_el_deg", 107.6 * 10f64.powf(-0.1 * g_0));
        }

        // Tilt angle defaults to 0, and a no-tilt antenna ignores any
        // angle the caller supplied.
        if !params.contains("tilt_angle_deg") || params.text("tilt_type")? == TILT_NONE {
            params.insert_num("tilt_angle_deg", 0.0);
        }

        // Recommends 2.3/2.4: k = 0.7 for typical side lobes up to
        // 3 GHz, 0 otherwise.
        if !params.contains("k") {
            let typical = params.text("performance_type")? == PERFORMANCE_TYPICAL;
            let k = if typical && params.num("oper_freq_mhz")? <= 3000.0 {
                0.7
            } else {
                0.0
            };
            params.insert_num("k", k);
        }
        Ok(())
    }

    /// Recommends 2.5, formula (1e): apparent elevation of a tilted beam.
    fn tilted_elevation(&self, theta_h: f64) -> Result<f64> {
        let beta = self.params.num("tilt_angle_deg")?;
        if self.params.text("tilt_type")? == TILT_NONE || beta == 0.0 {
            return Ok(theta_h);
        }

        let theta_h_beta = theta_h + beta;
        Ok(if theta_h_beta >= 0.0 {
            90.0 * theta_h_beta / (90.0 + beta)
        } else {
            90.0 * theta_h_beta / (90.0 - beta)
        })
    }

    /// Recommends 2.1: peak side-lobe envelope.
    fn gain_peak(&self, theta: f64) -> Result<f64> {
        let g_0 = self.params.num("max_gain_dbi")?;
        let k = self.params.num("k")?;
        let theta_3 = self.params.num("beamwidth_el_deg")?;

        let theta_4 = theta_3 * (1.0 - (k + 1.0).log10() / 1.2).sqrt();
        let theta_abs = theta.abs();

        Ok(if theta_abs < theta_4 {
            g_0 - 12.0 * (theta / theta_3).powi(2)
        } else if theta_abs < theta_3 {
            g_0 - 12.0 + 10.0 * (k + 1.0).log10()
        } else {
            g_0 - 12.0 + 10.0 * ((theta_abs / theta_3).powf(-1.5) + k).log10()
        })
    }

    /// Recommends 2.2: average side-lobe envelope.
    fn gain_average(&self, theta: f64) -> Result<f64> {
        let g_0 = self.params.num("max_gain_dbi")?;
        let k = self.params.num("k")?;
        let theta_3 = self.params.num("beamwidth_el_deg")?;

        let theta_5 = theta_3 * (1.25 + (k + 1.0).log10() / 1.2).sqrt();
        let theta_abs = theta.abs();

        Ok(if theta_abs < theta_3 {
            g_0 - 12.0 * (theta / theta_3).powi(2)
        } else if theta_abs < theta_5 {
            g_0 - 15.0 + 10.0 * (k + 1.0).log10()
        } else {
            g_0 - 15.0 + 10.0 * ((theta_abs / theta_3).powf(-1.5) + k).log10()
        })
    }
}

impl AntennaModel for ItuF1336Omni {
    fn family(&self) -> ModelFamily {
        ModelFamily::F1336Omni
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
        let elevation = direction.require_elevation(self.family().identifier())?;
        let theta_h = normalize_elevation(elevation);
        let theta = self.tilted_elevation(theta_h)?;

        if self.params.text("pattern_type")? == PATTERN_PEAK {
            self.gain_peak(theta).map(Some)
        } else {
            self.gain_average(theta).map(Some)
        }
    }

    fn pattern(&self) -> Result<PatternSpec> {
        let g_0 = self.params.num("max_gain_dbi")?;

        // Omnidirectional in azimuth: the horizontal cut is the gain at
        // the horizon for every bearing.
        let h_pattern = sample_plane(|_| self.gain(Direction::elevation(0.0)))?;
        let v_pattern = sample_plane(|angle| self.gain(Direction::elevation(angle)))?;

        let comment = format!(
            "Side-lobe: {}/{}, tilting: {}, k={}",
            self.params.text("pattern_type")?,
            self.params.text("performance_type")?,
            self.params.text("tilt_type")?,
            self.params.num("k")?,
        );

        Ok(PatternSpec {
            name: self.family().title().to_string(),
            make: "ITU".to_string(),
            frequency_mhz: Some(self.params.num("oper_freq_mhz")?),
            h_width_deg: Some(360.0),
            v_width_deg: Some(round2(self.params.num("beamwidth_el_deg")?)),
            front_to_back_db: None,
            gain_dbi: g_0,
            tilt_deg: self.params.num("tilt_angle_deg")?,
            polarization: None,
            comment,
            h_pattern,
            v_pattern,
            params: self.params.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AntennaError;

    fn base_raw() -> RawParams {
        RawParams::new()
            .set("oper_freq_mhz", 2000.0)
            .set("max_gain_dbi", 8.0)
            .set("pattern_type", PATTERN_PEAK)
            .set("performance_type", PERFORMANCE_TYPICAL)
            .set("tilt_type", TILT_NONE)
    }

    fn parameterized(raw: RawParams) -> ItuF1336Omni {
        let mut model = ItuF1336Omni::new();
        model.set_params(&raw).expect("valid parameters");
        model
    }

    #[test]
    fn test_electrical_tilt_requires_angle() {
        let mut model = ItuF1336Omni::new();
        let err = model
            .set_params(&base_raw().set("tilt_type", TILT_ELECTRICAL))
            .unwrap_err();
        match err {
            AntennaError::MissingConditional {
                param, dependency, ..
            } => {
                assert_eq!(param, "tilt_angle_deg");
                assert_eq!(dependency, "tilt_type");
            }
            other => panic!("expected MissingConditional, got {other:?}"),
        }
    }

    #[test]
    fn test_no_tilt_needs_no_angle() {
        let model = parameterized(base_raw());
        assert_eq!(model.params().num("tilt_angle_deg").unwrap(), 0.0);
    }

    #[test]
    fn test_default_beamwidth_and_k() {
        let model = parameterized(base_raw());
        // Formula (23b): 107.6 * 10^(-0.8)
        let bw = model.params().num("beamwidth_el_deg").unwrap();
        assert!((bw - 107.6 * 10f64.powf(-0.8)).abs() < 1e-9);
        // Typical performance at 2 GHz: k = 0.7.
        assert_eq!(model.params().num("k").unwrap(), 0.7);

        let improved =
            parameterized(base_raw().set("performance_type", PERFORMANCE_IMPROVED));
        assert_eq!(improved.params().num("k").unwrap(), 0.0);

        let high_band = parameterized(base_raw().set("oper_freq_mhz", 26000.0));
        assert_eq!(high_band.params().num("k").unwrap(), 0.0);
    }

    #[test]
    fn test_peak_envelope_bands() {
        let model = parameterized(base_raw());
        let theta_3 = model.params().num("beamwidth_el_deg").unwrap();

        assert_eq!(model.gain(Direction::elevation(0.0)).unwrap(), Some(8.0));

        // At theta_3 the shoulder value applies: g_0 - 12 + 10 log10(1.7).
        let g = model.gain(Direction::elevation(theta_3)).unwrap().unwrap();
        let expected = 8.0 - 12.0 + 10.0 * ((1.0f64).powf(-1.5) + 0.7).log10();
        assert!((g - expected).abs() < 1e-9, "got {g}, want {expected}");

        // Symmetric in elevation sign.
        let up = model.gain(Direction::elevation(30.0)).unwrap();
        let down = model.gain(Direction::elevation(-30.0)).unwrap();
        assert_eq!(up, down);
    }

    #[test]
    fn test_peak_boundary_continuity() {
        let model = parameterized(base_raw());
        let theta_3 = model.params().num("beamwidth_el_deg").unwrap();
        let k = 0.7f64;
        let theta_4 = theta_3 * (1.0 - (k + 1.0).log10() / 1.2).sqrt();

        // Both break angles are exactly continuous by construction.
        for boundary in [theta_4, theta_3] {
            let below = model
                .gain(Direction::elevation(boundary - 1e-9))
                .unwrap()
                .unwrap();
            let above = model
                .gain(Direction::elevation(boundary + 1e-9))
                .unwrap()
                .unwrap();
            assert!(
                (below - above).abs() < 1e-6,
                "discontinuity at {boundary}: {below} vs {above}"
            );
        }
    }

    #[test]
    fn test_average_envelope() {
        let model = parameterized(base_raw().set("pattern_type", PATTERN_AVERAGE));
        let theta_3 = model.params().num("beamwidth_el_deg").unwrap();
        // Shoulder: g_0 - 15 + 10 log10(1.7) between theta_3 and theta_5.
        let g = model
            .gain(Direction::elevation(theta_3 + 0.1))
            .unwrap()
            .unwrap();
        let expected = 8.0 - 15.0 + 10.0 * 1.7f64.log10();
        assert!((g - expected).abs() < 1e-9);
    }

    #[test]
    fn test_electrical_tilt_shifts_the_beam() {
        let tilted = parameterized(
            base_raw()
                .set("tilt_type", TILT_ELECTRICAL)
                .set("tilt_angle_deg", 10.0),
        );
        // Looking 10 degrees below the horizon now hits boresight.
        assert_eq!(tilted.gain(Direction::elevation(-10.0)).unwrap(), Some(8.0));
        let at_horizon = tilted.gain(Direction::elevation(0.0)).unwrap().unwrap();
        assert!(at_horizon < 8.0);
    }

    #[test]
    fn test_tilt_angle_ignored_when_type_none() {
        // A stray angle with tilt_type none is forced back to zero.
        let model = parameterized(base_raw().set("tilt_angle_deg", 25.0));
        assert_eq!(model.params().num("tilt_angle_deg").unwrap(), 0.0);
        assert_eq!(model.gain(Direction::elevation(0.0)).unwrap(), Some(8.0));
    }

    #[test]
    fn test_pattern_planes() {
        let model = parameterized(base_raw());
        let spec = model.pattern().unwrap();
        assert_eq!(spec.h_pattern.len(), 361);
        // Omni horizontal cut is flat at the horizon gain.
        let horizon = spec.h_pattern[0].gain_dbi;
        assert!(spec.h_pattern.iter().all(|p| p.gain_dbi == horizon));
        // Vertical cut rolls off away from boresight.
        assert_eq!(spec.v_pattern[0].gain_dbi, Some(8.0));
        assert!(spec.v_pattern[90].gain_dbi.unwrap() < 8.0);
        assert_eq!(spec.h_width_deg, Some(360.0));
    }
}
