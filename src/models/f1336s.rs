//! ITU-R F.1336-5 sectoral pattern.
//!
//! Recommends 3.1.1/3.1.2 (0.4-6 GHz): total gain composed from the
//! horizontal reference pattern, the vertical reference pattern and the
//! horizontal gain compression ratio. Recommends 3.2.1/3.2.2 (6-70 GHz):
//! single-lobe model over the equivalent off-axis angle psi.
//! Recommends 3.4/3.5 handle mechanically and electrically tilted beams.

use crate::direction::{normalize_azimuth, normalize_elevation, Direction};
use crate::models::{AntennaModel, ModelFamily};
use crate::pattern::{round2, sample_plane, PatternSpec};
use crate::schema::{Dependency, ParamKind, ParamRule, ParamSchema, Requirement};
use crate::{ParamSet, RawParams, Result};

pub const PATTERN_PEAK: &str = "peak";
pub const PATTERN_AVERAGE: &str = "average";
pub const PERFORMANCE_TYPICAL: &str = "typical";
pub const PERFORMANCE_IMPROVED: &str = "improved";
pub const TILT_NONE: &str = "none";
pub const TILT_MECHANICAL: &str = "mechanical";
pub const TILT_ELECTRICAL: &str = "electrical";

static SCHEMA: ParamSchema = ParamSchema {
    rules: &[
        // Operating frequency (MHz)
        ParamRule::mandatory("oper_freq_mhz", ParamKind::Number).range(400.0, 70000.0),
        // Maximum main-lobe antenna gain (dBi)
        ParamRule::mandatory("max_gain_dbi", ParamKind::Number).range(-29.9, 59.9),
        // 3 dB beamwidth (degrees) in the azimuth plane
        ParamRule::mandatory("beamwidth_az_deg", ParamKind::Number).range(0.1, 359.9),
        // Side-lobe pattern type
        ParamRule::mandatory("pattern_type", ParamKind::Text)
            .allowed(&[PATTERN_AVERAGE, PATTERN_PEAK]),
        // Side-lobe performance type
        ParamRule::mandatory("performance_type", ParamKind::Text)
            .allowed(&[PERFORMANCE_TYPICAL, PERFORMANCE_IMPROVED]),
        // Downward tilt type
        ParamRule::mandatory("tilt_type", ParamKind::Text)
            .allowed(&[TILT_NONE, TILT_MECHANICAL, TILT_ELECTRICAL]),
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
        // 3 dB beamwidth (degrees) in the elevation plane; the default
        // derivation of Recommends 3.3 only holds for narrower sectors
        ParamRule::conditional(
            "beamwidth_el_deg",
            ParamKind::Number,
            &[Dependency {
                on: "beamwidth_az_deg",
                requirement: Requirement::GreaterThan(120.0),
            }],
        )
        .range(0.1, 179.9),
        // Relative minimum gain adjustment, peak patterns
        ParamRule::optional("k_p", ParamKind::Number).range(0.001, 0.999),
        // Relative minimum gain adjustment, average patterns
        ParamRule::optional("k_a", ParamKind::Number).range(0.001, 0.999),
        // Azimuth pattern leaked-power adjustment
        ParamRule::optional("k_h", ParamKind::Number).range(0.001, 0.999),
        // Elevation pattern leaked-power adjustment
        ParamRule::optional("k_v", ParamKind::Number).range(0.001, 0.999),
    ],
};

const RANGE_04_6GHZ: &str = "0.4-6 GHz";
const RANGE_6_70GHZ: &str = "6-70 GHz";

#[derive(Debug, Default)]
pub struct ItuF1336Sectoral {
    params: ParamSet,
}

/// Derived k-factors and beamwidths threaded through the envelope math.
struct Coefficients {
    g_0: f64,
    phi_3: f64,
    theta_3: f64,
    k_p: f64,
    k_a: f64,
    k_h: f64,
    k_v: f64,
}

impl ItuF1336Sectoral {
    pub fn new() -> Self {
        Self::default()
    }

    fn derive(params: &mut ParamSet) -> Result<()> {
        let range = if params.num("oper_freq_mhz")? <= 6000.0 {
            RANGE_04_6GHZ
        } else {
            RANGE_6_70GHZ
        };
        params.insert_text("freq_range", range);

        if !params.contains("tilt_angle_deg") || params.text("tilt_type")? == TILT_NONE {
            params.insert_num("tilt_angle_deg", 0.0);
        }

        // Recommends 3.3: elevation beamwidth from gain and azimuth
        // beamwidth when not supplied.
        if !params.contains("beamwidth_el_deg") {
            let g_0 = params.num("max_gain_dbi")?;
            let phi_3 = params.num("beamwidth_az_deg")?;
            params.insert_num("beamwidth_el_deg", 31000.0 * 10f64.powf(-0.1 * g_0) / phi_3);
        }

        if !params.contains("k_p") {
            params.insert_num("k_p", 0.7);
        }
        if !params.contains("k_a") {
            params.insert_num("k_a", 0.7);
        }
        let typical = params.text("performance_type")? == PERFORMANCE_TYPICAL;
        if !params.contains("k_h") {
            params.insert_num("k_h", if typical { 0.8 } else { 0.7 });
        }
        if !params.contains("k_v") {
            params.insert_num("k_v", if typical { 0.7 } else { 0.3 });
        }
        Ok(())
    }

    fn coefficients(&self) -> Result<Coefficients> {
        Ok(Coefficients {
            g_0: self.params.num("max_gain_dbi")?,
            phi_3: self.params.num("beamwidth_az_deg")?,
            theta_3: self.params.num("beamwidth_el_deg")?,
            k_p: self.params.num("k_p")?,
            k_a: self.params.num("k_a")?,
            k_h: self.params.num("k_h")?,
            k_v: self.params.num("k_v")?,
        })
    }

    /// Recommends 3.4 (formulas 3b/3c) and 3.5 (formula 1e): equivalent
    /// (azimuth, elevation) seen by the untilted pattern.
    fn tilted_angles(&self, phi_h: f64, theta_h: f64) -> Result<(f64, f64)> {
        let beta = self.params.num("tilt_angle_deg")?;
        let tilt_type = self.params.text("tilt_type")?;
        if tilt_type == TILT_NONE && beta == 0.0 {
            return Ok((phi_h, theta_h));
        }

        let phi_h_rad = phi_h.to_radians();
        let theta_h_rad = theta_h.to_radians();
        let beta_rad = beta.to_radians();

        // Formula (3b): elevation in the tilted frame.
        let asin_arg = (theta_h_rad.sin() * beta_rad.cos()
            + theta_h_rad.cos() * phi_h_rad.cos() * beta_rad.sin())
        .clamp(-1.0, 1.0);
        let mut theta = asin_arg.asin().to_degrees();

        // Formula (3c): azimuth in the tilted frame.
        let cos_theta = theta.to_radians().cos();
        let acos_arg = ((-theta_h_rad.sin() * beta_rad.sin()
            + theta_h_rad.cos() * phi_h_rad.cos() * beta_rad.cos())
            / cos_theta)
            .clamp(-1.0, 1.0);
        let phi = acos_arg.acos().to_degrees();

        // Electrical tilt replaces the elevation remap, formula (1e).
        if tilt_type == TILT_ELECTRICAL {
            let theta_h_beta = theta_h + beta;
            theta = if theta_h_beta >= 0.0 {
                90.0 * theta_h_beta / (90.0 + beta)
            } else {
                90.0 * theta_h_beta / (90.0 - beta)
            };
        }

        Ok((phi, theta))
    }

    // --- Recommends 3.1.1 (peak) and 3.1.2 (average), 0.4-6 GHz ---

    /// Relative minimum gain, formula (2b1)/(2c1).
    fn g_180(c: &Coefficients, average: bool) -> f64 {
        let (base, k) = if average {
            (-15.0, c.k_a)
        } else {
            (-12.0, c.k_p)
        };
        base + 10.0 * (1.0 + 8.0 * k).log10() - 15.0 * (180.0 / c.theta_3).log10()
    }

    /// Horizontal reference pattern, formula (2b2)/(2c2).
    fn g_hr(c: &Coefficients, x_h: f64, average: bool) -> f64 {
        let lambda_kh = 3.0 * (1.0 - 0.5f64.powf(-c.k_h));
        let value = if x_h <= 0.5 {
            -12.0 * x_h.powi(2)
        } else {
            -12.0 * x_h.powf(2.0 - c.k_h) - lambda_kh
        };
        value.max(Self::g_180(c, average))
    }

    /// Attenuation incline factor C.
    fn incline_factor(c: &Coefficients, average: bool) -> f64 {
        let k = if average { c.k_a } else { c.k_p };
        let numerator = (180.0 / c.theta_3).powf(1.5) * (4f64.powf(-1.5) + c.k_v);
        (numerator / (1.0 + 8.0 * k)).log10() / (22.5 / c.theta_3).log10()
    }

    /// Vertical reference pattern, formula (2b3)/(2c3).
    fn g_vr(c: &Coefficients, x_v: f64, average: bool) -> f64 {
        let g_180 = Self::g_180(c, average);
        let incline = Self::incline_factor(c, average);
        let lambda_kv =
            12.0 - incline * 4f64.log10() - 10.0 * (4f64.powf(-1.5) + c.k_v).log10();

        let x_k = if average {
            (1.33 - 0.33 * c.k_v).sqrt()
        } else {
            (1.0 - 0.36 * c.k_v).sqrt()
        };

        if x_v < x_k {
            -12.0 * x_v.powi(2)
        } else if x_v < 4.0 {
            let base = if average { -15.0 } else { -12.0 };
            base + 10.0 * (x_v.powf(-1.5) + c.k_v).log10()
        } else if x_v < 90.0 / c.theta_3 {
            let offset = if average { 3.0 } else { 0.0 };
            -lambda_kv - offset - incline * x_v.log10()
        } else {
            g_180
        }
    }

    /// Composed gain for the 0.4-6 GHz range, formula (2a).
    fn gain_04_6ghz(&self, phi: f64, theta: f64, average: bool) -> Result<f64> {
        let c = self.coefficients()?;
        let x_h = phi.abs() / c.phi_3;
        let x_v = theta.abs() / c.theta_3;

        // Horizontal gain compression ratio, formula (2a2).
        let g_back = Self::g_hr(&c, 180.0 / c.phi_3, average);
        let r = (Self::g_hr(&c, x_h, average) - g_back) / (Self::g_hr(&c, 0.0, average) - g_back);

        Ok(c.g_0 + Self::g_hr(&c, x_h, average) + r * Self::g_vr(&c, x_v, average))
    }

    // --- Recommends 3.2.1 (peak) and 3.2.2 (average), 6-70 GHz ---

    /// Equivalent off-axis angle psi, formula (2d4).
    fn psi(phi: f64, theta: f64) -> f64 {
        let acos_arg = (phi.to_radians().cos() * theta.to_radians().cos()).clamp(-1.0, 1.0);
        acos_arg.acos().to_degrees()
    }

    /// Direction angle alpha in the cross-section plane, formula (2d2).
    fn alpha(phi: f64, theta: f64) -> f64 {
        theta
            .to_radians()
            .tan()
            .atan2(phi.to_radians().sin())
            .to_degrees()
    }

    /// Equivalent azimuth beamwidth beyond the sector edge.
    fn phi_3m(&self, c: &Coefficients, phi: f64, average: bool) -> f64 {
        let phi_th = if average { 1.152 * c.phi_3 } else { c.phi_3 };
        let phi_abs = phi.abs();

        if phi_abs <= phi_th {
            c.phi_3
        } else {
            let x = ((phi_abs - phi_th) / (180.0 - phi_th) * 90.0).to_radians();
            let a = x.cos() / c.phi_3;
            let b = x.sin() / c.theta_3;
            1.0 / (a.powi(2) + b.powi(2)).sqrt()
        }
    }

    /// Beamwidth in the direction of interest, formula (2d3).
    fn psi_alpha(&self, c: &Coefficients, phi: f64, theta: f64, average: bool) -> f64 {
        let psi = Self::psi(phi, theta);
        if psi <= 90.0 {
            let alpha_rad = Self::alpha(phi, theta).to_radians();
            let a = alpha_rad.cos() / c.phi_3;
            let b = alpha_rad.sin() / c.theta_3;
            1.0 / (a.powi(2) + b.powi(2)).sqrt()
        } else {
            let phi_3m = self.phi_3m(c, phi, average);
            let theta_rad = theta.to_radians();
            let a = theta_rad.cos() / phi_3m;
            let b = theta_rad.sin() / c.theta_3;
            1.0 / (a.powi(2) + b.powi(2)).sqrt()
        }
    }

    /// Single-lobe gain for the 6-70 GHz range, formulas (2e)/(2f).
    fn gain_6_70ghz(&self, phi: f64, theta: f64, average: bool) -> Result<f64> {
        let c = self.coefficients()?;
        let x = Self::psi(phi, theta) / self.psi_alpha(&c, phi, theta, average);

        Ok(if average {
            if x < 1.152 {
                c.g_0 - 12.0 * x.powi(2)
            } else {
                c.g_0 - 15.0 - 15.0 * x.log10()
            }
        } else if x < 1.0 {
            c.g_0 - 12.0 * x.powi(2)
        } else {
            c.g_0 - 12.0 - 15.0 * x.log10()
        })
    }
}

impl AntennaModel for ItuF1336Sectoral {
    fn family(&self) -> ModelFamily {
        ModelFamily::F1336Sectoral
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
        let (azimuth, elevation) =
            direction.require_azimuth_elevation(self.family().identifier())?;
        let phi_h = normalize_azimuth(azimuth);
        let theta_h = normalize_elevation(elevation);
        let (phi, theta) = self.tilted_angles(phi_h, theta_h)?;

        let average = self.params.text("pattern_type")? == PATTERN_AVERAGE;
        if self.params.text("freq_range")? == RANGE_04_6GHZ {
            self.gain_04_6ghz(phi, theta, average).map(Some)
        } else {
            self.gain_6_70ghz(phi, theta, average).map(Some)
        }
    }

    fn pattern(&self) -> Result<PatternSpec> {
        let g_0 = self.params.num("max_gain_dbi")?;

        let h_pattern =
            sample_plane(|angle| self.gain(Direction::azimuth_elevation(angle, 0.0)))?;
        // The vertical cut needs the azimuth to point backwards while the
        // elevation sweep passes behind the antenna.
        let v_pattern = sample_plane(|angle| {
            let azimuth = if angle > 90.0 && angle < 270.0 { 180.0 } else { 0.0 };
            self.gain(Direction::azimuth_elevation(azimuth, angle))
        })?;

        let comment = format!(
            "Side-lobe: {}/{}, tilting: {}, kp={}, ka={}, kh={}, kv={}",
            self.params.text("pattern_type")?,
            self.params.text("performance_type")?,
            self.params.text("tilt_type")?,
            self.params.num("k_p")?,
            self.params.num("k_a")?,
            self.params.num("k_h")?,
            self.params.num("k_v")?,
        );

        Ok(PatternSpec {
            name: self.family().title().to_string(),
            make: "ITU".to_string(),
            frequency_mhz: Some(self.params.num("oper_freq_mhz")?),
            h_width_deg: Some(self.params.num("beamwidth_az_deg")?),
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

    fn imt_raw() -> RawParams {
        // IMT base station, 806 MHz, per Report ITU-R M.2292 Table 2.
        RawParams::new()
            .set("oper_freq_mhz", 806.0)
            .set("max_gain_dbi", 15.0)
            .set("beamwidth_az_deg", 65.0)
            .set("pattern_type", PATTERN_AVERAGE)
            .set("performance_type", PERFORMANCE_IMPROVED)
            .set("tilt_type", TILT_NONE)
            .set("k_a", 0.7)
            .set("k_h", 0.7)
            .set("k_v", 0.3)
    }

    fn parameterized(raw: RawParams) -> ItuF1336Sectoral {
        let mut model = ItuF1336Sectoral::new();
        model.set_params(&raw).expect("valid parameters");
        model
    }

    #[test]
    fn test_default_coefficients_by_performance() {
        let typical = parameterized(
            RawParams::new()
                .set("oper_freq_mhz", 3550.0)
                .set("max_gain_dbi", 18.0)
                .set("beamwidth_az_deg", 65.0)
                .set("pattern_type", PATTERN_PEAK)
                .set("performance_type", PERFORMANCE_TYPICAL)
                .set("tilt_type", TILT_NONE),
        );
        assert_eq!(typical.params().num("k_p").unwrap(), 0.7);
        assert_eq!(typical.params().num("k_a").unwrap(), 0.7);
        assert_eq!(typical.params().num("k_h").unwrap(), 0.8);
        assert_eq!(typical.params().num("k_v").unwrap(), 0.7);

        let improved = parameterized(
            RawParams::new()
                .set("oper_freq_mhz", 3550.0)
                .set("max_gain_dbi", 18.0)
                .set("beamwidth_az_deg", 65.0)
                .set("pattern_type", PATTERN_PEAK)
                .set("performance_type", PERFORMANCE_IMPROVED)
                .set("tilt_type", TILT_NONE),
        );
        assert_eq!(improved.params().num("k_h").unwrap(), 0.7);
        assert_eq!(improved.params().num("k_v").unwrap(), 0.3);
    }

    #[test]
    fn test_elevation_beamwidth_default() {
        let model = parameterized(imt_raw());
        let bw = model.params().num("beamwidth_el_deg").unwrap();
        // Recommends 3.3: 31000 * 10^(-1.5) / 65
        let expected = 31000.0 * 10f64.powf(-1.5) / 65.0;
        assert!((bw - expected).abs() < 1e-9, "got {bw}, want {expected}");
    }

    #[test]
    fn test_wide_sector_requires_explicit_elevation_beamwidth() {
        let mut model = ItuF1336Sectoral::new();
        let err = model
            .set_params(&imt_raw().set("beamwidth_az_deg", 130.0))
            .unwrap_err();
        match err {
            AntennaError::MissingConditional {
                param, dependency, ..
            } => {
                assert_eq!(param, "beamwidth_el_deg");
                assert_eq!(dependency, "beamwidth_az_deg");
            }
            other => panic!("expected MissingConditional, got {other:?}"),
        }
        // Supplying it explicitly succeeds.
        assert!(model
            .set_params(
                &imt_raw()
                    .set("beamwidth_az_deg", 130.0)
                    .set("beamwidth_el_deg", 15.0)
            )
            .is_ok());
    }

    #[test]
    fn test_boresight_gain() {
        let model = parameterized(imt_raw());
        let g = model
            .gain(Direction::azimuth_elevation(0.0, 0.0))
            .unwrap()
            .unwrap();
        assert!((g - 15.0).abs() < 1e-9, "boresight must be g_0, got {g}");
    }

    #[test]
    fn test_azimuth_roll_off_monotonic_to_the_back() {
        let model = parameterized(imt_raw());
        let mut previous = f64::INFINITY;
        for az in [0.0, 20.0, 45.0, 90.0, 135.0, 180.0] {
            let g = model
                .gain(Direction::azimuth_elevation(az, 0.0))
                .unwrap()
                .unwrap();
            assert!(
                g <= previous + 1e-9,
                "gain must not grow towards the back: {g} at {az}"
            );
            previous = g;
        }
    }

    #[test]
    fn test_horizontal_reference_continuity_at_half_beamwidth() {
        let model = parameterized(imt_raw());
        let c = model.coefficients().unwrap();
        // x_h = 0.5 joins the quadratic and the shoulder exactly.
        let below = ItuF1336Sectoral::g_hr(&c, 0.5 - 1e-12, true);
        let above = ItuF1336Sectoral::g_hr(&c, 0.5 + 1e-12, true);
        assert!((below - above).abs() < 1e-6, "{below} vs {above}");
    }

    #[test]
    fn test_vertical_reference_band_joins() {
        let model = parameterized(imt_raw());
        let c = model.coefficients().unwrap();
        // x_v = 4 joins the side-lobe shelf and the incline exactly.
        let below = ItuF1336Sectoral::g_vr(&c, 4.0 - 1e-12, false);
        let above = ItuF1336Sectoral::g_vr(&c, 4.0 + 1e-12, false);
        assert!((below - above).abs() < 1e-6, "{below} vs {above}");
        // x_k is an engineered step bounded well under 1 dB.
        let x_k = (1.0f64 - 0.36 * c.k_v).sqrt();
        let below = ItuF1336Sectoral::g_vr(&c, x_k - 1e-12, false);
        let above = ItuF1336Sectoral::g_vr(&c, x_k + 1e-12, false);
        assert!((below - above).abs() < 0.5, "{below} vs {above}");
    }

    #[test]
    fn test_gain_example_matches_reference_configuration() {
        // The worked IMT example: G(az=15.2, el=20.4) lands deep in the
        // vertical side lobes, well below boresight but above the floor.
        let model = parameterized(
            imt_raw()
                .set("tilt_type", TILT_ELECTRICAL)
                .set("tilt_angle_deg", 3.0),
        );
        let g = model
            .gain(Direction::azimuth_elevation(15.2, 20.4))
            .unwrap()
            .unwrap();
        let c = model.coefficients().unwrap();
        let floor = c.g_0 + ItuF1336Sectoral::g_180(&c, true);
        assert!(g < 15.0 && g > floor, "got {g}, floor {floor}");
    }

    #[test]
    fn test_high_band_psi_model() {
        let model = parameterized(
            RawParams::new()
                .set("oper_freq_mhz", 26000.0)
                .set("max_gain_dbi", 22.0)
                .set("beamwidth_az_deg", 30.0)
                .set("pattern_type", PATTERN_PEAK)
                .set("performance_type", PERFORMANCE_TYPICAL)
                .set("tilt_type", TILT_NONE),
        );
        assert_eq!(
            model.gain(Direction::azimuth_elevation(0.0, 0.0)).unwrap(),
            Some(22.0)
        );
        // On the azimuth axis psi = |phi| and psi_alpha = phi_3, so at
        // phi = phi_3 the peak formula gives g_0 - 12.
        let g = model
            .gain(Direction::azimuth_elevation(30.0, 0.0))
            .unwrap()
            .unwrap();
        assert!((g - 10.0).abs() < 1e-6, "got {g}");
        // Beyond x = 1 the 15 log10 slope takes over.
        let g = model
            .gain(Direction::azimuth_elevation(60.0, 0.0))
            .unwrap()
            .unwrap();
        let expected = 22.0 - 12.0 - 15.0 * 2.0f64.log10();
        assert!((g - expected).abs() < 0.1, "got {g}, want {expected}");
    }

    #[test]
    fn test_mechanical_tilt_rotates_the_pattern() {
        let untilted = parameterized(imt_raw());
        let tilted = parameterized(
            imt_raw()
                .set("tilt_type", TILT_MECHANICAL)
                .set("tilt_angle_deg", 6.0),
        );
        // Boresight moves 6 degrees below the horizon.
        let g = tilted
            .gain(Direction::azimuth_elevation(0.0, -6.0))
            .unwrap()
            .unwrap();
        assert!((g - 15.0).abs() < 1e-6, "got {g}");
        // The untilted antenna peaks at the horizon instead.
        let g0_horizon = untilted
            .gain(Direction::azimuth_elevation(0.0, 0.0))
            .unwrap()
            .unwrap();
        let tilted_horizon = tilted
            .gain(Direction::azimuth_elevation(0.0, 0.0))
            .unwrap()
            .unwrap();
        assert!(tilted_horizon < g0_horizon);
    }

    #[test]
    fn test_pattern_vertical_cut_points_backwards_behind_the_antenna() {
        let model = parameterized(imt_raw());
        let spec = model.pattern().unwrap();
        assert_eq!(spec.v_pattern.len(), 361);
        assert_eq!(spec.h_pattern.len(), 361);
        // v cut at 180 degrees elevation equals the back-azimuth horizon
        // gain, not the forward one.
        let back = model
            .gain(Direction::azimuth_elevation(180.0, 0.0))
            .unwrap()
            .unwrap();
        let v_180 = spec.v_pattern[180].gain_dbi.unwrap();
        assert!((v_180 - back).abs() < 1e-9);
        assert_eq!(spec.h_width_deg, Some(65.0));
    }

    #[test]
    fn test_pattern_determinism() {
        let model = parameterized(imt_raw());
        assert_eq!(model.pattern().unwrap(), model.pattern().unwrap());
    }
}
