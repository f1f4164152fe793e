//! Pattern export adapters.
//!
//! Exporters consume a computed [`PatternSpec`] and own their on-disk
//! encoding; they never re-derive gain or mutate the specification.
//! Attenuation values are written relative to the pattern peak, with
//! undefined samples rendered as `n/a`.

use crate::pattern::{PatternPoint, PatternSpec};
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub trait Exporter {
    fn export(&self, spec: &PatternSpec, path: &Path) -> Result<()>;
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "n/a".to_string(),
    }
}

fn fmt_loss(spec: &PatternSpec, point: &PatternPoint) -> String {
    fmt_opt(spec.loss_db(point))
}

/// Flat `key,value` rows followed by per-point plane rows.
pub struct CsvExport;

impl Exporter for CsvExport {
    fn export(&self, spec: &PatternSpec, path: &Path) -> Result<()> {
        debug!("writing CSV pattern to {:?}", path);
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, "name,{}", spec.name)?;
        writeln!(file, "make,{}", spec.make)?;
        writeln!(file, "frequency_mhz,{}", fmt_opt(spec.frequency_mhz))?;
        writeln!(file, "h_width_deg,{}", fmt_opt(spec.h_width_deg))?;
        writeln!(file, "v_width_deg,{}", fmt_opt(spec.v_width_deg))?;
        writeln!(file, "front_to_back_db,{}", fmt_opt(spec.front_to_back_db))?;
        writeln!(file, "gain_dbi,{}", spec.gain_dbi)?;
        writeln!(file, "tilt_deg,{}", spec.tilt_deg)?;
        writeln!(file, "comment,{}", spec.comment)?;
        for point in &spec.h_pattern {
            writeln!(file, "h_pattern,{},{}", point.angle_deg, fmt_loss(spec, point))?;
        }
        for point in &spec.v_pattern {
            writeln!(file, "v_pattern,{},{}", point.angle_deg, fmt_loss(spec, point))?;
        }
        file.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON of the full specification object.
pub struct JsonExport;

impl Exporter for JsonExport {
    fn export(&self, spec: &PatternSpec, path: &Path) -> Result<()> {
        debug!("writing JSON pattern to {:?}", path);
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, spec)?;
        Ok(())
    }
}

/// YAML rendering of the full specification object.
pub struct YamlExport;

impl Exporter for YamlExport {
    fn export(&self, spec: &PatternSpec, path: &Path) -> Result<()> {
        debug!("writing YAML pattern to {:?}", path);
        let file = BufWriter::new(File::create(path)?);
        serde_yaml::to_writer(file, spec)?;
        Ok(())
    }
}

/// MSI Planet antenna pattern format.
///
/// Header lines followed by `HORIZONTAL 360` / `VERTICAL 360` blocks of
/// angle/attenuation pairs; the 360-degree sample duplicates 0 and is
/// not written.
pub struct MsiExport;

impl Exporter for MsiExport {
    fn export(&self, spec: &PatternSpec, path: &Path) -> Result<()> {
        debug!("writing MSI pattern to {:?}", path);
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, "NAME {}", spec.name)?;
        writeln!(file, "MAKE {}", spec.make)?;
        writeln!(file, "FREQUENCY {} MHz", fmt_opt(spec.frequency_mhz))?;
        writeln!(file, "H_WIDTH {} Deg.", fmt_opt(spec.h_width_deg))?;
        writeln!(file, "V_WIDTH {} Deg.", fmt_opt(spec.v_width_deg))?;
        writeln!(file, "FRONT_TO_BACK {} dB", fmt_opt(spec.front_to_back_db))?;
        writeln!(file, "GAIN {} dBi", spec.gain_dbi)?;
        writeln!(file, "TILT {} Deg.", spec.tilt_deg)?;
        writeln!(
            file,
            "POLARIZATION {}",
            spec.polarization.as_deref().unwrap_or("n/a")
        )?;
        writeln!(file, "COMMENT {}", spec.comment)?;

        writeln!(file, "HORIZONTAL 360")?;
        for point in spec.h_pattern.iter().filter(|p| p.angle_deg < 360) {
            writeln!(file, "{} {}", point.angle_deg, fmt_loss(spec, point))?;
        }
        writeln!(file, "VERTICAL 360")?;
        for point in spec.v_pattern.iter().filter(|p| p.angle_deg < 360) {
            writeln!(file, "{} {}", point.angle_deg, fmt_loss(spec, point))?;
        }
        file.flush()?;
        Ok(())
    }
}
