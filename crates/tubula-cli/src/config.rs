//! TOML configuration deserialisation for generation jobs.

use anyhow::Result;
use serde::Deserialize;
use tubula_core::{twist_from_displacement, TubeParams};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub lattice: LatticeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Lattice parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct LatticeConfig {
    /// Total number of molecules in the cylinder.
    pub molecules: u32,
    /// Number of stacked rings.
    pub rings: u32,
    /// Cylinder radius (angstrom).
    pub radius: f64,
    /// Vertical distance between consecutive rings (angstrom).
    pub ring_spacing: f64,
    /// Tilt between the in-plane dipole component and the ring tangent
    /// (radians). Default: 0.
    #[serde(default)]
    pub tilt: f64,
    /// Angle between each dipole and the cylinder axis (radians).
    /// Default: 0 (dipoles along the axis).
    #[serde(default)]
    pub polar_angle: f64,
    /// Azimuthal angle between consecutive molecules in a ring (radians).
    /// Default: 2π divided by the number of molecules per ring.
    pub azimuthal_step: Option<f64>,
    /// Twist angle between molecules on consecutive rings (radians).
    /// Mutually exclusive with `displacement`.
    pub twist: Option<f64>,
    /// Vertical displacement angle between dipoles on neighbouring rings
    /// (radians); the twist follows as h·tan(displacement)/R.
    /// Mutually exclusive with `twist`.
    pub displacement: Option<f64>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the position and component tables as CSV
    /// (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also save the whole lattice as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl LatticeConfig {
    /// Resolve the configuration into generator parameters.
    ///
    /// Derived values (azimuthal step, twist from displacement) are
    /// computed here; constraint checking is left to the generator so
    /// that every caller goes through the same validation. Omitting both
    /// `twist` and `displacement` gives an untwisted tube.
    pub fn to_params(&self) -> Result<TubeParams> {
        let ring_size = self.molecules.checked_div(self.rings).unwrap_or(0);
        let azimuthal_step = self
            .azimuthal_step
            .unwrap_or_else(|| TubeParams::uniform_step(ring_size));

        let twist = match (self.twist, self.displacement) {
            (Some(_), Some(_)) => anyhow::bail!(
                "'twist' and 'displacement' are mutually exclusive; give one or neither"
            ),
            (Some(twist), None) => twist,
            (None, Some(displacement)) => {
                twist_from_displacement(self.ring_spacing, self.radius, displacement)
            }
            (None, None) => 0.0,
        };

        Ok(TubeParams {
            n_molecules: self.molecules,
            n_rings: self.rings,
            radius: self.radius,
            ring_spacing: self.ring_spacing,
            azimuthal_step,
            twist,
            tilt: self.tilt,
            polar_angle: self.polar_angle,
        })
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_minimal_config() {
        let config: JobConfig = toml::from_str(
            r#"
            [lattice]
            molecules = 6000
            rings = 100
            radius = 60.0
            ring_spacing = 8.3
            "#,
        )
        .unwrap();

        let params = config.lattice.to_params().unwrap();
        assert_eq!(params.n_molecules, 6000);
        assert_eq!(params.ring_size(), 60);
        assert_eq!(params.twist, 0.0);
        assert_eq!(params.tilt, 0.0);
        assert!((params.azimuthal_step - 2.0 * PI / 60.0).abs() < 1e-15);
        assert!(params.validate().is_ok());

        assert_eq!(config.output.directory, "./output");
        assert!(config.output.save_csv);
        assert!(!config.output.save_json);
    }

    #[test]
    fn test_explicit_twist() {
        let config: JobConfig = toml::from_str(
            r#"
            [lattice]
            molecules = 100
            rings = 10
            radius = 20.0
            ring_spacing = 5.0
            twist = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.lattice.to_params().unwrap().twist, 0.25);
    }

    #[test]
    fn test_twist_from_displacement() {
        let config: JobConfig = toml::from_str(
            r#"
            [lattice]
            molecules = 100
            rings = 10
            radius = 60.0
            ring_spacing = 8.3
            displacement = 0.5585
            "#,
        )
        .unwrap();

        let params = config.lattice.to_params().unwrap();
        let expected = 8.3 * 0.5585_f64.tan() / 60.0;
        assert!((params.twist - expected).abs() < 1e-12);
    }

    #[test]
    fn test_twist_and_displacement_conflict() {
        let config: JobConfig = toml::from_str(
            r#"
            [lattice]
            molecules = 100
            rings = 10
            radius = 60.0
            ring_spacing = 8.3
            twist = 0.1
            displacement = 0.2
            "#,
        )
        .unwrap();
        assert!(config.lattice.to_params().is_err());
    }

    #[test]
    fn test_output_overrides() {
        let config: JobConfig = toml::from_str(
            r#"
            [lattice]
            molecules = 4
            rings = 2
            radius = 1.0
            ring_spacing = 1.0

            [output]
            directory = "/tmp/tubes"
            save_csv = false
            save_json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.output.directory, "/tmp/tubes");
        assert!(!config.output.save_csv);
        assert!(config.output.save_json);
    }

    #[test]
    fn test_zero_rings_defers_to_validation() {
        // to_params must not panic; the generator reports the error.
        let config: JobConfig = toml::from_str(
            r#"
            [lattice]
            molecules = 10
            rings = 0
            radius = 1.0
            ring_spacing = 1.0
            "#,
        )
        .unwrap();
        let params = config.lattice.to_params().unwrap();
        assert!(params.validate().is_err());
    }
}
