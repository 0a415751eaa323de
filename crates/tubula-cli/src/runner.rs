//! Generation runner: ties together configuration, the generator, and
//! the table writers.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use tubula_core::{generate, Lattice, TubeParams};

use crate::config::JobConfig;

/// Results from a generation run.
pub struct GenerationOutput {
    /// The resolved generator parameters.
    pub params: TubeParams,
    /// The generated lattice.
    pub lattice: Lattice,
}

/// Resolve the job into parameters and generate the lattice.
pub fn run_job(job: &JobConfig) -> Result<GenerationOutput> {
    let params = job
        .lattice
        .to_params()
        .context("Invalid lattice configuration")?;
    debug!(
        "resolved parameters: step={:.6} rad, twist={:.6} rad",
        params.azimuthal_step, params.twist
    );

    let lattice = generate(&params)?;
    println!(
        "Generated {} dipoles ({} rings × {} molecules, R={} Å)",
        lattice.len(),
        lattice.n_rings,
        lattice.ring_size,
        params.radius
    );
    Ok(GenerationOutput { params, lattice })
}

/// Write the position table to a CSV file with a metadata header.
pub fn write_positions_csv(
    lattice: &Lattice,
    params: &TubeParams,
    path: &Path,
) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    write_metadata_header(&mut file, "Dipole Positions", params)?;
    writeln!(file, "index,r_x,r_y,r_z")?;
    for (row, r) in lattice.positions.iter().enumerate() {
        writeln!(file, "{},{:.6},{:.6},{:.6}", row, r[0], r[1], r[2])?;
    }

    println!("Positions written to: {}", path.display());
    Ok(())
}

/// Write the orientation-component table to a CSV file with a metadata
/// header.
pub fn write_components_csv(
    lattice: &Lattice,
    params: &TubeParams,
    path: &Path,
) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    write_metadata_header(&mut file, "Dipole Orientation Components", params)?;
    writeln!(file, "index,x,y,z")?;
    for (row, u) in lattice.orientations.iter().enumerate() {
        writeln!(file, "{},{:.6},{:.6},{:.6}", row, u[0], u[1], u[2])?;
    }

    println!("Components written to: {}", path.display());
    Ok(())
}

/// Write the whole lattice to a JSON file.
pub fn write_lattice_json(lattice: &Lattice, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(lattice)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Lattice (JSON) written to: {}", path.display());
    Ok(())
}

fn write_metadata_header(
    file: &mut std::fs::File,
    table_name: &str,
    params: &TubeParams,
) -> Result<()> {
    use std::io::Write;

    writeln!(file, "# Tubula — {}", table_name)?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# molecules: {}, rings: {}, molecules/ring: {}",
        params.n_molecules,
        params.n_rings,
        params.ring_size()
    )?;
    writeln!(
        file,
        "# radius: {} A, ring_spacing: {} A",
        params.radius, params.ring_spacing
    )?;
    writeln!(
        file,
        "# azimuthal_step: {:.9} rad, twist: {:.9} rad, tilt: {:.9} rad, polar_angle: {:.9} rad",
        params.azimuthal_step, params.twist, params.tilt, params.polar_angle
    )?;
    writeln!(file, "#")?;
    Ok(())
}
