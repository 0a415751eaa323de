//! Lattice generation for cylindrical aggregates.
//!
//! Given validated [`TubeParams`](crate::params::TubeParams), [`generate`]
//! places every molecule of the tube in a single pass over (ring, slot)
//! pairs. Each molecule gets a position on the cylinder surface and a unit
//! orientation vector:
//!
//! ```text
//! theta = i*twist + j*azimuthal_step
//! r = (R cos(theta), R sin(theta), h*i)
//! u = (-sin(beta) sin(theta ± alpha), sin(beta) cos(theta ± alpha), cos(beta))
//! ```
//!
//! where the tilt sign alternates with slot parity. The orientation norm
//! is exactly 1 for every input: the in-plane components square to
//! sin²(beta) and the axial component to cos²(beta), independent of theta
//! and the tilt.

use serde::{Deserialize, Serialize};

use crate::params::{ParamError, TubeParams};

/// One molecule of a generated lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct DipoleSite {
    /// Ring index along the cylinder axis.
    pub ring: u32,
    /// Slot index within the ring.
    pub slot: u32,
    /// Position on the cylinder surface (angstrom).
    pub position: [f64; 3],
    /// Unit orientation vector of the dipole.
    pub orientation: [f64; 3],
}

/// The generated aggregate: aligned position and orientation tables.
///
/// Rows are ring-major: row `k = ring * ring_size + slot`. The two tables
/// always have the same length and refer to the same molecule row-for-row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// Number of rings the lattice was generated with.
    pub n_rings: u32,
    /// Molecules per ring.
    pub ring_size: u32,
    /// Molecule positions (angstrom), one row per molecule.
    pub positions: Vec<[f64; 3]>,
    /// Unit orientation vectors, one row per molecule.
    pub orientations: Vec<[f64; 3]>,
}

impl Lattice {
    /// Total number of molecules.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Look up one molecule by row index, mapping the row back to its
    /// (ring, slot) pair.
    pub fn site(&self, row: usize) -> Option<DipoleSite> {
        if row >= self.len() {
            return None;
        }
        Some(DipoleSite {
            ring: (row / self.ring_size as usize) as u32,
            slot: (row % self.ring_size as usize) as u32,
            position: self.positions[row],
            orientation: self.orientations[row],
        })
    }

    /// Iterate over all molecules in row order.
    pub fn sites(&self) -> impl Iterator<Item = DipoleSite> + '_ {
        (0..self.len()).map(|row| self.site(row).expect("row in range"))
    }
}

/// Generate the dipole lattice for a cylindrical aggregate.
///
/// Validates the parameters first and then fills both tables in ring-major
/// order. The computation is pure arithmetic: identical parameters always
/// produce bit-identical output.
pub fn generate(params: &TubeParams) -> Result<Lattice, ParamError> {
    params.validate()?;

    let n_rings = params.n_rings;
    let ring_size = params.ring_size();
    let n_total = (n_rings as usize) * (ring_size as usize);

    let mut positions = Vec::with_capacity(n_total);
    let mut orientations = Vec::with_capacity(n_total);

    let sin_beta = params.polar_angle.sin();
    let cos_beta = params.polar_angle.cos();

    for i in 0..n_rings {
        let rz = params.ring_spacing * i as f64;
        for j in 0..ring_size {
            let theta = i as f64 * params.twist + j as f64 * params.azimuthal_step;

            positions.push([
                params.radius * theta.cos(),
                params.radius * theta.sin(),
                rz,
            ]);

            // Tilt sign alternates with slot parity.
            let tilt = if j % 2 == 0 { params.tilt } else { -params.tilt };
            let swung = theta + tilt;
            orientations.push([
                -sin_beta * swung.sin(),
                sin_beta * swung.cos(),
                cos_beta,
            ]);
        }
    }

    Ok(Lattice {
        n_rings,
        ring_size,
        positions,
        orientations,
    })
}
