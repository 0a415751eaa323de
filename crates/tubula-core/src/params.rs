//! Tube parameters and validation.
//!
//! A [`TubeParams`] value fully describes one cylindrical aggregate: how
//! many molecules it contains, how they are grouped into rings, and the
//! radius, spacing, and angular offsets of the arrangement. Parameters are
//! immutable once built and are validated in one place, at the entry to
//! [`generate`](crate::lattice::generate).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from tube parameter validation.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("molecule count must be at least 1")]
    ZeroMolecules,

    #[error("ring count must be at least 1")]
    ZeroRings,

    #[error("molecule count {n_molecules} must be a multiple of ring count {n_rings}")]
    IndivisibleCount { n_molecules: u32, n_rings: u32 },

    #[error("{name} must be positive (got {value})")]
    NonPositiveLength { name: &'static str, value: f64 },

    #[error("{name} must be finite (got {value})")]
    NonFiniteValue { name: &'static str, value: f64 },
}

/// Parameters of a cylindrical dipole aggregate.
///
/// Lengths are in angstroms, angles in radians. The total molecule count
/// must be an exact multiple of the ring count; the quotient is the number
/// of molecules per ring ([`ring_size`](TubeParams::ring_size)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeParams {
    /// Total number of molecules in the cylinder.
    pub n_molecules: u32,
    /// Number of stacked rings.
    pub n_rings: u32,
    /// Cylinder radius (angstrom).
    pub radius: f64,
    /// Vertical distance between consecutive rings (angstrom).
    pub ring_spacing: f64,
    /// Azimuthal angle between consecutive molecules in a ring (radians).
    pub azimuthal_step: f64,
    /// Twist angle between molecules on consecutive rings (radians).
    pub twist: f64,
    /// Tilt between the in-plane dipole component and the ring tangent
    /// (radians). The sign alternates with slot parity.
    pub tilt: f64,
    /// Angle between each dipole and the cylinder axis (radians).
    pub polar_angle: f64,
}

impl TubeParams {
    /// Number of molecules per ring.
    ///
    /// Only meaningful once [`validate`](TubeParams::validate) has passed;
    /// the division truncates for invalid counts.
    pub fn ring_size(&self) -> u32 {
        self.n_molecules / self.n_rings
    }

    /// Azimuthal step of an evenly filled ring of `ring_size` molecules:
    /// 2π / ring_size.
    pub fn uniform_step(ring_size: u32) -> f64 {
        2.0 * std::f64::consts::PI / ring_size as f64
    }

    /// Check every parameter constraint, failing on the first violation.
    ///
    /// Checks, in order: counts are positive, the molecule count divides
    /// evenly into rings, lengths are positive and finite, angles are
    /// finite.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.n_molecules == 0 {
            return Err(ParamError::ZeroMolecules);
        }
        if self.n_rings == 0 {
            return Err(ParamError::ZeroRings);
        }
        if self.n_molecules % self.n_rings != 0 {
            return Err(ParamError::IndivisibleCount {
                n_molecules: self.n_molecules,
                n_rings: self.n_rings,
            });
        }

        for (name, value) in [("radius", self.radius), ("ring_spacing", self.ring_spacing)] {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteValue { name, value });
            }
            if value <= 0.0 {
                return Err(ParamError::NonPositiveLength { name, value });
            }
        }

        for (name, value) in [
            ("azimuthal_step", self.azimuthal_step),
            ("twist", self.twist),
            ("tilt", self.tilt),
            ("polar_angle", self.polar_angle),
        ] {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteValue { name, value });
            }
        }

        Ok(())
    }
}

/// Twist angle between molecules on consecutive rings, derived from the
/// vertical displacement angle between neighbouring dipoles:
/// ξ = h·tan(ε) / R.
///
/// A displacement of zero gives an untwisted tube. Displacements near
/// ±π/2 produce a non-finite twist, which parameter validation rejects.
pub fn twist_from_displacement(ring_spacing: f64, radius: f64, displacement: f64) -> f64 {
    ring_spacing * displacement.tan() / radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_params() -> TubeParams {
        // The untilted nanotube model of the study: 100 rings of 60
        // molecules on a 60 angstrom cylinder.
        TubeParams {
            n_molecules: 6000,
            n_rings: 100,
            radius: 60.0,
            ring_spacing: 8.3,
            azimuthal_step: TubeParams::uniform_step(60),
            twist: 0.0,
            tilt: 0.0,
            polar_angle: 0.0,
        }
    }

    #[test]
    fn test_reference_params_validate() {
        let params = reference_params();
        assert!(params.validate().is_ok());
        assert_eq!(params.ring_size(), 60);
    }

    #[test]
    fn test_uniform_step() {
        assert_relative_eq!(TubeParams::uniform_step(60), std::f64::consts::PI / 30.0);
        assert_relative_eq!(TubeParams::uniform_step(2), std::f64::consts::PI);
    }

    #[test]
    fn test_rejects_zero_counts() {
        let mut params = reference_params();
        params.n_molecules = 0;
        assert_eq!(params.validate(), Err(ParamError::ZeroMolecules));

        let mut params = reference_params();
        params.n_rings = 0;
        assert_eq!(params.validate(), Err(ParamError::ZeroRings));
    }

    #[test]
    fn test_rejects_indivisible_count() {
        let mut params = reference_params();
        params.n_rings = 7;
        assert_eq!(
            params.validate(),
            Err(ParamError::IndivisibleCount {
                n_molecules: 6000,
                n_rings: 7,
            })
        );
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let mut params = reference_params();
        params.radius = -1.0;
        assert_eq!(
            params.validate(),
            Err(ParamError::NonPositiveLength {
                name: "radius",
                value: -1.0,
            })
        );

        let mut params = reference_params();
        params.ring_spacing = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonPositiveLength { name: "ring_spacing", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_angle() {
        let mut params = reference_params();
        params.tilt = f64::NAN;
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFiniteValue { name: "tilt", .. })
        ));

        let mut params = reference_params();
        params.twist = f64::INFINITY;
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFiniteValue { name: "twist", .. })
        ));
    }

    #[test]
    fn test_twist_from_displacement() {
        // Zero displacement: untwisted tube.
        assert_eq!(twist_from_displacement(8.3, 60.0, 0.0), 0.0);

        // The tilted model of the study: eps = 8*pi/45 on the reference tube.
        let eps = 8.0 * std::f64::consts::PI / 45.0;
        let twist = twist_from_displacement(8.3, 60.0, eps);
        assert_relative_eq!(twist, 8.3 * eps.tan() / 60.0, max_relative = 1e-12);
    }

    #[test]
    fn test_non_finite_displacement_rejected_downstream() {
        let mut params = reference_params();
        params.twist = twist_from_displacement(8.3, 60.0, f64::NAN);
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFiniteValue { name: "twist", .. })
        ));
    }
}
