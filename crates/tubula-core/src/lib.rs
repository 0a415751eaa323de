//! # Tubula Core
//!
//! Geometry of cylindrical molecular aggregates. This crate builds the
//! dipole lattices of the nanotube models studied in the framework: point
//! dipoles arranged in stacked rings on a right circular cylinder, each
//! carrying a unit orientation vector from a spherical parametrisation
//! with fixed polar angle.
//!
//! The construction is closed-form and deterministic: a validated
//! [`TubeParams`](params::TubeParams) maps to a [`Lattice`](lattice::Lattice)
//! in a single pass, with no state and no failure modes beyond input
//! validation.
//!
//! ## Modules
//!
//! - [`params`] — Tube parameters, validation, and derived quantities.
//! - [`lattice`] — Lattice generation and per-site access.

pub mod lattice;
pub mod params;

pub use lattice::{generate, DipoleSite, Lattice};
pub use params::{twist_from_displacement, ParamError, TubeParams};
