//! Core of metaballs-rs.
//!
//! This crate provides the two cooperating algorithms behind metaball surfaces:
//! - Field generation: [`ScalarField`] sampled on a [`GridSpec`], filled by
//!   [`accumulate::add_source`] with pluggable [`FalloffKernel`]s
//! - Isosurface extraction: [`marching_cubes::extract`] driven by the Bourke
//!   lookup tables in [`tables`]
//!
//! plus the meshes, options and animation paths that surround them.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Index math converts between u32 grid coordinates and usize offsets
#![allow(clippy::cast_precision_loss)]
// Free functions returning values don't all need must_use
#![allow(clippy::must_use_candidate)]

pub mod accumulate;
pub mod animation;
pub mod error;
pub mod field;
pub mod grid;
pub mod kernel;
pub mod marching_cubes;
pub mod mesh;
pub mod options;
pub mod source;
pub mod tables;

pub use accumulate::{add_source, add_sources};
pub use animation::{orbit_sources, OrbitPath, ORBITS};
pub use error::{MetaballError, Result};
pub use field::ScalarField;
pub use grid::GridSpec;
pub use kernel::{FalloffKernel, GaussianShell, KernelKind, LinearShell};
pub use marching_cubes::{extract, marching_cubes};
pub use mesh::{IndexedMesh, MeshVertex, TriangleMesh};
pub use options::Options;
pub use source::Source;

// Re-export glam types for convenience
pub use glam::{UVec3, Vec3};
