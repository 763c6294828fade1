//! metaballs-rs: metaball isosurfaces in Rust.
//!
//! Blob sources add their density into a regular scalar grid, and marching
//! cubes turns the grid plus a threshold into a triangle mesh. Nearby sources
//! blend into one surface because their densities are summed.
//!
//! # Quick Start
//!
//! ```no_run
//! use metaballs::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut field = build_grid(Vec3::ZERO, 2.0, 32)?;
//!     add_source(&mut field, Vec3::new(-0.6, 0.0, 0.0), 1.0);
//!     add_source(&mut field, Vec3::new(0.6, 0.0, 0.0), 1.0);
//!
//!     let mesh = extract_surface(&field, 0.5);
//!     let welded = mesh.weld();
//!     welded.write_obj(std::fs::File::create("blobs.obj")?)?;
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`build_grid`] when the extent or resolution changes
//! - [`reset_field`] before each re-accumulation
//! - [`add_source`] once per source per pass
//! - [`extract_surface`] once per pass
//!
//! [`Metaballs`] wraps these stages and re-runs only the ones a parameter
//! change invalidates.

mod init;
mod session;

pub use init::init_logging;
pub use session::Metaballs;

// Re-export core types
pub use metaballs_core::{
    accumulate,
    animation::{orbit_sources, OrbitPath, ORBITS},
    error::{MetaballError, Result},
    field::ScalarField,
    grid::GridSpec,
    kernel::{FalloffKernel, GaussianShell, KernelKind, LinearShell},
    marching_cubes::marching_cubes,
    mesh::{IndexedMesh, MeshVertex, TriangleMesh},
    options::Options,
    source::Source,
    tables, UVec3, Vec3,
};

/// Allocates a zeroed `resolution³` field spanning `origin ± half_extent`.
///
/// # Errors
///
/// Returns [`MetaballError::InvalidResolution`] if `resolution < 2` and
/// [`MetaballError::InvalidExtent`] if `half_extent` is not finite and positive.
pub fn build_grid(origin: Vec3, half_extent: f32, resolution: u32) -> Result<ScalarField> {
    let spec = GridSpec::new(origin, half_extent, resolution)?;
    log::info!(
        "built {resolution}^3 grid around {origin} (half-extent {half_extent})"
    );
    Ok(ScalarField::build(spec))
}

/// Zeroes every value of `field` without reallocating.
pub fn reset_field(field: &mut ScalarField) {
    field.reset();
}

/// Adds a source with the default Gaussian shell falloff.
pub fn add_source(field: &mut ScalarField, center: Vec3, radius: f32) {
    add_source_with(field, center, radius, &GaussianShell);
}

/// Adds a source with an explicit falloff kernel.
pub fn add_source_with<K: FalloffKernel + ?Sized>(
    field: &mut ScalarField,
    center: Vec3,
    radius: f32,
    kernel: &K,
) {
    metaballs_core::add_source(field, &Source::new(center, radius), kernel);
}

/// Extracts the `isolevel` surface of `field`.
///
/// Pure: the field is not modified and repeated calls return identical meshes.
#[must_use]
pub fn extract_surface(field: &ScalarField, isolevel: f32) -> TriangleMesh {
    metaballs_core::extract(field, isolevel)
}
