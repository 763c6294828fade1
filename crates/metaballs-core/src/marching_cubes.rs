//! Marching Cubes isosurface extraction.
//!
//! Walks every cube of a [`ScalarField`] once, classifies its corners against
//! the isolevel and emits the triangles listed for that configuration in the
//! Bourke lookup tables. Vertices are interpolated in world space along the
//! crossed cube edges.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{MetaballError, Result};
use crate::field::ScalarField;
use crate::grid::GridSpec;
use crate::mesh::TriangleMesh;
use crate::tables::{cube_index, triangle_edges, CORNER_BITS, EDGE_CORNERS, EDGE_TABLE};

/// Extracts the `isolevel` isosurface of `field` as a triangle list.
///
/// The field is only read. Calling this twice with the same field and isolevel
/// yields bit-identical meshes, with or without the `parallel` feature.
#[must_use]
pub fn extract(field: &ScalarField, isolevel: f32) -> TriangleMesh {
    let cubes_per_axis = field.resolution() - 1;

    #[cfg(feature = "parallel")]
    let mesh = {
        // Z-slabs are independent; concatenating in slab order keeps the
        // sequential triangle order.
        let slabs: Vec<TriangleMesh> = (0..cubes_per_axis)
            .into_par_iter()
            .map(|z| {
                let mut slab = TriangleMesh::new();
                extract_slab(field, isolevel, z, &mut slab);
                slab
            })
            .collect();
        let mut mesh = TriangleMesh::new();
        for mut slab in slabs {
            mesh.append(&mut slab);
        }
        mesh
    };

    #[cfg(not(feature = "parallel"))]
    let mesh = {
        let mut mesh = TriangleMesh::new();
        for z in 0..cubes_per_axis {
            extract_slab(field, isolevel, z, &mut mesh);
        }
        mesh
    };

    log::debug!(
        "marching cubes: {} cubes at isolevel {isolevel} -> {} triangles",
        field.spec().num_cubes(),
        mesh.num_triangles()
    );
    mesh
}

/// Extracts an isosurface from raw values sampled on `[bound_min, bound_max]`.
///
/// The resolution is inferred from the cube root of `values.len()`; values are
/// in `i + N*j + N*N*k` order.
///
/// # Errors
///
/// Returns [`MetaballError::NonCubicField`] if the length is not a perfect cube,
/// [`MetaballError::InvalidResolution`] if it implies fewer than 2 samples per
/// axis, and [`MetaballError::InvalidExtent`] if the bounds are empty.
pub fn marching_cubes(
    values: &[f32],
    bound_min: Vec3,
    bound_max: Vec3,
    isolevel: f32,
) -> Result<TriangleMesh> {
    let len = values.len();
    let n = (len as f64).cbrt().round() as usize;
    if n * n * n != len {
        return Err(MetaballError::NonCubicField(len));
    }
    let spec = GridSpec::from_bounds(bound_min, bound_max, n as u32)?;
    let field = ScalarField::from_values(spec, values.to_vec())?;
    Ok(extract(&field, isolevel))
}

/// Polygonises every cube whose minimum corner lies on layer `z`.
fn extract_slab(field: &ScalarField, isolevel: f32, z: u32, mesh: &mut TriangleMesh) {
    let spec = field.spec();
    let offsets = spec.corner_offsets();
    let cubes_per_axis = spec.resolution() - 1;
    for y in 0..cubes_per_axis {
        for x in 0..cubes_per_axis {
            let cell = CubeCell::gather(field.values(), spec.index(x, y, z), &offsets);
            cell.polygonise(field.points(), isolevel, mesh);
        }
    }
}

/// Corner sample indices and values of one cube, in Bourke corner order.
struct CubeCell {
    indices: [usize; 8],
    values: [f32; 8],
}

impl CubeCell {
    #[inline]
    fn gather(values: &[f32], base: usize, offsets: &[usize; 8]) -> Self {
        let mut cell = Self {
            indices: [0; 8],
            values: [0.0; 8],
        };
        for (slot, &offset) in offsets.iter().enumerate() {
            let corner = CORNER_BITS[slot];
            cell.indices[corner] = base + offset;
            cell.values[corner] = values[base + offset];
        }
        cell
    }

    fn polygonise(&self, points: &[Vec3], isolevel: f32, mesh: &mut TriangleMesh) {
        let config = cube_index(&self.values, isolevel);
        let edges = EDGE_TABLE[config];
        if edges == 0 {
            return;
        }

        let mut crossings = [Vec3::ZERO; 12];
        for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
            if edges & (1 << edge) != 0 {
                crossings[edge] = interpolate(
                    isolevel,
                    points[self.indices[a]],
                    points[self.indices[b]],
                    self.values[a],
                    self.values[b],
                );
            }
        }

        for [a, b, c] in triangle_edges(config) {
            mesh.push([crossings[a], crossings[b], crossings[c]]);
        }
    }
}

/// Point on segment `pa -> pb` where the linearly interpolated value hits `isolevel`.
///
/// Equal endpoint values give the midpoint; the result never leaves the segment.
#[inline]
fn interpolate(isolevel: f32, pa: Vec3, pb: Vec3, va: f32, vb: f32) -> Vec3 {
    let mu = (isolevel - va) / (vb - va);
    let mu = if mu.is_finite() { mu.clamp(0.0, 1.0) } else { 0.5 };
    if mu == 0.0 {
        pa
    } else if mu == 1.0 {
        pb
    } else {
        pa.lerp(pb, mu)
    }
}
