//! Regular sampling grid for scalar fields.

use glam::{UVec3, Vec3};

use crate::error::{MetaballError, Result};

/// A regular axis-aligned grid of `N x N x N` sample points.
///
/// Points are stored in a single linear order, `index = i + N*j + N*N*k`, so the
/// eight corners of a cube are reachable from its minimum corner by the fixed
/// offsets returned from [`GridSpec::corner_offsets`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    origin: Vec3,
    half_extent: Vec3,
    resolution: u32,
}

impl GridSpec {
    /// Creates a cubic grid centered on `origin` spanning `origin ± half_extent`.
    ///
    /// # Errors
    ///
    /// Returns [`MetaballError::InvalidResolution`] if `resolution < 2` and
    /// [`MetaballError::InvalidExtent`] if `half_extent` is not finite and positive.
    pub fn new(origin: Vec3, half_extent: f32, resolution: u32) -> Result<Self> {
        Self::with_extents(origin, Vec3::splat(half_extent), resolution)
    }

    /// Creates a grid with a separate half-extent per axis.
    pub fn with_extents(origin: Vec3, half_extent: Vec3, resolution: u32) -> Result<Self> {
        if resolution < 2 {
            return Err(MetaballError::InvalidResolution(resolution));
        }
        for extent in half_extent.to_array() {
            if !(extent.is_finite() && extent > 0.0) {
                return Err(MetaballError::InvalidExtent(extent));
            }
        }
        Ok(Self {
            origin,
            half_extent,
            resolution,
        })
    }

    /// Creates a grid spanning the box `[bound_min, bound_max]`.
    pub fn from_bounds(bound_min: Vec3, bound_max: Vec3, resolution: u32) -> Result<Self> {
        let origin = (bound_min + bound_max) * 0.5;
        let half_extent = (bound_max - bound_min) * 0.5;
        Self::with_extents(origin, half_extent, resolution)
    }

    /// Returns the grid center.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the half-extent along each axis.
    #[must_use]
    pub fn half_extent(&self) -> Vec3 {
        self.half_extent
    }

    /// Returns the number of samples per axis.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Returns the minimum corner of the grid.
    #[must_use]
    pub fn bound_min(&self) -> Vec3 {
        self.origin - self.half_extent
    }

    /// Returns the maximum corner of the grid.
    #[must_use]
    pub fn bound_max(&self) -> Vec3 {
        self.origin + self.half_extent
    }

    /// Returns the distance between adjacent samples on each axis.
    #[must_use]
    pub fn spacing(&self) -> Vec3 {
        self.half_extent * 2.0 / (self.resolution - 1) as f32
    }

    /// Returns the total number of sample points, `N^3`.
    #[must_use]
    pub fn num_points(&self) -> usize {
        let n = self.resolution as usize;
        n * n * n
    }

    /// Returns the total number of cubes, `(N-1)^3`.
    #[must_use]
    pub fn num_cubes(&self) -> usize {
        let n = self.resolution as usize - 1;
        n * n * n
    }

    /// Flattens a 3D sample index to a linear index.
    #[inline]
    #[must_use]
    pub fn index(&self, i: u32, j: u32, k: u32) -> usize {
        let n = self.resolution as usize;
        i as usize + n * j as usize + n * n * k as usize
    }

    /// Unflattens a linear index to a 3D sample index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn unflatten(&self, idx: usize) -> UVec3 {
        let n = self.resolution as usize;
        UVec3::new((idx % n) as u32, ((idx / n) % n) as u32, (idx / (n * n)) as u32)
    }

    /// Returns the world position of the sample at `(i, j, k)`.
    #[must_use]
    pub fn point(&self, i: u32, j: u32, k: u32) -> Vec3 {
        let min = self.bound_min();
        let range = self.half_extent * 2.0;
        let steps = (self.resolution - 1) as f32;
        Vec3::new(
            min.x + range.x * i as f32 / steps,
            min.y + range.y * j as f32 / steps,
            min.z + range.z * k as f32 / steps,
        )
    }

    /// Linear offsets of a cube's eight corners from its minimum corner.
    ///
    /// Order: `p, +x, +y, +xy, +z, +xz, +yz, +xyz`.
    #[must_use]
    pub fn corner_offsets(&self) -> [usize; 8] {
        let n = self.resolution as usize;
        let n2 = n * n;
        [0, 1, n, n + 1, n2, n2 + 1, n2 + n, n2 + n + 1]
    }
}
