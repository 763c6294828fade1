//! Scalar density field sampled on a regular grid.

use glam::Vec3;

use crate::error::{MetaballError, Result};
use crate::grid::GridSpec;

/// Dense scalar field: one `f32` density per grid point.
///
/// Values live in a single contiguous buffer in [`GridSpec`] linear order. The
/// buffer length is fixed at construction, so neighbor offsets computed from
/// the grid are always valid indices.
#[derive(Debug, Clone)]
pub struct ScalarField {
    spec: GridSpec,
    points: Vec<Vec3>,
    values: Vec<f32>,
}

impl ScalarField {
    /// Allocates a zeroed field and the world positions of its sample points.
    #[must_use]
    pub fn build(spec: GridSpec) -> Self {
        let n = spec.resolution();
        let mut points = Vec::with_capacity(spec.num_points());
        for k in 0..n {
            for j in 0..n {
                for i in 0..n {
                    points.push(spec.point(i, j, k));
                }
            }
        }
        Self {
            spec,
            values: vec![0.0; points.len()],
            points,
        }
    }

    /// Wraps precomputed values sampled on `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`MetaballError::SizeMismatch`] if `values.len()` is not `N^3`.
    pub fn from_values(spec: GridSpec, values: Vec<f32>) -> Result<Self> {
        let expected = spec.num_points();
        if values.len() != expected {
            return Err(MetaballError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let mut field = Self::build(spec);
        field.values = values;
        Ok(field)
    }

    /// Zeroes every value in place, keeping the allocation.
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }

    /// Returns the grid this field is sampled on.
    #[must_use]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Returns the number of samples per axis.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.spec.resolution()
    }

    /// Returns the sample positions in linear order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the density values in linear order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the density values for in-place accumulation.
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Splits the field into read-only points and mutable values.
    pub(crate) fn points_and_values_mut(&mut self) -> (&[Vec3], &mut [f32]) {
        (&self.points, &mut self.values)
    }

    /// Returns the density at sample `(i, j, k)`.
    #[must_use]
    pub fn value(&self, i: u32, j: u32, k: u32) -> f32 {
        self.values[self.spec.index(i, j, k)]
    }

    /// Returns the minimum and maximum density, useful for picking an isolevel.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(n: u32) -> GridSpec {
        GridSpec::new(Vec3::ZERO, 2.0, n).unwrap()
    }

    #[test]
    fn test_build_is_zeroed() {
        let field = ScalarField::build(spec(5));
        assert_eq!(field.values().len(), 125);
        assert_eq!(field.points().len(), 125);
        assert!(field.values().iter().all(|&v| v == 0.0));
        assert_eq!(field.value_range(), (0.0, 0.0));
    }

    #[test]
    fn test_points_follow_linear_order() {
        let field = ScalarField::build(spec(5));
        let s = *field.spec();
        for (idx, p) in field.points().iter().enumerate() {
            let ijk = s.unflatten(idx);
            assert_eq!(*p, s.point(ijk.x, ijk.y, ijk.z));
        }
        assert_eq!(field.points()[1].x - field.points()[0].x, 1.0);
    }

    #[test]
    fn test_reset_keeps_allocation() {
        let mut field = ScalarField::build(spec(4));
        field.values_mut().fill(3.0);
        let ptr = field.values().as_ptr();
        field.reset();
        assert_eq!(field.values().as_ptr(), ptr);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_values_checks_length() {
        assert!(matches!(
            ScalarField::from_values(spec(3), vec![0.0; 26]),
            Err(MetaballError::SizeMismatch {
                expected: 27,
                actual: 26
            })
        ));
        let field = ScalarField::from_values(spec(3), (0..27).map(|v| v as f32).collect()).unwrap();
        assert_eq!(field.value(1, 1, 1), 13.0);
        assert_eq!(field.value_range(), (0.0, 26.0));
    }
}
