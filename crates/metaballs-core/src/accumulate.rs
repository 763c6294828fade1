//! Additive accumulation of source contributions into a scalar field.
//!
//! Blending between nearby metaballs is purely a consequence of summing their
//! contributions here; the extractor knows nothing about sources.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::field::ScalarField;
use crate::kernel::FalloffKernel;
use crate::source::Source;

/// Adds the contribution of `source` to every point of `field`.
///
/// Values are accumulated, never overwritten. With the `parallel` feature the
/// points are processed on the rayon pool; each point writes only its own value.
pub fn add_source<K: FalloffKernel + ?Sized>(field: &mut ScalarField, source: &Source, kernel: &K) {
    let (points, values) = field.points_and_values_mut();

    #[cfg(feature = "parallel")]
    values
        .par_iter_mut()
        .zip(points.par_iter())
        .for_each(|(value, &point)| {
            *value += kernel.contribution(source.distance_squared(point), source.radius);
        });

    #[cfg(not(feature = "parallel"))]
    for (value, &point) in values.iter_mut().zip(points) {
        *value += kernel.contribution(source.distance_squared(point), source.radius);
    }
}

/// Adds every source in `sources` to `field`, in order.
pub fn add_sources<K: FalloffKernel + ?Sized>(
    field: &mut ScalarField,
    sources: &[Source],
    kernel: &K,
) {
    for source in sources {
        add_source(field, source, kernel);
    }
    log::debug!(
        "accumulated {} sources into {} points",
        sources.len(),
        field.values().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use crate::kernel::{GaussianShell, KernelKind, LinearShell};
    use glam::Vec3;
    use proptest::prelude::*;

    fn field(n: u32) -> ScalarField {
        ScalarField::build(GridSpec::new(Vec3::ZERO, 2.0, n).unwrap())
    }

    #[test]
    fn test_single_source_values() {
        let mut f = field(5);
        add_source(&mut f, &Source::new(Vec3::ZERO, 1.0), &GaussianShell);
        let e1 = (-1.0_f32).exp();
        // Center, shell, and diagonal samples on a unit-spaced grid.
        assert!((f.value(2, 2, 2) - e1).abs() < 1e-6);
        assert!((f.value(3, 2, 2) - 1.0).abs() < 1e-6);
        assert!((f.value(3, 3, 2) - e1).abs() < 1e-6);
        let (lo, hi) = f.value_range();
        assert!(lo > 0.0);
        assert!((hi - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_accumulates_instead_of_overwriting() {
        let mut once = field(6);
        let mut twice = field(6);
        let source = Source::new(Vec3::new(0.3, -0.2, 0.1), 1.2);
        add_source(&mut once, &source, &LinearShell);
        add_sources(&mut twice, &[source, source], &LinearShell);
        for (a, b) in once.values().iter().zip(twice.values()) {
            assert!((2.0 * a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_radius_accepted() {
        let mut f = field(4);
        add_source(&mut f, &Source::new(Vec3::ZERO, 0.0), &KernelKind::GaussianShell);
        add_source(&mut f, &Source::new(Vec3::ZERO, -1.0), &KernelKind::LinearShell);
        assert!(f.values().iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn test_dyn_kernel() {
        let kernel: &dyn FalloffKernel = &LinearShell;
        let mut f = field(3);
        add_source(&mut f, &Source::default(), kernel);
        // Corner samples sit at distance 2*sqrt(3) from the center.
        let expected = 1.0 / (1.0 + (12.0_f32.sqrt() - 1.0));
        assert!((f.value(0, 0, 0) - expected).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_order_independent(
            ax in -2.0_f32..2.0, ay in -2.0_f32..2.0, ar in 0.2_f32..2.0,
            bx in -2.0_f32..2.0, bz in -2.0_f32..2.0, br in 0.2_f32..2.0,
        ) {
            let a = Source::new(Vec3::new(ax, ay, 0.0), ar);
            let b = Source::new(Vec3::new(bx, 0.0, bz), br);
            let mut ab = field(4);
            let mut ba = field(4);
            add_sources(&mut ab, &[a, b], &GaussianShell);
            add_sources(&mut ba, &[b, a], &GaussianShell);
            for (x, y) in ab.values().iter().zip(ba.values()) {
                prop_assert!((x - y).abs() < 1e-6);
            }
        }
    }
}
