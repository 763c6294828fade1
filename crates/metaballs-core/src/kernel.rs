//! Falloff kernels that shape a source's density contribution.

use serde::{Deserialize, Serialize};

/// A density falloff policy for metaball sources.
///
/// Implementations must be maximal near `distance == radius`, non-increasing
/// moving away from that shell in both directions, and strictly positive and
/// finite for every finite input. Every grid point is treated the same way.
pub trait FalloffKernel: Sync {
    /// Contribution of a source of `radius` at squared distance `distance_squared`.
    fn contribution(&self, distance_squared: f32, radius: f32) -> f32;
}

/// Gaussian ridge on the squared signed distance: `exp(-(r^2 - d^2)^2)`.
///
/// Peaks at 1.0 on the sphere of the given radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussianShell;

impl FalloffKernel for GaussianShell {
    #[inline]
    fn contribution(&self, distance_squared: f32, radius: f32) -> f32 {
        let shell = radius * radius - distance_squared;
        // Floor at the smallest normal float so far points never underflow to zero.
        (-(shell * shell)).exp().max(f32::MIN_POSITIVE)
    }
}

/// Reciprocal of the linear distance to the shell: `1 / (1 + |d - r|)`.
///
/// Decays much more slowly than [`GaussianShell`], so it needs a higher isolevel
/// to keep separated sources apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearShell;

impl FalloffKernel for LinearShell {
    #[inline]
    fn contribution(&self, distance_squared: f32, radius: f32) -> f32 {
        1.0 / (1.0 + (distance_squared.sqrt() - radius).abs())
    }
}

/// Serializable kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KernelKind {
    /// [`GaussianShell`].
    #[default]
    GaussianShell,
    /// [`LinearShell`].
    LinearShell,
}

impl FalloffKernel for KernelKind {
    #[inline]
    fn contribution(&self, distance_squared: f32, radius: f32) -> f32 {
        match self {
            Self::GaussianShell => GaussianShell.contribution(distance_squared, radius),
            Self::LinearShell => LinearShell.contribution(distance_squared, radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KERNELS: [KernelKind; 2] = [KernelKind::GaussianShell, KernelKind::LinearShell];

    #[test]
    fn test_peak_on_shell() {
        for kernel in KERNELS {
            let r = 1.5;
            let peak = kernel.contribution(r * r, r);
            assert!((peak - 1.0).abs() < 1e-6, "{kernel:?} peak {peak}");
            assert!(kernel.contribution(0.0, r) < peak);
            assert!(kernel.contribution(9.0, r) < peak);
        }
    }

    #[test]
    fn test_gaussian_reference_values() {
        let k = GaussianShell;
        assert!((k.contribution(0.0, 1.0) - (-1.0_f32).exp()).abs() < 1e-7);
        assert!((k.contribution(2.0, 1.0) - (-1.0_f32).exp()).abs() < 1e-7);
        assert!((k.contribution(3.0, 1.0) - (-4.0_f32).exp()).abs() < 1e-7);
    }

    #[test]
    fn test_far_points_stay_positive() {
        for kernel in KERNELS {
            let v = kernel.contribution(1.0e6, 1.0);
            assert!(v > 0.0 && v.is_finite(), "{kernel:?} gave {v}");
        }
    }

    #[test]
    fn test_degenerate_radius_is_finite() {
        for kernel in KERNELS {
            for r in [0.0, -1.0] {
                for d2 in [0.0, 0.25, 4.0] {
                    let v = kernel.contribution(d2, r);
                    assert!(v > 0.0 && v.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&KernelKind::LinearShell).unwrap();
        assert_eq!(json, "\"LinearShell\"");
        let kind: KernelKind = serde_json::from_str("\"GaussianShell\"").unwrap();
        assert_eq!(kind, KernelKind::GaussianShell);
    }

    proptest! {
        #[test]
        fn prop_non_increasing_away_from_shell(
            radius in 0.1_f32..4.0,
            a in 0.0_f32..1.0,
            b in 0.0_f32..1.0,
        ) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            for kernel in KERNELS {
                // Inside the shell: moving toward the center decreases density.
                let inner_near = radius * (1.0 - near);
                let inner_far = radius * (1.0 - far);
                prop_assert!(
                    kernel.contribution(inner_far * inner_far, radius)
                        <= kernel.contribution(inner_near * inner_near, radius) + 1e-6
                );
                // Outside the shell: moving outward decreases density.
                let outer_near = radius * (1.0 + 2.0 * near);
                let outer_far = radius * (1.0 + 2.0 * far);
                prop_assert!(
                    kernel.contribution(outer_far * outer_far, radius)
                        <= kernel.contribution(outer_near * outer_near, radius) + 1e-6
                );
            }
        }

        #[test]
        fn prop_positive_and_finite(d2 in 0.0_f32..1.0e4, radius in -10.0_f32..10.0) {
            for kernel in KERNELS {
                let v = kernel.contribution(d2, radius);
                prop_assert!(v > 0.0 && v.is_finite());
                prop_assert!(v <= 1.0);
            }
        }
    }
}
