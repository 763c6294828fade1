//! Metaball density sources.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single metaball: a center and a radius.
///
/// The falloff shape is chosen separately (see [`crate::kernel`]); a radius of
/// zero or less is accepted and simply yields a degenerate contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Center of the ball in world space.
    pub center: Vec3,
    /// Radius of the ball's density shell.
    pub radius: f32,
}

impl Source {
    /// Creates a new source.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Squared distance from the center to `point`.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, point: Vec3) -> f32 {
        self.center.distance_squared(point)
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }
}
