//! Sinusoidal source paths for animated metaballs.
//!
//! Paths are pure functions of time; scheduling frames is up to the caller.

use glam::Vec3;

use crate::source::Source;

/// A source moving along `amplitude * sin(t * frequency)` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    /// Angular frequency per axis.
    pub frequency: Vec3,
    /// Peak displacement from the center.
    pub amplitude: f32,
    /// Source radius relative to the base radius.
    pub radius_scale: f32,
}

impl OrbitPath {
    /// Position along the path at time `t`, relative to the path center.
    #[must_use]
    pub fn position(&self, t: f32) -> Vec3 {
        Vec3::new(
            (t * self.frequency.x).sin(),
            (t * self.frequency.y).sin(),
            (t * self.frequency.z).sin(),
        ) * self.amplitude
    }

    /// The source on this path at time `t` for the given base radius.
    #[must_use]
    pub fn source(&self, t: f32, center: Vec3, radius: f32) -> Source {
        Source::new(center + self.position(t), radius * self.radius_scale)
    }
}

/// The four default orbits: a main ball, a larger slow one, and two small fast ones.
pub const ORBITS: [OrbitPath; 4] = [
    OrbitPath {
        frequency: Vec3::new(1.0, 1.0 / 1.73, 1.0 / 0.87),
        amplitude: 1.5,
        radius_scale: 1.0,
    },
    OrbitPath {
        frequency: Vec3::new(1.3, 0.9, 2.0),
        amplitude: 0.75,
        radius_scale: 1.5,
    },
    OrbitPath {
        frequency: Vec3::new(3.2, 1.8, 0.3),
        amplitude: 1.5,
        radius_scale: 0.5,
    },
    OrbitPath {
        frequency: Vec3::new(4.1, 2.2, 5.1),
        amplitude: 1.5,
        radius_scale: 0.1,
    },
];

/// Sources on the [`ORBITS`] at time `t`, centered on `center`.
#[must_use]
pub fn orbit_sources(t: f32, center: Vec3, radius: f32) -> [Source; 4] {
    ORBITS.map(|path| path.source(t, center, radius))
}
