//! Staged metaball pipeline with a cached surface.
//!
//! Each setter re-runs only the stages its parameter feeds: the isolevel only
//! invalidates the mesh, source parameters re-accumulate the field, and grid
//! parameters rebuild it. The mesh itself is extracted lazily by [`Metaballs::mesh`].

use glam::Vec3;
use metaballs_core::{
    add_sources, extract, orbit_sources, GridSpec, KernelKind, Options, Result, ScalarField,
    Source, TriangleMesh,
};

/// An owned field, its sources and the last extracted surface.
#[derive(Debug, Clone)]
pub struct Metaballs {
    options: Options,
    sources: Vec<Source>,
    field: ScalarField,
    time: f32,

    mesh_cache: Option<TriangleMesh>,
    mesh_dirty: bool,
}

impl Metaballs {
    /// Creates a session with the four orbiting sources at time zero.
    pub fn new(options: Options) -> Result<Self> {
        let sources = orbit_sources(0.0, options.origin, options.radius).to_vec();
        Self::with_sources(options, sources)
    }

    /// Creates a session with explicit sources.
    ///
    /// Sources are replaced by the orbit paths on the next [`Metaballs::advance`]
    /// if animation is enabled.
    pub fn with_sources(options: Options, sources: Vec<Source>) -> Result<Self> {
        let field = ScalarField::build(options.grid_spec()?);
        let mut session = Self {
            options,
            sources,
            field,
            time: 0.0,
            mesh_cache: None,
            mesh_dirty: true,
        };
        session.accumulate();
        Ok(session)
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the sources accumulated into the field.
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Returns the accumulated field.
    #[must_use]
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Returns the time of the last [`Metaballs::advance`].
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    // --- Extraction stage ---

    /// Sets the isolevel (invalidates the mesh only).
    pub fn set_isolevel(&mut self, isolevel: f32) -> &mut Self {
        self.options.isolevel = isolevel;
        self.mesh_dirty = true;
        self
    }

    /// Returns whether the next [`Metaballs::mesh`] call re-extracts.
    #[must_use]
    pub fn mesh_dirty(&self) -> bool {
        self.mesh_dirty || self.mesh_cache.is_none()
    }

    /// Returns the surface at the current isolevel, extracting it if stale.
    pub fn mesh(&mut self) -> &TriangleMesh {
        let mesh = match self.mesh_cache.take() {
            Some(mesh) if !self.mesh_dirty => mesh,
            _ => extract(&self.field, self.options.isolevel),
        };
        self.mesh_dirty = false;
        self.mesh_cache.insert(mesh)
    }

    /// Returns the last extracted surface, which may be stale.
    #[must_use]
    pub fn cached_mesh(&self) -> Option<&TriangleMesh> {
        self.mesh_cache.as_ref()
    }

    // --- Accumulation stage ---

    /// Sets the base radius, rescaling every source proportionally.
    ///
    /// Non-positive radii are accepted and give a degenerate field.
    pub fn set_radius(&mut self, radius: f32) -> &mut Self {
        let old = self.options.radius;
        for source in &mut self.sources {
            source.radius = if old > 0.0 && old.is_finite() {
                source.radius * radius / old
            } else {
                radius
            };
        }
        self.options.radius = radius;
        self.accumulate();
        self
    }

    /// Replaces the sources.
    pub fn set_sources(&mut self, sources: Vec<Source>) -> &mut Self {
        self.sources = sources;
        self.accumulate();
        self
    }

    /// Switches the falloff kernel.
    pub fn set_kernel(&mut self, kernel: KernelKind) -> &mut Self {
        self.options.kernel = kernel;
        self.accumulate();
        self
    }

    /// Enables or disables animated source paths.
    pub fn set_animate(&mut self, animate: bool) -> &mut Self {
        self.options.animate = animate;
        self
    }

    /// Moves the sources along their orbits to time `t`.
    ///
    /// Returns `false` without touching the field when animation is disabled.
    pub fn advance(&mut self, t: f32) -> bool {
        if !self.options.animate {
            return false;
        }
        self.time = t;
        self.sources = orbit_sources(t, self.options.origin, self.options.radius).to_vec();
        self.accumulate();
        true
    }

    // --- Grid stage ---

    /// Rebuilds the grid with a new half-extent and resolution.
    ///
    /// On error the session is left unchanged.
    pub fn set_grid(&mut self, half_extent: f32, resolution: u32) -> Result<&mut Self> {
        let spec = GridSpec::new(self.options.origin, half_extent, resolution)?;
        self.options.half_extent = half_extent;
        self.options.resolution = resolution;
        self.rebuild(spec);
        Ok(self)
    }

    /// Moves the grid center, carrying every source along with it.
    pub fn set_origin(&mut self, origin: Vec3) -> Result<&mut Self> {
        let spec = GridSpec::new(origin, self.options.half_extent, self.options.resolution)?;
        let shift = origin - self.options.origin;
        for source in &mut self.sources {
            source.center += shift;
        }
        self.options.origin = origin;
        self.rebuild(spec);
        Ok(self)
    }

    fn rebuild(&mut self, spec: GridSpec) {
        self.field = ScalarField::build(spec);
        log::info!(
            "rebuilt grid: {} points, half-extent {}",
            spec.num_points(),
            self.options.half_extent
        );
        self.accumulate();
    }

    fn accumulate(&mut self) {
        self.field.reset();
        add_sources(&mut self.field, &self.sources, &self.options.kernel);
        let (min, max) = self.field.value_range();
        log::debug!("field range [{min}, {max}]");
        self.mesh_dirty = true;
    }
}
