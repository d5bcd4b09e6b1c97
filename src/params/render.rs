//! Rendering and surface shading configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (domain units)
    pub near_plane: f32,

    /// Far clipping plane (domain units)
    pub far_plane: f32,

    /// Draw live wave particles as markers on top of the surface
    pub show_particles: bool,

    /// Particle marker half-size (domain units)
    pub particle_marker_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            show_particles: false,
            particle_marker_size: 0.5,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}

/// Water surface shading parameters
#[derive(Debug, Clone)]
pub struct SurfaceColors {
    /// Water colour (RGB) and opacity
    pub water: [f32; 4],

    /// Particle marker colour (RGBA)
    pub particle: [f32; 4],

    /// Background clear colour (RGB)
    pub background: [f64; 3],

    pub ambient_strength: f32,
    pub specular_strength: f32,
}

impl Default for SurfaceColors {
    fn default() -> Self {
        Self {
            water: [0.08, 0.51, 1.0, 0.3],
            particle: [0.0, 1.0, 0.0, 1.0],
            background: [0.7, 0.8, 0.9],
            ambient_strength: 0.9,
            specular_strength: 0.5,
        }
    }
}
