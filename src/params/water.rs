//! Water simulation parameters (domain, grid, wave physics, timing).

/// Water simulation parameters
///
/// Distances are in domain units (the plane spans `[-width, width]` on both axes),
/// times are in seconds.
#[derive(Debug, Clone)]
pub struct WaterParams {
    /// Domain half-width; the simulated plane is `[-width, width]²`
    pub width: f32,

    /// Grid resolution N (height samples and spatial bins per side)
    pub resolution: usize,

    /// Resting water level added to every height sample
    pub base_height: f32,

    /// Amplitude given to freshly spawned particles
    pub base_amplitude: f32,

    /// Fixed simulation tick interval (seconds)
    pub tick_rate_s: f32,

    /// Base interval between spawned wavefronts while playing (seconds)
    /// Effective interval is `spawn_interval_s / roughness`
    pub spawn_interval_s: f32,

    /// Spawn frequency multiplier (GUI range 1..25)
    pub roughness: f32,

    /// Amplitude lost by every surviving particle per tick
    pub damping: f32,

    /// Particles at or below this amplitude are removed
    pub amplitude_threshold: f32,

    /// Neighbour search half-width in bins
    pub adjacent: usize,

    /// Spawn random wavefronts automatically
    pub playing: bool,
}

/// Lower/upper bounds of the roughness control
pub const ROUGHNESS_RANGE: (f32, f32) = (1.0, 25.0);

impl Default for WaterParams {
    fn default() -> Self {
        let width = 100.0;
        Self {
            width,
            resolution: 200,
            base_height: 12.0,
            base_amplitude: 0.3 * width,
            tick_rate_s: 0.01,
            spawn_interval_s: 2.0,
            roughness: 1.0,
            damping: 0.01,
            amplitude_threshold: 0.01,
            adjacent: 4,
            playing: false,
        }
    }
}

impl WaterParams {
    /// Distance between neighbouring grid samples
    pub fn step_size(&self) -> f32 {
        2.0 * self.width / self.resolution as f32
    }

    /// Interval between automatic spawns at the current roughness
    pub fn spawn_period_s(&self) -> f32 {
        self.spawn_interval_s / self.roughness
    }

    /// Reject configurations that would produce meaningless grid indices or
    /// non-finite heights
    pub fn validate(&self) -> Result<(), String> {
        if self.resolution == 0 {
            return Err("Grid resolution must be > 0".to_string());
        }
        // Mesh indices are u32
        let samples = self.resolution.checked_mul(self.resolution);
        if samples.map_or(true, |samples| samples > u32::MAX as usize) {
            return Err(format!(
                "Grid resolution {} exceeds the mesh index range",
                self.resolution
            ));
        }

        let scalars = [
            ("Domain width", self.width),
            ("Base height", self.base_height),
            ("Base amplitude", self.base_amplitude),
            ("Tick rate", self.tick_rate_s),
            ("Spawn interval", self.spawn_interval_s),
            ("Roughness", self.roughness),
            ("Damping", self.damping),
            ("Amplitude threshold", self.amplitude_threshold),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("{} must be finite, got {}", name, value));
        }

        if self.width <= 0.0 {
            return Err(format!("Domain width must be > 0, got {}", self.width));
        }
        if self.tick_rate_s <= 0.0 {
            return Err(format!("Tick rate must be > 0, got {}", self.tick_rate_s));
        }
        if self.spawn_interval_s <= 0.0 {
            return Err(format!(
                "Spawn interval must be > 0, got {}",
                self.spawn_interval_s
            ));
        }
        let (min_roughness, max_roughness) = ROUGHNESS_RANGE;
        if !(min_roughness..=max_roughness).contains(&self.roughness) {
            return Err(format!(
                "Roughness must be in [{}, {}], got {}",
                min_roughness, max_roughness, self.roughness
            ));
        }
        if self.damping < 0.0 {
            return Err(format!("Damping must be >= 0, got {}", self.damping));
        }
        if self.adjacent == 0 {
            return Err("Neighbour search half-width must be > 0".to_string());
        }
        Ok(())
    }
}
