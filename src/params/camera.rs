//! Camera orbit configuration.

/// Slow orbit around the water plane
#[derive(Debug, Clone)]
pub struct CameraOrbit {
    /// Horizontal distance from the plane centre (domain units)
    pub radius: f32,

    /// Camera height above the plane origin
    pub elevation: f32,

    /// Angular speed of the orbit (radians per second)
    pub angular_speed_rad_per_s: f32,

    /// Look-at target height (usually near the resting water level)
    pub target_height: f32,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            radius: 160.0,
            elevation: 110.0,
            angular_speed_rad_per_s: 0.05, // One lap every ~2 minutes
            target_height: 12.0,
        }
    }
}
