//! Orbiting camera looking at the water plane.

use glam::{Mat4, Vec3};

use crate::params::{CameraOrbit, RenderConfig};

/// Camera circling the plane centre at a fixed height
pub struct CameraSystem {
    orbit: CameraOrbit,
    paused: bool,
}

impl CameraSystem {
    /// Create new camera system with specified orbit
    pub fn new(orbit: CameraOrbit) -> Self {
        Self {
            orbit,
            paused: false,
        }
    }

    /// Camera position and look-at target for given time
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn compute_position_and_target(&self, time_s: f32) -> (Vec3, Vec3) {
        let angle = if self.paused {
            0.0
        } else {
            time_s * self.orbit.angular_speed_rad_per_s
        };

        let eye = Vec3::new(
            angle.sin() * self.orbit.radius,
            self.orbit.elevation,
            angle.cos() * self.orbit.radius,
        );
        let target = Vec3::new(0.0, self.orbit.target_height, 0.0);
        (eye, target)
    }

    /// Freeze the orbit at its starting angle
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Create view-projection matrix for current time
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, time_s: f32, config: &RenderConfig) -> (Mat4, Vec3) {
        let (eye, target) = self.compute_position_and_target(time_s);

        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            config.fov_degrees.to_radians(),
            config.aspect_ratio(),
            config.near_plane,
            config.far_plane,
        );

        (proj * view, eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_keeps_distance_and_height() {
        let orbit = CameraOrbit::default();
        let camera = CameraSystem::new(orbit.clone());

        for t in [0.0, 10.0, 73.5] {
            let (eye, target) = camera.compute_position_and_target(t);
            assert!((eye.y - orbit.elevation).abs() < 1e-4);
            assert!((Vec3::new(eye.x, 0.0, eye.z).length() - orbit.radius).abs() < 1e-3);
            assert_eq!(target, Vec3::new(0.0, orbit.target_height, 0.0));
        }
    }

    #[test]
    fn test_paused_orbit_is_stationary() {
        let mut camera = CameraSystem::new(CameraOrbit::default());
        assert!(camera.toggle_paused());

        let (a, _) = camera.compute_position_and_target(0.0);
        let (b, _) = camera.compute_position_and_target(42.0);
        assert_eq!(a, b);
    }
}
