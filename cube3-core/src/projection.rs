/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::ViewOrbit;

/// Perspective camera looking at the puzzle
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Point3::new(6.0, 6.0, 6.0),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        };
        camera.resize(width, height);
        camera
    }

    /// Recompute the aspect ratio for a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Move the eye to `orbit` around the target
    pub fn orbit(&mut self, orbit: &ViewOrbit) {
        self.position = self.target + orbit.offset();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalized device coordinates
    /// (smaller is closer), or `None` outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;

        // Transform to clip space; w <= 0 is at or behind the eye
        let clip = mvp * point.to_homogeneous();
        if clip.w < 1e-6 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;

        // Clip test
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.position, Point3::new(6.0, 6.0, 6.0));
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::default();
        camera.resize(1000, 500);
        assert_relative_eq!(camera.aspect, 2.0);
        camera.resize(0, 0);
        assert_relative_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert_relative_eq!(x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(y, 300.0, epsilon = 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_nearer_corner_has_smaller_depth() {
        let camera = Camera::default();
        let model = Matrix4::identity();
        let near = camera.project_to_screen(&Point3::new(1.0, 1.0, 1.0), &model, 800, 600);
        let far = camera.project_to_screen(&Point3::new(-1.0, -1.0, -1.0), &model, 800, 600);
        assert!(near.unwrap().2 < far.unwrap().2);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::default();
        let behind = Point3::new(20.0, 20.0, 20.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_orbit_moves_eye() {
        let mut camera = Camera::default();
        camera.orbit(&ViewOrbit::default());
        assert_relative_eq!(camera.position, Point3::new(6.0, 6.0, 6.0), epsilon = 1e-4);
    }
}
