/// Model matrices for cubies and the orbiting view
use nalgebra::{Matrix4, Vector3};

use crate::cubie::Cubie;

/// Furthest the view may tilt toward either pole (radians)
pub const MAX_PITCH: f32 = 1.5;

/// Camera position on a sphere around the puzzle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOrbit {
    /// Rotation about +Y, zero looking down -Z (radians)
    pub yaw: f32,
    /// Elevation above the XZ plane (radians)
    pub pitch: f32,
    pub distance: f32,
}

impl ViewOrbit {
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            distance,
        }
    }

    /// Orbit by delta amounts (in radians)
    pub fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw = (self.yaw + dyaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + dpitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Eye position relative to the orbit center
    pub fn offset(&self) -> Vector3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vector3::new(
            cos_pitch * sin_yaw,
            sin_pitch,
            cos_pitch * cos_yaw,
        ) * self.distance
    }
}

impl Default for ViewOrbit {
    /// Looking at the origin from (6, 6, 6)
    fn default() -> Self {
        let distance = 108.0_f32.sqrt();
        Self::new(
            std::f32::consts::FRAC_PI_4,
            (6.0 / distance).asin(),
            distance,
        )
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Model matrix placing a cubie mesh at the cubie's position and orientation
    pub fn model_matrix(cubie: &Cubie) -> Matrix4<f32> {
        Self::translation_matrix(&cubie.position.coords) * cubie.orientation.to_homogeneous()
    }

    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }
}
