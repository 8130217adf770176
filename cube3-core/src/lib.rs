/// Cube3 Core Library - 3x3x3 puzzle state and shared rendering math
///
/// This library owns the 27 cubies, turns their layers, maps keys and
/// notation to face turns, and provides the camera and mesh helpers every
/// frontend draws with.

pub mod cubie;
pub mod error;
pub mod geometry;
pub mod input;
pub mod notation;
pub mod projection;
pub mod rotator;
pub mod scramble;
pub mod transform;

// Re-export commonly used types
pub use cubie::{Cubie, CubieRegistry, FaceColors, FaceSlot, Palette};
pub use error::CubeError;
pub use geometry::{Color, Lighting, Mesh, Triangle, Vertex};
pub use input::InputDispatcher;
pub use notation::{Algorithm, Face, Move, Turn};
pub use projection::Camera;
pub use rotator::{Axis, Direction, LayerRotator, QuarterTurn};
pub use scramble::scramble;
pub use transform::{Transform, ViewOrbit};

/// Edge length of a drawn cubie; the gap to 1.0 shows the seams
pub const CUBIE_SIZE: f32 = 0.98;
