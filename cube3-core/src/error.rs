/// Errors raised by puzzle operations
use thiserror::Error;

use crate::rotator::Axis;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Layer selection did not find a full slice. The registry is left untouched.
    #[error("layer {layer} on axis {axis} selected {found} cubies, expected 9")]
    LayerSize { axis: Axis, layer: i32, found: usize },

    #[error("layer index {0} is outside -1..=1")]
    InvalidLayer(i32),

    #[error("unknown move {0:?}")]
    UnknownMove(String),
}
