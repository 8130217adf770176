//! Quarter-turns of a single layer.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use nalgebra::{Rotation3, Unit, Vector3};

use crate::cubie::{CubieRegistry, LAYERS, LAYER_SIZE};
use crate::error::CubeError;

/// 3-dimensional axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a point or vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit vector along this axis.
    pub fn unit(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Sense of a quarter-turn about the positive axis.
///
/// `Positive` is counter-clockwise by the right-hand rule, so a positive
/// turn about Y sends (1, 1, 1) to (1, 1, -1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            1 => Some(Direction::Positive),
            -1 => Some(Direction::Negative),
            _ => None,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// A 90 degree turn of one layer about an axis through the origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct QuarterTurn {
    pub axis: Axis,
    pub layer: i32,
    pub direction: Direction,
}

impl QuarterTurn {
    pub fn new(axis: Axis, layer: i32, direction: Direction) -> Self {
        Self {
            axis,
            layer,
            direction,
        }
    }

    /// The same layer turned the other way.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            direction: self.direction.rev(),
            ..self
        }
    }

    /// Rigid rotation applied to every cubie in the layer.
    pub fn rotation(&self) -> Rotation3<f32> {
        let angle = self.direction.sign() as f32 * FRAC_PI_2;
        Rotation3::from_axis_angle(&self.axis.unit(), angle)
    }
}

impl fmt::Display for QuarterTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:+})", self.axis, self.layer, self.direction.sign())
    }
}

/// Turns layers of the registry it owns.
#[derive(Debug, Clone, Default)]
pub struct LayerRotator {
    registry: CubieRegistry,
}

impl LayerRotator {
    pub fn new(registry: CubieRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CubieRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> CubieRegistry {
        self.registry
    }

    /// Turn `layer` on `axis` a quarter-turn in `direction`.
    ///
    /// Either all nine cubies of the layer turn or none do. Returns the
    /// number of cubies moved.
    pub fn rotate(
        &mut self,
        axis: Axis,
        layer: i32,
        direction: Direction,
    ) -> Result<usize, CubeError> {
        self.apply(QuarterTurn::new(axis, layer, direction))
    }

    pub fn apply(&mut self, turn: QuarterTurn) -> Result<usize, CubeError> {
        if !LAYERS.contains(&turn.layer) {
            return Err(CubeError::InvalidLayer(turn.layer));
        }

        let selected = self.registry.select_layer(turn.axis, turn.layer);
        if selected.len() != LAYER_SIZE {
            log::warn!(
                "refusing turn {turn}: layer holds {} cubies",
                selected.len()
            );
            return Err(CubeError::LayerSize {
                axis: turn.axis,
                layer: turn.layer,
                found: selected.len(),
            });
        }

        let rotation = turn.rotation();
        for &i in &selected {
            let cubie = self.registry.cubie_mut(i);
            cubie.rotate(&rotation);
            cubie.snap();
        }

        log::debug!("turned {turn}");
        Ok(selected.len())
    }

    /// Put every cubie back in its home position.
    pub fn reset(&mut self) {
        self.registry = CubieRegistry::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie::Cubie;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn find_home(rotator: &LayerRotator, home: [i32; 3]) -> &Cubie {
        rotator
            .registry()
            .iter()
            .find(|c| c.home() == home)
            .expect("cubie exists")
    }

    fn all_turns() -> Vec<QuarterTurn> {
        let mut turns = vec![];
        for axis in Axis::ALL {
            for layer in LAYERS {
                for direction in [Direction::Positive, Direction::Negative] {
                    turns.push(QuarterTurn::new(axis, layer, direction));
                }
            }
        }
        turns
    }

    #[test]
    fn test_rotation_convention() {
        let mut rotator = LayerRotator::default();
        rotator.rotate(Axis::Y, 1, Direction::Positive).unwrap();
        let corner = find_home(&rotator, [1, 1, 1]);
        assert_eq!(corner.position, Point3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn test_turn_moves_exactly_one_layer() {
        let before = LayerRotator::default();
        let mut after = before.clone();
        assert_eq!(after.rotate(Axis::X, 1, Direction::Positive), Ok(9));

        for (old, new) in before.registry().iter().zip(after.registry().iter()) {
            if old.layer(Axis::X) == 1 {
                assert_eq!(new.layer(Axis::X), 1);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_four_turns_are_identity() {
        for turn in all_turns() {
            let start = LayerRotator::default();
            let mut rotator = start.clone();
            for _ in 0..4 {
                rotator.apply(turn).unwrap();
            }
            for (a, b) in start.registry().iter().zip(rotator.registry().iter()) {
                assert_relative_eq!(a.position, b.position, epsilon = 1e-6);
                assert_relative_eq!(
                    a.orientation.matrix(),
                    b.orientation.matrix(),
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_inverse_undoes_turn() {
        for turn in all_turns() {
            let start = LayerRotator::default();
            let mut rotator = start.clone();
            rotator.apply(turn).unwrap();
            assert!(!rotator.registry().is_solved());
            rotator.apply(turn.inverse()).unwrap();
            assert_eq!(start.registry(), rotator.registry());
        }
    }

    #[test]
    fn test_up_then_reverse_up() {
        let start = LayerRotator::default();
        let mut rotator = start.clone();
        rotator.rotate(Axis::Y, 1, Direction::Positive).unwrap();
        rotator.rotate(Axis::Y, 1, Direction::Negative).unwrap();
        assert_eq!(start.registry(), rotator.registry());
    }

    #[test]
    fn test_positions_stay_on_grid() {
        let mut rotator = LayerRotator::default();
        let turns = all_turns();
        for i in 0..1000 {
            rotator.apply(turns[(i * 7) % turns.len()]).unwrap();
        }
        for cubie in rotator.registry() {
            assert_eq!(cubie.position, cubie.position.map(f32::round));
            let m = cubie.orientation.matrix();
            assert_eq!(*m, m.map(f32::round));
        }
        for axis in Axis::ALL {
            for layer in LAYERS {
                assert_eq!(rotator.registry().select_layer(axis, layer).len(), 9);
            }
        }
    }

    #[test]
    fn test_invalid_layer_rejected() {
        let mut rotator = LayerRotator::default();
        assert_eq!(
            rotator.rotate(Axis::Z, 2, Direction::Positive),
            Err(CubeError::InvalidLayer(2))
        );
        assert!(rotator.registry().is_solved());
    }

    #[test]
    fn test_drifted_layer_is_refused() {
        let mut rotator = LayerRotator::default();
        rotator.registry.cubie_mut(0).position.x = 0.2;
        let snapshot = rotator.registry().clone();

        assert_eq!(
            rotator.rotate(Axis::X, -1, Direction::Positive),
            Err(CubeError::LayerSize {
                axis: Axis::X,
                layer: -1,
                found: 8,
            })
        );
        assert_eq!(rotator.registry(), &snapshot);
    }

    #[test]
    fn test_whole_puzzle_rotation_is_solved() {
        let mut rotator = LayerRotator::default();
        for layer in LAYERS {
            rotator.rotate(Axis::Z, layer, Direction::Negative).unwrap();
        }
        assert!(rotator.registry().is_solved());
    }

    #[test]
    fn test_direction_sign_round_trip() {
        assert_eq!(Direction::from_sign(1), Some(Direction::Positive));
        assert_eq!(Direction::from_sign(-1), Some(Direction::Negative));
        assert_eq!(Direction::from_sign(0), None);
        assert_eq!(Direction::Positive.rev().sign(), -1);
    }
}
