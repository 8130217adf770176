//! Face-turn notation: `R U R' U'`, `F2`, ...
//!
//! Every face turns clockwise as seen from outside that face. For a face on
//! the positive end of its axis that is a negative quarter-turn; for the
//! negative end it is a positive one.

use std::fmt;
use std::str::FromStr;

use crate::error::CubeError;
use crate::rotator::{Axis, Direction, LayerRotator, QuarterTurn};

/// Outer face of the puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    R,
    L,
    U,
    D,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Layer index of the face along its axis: `1` or `-1`.
    pub fn layer(self) -> i32 {
        match self {
            Face::R | Face::U | Face::F => 1,
            Face::L | Face::D | Face::B => -1,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Face::R => Face::L,
            Face::L => Face::R,
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Face::R),
            'L' => Some(Face::L),
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::R => "Right",
            Face::L => "Left",
            Face::U => "Up",
            Face::D => "Down",
            Face::F => "Front",
            Face::B => "Back",
        }
    }

    /// Clockwise quarter-turn of this face, viewed from outside.
    pub fn clockwise(self) -> QuarterTurn {
        let direction = match self.layer() {
            1 => Direction::Negative,
            _ => Direction::Positive,
        };
        QuarterTurn::new(self.axis(), self.layer(), direction)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Double,
}

impl Turn {
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Double => "2",
        }
    }

    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Double => Turn::Double,
        }
    }
}

/// A single face turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    pub fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.face, self.turn.rev())
    }

    /// Expand into the quarter-turns the rotator executes.
    pub fn quarter_turns(self) -> impl Iterator<Item = QuarterTurn> {
        let cw = self.face.clockwise();
        let (turn, count) = match self.turn {
            Turn::Clockwise => (cw, 1),
            Turn::CounterClockwise => (cw.inverse(), 1),
            Turn::Double => (cw, 2),
        };
        std::iter::repeat(turn).take(count)
    }

    pub fn apply(self, rotator: &mut LayerRotator) -> Result<usize, CubeError> {
        let mut moved = 0;
        for turn in self.quarter_turns() {
            moved = rotator.apply(turn)?;
        }
        Ok(moved)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CubeError::UnknownMove(s.to_string());

        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_symbol).ok_or_else(unknown)?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" | "2'" => Turn::Double,
            _ => return Err(unknown()),
        };
        Ok(Move::new(face, turn))
    }
}

/// Sequence of moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Algorithm(pub Vec<Move>);

impl Algorithm {
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Undo sequence: reversed order, each move inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().rev().map(|m| m.inverse()).collect())
    }

    /// Apply every move in order, stopping at the first failure.
    pub fn apply(&self, rotator: &mut LayerRotator) -> Result<(), CubeError> {
        for m in &self.0 {
            m.apply(rotator)?;
        }
        Ok(())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for m in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{m}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Algorithm {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(Move::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_clockwise_faces() {
        let expected = [
            (Face::U, Axis::Y, 1, Direction::Negative),
            (Face::D, Axis::Y, -1, Direction::Positive),
            (Face::L, Axis::X, -1, Direction::Positive),
            (Face::R, Axis::X, 1, Direction::Negative),
            (Face::F, Axis::Z, 1, Direction::Negative),
            (Face::B, Axis::Z, -1, Direction::Positive),
        ];
        for (face, axis, layer, direction) in expected {
            assert_eq!(face.clockwise(), QuarterTurn::new(axis, layer, direction));
        }
    }

    #[test]
    fn test_clockwise_seen_from_above() {
        // Looking down on U, clockwise carries front-right to front-left.
        let mut rotator = LayerRotator::default();
        "U".parse::<Move>().unwrap().apply(&mut rotator).unwrap();
        let cubie = rotator
            .registry()
            .iter()
            .find(|c| c.home() == [1, 1, 1])
            .unwrap();
        assert_eq!(cubie.position, Point3::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!("R".parse::<Move>(), Ok(Move::new(Face::R, Turn::Clockwise)));
        assert_eq!("u'".parse::<Move>(), Ok(Move::new(Face::U, Turn::CounterClockwise)));
        assert_eq!("F2".parse::<Move>(), Ok(Move::new(Face::F, Turn::Double)));
        assert_eq!("B2'".parse::<Move>(), Ok(Move::new(Face::B, Turn::Double)));
        assert_eq!(
            "X".parse::<Move>(),
            Err(CubeError::UnknownMove("X".to_string()))
        );
        assert_eq!(
            "R3".parse::<Move>(),
            Err(CubeError::UnknownMove("R3".to_string()))
        );
    }

    #[test]
    fn test_algorithm_display() {
        let alg: Algorithm = "  r U  R' u'  F2 ".parse().unwrap();
        assert_eq!(alg.len(), 5);
        assert_eq!(alg.to_string(), "R U R' U' F2");
        assert_eq!(alg.inverse().to_string(), "F2 U R U' R'");
    }

    #[test]
    fn test_algorithm_then_inverse_is_solved() {
        let mut rotator = LayerRotator::default();
        let alg: Algorithm = "R U R' U' F2 D B' L2".parse().unwrap();
        alg.apply(&mut rotator).unwrap();
        assert!(!rotator.registry().is_solved());
        alg.inverse().apply(&mut rotator).unwrap();
        assert!(rotator.registry().is_solved());
    }

    #[test]
    fn test_center_twist_counts_as_solved() {
        // Turns the U center 180 degrees in place and restores everything else
        let mut rotator = LayerRotator::default();
        let alg: Algorithm = "U R L U2 R' L' U R L U2 R' L'".parse().unwrap();
        alg.apply(&mut rotator).unwrap();

        let registry = rotator.registry();
        for cubie in registry {
            assert_eq!(cubie.grid_position(), cubie.home());
        }
        let up = registry.iter().find(|c| c.home() == [0, 1, 0]).unwrap();
        assert_ne!(up.orientation, nalgebra::Rotation3::identity());
        assert!(registry.is_solved());
    }

    #[test]
    fn test_sexy_move_has_order_six() {
        let mut rotator = LayerRotator::default();
        let alg: Algorithm = "R U R' U'".parse().unwrap();
        for i in 1..=6 {
            alg.apply(&mut rotator).unwrap();
            assert_eq!(rotator.registry().is_solved(), i == 6);
        }
    }

    #[test]
    fn test_double_turn_is_two_quarters() {
        let m = Move::new(Face::L, Turn::Double);
        let turns: Vec<_> = m.quarter_turns().collect();
        assert_eq!(turns, vec![Face::L.clockwise(); 2]);
        assert_eq!(m.inverse(), m);
    }
}
