/// Seeded random scrambles
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::notation::{Algorithm, Face, Move, Turn};

/// Suggested scramble length for a 3x3x3.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 25;

const TURNS: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Double];

/// Random sequence of `length` moves, identical for identical seeds.
/// Consecutive moves never turn the same face.
pub fn scramble(length: usize, seed: u64) -> Algorithm {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut moves: Vec<Move> = Vec::with_capacity(length);

    while moves.len() < length {
        let face = Face::ALL[rng.random_range(0..Face::ALL.len())];
        if moves.last().is_some_and(|prev| prev.face == face) {
            continue;
        }
        let turn = TURNS[rng.random_range(0..TURNS.len())];
        moves.push(Move::new(face, turn));
    }

    let alg = Algorithm(moves);
    log::debug!("scramble (seed {seed}): {alg}");
    alg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotator::LayerRotator;

    #[test]
    fn test_same_seed_same_scramble() {
        assert_eq!(scramble(30, 42), scramble(30, 42));
        assert_ne!(scramble(30, 42), scramble(30, 43));
    }

    #[test]
    fn test_length_and_no_repeats() {
        let alg = scramble(DEFAULT_SCRAMBLE_LENGTH, 7);
        assert_eq!(alg.len(), DEFAULT_SCRAMBLE_LENGTH);
        for pair in alg.moves().windows(2) {
            assert_ne!(pair[0].face, pair[1].face);
        }
        assert!(scramble(0, 7).is_empty());
    }

    #[test]
    fn test_scramble_then_inverse_solves() {
        let mut rotator = LayerRotator::default();
        let alg = scramble(DEFAULT_SCRAMBLE_LENGTH, 1234);
        alg.apply(&mut rotator).unwrap();
        assert!(!rotator.registry().is_solved());
        alg.inverse().apply(&mut rotator).unwrap();
        assert!(rotator.registry().is_solved());
    }
}
