/// Keyboard to face-turn dispatch
use crate::error::CubeError;
use crate::notation::{Face, Move, Turn};
use crate::rotator::LayerRotator;

/// The six face keys. Matching is case-insensitive.
pub const FACE_KEYS: [(char, Face); 6] = [
    ('u', Face::U),
    ('d', Face::D),
    ('l', Face::L),
    ('r', Face::R),
    ('f', Face::F),
    ('b', Face::B),
];

/// Stateless lookup from a key to a clockwise face turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputDispatcher;

impl InputDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// The move bound to `key`, if any.
    pub fn binding(&self, key: char) -> Option<Move> {
        let key = key.to_ascii_lowercase();
        FACE_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, face)| Move::new(face, Turn::Clockwise))
    }

    /// Run the move bound to `key` to completion. Unbound keys are ignored
    /// and return `Ok(None)`.
    pub fn dispatch(
        &self,
        key: char,
        rotator: &mut LayerRotator,
    ) -> Result<Option<Move>, CubeError> {
        let Some(m) = self.binding(key) else {
            log::trace!("ignoring key {key:?}");
            return Ok(None);
        };
        log::trace!("key {key:?} -> {m}");
        m.apply(rotator)?;
        Ok(Some(m))
    }
}
