//! The 27 cubies of a 3x3x3 puzzle and the registry that owns them.

use std::ops::{Index, IndexMut, RangeInclusive};

use nalgebra::{Matrix3, Point3, Rotation3};

use crate::geometry::Color;
use crate::rotator::Axis;

/// Layer indices along each axis.
pub const LAYERS: RangeInclusive<i32> = -1..=1;

/// Number of cubies in a layer.
pub const LAYER_SIZE: usize = 9;

/// Number of cubies in the puzzle.
pub const CUBIE_COUNT: usize = 27;

/// One of the six faces of a single cubie, in local coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FaceSlot {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl FaceSlot {
    pub const ALL: [FaceSlot; 6] = [
        FaceSlot::PosX,
        FaceSlot::NegX,
        FaceSlot::PosY,
        FaceSlot::NegY,
        FaceSlot::PosZ,
        FaceSlot::NegZ,
    ];
}

/// Colors of the six faces of a cubie, indexed by [`FaceSlot`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceColors(pub [Color; 6]);

impl Index<FaceSlot> for FaceColors {
    type Output = Color;

    fn index(&self, slot: FaceSlot) -> &Self::Output {
        &self.0[slot as usize]
    }
}

impl IndexMut<FaceSlot> for FaceColors {
    fn index_mut(&mut self, slot: FaceSlot) -> &mut Self::Output {
        &mut self.0[slot as usize]
    }
}

/// One color per face of the whole puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub right: Color,
    pub left: Color,
    pub up: Color,
    pub down: Color,
    pub front: Color,
    pub back: Color,
}

impl Palette {
    pub fn face_colors(&self) -> FaceColors {
        FaceColors([
            self.right, self.left, self.up, self.down, self.front, self.back,
        ])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            right: Color::from_hex(0xff0000),
            left: Color::from_hex(0xff8000),
            up: Color::from_hex(0xffffff),
            down: Color::from_hex(0xffff00),
            front: Color::from_hex(0x00ff00),
            back: Color::from_hex(0x0000ff),
        }
    }
}

/// One of the 27 small cubes.
///
/// Face colors are fixed at creation; turning a layer moves the whole cubie
/// rigidly, so the orientation carries the colors with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    home: [i32; 3],
    pub position: Point3<f32>,
    pub orientation: Rotation3<f32>,
    pub colors: FaceColors,
}

impl Cubie {
    pub fn new(x: i32, y: i32, z: i32, colors: FaceColors) -> Self {
        Self {
            home: [x, y, z],
            position: Point3::new(x as f32, y as f32, z as f32),
            orientation: Rotation3::identity(),
            colors,
        }
    }

    /// Grid position the cubie was created at.
    pub fn home(&self) -> [i32; 3] {
        self.home
    }

    /// Face centers and the hidden core: at most one outward face, so
    /// spinning in place leaves them looking the same.
    pub fn is_center(&self) -> bool {
        self.home.iter().filter(|&&c| c != 0).count() <= 1
    }

    /// Position rounded to the integer grid.
    pub fn grid_position(&self) -> [i32; 3] {
        [0, 1, 2].map(|i| self.position[i].round() as i32)
    }

    /// Layer index of this cubie along `axis`.
    pub fn layer(&self, axis: Axis) -> i32 {
        self.position[axis.index()].round() as i32
    }

    /// Apply a rigid rotation about the origin.
    pub fn rotate(&mut self, rotation: &Rotation3<f32>) {
        self.position = rotation * self.position;
        self.orientation = rotation * self.orientation;
    }

    /// Snap the position onto the integer grid and the orientation onto the
    /// nearest signed permutation matrix.
    pub fn snap(&mut self) {
        self.position = self.position.map(f32::round);
        let m: Matrix3<f32> = self.orientation.matrix().map(f32::round);
        self.orientation = Rotation3::from_matrix_unchecked(m);
    }
}

/// Exclusive owner of the 27 cubies.
#[derive(Debug, Clone, PartialEq)]
pub struct CubieRegistry {
    cubies: Vec<Cubie>,
}

impl CubieRegistry {
    /// One cubie per integer triple in `{-1, 0, 1}^3`, x outermost.
    pub fn new(palette: &Palette) -> Self {
        let colors = palette.face_colors();
        let mut cubies = Vec::with_capacity(CUBIE_COUNT);
        for x in LAYERS {
            for y in LAYERS {
                for z in LAYERS {
                    cubies.push(Cubie::new(x, y, z, colors));
                }
            }
        }
        log::debug!("created {} cubies", cubies.len());
        Self { cubies }
    }

    /// All cubies in creation order.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cubie> {
        self.cubies.iter()
    }

    pub fn len(&self) -> usize {
        self.cubies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }

    /// Indices of the cubies whose coordinate on `axis` rounds to `layer`.
    pub fn select_layer(&self, axis: Axis, layer: i32) -> Vec<usize> {
        self.cubies
            .iter()
            .enumerate()
            .filter(|(_, cubie)| cubie.layer(axis) == layer)
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn cubie_mut(&mut self, index: usize) -> &mut Cubie {
        &mut self.cubies[index]
    }

    /// True when every cubie sits where a shared orientation sends its home
    /// position, and every cubie with more than one visible face also has
    /// that orientation. Whole-puzzle rotations count as solved, and so does
    /// a face center spun in place since it looks the same.
    pub fn is_solved(&self) -> bool {
        let Some(reference) = self
            .cubies
            .iter()
            .find(|cubie| !cubie.is_center())
            .map(|cubie| cubie.orientation.matrix().map(f32::round))
        else {
            return true;
        };
        self.cubies.iter().all(|cubie| {
            let [x, y, z] = cubie.home;
            let expected = reference * nalgebra::Vector3::new(x as f32, y as f32, z as f32);
            let expected = [0, 1, 2].map(|i| expected[i].round() as i32);
            let oriented =
                cubie.is_center() || cubie.orientation.matrix().map(f32::round) == reference;
            oriented && cubie.grid_position() == expected
        })
    }
}

impl Default for CubieRegistry {
    fn default() -> Self {
        Self::new(&Palette::default())
    }
}

impl<'a> IntoIterator for &'a CubieRegistry {
    type Item = &'a Cubie;
    type IntoIter = std::slice::Iter<'a, Cubie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubies.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_initial_positions_cover_grid() {
        let registry = CubieRegistry::default();
        assert_eq!(registry.len(), CUBIE_COUNT);

        let positions: HashSet<[i32; 3]> = registry.iter().map(Cubie::grid_position).collect();
        assert_eq!(positions.len(), CUBIE_COUNT);
        for cubie in &registry {
            let exact = cubie.position.map(f32::round);
            assert_eq!(cubie.position, exact);
            assert!(cubie.grid_position().iter().all(|c| LAYERS.contains(c)));
            assert_eq!(cubie.grid_position(), cubie.home());
        }
    }

    #[test]
    fn test_enumeration_is_stable() {
        let registry = CubieRegistry::default();
        let first: Vec<_> = registry.iter().map(Cubie::home).collect();
        let second: Vec<_> = registry.cubies().iter().map(Cubie::home).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], [-1, -1, -1]);
        assert_eq!(first[26], [1, 1, 1]);
    }

    #[test]
    fn test_every_cubie_gets_the_palette() {
        let palette = Palette::default();
        let registry = CubieRegistry::new(&palette);
        for cubie in &registry {
            assert_eq!(cubie.colors[FaceSlot::PosX], palette.right);
            assert_eq!(cubie.colors[FaceSlot::NegZ], palette.back);
        }
    }

    #[test]
    fn test_layers_partition_the_puzzle() {
        let registry = CubieRegistry::default();
        for axis in Axis::ALL {
            let mut seen = HashSet::new();
            for layer in LAYERS {
                let selected = registry.select_layer(axis, layer);
                assert_eq!(selected.len(), LAYER_SIZE);
                for i in selected {
                    assert!(seen.insert(i), "cubie {i} selected twice on {axis}");
                }
            }
            assert_eq!(seen.len(), CUBIE_COUNT);
        }
    }

    #[test]
    fn test_out_of_range_layer_is_empty() {
        let registry = CubieRegistry::default();
        assert!(registry.select_layer(Axis::X, 2).is_empty());
    }

    #[test]
    fn test_snap_removes_drift() {
        let mut cubie = Cubie::new(1, 0, -1, Palette::default().face_colors());
        let almost = Rotation3::from_axis_angle(&nalgebra::Vector3::y_axis(), 1e-4);
        cubie.rotate(&almost);
        assert_ne!(cubie.position, Point3::new(1.0, 0.0, -1.0));

        cubie.snap();
        assert_eq!(cubie.position, Point3::new(1.0, 0.0, -1.0));
        assert_eq!(cubie.orientation, Rotation3::identity());
    }

    #[test]
    fn test_fresh_registry_is_solved() {
        assert!(CubieRegistry::default().is_solved());
    }

    #[test]
    fn test_center_kinds() {
        let colors = Palette::default().face_colors();
        assert!(Cubie::new(0, 0, 0, colors).is_center());
        assert!(Cubie::new(0, 1, 0, colors).is_center());
        assert!(!Cubie::new(1, 1, 0, colors).is_center());
        assert!(!Cubie::new(1, -1, 1, colors).is_center());
    }

    #[test]
    fn test_spun_center_is_still_solved() {
        let mut registry = CubieRegistry::default();
        let half = Rotation3::from_axis_angle(&nalgebra::Vector3::y_axis(), std::f32::consts::PI);
        let up = registry
            .iter()
            .position(|c| c.home() == [0, 1, 0])
            .unwrap();
        registry.cubie_mut(up).orientation = half;
        registry.cubie_mut(up).snap();
        assert!(registry.is_solved());

        // The same spin on an edge is visible
        let edge = registry
            .iter()
            .position(|c| c.home() == [1, 1, 0])
            .unwrap();
        registry.cubie_mut(edge).orientation = half;
        registry.cubie_mut(edge).snap();
        assert!(!registry.is_solved());
    }
}
