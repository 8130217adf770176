/// Geometry primitives for drawing cubies
use nalgebra::{Matrix4, Point3, Vector3};

use crate::cubie::{FaceColors, FaceSlot};

/// An sRGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Scale every channel by `factor` (clamped to `0.0..=1.0`)
    pub fn shade(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// CSS color string, e.g. `#ff8000`
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Ambient light plus one directional light
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    /// Unit vector pointing toward the light
    pub direction: Vector3<f32>,
    /// Share of a face's color that is lit regardless of direction
    pub ambient: f32,
}

impl Lighting {
    pub fn new(direction: Vector3<f32>, ambient: f32) -> Self {
        Self {
            direction: direction.normalize(),
            ambient: ambient.clamp(0.0, 1.0),
        }
    }

    /// Brightness in `ambient..=1.0` of a face with unit `normal`
    pub fn brightness(&self, normal: &Vector3<f32>) -> f32 {
        let diffuse = normal.dot(&self.direction).max(0.0);
        self.ambient + (1.0 - self.ambient) * diffuse
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::new(Vector3::new(5.0, 10.0, 7.0), 0.45)
    }
}

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn transformed(&self, model: &Matrix4<f32>) -> Self {
        Self {
            position: model.transform_point(&self.position),
            normal: model.transform_vector(&self.normal),
        }
    }
}

/// A flat-colored triangle defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, color: Color) -> Self {
        Self {
            vertices: [v0, v1, v2],
            color,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.position.coords + b.position.coords + c.position.coords) / 3.0)
    }

    /// Copy of this triangle with `model` applied to every vertex
    pub fn transformed(&self, model: &Matrix4<f32>) -> Self {
        Self {
            vertices: self.vertices.map(|v| v.transformed(model)),
            color: self.color,
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add the two triangles of a counter-clockwise quad `a b c d`
    fn add_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3], color: Color) {
        let [a, b, c, d] =
            corners.map(|[x, y, z]| Vertex::new(x, y, z, normal[0], normal[1], normal[2]));
        self.add_triangle(Triangle::new(a, b, c, color));
        self.add_triangle(Triangle::new(a, c, d, color));
    }

    /// Build an axis-aligned cube of edge `size` centered at the origin,
    /// one color per face.
    pub fn cubie(size: f32, colors: &FaceColors) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        mesh.add_quad(
            [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
            [1.0, 0.0, 0.0],
            colors[FaceSlot::PosX],
        );
        mesh.add_quad(
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
            [-1.0, 0.0, 0.0],
            colors[FaceSlot::NegX],
        );
        mesh.add_quad(
            [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
            [0.0, 1.0, 0.0],
            colors[FaceSlot::PosY],
        );
        mesh.add_quad(
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
            [0.0, -1.0, 0.0],
            colors[FaceSlot::NegY],
        );
        mesh.add_quad(
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
            [0.0, 0.0, 1.0],
            colors[FaceSlot::PosZ],
        );
        mesh.add_quad(
            [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
            [0.0, 0.0, -1.0],
            colors[FaceSlot::NegZ],
        );

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
