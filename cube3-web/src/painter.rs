/// Depth-sorted Canvas 2D painter
use cube3_core::{Camera, Color, CubieRegistry, Lighting, Mesh, Transform};
use nalgebra::Matrix4;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Background fill behind the puzzle
const BACKGROUND: &str = "#000000";

/// A screen-space triangle ready to fill
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: [(f32, f32); 3],
    /// Mean normalized device depth; smaller is closer
    pub depth: f32,
    pub color: Color,
}

/// Project every front-facing cubie triangle, sorted back to front.
pub fn paint_list(
    registry: &CubieRegistry,
    meshes: &[Mesh],
    camera: &Camera,
    lighting: &Lighting,
    width: u32,
    height: u32,
) -> Vec<Polygon> {
    let identity = Matrix4::identity();
    let mut polygons = Vec::new();

    for (cubie, mesh) in registry.iter().zip(meshes) {
        let model = Transform::model_matrix(cubie);
        for triangle in &mesh.triangles {
            let world = triangle.transformed(&model);

            // Back-face culling
            let normal = world.calculate_normal();
            if normal.dot(&(camera.position - world.centroid())) <= 0.0 {
                continue;
            }

            let mut points = [(0.0, 0.0); 3];
            let mut depth = 0.0;
            let mut visible = true;
            for (point, vertex) in points.iter_mut().zip(&world.vertices) {
                match camera.project_to_screen(&vertex.position, &identity, width, height) {
                    Some((x, y, z)) => {
                        *point = (x, y);
                        depth += z / 3.0;
                    }
                    None => {
                        visible = false;
                        break;
                    }
                }
            }
            if !visible {
                continue;
            }

            polygons.push(Polygon {
                points,
                depth,
                color: world.color.shade(lighting.brightness(&normal)),
            });
        }
    }

    polygons.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    polygons
}

/// Clear the canvas and fill `polygons` in order.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    polygons: &[Polygon],
    width: u32,
    height: u32,
) -> Result<(), JsValue> {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

    for polygon in polygons {
        let css = polygon.color.css();
        ctx.set_fill_style_str(&css);
        // Stroke in the fill color to hide the seam between a face's two triangles
        ctx.set_stroke_style_str(&css);
        ctx.set_line_width(1.0);

        let [(x0, y0), (x1, y1), (x2, y2)] = polygon.points;
        ctx.begin_path();
        ctx.move_to(x0 as f64, y0 as f64);
        ctx.line_to(x1 as f64, y1 as f64);
        ctx.line_to(x2 as f64, y2 as f64);
        ctx.close_path();
        ctx.fill();
        ctx.stroke();
    }

    Ok(())
}
