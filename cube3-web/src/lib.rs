/// Cube3 Web - browser frontend for the 3x3x3 puzzle
///
/// Draws the puzzle on a Canvas 2D context every animation frame, turns
/// faces on `keydown` and follows the window size on `resize`.
use std::cell::RefCell;
use std::rc::Rc;

use cube3_core::{
    scramble, Algorithm, Camera, InputDispatcher, LayerRotator, Lighting, Mesh, ViewOrbit,
    CUBIE_SIZE,
};
use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};

pub mod painter;

use painter::Polygon;

/// Orbit step per arrow key press (radians)
const ORBIT_STEP: f32 = 0.1;

/// Used when the window reports no size
const FALLBACK_SIZE: (u32, u32) = (800, 600);

/// Puzzle, view and input state shared by the event callbacks
struct Scene {
    rotator: LayerRotator,
    dispatcher: InputDispatcher,
    meshes: Vec<Mesh>,
    orbit: ViewOrbit,
    camera: Camera,
    lighting: Lighting,
    width: u32,
    height: u32,
}

impl Scene {
    fn new(width: u32, height: u32) -> Self {
        let rotator = LayerRotator::default();
        let meshes = rotator
            .registry()
            .iter()
            .map(|cubie| Mesh::cubie(CUBIE_SIZE, &cubie.colors))
            .collect();

        let mut scene = Self {
            rotator,
            dispatcher: InputDispatcher::new(),
            meshes,
            orbit: ViewOrbit::default(),
            camera: Camera::default(),
            lighting: Lighting::default(),
            width,
            height,
        };
        scene.resize(width, height);
        scene
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("viewport resized to {width}x{height}");
        self.width = width;
        self.height = height;
        self.camera.resize(width, height);
        self.camera.orbit(&self.orbit);
    }

    /// Returns whether the key was used.
    fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "ArrowUp" => self.orbit.rotate(0.0, ORBIT_STEP),
            "ArrowDown" => self.orbit.rotate(0.0, -ORBIT_STEP),
            "ArrowLeft" => self.orbit.rotate(-ORBIT_STEP, 0.0),
            "ArrowRight" => self.orbit.rotate(ORBIT_STEP, 0.0),
            _ => {
                let mut chars = key.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return false;
                };
                return match self.dispatcher.dispatch(c, &mut self.rotator) {
                    Ok(turned) => turned.is_some(),
                    Err(e) => {
                        log::error!("{e}");
                        false
                    }
                };
            }
        }
        self.camera.orbit(&self.orbit);
        true
    }

    fn paint_list(&self) -> Vec<Polygon> {
        painter::paint_list(
            self.rotator.registry(),
            &self.meshes,
            &self.camera,
            &self.lighting,
            self.width,
            self.height,
        )
    }
}

/// Handle to a puzzle mounted on a canvas
#[wasm_bindgen]
pub struct WebApp {
    scene: Rc<RefCell<Scene>>,
}

#[wasm_bindgen]
impl WebApp {
    /// Handle `key` as if it had been pressed; returns whether it was used
    pub fn press(&self, key: &str) -> bool {
        self.scene.borrow_mut().handle_key(key)
    }

    /// Apply moves in face-turn notation, e.g. `"R U R' U'"`
    pub fn apply_moves(&self, moves: &str) -> Result<(), JsError> {
        let alg: Algorithm = moves.parse()?;
        alg.apply(&mut self.scene.borrow_mut().rotator)?;
        Ok(())
    }

    /// Apply a random scramble and return it in notation
    pub fn scramble(&self, length: usize, seed: u32) -> Result<String, JsError> {
        let alg = scramble(length, u64::from(seed));
        alg.apply(&mut self.scene.borrow_mut().rotator)?;
        Ok(alg.to_string())
    }

    pub fn reset(&self) {
        self.scene.borrow_mut().rotator.reset();
    }

    pub fn is_solved(&self) -> bool {
        self.scene.borrow().rotator.registry().is_solved()
    }
}

/// Mount the puzzle on the canvas with id `canvas_id`, creating it if absent,
/// and start drawing.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<WebApp, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = match document.get_element_by_id(canvas_id) {
        Some(element) => element.dyn_into()?,
        None => {
            let element = document.create_element("canvas")?;
            element.set_id(canvas_id);
            document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .append_child(&element)?;
            element.dyn_into()?
        }
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let (width, height) = window_size(&window);
    canvas.set_width(width);
    canvas.set_height(height);
    let scene = Rc::new(RefCell::new(Scene::new(width, height)));

    // Keyboard
    {
        let scene = scene.clone();
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            if scene.borrow_mut().handle_key(&event.key()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
        on_keydown.forget();
    }

    // Resize
    {
        let scene = scene.clone();
        let canvas = canvas.clone();
        let resize_window = window.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = window_size(&resize_window);
            canvas.set_width(width);
            canvas.set_height(height);
            scene.borrow_mut().resize(width, height);
        });
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    // Render loop
    {
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let next = frame.clone();
        let scene = scene.clone();
        let loop_window = window.clone();
        *frame.borrow_mut() = Some(Closure::new(move || {
            let (polygons, width, height) = {
                let scene = scene.borrow();
                (scene.paint_list(), scene.width, scene.height)
            };
            if let Err(e) = painter::draw(&ctx, &polygons, width, height) {
                log::error!("draw failed: {e:?}");
            }
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(e) = request_animation_frame(&loop_window, callback) {
                    log::error!("requestAnimationFrame failed: {e:?}");
                }
            }
        }));
        let first = frame.borrow();
        if let Some(callback) = first.as_ref() {
            request_animation_frame(&window, callback)?;
        }
    }

    log::info!("mounted on #{canvas_id} ({width}x{height})");
    Ok(WebApp { scene })
}

/// Set the console log level: `error`, `warn`, `info`, `debug` or `trace`
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level {level:?}")))?;
    log::set_max_level(level);
    Ok(())
}

fn request_animation_frame(window: &Window, callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn window_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).map(|v| v as u32)
    };
    match (dimension(window.inner_width()), dimension(window.inner_height())) {
        (Some(width), Some(height)) if width > 0 && height > 0 => (width, height),
        _ => FALLBACK_SIZE,
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    // The console sink passes everything; the `log` max level does the filtering
    wasm_logger::init(wasm_logger::Config::new(Level::Trace));
    log::set_max_level(LevelFilter::Info);

    Ok(())
}
