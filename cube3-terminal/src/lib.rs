/// Terminal frontend: draws the puzzle with an ANSI-color rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cube3_core::{
    Camera, InputDispatcher, LayerRotator, Mesh, Move, Transform, ViewOrbit, CUBIE_SIZE,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Orbit step per arrow key press (radians)
const ORBIT_STEP: f32 = 0.1;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    rotator: LayerRotator,
    dispatcher: InputDispatcher,
    meshes: Vec<Mesh>,
    orbit: ViewOrbit,
    camera: Camera,
    renderer: AsciiRenderer,
    frame_time: Duration,
    running: bool,
    last_move: Option<Move>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(rotator: LayerRotator, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(rotator, target_fps, width, height))
    }

    /// Build the app for a known terminal size without touching the terminal
    pub fn with_size(rotator: LayerRotator, target_fps: u32, width: u16, height: u16) -> Self {
        // Face colors never change, so one mesh per cubie is built up front
        let meshes = rotator
            .registry()
            .iter()
            .map(|cubie| Mesh::cubie(CUBIE_SIZE, &cubie.colors))
            .collect();

        let mut app = Self {
            rotator,
            dispatcher: InputDispatcher::new(),
            meshes,
            orbit: ViewOrbit::default(),
            camera: Camera::default(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            frame_time: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            running: true,
            last_move: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.resize(width, height);
        app
    }

    pub fn rotator(&self) -> &LayerRotator {
        &self.rotator
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle every pending event before drawing
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    /// View and quit keys are handled here; everything else goes to the
    /// face-turn dispatcher.
    pub fn handle_key(&mut self, KeyEvent { code, modifiers, .. }: KeyEvent) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Up => self.orbit.rotate(0.0, ORBIT_STEP),
            KeyCode::Down => self.orbit.rotate(0.0, -ORBIT_STEP),
            KeyCode::Left => self.orbit.rotate(-ORBIT_STEP, 0.0),
            KeyCode::Right => self.orbit.rotate(ORBIT_STEP, 0.0),
            KeyCode::Char(c) => match self.dispatcher.dispatch(c, &mut self.rotator) {
                Ok(Some(m)) => self.last_move = Some(m),
                Ok(None) => {}
                Err(e) => log::error!("{e}"),
            },
            _ => {}
        }
        self.camera.orbit(&self.orbit);
    }

    /// Recompute the viewport and projection for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        log::debug!("terminal resized to {width}x{height}");
        self.renderer.resize(width as usize, height as usize);
        self.camera
            .resize(u32::from(width), u32::from(height) * CELL_ASPECT);
        self.camera.orbit(&self.orbit);
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        for (cubie, mesh) in self.rotator.registry().iter().zip(&self.meshes) {
            let model = Transform::model_matrix(cubie);
            self.renderer.render_mesh(mesh, &model, &self.camera);
        }

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let status = match (self.rotator.registry().is_solved(), self.last_move) {
            (true, _) => "solved".to_string(),
            (false, Some(m)) => format!("last: {m} ({})", m.face.name()),
            (false, None) => String::new(),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Cube3 | FPS: {:.1} | {status} | U/D/L/R/F/B=Turn Arrows=Orbit Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
