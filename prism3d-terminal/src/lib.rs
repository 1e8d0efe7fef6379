/// Terminal frontend for the prism3d pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::info;
use prism3d_core::{Camera, Mesh, PointLight};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod canvas;

pub use canvas::TermCanvas;

/// Model-space rotation applied per keypress (radians)
const ROTATE_STEP: f32 = 0.05;
/// Frame budget for the 30 FPS target
const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Restores the terminal when dropped, so early returns cannot leave raw
/// mode active.
struct RawScreen;

impl RawScreen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Frames-per-second estimate over one-second windows
struct FpsCounter {
    frames: u32,
    since: Instant,
    value: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
            value: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.value = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

/// Interactive viewer: owns the mesh, camera, light and canvas, and runs
/// one render pass per frame.
pub struct App {
    mesh: Mesh,
    camera: Camera,
    light: PointLight,
    canvas: TermCanvas,
    fps: FpsCounter,
}

impl App {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let camera = Camera::new(cols as f32 / rows as f32);
        // Headlamp: the light rides on the camera.
        let light = PointLight {
            position: camera.position,
            intensity: 1.0,
        };

        Ok(Self {
            mesh,
            camera,
            light,
            canvas: TermCanvas::new(cols as usize, rows as usize),
            fps: FpsCounter::new(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        info!(
            "viewer starting with {} source triangles",
            self.mesh.triangles.len()
        );
        let _guard = RawScreen::enter()?;

        loop {
            let frame_start = Instant::now();

            if event::poll(Duration::ZERO)? && !self.handle_key()? {
                return Ok(());
            }

            self.draw_frame()?;
            self.fps.tick();

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_BUDGET {
                std::thread::sleep(FRAME_BUDGET - elapsed);
            }
        }
    }

    /// Mode toggles and fixed-step model rotations. Returns false on quit.
    fn handle_key(&mut self) -> io::Result<bool> {
        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                KeyCode::Char('e') => self.mesh.toggle_wireframe(),
                KeyCode::Char('g') => self.mesh.toggle_gouraud(),
                KeyCode::Char('j') | KeyCode::Down => self.mesh.rotate_x(ROTATE_STEP),
                KeyCode::Char('k') | KeyCode::Up => self.mesh.rotate_x(-ROTATE_STEP),
                KeyCode::Char('h') | KeyCode::Left => self.mesh.rotate_y(ROTATE_STEP),
                KeyCode::Char('l') | KeyCode::Right => self.mesh.rotate_y(-ROTATE_STEP),
                _ => {}
            }
        }
        Ok(true)
    }

    fn draw_frame(&mut self) -> io::Result<()> {
        self.mesh.set_view(self.camera.view_matrix());
        self.mesh.set_projection(self.camera.projection_matrix());

        self.canvas.clear();
        self.mesh
            .render(self.camera.position, &self.light, &mut self.canvas);

        let mode = match (self.mesh.is_wireframe(), self.mesh.is_gouraud()) {
            (true, _) => "wireframe",
            (false, true) => "gouraud",
            (false, false) => "flat",
        };

        let mut out = stdout();
        queue!(out, cursor::MoveTo(0, 0))?;
        self.canvas.draw(&mut out)?;
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "prism3d | {} | {:.1} fps | e=fill g=shading h/j/k/l=rotate q=quit",
                mode, self.fps.value
            )),
            ResetColor
        )?;
        out.flush()
    }
}
