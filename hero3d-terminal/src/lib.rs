/// Terminal preview of the hero scene
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use hero3d_core::{Bounds, Clock, FrameLoop, HeroConfig, HeroRuntime, InputState, LoopControl};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Virtual pointer step per arrow key, in cells
const POINTER_STEP: f64 = 2.0;

/// Wall-clock seconds since the app started
pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Options the binary passes through from the command line
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub config: HeroConfig,
    pub seed: u64,
    pub fps: u32,
    pub max_frames: Option<u64>,
    pub reduced_motion: bool,
}

/// Main application struct for the terminal preview
pub struct TerminalApp {
    runtime: HeroRuntime,
    input: InputState,
    renderer: AsciiRenderer,
    frame_loop: FrameLoop<InstantClock>,
    columns: u16,
    rows: u16,
    pointer: (f64, f64),
    target_fps: u32,
    max_frames: Option<u64>,
    last_sample: Instant,
    sampled_frames: u64,
    fps: f32,
}

impl TerminalApp {
    pub fn new(options: PreviewOptions) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let mut renderer = AsciiRenderer::new(columns as usize, rows as usize);
        let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
        let mut runtime = HeroRuntime::new(&options.config, &mut rng, 1, 1);
        runtime.resize(columns as u32, rows as u32 * 2, &mut renderer);

        Ok(Self {
            runtime,
            input: InputState::new(&options.config, options.reduced_motion),
            renderer,
            frame_loop: FrameLoop::new(InstantClock::new()),
            columns,
            rows,
            pointer: (columns as f64 / 2.0, rows as f64 / 2.0),
            target_fps: options.fps.max(1),
            max_frames: options.max_frames,
            last_sample: Instant::now(),
            sampled_frames: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.target_fps;

        loop {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            let control = match self
                .frame_loop
                .tick(&mut self.runtime, &mut self.input, &mut self.renderer)
            {
                Ok(control) => control,
                Err(never) => match never {},
            };
            if control == LoopControl::Stop {
                break;
            }

            self.present()?;

            if self
                .max_frames
                .is_some_and(|max| self.frame_loop.frames() >= max)
            {
                self.frame_loop.cancel();
            }

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            self.sample_fps();
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                self.columns = columns;
                self.rows = rows;
                self.runtime
                    .resize(columns as u32, rows as u32 * 2, &mut self.renderer);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.frame_loop.cancel(),
            KeyCode::Char('m') => {
                let reduced = !self.input.motion.is_reduced();
                self.input.motion.set_reduced(reduced);
            }
            KeyCode::Up => self.move_pointer(0.0, -POINTER_STEP / 2.0),
            KeyCode::Down => self.move_pointer(0.0, POINTER_STEP / 2.0),
            KeyCode::Left => self.move_pointer(-POINTER_STEP, 0.0),
            KeyCode::Right => self.move_pointer(POINTER_STEP, 0.0),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column as f64;
        let y = mouse.row as f64;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.input.drag.begin(x, y * 2.0),
            MouseEventKind::Drag(MouseButton::Left) => self.input.drag.moved(x, y * 2.0),
            MouseEventKind::Up(MouseButton::Left) => self.input.drag.end(),
            MouseEventKind::Moved => {
                self.pointer = (x, y);
                self.track_pointer();
            }
            _ => {}
        }
    }

    fn move_pointer(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.pointer;
        self.pointer = (
            (x + dx).clamp(0.0, self.columns as f64),
            (y + dy).clamp(0.0, self.rows as f64),
        );
        self.track_pointer();
    }

    fn track_pointer(&mut self) {
        let bounds = Bounds::new(0.0, 0.0, self.columns as f64, self.rows as f64);
        self.input
            .pointer
            .pointer_moved(self.pointer.0, self.pointer.1, &bounds);
    }

    fn sample_fps(&mut self) {
        self.sampled_frames += 1;
        let now = Instant::now();
        if (now - self.last_sample).as_secs() >= 1 {
            self.fps = self.sampled_frames as f32 / (now - self.last_sample).as_secs_f32();
            self.sampled_frames = 0;
            self.last_sample = now;
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let motion = if self.input.motion.is_reduced() {
            "reduced"
        } else {
            "full"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "hero3d | FPS: {:.1} | motion: {} | Arrows/Mouse=Pointer Drag=Orbit M=Motion Q=Quit",
                self.fps, motion
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_clock_counts_up_from_zero() {
        let clock = InstantClock::new();
        let first = clock.elapsed();
        assert!(first >= 0.0 && first < 1.0);
        assert!(clock.elapsed() >= first);
    }
}
