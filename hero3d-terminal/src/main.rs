/// hero3d Terminal Preview
///
/// Runs the hero scene's frame loop in the terminal.
/// Controls:
///   - Arrow Keys / Mouse: Move the pointer the scene leans toward
///   - Left-drag: Orbit the camera
///   - M: Toggle reduced motion
///   - Q/ESC: Quit
use clap::Parser;
use hero3d_core::HeroConfig;
use hero3d_terminal::{PreviewOptions, TerminalApp};
use std::io;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "ASCII preview of the hero scene")]
struct Args {
    /// Number of background stars
    #[arg(long, default_value_t = 1200)]
    stars: usize,

    /// Seed for star placement
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Quit after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Start with reduced motion enabled
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = HeroConfig {
        star_count: args.stars,
        ..HeroConfig::default()
    };
    config
        .validate()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let mut app = TerminalApp::new(PreviewOptions {
        config,
        seed: args.seed,
        fps: args.fps,
        max_frames: args.frames,
        reduced_motion: args.reduced_motion,
    })?;
    app.run()
}
