use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use raylib::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod carousel;
mod constants;
mod deck;
mod error;
mod slide;
mod texture_loader;
mod viewer;

use crate::carousel::CarouselController;
use crate::constants::*;
use crate::slide::Slide;
use crate::viewer::Viewer;

/// Image carousel viewer: point it at a directory of images or a TOML
/// manifest and it cycles through them.
#[derive(Debug, Parser)]
#[command(name = "gallery", about = "Cyclic image carousel viewer")]
struct Args {
    /// Image directory, or a .toml manifest describing the deck
    path: PathBuf,

    /// Auto-advance interval in milliseconds (0 disables autoplay)
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Randomize the deck order once at startup
    #[arg(long)]
    shuffle: bool,

    /// Start with autoplay disarmed
    #[arg(long)]
    paused: bool,

    /// Window width
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: i32,

    /// Window height
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: i32,
}

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let slides = deck::load_deck(&args.path, args.shuffle)
        .with_context(|| format!("loading deck from {}", args.path.display()))?;
    info!(count = slides.len(), path = %args.path.display(), "deck loaded");

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Gallery")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // Load one texture per slide; a broken image drops that slide from the
    // deck rather than aborting the show.
    let mut kept: Vec<Slide> = Vec::new();
    let mut textures: Vec<Texture2D> = Vec::new();
    for slide in slides {
        match texture_loader::load_texture_with_orientation(&mut rl, &thread, &slide.source) {
            Ok(texture) => {
                textures.push(texture);
                kept.push(slide);
            }
            Err(e) => warn!(slide = %slide.id, error = %e, "skipping slide"),
        }
    }
    if kept.is_empty() {
        bail!("none of the slides could be loaded");
    }

    let interval_secs = args.delay_ms as f32 / 1000.0;
    let mut controller = CarouselController::new(kept, interval_secs);
    controller.subscribe(|state| {
        debug!(
            index = state.active_index,
            direction = ?state.direction,
            "slide changed"
        );
    });
    if !args.paused {
        controller.start();
    }

    let mut viewer = Viewer::new(textures);

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) || rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            controller.next();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            controller.previous();
        }
        for (index, key) in DIGIT_KEYS.iter().enumerate() {
            if rl.is_key_pressed(*key) {
                if let Err(e) = controller.go_to(index) {
                    debug!(index, error = %e, "ignoring jump past the end of the deck");
                }
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            if controller.is_running() {
                info!("autoplay paused");
                controller.stop();
            } else {
                info!("autoplay resumed");
                controller.start();
            }
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            let hit = viewer::indicator_hit(
                mouse.x,
                mouse.y,
                controller.slide_count(),
                rl.get_screen_width() as f32,
                rl.get_screen_height() as f32,
            );
            if let Some(index) = hit {
                if let Err(e) = controller.go_to(index) {
                    warn!(index, error = %e, "indicator out of range");
                }
            }
        }

        controller.tick(dt);

        let state = controller.state();
        viewer.update(dt, &state);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        viewer.draw(&mut d, controller.slides(), &state);
    }

    Ok(())
}
