use std::path::{Path, PathBuf};
use anyhow::{Context, Result, bail};
use clap::Parser;
use slideshow_view::Effect;
use slideshow_view::constants::*;
use slideshow_view::texture_loader::load_sorted_image_paths;

/// Looping image slideshow with transition effects
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Images to show: names inside the bundle directory, paths, or directories
    #[arg(value_name = "IMAGE", required = true)]
    pub images: Vec<String>,

    /// Directory where bare image names are looked up
    #[arg(short = 'b', long = "bundle", value_name = "DIR", default_value = ".")]
    pub bundle: PathBuf,

    /// Transition effect between two images
    #[arg(short = 'e', long = "effect", value_enum, default_value_t = Effect::CrossDissolve)]
    pub effect: Effect,

    /// How long an image stays visible (seconds)
    #[arg(short = 'd', long = "image-duration", value_name = "SECS", default_value_t = DEFAULT_IMAGE_DURATION)]
    pub image_duration: f32,

    /// Duration of the transition between two images (seconds)
    #[arg(short = 't', long = "transition-duration", value_name = "SECS", default_value_t = DEFAULT_TRANSITION_DURATION)]
    pub transition_duration: f32,

    /// Play images in random order
    #[arg(short = 'r', long = "random")]
    pub random: bool,

    /// Seed for random order and Ken Burns motion
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Frame width
    #[arg(long = "width", default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(i32).range(1..))]
    pub width: i32,

    /// Frame height
    #[arg(long = "height", default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(i32).range(1..))]
    pub height: i32,

    /// Target frames per second
    #[arg(long = "fps", default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Show status and key help
    #[arg(long = "hud")]
    pub hud: bool,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Initialize logging; RUST_LOG still takes precedence.
pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Expands directories into their sorted image files. Other entries are
/// kept as given: they are resolved (bundle name or path) when loaded.
pub fn collect_images(inputs: &[String]) -> Result<Vec<String>> {
    let mut images = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let paths = load_sorted_image_paths(path)
                .with_context(|| format!("Failed to load images from '{}'", input))?;
            images.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        } else {
            images.push(input.clone());
        }
    }

    if images.is_empty() {
        bail!("No images to show");
    }
    Ok(images)
}
