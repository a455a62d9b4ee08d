use anyhow::Result;
use clap::Parser;
use log::info;
use raylib::prelude::*;

mod cli;

use slideshow_view::Slideshow;
use slideshow_view::render::{draw_hud, draw_slideshow};
use slideshow_view::texture_loader::TextureLoader;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    cli::init_logger(args.verbosity);

    let images = cli::collect_images(&args.images)?;
    info!("{} images, bundle directory {:?}", images.len(), args.bundle);

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Slideshow")
        .vsync()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // The frame stays fixed for the lifetime of the slideshow, hence the non resizable window
    let frame = Rectangle::new(0.0, 0.0, args.width as f32, args.height as f32);
    let mut slideshow = match args.seed {
        Some(seed) => Slideshow::with_seed(frame, seed),
        None => Slideshow::new(frame),
    };
    slideshow.set_images(images);
    slideshow.set_effect(args.effect);
    slideshow.set_image_duration(args.image_duration);
    slideshow.set_transition_duration(args.transition_duration);
    slideshow.set_random(args.random);

    slideshow.play(&mut TextureLoader::new(&mut rl, &thread, &args.bundle));

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // --- Keys ---
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            if slideshow.is_running() {
                slideshow.stop();
            } else {
                slideshow.play(&mut TextureLoader::new(&mut rl, &thread, &args.bundle));
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_E) {
            let effect = slideshow.effect().next();
            info!("Effect: {:?}", effect);
            slideshow.set_effect(effect);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            let random = !slideshow.random();
            info!("Random order: {}", random);
            slideshow.set_random(random);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) {
            slideshow.set_image_duration(slideshow.image_duration() + 1.0);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            slideshow.set_image_duration(slideshow.image_duration() - 1.0);
        }

        // --- Update Logic ---
        slideshow.update(dt, &mut TextureLoader::new(&mut rl, &thread, &args.bundle));

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        draw_slideshow(&mut d, &slideshow);
        if args.hud {
            draw_hud(&mut d, &slideshow);
        }
    }

    Ok(())
}
