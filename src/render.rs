use raylib::prelude::*;
use crate::slideshow::Slideshow;

/// Draws the slideshow into its frame. Slides moving out of the frame
/// (ribbons) are clipped.
pub fn draw_slideshow(d: &mut RaylibDrawHandle, slideshow: &Slideshow<Texture2D>) {
    let frame = slideshow.frame();

    let mut s = d.begin_scissor_mode(
        frame.x as i32,
        frame.y as i32,
        frame.width as i32,
        frame.height as i32,
    );
    s.draw_rectangle_rec(frame, Color::BLACK);

    for layer in slideshow.layers() {
        layer.slide.draw(&mut s, frame, layer.pose);
    }
}

/// One-line status and key help.
pub fn hud_text<I>(slideshow: &Slideshow<I>) -> String {
    // The shown image may come from a longer list replaced while playing
    let count = slideshow.images().len();
    let position = match slideshow.current_image_index() {
        Some(index) if index < count => format!("{}/{}", index + 1, count),
        _ => format!("-/{}", count),
    };
    format!(
        "{} {} | {:?} | {} | {:.0}s + {:.1}s | [Space] play/stop [E] effect [R] random [Up/Down] duration",
        if slideshow.is_running() { "playing" } else { "stopped" },
        position,
        slideshow.effect(),
        if slideshow.random() { "random" } else { "sequential" },
        slideshow.image_duration(),
        slideshow.transition_duration(),
    )
}

pub fn draw_hud<I>(d: &mut RaylibDrawHandle, slideshow: &Slideshow<I>) {
    let frame = slideshow.frame();
    let y = (frame.y + frame.height) as i32 - 30;
    d.draw_rectangle(frame.x as i32, y - 5, frame.width as i32, 30, Color::new(0, 0, 0, 150));
    d.draw_text(&hud_text(slideshow), frame.x as i32 + 10, y, 20, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::loader::{ImageLoader, LoadError};

    struct NamesLoader;

    impl ImageLoader for NamesLoader {
        type Image = String;

        fn load(&mut self, name: &str) -> Result<String, LoadError> {
            Ok(name.to_string())
        }
    }

    #[test]
    fn test_hud_text_for_stopped_slideshow() {
        let mut slideshow: Slideshow<String> = Slideshow::with_seed(Rectangle::new(0.0, 0.0, 320.0, 240.0), 1);
        slideshow.set_images(["a", "b", "c"]);
        slideshow.set_effect(Effect::RibbonUp);
        slideshow.set_random(true);

        let text = hud_text(&slideshow);
        assert!(text.starts_with("stopped -/3 | RibbonUp | random | 10s + 3.0s"));
    }

    #[test]
    fn test_hud_text_after_list_shrinks() {
        let mut slideshow: Slideshow<String> = Slideshow::with_seed(Rectangle::new(0.0, 0.0, 320.0, 240.0), 1);
        slideshow.set_images(["a", "b", "c", "d"]);
        slideshow.set_image_duration(1.0);
        slideshow.set_transition_duration(0.0);

        let mut loader = NamesLoader;
        slideshow.play(&mut loader);
        for _ in 0..3 {
            slideshow.update(1.0, &mut loader);
        }
        assert_eq!(slideshow.current_image_index(), Some(3));
        assert!(hud_text(&slideshow).starts_with("playing 4/4"));

        slideshow.set_images(["x", "y"]);
        assert!(hud_text(&slideshow).starts_with("playing -/2"));

        slideshow.update(1.0, &mut loader);
        assert!(hud_text(&slideshow).starts_with("playing 1/2"));
    }
}
