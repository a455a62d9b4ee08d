use raylib::prelude::*;
use crate::effect::{Framing, KenBurns, Pose};

/// Content of one of the two image buffers: the loaded image, where it sits in
/// the image list and its own pan/zoom clock.
pub struct Slide<I> {
    pub image: I,
    pub index: usize,

    motion: Option<KenBurns>,
    elapsed: f32,
}

impl<I> Slide<I> {
    pub fn new(image: I, index: usize, motion: Option<KenBurns>) -> Self {
        Self {
            image,
            index,
            motion,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.motion.is_some() {
            self.elapsed += dt;
        }
    }

    /// Current framing; the full aspect-fill crop unless a Ken Burns motion runs.
    pub fn framing(&self) -> Framing {
        self.motion.map_or(Framing::FULL, |motion| motion.at(self.elapsed))
    }

    pub fn has_motion(&self) -> bool {
        self.motion.is_some()
    }

    pub fn motion(&self) -> Option<&KenBurns> {
        self.motion.as_ref()
    }
}

impl Slide<Texture2D> {
    pub fn draw(&self, d: &mut impl RaylibDraw, frame: Rectangle, pose: Pose) {
        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;

        // Source rectangle follows the Ken Burns framing, dest rectangle the pose
        let source_rec = self.framing().source_rect(tex_width, tex_height, frame.width, frame.height);
        let dest_rec = Rectangle::new(
            frame.x + pose.offset.x * frame.width,
            frame.y + pose.offset.y * frame.height,
            frame.width,
            frame.height,
        );

        let alpha = (pose.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;

        d.draw_texture_pro(
            &self.image,
            source_rec,
            dest_rec,
            Vector2::new(0.0, 0.0),
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }
}
