use clap::ValueEnum;
use rand::Rng;
use raylib::prelude::*;
use crate::constants::*;

/// Available transition effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Effect {
    #[default]
    None,          // No transition
    CrossDissolve, // Cross-dissolve
    KenBurns,      // Random zooming and panning, cross-dissolve
    RibbonRight,   // Images slide from left to right
    RibbonLeft,    // Images slide from right to left
    RibbonDown,    // Images slide from top to bottom
    RibbonUp,      // Images slide from bottom to top
}

impl Effect {
    pub const ALL: [Effect; 7] = [
        Effect::None,
        Effect::CrossDissolve,
        Effect::KenBurns,
        Effect::RibbonRight,
        Effect::RibbonLeft,
        Effect::RibbonDown,
        Effect::RibbonUp,
    ];

    /// The effect after this one, wrapping around.
    pub fn next(self) -> Effect {
        let position = Effect::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Effect::ALL[(position + 1) % Effect::ALL.len()]
    }

    /// Describes the animation revealing the next image.
    ///
    /// `hold` is the time the incoming image will stay on screen once revealed.
    /// Ken Burns uses it so the motion spans the whole visibility of the image.
    pub fn transition<R: Rng + ?Sized>(self, duration: f32, hold: f32, rng: &mut R) -> Transition {
        let duration = duration.max(0.0);
        match self {
            Effect::None => Transition {
                effect: self,
                duration: 0.0,
                incoming: Animation::STILL,
                outgoing: Animation::STILL,
                motion: None,
            },
            Effect::CrossDissolve => Transition {
                effect: self,
                duration,
                incoming: Animation::fade_in(),
                outgoing: Animation::STILL,
                motion: None,
            },
            Effect::KenBurns => Transition {
                effect: self,
                duration,
                incoming: Animation::fade_in(),
                outgoing: Animation::STILL,
                motion: Some(KenBurns::random(rng, duration + hold + duration)),
            },
            Effect::RibbonRight => Transition::ribbon(self, duration, Vector2::new( 1.0,  0.0)),
            Effect::RibbonLeft  => Transition::ribbon(self, duration, Vector2::new(-1.0,  0.0)),
            Effect::RibbonDown  => Transition::ribbon(self, duration, Vector2::new( 0.0,  1.0)),
            Effect::RibbonUp    => Transition::ribbon(self, duration, Vector2::new( 0.0, -1.0)),
        }
    }
}

/// Opacity and offset of a slide, the offset being expressed in frame units.
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub opacity: f32,
    pub offset: Vector2,
}

impl Pose {
    pub const REST: Pose = Pose { opacity: 1.0, offset: Vector2 { x: 0.0, y: 0.0 } };

    pub fn lerp(self, other: Pose, t: f32) -> Pose {
        Pose {
            opacity: raylib::core::math::lerp(self.opacity, other.opacity, t),
            offset: self.offset.lerp(other.offset, t),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Animation {
    pub from: Pose,
    pub to: Pose,
}

impl Animation {
    pub const STILL: Animation = Animation { from: Pose::REST, to: Pose::REST };

    fn fade_in() -> Self {
        Animation {
            from: Pose { opacity: 0.0, ..Pose::REST },
            to: Pose::REST,
        }
    }

    pub fn at(&self, progress: f32) -> Pose {
        self.from.lerp(self.to, progress)
    }
}

/// Which part of an image is visible: a zoom factor (>= 1) and a pan inside
/// the aspect-fill crop, in crop units.
#[derive(Debug, Clone, Copy)]
pub struct Framing {
    pub zoom: f32,
    pub pan: Vector2,
}

impl Framing {
    pub const FULL: Framing = Framing { zoom: 1.0, pan: Vector2 { x: 0.0, y: 0.0 } };

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let zoom = rng.random_range(1.0..=KEN_BURNS_MAX_ZOOM);
        let slack = Framing::pan_slack(zoom);
        let mut pan = || if slack > 0.0 { rng.random_range(-slack..=slack) } else { 0.0 };
        let pan = Vector2::new(pan(), pan());
        Framing { zoom, pan }
    }

    /// Largest pan keeping the zoomed window inside the crop.
    pub fn pan_slack(zoom: f32) -> f32 {
        (1.0 - 1.0 / zoom.max(1.0)) * 0.5
    }

    pub fn lerp(self, other: Framing, t: f32) -> Framing {
        Framing {
            zoom: raylib::core::math::lerp(self.zoom, other.zoom, t),
            pan: self.pan.lerp(other.pan, t),
        }
    }

    /// Source rectangle in texture pixels: the largest centered region with
    /// the frame's aspect ratio (aspect fill), narrowed by zoom and shifted by pan.
    pub fn source_rect(&self, tex_width: f32, tex_height: f32, frame_width: f32, frame_height: f32) -> Rectangle {
        if tex_width <= 0.0 || tex_height <= 0.0 || frame_width <= 0.0 || frame_height <= 0.0 {
            return Rectangle::new(0.0, 0.0, tex_width.max(0.0), tex_height.max(0.0));
        }

        let frame_aspect = frame_width / frame_height;
        let (crop_width, crop_height) = if tex_width / tex_height > frame_aspect {
            (tex_height * frame_aspect, tex_height) // wider than the frame: crop the sides
        } else {
            (tex_width, tex_width / frame_aspect)   // taller than the frame: crop top and bottom
        };

        let zoom = self.zoom.max(1.0);
        let width = crop_width / zoom;
        let height = crop_height / zoom;

        let center_x = tex_width * 0.5 + self.pan.x * crop_width;
        let center_y = tex_height * 0.5 + self.pan.y * crop_height;

        Rectangle::new(
            (center_x - width * 0.5).clamp(0.0, tex_width - width),
            (center_y - height * 0.5).clamp(0.0, tex_height - height),
            width,
            height,
        )
    }
}

/// Linear pan and zoom between two framings over `duration` seconds.
#[derive(Debug, Clone, Copy)]
pub struct KenBurns {
    pub from: Framing,
    pub to: Framing,
    pub duration: f32,
}

impl KenBurns {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, duration: f32) -> Self {
        KenBurns {
            from: Framing::random(rng),
            to: Framing::random(rng),
            duration,
        }
    }

    pub fn at(&self, elapsed: f32) -> Framing {
        let t = if self.duration > 0.0 { (elapsed / self.duration).clamp(0.0, 1.0) } else { 1.0 };
        self.from.lerp(self.to, t)
    }
}

/// Everything needed to animate one image change. Snapshotted when the
/// transition starts, so later property changes do not affect it.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub effect: Effect,
    pub duration: f32,
    pub incoming: Animation,
    pub outgoing: Animation,
    pub motion: Option<KenBurns>,
}

impl Transition {
    fn ribbon(effect: Effect, duration: f32, direction: Vector2) -> Self {
        let away = Vector2::new(-direction.x, -direction.y);
        Transition {
            effect,
            duration,
            incoming: Animation {
                from: Pose { offset: away, ..Pose::REST },
                to: Pose::REST,
            },
            outgoing: Animation {
                from: Pose::REST,
                to: Pose { offset: direction, ..Pose::REST },
            },
            motion: None,
        }
    }

    /// True when the buffers should be swapped without animating.
    pub fn is_instant(&self) -> bool {
        self.effect == Effect::None || self.duration <= 0.0
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.is_instant() {
            return 1.0;
        }
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        ease::quad_in_out(t, 0.0, 1.0, 1.0)
    }

    pub fn incoming_pose(&self, elapsed: f32) -> Pose {
        self.incoming.at(self.progress(elapsed))
    }

    pub fn outgoing_pose(&self, elapsed: f32) -> Pose {
        self.outgoing.at(self.progress(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_next_cycles_through_all_effects() {
        let mut effect = Effect::None;
        let mut seen = Vec::new();
        for _ in 0..Effect::ALL.len() {
            seen.push(effect);
            effect = effect.next();
        }
        assert_eq!(seen, Effect::ALL.to_vec());
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_parse_from_cli_names() {
        assert_eq!(Effect::from_str("cross-dissolve", true).unwrap(), Effect::CrossDissolve);
        assert_eq!(Effect::from_str("ribbon-up", true).unwrap(), Effect::RibbonUp);
        assert!(Effect::from_str("spiral", true).is_err());
    }

    #[test]
    fn test_none_is_instant() {
        let mut rng = StdRng::seed_from_u64(1);
        let transition = Effect::None.transition(3.0, 10.0, &mut rng);
        assert!(transition.is_instant());
        assert!(close(transition.progress(0.0), 1.0));
        assert!(close(transition.incoming_pose(0.0).opacity, 1.0));
    }

    #[test]
    fn test_cross_dissolve_fades_incoming_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let transition = Effect::CrossDissolve.transition(2.0, 10.0, &mut rng);
        assert!(close(transition.incoming_pose(0.0).opacity, 0.0));
        assert!(close(transition.incoming_pose(1.0).opacity, 0.5));
        assert!(close(transition.incoming_pose(2.0).opacity, 1.0));
        assert!(close(transition.outgoing_pose(1.0).opacity, 1.0));
        assert!(transition.motion.is_none());
    }

    #[test]
    fn test_ken_burns_motion_spans_visibility() {
        let mut rng = StdRng::seed_from_u64(7);
        let transition = Effect::KenBurns.transition(3.0, 10.0, &mut rng);
        let motion = transition.motion.expect("ken burns carries a motion");
        assert!(close(motion.duration, 16.0));
        assert!(close(transition.incoming_pose(0.0).opacity, 0.0));
    }

    #[test]
    fn test_ribbons_slide_in_from_named_edge() {
        let mut rng = StdRng::seed_from_u64(1);
        let cases = [
            (Effect::RibbonRight, (-1.0, 0.0), (1.0, 0.0)),
            (Effect::RibbonLeft, (1.0, 0.0), (-1.0, 0.0)),
            (Effect::RibbonDown, (0.0, -1.0), (0.0, 1.0)),
            (Effect::RibbonUp, (0.0, 1.0), (0.0, -1.0)),
        ];
        for (effect, start, exit) in cases {
            let transition = effect.transition(1.0, 5.0, &mut rng);
            let first = transition.incoming_pose(0.0);
            assert!(close(first.offset.x, start.0) && close(first.offset.y, start.1), "{:?}", effect);
            assert!(close(first.opacity, 1.0), "ribbons do not blend");

            let last = transition.incoming_pose(1.0);
            assert!(close(last.offset.x, 0.0) && close(last.offset.y, 0.0), "{:?}", effect);

            let gone = transition.outgoing_pose(1.0);
            assert!(close(gone.offset.x, exit.0) && close(gone.offset.y, exit.1), "{:?}", effect);
        }
    }

    #[test]
    fn test_random_framing_stays_inside_crop() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let framing = Framing::random(&mut rng);
            assert!(framing.zoom >= 1.0 && framing.zoom <= KEN_BURNS_MAX_ZOOM);
            let slack = Framing::pan_slack(framing.zoom);
            assert!(framing.pan.x.abs() <= slack + EPSILON);
            assert!(framing.pan.y.abs() <= slack + EPSILON);
        }
    }

    #[test]
    fn test_source_rect_aspect_fill() {
        // 2000x1000 texture into a 4:3 frame: crop the sides
        let rect = Framing::FULL.source_rect(2000.0, 1000.0, 800.0, 600.0);
        assert!(close(rect.height, 1000.0));
        assert!(close(rect.width, 1000.0 * 4.0 / 3.0));
        assert!(close(rect.x, (2000.0 - rect.width) * 0.5));
        assert!(close(rect.y, 0.0));

        // Portrait texture into a landscape frame: crop top and bottom
        let rect = Framing::FULL.source_rect(600.0, 1200.0, 1600.0, 900.0);
        assert!(close(rect.width, 600.0));
        assert!(close(rect.height, 600.0 * 9.0 / 16.0));
    }

    #[test]
    fn test_source_rect_never_leaves_texture() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let framing = Framing::random(&mut rng);
            let rect = framing.source_rect(1024.0, 768.0, 1280.0, 720.0);
            assert!(rect.x >= -EPSILON && rect.y >= -EPSILON);
            assert!(rect.x + rect.width <= 1024.0 + EPSILON);
            assert!(rect.y + rect.height <= 768.0 + EPSILON);
        }
    }

    #[test]
    fn test_ken_burns_interpolates_linearly() {
        let motion = KenBurns {
            from: Framing { zoom: 1.0, pan: Vector2::new(0.0, 0.0) },
            to: Framing { zoom: 1.2, pan: Vector2::new(0.05, -0.05) },
            duration: 4.0,
        };
        let halfway = motion.at(2.0);
        assert!(close(halfway.zoom, 1.1));
        assert!(close(halfway.pan.x, 0.025));
        assert!(close(motion.at(100.0).zoom, 1.2));
    }
}
