use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use raylib::prelude::*;
use crate::constants::*;
use crate::effect::{Effect, KenBurns, Pose, Transition};
use crate::loader::ImageLoader;
use crate::order;
use crate::slide::Slide;
use crate::state::Phase;

/// One slide to draw and where it currently sits.
pub struct Layer<'a, I> {
    pub slide: &'a Slide<I>,
    pub pose: Pose,
}

/// A looping slideshow cycling through a list of images with a transition
/// effect between each of them.
///
/// Two buffers hold the visible image (front) and the one being revealed
/// (back). Playback is driven by `update`, which advances the display timer and
/// the running transition by the elapsed time.
///
/// Every property can be changed while the slideshow is running. Changes are
/// picked up at the next image change; a transition in flight keeps the
/// settings it started with. The frame is fixed for the lifetime of the
/// slideshow.
pub struct Slideshow<I> {
    frame: Rectangle,

    effect: Effect,
    images: Vec<String>,
    image_duration: f32,
    transition_duration: f32,
    random: bool,

    phase: Phase,

    buffers: [Option<Slide<I>>; 2],
    front: usize,

    rng: StdRng,
}

impl<I> Slideshow<I> {
    pub fn new(frame: Rectangle) -> Self {
        Self::with_rng(frame, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same as `new`, with reproducible random order and Ken Burns motion.
    pub fn with_seed(frame: Rectangle, seed: u64) -> Self {
        Self::with_rng(frame, StdRng::seed_from_u64(seed))
    }

    fn with_rng(frame: Rectangle, rng: StdRng) -> Self {
        Self {
            frame,
            effect: Effect::default(),
            images: Vec::new(),
            image_duration: DEFAULT_IMAGE_DURATION,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            random: false,
            phase: Phase::Stopped,
            buffers: [None, None],
            front: 0,
            rng,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn set_effect(&mut self, effect: Effect) {
        self.effect = effect;
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Replaces the names (bundle-relative) or paths of the images to display.
    pub fn set_images<S: Into<String>>(&mut self, images: impl IntoIterator<Item = S>) {
        self.images = images.into_iter().map(Into::into).collect();
    }

    pub fn image_duration(&self) -> f32 {
        self.image_duration
    }

    /// How long an image stays visible, in seconds.
    pub fn set_image_duration(&mut self, seconds: f32) {
        self.image_duration = seconds.max(MIN_IMAGE_DURATION);
    }

    pub fn transition_duration(&self) -> f32 {
        self.transition_duration
    }

    /// Duration of the animation between two images, in seconds. Ignored by
    /// `Effect::None`.
    pub fn set_transition_duration(&mut self, seconds: f32) {
        self.transition_duration = seconds.max(0.0);
    }

    pub fn random(&self) -> bool {
        self.random
    }

    pub fn set_random(&mut self, random: bool) {
        self.random = random;
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Stopped)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn active_transition(&self) -> Option<&Transition> {
        match &self.phase {
            Phase::Transitioning { transition, .. } => Some(transition),
            _ => None,
        }
    }

    /// Index of the buffer holding the visible image (0 or 1).
    pub fn current_buffer_index(&self) -> usize {
        self.front
    }

    /// Index in the image list of the image shown, or being revealed while a
    /// transition runs.
    pub fn current_image_index(&self) -> Option<usize> {
        if self.phase.is_transitioning() {
            if let Some(slide) = &self.buffers[1 - self.front] {
                return Some(slide.index);
            }
        }
        self.buffers[self.front].as_ref().map(|slide| slide.index)
    }

    /// Starts the slideshow, showing the first image immediately.
    /// Does nothing when already running or when there is no image.
    pub fn play<L: ImageLoader<Image = I>>(&mut self, loader: &mut L) {
        if self.is_running() {
            return;
        }
        if self.images.is_empty() {
            info!("Nothing to play, no image set");
            return;
        }

        // Sequential order restarts from the first image. Random order only
        // avoids the image left on screen by a previous run.
        let previous = if self.random { self.current_image_index() } else { None };
        match self.load_next(previous, loader) {
            Some((index, image)) => {
                let motion = if self.effect == Effect::KenBurns {
                    Some(KenBurns::random(&mut self.rng, self.image_duration + self.transition_duration))
                } else {
                    None
                };
                self.buffers[1 - self.front] = None;
                self.buffers[self.front] = Some(Slide::new(image, index, motion));
            }
            None => warn!("No image could be loaded, retrying in {}s", self.image_duration),
        }

        self.phase = Phase::Displaying { remaining: self.image_duration };
        info!("Slideshow started with {} images ({:?})", self.images.len(), self.effect);
    }

    /// Stops the slideshow where it is. A transition in flight is cancelled
    /// and the last fully shown image stays visible.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        if self.phase.is_transitioning() {
            self.buffers[1 - self.front] = None;
        }
        self.phase = Phase::Stopped;
        info!("Slideshow stopped");
    }

    /// Advances the slideshow by `dt` seconds, changing images as many times
    /// as the elapsed time requires, up to `MAX_CATCH_UP_TRANSITIONS`. Time
    /// beyond that (a long frame hitch) is dropped.
    pub fn update<L: ImageLoader<Image = I>>(&mut self, dt: f32, loader: &mut L) {
        if !self.is_running() || !(dt > 0.0) {
            return;
        }

        let mut budget = dt;
        let mut transitions = 0;
        loop {
            match self.phase {
                Phase::Stopped => return,
                Phase::Displaying { remaining } => {
                    if budget < remaining {
                        self.advance_slides(budget);
                        self.phase = Phase::Displaying { remaining: remaining - budget };
                        return;
                    }
                    if transitions == MAX_CATCH_UP_TRANSITIONS {
                        debug!("Dropping {}s of catch-up time", budget);
                        self.advance_slides(remaining);
                        self.phase = Phase::Displaying { remaining: 0.0 };
                        return;
                    }
                    transitions += 1;
                    self.advance_slides(remaining);
                    budget -= remaining;
                    self.begin_transition(loader);
                }
                Phase::Transitioning { transition, elapsed } => {
                    let left = transition.duration - elapsed;
                    if budget < left {
                        self.advance_slides(budget);
                        self.phase = Phase::Transitioning { transition, elapsed: elapsed + budget };
                        return;
                    }
                    self.advance_slides(left);
                    budget -= left;
                    self.finish_transition();
                }
            }
        }
    }

    /// Slides to draw, back to front.
    pub fn layers(&self) -> Vec<Layer<'_, I>> {
        let mut layers = Vec::with_capacity(2);
        let front = self.buffers[self.front].as_ref();

        match &self.phase {
            Phase::Transitioning { transition, elapsed } => {
                if let Some(slide) = front {
                    layers.push(Layer { slide, pose: transition.outgoing_pose(*elapsed) });
                }
                if let Some(slide) = &self.buffers[1 - self.front] {
                    layers.push(Layer { slide, pose: transition.incoming_pose(*elapsed) });
                }
            }
            _ => {
                if let Some(slide) = front {
                    layers.push(Layer { slide, pose: Pose::REST });
                }
            }
        }

        layers
    }

    fn advance_slides(&mut self, dt: f32) {
        for slide in self.buffers.iter_mut().flatten() {
            slide.update(dt);
        }
    }

    /// Loads the next image in playing order, skipping the ones that fail.
    /// At most one full round of the list is attempted.
    fn load_next<L: ImageLoader<Image = I>>(&mut self, previous: Option<usize>, loader: &mut L) -> Option<(usize, I)> {
        let mut probe = previous;
        for _ in 0..self.images.len() {
            let index = order::next_index(probe, self.images.len(), self.random, &mut self.rng)?;
            match loader.load(&self.images[index]) {
                Ok(image) => return Some((index, image)),
                Err(e) => {
                    warn!("Skipping image {:?}: {}", self.images[index], e);
                    probe = Some(index);
                }
            }
        }
        None
    }

    fn begin_transition<L: ImageLoader<Image = I>>(&mut self, loader: &mut L) {
        let previous = self.buffers[self.front].as_ref().map(|slide| slide.index);
        let Some((index, image)) = self.load_next(previous, loader) else {
            debug!("No image to show next, keeping the current one");
            self.phase = Phase::Displaying { remaining: self.image_duration };
            return;
        };

        let transition = self.effect.transition(self.transition_duration, self.image_duration, &mut self.rng);
        self.buffers[1 - self.front] = Some(Slide::new(image, index, transition.motion));

        if transition.is_instant() {
            self.finish_transition();
        } else {
            debug!("Transition to image {} ({:?}, {}s)", index, transition.effect, transition.duration);
            self.phase = Phase::Transitioning { transition, elapsed: 0.0 };
        }
    }

    fn finish_transition(&mut self) {
        // The old front buffer is released and becomes the next back buffer
        self.buffers[self.front] = None;
        self.front = 1 - self.front;
        self.phase = Phase::Displaying { remaining: self.image_duration };
        debug!("Showing image {:?} in buffer {}", self.current_image_index(), self.front);
    }
}
