use crate::effect::Transition;

/// Where the playback loop currently is.
///
/// The pending display timer and the in-flight transition live inside the
/// phase itself, so replacing the phase cancels them.
#[derive(Debug, Clone, Copy)]
pub enum Phase {
    Stopped,                                              // Not running, nothing pending
    Displaying { remaining: f32 },                        // Front image shown, waiting for the next tick
    Transitioning { transition: Transition, elapsed: f32 }, // Back buffer being revealed
}

impl Phase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Phase::Transitioning { .. })
    }
}
