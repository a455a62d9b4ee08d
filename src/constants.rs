pub const DEFAULT_WIDTH: i32 = 1280;                // Default frame width
pub const DEFAULT_HEIGHT: i32 = 720;               // Default frame height
pub const DEFAULT_FPS: u32 = 60;                   // Frames per second

pub const DEFAULT_IMAGE_DURATION: f32 = 10.0;      // How long an image stays visible (seconds)
pub const DEFAULT_TRANSITION_DURATION: f32 = 3.0;  // Duration of the transition between two images (seconds)
pub const MIN_IMAGE_DURATION: f32 = 0.05;          // Shortest allowed image duration (seconds)

pub const KEN_BURNS_MAX_ZOOM: f32 = 1.2;           // Ken Burns zoom is drawn from [1.0, KEN_BURNS_MAX_ZOOM]
pub const MAX_CATCH_UP_TRANSITIONS: usize = 4;     // Image changes a single update may run; older time is dropped
