pub const WINDOW_WIDTH: i32 = 1280;             // Default window width
pub const WINDOW_HEIGHT: i32 = 720;             // Default window height
pub const FPS: u32 = 60;                        // Frames per second

pub const DEFAULT_DELAY_MS: u64 = 5000;         // Auto-advance interval (milliseconds, 0 disables)

pub const SLIDE_IN_DURATION: f32 = 0.5;         // Duration of the enter transition (seconds)
pub const SLIDE_IN_DISTANCE: f32 = 50.0;        // Horizontal travel of the enter transition (pixels)

pub const INDICATOR_RADIUS: f32 = 6.0;          // Indicator dot radius (pixels)
pub const INDICATOR_ACTIVE_RADIUS: f32 = 8.0;   // Active indicator dot radius (pixels)
pub const INDICATOR_SPACING: f32 = 24.0;        // Distance between indicator centers (pixels)
pub const INDICATOR_MARGIN_BOTTOM: f32 = 28.0;  // Indicator row distance from the bottom edge (pixels)
