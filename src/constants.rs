//! Global constants for the viewer core

use dualview_ui::Color;

/// Scale multiplier per discrete wheel tick.
pub const ZOOM_STEP: f32 = 1.1;

/// Minimum scale factor.
pub const SCALE_MIN: f32 = 0.1;

/// Maximum scale factor.
pub const SCALE_MAX: f32 = 5.0;

/// Lowest brightness percentage.
pub const BRIGHTNESS_MIN: i32 = 0;

/// Highest brightness percentage.
pub const BRIGHTNESS_MAX: i32 = 200;

/// Neutral brightness.
pub const BRIGHTNESS_DEFAULT: u16 = 100;

/// Reveal slider position on entering compare mode.
pub const DEFAULT_REVEAL_PERCENT: f32 = 50.0;

/// Line width for every annotation stroke, in surface pixels.
pub const ANNOTATION_LINE_WIDTH: f32 = 2.0;

/// Stroke color for new annotations until the user picks another.
pub const DEFAULT_ANNOTATION_COLOR: Color = Color::RED;
