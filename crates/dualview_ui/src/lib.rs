//! dualview_ui - input and drawing-surface vocabulary for the dual image viewer
//!
//! This crate holds the host-independent pieces: wheel and key input,
//! drag interaction states, layout rectangles, colors and the `DrawSurface`
//! abstraction that annotation overlays are painted through.

mod color;
mod event;
mod layout;
mod state;
mod surface;

#[cfg(target_arch = "wasm32")]
mod canvas;

pub use color::{Color, ColorError};
pub use event::{KeyCode, WheelInput};
pub use layout::{Point, Rectangle, Size};
pub use state::{PanDragState, SliderDragState};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, SurfaceError};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
