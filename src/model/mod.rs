//! Data models for the viewer core.

mod annotation;
mod view;

pub use annotation::{DrawingMode, Shape, ShapeKind};
pub use view::{Slot, SurfaceId, ViewMode};
