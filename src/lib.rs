//! dualview - dual image viewer core
//!
//! Pan/zoom/rotate/brightness on a shared viewport transform, a compare
//! mode with a reveal slider, and per-image annotation overlays that stay
//! pixel-aligned with the transformed images.
//!
//! The entry point is [`ViewportCoordinator`]: construct it with the three
//! annotation surfaces and an [`AnnotationStore`], feed it
//! [`ViewerMessage`]s, and apply the [`Notification`]s it emits.

pub mod annotation;
pub mod canvas_manager;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod notification;
pub mod replay;
pub mod transform;

#[cfg(test)]
mod tests;

pub use annotation::{AnnotationSet, AnnotationStore};
pub use canvas_manager::{AnnotationCanvasManager, SurfaceSet};
pub use config::{LogLevel, ViewerConfig, ViewerPreferences, ZoomAnchor};
pub use coordinator::ViewportCoordinator;
pub use error::{Result, ViewerError};
pub use gesture::{GestureState, PointerGestureController, PointerTarget};
pub use message::{Command, ViewerMessage};
pub use model::{DrawingMode, Shape, ShapeKind, Slot, SurfaceId, ViewMode};
pub use notification::{Notification, RevealDescriptor};
pub use transform::{RenderDescriptor, Transform2D, ZoomDirection};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
