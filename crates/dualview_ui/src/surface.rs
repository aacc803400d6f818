//! Drawing surfaces for annotation overlays.
//!
//! A surface is one drawing region bound to one displayed image element.
//! Its backing pixel size must track the element's layout box; resizing the
//! backing store clears it, exactly like an HTML canvas.

use thiserror::Error;

use crate::{Color, Point, Rectangle};

/// Errors produced while binding a drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("failed to get 2d context: {0}")]
    ContextFailed(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("context is not a CanvasRenderingContext2d")]
    WrongContextType,
}

/// A draw command recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The whole backing store was cleared.
    Clear,
    /// A rectangle outline. Width and height may be negative.
    StrokeRect {
        rect: Rectangle,
        color: Color,
        line_width: f32,
    },
    /// Straight segments connecting consecutive points.
    StrokePolyline {
        points: Vec<Point>,
        color: Color,
        line_width: f32,
    },
}

/// A drawing backend for one annotation overlay.
pub trait DrawSurface {
    /// The bound element's current layout box in client coordinates,
    /// untransformed. An empty box means the element is not laid out yet.
    fn layout_box(&self) -> Rectangle;

    /// Current backing store size in pixels.
    fn pixel_size(&self) -> (u32, u32);

    /// Resize the backing store. Implicitly clears its contents.
    fn set_pixel_size(&mut self, width: u32, height: u32);

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool);

    /// Apply the CSS-equivalent transform shared with the image layer.
    fn set_transform(&mut self, transform: &str);

    /// Clear the whole backing store.
    fn clear(&mut self);

    /// Stroke a rectangle path with the stored (possibly negative) extents.
    fn stroke_rect(&mut self, rect: Rectangle, color: Color, line_width: f32);

    /// Stroke straight segments starting at the first point.
    fn stroke_polyline(&mut self, points: &[Point], color: Color, line_width: f32);
}

/// An in-memory surface that records draw commands.
///
/// Used by tests and by session replay, where no real canvas exists.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    layout: Rectangle,
    width: u32,
    height: u32,
    visible: bool,
    transform: String,
    commands: Vec<DrawCommand>,
    resize_count: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose bound element is already laid out.
    pub fn with_layout(layout: Rectangle) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Simulate the bound element changing its layout box.
    pub fn set_layout(&mut self, layout: Rectangle) {
        self.layout = layout;
    }

    /// Commands drawn since the last backing store resize.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands drawn after the most recent clear.
    pub fn frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn transform(&self) -> &str {
        &self.transform
    }

    /// Number of times the backing store was resized.
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }
}

impl DrawSurface for RecordingSurface {
    fn layout_box(&self) -> Rectangle {
        self.layout
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.resize_count += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_transform(&mut self, transform: &str) {
        self.transform = transform.to_string();
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_rect(&mut self, rect: Rectangle, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_messages() {
        assert_eq!(
            SurfaceError::ContextFailed("SecurityError".to_string()).to_string(),
            "failed to get 2d context: SecurityError"
        );
        assert_eq!(SurfaceError::NoContext.to_string(), "canvas has no 2d context");
    }

    #[test]
    fn test_resize_drops_recorded_commands() {
        let mut surface = RecordingSurface::with_layout(Rectangle::new(0.0, 0.0, 10.0, 10.0));
        surface.stroke_rect(Rectangle::new(1.0, 1.0, 2.0, 2.0), Color::RED, 2.0);
        assert_eq!(surface.commands().len(), 1);

        surface.set_pixel_size(10, 10);
        assert!(surface.commands().is_empty());
        assert_eq!(surface.pixel_size(), (10, 10));
        assert_eq!(surface.resize_count(), 1);
    }

    #[test]
    fn test_frame_returns_commands_after_last_clear() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        surface.stroke_rect(Rectangle::new(0.0, 0.0, 1.0, 1.0), Color::RED, 2.0);
        surface.clear();
        surface.stroke_polyline(&[Point::zero(), Point::new(1.0, 1.0)], Color::rgb(255, 255, 255), 2.0);

        assert_eq!(surface.frame().len(), 1);
        assert!(matches!(
            surface.frame()[0],
            DrawCommand::StrokePolyline { .. }
        ));
    }
}
