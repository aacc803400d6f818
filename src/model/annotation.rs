//! Annotation shape types and drawing modes.

use dualview_ui::{Color, Point, Rectangle};
use serde::{Deserialize, Serialize};

/// Kind of shape a drawing gesture produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Freehand,
}

/// How pointer gestures on a surface are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// Gestures pan the image.
    #[default]
    None,
    /// Gestures draw rectangles.
    Rect,
    /// Gestures draw freehand strokes.
    Free,
}

impl DrawingMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            DrawingMode::None => "None",
            DrawingMode::Rect => "Rectangle",
            DrawingMode::Free => "Freehand",
        }
    }

    /// The shape a gesture draws in this mode, if any.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            DrawingMode::None => None,
            DrawingMode::Rect => Some(ShapeKind::Rect),
            DrawingMode::Free => Some(ShapeKind::Freehand),
        }
    }

    /// Radio-button-with-off semantics: requesting the current mode turns it off.
    pub fn toggled(self, requested: DrawingMode) -> DrawingMode {
        if requested == self {
            DrawingMode::None
        } else {
            requested
        }
    }
}

/// A vector annotation in its surface's local pixel space.
///
/// Rectangles keep the raw signed extents from the drag; they are only
/// normalized when a bounding box is asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Freehand { points: Vec<Point>, color: Color },
}

impl Shape {
    /// Open a shape at the gesture's start point.
    pub fn begin(kind: ShapeKind, start: Point, color: Color) -> Self {
        match kind {
            ShapeKind::Rect => Shape::Rect {
                x: start.x,
                y: start.y,
                width: 0.0,
                height: 0.0,
                color,
            },
            ShapeKind::Freehand => Shape::Freehand {
                points: vec![start],
                color,
            },
        }
    }

    /// Grow the shape to `point`.
    ///
    /// Rectangles recompute their extent from the start corner; freehand
    /// strokes append every point, with no decimation.
    pub fn extend(&mut self, point: Point) {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                *width = point.x - *x;
                *height = point.y - *y;
            }
            Shape::Freehand { points, .. } => points.push(point),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::Freehand { .. } => ShapeKind::Freehand,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Rect { color, .. } | Shape::Freehand { color, .. } => *color,
        }
    }

    /// Normalized axis-aligned bounding box.
    pub fn bounds(&self) -> Option<Rectangle> {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => Some(Rectangle::new(*x, *y, *width, *height).normalized()),
            Shape::Freehand { points, .. } => {
                let first = points.first()?;
                let (mut min_x, mut min_y, mut max_x, mut max_y) =
                    (first.x, first.y, first.x, first.y);
                for p in points {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                Some(Rectangle::new(min_x, min_y, max_x - min_x, max_y - min_y))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_keeps_signed_extent() {
        let mut shape = Shape::begin(ShapeKind::Rect, Point::new(10.0, 10.0), Color::RED);
        shape.extend(Point::new(30.0, 30.0));
        shape.extend(Point::new(50.0, 5.0));

        assert_eq!(
            shape,
            Shape::Rect {
                x: 10.0,
                y: 10.0,
                width: 40.0,
                height: -5.0,
                color: Color::RED,
            }
        );
    }

    #[test]
    fn test_rect_bounds_match_regardless_of_drag_direction() {
        let mut a = Shape::begin(ShapeKind::Rect, Point::new(10.0, 10.0), Color::RED);
        a.extend(Point::new(50.0, 5.0));
        let mut b = Shape::begin(ShapeKind::Rect, Point::new(10.0, 5.0), Color::RED);
        b.extend(Point::new(50.0, 10.0));

        assert_eq!(a.bounds(), b.bounds());
        assert_eq!(a.bounds(), Some(Rectangle::new(10.0, 5.0, 40.0, 5.0)));
    }

    #[test]
    fn test_freehand_appends_every_point() {
        let mut shape = Shape::begin(ShapeKind::Freehand, Point::new(0.0, 0.0), Color::RED);
        shape.extend(Point::new(0.0, 0.0));
        shape.extend(Point::new(0.5, 0.0));
        shape.extend(Point::new(3.0, 4.0));

        match &shape {
            Shape::Freehand { points, .. } => assert_eq!(points.len(), 4),
            other => panic!("Expected freehand shape, got {:?}", other),
        }
        assert_eq!(shape.bounds(), Some(Rectangle::new(0.0, 0.0, 3.0, 4.0)));
    }

    #[test]
    fn test_drawing_mode_toggle_semantics() {
        assert_eq!(DrawingMode::None.toggled(DrawingMode::Rect), DrawingMode::Rect);
        assert_eq!(DrawingMode::Rect.toggled(DrawingMode::Rect), DrawingMode::None);
        assert_eq!(DrawingMode::Rect.toggled(DrawingMode::Free), DrawingMode::Free);
        assert_eq!(DrawingMode::Free.toggled(DrawingMode::None), DrawingMode::None);
    }

    #[test]
    fn test_shape_kind_for_mode() {
        assert_eq!(DrawingMode::None.shape_kind(), None);
        assert_eq!(DrawingMode::Rect.shape_kind(), Some(ShapeKind::Rect));
        assert_eq!(DrawingMode::Free.shape_kind(), Some(ShapeKind::Freehand));
    }
}
