use serde::{Deserialize, Serialize};

/// A 2D size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension has no extent.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A rectangle defined by position and size.
///
/// Layout boxes of displayed elements are expressed in client coordinates,
/// untransformed (the box the element occupies before any CSS transform).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the center point of this rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A box with no area cannot be drawn into.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Normalize a rectangle whose width or height may be negative
    /// (e.g. dragged up-left) into one with non-negative extents.
    pub fn normalized(&self) -> Rectangle {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rectangle::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_negative_extent() {
        let r = Rectangle::new(10.0, 10.0, 40.0, -5.0).normalized();
        assert_eq!(r, Rectangle::new(10.0, 5.0, 40.0, 5.0));

        let r = Rectangle::new(50.0, 10.0, -40.0, -5.0).normalized();
        assert_eq!(r, Rectangle::new(10.0, 5.0, 40.0, 5.0));
    }

    #[test]
    fn test_empty_rectangle() {
        assert!(Rectangle::new(5.0, 5.0, 0.0, 100.0).is_empty());
        assert!(!Rectangle::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_center() {
        let r = Rectangle::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(r.center(), Point::new(200.0, 100.0));
    }
}
