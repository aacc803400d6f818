//! The shared viewport transform.
//!
//! One [`Transform2D`] drives every image element and every annotation
//! surface. It is rendered as `translate, rotate, scale` applied about the
//! element's own center, plus a separate brightness filter.

use dualview_ui::{Point, Rectangle};
use serde::Serialize;

use crate::constants::{
    BRIGHTNESS_DEFAULT, BRIGHTNESS_MAX, BRIGHTNESS_MIN, SCALE_MAX, SCALE_MIN, ZOOM_STEP,
};

/// Direction of one discrete wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling down zooms out, scrolling up zooms in.
    ///
    /// A zero delta (pure horizontal scroll) is not a zoom tick.
    pub fn from_wheel_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else {
            None
        }
    }

    /// Scale multiplier for one tick.
    pub fn factor(self) -> f32 {
        match self {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        }
    }
}

/// CSS-equivalent description of a transform, consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderDescriptor {
    /// `translate(..px, ..px) rotate(..deg) scale(..)`, in that order.
    pub transform: String,
    /// `brightness(..%)`; applied to images only, never to overlays.
    pub filter: String,
    /// The same transform as a CSS `matrix(a, b, c, d, e, f)` tuple.
    pub matrix: [f32; 6],
}

/// Pan, zoom, rotation and brightness of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pan_x: f32,
    pan_y: f32,
    scale: f32,
    rotation_deg: u16,
    brightness_pct: u16,
}

impl Transform2D {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
            rotation_deg: 0,
            brightness_pct: BRIGHTNESS_DEFAULT,
        }
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Always one of 0, 90, 180, 270.
    pub fn rotation_deg(&self) -> u16 {
        self.rotation_deg
    }

    pub fn brightness_pct(&self) -> u16 {
        self.brightness_pct
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Zoom one tick about the element center.
    ///
    /// Multiplies first, then clamps, so repeated ticks at a bound are no-ops.
    pub fn apply_zoom(&mut self, direction: ZoomDirection) -> &mut Self {
        self.scale = (self.scale * direction.factor()).clamp(SCALE_MIN, SCALE_MAX);
        self
    }

    /// Zoom one tick keeping the point under the cursor fixed.
    ///
    /// `cursor` is relative to the untransformed element center. Rotation
    /// commutes with uniform scaling, so only pan needs adjusting.
    pub fn apply_zoom_at(&mut self, direction: ZoomDirection, cursor: Point) -> &mut Self {
        let old_scale = self.scale;
        self.apply_zoom(direction);
        let ratio = self.scale / old_scale;

        self.pan_x = cursor.x - (cursor.x - self.pan_x) * ratio;
        self.pan_y = cursor.y - (cursor.y - self.pan_y) * ratio;
        self
    }

    /// Unconditional pan; the image may leave the viewport entirely.
    pub fn apply_pan(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.pan_x += dx;
        self.pan_y += dy;
        self
    }

    pub fn rotate90(&mut self) -> &mut Self {
        self.rotation_deg = (self.rotation_deg + 90) % 360;
        self
    }

    /// Set brightness, clamped to [0, 200].
    pub fn set_brightness(&mut self, pct: i32) -> &mut Self {
        // Clamped into range, so the narrowing is lossless.
        self.brightness_pct = pct.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX) as u16;
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// Map a client-space point onto an element's local pixel space.
    ///
    /// `layout` is the element's untransformed layout box; the transform is
    /// applied about its center.
    pub fn screen_to_local(&self, client: Point, layout: Rectangle) -> Point {
        let center = layout.center();
        let v = Point::new(client.x - center.x - self.pan_x, client.y - center.y - self.pan_y);
        let v = rotate(v, (360 - self.rotation_deg) % 360);
        Point::new(
            v.x / self.scale + layout.width / 2.0,
            v.y / self.scale + layout.height / 2.0,
        )
    }

    /// Inverse of [`Transform2D::screen_to_local`].
    pub fn local_to_screen(&self, local: Point, layout: Rectangle) -> Point {
        let center = layout.center();
        let v = Point::new(
            (local.x - layout.width / 2.0) * self.scale,
            (local.y - layout.height / 2.0) * self.scale,
        );
        let v = rotate(v, self.rotation_deg);
        Point::new(v.x + self.pan_x + center.x, v.y + self.pan_y + center.y)
    }

    /// Produce the CSS transform and filter strings.
    pub fn render_descriptor(&self) -> RenderDescriptor {
        RenderDescriptor {
            transform: format!(
                "translate({}px, {}px) rotate({}deg) scale({})",
                self.pan_x, self.pan_y, self.rotation_deg, self.scale
            ),
            filter: format!("brightness({}%)", self.brightness_pct),
            matrix: self.matrix(),
        }
    }

    /// `translate * rotate * scale` as `[a, b, c, d, e, f]`.
    pub fn matrix(&self) -> [f32; 6] {
        let (sin, cos) = match self.rotation_deg {
            90 => (1.0, 0.0),
            180 => (0.0, -1.0),
            270 => (-1.0, 0.0),
            _ => (0.0, 1.0),
        };
        let s = self.scale;
        [s * cos, s * sin, -s * sin, s * cos, self.pan_x, self.pan_y]
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotate by a multiple of 90 degrees, clockwise on screen (y down).
fn rotate(v: Point, deg: u16) -> Point {
    match deg {
        90 => Point::new(-v.y, v.x),
        180 => Point::new(-v.x, -v.y),
        270 => Point::new(v.y, -v.x),
        _ => v,
    }
}
