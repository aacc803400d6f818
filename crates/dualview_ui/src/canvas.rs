//! `DrawSurface` backed by an HTML canvas element (wasm32 only).

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::{Color, DrawSurface, Point, Rectangle, SurfaceError};

/// An overlay canvas bound to the image element it annotates.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bound: HtmlElement,
}

impl CanvasSurface {
    /// Wrap `canvas`, sizing it after `bound`'s layout box.
    pub fn new(canvas: HtmlCanvasElement, bound: HtmlElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::ContextFailed(format!("{:?}", e)))?
            .ok_or(SurfaceError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::WrongContextType)?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");

        Ok(Self { canvas, ctx, bound })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_style(&self, name: &str, value: &str) {
        if let Err(e) = self.canvas.style().set_property(name, value) {
            log::warn!("Failed to set canvas style {}: {:?}", name, e);
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn layout_box(&self) -> Rectangle {
        // Offset metrics ignore CSS transforms, so this is the untransformed box.
        let (left, top) = match self.bound.parent_element() {
            Some(parent) => {
                let rect = parent.get_bounding_client_rect();
                (rect.left() as f32, rect.top() as f32)
            }
            None => (0.0, 0.0),
        };
        Rectangle::new(
            left + self.bound.offset_left() as f32,
            top + self.bound.offset_top() as f32,
            self.bound.offset_width() as f32,
            self.bound.offset_height() as f32,
        )
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.set_style("width", &format!("{}px", width));
        self.set_style("height", &format!("{}px", height));
        self.set_style("left", &format!("{}px", self.bound.offset_left()));
        self.set_style("top", &format!("{}px", self.bound.offset_top()));
        // Context state resets along with the backing store.
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn set_visible(&mut self, visible: bool) {
        self.set_style("display", if visible { "block" } else { "none" });
    }

    fn set_transform(&mut self, transform: &str) {
        self.set_style("transform", transform);
    }

    fn clear(&mut self) {
        let (w, h) = self.pixel_size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, rect: Rectangle, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        self.ctx.rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        self.ctx.stroke();
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, line_width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }
}
