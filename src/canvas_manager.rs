//! Annotation overlay surfaces.
//!
//! Owns the three drawing surfaces (main, compare-left, compare-right),
//! keeps each backing store sized to its bound image element's layout box,
//! and repaints from scratch: redraw is a pure function of the shape set.

use dualview_ui::{DrawSurface, Rectangle};

use crate::annotation::AnnotationSet;
use crate::error::{Result, ViewerError};
use crate::model::{Shape, SurfaceId};

/// The three surfaces handed to the manager at construction.
#[derive(Debug, Clone)]
pub struct SurfaceSet<S> {
    pub main: S,
    pub compare_left: S,
    pub compare_right: S,
}

#[derive(Debug)]
struct ManagedSurface<S> {
    surface: S,
    visible: bool,
    /// Set while the bound element has no layout box; retried on the next
    /// layout-affecting event.
    pending_resize: bool,
}

impl<S> ManagedSurface<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            visible: false,
            pending_resize: true,
        }
    }
}

/// Sizing and repainting for the annotation surfaces.
#[derive(Debug)]
pub struct AnnotationCanvasManager<S: DrawSurface> {
    surfaces: [ManagedSurface<S>; 3],
    line_width: f32,
}

impl<S: DrawSurface> AnnotationCanvasManager<S> {
    /// Every surface starts hidden and waiting for its first resize.
    pub fn new(set: SurfaceSet<S>, line_width: f32) -> Self {
        Self {
            surfaces: [
                ManagedSurface::new(set.main),
                ManagedSurface::new(set.compare_left),
                ManagedSurface::new(set.compare_right),
            ],
            line_width,
        }
    }

    pub fn surface(&self, id: SurfaceId) -> &S {
        &self.surfaces[id.index()].surface
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> &mut S {
        &mut self.surfaces[id.index()].surface
    }

    pub fn layout_box(&self, id: SurfaceId) -> Rectangle {
        self.surface(id).layout_box()
    }

    pub fn is_visible(&self, id: SurfaceId) -> bool {
        self.surfaces[id.index()].visible
    }

    pub fn set_visible(&mut self, id: SurfaceId, visible: bool) {
        let managed = &mut self.surfaces[id.index()];
        managed.visible = visible;
        managed.surface.set_visible(visible);
    }

    /// Flag a surface for re-measurement on the next opportunity.
    pub fn mark_pending(&mut self, id: SurfaceId) {
        self.surfaces[id.index()].pending_resize = true;
    }

    pub fn is_pending(&self, id: SurfaceId) -> bool {
        self.surfaces[id.index()].pending_resize
    }

    /// Visible surfaces still waiting for a successful resize.
    pub fn pending_visible(&self) -> Vec<SurfaceId> {
        SurfaceId::ALL
            .into_iter()
            .filter(|id| self.is_visible(*id) && self.is_pending(*id))
            .collect()
    }

    /// Match the backing store to the bound element's layout box.
    ///
    /// Returns `Ok(true)` when the size changed; the backing store was
    /// cleared and the surface needs a full repaint. Fails with
    /// `SurfaceNotReady` (and stays pending) while the element has no box.
    pub fn resize(&mut self, id: SurfaceId) -> Result<bool> {
        let managed = &mut self.surfaces[id.index()];
        let layout = managed.surface.layout_box();
        if layout.is_empty() {
            managed.pending_resize = true;
            return Err(ViewerError::SurfaceNotReady { surface: id });
        }
        managed.pending_resize = false;

        let target = (layout.width.round() as u32, layout.height.round() as u32);
        if managed.surface.pixel_size() == target {
            return Ok(false);
        }

        log::debug!(
            "Resizing {} surface {:?} -> {:?}",
            id.name(),
            managed.surface.pixel_size(),
            target
        );
        managed.surface.set_pixel_size(target.0, target.1);
        Ok(true)
    }

    /// Clear and repaint a surface: committed shapes in insertion order,
    /// then the in-progress shape on top.
    pub fn redraw(
        &mut self,
        id: SurfaceId,
        committed: &AnnotationSet,
        in_progress: Option<&Shape>,
    ) -> Result<()> {
        let line_width = self.line_width;
        let surface = &mut self.surfaces[id.index()].surface;
        let (w, h) = surface.pixel_size();
        if w == 0 || h == 0 {
            // A zero-sized canvas silently drops everything drawn into it.
            return Err(ViewerError::SurfaceNotReady { surface: id });
        }

        surface.clear();
        for shape in committed.iter() {
            draw_shape(surface, shape, line_width);
        }
        if let Some(shape) = in_progress {
            draw_shape(surface, shape, line_width);
        }
        log::trace!(
            "Redrew {} surface: {} shapes{}",
            id.name(),
            committed.len(),
            if in_progress.is_some() { " + in-progress" } else { "" }
        );
        Ok(())
    }

    /// Give every surface the same transform as the image layer.
    pub fn apply_transform(&mut self, transform: &str) {
        for managed in &mut self.surfaces {
            managed.surface.set_transform(transform);
        }
    }
}

fn draw_shape<S: DrawSurface>(surface: &mut S, shape: &Shape, line_width: f32) {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            color,
        } => surface.stroke_rect(Rectangle::new(*x, *y, *width, *height), *color, line_width),
        Shape::Freehand { points, color } => surface.stroke_polyline(points, *color, line_width),
    }
}
