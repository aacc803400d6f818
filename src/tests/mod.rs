//! Cross-component scenarios driven through the coordinator.
//!
//! Every scenario uses `RecordingSurface` backends, so what the overlays
//! would have painted can be inspected command by command.

mod compare_mode_tests;

use dualview_ui::{Point, RecordingSurface, Rectangle};

use crate::annotation::AnnotationStore;
use crate::canvas_manager::{AnnotationCanvasManager, SurfaceSet};
use crate::config::ViewerConfig;
use crate::coordinator::ViewportCoordinator;
use crate::gesture::PointerTarget;
use crate::model::{DrawingMode, SurfaceId};
use crate::notification::Notification;
use crate::transform::RenderDescriptor;

pub(crate) const EPSILON: f32 = 0.0001;

pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Layout shared by every surface in the default fixture.
pub(crate) fn layout() -> Rectangle {
    Rectangle::new(0.0, 0.0, 200.0, 100.0)
}

pub(crate) type Viewer = ViewportCoordinator<RecordingSurface>;

/// Build a viewer whose three bound elements have the given layout boxes.
pub(crate) fn viewer_with(layouts: [Rectangle; 3], config: &ViewerConfig) -> Viewer {
    let canvases = AnnotationCanvasManager::new(
        SurfaceSet {
            main: RecordingSurface::with_layout(layouts[0]),
            compare_left: RecordingSurface::with_layout(layouts[1]),
            compare_right: RecordingSurface::with_layout(layouts[2]),
        },
        config.preferences.line_width,
    );
    ViewportCoordinator::new(canvases, AnnotationStore::new(), config)
}

pub(crate) fn viewer() -> Viewer {
    viewer_with([layout(); 3], &ViewerConfig::new())
}

/// Draw one complete shape on `surface`, switching to `mode` if needed.
pub(crate) fn draw(viewer: &mut Viewer, surface: SurfaceId, mode: DrawingMode, points: &[(f32, f32)]) {
    if viewer.drawing_mode() != mode {
        viewer.set_drawing_mode(mode);
    }
    let (first, rest) = points.split_first().expect("at least one point");
    viewer.pointer_down(Point::new(first.0, first.1), PointerTarget::Surface(surface));
    for p in rest {
        viewer.pointer_move(Point::new(p.0, p.1));
    }
    viewer.pointer_up();
}

/// Pan drag through `points` with drawing turned off.
pub(crate) fn drag(viewer: &mut Viewer, surface: SurfaceId, points: &[(f32, f32)]) {
    if viewer.drawing_mode() != DrawingMode::None {
        viewer.set_drawing_mode(viewer.drawing_mode());
    }
    let (first, rest) = points.split_first().expect("at least one point");
    viewer.pointer_down(Point::new(first.0, first.1), PointerTarget::Surface(surface));
    for p in rest {
        viewer.pointer_move(Point::new(p.0, p.1));
    }
    viewer.pointer_up();
}

/// Transform descriptors announced in `notifications`, in order.
pub(crate) fn transform_changes(notifications: &[Notification]) -> Vec<RenderDescriptor> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::TransformChanged { descriptor } => Some(descriptor.clone()),
            _ => None,
        })
        .collect()
}
