//! Pointer and wheel gesture recognition.
//!
//! Turns raw pointer/wheel input into transform deltas and reveal slider
//! positions. Pan and slider drags are independent sessions; wheel input is
//! never queued behind either of them.

use dualview_ui::{PanDragState, Point, Rectangle, SliderDragState};
use serde::{Deserialize, Serialize};

use crate::model::{DrawingMode, SurfaceId};
use crate::transform::ZoomDirection;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// An image viewer / annotation surface.
    Surface(SurfaceId),
    /// The compare-mode reveal slider handle.
    SliderHandle,
}

/// Named states of the gesture controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Panning,
    SliderDragging,
}

/// Result of feeding one pointer move to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    /// Nothing to apply.
    None,
    /// Relative pan since the previous move.
    Pan { dx: f32, dy: f32 },
    /// New reveal slider position, in percent.
    Reveal(f32),
}

/// Gesture state machine for the viewer surfaces and the reveal slider.
#[derive(Debug, Clone, Default)]
pub struct PointerGestureController {
    pan: PanDragState,
    slider: SliderDragState,
}

impl PointerGestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        if self.slider.is_dragging() {
            GestureState::SliderDragging
        } else if self.pan.is_dragging() {
            GestureState::Panning
        } else {
            GestureState::Idle
        }
    }

    /// Handle a pointer-down. Returns true when a drag session started.
    ///
    /// A drawing mode other than `None` suppresses pan initiation; the
    /// pointer-down then belongs to the drawing session instead.
    pub fn pointer_down(
        &mut self,
        position: Point,
        target: PointerTarget,
        drawing: DrawingMode,
    ) -> bool {
        match target {
            PointerTarget::SliderHandle => {
                self.slider.start_drag();
                log::debug!("Gesture: slider drag STARTED at x={:.1}", position.x);
                true
            }
            PointerTarget::Surface(surface) => {
                if drawing != DrawingMode::None {
                    return false;
                }
                self.pan.start_drag((position.x, position.y));
                log::debug!(
                    "Gesture: pan STARTED on {} at ({:.1}, {:.1})",
                    surface.name(),
                    position.x,
                    position.y
                );
                true
            }
        }
    }

    /// Handle a pointer move.
    ///
    /// `reveal_container` is the compare viewer's box, used only while the
    /// slider is being dragged.
    pub fn pointer_move(&mut self, position: Point, reveal_container: Rectangle) -> GestureOutput {
        if self.slider.is_dragging() {
            return match reveal_percentage(position.x, reveal_container) {
                Some(pct) => GestureOutput::Reveal(pct),
                None => GestureOutput::None,
            };
        }

        match self.pan.advance((position.x, position.y)) {
            Some((dx, dy)) => {
                log::trace!("Gesture: pan delta ({:.1}, {:.1})", dx, dy);
                GestureOutput::Pan { dx, dy }
            }
            None => GestureOutput::None,
        }
    }

    /// Pointer-up ends every drag session.
    pub fn pointer_up(&mut self) {
        self.end_all("pointer up");
    }

    /// Leaving the document ends every drag session.
    pub fn pointer_leave(&mut self) {
        self.end_all("pointer leave");
    }

    /// Window blur ends every drag session, guarding against a missed pointer-up.
    pub fn blur(&mut self) {
        self.end_all("window blur");
    }

    /// Wheel input always yields a zoom tick, whatever the drag state.
    pub fn wheel(&self, delta_y: f32) -> Option<ZoomDirection> {
        ZoomDirection::from_wheel_delta(delta_y)
    }

    fn end_all(&mut self, reason: &str) {
        if self.state() != GestureState::Idle {
            log::debug!("Gesture: {:?} ENDED ({})", self.state(), reason);
        }
        self.pan.stop_drag();
        self.slider.stop_drag();
    }
}

/// Reveal slider position for a pointer at client `x`, clamped to [0, 100].
///
/// Returns `None` when the container has no width.
pub fn reveal_percentage(x: f32, container: Rectangle) -> Option<f32> {
    if container.width <= 0.0 {
        return None;
    }
    let pct = (x - container.x) / container.width * 100.0;
    Some(pct.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Rectangle {
        Rectangle::new(0.0, 0.0, 200.0, 100.0)
    }

    fn viewer() -> PointerTarget {
        PointerTarget::Surface(SurfaceId::Main)
    }

    #[test]
    fn test_drag_accumulates_consecutive_deltas() {
        let mut g = PointerGestureController::new();
        assert!(g.pointer_down(Point::new(100.0, 100.0), viewer(), DrawingMode::None));
        assert_eq!(g.state(), GestureState::Panning);

        let mut total = (0.0, 0.0);
        for p in [Point::new(120.0, 115.0), Point::new(130.0, 90.0)] {
            if let GestureOutput::Pan { dx, dy } = g.pointer_move(p, container()) {
                total.0 += dx;
                total.1 += dy;
            }
        }
        assert_eq!(total, (30.0, -10.0));

        g.pointer_up();
        assert_eq!(g.state(), GestureState::Idle);
        assert_eq!(
            g.pointer_move(Point::new(0.0, 0.0), container()),
            GestureOutput::None
        );
    }

    #[test]
    fn test_drawing_mode_suppresses_pan() {
        let mut g = PointerGestureController::new();
        assert!(!g.pointer_down(Point::new(10.0, 10.0), viewer(), DrawingMode::Rect));
        assert_eq!(g.state(), GestureState::Idle);
        assert_eq!(
            g.pointer_move(Point::new(20.0, 20.0), container()),
            GestureOutput::None
        );
    }

    #[test]
    fn test_wheel_ignores_drag_state() {
        let mut g = PointerGestureController::new();
        g.pointer_down(Point::new(0.0, 0.0), viewer(), DrawingMode::None);
        assert_eq!(g.wheel(-1.0), Some(ZoomDirection::In));
        assert_eq!(g.state(), GestureState::Panning);
    }

    #[test]
    fn test_slider_drag_reports_percentage() {
        let mut g = PointerGestureController::new();
        g.pointer_down(Point::new(100.0, 50.0), PointerTarget::SliderHandle, DrawingMode::Free);
        assert_eq!(g.state(), GestureState::SliderDragging);
        assert_eq!(
            g.pointer_move(Point::new(150.0, 50.0), container()),
            GestureOutput::Reveal(75.0)
        );
        g.pointer_leave();
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_blur_ends_stuck_drag() {
        let mut g = PointerGestureController::new();
        g.pointer_down(Point::new(0.0, 0.0), viewer(), DrawingMode::None);
        g.blur();
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_reveal_percentage_clamps() {
        assert_eq!(reveal_percentage(150.0, container()), Some(75.0));
        assert_eq!(reveal_percentage(-20.0, container()), Some(0.0));
        assert_eq!(reveal_percentage(500.0, container()), Some(100.0));
        assert_eq!(
            reveal_percentage(60.0, Rectangle::new(50.0, 0.0, 100.0, 10.0)),
            Some(10.0)
        );
        assert_eq!(reveal_percentage(10.0, Rectangle::default()), None);
    }
}
