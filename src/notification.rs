//! Outbound notifications from the coordinator to the host.

use serde::Serialize;

use crate::model::{Slot, SurfaceId, ViewMode};
use crate::transform::RenderDescriptor;

/// Position of the compare-mode reveal slider, ready to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealDescriptor {
    /// Slider position in [0, 100].
    pub percent: f32,
    /// Clip path for the right compare image: `inset(0 0 0 {p}%)`.
    pub clip_path: String,
    /// CSS `left` for the slider handle: `{p}%`.
    pub handle_left: String,
}

impl RevealDescriptor {
    pub fn new(percent: f32) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        Self {
            percent,
            clip_path: format!("inset(0 0 0 {}%)", percent),
            handle_left: format!("{}%", percent),
        }
    }
}

/// Something the host has to act on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Schedule one animation frame and call back into the coordinator.
    /// Emitted once per pending repaint, however many updates it coalesces.
    FrameRequested,
    /// Apply to the three image elements. Overlays were already updated.
    TransformChanged { descriptor: RenderDescriptor },
    /// The surface's content is stale; it is repainted on the next frame.
    SurfaceNeedsRepaint { surface: SurfaceId },
    /// A slot's committed shape set changed.
    AnnotationsChanged { slot: Slot, count: usize },
    RevealChanged { reveal: RevealDescriptor },
    ModeChanged { mode: ViewMode },
    /// Show or hide the image element a surface is bound to.
    SurfaceVisibility { surface: SurfaceId, visible: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_descriptor_strings() {
        let reveal = RevealDescriptor::new(50.0);
        assert_eq!(reveal.clip_path, "inset(0 0 0 50%)");
        assert_eq!(reveal.handle_left, "50%");

        let reveal = RevealDescriptor::new(12.5);
        assert_eq!(reveal.clip_path, "inset(0 0 0 12.5%)");
        assert_eq!(RevealDescriptor::new(130.0).percent, 100.0);
    }

    #[test]
    fn test_notification_json_shape() {
        let json = serde_json::to_value(Notification::AnnotationsChanged {
            slot: Slot::Two,
            count: 3,
        })
        .expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "type": "annotations_changed", "slot": 2, "count": 3 })
        );

        let json = serde_json::to_value(Notification::SurfaceVisibility {
            surface: SurfaceId::CompareLeft,
            visible: true,
        })
        .expect("serializes");
        assert_eq!(json["surface"], "compare_left");
    }
}
