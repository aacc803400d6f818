//! Message types for the viewer.
//!
//! Every input the coordinator reacts to is representable as a
//! [`ViewerMessage`], in the Elm architecture style. The browser binding and
//! session replay both feed the coordinator through [`ViewerMessage`]s.

use dualview_ui::{Color, KeyCode};
use serde::{Deserialize, Serialize};

use crate::gesture::PointerTarget;
use crate::model::{DrawingMode, Slot, SurfaceId};

/// Toolbar commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Switch between single and compare view
    ToggleCompare,
    /// Reset pan, zoom, rotation and brightness
    Reset,
    /// Rotate a quarter turn clockwise
    Rotate,
    /// Set brightness in percent (clamped to [0, 200])
    SetBrightness { pct: i32 },
    /// Select a drawing mode; selecting the active mode turns drawing off
    SetDrawingMode { mode: DrawingMode },
    /// Clear the active slot's annotations
    ClearAnnotations,
    /// Stroke color for shapes started from now on
    SetAnnotationColor { color: Color },
}

/// Messages that drive the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerMessage {
    // Pointer input, in client coordinates
    /// Button pressed over a surface or the slider handle
    PointerDown { x: f32, y: f32, target: PointerTarget },
    /// Pointer moved anywhere in the document
    PointerMove { x: f32, y: f32 },
    /// Button released anywhere in the document
    PointerUp,
    /// Pointer left the document
    PointerLeave,
    /// Wheel tick over a surface
    Wheel {
        delta_y: f32,
        x: f32,
        y: f32,
        target: SurfaceId,
    },

    // Host events
    /// An image finished decoding
    ImageLoaded { slot: Slot, width: f32, height: f32 },
    /// Window resized or fullscreen toggled
    Resize,
    /// Window lost focus
    Blur,
    /// The compare viewer's box, in client coordinates
    RevealContainer {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Key pressed
    KeyPressed { key: KeyCode },
    /// Display refresh; flushes the pending repaint
    Frame,

    /// Toolbar command
    Command(Command),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_and_command_messages() {
        let json = r##"[
            { "type": "pointer_down", "x": 100, "y": 100, "target": { "surface": "main" } },
            { "type": "pointer_down", "x": 5, "y": 5, "target": "slider_handle" },
            { "type": "wheel", "delta_y": -120, "x": 0, "y": 0, "target": "compare_right" },
            { "type": "image_loaded", "slot": 2, "width": 640, "height": 480 },
            { "type": "command", "command": "set_drawing_mode", "mode": "rect" },
            { "type": "command", "command": "set_annotation_color", "color": "#00ff00" },
            { "type": "key_pressed", "key": "Escape" },
            { "type": "reveal_container", "x": 20, "y": 0, "width": 400, "height": 300 }
        ]"##;
        let messages: Vec<ViewerMessage> = serde_json::from_str(json).expect("parses");

        assert_eq!(
            messages[0],
            ViewerMessage::PointerDown {
                x: 100.0,
                y: 100.0,
                target: PointerTarget::Surface(SurfaceId::Main)
            }
        );
        assert_eq!(
            messages[1],
            ViewerMessage::PointerDown {
                x: 5.0,
                y: 5.0,
                target: PointerTarget::SliderHandle
            }
        );
        assert!(matches!(
            messages[2],
            ViewerMessage::Wheel {
                target: SurfaceId::CompareRight,
                ..
            }
        ));
        assert!(matches!(
            messages[3],
            ViewerMessage::ImageLoaded { slot: Slot::Two, .. }
        ));
        assert_eq!(
            messages[4],
            ViewerMessage::Command(Command::SetDrawingMode {
                mode: DrawingMode::Rect
            })
        );
        assert_eq!(
            messages[5],
            ViewerMessage::Command(Command::SetAnnotationColor {
                color: Color::rgb(0, 255, 0)
            })
        );
        assert_eq!(
            messages[6],
            ViewerMessage::KeyPressed {
                key: KeyCode::Escape
            }
        );
        assert_eq!(
            messages[7],
            ViewerMessage::RevealContainer {
                x: 20.0,
                y: 0.0,
                width: 400.0,
                height: 300.0
            }
        );
    }

    #[test]
    fn test_invalid_slot_rejected() {
        let err = serde_json::from_str::<ViewerMessage>(
            r#"{ "type": "image_loaded", "slot": 3, "width": 1, "height": 1 }"#,
        );
        assert!(err.is_err());
    }
}
