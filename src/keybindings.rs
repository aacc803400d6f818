//! Keyboard shortcuts for the toolbar command set.

use dualview_ui::KeyCode;
use serde::{Deserialize, Serialize};

use crate::model::DrawingMode;

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Rotate,
    Reset,
    ToggleCompare,
    DrawingMode(DrawingMode),
    ClearAnnotations,
    ZoomIn,
    ZoomOut,
    /// Discard the shape currently being drawn.
    CancelShape,
}

/// Keybinding configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub rotate: KeyCode,
    pub reset: KeyCode,
    pub toggle_compare: KeyCode,
    pub rect_mode: KeyCode,
    pub free_mode: KeyCode,
    pub clear_annotations: KeyCode,
    pub zoom_in: KeyCode,
    pub zoom_out: KeyCode,
    pub cancel_shape: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate: KeyCode::R,
            reset: KeyCode::Key0,
            toggle_compare: KeyCode::C,
            rect_mode: KeyCode::B,
            free_mode: KeyCode::F,
            clear_annotations: KeyCode::X,
            zoom_in: KeyCode::Equal,
            zoom_out: KeyCode::Minus,
            cancel_shape: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action bound to a key press, if any.
    pub fn action_for_key(&self, key: KeyCode) -> Option<KeyAction> {
        let action = if key == self.rotate {
            KeyAction::Rotate
        } else if key == self.reset {
            KeyAction::Reset
        } else if key == self.toggle_compare {
            KeyAction::ToggleCompare
        } else if key == self.rect_mode {
            KeyAction::DrawingMode(DrawingMode::Rect)
        } else if key == self.free_mode {
            KeyAction::DrawingMode(DrawingMode::Free)
        } else if key == self.clear_annotations {
            KeyAction::ClearAnnotations
        } else if key == self.zoom_in {
            KeyAction::ZoomIn
        } else if key == self.zoom_out {
            KeyAction::ZoomOut
        } else if key == self.cancel_shape {
            KeyAction::CancelShape
        } else {
            return None;
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let kb = KeyBindings::new();
        assert_eq!(kb.action_for_key(KeyCode::R), Some(KeyAction::Rotate));
        assert_eq!(
            kb.action_for_key(KeyCode::B),
            Some(KeyAction::DrawingMode(DrawingMode::Rect))
        );
        assert_eq!(kb.action_for_key(KeyCode::Escape), Some(KeyAction::CancelShape));
        assert_eq!(kb.action_for_key(KeyCode::H), None);
    }

    #[test]
    fn test_rebinding_changes_lookup() {
        let mut kb = KeyBindings::new();
        kb.rotate = KeyCode::H;
        assert_eq!(kb.action_for_key(KeyCode::H), Some(KeyAction::Rotate));
        assert_eq!(kb.action_for_key(KeyCode::R), None);
    }
}
