//! Raw input events: wheel ticks and keyboard codes.

use serde::{Deserialize, Serialize};

use crate::Point;

/// A raw wheel event. Positive `delta_y` scrolls down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_y: f32,
    pub position: Point,
}

impl WheelInput {
    pub fn new(delta_y: f32, x: f32, y: f32) -> Self {
        Self {
            delta_y,
            position: Point::new(x, y),
        }
    }
}

/// Keyboard keys the viewer can bind shortcuts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    R,
    S,
    X,
    Key0,
    Key1,
    Key2,
    Minus,
    Equal,
    Escape,
    Space,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string to a key.
    pub fn from_dom_code(code: &str) -> Option<KeyCode> {
        let key = match code {
            "KeyA" => KeyCode::A,
            "KeyB" => KeyCode::B,
            "KeyC" => KeyCode::C,
            "KeyD" => KeyCode::D,
            "KeyE" => KeyCode::E,
            "KeyF" => KeyCode::F,
            "KeyG" => KeyCode::G,
            "KeyH" => KeyCode::H,
            "KeyR" => KeyCode::R,
            "KeyS" => KeyCode::S,
            "KeyX" => KeyCode::X,
            "Digit0" | "Numpad0" => KeyCode::Key0,
            "Digit1" | "Numpad1" => KeyCode::Key1,
            "Digit2" | "Numpad2" => KeyCode::Key2,
            "Minus" | "NumpadSubtract" => KeyCode::Minus,
            "Equal" | "NumpadAdd" => KeyCode::Equal,
            "Escape" => KeyCode::Escape,
            "Space" => KeyCode::Space,
            _ => return None,
        };
        Some(key)
    }
}
