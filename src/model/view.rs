//! Slots, view modes and surface identities.

use serde::{Deserialize, Serialize};

/// Logical identity of one of the two images, independent of view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Slot {
    /// Left/main image.
    One,
    /// Right image.
    Two,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }

    /// Surfaces that display this slot's image.
    pub fn surfaces(self) -> &'static [SurfaceId] {
        match self {
            Slot::One => &[SurfaceId::Main, SurfaceId::CompareLeft],
            Slot::Two => &[SurfaceId::CompareRight],
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(format!("slot must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.number()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot {}", self.number())
    }
}

/// Single image view or side-by-side compare with a reveal slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Single,
    Compare,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Single => ViewMode::Compare,
            ViewMode::Compare => ViewMode::Single,
        }
    }
}

/// One drawing region bound to one displayed image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceId {
    Main,
    CompareLeft,
    CompareRight,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 3] = [
        SurfaceId::Main,
        SurfaceId::CompareLeft,
        SurfaceId::CompareRight,
    ];

    pub fn index(self) -> usize {
        match self {
            SurfaceId::Main => 0,
            SurfaceId::CompareLeft => 1,
            SurfaceId::CompareRight => 2,
        }
    }

    /// The slot whose annotations this surface shows.
    pub fn slot(self) -> Slot {
        match self {
            SurfaceId::Main | SurfaceId::CompareLeft => Slot::One,
            SurfaceId::CompareRight => Slot::Two,
        }
    }

    pub fn is_visible_in(self, mode: ViewMode) -> bool {
        match self {
            SurfaceId::Main => mode == ViewMode::Single,
            SurfaceId::CompareLeft | SurfaceId::CompareRight => mode == ViewMode::Compare,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SurfaceId::Main => "main",
            SurfaceId::CompareLeft => "compare_left",
            SurfaceId::CompareRight => "compare_right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_slot_binding() {
        assert_eq!(SurfaceId::Main.slot(), Slot::One);
        assert_eq!(SurfaceId::CompareLeft.slot(), Slot::One);
        assert_eq!(SurfaceId::CompareRight.slot(), Slot::Two);
        for slot in [Slot::One, Slot::Two] {
            for surface in slot.surfaces() {
                assert_eq!(surface.slot(), slot);
            }
        }
    }

    #[test]
    fn test_visibility_per_mode() {
        assert!(SurfaceId::Main.is_visible_in(ViewMode::Single));
        assert!(!SurfaceId::Main.is_visible_in(ViewMode::Compare));
        assert!(SurfaceId::CompareRight.is_visible_in(ViewMode::Compare));
        assert!(!SurfaceId::CompareLeft.is_visible_in(ViewMode::Single));
    }

    #[test]
    fn test_slot_from_number() {
        assert_eq!(Slot::try_from(1), Ok(Slot::One));
        assert_eq!(Slot::try_from(2), Ok(Slot::Two));
        assert!(Slot::try_from(3).is_err());
    }
}
