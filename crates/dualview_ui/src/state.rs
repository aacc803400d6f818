//! Drag interaction states shared by the viewer gestures

/// Pan drag interaction state for an image viewer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanDragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging with last pointer position (client space)
    Dragging { last_pos: (f32, f32) },
}

impl PanDragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, PanDragState::Dragging { .. })
    }

    /// Start dragging with the given position
    pub fn start_drag(&mut self, pos: (f32, f32)) {
        *self = PanDragState::Dragging { last_pos: pos };
    }

    /// Advance the drag to `pos`, returning the delta from the previous position.
    ///
    /// Returns `None` when not dragging.
    pub fn advance(&mut self, pos: (f32, f32)) -> Option<(f32, f32)> {
        match self {
            PanDragState::Dragging { last_pos } => {
                let delta = (pos.0 - last_pos.0, pos.1 - last_pos.1);
                *last_pos = pos;
                Some(delta)
            }
            PanDragState::Idle => None,
        }
    }

    /// Stop dragging
    pub fn stop_drag(&mut self) {
        *self = PanDragState::Idle;
    }
}

/// Slider handle drag interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderDragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging the slider handle
    Dragging,
}

impl SliderDragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, SliderDragState::Dragging)
    }

    /// Start dragging
    pub fn start_drag(&mut self) {
        *self = SliderDragState::Dragging;
    }

    /// Stop dragging
    pub fn stop_drag(&mut self) {
        *self = SliderDragState::Idle;
    }
}
