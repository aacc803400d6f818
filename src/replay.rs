//! Session replay.
//!
//! A session is a JSON list of steps: layout changes for the surfaces'
//! bound elements and [`ViewerMessage`]s. Replaying runs them through a
//! coordinator backed by [`RecordingSurface`]s and reports what the host
//! would have been told.

use dualview_ui::{RecordingSurface, Rectangle};
use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationStore;
use crate::canvas_manager::{AnnotationCanvasManager, SurfaceSet};
use crate::config::ViewerConfig;
use crate::coordinator::ViewportCoordinator;
use crate::error::Result;
use crate::message::ViewerMessage;
use crate::model::{Slot, SurfaceId, ViewMode};
use crate::notification::Notification;
use crate::transform::RenderDescriptor;

/// One replay step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStep {
    /// Move or resize the element a surface is bound to.
    Layout {
        surface: SurfaceId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Message(ViewerMessage),
}

/// A recorded session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// Run a display refresh after every message.
    #[serde(default)]
    pub auto_frame: bool,
    pub steps: Vec<SessionStep>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json =
            std::fs::read_to_string(path).map_err(|e| crate::error::ViewerError::io(path, e))?;
        Self::from_json(&json)
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub notifications: Vec<Notification>,
    pub view_mode: ViewMode,
    pub active_slot: Slot,
    /// Committed shapes per slot.
    pub annotation_counts: [usize; 2],
    pub transform: RenderDescriptor,
    /// Frames that actually ran.
    pub frames: usize,
}

/// Replay a session against fresh recording surfaces.
///
/// Surfaces start without a layout box; sessions lay them out with
/// `layout` steps the same way a page would after the images decode.
pub fn replay(session: &Session, config: &ViewerConfig) -> ReplayReport {
    let canvases = AnnotationCanvasManager::new(
        SurfaceSet {
            main: RecordingSurface::new(),
            compare_left: RecordingSurface::new(),
            compare_right: RecordingSurface::new(),
        },
        config.preferences.line_width,
    );
    let mut coordinator = ViewportCoordinator::new(canvases, AnnotationStore::new(), config);
    let mut notifications = Vec::new();
    let mut frames = 0;

    log::info!("Replaying {} steps", session.steps.len());
    for (index, step) in session.steps.iter().enumerate() {
        match step {
            SessionStep::Layout {
                surface,
                x,
                y,
                width,
                height,
            } => {
                log::debug!("Step {}: layout {} {}x{}", index, surface.name(), width, height);
                coordinator
                    .surface_mut(*surface)
                    .set_layout(Rectangle::new(*x, *y, *width, *height));
            }
            SessionStep::Message(message) => {
                log::debug!("Step {}: {:?}", index, message);
                if *message == ViewerMessage::Frame && coordinator.is_frame_pending() {
                    frames += 1;
                }
                coordinator.update(message.clone());
                if session.auto_frame && coordinator.is_frame_pending() {
                    coordinator.animation_frame();
                    frames += 1;
                }
            }
        }
        notifications.extend(coordinator.drain_notifications());
    }

    // Flush whatever the last steps left pending.
    if coordinator.is_frame_pending() {
        coordinator.animation_frame();
        frames += 1;
        notifications.extend(coordinator.drain_notifications());
    }

    ReplayReport {
        notifications,
        view_mode: coordinator.view_mode(),
        active_slot: coordinator.active_slot(),
        annotation_counts: [
            coordinator.store().set(Slot::One).len(),
            coordinator.store().set(Slot::Two).len(),
        ],
        transform: coordinator.transform().render_descriptor(),
        frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r#"{
        "steps": [
            { "layout": { "surface": "main", "x": 0, "y": 0, "width": 400, "height": 300 } },
            { "message": { "type": "image_loaded", "slot": 1, "width": 800, "height": 600 } },
            { "message": { "type": "command", "command": "set_drawing_mode", "mode": "rect" } },
            { "message": { "type": "pointer_down", "x": 10, "y": 10, "target": { "surface": "main" } } },
            { "message": { "type": "pointer_move", "x": 50, "y": 5 } },
            { "message": { "type": "pointer_up" } },
            { "message": { "type": "frame" } },
            { "message": { "type": "command", "command": "set_drawing_mode", "mode": "rect" } },
            { "message": { "type": "pointer_down", "x": 100, "y": 100, "target": { "surface": "main" } } },
            { "message": { "type": "pointer_move", "x": 120, "y": 115 } },
            { "message": { "type": "pointer_move", "x": 130, "y": 90 } },
            { "message": { "type": "pointer_up" } }
        ]
    }"#;

    #[test]
    fn test_replay_session() {
        let session = Session::from_json(SESSION).expect("parses");
        let report = replay(&session, &ViewerConfig::new());

        assert_eq!(report.annotation_counts, [1, 0]);
        assert_eq!(report.view_mode, ViewMode::Single);
        assert_eq!(
            report.transform.transform,
            "translate(30px, -10px) rotate(0deg) scale(1)"
        );
        assert_eq!(report.frames, 2);

        let transform_changes = report
            .notifications
            .iter()
            .filter(|n| matches!(n, Notification::TransformChanged { .. }))
            .count();
        assert_eq!(transform_changes, 2);
    }

    #[test]
    fn test_auto_frame_runs_a_frame_per_message() {
        let mut session = Session::from_json(SESSION).expect("parses");
        session.auto_frame = true;
        let report = replay(&session, &ViewerConfig::new());
        assert_eq!(report.annotation_counts, [1, 0]);
        assert!(report.frames > 2);
    }

    #[test]
    fn test_unknown_step_rejected() {
        assert!(Session::from_json(r#"{ "steps": [ { "teleport": {} } ] }"#).is_err());
    }
}
