//! The viewport coordinator.
//!
//! Owns the shared [`Transform2D`], the view and drawing modes, and routes
//! every input to the gesture controller, the annotation store and the
//! canvas manager. Image elements and overlay surfaces always receive the
//! same transform string in the same frame.
//!
//! Work is batched per display refresh: inputs only mark state dirty and ask
//! for a frame ([`Notification::FrameRequested`]); [`ViewportCoordinator::animation_frame`]
//! then applies the transform once and repaints the stale surfaces.
//!
//! No input method returns an error. Out-of-range values are clamped,
//! surfaces without a layout box are retried on the next layout-affecting
//! event, and input that does not fit the current mode is logged and ignored.

use dualview_ui::{Color, DrawSurface, KeyCode, Point, Rectangle, Size, WheelInput};

use crate::annotation::AnnotationStore;
use crate::canvas_manager::AnnotationCanvasManager;
use crate::config::{ViewerConfig, ZoomAnchor};
use crate::error::ViewerError;
use crate::frame::FrameScheduler;
use crate::gesture::{GestureOutput, GestureState, PointerGestureController, PointerTarget};
use crate::keybindings::{KeyAction, KeyBindings};
use crate::message::{Command, ViewerMessage};
use crate::model::{DrawingMode, Slot, SurfaceId, ViewMode};
use crate::notification::{Notification, RevealDescriptor};
use crate::transform::{Transform2D, ZoomDirection};

/// Top-level orchestrator for the dual image viewer.
pub struct ViewportCoordinator<S: DrawSurface> {
    transform: Transform2D,
    view_mode: ViewMode,
    drawing_mode: DrawingMode,
    store: AnnotationStore,
    canvases: AnnotationCanvasManager<S>,
    gestures: PointerGestureController,
    frames: FrameScheduler,

    reveal_percent: f32,
    default_reveal_percent: f32,
    /// Compare viewer box as last reported by the host.
    reveal_container: Option<Rectangle>,
    annotation_color: Color,
    zoom_anchor: ZoomAnchor,
    keybindings: KeyBindings,

    /// Natural size of each slot's image, once loaded.
    images: [Option<Size>; 2],
    /// Surface the in-progress shape is drawn on.
    drawing_surface: Option<SurfaceId>,

    transform_dirty: bool,
    repaint: [bool; 3],
    notifications: Vec<Notification>,
}

impl<S: DrawSurface> ViewportCoordinator<S> {
    /// Build a coordinator around injected surfaces and store.
    ///
    /// Starts in single view with only the main surface visible.
    pub fn new(
        canvases: AnnotationCanvasManager<S>,
        store: AnnotationStore,
        config: &ViewerConfig,
    ) -> Self {
        let prefs = &config.preferences;
        let mut coordinator = Self {
            transform: Transform2D::identity(),
            view_mode: ViewMode::Single,
            drawing_mode: DrawingMode::None,
            store,
            canvases,
            gestures: PointerGestureController::new(),
            frames: FrameScheduler::new(),
            reveal_percent: prefs.default_reveal_percent,
            default_reveal_percent: prefs.default_reveal_percent,
            reveal_container: None,
            annotation_color: prefs.annotation_color,
            zoom_anchor: prefs.zoom_anchor,
            keybindings: config.keybindings.clone(),
            images: [None, None],
            drawing_surface: None,
            transform_dirty: false,
            repaint: [false; 3],
            notifications: Vec::new(),
        };

        coordinator.sync_visibility(true);
        coordinator.mark_transform_dirty();
        coordinator
    }

    // === Accessors ===

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.drawing_mode
    }

    pub fn active_slot(&self) -> Slot {
        self.store.active_slot()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn canvases(&self) -> &AnnotationCanvasManager<S> {
        &self.canvases
    }

    /// Direct access to a surface backend, e.g. to update its layout.
    pub fn surface_mut(&mut self, id: SurfaceId) -> &mut S {
        self.canvases.surface_mut(id)
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    pub fn reveal(&self) -> RevealDescriptor {
        RevealDescriptor::new(self.reveal_percent)
    }

    pub fn annotation_color(&self) -> Color {
        self.annotation_color
    }

    pub fn image_size(&self, slot: Slot) -> Option<Size> {
        self.images[slot.index()]
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// Take every notification emitted since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // === Message dispatch ===

    /// Feed one message to the coordinator.
    pub fn update(&mut self, message: ViewerMessage) {
        match message {
            ViewerMessage::PointerDown { x, y, target } => self.pointer_down(Point::new(x, y), target),
            ViewerMessage::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            ViewerMessage::PointerUp => self.pointer_up(),
            ViewerMessage::PointerLeave => self.pointer_leave(),
            ViewerMessage::Wheel {
                delta_y,
                x,
                y,
                target,
            } => self.wheel(WheelInput::new(delta_y, x, y), target),
            ViewerMessage::ImageLoaded {
                slot,
                width,
                height,
            } => self.image_loaded(slot, Size::new(width, height)),
            ViewerMessage::Resize => self.resize(),
            ViewerMessage::Blur => self.blur(),
            ViewerMessage::RevealContainer {
                x,
                y,
                width,
                height,
            } => self.set_reveal_container(Rectangle::new(x, y, width, height)),
            ViewerMessage::KeyPressed { key } => self.key_pressed(key),
            ViewerMessage::Frame => self.animation_frame(),
            ViewerMessage::Command(command) => self.command(command),
        }
    }

    /// Run a toolbar command.
    pub fn command(&mut self, command: Command) {
        match command {
            Command::ToggleCompare => self.toggle_compare_mode(),
            Command::Reset => self.reset(),
            Command::Rotate => self.rotate(),
            Command::SetBrightness { pct } => self.set_brightness(pct),
            Command::SetDrawingMode { mode } => self.set_drawing_mode(mode),
            Command::ClearAnnotations => self.clear_annotations(),
            Command::SetAnnotationColor { color } => self.set_annotation_color(color),
        }
    }

    // === Pointer input ===

    pub fn pointer_down(&mut self, position: Point, target: PointerTarget) {
        match target {
            PointerTarget::SliderHandle if self.view_mode != ViewMode::Compare => {
                self.ignore(ViewerError::invalid_transition(
                    "slider drag outside compare mode",
                ));
                return;
            }
            PointerTarget::Surface(id) if !self.canvases.is_visible(id) => {
                self.ignore(ViewerError::invalid_transition(format!(
                    "pointer down on hidden {} surface",
                    id.name()
                )));
                return;
            }
            _ => {}
        }

        // A second press without a release means the pointer-up was missed.
        if self.store.is_drawing() {
            self.finish_shape(true);
        }

        self.gestures.pointer_down(position, target, self.drawing_mode);

        if let (PointerTarget::Surface(id), Some(kind)) = (target, self.drawing_mode.shape_kind()) {
            let slot = id.slot();
            self.store.select(slot);
            let local = self.to_local(id, position);
            self.store.begin_shape(kind, local, self.annotation_color);
            self.drawing_surface = Some(id);
            log::debug!(
                "Drawing {:?} on {} for {} at ({:.1}, {:.1})",
                kind,
                id.name(),
                slot,
                local.x,
                local.y
            );
            self.mark_repaint(id);
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        if let Some(id) = self.drawing_surface {
            let local = self.to_local(id, position);
            if self.store.extend_shape(local) {
                self.mark_repaint(id);
            }
            return;
        }

        let container = self.reveal_container();
        match self.gestures.pointer_move(position, container) {
            GestureOutput::Pan { dx, dy } => {
                self.transform.apply_pan(dx, dy);
                self.mark_transform_dirty();
            }
            GestureOutput::Reveal(percent) => self.set_reveal(percent),
            GestureOutput::None => {}
        }
    }

    /// Ends drags and commits the shape being drawn.
    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
        self.finish_shape(true);
    }

    /// Same as pointer-up: the gesture is over when the pointer leaves.
    pub fn pointer_leave(&mut self) {
        self.gestures.pointer_leave();
        self.finish_shape(true);
    }

    /// Window lost focus: end drags and drop the unfinished shape.
    pub fn blur(&mut self) {
        self.gestures.blur();
        self.finish_shape(false);
    }

    pub fn wheel(&mut self, input: WheelInput, target: SurfaceId) {
        let Some(direction) = self.gestures.wheel(input.delta_y) else {
            return;
        };
        if !self.canvases.is_visible(target) {
            self.ignore(ViewerError::invalid_transition(format!(
                "wheel on hidden {} surface",
                target.name()
            )));
            return;
        }

        let layout = self.canvases.layout_box(target);
        match self.zoom_anchor {
            ZoomAnchor::Cursor if !layout.is_empty() => {
                let cursor = input.position - layout.center();
                self.transform.apply_zoom_at(direction, cursor);
            }
            _ => {
                self.transform.apply_zoom(direction);
            }
        }
        log::trace!("Zoom {:?} -> scale {:.3}", direction, self.transform.scale());
        self.mark_transform_dirty();
    }

    // === Host events ===

    /// An image finished decoding for `slot`.
    ///
    /// Resets the transform and re-measures the slot's surfaces; a surface
    /// whose element is not laid out yet is retried later.
    pub fn image_loaded(&mut self, slot: Slot, natural: Size) {
        log::info!(
            "Image loaded into {}: {}x{}",
            slot,
            natural.width,
            natural.height
        );
        self.images[slot.index()] = Some(natural);

        self.transform.reset();
        self.mark_transform_dirty();

        for &id in slot.surfaces() {
            self.canvases.mark_pending(id);
            if self.canvases.is_visible(id) {
                self.measure(id);
            }
            self.mark_repaint(id);
        }
    }

    /// Window resized or fullscreen toggled: re-measure visible surfaces.
    pub fn resize(&mut self) {
        for id in SurfaceId::ALL {
            self.canvases.mark_pending(id);
            if self.canvases.is_visible(id) {
                self.measure(id);
            }
        }
    }

    /// Record the compare viewer's box. Slider drags measure the reveal
    /// percentage against it.
    pub fn set_reveal_container(&mut self, container: Rectangle) {
        log::debug!(
            "Reveal container at ({:.1}, {:.1}) {:.1}x{:.1}",
            container.x,
            container.y,
            container.width,
            container.height
        );
        self.reveal_container = Some(container);
    }

    /// Flush the pending repaint, if any.
    pub fn animation_frame(&mut self) {
        if !self.frames.is_pending() {
            return;
        }
        self.retry_pending();
        self.frames.begin_frame();

        if self.transform_dirty {
            self.transform_dirty = false;
            let descriptor = self.transform.render_descriptor();
            self.canvases.apply_transform(&descriptor.transform);
            self.notifications
                .push(Notification::TransformChanged { descriptor });
        }

        for id in SurfaceId::ALL {
            if !self.repaint[id.index()] || !self.canvases.is_visible(id) {
                continue;
            }
            let slot = id.slot();
            match self
                .canvases
                .redraw(id, self.store.set(slot), self.store.in_progress_for(slot))
            {
                Ok(()) => self.repaint[id.index()] = false,
                Err(e) => log::debug!("Repaint deferred: {}", e),
            }
        }
    }

    pub fn key_pressed(&mut self, key: KeyCode) {
        let Some(action) = self.keybindings.action_for_key(key) else {
            log::trace!("Unbound key {:?}", key);
            return;
        };
        log::debug!("Key {:?} -> {:?}", key, action);
        match action {
            KeyAction::Rotate => self.rotate(),
            KeyAction::Reset => self.reset(),
            KeyAction::ToggleCompare => self.toggle_compare_mode(),
            KeyAction::DrawingMode(mode) => self.set_drawing_mode(mode),
            KeyAction::ClearAnnotations => self.clear_annotations(),
            KeyAction::ZoomIn => self.zoom(ZoomDirection::In),
            KeyAction::ZoomOut => self.zoom(ZoomDirection::Out),
            KeyAction::CancelShape => self.cancel_shape(),
        }
    }

    // === Commands ===

    /// Flip between single and compare view.
    ///
    /// Entering compare resets the reveal slider. Leaving it makes slot 1
    /// active again, whichever side was last drawn on.
    pub fn toggle_compare_mode(&mut self) {
        self.finish_shape(false);
        self.gestures.blur();

        self.view_mode = self.view_mode.toggled();
        log::info!("View mode: {:?}", self.view_mode);

        match self.view_mode {
            ViewMode::Compare => self.set_reveal(self.default_reveal_percent),
            ViewMode::Single => self.store.select(Slot::One),
        }

        self.sync_visibility(false);
        self.notifications.push(Notification::ModeChanged {
            mode: self.view_mode,
        });
    }

    pub fn reset(&mut self) {
        self.transform.reset();
        self.mark_transform_dirty();
    }

    pub fn rotate(&mut self) {
        self.transform.rotate90();
        log::debug!("Rotation: {}deg", self.transform.rotation_deg());
        self.mark_transform_dirty();
    }

    pub fn set_brightness(&mut self, pct: i32) {
        self.transform.set_brightness(pct);
        self.mark_transform_dirty();
    }

    /// Select a drawing mode; requesting the current one turns drawing off.
    ///
    /// An unfinished shape is discarded first.
    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        self.finish_shape(false);
        self.drawing_mode = self.drawing_mode.toggled(mode);
        log::info!("Drawing mode: {}", self.drawing_mode.name());
    }

    /// Empty the active slot's annotations. The other slot keeps its own.
    pub fn clear_annotations(&mut self) {
        let slot = self.store.active_slot();
        let removed = self.store.clear_active();
        log::info!("Cleared {} shapes from {}", removed, slot);
        self.notifications.push(Notification::AnnotationsChanged { slot, count: 0 });
        self.mark_slot_repaint(slot);
    }

    /// Color for shapes started from now on; committed shapes keep theirs.
    pub fn set_annotation_color(&mut self, color: Color) {
        log::debug!("Annotation color: {}", color);
        self.annotation_color = color;
    }

    /// Drop the shape being drawn without committing it.
    pub fn cancel_shape(&mut self) {
        self.finish_shape(false);
    }

    // === Internals ===

    fn zoom(&mut self, direction: ZoomDirection) {
        self.transform.apply_zoom(direction);
        self.mark_transform_dirty();
    }

    /// Box the slider percentage is measured against. The compare-right
    /// surface stands in until the host reports the container.
    fn reveal_container(&self) -> Rectangle {
        self.reveal_container
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.canvases.layout_box(SurfaceId::CompareRight))
    }

    fn set_reveal(&mut self, percent: f32) {
        self.reveal_percent = percent.clamp(0.0, 100.0);
        self.notifications.push(Notification::RevealChanged {
            reveal: self.reveal(),
        });
    }

    fn to_local(&self, id: SurfaceId, client: Point) -> Point {
        self.transform
            .screen_to_local(client, self.canvases.layout_box(id))
    }

    /// Commit or discard the in-progress shape, if there is one.
    fn finish_shape(&mut self, commit: bool) {
        self.drawing_surface = None;
        let slot = if commit {
            self.store.commit_shape()
        } else {
            self.store.discard_shape()
        };
        let Some(slot) = slot else {
            return;
        };
        if commit {
            self.notifications.push(Notification::AnnotationsChanged {
                slot,
                count: self.store.set(slot).len(),
            });
        } else {
            log::debug!("Discarded in-progress shape for {}", slot);
        }
        self.mark_slot_repaint(slot);
    }

    /// Show the surfaces belonging to the current mode and hide the rest.
    fn sync_visibility(&mut self, initial: bool) {
        for id in SurfaceId::ALL {
            let visible = id.is_visible_in(self.view_mode);
            if initial || self.canvases.is_visible(id) != visible {
                self.canvases.set_visible(id, visible);
                self.notifications
                    .push(Notification::SurfaceVisibility { surface: id, visible });
            }
            if visible {
                self.canvases.mark_pending(id);
                self.measure(id);
                self.mark_repaint(id);
            }
        }
    }

    /// Re-measure one surface; repaint it if its backing store changed.
    fn measure(&mut self, id: SurfaceId) {
        match self.canvases.resize(id) {
            Ok(true) => self.mark_repaint(id),
            Ok(false) => {}
            Err(e) => log::warn!("Deferring resize: {}", e),
        }
    }

    fn retry_pending(&mut self) {
        for id in self.canvases.pending_visible() {
            self.measure(id);
        }
    }

    fn mark_transform_dirty(&mut self) {
        self.transform_dirty = true;
        self.request_frame();
    }

    fn mark_repaint(&mut self, id: SurfaceId) {
        if !self.repaint[id.index()] {
            self.repaint[id.index()] = true;
            self.notifications
                .push(Notification::SurfaceNeedsRepaint { surface: id });
        }
        self.request_frame();
    }

    fn mark_slot_repaint(&mut self, slot: Slot) {
        for &id in slot.surfaces() {
            self.mark_repaint(id);
        }
    }

    fn request_frame(&mut self) {
        if self.frames.request() {
            self.notifications.push(Notification::FrameRequested);
        }
    }

    fn ignore(&self, error: ViewerError) {
        log::warn!("Ignored input: {}", error);
    }
}

impl<S: DrawSurface> std::fmt::Debug for ViewportCoordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportCoordinator")
            .field("transform", &self.transform)
            .field("view_mode", &self.view_mode)
            .field("drawing_mode", &self.drawing_mode)
            .field("active_slot", &self.store.active_slot())
            .field("reveal_percent", &self.reveal_percent)
            .finish_non_exhaustive()
    }
}
