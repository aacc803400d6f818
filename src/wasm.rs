//! Browser binding.
//!
//! Wires DOM events to a [`ViewportCoordinator`] over canvas surfaces and
//! applies its notifications to the page: image transforms and filters, the
//! reveal clip, and container visibility. Repaints run inside
//! `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use dualview_ui::{CanvasSurface, Color, KeyCode, Point, Rectangle, Size, WheelInput};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent,
    PointerEvent, WheelEvent,
};

use crate::annotation::AnnotationStore;
use crate::canvas_manager::{AnnotationCanvasManager, SurfaceSet};
use crate::config::ViewerConfig;
use crate::coordinator::ViewportCoordinator;
use crate::error::ViewerError;
use crate::gesture::PointerTarget;
use crate::message::ViewerMessage;
use crate::model::{DrawingMode, Slot, SurfaceId, ViewMode};
use crate::notification::Notification;

/// Element ids the page must provide.
mod ids {
    pub const IMAGES: [&str; 3] = ["mainImage", "leftImage", "rightImage"];
    pub const CANVASES: [&str; 3] = ["mainCanvas", "leftCanvas", "rightCanvas"];
    pub const SINGLE_VIEW: &str = "imageViewer";
    pub const COMPARE_VIEW: &str = "compareViewer";
    pub const SLIDER: &str = "slider";
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

struct Host {
    coordinator: ViewportCoordinator<CanvasSurface>,
    /// Indexed like [`SurfaceId::index`].
    images: [HtmlImageElement; 3],
    slider: HtmlElement,
    single_view: HtmlElement,
    compare_view: HtmlElement,
    listener: Option<js_sys::Function>,
}

type SharedHost = Rc<RefCell<Host>>;

impl Host {
    /// Apply the DOM side of a notification.
    fn apply(&self, notification: &Notification) -> Result<(), JsValue> {
        match notification {
            Notification::TransformChanged { descriptor } => {
                for image in &self.images {
                    let style = image.style();
                    style.set_property("transform", &descriptor.transform)?;
                    style.set_property("filter", &descriptor.filter)?;
                }
            }
            Notification::RevealChanged { reveal } => {
                self.images[SurfaceId::CompareRight.index()]
                    .style()
                    .set_property("clip-path", &reveal.clip_path)?;
                self.coordinator
                    .canvases()
                    .surface(SurfaceId::CompareRight)
                    .canvas()
                    .style()
                    .set_property("clip-path", &reveal.clip_path)?;
                self.slider.style().set_property("left", &reveal.handle_left)?;
            }
            Notification::ModeChanged { mode } => {
                let compare = *mode == ViewMode::Compare;
                self.single_view
                    .class_list()
                    .toggle_with_force("hidden", compare)?;
                self.compare_view
                    .class_list()
                    .toggle_with_force("hidden", !compare)?;
            }
            Notification::FrameRequested
            | Notification::SurfaceNeedsRepaint { .. }
            | Notification::AnnotationsChanged { .. }
            | Notification::SurfaceVisibility { .. } => {}
        }
        Ok(())
    }
}

/// Drain the coordinator, update the page and forward everything to the
/// listener. The host is released before the listener runs, so it may call
/// back into the viewer.
fn pump(host: &SharedHost) {
    let (notifications, listener) = {
        let mut h = host.borrow_mut();
        let notifications = h.coordinator.drain_notifications();
        for notification in &notifications {
            if let Err(e) = h.apply(notification) {
                log::warn!("Failed to apply {:?}: {:?}", notification, e);
            }
        }
        (notifications, h.listener.clone())
    };

    for notification in &notifications {
        if *notification == Notification::FrameRequested {
            schedule_frame(host);
        }
        let Some(listener) = &listener else {
            continue;
        };
        match serde_json::to_string(notification) {
            Ok(json) => {
                if let Err(e) = listener.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Notification listener threw: {:?}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize notification: {}", e),
        }
    }
}

fn schedule_frame(host: &SharedHost) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let host = host.clone();
    let callback = Closure::once_into_js(move || {
        host.borrow_mut().coordinator.animation_frame();
        pump(&host);
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {:?}", e);
    }
}

/// Run `f` against the coordinator, then flush its notifications.
fn with_coordinator(host: &SharedHost, f: impl FnOnce(&mut ViewportCoordinator<CanvasSurface>)) {
    f(&mut host.borrow_mut().coordinator);
    pump(host);
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

/// Register a typed event listener that lives as long as the page.
fn listen<E, F>(target: &EventTarget, event: &str, host: &SharedHost, handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: Fn(&SharedHost, E) + 'static,
{
    let host = host.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(&host, event);
        }
    });
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn client_point(event: &PointerEvent) -> Point {
    Point::new(event.client_x() as f32, event.client_y() as f32)
}

/// Client-space box of an untransformed container.
fn bounding_box(element: &HtmlElement) -> Rectangle {
    let rect = element.get_bounding_client_rect();
    Rectangle::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

fn attach_listeners(host: &SharedHost, document: &Document) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    for (id, canvas_id) in SurfaceId::ALL.into_iter().zip(ids::CANVASES) {
        let canvas: HtmlCanvasElement = element(document, canvas_id)?;
        listen(&canvas, "pointerdown", host, move |host, event: PointerEvent| {
            event.prevent_default();
            let position = client_point(&event);
            with_coordinator(host, |c| c.pointer_down(position, PointerTarget::Surface(id)));
        })?;
        listen(&canvas, "wheel", host, move |host, event: WheelEvent| {
            event.prevent_default();
            let input = WheelInput::new(
                event.delta_y() as f32,
                event.client_x() as f32,
                event.client_y() as f32,
            );
            with_coordinator(host, |c| c.wheel(input, id));
        })?;
    }

    let slider: HtmlElement = element(document, ids::SLIDER)?;
    listen(&slider, "pointerdown", host, |host, event: PointerEvent| {
        event.prevent_default();
        event.stop_propagation();
        let position = client_point(&event);
        let container = bounding_box(&host.borrow().compare_view);
        with_coordinator(host, |c| {
            c.set_reveal_container(container);
            c.pointer_down(position, PointerTarget::SliderHandle);
        });
    })?;

    listen(document, "pointermove", host, |host, event: PointerEvent| {
        let position = client_point(&event);
        with_coordinator(host, |c| c.pointer_move(position));
    })?;
    listen(document, "pointerup", host, |host, _: PointerEvent| {
        with_coordinator(host, |c| c.pointer_up());
    })?;
    if let Some(root) = document.document_element() {
        listen(&root, "pointerleave", host, |host, _: PointerEvent| {
            with_coordinator(host, |c| c.pointer_leave());
        })?;
    }

    listen(&window, "resize", host, |host, _: Event| {
        with_coordinator(host, |c| c.resize());
    })?;
    listen(&window, "blur", host, |host, _: Event| {
        with_coordinator(host, |c| c.blur());
    })?;
    listen(&window, "keydown", host, |host, event: KeyboardEvent| {
        if event.ctrl_key() || event.meta_key() || event.alt_key() {
            return;
        }
        if let Some(key) = KeyCode::from_dom_code(&event.code()) {
            with_coordinator(host, |c| c.key_pressed(key));
        }
    })?;
    Ok(())
}

fn to_js(error: ViewerError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// The viewer as seen from JavaScript. Toolbar buttons call its methods;
/// pointer, wheel, key and window events are wired up by the constructor.
#[wasm_bindgen]
pub struct WebViewer {
    host: SharedHost,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebViewer, JsValue> {
        let config = ViewerConfig::load_from_local_storage().unwrap_or_default();
        if let Err(e) = console_log::init_with_level(config.preferences.log_level.to_level()) {
            web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
        }

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let images: [HtmlImageElement; 3] = [
            element(&document, ids::IMAGES[0])?,
            element(&document, ids::IMAGES[1])?,
            element(&document, ids::IMAGES[2])?,
        ];
        let surface = |index: usize| -> Result<CanvasSurface, JsValue> {
            let canvas: HtmlCanvasElement = element(&document, ids::CANVASES[index])?;
            CanvasSurface::new(canvas, images[index].clone().into())
                .map_err(|e| to_js(ViewerError::from(e)))
        };
        let canvases = AnnotationCanvasManager::new(
            SurfaceSet {
                main: surface(SurfaceId::Main.index())?,
                compare_left: surface(SurfaceId::CompareLeft.index())?,
                compare_right: surface(SurfaceId::CompareRight.index())?,
            },
            config.preferences.line_width,
        );

        let host = Rc::new(RefCell::new(Host {
            coordinator: ViewportCoordinator::new(canvases, AnnotationStore::new(), &config),
            slider: element(&document, ids::SLIDER)?,
            single_view: element(&document, ids::SINGLE_VIEW)?,
            compare_view: element(&document, ids::COMPARE_VIEW)?,
            images,
            listener: None,
        }));

        attach_listeners(&host, &document)?;
        log::info!("dualview viewer attached");
        pump(&host);
        Ok(WebViewer { host })
    }

    /// Receive every notification as a JSON string.
    pub fn set_listener(&self, listener: js_sys::Function) {
        self.host.borrow_mut().listener = Some(listener);
    }

    /// Show `url` in `slot` (1 or 2). Resolves once the image has decoded.
    pub fn load_image(&self, slot: u8, url: String) -> Result<js_sys::Promise, JsValue> {
        let slot = Slot::try_from(slot).map_err(|e| JsValue::from_str(&e))?;
        let host = self.host.clone();
        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let images: Vec<HtmlImageElement> = {
                let h = host.borrow();
                slot.surfaces()
                    .iter()
                    .map(|id| h.images[id.index()].clone())
                    .collect()
            };
            for image in &images {
                image.set_src(&url);
            }
            let Some(first) = images.first() else {
                return Err(JsValue::from_str("slot has no image element"));
            };
            JsFuture::from(first.decode()).await?;

            let natural = Size::new(first.natural_width() as f32, first.natural_height() as f32);
            with_coordinator(&host, |c| c.image_loaded(slot, natural));
            Ok(JsValue::UNDEFINED)
        }))
    }

    /// Feed a JSON-encoded message, as produced by session recordings.
    pub fn dispatch(&self, json: &str) -> Result<(), JsValue> {
        let message: ViewerMessage =
            serde_json::from_str(json).map_err(|e| to_js(ViewerError::from(e)))?;
        with_coordinator(&self.host, |c| c.update(message));
        Ok(())
    }

    pub fn toggle_compare(&self) {
        with_coordinator(&self.host, |c| c.toggle_compare_mode());
    }

    pub fn reset(&self) {
        with_coordinator(&self.host, |c| c.reset());
    }

    pub fn rotate(&self) {
        with_coordinator(&self.host, |c| c.rotate());
    }

    pub fn set_brightness(&self, pct: i32) {
        with_coordinator(&self.host, |c| c.set_brightness(pct));
    }

    /// `"none"`, `"rect"` or `"free"`.
    pub fn set_drawing_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: DrawingMode = serde_json::from_value(serde_json::Value::String(mode.to_string()))
            .map_err(|e| to_js(ViewerError::from(e)))?;
        with_coordinator(&self.host, |c| c.set_drawing_mode(mode));
        Ok(())
    }

    pub fn clear_annotations(&self) {
        with_coordinator(&self.host, |c| c.clear_annotations());
    }

    /// CSS hex color, e.g. `"#ff0000"`.
    pub fn set_annotation_color(&self, color: &str) -> Result<(), JsValue> {
        let color = Color::from_hex(color).map_err(|e| to_js(ViewerError::from(e)))?;
        with_coordinator(&self.host, |c| c.set_annotation_color(color));
        Ok(())
    }

    pub fn view_mode(&self) -> String {
        match self.host.borrow().coordinator.view_mode() {
            ViewMode::Single => "single".to_string(),
            ViewMode::Compare => "compare".to_string(),
        }
    }

    pub fn annotation_count(&self, slot: u8) -> Result<usize, JsValue> {
        let slot = Slot::try_from(slot).map_err(|e| JsValue::from_str(&e))?;
        Ok(self.host.borrow().coordinator.store().set(slot).len())
    }
}
