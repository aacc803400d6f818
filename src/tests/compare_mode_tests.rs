//! View mode switching and per-slot annotation routing.

use dualview_ui::{DrawSurface, Point, Rectangle};

use super::{draw, layout, viewer, viewer_with};
use crate::config::ViewerConfig;
use crate::gesture::PointerTarget;
use crate::model::{DrawingMode, ShapeKind, Slot, SurfaceId, ViewMode};
use crate::notification::Notification;

#[test]
fn test_toggle_round_trip_restores_single_view_and_slot_one() {
    let mut v = viewer();
    v.toggle_compare_mode();
    assert_eq!(v.view_mode(), ViewMode::Compare);
    assert!(!v.canvases().is_visible(SurfaceId::Main));
    assert!(v.canvases().is_visible(SurfaceId::CompareLeft));
    assert!(v.canvases().is_visible(SurfaceId::CompareRight));

    draw(&mut v, SurfaceId::CompareRight, DrawingMode::Free, &[(1.0, 1.0), (2.0, 3.0)]);
    assert_eq!(v.active_slot(), Slot::Two);

    v.toggle_compare_mode();
    assert_eq!(v.view_mode(), ViewMode::Single);
    assert_eq!(v.active_slot(), Slot::One);
    assert!(v.canvases().is_visible(SurfaceId::Main));
    assert!(v.canvases().surface(SurfaceId::Main).is_visible());
    assert!(!v.canvases().surface(SurfaceId::CompareLeft).is_visible());
    assert!(!v.canvases().surface(SurfaceId::CompareRight).is_visible());

    // Slot 2 keeps its shape even though it is no longer active.
    assert_eq!(v.store().set(Slot::Two).len(), 1);
}

#[test]
fn test_entering_compare_resets_reveal_to_half() {
    let mut v = viewer();
    v.toggle_compare_mode();
    v.pointer_down(Point::new(10.0, 0.0), PointerTarget::SliderHandle);
    v.pointer_move(Point::new(20.0, 0.0));
    v.pointer_up();
    assert_eq!(v.reveal().percent, 10.0);

    v.toggle_compare_mode();
    v.drain_notifications();
    v.toggle_compare_mode();

    assert_eq!(v.reveal().percent, 50.0);
    let notes = v.drain_notifications();
    assert!(notes.iter().any(|n| matches!(
        n,
        Notification::RevealChanged { reveal } if reveal.clip_path == "inset(0 0 0 50%)"
    )));
    assert!(notes.contains(&Notification::ModeChanged {
        mode: ViewMode::Compare
    }));
}

#[test]
fn test_compare_surfaces_route_to_their_slots() {
    let mut v = viewer();
    v.toggle_compare_mode();

    draw(&mut v, SurfaceId::CompareLeft, DrawingMode::Rect, &[(0.0, 0.0), (5.0, 5.0)]);
    assert_eq!(v.active_slot(), Slot::One);
    draw(&mut v, SurfaceId::CompareRight, DrawingMode::Rect, &[(0.0, 0.0), (5.0, 5.0)]);
    draw(&mut v, SurfaceId::CompareRight, DrawingMode::Rect, &[(1.0, 1.0), (6.0, 6.0)]);
    assert_eq!(v.active_slot(), Slot::Two);

    assert_eq!(v.store().set(Slot::One).len(), 1);
    assert_eq!(v.store().set(Slot::Two).len(), 2);

    v.animation_frame();
    assert_eq!(v.canvases().surface(SurfaceId::CompareLeft).frame().len(), 1);
    assert_eq!(v.canvases().surface(SurfaceId::CompareRight).frame().len(), 2);
}

#[test]
fn test_clear_isolates_inactive_slot() {
    let mut v = viewer();
    v.toggle_compare_mode();
    draw(&mut v, SurfaceId::CompareLeft, DrawingMode::Rect, &[(0.0, 0.0), (10.0, 10.0)]);
    draw(&mut v, SurfaceId::CompareLeft, DrawingMode::Rect, &[(20.0, 20.0), (30.0, 25.0)]);
    draw(
        &mut v,
        SurfaceId::CompareRight,
        DrawingMode::Free,
        &[(1.0, 1.0), (2.0, 2.0), (3.0, 5.0)],
    );
    let slot_one_before = v.store().set(Slot::One).clone();

    assert_eq!(v.active_slot(), Slot::Two);
    v.clear_annotations();

    assert_eq!(v.store().set(Slot::Two).len(), 0);
    assert_eq!(v.store().set(Slot::One), &slot_one_before);
    let kinds: Vec<_> = v.store().set(Slot::One).iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![ShapeKind::Rect, ShapeKind::Rect]);

    v.animation_frame();
    assert!(v.canvases().surface(SurfaceId::CompareRight).frame().is_empty());
    assert_eq!(v.canvases().surface(SurfaceId::CompareLeft).frame().len(), 2);
}

#[test]
fn test_slot_one_shapes_follow_into_compare_left() {
    let mut v = viewer();
    draw(&mut v, SurfaceId::Main, DrawingMode::Rect, &[(10.0, 10.0), (50.0, 5.0)]);
    v.animation_frame();
    v.toggle_compare_mode();
    v.animation_frame();

    assert_eq!(
        v.canvases().surface(SurfaceId::CompareLeft).frame(),
        v.canvases().surface(SurfaceId::Main).frame()
    );
    assert!(v.canvases().surface(SurfaceId::CompareRight).frame().is_empty());
}

#[test]
fn test_toggle_discards_in_progress_shape() {
    let mut v = viewer();
    v.set_drawing_mode(DrawingMode::Free);
    v.pointer_down(Point::new(1.0, 1.0), PointerTarget::Surface(SurfaceId::Main));
    v.toggle_compare_mode();
    v.pointer_up();
    assert!(v.store().set(Slot::One).is_empty());
    assert!(!v.store().is_drawing());
}

#[test]
fn test_hidden_surface_input_is_ignored() {
    let mut v = viewer();
    draw(&mut v, SurfaceId::CompareRight, DrawingMode::Rect, &[(0.0, 0.0), (5.0, 5.0)]);
    assert!(v.store().set(Slot::Two).is_empty());
    assert_eq!(v.active_slot(), Slot::One);
}

#[test]
fn test_compare_surfaces_wait_for_layout() {
    let mut v = viewer_with(
        [layout(), Rectangle::default(), Rectangle::default()],
        &ViewerConfig::new(),
    );
    v.toggle_compare_mode();
    v.animation_frame();
    assert!(v.canvases().is_pending(SurfaceId::CompareLeft));
    assert_eq!(v.canvases().surface(SurfaceId::CompareLeft).pixel_size(), (0, 0));

    v.surface_mut(SurfaceId::CompareLeft).set_layout(layout());
    v.surface_mut(SurfaceId::CompareRight).set_layout(layout());
    v.resize();
    v.animation_frame();

    assert!(!v.canvases().is_pending(SurfaceId::CompareLeft));
    assert_eq!(v.canvases().surface(SurfaceId::CompareRight).pixel_size(), (200, 100));
}
