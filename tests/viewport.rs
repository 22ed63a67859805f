//! Tests for the pan/zoom transform and the recenter animation.
mod common;
use area_canvas::prelude::*;
use area_canvas::viewport::{MAX_SCALE, MIN_SCALE, RecenterAnimation, ease};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn test_world_screen_round_trip() {
    let vp = Viewport::new(Point::new(100.0, 50.0), 2.0);
    let screen = vp.world_to_screen(Point::new(10.0, -5.0));
    assert_eq!(screen, Point::new(120.0, 40.0));
    assert_eq!(vp.screen_to_world(screen), Point::new(10.0, -5.0));
}

#[test]
fn test_pan_translates_offset_in_screen_space() {
    let mut vp = Viewport::new(Point::ZERO, 2.0);
    vp.pan(Point::new(30.0, -10.0));
    assert_eq!(vp.offset, Point::new(30.0, -10.0));
    assert_eq!(vp.scale, 2.0);
}

#[test]
fn test_zoom_steps_and_direction() {
    let mut vp = Viewport::default();
    vp.zoom_at(Point::ZERO, -120.0);
    assert_close(vp.scale, 1.08);
    vp.zoom_at(Point::ZERO, 120.0);
    assert_close(vp.scale, 1.08 * 0.92);
    vp.zoom_at(Point::ZERO, 0.0);
    assert_close(vp.scale, 1.08 * 0.92);
}

#[test]
fn test_zoom_keeps_point_under_cursor() {
    let mut vp = Viewport::new(Point::new(40.0, 25.0), 1.3);
    let cursor = Point::new(321.0, 187.0);
    let before = vp.screen_to_world(cursor);
    for _ in 0..5 {
        vp.zoom_at(cursor, -1.0);
    }
    let after = vp.screen_to_world(cursor);
    assert_close(before.x, after.x);
    assert_close(before.y, after.y);
}

#[test]
fn test_zoom_is_clamped() {
    let mut vp = Viewport::default();
    for _ in 0..100 {
        vp.zoom_at(Point::new(10.0, 10.0), -1.0);
    }
    assert_eq!(vp.scale, MAX_SCALE);
    for _ in 0..100 {
        vp.zoom_at(Point::new(10.0, 10.0), 1.0);
    }
    assert_eq!(vp.scale, MIN_SCALE);
}

#[test]
fn test_fit_bounds_centres_and_scales() {
    let bounds = Rect::new(0.0, 0.0, 400.0, 200.0);
    let size = ViewportSize::new(1000.0, 600.0);
    let vp = Viewport::fit_bounds(bounds, size, 100.0);

    // min(800 / 400, 400 / 200) = 2
    assert_close(vp.scale, 2.0);
    let centre = vp.world_to_screen(bounds.center());
    assert_eq!(centre, size.center());
}

#[test]
fn test_fit_bounds_scale_limits() {
    let size = ViewportSize::new(1000.0, 1000.0);
    let tiny = Viewport::fit_bounds(Rect::new(0.0, 0.0, 10.0, 10.0), size, 0.0);
    assert_eq!(tiny.scale, 3.0);
    let huge = Viewport::fit_bounds(Rect::new(0.0, 0.0, 100_000.0, 10.0), size, 0.0);
    assert_eq!(huge.scale, 0.2);
}

#[test]
fn test_ease_curve() {
    assert_close(ease(0.0), 0.0);
    assert_close(ease(0.5), 0.5);
    assert_close(ease(1.0), 1.0);
    assert_close(ease(2.0), 1.0);
    assert!(ease(0.25) < 0.25);
    assert!(ease(0.75) > 0.75);
}

#[test]
fn test_animation_interpolates_and_finishes() {
    let from = Viewport::new(Point::ZERO, 1.0);
    let to = Viewport::new(Point::new(200.0, -100.0), 2.0);
    let anim = RecenterAnimation::new(from, to, 1000.0, 400.0);

    let start = anim.sample(1000.0);
    assert_eq!(start.viewport, from);
    assert!(!start.done);

    let mid = anim.sample(1200.0);
    assert_close(mid.viewport.scale, 1.5);
    assert_close(mid.viewport.offset.x, 100.0);
    assert!(!mid.done);

    let end = anim.sample(1400.0);
    assert!(end.done);
    assert_close(end.viewport.scale, 2.0);
    assert_close(end.viewport.offset.y, -100.0);
}

#[test]
fn test_controller_runs_recenter_to_completion() {
    let config = EditorConfig::default();
    let mut controller = ViewportController::default();
    let bounds = Some(Rect::new(-100.0, -50.0, 200.0, 100.0));
    let size = ViewportSize::new(800.0, 600.0);

    assert!(controller.recenter(0.0, bounds, size, &config));
    assert!(controller.is_animating());

    let mut frames = 0;
    let mut now = 0.0;
    while controller.on_frame(now) {
        now += 16.0;
        frames += 1;
        assert!(frames < 1000);
    }
    assert!(!controller.is_animating());

    let target = Viewport::fit_bounds(bounds.unwrap(), size, config.recenter_padding);
    assert_close(controller.viewport().scale, target.scale);
    assert_close(controller.viewport().offset.x, target.offset.x);
}

#[test]
fn test_recenter_without_nodes_is_noop() {
    let mut controller = ViewportController::default();
    let canvas = Canvas::default();
    let started = controller.recenter(
        0.0,
        canvas.bounds(),
        ViewportSize::new(800.0, 600.0),
        &EditorConfig::default(),
    );
    assert!(!started);
    assert!(!controller.on_frame(16.0));
}

#[test]
fn test_gesture_cancels_running_animation() {
    let mut controller = ViewportController::default();
    controller.recenter(
        0.0,
        Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        ViewportSize::new(800.0, 600.0),
        &EditorConfig::default(),
    );
    controller.on_frame(100.0);
    let before = *controller.viewport();

    controller.pan(Point::new(5.0, 5.0));
    assert!(!controller.is_animating());
    assert!(!controller.on_frame(200.0));
    assert_eq!(controller.viewport().offset, before.offset + Point::new(5.0, 5.0));
}
