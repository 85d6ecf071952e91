//! Integration tests for switchview-core.
//!
//! These tests verify the public API works correctly end-to-end.

use std::time::Duration;
use switchview_core::{
    AnimationEvent, AnimationListener, Animator, Canvas, ClickBehavior, Color, Constraints,
    DefaultHandler, DisplayMetrics, DrawCommand, Easing, Event, FrameClock, Interpolate, Point,
    PointerId, PointerType, Rect, RecordingCanvas, Size, Transform2D,
};

// =============================================================================
// Color Integration Tests
// =============================================================================

#[test]
fn test_color_argb_hex_roundtrip() {
    let c = Color::from_argb_hex("#80185bff").expect("valid hex");
    assert_eq!(c.to_argb(), 0x8018_5bff);
}

#[test]
fn test_color_lerp_gradient_hits_endpoints() {
    let off = Color::from_argb_hex("#b2d9ff").expect("valid hex");
    let on = Color::from_argb_hex("#185bff").expect("valid hex");
    let steps: Vec<Color> = (0..=10).map(|i| off.lerp(&on, i as f32 / 10.0)).collect();

    assert_eq!(steps[0], off);
    assert!(steps[10].channel_distance(&on) <= 1);
    // blue channel is 0xff at both ends
    assert!(steps.iter().all(|c| (c.b - 1.0).abs() < 0.001));
}

// =============================================================================
// Constraint Integration Tests
// =============================================================================

#[test]
fn test_tight_constraints_are_exact() {
    let c = Constraints::tight(Size::new(38.0, 22.0));
    assert_eq!(c.exact_width(), Some(38.0));
    assert_eq!(c.exact_height(), Some(22.0));
}

#[test]
fn test_loose_constraints_are_not_exact() {
    let c = Constraints::loose(Size::new(200.0, 100.0));
    assert_eq!(c.exact_width(), None);
    assert_eq!(c.exact_height(), None);
}

// =============================================================================
// Animation Integration Tests
// =============================================================================

struct Offset {
    from: f32,
    to: f32,
    value: f32,
    ended: bool,
}

impl AnimationListener for Offset {
    fn on_animation_tick(&mut self, progress: f64) {
        self.value = f32::interpolate(&self.from, &self.to, progress);
    }

    fn on_animation_end(&mut self) {
        self.ended = true;
    }
}

#[test]
fn test_animator_drives_listener_to_target() {
    let mut listener = Offset {
        from: 0.0,
        to: 16.0,
        value: 0.0,
        ended: false,
    };
    let mut animator =
        Animator::new(Duration::from_millis(300)).with_easing(Easing::AccelerateDecelerate);
    let mut clock = FrameClock::sixty_hz();

    animator.start().expect("idle").dispatch(&mut listener);
    let mut frames = 0;
    while animator.is_running() {
        for event in animator.advance(clock.tick()) {
            event.dispatch(&mut listener);
        }
        frames += 1;
    }

    assert!(listener.ended);
    assert_eq!(listener.value, 16.0);
    assert_eq!(frames, 18);
}

#[test]
fn test_end_follows_final_tick() {
    let mut animator = Animator::new(Duration::from_millis(32));
    animator.start();
    let mut all = Vec::new();
    for _ in 0..3 {
        all.extend(animator.advance(Duration::from_millis(16)));
    }
    assert_eq!(
        all,
        vec![
            AnimationEvent::Tick(0.5),
            AnimationEvent::Tick(1.0),
            AnimationEvent::End,
        ]
    );
}

// =============================================================================
// Input Integration Tests
// =============================================================================

#[test]
fn test_pointer_release_is_click() {
    let mut behavior = ClickBehavior::new();
    let down = Event::PointerDown {
        pointer_id: PointerId::new(1),
        pointer_type: PointerType::Pen,
        position: Point::new(5.0, 5.0),
        is_primary: true,
    };
    let up = Event::PointerUp {
        pointer_id: PointerId::new(1),
        pointer_type: PointerType::Pen,
        position: Point::new(6.0, 5.0),
        is_primary: true,
    };
    assert!(behavior.handle_default(&down));
    assert!(behavior.handle_default(&up));
    assert!(up.is_release());
    assert_eq!(behavior.clicks(), 1);
}

// =============================================================================
// Rendering Integration Tests
// =============================================================================

#[test]
fn test_recording_canvas_at_density() {
    let metrics = DisplayMetrics::new(2.0);
    let w = metrics.dp_to_px(38.0) as f32;
    let h = metrics.dp_to_px(22.0) as f32;

    let mut canvas = RecordingCanvas::new();
    canvas.push_transform(Transform2D::translate(10.0, 10.0));
    canvas.fill_rounded_rect(Rect::new(0.0, 0.0, w, h), h / 2.0, Color::BLACK);
    canvas.pop_transform();

    assert_eq!(
        canvas.commands(),
        &[DrawCommand::rounded_rect(
            Rect::new(10.0, 10.0, 76.0, 44.0),
            22.0,
            Color::BLACK
        )]
    );
}
