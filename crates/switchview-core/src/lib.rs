//! Core types and traits for the SwitchView toggle widget.
//!
//! This crate provides the platform seam a widget is written against:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with ARGB interop
//! - Layout constraints: [`Constraints`] and [`DisplayMetrics`]
//! - Input: [`Event`] and the host's [`DefaultHandler`]
//! - Rendering: the [`Canvas`] trait and [`RecordingCanvas`]
//! - Animation: [`Animator`], [`AnimationListener`], [`FrameClock`]

pub mod animation;
mod behavior;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod metrics;
pub mod widget;

pub use animation::{
    AnimationEvent, AnimationListener, Animator, Easing, FrameClock, Interpolate,
};
pub use behavior::{ClickBehavior, DefaultHandler, Passthrough};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, Transform2D};
pub use event::{Event, MouseButton, PointerAction, PointerId, PointerType, TouchId};
pub use geometry::{Point, Rect, Size};
pub use metrics::DisplayMetrics;
pub use widget::{AccessibleRole, Canvas, LayoutResult, TypeId, Widget};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // ==========================================================================
    // CROSS-MODULE TESTS
    // ==========================================================================

    #[test]
    fn test_recorded_commands_serialize() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rounded_rect(Rect::new(0.0, 0.0, 38.0, 22.0), 11.0, Color::BLACK);
        canvas.fill_circle(Point::new(11.0, 11.0), 5.0, Color::WHITE);

        let json = serde_json::to_string(canvas.commands()).unwrap();
        let back: Vec<DrawCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, canvas.commands());
    }

    #[test]
    fn test_animator_drives_color_interpolation() {
        let off = Color::from_argb(0xffb2_d9ff);
        let on = Color::from_argb(0xff18_5bff);
        let mut animator = Animator::new(Duration::from_millis(300));
        let mut clock = FrameClock::new(Duration::from_millis(16));
        animator.start();

        let mut last = off;
        while animator.is_running() {
            for event in animator.advance(clock.tick()) {
                if let AnimationEvent::Tick(p) = event {
                    last = Color::interpolate(&off, &on, p);
                }
            }
        }
        assert!(last.channel_distance(&on) <= 1);
    }

    #[test]
    fn test_localized_event_hits_widget_space() {
        let bounds = Rect::new(100.0, 50.0, 38.0, 22.0);
        let e = Event::MouseUp {
            position: Point::new(110.0, 60.0),
            button: MouseButton::Left,
        };
        let local = e.localized(bounds.origin());
        assert_eq!(local.position(), Some(Point::new(10.0, 10.0)));
        assert!(Rect::from_size(bounds.size()).contains_point(&Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_exact_constraints_from_metrics() {
        let m = DisplayMetrics::new(2.0);
        let w = m.dp_to_px(38.0) as f32;
        let c = Constraints::unbounded().with_exact_width(w);
        assert_eq!(c.exact_width(), Some(76.0));
        assert_eq!(c.exact_height(), None);
    }
}
