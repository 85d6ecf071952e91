//! Animated on/off switch widget.
//!
//! A pill-shaped track with a circular knob. A released press slides the
//! knob to the other end while the track color blends to the target state;
//! the checked state flips, and listeners hear about it, only once the
//! slide completes.

use crate::attributes::{keys, AttributeError, AttributeSet};
use std::fmt;
use std::time::Duration;
use switchview_core::{
    widget::{AccessibleRole, LayoutResult},
    AnimationListener, Animator, Canvas, Color, Constraints, DefaultHandler, DisplayMetrics, Easing,
    Event, Interpolate, Point, Rect, Size, TypeId, Widget,
};
use tracing::{debug, trace};

/// Default track width in dp.
pub const DEFAULT_WIDTH_DP: f32 = 38.0;
/// Default track height in dp.
pub const DEFAULT_HEIGHT_DP: f32 = 22.0;
/// Default knob margin in dp.
pub const DEFAULT_MARGIN_DP: f32 = 6.0;
/// Length of a state transition.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Receiver of confirmed state changes.
pub trait CheckChangedListener: Send {
    /// Called once per completed transition with the new state.
    fn on_check_changed(&mut self, is_checked: bool);
}

impl<F: FnMut(bool) + Send> CheckChangedListener for F {
    fn on_check_changed(&mut self, is_checked: bool) {
        self(is_checked);
    }
}

/// Animated toggle switch.
pub struct SwitchView {
    checked: bool,
    animating: bool,
    /// Resolved box size in device pixels
    width: i32,
    height: i32,
    circle_radius: i32,
    circle_margin: i32,
    knob_offset_x: f32,
    track_color: Color,
    // Track color when the running transition started
    from_color: Color,
    progress: f64,
    off_color: Color,
    on_color: Color,
    knob_color: Color,
    default_width: i32,
    default_height: i32,
    animator: Animator,
    listener: Option<Box<dyn CheckChangedListener>>,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl fmt::Debug for SwitchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchView")
            .field("checked", &self.checked)
            .field("animating", &self.animating)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("circle_radius", &self.circle_radius)
            .field("circle_margin", &self.circle_margin)
            .field("knob_offset_x", &self.knob_offset_x)
            .field("track_color", &self.track_color)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for SwitchView {
    fn default() -> Self {
        Self::with_metrics(DisplayMetrics::BASELINE)
    }
}

impl SwitchView {
    /// Create a switch for a baseline-density display.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a switch with defaults scaled to `metrics`.
    #[must_use]
    pub fn with_metrics(metrics: DisplayMetrics) -> Self {
        let width = metrics.dp_to_px(DEFAULT_WIDTH_DP);
        let height = metrics.dp_to_px(DEFAULT_HEIGHT_DP);
        let margin = metrics.dp_to_px(DEFAULT_MARGIN_DP);
        let off_color = Color::from_argb(0xffb2_d9ff);

        Self {
            checked: false,
            animating: false,
            width,
            height,
            // fitted to the height on first measurement
            circle_radius: (height / 2).saturating_add(margin.saturating_mul(2)),
            circle_margin: margin,
            knob_offset_x: 0.0,
            track_color: off_color,
            from_color: off_color,
            progress: 0.0,
            off_color,
            on_color: Color::from_argb(0xff18_5bff),
            knob_color: Color::WHITE,
            default_width: width,
            default_height: height,
            animator: Animator::new(DEFAULT_DURATION),
            listener: None,
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Create a switch configured from an attribute bag.
    ///
    /// Absent keys keep their built-in defaults. The radius default is
    /// derived from the default margin, not from a configured one.
    pub fn from_attributes(
        attrs: &dyn AttributeSet,
        metrics: DisplayMetrics,
    ) -> Result<Self, AttributeError> {
        let mut switch = Self::with_metrics(metrics);

        if let Some(color) = attrs.color(keys::CIRCLE_COLOR)? {
            switch.knob_color = color;
        }
        if let Some(margin) = attrs.dimension_px(keys::CIRCLE_MARGIN, metrics)? {
            switch.circle_margin = margin;
        }
        if let Some(radius) = attrs.dimension_px(keys::CIRCLE_RADIUS, metrics)? {
            switch.circle_radius = radius;
        }
        if let Some(color) = attrs.color(keys::ON_COLOR)? {
            switch.on_color = color;
        }
        if let Some(color) = attrs.color(keys::OFF_COLOR)? {
            switch.off_color = color;
        }
        let checked = attrs.boolean(keys::CHECKED)?.unwrap_or(false);

        debug!(
            checked,
            radius = switch.circle_radius,
            margin = switch.circle_margin,
            "switch configured from attributes"
        );
        Ok(switch.checked(checked))
    }

    /// Set the initial checked state.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self.snap();
        self
    }

    /// Set the track color when unchecked.
    #[must_use]
    pub fn off_color(mut self, color: Color) -> Self {
        self.off_color = color;
        self.snap();
        self
    }

    /// Set the track color when checked.
    #[must_use]
    pub fn on_color(mut self, color: Color) -> Self {
        self.on_color = color;
        self.snap();
        self
    }

    /// Set the knob color.
    #[must_use]
    pub const fn knob_color(mut self, color: Color) -> Self {
        self.knob_color = color;
        self
    }

    /// Set the knob margin in device pixels.
    #[must_use]
    pub fn circle_margin(mut self, margin: i32) -> Self {
        self.circle_margin = margin.max(0);
        self
    }

    /// Set the knob radius in device pixels.
    #[must_use]
    pub fn circle_radius(mut self, radius: i32) -> Self {
        self.circle_radius = radius.max(0);
        self
    }

    /// Set the transition length.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.animator = Animator::new(duration).with_easing(self.animator.easing());
        self
    }

    /// Set the transition easing.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.animator = self.animator.with_easing(easing);
        self
    }

    /// Register the state-change listener, builder style.
    #[must_use]
    pub fn on_check_changed(mut self, listener: impl CheckChangedListener + 'static) -> Self {
        self.set_on_check_changed(listener);
        self
    }

    /// Register the state-change listener, replacing any previous one.
    ///
    /// The listener is owned by the switch and cannot reach back into it.
    /// It runs with `is_animating()` already false, so a host that wants to
    /// chain another transition calls [`toggle`](Self::toggle) once
    /// `on_frame` returns.
    pub fn set_on_check_changed(&mut self, listener: impl CheckChangedListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the state-change listener.
    pub fn clear_on_check_changed(&mut self) {
        self.listener = None;
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Logical state. Lags the visuals while a transition runs.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether a transition is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    /// Resolved width in device pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Resolved height in device pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Knob radius in device pixels.
    #[must_use]
    pub const fn get_circle_radius(&self) -> i32 {
        self.circle_radius
    }

    /// Knob margin in device pixels.
    #[must_use]
    pub const fn get_circle_margin(&self) -> i32 {
        self.circle_margin
    }

    /// Horizontal knob displacement from its unchecked position.
    #[must_use]
    pub const fn knob_offset_x(&self) -> f32 {
        self.knob_offset_x
    }

    /// Current track color.
    #[must_use]
    pub const fn track_color(&self) -> Color {
        self.track_color
    }

    /// Knob color.
    #[must_use]
    pub const fn get_knob_color(&self) -> Color {
        self.knob_color
    }

    /// Knob centre in local coordinates.
    #[must_use]
    pub fn knob_center(&self) -> Point {
        let reach = (i64::from(self.circle_radius) + i64::from(self.circle_margin)) as f32;
        Point::new(self.knob_offset_x + reach, reach)
    }

    /// Eased progress of the running transition, or of the last one.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Snap to `checked` without animating or notifying the listener.
    ///
    /// Rejected while a transition runs; returns whether it applied.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if self.animating {
            debug!(checked, "set_checked ignored while animating");
            return false;
        }
        self.checked = checked;
        self.snap();
        true
    }

    /// Start the same animated transition a tap would.
    ///
    /// Returns `false` if a transition is already running.
    pub fn toggle(&mut self) -> bool {
        self.start_transition()
    }

    fn start_transition(&mut self) -> bool {
        match self.animator.start() {
            Some(event) => {
                event.dispatch(self);
                true
            }
            None => {
                debug!("transition already running, request ignored");
                false
            }
        }
    }

    /// Knob offset at the checked end of the track.
    fn checked_offset(&self) -> f32 {
        let (w, r, m) = widen(self.width, self.circle_radius, self.circle_margin);
        (w - 2 * m - 2 * r) as f32
    }

    const fn endpoint_color(&self, checked: bool) -> Color {
        if checked {
            self.on_color
        } else {
            self.off_color
        }
    }

    /// Pin visuals to the idle endpoint for `checked`.
    fn snap(&mut self) {
        if self.animating {
            return;
        }
        self.knob_offset_x = endpoint_offset(self.checked, self.checked_offset());
        self.track_color = self.endpoint_color(self.checked);
    }

    /// Shrink whichever of radius or margin does not fit the height.
    fn fit(&mut self) {
        let (h, r, m) = widen(self.height, self.circle_radius, self.circle_margin);
        // every branch lands in 0..=h/2, which fits back into i32
        let (r, m) = if 2 * r + 2 * m > h {
            if 2 * m > h {
                (0, h / 2)
            } else {
                ((h - 2 * m) / 2, m)
            }
        } else {
            (r, (h - 2 * r) / 2)
        };
        self.circle_radius = i32::try_from(r).unwrap_or(0);
        self.circle_margin = i32::try_from(m).unwrap_or(0);
    }

    fn apply_progress(&mut self, progress: f64) {
        let checked_offset = self.checked_offset();
        let from = endpoint_offset(self.checked, checked_offset);
        let to = endpoint_offset(!self.checked, checked_offset);
        self.knob_offset_x = f32::interpolate(&from, &to, progress);
    }
}

/// Geometry math runs in `i64` so configured sizes near `i32::MAX` cannot overflow.
fn widen(a: i32, b: i32, c: i32) -> (i64, i64, i64) {
    (i64::from(a), i64::from(b), i64::from(c))
}

fn endpoint_offset(checked: bool, checked_offset: f32) -> f32 {
    if checked {
        checked_offset
    } else {
        0.0
    }
}

impl AnimationListener for SwitchView {
    fn on_animation_start(&mut self) {
        self.animating = true;
        self.progress = 0.0;
        self.from_color = self.track_color;
        debug!(
            from = self.checked,
            to = !self.checked,
            "switch transition started"
        );
    }

    fn on_animation_tick(&mut self, progress: f64) {
        self.progress = progress;
        self.apply_progress(progress);
        let target = self.endpoint_color(!self.checked);
        self.track_color = Color::interpolate(&self.from_color, &target, progress);
        trace!(progress, offset = self.knob_offset_x, "switch transition tick");
    }

    fn on_animation_end(&mut self) {
        self.animating = false;
        self.checked = !self.checked;
        self.snap();
        debug!(checked = self.checked, "switch transition finished");

        if let Some(listener) = self.listener.as_mut() {
            listener.on_check_changed(self.checked);
        }
    }
}

impl Widget for SwitchView {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&mut self, constraints: Constraints) -> Size {
        self.width = constraints
            .exact_width()
            .map_or(self.default_width, |w| w.max(0.0) as i32);
        self.height = constraints
            .exact_height()
            .map_or(self.default_height, |h| h.max(0.0) as i32);

        self.fit();
        if self.animating {
            self.apply_progress(self.progress);
        } else {
            self.snap();
        }

        debug!(
            width = self.width,
            height = self.height,
            radius = self.circle_radius,
            margin = self.circle_margin,
            "switch measured"
        );
        Size::new(self.width as f32, self.height as f32)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let (w, h) = (self.width as f32, self.height as f32);
        canvas.fill_rounded_rect(Rect::new(0.0, 0.0, w, h), h / 2.0, self.track_color);
        canvas.fill_circle(
            self.knob_center(),
            self.circle_radius as f32,
            self.knob_color,
        );
    }

    fn event(&mut self, event: &Event, base: &mut dyn DefaultHandler) -> bool {
        if event.is_release() {
            self.start_transition();
        }
        base.handle_default(event)
    }

    fn on_frame(&mut self, dt: Duration) -> bool {
        if !self.animating {
            return false;
        }
        for event in self.animator.advance(dt) {
            event.dispatch(self);
        }
        self.animating
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Switch
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::StyleAttributes;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};
    use switchview_core::{
        ClickBehavior, DrawCommand, MouseButton, Passthrough, RecordingCanvas, TouchId,
    };

    const FRAME: Duration = Duration::from_millis(16);

    fn release() -> Event {
        Event::TouchEnd {
            id: TouchId(0),
            position: Point::new(10.0, 10.0),
        }
    }

    fn press() -> Event {
        Event::TouchStart {
            id: TouchId(0),
            position: Point::new(10.0, 10.0),
            pressure: 1.0,
        }
    }

    fn measured() -> SwitchView {
        let mut s = SwitchView::new();
        s.measure(Constraints::unbounded());
        s
    }

    fn recorder(s: &mut SwitchView) -> Arc<Mutex<Vec<bool>>> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        s.set_on_check_changed(move |checked: bool| sink.lock().unwrap().push(checked));
        calls
    }

    fn run_frames(s: &mut SwitchView) -> usize {
        let mut frames = 0;
        while s.on_frame(FRAME) {
            frames += 1;
        }
        frames + 1
    }

    // ===== Construction Tests =====

    #[test]
    fn test_switch_defaults() {
        let s = SwitchView::new();
        assert!(!s.is_checked());
        assert!(!s.is_animating());
        assert_eq!(s.width(), 38);
        assert_eq!(s.height(), 22);
        assert_eq!(s.get_circle_margin(), 6);
        assert_eq!(s.get_circle_radius(), 23);
        assert_eq!(s.track_color(), Color::from_argb(0xffb2_d9ff));
        assert_eq!(s.get_knob_color(), Color::WHITE);
    }

    #[test]
    fn test_switch_builder() {
        let s = SwitchView::new()
            .checked(true)
            .on_color(Color::BLACK)
            .off_color(Color::WHITE)
            .knob_color(Color::TRANSPARENT)
            .circle_margin(2)
            .circle_radius(4)
            .easing(Easing::EaseInOut)
            .duration(Duration::from_millis(100))
            .accessible_name("Wi-Fi")
            .test_id("wifi-switch");

        assert!(s.is_checked());
        assert_eq!(s.track_color(), Color::BLACK);
        assert_eq!(s.get_circle_margin(), 2);
        assert_eq!(s.get_circle_radius(), 4);
        assert_eq!(s.animator.duration(), Duration::from_millis(100));
        assert_eq!(s.animator.easing(), Easing::EaseInOut);
        assert_eq!(Widget::accessible_name(&s), Some("Wi-Fi"));
        assert_eq!(Widget::test_id(&s), Some("wifi-switch"));
        assert_eq!(s.accessible_role(), AccessibleRole::Switch);
        assert!(s.is_interactive());
    }

    #[test]
    fn test_switch_density_scaling() {
        let s = SwitchView::with_metrics(DisplayMetrics::new(2.0));
        assert_eq!(s.width(), 76);
        assert_eq!(s.height(), 44);
        assert_eq!(s.get_circle_margin(), 12);
        assert_eq!(s.get_circle_radius(), 46);
    }

    #[test]
    fn test_from_attributes() {
        let style = StyleAttributes::from_yaml_str(
            r##"
switch_on_color: "#00ff00"
switch_circle_margin: 2
switch_checked: true
"##,
        )
        .unwrap();
        let s = SwitchView::from_attributes(&style, DisplayMetrics::BASELINE).unwrap();
        assert!(s.is_checked());
        assert_eq!(s.track_color(), Color::from_argb(0xff00_ff00));
        assert_eq!(s.get_circle_margin(), 2);
        // radius default comes from the default margin
        assert_eq!(s.get_circle_radius(), 23);
    }

    #[test]
    fn test_from_attributes_invalid() {
        let style = StyleAttributes::new().with(keys::CHECKED, "maybe");
        let err = SwitchView::from_attributes(&style, DisplayMetrics::BASELINE).unwrap_err();
        assert!(matches!(err, AttributeError::InvalidBoolean { .. }));
    }

    // ===== Measurement Tests =====

    #[test]
    fn test_reference_geometry() {
        let mut s = SwitchView::new();
        let size = s.measure(Constraints::tight(Size::new(38.0, 22.0)));
        assert_eq!(size, Size::new(38.0, 22.0));
        assert_eq!(s.get_circle_radius(), 5);
        assert_eq!(s.get_circle_margin(), 6);
        assert_eq!(s.knob_center(), Point::new(11.0, 11.0));

        s.set_checked(true);
        assert_eq!(s.knob_offset_x(), 16.0);
        assert_eq!(s.knob_center(), Point::new(27.0, 11.0));
    }

    #[test]
    fn test_measure_unbounded_uses_defaults() {
        let mut s = SwitchView::new();
        let size = s.measure(Constraints::loose(Size::new(500.0, 500.0)));
        assert_eq!(size, Size::new(38.0, 22.0));
    }

    #[test]
    fn test_measure_exact_axis() {
        let mut s = SwitchView::new();
        let size = s.measure(Constraints::unbounded().with_exact_width(120.0));
        assert_eq!(size, Size::new(120.0, 22.0));
    }

    #[test]
    fn test_measure_grows_margin_for_small_radius() {
        let mut s = SwitchView::new().circle_radius(4).circle_margin(0);
        s.measure(Constraints::tight(Size::new(60.0, 30.0)));
        assert_eq!(s.get_circle_radius(), 4);
        assert_eq!(s.get_circle_margin(), 11);
    }

    #[test]
    fn test_measure_degenerate_margin() {
        let mut s = SwitchView::new().circle_margin(20);
        s.measure(Constraints::tight(Size::new(38.0, 22.0)));
        assert_eq!(s.get_circle_radius(), 0);
        assert_eq!(s.get_circle_margin(), 11);
    }

    #[test]
    fn test_measure_is_idempotent() {
        let mut s = measured();
        let first = (s.get_circle_radius(), s.get_circle_margin());
        s.measure(Constraints::unbounded());
        s.measure(Constraints::unbounded());
        assert_eq!((s.get_circle_radius(), s.get_circle_margin()), first);
    }

    #[test]
    fn test_measure_snaps_checked_offset() {
        let mut s = SwitchView::new().checked(true);
        s.measure(Constraints::tight(Size::new(50.0, 22.0)));
        assert_eq!(s.knob_offset_x(), 28.0);
        assert_eq!(s.track_color(), Color::from_argb(0xff18_5bff));
    }

    #[test]
    fn test_measure_mid_animation_keeps_progress() {
        let mut s = measured();
        s.toggle();
        for _ in 0..9 {
            s.on_frame(FRAME);
        }
        let progress = s.progress();
        let color = s.track_color();
        assert!(progress > 0.0 && progress < 1.0);

        s.measure(Constraints::tight(Size::new(76.0, 22.0)));
        assert!(s.is_animating());
        assert_eq!(s.progress(), progress);
        let expected = (76 - 12 - 10) as f32 * progress as f32;
        assert!((s.knob_offset_x() - expected).abs() < 0.01);
        assert_eq!(s.track_color(), color);

        run_frames(&mut s);
        assert!(s.is_checked());
        assert_eq!(s.knob_offset_x(), 54.0);
    }

    // ===== Paint Tests =====

    #[test]
    fn test_paint_track_then_knob() {
        let s = measured();
        let mut canvas = RecordingCanvas::new();
        s.paint(&mut canvas);

        assert_eq!(
            canvas.commands(),
            &[
                DrawCommand::rounded_rect(
                    Rect::new(0.0, 0.0, 38.0, 22.0),
                    11.0,
                    Color::from_argb(0xffb2_d9ff)
                ),
                DrawCommand::filled_circle(Point::new(11.0, 11.0), 5.0, Color::WHITE),
            ]
        );
    }

    #[test]
    fn test_paint_is_pure() {
        let s = measured();
        let mut a = RecordingCanvas::new();
        let mut b = RecordingCanvas::new();
        s.paint(&mut a);
        s.paint(&mut b);
        assert_eq!(a.commands(), b.commands());
    }

    // ===== Interaction Tests =====

    #[test]
    fn test_release_starts_transition() {
        let mut s = measured();
        let calls = recorder(&mut s);
        s.event(&release(), &mut Passthrough);
        assert!(s.is_animating());
        assert!(!s.is_checked());

        run_frames(&mut s);
        assert!(!s.is_animating());
        assert!(s.is_checked());
        assert_eq!(s.knob_offset_x(), 16.0);
        assert_eq!(*calls.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_press_move_cancel_do_nothing() {
        let mut s = measured();
        let events = [
            press(),
            Event::TouchMove {
                id: TouchId(0),
                position: Point::new(30.0, 10.0),
                pressure: 1.0,
            },
            Event::TouchCancel { id: TouchId(0) },
            Event::MouseUp {
                position: Point::ORIGIN,
                button: MouseButton::Right,
            },
        ];
        for e in &events {
            s.event(e, &mut Passthrough);
        }
        assert!(!s.is_animating());
    }

    #[test]
    fn test_release_while_animating_ignored() {
        let mut s = measured();
        let calls = recorder(&mut s);
        s.event(&release(), &mut Passthrough);
        s.on_frame(FRAME);
        s.event(&release(), &mut Passthrough);
        s.event(&release(), &mut Passthrough);

        run_frames(&mut s);
        assert!(s.is_checked());
        assert_eq!(*calls.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_event_returns_base_verdict() {
        let mut s = measured();
        let mut click = ClickBehavior::new();
        assert!(s.event(&press(), &mut click));
        assert!(s.event(&release(), &mut click));
        assert_eq!(click.clicks(), 1);

        let mut s = measured();
        assert!(!s.event(&release(), &mut Passthrough));
        assert!(s.is_animating());

        let mut off = ClickBehavior::new().clickable(false);
        let mut s = measured();
        assert!(!s.event(&release(), &mut off));
        assert!(s.is_animating());
    }

    #[test]
    fn test_transition_takes_duration() {
        let mut s = measured();
        s.toggle();
        // 300 / 16 = 18.75
        assert_eq!(run_frames(&mut s), 19);
    }

    #[test]
    fn test_colors_hit_endpoints() {
        let mut s = measured();
        let off = s.track_color();
        s.toggle();
        assert_eq!(s.track_color(), off);
        run_frames(&mut s);
        assert!(s.track_color().channel_distance(&Color::from_argb(0xff18_5bff)) <= 1);
    }

    #[test]
    fn test_offset_monotonic_during_transition() {
        let mut s = measured();
        s.toggle();
        let mut last = s.knob_offset_x();
        while s.on_frame(FRAME) {
            assert!(s.knob_offset_x() >= last);
            last = s.knob_offset_x();
        }
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut s = measured();
        let mut before = RecordingCanvas::new();
        s.paint(&mut before);

        for _ in 0..2 {
            assert!(s.toggle());
            run_frames(&mut s);
        }

        let mut after = RecordingCanvas::new();
        s.paint(&mut after);
        assert!(!s.is_checked());
        assert_eq!(before.commands(), after.commands());
    }

    #[test]
    fn test_toggle_allowed_right_after_completion() {
        let mut s = measured();
        let calls = recorder(&mut s);
        s.toggle();
        run_frames(&mut s);
        assert!(s.toggle());
        run_frames(&mut s);
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_listener_fires_after_last_frame() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let mut s = measured();
        s.set_on_check_changed(move |checked: bool| *sink.lock().unwrap() = Some(checked));
        s.toggle();
        while s.on_frame(FRAME) {
            assert!(seen.lock().unwrap().is_none());
        }
        assert_eq!(*seen.lock().unwrap(), Some(true));
        assert!(!s.is_animating());
    }

    #[test]
    fn test_set_checked_is_silent() {
        let mut s = measured();
        let calls = recorder(&mut s);
        assert!(s.set_checked(true));
        assert_eq!(s.knob_offset_x(), 16.0);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_checked_rejected_while_animating() {
        let mut s = measured();
        s.toggle();
        assert!(!s.set_checked(true));
        assert!(!s.toggle());
    }

    #[test]
    fn test_oversized_radius_from_style() {
        let style = StyleAttributes::from_yaml_str("switch_circle_r: 2000000000").unwrap();
        let mut s = SwitchView::from_attributes(&style, DisplayMetrics::BASELINE)
            .unwrap()
            .checked(true);
        assert_eq!(s.get_circle_radius(), 2_000_000_000);
        s.measure(Constraints::unbounded());
        assert_eq!(s.get_circle_radius(), 5);
        assert_eq!(s.get_circle_margin(), 6);
        assert_eq!(s.knob_offset_x(), 16.0);
    }

    #[test]
    fn test_max_margin_collapses_knob() {
        let mut s = SwitchView::new().circle_margin(i32::MAX).circle_radius(i32::MAX);
        s.measure(Constraints::unbounded());
        assert_eq!(s.get_circle_radius(), 0);
        assert_eq!(s.get_circle_margin(), 11);
        assert_eq!(s.knob_center(), Point::new(11.0, 11.0));
    }

    #[test]
    fn test_host_chains_toggle_after_completion() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut s = measured().on_check_changed(move |checked: bool| {
            sink.lock().unwrap().push(checked);
        });
        s.toggle();
        run_frames(&mut s);
        assert_eq!(*calls.lock().unwrap(), vec![true]);
        assert!(!s.is_animating());
        assert!(s.toggle());
        run_frames(&mut s);
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_no_listener_is_fine() {
        let mut s = measured();
        s.clear_on_check_changed();
        s.toggle();
        run_frames(&mut s);
        assert!(s.is_checked());
    }

    #[test]
    fn test_idle_frames_request_nothing() {
        let mut s = measured();
        assert!(!s.on_frame(FRAME));
    }

    // ===== Property Tests =====

    proptest! {
        #[test]
        fn prop_fit_invariant(h in 0i32..400, r in 0i32..200, m in 0i32..200) {
            let mut s = SwitchView::new().circle_radius(r).circle_margin(m);
            s.measure(Constraints::tight(Size::new(100.0, h as f32)));
            let (r, m) = (s.get_circle_radius(), s.get_circle_margin());
            prop_assert!(2 * r + 2 * m <= h);
            prop_assert!(r >= 0 && m >= 0);
            prop_assert_eq!(s.height(), h);
        }

        #[test]
        fn prop_fit_invariant_extreme_sizes(
            h in 0i32..400,
            r in 0i32..=i32::MAX,
            m in 0i32..=i32::MAX,
            checked in any::<bool>(),
        ) {
            let mut s = SwitchView::new().circle_radius(r).circle_margin(m).checked(checked);
            s.measure(Constraints::tight(Size::new(100.0, h as f32)));
            let (r, m) = (i64::from(s.get_circle_radius()), i64::from(s.get_circle_margin()));
            prop_assert!(2 * r + 2 * m <= i64::from(h));
            prop_assert!(r >= 0 && m >= 0);
        }

        #[test]
        fn prop_fit_idempotent(h in 0i32..400, r in 0i32..200, m in 0i32..200) {
            let mut s = SwitchView::new().circle_radius(r).circle_margin(m);
            let c = Constraints::tight(Size::new(100.0, h as f32));
            s.measure(c);
            let once = (s.get_circle_radius(), s.get_circle_margin());
            s.measure(c);
            prop_assert_eq!((s.get_circle_radius(), s.get_circle_margin()), once);
        }

        #[test]
        fn prop_idle_snap(checked in any::<bool>(), w in 40i32..300) {
            let mut s = SwitchView::new().checked(checked);
            s.measure(Constraints::tight(Size::new(w as f32, 22.0)));
            let expected = if checked {
                (w - 2 * s.get_circle_margin() - 2 * s.get_circle_radius()) as f32
            } else {
                0.0
            };
            prop_assert_eq!(s.knob_offset_x(), expected);
        }

        #[test]
        fn prop_even_toggles_round_trip(n in 0usize..4) {
            let mut s = measured();
            let (offset, color) = (s.knob_offset_x(), s.track_color());
            for _ in 0..2 * n {
                s.toggle();
                run_frames(&mut s);
            }
            prop_assert!(!s.is_checked());
            prop_assert_eq!(s.knob_offset_x(), offset);
            prop_assert_eq!(s.track_color(), color);
        }
    }
}
