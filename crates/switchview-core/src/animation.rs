//! Animation driver: easing, interpolation and a start/tick/end timeline.
//!
//! The host owns the clock ([`FrameClock`]) and hands each frame's `dt` to
//! the widget; the widget advances its [`Animator`] and routes the resulting
//! [`AnimationEvent`]s to its [`AnimationListener`] handlers.

use crate::geometry::Point;
use crate::Color;
use std::time::Duration;

// =============================================================================
// Easing
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cosine curve, slow at both ends
    AccelerateDecelerate,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::AccelerateDecelerate => ((t + 1.0) * std::f64::consts::PI).cos() / 2.0 + 0.5,
        }
    }
}

// =============================================================================
// Interpolate
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

impl Interpolate for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f32::interpolate(&from.x, &to.x, t),
            y: f32::interpolate(&from.y, &to.y, t),
        }
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(to, t as f32)
    }
}

// =============================================================================
// Listener contract
// =============================================================================

/// One step of an animation's life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// The animation began
    Start,
    /// Eased progress in [0.0, 1.0]
    Tick(f64),
    /// The animation ran to completion; always follows `Tick(1.0)`
    End,
}

impl AnimationEvent {
    /// Route this event to the matching listener handler.
    pub fn dispatch<L: AnimationListener + ?Sized>(self, listener: &mut L) {
        match self {
            Self::Start => listener.on_animation_start(),
            Self::Tick(progress) => listener.on_animation_tick(progress),
            Self::End => listener.on_animation_end(),
        }
    }
}

/// Receiver of an [`Animator`]'s start/tick/end events.
pub trait AnimationListener {
    /// Called once when the animation starts.
    fn on_animation_start(&mut self) {}

    /// Called every frame with the eased progress.
    fn on_animation_tick(&mut self, progress: f64);

    /// Called once after the final tick.
    fn on_animation_end(&mut self) {}
}

// =============================================================================
// Animator
// =============================================================================

/// A single fixed-duration timeline.
///
/// Runs to completion once started; there is no cancel. Ticks carry
/// monotonically increasing progress and the last one is exactly `1.0`.
#[derive(Debug, Clone)]
pub struct Animator {
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    running: bool,
}

impl Animator {
    /// Create an idle animator.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
            running: false,
        }
    }

    /// Set easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Easing function in use.
    #[must_use]
    pub const fn easing(&self) -> Easing {
        self.easing
    }

    /// Whether a run is in flight.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Linear time fraction from 0.0 to 1.0.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    /// Eased progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.running || self.elapsed > Duration::ZERO {
            self.easing.apply(self.fraction())
        } else {
            0.0
        }
    }

    /// Begin a run. Returns `None` if one is already in flight.
    pub fn start(&mut self) -> Option<AnimationEvent> {
        if self.running {
            return None;
        }
        self.elapsed = Duration::ZERO;
        self.running = true;
        Some(AnimationEvent::Start)
    }

    /// Advance by `dt`, returning this frame's events.
    ///
    /// Idle animators produce nothing.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnimationEvent> {
        if !self.running {
            return Vec::new();
        }

        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.elapsed >= self.duration {
            self.running = false;
            vec![AnimationEvent::Tick(1.0), AnimationEvent::End]
        } else {
            vec![AnimationEvent::Tick(self.easing.apply(self.fraction()))]
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

// =============================================================================
// FrameClock
// =============================================================================

/// Fixed-interval frame source standing in for the display's vsync.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    now: Duration,
    frames: u64,
}

impl FrameClock {
    /// Create a clock ticking every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            now: Duration::ZERO,
            frames: 0,
        }
    }

    /// A 60 Hz clock.
    #[must_use]
    pub fn sixty_hz() -> Self {
        Self::new(Duration::from_nanos(16_666_667))
    }

    /// Frame interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time since the clock started.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Frames produced so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Produce the next frame, returning its `dt`.
    pub fn tick(&mut self) -> Duration {
        self.now += self.interval;
        self.frames += 1;
        self.interval
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::sixty_hz()
    }
}
