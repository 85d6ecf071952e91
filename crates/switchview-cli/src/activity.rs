//! The host screen: owns one switch, routes input to it and logs changes.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use switchview_core::{
    Canvas, ClickBehavior, Color, Constraints, DisplayMetrics, DrawCommand, Event, Point, Rect,
    RecordingCanvas, Size, TouchId, Transform2D, Widget,
};
use switchview_widgets::SwitchView;
use tracing::{debug, info};

/// Window size in dp.
pub(crate) const WINDOW_DP: (f32, f32) = (360.0, 640.0);

/// A headless screen hosting a single centred switch.
#[derive(Debug)]
pub(crate) struct MainActivity {
    window: Size,
    background: Color,
    switch: SwitchView,
    click: ClickBehavior,
    changes_rx: Receiver<bool>,
    changes: Vec<bool>,
}

impl MainActivity {
    /// Create the screen and register the change listener.
    pub(crate) fn new(mut switch: SwitchView, metrics: DisplayMetrics) -> Self {
        let (tx, changes_rx) = mpsc::channel();
        switch.set_on_check_changed(move |is_checked: bool| {
            info!("onCheckChanged: isChecked:{is_checked}");
            // receiver lives as long as the activity
            let _ = tx.send(is_checked);
        });

        let window = Size::new(
            metrics.dp_to_px(WINDOW_DP.0) as f32,
            metrics.dp_to_px(WINDOW_DP.1) as f32,
        );
        Self {
            window,
            background: Color::WHITE,
            switch,
            click: ClickBehavior::new(),
            changes_rx,
            changes: Vec::new(),
        }
    }

    /// Measure the switch and centre it in the window.
    pub(crate) fn layout(&mut self, constraints: Constraints) -> Rect {
        let size = self.switch.measure(constraints);
        let origin = Point::new(
            ((self.window.width - size.width) / 2.0).floor(),
            ((self.window.height - size.height) / 2.0).floor(),
        );
        let bounds = Rect::new(origin.x, origin.y, size.width, size.height);
        self.switch.layout(bounds);
        debug!(?bounds, "switch laid out");
        bounds
    }

    /// Route a window-space event to the switch.
    ///
    /// Positional events outside the switch are dropped; the rest are
    /// localized to the switch's origin first.
    pub(crate) fn dispatch(&mut self, event: &Event) -> bool {
        let bounds = self.switch.bounds();
        if let Some(position) = event.position() {
            if !bounds.contains_point(&position) {
                return false;
            }
        }
        let local = event.localized(bounds.origin());
        self.switch.event(&local, &mut self.click)
    }

    /// Tap the centre of the switch.
    pub(crate) fn tap(&mut self) -> bool {
        let at = self.switch.bounds().center();
        let down = Event::TouchStart {
            id: TouchId(0),
            position: at,
            pressure: 1.0,
        };
        let up = Event::TouchEnd {
            id: TouchId(0),
            position: at,
        };
        self.dispatch(&down);
        self.dispatch(&up)
    }

    /// Deliver one frame. Returns whether the switch wants another.
    pub(crate) fn frame(&mut self, dt: Duration) -> bool {
        let more = self.switch.on_frame(dt);
        self.changes.extend(self.changes_rx.try_iter());
        more
    }

    /// Paint the window and return what was drawn.
    pub(crate) fn render(&self) -> Vec<DrawCommand> {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::from_size(self.window), self.background);

        let origin = self.switch.bounds().origin();
        canvas.push_transform(Transform2D::translate(origin.x, origin.y));
        self.switch.paint(&mut canvas);
        canvas.pop_transform();
        canvas.take_commands()
    }

    /// Hosted switch.
    pub(crate) const fn switch(&self) -> &SwitchView {
        &self.switch
    }

    /// Mutable access to the hosted switch.
    pub(crate) fn switch_mut(&mut self) -> &mut SwitchView {
        &mut self.switch
    }

    /// Every state change reported so far.
    pub(crate) fn changes(&self) -> &[bool] {
        &self.changes
    }

    /// Clicks counted by the default handler.
    pub(crate) const fn clicks(&self) -> u32 {
        self.click.clicks()
    }
}
