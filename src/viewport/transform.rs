use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;
pub const ZOOM_IN_FACTOR: f64 = 1.08;
pub const ZOOM_OUT_FACTOR: f64 = 0.92;

/// Scale limits applied when fitting all nodes into view.
pub const FIT_MIN_SCALE: f64 = 0.2;
pub const FIT_MAX_SCALE: f64 = 3.0;

/// Size of the visible canvas area in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// World-to-screen mapping: `screen = offset + world * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset: Point, scale: f64) -> Self {
        Self { offset, scale }
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.offset + world * self.scale
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        (screen - self.offset) / self.scale
    }

    pub fn screen_delta_to_world(&self, delta: Point) -> Point {
        delta / self.scale
    }

    /// Translates the view by a screen-space pointer delta.
    pub fn pan(&mut self, screen_delta: Point) {
        self.offset += screen_delta;
    }

    /// Zooms one wheel tick around `cursor`. Negative `wheel_delta` zooms in.
    /// The world point under the cursor stays under the cursor.
    pub fn zoom_at(&mut self, cursor: Point, wheel_delta: f64) {
        let factor = if wheel_delta < 0.0 {
            ZOOM_IN_FACTOR
        } else if wheel_delta > 0.0 {
            ZOOM_OUT_FACTOR
        } else {
            return;
        };
        self.set_scale_at(cursor, self.scale * factor);
    }

    /// Sets the scale (clamped to the zoom limits) keeping `anchor` fixed.
    pub fn set_scale_at(&mut self, anchor: Point, scale: f64) {
        let world = self.screen_to_world(anchor);
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.offset = anchor - world * self.scale;
    }

    /// Viewport that shows `bounds` centred inside `size` minus `padding`
    /// on every side.
    pub fn fit_bounds(bounds: Rect, size: ViewportSize, padding: f64) -> Viewport {
        let avail_w = (size.width - padding * 2.0).max(1.0);
        let avail_h = (size.height - padding * 2.0).max(1.0);
        let scale = (avail_w / bounds.width.max(1.0))
            .min(avail_h / bounds.height.max(1.0))
            .clamp(FIT_MIN_SCALE, FIT_MAX_SCALE);
        let offset = size.center() - bounds.center() * scale;
        Viewport { offset, scale }
    }

    /// The world-space rectangle currently visible.
    pub fn visible_world_rect(&self, size: ViewportSize) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        Rect::new(
            top_left.x,
            top_left.y,
            size.width / self.scale,
            size.height / self.scale,
        )
    }
}
