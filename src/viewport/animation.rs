use super::{Viewport, ViewportSize};
use crate::config::EditorConfig;
use crate::geometry::{Point, Rect};
use std::f64::consts::PI;
use tracing::debug;

/// Cosine smoothstep: `(1 - cos(pi * t)) / 2`, with `t` clamped to `[0, 1]`.
pub fn ease(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (PI * t).cos()) / 2.0
}

/// One animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub done: bool,
}

/// Animated transition of the viewport towards a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecenterAnimation {
    pub from: Viewport,
    pub to: Viewport,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl RecenterAnimation {
    pub fn new(from: Viewport, to: Viewport, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    /// Fraction of the animation time elapsed at `now_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: f64) -> Frame {
        let t = self.progress(now_ms);
        let k = ease(t);
        let viewport = Viewport {
            offset: self.from.offset.lerp(self.to.offset, k),
            scale: self.from.scale + (self.to.scale - self.from.scale) * k,
        };
        Frame {
            viewport,
            done: t >= 1.0,
        }
    }
}

/// Owns the live viewport plus at most one running recenter animation.
///
/// Any user gesture replaces whatever animation is in flight.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    viewport: Viewport,
    animation: Option<RecenterAnimation>,
}

impl ViewportController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            animation: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn pan(&mut self, screen_delta: Point) {
        self.animation = None;
        self.viewport.pan(screen_delta);
    }

    pub fn zoom_at(&mut self, cursor: Point, wheel_delta: f64) {
        self.animation = None;
        self.viewport.zoom_at(cursor, wheel_delta);
    }

    /// Starts animating towards a view that fits `bounds`. Returns `false`
    /// when there is nothing to fit.
    pub fn recenter(
        &mut self,
        now_ms: f64,
        bounds: Option<Rect>,
        size: ViewportSize,
        config: &EditorConfig,
    ) -> bool {
        let Some(bounds) = bounds else {
            return false;
        };
        let target = Viewport::fit_bounds(bounds, size, config.recenter_padding);
        debug!(scale = target.scale, "recentering viewport");
        self.animation = Some(RecenterAnimation::new(
            self.viewport,
            target,
            now_ms,
            config.recenter_duration_ms,
        ));
        true
    }

    /// Advances the running animation. Returns `true` while another frame
    /// is needed.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let frame = animation.sample(now_ms);
        self.viewport = frame.viewport;
        if frame.done {
            self.animation = None;
        }
        !frame.done
    }
}
