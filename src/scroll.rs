//! Smooth wheel scrolling of the window.
//!
//! Wheel input moves a target; every frame the rendered scroll position is
//! damped toward it and written back to the window, so the DOM (and with it
//! every plane) glides instead of jumping.

use crate::config::ScrollConfig;

/// Pixels per wheel "line" (`deltaMode == 1`).
pub const LINE_HEIGHT: f32 = 100.0 / 6.0;

/// Distance at which the animation snaps onto its target.
const SETTLE_EPSILON: f32 = 0.5;

pub const DELTA_PIXEL: u32 = 0;
pub const DELTA_LINE: u32 = 1;
pub const DELTA_PAGE: u32 = 2;

/// Wheel delta in pixels, whatever unit the browser reported.
pub fn normalize_wheel(delta: f32, mode: u32, viewport_height: f32) -> f32 {
    match mode {
        DELTA_LINE => delta * LINE_HEIGHT,
        DELTA_PAGE => delta * viewport_height,
        _ => delta,
    }
}

/// Whether a wheel gesture is mostly vertical. Horizontal swipes (trackpad
/// back/forward, sideways panning) belong to the browser.
pub fn is_vertical_wheel(delta_x: f32, delta_y: f32) -> bool {
    delta_y.abs() >= delta_x.abs()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroll {
    current: f32,
    target: f32,
    limit: f32,
    lerp: f32,
    wheel_multiplier: f32,
    animating: bool,
}

impl SmoothScroll {
    pub fn new(config: &ScrollConfig, position: f32, limit: f32) -> Self {
        let limit = limit.max(0.0);
        let position = position.clamp(0.0, limit);
        Self {
            current: position,
            target: position,
            limit,
            lerp: config.lerp,
            wheel_multiplier: config.wheel_multiplier,
            animating: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Largest scroll offset: document height minus viewport height.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
    }

    pub fn on_wheel(&mut self, delta_px: f32) {
        self.target = (self.target + delta_px * self.wheel_multiplier).clamp(0.0, self.limit);
        self.animating = self.target != self.current;
    }

    /// The window scrolled on its own (scrollbar drag, keyboard, anchors).
    /// Only adopted while idle, since our own writes also raise scroll events.
    pub fn on_native_scroll(&mut self, actual: f32) {
        if !self.animating {
            let actual = actual.clamp(0.0, self.limit);
            self.current = actual;
            self.target = actual;
        }
    }

    /// Advance by `dt` seconds; returns the position to apply, if any.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if !self.animating {
            return None;
        }
        let alpha = 1.0 - (-self.lerp * 60.0 * dt.max(0.0)).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SETTLE_EPSILON {
            self.current = self.target;
            self.animating = false;
        }
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller(limit: f32) -> SmoothScroll {
        SmoothScroll::new(&ScrollConfig::default(), 0.0, limit)
    }

    #[test]
    fn wheel_delta_units() {
        assert_eq!(normalize_wheel(3.0, DELTA_PIXEL, 800.0), 3.0);
        assert_eq!(normalize_wheel(3.0, DELTA_LINE, 800.0), 50.0);
        assert_eq!(normalize_wheel(-1.0, DELTA_PAGE, 800.0), -800.0);
    }

    #[test]
    fn horizontal_swipes_are_not_ours() {
        assert!(is_vertical_wheel(0.0, 40.0));
        assert!(is_vertical_wheel(-3.0, 3.0));
        assert!(!is_vertical_wheel(-30.0, 4.0));
        assert!(!is_vertical_wheel(12.0, 0.0));
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut s = scroller(1000.0);
        assert_eq!(s.tick(0.016), None);
    }

    #[test]
    fn eases_toward_target_and_settles() {
        let mut s = scroller(1000.0);
        s.on_wheel(300.0);
        let first = s.tick(1.0 / 60.0).unwrap();
        assert!(first > 0.0 && first < 300.0);
        let expected = 300.0 * (1.0 - (-0.1f32).exp());
        assert!((first - expected).abs() < 1e-3, "{first}");
        let mut frames = 0;
        while s.tick(1.0 / 60.0).is_some() {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(s.current(), 300.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn frame_rate_independent() {
        let mut a = scroller(1000.0);
        let mut b = scroller(1000.0);
        a.on_wheel(500.0);
        b.on_wheel(500.0);
        a.tick(1.0 / 30.0);
        b.tick(1.0 / 60.0);
        b.tick(1.0 / 60.0);
        assert!((a.current() - b.current()).abs() < 1e-2);
    }

    #[test]
    fn target_is_clamped() {
        let mut s = scroller(200.0);
        s.on_wheel(-50.0);
        assert_eq!(s.target(), 0.0);
        assert!(!s.is_animating());
        s.on_wheel(10_000.0);
        assert_eq!(s.target(), 200.0);
        s.set_limit(100.0);
        assert_eq!(s.target(), 100.0);
    }

    #[test]
    fn wheel_multiplier_scales_deltas() {
        let config = ScrollConfig { wheel_multiplier: 2.0, ..ScrollConfig::default() };
        let mut s = SmoothScroll::new(&config, 0.0, 1000.0);
        s.on_wheel(50.0);
        assert_eq!(s.target(), 100.0);
        s.on_wheel(-20.0);
        assert_eq!(s.target(), 60.0);
    }

    #[test]
    fn shrinking_limit_pulls_current_back() {
        let mut s = scroller(1000.0);
        s.on_native_scroll(400.0);
        s.set_limit(100.0);
        assert_eq!((s.current(), s.target()), (100.0, 100.0));
        assert_eq!(s.tick(0.016), None);
    }

    #[test]
    fn limit_collapsing_mid_animation_settles() {
        let mut s = scroller(1000.0);
        s.on_wheel(300.0);
        assert!(s.tick(1.0 / 60.0).unwrap() > 0.0);
        s.set_limit(0.0);
        assert_eq!((s.current(), s.target()), (0.0, 0.0));
        assert_eq!(s.tick(1.0 / 60.0), Some(0.0));
        assert!(!s.is_animating());
        assert_eq!(s.tick(1.0 / 60.0), None);
    }

    #[test]
    fn native_scroll_resyncs_only_when_idle() {
        let mut s = scroller(1000.0);
        s.on_native_scroll(400.0);
        assert_eq!((s.current(), s.target()), (400.0, 400.0));
        s.on_wheel(100.0);
        s.on_native_scroll(401.0);
        assert_eq!(s.target(), 500.0);
    }
}
