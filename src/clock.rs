//! Frame timing for the `requestAnimationFrame` loop.

/// Longest step fed to the animations, in seconds. Keeps a tab that was in
/// the background from jumping to the end of every tween at once.
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Seconds since the previous frame, from rAF timestamps in milliseconds.
/// The first frame has no predecessor and steps by zero.
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64) -> f64 {
    last_ms.map_or(0.0, |last| ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DELTA))
}
