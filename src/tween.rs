//! Time-based tweening of shader uniforms.
//!
//! Each animated value owns at most one tween. Starting a new tween picks up
//! from wherever the value currently is, so rapid retargeting (one retarget
//! per mouse move) stays continuous.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Easing curve, named the way web tweening libraries name them
/// (`"power2.out"`, `"power1.inOut"`, `"none"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
}

impl Ease {
    pub const MAX_POWER: u8 = 4;

    /// Map linear progress `t` (clamped to [0, 1]) onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn(p) => t.powi(p as i32 + 1),
            Ease::PowerOut(p) => 1.0 - (1.0 - t).powi(p as i32 + 1),
            Ease::PowerInOut(p) => {
                let e = p as i32 + 1;
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::PowerOut(2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ease {0:?}")]
pub struct ParseEaseError(String);

impl FromStr for Ease {
    type Err = ParseEaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEaseError(s.to_owned());
        if matches!(s, "none" | "linear") {
            return Ok(Ease::Linear);
        }
        let rest = s.strip_prefix("power").ok_or_else(err)?;
        let (power, kind) = match rest.split_once('.') {
            Some((p, k)) => (p, k),
            // a bare "power2" eases out, as in the libraries that use these names
            None => (rest, "out"),
        };
        let power: u8 = power.parse().map_err(|_| err())?;
        if power > Ease::MAX_POWER {
            return Err(err());
        }
        if power == 0 {
            return Ok(Ease::Linear);
        }
        match kind {
            "in" => Ok(Ease::PowerIn(power)),
            "out" => Ok(Ease::PowerOut(power)),
            "inOut" => Ok(Ease::PowerInOut(power)),
            _ => Err(err()),
        }
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Duration and curve shared by a family of tweens.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Motion {
    /// Seconds.
    pub duration: f32,
    pub ease: Ease,
}

impl Default for Motion {
    fn default() -> Self {
        Self { duration: 0.3, ease: Ease::PowerOut(2) }
    }
}

pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Self, t: f32) -> Self {
        Vec2::lerp(self, to, t)
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween<T> {
    from: T,
    to: T,
    elapsed: f32,
    motion: Motion,
}

/// A value that can glide toward a target.
#[derive(Debug, Clone, Copy)]
pub struct Tweened<T> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Tweened<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Where the value is heading; the current value when idle.
    pub fn target(&self) -> T {
        self.tween.map_or(self.value, |t| t.to)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Start gliding toward `to`, replacing any tween in flight.
    pub fn to(&mut self, to: T, motion: Motion) {
        if motion.duration <= 0.0 {
            self.value = to;
            self.tween = None;
            return;
        }
        self.tween = Some(Tween { from: self.value, to, elapsed: 0.0, motion });
    }

    /// Step time forward by `dt` seconds. Returns true while still animating.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        tween.elapsed += dt.max(0.0);
        let progress = tween.elapsed / tween.motion.duration;
        if progress >= 1.0 {
            self.value = tween.to;
            self.tween = None;
            return false;
        }
        self.value = tween.from.lerp(tween.to, tween.motion.ease.apply(progress));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn power2_out_is_cubic() {
        let e = Ease::PowerOut(2);
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!(approx(e.apply(0.5), 1.0 - 0.125));
    }

    #[test]
    fn in_out_is_symmetric() {
        let e = Ease::PowerInOut(1);
        assert!(approx(e.apply(0.5), 0.5));
        assert!(approx(e.apply(0.25) + e.apply(0.75), 1.0));
    }

    #[test]
    fn parses_library_names() {
        assert_eq!("power2.out".parse::<Ease>(), Ok(Ease::PowerOut(2)));
        assert_eq!("power3.inOut".parse::<Ease>(), Ok(Ease::PowerInOut(3)));
        assert_eq!("power1.in".parse::<Ease>(), Ok(Ease::PowerIn(1)));
        assert_eq!("power4".parse::<Ease>(), Ok(Ease::PowerOut(4)));
        assert_eq!("power0.out".parse::<Ease>(), Ok(Ease::Linear));
        assert_eq!("none".parse::<Ease>(), Ok(Ease::Linear));
        assert!("power5.out".parse::<Ease>().is_err());
        assert!("elastic.out".parse::<Ease>().is_err());
        assert!("power2.sideways".parse::<Ease>().is_err());
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "bounce.out".parse::<Ease>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown ease "bounce.out""#);
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn tween_settles_exactly_on_target() {
        let mut v = Tweened::new(0.0f32);
        v.to(1.0, Motion::default());
        assert!(v.advance(0.1));
        let mid = v.value();
        assert!(mid > 0.0 && mid < 1.0);
        assert!(!v.advance(0.25));
        assert_eq!(v.value(), 1.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut v = Tweened::new(Vec2::splat(0.5));
        v.to(Vec2::new(1.0, 0.0), Motion::default());
        v.advance(0.15);
        let here = v.value();
        v.to(Vec2::splat(0.5), Motion::default());
        assert_eq!(v.value(), here);
        assert_eq!(v.target(), Vec2::splat(0.5));
        v.advance(0.3);
        assert_eq!(v.value(), Vec2::splat(0.5));
    }

    #[test]
    fn zero_duration_jumps() {
        let mut v = Tweened::new(0.0f32);
        v.to(1.0, Motion { duration: 0.0, ease: Ease::Linear });
        assert_eq!(v.value(), 1.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn motion_deserializes() {
        let m: Motion = serde_json::from_str(r#"{"duration":0.5,"ease":"power1.inOut"}"#).unwrap();
        assert_eq!(m, Motion { duration: 0.5, ease: Ease::PowerInOut(1) });
        let d: Motion = serde_json::from_str("{}").unwrap();
        assert_eq!(d, Motion::default());
    }
}
