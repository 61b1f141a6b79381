//! Critically damped per-frame interpolation.
//!
//! An [`Interpolator`] turns a time constant into a blend factor for the
//! current frame. Repeatedly applying `lerp(value, target, factor)` makes the
//! value approach its target exponentially, independent of frame rate.

/// Pixel rounding used throughout layout: `floor(x + 0.5)`.
///
/// Halves round toward positive infinity, so `-2.5` becomes `-2`.
#[must_use]
pub fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Linear interpolation from `a` to `b`.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (b - a).mul_add(t, a)
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamping the
/// input to its range first.
#[must_use]
pub fn clamp_rescale(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_max;
    }
    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    lerp(out_min, out_max, t)
}

/// Source of per-frame blend factors.
pub trait Interpolator {
    /// Blend factor in `[0, 1]` for approaching a target with the given time
    /// constant over one frame.
    fn interpolant(&self, time_constant: f32) -> f32;
}

/// Frame-time driven critical damping: `1 - 2^(-frame_time / time_constant)`.
///
/// The time constant is the half-life: after `time_constant` seconds of frames
/// the remaining distance to the target has halved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalDamp {
    frame_time: f32,
}

impl CriticalDamp {
    /// Damping for frames lasting `frame_time` seconds.
    #[must_use]
    pub const fn new(frame_time: f32) -> Self {
        Self { frame_time }
    }

    /// Damping at the given frame rate.
    #[must_use]
    pub fn at_fps(fps: f32) -> Self {
        Self::new(if fps > 0.0 { fps.recip() } else { 0.0 })
    }

    /// Damping that reaches every target in a single frame.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(f32::INFINITY)
    }
}

impl Default for CriticalDamp {
    fn default() -> Self {
        Self::at_fps(60.0)
    }
}

impl Interpolator for CriticalDamp {
    fn interpolant(&self, time_constant: f32) -> f32 {
        if time_constant <= 0.0 {
            return 1.0;
        }
        (1.0 - (-self.frame_time / time_constant).exp2()).clamp(0.0, 1.0)
    }
}

impl<F: Fn(f32) -> f32> Interpolator for F {
    fn interpolant(&self, time_constant: f32) -> f32 {
        self(time_constant)
    }
}
