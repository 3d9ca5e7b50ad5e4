//! Scalar helpers. Trigonometry goes through `libm` so generated geometry is
//! bit-identical across platforms.

/// Linear interpolation between `a` and `b`. Exact at `t = 0` and `t = 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Clamp `t` into `[0, 1]`.
#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f32) -> f32 {
    libm::sinf(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f32) -> f32 {
    libm::cosf(x)
}
