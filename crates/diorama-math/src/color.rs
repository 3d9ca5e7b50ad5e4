//! Linear RGB colour with the handful of operations terrain shading needs.

/// An RGB colour with channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Build a colour from hue, saturation and lightness, each in `[0, 1]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        if s <= 0.0 {
            return Self::new(l, l, l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h.rem_euclid(1.0);
        Self::new(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }

    /// Interpolate toward `other` by `t`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r * (1.0 - t) + other.r * t,
            self.g * (1.0 - t) + other.g * t,
            self.b * (1.0 - t) + other.b * t,
        )
    }

    /// Multiply every channel by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Add `(dr, dg, db)` channel-wise.
    pub fn offset(self, dr: f32, dg: f32, db: f32) -> Self {
        Self::new(self.r + dr, self.g + dg, self.b + db)
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn saturate(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Weighted average of `(colour, weight)` samples. Returns `None` if the
    /// total weight is zero.
    pub fn weighted_average(samples: impl IntoIterator<Item = (Color, f32)>) -> Option<Self> {
        let mut sum = Self::BLACK;
        let mut total = 0.0;
        for (c, w) in samples {
            sum = sum.offset(c.r * w, c.g * w, c.b * w);
            total += w;
        }
        (total > 0.0).then(|| sum.scale(1.0 / total))
    }

    /// Quantize to 8-bit RGBA with full alpha.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
