use crate::vec3::Float;
use std::fmt::Display;
use std::ops::{Add, Mul};

/// 8-bit RGBA color. All arithmetic saturates into [0, 255] per channel;
/// the shading formulas rely on that clamping contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Color {
            r: self.r.saturating_add(rhs.r),
            g: self.g.saturating_add(rhs.g),
            b: self.b.saturating_add(rhs.b),
            a: self.a.saturating_add(rhs.a),
        }
    }
}

fn scale_channel(channel: u8, factor: Float) -> u8 {
    (channel as Float * factor).clamp(0.0, 255.0) as u8
}

impl Mul<Float> for Color {
    type Output = Self;

    fn mul(self, factor: Float) -> Self::Output {
        Color {
            r: scale_channel(self.r, factor),
            g: scale_channel(self.g, factor),
            b: scale_channel(self.b, factor),
            a: scale_channel(self.a, factor),
        }
    }
}

impl Mul<Color> for Float {
    type Output = Color;

    fn mul(self, color: Color) -> Color {
        color * self
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
