//! Four-channel floating-point color, the framebuffer element type.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use std::ops::{Div, Mul};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF {
    /// Per-frame clear value; zero alpha marks pixels no fragment reached.
    pub const TRANSPARENT: ColorF = ColorF::new(1.0, 1.0, 1.0, 0.0);
    pub const WHITE: ColorF = ColorF::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: ColorF = ColorF::new(0.0, 0.0, 0.0, 1.0);
    pub const GRAY: ColorF = ColorF::new(0.5, 0.5, 0.5, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from an RGB vector.
    pub fn from_rgb(rgb: Vec3) -> Self {
        Self::new(rgb.x, rgb.y, rgb.z, 1.0)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// Channels clamped to [0,1] and quantized to one byte each.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Componentwise linear interpolation; `t` is not clamped.
    pub fn lerp(self, other: ColorF, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Mul<f32> for ColorF {
    type Output = ColorF;

    fn mul(self, v: f32) -> ColorF {
        ColorF::new(self.r * v, self.g * v, self.b * v, self.a * v)
    }
}

impl Div<f32> for ColorF {
    type Output = ColorF;

    fn div(self, v: f32) -> ColorF {
        ColorF::new(self.r / v, self.g / v, self.b / v, self.a / v)
    }
}

impl Mul for ColorF {
    type Output = ColorF;

    fn mul(self, rhs: ColorF) -> ColorF {
        ColorF::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}

impl Div for ColorF {
    type Output = ColorF;

    fn div(self, rhs: ColorF) -> ColorF {
        ColorF::new(
            self.r / rhs.r,
            self.g / rhs.g,
            self.b / rhs.b,
            self.a / rhs.a,
        )
    }
}
