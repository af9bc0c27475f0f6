use std::ops::{ Add, Mul };

use crate::feq;
use crate::tuple::Tuple3D;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Shading works
/// on the nominal 0.0 to 1.0 range but never clamps; values outside of it are
/// only folded back in when a color is encoded to bytes.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::color::Color;
/// let lit = Color::rgb(0.1, 0.2, 0.3) + Color::rgb(0.5, 0.5, 0.5) * 2.0;
/// assert_eq!(lit, Color::rgb(1.1, 1.2, 1.3));
/// assert_eq!(lit.to_bytes(), [255, 255, 255]);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple3D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<Tuple3D> for Color {
    fn from(t: Tuple3D) -> Color {
        Color { r: t.x, g: t.y, b: t.z }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black, also used as the background.
    pub fn black() -> Color {
        Color {
            r: 0.0,
            g: 0.0,
            b: 0.0
        }
    }

    /// Checks for exact black, without the tolerance `==` applies.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Encodes the color as three bytes.
    ///
    /// Channels below 0.0 become 0 and channels above 1.0 become 255. Anything
    /// in between is scaled by 255 and truncated.
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            Self::channel_to_byte(self.r),
            Self::channel_to_byte(self.g),
            Self::channel_to_byte(self.b),
        ]
    }

    fn channel_to_byte(c: f64) -> u8 {
        if c < 0.0 {
            0
        } else if c > 1.0 {
            255
        } else {
            (c * 255.0) as u8
        }
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Multiplies a color by a scalar.
///
/// Each component is multiplied by the scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
///
/// Returns a color with each component multiplied by the scalar.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color {
            r: self * other.r,
            g: self * other.g,
            b: self * other.b,
        }
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn bytes_clamp_out_of_range() {
    assert_eq!(Color::rgb(-0.5, 1.5, 0.0).to_bytes(), [0, 255, 0]);
    assert_eq!(Color::rgb(1.0, 1.0, 1.0).to_bytes(), [255, 255, 255]);
}

#[test]
fn bytes_truncate() {
    // 0.5 * 255 = 127.5, truncated rather than rounded
    assert_eq!(Color::rgb(0.5, 0.999, 0.001).to_bytes(), [127, 254, 0]);
}

#[test]
fn black_is_exact() {
    assert!(Color::black().is_black());
    assert!(!Color::rgb(0.00001, 0.0, 0.0).is_black());
}
