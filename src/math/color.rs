use serde::{Deserialize, Serialize};

/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Creates an opaque `Color`.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Creates `Color` from a u32 encoded `ARGB`.
    pub fn from_argb_u32(encoded: u32) -> Self {
        let channel = |shift: u32| ((encoded >> shift) & 0xFF) as f32 / 255.0;
        Color::new(channel(16), channel(8), channel(0), channel(24))
    }

    /// Encodes this color as `ARGB`, clipping each channel first.
    pub fn to_argb_u32(&self) -> u32 {
        let [r, g, b, a]: [u8; 4] = (*self).into();
        (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Self {
        let f = |v: f32| v.max(0.0).min(1.0);
        Color::new(f(self.r), f(self.g), f(self.b), f(self.a))
    }

    pub fn rgba(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> [u8; 4] {
        let v = color.clip();
        let f = |c: f32| (c * 255.0).round() as u8;
        [f(v.r), f(v.g), f(v.b), f(v.a)]
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        let f = |c: u8| f32::from(c) / 255.0;
        Color::new(f(v[0]), f(v[1]), f(v[2]), f(v[3]))
    }
}

macro_rules! impl_named_colors {
    ($($name: ident => $argb: expr,)*) => {
        impl Color {
            $(
                #[inline]
                pub fn $name() -> Self {
                    Color::from_argb_u32($argb)
                }
            )*
        }
    };
}

impl_named_colors! {
    transparent => 0x00FF_FFFF,
    black => 0xFF00_0000,
    white => 0xFFFF_FFFF,
    red => 0xFFFF_0000,
    green => 0xFF00_8000,
    lime => 0xFF00_FF00,
    blue => 0xFF00_00FF,
    yellow => 0xFFFF_FF00,
    cyan => 0xFF00_FFFF,
    magenta => 0xFFFF_00FF,
    gray => 0xFF80_8080,
    orange => 0xFFFF_A500,
    purple => 0xFF80_0080,
    cornflower_blue => 0xFF64_95ED,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn argb() {
        assert_eq!(Color::red(), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::transparent().a, 0.0);
        assert_eq!(Color::cornflower_blue().to_argb_u32(), 0xFF64_95ED);

        let bytes: [u8; 4] = Color::new(2.0, -1.0, 0.0, 1.0).into();
        assert_eq!(bytes, [255, 0, 0, 255]);
    }
}
