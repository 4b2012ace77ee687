/// An 8-bit RGBA color.
///
/// Arithmetic is exposed as explicit saturating methods rather than operator
/// overloads so that the clamping is visible where colors are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn from_rgb_array(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Channel-wise addition clamped at 255, alpha included.
    pub fn saturating_add(self, other: Color) -> Color {
        Color::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
            self.a.saturating_add(other.a),
        )
    }

    /// Multiplies the color channels by `factor`, clamping each to `[0, 255]`.
    /// Fractions are truncated. Alpha is kept as is.
    pub fn scale(self, factor: f32) -> Color {
        let channel = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Color::new(channel(self.r), channel(self.g), channel(self.b), self.a)
    }

    /// Packs as `0xRRGGBBAA`.
    #[inline]
    pub fn to_rgba8888(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Packs as `0x00RRGGBB`, the layout window surfaces expect.
    #[inline]
    pub fn to_xrgb8888(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}
