//! Colors and categorical color scales.

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// ```
/// use crossplot_chart::Color;
///
/// let slate = Color::from_hex(0x3e4651);
/// assert_eq!(slate.to_hex(), 0x3e4651);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0x3e4651`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8(r, g, b)
    }

    /// The 24-bit RGB hex value, alpha dropped.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS hex notation, e.g. `#3e4651`.
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.to_hex())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Fill behind the slider chart body.
pub const SLIDER_BACKGROUND: u32 = 0x3e4651;

/// Twenty categorical colors in four shades per hue.
pub const CATEGORY_20C: [u32; 20] = [
    0x3182bd, 0x6baed6, 0x9ecae1, 0xc6dbef, // blue
    0xe6550d, 0xfd8d3c, 0xfdae6b, 0xfdd0a2, // orange
    0x31a354, 0x74c476, 0xa1d99b, 0xc7e9c0, // green
    0x756bb1, 0x9e9ac8, 0xbcbddc, 0xdadaeb, // purple
    0x636363, 0x969696, 0xbdbdbd, 0xd9d9d9, // gray
];

/// An ordinal color scale: category index to color, cycling.
///
/// Renderers treat it as opaque; the chart only carries it along.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colors: Vec<Color>,
}

impl ColorScale {
    /// Build a scale from explicit colors. An empty list falls back to
    /// [`ColorScale::category20c`].
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let colors: Vec<Color> = colors.into_iter().collect();
        if colors.is_empty() {
            return Self::category20c();
        }
        Self { colors }
    }

    pub fn category20c() -> Self {
        Self {
            colors: CATEGORY_20C.iter().copied().map(Color::from_hex).collect(),
        }
    }

    /// Color of a category index.
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::category20c()
    }
}
