//! Cell color model.
//!
//! A cell carries nothing but its color: pure white is the dead sentinel and any
//! other color is a live cell. Newborn cells take the average color of the live
//! neighbors that produced them.

/// RGB triple with every channel clamped to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellColor {
    red: f32,
    green: f32,
    blue: f32,
}

impl CellColor {
    /// Dead sentinel.
    pub const WHITE: CellColor = CellColor { red: 1.0, green: 1.0, blue: 1.0 };
    pub const BLACK: CellColor = CellColor { red: 0.0, green: 0.0, blue: 0.0 };

    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
        }
    }

    pub fn is_alive(&self) -> bool {
        !(self.red == 1.0 && self.green == 1.0 && self.blue == 1.0)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }

    /// Layout used by the grid storage buffer (`vec4<f32>` in WGSL).
    pub fn to_rgba(self) -> [f32; 4] {
        [self.red, self.green, self.blue, 1.0]
    }
}

impl Default for CellColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for CellColor {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

// NaN collapses to 0 so a bad picker value can never produce an invalid cell.
fn clamp_channel(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Channel-wise arithmetic mean of `colors`, or `None` when there is nothing to blend.
pub fn blend(colors: &[CellColor]) -> Option<CellColor> {
    if colors.is_empty() {
        return None;
    }
    if let [single] = colors {
        return Some(*single);
    }

    let (red, green, blue) = colors.iter().fold((0.0f32, 0.0f32, 0.0f32), |acc, c| {
        (acc.0 + c.red, acc.1 + c.green, acc.2 + c.blue)
    });
    let count = colors.len() as f32;
    Some(CellColor::new(red / count, green / count, blue / count))
}
