use serde::{Deserialize, Serialize};

pub const GRID_ROWS: u32 = 5;
pub const GRID_COLS: u32 = 3;
pub const CELL_COUNT: usize = (GRID_ROWS * GRID_COLS) as usize;

/// Axis-aligned pixel rectangle `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `width / height`; zero when the box has no height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Intersection with `[0, width) × [0, height)`. May come back empty.
    pub fn clamp_to(&self, width: u32, height: u32) -> BoundingBox {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.x.saturating_add(self.width).min(width);
        let y1 = self.y.saturating_add(self.height).min(height);
        BoundingBox::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// One board cell: its pixel box and logical grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub bbox: BoundingBox,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl From<&Cell> for Position {
    fn from(cell: &Cell) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
        }
    }
}

/// Color description as two unioned hue bands plus saturation/value floors.
///
/// Hue is in degrees on `[0, 360]`, saturation and value on the 8-bit `0..=255` scale.
/// Red straddles 0°/360°, so it needs both bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueRange {
    pub hue_low: f32,
    pub hue_high: f32,
    pub hue_low2: f32,
    pub hue_high2: f32,
    pub sat_min: u8,
    pub val_min: u8,
}

impl HueRange {
    pub fn contains(&self, hue: f32, saturation: u8, value: u8) -> bool {
        if saturation < self.sat_min || value < self.val_min {
            return false;
        }
        (self.hue_low..=self.hue_high).contains(&hue)
            || (self.hue_low2..=self.hue_high2).contains(&hue)
    }
}

/// Which locator strategy produced the cells of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSource {
    FixedGrid,
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLayout {
    pub cells: Vec<Cell>,
    pub source: LayoutSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub positions: Vec<Position>,
    pub summary: String,
    pub layout: LayoutSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_trims_overhang() {
        let bbox = BoundingBox::new(250, 480, 100, 100);
        assert_eq!(bbox.clamp_to(300, 500), BoundingBox::new(250, 480, 50, 20));
    }

    #[test]
    fn test_clamp_to_outside_is_empty() {
        let bbox = BoundingBox::new(400, 10, 20, 20);
        let clamped = bbox.clamp_to(300, 500);
        assert!(clamped.is_empty());
        assert_eq!(clamped.area(), 0);
    }

    #[test]
    fn test_hue_range_wraps_around_zero() {
        let red = HueRange {
            hue_low: 0.0,
            hue_high: 20.0,
            hue_low2: 340.0,
            hue_high2: 360.0,
            sat_min: 50,
            val_min: 50,
        };

        assert!(red.contains(0.0, 255, 255));
        assert!(red.contains(355.0, 200, 200));
        assert!(!red.contains(120.0, 255, 255));
        assert!(!red.contains(0.0, 10, 255));
        assert!(!red.contains(0.0, 255, 10));
    }

    #[test]
    fn test_position_serializes_as_row_col() {
        let json = serde_json::to_value(Position { row: 1, col: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"row": 1, "col": 2}));
    }
}
