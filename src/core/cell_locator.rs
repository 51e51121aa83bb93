//! Splits a board screenshot into its 5×3 cells.
//!
//! Two strategies exist. The fixed grid divides the image proportionally and always
//! succeeds. Structural detection looks for square-ish closed contours in the edge map
//! and is only trusted when it finds at least one candidate per cell; otherwise the
//! fixed grid is used for the whole board. Structural results are assigned to
//! `(row, col)` purely by their `(y, x)` reading order, which assumes the board is
//! axis-aligned and has no occluded cells. A skewed photo is mis-assigned silently.

use crate::config::analysis::{LocatorConfig, LocatorStrategy};
use crate::domain::model::{
    BoundingBox, Cell, CellLayout, LayoutSource, CELL_COUNT, GRID_COLS, GRID_ROWS,
};
use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType};

#[derive(Debug, Clone)]
pub struct CellLocator {
    config: LocatorConfig,
}

impl CellLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn locate(&self, image: &RgbImage) -> CellLayout {
        if self.config.strategy == LocatorStrategy::Structural {
            let candidates = self.detect_candidates(image);
            let found = candidates.len();
            match cells_from_candidates(candidates) {
                Some(cells) => {
                    tracing::debug!(
                        "Structural detection found {} candidate boxes, using first {}",
                        found,
                        CELL_COUNT
                    );
                    return CellLayout {
                        cells,
                        source: LayoutSource::Structural,
                    };
                }
                None => {
                    tracing::debug!(
                        "Structural detection found only {} of {} cells, falling back to fixed grid",
                        found,
                        CELL_COUNT
                    );
                }
            }
        }

        CellLayout {
            cells: fixed_grid(image.width(), image.height()),
            source: LayoutSource::FixedGrid,
        }
    }

    /// Square-ish boxes found in the image, sorted by `(y, x)`.
    pub fn detect_candidates(&self, image: &RgbImage) -> Vec<BoundingBox> {
        let mut gray = image::imageops::grayscale(image);
        // canny 本身已先做 σ=1.4 的高斯模糊，這裡只是額外的平滑
        if self.config.blur_sigma > 0.0 {
            gray = imageproc::filter::gaussian_blur_f32(&gray, self.config.blur_sigma);
        }
        let edges = imageproc::edges::canny(&gray, self.config.canny_low, self.config.canny_high);
        self.candidates_from_edges(&edges)
    }

    /// Outer contour boxes of a binary edge map that pass the area and aspect filters.
    pub fn candidates_from_edges(&self, edges: &GrayImage) -> Vec<BoundingBox> {
        let mut boxes: Vec<BoundingBox> = find_contours::<u32>(edges)
            .iter()
            .filter(|c| c.border_type == BorderType::Outer)
            .filter_map(|c| contour_bounds(&c.points))
            .filter(|b| self.is_cell_shaped(b))
            .collect();

        boxes.sort_by_key(|b| (b.y, b.x));
        boxes
    }

    fn is_cell_shaped(&self, bbox: &BoundingBox) -> bool {
        let aspect = bbox.aspect_ratio();
        aspect > self.config.aspect_min
            && aspect < self.config.aspect_max
            && bbox.area() > self.config.min_area
    }
}

fn contour_bounds(points: &[imageproc::point::Point<u32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox::new(
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}

/// Takes the first 15 sorted candidates, `i`-th box → `(i / 3, i % 3)`.
/// Returns `None` when there are not enough candidates to fill the board.
pub fn cells_from_candidates(candidates: Vec<BoundingBox>) -> Option<Vec<Cell>> {
    if candidates.len() < CELL_COUNT {
        return None;
    }

    let cells = candidates
        .into_iter()
        .take(CELL_COUNT)
        .enumerate()
        .map(|(i, bbox)| Cell {
            bbox,
            row: i as u32 / GRID_COLS,
            col: i as u32 % GRID_COLS,
        })
        .collect();
    Some(cells)
}

/// Proportional 5×3 partition; remainder pixels at the bottom and right are left out.
pub fn fixed_grid(width: u32, height: u32) -> Vec<Cell> {
    let cell_height = height / GRID_ROWS;
    let cell_width = width / GRID_COLS;

    let mut cells = Vec::with_capacity(CELL_COUNT);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            cells.push(Cell {
                bbox: BoundingBox::new(col * cell_width, row * cell_height, cell_width, cell_height),
                row,
                col,
            });
        }
    }
    cells
}
