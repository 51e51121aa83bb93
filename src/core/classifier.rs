use crate::config::analysis::{AnalysisConfig, Sampling};
use crate::core::color_mask::HsvImage;
use crate::domain::model::{BoundingBox, Cell, HueRange, Position};

#[derive(Debug, Clone, Copy)]
pub struct GridClassifier {
    match_ratio: f64,
    sampling: Sampling,
    hue_range: HueRange,
}

impl GridClassifier {
    pub fn new(match_ratio: f64, sampling: Sampling, hue_range: HueRange) -> Self {
        Self {
            match_ratio,
            sampling,
            hue_range,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.match_ratio, config.sampling, config.hue_range)
    }

    /// Winning cells in row-major order, whatever order `cells` arrive in.
    pub fn classify(&self, hsv: &HsvImage, cells: &[Cell]) -> Vec<Position> {
        let mut ordered: Vec<&Cell> = cells.iter().collect();
        ordered.sort_by_key(|c| (c.row, c.col));

        let mut positions = Vec::new();
        for cell in ordered {
            let region = sampling_region(&cell.bbox, self.sampling, hsv.width(), hsv.height());
            let count = hsv.count_matching(&region, &self.hue_range);
            if count.is_empty() {
                tracing::debug!("Cell ({}, {}) has no pixels to sample, skipped", cell.row, cell.col);
                continue;
            }

            tracing::trace!(
                "Cell ({}, {}): {}/{} matching pixels",
                cell.row,
                cell.col,
                count.matched,
                count.total
            );

            if count.exceeds(self.match_ratio) {
                positions.push(Position::from(cell));
            }
        }
        positions
    }
}

/// Region of `bbox` actually sampled, clamped to the image.
pub fn sampling_region(bbox: &BoundingBox, sampling: Sampling, width: u32, height: u32) -> BoundingBox {
    match sampling {
        Sampling::Full => bbox.clamp_to(width, height),
        Sampling::Centroid => {
            let (cx, cy) = bbox.center();
            let radius = bbox.width.min(bbox.height) / 3;
            let x0 = cx.saturating_sub(radius);
            let y0 = cy.saturating_sub(radius);
            BoundingBox::new(x0, y0, cx + radius - x0, cy + radius - y0).clamp_to(width, height)
        }
    }
}
