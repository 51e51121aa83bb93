pub mod analyzer;
pub mod cell_locator;
pub mod classifier;
pub mod color_mask;
pub mod formatter;

pub use crate::domain::model::{AnalysisResult, BoundingBox, Cell, HueRange, Position};
pub use crate::domain::ports::{ConfigProvider, ImageSource};
pub use crate::utils::error::Result;
