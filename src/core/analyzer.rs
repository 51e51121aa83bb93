use crate::config::analysis::AnalysisConfig;
use crate::core::cell_locator::CellLocator;
use crate::core::classifier::GridClassifier;
use crate::core::color_mask::HsvImage;
use crate::core::formatter::{LocaleFormatter, ResultFormatter};
use crate::domain::model::AnalysisResult;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::Validate;
use image::RgbImage;

/// Decodes any format the `image` crate understands into an RGB buffer.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.to_rgb8())
}

/// Locate → classify → format over one image.
pub struct GridAnalyzer<F: ResultFormatter = LocaleFormatter> {
    locator: CellLocator,
    classifier: GridClassifier,
    formatter: F,
}

impl<F: ResultFormatter> GridAnalyzer<F> {
    pub fn new(config: AnalysisConfig, formatter: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            locator: CellLocator::new(config.locator),
            classifier: GridClassifier::from_config(&config),
            formatter,
        })
    }

    pub fn analyze(&self, image: &RgbImage) -> Result<AnalysisResult> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalyzerError::EmptyImage { width, height });
        }

        let layout = self.locator.locate(image);
        tracing::debug!("Located {} cells via {:?}", layout.cells.len(), layout.source);

        let hsv = HsvImage::from_rgb(image);
        let positions = self.classifier.classify(&hsv, &layout.cells);
        let summary = self.formatter.format(&positions);

        tracing::info!(
            "🎯 {}x{} image analyzed: {} winning position(s)",
            width,
            height,
            positions.len()
        );

        Ok(AnalysisResult {
            positions,
            summary,
            layout: layout.source,
        })
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        let image = decode_image(bytes)?;
        self.analyze(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::analysis::LocatorStrategy;
    use crate::core::formatter::Locale;
    use crate::domain::model::{LayoutSource, Position};
    use image::Rgb;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    fn analyzer(config: AnalysisConfig) -> GridAnalyzer {
        GridAnalyzer::new(config, LocaleFormatter::new(Locale::En)).unwrap()
    }

    fn board_with_red_cell() -> RgbImage {
        let mut image = RgbImage::new(300, 500);
        draw_filled_rect_mut(&mut image, Rect::at(200, 100).of_size(100, 100), Rgb([255, 0, 0]));
        image
    }

    #[test]
    fn test_single_red_cell_scenario() {
        let result = analyzer(AnalysisConfig::loose())
            .analyze(&board_with_red_cell())
            .unwrap();

        assert_eq!(result.positions, vec![Position { row: 1, col: 2 }]);
        assert_eq!(result.summary, "column 3, cell 2");
        assert_eq!(result.layout, LayoutSource::FixedGrid);
    }

    #[test]
    fn test_all_black_scenario() {
        let result = analyzer(AnalysisConfig::loose())
            .analyze(&RgbImage::new(300, 500))
            .unwrap();

        assert!(result.positions.is_empty());
        assert_eq!(result.summary, "No winning positions found");
    }

    #[test]
    fn test_strict_profile_falls_back_and_still_finds_cell() {
        let mut config = AnalysisConfig::strict();
        config.locator.strategy = LocatorStrategy::Structural;

        let result = analyzer(config).analyze(&board_with_red_cell()).unwrap();
        assert_eq!(result.layout, LayoutSource::FixedGrid);
        assert_eq!(result.positions, vec![Position { row: 1, col: 2 }]);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = analyzer(AnalysisConfig::strict());
        let image = board_with_red_cell();
        assert_eq!(
            analyzer.analyze(&image).unwrap(),
            analyzer.analyze(&image).unwrap()
        );
    }

    #[test]
    fn test_empty_image_is_terminal_error() {
        let err = analyzer(AnalysisConfig::loose())
            .analyze(&RgbImage::new(0, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::EmptyImage {
                width: 0,
                height: 0
            }
        ));
    }

    #[test]
    fn test_undecodable_bytes_are_terminal_error() {
        let err = analyzer(AnalysisConfig::loose())
            .analyze_bytes(b"definitely not a png")
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Decode(_)));
        assert!(err.is_acquisition());
    }

    #[test]
    fn test_analyze_bytes_decodes_png() {
        let mut png = Vec::new();
        board_with_red_cell()
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let result = analyzer(AnalysisConfig::loose()).analyze_bytes(&png).unwrap();
        assert_eq!(result.positions, vec![Position { row: 1, col: 2 }]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AnalysisConfig::loose();
        config.match_ratio = -0.1;
        assert!(GridAnalyzer::new(config, LocaleFormatter::default()).is_err());
    }
}
