use crate::core::analyzer::decode_image;
use crate::domain::ports::ImageSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use image::RgbImage;

/// Reads screenshots from the local filesystem; `location` is a path.
#[derive(Debug, Clone, Default)]
pub struct FileImageSource;

impl FileImageSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn fetch(&self, location: &str) -> Result<RgbImage> {
        tracing::debug!("Reading image from: {}", location);
        let data = tokio::fs::read(location).await?;
        decode_image(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AnalyzerError;
    use image::Rgb;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_png_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.png");
        RgbImage::from_pixel(30, 50, Rgb([255, 0, 0])).save(&path).unwrap();

        let image = FileImageSource::new()
            .fetch(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(image.dimensions(), (30, 50));
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        let err = FileImageSource::new()
            .fetch(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::IoError(_)));
    }

    #[tokio::test]
    async fn test_garbage_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = FileImageSource::new()
            .fetch(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Decode(_)));
    }
}
