use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Image host unreachable: {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Image request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height}), no analysis possible")]
    EmptyImage { width: u32, height: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 取得或解碼圖片失敗
    Acquisition,
    /// 圖片已解碼但無法分析
    Analysis,
    Configuration,
    Request,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::Unreachable { .. }
            | AnalyzerError::HttpStatus { .. }
            | AnalyzerError::Decode(_)
            | AnalyzerError::IoError(_) => ErrorCategory::Acquisition,
            AnalyzerError::EmptyImage { .. } => ErrorCategory::Analysis,
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AnalyzerError::InvalidRequest { .. } | AnalyzerError::SerializationError(_) => {
                ErrorCategory::Request
            }
        }
    }

    pub fn is_acquisition(&self) -> bool {
        self.category() == ErrorCategory::Acquisition
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Acquisition => format!("Failed to load image: {}", self),
            ErrorCategory::Analysis => format!("Image could not be analyzed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Request => format!("Bad request: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalyzerError::Unreachable { .. } => {
                "Check the network connection and that the image host is reachable"
            }
            AnalyzerError::HttpStatus { .. } => {
                "Make sure the URL points directly at a publicly accessible image"
            }
            AnalyzerError::Decode(_) => "The payload is not a supported image (PNG, JPEG, ...)",
            AnalyzerError::EmptyImage { .. } => "Provide a non-empty screenshot of the board",
            AnalyzerError::IoError(_) => "Check that the file exists and is readable",
            AnalyzerError::SerializationError(_) | AnalyzerError::InvalidRequest { .. } => {
                "Send a JSON body of the form {\"image_url\": \"https://...\"}"
            }
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => {
                "Review the configuration file, CLI flags and environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_separate_acquisition_from_analysis() {
        let status = AnalyzerError::HttpStatus {
            url: "https://example.com/a.png".to_string(),
            status: 404,
        };
        let empty = AnalyzerError::EmptyImage {
            width: 0,
            height: 0,
        };

        assert_eq!(status.category(), ErrorCategory::Acquisition);
        assert!(status.is_acquisition());
        assert_eq!(empty.category(), ErrorCategory::Analysis);
        assert!(!empty.is_acquisition());
    }

    #[test]
    fn test_user_friendly_message_mentions_cause() {
        let err = AnalyzerError::MissingConfigError {
            field: "image_url".to_string(),
        };
        assert!(err.user_friendly_message().contains("image_url"));
        assert!(!err.recovery_suggestion().is_empty());
    }
}
