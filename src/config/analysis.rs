use crate::domain::model::HueRange;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Loose red: OpenCV's `H 0..10 ∪ 170..180, S ≥ 50, V ≥ 50` expressed in degrees.
///
/// OpenCV stores 8-bit hue as `round(deg / 2)`, so `H ≤ 10` reaches 21° and `H ≥ 170`
/// starts at 339°.
pub const RED_LOOSE: HueRange = HueRange {
    hue_low: 0.0,
    hue_high: 21.0,
    hue_low2: 339.0,
    hue_high2: 360.0,
    sat_min: 50,
    val_min: 50,
};

/// Strict red: same hue bands, higher saturation/value floors so washed-out
/// neighbours do not bleed into a centroid sample.
pub const RED_STRICT: HueRange = HueRange {
    hue_low: 0.0,
    hue_high: 21.0,
    hue_low2: 339.0,
    hue_high2: 360.0,
    sat_min: 100,
    val_min: 100,
};

pub const LOOSE_MATCH_RATIO: f64 = 0.05;
pub const STRICT_MATCH_RATIO: f64 = 0.10;

/// Extra Gaussian smoothing before edge detection; 0 disables it.
///
/// `imageproc::edges::canny` always blurs with σ = 1.4 itself, which already stands in
/// for OpenCV's 5×5 pre-blur. A non-zero value here stacks on top of that.
pub const BLUR_SIGMA: f32 = 0.0;
/// Hysteresis thresholds on imageproc's `hypot(gx, gy)` Sobel magnitude.
///
/// A 50-level luminance step (saturated red on a dark background) peaks around 110 after
/// canny's own blur, so it must clear `CANNY_HIGH` comfortably.
pub const CANNY_LOW: f32 = 25.0;
pub const CANNY_HIGH: f32 = 60.0;
/// Largest Sobel magnitude an 8-bit image can produce (`4 · 255 · √2`).
pub const CANNY_MAX: f32 = 1443.0;
/// Candidate cell boxes must be strictly larger than this (px²).
pub const MIN_CELL_AREA: u64 = 1000;
pub const ASPECT_MIN: f64 = 0.7;
pub const ASPECT_MAX: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// 5% threshold, loose red, whole-cell sampling on the fixed grid
    #[default]
    Loose,
    /// 10% threshold, strict red, centroid sampling on detected cells
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    /// Whole cell box
    #[default]
    Full,
    /// Square of radius min(w, h) / 3 around the cell center
    Centroid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LocatorStrategy {
    /// Proportional 5×3 partition only
    #[default]
    Fixed,
    /// Contour detection, falling back to the fixed grid below 15 candidates
    Structural,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" => Ok(Profile::Loose),
            "strict" => Ok(Profile::Strict),
            other => Err(format!("unknown profile '{}', expected loose or strict", other)),
        }
    }
}

impl FromStr for Sampling {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Sampling::Full),
            "centroid" => Ok(Sampling::Centroid),
            other => Err(format!("unknown sampling '{}', expected full or centroid", other)),
        }
    }
}

impl FromStr for LocatorStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(LocatorStrategy::Fixed),
            "structural" => Ok(LocatorStrategy::Structural),
            other => Err(format!(
                "unknown locator strategy '{}', expected fixed or structural",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub strategy: LocatorStrategy,
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    pub min_area: u64,
    pub aspect_min: f64,
    pub aspect_max: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            strategy: LocatorStrategy::Fixed,
            blur_sigma: BLUR_SIGMA,
            canny_low: CANNY_LOW,
            canny_high: CANNY_HIGH,
            min_area: MIN_CELL_AREA,
            aspect_min: ASPECT_MIN,
            aspect_max: ASPECT_MAX,
        }
    }
}

/// Everything the pipeline needs to turn one image into winning positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub match_ratio: f64,
    pub sampling: Sampling,
    pub hue_range: HueRange,
    pub locator: LocatorConfig,
}

impl AnalysisConfig {
    pub fn loose() -> Self {
        Self {
            match_ratio: LOOSE_MATCH_RATIO,
            sampling: Sampling::Full,
            hue_range: RED_LOOSE,
            locator: LocatorConfig::default(),
        }
    }

    pub fn strict() -> Self {
        Self {
            match_ratio: STRICT_MATCH_RATIO,
            sampling: Sampling::Centroid,
            hue_range: RED_STRICT,
            locator: LocatorConfig {
                strategy: LocatorStrategy::Structural,
                ..LocatorConfig::default()
            },
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Loose => Self::loose(),
            Profile::Strict => Self::strict(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::loose()
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        validate_range("analysis.match_ratio", self.match_ratio, 0.0, 1.0)?;

        // 每個色相區間都必須是 low <= high，否則該區間永遠不會命中
        let hue = &self.hue_range;
        validate_range("analysis.hue_range.hue_low", hue.hue_low, 0.0, 360.0)?;
        validate_range("analysis.hue_range.hue_high", hue.hue_high, hue.hue_low, 360.0)?;
        validate_range("analysis.hue_range.hue_low2", hue.hue_low2, 0.0, 360.0)?;
        validate_range("analysis.hue_range.hue_high2", hue.hue_high2, hue.hue_low2, 360.0)?;

        let locator = &self.locator;
        // 0 表示不額外模糊；gaussian_blur_f32 只接受正的 sigma
        validate_range("locator.blur_sigma", locator.blur_sigma, 0.0, 20.0)?;
        validate_range("locator.canny_low", locator.canny_low, 0.0, locator.canny_high)?;
        validate_range("locator.canny_high", locator.canny_high, locator.canny_low, CANNY_MAX)?;
        validate_range("locator.aspect_min", locator.aspect_min, 0.0, locator.aspect_max)?;
        if !(locator.aspect_min < locator.aspect_max) {
            return Err(AnalyzerError::InvalidConfigValueError {
                field: "locator.aspect_max".to_string(),
                value: locator.aspect_max.to_string(),
                reason: format!(
                    "Value must be greater than locator.aspect_min ({})",
                    locator.aspect_min
                ),
            });
        }

        Ok(())
    }
}
