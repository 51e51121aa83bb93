//! Hue/saturation/value view of an image and hue-range masking over regions of it.

use crate::domain::model::{BoundingBox, HueRange};
use image::{GrayImage, Luma, RgbImage};
use palette::{FromColor, Hsv, Srgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvPixel {
    /// Degrees in `[0, 360)`; achromatic pixels report 0.
    pub hue: f32,
    pub saturation: u8,
    pub value: u8,
}

impl HsvPixel {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let hsv: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());
        Self {
            hue: hsv.hue.into_positive_degrees(),
            saturation: to_u8(hsv.saturation),
            value: to_u8(hsv.value),
        }
    }
}

fn to_u8(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Raw counts for one region; the caller owns the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskCount {
    pub matched: u64,
    pub total: u64,
}

impl MaskCount {
    /// A zero-area region carries no evidence either way.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn exceeds(&self, ratio: f64) -> bool {
        self.matched as f64 > ratio * self.total as f64
    }
}

/// HSV copy of an image, converted once and shared by every cell.
#[derive(Debug, Clone)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<HsvPixel>,
}

impl HsvImage {
    pub fn from_rgb(image: &RgbImage) -> Self {
        let pixels = image
            .pixels()
            .map(|p| HsvPixel::from_rgb(p[0], p[1], p[2]))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&HsvPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
    }

    fn rows<'a>(&'a self, region: &BoundingBox) -> impl Iterator<Item = &'a [HsvPixel]> + 'a {
        let stride = self.width as usize;
        let x0 = region.x as usize;
        let x1 = x0 + region.width as usize;
        (region.y..region.y + region.height).map(move |y| {
            let start = y as usize * stride;
            &self.pixels[start + x0..start + x1]
        })
    }

    /// Counts pixels of `region` (clamped to the image) that fall inside `range`.
    pub fn count_matching(&self, region: &BoundingBox, range: &HueRange) -> MaskCount {
        let region = region.clamp_to(self.width, self.height);
        if region.is_empty() {
            return MaskCount::default();
        }

        let matched = self
            .rows(&region)
            .flat_map(|row| row.iter())
            .filter(|p| range.contains(p.hue, p.saturation, p.value))
            .count() as u64;

        MaskCount {
            matched,
            total: region.area(),
        }
    }

    /// Binary mask of `region` (clamped): 255 where the pixel is in `range`, 0 elsewhere.
    pub fn mask(&self, region: &BoundingBox, range: &HueRange) -> GrayImage {
        let region = region.clamp_to(self.width, self.height);
        let mut mask = GrayImage::new(region.width, region.height);
        for (dy, row) in self.rows(&region).enumerate() {
            for (dx, p) in row.iter().enumerate() {
                if range.contains(p.hue, p.saturation, p.value) {
                    mask.put_pixel(dx as u32, dy as u32, Luma([255]));
                }
            }
        }
        mask
    }
}
