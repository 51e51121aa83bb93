#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// 300 wide × 500 tall black board, so every fixed-grid cell is 100×100.
pub fn black_board() -> RgbImage {
    RgbImage::new(300, 500)
}

/// Black board with a solid red 100×100 block over each listed `(row, col)`.
pub fn board_with_red_cells(cells: &[(u32, u32)]) -> RgbImage {
    let mut image = black_board();
    for &(row, col) in cells {
        draw_filled_rect_mut(
            &mut image,
            Rect::at(col as i32 * 100, row as i32 * 100).of_size(100, 100),
            RED,
        );
    }
    image
}

pub fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    png
}
