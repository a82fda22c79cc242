use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::builder::QR;

// Rasterizing the finished symbol
//------------------------------------------------------------------------------

impl QR {
    /// Draws every module, quiet zone included, as a `module_px` wide square.
    pub fn to_image(&self, module_px: u32, dark: Rgb<u8>, light: Rgb<u8>) -> RgbImage {
        debug_assert!(module_px > 0, "Module size should be positive");

        let w = self.width() as u32;
        let mut img = RgbImage::from_pixel(w * module_px, w * module_px, light);
        for r in 0..w {
            for c in 0..w {
                if self.get(r as usize, c as usize) {
                    let rect = Rect::at((c * module_px) as i32, (r * module_px) as i32)
                        .of_size(module_px, module_px);
                    draw_filled_rect_mut(&mut img, rect, dark);
                }
            }
        }
        img
    }

    pub fn to_gray_image(&self, module_px: u32) -> GrayImage {
        debug_assert!(module_px > 0, "Module size should be positive");

        let w = self.width() as u32;
        let mut img = GrayImage::from_pixel(w * module_px, w * module_px, Luma([255]));
        for r in 0..w {
            for c in 0..w {
                if self.get(r as usize, c as usize) {
                    let rect = Rect::at((c * module_px) as i32, (r * module_px) as i32)
                        .of_size(module_px, module_px);
                    draw_filled_rect_mut(&mut img, rect, Luma([0]));
                }
            }
        }
        img
    }

    /// Text rendering for terminals with a dark background: light modules are drawn
    /// as full blocks, dark modules as spaces. Each module spans `module_sz` chars.
    pub fn to_str(&self, module_sz: usize) -> String {
        let w = self.width() * module_sz;
        let mut res = String::with_capacity(w * (w + 1) * 3);
        for i in 0..w {
            for j in 0..w {
                let dark = self.get(i / module_sz, j / module_sz);
                res.push(if dark { ' ' } else { '█' });
            }
            res.push('\n');
        }
        res
    }
}
