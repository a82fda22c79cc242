use super::Canvas;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{ECLevel, Version, FORMAT_INFO_COORDS_MAIN};

/// A finished QR symbol, surrounded by a light quiet zone. Dark modules are `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<bool>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
}

impl QR {
    pub(crate) fn new(canvas: &Canvas, mask: MaskPattern) -> Self {
        let sw = canvas.width();
        let w = sw + 2 * QUIET_ZONE_WIDTH;
        let mut grid = vec![false; w * w];
        for (r, row) in canvas.modules().chunks_exact(sw).enumerate() {
            let start = (r + QUIET_ZONE_WIDTH) * w + QUIET_ZONE_WIDTH;
            grid[start..start + sw].copy_from_slice(row);
        }
        Self { grid, w, ver: canvas.version(), ecl: canvas.ec_level(), mask }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Modules per side, quiet zone included.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Modules per side of the symbol alone.
    pub fn symbol_width(&self) -> usize {
        self.ver.width()
    }

    /// Module at row `r` and column `c`, counted from the outer edge of the quiet zone.
    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.w && c < self.w, "Module out of bounds: ({r}, {c})");

        self.grid[r * self.w + c]
    }

    /// Row major modules, quiet zone included.
    pub fn modules(&self) -> &[bool] {
        &self.grid
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    /// The 15-bit format word as stored beside the top left finder pattern.
    pub fn format_info(&self) -> u32 {
        let sw = self.symbol_width() as i16;
        FORMAT_INFO_COORDS_MAIN.iter().enumerate().fold(0, |acc, (i, &(r, c))| {
            let r = r.rem_euclid(sw) as usize + QUIET_ZONE_WIDTH;
            let c = c.rem_euclid(sw) as usize + QUIET_ZONE_WIDTH;
            acc | ((self.get(r, c) as u32) << i)
        })
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mask: {} }}",
            *self.ver, self.ecl, *self.mask
        )
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const QUIET_ZONE_WIDTH: usize = 4;
