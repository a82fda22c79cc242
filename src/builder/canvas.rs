use crate::common::bitstream::BitStream;
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{
    format_info, ECLevel, Version, FORMAT_INFO_BIT_LEN, FORMAT_INFO_COORDS_MAIN,
    FORMAT_INFO_COORDS_SIDE, VERSION_INFO_BIT_LEN, VERSION_INFO_COORDS_BL,
    VERSION_INFO_COORDS_TR,
};

// Axis aligned rectangle of modules reserved for a function pattern. Spans columns
// x..x + w and rows y..y + h
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Region {
    x: i16,
    y: i16,
    w: i16,
    h: i16,
}

impl Region {
    const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self { x, y, w, h }
    }

    fn contains(&self, r: i16, c: i16) -> bool {
        self.x <= c && c < self.x + self.w && self.y <= r && r < self.y + self.h
    }

    fn intersects(&self, other: &Region) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Module matrix under construction. Function patterns block their area so data
/// placement and masking leave it alone. Dark modules are `true`.
#[derive(Debug, Clone)]
pub struct Canvas {
    grid: Vec<bool>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    blocked: Vec<Region>,
    mask: Option<MaskPattern>,
}

// Canvas type for builder
//------------------------------------------------------------------------------

impl Canvas {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![false; w * w], w, ver, ecl, blocked: Vec::new(), mask: None }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn modules(&self) -> &[bool] {
        &self.grid
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match (self.is_blocked(i, j), self.get(i, j)) {
                    (true, true) => 'f',
                    (true, false) => 'F',
                    (false, true) => 'd',
                    (false, false) => '.',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: {c}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> bool {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, dark: bool) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = dark;
    }

    pub fn is_blocked(&self, r: i16, c: i16) -> bool {
        self.blocked.iter().any(|b| b.contains(r, c))
    }

    fn block(&mut self, region: Region) {
        self.blocked.push(region);
    }
}


// Finder pattern & separators
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_finder_patterns(&mut self) {
        let w = self.w as i16;
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, w - 4);
        self.draw_finder_pattern_at(w - 4, 3);
    }

    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        for i in -3..=3 {
            for j in -3..=3 {
                let dark = !matches!((i, j), (2 | -2, -2..=2) | (-2..=2, 2 | -2));
                self.set(r + i, c + j, dark);
            }
        }
        self.block(Region::new(c - 3, r - 3, 7, 7));
    }

    // Separators are light, which the grid already is
    fn reserve_separators(&mut self) {
        let w = self.w as i16;
        self.block(Region::new(7, 0, 1, 8));
        self.block(Region::new(0, 7, 7, 1));
        self.block(Region::new(0, w - 8, 8, 1));
        self.block(Region::new(7, w - 7, 1, 7));
        self.block(Region::new(w - 8, 0, 1, 8));
        self.block(Region::new(w - 7, 7, 7, 1));
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Centers whose footprint overlaps an earlier pattern are skipped
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let region = Region::new(c - 2, r - 2, 5, 5);
        if self.blocked.iter().any(|b| b.intersects(&region)) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let dark = matches!((i, j), (-2 | 2, _) | (_, -2 | 2) | (0, 0));
                self.set(r + i, c + j, dark);
            }
        }
        self.block(region);
    }
}


// Timing pattern & dark module
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_timing_patterns(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let dark = i & 1 == 0;
            self.set(6, i, dark);
            self.set(i, 6, dark);
        }
        self.block(Region::new(6, 8, 1, w - 16));
        self.block(Region::new(8, 6, w - 16, 1));
    }

    fn draw_dark_module(&mut self) {
        let r = *self.ver as i16 * 4 + 9;
        self.set(r, 8, true);
        self.block(Region::new(8, r, 1, 1));
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::Canvas;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_timing_pattern_1() {
        let mut canvas = Canvas::new(Version::new(1), ECLevel::L);
        canvas.draw_timing_patterns();
        canvas.draw_dark_module();
        assert_eq!(
            canvas.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ........f............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// Format & version info
//------------------------------------------------------------------------------

impl Canvas {
    fn reserve_format_area(&mut self) {
        let w = self.w as i16;
        self.block(Region::new(8, 0, 1, 6));
        self.block(Region::new(8, 7, 1, 1));
        self.block(Region::new(0, 8, 6, 1));
        self.block(Region::new(7, 8, 2, 1));
        self.block(Region::new(w - 8, 8, 8, 1));
        self.block(Region::new(8, w - 7, 1, 7));
    }

    fn reserve_version_area(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let w = self.w as i16;
        self.block(Region::new(w - 11, 0, 3, 6));
        self.block(Region::new(0, w - 11, 6, 3));
    }

    fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_SIDE);
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, &VERSION_INFO_COORDS_BL);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, &VERSION_INFO_COORDS_TR);
    }

    // Bit i of the number, counted from the lsb, goes to coords[i]
    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) {
        debug_assert!(coords.len() == bit_len, "Coordinate count doesn't match bit length");

        for (i, (r, c)) in coords.iter().enumerate() {
            self.set(*r, *c, (number >> i) & 1 == 1);
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl Canvas {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.reserve_separators();
        self.draw_alignment_patterns();
        self.draw_timing_patterns();
        self.draw_dark_module();
        self.reserve_format_area();
        self.reserve_version_area();
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Canvas {
    /// Places the interleaved codewords, msb first, followed by the light remainder bits.
    pub fn draw_encoding_region(&mut self, payload: &[u8]) {
        debug_assert!(
            payload.len() == self.ver.total_codewords(),
            "Payload length {} doesn't match codeword capacity {}",
            payload.len(),
            self.ver.total_codewords()
        );

        let ver = self.ver;
        let mut coords = EncRegionIter::new(ver).filter(|&(r, c)| !self.is_blocked(r, c));
        let mut cells = Vec::with_capacity(payload.len() * 8 + ver.remainder_bits());
        for bit in BitStream::from(payload) {
            match coords.next() {
                Some((r, c)) => cells.push((r, c, bit)),
                None => break,
            }
        }
        cells.extend(coords.take(ver.remainder_bits()).map(|(r, c)| (r, c, false)));
        for (r, c, bit) in cells {
            self.set(r, c, bit);
        }
    }

    /// Draws the format info (and version info from version 7) for the mask, then flips
    /// every unblocked module the mask function selects.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        debug_assert!(self.mask.is_none(), "Canvas is already masked");

        self.mask = Some(pattern);
        self.draw_format_info(format_info(self.ecl, pattern));
        self.draw_version_info();

        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(c, r) && !self.is_blocked(r, c) {
                    let index = self.coord_to_index(r, c);
                    self.grid[index] = !self.grid[index];
                }
            }
        }
    }
}
