use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Yields `(row, col)` for every module outside the vertical timing column, in the
/// order codeword bits are placed. Column pairs are walked from the right edge, the
/// right module of a pair first, alternating upward and downward.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
    upward: bool,
    right: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w, upward: true, right: true }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let res = if self.right { (self.r, self.c) } else { (self.r, self.c - 1) };

        if self.right {
            self.right = false;
            return Some(res);
        }
        self.right = true;
        let next_r = if self.upward { self.r - 1 } else { self.r + 1 };
        if (0..self.width).contains(&next_r) {
            self.r = next_r;
        } else {
            self.upward = !self.upward;
            self.c -= 2;
            if self.c == VERT_TIMING_COL {
                self.c -= 1;
            }
        }
        Some(res)
    }
}


// Global constants
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;
