use std::ops::Deref;

use tracing::trace;

use crate::builder::Canvas;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// x is the column, y is the row
mod mask_functions {
    pub fn checkerboard(x: i16, y: i16) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: i16, y: i16) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: i16, _: i16) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: i16, y: i16) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: i16, y: i16) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: i16, y: i16) -> bool {
        let p = x as i32 * y as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(x: i16, y: i16) -> bool {
        let p = x as i32 * y as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(x: i16, y: i16) -> bool {
        let p = x as i32 * y as i32;
        (((x + y) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Penalty of every candidate, indexed by mask pattern. Each candidate is scored on
/// its own copy of the unmasked canvas.
pub fn mask_scores(canvas: &Canvas) -> [u32; 8] {
    let mut scores = [0; 8];
    for (mask, score) in MaskPattern::all().zip(scores.iter_mut()) {
        let mut candidate = canvas.clone();
        candidate.apply_mask(mask);
        *score = compute_total_penalty(&candidate);
        trace!(mask = *mask, score = *score, "Scored mask candidate");
    }
    scores
}

/// Masks the canvas with the lowest scoring pattern. Ties go to the lower index.
pub fn apply_best_mask(canvas: &mut Canvas) -> MaskPattern {
    let scores = mask_scores(canvas);
    let best_mask = MaskPattern::all()
        .min_by_key(|m| scores[**m as usize])
        .unwrap_or(MaskPattern(0));
    canvas.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(canvas: &Canvas) -> u32 {
    let adj_pen = compute_adjacent_penalty(canvas);
    let blk_pen = compute_block_penalty(canvas);
    let fp_pen_h = compute_finder_pattern_penalty(canvas, true);
    let fp_pen_v = compute_finder_pattern_penalty(canvas, false);
    let bal_pen = compute_balance_penalty(canvas);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Rows and columns are walked together. A run scores 3 when it reaches 5 modules and
// 1 more for each module after that
fn compute_adjacent_penalty(canvas: &Canvas) -> u32 {
    let mut pen = 0;
    let w = canvas.width() as i16;
    for i in 0..w {
        let mut last_row = canvas.get(i, 0);
        let mut last_col = canvas.get(0, i);
        let mut row_len = 0;
        let mut col_len = 0;
        for j in 0..w {
            let row_clr = canvas.get(i, j);
            if row_clr == last_row {
                row_len += 1;
            } else {
                last_row = row_clr;
                row_len = 1;
            }
            pen += run_penalty(row_len);

            let col_clr = canvas.get(j, i);
            if col_clr == last_col {
                col_len += 1;
            } else {
                last_col = col_clr;
                col_len = 1;
            }
            pen += run_penalty(col_len);
        }
    }
    pen
}

fn run_penalty(run_len: u32) -> u32 {
    match run_len {
        5 => 3,
        6.. => 1,
        _ => 0,
    }
}

fn compute_block_penalty(canvas: &Canvas) -> u32 {
    let mut pen = 0;
    let w = canvas.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = canvas.get(r, c);
            if clr == canvas.get(r + 1, c)
                && clr == canvas.get(r, c + 1)
                && clr == canvas.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(canvas: &Canvas, is_hor: bool) -> u32 {
    static PATTERNS: [[bool; 11]; 2] = [
        [true, false, true, true, true, false, true, false, false, false, false],
        [false, false, false, false, true, false, true, true, true, false, true],
    ];

    let mut pen = 0;
    let w = canvas.width() as i16;
    for i in 0..w {
        let get = |j: i16| if is_hor { canvas.get(i, j) } else { canvas.get(j, i) };
        for j in 0..w - 10 {
            let matches = |pattern: &[bool; 11]| (j..j + 11).map(get).eq(pattern.iter().copied());
            if PATTERNS.iter().any(matches) {
                pen += 40;
            }
        }
    }
    pen
}

// Deviation from a 50% dark ratio, counted in whole 5% steps
fn compute_balance_penalty(canvas: &Canvas) -> u32 {
    let dark_cnt = canvas.count_dark_modules();
    let w = canvas.width();
    let tot = w * w;
    let step = (dark_cnt * 20 / tot) as i32;
    ((step - 10).abs().min((step - 9).abs()) * 10) as u32
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{
        apply_best_mask, compute_adjacent_penalty, compute_balance_penalty,
        compute_block_penalty, compute_finder_pattern_penalty, mask_scores, run_penalty,
        MaskPattern,
    };
    use crate::builder::Canvas;
    use crate::common::metadata::{ECLevel, Version};

    fn blank_canvas() -> Canvas {
        Canvas::new(Version::new(1), ECLevel::L)
    }

    fn checkerboard_canvas() -> Canvas {
        let mut canvas = blank_canvas();
        for r in 0..21 {
            for c in 0..21 {
                canvas.set(r, c, (r + c) & 1 == 0);
            }
        }
        canvas
    }

    #[test_case(0, 0, 0, true)]
    #[test_case(0, 1, 0, false)]
    #[test_case(1, 3, 1, false)]
    #[test_case(2, 3, 5, true)]
    #[test_case(3, 1, 2, true)]
    #[test_case(4, 3, 1, false)]
    #[test_case(4, 3, 2, true)]
    #[test_case(5, 2, 3, true)]
    #[test_case(6, 1, 5, false)]
    #[test_case(7, 2, 2, false)]
    fn test_mask_functions(pattern: u8, x: i16, y: i16, exp: bool) {
        assert_eq!(MaskPattern::new(pattern).mask_function()(x, y), exp);
    }

    #[test_case(4, 0)]
    #[test_case(5, 3)]
    #[test_case(6, 1)]
    #[test_case(12, 1)]
    fn test_run_penalty(run_len: u32, exp: u32) {
        assert_eq!(run_penalty(run_len), exp);
    }

    #[test]
    fn test_adjacent_penalty_blank() {
        // 21 rows + 21 columns, each one run of 21: 3 + 16
        assert_eq!(compute_adjacent_penalty(&blank_canvas()), 42 * 19);
    }

    #[test]
    fn test_adjacent_penalty_checkerboard() {
        assert_eq!(compute_adjacent_penalty(&checkerboard_canvas()), 0);
    }

    #[test]
    fn test_block_penalty() {
        assert_eq!(compute_block_penalty(&blank_canvas()), 20 * 20 * 3);
        assert_eq!(compute_block_penalty(&checkerboard_canvas()), 0);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut canvas = blank_canvas();
        for (c, dark) in [1, 0, 1, 1, 1, 0, 1].into_iter().enumerate() {
            canvas.set(3, c as i16, dark == 1);
        }
        // Dark finder-like run followed by 4 light modules in row 3
        assert_eq!(compute_finder_pattern_penalty(&canvas, true), 40);
        assert_eq!(compute_finder_pattern_penalty(&canvas, false), 0);
    }

    #[test]
    fn test_finder_pattern_penalty_reversed() {
        let mut canvas = blank_canvas();
        for (r, dark) in [1, 0, 1, 1, 1, 0, 1].into_iter().enumerate() {
            canvas.set(r as i16 + 14, 5, dark == 1);
        }
        assert_eq!(compute_finder_pattern_penalty(&canvas, false), 40);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(compute_balance_penalty(&blank_canvas()), 90);
        assert_eq!(compute_balance_penalty(&checkerboard_canvas()), 0);
    }

    #[test]
    fn test_best_mask_is_first_lowest_score() {
        let mut canvas = Canvas::new(Version::new(2), ECLevel::Q);
        canvas.draw_all_function_patterns();
        canvas.draw_encoding_region(&[0b10110010; 44]);
        let scores = mask_scores(&canvas);
        let best = apply_best_mask(&mut canvas);
        let best_score = scores[*best as usize];
        assert!(scores[..*best as usize].iter().all(|s| *s > best_score));
        assert!(scores[*best as usize..].iter().all(|s| *s >= best_score));
        assert_eq!(canvas.mask(), Some(best));
    }

    #[test]
    fn test_mask_selection_is_deterministic() {
        let mut canvas = Canvas::new(Version::new(7), ECLevel::M);
        canvas.draw_all_function_patterns();
        canvas.draw_encoding_region(&[0x5A; 196]);
        let mut other = canvas.clone();
        assert_eq!(apply_best_mask(&mut canvas), apply_best_mask(&mut other));
        assert_eq!(canvas.modules(), other.modules());
    }
}
