use std::ops::Deref;

use super::mask::MaskPattern;
use super::tables::{
    EccInfo, ALIGNMENT_PATTERN_POSITIONS, ECC_INFO, REMAINDER_BITS, TOTAL_CODEWORDS,
};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub const fn new(version: u8) -> Self {
        debug_assert!(1 <= version && version <= 40, "Invalid version");
        Self(version)
    }

    /// Modules per side, quiet zone excluded.
    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.0 as usize - 1] as usize
    }

    pub fn ecc_info(self, ec_level: ECLevel) -> &'static EccInfo {
        &ECC_INFO[self.0 as usize - 1][ec_level as usize]
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 as usize - 1]
    }

    pub fn remainder_bits(self) -> usize {
        REMAINDER_BITS[self.0 as usize - 1]
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }

    /// 18-bit version word: 6 version bits followed by a BCH(18,6) remainder.
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only present from version 7: {}", self.0);

        let data = (self.0 as u32) << VERSION_ECC_BIT_LEN;
        data | bch_remainder(data, VERSION_INFO_GENERATOR)
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Two-bit indicator stored in the format word.
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub const fn from_format_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Self::L,
            0b00 => Self::M,
            0b11 => Self::Q,
            _ => Self::H,
        }
    }
}

// Format information
//------------------------------------------------------------------------------

/// 15-bit format word for the ec level and mask, BCH(15,5) protected and masked.
pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = ((ec_level.format_bits() << 3) | *mask as u32) << FORMAT_ECC_BIT_LEN;
    (data | bch_remainder(data, FORMAT_INFO_GENERATOR)) ^ FORMAT_INFO_MASK
}

/// Undoes the fixed mask and checks the BCH remainder. Returns `None` for any word
/// that isn't a valid format codeword.
pub fn decode_format_info(bits: u32) -> Option<(ECLevel, MaskPattern)> {
    if bits >> FORMAT_INFO_BIT_LEN != 0 {
        return None;
    }
    let unmasked = bits ^ FORMAT_INFO_MASK;
    if bch_remainder(unmasked, FORMAT_INFO_GENERATOR) != 0 {
        return None;
    }
    let data = unmasked >> FORMAT_ECC_BIT_LEN;
    Some((ECLevel::from_format_bits(data >> 3), MaskPattern::new((data & 0b111) as u8)))
}

// Polynomial remainder over GF(2). Generator is xor'ed, left aligned, until the
// remainder is shorter than the generator
fn bch_remainder(data: u32, generator: u32) -> u32 {
    let gen_len = u32::BITS - generator.leading_zeros();
    let mut rem = data;
    loop {
        let rem_len = u32::BITS - rem.leading_zeros();
        if rem_len < gen_len {
            return rem;
        }
        rem ^= generator << (rem_len - gen_len);
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_ECC_BIT_LEN: usize = 10;

const VERSION_ECC_BIT_LEN: usize = 12;

const FORMAT_INFO_GENERATOR: u32 = 0b10100110111;

const VERSION_INFO_GENERATOR: u32 = 0b1111100100101;

const FORMAT_INFO_MASK: u32 = 0b101010000010010;

// Format bit i (lsb first) sits at index i. Negative indices wrap from the far edge
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

// Version bit i (lsb first) in the 6x3 block beside the top right finder
pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (0, -11),
    (0, -10),
    (0, -9),
    (1, -11),
    (1, -10),
    (1, -9),
    (2, -11),
    (2, -10),
    (2, -9),
    (3, -11),
    (3, -10),
    (3, -9),
    (4, -11),
    (4, -10),
    (4, -9),
    (5, -11),
    (5, -10),
    (5, -9),
];

// Transpose of the top right block
pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-11, 0),
    (-10, 0),
    (-9, 0),
    (-11, 1),
    (-10, 1),
    (-9, 1),
    (-11, 2),
    (-10, 2),
    (-9, 2),
    (-11, 3),
    (-10, 3),
    (-9, 3),
    (-11, 4),
    (-10, 4),
    (-9, 4),
    (-11, 5),
    (-10, 5),
    (-9, 5),
];
