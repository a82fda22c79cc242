use crate::common::metadata::{ECLevel, Version};
use crate::common::tables::CHAR_CAPACITY;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    pub const fn indicator(self) -> u8 {
        self as u8
    }

    /// Width of the character count indicator in the header.
    pub fn char_cnt_bits(self, version: Version) -> usize {
        let idx = match *version {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Self::Numeric => [10, 12, 14][idx],
            Self::Alphanumeric => [9, 11, 13][idx],
            Self::Byte => [8, 16, 16][idx],
        }
    }

    /// Max characters (bytes in byte mode) the version holds at the ec level.
    pub fn capacity(self, version: Version, ec_level: ECLevel) -> usize {
        let mode_idx = match self {
            Self::Numeric => 0,
            Self::Alphanumeric => 1,
            Self::Byte => 2,
        };
        CHAR_CAPACITY[ec_level as usize][mode_idx][*version as usize - 1] as usize
    }

    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alphanumeric => alphanumeric_digit(c).is_some(),
            Self::Byte => true,
        }
    }
}

pub fn alphanumeric_digit(c: char) -> Option<u16> {
    match c {
        '0'..='9' => Some(c as u16 - '0' as u16),
        'A'..='Z' => Some(c as u16 - 'A' as u16 + 10),
        _ => ALPHANUMERIC_SYMBOLS.iter().position(|&s| s == c).map(|i| i as u16 + 36),
    }
}

// Extended channel interpretation
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum EciMode {
    #[default]
    Default = 0,
    Iso88591 = 3,
    Iso88592 = 4,
    Utf8 = 26,
}

impl EciMode {
    pub const fn designator(self) -> u8 {
        self as u8
    }
}


// Global constants
//------------------------------------------------------------------------------

// Code points 36..=44 in order
static ALPHANUMERIC_SYMBOLS: [char; 9] = [' ', '$', '%', '*', '+', '-', '.', '/', ':'];
