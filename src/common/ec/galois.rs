use std::ops::{Add, AddAssign, Mul};

// GF(256) element in integer notation
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct G(pub u8);

impl G {
    /// Exponent of the generator yielding this element. Zero has none.
    pub fn log(self) -> Alpha {
        debug_assert!(self.0 != 0, "Log of zero is undefined");

        Alpha(LOG_TABLE[self.0 as usize])
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

// Addition and subtraction are both xor in characteristic 2
impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Self(0);
        }
        (self.log() * rhs.log()).value()
    }
}

// GF(256) element in alpha notation, the exponent e of 2^e
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Alpha(pub u8);

impl Alpha {
    pub fn value(self) -> G {
        G(EXP_TABLE[self.0 as usize])
    }
}

// Multiplying powers of the generator adds exponents
impl Mul for Alpha {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(((self.0 as usize + rhs.0 as usize) % 255) as u8)
    }
}


// Global constants
//------------------------------------------------------------------------------

// Primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE_POLY: u16 = 0x11d;

// Index 255 repeats index 0
pub static EXP_TABLE: [u8; 256] = build_exp_table();

// Index 0 is never read
pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 256 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}
