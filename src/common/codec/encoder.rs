use encoding_rs::ISO_8859_2;
use tracing::debug;

use super::types::{alphanumeric_digit, EciMode, Mode};
use crate::common::bitstream::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

// Segment
//------------------------------------------------------------------------------

/// Input text resolved to a single mode. For numeric and alphanumeric modes `data` holds
/// the ascii characters, for byte mode the transcoded bytes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Segment {
    pub mode: Mode,
    pub eci: EciMode,
    pub data: Vec<u8>,
}

impl Segment {
    pub fn new(text: &str, force_byte: bool, utf8_bom: bool, eci: EciMode) -> Self {
        let mode = select_mode(text, force_byte);
        let data = match mode {
            Mode::Byte => encode_bytes(text, force_byte, utf8_bom, eci),
            _ => text.as_bytes().to_vec(),
        };
        Self { mode, eci, data }
    }

    /// Value of the character count indicator.
    pub fn char_cnt(&self) -> usize {
        self.data.len()
    }

    // Length checked against the capacity table. An eci header is charged two units
    fn table_len(&self) -> usize {
        match self.eci {
            EciMode::Default => self.char_cnt(),
            _ => self.char_cnt() + 2,
        }
    }

    pub fn bit_len(&self, version: Version) -> usize {
        let n = self.data.len();
        let data_bits = match self.mode {
            Mode::Numeric => n / 3 * 10 + [0, 4, 7][n % 3],
            Mode::Alphanumeric => n / 2 * 11 + (n % 2) * 6,
            Mode::Byte => n * 8,
        };
        let eci_bits = match self.eci {
            EciMode::Default => 0,
            _ => ECI_HEADER_BIT_LEN,
        };
        eci_bits + MODE_INDICATOR_BIT_LEN + self.mode.char_cnt_bits(version) + data_bits
    }

    fn fits(&self, version: Version, ec_level: ECLevel) -> bool {
        self.table_len() <= self.mode.capacity(version, ec_level)
            && self.bit_len(version) <= data_bit_capacity(version, ec_level)
    }
}

pub fn data_bit_capacity(version: Version, ec_level: ECLevel) -> usize {
    version.ecc_info(ec_level).total_data_codewords << 3
}

// Mode selection and transcoding
//------------------------------------------------------------------------------

fn select_mode(text: &str, force_byte: bool) -> Mode {
    if force_byte {
        Mode::Byte
    } else if text.chars().all(|c| Mode::Numeric.contains(c)) {
        Mode::Numeric
    } else if text.chars().all(|c| Mode::Alphanumeric.contains(c)) {
        Mode::Alphanumeric
    } else {
        Mode::Byte
    }
}

fn is_latin1(text: &str) -> bool {
    text.chars().all(|c| c as u32 <= 0xFF)
}

fn encode_bytes(text: &str, force_byte: bool, utf8_bom: bool, eci: EciMode) -> Vec<u8> {
    if is_latin1(text) && !force_byte {
        return to_latin1_lossy(text);
    }
    match eci {
        EciMode::Iso88591 => to_latin1_lossy(text),
        EciMode::Iso88592 => to_latin2_lossy(text),
        EciMode::Default | EciMode::Utf8 => {
            let mut res = Vec::with_capacity(text.len() + 3);
            if utf8_bom {
                res.extend(UTF8_BOM);
            }
            res.extend(text.as_bytes());
            res
        }
    }
}

fn to_latin1_lossy(text: &str) -> Vec<u8> {
    text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect()
}

fn to_latin2_lossy(text: &str) -> Vec<u8> {
    let mut res = Vec::with_capacity(text.len());
    let mut buf = [0; 4];
    for c in text.chars() {
        let (bytes, _, had_errors) = ISO_8859_2.encode(c.encode_utf8(&mut buf));
        if had_errors {
            res.push(b'?');
        } else {
            res.extend_from_slice(&bytes);
        }
    }
    res
}

// Version selection
//------------------------------------------------------------------------------

pub fn find_min_version(segment: &Segment, ec_level: ECLevel) -> QRResult<Version> {
    Version::all().find(|v| segment.fits(*v, ec_level)).ok_or(QRError::DataTooLong {
        ec_level,
        mode: segment.mode,
        version: None,
        max_len: segment.mode.capacity(Version::MAX, ec_level),
    })
}

// Encoder
//------------------------------------------------------------------------------

/// Serializes the segment into the smallest version that holds it. The stream is padded
/// to the full data capacity of that version.
pub fn encode(segment: &Segment, ec_level: ECLevel) -> QRResult<(BitStream, Version)> {
    let version = find_min_version(segment, ec_level)?;
    debug!(mode = ?segment.mode, len = segment.char_cnt(), version = *version, "Selected version");
    Ok((write_segment(segment, version, ec_level), version))
}

pub fn encode_with_version(
    segment: &Segment,
    version: Version,
    ec_level: ECLevel,
) -> QRResult<BitStream> {
    match find_min_version(segment, ec_level) {
        Ok(min_version) if min_version <= version => {
            debug!(mode = ?segment.mode, len = segment.char_cnt(), version = *version, "Using requested version");
            Ok(write_segment(segment, version, ec_level))
        }
        _ => Err(QRError::DataTooLong {
            ec_level,
            mode: segment.mode,
            version: Some(version),
            max_len: segment.mode.capacity(version, ec_level),
        }),
    }
}

fn write_segment(segment: &Segment, version: Version, ec_level: ECLevel) -> BitStream {
    let mut bs = BitStream::new(data_bit_capacity(version, ec_level));
    push_header(segment, version, &mut bs);
    match segment.mode {
        Mode::Numeric => push_numeric_data(&segment.data, &mut bs),
        Mode::Alphanumeric => push_alphanumeric_data(&segment.data, &mut bs),
        Mode::Byte => push_byte_data(&segment.data, &mut bs),
    }
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);
    bs
}


// Writer for encoded data
//------------------------------------------------------------------------------

fn push_header(segment: &Segment, version: Version, out: &mut BitStream) {
    if segment.eci != EciMode::Default {
        out.push_bits(ECI_MODE_INDICATOR, MODE_INDICATOR_BIT_LEN);
        out.push_bits(segment.eci.designator(), 8);
    }
    out.push_bits(segment.mode.indicator(), MODE_INDICATOR_BIT_LEN);
    let char_cnt = segment.char_cnt();
    let len_bits = segment.mode.char_cnt_bits(version);
    debug_assert!(
        char_cnt < (1 << len_bits),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
    );
    out.push_bits(char_cnt as u16, len_bits);
}

fn push_numeric_data(data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(3) {
        let len = (chunk.len() * 10 + 2) / 3;
        let val = chunk.iter().fold(0u16, |acc, &d| acc * 10 + (d - b'0') as u16);
        out.push_bits(val, len);
    }
}

fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(2) {
        let len = (chunk.len() * 11 + 1) / 2;
        let val = chunk
            .iter()
            .fold(0u16, |acc, &c| acc * 45 + alphanumeric_digit(c as char).unwrap_or_default());
        out.push_bits(val, len);
    }
}

fn push_byte_data(data: &[u8], out: &mut BitStream) {
    if out.len() & 7 == 0 {
        out.extend(data);
    } else {
        data.iter().for_each(|&b| out.push_bits(b, 8));
    }
}

fn push_terminator(out: &mut BitStream) {
    let bit_len = out.len();
    let bit_capacity = out.capacity();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(4, bit_capacity - bit_len);
        out.push_bits(0u8, term_len);
    }
}

fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    debug_assert!(
        out.len() & 7 == 0,
        "Bit offset should be zero before padding codewords: {}",
        out.len() & 7
    );

    let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}

#[cfg(test)]
mod writer_tests {
    use super::{
        push_alphanumeric_data, push_byte_data, push_header, push_numeric_data,
        push_padding_bits, push_padding_codewords, push_terminator, Segment, PADDING_CODEWORDS,
    };
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{EciMode, Mode};
    use crate::common::metadata::Version;

    fn segment(mode: Mode, len: usize) -> Segment {
        Segment { mode, eci: EciMode::Default, data: vec![b'0'; len] }
    }

    #[test]
    fn test_push_header_v1() {
        let exp_vecs: [&[u8]; 3] =
            [&[0b00011111, 0b11111100], &[0b00101111, 0b11111000], &[0b01001111, 0b11110000]];
        let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
        let lens = [1023, 511, 255];
        for ((mode, len), exp) in modes.iter().zip(lens.iter()).zip(exp_vecs.iter()) {
            let mut bs = BitStream::new(152);
            push_header(&segment(*mode, *len), Version::new(1), &mut bs);
            assert_eq!(bs.data(), *exp);
        }
    }

    #[test]
    fn test_push_header_v27() {
        let exp_vecs: [&[u8]; 3] = [
            &[0b00011111, 0b11111111, 0b11000000],
            &[0b00101111, 0b11111111, 0b10000000],
            &[0b01001111, 0b11111111, 0b11110000],
        ];
        let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
        let lens = [16383, 8191, 65535];
        for ((mode, len), exp) in modes.iter().zip(lens.iter()).zip(exp_vecs.iter()) {
            let mut bs = BitStream::new(152);
            push_header(&segment(*mode, *len), Version::new(27), &mut bs);
            assert_eq!(bs.data(), *exp);
        }
    }

    #[test]
    fn test_push_header_hello_world() {
        let seg = Segment { mode: Mode::Alphanumeric, eci: EciMode::Default, data: b"HELLO WORLD".to_vec() };
        let mut bs = BitStream::new(16);
        push_header(&seg, Version::new(1), &mut bs);
        // 0010 | 000001011
        assert_eq!(bs.len(), 13);
        assert_eq!(bs.data(), [0b00100000, 0b01011000]);
    }

    #[test]
    fn test_push_numeric_data() {
        let mut bs = BitStream::new(152);
        push_numeric_data(b"01234567", &mut bs);
        // 0000001100 | 0101011001 | 1000011
        assert_eq!(bs.len(), 27);
        assert_eq!(bs.data(), [0b00000011, 0b00010101, 0b10011000, 0b01100000]);
        let mut bs = BitStream::new(152);
        push_numeric_data(b"8", &mut bs);
        assert_eq!(bs.data(), [0b10000000]);
    }

    #[test]
    fn test_push_alphanumeric_data() {
        let mut bs = BitStream::new(152);
        push_alphanumeric_data(b"AC-42", &mut bs);
        assert_eq!(bs.data(), [0b00111001, 0b11011100, 0b11100100, 0b00100000]);
    }

    #[test]
    fn test_push_byte_data_unaligned() {
        let mut bs = BitStream::new(152);
        bs.push_bits(0b0100_u8, 4);
        push_byte_data(b"a", &mut bs);
        assert_eq!(bs.data(), [0b01000110, 0b00010000]);
    }

    #[test]
    fn test_push_terminator() {
        let mut bs = BitStream::new(152);
        bs.push_bits(0b1_u8, 1);
        push_terminator(&mut bs);
        assert_eq!(bs.data(), [0b10000000]);
        assert_eq!(bs.len(), 5);
        let mut bs = BitStream::new(10);
        bs.push_bits(0xFF_u8, 8);
        push_terminator(&mut bs);
        assert_eq!(bs.len(), 10);
    }

    #[test]
    fn test_push_padding() {
        let mut bs = BitStream::new(152);
        bs.push_bits(0b1_u8, 1);
        push_padding_bits(&mut bs);
        assert_eq!(bs.len(), 8);
        push_padding_codewords(&mut bs);
        let mut exp = vec![0b10000000];
        exp.extend(PADDING_CODEWORDS.iter().cycle().take(18));
        assert_eq!(bs.data(), exp);
    }
}

// Global constants
//------------------------------------------------------------------------------

const MODE_INDICATOR_BIT_LEN: usize = 4;

const ECI_MODE_INDICATOR: u8 = 0b0111;

// Mode indicator and 8-bit designator
const ECI_HEADER_BIT_LEN: usize = 12;

static UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
