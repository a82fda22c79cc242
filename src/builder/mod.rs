mod canvas;
mod qr;

pub(crate) use canvas::Canvas;
pub use qr::{QR, QUIET_ZONE_WIDTH};

use std::ops::Deref;

use tracing::{debug, info};

use crate::common::{
    codec::{encode, encode_with_version, EciMode, Segment},
    ec::ecc_per_block,
    error::QRResult,
    mask::apply_best_mask,
    metadata::{ECLevel, Version},
};

/// Configures and builds a QR symbol for a piece of text.
///
/// ```rust
/// use qrgen::{ECLevel, QRBuilder};
///
/// let qr = QRBuilder::new("HELLO WORLD").ec_level(ECLevel::Q).build().unwrap();
/// assert_eq!(qr.symbol_width(), 21);
/// ```
pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    force_byte: bool,
    utf8_bom: bool,
    eci: EciMode,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            version: None,
            ec_level: ECLevel::M,
            force_byte: false,
            utf8_bom: false,
            eci: EciMode::Default,
        }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    /// Requests a version. Building fails if the text needs a larger one.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Encodes in byte mode even when numeric or alphanumeric mode would do. Text that
    /// isn't plain latin-1 is then written as utf-8 unless an eci mode picks otherwise.
    pub fn force_byte_mode(&mut self, force_byte: bool) -> &mut Self {
        self.force_byte = force_byte;
        self
    }

    pub fn utf8_bom(&mut self, utf8_bom: bool) -> &mut Self {
        self.utf8_bom = utf8_bom;
        self
    }

    pub fn eci(&mut self, eci: EciMode) -> &mut Self {
        self.eci = eci;
        self
    }

    pub fn metadata(&self) -> String {
        let version = match self.version {
            Some(v) => format!("{}", *v),
            None => "None".to_string(),
        };
        format!(
            "{{ Version: {version}, Ec level: {:?}, Force byte: {}, Bom: {}, Eci: {:?} }}",
            self.ec_level, self.force_byte, self.utf8_bom, self.eci
        )
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{ECLevel, EciMode, Version};

    #[test]
    fn test_metadata() {
        let mut qr_builder = QRBuilder::new("Hello, world!");
        assert_eq!(
            qr_builder.metadata(),
            "{ Version: None, Ec level: M, Force byte: false, Bom: false, Eci: Default }"
        );
        qr_builder.version(Version::new(3)).ec_level(ECLevel::L).eci(EciMode::Utf8).utf8_bom(true);
        assert_eq!(
            qr_builder.metadata(),
            "{ Version: 3, Ec level: L, Force byte: false, Bom: true, Eci: Utf8 }"
        );
        qr_builder.unset_version().force_byte_mode(true);
        assert_eq!(
            qr_builder.metadata(),
            "{ Version: None, Ec level: L, Force byte: true, Bom: true, Eci: Utf8 }"
        );
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        let segment = Segment::new(self.text, self.force_byte, self.utf8_bom, self.eci);
        debug!(mode = ?segment.mode, len = segment.char_cnt(), "Encoding data");
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(&segment, v, self.ec_level)?, v),
            None => encode(&segment, self.ec_level)?,
        };

        debug!("Constructing payload with ecc & interleaving");
        let payload = Self::construct_payload(encoded_data.data(), version, self.ec_level);

        debug!("Drawing function patterns");
        let mut canvas = Canvas::new(version, self.ec_level);
        canvas.draw_all_function_patterns();

        debug!("Drawing encoding region");
        canvas.draw_encoding_region(&payload);

        debug!("Finding & applying best mask");
        let mask = apply_best_mask(&mut canvas);

        let qr = QR::new(&canvas, mask);
        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        info!(
            version = *version,
            ec_level = ?self.ec_level,
            mask = *mask,
            dark_modules,
            balance = dark_modules * 100 / total_modules,
            "QR generated"
        );

        Ok(qr)
    }

    // Data codewords of all blocks interleaved, followed by their interleaved ecc
    fn construct_payload(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
        let (data_blocks, ecc_blocks) = Self::compute_ecc(data, version, ec_level);
        let mut payload = Self::interleave(&data_blocks);
        payload.extend(Self::interleave(&ecc_blocks));
        debug_assert!(
            payload.len() == version.total_codewords(),
            "Payload length {} doesn't match total codewords {}",
            payload.len(),
            version.total_codewords()
        );
        payload
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
        let data_blocks = Self::blockify(data, version, ec_level);

        let ecc_count = version.ecc_info(ec_level).ecc_per_block;
        let ecc_blocks = data_blocks.iter().map(|b| ecc_per_block(b, ecc_count)).collect();

        (data_blocks, ecc_blocks)
    }

    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let info = version.ecc_info(ec_level);
        let total_block1_size = info.codewords_in_group1 * info.blocks_in_group1;

        debug_assert!(
            info.total_data_codewords == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            info.total_data_codewords
        );

        let mut data_blocks = Vec::with_capacity(info.block_count());
        data_blocks.extend(data[..total_block1_size].chunks(info.codewords_in_group1));
        if info.blocks_in_group2 > 0 {
            data_blocks.extend(data[total_block1_size..].chunks(info.codewords_in_group2));
        }
        data_blocks
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::QRBuilder;
    use crate::common::{ECLevel, EciMode, QRError, Version};

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (_, ecc) = QRBuilder::compute_ecc(msg, Version::new(1), ECLevel::M);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (data, ecc) = QRBuilder::compute_ecc(msg, Version::new(5), ECLevel::Q);
        assert_eq!(data.iter().map(|b| b.len()).collect::<Vec<_>>(), [15, 15, 16, 16]);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = QRBuilder::interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test_case(1, ECLevel::L)]
    #[test_case(5, ECLevel::Q)]
    #[test_case(13, ECLevel::H)]
    #[test_case(40, ECLevel::M)]
    fn test_construct_payload_len(version: u8, ec_level: ECLevel) {
        let version = Version::new(version);
        let data = vec![0xA5; version.ecc_info(ec_level).total_data_codewords];
        let payload = QRBuilder::construct_payload(&data, version, ec_level);
        assert_eq!(payload.len(), version.total_codewords());
    }

    #[test_case("HELLO WORLD", ECLevel::Q, 1)]
    #[test_case("01234567", ECLevel::M, 1)]
    #[test_case("Hello, world!", ECLevel::H, 2)]
    #[test_case("Zażółć gęślą jaźń", ECLevel::L, 2)]
    fn test_build_min_version(text: &str, ec_level: ECLevel, exp: u8) {
        let qr = QRBuilder::new(text).ec_level(ec_level).build().unwrap();
        assert_eq!(qr.version(), Version::new(exp));
        assert_eq!(qr.symbol_width(), Version::new(exp).width());
        assert_eq!(qr.ec_level(), ec_level);
    }

    #[test]
    fn test_build_data_overflow() {
        let text = "1234567890".repeat(306);
        let res = QRBuilder::new(&text).version(Version::new(40)).ec_level(ECLevel::H).build();
        assert!(matches!(
            res,
            Err(QRError::DataTooLong { version: Some(v), max_len: 3057, .. }) if v == Version::new(40)
        ));
    }

    #[test]
    fn test_build_with_eci() {
        let qr = QRBuilder::new("Łódź").eci(EciMode::Iso88592).build().unwrap();
        assert_eq!(qr.version(), Version::new(1));
    }
}
