//! # qrgen
//!
//! A Rust library for encoding text into QR Code symbols (Model 2, versions 1 to 40).
//!
//! ## Features
//!
//! - **Mode selection**: Numeric, alphanumeric or byte mode is picked from the text
//! - **ECI**: Byte data in UTF-8, ISO-8859-1 or ISO-8859-2 with an optional ECI header
//! - **Reed-Solomon Error Correction**: Error correction levels L, M, Q and H
//! - **Masking**: All 8 mask patterns are scored and the least penalised one is kept
//! - **Rendering**: Symbols can be drawn to images or to a string for terminals
//!
//! ## Quick Start
//!
//! ```rust
//! use qrgen::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Smallest version that fits the text, error correction level M
//! let qr = QRBuilder::new("Hello, World!").build()?;
//!
//! let img = qr.to_gray_image(4);
//! assert_eq!(img.width() as usize, qr.width() * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use image::Rgb;
//! use qrgen::{ECLevel, EciMode, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Zażółć gęślą jaźń")
//!     .version(Version::new(3))  // Fails if the text doesn't fit in version 3
//!     .ec_level(ECLevel::Q)
//!     .eci(EciMode::Utf8)        // Byte data is utf-8 and announced with an ECI header
//!     .utf8_bom(true)
//!     .build()?;
//!
//! let img = qr.to_image(8, Rgb([0, 0, 0]), Rgb([255, 255, 255]));
//! # let _ = img;
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a QR Code
//!
//! ```rust
//! use image::DynamicImage;
//! use qrgen::{reader, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD").build()?;
//! let img = DynamicImage::ImageLuma8(qr.to_gray_image(4));
//! assert_eq!(reader::decode(&img).as_deref(), Some("HELLO WORLD"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages are reported through [`tracing`]. No subscriber is installed by the
//! library.

#![allow(clippy::items_after_test_module, clippy::suspicious_arithmetic_impl)]

pub mod builder;
pub(crate) mod common;
pub mod reader;
mod render;

pub use builder::{QRBuilder, QR, QUIET_ZONE_WIDTH};
pub use common::codec::{EciMode, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{decode_format_info, format_info, ECLevel, Version};
