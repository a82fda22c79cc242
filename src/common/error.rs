use thiserror::Error;

use super::codec::Mode;
use super::metadata::{ECLevel, Version};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    /// The encoded text does not fit. `version` is `None` when no version in 1..=40 can
    /// hold it, otherwise it is the explicitly requested version that is too small.
    /// `max_len` is the capacity (characters, or bytes in byte mode) of that limit.
    #[error(
        "data too long for {mode:?} mode at ec level {ec_level:?}{}: at most {max_len} {} supported",
        version.map(|v| format!(" in version {}", *v)).unwrap_or_default(),
        if matches!(mode, Mode::Byte) { "bytes" } else { "characters" }
    )]
    DataTooLong { ec_level: ECLevel, mode: Mode, version: Option<Version>, max_len: usize },
}

pub type QRResult<T> = Result<T, QRError>;
