#![allow(clippy::uninlined_format_args)]

//! Error related data structures to be shared and used.
//!
//! This module contains the [`Error`] enum, which is used to represent
//! errors that can occur within GbCore domain.

use std::fmt::{self, Display, Formatter};
use std::io;

/// Top level enum for error handling within GbCore.
///
/// Most of the time, you will want to use the `CustomError` variant
/// to provide a more detailed error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidData,
    RomSize,
    IncompatibleBootRom,
    InvalidParameter(String),
    CustomError(String),

    /// ROM shorter than the header region, header checksum mismatch, or
    /// unsupported cartridge type. Raised at cartridge-load time.
    InvalidHeader,

    /// One of the eleven disallowed primary opcodes was fetched. Carries
    /// the offending byte and the program counter it was read from so the
    /// host can report (and, if it wishes, rewind) the failure.
    IllegalOpcode { opcode: u8, pc: u16 },

    /// A save file matched neither the BGB-compatible layout nor the
    /// legacy structural format. Non-fatal: callers should proceed with
    /// empty RAM rather than abort.
    SaveFormatUnknown,

    /// The underlying save reader/writer failed. Non-fatal during a run.
    SaveIO(String),
}

impl Error {
    pub fn description(&self) -> String {
        match self {
            Error::InvalidData => String::from("Invalid data format"),
            Error::RomSize => String::from("Invalid ROM size"),
            Error::IncompatibleBootRom => String::from("Incompatible Boot ROM"),
            Error::InvalidParameter(message) => format!("Invalid parameter: {}", message),
            Error::CustomError(message) => String::from(message),
            Error::InvalidHeader => String::from("Invalid cartridge header"),
            Error::IllegalOpcode { opcode, pc } => {
                format!("Illegal opcode 0x{:02x} at 0x{:04x}", opcode, pc)
            }
            Error::SaveFormatUnknown => String::from("Unknown save file format"),
            Error::SaveIO(message) => format!("Save I/O error: {}", message),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::SaveIO(value.to_string())
    }
}

#[cfg(feature = "wasm")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(value: Error) -> Self {
        wasm_bindgen::JsValue::from_str(&value.description())
    }
}
