//! FEC (*Fichier des Écritures Comptables*) codec.
//!
//! This module reads and writes the regulatory interchange file:
//! - 18-column minimal and 22-column extended layouts
//! - Tab-separated rows, `YYYYMMDD` dates, comma decimals
//! - Windows-1252 import with mojibake repair
//! - Row-level rejections and unknown-account synthesis on import

pub mod decode;
pub mod encode;
pub mod error;
pub mod layout;
pub mod repair;


pub use decode::{FecDecodeOptions, FecEncoding, FecImport};
pub use encode::{FecEncodeOptions, fec_file_name, standard_journal_label};
pub use error::{FecError, MalformedRow, RowRejection};
pub use layout::FecLayout;
pub use repair::repair_mojibake;

/// Encoder and decoder of FEC files.
pub struct FecCodec;
