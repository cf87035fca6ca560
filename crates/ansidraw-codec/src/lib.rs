//! Stream codecs for ansidraw
//!
//! Translates between edit buffer contents and the two on-disk forms:
//! ANSI/ECMA-48 escape-sequence text and the legacy fixed-width binary
//! raster format. Decoding is deliberately strict; every malformed or
//! unsupported construct is a fatal error rather than a silent skip.

pub mod binary;
pub mod decoder;
pub mod encoder;

pub use binary::read_binary;
pub use decoder::read_ansi;
pub use encoder::write_ansi;

use ansidraw_canvas::CanvasError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("corrupt escape sequence")]
    CorruptSequence,

    #[error("escape code '{0}' not supported")]
    UnsupportedCommand(char),

    #[error("unknown display attribute {0}")]
    UnknownAttribute(u16),

    #[error("bad parameters {params:?} for escape code '{command}'")]
    BadParameters { command: char, params: String },

    #[error("overlong escape sequence parameters ({0} bytes)")]
    ParamsOverflow(usize),

    #[error("byte {0:#04x} is not valid literal content")]
    IllegalByte(u8),

    #[error("cursor restore without a saved position")]
    RestoreWithoutSave,

    #[error("premature end of file")]
    PrematureEof,

    #[error("declared column count {max_cols} does not fit buffer width {width}")]
    BadColumnCount { max_cols: usize, width: usize },

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
