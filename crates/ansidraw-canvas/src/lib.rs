//! Edit buffer and cell model for ansidraw
//!
//! Provides the off-screen grid of character/attribute cells that the
//! codecs read and write, together with the packed attribute encoding.

pub mod buffer;
pub mod cell;

pub use buffer::EditBuffer;
pub use cell::{effective_fg, pack_attr, unpack_attr, Cell};
pub use cell::{DEFAULT_ATTR, DEFAULT_BG, DEFAULT_FG};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CanvasError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("could not allocate {bytes} bytes for edit buffer")]
    Allocation { bytes: usize },
}
