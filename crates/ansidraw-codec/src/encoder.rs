//! ANSI escape-sequence encoder
//!
//! Walks the used rows of an edit buffer and emits a stream of attribute
//! commands and literal bytes that the decoder turns back into the same
//! grid. Attributes are run-length compressed within each row.

use std::io::Write;

use ansidraw_canvas::{unpack_attr, EditBuffer};
use tracing::debug;

use crate::CodecError;

/// Emit one attribute-set command for a packed attribute byte.
///
/// Bold is recovered from the bright half of the foreground range.
fn write_attr<W: Write>(out: &mut W, attr: u8) -> Result<(), CodecError> {
    let (fg, bg) = unpack_attr(attr);

    let (bold, fg) = if fg > 7 { (true, fg - 8) } else { (false, fg) };

    write!(out, "\x1B[{};{};{}m", bold as u8, fg + 30, bg + 40)?;
    Ok(())
}

/// Encode the visible region of `buf` (rows `0..max_height`) as an
/// escape-sequence stream.
///
/// Each row starts from a zeroed previous-attribute register, so the first
/// colored cell of a row always re-emits its attribute; runs never span a
/// row boundary. Every row ends with a newline.
pub fn write_ansi<W: Write>(out: &mut W, buf: &EditBuffer) -> Result<(), CodecError> {
    for y in 0..buf.max_height() {
        let mut prev_attr = 0u8;

        for x in 0..buf.width() {
            let cell = buf.get(x, y)?;

            if cell.attr != prev_attr {
                write_attr(out, cell.attr)?;
            }
            prev_attr = cell.attr;

            out.write_all(&[cell.ch])?;
        }
        out.write_all(b"\n")?;
    }

    debug!(rows = buf.max_height(), "encoded escape-sequence stream");
    Ok(())
}
