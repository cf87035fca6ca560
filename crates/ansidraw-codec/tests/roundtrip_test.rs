//! Encode/decode round-trip tests
//!
//! The encoder's output fed back through the decoder must reproduce the
//! visible region of the source buffer cell for cell.

use ansidraw_canvas::{pack_attr, Cell, EditBuffer};
use ansidraw_codec::{read_ansi, read_binary, write_ansi};
use pretty_assertions::assert_eq;

fn assert_visible_region_eq(a: &EditBuffer, b: &EditBuffer) {
    assert_eq!(a.max_height(), b.max_height());
    for y in 0..a.max_height() {
        for x in 0..a.width() {
            assert_eq!(
                a.get(x, y).unwrap(),
                b.get(x, y).unwrap(),
                "cell ({x}, {y}) differs"
            );
        }
    }
}

#[test]
fn roundtrip_preserves_attribute_runs() {
    let mut buf = EditBuffer::new(80, 50).unwrap();

    // Deliberate run boundaries: color changes mid-row, bold rows, a
    // high-ascii shade block, and a row written far down the buffer
    for x in 0..10 {
        buf.put(x, 0, Cell::new(pack_attr(1, 0), b'#')).unwrap();
    }
    for x in 10..20 {
        buf.put(x, 0, Cell::new(pack_attr(2, 4), b'#')).unwrap();
    }
    for x in 0..5 {
        buf.put(x, 1, Cell::new(pack_attr(7 + 8, 1), 0xB0)).unwrap();
    }
    buf.put(40, 7, Cell::new(pack_attr(6, 3), b'@')).unwrap();

    let mut stream = Vec::new();
    write_ansi(&mut stream, &buf).unwrap();

    let mut decoded = EditBuffer::new(80, 50).unwrap();
    read_ansi(&stream, &mut decoded).unwrap();

    assert_visible_region_eq(&buf, &decoded);
}

#[test]
fn roundtrip_of_a_full_width_row() {
    let mut buf = EditBuffer::new(80, 4).unwrap();
    for x in 0..80 {
        let attr = if x % 2 == 0 {
            pack_attr(3, 0)
        } else {
            pack_attr(5, 2)
        };
        buf.put(x, 0, Cell::new(attr, b'=')).unwrap();
    }

    let mut stream = Vec::new();
    write_ansi(&mut stream, &buf).unwrap();

    let mut decoded = EditBuffer::new(80, 4).unwrap();
    read_ansi(&stream, &mut decoded).unwrap();

    assert_visible_region_eq(&buf, &decoded);
}

#[test]
fn roundtrip_survives_a_second_pass() {
    let mut buf = EditBuffer::new(80, 10).unwrap();
    for (x, ch) in b"hello world".iter().enumerate() {
        buf.put(x, 2, Cell::new(pack_attr(4 + 8, 6), *ch)).unwrap();
    }

    let mut first = Vec::new();
    write_ansi(&mut first, &buf).unwrap();

    let mut decoded = EditBuffer::new(80, 10).unwrap();
    read_ansi(&first, &mut decoded).unwrap();

    // Re-encoding the decoded buffer yields the identical stream
    let mut second = Vec::new();
    write_ansi(&mut second, &decoded).unwrap();

    assert_eq!(first, second);
}

#[test]
fn binary_raster_to_escape_stream_and_back() {
    // Two full rows of a 4-column raster
    let mut data = Vec::new();
    for (ch, attr) in [
        (b'a', 0x07),
        (b'b', 0x17),
        (b'c', 0x2E),
        (b'd', 0x07),
        (b'e', 0x43),
        (b'f', 0x43),
        (b'g', 0x07),
        (b'h', 0x01),
    ] {
        data.push(ch);
        data.push(attr);
    }

    let mut buf = EditBuffer::new(80, 10).unwrap();
    read_binary(&data, &mut buf, 4).unwrap();

    let mut stream = Vec::new();
    write_ansi(&mut stream, &buf).unwrap();

    let mut decoded = EditBuffer::new(80, 10).unwrap();
    read_ansi(&stream, &mut decoded).unwrap();

    assert_visible_region_eq(&buf, &decoded);
}
