use ansidraw_canvas::{pack_attr, unpack_attr, EditBuffer};
use ansidraw_codec::read_ansi;

#[test]
fn decoder_applies_sgr_colors_and_bold() {
    let mut buf = EditBuffer::new(80, 25).unwrap();

    // Bold red 'A', then reset before 'B'
    read_ansi(b"\x1B[1;31mA\x1B[0mB", &mut buf).unwrap();

    let cell = buf.get(0, 0).unwrap();
    assert_eq!(cell.ch, b'A');
    // Bold folds into the bright half of the foreground range
    assert_eq!(cell.attr, pack_attr(1 + 8, 0));

    let cell = buf.get(1, 0).unwrap();
    assert_eq!(cell.ch, b'B');
    assert_eq!(cell.attr, 0x07);
}

#[test]
fn decoder_applies_background_colors() {
    let mut buf = EditBuffer::new(80, 25).unwrap();

    read_ansi(b"\x1B[33;44mX", &mut buf).unwrap();

    let cell = buf.get(0, 0).unwrap();
    assert_eq!(unpack_attr(cell.attr), (3, 4));
}

#[test]
fn unsupported_but_accepted_attributes_change_nothing() {
    let mut buf = EditBuffer::new(80, 25).unwrap();

    read_ansi(b"\x1B[4;5;7;8mX", &mut buf).unwrap();

    assert_eq!(buf.get(0, 0).unwrap().attr, 0x07);
}

#[test]
fn empty_attribute_list_is_a_reset() {
    let mut buf = EditBuffer::new(80, 25).unwrap();

    read_ansi(b"\x1B[1;34;41mA\x1B[mB", &mut buf).unwrap();

    assert_eq!(buf.get(0, 0).unwrap().attr, pack_attr(4 + 8, 1));
    assert_eq!(buf.get(1, 0).unwrap().attr, 0x07);
}

#[test]
fn attributes_persist_across_rows_until_changed() {
    let mut buf = EditBuffer::new(80, 25).unwrap();

    read_ansi(b"\x1B[32ma\nb", &mut buf).unwrap();

    assert_eq!(buf.get(0, 0).unwrap().attr, pack_attr(2, 0));
    assert_eq!(buf.get(0, 1).unwrap().attr, pack_attr(2, 0));
}
