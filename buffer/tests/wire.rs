//! Byte-exact checks of the wire format against streams produced by other Luban runtimes.

use luban_buffer::{ByteBuf, Error, ReadBuf, WriteBuf};
use test_case::test_case;

/// A row as exported by the table generator: every primitive in declaration order.
fn exported_row() -> Vec<u8> {
    let mut data = vec![
        0x01, // bool true
        0x80, 0xc8, // short 200
        0xc0, 0x40, 0x00, // int 0x4000
        0xf0, 0x80, 0x00, 0x00, 0x00, // int i32::MIN
        0x0a, // sint 5
        0xfe, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, // long 2^48 + 1 (tier 8)
        0x34, 0x12, // fshort 0x1234
        0x78, 0x56, 0x34, 0x12, // fint 0x12345678
    ];
    data.extend_from_slice(&1.5f32.to_le_bytes());
    data.extend_from_slice(&(-0.25f64).to_le_bytes());
    data.extend_from_slice(&[0x05, b'l', b'u', b'b', b'a', b'n']);
    data.extend_from_slice(&[0x00]); // empty bytes
    data
}

#[test]
fn test_decode_exported_row() {
    let mut buf = ByteBuf::from(exported_row());
    assert!(buf.read_bool().unwrap());
    assert_eq!(buf.read_short().unwrap(), 200);
    assert_eq!(buf.read_int().unwrap(), 0x4000);
    assert_eq!(buf.read_int().unwrap(), i32::MIN);
    assert_eq!(buf.read_sint().unwrap(), 5);
    assert_eq!(buf.read_long().unwrap(), (1 << 48) + 1);
    assert_eq!(buf.read_fshort().unwrap(), 0x1234);
    assert_eq!(buf.read_fint().unwrap(), 0x12345678);
    assert_eq!(buf.read_float().unwrap(), 1.5);
    assert_eq!(buf.read_double().unwrap(), -0.25);
    assert_eq!(buf.read_string().unwrap(), "luban");
    assert!(buf.read_bytes().unwrap().is_empty());
    assert!(buf.is_empty());
}

#[test]
fn test_encode_exported_row() {
    let mut buf = ByteBuf::new();
    buf.write_bool(true);
    buf.write_short(200);
    buf.write_int(0x4000);
    buf.write_int(i32::MIN);
    buf.write_sint(5);
    buf.write_long((1 << 48) + 1);
    buf.write_fshort(0x1234);
    buf.write_fint(0x12345678);
    buf.write_float(1.5);
    buf.write_double(-0.25);
    buf.write_string("luban");
    buf.write_bytes(&[]);
    assert_eq!(buf.as_slice(), exported_row().as_slice());
}

fn short(buf: &mut ByteBuf) -> Result<(), Error> {
    buf.read_short().map(drop)
}

fn int(buf: &mut ByteBuf) -> Result<(), Error> {
    buf.read_int().map(drop)
}

fn long(buf: &mut ByteBuf) -> Result<(), Error> {
    buf.read_long().map(drop)
}

#[test_case(short, &[0x80]; "short tier 2 missing a byte")]
#[test_case(short, &[0xff, 0x00]; "short escape missing a byte")]
#[test_case(int, &[0xe0, 0x00]; "int tier 4 missing two bytes")]
#[test_case(int, &[0xf0, 0x00, 0x00, 0x00]; "int escape missing a byte")]
#[test_case(int, &[]; "int empty input")]
#[test_case(long, &[0xfe, 0x00]; "long tier 8 missing six bytes")]
#[test_case(long, &[0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]; "long escape missing a byte")]
fn test_truncated(read: fn(&mut ByteBuf) -> Result<(), Error>, data: &[u8]) {
    let mut buf = ByteBuf::from(data);
    let err = read(&mut buf).unwrap_err();
    assert!(err.is_truncated(), "{err}");

    // Failed reads leave the cursor where it was.
    assert_eq!(buf.reader_index(), 0);
    assert_eq!(buf.size(), data.len());
}

#[test]
fn test_reserved_short_tags() {
    for tag in 0xc0..=0xfe {
        let mut buf = ByteBuf::from(vec![tag, 0, 0]);
        assert_eq!(buf.read_short().unwrap_err(), Error::InvalidTag(tag));
    }
}

#[test]
fn test_negative_size_is_invalid() {
    let mut buf = ByteBuf::new();
    buf.write_int(-1);
    let err = buf.read_string().unwrap_err();
    assert_eq!(err, Error::InvalidUnsigned(-1));
    assert!(err.is_invalid_encoding());
}
