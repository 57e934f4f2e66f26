#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use luban_buffer::{ByteBuf, Decode, Encode, EncodeSize, ReadBuf, WriteBuf};

fn roundtrip<T>(v: T)
where
    T: Encode + Decode + PartialEq + std::fmt::Debug,
{
    let encoded = v.encode();
    assert_eq!(v.encode_size(), encoded.size());
    let decoded = T::decode(encoded).expect("Failed to decode a successfully encoded input!");
    assert_eq!(v, decoded);
}

// NOTE: Floats are compared by bits so NaN payloads must survive too
fn roundtrip_f32(v: f32) {
    let decoded = f32::decode(v.encode()).expect("Failed to decode f32!");
    assert_eq!(v.to_bits(), decoded.to_bits());
}

fn roundtrip_f64(v: f64) {
    let decoded = f64::decode(v.encode()).expect("Failed to decode f64!");
    assert_eq!(v.to_bits(), decoded.to_bits());
}

/// One write against a buffer, mirrored by a read of the same kind.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    Short(i16),
    Int(i32),
    Long(i64),
    Sint(i32),
    Slong(i64),
    Fshort(i16),
    Fint(i32),
    Flong(i64),
}

/// Writes `ops` while reading back every other value, exercising growth and compaction.
fn interleaved(ops: Vec<Op>) {
    let mut buf = ByteBuf::new();
    let mut pending = std::collections::VecDeque::new();
    for (i, op) in ops.into_iter().enumerate() {
        match op {
            Op::Short(v) => buf.write_short(v),
            Op::Int(v) => buf.write_int(v),
            Op::Long(v) => buf.write_long(v),
            Op::Sint(v) => buf.write_sint(v),
            Op::Slong(v) => buf.write_slong(v),
            Op::Fshort(v) => buf.write_fshort(v),
            Op::Fint(v) => buf.write_fint(v),
            Op::Flong(v) => buf.write_flong(v),
        }
        pending.push_back(op);
        if i % 2 == 1 {
            check(&mut buf, pending.pop_front().unwrap());
        }
        assert!(buf.reader_index() <= buf.writer_index());
        assert!(buf.writer_index() <= buf.capacity());
    }
    while let Some(op) = pending.pop_front() {
        check(&mut buf, op);
    }
    assert!(buf.is_empty());
}

fn check(buf: &mut ByteBuf, op: Op) {
    match op {
        Op::Short(v) => assert_eq!(buf.read_short().unwrap(), v),
        Op::Int(v) => assert_eq!(buf.read_int().unwrap(), v),
        Op::Long(v) => assert_eq!(buf.read_long().unwrap(), v),
        Op::Sint(v) => assert_eq!(buf.read_sint().unwrap(), v),
        Op::Slong(v) => assert_eq!(buf.read_slong().unwrap(), v),
        Op::Fshort(v) => assert_eq!(buf.read_fshort().unwrap(), v),
        Op::Fint(v) => assert_eq!(buf.read_fint().unwrap(), v),
        Op::Flong(v) => assert_eq!(buf.read_flong().unwrap(), v),
    }
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Bytes(&'a [u8]),
    String(String),
    Vec(Vec<i32>),
    OptionSome(i64),
    OptionNone,
    Bool(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Interleaved(Vec<Op>),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Bytes(it) => {
            roundtrip(Bytes::from(it.to_vec()));
            roundtrip(ByteBuf::from(it));
        }
        FuzzInput::String(it) => roundtrip(it),
        FuzzInput::Vec(it) => roundtrip(it),
        FuzzInput::OptionSome(v) => roundtrip(Some(v)),
        FuzzInput::OptionNone => roundtrip::<Option<i64>>(None),
        FuzzInput::Bool(v) => roundtrip(v),
        FuzzInput::U8(v) => roundtrip(v),
        FuzzInput::I16(v) => roundtrip(v),
        FuzzInput::I32(v) => roundtrip(v),
        FuzzInput::I64(v) => roundtrip(v),
        FuzzInput::F32(v) => roundtrip_f32(v),
        FuzzInput::F64(v) => roundtrip_f64(v),
        FuzzInput::Interleaved(ops) => interleaved(ops),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
