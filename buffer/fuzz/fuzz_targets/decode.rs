#![no_main]

use libfuzzer_sys::fuzz_target;
use luban_buffer::{ByteBuf, Decode, ReadBuf};

// Arbitrary input must decode to a value or an error, never a panic, and failed
// varint reads must not move the cursor.
fuzz_target!(|data: &[u8]| {
    let _ = Vec::<Option<String>>::decode(data);
    let _ = Vec::<ByteBuf>::decode(data);

    let mut buf = ByteBuf::from(data);
    while buf.is_non_empty() {
        let mark = buf.reader_index();
        let selector = data[mark] % 4;
        let result = match selector {
            0 => buf.read_short().map(drop),
            1 => buf.read_int().map(drop),
            2 => buf.read_long().map(drop),
            _ => buf.read_string().map(drop),
        };
        if let Err(err) = result {
            if err.is_truncated() && selector < 3 {
                assert_eq!(buf.reader_index(), mark);
            }
            break;
        }
    }
});
