//! Benchmark decoding a table of rows, with and without buffer reuse.

use super::tiered_ints;
use bytes::{Buf, BufMut};
use criterion::{black_box, criterion_group, Criterion};
use luban_buffer::{
    ByteBuf, Encode, EncodeSize, Error, Pool, Read, ReadBuf, Write, WriteBuf,
};

/// Number of rows in the table.
const ROWS: usize = 1_000;

struct Row {
    id: i32,
    name: String,
    payload: ByteBuf,
}

impl Write for Row {
    fn write(&self, buf: &mut impl BufMut) {
        buf.write_int(self.id);
        buf.write_string(&self.name);
        buf.write_octets(&self.payload);
    }
}

impl Read for Row {
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Ok(Self {
            id: buf.read_int()?,
            name: buf.read_string()?,
            payload: buf.read_octets()?,
        })
    }
}

impl EncodeSize for Row {
    fn encode_size(&self) -> usize {
        self.id.encode_size() + self.name.encode_size() + self.payload.encode_size()
    }
}

fn bench_decode_table(c: &mut Criterion) {
    let rows: Vec<Row> = tiered_ints(ROWS)
        .into_iter()
        .map(|id| Row {
            id,
            name: format!("row-{id}"),
            payload: ByteBuf::from(vec![id as u8; 48]),
        })
        .collect();
    let table = rows.encode();

    c.bench_function(&format!("{}/alloc", module_path!()), |b| {
        b.iter(|| {
            let mut buf = table.clone();
            let n = buf.read_size().unwrap();
            for _ in 0..n {
                black_box(Row::read(&mut buf).unwrap());
            }
        });
    });

    c.bench_function(&format!("{}/pooled", module_path!()), |b| {
        let pool = Pool::default();
        b.iter(|| {
            let mut buf = table.clone();
            let n = buf.read_size().unwrap();
            for _ in 0..n {
                let id = buf.read_int().unwrap();
                let name = buf.read_str().unwrap().len();
                let mut payload = pool.acquire();
                buf.read_octets_into(&mut payload).unwrap();
                black_box((id, name, payload.size()));
            }
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_decode_table
}
