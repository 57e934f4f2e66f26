//! Storage growth, compaction, and reuse across sequences of reads and writes.

use luban_buffer::{buffer::grow, ByteBuf, Pool, PoolConfig, ReadBuf, WriteBuf};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn test_growth_sequence() {
    let mut buf = ByteBuf::new();
    assert_eq!(buf.capacity(), 0);

    let mut capacities = Vec::new();
    for _ in 0..100 {
        buf.write_fint(0);
        if capacities.last() != Some(&buf.capacity()) {
            capacities.push(buf.capacity());
        }
    }
    assert_eq!(capacities, [12, 18, 27, 40, 60, 90, 135, 202, 303, 454]);
    assert_eq!(grow(0, 1), 12);
    assert_eq!(grow(12, 101), 135);
}

#[test]
fn test_compaction_reuses_storage() {
    let mut buf = ByteBuf::with_capacity(16);
    buf.write_flong(1);
    buf.write_flong(2);
    assert_eq!(buf.read_flong().unwrap(), 1);

    // 8 bytes occupied at the tail, 8 reclaimable at the front.
    buf.write_fint(3);
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.reader_index(), 0);
    assert_eq!(buf.writer_index(), 12);
    assert_eq!(buf.read_flong().unwrap(), 2);
    assert_eq!(buf.read_fint().unwrap(), 3);
}

#[test]
fn test_interleaved_random() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut buf = ByteBuf::new();
    let mut pending = std::collections::VecDeque::new();
    for _ in 0..10_000 {
        if pending.is_empty() || rng.gen_bool(0.6) {
            let value: i64 = rng.gen::<i64>() >> rng.gen_range(0..64u32);
            buf.write_long(value);
            pending.push_back(value);
        } else {
            let expected = pending.pop_front().unwrap();
            assert_eq!(buf.read_long().unwrap(), expected);
        }
        assert!(buf.reader_index() <= buf.writer_index());
        assert!(buf.writer_index() <= buf.capacity());
    }
    while let Some(expected) = pending.pop_front() {
        assert_eq!(buf.read_long().unwrap(), expected);
    }
    assert!(buf.is_empty());
}

#[test]
fn test_pool_round_trip() {
    let pool = Pool::new(PoolConfig {
        max_idle: 4,
        max_retained_capacity: 1024,
    });

    // A buffer that grew while held keeps its storage for the next user.
    let mut buf = pool.take();
    buf.write_bytes(&[0xaa; 100]);
    assert_eq!(buf.capacity(), 135);
    pool.release(buf);

    let mut guard = pool.acquire();
    assert_eq!(guard.capacity(), 135);
    assert!(guard.is_empty());
    guard.write_string("reused");
    assert_eq!(guard.read_string().unwrap(), "reused");
    drop(guard);
    assert_eq!(pool.idle(), 1);

    // Oversized buffers are not retained.
    let mut big = pool.take();
    big.write_bytes(&[0; 2000]);
    pool.release(big);
    assert_eq!(pool.idle(), 0);
}
