use std::fmt::Write;

use super::*;

/// Records every call so tests can see where the buffer flushed.
#[derive(Default)]
struct ChunkSink {
    chunks: Vec<Vec<u8>>,
}

impl ReportSink for ChunkSink {
    fn write_all(&mut self, bytes: &[u8]) {
        self.chunks.push(bytes.to_vec());
    }
}

#[test]
fn test_small_writes_are_held_until_flush() {
    let mut sink = ChunkSink::default();
    {
        let mut buf = FixedBuffer::new(&mut sink);
        buf.write_str("Stack dump:\n").unwrap();
        buf.write_bytes(b"Program arguments:\n");
        buf.flush();
        buf.write_bytes(b"tail");
    }
    assert_eq!(
        sink.chunks,
        vec![b"Stack dump:\nProgram arguments:\n".to_vec(), b"tail".to_vec()]
    );
}

#[test]
fn test_oversized_write_is_not_truncated() {
    let payload: Vec<u8> = (0..REPORT_BUFFER_SIZE * 3 + 17)
        .map(|i| b'a' + (i % 26) as u8)
        .collect();
    let mut sink = ChunkSink::default();
    {
        let mut buf = FixedBuffer::new(&mut sink);
        buf.write_bytes(&payload);
    }

    assert!(sink.chunks.iter().all(|c| c.len() <= REPORT_BUFFER_SIZE));
    assert_eq!(sink.chunks.concat(), payload);
}

#[test]
fn test_formatting_goes_through_buffer() {
    let mut out = Vec::new();
    {
        let mut buf = FixedBuffer::new(&mut out);
        write!(buf, "{} version {}", "Vela", "0.1.0").unwrap();
    }
    assert_eq!(out, b"Vela version 0.1.0");
}

#[test]
fn test_empty_flush_writes_nothing() {
    let mut sink = ChunkSink::default();
    FixedBuffer::new(&mut sink).flush();
    assert!(sink.chunks.is_empty());
}
