//! Message framing for one-shot connections.
//!
//! A request has no length prefix: the server reads fixed-size chunks until a
//! read comes back shorter than the chunk (a zero-length read after the peer
//! half-closes counts). This only works when the peer sends a single message
//! and then stops writing, so connections are never reused.

use std::io::{self, Read, Write};

use super::FramingError;

/// Size of each read issued while accumulating a request.
pub(crate) const READ_CHUNK_BYTES: usize = 4096;

/// Reads one complete request message from the stream.
///
/// Returns the accumulated bytes once a read yields fewer than
/// [`READ_CHUNK_BYTES`] bytes. A message whose length is an exact multiple of
/// the chunk size completes on the zero-length read that follows the peer's
/// half-close.
///
/// # Errors
///
/// Returns [`FramingError::Io`] if a read fails and [`FramingError::TooLarge`]
/// once more than `limit` bytes have been received.
pub(crate) fn read_request<R: Read>(stream: &mut R, limit: usize) -> Result<Vec<u8>, FramingError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; READ_CHUNK_BYTES];
    loop {
        let bytes_read = read_chunk_with_retry(stream, &mut chunk)?;
        buffer.extend_from_slice(chunk.get(..bytes_read).unwrap_or_default());
        if buffer.len() > limit {
            return Err(FramingError::TooLarge { limit });
        }
        if bytes_read < READ_CHUNK_BYTES {
            return Ok(buffer);
        }
    }
}

/// Writes the full response and flushes it before the caller closes.
pub(crate) fn write_response<W: Write>(stream: &mut W, payload: &[u8]) -> io::Result<()> {
    stream.write_all(payload)?;
    stream.flush()
}

fn read_chunk_with_retry<R: Read>(stream: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(chunk) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    /// Reader that hands out pre-scripted read results one call at a time.
    struct ScriptedReader {
        reads: VecDeque<io::Result<Vec<u8>>>,
        calls: usize,
    }

    impl ScriptedReader {
        fn new(reads: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                reads: reads.into(),
                calls: 0,
            }
        }
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.reads.pop_front() {
                Some(Ok(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(Err(error)) => Err(error),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn short_read_completes_the_message() {
        let mut reader = ScriptedReader::new(vec![Ok(br#"{"method":"subs"}"#.to_vec())]);
        let message = read_request(&mut reader, 1024).expect("read");
        assert_eq!(message, br#"{"method":"subs"}"#);
        assert_eq!(reader.calls, 1);
    }

    #[rstest]
    #[case::one_chunk(1)]
    #[case::two_chunks(2)]
    fn exact_chunk_multiples_finish_on_empty_read(#[case] chunks: usize) {
        let reads = (0..chunks)
            .map(|_| Ok(vec![b' '; READ_CHUNK_BYTES]))
            .collect();
        let mut reader = ScriptedReader::new(reads);
        let message = read_request(&mut reader, usize::MAX).expect("read");
        assert_eq!(message.len(), chunks * READ_CHUNK_BYTES);
        assert_eq!(reader.calls, chunks + 1);
    }

    #[test]
    fn full_chunk_followed_by_tail_is_accumulated() {
        let mut reader = ScriptedReader::new(vec![
            Ok(vec![b'a'; READ_CHUNK_BYTES]),
            Ok(b"tail".to_vec()),
        ]);
        let message = read_request(&mut reader, usize::MAX).expect("read");
        assert_eq!(message.len(), READ_CHUNK_BYTES + 4);
        assert!(message.ends_with(b"tail"));
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut reader = ScriptedReader::new(vec![
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(b"{}".to_vec()),
        ]);
        assert_eq!(read_request(&mut reader, 16).expect("read"), b"{}");
    }

    #[test]
    fn io_errors_abort_the_read() {
        let mut reader = ScriptedReader::new(vec![Err(io::Error::from(
            io::ErrorKind::ConnectionReset,
        ))]);
        let error = read_request(&mut reader, 16).expect_err("read should fail");
        assert!(matches!(error, FramingError::Io(_)));
    }

    #[test]
    fn oversized_requests_are_rejected() {
        let mut reader = ScriptedReader::new(vec![Ok(vec![b'x'; READ_CHUNK_BYTES])]);
        let error = read_request(&mut reader, 100).expect_err("limit should trip");
        assert!(matches!(error, FramingError::TooLarge { limit: 100 }));
    }

    #[test]
    fn empty_stream_yields_empty_message() {
        let mut reader = Cursor::new(Vec::new());
        assert!(read_request(&mut reader, 16).expect("read").is_empty());
    }

    #[test]
    fn write_response_sends_every_byte() {
        let mut sink = Vec::new();
        write_response(&mut sink, br#"{"type":"success","data":{}}"#).expect("write");
        assert_eq!(sink, br#"{"type":"success","data":{}}"#);
    }
}
