//! Fully draining a byte stream into memory.
//!
//! # Design
//! The source is taken by value so it is dropped (closed) on every exit
//! path, including a read failure after partial consumption. Failures while
//! releasing the sink on an error path are logged and swallowed so they
//! never mask the read error that caused them.

use std::io::{self, Read, Write};

use log::warn;

/// Size of the intermediate buffer used by `copy`.
pub const BUFFER_SIZE: usize = 8192;

/// What happens to the sink once copying finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    /// Flush the sink on success; leave it untouched on failure.
    Flush,
    /// Flush and release the sink on every path.
    Close,
}

/// Copy everything from `source` into `sink` and return the byte count.
///
/// With no sink the source is still drained and counted, its contents
/// discarded.
pub fn copy<R: Read, W: Write>(mut source: R, mut sink: Option<W>, mode: SinkMode) -> io::Result<u64> {
    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total = 0u64;

    let outcome = loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => break Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => break Err(e),
        };
        total += read as u64;
        if let Some(out) = sink.as_mut() {
            if let Err(e) = out.write_all(&buffer[..read]) {
                break Err(e);
            }
        }
    };
    drop(source);

    match outcome {
        Ok(()) => {
            if let Some(mut out) = sink {
                out.flush()?;
            }
            Ok(total)
        }
        Err(e) => {
            if let (SinkMode::Close, Some(mut out)) = (mode, sink) {
                if let Err(close_err) = out.flush() {
                    warn!("ignoring sink close failure after copy error: {close_err}");
                }
            }
            Err(e)
        }
    }
}

/// Read `source` to the end into a fresh buffer.
pub fn drain<R: Read>(source: R) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    copy(source, Some(&mut bytes), SinkMode::Close)?;
    Ok(bytes)
}
