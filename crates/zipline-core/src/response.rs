//! Transport seam for streaming archives into network responses.

use std::io;
use std::io::Write;

/// A byte sink with header-setting capability — the shape
/// [`Archiver::pipe`](crate::Archiver::pipe) needs from an HTTP response
/// object.
///
/// Implementations only forward bytes and record one header; nothing else
/// about the transport leaks into the archive path.
pub trait ResponseSink: Write {
    /// Sets a response header.
    ///
    /// # Errors
    ///
    /// Implementations fail when the transport can no longer accept
    /// headers (e.g. the response has already started). Such failures
    /// always propagate to the `pipe` caller, regardless of the
    /// archiver's error policy.
    fn set_header(&mut self, name: &str, value: &str) -> io::Result<()>;
}
