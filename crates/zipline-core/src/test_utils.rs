//! Test helpers shared by unit and integration tests.
//!
//! # Panics
//!
//! Functions here may panic on I/O errors; they are for test use only.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use crate::response::ResponseSink;
use std::io;
use std::io::Cursor;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates an in-memory ZIP archive from (name, content) pairs.
///
/// Entries are stored uncompressed. Names are written verbatim, which
/// lets tests fabricate containers the builder would never produce
/// (missing directory records, escaping names).
///
/// # Examples
///
/// ```
/// use zipline_core::test_utils::create_test_zip;
///
/// let data = create_test_zip(vec![("file.txt", b"hello" as &[u8])]);
/// assert!(!data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, data) in entries {
        zip.start_file(name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Returns the entry names of a ZIP byte buffer, in archive order.
#[must_use]
pub fn entry_names(data: &[u8]) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(data.to_vec())).unwrap();
    (0..zip.len())
        .map(|index| zip.by_index(index).unwrap().name().to_string())
        .collect()
}

/// In-memory [`ResponseSink`] recording headers and body bytes.
#[derive(Debug, Default)]
pub struct MockResponse {
    /// Recorded `(name, value)` header pairs.
    pub headers: Vec<(String, String)>,
    /// Accumulated body bytes.
    pub body: Vec<u8>,
    /// When set, `set_header` fails as if the response had already
    /// started.
    pub fail_headers: bool,
}

impl MockResponse {
    /// Creates an empty response recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded value of `name`, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Write for MockResponse {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseSink for MockResponse {
    fn set_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        if self.fail_headers {
            return Err(io::Error::other("headers already sent"));
        }
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
