//! Streaming ZIP assembly.
//!
//! [`ArchiveBuilder`] wraps `zip::ZipWriter`: entries go in as named byte
//! streams, the finished container comes out of the sink handed to
//! [`ArchiveBuilder::new`]. Consumable exactly once — `finish` takes the
//! builder by value.

use crate::error::Result;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Copy buffer size for streaming file content into the container.
const COPY_BUF_SIZE: usize = 64 * 1024;

/// Accumulates named entries into a ZIP container written to a sink.
///
/// File content is copied through a fixed-size buffer, so adding a large
/// file never materializes it in memory. Duplicate entry names are not
/// detected: the container keeps both records, and in-order extraction
/// makes the last one win.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use zipline_core::ArchiveBuilder;
///
/// # fn main() -> zipline_core::Result<()> {
/// let mut builder = ArchiveBuilder::new(Cursor::new(Vec::new()), true);
/// builder.add_directory("docs")?;
/// builder.add_file("docs/readme.md", &mut "hello".as_bytes())?;
/// let archive = builder.finish()?.into_inner();
/// assert!(!archive.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct ArchiveBuilder<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    buf: Vec<u8>,
}

impl<W: Write + Seek> ArchiveBuilder<W> {
    /// Creates a builder writing to `sink`. `compress` selects Deflate;
    /// otherwise entries are stored uncompressed.
    #[must_use]
    pub fn new(sink: W, compress: bool) -> Self {
        let method = if compress {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };
        Self {
            zip: ZipWriter::new(sink),
            options: SimpleFileOptions::default().compression_method(method),
            buf: vec![0u8; COPY_BUF_SIZE],
        }
    }

    /// Adds a file entry, streaming `content` until EOF.
    ///
    /// Returns the number of content bytes written.
    pub fn add_file<R: Read>(&mut self, name: &str, content: &mut R) -> Result<u64> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| std::io::Error::other(format!("failed to start entry {name}: {e}")))?;

        let mut written = 0u64;
        loop {
            let read = content.read(&mut self.buf)?;
            if read == 0 {
                break;
            }
            self.zip.write_all(&self.buf[..read])?;
            written += read as u64;
        }
        Ok(written)
    }

    /// Adds an explicit directory record. ZIP marks directories with a
    /// trailing slash.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        let dir_name = format!("{}/", name.trim_end_matches('/'));
        self.zip
            .add_directory(dir_name.as_str(), self.options)
            .map_err(|e| std::io::Error::other(format!("failed to add directory {name}: {e}")))?;
        Ok(())
    }

    /// Writes the central directory and returns the sink.
    pub fn finish(self) -> Result<W> {
        let sink = self
            .zip
            .finish()
            .map_err(|e| std::io::Error::other(format!("failed to finish archive: {e}")))?;
        Ok(sink)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_back(data: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
        zip::ZipArchive::new(Cursor::new(data)).unwrap()
    }

    #[test]
    fn test_builder_writes_file_entries() {
        let mut builder = ArchiveBuilder::new(Cursor::new(Vec::new()), true);
        builder.add_file("a.txt", &mut "alpha".as_bytes()).unwrap();
        builder
            .add_file("dir/b.txt", &mut "beta".as_bytes())
            .unwrap();
        let data = builder.finish().unwrap().into_inner();

        let mut archive = read_back(data);
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("a.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "alpha");
    }

    #[test]
    fn test_builder_directory_records_have_trailing_slash() {
        let mut builder = ArchiveBuilder::new(Cursor::new(Vec::new()), true);
        builder.add_directory("docs").unwrap();
        builder.add_directory("docs/nested/").unwrap();
        let data = builder.finish().unwrap().into_inner();

        let mut archive = read_back(data);
        for index in 0..archive.len() {
            let entry = archive.by_index(index).unwrap();
            assert!(entry.is_dir());
            assert!(entry.name().ends_with('/'));
        }
    }

    #[test]
    fn test_builder_reports_bytes_written() {
        let mut builder = ArchiveBuilder::new(Cursor::new(Vec::new()), true);
        let written = builder
            .add_file("data.bin", &mut vec![7u8; 100_000].as_slice())
            .unwrap();
        assert_eq!(written, 100_000);
        builder.finish().unwrap();
    }

    #[test]
    fn test_builder_stored_mode() {
        let payload = vec![42u8; 10_000];
        let mut builder = ArchiveBuilder::new(Cursor::new(Vec::new()), false);
        builder
            .add_file("raw.bin", &mut payload.as_slice())
            .unwrap();
        let data = builder.finish().unwrap().into_inner();

        // Stored output holds the payload verbatim, so it cannot be
        // smaller than the content.
        assert!(data.len() > payload.len());

        let mut archive = read_back(data);
        let mut restored = Vec::new();
        archive
            .by_name("raw.bin")
            .unwrap()
            .read_to_end(&mut restored)
            .unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn test_builder_compressed_smaller_than_stored_for_redundant_input() {
        let payload = vec![0u8; 100_000];

        let mut stored = ArchiveBuilder::new(Cursor::new(Vec::new()), false);
        stored.add_file("z.bin", &mut payload.as_slice()).unwrap();
        let stored_len = stored.finish().unwrap().into_inner().len();

        let mut deflated = ArchiveBuilder::new(Cursor::new(Vec::new()), true);
        deflated.add_file("z.bin", &mut payload.as_slice()).unwrap();
        let deflated_len = deflated.finish().unwrap().into_inner().len();

        assert!(deflated_len < stored_len);
    }

    #[test]
    fn test_builder_output_starts_with_zip_magic() {
        let mut builder = ArchiveBuilder::new(Cursor::new(Vec::new()), true);
        builder.add_file("x", &mut "x".as_bytes()).unwrap();
        let data = builder.finish().unwrap().into_inner();
        assert_eq!(&data[0..4], b"PK\x03\x04");
    }
}
