//! Archive extraction onto a filesystem destination.

use crate::error::ArchiveError;
use crate::error::Result;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// Extracts the ZIP file at `archive` into `destination`, which must be
/// an absolute path.
///
/// Entries are processed in archive order. Directory records are created
/// with every missing ancestor; parent directories are also ensured
/// before each file write, so a file whose directory was never recorded
/// still extracts. Entry bytes are streamed to disk, and per-entry
/// checksums are validated as they are read. Extraction errors always
/// propagate — there is no fail-soft mode — and a failure mid-way leaves
/// previously written entries in place.
///
/// # Errors
///
/// `DestinationNotAbsolute` for a relative destination (checked before
/// any filesystem access), `CorruptArchive` when the container cannot be
/// parsed, fails a checksum, or names an entry that would land outside
/// the destination, and `Io` for filesystem failures.
///
/// # Examples
///
/// ```no_run
/// use zipline_core::extract_archive;
///
/// # fn main() -> zipline_core::Result<()> {
/// extract_archive("backup.zip", "/srv/restore")?;
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(archive: P, destination: Q) -> Result<()> {
    let destination = destination.as_ref();
    if !destination.is_absolute() {
        return Err(ArchiveError::DestinationNotAbsolute {
            path: destination.to_path_buf(),
        });
    }

    let data = fs::read(archive.as_ref())?;
    let mut zip = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ArchiveError::CorruptArchive(e.to_string()))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| ArchiveError::CorruptArchive(e.to_string()))?;

        // Entry names come from the container; refuse any that would
        // land outside the destination root.
        let Some(relative) = entry.enclosed_name() else {
            return Err(ArchiveError::CorruptArchive(format!(
                "entry name escapes destination: {}",
                entry.name()
            )));
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                ArchiveError::CorruptArchive(e.to_string())
            } else {
                ArchiveError::Io(e)
            }
        })?;
    }

    Ok(())
}
