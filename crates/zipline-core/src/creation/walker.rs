//! Source expansion into archive entry records.
//!
//! A [`Walker`] turns one registered source — a file or a directory tree —
//! into a flat list of [`WalkedEntry`] records, consulting the
//! [`PathFilter`](crate::PathFilter) at every node. The walk touches only
//! metadata; file content is streamed later, at write time.

use crate::creation::filter::PathFilter;
use crate::error::ArchiveError;
use crate::error::Result;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;
use walkdir::WalkDir;

/// One record produced by walking a source: where the bytes live on disk
/// and what the entry is called inside the archive.
///
/// Archive names always use forward-slash separators, regardless of the
/// host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    /// Full filesystem path of the node.
    pub path: PathBuf,
    /// Archive-internal name.
    pub name: String,
    /// Directory record (no content) versus file record.
    pub is_dir: bool,
}

/// Expands registered sources into [`WalkedEntry`] lists.
pub struct Walker<'a> {
    filter: &'a PathFilter,
    fail_fast: bool,
}

impl<'a> Walker<'a> {
    /// Creates a walker that consults `filter` at every node and applies
    /// `fail_fast` to per-node failures below a directory source.
    #[must_use]
    pub fn new(filter: &'a PathFilter, fail_fast: bool) -> Self {
        Self { filter, fail_fast }
    }

    /// Walks `source`, placing its entries under `dest_prefix`.
    ///
    /// An excluded source contributes no entries and returns successfully.
    /// A file source emits one record named `dest_prefix/<basename>`
    /// (basename alone when the prefix is empty); `explicit_name`
    /// overrides the basename. A directory source given with a trailing
    /// separator contributes no path segment of its own — its children
    /// land directly under `dest_prefix`; without one, its basename is
    /// appended to the prefix and a directory record is emitted for it.
    ///
    /// Children are visited in the order the underlying directory listing
    /// returns them; excluded nodes are pruned together with their
    /// subtrees.
    ///
    /// # Errors
    ///
    /// `SourceNotFound` if `source` does not exist, `InvalidSource` if it
    /// is neither a file nor a directory. Failures on individual children
    /// obey the fail-fast flag: they either abort the walk or are logged
    /// and skipped.
    pub fn walk(
        &self,
        source: &Path,
        dest_prefix: &str,
        explicit_name: Option<&str>,
    ) -> Result<Vec<WalkedEntry>> {
        if !self.filter.should_include(source) {
            return Ok(Vec::new());
        }

        let metadata = std::fs::metadata(source).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                ArchiveError::Io(e)
            }
        })?;

        if metadata.is_file() {
            let base = match explicit_name {
                Some(name) => name.to_string(),
                None => utf8_basename(source)?,
            };
            return Ok(vec![WalkedEntry {
                path: source.to_path_buf(),
                name: join_name(dest_prefix, &base),
                is_dir: false,
            }]);
        }

        if !metadata.is_dir() {
            return Err(ArchiveError::InvalidSource {
                path: source.to_path_buf(),
            });
        }

        self.walk_dir(source, dest_prefix, explicit_name)
    }

    fn walk_dir(
        &self,
        source: &Path,
        dest_prefix: &str,
        explicit_name: Option<&str>,
    ) -> Result<Vec<WalkedEntry>> {
        let prefix = if has_trailing_separator(source) {
            dest_prefix.to_string()
        } else {
            let base = match explicit_name {
                Some(name) => name.to_string(),
                None => utf8_basename(source)?,
            };
            join_name(dest_prefix, &base)
        };

        let mut entries = Vec::new();
        if !prefix.is_empty() {
            entries.push(WalkedEntry {
                path: source.to_path_buf(),
                name: prefix.clone(),
                is_dir: true,
            });
        }

        let iter = WalkDir::new(source)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| self.filter.should_include(entry.path()));

        for item in iter {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    let err = ArchiveError::Io(std::io::Error::other(format!(
                        "walk failed under {}: {e}",
                        source.display()
                    )));
                    if self.fail_fast {
                        return Err(err);
                    }
                    warn!("skipping unreadable entry: {err}");
                    continue;
                }
            };

            let name = match entry
                .path()
                .strip_prefix(source)
                .map_err(|e| {
                    ArchiveError::Io(std::io::Error::other(format!(
                        "entry {} escaped its walk root: {e}",
                        entry.path().display()
                    )))
                })
                .and_then(|relative| join_relative(&prefix, relative))
            {
                Ok(name) => name,
                Err(e) => {
                    if self.fail_fast {
                        return Err(e);
                    }
                    warn!("skipping unrepresentable entry: {e}");
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                entries.push(WalkedEntry {
                    path: entry.into_path(),
                    name,
                    is_dir: true,
                });
            } else if file_type.is_file() {
                entries.push(WalkedEntry {
                    path: entry.into_path(),
                    name,
                    is_dir: false,
                });
            } else {
                // Links are followed, so this is a special file (socket,
                // FIFO, device).
                let err = ArchiveError::InvalidSource {
                    path: entry.into_path(),
                };
                if self.fail_fast {
                    return Err(err);
                }
                warn!("skipping special file: {err}");
            }
        }

        Ok(entries)
    }
}

/// Returns the source path's basename as UTF-8.
fn utf8_basename(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        ArchiveError::Io(std::io::Error::other(format!(
            "cannot determine basename for {}",
            path.display()
        )))
    })?;
    name.to_str().map(ToString::to_string).ok_or_else(|| {
        ArchiveError::Io(std::io::Error::other(format!(
            "path is not valid UTF-8: {}",
            path.display()
        )))
    })
}

/// Whether the path was given with a trailing separator, e.g. `dir/`.
/// `PathBuf` preserves the original string form, so this inspects it
/// directly.
fn has_trailing_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_str()
        .is_some_and(|s| s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR))
}

/// Joins an archive name onto a prefix, with no leading slash when the
/// prefix is empty.
fn join_name(prefix: &str, base: &str) -> String {
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{prefix}/{base}")
    }
}

/// Joins a relative filesystem path under an archive prefix, converting
/// host separators to forward slashes.
fn join_relative(prefix: &str, relative: &Path) -> Result<String> {
    let mut name = prefix.to_string();
    for component in relative.components() {
        let part = component.as_os_str().to_str().ok_or_else(|| {
            ArchiveError::Io(std::io::Error::other(format!(
                "path is not valid UTF-8: {}",
                relative.display()
            )))
        })?;
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(part);
    }
    Ok(name)
}
