//! Fluent archive assembly over registered sources.

use crate::creation::builder::ArchiveBuilder;
use crate::creation::filter::ExcludeRule;
use crate::creation::filter::PathFilter;
use crate::creation::walker::WalkedEntry;
use crate::creation::walker::Walker;
use crate::error::Result;
use crate::extraction;
use crate::response::ResponseSink;
use std::fmt;
use std::fs::File;
use std::io::Cursor;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;

/// Download name used by [`Archiver::pipe`] when the caller supplies none.
const DEFAULT_PIPE_NAME: &str = "out.zip";

/// One registered source: a filesystem path, the archive-internal folder
/// its contents land under, and an optional basename override.
#[derive(Debug, Clone)]
struct Source {
    path: PathBuf,
    dest: String,
    name: Option<String>,
}

/// Collects filesystem sources, exclusion rules, and a filter, then
/// assembles them into a compressed ZIP archive written to a file or a
/// response sink.
///
/// Configuration calls chain; `save`, `pipe`, and `extract` run the
/// operation. The source queue is never cleared: a second `save` re-walks
/// and re-archives everything.
///
/// # Examples
///
/// ```no_run
/// use zipline_core::Archiver;
///
/// # fn main() -> zipline_core::Result<()> {
/// let mut zip = Archiver::new();
/// zip.exclude("node_modules")
///     .exclude(".git")
///     .add("project", "");
/// zip.save("project.zip")?;
/// # Ok(())
/// # }
/// ```
pub struct Archiver {
    sources: Vec<Source>,
    filter: PathFilter,
    fail_fast: bool,
}

impl Archiver {
    /// Creates an archiver with no sources, no exclusions, and the
    /// fail-soft error policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            filter: PathFilter::new(),
            fail_fast: false,
        }
    }

    /// Adds an exclusion rule: a literal basename (`&str`/`String`) or a
    /// compiled [`regex::Regex`]. A path is excluded when any rule
    /// matches its basename; the rule set only grows.
    pub fn exclude<R: Into<ExcludeRule>>(&mut self, rule: R) -> &mut Self {
        self.filter.add_rule(rule.into());
        self
    }

    /// Installs the inclusion predicate consulted for every candidate
    /// path before the exclusion rules. The last call wins; the default
    /// includes everything.
    pub fn filter<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.filter.set_predicate(Box::new(predicate));
        self
    }

    /// Queues a source file or directory for inclusion under the archive
    /// folder `dest` (`""` for the archive root).
    ///
    /// A directory source given with a trailing separator (`"dir/"`)
    /// merges its children directly into `dest`; without one (`"dir"`)
    /// the directory's basename becomes an extra path segment. Both
    /// forms are intentional and preserved.
    pub fn add<P: AsRef<Path>, S: Into<String>>(&mut self, source: P, dest: S) -> &mut Self {
        self.sources.push(Source {
            path: source.as_ref().to_path_buf(),
            dest: dest.into(),
            name: None,
        });
        self
    }

    /// Like [`add`](Self::add), but overrides the entry basename with
    /// `name`.
    pub fn add_named<P, S, N>(&mut self, source: P, dest: S, name: N) -> &mut Self
    where
        P: AsRef<Path>,
        S: Into<String>,
        N: Into<String>,
    {
        self.sources.push(Source {
            path: source.as_ref().to_path_buf(),
            dest: dest.into(),
            name: Some(name.into()),
        });
        self
    }

    /// Sets the error policy for the walk phase. With `true`, the first
    /// source or per-node failure aborts the whole operation; with
    /// `false` (the default) failures are logged and the remaining
    /// sources proceed, so the archive may silently omit failed entries.
    pub fn exit_on_error(&mut self, value: bool) -> &mut Self {
        self.fail_fast = value;
        self
    }

    /// Walks every queued source and writes the archive to `destination`.
    ///
    /// All walking happens before the output file is created, so a
    /// fail-fast walk error leaves nothing behind. Returns once the sink
    /// reports the stream fully flushed.
    ///
    /// # Errors
    ///
    /// Walk failures per the error policy; any failure to create or
    /// write the output always propagates.
    pub fn save<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        let entries = self.collect()?;
        let file = File::create(destination.as_ref())?;
        let file = write_entries(ArchiveBuilder::new(file, true), &entries)?;
        file.sync_all()?;
        Ok(())
    }

    /// Walks every queued source and streams the archive to a response
    /// sink as an attachment named `name` (default `out.zip`).
    ///
    /// The `Content-Disposition` header is set before any body bytes;
    /// header failures always propagate, even under the fail-soft
    /// policy.
    ///
    /// # Errors
    ///
    /// Walk failures per the error policy; header and sink write
    /// failures always propagate.
    pub fn pipe<S: ResponseSink>(&self, sink: &mut S, name: Option<&str>) -> Result<()> {
        let entries = self.collect()?;

        let name = name.unwrap_or(DEFAULT_PIPE_NAME);
        sink.set_header(
            "Content-Disposition",
            &format!("attachment; filename=\"{name}\""),
        )?;

        let cursor = write_entries(ArchiveBuilder::new(Cursor::new(Vec::new()), true), &entries)?;
        sink.write_all(&cursor.into_inner())?;
        sink.flush()?;
        Ok(())
    }

    /// Extracts `archive` into the absolute directory `destination`.
    ///
    /// Convenience forwarding to
    /// [`extraction::extract_archive`](crate::extraction::extract_archive);
    /// the archiver's queued state plays no part.
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        archive: P,
        destination: Q,
    ) -> Result<()> {
        extraction::extract_archive(archive, destination)
    }

    /// The shared walk step: every queued source, in registration order,
    /// under the exit policy.
    fn collect(&self) -> Result<Vec<WalkedEntry>> {
        let walker = Walker::new(&self.filter, self.fail_fast);
        let mut entries = Vec::new();
        for source in &self.sources {
            match walker.walk(&source.path, &source.dest, source.name.as_deref()) {
                Ok(walked) => entries.extend(walked),
                Err(e) if self.fail_fast => return Err(e),
                Err(e) => warn!("skipping source {}: {e}", source.path.display()),
            }
        }
        Ok(entries)
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Archiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archiver")
            .field("sources", &self.sources)
            .field("filter", &self.filter)
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

/// Streams collected entries through a builder and returns the sink.
/// Write-phase failures always propagate; the walk already applied the
/// error policy.
fn write_entries<W: Write + Seek>(
    mut builder: ArchiveBuilder<W>,
    entries: &[WalkedEntry],
) -> Result<W> {
    for entry in entries {
        if entry.is_dir {
            builder.add_directory(&entry.name)?;
        } else {
            let mut file = File::open(&entry.path)?;
            builder.add_file(&entry.name, &mut file)?;
        }
    }
    builder.finish()
}
