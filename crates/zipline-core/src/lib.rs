//! Recursive zip archiving with filtering and streaming extraction.
//!
//! `zipline-core` collects a configurable set of filesystem sources,
//! applies exclusion rules and an optional custom filter, streams the
//! selected content into a compressed ZIP archive (to a file or to a
//! network response sink), and extracts archives back onto disk.
//!
//! # Examples
//!
//! ```no_run
//! use zipline_core::Archiver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut zip = Archiver::new();
//! zip.exclude("node_modules").add("project", "");
//! zip.save("project.zip")?;
//! zip.extract("project.zip", "/srv/restore")?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod response;
pub mod test_utils;

// Re-export main API types
pub use archiver::Archiver;
pub use creation::ArchiveBuilder;
pub use creation::ExcludeRule;
pub use creation::PathFilter;
pub use creation::WalkedEntry;
pub use error::ArchiveError;
pub use error::Result;
pub use extraction::extract_archive;
pub use response::ResponseSink;
