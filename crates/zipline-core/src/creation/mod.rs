//! Archive assembly: path filtering, source walking, and ZIP writing.

pub mod builder;
pub mod filter;
pub mod walker;

// Re-exports for public API
pub use builder::ArchiveBuilder;
pub use filter::ExcludeRule;
pub use filter::PathFilter;
pub use walker::WalkedEntry;
pub use walker::Walker;
