//! Utility modules for the archiver.

pub mod date;
pub mod fs;
pub mod mime;
pub mod plural;

pub use date::DateTimeUtc;
pub use plural::plural_count;
