//! Copy history
//!
//! Append-only record of every copy run from the command line. Each run is
//! written as one JSON line so the log survives partial writes and can be
//! tailed by other tools.

pub mod entry;
pub mod logger;

pub use entry::HistoryEntry;
pub use logger::HistoryLogger;
