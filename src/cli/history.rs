//! Copy history command

use crate::config::paths::MergePaths;
use crate::display::format_history;
use crate::error::MergeResult;
use crate::history::HistoryLogger;

/// Print the most recent copy runs
pub fn handle_history_command(paths: &MergePaths, limit: usize) -> MergeResult<()> {
    let logger = HistoryLogger::new(paths.history_log());
    let entries = logger.read_recent(limit)?;
    println!("{}", format_history(&entries));
    Ok(())
}
