//! Backup display formatting

use chrono::Local;

use crate::backup::BackupInfo;

/// Format a list of archives, newest first
pub fn format_backup_list(backups: &[BackupInfo], verbose: bool) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    let mut output = String::new();
    output.push_str("Available Backups\n");
    output.push_str("=================\n\n");

    let now = Local::now();
    for (i, backup) in backups.iter().enumerate() {
        let age = format_age(now.signed_duration_since(backup.created_at));

        if verbose {
            output.push_str(&format!(
                "{}. {}\n   Profile: {}\n   Created: {}\n   Size: {}\n   Age: {}\n\n",
                i + 1,
                backup.filename,
                backup.profile_name,
                backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                format_size(backup.size_bytes),
                age,
            ));
        } else {
            output.push_str(&format!(
                "  {}. {} ({} ago, {})\n",
                i + 1,
                backup.filename,
                age,
                format_size(backup.size_bytes),
            ));
        }
    }

    output.push_str(&format!("\nTotal: {} backup(s)\n", backups.len()));
    output
}

/// Format an age in the largest whole unit
pub fn format_age(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_age(chrono::Duration::minutes(90)), "1h");
        assert_eq!(format_age(chrono::Duration::days(3)), "3d");
        assert_eq!(format_age(chrono::Duration::days(65)), "2mo");
        assert_eq!(format_age(chrono::Duration::seconds(-5)), "0s");
    }

    #[test]
    fn test_backup_list() {
        assert_eq!(format_backup_list(&[], false), "No backups found.");

        let backup = BackupInfo {
            filename: "Backup_Target_20240101_120000.zip".into(),
            path: PathBuf::from("/b/Backup_Target_20240101_120000.zip"),
            profile_name: "Target".into(),
            timestamp: None,
            created_at: Local::now(),
            size_bytes: 2048,
        };

        let output = format_backup_list(std::slice::from_ref(&backup), false);
        assert!(output.contains("1. Backup_Target_20240101_120000.zip"));
        assert!(output.contains("2.0 KB"));
        assert!(output.contains("Total: 1 backup(s)"));

        let verbose = format_backup_list(&[backup], true);
        assert!(verbose.contains("Profile: Target"));
    }
}
