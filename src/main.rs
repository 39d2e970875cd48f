use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use profile_merge::cli::{
    handle_backup_command, handle_copy_command, handle_history_command, handle_manifest_command,
    handle_pending_command, handle_types_command,
};
use profile_merge::config::{paths::MergePaths, settings::Settings};

/// Environment variable holding the tracing filter
const LOG_ENV_VAR: &str = "PROFILE_MERGE_LOG";

#[derive(Parser)]
#[command(
    name = "profile-merge",
    version,
    about = "Copy configuration data between application profiles",
    long_about = "profile-merge copies selected data-type files from one profile's \
                  DATABASE folder into another's. The target is backed up to a zip \
                  archive first and restored automatically if the copy fails."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every copyable data type
    Types,

    /// Copy data types from a source profile into a target profile
    Copy(profile_merge::cli::CopyArgs),

    /// Backup management commands
    #[command(subcommand)]
    Backup(profile_merge::cli::BackupCommands),

    /// Item manifest commands
    #[command(subcommand)]
    Manifest(profile_merge::cli::ManifestCommands),

    /// Pending cleanup commands
    #[command(subcommand)]
    Pending(profile_merge::cli::PendingCommands),

    /// Show recent copy runs
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let paths = MergePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    match cli.command {
        Some(Commands::Types) => handle_types_command(),
        Some(Commands::Copy(args)) => {
            let result = handle_copy_command(&paths, &settings, args)?;
            if !result.success {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Manifest(cmd)) => {
            handle_manifest_command(&paths, cmd)?;
        }
        Some(Commands::Pending(cmd)) => {
            handle_pending_command(&paths, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&paths, limit)?;
        }
        Some(Commands::Config) => {
            println!("profile-merge Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("History log:      {}", paths.history_log().display());
            println!("Manifests:        {}", paths.manifests_dir().display());
            println!("Pending cleanup:  {}", paths.pending_cleanup_file().display());
            println!();
            println!("Settings:");
            println!("  Backup before copy: {}", settings.create_backup);
            println!("  Backups kept:       {}", settings.backup_retention.keep_count);
            println!("  Log level:          {}", settings.log_level);
        }
        None => {
            println!("profile-merge - copy configuration data between profiles");
            println!();
            println!("Run 'profile-merge --help' for usage information.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the stderr log subscriber; `PROFILE_MERGE_LOG` overrides settings
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
