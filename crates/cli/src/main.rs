//! LMS progress CLI - mark curriculum units done and report course completion.

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use lms_core::{CompletionRecord, UnitId, UserId};
use lms_progress::{ProgressConfig, ProgressStore, RecordLoad};
use lms_storage::JsonFileStorage;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lms-progress")]
#[command(about = "Track learner completion of curriculum units", long_about = None)]
struct Cli {
    /// Directory holding progress data
    #[arg(long, env = "LMS_DATA_DIR", default_value = ".lms-progress")]
    data_dir: PathBuf,

    /// Prefix of per-user storage keys
    #[arg(long, default_value = "progress_")]
    key_prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mark a unit as completed
    Complete {
        /// Learner ID
        user: UserId,
        /// Unit ID
        unit: UnitId,
    },
    /// Mark a unit as not completed
    Incomplete {
        /// Learner ID
        user: UserId,
        /// Unit ID
        unit: UnitId,
    },
    /// Flip a unit between completed and not completed
    Toggle {
        /// Learner ID
        user: UserId,
        /// Unit ID
        unit: UnitId,
    },
    /// Show one unit's progress
    Show {
        /// Learner ID
        user: UserId,
        /// Unit ID
        unit: UnitId,
    },
    /// List every record for a learner
    List {
        /// Learner ID
        user: UserId,
    },
    /// Completion percentage of a course made of the given units
    Percent {
        /// Learner ID
        user: UserId,
        /// Units making up the course
        units: Vec<UnitId>,
    },
    /// List learners with stored progress
    Users,
    /// Forget all progress for a learner
    Reset {
        /// Learner ID
        user: UserId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = JsonFileStorage::open(&cli.data_dir).await?;
    let mut store = ProgressStore::new(storage).with_config(ProgressConfig {
        key_prefix: cli.key_prefix,
    });

    match cli.command {
        Commands::Complete { user, unit } => {
            store.mark_completed(&user, &unit).await?;
            info!("Marked {} completed for {}", unit, user);
        }
        Commands::Incomplete { user, unit } => {
            store.mark_incomplete(&user, &unit).await?;
            info!("Marked {} incomplete for {}", unit, user);
        }
        Commands::Toggle { user, unit } => {
            let done = store.toggle(&user, &unit).await?;
            println!("{} {}", unit, if done { "DONE" } else { "TODO" });
        }
        Commands::Show { user, unit } => {
            let Some(record) = store.get_unit_progress(&user, &unit).await else {
                println!("{} not started", unit);
                return Ok(());
            };
            println!("{}", format_record(&record));
        }
        Commands::List { user } => {
            let load = store.load(&user).await;
            match &load {
                RecordLoad::Corrupt { reason } => {
                    eprintln!("Stored progress for {} is unreadable ({}); treating as empty", user, reason);
                }
                RecordLoad::ReadFailed { reason } => {
                    eprintln!("Could not read progress for {} ({})", user, reason);
                }
                RecordLoad::Missing | RecordLoad::Unavailable | RecordLoad::Loaded(_) => {}
            }
            let records = load.into_records();

            println!("Progress for {} ({})", user, records.len());
            for record in &records {
                println!("  {}", format_record(record));
            }
        }
        Commands::Percent { user, units } => {
            let progress = store.course_progress(&user, &units).await;
            println!(
                "{}% ({}/{} units){}",
                progress.percentage,
                progress.completed_units,
                progress.total_units,
                if progress.is_finished() { " - finished" } else { "" }
            );
        }
        Commands::Users => {
            let users = store.users().await;
            println!("Learners ({})", users.len());
            for user in users {
                println!("  {}", user);
            }
        }
        Commands::Reset { user } => {
            store.reset(&user).await?;
            info!("Reset progress for {}", user);
        }
    }

    Ok(())
}

fn format_record(record: &CompletionRecord) -> String {
    match record.completed_at() {
        Some(at) if record.is_completed() => {
            format!("{} | DONE | {}", record.unit_id(), at.to_rfc3339())
        }
        _ if record.is_completed() => format!("{} | DONE", record.unit_id()),
        _ => format!("{} | TODO", record.unit_id()),
    }
}
