//! addressdb CLI
//!
//! Runs one action against a database file and prints the result.

use std::path::PathBuf;
use std::process::ExitCode;

use addressdb::{Action, Outcome, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// addressdb CLI
#[derive(Parser, Debug)]
#[command(name = "addressdb")]
#[command(about = "Fixed-record flat-file address database")]
#[command(version)]
struct Args {
    /// Database file
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new database, overwriting the file
    Create {
        /// Bytes per name/email field, terminator included
        field_width: u32,

        /// Number of rows to preallocate
        row_count: u32,
    },

    /// Print one row
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Fill an empty row
    Set {
        #[arg(allow_negative_numbers = true)]
        id: i64,

        name: String,

        email: String,
    },

    /// Clear a row
    #[command(alias = "del")]
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Print every row that is set
    List,
}

impl From<Commands> for Action {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Create {
                field_width,
                row_count,
            } => Action::Create {
                field_width,
                row_count,
            },
            Commands::Get { id } => Action::Get { id },
            Commands::Set { id, name, email } => Action::Set { id, name, email },
            Commands::Delete { id } => Action::Delete { id },
            Commands::List => Action::List,
        }
    }
}

fn run(args: Args) -> addressdb::Result<()> {
    let action = Action::from(args.command);
    tracing::debug!(?action, file = %args.file.display(), "running action");

    let mut store = Store::open(&args.file, action.open_mode())?;
    let outcome = store.execute(action)?;
    store.close()?;

    match outcome {
        Outcome::Done => {}
        Outcome::Record(record) => println!("{}", record),
        Outcome::Records(records) => {
            for record in records {
                println!("{}", record);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "action failed");
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
