//! Operator CLI over `signdesk_core`.
//!
//! # Responsibility
//! - Open a database file and run one aggregate or settings operation.
//! - Print results as pretty JSON on stdout and errors as JSON on stderr.

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{json, Value};
use signdesk_core::{
    default_log_level, init_logging, open_db, ContractManagementService, ContractService,
    DocumentService, RepoError, SettingsService, SqliteAggregateRepository,
    SqliteContractRepository, SqliteDocumentRepository, SqliteSettingsRepository,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "signdesk")]
#[command(about = "SignDesk document store operations CLI")]
struct Cli {
    /// SQLite database file; created and migrated when missing.
    #[arg(long, global = true, env = "SIGNDESK_DB", default_value = "signdesk.db")]
    db: PathBuf,
    #[arg(long, global = true, env = "SIGNDESK_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute log directory. File logging stays off when unset.
    #[arg(long, global = true, env = "SIGNDESK_LOG_DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core linkage and version.
    Ping,
    /// Print the populated contract-management state, creating it if absent.
    State,
    /// Replace top-level contract-management fields from a JSON object.
    Update {
        #[arg(long)]
        json: String,
    },
    /// Rebuild the reference lists and print the populated state.
    Sync,
    Documents {
        #[command(subcommand)]
        command: ListCommand,
    },
    Contracts {
        #[command(subcommand)]
        command: ListCommand,
    },
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    List {
        #[arg(long)]
        tenant: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    Get {
        #[arg(long)]
        tenant: String,
    },
    Set {
        #[arg(long)]
        tenant: String,
        #[arg(long)]
        json: String,
    },
}

#[derive(Debug)]
enum CliError {
    Core(RepoError),
    Input(String),
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Core(value)
    }
}

impl CliError {
    fn to_json(&self) -> Value {
        match self {
            Self::Core(err) => json!({ "code": err.code(), "message": err.to_string() }),
            Self::Input(message) => json!({ "code": "INVALID_INPUT", "message": message }),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("{}", json!({ "code": "LOGGING_UNAVAILABLE", "message": err }));
            return ExitCode::from(2);
        }
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={}", err.to_json());
            eprintln!("{}", err.to_json());
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let open = || open_db(&cli.db).map_err(RepoError::from);

    match &cli.command {
        Commands::Ping => Ok(format!(
            "signdesk_core ping={} version={}",
            signdesk_core::ping(),
            signdesk_core::core_version()
        )),
        Commands::State => {
            let conn = open()?;
            render(&management(&conn)?.get_or_init_populated()?)
        }
        Commands::Update { json } => {
            let patch = parse_json(json)?;
            let conn = open()?;
            render(&management(&conn)?.update(&patch)?)
        }
        Commands::Sync => {
            let conn = open()?;
            render(&management(&conn)?.sync_and_populate()?)
        }
        Commands::Documents {
            command: ListCommand::List { tenant },
        } => {
            let conn = open()?;
            let service = DocumentService::new(SqliteDocumentRepository::try_new(&conn)?);
            render(&service.list(tenant)?)
        }
        Commands::Contracts {
            command: ListCommand::List { tenant },
        } => {
            let conn = open()?;
            let service = ContractService::new(SqliteContractRepository::try_new(&conn)?);
            render(&service.list(tenant)?)
        }
        Commands::Settings { command } => {
            let conn = open()?;
            let service = SettingsService::new(SqliteSettingsRepository::try_new(&conn)?);
            match command {
                SettingsCommand::Get { tenant } => render(&service.get(tenant)?),
                SettingsCommand::Set { tenant, json } => {
                    render(&service.update(tenant, &parse_json(json)?)?)
                }
            }
        }
    }
}

type Management<'conn> = ContractManagementService<
    SqliteAggregateRepository<'conn>,
    SqliteDocumentRepository<'conn>,
    SqliteContractRepository<'conn>,
>;

fn management(conn: &Connection) -> Result<Management<'_>, CliError> {
    Ok(ContractManagementService::new(
        SqliteAggregateRepository::try_new(conn)?,
        SqliteDocumentRepository::try_new(conn)?,
        SqliteContractRepository::try_new(conn)?,
    ))
}

fn parse_json(text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text).map_err(|err| CliError::Input(format!("invalid --json: {err}")))
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::Input(format!("cannot render output: {err}")))
}
