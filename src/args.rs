use clap::Parser;
use std::path::PathBuf;

/// Interactive and batch SQL shell
#[derive(Parser, Debug, Default)]
#[command(name = "sqlshell")]
#[command(about = "Run SQL statements interactively or from a file", long_about = None)]
pub struct Args {
    /// Database file to open (`:memory:` for a scratch database)
    #[arg(short = 'd', long)]
    pub database: Option<String>,

    /// Execute every statement in FILE, in order, then exit
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum rows shown per result (0 = all)
    #[arg(short = 'l', long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Configuration file (defaults to ./sqlshell.toml or /etc/sqlshell/sqlshell.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Create the database file if it does not exist
    #[arg(long)]
    pub create: bool,
}
