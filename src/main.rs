use clap::Parser;
use log::debug;
use sqlshell::{Args, Repl, Session, ShellConfig, ShellError, SqliteConnection};
use std::io;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("fatal: {err:?}");
            eprintln!("✗ {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ShellError> {
    let config = ShellConfig::load(args)?;
    let settings = config.connection_settings()?;
    let script = args.file.as_deref().map(read_script).transpose()?;

    // Dropping the connection on any early return closes it and rolls back.
    let conn = SqliteConnection::open(&settings)?;
    println!("✓ Connected to {}", settings.database);

    let mut session = Session::new(conn, io::stdout(), config.render_limit());
    match script {
        Some(script) => {
            session.run_batch(&script)?;
        }
        None => {
            session = Repl::new(session, config.history_file())?.run()?;
        }
    }

    session.close()?;
    Ok(())
}

fn read_script(path: &Path) -> Result<String, ShellError> {
    std::fs::read_to_string(path)
        .map_err(|e| ShellError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display()))))
}
