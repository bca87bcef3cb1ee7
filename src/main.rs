use clap::Parser;
use clicli::cli::{Cli, LogLevel};
use clicli::commands::{self, Session, TerminalConfirm};
use clicli::error::CommandError;
use clicli::output::{self, OutputFormat};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            output::warning(&format!("cannot open log file {}: {}", log_path.display(), e));
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("clicli {} started with log level: {:?}", clicli::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("clicli").join("clicli.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".clicli").join("clicli.log");
    }
    PathBuf::from("clicli.log")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    let format = cli.output;
    let interactive = std::io::stdout().is_terminal();

    match execute(cli, interactive).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, format);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli, interactive: bool) -> anyhow::Result<()> {
    let mut session = Session::from_cli(&cli, interactive, Box::new(TerminalConfirm))?;
    let format = cli.output;

    let result = commands::run(cli.command, &mut session).await?;

    if let Some(text) = output::render(&result, format)? {
        println!("{}", text);
    }
    Ok(())
}

/// Print a failed command's error. Remote errors also put the service's
/// error body on stdout, where the response would have gone.
fn report(err: &anyhow::Error, format: OutputFormat) {
    tracing::error!("Command failed: {:#}", err);

    match err.downcast_ref::<CommandError>() {
        Some(CommandError::Remote { body, .. }) => {
            if let Ok(text) = output::render_value(body, format) {
                println!("{}", text);
            }
        }
        Some(CommandError::ConfirmationDeclined) => eprintln!("Aborted!"),
        Some(err) => output::error(&err.to_string()),
        None => output::error(&format!("{:#}", err)),
    }
}
