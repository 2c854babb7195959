use anyhow::{Context, Result};
use cadence_engine::cli::{self, FileOptions, OutputHandlers, ReplOptions};
use cadence_engine::config::ConfigLoader;
use cadence_engine::executor::CommandExecutor;
use cadence_engine::formatter::format_json;
use cadence_engine::session::Session;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cadence", version, about = "Sequence pattern recommender")]
struct Args {
    /// Config file (defaults to ./cadence.yaml, then ~/.cadence/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script to execute (non-interactive mode)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(long, short)]
    verbose: bool,

    /// Print the final report as JSON after a script
    #[arg(long, requires = "file")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so script output on stdout stays clean.
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConfigLoader::load_default()
            .await
            .context("loading default config")?,
    };
    tracing::info!(
        alphabet = ?config.alphabet.codes(),
        cycle_length = config.analysis.cycle_length,
        "session started"
    );

    let mut executor = CommandExecutor::new(Session::new(config));
    let output = OutputHandlers {
        out: |msg| println!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };

    if let Some(path) = &args.file {
        let quiet = OutputHandlers {
            out: |_| {},
            err: output.err,
        };
        cli::run_file(
            &mut executor,
            if args.json { quiet } else { output },
            path,
            FileOptions { stop_on_error: true },
        )
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("executing {}", path.display()))?;

        if args.json {
            println!("{}", format_json(&executor.session().report())?);
        }
        return Ok(());
    }

    cli::run_repl(
        &mut executor,
        output,
        ReplOptions {
            prompt: "> ",
            exit_commands: &["exit", "quit"],
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("{}", e))
    .context("interactive session failed")?;

    Ok(())
}
