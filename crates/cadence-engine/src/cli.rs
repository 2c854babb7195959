//! Script and interactive drivers around a [`CommandExecutor`].

use crate::executor::CommandExecutor;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Clone, Copy)]
pub struct OutputHandlers {
    pub out: fn(&str),
    pub err: fn(&str),
}

pub struct FileOptions {
    pub stop_on_error: bool,
}

pub struct ReplOptions<'a> {
    pub prompt: &'a str,
    pub exit_commands: &'a [&'a str],
}

/// Run every line of a script. Blank lines and lines starting with `#` are
/// skipped; errors are reported with their 1-based line number.
pub async fn run_file(
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    path: &Path,
    options: FileOptions,
) -> Result<(), Box<dyn Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    tracing::info!(path = %path.display(), "running script");

    let script = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    for (number, line) in script {
        match executor.execute_line(line) {
            Ok(result) => (output.out)(&result.output),
            Err(e) => {
                let message = format!("line {}: {}", number, e);
                (output.err)(&format!("Error on {} ('{}')", message, line));
                if options.stop_on_error {
                    return Err(io::Error::other(message).into());
                }
            }
        }
    }
    Ok(())
}

enum Input {
    Command(String),
    Blank,
    Done,
}

fn classify(line: Option<String>, exit_commands: &[&str]) -> Input {
    let Some(line) = line else {
        return Input::Done;
    };
    match line.trim() {
        "" => Input::Blank,
        l if exit_commands.contains(&l) => Input::Done,
        l => Input::Command(l.to_string()),
    }
}

/// Next stdin line, or `Done` on EOF, an exit command or Ctrl-C.
async fn next_input(
    lines: &mut Lines<BufReader<Stdin>>,
    exit_commands: &[&str],
) -> io::Result<Input> {
    tokio::select! {
        line = lines.next_line() => Ok(classify(line?, exit_commands)),
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupted");
            Ok(Input::Done)
        }
    }
}

pub async fn run_repl(
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    options: ReplOptions<'_>,
) -> Result<(), Box<dyn Error>> {
    let codes = executor.session().config().alphabet.codes().join(" ");
    (output.out)(&format!(
        "Symbols: {}. Type 'help' for commands, '{}' to leave.",
        codes,
        options.exit_commands.first().copied().unwrap_or("Ctrl-C")
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{}", options.prompt);
        stdout.flush()?;

        match next_input(&mut lines, options.exit_commands).await? {
            Input::Command(line) => match executor.execute_line(&line) {
                Ok(result) => (output.out)(&result.output),
                Err(e) => (output.err)(&format!("Error: {}", e)),
            },
            Input::Blank => {}
            Input::Done => break,
        }
    }
    tracing::info!(length = executor.session().len(), "session closed");
    Ok(())
}
