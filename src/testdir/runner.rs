use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

use super::check_output::CheckOutput;
use super::command_line::CommandLine;
use super::error::{Result, TestDirectoryError};
use super::run_options::RunOptions;
use super::run_result::RunResult;
use super::run_result_error::RunResultError;
use super::runtime;

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut command = Command::new("cmd");
    command.arg("/C").raw_arg(line);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

fn direct_command(command_line: CommandLine) -> Result<Command> {
    match command_line {
        CommandLine::Line(program) if program.is_empty() => {
            Err(TestDirectoryError::EmptyCommand)
        }
        CommandLine::Line(program) => Ok(Command::new(program)),
        CommandLine::Args(args) => {
            let (program, args) = args.split_first().ok_or(TestDirectoryError::EmptyCommand)?;
            let mut command = Command::new(program);
            command.args(args);
            Ok(command)
        }
    }
}

#[cfg(unix)]
fn exit_code(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: &ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Runs one command to completion, blocking the calling thread.
///
/// The child gets a closed stdin. Streams set to [`Capture::Pipe`] are fully
/// buffered in memory, so this is meant for commands with bounded output.
///
/// [`Capture::Pipe`]: super::run_options::Capture::Pipe
pub(crate) fn run_command(
    command_line: CommandLine,
    options: RunOptions,
    default_cwd: &Path,
) -> Result<RunResult> {
    let RunOptions {
        shell,
        env,
        extra_env,
        cwd,
        stdout,
        stderr,
        configure,
    } = options;

    let cwd = cwd.unwrap_or_else(|| default_cwd.to_path_buf());
    let command_text = command_line.joined();

    let mut command = if shell {
        shell_command(&command_text)
    } else {
        direct_command(command_line)?
    };

    // The environment is copied per call, never cached.
    let env = env.unwrap_or_else(|| std::env::vars_os().collect());
    command
        .env_clear()
        .envs(env)
        .envs(extra_env)
        .current_dir(&cwd)
        .stdin(Stdio::null())
        .stdout(stdout.stdio())
        .stderr(stderr.stdio());

    if let Some(configure) = configure {
        configure(&mut command);
    }

    tracing::debug!(command = %command_text, cwd = %cwd.display(), "Run");

    let start_time = Instant::now();
    let output = runtime::block_on(async {
        let child = tokio::process::Command::from(command).spawn()?;
        child.wait_with_output().await
    })??;
    let elapsed = start_time.elapsed().as_secs_f64();

    let exit_code = exit_code(&output.status);
    tracing::debug!(
        command = %command_text,
        exit_code,
        elapsed,
        "Finished"
    );

    let result = RunResult::new(
        command_text,
        cwd,
        stdout
            .is_captured()
            .then(|| CheckOutput::from_bytes(&output.stdout)),
        stderr
            .is_captured()
            .then(|| CheckOutput::from_bytes(&output.stderr)),
        exit_code,
        elapsed,
    );

    if exit_code != 0 {
        return Err(RunResultError::new(result).into());
    }

    Ok(result)
}
