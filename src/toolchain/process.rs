//! Toolchain subprocess execution.

use crate::error::{ProbeError, Result};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

/// How often a child with a deadline is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of executing a toolchain command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a command killed at its deadline.
    pub fn timeout(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            timed_out: true,
            ..Self::failure(None, stdout, stderr, duration)
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Kill the command after this long (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Render a program and its arguments for logs and errors.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.contains(' ') {
                format!("'{}'", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a program directly, capturing its output.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);
    debug!("Executing: {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let failed = |message: String| ProbeError::CommandFailed {
        command: command_line.clone(),
        message,
    };

    let mut child = cmd.spawn().map_err(|e| failed(e.to_string()))?;

    let stdout_handle = capture(child.stdout.take());
    let stderr_handle = capture(child.stderr.take());

    let waited = match options.timeout {
        Some(limit) => wait_with_deadline(&mut child, start + limit),
        None => child.wait().map(Some),
    };
    if waited.is_err() {
        reap(&mut child);
    }

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();
    let status = waited.map_err(|e| failed(e.to_string()))?;

    if !stderr.is_empty() {
        trace!("{} stderr:\n{}", program, stderr);
    }

    match status {
        None => {
            warn!("Timed out after {:?}: {}", duration, command_line);
            Ok(CommandResult::timeout(stdout, stderr, duration))
        }
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
    }
}

/// Drain a child pipe on its own thread so a chatty compiler cannot block.
fn capture<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut output = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut output);
        }
        String::from_utf8_lossy(&output).into_owned()
    })
}

/// Kill and wait on a child that could not be waited on normally, so its
/// pipes close and the capture threads can finish.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Kill failed: {}", e);
    }
    let _ = child.wait();
}

/// Wait for the child until `deadline`, killing it if it overruns.
///
/// Returns `Ok(None)` when the child was killed.
fn wait_with_deadline(
    child: &mut Child,
    deadline: Instant,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn display_command_quotes_spaces() {
        let args = vec!["-c".to_string(), "my file.c".to_string()];
        assert_eq!(display_command("cc", &args), "cc -c 'my file.c'");
    }

    #[test]
    fn spawn_failure_is_command_failed() {
        let err = execute(
            "/nonexistent/probeconf-compiler",
            &[],
            &CommandOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProbeError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn execute_successful_command() {
        let result = execute("sh", &sh("echo hello"), &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_reports_exit_code() {
        let result = execute("sh", &sh("echo oops >&2; exit 3"), &CommandOptions::default())
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let result = execute("sh", &sh("touch marker"), &options).unwrap();
        assert!(result.success);
        assert!(temp.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn reap_kills_running_child() {
        let mut child = Command::new("sh")
            .args(sh("exec sleep 30"))
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();
        let stdout = capture(child.stdout.take());

        reap(&mut child);

        assert!(child.try_wait().unwrap().is_some());
        assert_eq!(stdout.join().unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn execute_kills_on_timeout() {
        let options = CommandOptions {
            timeout: Some(Duration::from_millis(100)),
            ..Default::default()
        };

        let result = execute("sleep", &["5".to_string()], &options).unwrap();
        assert!(result.timed_out);
        assert!(!result.success);
        assert!(result.duration < Duration::from_secs(5));
    }
}
