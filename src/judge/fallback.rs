//! Local fallback executor
//!
//! Runs source code for a single language in a plain child process when the
//! external judge environment is broken. There is no sandbox: the code runs
//! with the server's privileges. This exists for development setups only and
//! must not be the grading path for untrusted submissions.

use std::borrow::Cow;
use std::io::Write;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinError;
use tokio::time::timeout_at;
use tracing::{debug, warn};

use crate::config::FallbackConfig;
use crate::models::Verdict;

use super::JudgeResult;

/// Calls that block on a line of standard input
static INPUT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\binput\s*\(").expect("Failed to compile input call pattern"));

/// In-process stand-in for the judge, restricted to one language
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    interpreter: String,
    language_id: i32,
    timeout: Duration,
}

impl LocalExecutor {
    /// Create an executor running `interpreter <source file>`
    pub fn new(interpreter: impl Into<String>, language_id: i32, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            language_id,
            timeout,
        }
    }

    /// Create an executor from configuration
    pub fn from_config(config: &FallbackConfig) -> Self {
        Self::new(config.interpreter.clone(), config.language_id, config.timeout)
    }

    /// Whether this executor can run the given language
    pub fn supports(&self, language_id: i32) -> bool {
        self.language_id == language_id
    }

    /// Execute `code` with `stdin` piped in
    ///
    /// Always returns a completed result: timeouts become Time Limit Exceeded
    /// and every other fault becomes Runtime Error.
    pub async fn execute(&self, code: &str, stdin: &str) -> JudgeResult {
        let input = synthesize_stdin(code, stdin);

        match self.run(code, &input).await {
            Ok(result) => result,
            Err(e) => {
                warn!(interpreter = %self.interpreter, error = %e, "Local execution failed");
                let mut result = JudgeResult::completed(
                    Verdict::RuntimeError,
                    String::new(),
                    format!("Execution Error: {}", e),
                );
                result.time = Some(0.0);
                result.memory = Some(0);
                result
            }
        }
    }

    async fn run(&self, code: &str, input: &str) -> std::io::Result<JudgeResult> {
        // Removed from disk when dropped, on every return path
        let mut source = tempfile::Builder::new()
            .prefix("codequiz-")
            .suffix(".src")
            .tempfile()?;
        source.write_all(code.as_bytes())?;
        source.flush()?;

        let mut command = Command::new(&self.interpreter);
        command
            .arg(source.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own group, so background jobs started by the program can be killed with it
        #[cfg(unix)]
        command.process_group(0);

        let started = Instant::now();
        let deadline = tokio::time::Instant::now() + self.timeout;
        let mut child = command.spawn()?;
        let pgid = child.id();

        debug!(pid = ?pgid, "Spawned local fallback process");

        // Feed stdin concurrently so a child that never reads cannot stall us;
        // dropping the pipe afterwards signals end of input.
        let stdin_pipe = child.stdin.take();
        let input = input.to_owned();
        let mut writer = tokio::spawn(async move {
            match stdin_pipe {
                Some(mut pipe) => pipe.write_all(input.as_bytes()).await,
                None => Ok(()),
            }
        });
        let mut stdout_reader = tokio::spawn(read_pipe(child.stdout.take()));
        let mut stderr_reader = tokio::spawn(read_pipe(child.stderr.take()));

        let waited = timeout_at(deadline, child.wait()).await;
        let status = match waited {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                kill_process_group(pgid);
                return Err(e);
            }
            Err(_) => {
                kill_process_group(pgid);
                // kill() also waits, so the child is reaped before we return
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "Failed to kill timed-out local process");
                }
                writer.abort();
                stdout_reader.abort();
                stderr_reader.abort();
                return Ok(self.time_limit_exceeded());
            }
        };
        let elapsed = started.elapsed();

        // Pipes stay open while any background job still holds them
        let streams = timeout_at(deadline, async {
            tokio::join!(&mut writer, &mut stdout_reader, &mut stderr_reader)
        })
        .await;
        kill_process_group(pgid);

        let (written, stdout, stderr) = match streams {
            Ok(joined) => joined,
            Err(_) => {
                debug!(pid = ?pgid, "Output still open at the time limit after exit");
                writer.abort();
                stdout_reader.abort();
                stderr_reader.abort();
                return Ok(self.time_limit_exceeded());
            }
        };

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "Local process did not consume all of stdin"),
            Err(e) => warn!(error = %e, "Stdin writer task failed"),
        }
        let stdout = collect_output("stdout", stdout);
        let stderr = collect_output("stderr", stderr);

        let mut result = if status.success() {
            JudgeResult::completed(Verdict::Accepted, stdout, stderr)
        } else {
            let mut result = JudgeResult::completed(Verdict::RuntimeError, stdout, stderr);
            result.description = "Runtime Error (NZEC)".to_string();
            result
        };
        result.time = Some(elapsed.as_secs_f64());

        Ok(result)
    }

    fn time_limit_exceeded(&self) -> JudgeResult {
        let mut result = JudgeResult::completed(
            Verdict::TimeLimitExceeded,
            String::new(),
            Verdict::TimeLimitExceeded.as_str().to_string(),
        );
        result.time = Some(self.timeout.as_secs_f64());
        result.memory = Some(0);
        result
    }
}

/// Guess stdin for programs that read input when none was supplied
///
/// When `stdin` is blank and the source calls `input(` N times, N empty lines
/// are supplied so the program sees blank input instead of end-of-file. This
/// is a best-effort heuristic based on text matching, not on what the program
/// actually reads; non-blank stdin is always passed through untouched.
pub fn synthesize_stdin<'a>(code: &str, stdin: &'a str) -> Cow<'a, str> {
    if !stdin.trim().is_empty() {
        return Cow::Borrowed(stdin);
    }

    match INPUT_CALL.find_iter(code).count() {
        0 => Cow::Borrowed(stdin),
        reads => Cow::Owned("\n".repeat(reads)),
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn collect_output(stream: &'static str, joined: Result<std::io::Result<String>, JoinError>) -> String {
    match joined {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(stream, error = %e, "Failed to read local process output");
            String::new()
        }
        Err(e) => {
            warn!(stream, error = %e, "Output reader task failed");
            String::new()
        }
    }
}

/// SIGKILL everything left in the child's process group
#[cfg(unix)]
fn kill_process_group(pgid: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Some(pgid) = pgid else {
        return;
    };
    match killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        // Nothing left in the group
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!(pgid, error = %e, "Failed to kill local process group"),
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: Option<u32>) {}
