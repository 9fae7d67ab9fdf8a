//! Bounded child-process execution.
//!
//! External tools are run with stdin closed and both output streams captured
//! on reader threads, so a chatty tool can never fill a pipe and stall. The
//! child is polled until it exits or the timeout elapses; on expiry it is
//! killed and reaped. Draining the streams after exit shares the same
//! deadline: a stream still held open by a detached grandchild is dropped.

use std::{
    io::Read,
    process::{Command, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use log::{debug, warn};

use super::EngineError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Minimum wait for a stream to close after the child exits.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Captured output of a successful run.
#[derive(Debug)]
pub(crate) struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Runs `command` to completion, failing if it exceeds `timeout`.
///
/// # Errors
///
/// - [`EngineError::Spawn`] if the program cannot be started.
/// - [`EngineError::Timeout`] if it is still running after `timeout`.
/// - [`EngineError::Exit`] if it exits unsuccessfully; carries its stderr.
pub(crate) fn run(mut command: Command, timeout: Duration) -> Result<ProcessOutput, EngineError> {
    let program = command.get_program().to_string_lossy().into_owned();
    let args: Vec<String> = command
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    debug!(program, args:?; "Launching external process");

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| EngineError::Spawn {
            program: program.clone(),
            source,
        })?;

    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if started.elapsed() >= timeout => {
                warn!(program, timeout_secs = timeout.as_secs_f64(); "External process timed out, terminating");
                let _ = child.kill();
                let _ = child.wait();
                return Err(EngineError::Timeout { program, timeout });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(EngineError::Io { program, source });
            }
        }
    };

    let deadline = started + timeout;
    let stdout = drain(&program, "stdout", stdout, deadline);
    let stderr = String::from_utf8_lossy(&drain(&program, "stderr", stderr, deadline)).into_owned();
    debug!(
        program,
        status:% = status,
        elapsed_ms = started.elapsed().as_millis() as u64;
        "External process finished"
    );

    if !status.success() {
        return Err(EngineError::Exit {
            program,
            status,
            stderr: stderr.trim_end().to_string(),
        });
    }

    Ok(ProcessOutput { stdout, stderr })
}

fn spawn_reader<R>(mut pipe: R) -> Receiver<Vec<u8>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Waits for a reader until `deadline`, never less than [`DRAIN_GRACE`].
///
/// A stream that is still open by then is abandoned with an empty capture;
/// its reader thread finishes on its own once the last writer goes away.
fn drain(
    program: &str,
    stream: &str,
    reader: Option<Receiver<Vec<u8>>>,
    deadline: Instant,
) -> Vec<u8> {
    let Some(reader) = reader else {
        return Vec::new();
    };
    let wait = deadline
        .saturating_duration_since(Instant::now())
        .max(DRAIN_GRACE);
    match reader.recv_timeout(wait) {
        Ok(buf) => buf,
        Err(RecvTimeoutError::Timeout) => {
            warn!(program, stream; "Output stream still open after exit, discarding it");
            Vec::new()
        }
        Err(RecvTimeoutError::Disconnected) => Vec::new(),
    }
}
