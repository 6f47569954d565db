//! Process launching for interpreter invocations
//!
//! The launcher is the one seam between the invoker and the operating system.
//! It takes a composed [`CommandLine`], runs it to completion and streams each
//! output line to an [`OutputSink`] on the calling thread as it arrives.

use crossbeam::channel::{self, Sender};
use phpexec_core::{CommandLine, Error, Result};
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

/// Receives process output one line at a time, in arrival order.
///
/// Lines have their trailing newline (and carriage return) removed.
pub trait OutputSink {
    /// A line written to the process's standard output
    fn on_stdout(&mut self, line: &str);

    /// A line written to the process's standard error
    fn on_stderr(&mut self, line: &str);
}

/// Adapts a pair of closures into an [`OutputSink`]
pub struct LineHandlers<O, E> {
    stdout: O,
    stderr: E,
}

impl<O, E> LineHandlers<O, E>
where
    O: FnMut(&str),
    E: FnMut(&str),
{
    pub fn new(stdout: O, stderr: E) -> Self {
        Self { stdout, stderr }
    }
}

impl<O, E> OutputSink for LineHandlers<O, E>
where
    O: FnMut(&str),
    E: FnMut(&str),
{
    fn on_stdout(&mut self, line: &str) {
        (self.stdout)(line)
    }

    fn on_stderr(&mut self, line: &str) {
        (self.stderr)(line)
    }
}

/// Trait for launching external processes
/// This abstraction lets the invoker be exercised without spawning a real
/// interpreter by swapping in a scripted implementation
pub trait ProcessLauncher: Send + Sync {
    /// Run `command` to completion, delivering its output to `sink`.
    /// Returns the process exit code.
    fn launch(&self, command: &CommandLine, sink: &mut dyn OutputSink) -> Result<i32>;
}

/// Production launcher backed by `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

enum StreamLine {
    Stdout(String),
    Stderr(String),
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &CommandLine, sink: &mut dyn OutputSink) -> Result<i32> {
        let mut child = Command::new(&command.program)
            .args(command.args.as_slice())
            .envs(command.env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::launch(command.to_string(), format!("failed to spawn process: {e}"))
            })?;

        let (tx, rx) = channel::unbounded();
        let readers: Vec<JoinHandle<io::Result<()>>> = [
            child
                .stdout
                .take()
                .map(|out| forward_lines(out, tx.clone(), StreamLine::Stdout)),
            child
                .stderr
                .take()
                .map(|err| forward_lines(err, tx.clone(), StreamLine::Stderr)),
        ]
        .into_iter()
        .flatten()
        .collect();
        // Only the reader threads hold senders now, so the loop ends once both streams close
        drop(tx);

        for line in rx {
            match line {
                StreamLine::Stdout(line) => sink.on_stdout(&line),
                StreamLine::Stderr(line) => sink.on_stderr(&line),
            }
        }

        let mut read_error = None;
        for reader in readers {
            let outcome = reader
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("output reader thread panicked")));
            if let Err(e) = outcome {
                read_error.get_or_insert(e);
            }
        }

        let status = child.wait().map_err(|e| {
            Error::launch(command.to_string(), format!("failed to wait for process: {e}"))
        })?;

        if let Some(e) = read_error {
            return Err(Error::launch(
                command.to_string(),
                format!("failed to read process output: {e}"),
            ));
        }

        // Terminated by a signal: there is no exit code, report a generic failure
        Ok(status.code().unwrap_or(1))
    }
}

fn forward_lines<R>(
    reader: R,
    tx: Sender<StreamLine>,
    wrap: fn(String) -> StreamLine,
) -> JoinHandle<io::Result<()>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(reader);
        for chunk in reader.split(b'\n') {
            let mut bytes = chunk?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let line = String::from_utf8_lossy(&bytes).into_owned();
            if tx.send(wrap(line)).is_err() {
                break;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        stdout: Vec<String>,
        stderr: Vec<String>,
    }

    impl OutputSink for Recorder {
        fn on_stdout(&mut self, line: &str) {
            self.stdout.push(line.to_string());
        }

        fn on_stderr(&mut self, line: &str) {
            self.stderr.push(line.to_string());
        }
    }

    #[test]
    fn test_line_handlers_dispatch() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut handlers = LineHandlers::new(
                |line: &str| out.push(line.to_string()),
                |line: &str| err.push(line.to_string()),
            );
            handlers.on_stdout("a");
            handlers.on_stderr("b");
            handlers.on_stdout("c");
        }
        assert_eq!(out, vec!["a", "c"]);
        assert_eq!(err, vec!["b"]);
    }

    #[test]
    fn test_missing_executable_is_launch_error() {
        let command = CommandLine::new("/nonexistent/phpexec-test-binary").arg("-v");
        let mut recorder = Recorder::default();
        let err = SystemLauncher.launch(&command, &mut recorder).unwrap_err();
        match err {
            Error::Launch { command, message } => {
                assert_eq!(command, "/nonexistent/phpexec-test-binary -v");
                assert!(message.starts_with("failed to spawn process"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_streams_and_exit_code() {
        let command = CommandLine::new("sh")
            .arg("-c")
            .arg("printf 'one\\ntwo\\r\\n'; printf 'oops\\n' >&2; printf 'tail'; exit 3");
        let mut recorder = Recorder::default();
        let code = SystemLauncher.launch(&command, &mut recorder).unwrap();
        assert_eq!(code, 3);
        assert_eq!(recorder.stdout, vec!["one", "two", "tail"]);
        assert_eq!(recorder.stderr, vec!["oops"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_passes_extra_environment() {
        let env = [("PHPEXEC_TEST_VALUE", "42")].into_iter().collect();
        let command = CommandLine::new("sh")
            .arg("-c")
            .arg("echo $PHPEXEC_TEST_VALUE")
            .env(env);
        let mut recorder = Recorder::default();
        assert_eq!(SystemLauncher.launch(&command, &mut recorder).unwrap(), 0);
        assert_eq!(recorder.stdout, vec!["42"]);
    }
}
