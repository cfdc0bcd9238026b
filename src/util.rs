//! Small free-standing helpers shared across the job-control engine.

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Extensions for building [`ExitStatus`] values from plain status codes.
///
/// The standard library does not expose a public constructor for
/// `ExitStatus`, but the job-control engine needs to synthesize one for
/// builtins and for processes that died from a signal.
pub trait BshExitStatusExt {
    /// Create an ExitStatus to indicate *successful* program execution.
    fn from_success() -> Self;

    /// Create an ExitStatus to indicate *unsuccessful* program execution.
    fn from_failure() -> Self;

    /// Create an ExitStatus from a raw status code.
    fn from_status(code: i32) -> Self;
}

impl BshExitStatusExt for ExitStatus {
    fn from_success() -> Self {
        ExitStatus::from_status(0)
    }

    fn from_failure() -> Self {
        ExitStatus::from_status(1)
    }

    fn from_status(code: i32) -> Self {
        ExitStatus::from_raw(code << 8)
    }
}

/// The file descriptor the shell treats as its controlling terminal.
pub fn get_terminal() -> RawFd {
    io::stdin().as_raw_fd()
}

/// Whether the shell's controlling input is a real terminal.
pub fn isatty() -> bool {
    atty::is(atty::Stream::Stdin)
}
