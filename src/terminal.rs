//! Terminal controller (C1).
//!
//! Owns the save/restore/handoff discipline around the controlling terminal.
//! `tcsetpgrp` failing is treated as fatal, per the source: the shell cannot
//! continue once it has lost track of who owns the terminal.

use std::os::unix::io::{BorrowedFd, RawFd};
use std::process;

use log::error;
use nix::sys::termios::{self, Termios};
use nix::unistd::{self, Pid};

use crate::signals;
use crate::util;

/// A captured snapshot of terminal attributes. Empty when the fd is not a
/// terminal (e.g. running noninteractively with stdin redirected).
#[derive(Clone, Debug, Default)]
pub struct SavedTermios(Option<Termios>);

impl SavedTermios {
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Capture the current terminal attributes for `fd`.
///
/// Errors on a non-terminal fd are not propagated: the caller just gets back
/// an empty snapshot.
pub fn save(fd: RawFd) -> SavedTermios {
    let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
    SavedTermios(termios::tcgetattr(borrowed).ok())
}

/// Apply a previously captured snapshot to `fd`. A no-op if `state` is empty.
pub fn restore(fd: RawFd, state: &SavedTermios) {
    if let Some(ref termios) = state.0 {
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
        let result = termios::tcsetattr(borrowed, termios::SetArg::TCSADRAIN, termios);
        log_if_err!(result, "failed to restore terminal configuration");
    }
}

/// Transfer the controlling terminal to `pgrp`, race-free against `SIGTTOU`.
///
/// If `state` is provided, it is applied to the terminal immediately after
/// the handoff, before `SIGTTOU` is unblocked again.
pub fn give_to(fd: RawFd, pgrp: Pid, state: Option<&SavedTermios>) {
    let _guard = signals::block(signals::Signal::SIGTTOU);

    if let Err(e) = unistd::tcsetpgrp(fd, pgrp) {
        fatal(format_args!("tcsetpgrp failed: {}", e));
    }

    if let Some(state) = state {
        restore(fd, state);
    }
}

fn fatal(message: std::fmt::Arguments) {
    error!("{}", message);
    eprintln!("jcsh: fatal: {}", message);
    process::exit(1);
}

/// RAII guard that hands the terminal to a job's process group for the
/// duration of the guard, then hands it back to the shell and restores the
/// shell's own terminal attributes on drop.
///
/// This is the scoped-resource pattern called for in the design notes: every
/// code path that gives the terminal away restores it before the next
/// prompt, without relying on every caller to remember to do so by hand.
pub struct TerminalHandoff {
    fd: RawFd,
    shell_pgrp: Pid,
    shell_state: SavedTermios,
}

impl TerminalHandoff {
    /// Give the terminal to `pgrp`. If `cont_state` is `Some`, it is applied
    /// to the terminal as part of the handoff (used when continuing a
    /// previously stopped job).
    pub fn new(
        fd: RawFd,
        pgrp: Pid,
        shell_pgrp: Pid,
        cont_state: Option<&SavedTermios>,
    ) -> TerminalHandoff {
        let shell_state = save(fd);
        give_to(fd, pgrp, cont_state);
        TerminalHandoff {
            fd,
            shell_pgrp,
            shell_state,
        }
    }
}

impl Drop for TerminalHandoff {
    fn drop(&mut self) {
        give_to(self.fd, self.shell_pgrp, Some(&self.shell_state));
    }
}

pub fn get_fd() -> RawFd {
    util::get_terminal()
}
