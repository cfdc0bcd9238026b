//! Signal gate (C2).
//!
//! Centralizes the two things the shell needs from signal disposition:
//! counted blocking of a handful of signals around critical sections, and a
//! `SIGCHLD` handler that is safe to run asynchronously because it does
//! nothing but flip a flag.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet};
pub use nix::sys::signal::Signal;

static CHILD_EVENT: AtomicBool = AtomicBool::new(false);

extern "C" fn mark_child_event(_: libc::c_int) {
    CHILD_EVENT.store(true, Ordering::Release);
}

/// Install the shell's signal dispositions: `SIGCHLD` is caught by a handler
/// that only records that *something* changed, `SIGTTOU`/`SIGTTIN`/`SIGTSTP`
/// are ignored so the shell itself is never stopped by the terminal driver,
/// and `SIGINT`/`SIGQUIT` are ignored because they belong to the foreground
/// job, not the shell.
pub fn install() -> crate::errors::Result<()> {
    unsafe {
        let catch_chld = SigAction::new(
            SigHandler::Handler(mark_child_event),
            SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        signal::sigaction(Signal::SIGCHLD, &catch_chld)?;

        let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
        for sig in [
            Signal::SIGINT,
            Signal::SIGQUIT,
            Signal::SIGTSTP,
            Signal::SIGTTIN,
            Signal::SIGTTOU,
        ] {
            signal::sigaction(sig, &ignore)?;
        }
    }
    Ok(())
}

/// Restore default dispositions in a freshly forked child, before `exec`.
/// The child is about to become an arbitrary program and must not inherit
/// the shell's signal setup.
pub fn reset_for_child() -> crate::errors::Result<()> {
    unsafe {
        let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
        for sig in [
            Signal::SIGCHLD,
            Signal::SIGINT,
            Signal::SIGQUIT,
            Signal::SIGTSTP,
            Signal::SIGTTIN,
            Signal::SIGTTOU,
        ] {
            signal::sigaction(sig, &default)?;
        }
    }
    Ok(())
}

/// An RAII guard that blocks a signal for its lifetime and restores the
/// previous mask on drop.
///
/// Blocking is counted rather than toggled: nesting two guards for the same
/// signal blocks it for the lifetime of the outer one, matching how
/// `sigprocmask` itself behaves, and avoiding the classic bug where an inner
/// scope's `unblock` unblocks a signal an outer scope was still relying on.
pub struct BlockGuard {
    previous: SigSet,
}

impl Drop for BlockGuard {
    fn drop(&mut self) {
        let _ = signal::sigprocmask(signal::SigmaskHow::SIG_SETMASK, Some(&self.previous), None);
    }
}

/// Block `sig`, returning a guard that restores the prior mask when dropped.
pub fn block(sig: Signal) -> BlockGuard {
    let mut set = SigSet::empty();
    set.add(sig);
    let mut previous = SigSet::empty();
    let _ = signal::sigprocmask(signal::SigmaskHow::SIG_BLOCK, Some(&set), Some(&mut previous));
    BlockGuard { previous }
}

/// Block `SIGCHLD` specifically, for the duration of a jobs-table mutation
/// that must not race the handler.
pub fn block_sigchld() -> BlockGuard {
    block(Signal::SIGCHLD)
}

fn set_of(sigs: &[Signal]) -> SigSet {
    let mut set = SigSet::empty();
    for &sig in sigs {
        set.add(sig);
    }
    set
}

/// Block every signal in `sigs`, returning a guard that restores the prior
/// mask when dropped.
pub fn block_all(sigs: &[Signal]) -> BlockGuard {
    let set = set_of(sigs);
    let mut previous = SigSet::empty();
    let _ = signal::sigprocmask(signal::SigmaskHow::SIG_BLOCK, Some(&set), Some(&mut previous));
    BlockGuard { previous }
}

/// Unblock every signal in `sigs`, returning a guard that restores the
/// prior mask (i.e. re-blocks them) when dropped. Used around `readline` so
/// a handler can actually run while the shell is waiting on input.
pub fn unblock_all(sigs: &[Signal]) -> BlockGuard {
    let set = set_of(sigs);
    let mut previous = SigSet::empty();
    let _ = signal::sigprocmask(
        signal::SigmaskHow::SIG_UNBLOCK,
        Some(&set),
        Some(&mut previous),
    );
    BlockGuard { previous }
}

/// The REPL's own pair: `SIGCHLD` and `SIGTTOU` bracket every read.
pub const REPL_SIGNALS: [Signal; 2] = [Signal::SIGCHLD, Signal::SIGTTOU];
