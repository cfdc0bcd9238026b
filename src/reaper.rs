//! Reaper (C4).
//!
//! Reconciles the jobs table with kernel-reported child state. The
//! `SIGCHLD` handler itself ([`crate::signals`]) does no reconciliation: it
//! only flips an atomic flag. All the actual bookkeeping — finding the
//! `Command` a pid belongs to, updating `completed`/`stopped`/`status`, and
//! rolling those up into a `Job`'s state — happens here, in [`sweep`],
//! called unconditionally on every turn of the REPL and again whenever the
//! flag is observed set.

use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::errors::Result;
use crate::job::JobState;
use crate::jobs_table::JobsTable;

/// One non-blocking reap: drains every child state change currently
/// available without blocking, folding each into the table. Returns the
/// jids that became `Stopped` or completed during this pass, in that order
/// of discovery, for the caller to notify about.
pub fn sweep(table: &mut JobsTable) -> Result<Vec<NotifyEvent>> {
    let mut events = Vec::new();

    loop {
        let flags = WaitPidFlag::WUNTRACED | WaitPidFlag::WNOHANG;
        match wait::waitpid(Pid::from_raw(-1), Some(flags)) {
            Ok(WaitStatus::StillAlive) | Err(nix::Error::ECHILD) => break,
            Ok(status) => apply(table, status),
            Err(_) => break,
        }
    }

    for job in table.iter_mut() {
        if job.is_completed() {
            events.push(NotifyEvent::Done(job.jid, job.cmdline()));
        } else if job.is_stopped() && !job.notified {
            job.notified = true;
            job.state = JobState::Stopped;
            events.push(NotifyEvent::Stopped(job.jid, job.cmdline()));
        }
    }

    for event in &events {
        if let NotifyEvent::Done(jid, _) = event {
            table.remove(*jid);
        }
    }

    Ok(events)
}

fn apply(table: &mut JobsTable, status: WaitStatus) {
    let pid = match status.pid() {
        Some(pid) => pid,
        None => return,
    };

    let job = {
        let mut found = None;
        for j in table.iter_mut() {
            if j.find_command_mut(pid).is_some() {
                found = Some(j);
                break;
            }
        }
        match found {
            Some(job) => job,
            None => return,
        }
    };
    let command = job.find_command_mut(pid).expect("looked up by pid above");

    match status {
        WaitStatus::Exited(_, code) => {
            command.status = Some(std::os::unix::process::ExitStatusExt::from_raw(code << 8));
            command.completed = true;
        }
        WaitStatus::Signaled(_, signal, _) => {
            command.status = Some(std::os::unix::process::ExitStatusExt::from_raw(
                signal as i32,
            ));
            command.completed = true;
        }
        WaitStatus::Stopped(_, _) => {
            command.stopped = true;
        }
        WaitStatus::Continued(_) => {
            command.stopped = false;
        }
        _ => {}
    }
}

/// A job-table transition the REPL should print a notice for.
pub enum NotifyEvent {
    Stopped(crate::job::Jid, String),
    Done(crate::job::Jid, String),
}

/// Blocking wait for every process in `pgrp` to either stop or complete.
/// Used by the launcher and by `fg` while the job holds the terminal.
pub fn wait_for_job(table: &mut JobsTable, pgrp: Pid) -> Result<()> {
    loop {
        let done = table
            .iter()
            .find(|j| j.pgrp == pgrp)
            .map(|j| j.is_completed() || j.is_stopped())
            .unwrap_or(true);
        if done {
            return Ok(());
        }

        let flags = WaitPidFlag::WUNTRACED;
        match wait::waitpid(Pid::from_raw(-1), Some(flags)) {
            Ok(status) => apply(table, status),
            Err(nix::Error::ECHILD) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}
