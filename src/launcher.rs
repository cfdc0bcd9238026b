//! Launcher (C5).
//!
//! Forks and execs a job's pipeline, doing the dual parent/child `setpgid`
//! dance and the terminal handoff for a foreground job. `SIGCHLD` is kept
//! blocked from before the first fork until the job is fully registered in
//! the table, closing the race where a child could stop or exit before its
//! `Job` exists to record that against.

use std::ffi::CString;

use log::info;
use nix::errno::Errno;
use nix::unistd::{self, ForkResult, Pid};

use crate::errors::{Error, Result};
use crate::job::{Job, JobState};
use crate::jobs_table::JobsTable;
use crate::reaper;
use crate::signals;
use crate::terminal::{self, TerminalHandoff};

/// Shared, read-mostly facts the launcher (and built-ins) need about the
/// shell itself.
#[derive(Clone, Copy)]
pub struct ShellIdentity {
    pub shell_pgrp: Pid,
    pub tty_fd: std::os::unix::io::RawFd,
    pub interactive: bool,
}

/// Launch `job`'s pipeline, insert it into `table`, and either wait for it
/// (foreground) or print its announcement and return immediately
/// (background).
pub fn launch(table: &mut JobsTable, identity: &ShellIdentity, mut job: Job) -> Result<()> {
    let _chld_guard = signals::block_sigchld();

    job.jid = table.allocate_jid();

    for i in 0..job.commands.len() {
        let argv = job.commands[i].argv.clone();
        let is_first = i == 0;

        match unsafe { unistd::fork() }? {
            ForkResult::Child => {
                child_exec(&job, is_first, identity, &argv);
            }
            ForkResult::Parent { child } => {
                job.commands[i].pid = Some(child);
                let pgrp = if is_first { child } else { job.pgrp };
                job.pgrp = pgrp;
                let _ = unistd::setpgid(child, pgrp);
            }
        }
    }

    println!("[{}] {}", job.jid, job.pgrp);
    info!("launched job {} in pgrp {}", job.jid, job.pgrp);

    let pgrp = job.pgrp;
    let foreground = !job.bg;
    table.insert(job);

    if foreground {
        foreground_wait(table, identity, pgrp)?;
    }

    Ok(())
}

fn child_exec(job: &Job, is_first: bool, identity: &ShellIdentity, argv: &[String]) -> ! {
    let reset = signals::reset_for_child();
    if let Err(e) = reset {
        eprintln!("jcsh: {}", e);
        std::process::exit(1);
    }

    let pid = unistd::getpid();
    let pgrp = if is_first { pid } else { job.pgrp };
    let _ = unistd::setpgid(pid, pgrp);

    if !job.bg && identity.interactive {
        terminal::give_to(identity.tty_fd, pgrp, None);
    }

    let errno = exec(argv);
    let arg0 = argv.first().cloned().unwrap_or_default();
    if errno == Errno::ENOENT {
        eprintln!("{}", Error::command_not_found(arg0));
        std::process::exit(127);
    }
    eprintln!("jcsh: {}: {}", arg0, errno);
    std::process::exit(126);
}

fn exec(argv: &[String]) -> Errno {
    let cstr_argv: Vec<CString> = argv
        .iter()
        .map(|a| CString::new(a.as_str()).unwrap_or_default())
        .collect();
    match unistd::execvp(&cstr_argv[0], &cstr_argv) {
        Ok(_) => unreachable!("execvp only returns on error"),
        Err(e) => e,
    }
}

/// Give the terminal to `pgrp`, block for its completion or stop, then
/// reclaim the terminal and fold the result back into the table. Shared by
/// the launcher's own foreground path and by `fg`, which re-foregrounds an
/// already-running job.
pub fn foreground_wait(table: &mut JobsTable, identity: &ShellIdentity, pgrp: Pid) -> Result<()> {
    let handoff = if identity.interactive {
        let cont_state = table
            .find_by_pgrp_mut(pgrp)
            .filter(|j| !j.saved_tty.is_empty())
            .map(|j| j.saved_tty.clone());
        Some(TerminalHandoff::new(
            identity.tty_fd,
            pgrp,
            identity.shell_pgrp,
            cont_state.as_ref(),
        ))
    } else {
        None
    };

    reaper::wait_for_job(table, pgrp)?;
    drop(handoff);

    if let Some(job) = table.find_by_pgrp_mut(pgrp) {
        if job.is_stopped() {
            job.saved_tty = terminal::save(identity.tty_fd);
            job.state = JobState::Stopped;
        } else if job.is_completed() {
            let jid = job.jid;
            table.remove(jid);
        }
    }

    Ok(())
}
