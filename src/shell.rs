//! REPL driver (C7) and the `Shell` struct that ties the rest of the
//! engine together.

use std::path::PathBuf;

use log::{info, warn};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::builtins;
use crate::editor::Editor;
use crate::errors::{Error, ErrorKind, Result};
use crate::job::{Job, JobState};
use crate::jobs_table::JobsTable;
use crate::launcher::{self, ShellIdentity};
use crate::parser;
use crate::plugin::PluginHost;
use crate::prompt;
use crate::reaper::{self, NotifyEvent};
use crate::signals;
use crate::terminal;

/// Policy knobs for a `Shell`, set once at startup from the CLI.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub interactive: bool,
    pub plugin_dir: Option<PathBuf>,
}

impl ShellConfig {
    pub fn new() -> ShellConfig {
        ShellConfig {
            interactive: crate::util::isatty(),
            plugin_dir: None,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> ShellConfig {
        ShellConfig::new()
    }
}

pub struct Shell {
    editor: Editor,
    jobs_table: JobsTable,
    identity: ShellIdentity,
    plugins: PluginHost,
    last_exit_status: i32,
    running: bool,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Result<Shell> {
        let tty_fd = terminal::get_fd();
        let identity = if config.interactive {
            initialize_job_control(tty_fd)?
        } else {
            ShellIdentity {
                shell_pgrp: Pid::this(),
                tty_fd,
                interactive: false,
            }
        };

        signals::install()?;

        Ok(Shell {
            editor: Editor::new()?,
            jobs_table: JobsTable::new(),
            identity,
            plugins: PluginHost::new(config.plugin_dir),
            last_exit_status: 0,
            running: true,
        })
    }

    pub fn jobs_table(&self) -> &JobsTable {
        &self.jobs_table
    }

    pub fn jobs_table_mut(&mut self) -> &mut JobsTable {
        &mut self.jobs_table
    }

    pub fn request_exit(&mut self) {
        self.running = false;
    }

    /// `fg <jid>`: foreground the job, continuing it first if it was
    /// stopped.
    pub fn foreground(&mut self, jid: crate::job::Jid) -> Result<()> {
        if !self.identity.interactive {
            return Err(Error::no_job_control());
        }
        let _guard = signals::block_sigchld();
        let job = self
            .jobs_table
            .find_by_jid_mut(jid)
            .ok_or_else(|| Error::no_such_job(jid.to_string()))?;

        match job.state {
            JobState::Foreground => return Ok(()),
            JobState::Stopped | JobState::NeedsTerminal => {
                job.clear_stopped();
                let pgrp = job.pgrp;
                let _ = signal::killpg(pgrp, Signal::SIGCONT);
            }
            JobState::Background => {}
        }
        job.state = JobState::Foreground;
        job.bg = false;
        let pgrp = job.pgrp;
        drop(_guard);

        launcher::foreground_wait(&mut self.jobs_table, &self.identity, pgrp)
    }

    /// `bg <jid>`: continue a stopped job in the background.
    pub fn background(&mut self, jid: crate::job::Jid) -> Result<()> {
        if !self.identity.interactive {
            return Err(Error::no_job_control());
        }
        let _guard = signals::block_sigchld();
        let job = self
            .jobs_table
            .find_by_jid_mut(jid)
            .ok_or_else(|| Error::no_such_job(jid.to_string()))?;

        job.clear_stopped();
        job.state = JobState::Background;
        job.bg = true;
        let pgrp = job.pgrp;
        signal::killpg(pgrp, Signal::SIGCONT)?;
        Ok(())
    }

    /// `stop <jid>`: suspend a running job.
    pub fn stop_job(&mut self, jid: crate::job::Jid) -> Result<()> {
        let _guard = signals::block_sigchld();
        let job = self
            .jobs_table
            .find_by_jid_mut(jid)
            .ok_or_else(|| Error::no_such_job(jid.to_string()))?;

        job.saved_tty = terminal::save(self.identity.tty_fd);
        let pgrp = job.pgrp;
        job.state = JobState::Stopped;
        signal::killpg(pgrp, Signal::SIGTSTP)?;
        Ok(())
    }

    /// `kill <jid>`: terminate a job and drop it from the table immediately.
    pub fn kill_job(&mut self, jid: crate::job::Jid) -> Result<()> {
        let _guard = signals::block_sigchld();
        let pgrp = self
            .jobs_table
            .find_by_jid(jid)
            .map(|j| j.pgrp)
            .ok_or_else(|| Error::no_such_job(jid.to_string()))?;

        signal::killpg(pgrp, Signal::SIGKILL)?;
        self.jobs_table.remove(jid);
        Ok(())
    }

    /// One REPL iteration, per the eight-step order: reclaim the terminal,
    /// sweep and notify, renumber if idle, unblock signals for the read,
    /// read and parse a line, then dispatch. Returns `false` on EOF or
    /// after `quit`.
    fn step(&mut self) -> Result<bool> {
        if self.identity.interactive {
            terminal::give_to(self.identity.tty_fd, self.identity.shell_pgrp, None);
        }

        let events = reaper::sweep(&mut self.jobs_table)?;
        for event in events {
            match event {
                NotifyEvent::Stopped(jid, cmdline) => {
                    println!("[{}] Stopped{}", jid, cmdline);
                }
                NotifyEvent::Done(jid, cmdline) => {
                    println!("[{}]  DONE{}{}", jid, " ".repeat(10), cmdline);
                }
            }
        }
        self.jobs_table.reset_jid_if_empty();

        let line = {
            let _unblocked = signals::unblock_all(&signals::REPL_SIGNALS);
            let prompt = prompt::build_prompt(self.last_exit_status, &self.plugins);
            match self.editor.readline(&prompt) {
                Ok(line) => line,
                Err(e) if is_eof(&e) => return Ok(false),
                Err(e) => {
                    warn!("readline: {}", e);
                    return Ok(true);
                }
            }
        };

        let _guard = signals::block_all(&signals::REPL_SIGNALS);

        let command_line = match parser::parse_command_line(&line) {
            Ok(cl) => cl,
            Err(e) => {
                warn!("{}", e);
                eprintln!("jcsh: {}", e);
                return Ok(true);
            }
        };

        for job in command_line.pipes {
            self.dispatch(job)?;
            if !self.running {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn dispatch(&mut self, parsed: parser::ParsedJob) -> Result<()> {
        let program = match parsed.commands.first() {
            Some(cmd) => cmd.argv[0].clone(),
            None => return Ok(()),
        };

        if builtins::is_builtin(&program) {
            let rest: Vec<String> = parsed.commands[0].argv[1..].to_vec();
            let (status, result) = builtins::run(self, &program, &rest);
            self.last_exit_status = std::process::ExitStatus::code(&status).unwrap_or(1);
            if let Err(e) = result {
                report_builtin_error(&e);
            }
            return Ok(());
        }

        let job = Job::new(parsed.commands, parsed.bg);
        launcher::launch(&mut self.jobs_table, &self.identity, job)
    }

    /// Run the REPL until EOF or `quit`.
    pub fn run(&mut self) {
        info!("starting interactive session, pgrp={}", self.identity.shell_pgrp);
        while self.running {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    eprintln!("jcsh: {}", e);
                }
            }
        }
    }
}

/// Unknown-jid is not an error condition from the REPL's point of view: the
/// source prints its bare message to stdout, unprefixed, and moves on. Every
/// other builtin failure goes to stderr with the usual `jcsh:` prefix.
fn report_builtin_error(e: &Error) {
    match e.kind() {
        ErrorKind::NoSuchJob(_) => println!("{}", e),
        _ => eprintln!("jcsh: {}", e),
    }
}

fn is_eof(e: &Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ReadlineError(rustyline::error::ReadlineError::Eof)
    )
}

/// Put the shell into its own process group and claim the controlling
/// terminal. Loops on `SIGTTIN` until the shell is in the foreground, the
/// way a job-control shell launched from another job-control shell must.
fn initialize_job_control(tty_fd: std::os::unix::io::RawFd) -> Result<ShellIdentity> {
    loop {
        let shell_pgrp = nix::unistd::getpgrp();
        if nix::unistd::tcgetpgrp(tty_fd)? == shell_pgrp {
            break;
        }
        let _ = signal::killpg(shell_pgrp, Signal::SIGTTIN);
    }

    let shell_pgrp = Pid::this();
    nix::unistd::setpgid(shell_pgrp, shell_pgrp)?;
    terminal::give_to(tty_fd, shell_pgrp, None);

    Ok(ShellIdentity {
        shell_pgrp,
        tty_fd,
        interactive: true,
    })
}
