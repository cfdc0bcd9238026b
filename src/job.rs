//! Jobs table data model (C3's types; the table itself lives in
//! [`crate::jobs_table`]).

use std::fmt;
use std::process::ExitStatus;

use nix::unistd::Pid;

use crate::terminal::SavedTermios;

pub type Jid = u32;

/// A single process within a job's pipeline.
#[derive(Debug, Clone)]
pub struct Command {
    pub argv: Vec<String>,
    pub pid: Option<Pid>,
    pub completed: bool,
    pub stopped: bool,
    pub status: Option<ExitStatus>,
}

impl Command {
    pub fn new(argv: Vec<String>) -> Command {
        Command {
            argv,
            pid: None,
            completed: false,
            stopped: false,
            status: None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Foreground,
    Background,
    Stopped,
    NeedsTerminal,
}

impl JobState {
    pub fn status_word(self) -> &'static str {
        match self {
            JobState::Foreground | JobState::Background => "Running",
            JobState::Stopped | JobState::NeedsTerminal => "Stopped",
        }
    }
}

/// A pipeline of [`Command`]s launched and tracked as a unit.
#[derive(Debug, Clone)]
pub struct Job {
    pub jid: Jid,
    pub pgrp: Pid,
    pub commands: Vec<Command>,
    pub state: JobState,
    pub bg: bool,
    pub saved_tty: SavedTermios,
    pub notified: bool,
}

impl Job {
    /// A freshly parsed job, not yet assigned a `jid` or `pgrp`. Both are
    /// filled in by the launcher once it inserts the job into the table.
    pub fn new(commands: Vec<Command>, bg: bool) -> Job {
        Job {
            jid: 0,
            pgrp: Pid::from_raw(0),
            commands,
            state: if bg {
                JobState::Background
            } else {
                JobState::Foreground
            },
            bg,
            saved_tty: SavedTermios::default(),
            notified: false,
        }
    }

    /// The command line as the source prints it: each command's tokens
    /// space-joined with a trailing space, pipeline stages joined by `| `.
    pub fn cmdline(&self) -> String {
        self.commands
            .iter()
            .map(|c| format!("{} ", c))
            .collect::<Vec<_>>()
            .join("| ")
    }

    pub fn is_completed(&self) -> bool {
        self.commands.iter().all(|c| c.completed)
    }

    pub fn is_stopped(&self) -> bool {
        !self.is_completed() && self.commands.iter().all(|c| c.completed || c.stopped)
    }

    /// Mark every command that isn't already finished as no longer stopped.
    /// Used by `fg`/`bg` before sending `SIGCONT`.
    pub fn clear_stopped(&mut self) {
        for c in &mut self.commands {
            if !c.completed {
                c.stopped = false;
            }
        }
    }

    pub fn find_command_mut(&mut self, pid: Pid) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.pid == Some(pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_with(states: &[(bool, bool)]) -> Job {
        let commands = states
            .iter()
            .map(|&(completed, stopped)| {
                let mut c = Command::new(vec!["cmd".to_string()]);
                c.completed = completed;
                c.stopped = stopped;
                c
            })
            .collect();
        Job::new(commands, false)
    }

    #[test]
    fn cmdline_joins_pipeline_stages() {
        let job = Job::new(
            vec![
                Command::new(vec!["cat".to_string(), "foo".to_string()]),
                Command::new(vec!["grep".to_string(), "bar".to_string()]),
            ],
            false,
        );
        assert_eq!(job.cmdline(), "cat foo | grep bar ");
    }

    #[test]
    fn completed_requires_every_command_completed() {
        assert!(job_with(&[(true, false), (true, false)]).is_completed());
        assert!(!job_with(&[(true, false), (false, false)]).is_completed());
    }

    #[test]
    fn stopped_requires_no_running_command() {
        assert!(job_with(&[(false, true), (true, false)]).is_stopped());
        assert!(!job_with(&[(false, true), (false, false)]).is_stopped());
        assert!(!job_with(&[(true, false), (true, false)]).is_stopped());
    }

    #[test]
    fn clear_stopped_leaves_completed_commands_alone() {
        let mut job = job_with(&[(false, true), (true, true)]);
        job.clear_stopped();
        assert!(!job.commands[0].stopped);
        assert!(job.commands[1].stopped, "completed command's stopped flag is untouched");
    }

    #[test]
    fn new_job_state_matches_bg_flag() {
        assert_eq!(
            Job::new(vec![Command::new(vec!["x".to_string()])], true).state,
            JobState::Background
        );
        assert_eq!(
            Job::new(vec![Command::new(vec!["x".to_string()])], false).state,
            JobState::Foreground
        );
    }
}
