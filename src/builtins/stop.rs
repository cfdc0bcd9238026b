use serde_derive::Deserialize;

use crate::builtins::{self, jid_from_arg, BuiltinCommand};
use crate::errors::{Error, Result};
use crate::shell::Shell;

#[derive(Debug, Deserialize)]
struct Args {
    arg_jid: String,
}

pub struct Stop;

impl BuiltinCommand for Stop {
    const NAME: &'static str = builtins::STOP_NAME;

    const HELP: &'static str = "\
stop: stop <jid>
    Suspend a running job.

    Snapshots the terminal state and sends SIGTSTP to the job's process
    group.

Usage: stop <jid>

    Exit Status:
    Returns success unless the job id is unknown.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T]) -> Result<()> {
        let args: Args = builtins::parse_args(Self::HELP, Self::NAME, args.iter().map(AsRef::as_ref))
            .map_err(|_| Error::builtin_command(Self::usage(), 2))?;
        let jid = jid_from_arg(&args.arg_jid)?;
        shell.stop_job(jid)
    }
}
