use serde_derive::Deserialize;

use crate::builtins::{self, jid_from_arg, BuiltinCommand};
use crate::errors::{Error, Result};
use crate::shell::Shell;

#[derive(Debug, Deserialize)]
struct Args {
    arg_jid: String,
}

pub struct Kill;

impl BuiltinCommand for Kill {
    const NAME: &'static str = builtins::KILL_NAME;

    const HELP: &'static str = "\
kill: kill <jid>
    Terminate a job.

    Sends SIGKILL to the job's process group and drops it from the jobs
    table immediately; the next sweep reaps the resulting corpses.

Usage: kill <jid>

    Exit Status:
    Returns success unless the job id is unknown.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T]) -> Result<()> {
        let args: Args = builtins::parse_args(Self::HELP, Self::NAME, args.iter().map(AsRef::as_ref))
            .map_err(|_| Error::builtin_command(Self::usage(), 2))?;
        let jid = jid_from_arg(&args.arg_jid)?;
        shell.kill_job(jid)
    }
}
