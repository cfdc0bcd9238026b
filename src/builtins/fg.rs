use serde_derive::Deserialize;

use crate::builtins::{self, jid_from_arg, BuiltinCommand};
use crate::errors::{Error, Result};
use crate::shell::Shell;

#[derive(Debug, Deserialize)]
struct Args {
    arg_jid: String,
}

pub struct Fg;

impl BuiltinCommand for Fg {
    const NAME: &'static str = builtins::FG_NAME;

    const HELP: &'static str = "\
fg: fg <jid>
    Move a job to the foreground.

    Gives the job the controlling terminal and waits for it. A stopped job
    is continued first.

Usage: fg <jid>

    Exit Status:
    Returns success unless the job id is unknown.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T]) -> Result<()> {
        let args: Args = builtins::parse_args(Self::HELP, Self::NAME, args.iter().map(AsRef::as_ref))
            .map_err(|_| Error::builtin_command(Self::usage(), 2))?;
        let jid = jid_from_arg(&args.arg_jid)?;
        shell.foreground(jid)
    }
}
