use serde_derive::Deserialize;

use crate::builtins::{self, jid_from_arg, BuiltinCommand};
use crate::errors::{Error, Result};
use crate::shell::Shell;

#[derive(Debug, Deserialize)]
struct Args {
    arg_jid: String,
}

pub struct Bg;

impl BuiltinCommand for Bg {
    const NAME: &'static str = builtins::BG_NAME;

    const HELP: &'static str = "\
bg: bg <jid>
    Resume a stopped job in the background.

    Sends SIGCONT to the job's process group and clears its stopped state,
    without giving it the controlling terminal.

Usage: bg <jid>

    Exit Status:
    Returns success unless the job id is unknown.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T]) -> Result<()> {
        let args: Args = builtins::parse_args(Self::HELP, Self::NAME, args.iter().map(AsRef::as_ref))
            .map_err(|_| Error::builtin_command(Self::usage(), 2))?;
        let jid = jid_from_arg(&args.arg_jid)?;
        shell.background(jid)
    }
}
