use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::shell::Shell;

pub struct Quit;

impl BuiltinCommand for Quit {
    const NAME: &'static str = builtins::QUIT_NAME;

    const HELP: &'static str = "\
quit: quit
    Exit the shell.

    Exit Status:
    Never returns.";

    fn run<T: AsRef<str>>(shell: &mut Shell, _args: &[T]) -> Result<()> {
        shell.request_exit();
        Ok(())
    }
}
