use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::shell::Shell;

pub struct Jobs;

impl BuiltinCommand for Jobs {
    const NAME: &'static str = builtins::JOBS_NAME;

    const HELP: &'static str = "\
jobs: jobs
    Display the status of jobs in the current session.

    Lists each job's number, status, and command line.

    Exit Status:
    Always succeeds.";

    fn run<T: AsRef<str>>(shell: &mut Shell, _args: &[T]) -> Result<()> {
        for job in shell.jobs_table().iter() {
            println!(
                "[{}] {}{}({})",
                job.jid,
                job.state.status_word(),
                " ".repeat(5),
                job.cmdline()
            );
        }
        Ok(())
    }
}
