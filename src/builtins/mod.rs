//! Built-in job-control verbs (C6).
//!
//! Only the six verbs the engine itself needs are implemented here —
//! everything else (`cd`, history, variable assignment, ...) belongs to the
//! collaborators this crate doesn't own.

use std::iter;
use std::process::ExitStatus;

use docopt::Docopt;
use serde;

use crate::errors::{Error, ErrorKind, Result};
use crate::shell::Shell;
use crate::util::BshExitStatusExt;

mod bg;
mod fg;
mod jobs;
mod kill;
mod quit;
mod stop;

pub use bg::Bg;
pub use fg::Fg;
pub use jobs::Jobs;
pub use kill::Kill;
pub use quit::Quit;
pub use stop::Stop;

pub const BG_NAME: &str = "bg";
pub const FG_NAME: &str = "fg";
pub const JOBS_NAME: &str = "jobs";
pub const KILL_NAME: &str = "kill";
pub const QUIT_NAME: &str = "quit";
pub const STOP_NAME: &str = "stop";

/// A built-in job-control verb.
pub trait BuiltinCommand {
    const NAME: &'static str;
    const HELP: &'static str;

    fn usage() -> String {
        Self::HELP.lines().next().unwrap().to_owned()
    }

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T]) -> Result<()>;
}

pub fn is_builtin<T: AsRef<str>>(program: T) -> bool {
    [BG_NAME, FG_NAME, JOBS_NAME, KILL_NAME, QUIT_NAME, STOP_NAME].contains(&program.as_ref())
}

/// Precondition: `program` is a builtin, per [`is_builtin`].
pub fn run<S1, S2>(shell: &mut Shell, program: S1, args: &[S2]) -> (ExitStatus, Result<()>)
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    debug_assert!(is_builtin(&program));

    let result = match program.as_ref() {
        BG_NAME => Bg::run(shell, args),
        FG_NAME => Fg::run(shell, args),
        JOBS_NAME => Jobs::run(shell, args),
        KILL_NAME => Kill::run(shell, args),
        QUIT_NAME => Quit::run(shell, args),
        STOP_NAME => Stop::run(shell, args),
        _ => unreachable!(),
    };

    (exit_status_of(&result), result)
}

fn exit_status_of(result: &Result<()>) -> ExitStatus {
    let code = match result {
        Err(e) => match e.kind() {
            ErrorKind::BuiltinCommand(_, code) => *code,
            _ => 1,
        },
        Ok(()) => 0,
    };
    ExitStatus::from_status(code)
}

pub fn parse_args<'a, 'de: 'a, D, S, I>(usage: &str, program: S, args: I) -> Result<D>
where
    D: serde::Deserialize<'de>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Docopt::new(usage)
        .unwrap()
        .argv(iter::once(program).chain(args))
        .deserialize()
        .map_err(Error::from)
}

/// Turn a docopt-captured `<jid>` argument into a `Jid`, stripping a leading
/// `%` if present. Producing the standard "No job with matching ID" wording
/// here rather than erroring the parse itself: an unknown or malformed jid
/// is a lookup-time concern, not a usage error.
fn jid_from_arg(raw: &str) -> Result<crate::job::Jid> {
    raw.trim_start_matches('%')
        .parse::<crate::job::Jid>()
        .map_err(|_| Error::builtin_command("No job with matching ID", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_builtin_recognizes_exactly_the_six_verbs() {
        for name in [BG_NAME, FG_NAME, JOBS_NAME, KILL_NAME, QUIT_NAME, STOP_NAME] {
            assert!(is_builtin(name));
        }
        assert!(!is_builtin("ls"));
        assert!(!is_builtin("cd"));
    }

    #[test]
    fn jid_from_arg_strips_leading_percent() {
        assert_eq!(jid_from_arg("%3").unwrap(), 3);
        assert_eq!(jid_from_arg("3").unwrap(), 3);
    }

    #[test]
    fn jid_from_arg_rejects_garbage() {
        assert!(jid_from_arg("abc").is_err());
    }

    #[derive(Debug, serde_derive::Deserialize)]
    struct TestArgs {
        arg_jid: String,
    }

    const TEST_USAGE: &str = "\
test: test <jid>

Usage: test <jid>
";

    #[test]
    fn parse_args_parses_a_positional_jid() {
        let args: TestArgs = parse_args(TEST_USAGE, "test", ["7"].iter().copied()).unwrap();
        assert_eq!(args.arg_jid, "7");
    }

    #[test]
    fn parse_args_rejects_a_missing_positional() {
        let result: Result<TestArgs> =
            parse_args(TEST_USAGE, "test", std::iter::empty::<&str>());
        assert!(result.is_err());
    }

    #[test]
    fn exit_status_of_maps_builtin_command_code() {
        let err: Result<()> = Err(Error::builtin_command("boom", 7));
        assert_eq!(exit_status_of(&err).code(), Some(7));
        assert_eq!(exit_status_of(&Ok(())).code(), Some(0));
    }
}
