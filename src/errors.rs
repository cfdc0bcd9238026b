//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

use error_chain::error_chain;

error_chain! {
    foreign_links {
        Docopt(::docopt::Error);
        Io(::std::io::Error);
        Nix(::nix::Error);
        ReadlineError(::rustyline::error::ReadlineError);
    }

    errors {
        /// Generic syntax error containing offending line
        Syntax(line: String) {
            description("syntax error")
            display("syntax error: '{}'", line)
        }
        BuiltinCommand(message: String, code: i32) {
            description(message)
        }
        CommandNotFound(command: String) {
            display("{}: command not found", command)
        }
        NoSuchJob(job: String) {
            display("No job with matching ID")
        }
        NoJobControl {
            display("job control is not enabled")
        }
    }
}

impl Error {
    pub fn syntax<S: Into<String>>(line: S) -> Self {
        ErrorKind::Syntax(line.into()).into()
    }

    pub fn builtin_command<S: Into<String>>(message: S, code: i32) -> Self {
        ErrorKind::BuiltinCommand(message.into(), code).into()
    }

    pub fn command_not_found<S: Into<String>>(command: S) -> Self {
        ErrorKind::CommandNotFound(command.into()).into()
    }

    pub fn no_such_job<S: Into<String>>(job: S) -> Self {
        ErrorKind::NoSuchJob(job.into()).into()
    }

    pub fn no_job_control() -> Self {
        ErrorKind::NoJobControl.into()
    }
}
