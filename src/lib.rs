//! jcsh - an interactive POSIX job-control shell engine.
//!
//! This crate is the core job-control engine: terminal ownership, signal
//! handling, the jobs table, and the built-in verbs that operate on it. The
//! parser, prompt builder, and plugin host are present as minimal
//! collaborators rather than first-class subsystems.

#![deny(trivial_casts, trivial_numeric_casts, unused_import_braces)]

pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::shell::{Shell, ShellConfig};

macro_rules! log_if_err {
    ($result:expr) => {{
        if let Err(e) = $result {
            log::error!("{}", e);
        }
    }};
    ($result:expr, $fmt:expr) => {{
        if let Err(e) = $result {
            log::error!(concat!($fmt, ": {}"), e);
        }
    }};
}

mod builtins;
pub mod editor;
#[allow(missing_docs)]
pub mod errors;
pub mod job;
pub mod jobs_table;
#[allow(unsafe_code)]
mod launcher;
pub mod parser;
pub mod plugin;
pub mod prompt;
#[allow(unsafe_code)]
mod reaper;
#[allow(unsafe_code)]
mod shell;
#[allow(unsafe_code)]
mod signals;
#[allow(unsafe_code)]
mod terminal;
mod util;

pub use crate::util::BshExitStatusExt;
