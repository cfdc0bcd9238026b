use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process;

use docopt::Docopt;
use jcsh::errors::Error;
use jcsh::{Shell, ShellConfig};
use serde_derive::Deserialize;

const LOG_FILE_NAME: &str = ".jcsh_log";

const USAGE: &str = "
jcsh.

Usage:
    jcsh [-p <dir>]
    jcsh (-h | --help)

Options:
    -h --help       Show this screen.
    -p <dir>        Load plugins from <dir>.
";

#[derive(Debug, Deserialize)]
struct Args {
    flag_p: Option<String>,
}

fn main() {
    init_logger();

    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    log::debug!("{:?}", args);

    let config = ShellConfig {
        plugin_dir: args.flag_p.map(PathBuf::from),
        ..ShellConfig::new()
    };

    let mut shell = Shell::new(config).unwrap_or_else(|e| display_error_and_exit(&e));
    shell.run();
}

fn init_logger() {
    let log_path = dirs::home_dir().map(|mut p| {
        p.push(LOG_FILE_NAME);
        p
    });

    let logger = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Info);

    let logger = match log_path.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    }) {
        Some(file) => logger.chain(file),
        None => logger.chain(fern::Output::call(|_| {})),
    };

    let _ = logger.apply();
}

fn display_error_and_exit(error: &Error) -> ! {
    log::error!("failed to create shell: {}", error);
    eprintln!("jcsh: {}", error);
    process::exit(1);
}
