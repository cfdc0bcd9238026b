//! Command-line parser collaborator.
//!
//! A small hand-written lexer and pipeline builder. It is deliberately
//! shallow: quoting and whitespace splitting are handled, pipe (`|`) and
//! background (`&`) syntax are recognized and turned into the shape the
//! jobs table expects, but only a single command per pipeline is actually
//! wired to real pipes by the launcher — multi-command pipelines parse but
//! are not yet connected end to end.

use crate::errors::{Error, Result};
use crate::job::Command;

/// One parsed pipeline, not yet inserted into the jobs table.
#[derive(Debug, Clone)]
pub struct ParsedJob {
    pub commands: Vec<Command>,
    pub bg: bool,
}

/// The result of parsing one line of input: zero or more pipelines
/// separated by `;`. An empty `pipes` list means the user hit enter on a
/// blank line.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    pub pipes: Vec<ParsedJob>,
}

/// Parse a line of input into a [`CommandLine`].
///
/// Returns a [`Error::syntax`] error for malformed input (an empty segment
/// between pipes, a trailing `|`, or an unterminated quote).
pub fn parse_command_line(text: &str) -> Result<CommandLine> {
    let mut pipes = Vec::new();

    for segment in text.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        pipes.push(parse_job(segment)?);
    }

    Ok(CommandLine { pipes })
}

fn parse_job(segment: &str) -> Result<ParsedJob> {
    let mut segment = segment.trim();
    let bg = if let Some(rest) = segment.strip_suffix('&') {
        segment = rest.trim_end();
        true
    } else {
        false
    };

    if segment.is_empty() {
        return Err(Error::syntax(segment));
    }

    let mut commands = Vec::new();
    for stage in segment.split('|') {
        let stage = stage.trim();
        if stage.is_empty() {
            return Err(Error::syntax(segment));
        }
        commands.push(Command::new(tokenize(stage)?));
    }

    Ok(ParsedJob { commands, bg })
}

/// Split a single command's text on whitespace, honoring single and double
/// quotes as a unit (no escapes, no variable expansion — both out of
/// scope).
fn tokenize(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(Error::syntax(text));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_parses_to_no_pipes() {
        let parsed = parse_command_line("").unwrap();
        assert!(parsed.pipes.is_empty());
    }

    #[test]
    fn simple_command() {
        let parsed = parse_command_line("ls -la").unwrap();
        assert_eq!(parsed.pipes.len(), 1);
        assert_eq!(parsed.pipes[0].commands.len(), 1);
        assert_eq!(
            parsed.pipes[0].commands[0].argv,
            vec!["ls".to_string(), "-la".to_string()]
        );
        assert!(!parsed.pipes[0].bg);
    }

    #[test]
    fn background_flag() {
        let parsed = parse_command_line("sleep 10 &").unwrap();
        assert!(parsed.pipes[0].bg);
        assert_eq!(parsed.pipes[0].commands[0].argv[0], "sleep");
    }

    #[test]
    fn pipeline_splits_into_multiple_commands() {
        let parsed = parse_command_line("cat foo | grep bar").unwrap();
        assert_eq!(parsed.pipes[0].commands.len(), 2);
        assert_eq!(parsed.pipes[0].commands[1].argv[0], "grep");
    }

    #[test]
    fn quoted_argument_keeps_spaces() {
        let parsed = parse_command_line("echo 'hello world'").unwrap();
        assert_eq!(parsed.pipes[0].commands[0].argv[1], "hello world");
    }

    #[test]
    fn trailing_pipe_is_a_syntax_error() {
        assert!(parse_command_line("ls |").is_err());
    }

    #[test]
    fn unterminated_quote_is_a_syntax_error() {
        assert!(parse_command_line("echo 'unterminated").is_err());
    }
}
