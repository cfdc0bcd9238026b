//! Line reader collaborator.
//!
//! The engine needs *a* way to read a line of input; this crate provides a
//! minimal one backed by `rustyline` so the binary is usable at a terminal.
//! Persistent history, completion, and the rest of a full line editor are
//! out of scope here and left to whatever reads this crate's output.

use rustyline::DefaultEditor;

use crate::errors::Result;

pub struct Editor {
    internal: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Editor> {
        Ok(Editor {
            internal: DefaultEditor::new()?,
        })
    }

    pub fn readline(&mut self, prompt: &str) -> Result<String> {
        let line = self.internal.readline(prompt)?;
        let _ = self.internal.add_history_entry(line.as_str());
        Ok(line)
    }
}
