//! Interactive read-eval-print loop.
//!
//! Reads lines with rustyline, feeds them to a [`Session`] and stops on
//! `\q`, Ctrl-C or Ctrl-D. A partially typed statement is dropped on exit,
//! never executed.

use super::session::Session;
use crate::client::{Catalog, Connection};
use crate::core::ShellError;
use crate::executor::Flow;
use crate::parser::meta::help_text;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::path::PathBuf;

pub struct Repl<C, W> {
    session: Session<C, W>,
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
}

impl<C, W> Repl<C, W>
where
    C: Connection + Catalog,
    W: Write,
{
    pub fn new(session: Session<C, W>, history_file: Option<PathBuf>) -> Result<Self, ShellError> {
        let mut editor = DefaultEditor::new()?;

        if let Some(ref path) = history_file {
            let _ = editor.load_history(path); // Ignore error if file doesn't exist
        }

        Ok(Self {
            session,
            editor,
            history_file,
        })
    }

    /// Runs until the user quits and returns the session so the caller can close it.
    pub fn run(mut self) -> Result<Session<C, W>, ShellError> {
        let result = self.read_loop();
        self.save_history();
        result.map(|()| self.session)
    }

    fn read_loop(&mut self) -> Result<(), ShellError> {
        writeln!(self.session.writer(), "{}", help_text())?;

        loop {
            self.session.writer().flush()?;
            match self.editor.readline(self.session.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    if self.session.handle_line(&line)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    debug!("input closed");
                    self.session.discard_input();
                    writeln!(self.session.writer())?;
                    writeln!(self.session.writer(), "Interrupted.")?;
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn save_history(&mut self) {
        if let Some(ref path) = self.history_file {
            let _ = self.editor.save_history(path);
        }
    }
}
