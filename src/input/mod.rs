use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Where command lines come from: a line editor on a terminal, or any other
/// byte stream (pipe, redirected file, script).
pub enum InputSource {
    Terminal(DefaultEditor),
    Stream(Box<dyn BufRead>),
}

impl InputSource {
    pub fn stdin() -> Result<Self, ShellError> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            Ok(InputSource::Terminal(DefaultEditor::new()?))
        } else {
            Ok(InputSource::Stream(Box::new(stdin.lock())))
        }
    }

    pub fn open_script(path: &str) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|e| ShellError::ScriptOpen(path.to_string(), e))?;
        Ok(InputSource::Stream(Box::new(BufReader::new(file))))
    }

    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        InputSource::Stream(Box::new(reader))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, InputSource::Terminal(_))
    }

    /// Reads one line without its terminator. `prompt` is only shown on a
    /// terminal.
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self {
            InputSource::Terminal(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(ReadOutcome::Line(line)),
                Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
                Err(e) => Err(e.into()),
            },
            InputSource::Stream(reader) => {
                let mut buf = Vec::new();
                if reader.read_until(b'\n', &mut buf)? == 0 {
                    return Ok(ReadOutcome::Eof);
                }
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                Ok(ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned()))
            }
        }
    }
}
