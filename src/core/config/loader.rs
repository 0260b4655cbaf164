use std::{fs, io, path::Path};

use super::{ConfigError, ConfigPaths};
use crate::shell::Interpreter;

/// Runs a startup file line by line through the interpreter, exactly as if
/// the lines had been typed.
pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_configs(&self, interpreter: &mut Interpreter) -> Result<(), ConfigError> {
        let Some(path) = &self.paths.rc_path else {
            return Ok(());
        };

        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "sourcing startup file");
                self.source(&content, interpreter);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if self.paths.required {
                    Err(ConfigError::ConfigFileNotFound(path.clone()))
                } else {
                    Ok(())
                }
            }
            Err(e) => Err(ConfigError::IoError(path.clone(), e)),
        }
    }

    fn source(&self, content: &str, interpreter: &mut Interpreter) {
        for line in content.lines() {
            if interpreter.state.exit_request.is_some() {
                break;
            }
            interpreter.eval_line(line);
        }
    }

    pub fn rc_path(&self) -> Option<&Path> {
        self.paths.rc_path.as_deref()
    }
}
