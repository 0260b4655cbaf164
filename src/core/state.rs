use super::aliases::AliasStore;
use super::env::EnvStore;

/// Per-session context passed by reference through every pipeline stage.
#[derive(Debug)]
pub struct ShellState {
    pub program_name: String,
    pub current_line: String,
    pub leading_command: String,
    pub command_counter: u64,
    pub tokens: Vec<String>,
    pub environment: EnvStore,
    pub aliases: AliasStore,
    pub last_status: i32,
    pub pid: u32,
    /// Set by `exit`; the driver stops once this is `Some`.
    pub exit_request: Option<i32>,
}

impl ShellState {
    pub fn new(program_name: impl Into<String>, environment: EnvStore) -> Self {
        Self {
            program_name: program_name.into(),
            current_line: String::new(),
            leading_command: String::new(),
            command_counter: 0,
            tokens: Vec::new(),
            environment,
            aliases: AliasStore::new(),
            last_status: 0,
            pid: std::process::id(),
            exit_request: None,
        }
    }

    /// Starts a new top-level line.
    pub fn begin_line(&mut self, line: &str) {
        self.command_counter += 1;
        self.current_line.clear();
        self.current_line.push_str(line);
        self.leading_command.clear();
        self.tokens.clear();
    }

    /// `<program>: <counter>: <command>: <reason>`
    pub fn diagnostic(&self, reason: impl std::fmt::Display) -> String {
        format!(
            "{}: {}: {}: {}",
            self.program_name, self.command_counter, self.leading_command, reason
        )
    }
}
