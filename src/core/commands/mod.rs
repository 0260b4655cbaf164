use std::io::Write;

mod alias;
mod cd;
mod env;
mod exit;
mod help;

pub use alias::{AliasCommand, UnaliasCommand};
pub use cd::CdCommand;
pub use env::{EnvCommand, SetenvCommand, UnsetenvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;

use crate::core::state::ShellState;

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    IllegalNumber(String),
    CantCd(String),
    NotFound(String),
    IoError(std::io::Error),
}

impl CommandError {
    /// Status the failed builtin leaves in `$?`.
    pub fn status(&self) -> i32 {
        match self {
            CommandError::InvalidArguments(_)
            | CommandError::IllegalNumber(_)
            | CommandError::CantCd(_) => 2,
            CommandError::NotFound(_) | CommandError::IoError(_) => 1,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::IllegalNumber(arg) => write!(f, "Illegal number: {}", arg),
            CommandError::CantCd(dir) => write!(f, "can't cd to {}", dir),
            CommandError::NotFound(msg) => write!(f, "{}", msg),
            CommandError::IoError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// What a builtin gets to work with: the session and the two output streams.
pub struct CommandContext<'a> {
    pub state: &'a mut ShellState,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl CommandContext<'_> {
    /// Writes a diagnostic for the running builtin without failing it.
    pub fn report(&mut self, reason: impl std::fmt::Display) -> Result<(), CommandError> {
        writeln!(self.err, "{}", self.state.diagnostic(reason))?;
        Ok(())
    }
}

pub trait Command {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError>;
}

#[derive(Clone, Copy, Debug)]
pub enum CommandType {
    Exit(ExitCommand),
    Cd(CdCommand),
    Env(EnvCommand),
    Setenv(SetenvCommand),
    Unsetenv(UnsetenvCommand),
    Help(HelpCommand),
    Alias(AliasCommand),
    Unalias(UnaliasCommand),
}

impl Command for CommandType {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(ctx, args),
            CommandType::Cd(cmd) => cmd.execute(ctx, args),
            CommandType::Env(cmd) => cmd.execute(ctx, args),
            CommandType::Setenv(cmd) => cmd.execute(ctx, args),
            CommandType::Unsetenv(cmd) => cmd.execute(ctx, args),
            CommandType::Help(cmd) => cmd.execute(ctx, args),
            CommandType::Alias(cmd) => cmd.execute(ctx, args),
            CommandType::Unalias(cmd) => cmd.execute(ctx, args),
        }
    }
}

/// Builtin names in lookup order.
pub const BUILTINS: [(&str, CommandType); 8] = [
    ("exit", CommandType::Exit(ExitCommand)),
    ("cd", CommandType::Cd(CdCommand)),
    ("env", CommandType::Env(EnvCommand)),
    ("setenv", CommandType::Setenv(SetenvCommand)),
    ("unsetenv", CommandType::Unsetenv(UnsetenvCommand)),
    ("help", CommandType::Help(HelpCommand)),
    ("alias", CommandType::Alias(AliasCommand)),
    ("unalias", CommandType::Unalias(UnaliasCommand)),
];

pub fn lookup(name: &str) -> Option<CommandType> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, command)| *command)
}

pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

/// Runs a builtin and folds its result into a status, printing the
/// diagnostic for a failure.
pub fn run_builtin(
    command: CommandType,
    ctx: &mut CommandContext<'_>,
    args: &[String],
) -> i32 {
    match command.execute(ctx, args) {
        Ok(status) => status,
        Err(e) => {
            let status = e.status();
            if let Err(write_err) = ctx.report(&e) {
                tracing::debug!(%write_err, "could not write diagnostic");
            }
            status
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::env::EnvStore;

    pub struct Harness {
        pub state: ShellState,
        pub out: Vec<u8>,
        pub err: Vec<u8>,
    }

    impl Harness {
        pub fn new(env: &[(&str, &str)]) -> Self {
            let env: EnvStore = env.iter().copied().collect();
            let mut state = ShellState::new("hsh", env);
            state.begin_line("");
            Self {
                state,
                out: Vec::new(),
                err: Vec::new(),
            }
        }

        pub fn run(&mut self, name: &str, args: &[&str]) -> i32 {
            let command = lookup(name).expect("builtin");
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            self.state.leading_command = name.to_string();
            self.out.clear();
            self.err.clear();
            let mut ctx = CommandContext {
                state: &mut self.state,
                out: &mut self.out,
                err: &mut self.err,
            };
            run_builtin(command, &mut ctx, &args)
        }

        pub fn stdout(&self) -> String {
            String::from_utf8_lossy(&self.out).into_owned()
        }

        pub fn stderr(&self) -> String {
            String::from_utf8_lossy(&self.err).into_owned()
        }
    }
}
