use std::io::{self, Write};

mod executor;
pub mod expand;
pub mod pipeline;
pub mod tokenize;

use crate::{
    core::{
        config::{ConfigLoader, ConfigPaths},
        env::EnvStore,
        state::ShellState,
    },
    error::ShellError,
    flags::Flags,
    highlight::Prompt,
    input::{InputSource, ReadOutcome},
    process::{signal::InterruptMonitor, Spawner, SystemSpawner},
};

use executor::SegmentHandler;
use pipeline::split_logical;

/// Evaluates command lines against one session state. It knows nothing about
/// where the lines come from.
pub struct Interpreter {
    pub state: ShellState,
    pub(crate) spawner: Box<dyn Spawner>,
    pub(crate) interrupts: InterruptMonitor,
    pub(crate) out: Box<dyn Write>,
    pub(crate) err: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(state: ShellState, spawner: Box<dyn Spawner>) -> Self {
        Self {
            state,
            spawner,
            interrupts: InterruptMonitor::new(),
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    pub fn with_output(mut self, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptMonitor {
        &mut self.interrupts
    }

    /// Runs one top-level line: every `;`, `&&` and `||` segment in order,
    /// honouring short-circuit and stopping once `exit` has been requested.
    pub fn eval_line(&mut self, line: &str) {
        self.state.begin_line(line);

        for segment in split_logical(line) {
            if self.state.exit_request.is_some() {
                break;
            }
            if segment.is_blank() {
                continue;
            }
            if !segment.connector.should_run(self.state.last_status) {
                tracing::debug!(
                    segment = %segment.text.trim(),
                    status = self.state.last_status,
                    "skipped by short-circuit"
                );
                continue;
            }
            self.run_segment(&segment.text);
        }

        if let Err(e) = self.out.flush() {
            tracing::debug!(error = %e, "flushing stdout after line");
        }
    }
}

pub struct Shell {
    interpreter: Interpreter,
    input: InputSource,
    prompt: Prompt,
}

impl Shell {
    pub fn new(flags: &Flags, program_name: &str) -> Result<Self, ShellError> {
        let input = match flags.script() {
            Some(path) => InputSource::open_script(path)?,
            None => InputSource::stdin()?,
        };
        let interactive = input.is_interactive();

        let state = ShellState::new(program_name, EnvStore::inherit());
        let mut interpreter = Interpreter::new(state, Box::new(SystemSpawner));
        if interactive {
            interpreter.interrupts_mut().install()?;
        }

        let paths = ConfigPaths::new(flags.get_value("rc").map(String::as_str), interactive);
        if let Err(e) = ConfigLoader::new(&paths).load_configs(&mut interpreter) {
            eprintln!("{}: {}", program_name, e);
        }

        tracing::debug!(interactive, pid = interpreter.state.pid, "shell ready");
        Ok(Self::from_parts(interpreter, input))
    }

    pub fn from_parts(interpreter: Interpreter, input: InputSource) -> Self {
        let prompt = if input.is_interactive() {
            Prompt::new()
        } else {
            Prompt::plain()
        };
        Self {
            interpreter,
            input,
            prompt,
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Read-eval loop. Returns the status the process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        let interactive = self.input.is_interactive();

        loop {
            if let Some(code) = self.interpreter.state.exit_request {
                return Ok(code);
            }

            // only an installed handler raises the flag
            if self.interpreter.interrupts.poll() {
                writeln!(self.interpreter.err)?;
            }

            match self.input.read_line(self.prompt.text())? {
                ReadOutcome::Line(line) => self.interpreter.eval_line(&line),
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => {
                    if interactive {
                        writeln!(self.interpreter.out)?;
                    }
                    return Ok(self.interpreter.state.last_status);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{fixture_bin, interpreter};
    use super::*;
    use std::io::Cursor;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_and_skips_after_failure() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("false && echo no");
        assert_eq!(rec.argv(), vec![argv(&["false"])]);
        assert_eq!(interp.state.last_status, 1);
    }

    #[test]
    fn test_or_skips_after_success() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("true || echo no");
        assert_eq!(rec.argv(), vec![argv(&["true"])]);
        assert_eq!(interp.state.last_status, 0);

        interp.eval_line("false || true");
        assert_eq!(interp.state.last_status, 0);
    }

    #[test]
    fn test_sequence_runs_everything() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("false ; echo a ; false && echo b || echo c");
        assert_eq!(
            rec.argv(),
            vec![
                argv(&["false"]),
                argv(&["echo", "a"]),
                argv(&["false"]),
                argv(&["echo", "c"]),
            ]
        );
    }

    #[test]
    fn test_last_status_expansion() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("false");
        interp.eval_line("echo $?");
        assert_eq!(rec.argv()[1], argv(&["echo", "1"]));
    }

    #[test]
    fn test_alias_expands_leading_word() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("alias ll='ls -l'");
        assert_eq!(interp.state.last_status, 0);
        interp.eval_line("ll extra");
        assert_eq!(rec.argv(), vec![argv(&["ls", "-l", "extra"])]);
    }

    #[test]
    fn test_not_found_diagnostic() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("ls");
        interp.eval_line("zzzznotacommand arg");
        assert_eq!(interp.state.last_status, 127);
        assert_eq!(rec.err.contents(), "hsh: 2: zzzznotacommand: not found\n");
    }

    #[test]
    fn test_setenv_visible_to_expansion() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("setenv FOO bar");
        interp.eval_line("echo $FOO $UNSET_THING");
        assert_eq!(rec.argv(), vec![argv(&["echo", "bar"])]);
    }

    #[test]
    fn test_blank_and_skipped_segments_keep_status() {
        let (mut interp, _rec) = interpreter(&[]);
        interp.eval_line("false");
        interp.eval_line("   ");
        assert_eq!(interp.state.last_status, 1);
        interp.eval_line("# just a comment");
        assert_eq!(interp.state.last_status, 1);
        interp.eval_line("false ; ; ");
        assert_eq!(interp.state.last_status, 1);
    }

    #[test]
    fn test_exit_stops_line() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("exit 3; echo no");
        assert_eq!(interp.state.exit_request, Some(3));
        assert!(rec.argv().is_empty());
    }

    #[test]
    fn test_counter_once_per_line() {
        let (mut interp, _rec) = interpreter(&[]);
        interp.eval_line("true; true; true");
        interp.eval_line("true");
        assert_eq!(interp.state.command_counter, 2);
    }

    #[test]
    fn test_permission_denied() {
        let (mut interp, rec) = interpreter(&[]);
        let path = fixture_bin().join("noexec");
        interp.eval_line(path.to_str().unwrap());
        assert_eq!(interp.state.last_status, 126);
        assert!(rec.err.contents().ends_with(": Permission denied\n"));
        assert!(rec.argv().is_empty());
    }

    #[test]
    fn test_killed_child_status() {
        let (mut interp, _rec) = interpreter(&[]);
        interp.eval_line("killed");
        assert_eq!(interp.state.last_status, 137);
    }

    #[test]
    fn test_child_interrupt_ends_line() {
        let (mut interp, rec) = interpreter(&[]);
        interp.interrupts_mut().install().unwrap();
        interp.eval_line("interrupted");
        assert_eq!(interp.state.last_status, 130);
        assert_eq!(rec.err.contents(), "\n");
    }

    #[test]
    fn test_spawn_failure_status() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("boom");
        assert_eq!(interp.state.last_status, 125);
        assert!(rec.err.contents().starts_with("hsh: 1: boom: cannot spawn"));
    }

    #[test]
    fn test_builtin_output_goes_to_writer() {
        let (mut interp, rec) = interpreter(&[]);
        interp.eval_line("setenv A 1 && env");
        assert!(rec.out.contents().contains("A=1\n"));
    }

    #[test]
    fn test_run_returns_last_status_at_eof() {
        let (interp, _rec) = interpreter(&[]);
        let input = InputSource::from_reader(Cursor::new("true\nfalse\n"));
        let mut shell = Shell::from_parts(interp, input);
        assert_eq!(shell.run().unwrap(), 1);
    }

    #[test]
    fn test_interrupt_at_prompt_starts_new_line() {
        let (mut interp, rec) = interpreter(&[]);
        interp.interrupts_mut().raise();
        let input = InputSource::from_reader(Cursor::new("true\n"));
        let mut shell = Shell::from_parts(interp, input);
        assert_eq!(shell.run().unwrap(), 0);
        assert_eq!(rec.err.contents(), "\n");
        assert_eq!(rec.argv(), vec![argv(&["true"])]);
    }

    #[test]
    fn test_run_stops_at_exit() {
        let (interp, rec) = interpreter(&[]);
        let input = InputSource::from_reader(Cursor::new("exit 4\necho after\n"));
        let mut shell = Shell::from_parts(interp, input);
        assert_eq!(shell.run().unwrap(), 4);
        assert!(rec.argv().is_empty());
        assert_eq!(shell.interpreter().state.command_counter, 1);
    }
}
