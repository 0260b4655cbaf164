use std::io::Write;

use super::expand::expand_tokens;
use super::tokenize::tokenize;
use super::Interpreter;
use crate::core::commands::{self, CommandContext};
use crate::path::resolve;
use crate::process::executor::{run_foreground, ExitOutcome};

pub(crate) trait SegmentHandler {
    fn run_segment(&mut self, text: &str);
}

impl SegmentHandler for Interpreter {
    /// Tokenize, expand, dispatch. The segment's status lands in
    /// `last_status`; an empty segment leaves it untouched.
    fn run_segment(&mut self, text: &str) {
        self.state.tokens = tokenize(text);
        expand_tokens(&mut self.state);

        let Some(leading) = self.state.tokens.first().cloned() else {
            return;
        };
        self.state.leading_command = leading;

        let status = match commands::lookup(&self.state.leading_command) {
            Some(command) => {
                let args = self.state.tokens.split_off(1);
                let mut ctx = CommandContext {
                    state: &mut self.state,
                    out: &mut *self.out,
                    err: &mut *self.err,
                };
                commands::run_builtin(command, &mut ctx, &args)
            }
            None => self.run_external(),
        };

        self.state.last_status = status;
        self.state.tokens.clear();
    }
}

impl Interpreter {
    fn run_external(&mut self) -> i32 {
        if let Err(e) = self.out.flush() {
            tracing::debug!(error = %e, "flushing stdout before spawn");
        }

        let program = match resolve(&self.state.leading_command, &self.state.environment) {
            Ok(program) => program,
            Err(e) => {
                self.report(&e);
                return e.status();
            }
        };

        let result = run_foreground(
            &mut *self.spawner,
            &mut self.interrupts,
            &program,
            &self.state.tokens,
            &self.state.environment,
        );

        match result {
            Ok(outcome) => {
                if outcome == ExitOutcome::Signaled(libc::SIGINT) && self.interrupts.is_installed() {
                    // the child died at ^C; start the prompt on a fresh line
                    if let Err(e) = writeln!(self.err) {
                        tracing::debug!(error = %e, "writing newline after interrupt");
                    }
                }
                outcome.status()
            }
            Err(e) => {
                self.report(&e);
                e.status()
            }
        }
    }

    pub(crate) fn report(&mut self, reason: impl std::fmt::Display) {
        let message = self.state.diagnostic(reason);
        if let Err(e) = writeln!(self.err, "{}", message) {
            tracing::debug!(error = %e, "could not write diagnostic");
        }
    }
}
