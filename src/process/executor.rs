use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use super::signal::{self, InterruptMonitor};
use super::{ProcessError, STATUS_SPAWN_FAILED};
use crate::core::env::EnvStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl ExitOutcome {
    /// Exit code, or 128 + signal number for a killed child.
    pub fn status(self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => code & 0xff,
            ExitOutcome::Signaled(signal) => 128 + signal,
        }
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => ExitOutcome::Exited(code),
            (None, Some(signal)) => ExitOutcome::Signaled(signal),
            (None, None) => ExitOutcome::Exited(STATUS_SPAWN_FAILED),
        }
    }
}

pub trait ChildHandle {
    fn id(&self) -> u32;
    fn wait(self: Box<Self>) -> Result<ExitOutcome, ProcessError>;
}

/// Creates child processes. The shell only ever talks to this trait so the
/// executor can run without real processes.
pub trait Spawner {
    fn spawn(
        &mut self,
        program: &Path,
        argv: &[String],
        env: &EnvStore,
    ) -> Result<Box<dyn ChildHandle>, ProcessError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(
        &mut self,
        program: &Path,
        argv: &[String],
        env: &EnvStore,
    ) -> Result<Box<dyn ChildHandle>, ProcessError> {
        let name = argv
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| program.to_str().unwrap_or_default());

        let mut command = Command::new(program);
        command
            .arg0(name)
            .args(argv.iter().skip(1))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(env.iter());
        signal::reset_in_child(&mut command);

        let child = command
            .spawn()
            .map_err(|e| ProcessError::from_spawn(name, e))?;
        Ok(Box::new(SystemChild(child)))
    }
}

struct SystemChild(Child);

impl ChildHandle for SystemChild {
    fn id(&self) -> u32 {
        self.0.id()
    }

    fn wait(mut self: Box<Self>) -> Result<ExitOutcome, ProcessError> {
        self.0
            .wait()
            .map(ExitOutcome::from)
            .map_err(ProcessError::Wait)
    }
}

/// Runs `program` in the foreground and blocks until it terminates.
pub fn run_foreground(
    spawner: &mut dyn Spawner,
    interrupts: &mut InterruptMonitor,
    program: &Path,
    argv: &[String],
    env: &EnvStore,
) -> Result<ExitOutcome, ProcessError> {
    interrupts.enter_child();
    let result = spawner.spawn(program, argv, env).and_then(|child| {
        tracing::debug!(pid = child.id(), program = %program.display(), "spawned");
        child.wait()
    });
    interrupts.leave_child();

    if let Ok(outcome) = &result {
        tracing::debug!(?outcome, "child finished");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_outcome_status() {
        assert_eq!(ExitOutcome::Exited(0).status(), 0);
        assert_eq!(ExitOutcome::Exited(3).status(), 3);
        assert_eq!(ExitOutcome::Signaled(libc::SIGINT).status(), 130);
        assert_eq!(ExitOutcome::Signaled(libc::SIGKILL).status(), 137);
    }

    fn sh() -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_system_spawner_exit_code() {
        let mut spawner = SystemSpawner;
        let mut interrupts = InterruptMonitor::new();
        let outcome = run_foreground(
            &mut spawner,
            &mut interrupts,
            &sh(),
            &argv(&["sh", "-c", "exit 7"]),
            &EnvStore::default(),
        )
        .unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(7));
        assert_eq!(interrupts.state(), signal::LoopState::IdleAtPrompt);
    }

    #[test]
    fn test_system_spawner_signal() {
        let mut spawner = SystemSpawner;
        let mut interrupts = InterruptMonitor::new();
        let outcome = run_foreground(
            &mut spawner,
            &mut interrupts,
            &sh(),
            &argv(&["sh", "-c", "kill -9 $$"]),
            &EnvStore::default(),
        )
        .unwrap();
        assert_eq!(outcome.status(), 137);
    }

    #[test]
    fn test_child_gets_default_sigint() {
        // An ignored disposition would be inherited across exec without the reset.
        let previous = unsafe { libc::signal(libc::SIGINT, libc::SIG_IGN) };
        let mut spawner = SystemSpawner;
        let mut interrupts = InterruptMonitor::new();
        let result = run_foreground(
            &mut spawner,
            &mut interrupts,
            &sh(),
            &argv(&["sh", "-c", "kill -INT $$; exit 0"]),
            &EnvStore::default(),
        );
        unsafe { libc::signal(libc::SIGINT, previous) };

        let outcome = result.unwrap();
        assert_eq!(outcome, ExitOutcome::Signaled(libc::SIGINT));
        assert_eq!(outcome.status(), 130);
    }

    #[test]
    fn test_system_spawner_passes_environment_snapshot() {
        let mut spawner = SystemSpawner;
        let mut interrupts = InterruptMonitor::new();
        let env: EnvStore = [("HSH_PROBE", "yes")].into_iter().collect();
        let outcome = run_foreground(
            &mut spawner,
            &mut interrupts,
            &sh(),
            &argv(&["sh", "-c", "test \"$HSH_PROBE\" = yes"]),
            &env,
        )
        .unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(0));
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let mut spawner = SystemSpawner;
        let mut interrupts = InterruptMonitor::new();
        let result = run_foreground(
            &mut spawner,
            &mut interrupts,
            Path::new("/definitely/not/here"),
            &argv(&["here"]),
            &EnvStore::default(),
        );
        assert!(matches!(result, Err(ProcessError::NotFound(_))));
        assert_eq!(interrupts.state(), signal::LoopState::IdleAtPrompt);
    }
}
