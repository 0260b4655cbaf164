use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGINT;

use super::ProcessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    IdleAtPrompt,
    RunningChild,
}

/// Tracks interrupts for the read-eval loop.
///
/// The SIGINT handler only raises a flag. The loop polls it before each read;
/// interrupts that arrive while a child runs belong to the child and are
/// discarded when control comes back.
#[derive(Debug)]
pub struct InterruptMonitor {
    pending: Arc<AtomicBool>,
    state: LoopState,
    installed: bool,
}

impl Default for InterruptMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptMonitor {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
            state: LoopState::IdleAtPrompt,
            installed: false,
        }
    }

    /// Registers the SIGINT flag. Only interactive sessions do this, so a
    /// script still dies on Ctrl-C.
    pub fn install(&mut self) -> Result<(), ProcessError> {
        if self.installed {
            return Ok(());
        }
        signal_hook::flag::register(SIGINT, Arc::clone(&self.pending))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
        self.installed = true;
        Ok(())
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn enter_child(&mut self) {
        self.state = LoopState::RunningChild;
    }

    pub fn leave_child(&mut self) {
        self.pending.store(false, Ordering::SeqCst);
        self.state = LoopState::IdleAtPrompt;
    }

    /// Takes a pending interrupt, if any. While a child runs the interrupt
    /// belongs to the child, so nothing is taken.
    pub fn poll(&mut self) -> bool {
        match self.state {
            LoopState::IdleAtPrompt => self.pending.swap(false, Ordering::SeqCst),
            LoopState::RunningChild => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn raise(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }
}

/// Restores the default SIGINT disposition in the child before exec.
pub fn reset_in_child(command: &mut Command) {
    unsafe {
        command.pre_exec(|| {
            if libc::signal(libc::SIGINT, libc::SIG_DFL) == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_takes_pending_interrupt() {
        let mut monitor = InterruptMonitor::new();
        assert!(!monitor.poll());
        monitor.raise();
        assert!(monitor.poll());
        assert!(!monitor.poll());
    }

    #[test]
    fn test_interrupt_during_child_is_discarded() {
        let mut monitor = InterruptMonitor::new();
        monitor.enter_child();
        assert_eq!(monitor.state(), LoopState::RunningChild);
        monitor.raise();
        assert!(!monitor.poll());
        monitor.leave_child();
        assert_eq!(monitor.state(), LoopState::IdleAtPrompt);
        assert!(!monitor.poll());
    }
}
