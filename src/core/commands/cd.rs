use super::{Command, CommandContext, CommandError};
use crate::path::PathExpander;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        let expander = PathExpander::new(&ctx.state.environment);
        let (target, announce) = match args.first().map(String::as_str) {
            None => (
                expander
                    .home_dir()
                    .map_err(|e| CommandError::InvalidArguments(e.to_string()))?,
                false,
            ),
            Some("-") => match ctx.state.environment.get("OLDPWD") {
                Some(previous) if !previous.is_empty() => (PathBuf::from(previous), true),
                _ => return Err(CommandError::InvalidArguments("OLDPWD not set".into())),
            },
            Some(dir) => (
                expander
                    .expand(dir)
                    .map_err(|e| CommandError::InvalidArguments(e.to_string()))?,
                false,
            ),
        };

        let previous = env::current_dir()
            .ok()
            .map(|dir| dir.to_string_lossy().into_owned())
            .or_else(|| ctx.state.environment.get("PWD").map(String::from));

        env::set_current_dir(&target).map_err(|e| {
            tracing::debug!(target = %target.display(), error = %e, "cd failed");
            CommandError::CantCd(target.to_string_lossy().into_owned())
        })?;

        let current = env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_else(|_| target.to_string_lossy().into_owned());

        let environment = &mut ctx.state.environment;
        if let Some(previous) = previous {
            environment
                .set("OLDPWD", &previous)
                .map_err(|e| CommandError::InvalidArguments(e.to_string()))?;
        }
        environment
            .set("PWD", &current)
            .map_err(|e| CommandError::InvalidArguments(e.to_string()))?;

        if announce {
            writeln!(ctx.out, "{}", current)?;
        }
        Ok(0)
    }
}
