use super::{Command, CommandContext, CommandError};

#[derive(Clone, Copy, Debug, Default)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArguments("usage: env".into()));
        }
        for (key, value) in ctx.state.environment.iter() {
            writeln!(ctx.out, "{}={}", key, value)?;
        }
        Ok(0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SetenvCommand;

impl Command for SetenvCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        let [name, value] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: setenv NAME VALUE".into(),
            ));
        };

        ctx.state
            .environment
            .set(name, value)
            .map_err(|e| CommandError::InvalidArguments(e.to_string()))?;
        Ok(0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UnsetenvCommand;

impl Command for UnsetenvCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "usage: unsetenv NAME...".into(),
            ));
        }
        for name in args {
            if !ctx.state.environment.remove(name) {
                tracing::debug!(name = %name, "unsetenv: variable was not set");
            }
        }
        Ok(0)
    }
}
