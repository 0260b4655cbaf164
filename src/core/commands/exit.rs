use super::{Command, CommandContext, CommandError};

#[derive(Clone, Copy, Debug, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        let code = match args.first() {
            None => ctx.state.last_status,
            Some(arg) => {
                parse_exit_code(arg).ok_or_else(|| CommandError::IllegalNumber(arg.clone()))?
            }
        };

        ctx.state.exit_request = Some(code);
        Ok(code)
    }
}

/// Unsigned decimal, reduced modulo 256.
fn parse_exit_code(arg: &str) -> Option<i32> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(arg.bytes().fold(0, |acc, b| (acc * 10 + i32::from(b - b'0')) % 256))
}
