use super::{Command, CommandContext, CommandError};

#[derive(Debug, PartialEq, Eq)]
enum AliasArg {
    Show(String),
    Define(String, String),
}

/// Groups raw arguments into alias operations. A value that opens a quote
/// swallows the following arguments until the quote closes, so
/// `alias ll='ls -l'` defines one alias.
fn parse_args(args: &[String]) -> Vec<AliasArg> {
    let mut parsed = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let Some((name, value)) = arg.split_once('=') else {
            parsed.push(AliasArg::Show(arg.clone()));
            continue;
        };

        let mut value = value.to_string();
        if let Some(quote) = value.chars().next().filter(|c| *c == '\'' || *c == '"') {
            let closed = value.len() > 1 && value.ends_with(quote);
            if !closed {
                for next in iter.by_ref() {
                    value.push(' ');
                    value.push_str(next);
                    if next.ends_with(quote) {
                        break;
                    }
                }
            }
            value = strip_quotes(&value, quote).to_string();
        }
        parsed.push(AliasArg::Define(name.to_string(), value));
    }
    parsed
}

fn strip_quotes(value: &str, quote: char) -> &str {
    let inner = value.strip_prefix(quote).unwrap_or(value);
    inner.strip_suffix(quote).unwrap_or(inner)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AliasCommand;

impl Command for AliasCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        if args.is_empty() {
            for (name, command) in ctx.state.aliases.list() {
                writeln!(ctx.out, "{}='{}'", name, command)?;
            }
            return Ok(0);
        }

        let mut status = 0;
        for arg in parse_args(args) {
            match arg {
                AliasArg::Define(name, value) => {
                    if let Err(e) = ctx.state.aliases.set(&name, &value) {
                        ctx.report(e)?;
                        status = 1;
                    }
                }
                AliasArg::Show(name) => match ctx.state.aliases.get(&name) {
                    Some(command) => writeln!(ctx.out, "{}='{}'", name, command)?,
                    None => {
                        ctx.report(format_args!("{}: not found", name))?;
                        status = 1;
                    }
                },
            }
        }
        Ok(status)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UnaliasCommand;

impl Command for UnaliasCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "usage: unalias NAME...".into(),
            ));
        }

        let mut status = 0;
        for name in args {
            if !ctx.state.aliases.remove(name) {
                ctx.report(format_args!("{}: not found", name))?;
                status = 1;
            }
        }
        Ok(status)
    }
}
