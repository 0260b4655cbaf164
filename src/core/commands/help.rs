use super::{Command, CommandContext, CommandError};

const GENERAL: &str = "\
hsh: a small command interpreter

Commands may be joined with `&&` (run if the previous one succeeded),
`||` (run if it failed) and `;` (always run). `$?`, `$$` and `$NAME`
are expanded before a command runs.

Builtins:
  exit [n]              leave the shell
  cd [dir|-]            change the working directory
  env                   print the environment
  setenv NAME VALUE     set an environment variable
  unsetenv NAME...      remove environment variables
  alias [name[=value]]  define or print aliases
  unalias NAME...       remove aliases
  help [builtin]        show this text or help for one builtin
";

fn topic(name: &str) -> Option<&'static str> {
    let text = match name {
        "exit" => {
            "exit [n]\n\tExit the shell with status n, or with the status of the last command.\n"
        }
        "cd" => {
            "cd [dir|-]\n\tChange the working directory to dir, to HOME without an argument,\n\
             \tor to the previous directory with `-`.\n"
        }
        "env" => "env\n\tPrint every environment variable as NAME=VALUE.\n",
        "setenv" => "setenv NAME VALUE\n\tCreate or overwrite an environment variable.\n",
        "unsetenv" => "unsetenv NAME...\n\tRemove environment variables.\n",
        "alias" => {
            "alias [name[=value] ...]\n\tWithout arguments, list aliases. With name, print \
             that alias.\n\tWith name=value, define it.\n"
        }
        "unalias" => "unalias NAME...\n\tRemove aliases.\n",
        "help" => "help [builtin]\n\tShow general help or help for one builtin.\n",
        _ => return None,
    };
    Some(text)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<i32, CommandError> {
        let Some(name) = args.first() else {
            ctx.out.write_all(GENERAL.as_bytes())?;
            return Ok(0);
        };

        let text = topic(name).ok_or_else(|| {
            CommandError::NotFound(format!("no help topics match '{}'", name))
        })?;
        ctx.out.write_all(text.as_bytes())?;
        Ok(0)
    }
}
