use hsh::error::ShellError;
use hsh::flags::Flags;
use hsh::process::STATUS_NOT_FOUND;
use hsh::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = env::args();
    let program_name = args.next().unwrap_or_else(|| "hsh".to_string());
    let args: Vec<String> = args.collect();

    let mut flags = Flags::new();
    if let Err(e) = flags.parse(&args) {
        eprintln!("{}: {}", program_name, e);
        return ExitCode::from(2);
    }

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("hsh {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    hsh::logging::init(flags.is_set("debug"));

    match Shell::new(&flags, &program_name).and_then(|mut shell| shell.run()) {
        Ok(code) => ExitCode::from((code & 0xff) as u8),
        Err(ShellError::ScriptOpen(path, _)) => {
            eprintln!("{}: 0: Can't open {}", program_name, path);
            ExitCode::from(STATUS_NOT_FOUND as u8)
        }
        Err(e) => {
            eprintln!("{}: {}", program_name, e);
            ExitCode::from(2)
        }
    }
}
