mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use simple_logger::SimpleLogger;

use cli::Cli;
use wacc::error::exit_code_for;

fn main() -> ExitCode {
    let args = Cli::parse();

    SimpleLogger::new()
        .with_level(args.log_level())
        .init()
        .expect("logger should only be initialized once");

    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            error!("could not read '{}': {e}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    info!("analyzing '{}'", args.file.display());

    match wacc::compile(&source) {
        Ok(program) => {
            info!(
                "'{}' is well-formed ({} definition(s), {} located statement(s))",
                args.file.display(),
                program.definitions.len(),
                program.locations.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            let code = exit_code_for(&e, &args.exit_codes());
            ExitCode::from(code as u8)
        }
    }
}
