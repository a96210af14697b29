use std::path::PathBuf;

use clap::Parser;
use wacc::error::ExitCodes;

/// Command-line front-end for the WACC parser and semantic analyzer.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the `.wacc` source file to analyze.
    pub file: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, default_value_t = 100)]
    pub syntax_exit_code: i32,

    #[arg(long, default_value_t = 200)]
    pub semantic_exit_code: i32,

    #[arg(long, default_value_t = 200)]
    pub type_exit_code: i32,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn exit_codes(&self) -> ExitCodes {
        ExitCodes {
            syntax: self.syntax_exit_code,
            semantic: self.semantic_exit_code,
            type_error: self.type_exit_code,
        }
    }
}
