use anton::cli::Cli;
use anton::processor::ParseError;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match anton::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ParseError>() {
                Some(diag) => eprintln!(
                    "Err!: {}  ({},{})",
                    diag.message(),
                    diag.line(),
                    diag.column()
                ),
                None => eprintln!("Err!: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
