use clap::{Parser, error::ErrorKind};
use std::process::ExitCode;
use united_colors::{ARGS_MESSAGE, cli::Args};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            println!("{ARGS_MESSAGE}");
            print!("{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    united_colors::init_logger(args.verbose);
    log::debug!("start...");

    match united_colors::run(&args) {
        Ok(path) => {
            println!("Modified image saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            println!("{}", united_colors::user_message(&e));
            ExitCode::FAILURE
        }
    }
}
