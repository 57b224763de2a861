use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use subc_drv::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match subc_drv::compile(&cli.source) {
        Ok(asm) => {
            print!("{}", asm);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.diagnostic().render(&cli.source));
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SUBCC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}
