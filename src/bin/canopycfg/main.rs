use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod cmd_get;
mod cmd_init;
mod cmd_reset;
mod cmd_set;
mod cmd_show;
mod cmd_status;
mod util;

fn init_logger() {
    // Level comes from RUST_LOG, default info.
    // Example: RUST_LOG=debug canopycfg ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Init { path, defaults, pretty } => cmd_init::exec(path, defaults, pretty),

        cli::Cmd::Status { path } => cmd_status::exec(path),

        cli::Cmd::Show { path, pretty } => cmd_show::exec(path, pretty),

        cli::Cmd::Get { path, key } => cmd_get::exec(path, key),

        cli::Cmd::Set { path, key, value } => cmd_set::exec(path, key, value),

        cli::Cmd::Reset { path, defaults } => cmd_reset::exec(path, defaults),
    }
}
