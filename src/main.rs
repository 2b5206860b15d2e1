//! # Monitor - Entry Point
//! src/main.rs
//!
//! Parsea la CLI, inicializa el logger y despacha el subcomando.

use clap::Parser;
use monitor_dashboard::config::{Cli, Command};
use monitor_dashboard::demos;
use monitor_dashboard::error::{Error, Result};
use monitor_dashboard::logging;
use monitor_dashboard::server::Server;
use std::time::Instant;

fn main() {
    let started = Instant::now();
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.quiet) {
        eprintln!("⚠️  {}", e);
    }

    if let Err(e) = run(cli.subcommand(), started) {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, started: Instant) -> Result<()> {
    match command {
        Command::Serve(config) => {
            config.validate().map_err(Error::Config)?;
            log::debug!("{:?}", config);
            if log::log_enabled!(log::Level::Debug) {
                config.print_summary();
            }
            Server::dashboard(&config)?.run()
        }
        Command::Hello(config) => Server::hello(&config).run(),
        Command::Fs => demos::fs::run(),
        Command::Path => {
            demos::path::run();
            Ok(())
        }
        Command::Os => {
            demos::os::run();
            Ok(())
        }
        Command::Uptime => {
            demos::uptime::run(started);
            Ok(())
        }
        Command::Process(args) => demos::process::run(started, &args.args),
        Command::Ls(args) => {
            demos::ls::run(&args);
            Ok(())
        }
        Command::Io => demos::io::run(),
    }
}
