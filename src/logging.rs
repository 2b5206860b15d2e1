//! # Logging
//! src/logging.rs
//!
//! Inicializa `simplelog` sobre la fachada `log`. Los banners de consola y la
//! salida de los demos siguen usando `println!`; aquí solo van los eventos
//! operativos (requests, fallos de sondas, errores del access log).

use crate::error::Result;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Traduce `-v`/`-q` a un nivel de log
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Instala el logger de terminal (stderr)
pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let mut config = ConfigBuilder::new();
    config.set_target_level(LevelFilter::Debug);
    config.set_thread_level(LevelFilter::Debug);
    let _ = config.set_time_offset_to_local();

    TermLogger::init(
        level_for(verbose, quiet),
        config.build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}
