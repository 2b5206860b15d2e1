//! # Estado compartido entre handlers
//! src/server/state.rs
//!
//! Solo contiene configuración y dependencias inyectables: los datos del
//! sistema se recalculan en cada request, no se guardan aquí.

use crate::access_log::AccessLog;
use crate::probes::{CommandRunner, Platform, SystemRunner};
use directories::BaseDirs;
use std::path::PathBuf;
use std::time::Instant;

pub struct AppState {
    /// `None` en el sitio de ejemplo, que no registra accesos
    pub access_log: Option<AccessLog>,
    pub runner: Box<dyn CommandRunner>,
    pub platform: Platform,
    pub started: Instant,
    /// Directorio que muestra la tarjeta de archivos
    pub listing_dir: PathBuf,
    pub home_dir: Option<PathBuf>,
    pub space_scan: bool,
}

impl AppState {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self {
            access_log: None,
            runner,
            platform: Platform::current(),
            started: Instant::now(),
            listing_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            home_dir: BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
            space_scan: true,
        }
    }

    /// Estado con el runner real del sistema
    pub fn system() -> Self {
        Self::new(Box::new(SystemRunner::new()))
    }

    pub fn with_access_log(mut self, log: AccessLog) -> Self {
        self.access_log = Some(log);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_listing_dir(mut self, dir: PathBuf) -> Self {
        self.listing_dir = dir;
        self
    }

    pub fn with_home_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.home_dir = dir;
        self
    }

    pub fn with_space_scan(mut self, enabled: bool) -> Self {
        self.space_scan = enabled;
        self
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Últimas líneas del access log (vacío si no hay log)
    pub fn recent_logs(&self, limit: usize) -> Vec<String> {
        self.access_log
            .as_ref()
            .map(|log| log.tail(limit))
            .unwrap_or_default()
    }
}
