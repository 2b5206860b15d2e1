//! # Access log
//! src/access_log.rs
//!
//! Archivo de texto append-only con una línea por request:
//!
//! ```text
//! [2024-03-01T12:30:00.123Z] GET /api/info - IP: 127.0.0.1
//! ```
//!
//! Es el único estado compartido del servidor; las escrituras van detrás de
//! un `Mutex` para que las líneas de threads distintos no se mezclen.

use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const FILE_NAME: &str = "access.log";

#[derive(Debug)]
pub struct AccessLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AccessLog {
    /// Crea `dir` si no existe y apunta a `dir/access.log`
    pub fn init(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            println!("📁 Directorio de logs creado: {}", dir.display());
        }

        Ok(Self {
            path: dir.join(FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Agrega una línea; los errores de escritura solo se registran
    pub fn record(&self, method: &str, target: &str, ip: &str) {
        let line = format_entry(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true), method, target, ip);

        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = written {
            log::error!("❌ Error al escribir log: {}", e);
        }
    }

    /// Últimas `limit` líneas no vacías, de la más vieja a la más nueva
    pub fn tail(&self, limit: usize) -> Vec<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::error!("❌ Error al leer logs: {}", e);
                return Vec::new();
            }
        };

        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(limit);
        lines[start..].iter().map(|l| l.to_string()).collect()
    }
}

/// `[timestamp] METHOD target - IP: ip\n`
pub fn format_entry(timestamp: &str, method: &str, target: &str, ip: &str) -> String {
    format!("[{}] {} {} - IP: {}\n", timestamp, method, target, ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_init_creates_directory() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("nested").join("logs");

        let log = AccessLog::init(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(log.path(), dir.join("access.log"));
    }

    #[test]
    fn test_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = AccessLog::init(dir.path()).unwrap();

        log.record("GET", "/api/info?x=1", "127.0.0.1");

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with('['));
        assert!(content.ends_with("Z] GET /api/info?x=1 - IP: 127.0.0.1\n"));
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry("2024-01-01T00:00:00.000Z", "HEAD", "/", "::1"),
            "[2024-01-01T00:00:00.000Z] HEAD / - IP: ::1\n"
        );
    }

    #[test]
    fn test_tail_limits_and_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = AccessLog::init(dir.path()).unwrap();
        fs::write(log.path(), "uno\n\ndos\ntres\n\n").unwrap();

        assert_eq!(log.tail(2), vec!["dos", "tres"]);
        assert_eq!(log.tail(50), vec!["uno", "dos", "tres"]);
        assert!(log.tail(0).is_empty());
    }

    #[test]
    fn test_tail_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = AccessLog::init(dir.path()).unwrap();
        assert!(log.tail(5).is_empty());
    }

    #[test]
    fn test_concurrent_appends_keep_lines_whole() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(AccessLog::init(dir.path()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for j in 0..25 {
                        log.record("GET", &format!("/t{}/{}", i, j), "127.0.0.1");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = log.tail(1000);
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|l| l.ends_with("- IP: 127.0.0.1")));
    }
}
