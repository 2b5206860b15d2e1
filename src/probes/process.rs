//! # Información del proceso del servidor
//! src/probes/process.rs

use super::platform::{self, Platform};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub ppid: u32,
    pub version: String,
    #[serde(rename = "plataforma")]
    pub platform: Platform,
    #[serde(rename = "arquitectura")]
    pub arch: String,
    #[serde(rename = "directorio")]
    pub cwd: String,
    /// Segundos desde que arrancó el servidor
    pub uptime: u64,
    #[serde(rename = "memoria")]
    pub memory: ProcessMemory,
    pub cpu: ProcessCpu,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMemory {
    pub rss: String,
    #[serde(rename = "virtual")]
    pub virtual_size: String,
    #[serde(rename = "datos")]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCpu {
    pub user: String,
    pub system: String,
}

/// Snapshot del proceso actual; `started` es el arranque del servidor
pub fn process_info(started: Instant) -> ProcessInfo {
    let status = std::fs::read_to_string("/proc/self/status").unwrap_or_default();
    let usage = resource_usage();

    let mut memory = parse_proc_status(&status);
    if memory.rss == "N/A" {
        if let Some(usage) = &usage {
            memory.rss = format_mb(usage.max_rss_kb);
        }
    }

    ProcessInfo {
        pid: std::process::id(),
        ppid: parent_pid(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: Platform::current(),
        arch: platform::arch().to_string(),
        cwd: std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "N/A".to_string()),
        uptime: started.elapsed().as_secs(),
        memory,
        cpu: match usage {
            Some(usage) => ProcessCpu {
                user: format!("{:.2} ms", usage.user_ms),
                system: format!("{:.2} ms", usage.system_ms),
            },
            None => ProcessCpu {
                user: "N/A".to_string(),
                system: "N/A".to_string(),
            },
        },
    }
}

/// `VmRSS`, `VmSize` y `VmData` de `/proc/self/status`
pub fn parse_proc_status(status: &str) -> ProcessMemory {
    let field = |name: &str| {
        status
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(format_mb)
            .unwrap_or_else(|| "N/A".to_string())
    };

    ProcessMemory {
        rss: field("VmRSS"),
        virtual_size: field("VmSize"),
        data: field("VmData"),
    }
}

pub fn format_mb(kb: u64) -> String {
    format!("{:.2} MB", kb as f64 / 1024.0)
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceUsage {
    pub user_ms: f64,
    pub system_ms: f64,
    pub max_rss_kb: u64,
}

#[cfg(unix)]
pub fn resource_usage() -> Option<ResourceUsage> {
    // SAFETY: getrusage escribe en el struct que le pasamos
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    if unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) } != 0 {
        return None;
    }

    let ms = |tv: libc::timeval| tv.tv_sec as f64 * 1000.0 + tv.tv_usec as f64 / 1000.0;
    // ru_maxrss viene en bytes en macOS y en KB en Linux
    let max_rss_kb = if cfg!(target_os = "macos") {
        usage.ru_maxrss as u64 / 1024
    } else {
        usage.ru_maxrss as u64
    };

    Some(ResourceUsage {
        user_ms: ms(usage.ru_utime),
        system_ms: ms(usage.ru_stime),
        max_rss_kb,
    })
}

#[cfg(not(unix))]
pub fn resource_usage() -> Option<ResourceUsage> {
    None
}

#[cfg(unix)]
pub fn parent_pid() -> u32 {
    // SAFETY: getppid no puede fallar
    unsafe { libc::getppid() as u32 }
}

#[cfg(not(unix))]
pub fn parent_pid() -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "\
Name:\tmonitor
VmPeak:\t  120000 kB
VmSize:\t  102400 kB
VmRSS:\t    5120 kB
VmData:\t   20480 kB
";

    #[test]
    fn test_parse_proc_status() {
        let memory = parse_proc_status(STATUS);
        assert_eq!(memory.rss, "5.00 MB");
        assert_eq!(memory.virtual_size, "100.00 MB");
        assert_eq!(memory.data, "20.00 MB");
    }

    #[test]
    fn test_parse_proc_status_missing() {
        let memory = parse_proc_status("");
        assert_eq!(memory.rss, "N/A");
        assert_eq!(memory.data, "N/A");
    }

    #[test]
    fn test_process_info_current() {
        let info = process_info(Instant::now());

        assert_eq!(info.pid, std::process::id());
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.uptime, 0);
        assert!(!info.cwd.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_resource_usage_available() {
        let usage = resource_usage().unwrap();
        assert!(usage.user_ms >= 0.0);
        assert!(usage.max_rss_kb > 0);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(process_info(Instant::now())).unwrap();
        assert!(json["memoria"]["virtual"].is_string());
        assert!(json["memoria"]["datos"].is_string());
        assert!(json["cpu"]["user"].as_str().unwrap().ends_with(" ms") || json["cpu"]["user"] == "N/A");
        assert!(json["directorio"].is_string());
    }
}
