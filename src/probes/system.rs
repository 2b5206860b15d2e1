//! # Información del sistema
//! src/probes/system.rs
//!
//! CPU (modelo, velocidades, uso por núcleo), memoria, load average y uptime.
//!
//! El uso por núcleo sale de los contadores acumulados desde el arranque, así
//! que es un promedio histórico y no una lectura instantánea.

use super::command::CommandRunner;
use super::host::HostInfo;
use super::os_version::os_version;
use super::platform::{self, Platform};
use super::processes::{top_processes, ProcessEntry};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use systemstat::{Platform as _, System};

const SYSCTL_TIMEOUT: Duration = Duration::from_millis(1000);
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Un núcleo lógico
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CpuCore {
    pub model: String,
    pub speed_mhz: u64,
    pub total_ticks: u64,
    pub idle_ticks: u64,
}

impl CpuCore {
    /// `(total - idle) / total * 100` con un decimal
    pub fn usage(&self) -> String {
        if self.total_ticks == 0 {
            return "0.0%".to_string();
        }
        let busy = self.total_ticks.saturating_sub(self.idle_ticks) as f64;
        format!("{:.1}%", busy / self.total_ticks as f64 * 100.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    #[serde(rename = "plataforma")]
    pub platform: Platform,
    #[serde(rename = "arquitectura")]
    pub arch: String,
    pub hostname: String,
    #[serde(rename = "sistemaOperativo")]
    pub os_version: String,
    pub kernel: String,
    /// Segundos desde el arranque
    pub uptime: u64,
    pub cpu: CpuInfo,
    #[serde(rename = "memoria")]
    pub memory: MemoryInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct CpuInfo {
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "nucleos")]
    pub cores: usize,
    #[serde(rename = "velocidad")]
    pub speed: u64,
    #[serde(rename = "velocidadMin")]
    pub speed_min: u64,
    #[serde(rename = "velocidadMax")]
    pub speed_max: u64,
    #[serde(rename = "loadAverage")]
    pub load_average: LoadAverage,
    #[serde(rename = "nucleosDetalle")]
    pub core_details: Vec<CoreDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadAverage {
    #[serde(rename = "1min")]
    pub one: String,
    #[serde(rename = "5min")]
    pub five: String,
    #[serde(rename = "15min")]
    pub fifteen: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreDetail {
    #[serde(rename = "nucleo")]
    pub index: usize,
    #[serde(rename = "velocidad")]
    pub speed: u64,
    #[serde(rename = "uso")]
    pub usage: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryInfo {
    pub total: String,
    #[serde(rename = "usada")]
    pub used: String,
    #[serde(rename = "libre")]
    pub free: String,
    #[serde(rename = "porcentajeUso")]
    pub usage_percent: String,
    #[serde(rename = "topProcesos")]
    pub top_processes: Vec<ProcessEntry>,
}

/// Reúne todo lo que muestra la tarjeta de sistema (se recalcula siempre)
pub fn system_info(runner: &dyn CommandRunner, platform: &Platform) -> SystemInfo {
    let host = HostInfo::detect();
    let sys = System::new();

    let cores = cpu_cores(runner, platform);
    let load = match sys.load_average() {
        Ok(l) => [l.one as f64, l.five as f64, l.fifteen as f64],
        Err(e) => {
            log::debug!("load_average no disponible: {}", e);
            [0.0; 3]
        }
    };
    let (total, free) = match sys.memory() {
        Ok(mem) => (mem.total.as_u64(), mem.free.as_u64()),
        Err(e) => {
            log::debug!("memoria no disponible: {}", e);
            (0, 0)
        }
    };
    let uptime = sys.uptime().map(|d| d.as_secs()).unwrap_or(0);

    SystemInfo {
        platform: platform.clone(),
        arch: platform::arch().to_string(),
        os_version: os_version(runner, platform, &host, Path::new("/etc/os-release")),
        hostname: host.hostname,
        kernel: host.kernel,
        uptime,
        cpu: build_cpu_info(&cores, load),
        memory: build_memory_info(total, free, top_processes(runner, platform)),
    }
}

pub fn build_cpu_info(cores: &[CpuCore], load: [f64; 3]) -> CpuInfo {
    let speeds: Vec<u64> = cores.iter().map(|c| c.speed_mhz).collect();
    let average = if speeds.is_empty() {
        0
    } else {
        (speeds.iter().sum::<u64>() as f64 / speeds.len() as f64).round() as u64
    };

    CpuInfo {
        model: cores.first().map(|c| c.model.clone()).unwrap_or_else(|| "N/A".to_string()),
        cores: cores.len(),
        speed: average,
        speed_min: speeds.iter().copied().min().unwrap_or(0),
        speed_max: speeds.iter().copied().max().unwrap_or(0),
        load_average: LoadAverage {
            one: format!("{:.2}", load[0]),
            five: format!("{:.2}", load[1]),
            fifteen: format!("{:.2}", load[2]),
        },
        core_details: cores
            .iter()
            .enumerate()
            .map(|(index, core)| CoreDetail {
                index,
                speed: core.speed_mhz,
                usage: core.usage(),
            })
            .collect(),
    }
}

pub fn build_memory_info(total: u64, free: u64, top: Vec<ProcessEntry>) -> MemoryInfo {
    let used = total.saturating_sub(free);
    let percent = if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    MemoryInfo {
        total: format_gb(total),
        used: format_gb(used),
        free: format_gb(free),
        usage_percent: format!("{:.1}%", percent),
        top_processes: top,
    }
}

pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GB)
}

/// Núcleos lógicos con su modelo, velocidad y contadores
pub fn cpu_cores(runner: &dyn CommandRunner, platform: &Platform) -> Vec<CpuCore> {
    match platform {
        Platform::Linux => {
            let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").unwrap_or_default();
            let stat = std::fs::read_to_string("/proc/stat").unwrap_or_default();
            let cores = merge_linux(&parse_cpuinfo(&cpuinfo), &parse_proc_stat(&stat));
            if cores.is_empty() {
                generic_cores()
            } else {
                cores
            }
        }
        Platform::MacOs => {
            let sysctl = |key: &str| {
                runner
                    .run("sysctl", &["-n", key], SYSCTL_TIMEOUT)
                    .stdout_if_ok()
                    .map(|s| s.trim().to_string())
            };
            let model = sysctl("machdep.cpu.brand_string").unwrap_or_else(|| "N/A".to_string());
            let count = sysctl("hw.ncpu")
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or_else(available_cores);
            let speed_mhz = sysctl("hw.cpufrequency")
                .and_then(|hz| hz.parse::<u64>().ok())
                .map(|hz| hz / 1_000_000)
                .unwrap_or(0);

            (0..count)
                .map(|_| CpuCore {
                    model: model.clone(),
                    speed_mhz,
                    ..CpuCore::default()
                })
                .collect()
        }
        _ => generic_cores(),
    }
}

fn available_cores() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

fn generic_cores() -> Vec<CpuCore> {
    (0..available_cores())
        .map(|_| CpuCore {
            model: "N/A".to_string(),
            ..CpuCore::default()
        })
        .collect()
}

/// `(model name, cpu MHz)` de cada bloque `processor` de `/proc/cpuinfo`
pub fn parse_cpuinfo(content: &str) -> Vec<(String, u64)> {
    let mut cores = Vec::new();
    let mut model = None;
    let mut mhz = None;
    let mut in_block = false;

    let mut flush = |model: &mut Option<String>, mhz: &mut Option<u64>| {
        cores.push((
            model.take().unwrap_or_else(|| "N/A".to_string()),
            mhz.take().unwrap_or(0),
        ));
    };

    for line in content.lines() {
        if line.trim().is_empty() {
            if in_block {
                flush(&mut model, &mut mhz);
                in_block = false;
            }
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "processor" => in_block = true,
            "model name" | "Model" if model.is_none() => model = Some(value.to_string()),
            "cpu MHz" => mhz = value.parse::<f64>().ok().map(|v| v as u64),
            _ => {}
        }
    }
    if in_block {
        flush(&mut model, &mut mhz);
    }

    cores
}

/// `(total, idle)` por cada línea `cpuN` de `/proc/stat`
///
/// Suma user, nice, system, idle e irq, igual que libuv.
pub fn parse_proc_stat(content: &str) -> Vec<(u64, u64)> {
    content
        .lines()
        .filter(|line| {
            line.strip_prefix("cpu")
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        })
        .map(|line| {
            let values: Vec<u64> = line
                .split_whitespace()
                .skip(1)
                .map(|v| v.parse().unwrap_or(0))
                .collect();
            let field = |i: usize| values.get(i).copied().unwrap_or(0);
            let total = field(0) + field(1) + field(2) + field(3) + field(5);
            (total, field(3))
        })
        .collect()
}

fn merge_linux(info: &[(String, u64)], stat: &[(u64, u64)]) -> Vec<CpuCore> {
    let count = info.len().max(stat.len());
    let model_fallback = info.first().map(|(m, _)| m.clone()).unwrap_or_else(|| "N/A".to_string());

    (0..count)
        .map(|i| {
            let (model, speed_mhz) = info
                .get(i)
                .cloned()
                .unwrap_or_else(|| (model_fallback.clone(), 0));
            let (total_ticks, idle_ticks) = stat.get(i).copied().unwrap_or((0, 0));
            CpuCore {
                model,
                speed_mhz,
                total_ticks,
                idle_ticks,
            }
        })
        .collect()
}
