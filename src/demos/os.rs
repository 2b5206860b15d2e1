//! # Demo: sistema operativo
//! src/demos/os.rs
//!
//! Plataforma, red, CPU por núcleo, memoria, usuario y tiempos. Reutiliza las
//! sondas del dashboard con el runner real.

use crate::probes::host::HostInfo;
use crate::probes::os_version::os_version;
use crate::probes::platform::{self, Platform};
use crate::probes::system::{cpu_cores, format_gb, CpuCore};
use crate::probes::SystemRunner;
use directories::BaseDirs;
use std::path::Path;
use systemstat::{Platform as _, System};

/// Uso promedio de todos los núcleos, `"12.34"`
pub fn average_usage(cores: &[CpuCore]) -> String {
    let total: u64 = cores.iter().map(|c| c.total_ticks).sum();
    let idle: u64 = cores.iter().map(|c| c.idle_ticks).sum();
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", (total - idle.min(total)) as f64 / total as f64 * 100.0)
}

/// Fin de línea de la plataforma, escapado para imprimir
pub fn eol(platform: &Platform) -> &'static str {
    match platform {
        Platform::Windows => "\"\\r\\n\"",
        _ => "\"\\n\"",
    }
}

pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "desconocido".to_string())
}

pub fn run() {
    println!("=== Sistema operativo ===\n");

    let runner = SystemRunner::new();
    let platform = Platform::current();
    let host = HostInfo::detect();
    let sys = System::new();

    println!("💻 Información del Sistema:");
    println!("   - Plataforma: {}", platform);
    println!("   - Arquitectura: {}", platform::arch());
    println!("   - Tipo: {}", host.os_type);
    println!("   - Release: {}", host.kernel);
    println!(
        "   - Versión: {}",
        os_version(&runner, &platform, &host, Path::new("/etc/os-release"))
    );

    println!("\n🌐 Información de Red:");
    println!("   - Hostname: {}", host.hostname);
    match sys.networks() {
        Ok(networks) => {
            let names: Vec<&str> = networks.keys().map(String::as_str).collect();
            println!("   - Interfaces de red: {}", names.join(", "));
        }
        Err(e) => println!("   - Interfaces de red: no disponibles ({})", e),
    }

    let cores = cpu_cores(&runner, &platform);
    println!("\n🔧 Información de CPU:");
    match cores.first() {
        Some(first) => {
            println!("   - Modelo: {}", first.model);
            println!("   - Núcleos: {}", cores.len());
            println!("   - Velocidad: {} MHz", first.speed_mhz);
        }
        None => println!("   - No se pudo leer la información de CPU"),
    }

    println!("\n   📊 Detalles por núcleo:");
    for (index, core) in cores.iter().enumerate() {
        println!("   Core {}:", index);
        println!("      - Total: {} ticks", core.total_ticks);
        println!("      - Idle: {} ticks", core.idle_ticks);
        println!("      - Uso: {}", core.usage());
    }
    println!("\n   📈 Uso promedio: {}%", average_usage(&cores));

    println!("\n💾 Información de Memoria:");
    match sys.memory() {
        Ok(mem) => {
            let total = mem.total.as_u64();
            let free = mem.free.as_u64();
            let used = total.saturating_sub(free);
            println!("   - Total: {}", format_gb(total));
            println!("   - Libre: {}", format_gb(free));
            println!("   - Usada: {}", format_gb(used));
            if total > 0 {
                println!("   - % Uso: {:.2} %", used as f64 / total as f64 * 100.0);
            }
        }
        Err(e) => println!("   - No disponible ({})", e),
    }

    println!("\n👤 Información de Usuario:");
    println!("   - Usuario: {}", current_user());
    match BaseDirs::new() {
        Some(dirs) => println!("   - Home: {}", dirs.home_dir().display()),
        None => println!("   - Home: no disponible"),
    }
    println!(
        "   - Shell: {}",
        std::env::var("SHELL").unwrap_or_else(|_| "N/A".to_string())
    );

    println!("\n⏱️  Información de Tiempo:");
    let uptime = sys.uptime().map(|d| d.as_secs()).unwrap_or(0);
    println!("   - Uptime: {}", crate::dashboard::format::hours_minutes(uptime));
    println!("   - Directorio temp: {}", std::env::temp_dir().display());

    println!("\n📝 Otros:");
    println!("   - EOL (fin de línea): {}", eol(&platform));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(total: u64, idle: u64) -> CpuCore {
        CpuCore {
            model: "Test CPU".to_string(),
            speed_mhz: 2400,
            total_ticks: total,
            idle_ticks: idle,
        }
    }

    #[test]
    fn test_average_usage() {
        assert_eq!(average_usage(&[core(100, 50), core(100, 100)]), "25.00");
        assert_eq!(average_usage(&[]), "0.00");
    }

    #[test]
    fn test_eol() {
        assert_eq!(eol(&Platform::Windows), "\"\\r\\n\"");
        assert_eq!(eol(&Platform::Linux), "\"\\n\"");
    }
}
