//! # Demo: tiempo de actividad
//! src/demos/uptime.rs

use crate::probes::host::HostInfo;
use crate::probes::platform::{self, Platform};
use chrono::{Duration as ChronoDuration, Local};
use std::time::Instant;
use systemstat::{Platform as _, System};

/// `(días, horas, minutos, segundos)`
pub fn breakdown(seconds: u64) -> (u64, u64, u64, u64) {
    (
        seconds / 86_400,
        (seconds % 86_400) / 3600,
        (seconds % 3600) / 60,
        seconds % 60,
    )
}

/// ```
/// use monitor_dashboard::demos::uptime::readable;
/// assert_eq!(readable(93_784), "1d 2h 3m 4s");
/// ```
pub fn readable(seconds: u64) -> String {
    let (d, h, m, s) = breakdown(seconds);
    format!("{}d {}h {}m {}s", d, h, m, s)
}

/// Sin días cuando todavía no pasó uno
pub fn compact(seconds: u64) -> String {
    let (d, h, m, _) = breakdown(seconds);
    if d > 0 {
        format!("{}d {}h {}m", d, h, m)
    } else {
        format!("{}h {}m", h, m)
    }
}

/// Porcentaje del uptime del sistema que lleva vivo el proceso
pub fn percent_of(process_secs: f64, system_secs: f64) -> String {
    if system_secs <= 0.0 {
        return "0.0000".to_string();
    }
    format!("{:.4}", process_secs / system_secs * 100.0)
}

pub fn run(started: Instant) {
    println!("=== Sistema Uptime ===\n");

    let uptime = match System::new().uptime() {
        Ok(d) => d.as_secs(),
        Err(e) => {
            log::warn!("uptime no disponible: {}", e);
            0
        }
    };

    println!("⏱️  Tiempo de actividad del sistema:");
    println!("   - Total en segundos: {}", uptime);
    println!("   - Formato legible: {}", readable(uptime));
    println!("   - Formato compacto: {}", compact(uptime));

    let boot = Local::now() - ChronoDuration::seconds(uptime as i64);
    println!("\n📅 El sistema se inició:");
    println!("   - Fecha: {}", boot.format("%d/%m/%Y"));
    println!("   - Hora: {}", boot.format("%H:%M:%S"));
    println!("   - Completo: {}", boot.to_rfc2822());

    let process_secs = started.elapsed().as_secs_f64();
    println!("\n🟢 Tiempo de ejecución del proceso:");
    println!("   - Total en segundos: {:.2}", process_secs);
    println!(
        "   - Formato legible: {}m {}s",
        (process_secs / 60.0) as u64,
        (process_secs % 60.0) as u64
    );

    println!("\n📊 Comparación:");
    println!(
        "   - Este proceso lleva el {} % del uptime del sistema",
        percent_of(process_secs, uptime as f64)
    );

    println!("\n💻 Información adicional:");
    println!("   - Plataforma: {}", Platform::current());
    println!("   - Hostname: {}", HostInfo::detect().hostname);
    println!("   - Arquitectura: {}", platform::arch());
}
