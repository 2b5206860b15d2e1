//! # Plantilla HTML del dashboard
//! src/dashboard/html.rs
//!
//! Todo valor que viene del sistema (nombres de procesos, rutas, salida de
//! comandos) pasa por `escape_html` antes de interpolarse.

use super::format::{
    bar_width, core_usage_color, disk_usage_color, escape_html as esc, hours_minutes, kilobytes,
};
use crate::probes::disks::DiskUsage;
use crate::probes::listing::{DirEntry, EntryKind};
use crate::probes::process::ProcessInfo;
use crate::probes::space::{SpaceEntry, SpaceReport};
use crate::probes::system::SystemInfo;
use crate::probes::temperature::{format_celsius, Temperatures};
use std::fmt::Write;

/// Cuántas entradas del directorio se muestran
pub const LISTING_LIMIT: usize = 20;

/// Todo lo que se pinta en una página
pub struct DashboardData {
    pub system: SystemInfo,
    pub process: ProcessInfo,
    pub disks: Vec<DiskUsage>,
    /// `None` cuando el análisis de espacio está desactivado
    pub space: Option<SpaceReport>,
    pub temperatures: Temperatures,
    pub listing: Vec<DirEntry>,
    pub generated_at: String,
}

const STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      padding: 20px;
      min-height: 100vh;
    }
    .container { max-width: 1400px; margin: 0 auto; }
    h1 {
      color: white;
      text-align: center;
      margin-bottom: 30px;
      font-size: 2.5em;
      text-shadow: 2px 2px 4px rgba(0,0,0,0.3);
    }
    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(400px, 1fr));
      gap: 20px;
      margin-bottom: 20px;
    }
    .card {
      background: white;
      border-radius: 10px;
      padding: 20px;
      box-shadow: 0 4px 6px rgba(0,0,0,0.1);
    }
    .card h2 {
      color: #667eea;
      margin-bottom: 15px;
      font-size: 1.5em;
      border-bottom: 2px solid #667eea;
      padding-bottom: 10px;
    }
    .card h3 { color: #555; font-size: 0.95em; margin-bottom: 10px; }
    .info-row {
      display: flex;
      justify-content: space-between;
      padding: 8px 0;
      border-bottom: 1px solid #f0f0f0;
    }
    .info-label { font-weight: 600; color: #555; }
    .info-value { color: #333; font-family: 'Courier New', monospace; }
    .mini-row {
      background: #f8f9fa;
      padding: 6px 10px;
      margin: 5px 0;
      border-radius: 4px;
      display: flex;
      justify-content: space-between;
      font-size: 0.85em;
    }
    .path { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; flex: 1; }
    .scroll { max-height: 150px; overflow-y: auto; margin-bottom: 15px; }
    .muted { color: #999; text-align: center; padding: 20px; }
    .file-list { max-height: 400px; overflow-y: auto; }
    .file-item {
      padding: 8px;
      margin: 5px 0;
      background: #f8f9fa;
      border-radius: 5px;
      display: flex;
      justify-content: space-between;
      align-items: center;
    }
    .file-icon { margin-right: 10px; font-size: 1.2em; }
    .badge { padding: 3px 8px; border-radius: 12px; font-size: 0.75em; font-weight: 600; }
    .badge-dir { background: #e3f2fd; color: #1976d2; }
    .badge-file { background: #f3e5f5; color: #7b1fa2; }
    .refresh-btn {
      display: block;
      width: 100%;
      padding: 15px;
      background: #667eea;
      color: white;
      border: none;
      border-radius: 10px;
      font-size: 1.1em;
      cursor: pointer;
      margin-top: 20px;
      transition: background 0.3s;
    }
    .refresh-btn:hover { background: #5568d3; }
    .timestamp { text-align: center; color: white; margin-top: 20px; font-size: 0.9em; }
"#;

/// Página completa
pub fn render(data: &DashboardData) -> String {
    let mut html = String::with_capacity(32 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Dashboard de Monitoreo del Sistema</title>
  <style>{}</style>
</head>
<body>
  <div class="container">
    <h1>🖥️ Dashboard de Monitoreo del Sistema</h1>
    <div class="grid">
"#,
        STYLE
    );

    html.push_str(&os_card(&data.system));
    html.push_str(&cpu_card(&data.system));
    html.push_str(&memory_card(&data.system));
    html.push_str(&storage_card(&data.disks));
    html.push_str(&process_card(&data.process));
    html.push_str(&temperature_card(&data.temperatures));
    html.push_str(&space_card(data.space.as_ref()));
    html.push_str(&top_processes_card(&data.system));
    html.push_str("    </div>\n");
    html.push_str(&listing_card(&data.listing));

    let _ = write!(
        html,
        r#"
    <button class="refresh-btn" onclick="location.reload()">🔄 Actualizar Dashboard</button>
    <div class="timestamp">Última actualización: {}</div>
  </div>
</body>
</html>
"#,
        esc(&data.generated_at)
    );

    html
}

fn info_row(label: &str, value: &str) -> String {
    format!(
        "        <div class=\"info-row\"><span class=\"info-label\">{}:</span><span class=\"info-value\">{}</span></div>\n",
        label,
        esc(value)
    )
}

fn card(title: &str, body: &str) -> String {
    format!(
        "      <div class=\"card\">\n        <h2>{}</h2>\n{}      </div>\n",
        title, body
    )
}

fn os_card(system: &SystemInfo) -> String {
    let mut body = String::new();
    body.push_str(&info_row("Sistema", &system.os_version));
    body.push_str(&info_row("Kernel", &system.kernel));
    body.push_str(&info_row("Plataforma", system.platform.as_str()));
    body.push_str(&info_row("Arquitectura", &system.arch));
    body.push_str(&info_row("Hostname", &system.hostname));
    body.push_str(&info_row("Uptime Sistema", &hours_minutes(system.uptime)));
    card("💻 Sistema Operativo", &body)
}

fn cpu_card(system: &SystemInfo) -> String {
    let cpu = &system.cpu;
    let mut speed = format!("{} MHz", cpu.speed);
    if cpu.speed_min != cpu.speed_max {
        let _ = write!(speed, " ({}-{} MHz)", cpu.speed_min, cpu.speed_max);
    }

    let mut body = String::new();
    body.push_str(&info_row("Modelo", &cpu.model));
    body.push_str(&info_row("Núcleos", &format!("{} núcleos", cpu.cores)));
    body.push_str(&info_row("Velocidad", &speed));
    body.push_str(&info_row(
        "Carga Promedio",
        &format!(
            "{} / {} / {}",
            cpu.load_average.one, cpu.load_average.five, cpu.load_average.fifteen
        ),
    ));
    body.push_str("        <hr style=\"margin: 15px 0; border: none; border-top: 1px solid #e0e0e0;\">\n");
    body.push_str("        <h3>📊 Detalle por Núcleo</h3>\n        <div style=\"max-height: 110px; overflow-y: auto;\">\n");
    for core in &cpu.core_details {
        let _ = writeln!(
            body,
            "          <div class=\"mini-row\"><span><strong>Núcleo {}</strong></span><span>{} MHz</span><span style=\"color: {}; font-weight: 600;\">{}</span></div>",
            core.index,
            core.speed,
            core_usage_color(&core.usage),
            esc(&core.usage)
        );
    }
    body.push_str("        </div>\n");
    card("⚙️ Procesador", &body)
}

fn memory_card(system: &SystemInfo) -> String {
    let memory = &system.memory;
    let mut body = String::new();
    body.push_str(&info_row("Total", &memory.total));
    body.push_str(&info_row("Usada", &memory.used));
    body.push_str(&info_row("Libre", &memory.free));
    body.push_str(&info_row("Uso", &memory.usage_percent));
    card("🧠 Memoria del Sistema", &body)
}

fn storage_card(disks: &[DiskUsage]) -> String {
    let mut body = String::new();
    for (idx, disk) in disks.iter().enumerate() {
        let separator = if idx > 0 {
            "margin-top: 15px; padding-top: 15px; border-top: 1px solid #e0e0e0;"
        } else {
            ""
        };
        let color = disk_usage_color(&disk.use_percent);
        let _ = write!(
            body,
            r#"        <div style="{separator}">
          <div style="display: flex; justify-content: space-between; margin-bottom: 8px;">
            <span style="font-weight: 600; color: #333;">{device}</span>
            <span style="font-size: 0.85em; color: #666;">{mount}</span>
          </div>
{size}{used}{available}          <div style="margin-top: 8px;">
            <div style="display: flex; justify-content: space-between; font-size: 0.85em; margin-bottom: 4px;">
              <span>Uso del disco</span>
              <span style="font-weight: 600; color: {color};">{percent}</span>
            </div>
            <div style="width: 100%; height: 8px; background: #e0e0e0; border-radius: 4px; overflow: hidden;">
              <div style="width: {width}; height: 100%; background: {color};"></div>
            </div>
          </div>
        </div>
"#,
            separator = separator,
            device = esc(&disk.device),
            mount = esc(&disk.mount),
            size = info_row("Tamaño", &disk.size),
            used = info_row("Usado", &disk.used),
            available = info_row("Disponible", &disk.available),
            color = color,
            percent = esc(&disk.use_percent),
            width = bar_width(&disk.use_percent),
        );
    }
    card("💿 Almacenamiento", &body)
}

fn process_card(process: &ProcessInfo) -> String {
    let mut body = String::new();
    body.push_str(&info_row("PID", &process.pid.to_string()));
    body.push_str(&info_row("RSS", &process.memory.rss));
    body.push_str(&info_row("Virtual", &process.memory.virtual_size));
    body.push_str(&info_row("Datos", &process.memory.data));
    body.push_str(&info_row("CPU User", &process.cpu.user));
    body.push_str(&info_row("CPU System", &process.cpu.system));
    body.push_str(&info_row("Uptime", &format!("{}s", process.uptime)));
    card("💾 Memoria del Proceso", &body)
}

fn temperature_card(temps: &Temperatures) -> String {
    let mut gpu = format_celsius(temps.gpu.temp);
    if !temps.gpu.name.is_empty() {
        let _ = write!(gpu, " ({})", temps.gpu.name);
    }

    let mut body = String::new();
    body.push_str(&info_row("CPU (package)", &format_celsius(temps.cpu.package)));
    body.push_str(&info_row("Fuente CPU", &temps.cpu.source));
    body.push_str(&info_row("GPU", &gpu));
    body.push_str(&info_row("Fuente GPU", &temps.gpu.source));

    if temps.cpu.per_core.is_empty() {
        body.push_str(
            "        <p style=\"margin-top: 12px; color: #777; font-size: 0.9em; line-height: 1.3;\">\
             ℹ️ En este equipo no hay lectura de temperatura <strong>por núcleo</strong> disponible.\
             <br>Normalmente se expone solo la temperatura del <em>CPU package</em>.</p>\n",
        );
    } else {
        body.push_str("        <hr style=\"margin: 15px 0; border: none; border-top: 1px solid #e0e0e0;\">\n");
        body.push_str("        <h3>🔥 Por núcleo</h3>\n        <div style=\"max-height: 140px; overflow-y: auto;\">\n");
        for core in &temps.cpu.per_core {
            let _ = writeln!(
                body,
                "          <div class=\"mini-row\"><span><strong>{}</strong></span><span style=\"font-weight: 700;\">{}</span></div>",
                esc(&core.core),
                format_celsius(Some(core.c))
            );
        }
        body.push_str("        </div>\n");
    }

    if !temps.warnings.is_empty() {
        let mut unique: Vec<&str> = Vec::new();
        for warning in &temps.warnings {
            if !unique.contains(&warning.as_str()) {
                unique.push(warning.as_str());
            }
        }
        let items: Vec<String> = unique.iter().map(|w| format!("• {}", esc(w))).collect();
        let _ = writeln!(
            body,
            "        <details style=\"margin-top: 12px;\"><summary style=\"cursor:pointer; color:#a06a00; font-size:0.9em;\">⚠️ Detalles de sensores (ver)</summary>\
             <div style=\"margin-top: 8px; font-size: 0.85em; color: #a06a00; background:#fff3cd; padding:10px; border-radius:6px;\">{}</div></details>",
            items.join("<br>")
        );
    }

    card("🌡️ Temperaturas", &body)
}

fn space_rows(entries: &[SpaceEntry], background: &str, color: &str) -> String {
    let mut rows = String::new();
    for entry in entries {
        let path = esc(&entry.path);
        let _ = writeln!(
            rows,
            "          <div class=\"mini-row\" style=\"background: {};\"><span class=\"path\" title=\"{}\">{}</span><span style=\"font-weight: 600; color: {}; margin-left: 10px;\">{}</span></div>",
            background,
            path,
            path,
            color,
            esc(&entry.size)
        );
    }
    rows
}

fn space_card(space: Option<&SpaceReport>) -> String {
    let Some(space) = space else {
        return card(
            "🔍 Análisis de Espacio",
            "        <p class=\"muted\">Análisis de espacio desactivado (--no-space-scan)</p>\n",
        );
    };

    let mut body = String::new();
    body.push_str("        <h3>📁 Top 5 Carpetas Pesadas</h3>\n        <div class=\"scroll\">\n");
    if space.heavy_folders.is_empty() {
        body.push_str("          <p class=\"muted\">No se encontraron carpetas pesadas</p>\n");
    } else {
        body.push_str(&space_rows(&space.heavy_folders, "#f8f9fa", "#667eea"));
    }
    body.push_str("        </div>\n");

    if !space.big_files.is_empty() {
        body.push_str("        <h3>📄 Archivos Grandes (&gt; 2GB)</h3>\n        <div class=\"scroll\">\n");
        body.push_str(&space_rows(&space.big_files, "#fff3cd", "#dc3545"));
        body.push_str("        </div>\n");
    }

    if !space.heavy_caches.is_empty() {
        body.push_str("        <h3>🗑️ Cachés Pesados</h3>\n        <div class=\"scroll\">\n");
        body.push_str(&space_rows(&space.heavy_caches, "#e3f2fd", "#1976d2"));
        body.push_str("        </div>\n");
    }

    card("🔍 Análisis de Espacio", &body)
}

fn top_processes_card(system: &SystemInfo) -> String {
    let processes = &system.memory.top_processes;
    if processes.is_empty() {
        return card(
            "📊 Top 5 Procesos por Memoria",
            "        <p class=\"muted\">No hay información de procesos disponible</p>\n",
        );
    }

    let mut body = String::new();
    for (idx, process) in processes.iter().enumerate() {
        let (background, border) = if idx == 0 {
            ("#fff3cd", "#ffc107")
        } else {
            ("#f8f9fa", "#667eea")
        };
        let mut memory = esc(&process.memory);
        if let Some(percent) = &process.percent {
            let _ = write!(memory, " ({})", esc(percent));
        }
        let _ = write!(
            body,
            r#"        <div style="background: {background}; padding: 12px; margin: 10px 0; border-radius: 6px; border-left: 4px solid {border};">
          <div style="display: flex; justify-content: space-between; margin-bottom: 8px;">
            <span style="font-weight: 600; color: #333;">{position}. {name}</span>
            <span style="font-weight: 700; color: #667eea;">{memory}</span>
          </div>
          <div style="display: flex; justify-content: space-between; font-size: 0.85em; color: #666;">
            <span>📦 {application}</span>
            <span style="background: #e3f2fd; padding: 3px 10px; border-radius: 10px; font-family: monospace;">{extension}</span>
          </div>
        </div>
"#,
            background = background,
            border = border,
            position = idx + 1,
            name = esc(&process.name),
            memory = memory,
            application = esc(&process.application),
            extension = esc(&process.extension),
        );
    }
    card("📊 Top 5 Procesos por Memoria", &body)
}

fn listing_card(listing: &[DirEntry]) -> String {
    let shown = listing.len().min(LISTING_LIMIT);
    let mut body = String::from("        <div class=\"file-list\">\n");
    for entry in listing.iter().take(LISTING_LIMIT) {
        let (icon, badge, size) = match entry.kind {
            EntryKind::Directory => ("📁", "badge-dir", String::new()),
            EntryKind::File => ("📄", "badge-file", kilobytes(entry.size)),
        };
        let _ = writeln!(
            body,
            "          <div class=\"file-item\"><div><span class=\"file-icon\">{}</span><strong>{}</strong> <span class=\"badge {}\">{}</span></div><div>{}</div></div>",
            icon,
            esc(&entry.name),
            badge,
            entry.kind.as_str(),
            size
        );
    }
    body.push_str("        </div>\n");
    let _ = writeln!(
        body,
        "        <p style=\"margin-top: 15px; color: #666; font-size: 0.9em;\">Mostrando {} de {} elementos</p>",
        shown,
        listing.len()
    );

    format!(
        "    <div class=\"card\">\n      <h2>📂 Archivos en Directorio Actual (comando ls)</h2>\n{}    </div>\n",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::disks::DiskUsage;
    use crate::probes::platform::Platform;
    use crate::probes::process::process_info;
    use crate::probes::processes::ProcessEntry;
    use crate::probes::system::{build_cpu_info, build_memory_info, CpuCore};
    use std::time::Instant;

    fn sample_system(top: Vec<ProcessEntry>) -> SystemInfo {
        let cores = vec![
            CpuCore { model: "Test <CPU>".into(), speed_mhz: 2000, total_ticks: 100, idle_ticks: 10 },
            CpuCore { model: "Test <CPU>".into(), speed_mhz: 1000, total_ticks: 100, idle_ticks: 90 },
        ];
        SystemInfo {
            platform: Platform::Linux,
            arch: "x64".into(),
            hostname: "host&co".into(),
            os_version: "Ubuntu 22.04".into(),
            kernel: "6.5.0".into(),
            uptime: 7260,
            cpu: build_cpu_info(&cores, [0.5, 0.25, 0.1]),
            memory: build_memory_info(8 << 30, 2 << 30, top),
        }
    }

    fn sample_data(listing: Vec<DirEntry>) -> DashboardData {
        DashboardData {
            system: sample_system(vec![ProcessEntry {
                name: "<evil>".into(),
                extension: "binario".into(),
                application: "Evil".into(),
                memory: "10.00 MB".into(),
                percent: Some("1.0%".into()),
            }]),
            process: process_info(Instant::now()),
            disks: vec![DiskUsage {
                device: "/dev/sda1".into(),
                size: "100G".into(),
                used: "85G".into(),
                available: "15G".into(),
                use_percent: "85%".into(),
                mount: "/".into(),
            }],
            space: None,
            temperatures: Temperatures::default(),
            listing,
            generated_at: "01/01/2025, 10:00:00".into(),
        }
    }

    fn entry(name: &str) -> DirEntry {
        DirEntry {
            name: name.into(),
            kind: EntryKind::File,
            size: 2048,
            modified: "N/A".into(),
        }
    }

    #[test]
    fn test_render_escapes_values() {
        let html = render(&sample_data(vec![entry("a<b>.txt")]));

        assert!(html.contains("Test &lt;CPU&gt;"));
        assert!(html.contains("host&amp;co"));
        assert!(html.contains("1. &lt;evil&gt;"));
        assert!(html.contains("a&lt;b&gt;.txt"));
        assert!(!html.contains("<evil>"));
    }

    #[test]
    fn test_render_core_and_disk_colors() {
        let html = render(&sample_data(Vec::new()));

        // núcleo 0 al 90%, núcleo 1 al 10%, disco al 85%
        assert!(html.contains("color: #dc3545; font-weight: 600;\">90.0%"));
        assert!(html.contains("color: #28a745; font-weight: 600;\">10.0%"));
        assert!(html.contains("width: 85%"));
        assert!(html.contains("(1000-2000 MHz)"));
        assert!(html.contains("2h 1m"));
    }

    #[test]
    fn test_listing_limited_to_twenty() {
        let listing: Vec<DirEntry> = (0..25).map(|i| entry(&format!("f{:02}", i))).collect();
        let html = render(&sample_data(listing));

        assert!(html.contains("Mostrando 20 de 25 elementos"));
        assert!(html.contains("f19"));
        assert!(!html.contains("f20"));
        assert!(html.contains("2.00 KB"));
    }

    #[test]
    fn test_space_disabled_and_enabled() {
        let mut data = sample_data(Vec::new());
        assert!(render(&data).contains("--no-space-scan"));

        data.space = Some(SpaceReport {
            heavy_folders: vec![SpaceEntry { path: "~/Videos".into(), size: "40G".into() }],
            ..SpaceReport::default()
        });
        let html = render(&data);
        assert!(html.contains("~/Videos"));
        assert!(!html.contains("Archivos Grandes"));
    }

    #[test]
    fn test_temperature_card_warnings_deduplicated() {
        let mut data = sample_data(Vec::new());
        data.temperatures.warnings = vec!["x".into(), "x".into(), "y".into()];
        let html = render(&data);

        assert!(html.contains("• x<br>• y</div>"));
        assert!(html.contains("por núcleo</strong> disponible"));
    }

    #[test]
    fn test_no_processes_message() {
        let mut data = sample_data(Vec::new());
        data.system = sample_system(Vec::new());
        assert!(render(&data).contains("No hay información de procesos disponible"));
    }
}
