//! # Dashboard de monitoreo
//! src/dashboard/mod.rs
//!
//! Rutas del dashboard:
//!
//! | Ruta                  | Respuesta                                        |
//! |-----------------------|--------------------------------------------------|
//! | `/`, `/dashboard`     | página HTML                                      |
//! | `/api/info`           | JSON `{sistema, proceso, logs, archivos}`        |
//! | `/api/logs`           | JSON `{logs}` con las últimas 50 líneas          |
//! | cualquier otra        | 404 HTML                                         |
//!
//! Cada request vuelve a consultar el sistema; no hay caché.

pub mod format;
pub mod html;

use crate::http::{Request, Response, StatusCode};
use crate::probes::disks::disk_usage;
use crate::probes::listing::{list_directory, DirEntry};
use crate::probes::process::{process_info, ProcessInfo};
use crate::probes::space::analyze_space;
use crate::probes::system::{system_info, SystemInfo};
use crate::probes::temperature::temperatures;
use crate::router::Router;
use crate::server::AppState;
use chrono::Local;
use html::DashboardData;
use serde::Serialize;

/// Líneas de log en `/api/info`
pub const INFO_LOG_LINES: usize = 5;
/// Líneas de log en `/api/logs`
pub const LOGS_LIMIT: usize = 50;
/// Entradas del directorio en `/api/info`
pub const INFO_LISTING_LIMIT: usize = 10;

pub const NOT_FOUND_HTML: &str = r#"<h1>404 - Página no encontrada</h1><a href="/">Ir al Dashboard</a>"#;

/// Cuerpo de `/api/info`
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(rename = "sistema")]
    pub system: SystemInfo,
    #[serde(rename = "proceso")]
    pub process: ProcessInfo,
    pub logs: Vec<String>,
    #[serde(rename = "archivos")]
    pub files: Vec<DirEntry>,
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
}

/// Router con las rutas del dashboard
pub fn routes() -> Router {
    let mut router = Router::new();
    router.register("/", index_handler);
    router.register("/dashboard", index_handler);
    router.register("/api/info", info_handler);
    router.register("/api/logs", logs_handler);
    router.set_fallback(not_found_handler);
    router
}

pub fn index_handler(_req: &Request, state: &AppState) -> Response {
    let data = collect(state);
    Response::html(StatusCode::Ok, &html::render(&data))
}

pub fn info_handler(_req: &Request, state: &AppState) -> Response {
    let mut files = list_directory(&state.listing_dir);
    files.truncate(INFO_LISTING_LIMIT);

    Response::json(&InfoResponse {
        system: system_info(state.runner(), &state.platform),
        process: process_info(state.started),
        logs: state.recent_logs(INFO_LOG_LINES),
        files,
    })
}

pub fn logs_handler(_req: &Request, state: &AppState) -> Response {
    Response::json(&LogsResponse {
        logs: state.recent_logs(LOGS_LIMIT),
    })
}

pub fn not_found_handler(_req: &Request, _state: &AppState) -> Response {
    Response::html(StatusCode::NotFound, NOT_FOUND_HTML)
}

/// Ejecuta todas las sondas para pintar la página
pub fn collect(state: &AppState) -> DashboardData {
    let runner = state.runner();
    let space = match (&state.home_dir, state.space_scan) {
        (Some(home), true) => Some(analyze_space(runner, &state.platform, home)),
        _ => None,
    };

    DashboardData {
        system: system_info(runner, &state.platform),
        process: process_info(state.started),
        disks: disk_usage(runner, &state.platform),
        space,
        temperatures: temperatures(runner, &state.platform),
        listing: list_directory(&state.listing_dir),
        generated_at: Local::now().format("%d/%m/%Y, %H:%M:%S").to_string(),
    }
}
