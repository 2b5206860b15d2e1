//! # Demos de APIs de plataforma
//! src/demos/mod.rs
//!
//! Subcomandos de consola que recorren, paso a paso, las mismas APIs que usa
//! el dashboard: archivos, rutas, sistema operativo, proceso y listados.
//! `site` es el servidor HTTP mínimo del subcomando `hello`.

pub mod fs;
pub mod io;
pub mod ls;
pub mod os;
pub mod path;
pub mod process;
pub mod site;
pub mod uptime;

/// Línea separadora entre secciones
pub const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
