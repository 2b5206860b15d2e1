//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, un thread por conexión
//! 3. Registra cada request en el access log antes de enrutarlo
//! 4. Genera y envía responses HTTP
//! 5. Se cierra ordenadamente con SIGINT/SIGTERM

pub mod state;
pub mod tcp;

pub use state::AppState;
pub use tcp::Server;
