//! # Errores del crate
//! src/error.rs
//!
//! Solo la configuración del servidor (bind, directorio de logs, logger,
//! señales) puede fallar. Las sondas del sistema nunca devuelven error:
//! convierten cualquier fallo en listas vacías o "N/A".

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuración inválida: {0}")]
    Config(String),

    #[error("No se pudo inicializar el logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("No se pudo registrar el manejador de señales: {0}")]
    Signal(std::io::Error),
}
