//! # Monitor Dashboard
//! src/lib.rs
//!
//! Dashboard de monitoreo del sistema servido sobre HTTP/1.0, más una serie
//! de demos de consola sobre las APIs de plataforma que usa.
//!
//! ## Arquitectura
//!
//! El crate está dividido en módulos especializados:
//! - `probes`: recolección best-effort de datos del sistema (comandos
//!   externos, `/proc`, `systemstat`, `libc`)
//! - `dashboard`: rutas `/`, `/api/info`, `/api/logs` y render HTML
//! - `access_log`: archivo append-only con una línea por request
//! - `http`: parsing y construcción de mensajes HTTP/1.0
//! - `router`: enrutamiento de peticiones a handlers
//! - `server`: servidor TCP, un thread por conexión
//! - `demos`: subcomandos `fs`, `path`, `os`, `uptime`, `process`, `ls`,
//!   `io` y el sitio `hello`
//! - `config`, `logging`, `error`: CLI, logger y tipo de error
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use monitor_dashboard::config::ServeConfig;
//! use monitor_dashboard::server::Server;
//!
//! let server = Server::dashboard(&ServeConfig::default())?;
//! server.run()?;
//! # Ok::<(), monitor_dashboard::error::Error>(())
//! ```

pub mod access_log;
pub mod config;
pub mod dashboard;
pub mod demos;
pub mod error;
pub mod http;
pub mod logging;
pub mod probes;
pub mod router;
pub mod server;
