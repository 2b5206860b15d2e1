//! # Sondas del sistema
//! src/probes/mod.rs
//!
//! Recolección de datos del sistema operativo para el dashboard. Todo es
//! best-effort: un comando que falta, un archivo ilegible o una salida que no
//! se entiende terminan en listas vacías o en `"N/A"`, nunca en un error.
//!
//! ```text
//! CommandRunner ──┬─ processes ─ apps
//!                 ├─ os_version ─ host
//!                 ├─ system
//!                 ├─ disks
//!                 ├─ space
//!                 └─ temperature
//! process, listing: solo std/libc
//! ```

pub mod apps;
pub mod command;
pub mod disks;
pub mod host;
pub mod listing;
pub mod os_version;
pub mod platform;
pub mod process;
pub mod processes;
pub mod space;
pub mod system;
pub mod temperature;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
#[doc(hidden)]
pub use command::FakeRunner;
pub use platform::Platform;
