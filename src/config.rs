//! # Configuración y CLI
//! src/config.rs
//!
//! Línea de comandos del binario `monitor`. Sin subcomando se levanta el
//! dashboard con las opciones de `serve`.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./monitor --port 8080 --log-dir /var/log/monitor --no-space-scan
//! ./monitor hello --port 4000
//! ./monitor ls ./src --ext rs --search mod
//! ./monitor -v process --name Juan --age 25 --verbose
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! DASHBOARD_PORT=8080 DASHBOARD_HOST=0.0.0.0 ./monitor
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "monitor")]
#[command(about = "Dashboard de monitoreo del sistema y demos de APIs de plataforma")]
#[command(version = "0.1.0")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Más detalle en los logs (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Solo advertencias y errores
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub serve: ServeConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Dashboard de monitoreo (por defecto)
    Serve(ServeConfig),
    /// Sitio HTTP básico con /, /about y /api
    Hello(HelloConfig),
    /// Operaciones de archivos y SHA-256
    Fs,
    /// Manipulación de rutas
    Path,
    /// Información del sistema operativo
    Os,
    /// Tiempo de actividad del sistema y del proceso
    Uptime,
    /// Información del proceso actual
    Process(ProcessArgs),
    /// Equivalentes de ls, ls -l, ls -R, ls -a
    Ls(LsArgs),
    /// I/O bloqueante, en segundo plano y en paralelo
    Io,
}

impl Cli {
    /// Subcomando a ejecutar; `serve` si no se indicó ninguno
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Serve(self.serve.clone()))
    }
}

/// Opciones del dashboard
#[derive(Debug, Clone, Args)]
pub struct ServeConfig {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "3000", env = "DASHBOARD_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "localhost", env = "DASHBOARD_HOST")]
    pub host: String,

    /// Directorio del access log
    #[arg(long = "log-dir", default_value = "./logs", env = "DASHBOARD_LOG_DIR")]
    pub log_dir: PathBuf,

    /// Directorio que se lista en el dashboard (por defecto el actual)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Desactiva el análisis de espacio del home (du/find son lentos)
    #[arg(long = "no-space-scan")]
    pub no_space_scan: bool,
}

impl ServeConfig {
    /// Dirección para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use monitor_dashboard::config::ServeConfig;
    ///
    /// let config = ServeConfig::default();
    /// assert_eq!(config.address(), "localhost:3000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err("Log dir must not be empty".to_string());
        }
        if let Some(dir) = &self.dir {
            if !dir.is_dir() {
                return Err(format!("Listing dir is not a directory: {}", dir.display()));
            }
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║             Monitor Dashboard - Configuración                ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Red:");
        println!("   Dirección:    {}", self.address());
        println!();
        println!("📁 Rutas:");
        println!("   Logs:         {}", self.log_dir.display());
        match &self.dir {
            Some(dir) => println!("   Listado:      {}", dir.display()),
            None => println!("   Listado:      (directorio actual)"),
        }
        println!();
        println!("🔎 Análisis de espacio: {}", if self.no_space_scan { "desactivado" } else { "activado" });
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "localhost".to_string(),
            log_dir: PathBuf::from("./logs"),
            dir: None,
            no_space_scan: false,
        }
    }
}

/// Opciones del sitio de ejemplo
#[derive(Debug, Clone, Args)]
pub struct HelloConfig {
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    #[arg(long, default_value = "localhost")]
    pub host: String,
}

impl HelloConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HelloConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "localhost".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProcessArgs {
    /// Argumentos libres (`--clave valor`, `--bandera`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct LsArgs {
    /// Directorio a listar (por defecto el actual)
    pub dir: Option<PathBuf>,

    /// Extensión para el filtro (sin punto)
    #[arg(long, default_value = "rs")]
    pub ext: String,

    /// Texto a buscar en los nombres
    #[arg(long, default_value = "example")]
    pub search: String,
}

impl Default for LsArgs {
    fn default() -> Self {
        Self {
            dir: None,
            ext: "rs".to_string(),
            search: "example".to_string(),
        }
    }
}
