//! # Demo: manejo de rutas
//! src/demos/path.rs
//!
//! Análisis, construcción, normalización léxica y rutas relativas. Nada de
//! esto toca el disco salvo `resolve`, que parte del directorio actual.

use crate::probes::Platform;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

pub const SAMPLE_PATH: &str = "/Users/usuario/proyectos/rust/app.rs";
pub const MESSY_PATH: &str = "/usuarios//rust/./src/../lib/utils.rs";

/// Separador de la variable PATH
#[cfg(windows)]
pub const PATH_DELIMITER: char = ';';
#[cfg(not(windows))]
pub const PATH_DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    pub dirname: String,
    pub basename: String,
    /// Con el punto inicial (`.rs`), vacío si no hay
    pub extension: String,
    pub stem: String,
}

pub fn describe(path: &Path) -> PathParts {
    PathParts {
        dirname: path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        basename: file_name(path),
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
        stem: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resuelve `.` y `..` sin consultar el sistema de archivos
///
/// ```
/// use monitor_dashboard::demos::path::normalize;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     normalize(Path::new("/usuarios//rust/./src/../lib/utils.rs")),
///     PathBuf::from("/usuarios/rust/lib/utils.rs")
/// );
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Ruta para ir de `from` a `to` (ambas se normalizan antes)
pub fn relative(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for component in &to[common..] {
        result.push(component.as_os_str());
    }
    result
}

/// Ruta absoluta a partir de `base`
pub fn resolve(base: &Path, parts: &[&str]) -> PathBuf {
    let mut path = base.to_path_buf();
    for part in parts {
        path.push(part);
    }
    normalize(&path)
}

pub fn run() {
    println!("=== Manejo de rutas (std::path) ===\n");

    let sample = Path::new(SAMPLE_PATH);
    let parts = describe(sample);
    println!("📁 Análisis de ruta: {}", SAMPLE_PATH);
    println!("   - Directorio base: {}", parts.dirname);
    println!("   - Nombre del archivo: {}", parts.basename);
    println!("   - Extensión: {}", parts.extension);
    println!("   - Nombre sin extensión: {}", parts.stem);

    println!("\n🔨 Construir rutas:");
    let joined: PathBuf = ["proyectos", "rust", "src", "main.rs"].iter().collect();
    println!("   - join: {}", joined.display());

    println!("\n🎯 Rutas absolutas:");
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    println!("   - Directorio actual: {}", cwd.display());
    match std::env::current_exe() {
        Ok(exe) => println!("   - Ejecutable: {}", exe.display()),
        Err(e) => println!("   - Ejecutable: no disponible ({})", e),
    }
    println!("   - resolve: {}", resolve(&cwd, &["demos", "ejemplo.rs"]).display());

    println!("\n🧹 Normalizar rutas:");
    println!("   - Original: {}", MESSY_PATH);
    println!("   - Normalizada: {}", normalize(Path::new(MESSY_PATH)).display());

    let from = "/usuarios/proyecto/src";
    let to = "/usuarios/proyecto/lib/utils.rs";
    println!("\n🔗 Rutas relativas:");
    println!("   - Desde: {}", from);
    println!("   - Hasta: {}", to);
    println!("   - Relativa: {}", relative(Path::new(from), Path::new(to)).display());

    println!("\n📋 Información del sistema:");
    println!("   - Separador: {}", MAIN_SEPARATOR);
    println!("   - Delimitador: {}", PATH_DELIMITER);
    println!("   - Formato: {}", Platform::current());
}
