//! # Demo: sistema de archivos
//! src/demos/fs.rs
//!
//! Crear directorio, escribir, leer, agregar, volver a leer, `stat` y hash
//! SHA-256 del resultado. Todo se borra al final.

use crate::error::Result;
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub const FILE_NAME: &str = "ejemplo.txt";
pub const INITIAL_CONTENT: &str = "Hola desde Rust usando std::fs!\n";
pub const APPENDED_CONTENT: &str = "Línea adicional agregada.\n";

/// Lo que devuelve `stat` sobre el archivo de ejemplo
#[derive(Debug, Clone)]
pub struct FileReport {
    pub size: u64,
    /// No todos los sistemas de archivos guardan la fecha de creación
    pub created: Option<String>,
    pub is_file: bool,
    pub is_dir: bool,
    pub sha256: String,
    pub content: String,
}

/// Hash SHA-256 en hexadecimal
///
/// ```
/// use monitor_dashboard::demos::fs::sha256_hex;
///
/// assert_eq!(
///     sha256_hex(b"abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Ejecuta los pasos dentro de `dir` (que se crea si no existe) y limpia
pub fn walkthrough(dir: &Path) -> Result<FileReport> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        println!("✅ Directorio \"{}\" creado", dir.display());
    }

    let file_path = dir.join(FILE_NAME);
    fs::write(&file_path, INITIAL_CONTENT)?;
    println!("✅ Archivo \"{}\" creado", FILE_NAME);

    let content = fs::read_to_string(&file_path)?;
    println!("📖 Contenido del archivo: {}", content);

    {
        use std::io::Write;
        let mut file = fs::OpenOptions::new().append(true).open(&file_path)?;
        file.write_all(APPENDED_CONTENT.as_bytes())?;
    }
    println!("✅ Contenido agregado al archivo");

    let content = fs::read_to_string(&file_path)?;
    println!("📖 Contenido final:\n {}", content);

    let metadata = fs::metadata(&file_path)?;
    let report = FileReport {
        size: metadata.len(),
        created: metadata
            .created()
            .ok()
            .map(|t| DateTime::<Local>::from(t).to_rfc2822()),
        is_file: metadata.is_file(),
        is_dir: metadata.is_dir(),
        sha256: sha256_hex(content.as_bytes()),
        content,
    };

    println!("📊 Información del archivo:");
    println!("   - Tamaño: {} bytes", report.size);
    println!("   - Creado: {}", report.created.as_deref().unwrap_or("no disponible"));
    println!("   - Es archivo: {}", report.is_file);
    println!("   - Es directorio: {}", report.is_dir);
    println!("   - SHA-256: {}", report.sha256);

    fs::remove_file(&file_path)?;
    fs::remove_dir(dir)?;
    println!("\n🧹 Archivos temporales eliminados");

    Ok(report)
}

pub fn run() -> Result<()> {
    println!("=== Módulo fs (File System) ===\n");
    let dir = std::env::temp_dir().join(format!("monitor-fs-{}", std::process::id()));
    walkthrough(&dir).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough_reports_and_cleans_up() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("temp");

        let report = walkthrough(&dir).unwrap();
        let expected = format!("{}{}", INITIAL_CONTENT, APPENDED_CONTENT);

        assert_eq!(report.content, expected);
        assert_eq!(report.size, expected.len() as u64);
        assert!(report.is_file);
        assert!(!report.is_dir);
        assert_eq!(report.sha256, sha256_hex(expected.as_bytes()));
        assert!(!dir.exists());
    }

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
