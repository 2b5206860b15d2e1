//! # Listado de directorio
//! src/probes/listing.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "directorio")]
    Directory,
    #[serde(rename = "archivo")]
    File,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Directory => "directorio",
            EntryKind::File => "archivo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: EntryKind,
    /// Bytes; 0 para directorios
    #[serde(rename = "tamano")]
    pub size: u64,
    /// RFC 3339 en UTC con milisegundos
    #[serde(rename = "modificado")]
    pub modified: String,
}

/// Lista `dir` sin recursión. Las entradas ilegibles se saltan y un
/// directorio ilegible da una lista vacía.
pub fn list_directory(dir: &Path) -> Vec<DirEntry> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("No se pudo listar {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut listing: Vec<DirEntry> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let metadata = fs::metadata(entry.path()).ok()?;
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            Some(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: if metadata.is_file() { metadata.len() } else { 0 },
                modified: metadata
                    .modified()
                    .map(iso_timestamp)
                    .unwrap_or_else(|_| "N/A".to_string()),
                kind,
            })
        })
        .collect();

    // read_dir no garantiza orden
    listing.sort_by(|a, b| a.name.cmp(&b.name));
    listing
}

/// `2024-03-01T12:30:00.123Z`
pub fn iso_timestamp(time: std::time::SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_list_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "hola").unwrap();
        fs::create_dir(dir.path().join("a_dir")).unwrap();

        let listing = list_directory(dir.path());

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name, "a_dir");
        assert_eq!(listing[0].kind, EntryKind::Directory);
        assert_eq!(listing[0].size, 0);
        assert_eq!(listing[1].kind, EntryKind::File);
        assert_eq!(listing[1].size, 4);
        assert!(listing[1].modified.ends_with('Z'));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_directory(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_iso_timestamp() {
        let time = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        assert_eq!(iso_timestamp(time), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_serialized_keys() {
        let entry = DirEntry {
            name: "x".into(),
            kind: EntryKind::File,
            size: 1,
            modified: "N/A".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["tipo"], "archivo");
        assert_eq!(json["tamano"], 1);
    }
}
