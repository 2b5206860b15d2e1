//! # Demo: listar directorios
//! src/demos/ls.rs
//!
//! Equivalentes de `ls`, `ls -l`, `ls -R`, `ls -a`, `ls -lS` y `ls -lt` sobre
//! un directorio, más búsqueda y estadísticas por extensión.

use super::SEPARATOR;
use crate::config::LsArgs;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Carpetas que el listado recursivo no recorre
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];
pub const NO_EXTENSION: &str = "(sin extensión)";

#[derive(Debug, Clone)]
pub struct LsEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: SystemTime,
}

impl LsEntry {
    pub fn icon(&self) -> &'static str {
        if self.is_dir {
            "📁"
        } else {
            "📄"
        }
    }

    /// Extensión con punto, o `None`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirStats {
    pub total: usize,
    pub dirs: usize,
    pub files: usize,
    pub total_size: u64,
    /// De la extensión más frecuente a la menos
    pub by_extension: Vec<(String, usize)>,
}

/// Entradas de `dir` ordenadas por nombre (incluye ocultas)
pub fn entries(dir: &Path) -> io::Result<Vec<LsEntry>> {
    let mut list: Vec<LsEntry> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let metadata = fs::metadata(entry.path()).ok()?;
            Some(LsEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: metadata.is_dir(),
                size: if metadata.is_dir() { 0 } else { metadata.len() },
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            })
        })
        .collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(list)
}

/// ```
/// use monitor_dashboard::demos::ls::format_bytes;
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(2048), "2.00 KB");
/// assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
    }
}

pub fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%d %b %Y, %H:%M").to_string()
}

/// `(directorios, archivos)`
pub fn classify(entries: &[LsEntry]) -> (Vec<&LsEntry>, Vec<&LsEntry>) {
    entries.iter().partition(|e| e.is_dir)
}

/// Árbol indentado hasta `max_level`, sin ocultos ni [`SKIPPED_DIRS`]
pub fn recursive(dir: &Path, level: usize, max_level: usize, out: &mut Vec<String>) {
    if level > max_level {
        return;
    }
    let indent = "  ".repeat(level);

    let list = match entries(dir) {
        Ok(list) => list,
        Err(e) => {
            out.push(format!("{}❌ Error en {}: {}", indent, dir.display(), e));
            return;
        }
    };

    for entry in list {
        if entry.name.starts_with('.') || SKIPPED_DIRS.contains(&entry.name.as_str()) {
            continue;
        }
        if entry.is_dir {
            out.push(format!("{}📁 {}/", indent, entry.name));
            recursive(&dir.join(&entry.name), level + 1, max_level, out);
        } else {
            let icon = match entry.extension().as_deref() {
                Some(".rs") => "📜",
                Some(".json") | Some(".toml") => "📋",
                Some(".md") => "📝",
                _ => "📄",
            };
            out.push(format!("{}{} {}", indent, icon, entry.name));
        }
    }
}

/// Archivos con extensión `ext` (con o sin punto)
pub fn by_extension<'a>(entries: &'a [LsEntry], ext: &str) -> Vec<&'a LsEntry> {
    let wanted = format!(".{}", ext.trim_start_matches('.'));
    entries
        .iter()
        .filter(|e| !e.is_dir && e.extension().as_deref() == Some(wanted.as_str()))
        .collect()
}

/// Archivos de mayor a menor tamaño
pub fn largest(entries: &[LsEntry], limit: usize) -> Vec<&LsEntry> {
    let mut files: Vec<&LsEntry> = entries.iter().filter(|e| !e.is_dir).collect();
    files.sort_by(|a, b| b.size.cmp(&a.size));
    files.truncate(limit);
    files
}

/// Entradas de la más reciente a la más vieja
pub fn most_recent(entries: &[LsEntry], limit: usize) -> Vec<&LsEntry> {
    let mut all: Vec<&LsEntry> = entries.iter().collect();
    all.sort_by(|a, b| b.modified.cmp(&a.modified));
    all.truncate(limit);
    all
}

/// `(visibles, ocultos)`
pub fn hidden(entries: &[LsEntry]) -> (Vec<&LsEntry>, Vec<&LsEntry>) {
    let (hidden, visible): (Vec<&LsEntry>, Vec<&LsEntry>) =
        entries.iter().partition(|e| e.name.starts_with('.'));
    (visible, hidden)
}

/// Nombres que contienen `pattern`, sin distinguir mayúsculas
pub fn search<'a>(entries: &'a [LsEntry], pattern: &str) -> Vec<&'a LsEntry> {
    let pattern = pattern.to_lowercase();
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&pattern))
        .collect()
}

pub fn stats(entries: &[LsEntry]) -> DirStats {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let (dirs, files) = classify(entries);

    for file in &files {
        let ext = file.extension().unwrap_or_else(|| NO_EXTENSION.to_string());
        *counts.entry(ext).or_insert(0) += 1;
    }

    let mut by_extension: Vec<(String, usize)> = counts.into_iter().collect();
    by_extension.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    DirStats {
        total: entries.len(),
        dirs: dirs.len(),
        files: files.len(),
        total_size: files.iter().map(|f| f.size).sum(),
        by_extension,
    }
}

fn section(title: &str) {
    println!("\n{}", SEPARATOR);
    println!("{}\n", title);
}

pub fn run(args: &LsArgs) {
    println!("=== Listar Directorios (comando ls) ===\n");

    let dir = args
        .dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let list = match entries(&dir) {
        Ok(list) => list,
        Err(e) => {
            println!("   ❌ Error al leer directorio {}: {}", dir.display(), e);
            return;
        }
    };

    println!("1️⃣  Listar archivos básico (equivalente a: ls):\n");
    println!("   Directorio: {}\n", dir.display());
    println!("   Total: {} elementos\n", list.len());
    for entry in &list {
        println!("   {}", entry.name);
    }

    section("2️⃣  Listar con detalles (equivalente a: ls -l):");
    println!("   Permisos   Tamaño      Modificado           Nombre");
    println!("   ──────────────────────────────────────────────────────────");
    for entry in &list {
        let kind = if entry.is_dir { 'd' } else { '-' };
        let size = if entry.is_dir {
            "<DIR>".to_string()
        } else {
            format_bytes(entry.size)
        };
        println!(
            "   {}rwxr-xr-x {:<11} {}  {} {}",
            kind,
            size,
            format_date(entry.modified),
            entry.icon(),
            entry.name
        );
    }

    section("3️⃣  Separar archivos y directorios:");
    let (dirs, files) = classify(&list);
    println!("   📁 Directorios ({}):", dirs.len());
    for d in &dirs {
        println!("      • {}", d.name);
    }
    println!("\n   📄 Archivos ({}):", files.len());
    for f in &files {
        println!("      • {}", f.name);
    }

    section("4️⃣  Listar recursivamente (equivalente a: ls -R):");
    println!("   {}/", dir.display());
    let mut tree = Vec::new();
    recursive(&dir, 1, 2, &mut tree);
    for line in tree {
        println!("{}", line);
    }

    section("5️⃣  Filtrar por extensión:");
    let filtered = by_extension(&list, &args.ext);
    println!("   Archivos .{} encontrados: {}\n", args.ext.trim_start_matches('.'), filtered.len());
    for f in filtered {
        println!("   📜 {}", f.name);
    }

    section("6️⃣  Ordenar por tamaño (más grande primero):");
    let top = largest(&list, 10);
    println!("   Top {} archivos más grandes:\n", top.len());
    for (i, f) in top.iter().enumerate() {
        println!("   {}. {:<12} {}", i + 1, format_bytes(f.size), f.name);
    }

    section("7️⃣  Ordenar por fecha de modificación (más reciente primero):");
    let recent = most_recent(&list, 5);
    println!("   Últimos {} elementos modificados:\n", recent.len());
    for (i, e) in recent.iter().enumerate() {
        println!("   {}. {}  {} {}", i + 1, format_date(e.modified), e.icon(), e.name);
    }

    section("8️⃣  Incluir archivos ocultos (equivalente a: ls -a):");
    let (visible, hidden_list) = hidden(&list);
    println!("   Archivos visibles: {}", visible.len());
    println!("   Archivos ocultos: {}\n", hidden_list.len());
    if !hidden_list.is_empty() {
        println!("   Archivos ocultos:");
        for h in hidden_list {
            println!("   🔒 {}", h.name);
        }
    }

    section(&format!("9️⃣  Buscar archivos por patrón (*{}*):", args.search));
    let found = search(&list, &args.search);
    println!("   Archivos que contienen \"{}\": {}\n", args.search, found.len());
    for e in found {
        println!("   {} {}", e.icon(), e.name);
    }

    section("🔟 Estadísticas del directorio:");
    let s = stats(&list);
    println!("   📊 Estadísticas:");
    println!("   • Total de elementos: {}", s.total);
    println!("   • Directorios: {}", s.dirs);
    println!("   • Archivos: {}", s.files);
    println!("   • Tamaño total: {}\n", format_bytes(s.total_size));
    println!("   📈 Archivos por extensión:");
    for (ext, count) in s.by_extension {
        println!("      {}: {}", ext, count);
    }
}
