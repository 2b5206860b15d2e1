//! # Análisis de espacio
//! src/probes/space.rs
//!
//! Busca qué ocupa el disco del usuario: carpetas del home más pesadas,
//! archivos de más de 2 GB y cachés conocidos. Usa `du` y `find`, que pueden
//! tardar varios segundos en homes grandes, por eso el servidor permite
//! desactivarlo con `--no-space-scan`.

use super::command::CommandRunner;
use super::disks::parse_size;
use super::platform::Platform;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const DU_TIMEOUT: Duration = Duration::from_millis(3000);
const FIND_TIMEOUT: Duration = Duration::from_millis(10000);
const TOP_FOLDERS: usize = 5;
const MAX_BIG_FILES: usize = 10;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Cachés que se revisan, relativos al home
pub const CACHE_DIRS: &[&str] = &[
    "Library/Caches",
    ".cache",
    ".npm",
    ".yarn/cache",
    ".cargo",
    "Library/Application Support/Code/CachedData",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceEntry {
    #[serde(rename = "ruta")]
    pub path: String,
    #[serde(rename = "tamano")]
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpaceReport {
    #[serde(rename = "archivosPesados")]
    pub big_files: Vec<SpaceEntry>,
    #[serde(rename = "carpetasPesadas")]
    pub heavy_folders: Vec<SpaceEntry>,
    #[serde(rename = "cachesPesados")]
    pub heavy_caches: Vec<SpaceEntry>,
}

impl SpaceReport {
    pub fn is_empty(&self) -> bool {
        self.big_files.is_empty() && self.heavy_folders.is_empty() && self.heavy_caches.is_empty()
    }
}

pub fn analyze_space(runner: &dyn CommandRunner, platform: &Platform, home: &Path) -> SpaceReport {
    match platform {
        Platform::MacOs | Platform::Linux => {
            let report = SpaceReport {
                heavy_folders: heavy_folders(runner, home),
                big_files: big_files(runner, home),
                heavy_caches: heavy_caches(runner, home),
            };
            log::debug!(
                "Análisis de espacio: {} carpetas, {} archivos, {} cachés",
                report.heavy_folders.len(),
                report.big_files.len(),
                report.heavy_caches.len()
            );
            report
        }
        Platform::Windows => SpaceReport {
            big_files: windows_big_files(runner, home),
            ..SpaceReport::default()
        },
        Platform::Other(_) => SpaceReport::default(),
    }
}

/// Tamaño legible que reporta `du -sh`
fn du_size(runner: &dyn CommandRunner, path: &Path) -> Option<String> {
    let path = path.to_string_lossy();
    let out = runner.run("du", &["-sh", &*path], DU_TIMEOUT);
    out.stdout_if_ok()?
        .trim()
        .split('\t')
        .next()
        .map(|size| size.trim().to_string())
        .filter(|size| !size.is_empty())
}

/// Las 5 carpetas no ocultas más pesadas directamente bajo el home
pub fn heavy_folders(runner: &dyn CommandRunner, home: &Path) -> Vec<SpaceEntry> {
    let entries = match fs::read_dir(home) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("No se pudo listar {}: {}", home.display(), e);
            return Vec::new();
        }
    };

    let mut sized: Vec<(String, String, f64)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let size = du_size(runner, &entry.path())?;
            let bytes = parse_size(&size);
            Some((name, size, bytes))
        })
        .collect();

    sized.sort_by(|a, b| b.2.total_cmp(&a.2));
    sized
        .into_iter()
        .take(TOP_FOLDERS)
        .map(|(name, size, _)| SpaceEntry {
            path: format!("~/{}", name),
            size,
        })
        .collect()
}

/// Archivos de más de 2 GB hasta 3 niveles bajo el home
pub fn big_files(runner: &dyn CommandRunner, home: &Path) -> Vec<SpaceEntry> {
    let home_str = home.to_string_lossy();
    let out = runner.run(
        "find",
        &[&*home_str, "-maxdepth", "3", "-type", "f", "-size", "+2G"],
        FIND_TIMEOUT,
    );

    // find devuelve != 0 ante un solo directorio sin permisos, así que se usa
    // lo que haya llegado a stdout
    out.stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(MAX_BIG_FILES)
        .filter_map(|line| {
            let size = fs::metadata(line).ok()?.len();
            Some(SpaceEntry {
                path: tilde(line, &home_str),
                size: format!("{:.2} GB", size as f64 / GB),
            })
        })
        .collect()
}

/// Cachés de la lista fija que existen y no están vacíos
pub fn heavy_caches(runner: &dyn CommandRunner, home: &Path) -> Vec<SpaceEntry> {
    let home_str = home.to_string_lossy();
    CACHE_DIRS
        .iter()
        .map(|rel| home.join(rel))
        .filter(|path| path.exists())
        .filter_map(|path| {
            let size = du_size(runner, &path)?;
            if size == "0B" || size == "0" {
                return None;
            }
            Some(SpaceEntry {
                path: tilde(&path.to_string_lossy(), &home_str),
                size,
            })
        })
        .collect()
}

fn windows_big_files(runner: &dyn CommandRunner, home: &Path) -> Vec<SpaceEntry> {
    let home_str = home.to_string_lossy();
    let out = runner.run(
        "forfiles",
        &[
            "/P",
            &*home_str,
            "/S",
            "/M",
            "*.*",
            "/C",
            "cmd /c if @fsize GEQ 2147483648 echo @path @fsize",
        ],
        FIND_TIMEOUT,
    );
    parse_forfiles(&out.stdout)
}

/// Líneas `"C:\ruta\archivo.iso" 4294967296`
pub fn parse_forfiles(output: &str) -> Vec<SpaceEntry> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(MAX_BIG_FILES)
        .filter_map(|line| {
            let (path, size) = line.rsplit_once(' ')?;
            let bytes: u64 = size.trim().parse().ok()?;
            Some(SpaceEntry {
                path: path.trim().trim_matches('"').to_string(),
                size: format!("{:.2} GB", bytes as f64 / GB),
            })
        })
        .collect()
}

/// Reemplaza el prefijo del home por `~`
fn tilde(path: &str, home: &str) -> String {
    match path.strip_prefix(home) {
        Some(rest) if !home.is_empty() => format!("~{}", rest),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::command::FakeRunner;

    fn du_key(path: &Path) -> String {
        format!("du -sh {}", path.display())
    }

    #[test]
    fn test_heavy_folders_sorted_and_hidden_skipped() {
        let home = tempfile::tempdir().unwrap();
        for name in ["Documents", "Music", "Videos", ".config"] {
            fs::create_dir(home.path().join(name)).unwrap();
        }
        fs::write(home.path().join("notes.txt"), "x").unwrap();

        let runner = FakeRunner::new()
            .with_output(&du_key(&home.path().join("Documents")), "820M\t/x/Documents\n")
            .with_output(&du_key(&home.path().join("Music")), "1.5G\t/x/Music\n")
            .with_output(&du_key(&home.path().join(".config")), "9G\t/x/.config\n");

        let folders = heavy_folders(&runner, home.path());

        assert_eq!(
            folders,
            vec![
                SpaceEntry { path: "~/Music".into(), size: "1.5G".into() },
                SpaceEntry { path: "~/Documents".into(), size: "820M".into() },
            ]
        );
    }

    #[test]
    fn test_heavy_caches_drops_empty() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join(".cache")).unwrap();
        fs::create_dir_all(home.path().join(".npm")).unwrap();

        let runner = FakeRunner::new()
            .with_output(&du_key(&home.path().join(".cache")), "2.3G\t.cache\n")
            .with_output(&du_key(&home.path().join(".npm")), "0B\t.npm\n");

        let caches = heavy_caches(&runner, home.path());

        assert_eq!(caches, vec![SpaceEntry { path: "~/.cache".into(), size: "2.3G".into() }]);
    }

    #[test]
    fn test_big_files_skips_missing() {
        let home = tempfile::tempdir().unwrap();
        let file = home.path().join("disk.img");
        fs::write(&file, vec![0u8; 1024]).unwrap();

        let listing = format!("{}\n{}/gone.iso\n", file.display(), home.path().display());
        let key = format!("find {} -maxdepth 3 -type f -size +2G", home.path().display());
        let runner = FakeRunner::new().with_output(&key, &listing);

        let files = big_files(&runner, home.path());

        assert_eq!(files, vec![SpaceEntry { path: "~/disk.img".into(), size: "0.00 GB".into() }]);
    }

    #[test]
    fn test_parse_forfiles() {
        let output = "\r\n\"C:\\Users\\ana\\win11.iso\" 5368709120\r\n\"C:\\Users\\ana\\bad\" x\r\n";
        let files = parse_forfiles(output);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "C:\\Users\\ana\\win11.iso");
        assert_eq!(files[0].size, "5.00 GB");
    }

    #[test]
    fn test_other_platform_is_empty() {
        let report = analyze_space(&FakeRunner::new(), &Platform::Other("aix".into()), Path::new("/"));
        assert!(report.is_empty());
    }

    #[test]
    fn test_tilde() {
        assert_eq!(tilde("/home/ana/big.iso", "/home/ana"), "~/big.iso");
        assert_eq!(tilde("/srv/big.iso", "/home/ana"), "/srv/big.iso");
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(SpaceReport::default()).unwrap();
        assert!(json["archivosPesados"].is_array());
        assert!(json["carpetasPesadas"].is_array());
        assert!(json["cachesPesados"].is_array());
    }
}
