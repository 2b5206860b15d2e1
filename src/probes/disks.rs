//! # Discos
//! src/probes/disks.rs
//!
//! Uso de los discos montados según `df -h` (o `wmic` en Windows).

use super::command::CommandRunner;
use super::platform::Platform;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;

const DF_TIMEOUT: Duration = Duration::from_millis(3000);
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    #[serde(rename = "dispositivo")]
    pub device: String,
    #[serde(rename = "tamano")]
    pub size: String,
    #[serde(rename = "usado")]
    pub used: String,
    #[serde(rename = "disponible")]
    pub available: String,
    #[serde(rename = "porcentajeUso")]
    pub use_percent: String,
    #[serde(rename = "montaje")]
    pub mount: String,
}

impl DiskUsage {
    fn placeholder(device: &str, mount: &str) -> Self {
        Self {
            device: device.to_string(),
            size: "N/A".to_string(),
            used: "N/A".to_string(),
            available: "N/A".to_string(),
            use_percent: "N/A".to_string(),
            mount: mount.to_string(),
        }
    }

    /// Porcentaje de uso como número (0 si no se puede leer)
    pub fn percent_value(&self) -> f64 {
        self.use_percent
            .trim_end_matches('%')
            .trim()
            .parse()
            .unwrap_or(0.0)
    }
}

/// Nunca devuelve una lista vacía: en el peor caso hay una fila de error
pub fn disk_usage(runner: &dyn CommandRunner, platform: &Platform) -> Vec<DiskUsage> {
    let disks = match platform {
        Platform::MacOs | Platform::Linux => {
            let root = runner.run("df", &["-h", "/"], DF_TIMEOUT);
            let Some(root_out) = root.stdout_if_ok() else {
                log::warn!("df -h / falló: {}", root.stderr.trim());
                return vec![DiskUsage::placeholder("Error", "Error al obtener información")];
            };

            let mut disks: Vec<DiskUsage> = root_out
                .lines()
                .nth(1)
                .and_then(|line| parse_df_line(line, "/"))
                .into_iter()
                .collect();

            if let Some(all) = runner.run("df", &["-h"], DF_TIMEOUT).stdout_if_ok() {
                disks.extend(
                    all.lines()
                        .filter(|l| l.starts_with("/dev"))
                        .skip(1)
                        .filter_map(|line| parse_df_line(line, "N/A")),
                );
            }
            disks
        }
        Platform::Windows => {
            let out = runner.run(
                "wmic",
                &["logicaldisk", "get", "caption,size,freespace,volumename"],
                DF_TIMEOUT,
            );
            match out.stdout_if_ok() {
                Some(stdout) => parse_wmic_logicaldisk(stdout),
                None => return vec![DiskUsage::placeholder("Error", "Error al obtener información")],
            }
        }
        Platform::Other(_) => Vec::new(),
    };

    if disks.is_empty() {
        vec![DiskUsage::placeholder("N/A", "N/A")]
    } else {
        disks
    }
}

/// Una fila de `df -h`; `None` si tiene menos de 5 columnas
pub fn parse_df_line(line: &str, default_mount: &str) -> Option<DiskUsage> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return None;
    }
    Some(DiskUsage {
        device: fields[0].to_string(),
        size: fields[1].to_string(),
        used: fields[2].to_string(),
        available: fields[3].to_string(),
        use_percent: fields[4].to_string(),
        mount: fields.get(5).unwrap_or(&default_mount).to_string(),
    })
}

/// Columnas de wmic: Caption FreeSpace Size VolumeName
pub fn parse_wmic_logicaldisk(output: &str) -> Vec<DiskUsage> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                return None;
            }
            let free: u64 = fields[1].parse().unwrap_or(0);
            let size: u64 = fields[2].parse().unwrap_or(0);
            let used = size.saturating_sub(free);
            let percent = if size > 0 {
                format!("{:.1}%", used as f64 / size as f64 * 100.0)
            } else {
                "0%".to_string()
            };

            Some(DiskUsage {
                device: fields[0].to_string(),
                size: format!("{:.2} GB", size as f64 / GB),
                used: format!("{:.2} GB", used as f64 / GB),
                available: format!("{:.2} GB", free as f64 / GB),
                use_percent: percent,
                mount: fields
                    .get(3)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "Local Disk".to_string()),
            })
        })
        .collect()
}

fn size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9.]+)([BKMGT])").expect("regex válida"))
}

/// Tamaño legible (`1.5G`, `820M`) a bytes, base 1024; 0 si no se entiende
///
/// ```
/// use monitor_dashboard::probes::disks::parse_size;
///
/// assert_eq!(parse_size("2K"), 2048.0);
/// assert_eq!(parse_size("?"), 0.0);
/// ```
pub fn parse_size(size: &str) -> f64 {
    let Some(caps) = size_regex().captures(size) else {
        return 0.0;
    };
    let value: f64 = caps[1].parse().unwrap_or(0.0);
    let multiplier = match &caps[2] {
        "B" => 1.0,
        "K" => 1024.0,
        "M" => 1024.0 * 1024.0,
        "G" => GB,
        "T" => GB * 1024.0,
        _ => 0.0,
    };
    value * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::command::FakeRunner;

    const DF_ROOT: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/nvme0n1p2  468G  201G  244G  46% /
";

    const DF_ALL: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
tmpfs           3.2G  2.1M  3.2G   1% /run
/dev/nvme0n1p2  468G  201G  244G  46% /
/dev/nvme0n1p1  511M  6.1M  505M   2% /boot/efi
/dev/sda1       1.8T  1.5T  300G  84% /media/backup
";

    #[test]
    fn test_linux_root_plus_extra_devices() {
        let runner = FakeRunner::new()
            .with_output("df -h /", DF_ROOT)
            .with_output("df -h", DF_ALL);

        let disks = disk_usage(&runner, &Platform::Linux);

        assert_eq!(disks.len(), 3);
        assert_eq!(disks[0].device, "/dev/nvme0n1p2");
        assert_eq!(disks[0].use_percent, "46%");
        assert_eq!(disks[1].mount, "/boot/efi");
        assert_eq!(disks[2].percent_value(), 84.0);
    }

    #[test]
    fn test_extra_listing_failure_is_ignored() {
        let runner = FakeRunner::new().with_output("df -h /", DF_ROOT);
        let disks = disk_usage(&runner, &Platform::MacOs);
        assert_eq!(disks.len(), 1);
    }

    #[test]
    fn test_df_failure_gives_error_row() {
        let disks = disk_usage(&FakeRunner::new(), &Platform::Linux);
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].device, "Error");
        assert_eq!(disks[0].mount, "Error al obtener información");
    }

    #[test]
    fn test_empty_result_gives_na_row() {
        let runner = FakeRunner::new().with_output("df -h /", "Filesystem Size\n");
        let disks = disk_usage(&runner, &Platform::Linux);
        assert_eq!(disks, vec![DiskUsage::placeholder("N/A", "N/A")]);
    }

    #[test]
    fn test_parse_df_line_default_mount() {
        let disk = parse_df_line("/dev/disk1s1 466Gi 20Gi 300Gi 7%", "/").unwrap();
        assert_eq!(disk.mount, "/");
        assert!(parse_df_line("short line", "/").is_none());
    }

    #[test]
    fn test_parse_wmic_logicaldisk() {
        let output = "Caption  FreeSpace     Size           VolumeName\r\n\
                      C:       107374182400  536870912000   Windows\r\n\
                      D:       0             0\r\n";
        let disks = parse_wmic_logicaldisk(output);

        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].size, "500.00 GB");
        assert_eq!(disks[0].available, "100.00 GB");
        assert_eq!(disks[0].use_percent, "80.0%");
        assert_eq!(disks[0].mount, "Windows");
        assert_eq!(disks[1].use_percent, "0%");
        assert_eq!(disks[1].mount, "Local Disk");
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1.5G"), 1.5 * GB);
        assert_eq!(parse_size("820M"), 820.0 * 1024.0 * 1024.0);
        assert_eq!(parse_size("0B"), 0.0);
        assert_eq!(parse_size("12Ki"), 12.0 * 1024.0);
        assert_eq!(parse_size("nada"), 0.0);
    }

    #[test]
    fn test_serialized_keys() {
        let disk = parse_df_line(DF_ROOT.lines().nth(1).unwrap(), "/").unwrap();
        let json = serde_json::to_value(&disk).unwrap();
        assert_eq!(json["porcentajeUso"], "46%");
        assert_eq!(json["montaje"], "/");
    }
}
