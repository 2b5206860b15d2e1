//! # Versión del sistema operativo
//! src/probes/os_version.rs

use super::command::CommandRunner;
use super::host::HostInfo;
use super::platform::Platform;
use std::path::Path;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(2000);

/// Nombre comercial y versión del SO, p. ej. `macOS 14.4 (Build 23E214)`
pub fn os_version(
    runner: &dyn CommandRunner,
    platform: &Platform,
    host: &HostInfo,
    os_release: &Path,
) -> String {
    let fallback = || format!("{} {}", host.os_type, host.kernel);

    match platform {
        Platform::MacOs => {
            let field = |flag: &str| {
                runner
                    .run("sw_vers", &[flag], TIMEOUT)
                    .stdout_if_ok()
                    .map(|s| s.trim().to_string())
            };
            match (field("-productName"), field("-productVersion"), field("-buildVersion")) {
                (Some(name), Some(version), Some(build)) => {
                    format!("{} {} (Build {})", name, version, build)
                }
                _ => fallback(),
            }
        }
        Platform::Linux => match std::fs::read_to_string(os_release) {
            Ok(content) => parse_pretty_name(&content).unwrap_or_else(fallback),
            Err(e) => {
                log::debug!("No se pudo leer {}: {}", os_release.display(), e);
                format!("Linux {}", host.kernel)
            }
        },
        Platform::Windows => runner
            .run("wmic", &["os", "get", "Caption,Version", "/value"], TIMEOUT)
            .stdout_if_ok()
            .and_then(parse_wmic_os)
            .unwrap_or_else(fallback),
        Platform::Other(_) => fallback(),
    }
}

/// `PRETTY_NAME="Ubuntu 22.04.4 LTS"` → `Ubuntu 22.04.4 LTS`
pub fn parse_pretty_name(os_release: &str) -> Option<String> {
    os_release.lines().find_map(|line| {
        let value = line.strip_prefix("PRETTY_NAME=")?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Salida `key=value` de `wmic ... /value`
pub fn parse_wmic_os(output: &str) -> Option<String> {
    let value_of = |key: &str| {
        output.lines().find_map(|line| {
            line.trim()
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|v| v.trim().to_string())
        })
    };
    let caption = value_of("Caption")?;
    let version = value_of("Version")?;
    Some(format!("{} ({})", caption, version))
}
