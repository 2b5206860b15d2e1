//! # Top procesos por memoria
//! src/probes/processes.rs
//!
//! Los cinco procesos que más memoria usan, sacados de `ps aux` (o de
//! PowerShell en Windows). Si el comando falla la lista queda vacía.

use super::apps::detect_application;
use super::command::CommandRunner;
use super::platform::Platform;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

const PS_TIMEOUT: Duration = Duration::from_millis(2000);
const TOP: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessEntry {
    #[serde(rename = "nombre")]
    pub name: String,

    pub extension: String,

    #[serde(rename = "aplicacion")]
    pub application: String,

    #[serde(rename = "memoria")]
    pub memory: String,

    /// %MEM, solo disponible con `ps aux`
    #[serde(rename = "porcentaje", skip_serializing_if = "Option::is_none")]
    pub percent: Option<String>,
}

pub fn top_processes(runner: &dyn CommandRunner, platform: &Platform) -> Vec<ProcessEntry> {
    match platform {
        Platform::Linux => {
            let out = runner.run("ps", &["aux", "--sort=-%mem"], PS_TIMEOUT);
            match out.stdout_if_ok() {
                Some(stdout) => parse_ps_aux(stdout).into_iter().take(TOP).collect(),
                None => Vec::new(),
            }
        }
        Platform::MacOs => {
            let out = runner.run("ps", &["aux"], PS_TIMEOUT);
            match out.stdout_if_ok() {
                Some(stdout) => top_by_mem_percent(parse_ps_aux(stdout)),
                None => Vec::new(),
            }
        }
        Platform::Windows => {
            let script = "Get-Process | Sort-Object WS -Descending | Select-Object -First 5 Name,WS,Path | Format-Table -AutoSize";
            let out = runner.run("powershell", &["-Command", script], PS_TIMEOUT);
            match out.stdout_if_ok() {
                Some(stdout) => parse_powershell(stdout),
                None => Vec::new(),
            }
        }
        Platform::Other(_) => Vec::new(),
    }
}

/// Parsea `ps aux`; la cabecera y las líneas cortas se descartan
pub fn parse_ps_aux(output: &str) -> Vec<ProcessEntry> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 11 {
                return None;
            }

            let full_path = fields[10];
            let rss_kb: f64 = fields[5].parse().ok()?;
            let name = full_path.rsplit('/').next().unwrap_or(full_path).to_string();

            Some(ProcessEntry {
                extension: classify_extension(&name, full_path),
                application: detect_application(&name, full_path),
                memory: format!("{:.2} MB", rss_kb / 1024.0),
                percent: Some(format!("{}%", fields[3])),
                name,
            })
        })
        .collect()
}

/// Orden descendente por %MEM, para el `ps` de BSD que no tiene `--sort`
fn top_by_mem_percent(mut entries: Vec<ProcessEntry>) -> Vec<ProcessEntry> {
    let mem = |e: &ProcessEntry| {
        e.percent
            .as_deref()
            .and_then(|p| p.trim_end_matches('%').parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    entries.sort_by(|a, b| mem(b).total_cmp(&mem(a)));
    entries.truncate(TOP);
    entries
}

/// Extensión del ejecutable o, si no tiene, el tipo de proceso
pub fn classify_extension(name: &str, full_path: &str) -> String {
    if let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) {
        return format!(".{}", ext);
    }
    if full_path.contains(".app/") {
        ".app".to_string()
    } else if full_path.contains("/bin/") || full_path.contains("/sbin/") {
        "binario".to_string()
    } else {
        "proceso".to_string()
    }
}

/// Parsea la tabla de `Format-Table` (cabecera + separador + filas)
pub fn parse_powershell(output: &str) -> Vec<ProcessEntry> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .skip(2)
        .take(TOP)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                return None;
            }
            let name = fields[0].to_string();
            let full_path = fields[2..].join(" ");
            let ws_bytes: f64 = fields[1].parse().unwrap_or(0.0);
            let extension = Path::new(&name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e))
                .unwrap_or_else(|| "N/A".to_string());

            Some(ProcessEntry {
                extension,
                application: detect_application(&name, &full_path),
                memory: format!("{:.2} MB", ws_bytes / 1024.0 / 1024.0),
                percent: None,
                name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::command::FakeRunner;

    const PS_LINUX: &str = "\
USER         PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND
alice       2211  3.1 12.4 4213820 1015808 ?     Sl   09:12   4:01 /usr/lib/firefox/firefox -contentproc
postgres     811  0.0  2.1 215000 172032 ?       Ss   08:00   0:03 /usr/lib/postgresql/14/bin/postgres -D /var/lib
alice       3001  0.5  1.0 900000  81920 pts/0   Sl+  10:00   0:10 node server.js
root           1  0.0  0.1 168000  12288 ?       Ss   08:00   0:02 /sbin/init splash
root         400  0.0  0.1  50000   8192 ?       Ss   08:00   0:00 /usr/lib/systemd/systemd-journald
root         500  0.0  0.0  10000   4096 ?       S    08:00   0:00 cron
";

    const PS_MAC: &str = "\
USER   PID  %CPU %MEM      VSZ    RSS   TT  STAT STARTED      TIME COMMAND
ana    120   0.1  0.5  4000000  40960   ??  S    9:00AM   0:01.00 /System/Library/CoreServices/Finder.app/Contents/MacOS/Finder
ana    300   5.0  8.2  9000000 671744   ??  S    9:00AM   3:00.00 /Applications/Slack.app/Contents/MacOS/Slack
_windowserver 150 2.0 3.3 8000000 270336 ?? Ss 9:00AM 10:00.00 /System/Library/PrivateFrameworks/SkyLight.framework/Resources/WindowServer
";

    const POWERSHELL: &str = "
Name            WS Path
----            -- ----
chrome   524288000 C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe
Code     314572800 C:\\Users\\ana\\AppData\\Local\\Programs\\Microsoft VS Code\\Code.exe
svchost   52428800
";

    #[test]
    fn test_parse_ps_aux_linux() {
        let entries = parse_ps_aux(PS_LINUX);

        assert_eq!(entries.len(), 6);
        let firefox = &entries[0];
        assert_eq!(firefox.name, "firefox");
        assert_eq!(firefox.application, "Mozilla Firefox");
        assert_eq!(firefox.memory, "992.00 MB");
        assert_eq!(firefox.percent.as_deref(), Some("12.4%"));
        assert_eq!(firefox.extension, "proceso");

        assert_eq!(entries[1].extension, "binario");
        assert_eq!(entries[1].application, "PostgreSQL");
        assert_eq!(entries[2].application, "Node.js");
        assert_eq!(entries[3].extension, "binario");
    }

    #[test]
    fn test_extension_rules() {
        assert_eq!(classify_extension("script.sh", "/home/a/script.sh"), ".sh");
        assert_eq!(classify_extension("Slack", "/Applications/Slack.app/Contents/MacOS/Slack"), ".app");
        assert_eq!(classify_extension("sshd", "/usr/sbin/sshd"), "binario");
        assert_eq!(classify_extension("cron", "cron"), "proceso");
    }

    #[test]
    fn test_linux_top_five() {
        let runner = FakeRunner::new().with_output("ps aux --sort=-%mem", PS_LINUX);
        let top = top_processes(&runner, &Platform::Linux);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "firefox");
        assert_eq!(top[4].name, "systemd-journald");
    }

    #[test]
    fn test_macos_sorted_in_process() {
        let runner = FakeRunner::new().with_output("ps aux", PS_MAC);
        let top = top_processes(&runner, &Platform::MacOs);

        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Slack", "WindowServer", "Finder"]);
        assert_eq!(top[0].application, "Slack");
        assert_eq!(top[1].application, "Window Server (macOS)");
    }

    #[test]
    fn test_parse_powershell() {
        let entries = parse_powershell(POWERSHELL);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "chrome");
        assert_eq!(entries[0].memory, "500.00 MB");
        assert_eq!(entries[0].extension, "N/A");
        assert_eq!(entries[0].application, "Google Chrome");
        assert_eq!(entries[1].application, "Visual Studio Code");
        assert_eq!(entries[2].memory, "50.00 MB");
        assert!(entries[2].percent.is_none());
    }

    #[test]
    fn test_command_failure_is_empty() {
        let runner = FakeRunner::new().with_failure("ps aux --sort=-%mem", "boom");
        assert!(top_processes(&runner, &Platform::Linux).is_empty());
        assert!(top_processes(&runner, &Platform::Other("aix".into())).is_empty());
    }

    #[test]
    fn test_serialized_keys() {
        let entry = &parse_ps_aux(PS_LINUX)[0];
        let json = serde_json::to_value(entry).unwrap();

        assert_eq!(json["nombre"], "firefox");
        assert_eq!(json["aplicacion"], "Mozilla Firefox");
        assert_eq!(json["porcentaje"], "12.4%");
    }
}
