//! # Detección de aplicaciones
//! src/probes/apps.rs
//!
//! Traduce el nombre de un proceso (y su ruta completa) a la aplicación a la
//! que pertenece, para que la tabla de "Top procesos" sea legible.

use regex::Regex;
use std::sync::OnceLock;

/// Substring del nombre (en minúsculas) → aplicación. Gana la primera.
const KNOWN_APPLICATIONS: &[(&str, &str)] = &[
    // Navegadores
    ("chrome", "Google Chrome"),
    ("chromium", "Chromium"),
    ("safari", "Safari"),
    ("edge", "Microsoft Edge"),
    ("opera", "Opera"),
    ("brave", "Brave Browser"),
    // Editores / IDEs
    ("code", "Visual Studio Code"),
    ("vscode", "Visual Studio Code"),
    ("sublime", "Sublime Text"),
    ("atom", "Atom Editor"),
    ("vim", "Vim"),
    ("emacs", "Emacs"),
    ("intellij", "IntelliJ IDEA"),
    ("pycharm", "PyCharm"),
    ("webstorm", "WebStorm"),
    // Desarrollo
    ("node", "Node.js"),
    ("python", "Python"),
    ("java", "Java"),
    ("docker", "Docker"),
    ("postgres", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("redis", "Redis"),
    ("nginx", "Nginx"),
    ("apache", "Apache"),
    // Comunicación
    ("slack", "Slack"),
    ("discord", "Discord"),
    ("teams", "Microsoft Teams"),
    ("zoom", "Zoom"),
    ("skype", "Skype"),
    // Sistema
    ("finder", "Finder"),
    ("explorer", "Windows Explorer"),
    ("windowserver", "Window Server (macOS)"),
    ("kernel_task", "Kernel (macOS)"),
    ("systemd", "Systemd (Linux)"),
    ("svchost", "Windows Service Host"),
    ("dwm", "Desktop Window Manager"),
    // Otros
    ("spotify", "Spotify"),
    ("itunes", "iTunes"),
    ("terminal", "Terminal"),
    ("iterm", "iTerm2"),
    ("wsl", "Windows Subsystem for Linux"),
];

fn mac_app_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"applications/([^/]+)\.app").expect("regex válida"))
}

/// Nombre legible de la aplicación dueña de un proceso
///
/// ```
/// use monitor_dashboard::probes::apps::detect_application;
///
/// assert_eq!(detect_application("redis-server", "/usr/bin/redis-server"), "Redis");
/// assert_eq!(detect_application("mydaemon", "/opt/mydaemon"), "Mydaemon");
/// ```
pub fn detect_application(process_name: &str, full_path: &str) -> String {
    let name = process_name.to_lowercase();
    let path = full_path.to_lowercase();

    if name.contains("plugin-container") || name.contains("plugincontainer") {
        return "Firefox Plugin Container".to_string();
    }
    if name.contains("firefox") || path.contains("firefox") {
        return "Mozilla Firefox".to_string();
    }

    if name == "visual"
        || name.starts_with("visual ")
        || path.contains("visual studio code")
        || path.contains("vscode")
        || path.contains("code.app")
        || path.contains("electron")
    {
        return "Visual Studio Code".to_string();
    }

    if name.contains("chrome helper") || name.contains("chromehelper") {
        return "Chrome Helper".to_string();
    }

    if let Some((_, app)) = KNOWN_APPLICATIONS.iter().find(|(key, _)| name.contains(key)) {
        return app.to_string();
    }

    if let Some(caps) = mac_app_regex().captures(&path) {
        return caps[1]
            .replace('-', " ")
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
    }

    capitalize(process_name)
}

/// Primera letra en mayúscula, el resto intacto
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
