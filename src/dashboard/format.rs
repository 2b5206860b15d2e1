//! # Formato de valores para el HTML
//! src/dashboard/format.rs

pub const RED: &str = "#dc3545";
pub const AMBER: &str = "#ffc107";
pub const GREEN: &str = "#28a745";

/// Escapa `& < > " '` para interpolar texto en HTML
///
/// ```
/// use monitor_dashboard::dashboard::format::escape_html;
///
/// assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Número inicial de un texto como `"46%"` o `"12.5%"`; 0 si no hay
pub fn leading_number(text: &str) -> f64 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0.0)
}

/// Color del uso de un núcleo: >80 rojo, >50 ámbar
pub fn core_usage_color(usage: &str) -> &'static str {
    threshold_color(leading_number(usage), 50.0)
}

/// Color del uso de un disco: >80 rojo, >60 ámbar
pub fn disk_usage_color(usage: &str) -> &'static str {
    threshold_color(leading_number(usage), 60.0)
}

fn threshold_color(value: f64, amber_above: f64) -> &'static str {
    if value > 80.0 {
        RED
    } else if value > amber_above {
        AMBER
    } else {
        GREEN
    }
}

/// Ancho CSS de la barra de uso, acotado a 0..100
pub fn bar_width(usage: &str) -> String {
    format!("{}%", leading_number(usage).clamp(0.0, 100.0))
}

/// `3725` → `1h 2m`
pub fn hours_minutes(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

pub fn kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}
