//! # Sitio HTTP básico
//! src/demos/site.rs
//!
//! Lo que sirve `monitor hello`: dos páginas, un endpoint JSON y un 404 que
//! muestra la ruta pedida. No escribe access log.

use crate::dashboard::format::escape_html;
use crate::http::response::CONTENT_TYPE_JSON;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use crate::server::AppState;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::net::SocketAddr;

pub const API_VERSION: &str = "1.0.0";

const INDEX_HTML: &str = r#"<html>
  <head><title>Servidor Rust</title></head>
  <body>
    <h1>¡Hola desde Rust!</h1>
    <p>Este es un servidor HTTP básico sobre std::net</p>
    <ul>
      <li><a href="/about">Acerca de</a></li>
      <li><a href="/api">API</a></li>
    </ul>
  </body>
</html>"#;

const ABOUT_HTML: &str = r#"<html>
  <head><title>Acerca de</title></head>
  <body>
    <h1>Acerca de este servidor</h1>
    <p>Servidor HTTP/1.0 con un thread por conexión</p>
    <a href="/">Volver al inicio</a>
  </body>
</html>"#;

pub fn routes() -> Router {
    let mut router = Router::new();
    router.register("/", index_handler);
    router.register("/about", about_handler);
    router.register("/api", api_handler);
    router.set_fallback(not_found_handler);
    router
}

pub fn index_handler(_req: &Request, _state: &AppState) -> Response {
    Response::html(StatusCode::Ok, INDEX_HTML)
}

pub fn about_handler(_req: &Request, _state: &AppState) -> Response {
    Response::html(StatusCode::Ok, ABOUT_HTML)
}

/// `{"mensaje": "API endpoint", "version": "1.0.0", "timestamp": ISO}`
pub fn api_handler(_req: &Request, _state: &AppState) -> Response {
    let body = json!({
        "mensaje": "API endpoint",
        "version": API_VERSION,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });

    Response::new(StatusCode::Ok)
        .with_header("Content-Type", CONTENT_TYPE_JSON)
        .with_body(&body.to_string())
}

pub fn not_found_handler(req: &Request, _state: &AppState) -> Response {
    let body = format!(
        r#"<html>
  <head><title>404 Not Found</title></head>
  <body>
    <h1>404 - Página no encontrada</h1>
    <p>La ruta "{}" no existe</p>
    <a href="/">Volver al inicio</a>
  </body>
</html>"#,
        escape_html(req.target())
    );
    Response::html(StatusCode::NotFound, &body)
}

pub fn banner(addr: &SocketAddr) {
    println!("=== Servidor HTTP básico ===\n");
    println!("🚀 Servidor corriendo en http://{}/", addr);
    println!("   Presiona Ctrl+C para detener el servidor\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::FakeRunner;

    fn state() -> AppState {
        AppState::new(Box::new(FakeRunner::new()))
    }

    fn get(target: &str) -> Response {
        let raw = format!("GET {} HTTP/1.0\r\n\r\n", target);
        routes().route(&Request::parse(raw.as_bytes()).unwrap(), &state())
    }

    #[test]
    fn test_index_links() {
        let response = get("/");
        let body = response.body_string();

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(body.contains("¡Hola desde Rust!"));
        assert!(body.contains(r#"href="/about""#));
        assert!(body.contains(r#"href="/api""#));
    }

    #[test]
    fn test_about() {
        assert!(get("/about").body_string().contains("Acerca de este servidor"));
    }

    #[test]
    fn test_api_json() {
        let response = get("/api");
        assert_eq!(response.header("Content-Type"), Some(CONTENT_TYPE_JSON));

        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(json["mensaje"], "API endpoint");
        assert_eq!(json["version"], API_VERSION);
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }

    #[test]
    fn test_not_found_echoes_escaped_path() {
        let response = get("/nada?<b>=1");

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body_string().contains(r#"La ruta "/nada?&lt;b&gt;=1" no existe"#));
    }
}
