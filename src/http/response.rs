//! # Construcción de Respuestas HTTP
//!
//! Respuestas HTTP/1.0 para el dashboard: páginas HTML, JSON con sangría
//! (igual que `JSON.stringify(obj, null, 2)`) y compresión gzip opcional.
//!
//! ```
//! use monitor_dashboard::http::{Response, StatusCode};
//!
//! let response = Response::html(StatusCode::Ok, "<h1>Hola</h1>");
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.0 200 OK\r\n"));
//! ```

use super::StatusCode;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Respuesta HTTP/1.0 completa
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// BTreeMap para que los headers salgan siempre en el mismo orden
    headers: BTreeMap<String, String>,

    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega (o sobrescribe) un header
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el body y su `Content-Length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
        self
    }

    /// Página HTML
    pub fn html(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", CONTENT_TYPE_HTML)
            .with_body(body)
    }

    /// JSON 200 OK con sangría de dos espacios
    ///
    /// Si la serialización falla se responde 500 con un error JSON.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(body) => Self::new(StatusCode::Ok)
                .with_header("Content-Type", CONTENT_TYPE_JSON)
                .with_body(&body),
            Err(e) => Self::error(
                StatusCode::InternalServerError,
                &format!("Serialization failed: {}", e),
            ),
        }
    }

    /// Error con cuerpo `{"error": "mensaje"}`
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::new(status)
            .with_header("Content-Type", CONTENT_TYPE_JSON)
            .with_body(&body)
    }

    /// Comprime el body con gzip y marca `Content-Encoding`
    ///
    /// Los bodies vacíos se dejan como están. Si el encoder falla se
    /// devuelve la respuesta original sin comprimir.
    pub fn gzip(self) -> Self {
        if self.body.is_empty() || self.headers.contains_key("Content-Encoding") {
            return self;
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        let compressed = encoder
            .write_all(&self.body)
            .and_then(|_| encoder.finish());

        match compressed {
            Ok(bytes) => self
                .with_header("Content-Encoding", "gzip")
                .with_header("Vary", "Accept-Encoding")
                .with_body_bytes(bytes),
            Err(e) => {
                log::warn!("gzip falló, se envía sin comprimir: {}", e);
                self
            }
        }
    }

    /// Descarta el body para HEAD conservando `Content-Length`
    pub fn without_body(mut self) -> Self {
        self.body.clear();
        self
    }

    /// Serializa status line, headers, línea vacía y body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.body.len() + 256);

        result.extend_from_slice(format!("HTTP/1.0 {}\r\n", self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
