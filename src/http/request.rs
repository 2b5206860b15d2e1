//! # Parsing de Requests HTTP/1.0
//! src/http/request.rs
//!
//! Parser HTTP/1.0 (acepta también la request line de HTTP/1.1, que es lo
//! que mandan los navegadores al abrir el dashboard).
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /api/logs HTTP/1.1\r\n
//! Host: localhost:3000\r\n
//! Accept-Encoding: gzip, deflate\r\n
//! \r\n
//! ```

use std::collections::HashMap;

/// Métodos HTTP
///
/// Cualquier token en mayúsculas que no sea GET/HEAD/POST llega como
/// `Other`, para que quede en el access log y el servidor lo rechace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    Other(String),
}

impl Method {
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            other if !other.is_empty() && other.bytes().all(|b| b.is_ascii_uppercase()) => {
                Ok(Method::Other(other.to_string()))
            }
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::Other(name) => name,
        }
    }
}

/// Request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Target tal cual llegó (path + query), es lo que se escribe en el access log
    target: String,

    /// Path sin query string (ej: "/api/info")
    path: String,

    query_params: HashMap<String, String>,

    /// Headers con el nombre normalizado a minúsculas
    headers: HashMap<String, String>,

    version: String,

    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request incompleto o truncado
    IncompleteRequest,

    /// Formato inválido de la request line
    InvalidRequestLine,

    /// Método HTTP no soportado
    UnsupportedMethod(String),

    /// Versión HTTP distinta de 1.0 / 1.1
    InvalidHttpVersion(String),

    /// Header sin ':'
    InvalidHeader(String),

    /// Request vacío
    EmptyRequest,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncompleteRequest => write!(f, "Incomplete HTTP request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
            ParseError::EmptyRequest => write!(f, "Empty request"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use monitor_dashboard::http::Request;
    ///
    /// let raw = b"GET /api/logs?limit=5 HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/api/logs");
    /// assert_eq!(request.target(), "/api/logs?limit=5");
    /// assert_eq!(request.query_param("limit"), Some("5"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = std::str::from_utf8(buffer)
            .map_err(|_| ParseError::InvalidRequestLine)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let lines: Vec<&str> = request_str.split("\r\n").collect();

        if lines.is_empty() {
            return Err(ParseError::IncompleteRequest);
        }

        // 1. Request line
        let (method, target, version) = Self::parse_request_line(lines[0])?;
        let (path, query_params) = Self::parse_path_and_query(&target);

        // 2. Headers hasta la línea vacía
        let headers = Self::parse_headers(&lines[1..])?;

        // 3. Body (solo POST)
        let body = Self::parse_body(&lines, &method);

        Ok(Request {
            method,
            target,
            path,
            query_params,
            headers,
            version,
            body,
        })
    }

    /// Formato: `GET /path?query HTTP/1.0`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;

        if !parts[1].starts_with('/') {
            return Err(ParseError::InvalidRequestLine);
        }

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, parts[1].to_string(), version))
    }

    /// "/api/logs?limit=5" → ("/api/logs", {"limit": "5"})
    fn parse_path_and_query(target: &str) -> (String, HashMap<String, String>) {
        match target.split_once('?') {
            Some((path, query)) => (Self::url_decode(path), Self::parse_query_string(query)),
            None => (Self::url_decode(target), HashMap::new()),
        }
    }

    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();

        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            match param.split_once('=') {
                Some((key, value)) => {
                    params.insert(Self::url_decode(key), Self::url_decode(value));
                }
                None => {
                    // Parámetro sin valor (ej: "?debug")
                    params.insert(Self::url_decode(param), String::new());
                }
            }
        }

        params
    }

    /// Decodifica `%XX` y `+`. Las secuencias inválidas se dejan tal cual.
    fn url_decode(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'+' => {
                    out.push(b' ');
                    i += 1;
                }
                b'%' if i + 2 < bytes.len()
                    && bytes[i + 1].is_ascii_hexdigit()
                    && bytes[i + 2].is_ascii_hexdigit() =>
                {
                    let hi = (bytes[i + 1] as char).to_digit(16).unwrap_or(0) as u8;
                    let lo = (bytes[i + 2] as char).to_digit(16).unwrap_or(0) as u8;
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                b => {
                    out.push(b);
                    i += 1;
                }
            }
        }

        String::from_utf8_lossy(&out).into_owned()
    }

    fn parse_headers(lines: &[&str]) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    fn parse_body(lines: &[&str], method: &Method) -> Vec<u8> {
        if *method != Method::POST {
            return Vec::new();
        }

        let body_start = lines
            .iter()
            .position(|line| line.trim().is_empty())
            .map(|i| i + 1)
            .unwrap_or(lines.len());

        if body_start < lines.len() {
            lines[body_start..].join("\r\n").into_bytes()
        } else {
            Vec::new()
        }
    }

    // === Accesores ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Busca un header sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// `true` si el cliente declaró `Accept-Encoding: gzip`
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .map(|value| {
                value
                    .split(',')
                    .any(|enc| enc.split(';').next().unwrap_or("").trim() == "gzip")
            })
            .unwrap_or(false)
    }
}
