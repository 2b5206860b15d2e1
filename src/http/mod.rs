//! # Módulo HTTP
//!
//! Implementación mínima de HTTP/1.0 sobre TCP, sin librerías de alto nivel:
//!
//! - Parsing de requests (`request`)
//! - Construcción de responses HTML/JSON con gzip opcional (`response`)
//! - Códigos de estado (`status`)
//!
//! HTTP/1.0 (RFC 1945) no mantiene conexiones persistentes: cada request
//! abre una conexión, recibe una respuesta y se cierra. Eso encaja con el
//! dashboard, que recalcula todo en cada request.

pub mod request;
pub mod response;
pub mod status;

pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
