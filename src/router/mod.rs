//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea paths HTTP a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler(&Request, &AppState) → Response
//! ```
//!
//! La comparación es exacta sobre el path (sin query string). Si ninguna ruta
//! coincide se ejecuta el handler de fallback, que por defecto responde 404.

use crate::http::{Request, Response, StatusCode};
use crate::server::AppState;

/// Un handler recibe el request y el estado compartido
pub type Handler = fn(&Request, &AppState) -> Response;

/// Valor del header `Server`
pub const SERVER_NAME: &str = "Monitor-HTTP/1.0";

pub struct Router {
    /// Rutas en orden de registro
    routes: Vec<(String, Handler)>,
    fallback: Handler,
}

fn default_not_found(request: &Request, _state: &AppState) -> Response {
    Response::error(
        StatusCode::NotFound,
        &format!("Route not found: {}", request.path()),
    )
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: default_not_found,
        }
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use monitor_dashboard::router::Router;
    /// use monitor_dashboard::http::{Request, Response, StatusCode};
    /// use monitor_dashboard::server::AppState;
    ///
    /// fn hello(_req: &Request, _state: &AppState) -> Response {
    ///     Response::html(StatusCode::Ok, "<h1>Hola</h1>")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("/hello", hello);
    /// assert!(router.has_route("/hello"));
    /// ```
    pub fn register(&mut self, path: &str, handler: Handler) {
        self.routes.push((path.to_string(), handler));
    }

    /// Handler para paths sin ruta registrada
    pub fn set_fallback(&mut self, handler: Handler) {
        self.fallback = handler;
    }

    pub fn has_route(&self, path: &str) -> bool {
        self.routes.iter().any(|(route, _)| route == path)
    }

    /// Ejecuta el handler correspondiente y agrega los headers comunes
    pub fn route(&self, request: &Request, state: &AppState) -> Response {
        let path = request.path();

        let handler = self
            .routes
            .iter()
            .find(|(route_path, _)| route_path == path)
            .map(|(_, handler)| *handler)
            .unwrap_or(self.fallback);

        let mut response = handler(request, state);
        self.add_common_headers(&mut response);
        response
    }

    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", SERVER_NAME);
        response.add_header("Connection", "close");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
