//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor HTTP/1.0 con un thread por conexión. El accept es no bloqueante
//! para poder revisar la bandera de cierre que activan SIGINT/SIGTERM; al
//! cerrarse espera a que terminen las conexiones en curso.

use crate::access_log::AccessLog;
use crate::config::{HelloConfig, ServeConfig};
use crate::dashboard;
use crate::demos::site;
use crate::error::{Error, Result};
use crate::http::{Method, Request, Response, StatusCode};
use crate::router::Router;
use crate::server::AppState;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Tamaño máximo aceptado para un request (headers + body)
pub const MAX_REQUEST_BYTES: usize = 64 * 1024;

const ACCEPT_POLL: Duration = Duration::from_millis(50);
const READ_TIMEOUT: Duration = Duration::from_secs(5);

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Se imprime una vez que el listener está escuchando
pub type Banner = fn(&SocketAddr);

/// Servidor HTTP/1.0 concurrente
pub struct Server {
    address: String,
    router: Arc<Router>,
    state: Arc<AppState>,
    shutdown: Arc<AtomicBool>,
    banner: Option<Banner>,
}

impl Server {
    pub fn new(address: String, router: Router, state: AppState) -> Self {
        Self {
            address,
            router: Arc::new(router),
            state: Arc::new(state),
            shutdown: Arc::new(AtomicBool::new(false)),
            banner: None,
        }
    }

    /// Dashboard de monitoreo con access log
    pub fn dashboard(config: &ServeConfig) -> Result<Self> {
        let access_log = AccessLog::init(&config.log_dir)?;

        let mut state = AppState::system()
            .with_access_log(access_log)
            .with_space_scan(!config.no_space_scan);
        if let Some(dir) = &config.dir {
            state = state.with_listing_dir(dir.clone());
        }

        Ok(Self::new(config.address(), dashboard::routes(), state).with_banner(dashboard_banner))
    }

    /// Sitio HTTP básico, sin access log
    pub fn hello(config: &HelloConfig) -> Self {
        Self::new(config.address(), site::routes(), AppState::system()).with_banner(site::banner)
    }

    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banner = Some(banner);
        self
    }

    /// Bandera que detiene el loop de accept al ponerse en `true`
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn bind(&self) -> Result<TcpListener> {
        log::debug!("Iniciando servidor en {}", self.address);
        Ok(TcpListener::bind(&self.address)?)
    }

    /// Registra las señales, hace bind y atiende hasta recibir SIGINT/SIGTERM
    pub fn run(&self) -> Result<()> {
        for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&self.shutdown)).map_err(Error::Signal)?;
        }

        let listener = self.bind()?;
        self.serve(listener)
    }

    /// Loop de accept sobre un listener ya abierto
    pub fn serve(&self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        listener.set_nonblocking(true)?;

        log::info!("Servidor escuchando en {} (un thread por conexión)", local_addr);
        if let Some(banner) = self.banner {
            banner(&local_addr);
        }

        let mut workers: Vec<JoinHandle<()>> = Vec::new();

        while !self.shutdown.load(Ordering::SeqCst) {
            match listener.accept() {
                Ok((stream, peer)) => {
                    log::debug!("Nueva conexión desde: {}", peer);
                    let router = Arc::clone(&self.router);
                    let state = Arc::clone(&self.state);

                    workers.push(thread::spawn(move || {
                        if let Err(e) = handle_connection(stream, peer, &router, &state) {
                            log::error!("❌ Error en thread: {}", e);
                        }
                    }));
                    workers.retain(|worker| !worker.is_finished());
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => thread::sleep(ACCEPT_POLL),
                Err(e) => log::error!("❌ Error al aceptar conexión: {}", e),
            }
        }

        println!("\n\n⏹️  Cerrando servidor...");
        drop(listener);
        for worker in workers {
            let _ = worker.join();
        }
        println!("✅ Servidor cerrado correctamente");

        Ok(())
    }
}

fn dashboard_banner(addr: &SocketAddr) {
    println!("\n✅ MÓDULOS INTEGRADOS:");
    println!("   📁 fs      - Logs y lectura de archivos");
    println!("   🛣️  path   - Manejo de rutas");
    println!("   💻 os      - Información del sistema");
    println!("   🌐 http    - Servidor web");
    println!("   🔄 process - Información del proceso");
    println!("   📂 ls      - Listar directorios\n");
    println!("🚀 Dashboard corriendo en http://{}/", addr);
    println!("📊 API JSON disponible en http://{}/api/info", addr);
    println!("📋 Logs disponibles en http://{}/api/logs", addr);
    println!("\n   Presiona Ctrl+C para detener\n");
}

/// Atiende una conexión: lee, registra, enruta y responde
pub fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    router: &Router,
    state: &AppState,
) -> io::Result<()> {
    let start = Instant::now();
    let request_id = next_request_id();
    let thread_id = format!("{:?}", thread::current().id());

    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(READ_TIMEOUT))?;

    let raw = read_request(&mut stream)?;
    if raw.is_empty() {
        log::debug!("Conexión cerrada sin datos [req_id: {}]", &request_id[..8]);
        return Ok(());
    }

    let (response, label) = match Request::parse(&raw) {
        Ok(request) => {
            let label = format!("{} {}", request.method().as_str(), request.target());
            log::info!("📨 Petición recibida: {}", label);

            if let Some(access_log) = &state.access_log {
                access_log.record(request.method().as_str(), request.target(), &peer.ip().to_string());
            }

            (respond(&request, router, state), label)
        }
        Err(e) => {
            log::warn!("❌ Parse error: {}", e);
            if let (Some(access_log), Some((method, target))) = (&state.access_log, request_line_parts(&raw)) {
                access_log.record(&method, &target, &peer.ip().to_string());
            }
            let response = Response::error(StatusCode::BadRequest, &format!("Invalid: {}", e))
                .with_header("Connection", "close");
            (response, "<inválido>".to_string())
        }
    };

    let mut response = response;
    response.add_header("X-Request-Id", &request_id);
    response.add_header("X-Worker-Thread", &thread_id);
    response.add_header("X-Worker-Pid", &std::process::id().to_string());
    response.add_header(
        "X-Response-Time-Ms",
        &format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0),
    );

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    log::info!(
        "{} → {} ({:.2}ms) [req_id: {}]",
        label,
        response.status(),
        start.elapsed().as_secs_f64() * 1000.0,
        &request_id[..8]
    );

    Ok(())
}

/// Aplica las reglas de método, gzip y HEAD alrededor del router
pub fn respond(request: &Request, router: &Router, state: &AppState) -> Response {
    if !matches!(request.method(), Method::GET | Method::HEAD) {
        return Response::error(StatusCode::MethodNotAllowed, "Only GET and HEAD are supported")
            .with_header("Allow", "GET, HEAD")
            .with_header("Connection", "close");
    }

    let mut response = router.route(request, state);
    if request.accepts_gzip() {
        response = response.gzip();
    }
    if *request.method() == Method::HEAD {
        response = response.without_body();
    }
    response
}

/// Método y target de la primera línea, aunque el request no sea válido
fn request_line_parts(raw: &[u8]) -> Option<(String, String)> {
    let line = raw.split(|&b| b == b'\n').next()?;
    let line = String::from_utf8_lossy(line);
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    Some((method.to_string(), target.to_string()))
}

/// Lee hasta completar headers y `Content-Length`, o hasta EOF
fn read_request(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = match stream.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => break,
            Err(e) => return Err(e),
        };
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);

        if data.len() >= MAX_REQUEST_BYTES || request_complete(&data) {
            break;
        }
    }

    Ok(data)
}

/// `true` cuando ya llegaron los headers y todo el body declarado
fn request_complete(data: &[u8]) -> bool {
    let Some(header_end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };

    let headers = String::from_utf8_lossy(&data[..header_end]);
    let content_length = headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    data.len() >= header_end + 4 + content_length
}

fn next_request_id() -> String {
    let mut hasher = DefaultHasher::new();
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .hash(&mut hasher);
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);
    thread::current().id().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::FakeRunner;
    use std::net::Shutdown;

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    fn test_router() -> Router {
        fn ok(_req: &Request, _state: &AppState) -> Response {
            Response::html(StatusCode::Ok, &"hola ".repeat(50))
        }
        let mut router = Router::new();
        router.register("/ok", ok);
        router
    }

    /// Atiende una sola conexión en otro thread y devuelve la respuesta cruda
    fn roundtrip(raw: &[u8], state: AppState) -> (String, AppState) {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, peer) = listener.accept().unwrap();
            handle_connection(stream, peer, &test_router(), &state).unwrap();
            state
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        let state = server.join().unwrap();
        (String::from_utf8_lossy(&buf).into_owned(), state)
    }

    fn state() -> AppState {
        AppState::new(Box::new(FakeRunner::new()))
    }

    #[test]
    fn test_handle_connection_ok() {
        let (text, _) = roundtrip(b"GET /ok HTTP/1.0\r\n\r\n", state());

        assert!(text.starts_with("HTTP/1.0 200 OK"));
        assert!(text.contains("X-Request-Id:"));
        assert!(text.contains("X-Worker-Thread:"));
        assert!(text.contains("X-Worker-Pid:"));
        assert!(text.contains("X-Response-Time-Ms:"));
        assert!(text.contains("Connection: close"));
    }

    #[test]
    fn test_handle_connection_records_access_log() {
        let dir = tempfile::tempdir().unwrap();
        let state = state().with_access_log(AccessLog::init(dir.path()).unwrap());

        let (_, state) = roundtrip(b"GET /missing?x=1 HTTP/1.0\r\n\r\n", state);
        let logs = state.recent_logs(5);

        assert_eq!(logs.len(), 1);
        assert!(logs[0].ends_with("GET /missing?x=1 - IP: 127.0.0.1"));
    }

    #[test]
    fn test_handle_connection_parse_error() {
        let (text, _) = roundtrip(b"\x00\x01\x02\x03garbage", state());

        assert!(text.contains("400 Bad Request"));
        assert!(text.contains("Invalid:"));
    }

    #[test]
    fn test_handle_connection_post_not_allowed() {
        let (text, _) = roundtrip(b"POST /ok HTTP/1.0\r\nContent-Length: 3\r\n\r\nabc", state());

        assert!(text.contains("405 Method Not Allowed"));
        assert!(text.contains("Allow: GET, HEAD"));
    }

    #[test]
    fn test_handle_connection_other_methods_logged_and_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state().with_access_log(AccessLog::init(dir.path()).unwrap());

        for method in ["PUT", "OPTIONS", "DELETE"] {
            let raw = format!("{} /api/logs HTTP/1.1\r\n\r\n", method);
            let (text, returned) = roundtrip(raw.as_bytes(), state);
            state = returned;
            assert!(text.starts_with("HTTP/1.0 405 Method Not Allowed"), "{}", text);
        }

        let logs = state.recent_logs(5);
        assert_eq!(logs.len(), 3);
        assert!(logs[0].ends_with("PUT /api/logs - IP: 127.0.0.1"));
        assert!(logs[2].ends_with("DELETE /api/logs - IP: 127.0.0.1"));
    }

    #[test]
    fn test_handle_connection_bad_request_still_logged() {
        let dir = tempfile::tempdir().unwrap();
        let state = state().with_access_log(AccessLog::init(dir.path()).unwrap());

        let (text, state) = roundtrip(b"GET /api/info HTTP/2.0\r\n\r\n", state);
        assert!(text.contains("400 Bad Request"));

        let logs = state.recent_logs(5);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].ends_with("GET /api/info - IP: 127.0.0.1"));
    }

    #[test]
    fn test_request_line_parts() {
        assert_eq!(
            request_line_parts(b"get /x HTTP/9\r\nHost: a\r\n\r\n"),
            Some(("get".to_string(), "/x".to_string()))
        );
        assert_eq!(request_line_parts(b"garbage"), None);
    }

    #[test]
    fn test_handle_connection_head_keeps_length() {
        let (text, _) = roundtrip(b"HEAD /ok HTTP/1.0\r\n\r\n", state());
        let (head, body) = text.split_once("\r\n\r\n").unwrap();

        assert!(head.contains("Content-Length: 250"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_respond_gzip() {
        let request = Request::parse(b"GET /ok HTTP/1.0\r\nAccept-Encoding: gzip, deflate\r\n\r\n").unwrap();
        let response = respond(&request, &test_router(), &state());

        assert_eq!(response.header("Content-Encoding"), Some("gzip"));
        assert!(response.body().starts_with(&[0x1f, 0x8b]));
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, peer) = listener.accept().unwrap();
            handle_connection(stream, peer, &test_router(), &state()).unwrap();
        });

        drop(TcpStream::connect(addr).unwrap());
        t.join().unwrap();
    }

    #[test]
    fn test_request_complete() {
        assert!(!request_complete(b"GET / HTTP/1.0\r\n"));
        assert!(request_complete(b"GET / HTTP/1.0\r\n\r\n"));
        assert!(!request_complete(b"POST / HTTP/1.0\r\nContent-Length: 5\r\n\r\nab"));
        assert!(request_complete(b"POST / HTTP/1.0\r\ncontent-length: 2\r\n\r\nab"));
    }

    #[test]
    fn test_request_ids_differ() {
        assert_ne!(next_request_id(), next_request_id());
    }

    #[test]
    fn test_serve_stops_on_shutdown_flag() {
        let server = Server::new("127.0.0.1:0".to_string(), test_router(), state());
        let listener = server.bind().unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = server.shutdown_handle();

        let t = thread::spawn(move || server.serve(listener));

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /ok HTTP/1.0\r\n\r\n").unwrap();
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        assert!(String::from_utf8_lossy(&buf).contains("200 OK"));

        shutdown.store(true, Ordering::SeqCst);
        assert!(t.join().unwrap().is_ok());
    }
}
