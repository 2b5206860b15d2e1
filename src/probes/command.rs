//! # Ejecución de comandos externos
//! src/probes/command.rs
//!
//! Todas las sondas del dashboard pasan por un `CommandRunner`. La
//! implementación real (`SystemRunner`) lanza el proceso, lee stdout/stderr
//! en threads auxiliares y lo mata si excede el timeout. Nunca devuelve
//! error: un fallo se refleja como `ok == false`.

use std::collections::HashMap;
use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Resultado de ejecutar un comando
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub ok: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: &str) -> Self {
        Self {
            ok: true,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: &str) -> Self {
        Self {
            ok: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    /// stdout solo si el comando terminó bien y dejó algo
    pub fn stdout_if_ok(&self) -> Option<&str> {
        if self.ok && !self.stdout.trim().is_empty() {
            Some(&self.stdout)
        } else {
            None
        }
    }
}

/// Punto de extensión para ejecutar comandos (real o simulado en tests)
pub trait CommandRunner: Send + Sync {
    /// Ejecuta `program args...` con un timeout
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> CommandOutput;

    /// Equivalente a `command -v program`
    fn available(&self, program: &str) -> bool;
}

/// Ejecuta comandos reales del sistema operativo
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<String> {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            if let Some(mut source) = source {
                let _ = source.read_to_end(&mut buffer);
            }
            String::from_utf8_lossy(&buffer).into_owned()
        })
    }

    /// Espera al hijo hasta `timeout`; `None` si hubo que matarlo
    fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<std::io::Result<std::process::ExitStatus>> {
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Some(Ok(status)),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => thread::sleep(Duration::from_millis(10)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> CommandOutput {
        let started = Instant::now();
        let spawned = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                log::debug!("No se pudo lanzar {}: {}", program, e);
                return CommandOutput::failure(&e.to_string());
            }
        };

        let stdout_reader = Self::spawn_reader(child.stdout.take());
        let stderr_reader = Self::spawn_reader(child.stderr.take());

        let status = Self::wait_with_timeout(&mut child, timeout);
        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        log::trace!(
            "{} {:?} terminó en {}ms",
            program,
            args,
            started.elapsed().as_millis()
        );

        match status {
            Some(Ok(status)) => CommandOutput {
                ok: status.success(),
                stdout,
                stderr,
            },
            Some(Err(e)) => CommandOutput {
                ok: false,
                stdout,
                stderr: e.to_string(),
            },
            None => {
                log::debug!("{} excedió el timeout de {}ms", program, timeout.as_millis());
                CommandOutput {
                    ok: false,
                    stdout,
                    stderr: format!("timeout after {}ms", timeout.as_millis()),
                }
            }
        }
    }

    fn available(&self, program: &str) -> bool {
        find_in_path(program, env::var_os("PATH").as_deref()).is_some()
    }
}

/// Busca un ejecutable en los directorios de `PATH`
pub fn find_in_path(program: &str, path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = path_var?;
    let extensions: &[&str] = if cfg!(windows) { &["", ".exe", ".cmd", ".bat"] } else { &[""] };

    env::split_paths(path_var).find_map(|dir| {
        extensions.iter().find_map(|ext| {
            let full = dir.join(format!("{}{}", program, ext));
            full.is_file().then_some(full)
        })
    })
}

/// Runner con respuestas enlatadas, indexadas por `"programa arg1 arg2"`
///
/// Los programas sin respuesta registrada fallan como si no existieran.
/// Solo para tests, del crate y de `tests/`.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    installed: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra la salida exitosa de un comando (y marca el programa como instalado)
    pub fn with_output(mut self, command_line: &str, stdout: &str) -> Self {
        self.register(command_line, CommandOutput::success(stdout));
        self
    }

    /// Registra un comando que falla
    pub fn with_failure(mut self, command_line: &str, stderr: &str) -> Self {
        self.register(command_line, CommandOutput::failure(stderr));
        self
    }

    fn register(&mut self, command_line: &str, output: CommandOutput) {
        if let Some(program) = command_line.split_whitespace().next() {
            if !self.installed.iter().any(|p| p == program) {
                self.installed.push(program.to_string());
            }
        }
        self.responses.insert(command_line.to_string(), output);
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str], _timeout: Duration) -> CommandOutput {
        let mut key = program.to_string();
        for arg in args {
            key.push(' ');
            key.push_str(arg);
        }
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| CommandOutput::failure(&format!("{}: command not found", program)))
    }

    fn available(&self, program: &str) -> bool {
        self.installed.iter().any(|p| p == program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_runner_lookup() {
        let runner = FakeRunner::new()
            .with_output("df -h /", "Filesystem Size\n")
            .with_failure("du -sh /root", "permission denied");

        let out = runner.run("df", &["-h", "/"], Duration::from_millis(10));
        assert!(out.ok);
        assert_eq!(out.stdout, "Filesystem Size\n");

        let out = runner.run("du", &["-sh", "/root"], Duration::from_millis(10));
        assert!(!out.ok);

        let out = runner.run("iSMC", &["temp"], Duration::from_millis(10));
        assert!(!out.ok);
        assert!(out.stderr.contains("not found"));
    }

    #[test]
    fn test_fake_runner_available() {
        let runner = FakeRunner::new().with_output("sensors -j", "{}");
        assert!(runner.available("sensors"));
        assert!(!runner.available("smctemp"));
    }

    #[test]
    fn test_stdout_if_ok() {
        assert_eq!(CommandOutput::success("42\n").stdout_if_ok(), Some("42\n"));
        assert_eq!(CommandOutput::success("  \n").stdout_if_ok(), None);
        assert_eq!(CommandOutput::failure("x").stdout_if_ok(), None);
    }

    #[test]
    fn test_find_in_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = std::ffi::OsString::from(dir.path());
        assert!(find_in_path("definitely-not-a-binary", Some(&path)).is_none());
        assert!(find_in_path("ls", None).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_in_path_present() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("mytool");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();

        let path = std::ffi::OsString::from(dir.path());
        assert_eq!(find_in_path("mytool", Some(&path)), Some(tool));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_echo() {
        let out = SystemRunner::new().run("sh", &["-c", "echo hola"], Duration::from_secs(5));
        assert!(out.ok);
        assert_eq!(out.stdout.trim(), "hola");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_non_zero_exit() {
        let out = SystemRunner::new().run("sh", &["-c", "echo oops >&2; exit 3"], Duration::from_secs(5));
        assert!(!out.ok);
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_timeout() {
        let started = Instant::now();
        let out = SystemRunner::new().run("sleep", &["5"], Duration::from_millis(100));

        assert!(!out.ok);
        assert!(out.stderr.contains("timeout"));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let out = SystemRunner::new().run("no-such-program-xyz", &[], Duration::from_secs(1));
        assert!(!out.ok);
        assert!(!out.stderr.is_empty());
    }
}
