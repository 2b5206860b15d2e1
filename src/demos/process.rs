//! # Demo: proceso actual
//! src/demos/process.rs
//!
//! Identidad, argumentos, entorno, memoria, CPU, streams estándar y cambio de
//! directorio. Termina con un parser mínimo de `--clave valor` / `--bandera`.

use crate::error::Result;
use crate::probes::platform::{self, Platform};
use crate::probes::process::{parent_pid, process_info, resource_usage};
use serde_json::{json, Map, Value};
use std::io::{IsTerminal, Write};
use std::time::Instant;

/// Variable que elige la configuración de ejemplo
pub const ENV_VAR: &str = "APP_ENV";

/// `--name Juan --verbose` → `{"name": "Juan", "verbose": true}`
///
/// Un `--clave` seguido de otro `--algo` (o al final) es una bandera. Los
/// valores sueltos que no siguen a una clave se ignoran.
pub fn parse_args(args: &[String]) -> Map<String, Value> {
    let mut options = Map::new();

    for (index, arg) in args.iter().enumerate() {
        let Some(key) = arg.strip_prefix("--") else {
            continue;
        };
        let value = match args.get(index + 1) {
            Some(next) if !next.starts_with("--") => Value::String(next.clone()),
            _ => Value::Bool(true),
        };
        options.insert(key.to_string(), value);
    }

    options
}

/// Configuración según el entorno: solo `production` apaga el modo debug
pub fn env_config(app_env: Option<&str>) -> Value {
    if app_env == Some("production") {
        json!({ "debug": false, "logLevel": "error" })
    } else {
        json!({ "debug": true, "logLevel": "verbose" })
    }
}

/// Primeros `max` caracteres (no bytes) de `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Sí"
    } else {
        "No"
    }
}

pub fn run(started: Instant, extra_args: &[String]) -> Result<()> {
    println!("=== Proceso actual ===\n");
    let info = process_info(started);

    println!("1️⃣  Información del Proceso:\n");
    println!("   PID (Process ID): {}", info.pid);
    println!("   Versión: {}", info.version);
    println!("   Plataforma: {}", Platform::current());
    println!("   Arquitectura: {}", platform::arch());
    println!("   Uptime del proceso: {:.2} segundos", started.elapsed().as_secs_f64());

    println!("\n2️⃣  Directorio y Ejecución:\n");
    println!("   Directorio actual (cwd): {}", info.cwd);
    match std::env::current_exe() {
        Ok(exe) => println!("   Ejecutable: {}", exe.display()),
        Err(e) => println!("   Ejecutable: no disponible ({})", e),
    }

    println!("\n3️⃣  Argumentos de Línea de Comandos:\n");
    let argv: Vec<String> = std::env::args().collect();
    println!("   argv: {:?}", argv);
    if extra_args.is_empty() {
        println!("   (No hay argumentos adicionales)");
        println!("   💡 Prueba: monitor process arg1 arg2 arg3");
    } else {
        println!("   Argumentos adicionales: {:?}", extra_args);
    }

    println!("\n4️⃣  Variables de Entorno:\n");
    let app_env = std::env::var(ENV_VAR).ok();
    println!("   {}: {}", ENV_VAR, app_env.as_deref().unwrap_or("no definido"));
    let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"));
    println!("   HOME: {}", home.unwrap_or_default());
    let path = std::env::var("PATH").unwrap_or_default();
    println!("   PATH (primeros 100 caracteres): {}...", truncate_chars(&path, 100));
    println!("   Total de variables de entorno: {}", std::env::vars_os().count());
    println!("   Configuración actual: {}", env_config(app_env.as_deref()));

    println!("\n5️⃣  Uso de Memoria:\n");
    println!("   RSS (Resident Set Size): {}", info.memory.rss);
    println!("   Memoria virtual: {}", info.memory.virtual_size);
    println!("   Segmento de datos: {}", info.memory.data);

    println!("\n6️⃣  Uso de CPU del Proceso:\n");
    match resource_usage() {
        Some(usage) => {
            println!("   User CPU time: {:.3} ms", usage.user_ms);
            println!("   System CPU time: {:.3} ms", usage.system_ms);
            println!("   Total CPU time: {:.2} ms", usage.user_ms + usage.system_ms);
        }
        None => println!("   No disponible en esta plataforma"),
    }

    println!("\n7️⃣  Streams Estándar:\n");
    println!("   stdin es terminal: {}", yes_no(std::io::stdin().is_terminal()));
    println!("   stdout es terminal: {}", yes_no(std::io::stdout().is_terminal()));
    println!("   stderr es terminal: {}", yes_no(std::io::stderr().is_terminal()));

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "   Escribiendo con stdout: ")?;
    write!(stdout, "¡Hola! ")?;
    writeln!(stdout, "¿Cómo estás?")?;
    drop(stdout);
    eprintln!("   ⚠️  Esto es un mensaje de error (stderr)");

    println!("\n8️⃣  Cambiar Directorio de Trabajo:\n");
    let original = std::env::current_dir()?;
    println!("   Directorio actual: {}", original.display());
    match std::env::set_current_dir("..") {
        Ok(()) => {
            println!("   Nuevo directorio: {}", std::env::current_dir()?.display());
            std::env::set_current_dir(&original)?;
            println!("   De vuelta a: {}", std::env::current_dir()?.display());
        }
        Err(e) => println!("   ❌ Error al cambiar directorio: {}", e),
    }

    println!("\n9️⃣  Información Adicional:\n");
    println!("   ppid (Parent Process ID): {}", parent_pid());
    #[cfg(unix)]
    {
        // SAFETY: getuid/getgid no pueden fallar
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        println!("   Usuario actual: {}", uid);
        println!("   Grupo actual: {}", gid);
    }
    #[cfg(not(unix))]
    {
        println!("   Usuario actual: N/A (Windows)");
        println!("   Grupo actual: N/A (Windows)");
    }

    println!("\n🔟 Ejemplo Práctico - Parser de Argumentos:\n");
    let options = parse_args(extra_args);
    if options.is_empty() {
        println!("   Opciones parseadas: ninguna");
    } else {
        println!("   Opciones parseadas: {}", Value::Object(options));
    }
    println!("   💡 Prueba: monitor process --name Juan --age 25 --verbose");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--name", "Juan", "--age", "25", "--verbose"]));

        assert_eq!(options["name"], "Juan");
        assert_eq!(options["age"], "25");
        assert_eq!(options["verbose"], true);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn test_parse_args_flags_and_strays() {
        let options = parse_args(&args(&["suelto", "--a", "--b"]));

        assert_eq!(options["a"], true);
        assert_eq!(options["b"], true);
        assert!(!options.contains_key("suelto"));
    }

    #[test]
    fn test_parse_args_empty() {
        assert!(parse_args(&[]).is_empty());
    }

    #[test]
    fn test_env_config() {
        assert_eq!(env_config(Some("production"))["debug"], false);
        assert_eq!(env_config(Some("development"))["logLevel"], "verbose");
        assert_eq!(env_config(None)["debug"], true);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("ñandú", 3), "ñan");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }
}
