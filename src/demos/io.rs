//! # Demo: I/O bloqueante, en segundo plano y en paralelo
//! src/demos/io.rs
//!
//! - Secuencia de operaciones de archivo bloqueantes
//! - La misma secuencia en un thread que avisa cada paso por un canal
//! - Tareas simuladas en secuencia y en paralelo
//! - Escrituras/lecturas de archivos en paralelo
//! - Procesamiento en lotes con concurrencia acotada

use super::SEPARATOR;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

pub const FIRST_LINE: &str = "Primera línea\n";
pub const SECOND_LINE: &str = "Segunda línea\n";

/// Aviso de un paso terminado en el thread de fondo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    DirCreated,
    Written,
    Read(String),
    Appended,
    ReadFinal(String),
    CleanedUp,
    Failed(String),
}

/// Crea, escribe, lee, agrega, relee y borra; devuelve el contenido final
pub fn blocking_walkthrough(dir: &Path) -> Result<String> {
    let file = dir.join("sincrono.txt");

    println!("1️⃣  Creando directorio...");
    fs::create_dir_all(dir)?;
    println!("   ✅ Directorio creado");

    println!("\n2️⃣  Escribiendo archivo...");
    fs::write(&file, FIRST_LINE)?;
    println!("   ✅ Archivo escrito");

    println!("\n3️⃣  Leyendo archivo...");
    println!("   📖 Contenido: {}", fs::read_to_string(&file)?.trim());

    println!("4️⃣  Agregando más contenido...");
    append(&file, SECOND_LINE)?;
    println!("   ✅ Contenido agregado");

    println!("\n5️⃣  Leyendo archivo actualizado...");
    let content = fs::read_to_string(&file)?;
    println!("   📖 Contenido final:\n {}", content);

    println!("6️⃣  Limpiando archivos temporales...");
    fs::remove_file(&file)?;
    fs::remove_dir(dir)?;
    println!("   🧹 Limpieza completada");

    Ok(content)
}

fn append(file: &Path, text: &str) -> std::io::Result<()> {
    use std::io::Write;
    fs::OpenOptions::new().append(true).open(file)?.write_all(text.as_bytes())
}

/// Lanza la secuencia en otro thread; cada paso llega por el canal
///
/// El primer error corta la secuencia y se reporta como [`Step::Failed`].
pub fn background_walkthrough(dir: PathBuf) -> Receiver<Step> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let file = dir.join("asincrono.txt");
        let steps = || -> std::io::Result<()> {
            fs::create_dir_all(&dir)?;
            let _ = tx.send(Step::DirCreated);
            fs::write(&file, FIRST_LINE)?;
            let _ = tx.send(Step::Written);
            let _ = tx.send(Step::Read(fs::read_to_string(&file)?));
            append(&file, SECOND_LINE)?;
            let _ = tx.send(Step::Appended);
            let _ = tx.send(Step::ReadFinal(fs::read_to_string(&file)?));
            fs::remove_file(&file)?;
            fs::remove_dir(&dir)?;
            let _ = tx.send(Step::CleanedUp);
            Ok(())
        };
        if let Err(e) = steps() {
            let _ = tx.send(Step::Failed(e.to_string()));
        }
    });

    rx
}

/// Tarea simulada que duerme `ms` milisegundos
pub fn simulated_task(name: &str, ms: u64) -> String {
    thread::sleep(Duration::from_millis(ms));
    format!("{} completada ({}ms)", name, ms)
}

pub fn sequential(tasks: &[(&str, u64)]) -> (Vec<String>, Duration) {
    let start = Instant::now();
    let results: Vec<String> = tasks.iter().map(|(name, ms)| simulated_task(name, *ms)).collect();
    (results, start.elapsed())
}

/// Todas a la vez; los resultados respetan el orden de entrada
pub fn parallel(tasks: &[(&str, u64)]) -> (Vec<String>, Duration) {
    let start = Instant::now();
    let results: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .iter()
            .map(|(name, ms)| scope.spawn(move || simulated_task(name, *ms)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| "tarea abortada".to_string()))
            .collect()
    });
    (results, start.elapsed())
}

/// Escribe `archivoN.txt` en paralelo y los vuelve a leer en paralelo
pub fn parallel_files(dir: &Path, count: usize) -> Result<Vec<String>> {
    fs::create_dir_all(dir)?;
    let paths: Vec<PathBuf> = (1..=count).map(|i| dir.join(format!("archivo{}.txt", i))).collect();

    thread::scope(|scope| -> std::io::Result<()> {
        let handles: Vec<_> = paths
            .iter()
            .enumerate()
            .map(|(i, path)| scope.spawn(move || fs::write(path, format!("Contenido {}", i + 1))))
            .collect();
        for handle in handles {
            handle
                .join()
                .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "escritura abortada"))??;
        }
        Ok(())
    })?;

    let contents = thread::scope(|scope| -> std::io::Result<Vec<String>> {
        let handles: Vec<_> = paths.iter().map(|path| scope.spawn(move || fs::read_to_string(path))).collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "lectura abortada"))?
            })
            .collect()
    })?;

    for path in &paths {
        fs::remove_file(path)?;
    }
    fs::remove_dir(dir)?;

    Ok(contents)
}

/// Procesa `total` tareas de a `batch_size` a la vez; devuelve el tamaño
/// de cada lote
pub fn batches(total: usize, batch_size: usize, task_ms: u64) -> Vec<usize> {
    let ids: Vec<usize> = (1..=total).collect();
    let mut sizes = Vec::new();

    for (index, chunk) in ids.chunks(batch_size.max(1)).enumerate() {
        println!("   📦 Procesando lote {} ({} tareas)...", index + 1, chunk.len());
        thread::scope(|scope| {
            for id in chunk {
                scope.spawn(move || simulated_task(&format!("Tarea {}", id), task_ms));
            }
        });
        sizes.push(chunk.len());
    }

    sizes
}

fn section(title: &str) {
    println!("\n{}", SEPARATOR);
    println!("{}\n", title);
}

pub fn run() -> Result<()> {
    let base = std::env::temp_dir().join(format!("monitor-io-{}", std::process::id()));

    println!("=== Operaciones BLOQUEANTES ===\n");
    blocking_walkthrough(&base.join("temp-sync"))?;
    println!("\n⏸️  FIN - Cada operación bloqueó el thread hasta completarse");

    section("=== Operaciones en SEGUNDO PLANO (canal) ===");
    let rx = background_walkthrough(base.join("temp-async"));
    println!("⚡ Este mensaje aparece INMEDIATAMENTE (el thread principal no espera)\n");
    for step in rx {
        match step {
            Step::DirCreated => println!("   ✅ Directorio creado"),
            Step::Written => println!("   ✅ Archivo escrito"),
            Step::Read(content) => println!("   📖 Contenido: {}", content.trim()),
            Step::Appended => println!("   ✅ Contenido agregado"),
            Step::ReadFinal(content) => println!("   📖 Contenido final:\n {}", content),
            Step::CleanedUp => println!("   🧹 Limpieza completada"),
            Step::Failed(e) => println!("   ❌ Error: {}", e),
        }
    }

    let tasks = [("Tarea 1", 1000), ("Tarea 2", 1000), ("Tarea 3", 1000)];

    section("1️⃣  EJECUCIÓN SECUENCIAL (una tras otra)");
    let (results, elapsed) = sequential(&tasks);
    results.iter().for_each(|r| println!("   {}", r));
    println!("   ✅ Tiempo total: {}ms", elapsed.as_millis());

    section("2️⃣  EJECUCIÓN PARALELA (un thread por tarea)");
    let (results, elapsed) = parallel(&tasks);
    results.iter().for_each(|r| println!("   {}", r));
    println!("   ✅ Tiempo total: {}ms", elapsed.as_millis());

    section("3️⃣  Archivos en paralelo");
    let start = Instant::now();
    for (i, content) in parallel_files(&base.join("temp-parallel"), 3)?.iter().enumerate() {
        println!("   📄 Archivo {}: {}", i + 1, content);
    }
    println!("   ✅ Tiempo total: {}ms", start.elapsed().as_millis());

    section("4️⃣  Control de Concurrencia - lotes de 3");
    let start = Instant::now();
    batches(10, 3, 200);
    println!("   ✅ 10 tareas completadas en lotes de 3 ({}ms)", start.elapsed().as_millis());

    let _ = fs::remove_dir(&base);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_walkthrough() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("sync");

        let content = blocking_walkthrough(&dir).unwrap();

        assert_eq!(content, format!("{}{}", FIRST_LINE, SECOND_LINE));
        assert!(!dir.exists());
    }

    #[test]
    fn test_background_walkthrough_steps_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let steps: Vec<Step> = background_walkthrough(tmp.path().join("async")).into_iter().collect();

        assert_eq!(
            steps,
            vec![
                Step::DirCreated,
                Step::Written,
                Step::Read(FIRST_LINE.to_string()),
                Step::Appended,
                Step::ReadFinal(format!("{}{}", FIRST_LINE, SECOND_LINE)),
                Step::CleanedUp,
            ]
        );
    }

    #[test]
    fn test_parallel_is_faster_than_sequential() {
        let tasks = [("a", 100), ("b", 100), ("c", 100)];

        let (seq_results, seq_time) = sequential(&tasks);
        let (par_results, par_time) = parallel(&tasks);

        assert_eq!(seq_results, par_results);
        assert!(seq_time >= Duration::from_millis(300));
        assert!(par_time < seq_time);
    }

    #[test]
    fn test_parallel_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("par");

        let contents = parallel_files(&dir, 3).unwrap();

        assert_eq!(contents, vec!["Contenido 1", "Contenido 2", "Contenido 3"]);
        assert!(!dir.exists());
    }

    #[test]
    fn test_batches() {
        assert_eq!(batches(10, 3, 1), vec![3, 3, 3, 1]);
        assert_eq!(batches(0, 3, 1), Vec::<usize>::new());
    }
}
