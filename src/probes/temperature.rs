//! # Temperaturas
//! src/probes/temperature.rs
//!
//! Cascada de sondas externas, cada una opcional:
//!
//! ```text
//! macOS:  system_profiler (nombre GPU) → iSMC → smctemp → osx-cpu-temp
//! Linux:  sensors -j (lm-sensors) → systemstat::cpu_temp
//! otros:  nada, solo un aviso
//! ```
//!
//! Los sensores se normalizan a `(key, descripción, valor)` y luego unas
//! heurísticas eligen la temperatura de CPU, GPU y la lista por núcleo.

use super::command::CommandRunner;
use super::platform::Platform;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use systemstat::{Platform as _, System};

const ISMC_TIMEOUT: Duration = Duration::from_millis(4000);
const PROFILER_TIMEOUT: Duration = Duration::from_millis(2500);
const SENSORS_TIMEOUT: Duration = Duration::from_millis(3000);
const SMALL_TIMEOUT: Duration = Duration::from_millis(1500);
const TOP_SENSORS: usize = 8;

const PREFERRED_CPU_KEYS: &[&str] = &["TC0P", "TC0D", "TC0E", "TC0F", "TC0H"];

const KEY_FIELDS: &[&str] = &["key", "Key", "smc_key", "SMCKey", "name", "Name", "sensor", "Sensor"];
const DESC_FIELDS: &[&str] = &["desc", "Desc", "description", "Description", "label", "Label", "human", "Human"];
const VALUE_FIELDS: &[&str] = &[
    "value", "Value", "temp", "Temp", "temperature", "Temperature", "reading", "Reading",
];

pub const WARN_ISMC_FAILED: &str = "iSMC falló al entregar JSON (o no fue parseable).";
pub const WARN_ISMC_EMPTY: &str =
    "iSMC respondió, pero no se pudieron parsear temperaturas (formato/sensores no disponibles).";
pub const WARN_SENSORS_FAILED: &str = "lm-sensors (sensors -j) falló o su salida no fue parseable.";
pub const WARN_NO_CORES: &str =
    "Tu equipo no expone temperatura por núcleo (Core X) vía SMC/lm-sensors, o no hay keys TC#C disponibles.";
pub const WARN_UNSUPPORTED: &str = "Detalle térmico por núcleo no disponible en esta plataforma.";

/// Lectura normalizada de un sensor
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub key: String,
    pub desc: String,
    pub value: Option<f64>,
}

impl Sensor {
    pub fn new(key: &str, desc: &str, value: Option<f64>) -> Self {
        Self {
            key: key.trim().to_string(),
            desc: desc.trim().to_string(),
            value,
        }
    }

    fn label(&self) -> &str {
        if self.desc.is_empty() {
            &self.key
        } else {
            &self.desc
        }
    }

    fn source_name(&self) -> &str {
        if self.key.is_empty() {
            &self.desc
        } else {
            &self.key
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreTemp {
    #[serde(rename = "nucleo")]
    pub core: String,
    pub c: f64,
    #[serde(skip)]
    index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSensor {
    #[serde(rename = "nombre")]
    pub name: String,
    pub key: String,
    pub c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuTemps {
    pub package: Option<f64>,
    #[serde(rename = "fuente")]
    pub source: String,
    #[serde(rename = "porNucleo")]
    pub per_core: Vec<CoreTemp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuTemps {
    pub temp: Option<f64>,
    #[serde(rename = "fuente")]
    pub source: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Temperatures {
    pub cpu: CpuTemps,
    pub gpu: GpuTemps,
    #[serde(rename = "topSensores")]
    pub top_sensors: Vec<TopSensor>,
    pub warnings: Vec<String>,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            cpu: CpuTemps {
                package: None,
                source: "N/A".to_string(),
                per_core: Vec::new(),
            },
            gpu: GpuTemps {
                temp: None,
                source: "N/A".to_string(),
                name: String::new(),
            },
            top_sensors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl Temperatures {
    /// Agrega un aviso si no estaba ya
    pub fn warn(&mut self, message: &str) {
        if !self.warnings.iter().any(|w| w == message) {
            self.warnings.push(message.to_string());
        }
    }

    fn apply(&mut self, summary: SensorSummary) {
        self.cpu.per_core = summary.cores;
        if let Some((value, source)) = summary.cpu {
            self.cpu.package = Some(value);
            self.cpu.source = source;
        }
        if let Some((value, source)) = summary.gpu {
            self.gpu.temp = Some(value);
            self.gpu.source = source;
        }
        self.top_sensors = summary.top;
    }
}

/// Resultado de aplicar las heurísticas a una lista de sensores
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorSummary {
    pub cores: Vec<CoreTemp>,
    pub cpu: Option<(f64, String)>,
    pub gpu: Option<(f64, String)>,
    pub top: Vec<TopSensor>,
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+(?:[.,]\d+)?").expect("regex válida"))
}

fn core_desc_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)core\s*(\d+)").expect("regex válida"))
}

fn core_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^TC(\d)C$").expect("regex válida"))
}

fn gpu_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^TG\d[DP]$").expect("regex válida"))
}

/// Primer número del texto, aceptando coma decimal
///
/// ```
/// use monitor_dashboard::probes::temperature::parse_temp;
///
/// assert_eq!(parse_temp("CPU: 61,5°C"), Some(61.5));
/// assert_eq!(parse_temp("sin datos"), None);
/// ```
pub fn parse_temp(text: &str) -> Option<f64> {
    number_regex()
        .find(text)
        .and_then(|m| m.as_str().replace(',', ".").parse().ok())
}

/// `"61.5 °C"` o `N/A`
pub fn format_celsius(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1} °C", v),
        _ => "N/A".to_string(),
    }
}

/// Salida de `iSMC temp -o json`: array, objeto con arrays anidados o NDJSON
pub fn parse_ismc_output(raw: &str) -> Vec<Value> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            let mut found = Vec::new();
            let mut stack = vec![other];
            while let Some(current) = stack.pop() {
                match current {
                    Value::Array(items) => found.extend(items),
                    Value::Object(map) => stack.extend(map.into_iter().map(|(_, v)| v)),
                    _ => {}
                }
            }
            found
        }
        Err(_) => text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect(),
    }
}

/// Convierte un objeto JSON con nombres de campo variables en un `Sensor`
pub fn normalize_sensor(value: &Value) -> Option<Sensor> {
    let object = value.as_object()?;

    let text_of = |fields: &[&str]| -> String {
        fields
            .iter()
            .find_map(|f| object.get(*f).filter(|v| !v.is_null()))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    };

    let key = text_of(KEY_FIELDS);
    let desc = text_of(DESC_FIELDS);
    if key.trim().is_empty() && desc.trim().is_empty() {
        return None;
    }

    let reading = text_of(VALUE_FIELDS);
    Some(Sensor::new(&key, &desc, parse_temp(&reading)))
}

/// Sensores de `sensors -j`: chip → feature → `tempN_input`
pub fn parse_lm_sensors(raw: &str) -> Option<Vec<Sensor>> {
    let root: Value = serde_json::from_str(raw.trim()).ok()?;
    let chips = root.as_object()?;

    let mut sensors = Vec::new();
    for (chip, features) in chips {
        let Some(features) = features.as_object() else {
            continue;
        };
        for (feature, readings) in features {
            let Some(readings) = readings.as_object() else {
                continue;
            };
            let input = readings
                .iter()
                .find(|(name, _)| name.starts_with("temp") && name.ends_with("_input"))
                .and_then(|(_, v)| v.as_f64());
            if let Some(celsius) = input {
                sensors.push(Sensor::new(chip, feature, Some(celsius)));
            }
        }
    }
    Some(sensors)
}

fn is_cpu_like(sensor: &Sensor) -> bool {
    let desc = sensor.desc.to_lowercase();
    let key = sensor.key.to_lowercase();
    desc.contains("cpu")
        || ["coretemp", "k10temp", "zenpower"]
            .iter()
            .any(|chip| key.starts_with(chip))
}

fn is_gpu_like(sensor: &Sensor) -> bool {
    let key = sensor.key.to_lowercase();
    sensor.desc.to_lowercase().contains("gpu")
        || ["amdgpu", "nouveau", "radeon"]
            .iter()
            .any(|chip| key.starts_with(chip))
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    let text = text.to_lowercase();
    words.iter().any(|w| text.contains(w))
}

/// Elige CPU, GPU, núcleos y top de sensores; `source` nombra la herramienta
pub fn summarize(sensors: &[Sensor], source: &str) -> SensorSummary {
    let with_value: Vec<(&Sensor, f64)> = sensors
        .iter()
        .filter_map(|s| s.value.filter(|v| v.is_finite()).map(|v| (s, v)))
        .collect();

    let mut cores: Vec<CoreTemp> = with_value
        .iter()
        .filter_map(|(s, c)| {
            let key = s.key.to_uppercase();
            let index = core_desc_regex()
                .captures(&s.desc)
                .or_else(|| core_key_regex().captures(&key))
                .and_then(|caps| caps[1].parse::<u32>().ok())?;
            Some(CoreTemp {
                core: format!("Core {}", index),
                c: *c,
                index,
            })
        })
        .collect();
    cores.sort_by_key(|core| core.index);

    let cpu = if !cores.is_empty() {
        let max = cores.iter().map(|c| c.c).fold(f64::MIN, f64::max);
        Some((max, format!("{} (max core)", source)))
    } else {
        let key_hit = with_value
            .iter()
            .find(|(s, _)| PREFERRED_CPU_KEYS.contains(&s.key.to_uppercase().as_str()));
        let desc_hit = || {
            with_value
                .iter()
                .find(|(s, _)| is_cpu_like(s) && contains_any(&s.desc, &["die", "package", "proximity", "peci"]))
                .or_else(|| {
                    with_value
                        .iter()
                        .find(|(s, _)| contains_any(&s.desc, &["proximity"]) && is_cpu_like(s))
                })
                .or_else(|| with_value.iter().find(|(s, _)| is_cpu_like(s)))
        };
        key_hit
            .or_else(desc_hit)
            .map(|(s, c)| (*c, format!("{} ({})", source, s.source_name())))
    };

    let gpu = with_value
        .iter()
        .find(|(s, _)| gpu_key_regex().is_match(&s.key.to_uppercase()))
        .or_else(|| with_value.iter().find(|(s, _)| s.key.to_uppercase().starts_with("TG0")))
        .or_else(|| {
            with_value
                .iter()
                .find(|(s, _)| is_gpu_like(s) && contains_any(&s.desc, &["die", "proximity", "temp", "core", "edge", "junction"]))
        })
        .or_else(|| with_value.iter().find(|(s, _)| is_gpu_like(s)))
        .map(|(s, c)| (*c, format!("{} ({})", source, s.source_name())));

    let mut top: Vec<TopSensor> = with_value
        .iter()
        .map(|(s, c)| TopSensor {
            name: s.label().to_string(),
            key: s.key.clone(),
            c: *c,
        })
        .collect();
    top.sort_by(|a, b| b.c.total_cmp(&a.c));
    top.truncate(TOP_SENSORS);

    SensorSummary { cores, cpu, gpu, top }
}

/// `Chipset Model: Apple M2` de `system_profiler SPDisplaysDataType`
pub fn parse_gpu_name(profiler: &str) -> Option<String> {
    profiler.lines().find_map(|line| {
        let (_, name) = line.split_once("Chipset Model:")?;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Ejecuta la cascada para la plataforma actual
pub fn temperatures(runner: &dyn CommandRunner, platform: &Platform) -> Temperatures {
    let mut temps = Temperatures::default();

    match platform {
        Platform::MacOs => macos(runner, &mut temps),
        Platform::Linux => linux(runner, &mut temps),
        _ => {
            temps.warn(WARN_UNSUPPORTED);
            return temps;
        }
    }

    if temps.cpu.per_core.is_empty() {
        temps.warn(WARN_NO_CORES);
    }
    temps
}

fn macos(runner: &dyn CommandRunner, temps: &mut Temperatures) {
    if let Some(name) = runner
        .run("system_profiler", &["SPDisplaysDataType"], PROFILER_TIMEOUT)
        .stdout_if_ok()
        .and_then(parse_gpu_name)
    {
        temps.gpu.name = name;
    }

    if runner.available("iSMC") {
        let out = runner.run("iSMC", &["temp", "-o", "json"], ISMC_TIMEOUT);
        match out.stdout_if_ok() {
            Some(stdout) => {
                let sensors: Vec<Sensor> = parse_ismc_output(stdout)
                    .iter()
                    .filter_map(normalize_sensor)
                    .collect();
                let summary = summarize(&sensors, "iSMC");
                if summary.top.is_empty() {
                    temps.warn(WARN_ISMC_EMPTY);
                }
                temps.apply(summary);
            }
            None => {
                log::debug!("iSMC falló: {}", out.stderr.trim());
                temps.warn(WARN_ISMC_FAILED);
            }
        }
    }

    if runner.available("smctemp") {
        if temps.cpu.package.is_none() {
            if let Some(c) = single_reading(runner, "smctemp", &["-c"]) {
                temps.cpu.package = Some(c);
                temps.cpu.source = "smctemp".to_string();
            }
        }
        if temps.gpu.temp.is_none() {
            if let Some(c) = single_reading(runner, "smctemp", &["-g"]) {
                temps.gpu.temp = Some(c);
                temps.gpu.source = "smctemp".to_string();
            }
        }
    }

    if temps.cpu.package.is_none() && runner.available("osx-cpu-temp") {
        if let Some(c) = single_reading(runner, "osx-cpu-temp", &[]) {
            temps.cpu.package = Some(c);
            temps.cpu.source = "osx-cpu-temp".to_string();
        }
    }
}

fn linux(runner: &dyn CommandRunner, temps: &mut Temperatures) {
    if runner.available("sensors") {
        let out = runner.run("sensors", &["-j"], SENSORS_TIMEOUT);
        match out.stdout_if_ok().and_then(parse_lm_sensors) {
            Some(sensors) => temps.apply(summarize(&sensors, "lm-sensors")),
            None => {
                log::debug!("sensors -j falló: {}", out.stderr.trim());
                temps.warn(WARN_SENSORS_FAILED);
            }
        }
    }

    if temps.cpu.package.is_none() {
        match System::new().cpu_temp() {
            Ok(c) if c.is_finite() && c > 0.0 => {
                temps.cpu.package = Some(c as f64);
                temps.cpu.source = "systemstat".to_string();
            }
            Ok(_) => {}
            Err(e) => log::debug!("cpu_temp no disponible: {}", e),
        }
    }
}

fn single_reading(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> Option<f64> {
    runner
        .run(program, args, SMALL_TIMEOUT)
        .stdout_if_ok()
        .and_then(parse_temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::command::FakeRunner;
    use serde_json::json;

    const ISMC_JSON: &str = r#"[
        {"key": "TC0P", "desc": "CPU Proximity", "value": "48.2 °C"},
        {"key": "TC1C", "desc": "CPU Core 1", "value": 55.0},
        {"key": "TC0C", "desc": "CPU Core 0", "value": "52,5"},
        {"key": "TG0D", "desc": "GPU Die", "value": "41.0"},
        {"key": "TB0T", "desc": "Battery", "value": "30.1"},
        {"key": "TXXX", "desc": "Broken", "value": "n/a"}
    ]"#;

    const SENSORS_JSON: &str = r#"{
        "coretemp-isa-0000": {
            "Adapter": "ISA adapter",
            "Package id 0": {"temp1_input": 61.0, "temp1_max": 100.0},
            "Core 0": {"temp2_input": 58.0, "temp2_max": 100.0},
            "Core 1": {"temp3_input": 60.0, "temp3_max": 100.0}
        },
        "nvme-pci-0100": {
            "Adapter": "PCI adapter",
            "Composite": {"temp1_input": 39.85}
        }
    }"#;

    #[test]
    fn test_parse_temp() {
        assert_eq!(parse_temp("52,5"), Some(52.5));
        assert_eq!(parse_temp("-3.25C"), Some(-3.25));
        assert_eq!(parse_temp("61"), Some(61.0));
        assert_eq!(parse_temp(""), None);
    }

    #[test]
    fn test_format_celsius() {
        assert_eq!(format_celsius(Some(48.25)), "48.2 °C");
        assert_eq!(format_celsius(None), "N/A");
        assert_eq!(format_celsius(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_parse_ismc_array_and_nested() {
        assert_eq!(parse_ismc_output(ISMC_JSON).len(), 6);

        let nested = r#"{"data": {"temps": [{"key": "A"}, {"key": "B"}]}, "other": [{"key": "C"}]}"#;
        assert_eq!(parse_ismc_output(nested).len(), 3);
    }

    #[test]
    fn test_parse_ismc_ndjson() {
        let ndjson = "{\"key\": \"TC0P\", \"value\": 40}\nnot json\n{\"key\": \"TG0P\", \"value\": 35}\n";
        let items = parse_ismc_output(ndjson);

        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["key"], "TG0P");
        assert!(parse_ismc_output("   ").is_empty());
    }

    #[test]
    fn test_normalize_sensor_aliases() {
        let sensor = normalize_sensor(&json!({"SMCKey": "TC0D", "Label": "CPU Die", "Temperature": "50,25 C"})).unwrap();
        assert_eq!(sensor, Sensor::new("TC0D", "CPU Die", Some(50.25)));

        let numeric = normalize_sensor(&json!({"name": "x", "reading": 12})).unwrap();
        assert_eq!(numeric.value, Some(12.0));

        assert!(normalize_sensor(&json!({"value": 10})).is_none());
        assert!(normalize_sensor(&json!("TC0P")).is_none());
    }

    #[test]
    fn test_summarize_ismc() {
        let sensors: Vec<Sensor> = parse_ismc_output(ISMC_JSON)
            .iter()
            .filter_map(normalize_sensor)
            .collect();
        let summary = summarize(&sensors, "iSMC");

        let cores: Vec<&str> = summary.cores.iter().map(|c| c.core.as_str()).collect();
        assert_eq!(cores, vec!["Core 0", "Core 1"]);
        assert_eq!(summary.cpu, Some((55.0, "iSMC (max core)".to_string())));
        assert_eq!(summary.gpu, Some((41.0, "iSMC (TG0D)".to_string())));
        assert_eq!(summary.top.len(), 5);
        assert_eq!(summary.top[0].c, 55.0);
    }

    #[test]
    fn test_summarize_core_from_smc_key() {
        let sensors = vec![
            Sensor::new("tc2c", "CPU Proximity", Some(60.0)),
            Sensor::new("TC0P", "CPU Proximity", Some(48.0)),
            Sensor::new("TC1C", "", Some(57.5)),
        ];
        let summary = summarize(&sensors, "iSMC");

        let cores: Vec<(&str, f64)> = summary.cores.iter().map(|c| (c.core.as_str(), c.c)).collect();
        assert_eq!(cores, vec![("Core 1", 57.5), ("Core 2", 60.0)]);
        assert_eq!(summary.cpu, Some((60.0, "iSMC (max core)".to_string())));
    }

    #[test]
    fn test_summarize_prefers_cpu_keys_without_cores() {
        let sensors = vec![
            Sensor::new("TA0P", "Ambient", Some(25.0)),
            Sensor::new("TC0D", "", Some(47.0)),
            Sensor::new("TCXX", "CPU Die", Some(49.0)),
        ];
        let summary = summarize(&sensors, "iSMC");
        assert_eq!(summary.cpu, Some((47.0, "iSMC (TC0D)".to_string())));
        assert!(summary.gpu.is_none());
    }

    #[test]
    fn test_summarize_cpu_by_description() {
        let sensors = vec![
            Sensor::new("", "CPU efficiency", Some(40.0)),
            Sensor::new("", "CPU package", Some(44.0)),
            Sensor::new("", "GPU cluster", Some(38.0)),
        ];
        let summary = summarize(&sensors, "iSMC");
        assert_eq!(summary.cpu, Some((44.0, "iSMC (CPU package)".to_string())));
        assert_eq!(summary.gpu, Some((38.0, "iSMC (GPU cluster)".to_string())));
    }

    #[test]
    fn test_top_sensors_capped() {
        let sensors: Vec<Sensor> = (0..12)
            .map(|i| Sensor::new(&format!("T{}", i), "", Some(i as f64)))
            .collect();
        let summary = summarize(&sensors, "x");

        assert_eq!(summary.top.len(), TOP_SENSORS);
        assert_eq!(summary.top[0].name, "T11");
    }

    #[test]
    fn test_parse_lm_sensors() {
        let sensors = parse_lm_sensors(SENSORS_JSON).unwrap();
        assert_eq!(sensors.len(), 4);

        let summary = summarize(&sensors, "lm-sensors");
        assert_eq!(summary.cores.len(), 2);
        assert_eq!(summary.cpu, Some((60.0, "lm-sensors (max core)".to_string())));
        assert!(parse_lm_sensors("not json").is_none());
    }

    #[test]
    fn test_parse_gpu_name() {
        let out = "Graphics/Displays:\n\n    Apple M2:\n\n      Chipset Model: Apple M2\n      Type: GPU\n";
        assert_eq!(parse_gpu_name(out).as_deref(), Some("Apple M2"));
        assert_eq!(parse_gpu_name("nothing"), None);
    }

    #[test]
    fn test_macos_cascade_with_ismc() {
        let runner = FakeRunner::new()
            .with_output("system_profiler SPDisplaysDataType", "      Chipset Model: Apple M1 Pro\n")
            .with_output("iSMC temp -o json", ISMC_JSON);

        let temps = temperatures(&runner, &Platform::MacOs);

        assert_eq!(temps.gpu.name, "Apple M1 Pro");
        assert_eq!(temps.cpu.package, Some(55.0));
        assert_eq!(temps.cpu.per_core.len(), 2);
        assert!(temps.warnings.is_empty());
    }

    #[test]
    fn test_macos_falls_back_to_smctemp_and_osx_cpu_temp() {
        let runner = FakeRunner::new()
            .with_failure("iSMC temp -o json", "permission denied")
            .with_failure("smctemp -c", "")
            .with_output("smctemp -g", "37.9\n")
            .with_output("osx-cpu-temp", "62.3°C\n");

        let temps = temperatures(&runner, &Platform::MacOs);

        assert_eq!(temps.cpu.package, Some(62.3));
        assert_eq!(temps.cpu.source, "osx-cpu-temp");
        assert_eq!(temps.gpu.temp, Some(37.9));
        assert_eq!(temps.gpu.source, "smctemp");
        assert_eq!(temps.warnings, vec![WARN_ISMC_FAILED.to_string(), WARN_NO_CORES.to_string()]);
    }

    #[test]
    fn test_linux_sensors() {
        let runner = FakeRunner::new().with_output("sensors -j", SENSORS_JSON);
        let temps = temperatures(&runner, &Platform::Linux);

        assert_eq!(temps.cpu.package, Some(60.0));
        assert_eq!(temps.cpu.source, "lm-sensors (max core)");
        assert_eq!(temps.top_sensors[0].name, "Package id 0");
        assert!(temps.warnings.is_empty());
    }

    #[test]
    fn test_unsupported_platform() {
        let temps = temperatures(&FakeRunner::new(), &Platform::Windows);
        assert_eq!(temps.warnings, vec![WARN_UNSUPPORTED.to_string()]);
        assert_eq!(temps.cpu.source, "N/A");
    }

    #[test]
    fn test_warnings_deduplicated() {
        let mut temps = Temperatures::default();
        temps.warn("a");
        temps.warn("a");
        assert_eq!(temps.warnings.len(), 1);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(Temperatures::default()).unwrap();
        assert!(json["cpu"]["porNucleo"].is_array());
        assert_eq!(json["gpu"]["fuente"], "N/A");
        assert!(json["topSensores"].is_array());
        assert!(json["cpu"]["package"].is_null());
    }
}
