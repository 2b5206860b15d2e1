//! # Plataforma
//! src/probes/platform.rs
//!
//! Cada sonda elige el comando según la plataforma. Los nombres que salen en
//! el JSON (`darwin`, `linux`, `win32`, `x64`, `arm64`) son los que ya
//! consumen los clientes del dashboard.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other(String),
}

impl Platform {
    /// Plataforma en la que se compiló el binario
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::MacOs => "darwin",
            Platform::Linux => "linux",
            Platform::Windows => "win32",
            Platform::Other(name) => name,
        }
    }

    /// Nombre del tipo de sistema (`uname -s`)
    pub fn os_type(&self) -> &str {
        match self {
            Platform::MacOs => "Darwin",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows_NT",
            Platform::Other(name) => name,
        }
    }

    pub fn is_unix_like(&self) -> bool {
        matches!(self, Platform::MacOs | Platform::Linux)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arquitectura con los nombres cortos habituales
pub fn arch() -> &'static str {
    arch_name(std::env::consts::ARCH)
}

pub fn arch_name(arch: &'static str) -> &'static str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        other => other,
    }
}
