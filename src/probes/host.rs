//! # Host
//! src/probes/host.rs
//!
//! Hostname, release del kernel y tipo de SO vía `uname(2)`.

use super::platform::Platform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    pub kernel: String,
    pub os_type: String,
}

impl HostInfo {
    #[cfg(unix)]
    pub fn detect() -> Self {
        // SAFETY: uname solo escribe dentro del struct que le pasamos
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut uts) } != 0 {
            log::debug!("uname falló: {}", std::io::Error::last_os_error());
            return Self::unknown();
        }

        Self {
            hostname: c_chars_to_string(&uts.nodename),
            kernel: c_chars_to_string(&uts.release),
            os_type: c_chars_to_string(&uts.sysname),
        }
    }

    #[cfg(not(unix))]
    pub fn detect() -> Self {
        Self {
            hostname: std::env::var("COMPUTERNAME").unwrap_or_else(|_| "localhost".to_string()),
            ..Self::unknown()
        }
    }

    fn unknown() -> Self {
        Self {
            hostname: "localhost".to_string(),
            kernel: "N/A".to_string(),
            os_type: Platform::current().os_type().to_string(),
        }
    }
}

/// Convierte un buffer `c_char` terminado en NUL
pub fn c_chars_to_string(chars: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
