//! Configuration loading and constants.
//!
//! Reads the bind address from the `IP` and `PORT` environment variables and
//! defines the constants for defaults, routing, and logging. `ServerConfig` is
//! built once at startup and passed by reference into listener setup.

use std::env::VarError;
use std::fmt;
use std::net::IpAddr;

// =============================================================================
// Environment
// =============================================================================

/// Environment variable holding the address or hostname to bind
pub const ENV_HOST: &str = "IP";

/// Environment variable holding the port to bind
pub const ENV_PORT: &str = "PORT";

/// Bind address used when `IP` is unset or empty (all IPv4 interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when `PORT` is unset or empty
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// Routing and Responses
// =============================================================================

/// Path of the only route
pub const ROOT_PATH: &str = "/";

/// Body returned for `GET /`, byte for byte (no trailing newline)
pub const GREETING: &str = "Hello World!";

/// Body returned for unmatched paths
pub const NOT_FOUND_BODY: &str = "Not Found";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "greeter=info";

/// Listener configuration.
///
/// Immutable once constructed; there is no way to reload it short of
/// restarting the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP literal or hostname to bind
    pub host: String,
    /// TCP port, always in `1..=65535`
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Load configuration through a lookup with the same contract as
    /// [`std::env::var`].
    ///
    /// Empty values are treated as unset. A value that is set but not valid
    /// unicode is rejected, as is a `PORT` that is not a decimal integer in
    /// `1..=65535`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let host = read_var(&lookup, ENV_HOST)
            .map_err(|value| ConfigError::InvalidHost { value })?
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let raw_port =
            read_var(&lookup, ENV_PORT).map_err(|value| ConfigError::InvalidPort { value })?;
        let port = match raw_port {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// `host:port` form of the configured address, for logs and diagnostics.
    pub fn addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => format!("[{}]:{}", self.host, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.addr())
    }
}

/// Trimmed, non-empty value of `name`. Non-unicode values come back as
/// `Err` holding a lossy rendering for the diagnostic.
fn read_var<F>(lookup: &F, name: &str) -> Result<Option<String>, String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) => {
            let value = value.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(raw.to_string_lossy().into_owned()),
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidPort {
            value: raw.to_string(),
        });
    }

    // All digits, so the only parse failure left is overflow
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::PortOutOfRange {
            value: raw.to_string(),
        }),
        Ok(port) => Ok(port),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid IP value {value:?}: not valid unicode")]
    InvalidHost { value: String },
    #[error("Invalid PORT value {value:?}: not an integer")]
    InvalidPort { value: String },
    #[error("Invalid PORT value {value:?}: must be between 1 and 65535")]
    PortOutOfRange { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned().ok_or(VarError::NotPresent))
    }

    #[cfg(unix)]
    fn load_raw(name: &'static str, bytes: &'static [u8]) -> Result<ServerConfig, ConfigError> {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        ServerConfig::from_lookup(move |var| {
            if var == name {
                Err(VarError::NotUnicode(OsString::from_vec(bytes.to_vec())))
            } else {
                Err(VarError::NotPresent)
            }
        })
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = load(&[("IP", ""), ("PORT", "  ")]).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_reads_ip_and_port() {
        let config = load(&[("IP", "127.0.0.1"), ("PORT", "9090")]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_hostname_is_kept_verbatim() {
        let config = load(&[("IP", "localhost")]).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_boundaries() {
        assert_eq!(load(&[("PORT", "1")]).unwrap().port, 1);
        assert_eq!(load(&[("PORT", "65535")]).unwrap().port, 65535);
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        for value in ["abc", "80a", "-1", "8080.0", "+80"] {
            let err = load(&[("PORT", value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidPort { .. }),
                "{value} should be InvalidPort, got {err:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range_port_is_rejected() {
        for value in ["0", "65536", "99999999999999999999"] {
            let err = load(&[("PORT", value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::PortOutOfRange { .. }),
                "{value} should be PortOutOfRange, got {err:?}"
            );
        }
    }

    #[test]
    fn test_error_message_names_variable_and_value() {
        let err = load(&[("PORT", "abc")]).unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid PORT value "abc": not an integer"#);
    }

    #[test]
    fn test_addr_formatting() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
        };
        assert_eq!(config.addr(), "127.0.0.1:9090");
        assert_eq!(ServerConfig::default().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_addr_brackets_ipv6() {
        let config = ServerConfig {
            host: "::1".to_string(),
            port: 8080,
        };
        assert_eq!(config.addr(), "[::1]:8080");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_port_is_rejected() {
        let err = load_raw("PORT", b"\xff80").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }), "{err:?}");
        assert!(err.to_string().starts_with("Invalid PORT value"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_ip_is_rejected() {
        let err = load_raw("IP", b"127.0.0.\xff").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }), "{err:?}");
        assert!(err.to_string().starts_with("Invalid IP value"));
    }
}
