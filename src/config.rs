// nc_bulk_loader/src/config.rs
// Connection settings for the target search engine.

use url::Url;

use crate::error::{LoaderError, Result};

/// Process-wide connection settings, built once and handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ConnectionConfig {
    pub host:                String,
    pub port:                u16,
    pub use_tls:             bool,
    pub verify_certificates: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host:                crate::DEFAULT_HOST.to_string(),
            port:                crate::DEFAULT_PORT,
            use_tls:             false,
            verify_certificates: false,
        }
    }
}

impl ConnectionConfig {
    /// Base URL of the single node this loader talks to.
    pub fn url(&self,) -> Result<Url,> {
        let scheme = if self.use_tls { "https" } else { "http" };
        let host = self.host.trim();
        if host.is_empty() {
            return Err(LoaderError::ConfigurationError("host must not be empty".to_string(),),);
        }
        Url::parse(&format!("{}://{}:{}", scheme, host, self.port),).map_err(|e| {
            LoaderError::ConfigurationError(format!("Invalid address {}:{}: {}", host, self.port, e),)
        },)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_plain_http_node() {
        let config = ConnectionConfig::default();
        assert_eq!(config.url().unwrap().as_str(), "http://localhost:9200/");
        assert!(!config.verify_certificates);
    }

    #[test]
    fn tls_switches_scheme() {
        let config = ConnectionConfig {
            host: "search.internal".to_string(),
            port: 443,
            use_tls: true,
            ..Default::default()
        };
        // 443 is the https default, so the port is elided
        assert_eq!(config.url().unwrap().as_str(), "https://search.internal/");
    }

    #[test]
    fn blank_host_is_rejected() {
        let config = ConnectionConfig {
            host: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.url(), Err(LoaderError::ConfigurationError(_))));
    }
}
