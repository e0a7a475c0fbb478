use reqwest::header::{HeaderName, HeaderValue};

use crate::config::settings::ForwardConfig;
use crate::error::{RelayError, Result};
use crate::utils::constants::{DEFAULT_AUTH_HEADER, ENV_FORWARD_KEY, ENV_FORWARD_URL};

const HINT_ARGS: &str = "a non-empty url and key";
const HINT_CONFIG_FILE: &str = "forward.url and forward.key in the config file";

/// Destination and credential of the remote forward.
///
/// Invariant: `url` is non-empty, `key` is a valid non-empty header value and
/// `header` is a valid header name. Built once at startup and then shared read-only.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    url: String,
    key: HeaderValue,
    header: HeaderName,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        Self::with_header(url, key, DEFAULT_AUTH_HEADER)
    }

    pub fn with_header(
        url: impl Into<String>,
        key: impl Into<String>,
        header: &str,
    ) -> Result<Self> {
        Self::build(url.into(), key.into(), header, || RelayError::MissingEndpoint {
            hint: HINT_ARGS,
        })
    }

    /// Reads `DAVID_SLING_URL` and `DAVIDS_POUCH_KEY`; unset and empty are both missing.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(ENV_FORWARD_URL).unwrap_or_default();
        let key = std::env::var(ENV_FORWARD_KEY).unwrap_or_default();
        Self::build(url, key, DEFAULT_AUTH_HEADER, || RelayError::MissingConfig {
            url_var: ENV_FORWARD_URL,
            key_var: ENV_FORWARD_KEY,
        })
    }

    /// Config file block wins; the environment is the fallback.
    pub fn resolve(forward: Option<&ForwardConfig>) -> Result<Self> {
        match forward {
            Some(cfg) => Self::build(cfg.url.clone(), cfg.key.clone(), &cfg.header, || {
                RelayError::MissingEndpoint { hint: HINT_CONFIG_FILE }
            }),
            None => Self::from_env(),
        }
    }

    fn build(
        url: String,
        key: String,
        header: &str,
        missing: impl FnOnce() -> RelayError,
    ) -> Result<Self> {
        if url.trim().is_empty() || key.trim().is_empty() {
            return Err(missing());
        }
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|_| RelayError::InvalidHeader(header.to_owned()))?;
        let mut key = HeaderValue::from_str(&key).map_err(|_| RelayError::InvalidKey)?;
        key.set_sensitive(true);
        Ok(Self { url, key, header })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> &HeaderValue {
        &self.key
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(ENV_FORWARD_URL);
        std::env::remove_var(ENV_FORWARD_KEY);
    }

    #[test]
    #[serial]
    fn from_env_requires_both_variables() {
        clear_env();
        std::env::set_var(ENV_FORWARD_URL, "http://localhost:9000/ingest");
        let res = EndpointConfig::from_env();
        assert!(matches!(res, Err(RelayError::MissingConfig { .. })));

        clear_env();
        std::env::set_var(ENV_FORWARD_KEY, "secret");
        let res = EndpointConfig::from_env();
        assert!(matches!(res, Err(RelayError::MissingConfig { .. })));
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_treats_empty_as_missing() {
        clear_env();
        std::env::set_var(ENV_FORWARD_URL, "");
        std::env::set_var(ENV_FORWARD_KEY, "secret");
        assert!(EndpointConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_reads_both_values() {
        clear_env();
        std::env::set_var(ENV_FORWARD_URL, "http://localhost:9000/ingest");
        std::env::set_var(ENV_FORWARD_KEY, "secret");
        let endpoint = EndpointConfig::from_env().unwrap();
        assert_eq!(endpoint.url(), "http://localhost:9000/ingest");
        assert_eq!(endpoint.key().to_str().unwrap(), "secret");
        assert!(endpoint.key().is_sensitive());
        assert_eq!(endpoint.header().as_str(), DEFAULT_AUTH_HEADER);
        clear_env();
    }

    #[test]
    fn resolve_prefers_config_block() {
        let cfg = ForwardConfig {
            url: "http://example.test/hook".to_owned(),
            key: "k".to_owned(),
            header: "x-custom-key".to_owned(),
        };
        let endpoint = EndpointConfig::resolve(Some(&cfg)).unwrap();
        assert_eq!(endpoint.url(), "http://example.test/hook");
        assert_eq!(endpoint.header().as_str(), "x-custom-key");
    }

    #[test]
    fn rejects_invalid_header_name() {
        let res = EndpointConfig::with_header("http://example.test", "k", "bad header");
        assert!(matches!(res, Err(RelayError::InvalidHeader(_))));
    }

    #[test]
    fn empty_config_block_names_the_config_file() {
        let cfg = ForwardConfig {
            url: "http://example.test/hook".to_owned(),
            key: "".to_owned(),
            header: DEFAULT_AUTH_HEADER.to_owned(),
        };
        let err = EndpointConfig::resolve(Some(&cfg)).unwrap_err();
        assert!(matches!(err, RelayError::MissingEndpoint { .. }));
        let msg = err.to_string();
        assert!(msg.contains("forward.key"), "{msg}");
        assert!(!msg.contains(ENV_FORWARD_URL), "{msg}");
    }

    #[test]
    fn rejects_key_that_is_not_a_header_value() {
        let res = EndpointConfig::new("http://example.test", "line\nbreak");
        assert!(matches!(res, Err(RelayError::InvalidKey)));

        let res = EndpointConfig::new("http://example.test", "bell\u{7}");
        assert!(matches!(res, Err(RelayError::InvalidKey)));
    }
}
