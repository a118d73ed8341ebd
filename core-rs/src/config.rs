/**
 * config.rs
 * Settings for the Units service (YAML format + environment overrides)
 *
 * Format:
 * ```yaml
 * sparqlUrl: http://localhost:3030/vocab/sparql
 * vocabPrefix: https://vocab.sentier.dev/
 * graphNamespaces: [qudt, simapro]
 * hostIp: 0.0.0.0
 * port: 8000
 * requestTimeoutSecs: 30
 * logFilter: info
 * localDataset: ./vocab.trig   # optional
 * ```
 *
 * Every field is optional in the file. Environment variables win over the
 * file: SPARQL_URL, VOCAB_PREFIX, GRAPH_NAMESPACES (comma separated),
 * HOST_IP, PORT, REQUEST_TIMEOUT_SECS, LOG_FILTER, LOCAL_DATASET.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{Result, UnitsError};

pub const DEFAULT_SPARQL_URL: &str = "http://localhost:3030/vocab/sparql";
pub const DEFAULT_VOCAB_PREFIX: &str = "https://vocab.sentier.dev/";
pub const DEFAULT_GRAPH_NAMESPACES: [&str; 2] = ["qudt", "simapro"];

/// Service settings
///
/// Passed explicitly to the executor and the concept service; nothing reads
/// it from a global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sparql_url: String,
    pub vocab_prefix: String,
    pub graph_namespaces: Vec<String>,
    pub host_ip: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub log_filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_dataset: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sparql_url: DEFAULT_SPARQL_URL.to_string(),
            vocab_prefix: DEFAULT_VOCAB_PREFIX.to_string(),
            graph_namespaces: DEFAULT_GRAPH_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
            host_ip: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
            log_filter: "info".to_string(),
            local_dataset: None,
        }
    }
}

/// Split a comma separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Settings {
    /// Load settings from a YAML file
    ///
    /// # Example
    /// ```no_run
    /// use units_core::config::Settings;
    ///
    /// let settings = Settings::load("units.yaml").unwrap();
    /// assert!(settings.vocab_prefix.ends_with('/'));
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UnitsError::Config(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)
            .map_err(|e| UnitsError::Config(format!("Invalid settings YAML: {}", e)))?;

        Ok(settings)
    }

    /// Defaults, then the optional file, then the process environment
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SPARQL_URL") {
            self.sparql_url = url;
        }
        if let Some(prefix) = lookup("VOCAB_PREFIX") {
            self.vocab_prefix = prefix;
        }
        if let Some(namespaces) = lookup("GRAPH_NAMESPACES") {
            self.graph_namespaces = split_list(&namespaces);
        }
        if let Some(host) = lookup("HOST_IP") {
            self.host_ip = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|_| UnitsError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout.parse().map_err(|_| {
                UnitsError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
        }
        if let Some(filter) = lookup("LOG_FILTER") {
            self.log_filter = filter;
        }
        if let Some(dataset) = lookup("LOCAL_DATASET") {
            self.local_dataset = Some(PathBuf::from(dataset));
        }
        Ok(self)
    }

    /// Validate settings
    ///
    /// Ensures:
    /// - sparqlUrl is an http(s) URL
    /// - vocabPrefix ends with '/'
    /// - graphNamespaces is non-empty and no namespace contains '/'
    /// - requestTimeoutSecs is positive
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.sparql_url)
            .map_err(|e| UnitsError::Config(format!("Invalid sparqlUrl '{}': {}", self.sparql_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UnitsError::Config(format!(
                "sparqlUrl must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if !self.vocab_prefix.ends_with('/') {
            return Err(UnitsError::Config(format!(
                "vocabPrefix must end with '/': {}",
                self.vocab_prefix
            )));
        }

        if self.graph_namespaces.is_empty() {
            return Err(UnitsError::Config(
                "graphNamespaces cannot be empty".to_string(),
            ));
        }

        if let Some(bad) = self
            .graph_namespaces
            .iter()
            .find(|ns| ns.is_empty() || ns.contains('/'))
        {
            return Err(UnitsError::Config(format!(
                "Invalid graph namespace: '{}'",
                bad
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(UnitsError::Config(
                "requestTimeoutSecs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host_ip, self.port)
    }
}
