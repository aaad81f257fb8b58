use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{key} invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tesseract language codes, e.g. `["eng", "jpn"]`.
    pub languages: Vec<String>,
    pub tessdata_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            languages: vec!["eng".to_string()],
            tessdata_dir: None,
            log_format: LogFormat::Pretty,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then the TOML file named by `$OCR_CONFIG`, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var_os("OCR_CONFIG") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validated()
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("OCR_HOST") {
            self.host = host;
        }
        if let Some(port) = get("OCR_PORT") {
            self.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid { key: "OCR_PORT", message: e.to_string() }
            })?;
        }
        if let Some(langs) = get("OCR_LANGUAGES") {
            self.languages = langs
                .split(',')
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
        }
        if let Some(dir) = get("TESSDATA_DIR") {
            self.tessdata_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = get("LOG_FORMAT") {
            self.log_format = format
                .parse()
                .map_err(|message| ConfigError::Invalid { key: "LOG_FORMAT", message })?;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::Invalid {
                key: "languages",
                message: "at least one language is required".to_string(),
            });
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "OCR_HOST",
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let c = ServerConfig::default();
        assert_eq!(c.port, 5001);
        assert_eq!(c.languages, vec!["eng"]);
        assert_eq!(c.bind_addr().unwrap().to_string(), "0.0.0.0:5001");
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let c = ServerConfig::from_toml("port = 6000\nlanguages = [\"eng\", \"jpn\"]\n").unwrap();
        assert_eq!(c.port, 6000);
        assert_eq!(c.languages, vec!["eng", "jpn"]);
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.log_format, LogFormat::Pretty);
    }

    #[test]
    fn toml_log_format_is_lowercase() {
        let c = ServerConfig::from_toml("log_format = \"json\"").unwrap();
        assert_eq!(c.log_format, LogFormat::Json);
    }

    #[test]
    fn env_overrides_win() {
        let c = ServerConfig::default()
            .with_overrides(env(&[
                ("OCR_HOST", "127.0.0.1"),
                ("OCR_PORT", "7000"),
                ("OCR_LANGUAGES", "eng, jpn ,"),
                ("TESSDATA_DIR", "/usr/share/tessdata"),
                ("LOG_FORMAT", "JSON"),
            ]))
            .unwrap();
        assert_eq!(c.bind_addr().unwrap().to_string(), "127.0.0.1:7000");
        assert_eq!(c.languages, vec!["eng", "jpn"]);
        assert_eq!(c.tessdata_dir, Some(PathBuf::from("/usr/share/tessdata")));
        assert_eq!(c.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let c = ServerConfig::default().with_overrides(env(&[("OCR_PORT", "  ")])).unwrap();
        assert_eq!(c.port, 5001);
    }

    #[test]
    fn bad_port_names_the_key() {
        let err = ServerConfig::default()
            .with_overrides(env(&[("OCR_PORT", "fifty")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("OCR_PORT invalid"));
    }

    #[test]
    fn empty_language_list_is_rejected() {
        assert!(ServerConfig::from_toml("languages = []").is_err());
        let err = ServerConfig::default()
            .with_overrides(env(&[("OCR_LANGUAGES", ",,")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "languages", .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ServerConfig::from_file(PathBuf::from("/no/such/ocr.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
