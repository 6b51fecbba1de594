//! Host document configuration

use serde::Deserialize;

use dq_css::DEFAULT_VENDOR_PREFIXES;

/// Configuration for a [`Dom`](crate::Dom)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the host document
    pub url: String,

    /// Prefixes tried, in order, for unsupported style properties
    pub vendor_prefixes: Vec<String>,

    /// Keep whitespace-only text nodes when parsing
    pub keep_whitespace_text: bool,
}

impl Config {
    /// Read a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            vendor_prefixes: DEFAULT_VENDOR_PREFIXES.iter().map(|p| p.to_string()).collect(),
            keep_whitespace_text: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.url, "about:blank");
        assert_eq!(config.vendor_prefixes, ["Moz", "Webkit", "O", "ms"]);
        assert!(!config.keep_whitespace_text);
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{"vendor_prefixes": ["Webkit"]}"#).unwrap();
        assert_eq!(config.vendor_prefixes, ["Webkit"]);
        assert_eq!(config.url, "about:blank");
        assert!(Config::from_json("{\"url\": 3}").is_err());
    }
}
