use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_MARKERS_URL: &str = "https://www.bezrealitky.cz/api/record/markers";
pub const DEFAULT_LISTING_BASE_URL: &str = "https://www.bezrealitky.cz/nemovitosti-byty-domy/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Where to fetch markers from and how listing URLs are resolved.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub markers_url: Url,
    pub listing_base_url: Url,
    pub user_agent: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            markers_url: Url::parse(DEFAULT_MARKERS_URL).expect("default markers URL is valid"),
            listing_base_url: Url::parse(DEFAULT_LISTING_BASE_URL)
                .expect("default listing base URL is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Load configuration from the environment, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a URL override does not parse.
pub fn load_config() -> Result<ScoutConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
fn build_config<F>(lookup: F) -> Result<ScoutConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_url = |var: &str, default: &str| -> Result<Url, ConfigError> {
        let raw = or_default(var, default);
        Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    Ok(ScoutConfig {
        markers_url: parse_url("BEZREALITKY_MARKERS_URL", DEFAULT_MARKERS_URL)?,
        listing_base_url: parse_url("BEZREALITKY_LISTING_BASE_URL", DEFAULT_LISTING_BASE_URL)?,
        user_agent: or_default("BEZREALITKY_USER_AGENT", DEFAULT_USER_AGENT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(
        vars: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Result<String, std::env::VarError> {
        move |key| {
            vars.get(key)
                .map(|v| (*v).to_string())
                .ok_or(std::env::VarError::NotPresent)
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = build_config(lookup_from(HashMap::new())).unwrap();
        assert_eq!(config.markers_url.as_str(), DEFAULT_MARKERS_URL);
        assert_eq!(config.listing_base_url.as_str(), DEFAULT_LISTING_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn env_overrides_endpoints() {
        let vars = HashMap::from([
            ("BEZREALITKY_MARKERS_URL", "http://127.0.0.1:9000/api/record/markers"),
            ("BEZREALITKY_LISTING_BASE_URL", "http://127.0.0.1:9000/listing/"),
            ("BEZREALITKY_USER_AGENT", "scout-test"),
        ]);
        let config = build_config(lookup_from(vars)).unwrap();
        assert_eq!(
            config.markers_url.as_str(),
            "http://127.0.0.1:9000/api/record/markers"
        );
        assert_eq!(
            config.listing_base_url.as_str(),
            "http://127.0.0.1:9000/listing/"
        );
        assert_eq!(config.user_agent, "scout-test");
    }

    #[test]
    fn rejects_unparseable_url() {
        let vars = HashMap::from([("BEZREALITKY_LISTING_BASE_URL", "not a url")]);
        let err = build_config(lookup_from(vars)).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BEZREALITKY_LISTING_BASE_URL"),
            "expected InvalidEnvVar, got: {err:?}"
        );
    }
}
