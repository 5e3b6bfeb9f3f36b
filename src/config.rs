use log::Level;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_CURRENCY_SYMBOL: &str = "₽";

/// Build-time settings. Values come from the environment of the `trunk build`
/// invocation, so a deployment bakes its API location into the bundle.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_prefix: String,
    pub currency_symbol: String,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            log_level: Level::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("FINANCE_API_BASE_URL"),
            option_env!("FINANCE_API_PREFIX"),
            option_env!("FINANCE_CURRENCY_SYMBOL"),
            option_env!("FINANCE_LOG_LEVEL"),
        )
    }

    fn from_values(
        base_url: Option<&str>,
        prefix: Option<&str>,
        currency_symbol: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
            api_prefix: prefix
                .map(normalize_prefix)
                .unwrap_or(defaults.api_prefix),
            currency_symbol: currency_symbol
                .map(str::to_string)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.currency_symbol),
            log_level: log_level
                .and_then(|v| v.parse::<Level>().ok())
                .unwrap_or(defaults.log_level),
        }
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_values(None, None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let config = AppConfig::from_values(Some("https://money.example.com/"), None, None, None);
        assert_eq!(config.api_base_url, "https://money.example.com");
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("v1/"), "/v1");
        assert_eq!(normalize_prefix("/api"), "/api");
        assert_eq!(normalize_prefix("/"), "");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig::from_values(None, None, None, Some("loud"));
        assert_eq!(config.log_level, Level::Info);
        let config = AppConfig::from_values(None, None, None, Some("debug"));
        assert_eq!(config.log_level, Level::Debug);
    }
}
