//! 构建期配置
//!
//! 前端运行在浏览器中，没有运行时环境变量，配置在编译时通过
//! `option_env!` 注入；未设置的项使用默认值。
//!
//! | 变量 | 含义 | 默认值 |
//! |---|---|---|
//! | `PORTAL_API_URL` | 后端 API 基础地址 | `http://localhost:3000` |
//! | `PORTAL_ALERT_MS` | 提示条显示时长（毫秒） | `3500` |
//! | `PORTAL_LOG_LEVEL` | 日志级别 | `info` |

use log::LevelFilter;
use portal_shared::STORAGE_SESSION_KEY;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_ALERT_MS: u64 = 3500;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 不带结尾 `/` 的 API 基础地址
    pub api_base_url: String,
    pub alert_duration: Duration,
    pub session_key: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("PORTAL_API_URL"),
            option_env!("PORTAL_ALERT_MS"),
            option_env!("PORTAL_LOG_LEVEL"),
        )
    }

    fn from_values(api_url: Option<&str>, alert_ms: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let alert_ms = alert_ms
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_ALERT_MS);

        let log_level = log_level
            .and_then(|level| level.trim().parse::<LevelFilter>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            alert_duration: Duration::from_millis(alert_ms),
            session_key: STORAGE_SESSION_KEY.to_string(),
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.alert_duration, Duration::from_millis(3500));
        assert_eq!(config.session_key, "academicUser");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_values(
            Some("https://portal.example.edu/"),
            Some("1000"),
            Some("debug"),
        );
        assert_eq!(config.api_base_url, "https://portal.example.edu");
        assert_eq!(config.alert_duration, Duration::from_millis(1000));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("pronto"), Some("verbose"));
        assert_eq!(config, AppConfig::default());
    }
}
