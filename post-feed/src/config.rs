use crate::error::ConfigError;
use post_filter::SEARCH_DEBOUNCE;
use reqwest::Url;
use std::time::Duration;

/// 默认的帖子接口
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/posts";

/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 帖子客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// 帖子接口地址
    pub endpoint: Url,
    /// 搜索输入的静默窗口
    pub debounce: Duration,
    /// 请求超时
    pub timeout: Duration,
}

impl FeedConfig {
    /// 校验并创建配置
    pub fn new(endpoint: &str, debounce_ms: u64, timeout_secs: u64) -> Result<Self, ConfigError> {
        let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if debounce_ms == 0 {
            return Err(ConfigError::Zero("debounce-ms"));
        }
        if timeout_secs == 0 {
            return Err(ConfigError::Zero("timeout-secs"));
        }

        Ok(Self {
            endpoint: url,
            debounce: Duration::from_millis(debounce_ms),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 使用默认接口和默认时间参数
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(
            DEFAULT_ENDPOINT,
            SEARCH_DEBOUNCE.as_millis() as u64,
            DEFAULT_TIMEOUT.as_secs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FeedConfig::with_defaults().unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(matches!(
            FeedConfig::new("not a url", 500, 30),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            FeedConfig::new("ftp://example.com/posts", 500, 30),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn rejects_zero_durations() {
        assert!(matches!(
            FeedConfig::new(DEFAULT_ENDPOINT, 0, 30),
            Err(ConfigError::Zero("debounce-ms"))
        ));
        assert!(matches!(
            FeedConfig::new(DEFAULT_ENDPOINT, 500, 0),
            Err(ConfigError::Zero("timeout-secs"))
        ));
    }
}
